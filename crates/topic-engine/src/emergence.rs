//! Evaluates whether a candidate cluster has earned promotion to a full
//! child topic, and performs the promotion.

use topic_ports::EmergenceNamer;
use topic_types::{ClusterSnapshot, ClusterState, Document, PromotionCheck, Timestamp, Topic};

/// Stateless: every method takes the topic/snapshot/state it needs.
pub struct EmergenceDetector;

impl EmergenceDetector {
    /// Builds the diagnostic record of all four promotion criteria.
    pub fn explain(&self, topic: &Topic, snapshot: &ClusterSnapshot, state: &ClusterState) -> PromotionCheck {
        let policy = &topic.policy;
        let cos_parent_ema = 1.0 - state.separation_ema;

        PromotionCheck {
            mass_ok: snapshot.size >= policy.m_min,
            cohesion_ok: state.cohesion_ema >= policy.tau_cohesion,
            separation_ok: cos_parent_ema <= policy.tau_separation,
            persistence_ok: state.persistence >= policy.persistence_min,
            size: snapshot.size,
            m_min: policy.m_min,
            cohesion_ema: state.cohesion_ema,
            tau_cohesion: policy.tau_cohesion,
            cos_parent_ema,
            tau_separation: policy.tau_separation,
            persistence: state.persistence,
            persistence_min: policy.persistence_min,
        }
    }

    /// Conjunction of the four criteria in [`Self::explain`].
    pub fn ready(&self, topic: &Topic, snapshot: &ClusterSnapshot, state: &ClusterState) -> bool {
        self.explain(topic, snapshot, state).ready()
    }

    /// Constructs a child topic from a promoted candidate. The child shares
    /// no mutable state with `parent`: `seeds`/`negative_rules`/`policy` are
    /// cloned, `centroid_long` is a fresh copy of the snapshot centroid.
    pub async fn promote(
        &self,
        parent: &Topic,
        snapshot: &ClusterSnapshot,
        namer: &dyn EmergenceNamer,
        cluster_docs: &[Document],
        now_ts: Timestamp,
    ) -> Topic {
        let (name, seeds) = namer.name_and_seeds(cluster_docs).await;
        Topic {
            id: ulid::Ulid::new().to_string(),
            name,
            seeds,
            negative_rules: parent.negative_rules.clone(),
            policy: parent.policy.clone(),
            centroid_long: Some(snapshot.centroid_now.clone()),
            doc_count: snapshot.size as u64,
            centroid_short_ema: None,
            emerged_from: Some(parent.id.clone()),
            children: Vec::new(),
            last_updated_ts: now_ts,
        }
    }
}
