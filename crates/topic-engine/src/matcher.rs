//! Resolves per-tick cluster snapshots onto stable, persisted candidate
//! states.

use rand::RngCore;
use tracing::debug;

use topic_storage::Storage;
use topic_types::{ClusterSnapshot, ClusterState, Timestamp, Topic};
use topic_vector::cos;

use crate::error::EngineError;

/// Matches snapshots to existing candidate states by cosine similarity, or
/// mints a fresh one when nothing qualifies.
pub struct ClusterMatcher {
    tau_match: f32,
}

impl ClusterMatcher {
    pub fn new(tau_match: f32) -> Self {
        Self { tau_match }
    }

    /// All candidate states currently persisted for a topic.
    pub fn list_states(
        &self,
        storage: &dyn Storage,
        topic_id: &str,
    ) -> Result<Vec<ClusterState>, EngineError> {
        Ok(storage.list_cluster_states(topic_id)?)
    }

    /// Greedy best match by `cos(snapshot.centroid_now, state.centroid_ema)`
    /// among states with a non-null centroid; states with no centroid yet
    /// are invisible to matching. Mints and persists a fresh state when no
    /// candidate reaches `tau_match`.
    pub fn match_or_create(
        &self,
        storage: &dyn Storage,
        topic: &Topic,
        snapshot: &ClusterSnapshot,
        now_ts: Timestamp,
    ) -> Result<ClusterState, EngineError> {
        let states = self.list_states(storage, &topic.id)?;

        let mut best: Option<&ClusterState> = None;
        let mut best_sim = -1.0_f32;
        for state in &states {
            let Some(centroid) = state.centroid_ema.as_deref() else {
                continue;
            };
            let sim = cos(&snapshot.centroid_now, centroid);
            if sim > best_sim {
                best = Some(state);
                best_sim = sim;
            }
        }

        if let Some(state) = best {
            if best_sim >= self.tau_match {
                debug!(topic_id = %topic.id, cluster_id = %state.cluster_id, sim = best_sim, "Matched existing cluster state");
                return Ok(state.clone());
            }
        }

        let cluster_id = fresh_cluster_id();
        debug!(topic_id = %topic.id, cluster_id = %cluster_id, "No adequate match, minting new cluster state");
        let state = ClusterState::fresh(cluster_id, now_ts);
        storage.save_cluster_state(&topic.id, &state)?;
        Ok(state)
    }

    /// Deletes any state whose `now - last_seen_ts >= max_age_days * 86400`.
    /// Expiry is unconditional: a state untouched this tick is eligible.
    pub fn expire_stale(
        &self,
        storage: &dyn Storage,
        topic_id: &str,
        max_age_days: u32,
        now_ts: Timestamp,
    ) -> Result<(), EngineError> {
        let max_age_seconds = max_age_days as f64 * topic_types::SECONDS_PER_DAY;
        for state in self.list_states(storage, topic_id)? {
            let age = now_ts - state.last_seen_ts;
            if age >= max_age_seconds {
                debug!(topic_id = %topic_id, cluster_id = %state.cluster_id, age, "Expiring stale cluster state");
                storage.delete_cluster_state(topic_id, &state.cluster_id)?;
            }
        }
        Ok(())
    }
}

/// `cand_<8 hex chars>` drawn from a cryptographic random source.
fn fresh_cluster_id() -> String {
    let mut bytes = [0u8; 4];
    rand::rng().fill_bytes(&mut bytes);
    format!("cand_{}", hex_encode(&bytes))
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
