//! Candidate-cluster models: the ephemeral per-tick snapshot emitted by the
//! clusterer, and its persisted, EMA-smoothed counterpart tracked across
//! ticks.

use serde::{Deserialize, Serialize};

use topic_vector::Vector;

use crate::timestamp::Timestamp;

/// A per-tick observation of a candidate sub-cluster, emitted fresh by the
/// clusterer every tick. `cluster_id` is algorithm-local and not stable
/// across ticks — never persist it directly as a key; the matcher resolves
/// it to a stable [`ClusterState`] id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterSnapshot {
    /// Algorithm-local label for this tick only (e.g. "C0", "C1").
    pub cluster_id: String,

    /// Raw centroid computed fresh from this tick's window members.
    pub centroid_now: Vector,

    /// Number of documents assigned to this cluster this tick.
    pub size: usize,

    /// Mean cosine similarity of members to `centroid_now`, in `[-1, 1]`.
    pub cohesion_now: f32,

    /// `1 - cos(parent.centroid_long, centroid_now)`. Falls back to `0.0`
    /// when the parent has no centroid yet (documented edge case: this
    /// biases early-life topics against promotion).
    pub separation_now: f32,

    /// Ids of window documents belonging to this cluster.
    pub doc_ids: Vec<String>,
}

/// The persisted, EMA-smoothed projection of a candidate cluster across
/// ticks. Created by the matcher, updated by the smoother, deleted by the
/// detector on promotion or by expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterState {
    /// Stable engine-assigned id, format `cand_<8 hex chars>`.
    pub cluster_id: String,

    /// EMA of the candidate centroid. `None` until the first smoothing step.
    pub centroid_ema: Option<Vector>,

    /// EMA of cohesion across ticks.
    #[serde(default)]
    pub cohesion_ema: f32,

    /// EMA of separation across ticks.
    #[serde(default)]
    pub separation_ema: f32,

    /// Count of consecutive ticks this candidate has met all qualifying
    /// criteria. Resets to 0 on any tick that fails to qualify.
    #[serde(default)]
    pub persistence: u32,

    /// Last tick timestamp this state was touched; monotonically
    /// non-decreasing.
    pub last_seen_ts: Timestamp,
}

impl ClusterState {
    /// Construct a freshly-created candidate state: zeroed scalar EMAs, no
    /// centroid yet, zero persistence.
    pub fn fresh(cluster_id: impl Into<String>, now_ts: Timestamp) -> Self {
        Self {
            cluster_id: cluster_id.into(),
            centroid_ema: None,
            cohesion_ema: 0.0,
            separation_ema: 0.0,
            persistence: 0,
            last_seen_ts: now_ts,
        }
    }
}

/// Diagnostic record summarizing the four promotion criteria at the instant
/// of evaluation. Purely derivative; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionCheck {
    pub mass_ok: bool,
    pub cohesion_ok: bool,
    pub separation_ok: bool,
    pub persistence_ok: bool,

    // Raw values, useful for debugging/tuning.
    pub size: usize,
    pub m_min: usize,
    pub cohesion_ema: f32,
    pub tau_cohesion: f32,
    /// `1 - separation_ema`, i.e. the smoothed cosine to the parent.
    pub cos_parent_ema: f32,
    pub tau_separation: f32,
    pub persistence: u32,
    pub persistence_min: u32,
}

impl PromotionCheck {
    /// Conjunction of all four criteria.
    pub fn ready(&self) -> bool {
        self.mass_ok && self.cohesion_ok && self.separation_ok && self.persistence_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_has_no_centroid_and_zero_persistence() {
        let s = ClusterState::fresh("cand_deadbeef", 10.0);
        assert!(s.centroid_ema.is_none());
        assert_eq!(s.persistence, 0);
        assert_eq!(s.cohesion_ema, 0.0);
        assert_eq!(s.separation_ema, 0.0);
        assert_eq!(s.last_seen_ts, 10.0);
    }

    #[test]
    fn promotion_check_ready_requires_all_four() {
        let base = PromotionCheck {
            mass_ok: true,
            cohesion_ok: true,
            separation_ok: true,
            persistence_ok: true,
            size: 10,
            m_min: 6,
            cohesion_ema: 0.6,
            tau_cohesion: 0.55,
            cos_parent_ema: 0.2,
            tau_separation: 0.7,
            persistence: 3,
            persistence_min: 2,
        };
        assert!(base.ready());

        let mut failing = base.clone();
        failing.persistence_ok = false;
        assert!(!failing.ready());
    }

    #[test]
    fn round_trips_through_json() {
        let snap = ClusterSnapshot {
            cluster_id: "C0".into(),
            centroid_now: vec![1.0, 2.0],
            size: 4,
            cohesion_now: 0.8,
            separation_now: 0.1,
            doc_ids: vec!["a".into(), "b".into()],
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: ClusterSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snap, back);
    }
}
