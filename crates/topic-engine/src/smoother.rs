//! EMA smoothing of a candidate cluster's metrics across ticks.

use topic_storage::Storage;
use topic_types::{ClusterSnapshot, ClusterState, Timestamp, Topic};
use topic_vector::ema;

use crate::error::EngineError;

/// Smooths a candidate's centroid, cohesion, and separation, and updates the
/// persistence counter against the current tick's qualifying criteria.
pub struct ClusterSmoother;

impl ClusterSmoother {
    /// Applies one tick of EMA smoothing and persists the result.
    ///
    /// Step 4 intentionally mixes the raw `snapshot.size` (a current-tick
    /// observation) with the smoothed `cohesion_ema`/`separation_ema`: size
    /// noise is acceptable per-tick, cohesion/separation noise is not.
    pub fn update(
        &self,
        storage: &dyn Storage,
        topic: &Topic,
        snapshot: &ClusterSnapshot,
        mut state: ClusterState,
        now_ts: Timestamp,
    ) -> Result<ClusterState, EngineError> {
        let beta = topic.policy.ema_beta_cluster;

        state.centroid_ema = Some(ema(
            state.centroid_ema.as_deref(),
            &snapshot.centroid_now,
            beta,
        ));
        state.cohesion_ema = (1.0 - beta) * state.cohesion_ema + beta * snapshot.cohesion_now;
        state.separation_ema = (1.0 - beta) * state.separation_ema + beta * snapshot.separation_now;

        let meets = snapshot.size >= topic.policy.m_min
            && state.cohesion_ema >= topic.policy.tau_cohesion
            && (1.0 - state.separation_ema) <= topic.policy.tau_separation;

        state.persistence = if meets { state.persistence + 1 } else { 0 };
        state.last_seen_ts = now_ts;

        storage.save_cluster_state(&topic.id, &state)?;
        Ok(state)
    }
}
