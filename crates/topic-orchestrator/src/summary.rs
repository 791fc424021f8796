//! The machine-readable result of one tick.

use serde::{Deserialize, Serialize};

use topic_types::Timestamp;

/// Compact summary of one tick, suitable for logging or as a driver's exit
/// payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Documents accepted (persisted) this tick.
    pub ingested: usize,
    /// Raw cluster snapshots seen in the recency window this tick.
    pub clusters_observed: usize,
    /// `(id, name)` for any child topics promoted this tick.
    pub promotions: Vec<(String, String)>,
    /// Echoes the input topic id, for downstream correlation.
    pub topic_id: String,
    /// Wall-clock timestamp this tick ran at.
    pub updated_at: Timestamp,
}
