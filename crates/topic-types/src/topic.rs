//! The topic model: a stable node in the evolving topic tree.

use serde::{Deserialize, Serialize};
use ulid::Ulid;

use topic_vector::Vector;

use crate::policy::{NegativeRules, TopicPolicy};
use crate::timestamp::Timestamp;

/// A stable node in the topic tree.
///
/// Invariant: `centroid_long` is `None` iff `doc_count == 0`. Mutated only
/// inside a tick on its own id; never deleted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    /// Unique id (a ULID).
    pub id: String,

    /// Human-readable name/label.
    pub name: String,

    /// Query seed terms, updated as subtopics are promoted.
    pub seeds: Vec<String>,

    /// Block-list rules filtering irrelevant documents.
    pub negative_rules: NegativeRules,

    /// Thresholds and smoothing factors governing this topic's lifecycle.
    pub policy: TopicPolicy,

    /// Long-term identity centroid, updated incrementally. `None` until the
    /// first document is folded in.
    pub centroid_long: Option<Vector>,

    /// Cumulative count of documents folded into `centroid_long`.
    pub doc_count: u64,

    /// Optional short-term drift centroid (EMA over recent documents).
    pub centroid_short_ema: Option<Vector>,

    /// Parent topic id, `None` for roots.
    pub emerged_from: Option<String>,

    /// Child topic ids.
    #[serde(default)]
    pub children: Vec<String>,

    /// Last time this topic was updated by a tick.
    pub last_updated_ts: Timestamp,
}

impl Topic {
    /// Construct a fresh root topic (no parent, no documents yet).
    pub fn new_root(name: impl Into<String>, seeds: Vec<String>, policy: TopicPolicy, now_ts: Timestamp) -> Self {
        Self {
            id: Ulid::new().to_string(),
            name: name.into(),
            seeds,
            negative_rules: NegativeRules::default(),
            policy,
            centroid_long: None,
            doc_count: 0,
            centroid_short_ema: None,
            emerged_from: None,
            children: Vec::new(),
            last_updated_ts: now_ts,
        }
    }

    /// Whether this topic has ingested at least one document.
    pub fn has_centroid(&self) -> bool {
        self.centroid_long.is_some()
    }
}
