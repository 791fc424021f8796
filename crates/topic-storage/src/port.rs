//! The storage port: the single interface the core depends on for
//! durability. See `SPEC_FULL.md` §4.2.

use topic_types::{ClusterState, Document, Timestamp, Topic};

use crate::error::StorageError;

/// Durable storage for topics, their document logs, seen-hash sets, and
/// candidate-cluster states.
///
/// Implementations make no concurrency guarantees beyond serial access from
/// a single tick on a single topic id; see the design doc §5. The core never
/// calls these methods concurrently for the same topic id — that
/// serialization is the driver's responsibility.
pub trait Storage: Send + Sync {
    /// Load a topic by id. Fails with [`StorageError::NotFound`] if unknown.
    fn load_topic(&self, topic_id: &str) -> Result<Topic, StorageError>;

    /// Idempotent upsert. Implicitly initializes an empty document log and
    /// seen-hash set for the topic on first save (both are modeled as
    /// prefix-scanned key ranges, so no explicit initialization is needed).
    fn save_topic(&self, topic: &Topic) -> Result<(), StorageError>;

    /// Append documents to the topic's log. No duplicate detection here —
    /// dedup happens upstream, before this call.
    fn save_docs(&self, topic_id: &str, docs: &[Document]) -> Result<(), StorageError>;

    /// Documents with `ts >= now - window_days*86400`, most recent first,
    /// truncated to `limit`. The window bound is advisory: an implementation
    /// that returns a slightly larger window must still honor `limit`.
    fn recent_docs(
        &self,
        topic_id: &str,
        window_days: u32,
        limit: usize,
        now_ts: Timestamp,
    ) -> Result<Vec<Document>, StorageError>;

    /// Additive union of `hashes` into the topic's seen-hash set.
    fn mark_seen_hashes(&self, topic_id: &str, hashes: &[String]) -> Result<(), StorageError>;

    /// Current seen-hash set for a topic.
    fn seen(&self, topic_id: &str) -> Result<std::collections::HashSet<String>, StorageError>;

    /// Load a candidate-cluster state by `(topic_id, cluster_id)`.
    fn load_cluster_state(
        &self,
        topic_id: &str,
        cluster_id: &str,
    ) -> Result<Option<ClusterState>, StorageError>;

    /// Upsert a candidate-cluster state, keyed by `(topic_id, state.cluster_id)`.
    fn save_cluster_state(&self, topic_id: &str, state: &ClusterState) -> Result<(), StorageError>;

    /// Idempotent delete of a candidate-cluster state.
    fn delete_cluster_state(&self, topic_id: &str, cluster_id: &str) -> Result<(), StorageError>;

    /// All candidate-cluster states currently persisted for a topic.
    fn list_cluster_states(&self, topic_id: &str) -> Result<Vec<ClusterState>, StorageError>;

    /// All known topics, for the observer and housekeeping drivers.
    fn list_topics(&self) -> Result<Vec<Topic>, StorageError>;
}
