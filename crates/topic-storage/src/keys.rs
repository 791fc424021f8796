//! Key formatting for the RocksDB-backed storage adapter.
//!
//! Keys are plain, sortable byte strings rather than a binary packed format
//! — this keeps the on-disk layout debuggable with any RocksDB key viewer,
//! matching the reference implementation's `EventKey`/`OutboxKey` style.

/// `topic:{topic_id}`
pub fn topic_key(topic_id: &str) -> String {
    format!("topic:{topic_id}")
}

/// `doc:{topic_id}:{ts_millis:020}:{doc_id}` — zero-padded millis timestamp
/// sorts lexicographically in chronological order; callers wanting
/// most-recent-first reverse-iterate.
pub fn doc_key(topic_id: &str, ts_millis: i64, doc_id: &str) -> String {
    format!("doc:{topic_id}:{ts_millis:020}:{doc_id}")
}

/// Prefix matching every document key for a topic.
pub fn doc_prefix(topic_id: &str) -> String {
    format!("doc:{topic_id}:")
}

/// `seen:{topic_id}:{hash}` — one key per seen hash so `mark_seen_hashes` is
/// an additive batch of independent puts, never a read-modify-write.
pub fn seen_key(topic_id: &str, hash: &str) -> String {
    format!("seen:{topic_id}:{hash}")
}

/// Prefix matching every seen-hash key for a topic.
pub fn seen_prefix(topic_id: &str) -> String {
    format!("seen:{topic_id}:")
}

/// `cluster:{topic_id}:{cluster_id}`
pub fn cluster_state_key(topic_id: &str, cluster_id: &str) -> String {
    format!("cluster:{topic_id}:{cluster_id}")
}

/// Prefix matching every cluster-state key for a topic.
pub fn cluster_state_prefix(topic_id: &str) -> String {
    format!("cluster:{topic_id}:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doc_keys_sort_chronologically() {
        let early = doc_key("t1", 1_000, "a");
        let late = doc_key("t1", 2_000, "b");
        assert!(early < late);
    }

    #[test]
    fn doc_prefix_matches_only_its_topic() {
        let k1 = doc_key("t1", 1_000, "a");
        let k2 = doc_key("t2", 1_000, "a");
        assert!(k1.starts_with(&doc_prefix("t1")));
        assert!(!k2.starts_with(&doc_prefix("t1")));
    }

    #[test]
    fn seen_prefix_matches_its_topic_only() {
        let k = seen_key("t1", "abc123");
        assert!(k.starts_with(&seen_prefix("t1")));
    }
}
