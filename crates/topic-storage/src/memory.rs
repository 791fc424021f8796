//! In-memory [`Storage`] implementation for fast unit and integration tests.
//!
//! Mirrors the reference implementation's in-memory testing adapter: no
//! persistence, no compression, just `HashMap`s guarded by a `Mutex`.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use topic_types::{ClusterState, Document, Timestamp, Topic};

use crate::error::StorageError;
use crate::port::Storage;

#[derive(Default)]
struct State {
    topics: HashMap<String, Topic>,
    docs: HashMap<String, Vec<Document>>,
    seen: HashMap<String, HashSet<String>>,
    cluster_states: HashMap<String, HashMap<String, ClusterState>>,
}

/// A `Storage` implementation backed by in-process `HashMap`s.
pub struct MemoryStorage {
    state: Mutex<State>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State::default()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn load_topic(&self, topic_id: &str) -> Result<Topic, StorageError> {
        self.state
            .lock()
            .unwrap()
            .topics
            .get(topic_id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(topic_id.to_string()))
    }

    fn save_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        self.state
            .lock()
            .unwrap()
            .topics
            .insert(topic.id.clone(), topic.clone());
        Ok(())
    }

    fn save_docs(&self, topic_id: &str, docs: &[Document]) -> Result<(), StorageError> {
        self.state
            .lock()
            .unwrap()
            .docs
            .entry(topic_id.to_string())
            .or_default()
            .extend_from_slice(docs);
        Ok(())
    }

    fn recent_docs(
        &self,
        topic_id: &str,
        window_days: u32,
        limit: usize,
        now_ts: Timestamp,
    ) -> Result<Vec<Document>, StorageError> {
        let cutoff = now_ts - window_days as f64 * topic_types::SECONDS_PER_DAY;
        let guard = self.state.lock().unwrap();
        let mut docs: Vec<Document> = guard
            .docs
            .get(topic_id)
            .map(|v| v.iter().filter(|d| d.ts >= cutoff).cloned().collect())
            .unwrap_or_default();
        docs.sort_by(|a, b| b.ts.partial_cmp(&a.ts).unwrap_or(std::cmp::Ordering::Equal));
        docs.truncate(limit);
        Ok(docs)
    }

    fn mark_seen_hashes(&self, topic_id: &str, hashes: &[String]) -> Result<(), StorageError> {
        self.state
            .lock()
            .unwrap()
            .seen
            .entry(topic_id.to_string())
            .or_default()
            .extend(hashes.iter().cloned());
        Ok(())
    }

    fn seen(&self, topic_id: &str) -> Result<HashSet<String>, StorageError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .seen
            .get(topic_id)
            .cloned()
            .unwrap_or_default())
    }

    fn load_cluster_state(
        &self,
        topic_id: &str,
        cluster_id: &str,
    ) -> Result<Option<ClusterState>, StorageError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .cluster_states
            .get(topic_id)
            .and_then(|m| m.get(cluster_id))
            .cloned())
    }

    fn save_cluster_state(&self, topic_id: &str, state: &ClusterState) -> Result<(), StorageError> {
        self.state
            .lock()
            .unwrap()
            .cluster_states
            .entry(topic_id.to_string())
            .or_default()
            .insert(state.cluster_id.clone(), state.clone());
        Ok(())
    }

    fn delete_cluster_state(&self, topic_id: &str, cluster_id: &str) -> Result<(), StorageError> {
        if let Some(m) = self.state.lock().unwrap().cluster_states.get_mut(topic_id) {
            m.remove(cluster_id);
        }
        Ok(())
    }

    fn list_cluster_states(&self, topic_id: &str) -> Result<Vec<ClusterState>, StorageError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .cluster_states
            .get(topic_id)
            .map(|m| m.values().cloned().collect())
            .unwrap_or_default())
    }

    fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        Ok(self.state.lock().unwrap().topics.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_types::TopicPolicy;

    #[test]
    fn save_and_load_topic_round_trips() {
        let store = MemoryStorage::new();
        let topic = Topic::new_root("rust", vec![], TopicPolicy::default(), 1.0);
        store.save_topic(&topic).unwrap();
        assert_eq!(store.load_topic(&topic.id).unwrap(), topic);
    }

    #[test]
    fn seen_hashes_accumulate_additively() {
        let store = MemoryStorage::new();
        store.mark_seen_hashes("t1", &["a".to_string()]).unwrap();
        store.mark_seen_hashes("t1", &["b".to_string()]).unwrap();
        let seen = store.seen("t1").unwrap();
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn cluster_state_delete_is_idempotent() {
        let store = MemoryStorage::new();
        store.delete_cluster_state("t1", "nope").unwrap();
        let state = ClusterState::fresh("cand_aaaaaaaa", 1.0);
        store.save_cluster_state("t1", &state).unwrap();
        store.delete_cluster_state("t1", "cand_aaaaaaaa").unwrap();
        assert!(store
            .load_cluster_state("t1", "cand_aaaaaaaa")
            .unwrap()
            .is_none());
    }

    #[test]
    fn unknown_topic_errors() {
        let store = MemoryStorage::new();
        assert!(matches!(
            store.load_topic("nope").unwrap_err(),
            StorageError::NotFound(_)
        ));
    }
}
