//! RocksDB-backed implementation of the [`Storage`] port.

use std::collections::HashSet;
use std::path::Path;

use rocksdb::{ColumnFamily, Options, DB};
use tracing::{debug, info};

use topic_types::{ClusterState, Document, Timestamp, Topic};

use crate::column_families::{build_cf_descriptors, CF_CLUSTER_STATES, CF_DOCS, CF_SEEN, CF_TOPICS};
use crate::error::StorageError;
use crate::keys::{
    cluster_state_key, cluster_state_prefix, doc_key, doc_prefix, seen_key, seen_prefix, topic_key,
};
use crate::port::Storage;

/// RocksDB-backed storage adapter, one process per database directory.
pub struct RocksStorage {
    db: DB,
}

impl RocksStorage {
    /// Open or create the database at `path`, creating all column families
    /// on first use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();

        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let db = DB::open_cf_descriptors(&opts, path, build_cf_descriptors())?;

        info!(path = ?path, "Opened topic storage");
        Ok(Self { db })
    }

    fn cf(&self, name: &str) -> Result<&ColumnFamily, StorageError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StorageError::ColumnFamilyNotFound(name.to_string()))
    }

    fn put_json<T: serde::Serialize>(&self, cf: &str, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.db.put_cf(self.cf(cf)?, key.as_bytes(), bytes)?;
        Ok(())
    }

    fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        cf: &str,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.db.get_cf(self.cf(cf)?, key.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    fn scan_prefix_json<T: serde::de::DeserializeOwned>(
        &self,
        cf: &str,
        prefix: &str,
    ) -> Result<Vec<T>, StorageError> {
        let mut out = Vec::new();
        let iter = self
            .db
            .prefix_iterator_cf(self.cf(cf)?, prefix.as_bytes());
        for item in iter {
            let (key, value) = item?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            out.push(serde_json::from_slice(&value)?);
        }
        Ok(out)
    }
}

impl Storage for RocksStorage {
    fn load_topic(&self, topic_id: &str) -> Result<Topic, StorageError> {
        self.get_json(CF_TOPICS, &topic_key(topic_id))?
            .ok_or_else(|| StorageError::NotFound(topic_id.to_string()))
    }

    fn save_topic(&self, topic: &Topic) -> Result<(), StorageError> {
        self.put_json(CF_TOPICS, &topic_key(&topic.id), topic)?;
        debug!(topic_id = %topic.id, doc_count = topic.doc_count, "Saved topic");
        Ok(())
    }

    fn save_docs(&self, topic_id: &str, docs: &[Document]) -> Result<(), StorageError> {
        let mut batch = rocksdb::WriteBatch::default();
        let cf = self.cf(CF_DOCS)?;
        for doc in docs {
            let ts_millis = (doc.ts * 1000.0).round() as i64;
            let key = doc_key(topic_id, ts_millis, &doc.id);
            let bytes = serde_json::to_vec(doc)?;
            batch.put_cf(cf, key.as_bytes(), bytes);
        }
        self.db.write(batch)?;
        debug!(topic_id = %topic_id, count = docs.len(), "Appended documents");
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
        let mut docs: Vec<Document> = self
            .scan_prefix_json(CF_DOCS, &doc_prefix(topic_id))?
            .into_iter()
            .filter(|d: &Document| d.ts >= cutoff)
            .collect();
        // Keys sort chronologically ascending; we want most-recent-first.
        docs.sort_by(|a, b| b.ts.partial_cmp(&a.ts).unwrap_or(std::cmp::Ordering::Equal));
        docs.truncate(limit);
        Ok(docs)
    }

    fn mark_seen_hashes(&self, topic_id: &str, hashes: &[String]) -> Result<(), StorageError> {
        let mut batch = rocksdb::WriteBatch::default();
        let cf = self.cf(CF_SEEN)?;
        for hash in hashes {
            batch.put_cf(cf, seen_key(topic_id, hash).as_bytes(), []);
        }
        self.db.write(batch)?;
        Ok(())
    }

    fn seen(&self, topic_id: &str) -> Result<HashSet<String>, StorageError> {
        let prefix = seen_prefix(topic_id);
        let mut out = HashSet::new();
        let iter = self.db.prefix_iterator_cf(self.cf(CF_SEEN)?, prefix.as_bytes());
        for item in iter {
            let (key, _) = item?;
            if !key.starts_with(prefix.as_bytes()) {
                break;
            }
            let key_str = String::from_utf8_lossy(&key);
            if let Some(hash) = key_str.strip_prefix(&prefix) {
                out.insert(hash.to_string());
            }
        }
        Ok(out)
    }

    fn load_cluster_state(
        &self,
        topic_id: &str,
        cluster_id: &str,
    ) -> Result<Option<ClusterState>, StorageError> {
        self.get_json(CF_CLUSTER_STATES, &cluster_state_key(topic_id, cluster_id))
    }

    fn save_cluster_state(&self, topic_id: &str, state: &ClusterState) -> Result<(), StorageError> {
        self.put_json(
            CF_CLUSTER_STATES,
            &cluster_state_key(topic_id, &state.cluster_id),
            state,
        )
    }

    fn delete_cluster_state(&self, topic_id: &str, cluster_id: &str) -> Result<(), StorageError> {
        self.db
            .delete_cf(self.cf(CF_CLUSTER_STATES)?, cluster_state_key(topic_id, cluster_id).as_bytes())?;
        Ok(())
    }

    fn list_cluster_states(&self, topic_id: &str) -> Result<Vec<ClusterState>, StorageError> {
        self.scan_prefix_json(CF_CLUSTER_STATES, &cluster_state_prefix(topic_id))
    }

    fn list_topics(&self) -> Result<Vec<Topic>, StorageError> {
        self.scan_prefix_json(CF_TOPICS, "topic:")
    }
}
