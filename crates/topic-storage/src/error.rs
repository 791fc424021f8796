//! Storage error types.

use thiserror::Error;

/// Errors surfaced by a [`crate::port::Storage`] implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("RocksDB error: {0}")]
    RocksDb(#[from] rocksdb::Error),

    #[error("column family not found: {0}")]
    ColumnFamilyNotFound(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("topic not found: {0}")]
    NotFound(String),

    #[error("cluster state not found for topic {topic_id}, cluster {cluster_id}")]
    ClusterStateNotFound { topic_id: String, cluster_id: String },
}
