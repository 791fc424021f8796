//! Durable storage for the topic-evolution engine: topics, their document
//! logs, seen-hash sets, and candidate-cluster states, behind a single
//! [`Storage`] port with a RocksDB-backed implementation and an in-memory
//! one for tests.

mod column_families;
mod error;
mod keys;
mod memory;
mod port;
mod rocks;

pub use column_families::{ALL_CF_NAMES, CF_CLUSTER_STATES, CF_DOCS, CF_SEEN, CF_TOPICS};
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use port::Storage;
pub use rocks::RocksStorage;
