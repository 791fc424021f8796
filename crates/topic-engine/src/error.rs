//! Engine error types.

use thiserror::Error;

use topic_storage::StorageError;

/// Errors surfaced by the topic-evolution core. All variants wrap storage
/// failures — the engine's own math never fails on finite input.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
