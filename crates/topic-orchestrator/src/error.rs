//! Orchestrator error types.

use thiserror::Error;

use topic_engine::EngineError;
use topic_ports::PortError;
use topic_storage::StorageError;

/// Errors a tick can fail with. A tick is all-or-nothing: any variant here
/// aborts the tick, leaving whatever had already been persisted in place —
/// the next tick simply retries from the durable state.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("adapter error: {0}")]
    Port(#[from] PortError),
}
