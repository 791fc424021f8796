//! Driver-level error type. Library crates below this one use concrete
//! `thiserror` enums; this binary is the one place `anyhow` wraps them for
//! display at the process boundary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("corpus error: {0}")]
    Corpus(String),

    #[error("storage error: {0}")]
    Storage(#[from] topic_storage::StorageError),

    #[error("orchestrator error: {0}")]
    Orchestrator(#[from] topic_orchestrator::OrchestratorError),
}
