//! Error types for the domain model crate.

use thiserror::Error;

/// Errors that can arise while constructing or validating domain entities.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("non-finite vector component in {context}")]
    NonFiniteVector { context: String },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
