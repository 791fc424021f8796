//! Errors surfaced by external adapter ports.

use thiserror::Error;

/// Errors an adapter implementation may return. The core never inspects the
/// variant beyond propagating it — adapters are free to wrap whatever
/// underlying client error they have behind [`PortError::Adapter`].
#[derive(Debug, Error)]
pub enum PortError {
    #[error("adapter error: {0}")]
    Adapter(String),

    #[error("request timed out")]
    Timeout,

    #[error("rate limited, retry after {retry_after_secs:?}s")]
    RateLimited { retry_after_secs: Option<u64> },
}
