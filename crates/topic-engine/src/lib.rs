//! Pure domain logic for topic evolution: folding accepted documents into a
//! topic's long-term centroid, matching and smoothing candidate clusters
//! across ticks, and evaluating/performing promotion to child topics.
//!
//! Everything here is stateless aside from the `Topic`/`ClusterState`
//! mutations each operation makes explicit; no service in this crate retains
//! process-wide state or talks to the network directly — that lives behind
//! `topic-ports`.

mod emergence;
mod error;
mod matcher;
mod smoother;
mod updater;

pub use emergence::EmergenceDetector;
pub use error::EngineError;
pub use matcher::ClusterMatcher;
pub use smoother::ClusterSmoother;
pub use updater::{apply, apply_weighted};
