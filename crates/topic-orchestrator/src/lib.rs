//! Wires the external adapter ports and core engine services together to
//! drive one topic's lifecycle per tick, plus a read-only observer for
//! telemetry and test assertions.

mod error;
mod observer;
mod orchestrator;
mod summary;

pub use error::OrchestratorError;
pub use observer::{ClusterObservation, Observation, Observer, TopicObservation};
pub use orchestrator::{Orchestrator, TickConfig};
pub use summary::Summary;
