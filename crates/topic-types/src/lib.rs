//! # topic-types
//!
//! Domain entities for the topic-evolution engine: [`Topic`], [`Document`],
//! [`cluster::ClusterSnapshot`]/[`cluster::ClusterState`]/[`cluster::PromotionCheck`],
//! and the policy/rule bundles that parameterize a topic's lifecycle.
//!
//! This crate has no I/O and no storage dependency; it is pure data plus the
//! small amount of construction logic (id generation, hash derivation)
//! needed to build valid instances.

pub mod cluster;
pub mod document;
pub mod error;
pub mod policy;
pub mod timestamp;
pub mod topic;

pub use cluster::{ClusterSnapshot, ClusterState, PromotionCheck};
pub use document::Document;
pub use error::TypesError;
pub use policy::{NegativeRules, TopicPolicy};
pub use timestamp::{now_ts, Timestamp, SECONDS_PER_DAY};
pub use topic::Topic;
