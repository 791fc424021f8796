//! Wire-ish shapes exchanged with external adapters, distinct from the
//! persisted domain model in `topic-types`.

use topic_types::Timestamp;
use topic_vector::Vector;

/// A single search-result hit, before the page has been fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub url: String,
}

/// A fetched page's raw content and best-effort metadata. Every field beyond
/// `url`/`text` is an adapter-supplied heuristic; the orchestrator applies
/// the defaults documented on [`FetchedPage`]'s fields when assembling a
/// `Document`.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedPage {
    pub url: String,
    pub text: String,
    /// Publish time, if the adapter could determine one.
    pub ts: Option<Timestamp>,
    pub domain: String,
    pub title: String,
    /// `"paper" | "repo" | "blog" | "news" | ...`; `"unknown"` if undetermined.
    pub dtype: String,
    /// 0..1 trust/importance; `0.5` if the adapter has no opinion.
    pub authority: Option<f32>,
    /// Strong content hash, if the adapter can derive one cheaply
    /// (otherwise the orchestrator derives one from `text` via
    /// `Document::derive_hash`).
    pub hash: Option<String>,
    pub arm_id: String,
    pub sample_weight: f32,
}

/// An embedded vector paired back with the text it came from, in case an
/// adapter batches/reorders internally.
pub type Embedding = Vector;
