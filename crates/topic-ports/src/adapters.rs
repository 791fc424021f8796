//! External adapter ports: the boundary between the orchestrator's pure
//! sequencing logic and the outside world (search engines, fetchers,
//! embedding models). All are `async` — even an adapter with no real I/O
//! (the reference namer, say) resolves immediately, keeping the
//! orchestrator's call sites uniform.

use async_trait::async_trait;

use topic_types::{ClusterSnapshot, Document, NegativeRules, Topic};
use topic_vector::Vector;

use crate::error::PortError;
use crate::types::{FetchedPage, SearchHit};

/// Builds concrete search queries from a topic's current state (seeds,
/// optionally expanded near its centroid).
#[async_trait]
pub trait QueryPlanner: Send + Sync {
    async fn plan(&self, topic: &Topic, k_queries: usize) -> Result<Vec<String>, PortError>;
}

/// Executes a single query against a search index/API.
#[async_trait]
pub trait Searcher: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, PortError>;
}

/// Fetches a page's text and best-effort metadata.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PortError>;
}

/// Maps texts to fixed-dimension embeddings. The encoder is opaque to the
/// core — only the resulting geometry matters.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, PortError>;
}

/// Drops documents that violate a topic's negative rules (blocked terms,
/// domains, or types).
#[async_trait]
pub trait Filter: Send + Sync {
    async fn apply(&self, negative: &NegativeRules, docs: Vec<Document>) -> Vec<Document>;
}

/// Drops documents whose content hash is already in `seen_hashes`, and any
/// near-duplicates within the batch.
#[async_trait]
pub trait Deduper: Send + Sync {
    async fn drop_duplicates(
        &self,
        seen_hashes: &std::collections::HashSet<String>,
        docs: Vec<Document>,
    ) -> Vec<Document>;
}

/// Scores and diversifies candidate documents, returning the top `k` to
/// accept this tick.
#[async_trait]
pub trait Ranker: Send + Sync {
    async fn select(&self, topic: &Topic, docs: Vec<Document>, k: usize) -> Vec<Document>;
}

/// Clusters a recent window of documents into raw, per-tick snapshots.
/// Cluster ids returned here are algorithm-local and not stable across
/// ticks — the matcher resolves them to stable persisted state.
#[async_trait]
pub trait Clusterer: Send + Sync {
    async fn cluster(&self, centroid_long: Option<&Vector>, docs_window: &[Document]) -> Vec<ClusterSnapshot>;
}

/// Derives a human-readable name and seed terms for a newly promoted child
/// topic from its member documents.
#[async_trait]
pub trait EmergenceNamer: Send + Sync {
    async fn name_and_seeds(&self, cluster_docs: &[Document]) -> (String, Vec<String>);
}
