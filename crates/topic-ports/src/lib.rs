//! External adapter ports for the topic-evolution engine: the async
//! boundary between the orchestrator's pure sequencing and the outside
//! world, plus a dependency-free reference adapter set for tests.

mod adapters;
mod error;
mod hdbscan_clusterer;
mod reference;
mod types;

pub use adapters::{
    Clusterer, Deduper, Embedder, EmergenceNamer, Fetcher, Filter, QueryPlanner, Ranker, Searcher,
};
pub use error::PortError;
pub use hdbscan_clusterer::HdbscanClusterer;
pub use reference::{
    KMeans2Clusterer, PassFilter, SeenDeduper, SimpleNamer, SimpleRanker, ToyEmbedder, ToyFetcher,
    ToyQueryPlanner, ToySearcher,
};
pub use types::{FetchedPage, SearchHit};
