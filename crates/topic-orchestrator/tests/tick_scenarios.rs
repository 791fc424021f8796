//! End-to-end tick scenarios, driven entirely through `MemoryStorage` and
//! deterministic test doubles — no network, no real database.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use topic_orchestrator::{Orchestrator, TickConfig};
use topic_ports::{
    Clusterer, Embedder, FetchedPage, PassFilter, PortError, SeenDeduper, SimpleNamer, SimpleRanker,
    ToyFetcher, ToyQueryPlanner, ToySearcher,
};
use topic_storage::{MemoryStorage, Storage};
use topic_types::{ClusterSnapshot, ClusterState, Document, Timestamp, Topic, TopicPolicy};
use topic_vector::Vector;

/// Returns a scripted batch of cluster snapshots per call, one batch per
/// tick; once exhausted it reports no clusters. Mirrors `ToySearcher`'s
/// scripted-batch pattern so lifecycle scenarios can control exactly what
/// the clusterer "sees" without wiring up real embeddings.
struct ScriptedClusterer {
    ticks: Mutex<Vec<Vec<ClusterSnapshot>>>,
}

impl ScriptedClusterer {
    fn new(ticks: Vec<Vec<ClusterSnapshot>>) -> Self {
        Self {
            ticks: Mutex::new(ticks),
        }
    }

    fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl Clusterer for ScriptedClusterer {
    async fn cluster(&self, _centroid_long: Option<&Vector>, _docs_window: &[Document]) -> Vec<ClusterSnapshot> {
        let mut ticks = self.ticks.lock().unwrap();
        if ticks.is_empty() {
            return Vec::new();
        }
        ticks.remove(0)
    }
}

/// Looks texts up in a fixed table; lets a test pin exact embedding vectors
/// instead of deriving them from `ToyEmbedder`'s hash buckets.
struct FixedEmbedder {
    table: HashMap<String, Vector>,
}

impl FixedEmbedder {
    fn new(table: Vec<(&str, Vector)>) -> Self {
        Self {
            table: table.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, PortError> {
        texts
            .iter()
            .map(|t| {
                self.table
                    .get(t)
                    .cloned()
                    .ok_or_else(|| PortError::Adapter(format!("no fixed vector for text: {t}")))
            })
            .collect()
    }
}

fn save_topic(storage: &MemoryStorage, seeds: Vec<&str>, policy: TopicPolicy, now_ts: Timestamp) -> Topic {
    let topic = Topic::new_root("t", seeds.into_iter().map(String::from).collect(), policy, now_ts);
    storage.save_topic(&topic).unwrap();
    topic
}

fn page(url: &str, text: &str, hash: &str) -> FetchedPage {
    FetchedPage {
        url: url.to_string(),
        text: text.to_string(),
        ts: None,
        domain: "example.com".to_string(),
        title: String::new(),
        dtype: "blog".to_string(),
        authority: Some(0.5),
        hash: Some(hash.to_string()),
        arm_id: String::new(),
        sample_weight: 1.0,
    }
}

fn snapshot(cluster_id: &str, centroid: Vector, size: usize, cohesion_now: f32, separation_now: f32) -> ClusterSnapshot {
    ClusterSnapshot {
        cluster_id: cluster_id.to_string(),
        centroid_now: centroid,
        size,
        cohesion_now,
        separation_now,
        doc_ids: Vec::new(),
    }
}

#[tokio::test]
async fn empty_stream_yields_an_all_zero_summary() {
    let storage = MemoryStorage::new();
    let topic = save_topic(&storage, vec!["rust"], TopicPolicy::default(), 0.0);

    let planner = ToyQueryPlanner;
    let searcher = ToySearcher::new(vec![vec![]]);
    let fetcher = ToyFetcher::new(HashMap::new());
    let embedder = FixedEmbedder::new(vec![]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let clusterer = ScriptedClusterer::empty();
    let namer = SimpleNamer;

    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config: TickConfig::default(),
    };

    let summary = orchestrator.tick(&topic.id, 1.0).await.unwrap();
    assert_eq!(summary.ingested, 0);
    assert_eq!(summary.clusters_observed, 0);
    assert!(summary.promotions.is_empty());

    let reloaded = storage.load_topic(&topic.id).unwrap();
    assert_eq!(reloaded.doc_count, 0);
}

#[tokio::test]
async fn first_ingestion_seeds_the_long_term_centroid() {
    let storage = MemoryStorage::new();
    let topic = save_topic(&storage, vec!["rust"], TopicPolicy::default(), 0.0);

    let planner = ToyQueryPlanner;
    let searcher = ToySearcher::new(vec![vec!["https://a".into(), "https://b".into()]]);
    let mut corpus = HashMap::new();
    corpus.insert("https://a".to_string(), page("https://a", "doc one", "h1"));
    corpus.insert("https://b".to_string(), page("https://b", "doc two", "h2"));
    let fetcher = ToyFetcher::new(corpus);
    let embedder = FixedEmbedder::new(vec![("doc one", vec![1.0, 0.0, 0.0]), ("doc two", vec![0.0, 1.0, 0.0])]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    // Window too small to produce more than one cluster.
    let clusterer = ScriptedClusterer::empty();
    let namer = SimpleNamer;

    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config: TickConfig::default(),
    };

    let summary = orchestrator.tick(&topic.id, 1.0).await.unwrap();
    assert_eq!(summary.ingested, 2);
    assert!(summary.clusters_observed <= 1);

    let reloaded = storage.load_topic(&topic.id).unwrap();
    assert_eq!(reloaded.doc_count, 2);
    assert_eq!(reloaded.centroid_long, Some(vec![0.5, 0.5, 0.0]));
}

#[tokio::test]
async fn identical_hits_dedup_within_and_across_ticks() {
    let storage = MemoryStorage::new();
    let topic = save_topic(&storage, vec!["rust"], TopicPolicy::default(), 0.0);

    let urls = vec!["https://a".to_string(), "https://b".to_string(), "https://c".to_string()];
    let searcher = ToySearcher::new(vec![urls.clone(), urls.clone()]);
    let mut corpus = HashMap::new();
    for (i, url) in urls.iter().enumerate() {
        corpus.insert(url.clone(), page(url, "same text everywhere", "dup-hash"));
        let _ = i;
    }
    let fetcher = ToyFetcher::new(corpus);
    let planner = ToyQueryPlanner;
    let embedder = FixedEmbedder::new(vec![("same text everywhere", vec![1.0, 0.0])]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let clusterer = ScriptedClusterer::empty();
    let namer = SimpleNamer;

    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config: TickConfig::default(),
    };

    let first = orchestrator.tick(&topic.id, 1.0).await.unwrap();
    assert_eq!(first.ingested, 1);

    let second = orchestrator.tick(&topic.id, 2.0).await.unwrap();
    assert_eq!(second.ingested, 0);
}

#[tokio::test]
async fn persistence_gating_promotes_only_on_the_tick_it_is_met() {
    let storage = MemoryStorage::new();
    let policy = TopicPolicy {
        m_min: 2,
        tau_cohesion: 0.5,
        tau_separation: 0.7,
        persistence_min: 2,
        ema_beta_cluster: 1.0,
        ..TopicPolicy::default()
    };
    let topic = save_topic(&storage, vec!["rust"], policy, 0.0);

    let planner = ToyQueryPlanner;
    let searcher = ToySearcher::new(vec![vec![], vec![]]);
    let fetcher = ToyFetcher::new(HashMap::new());
    let embedder = FixedEmbedder::new(vec![]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let qualifying = snapshot("C0", vec![1.0, 0.0], 5, 0.9, 0.5);
    let clusterer = ScriptedClusterer::new(vec![vec![qualifying.clone()], vec![qualifying]]);
    let namer = SimpleNamer;

    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config: TickConfig::default(),
    };

    let first = orchestrator.tick(&topic.id, 1.0).await.unwrap();
    assert!(first.promotions.is_empty());
    let states = storage.list_cluster_states(&topic.id).unwrap();
    assert_eq!(states.len(), 1);
    assert_eq!(states[0].persistence, 1);

    let second = orchestrator.tick(&topic.id, 2.0).await.unwrap();
    assert_eq!(second.promotions.len(), 1);
    let states_after = storage.list_cluster_states(&topic.id).unwrap();
    assert!(states_after.is_empty());
}

#[tokio::test]
async fn cohesion_failure_resets_persistence_regardless_of_separation() {
    let storage = MemoryStorage::new();
    let policy = TopicPolicy {
        m_min: 2,
        tau_cohesion: 0.5,
        tau_separation: 0.7,
        persistence_min: 3,
        ema_beta_cluster: 1.0,
        ..TopicPolicy::default()
    };
    let topic = save_topic(&storage, vec!["rust"], policy, 0.0);

    let planner = ToyQueryPlanner;
    let searcher = ToySearcher::new(vec![vec![], vec![], vec![]]);
    let fetcher = ToyFetcher::new(HashMap::new());
    let embedder = FixedEmbedder::new(vec![]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let strong = snapshot("C0", vec![1.0, 0.0], 5, 0.9, 0.1);
    let weak_cohesion = snapshot("C0", vec![1.0, 0.0], 5, 0.1, 0.1);
    let clusterer = ScriptedClusterer::new(vec![vec![strong.clone()], vec![strong], vec![weak_cohesion]]);
    let namer = SimpleNamer;

    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config: TickConfig::default(),
    };

    orchestrator.tick(&topic.id, 1.0).await.unwrap();
    let after_second = orchestrator.tick(&topic.id, 2.0).await.unwrap();
    assert!(after_second.promotions.is_empty());
    let states = storage.list_cluster_states(&topic.id).unwrap();
    assert_eq!(states[0].persistence, 2);

    let after_third = orchestrator.tick(&topic.id, 3.0).await.unwrap();
    assert!(after_third.promotions.is_empty());
    let states = storage.list_cluster_states(&topic.id).unwrap();
    assert_eq!(states[0].persistence, 0);
}

#[tokio::test]
async fn stale_candidate_state_is_expired() {
    let storage = MemoryStorage::new();
    let topic = save_topic(&storage, vec!["rust"], TopicPolicy::default(), 0.0);

    let stale_ts = 0.0;
    let mut stale_state = ClusterState::fresh("cand_stale000", stale_ts);
    stale_state.last_seen_ts = stale_ts;
    storage.save_cluster_state(&topic.id, &stale_state).unwrap();

    let planner = ToyQueryPlanner;
    let searcher = ToySearcher::new(vec![vec![]]);
    let fetcher = ToyFetcher::new(HashMap::new());
    let embedder = FixedEmbedder::new(vec![]);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let clusterer = ScriptedClusterer::empty();
    let namer = SimpleNamer;

    let config = TickConfig {
        max_age_days: 10,
        ..TickConfig::default()
    };
    let orchestrator = Orchestrator {
        storage: &storage,
        planner: &planner,
        searcher: &searcher,
        fetcher: &fetcher,
        embedder: &embedder,
        filter: &filter,
        deduper: &deduper,
        ranker: &ranker,
        clusterer: &clusterer,
        namer: &namer,
        matcher: topic_engine::ClusterMatcher::new(0.8),
        smoother: topic_engine::ClusterSmoother,
        emergence: topic_engine::EmergenceDetector,
        config,
    };

    // now_ts far enough past stale_ts to exceed max_age_days * 86400.
    let now_ts = stale_ts + 20.0 * 86_400.0;
    orchestrator.tick(&topic.id, now_ts).await.unwrap();

    let states = storage.list_cluster_states(&topic.id).unwrap();
    assert!(states.iter().all(|s| s.cluster_id != "cand_stale000"));
}
