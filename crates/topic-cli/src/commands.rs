//! Command implementations for the `topic-cli` driver.

use std::path::Path;

use tracing::{error, info};

use topic_orchestrator::{Observer, Orchestrator, TickConfig};
use topic_ports::{HdbscanClusterer, PassFilter, SeenDeduper, SimpleNamer, SimpleRanker, ToyEmbedder, ToyQueryPlanner};
use topic_storage::{RocksStorage, Storage};
use topic_types::{Timestamp, Topic, TopicPolicy};

use crate::corpus::{discover_tick_files, load_tick_file, CorpusAdapter};
use crate::config::EngineConfig;
use crate::error::CliError;

/// Creates a root topic from a seed-term list and optional policy overrides,
/// persists it, and prints its id to stdout.
pub fn init(storage_path: &str, name: &str, seeds: Vec<String>, policy: TopicPolicy, now_ts: Timestamp) -> Result<(), CliError> {
    let storage = RocksStorage::open(storage_path)?;
    let topic = Topic::new_root(name, seeds, policy, now_ts);
    storage.save_topic(&topic)?;
    info!(topic_id = %topic.id, "Created root topic");
    println!("{}", topic.id);
    Ok(())
}

/// Runs `tick(topic_id)` once per `tick_NNN.json` file in `corpus_dir`, in
/// filename order. Stops at the first adapter/storage failure.
pub async fn run_corpus(
    config: &EngineConfig,
    topic_id: &str,
    corpus_dir: &Path,
    now_ts: Timestamp,
) -> Result<(), CliError> {
    let storage = RocksStorage::open(&config.storage_path)?;
    let files = discover_tick_files(corpus_dir)?;
    if files.is_empty() {
        info!(dir = %corpus_dir.display(), "No tick_NNN.json files found");
        return Ok(());
    }

    let planner = ToyQueryPlanner;
    let embedder = ToyEmbedder::new(config.embedding_dim);
    let filter = PassFilter;
    let deduper = SeenDeduper;
    let ranker = SimpleRanker;
    let clusterer = HdbscanClusterer::default();
    let namer = SimpleNamer;

    let tick_config = TickConfig {
        window_days: config.window_days,
        k_queries: config.k_queries,
        k_keep: config.k_keep,
        max_age_days: config.max_age_days,
    };

    for (i, file) in files.iter().enumerate() {
        let records = load_tick_file(file)?;
        let corpus = CorpusAdapter::new(records);

        let orchestrator = Orchestrator {
            storage: &storage,
            planner: &planner,
            searcher: &corpus,
            fetcher: &corpus,
            embedder: &embedder,
            filter: &filter,
            deduper: &deduper,
            ranker: &ranker,
            clusterer: &clusterer,
            namer: &namer,
            matcher: topic_engine::ClusterMatcher::new(config.tau_match),
            smoother: topic_engine::ClusterSmoother,
            emergence: topic_engine::EmergenceDetector,
            config: tick_config.clone(),
        };

        let tick_ts = now_ts + i as f64;
        match orchestrator.tick(topic_id, tick_ts).await {
            Ok(summary) => {
                info!(
                    file = %file.display(),
                    ingested = summary.ingested,
                    clusters_observed = summary.clusters_observed,
                    promotions = summary.promotions.len(),
                    "Tick complete"
                );
            }
            Err(e) => {
                error!(file = %file.display(), error = %e, "Tick failed");
                return Err(CliError::from(e));
            }
        }
    }
    Ok(())
}

/// Prints the observer's latest snapshot across every topic, as JSON.
pub fn observe(storage_path: &str) -> Result<(), CliError> {
    let storage = RocksStorage::open(storage_path)?;
    let mut observer = Observer::new(&storage);
    let log = observer.observe_on_tick()?;
    let latest = log.last().expect("observe_on_tick always appends one entry");
    let json = serde_json::to_string_pretty(latest)
        .map_err(|e| CliError::Corpus(format!("serializing observation: {e}")))?;
    println!("{json}");
    Ok(())
}
