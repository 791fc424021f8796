//! # topic-cli
//!
//! CLI driver for the topic-evolution engine.
//!
//! ## Commands
//!
//! - `init` - create a root topic from seed terms (and optional policy overrides)
//! - `tick` - replay a corpus directory of `tick_NNN.json` files against a topic
//! - `observe` - print the latest observer snapshot across all topics as JSON
//!
//! ## Usage
//!
//! ```bash
//! topic-cli init --name "rust async runtimes" --seed tokio --seed async-std
//! topic-cli tick --topic-id <id> --corpus ./fixtures/corpus
//! topic-cli observe
//! ```

mod commands;
mod config;
mod corpus;
mod error;

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use topic_types::TopicPolicy;

use crate::config::EngineConfig;

#[derive(Parser)]
#[command(name = "topic-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to an additional TOML config file, layered over the default.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a root topic from seed terms.
    Init {
        /// Human-readable topic name.
        #[arg(long)]
        name: String,
        /// Seed query term; repeat for multiple seeds.
        #[arg(long = "seed")]
        seeds: Vec<String>,
        /// Optional policy overrides as a TOML fragment file.
        #[arg(long)]
        policy_file: Option<PathBuf>,
    },
    /// Replay a corpus directory of `tick_NNN.json` files against a topic.
    Tick {
        /// Id of the topic to tick, as printed by `init`.
        #[arg(long = "topic-id")]
        topic_id: String,
        /// Directory containing `tick_NNN.json` files.
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Print the observer's latest snapshot across all topics as JSON.
    Observe,
}

fn now_ts() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock is before the epoch")
        .as_secs_f64()
}

fn load_policy_overrides(path: &PathBuf) -> anyhow::Result<TopicPolicy> {
    let raw = std::fs::read_to_string(path)?;
    let policy: TopicPolicy = toml::from_str(&raw)?;
    Ok(policy)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = EngineConfig::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .init();

    match cli.command {
        Commands::Init { name, seeds, policy_file } => {
            let policy = match policy_file {
                Some(path) => load_policy_overrides(&path)?,
                None => TopicPolicy::default(),
            };
            commands::init(&config.storage_path, &name, seeds, policy, now_ts())?;
        }
        Commands::Tick { topic_id, corpus } => {
            commands::run_corpus(&config, &topic_id, &corpus, now_ts()).await?;
        }
        Commands::Observe => {
            commands::observe(&config.storage_path)?;
        }
    }

    Ok(())
}
