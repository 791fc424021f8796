//! Layered configuration: built-in defaults -> config file -> environment
//! variables, mirroring the reference implementation's `Settings`/
//! `ProjectDirs` convention. CLI flags, applied by the caller, take final
//! precedence over all of this.

use std::path::PathBuf;

use config::{Config, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Engine-wide defaults; independent of any one topic's [`topic_types::TopicPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Path to the RocksDB storage directory.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,

    /// Default recency window, in days, for re-clustering.
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Default queries issued per tick.
    #[serde(default = "default_k_queries")]
    pub k_queries: usize,

    /// Default documents accepted per tick after ranking.
    #[serde(default = "default_k_keep")]
    pub k_keep: usize,

    /// Default candidate-cluster-state expiry horizon, in days.
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u32,

    /// Cosine threshold above which a snapshot matches an existing
    /// candidate-cluster state rather than minting a new one.
    #[serde(default = "default_tau_match")]
    pub tau_match: f32,

    /// Embedding dimension used by the bundled toy embedder.
    #[serde(default = "default_embedding_dim")]
    pub embedding_dim: usize,

    /// Log level passed to `tracing_subscriber`'s env filter as a fallback.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_storage_path() -> String {
    ProjectDirs::from("", "", "topic-engine")
        .map(|p| p.data_local_dir().join("db").to_string_lossy().into_owned())
        .unwrap_or_else(|| "./data/topics.db".to_string())
}

fn default_window_days() -> u32 {
    30
}
fn default_k_queries() -> usize {
    6
}
fn default_k_keep() -> usize {
    20
}
fn default_max_age_days() -> u32 {
    90
}
fn default_tau_match() -> f32 {
    0.8
}
fn default_embedding_dim() -> usize {
    256
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
            window_days: default_window_days(),
            k_queries: default_k_queries(),
            k_keep: default_k_keep(),
            max_age_days: default_max_age_days(),
            tau_match: default_tau_match(),
            embedding_dim: default_embedding_dim(),
            log_level: default_log_level(),
        }
    }
}

impl EngineConfig {
    /// Loads layered settings: built-in defaults, then
    /// `~/.config/topic-engine/config.toml`, then an optional
    /// CLI-specified file, then `TOPIC_ENGINE_*` environment variables.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, CliError> {
        let config_dir = ProjectDirs::from("", "", "topic-engine")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("storage_path", default_storage_path())
            .map_err(config_err)?
            .set_default("window_days", default_window_days() as i64)
            .map_err(config_err)?
            .set_default("k_queries", default_k_queries() as i64)
            .map_err(config_err)?
            .set_default("k_keep", default_k_keep() as i64)
            .map_err(config_err)?
            .set_default("max_age_days", default_max_age_days() as i64)
            .map_err(config_err)?
            .set_default("tau_match", default_tau_match() as f64)
            .map_err(config_err)?
            .set_default("embedding_dim", default_embedding_dim() as i64)
            .map_err(config_err)?
            .set_default("log_level", default_log_level())
            .map_err(config_err)?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("TOPIC_ENGINE")
                .separator("_")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }
}

fn config_err(e: config::ConfigError) -> CliError {
    CliError::Config(e.to_string())
}
