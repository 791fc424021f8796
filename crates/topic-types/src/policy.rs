//! Topic policy: thresholds and smoothing factors governing emergence
//! detection and document ranking, held constant per topic.

use serde::{Deserialize, Serialize};

/// Thresholds and smoothing factors for one topic's lifecycle.
///
/// Defaults mirror the reference implementation's tuned constants; override
/// per topic at creation time (see `topic-cli`'s `init` subcommand).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPolicy {
    /// Weight for similarity when ranking candidate documents.
    #[serde(default = "default_w_sim")]
    pub w_sim: f32,

    /// Weight for authority when ranking candidate documents.
    #[serde(default = "default_w_auth")]
    pub w_auth: f32,

    /// Lambda for Maximal Marginal Relevance diversification (0 = pure
    /// relevance, 1 = pure diversity).
    #[serde(default = "default_mmr_lambda")]
    pub mmr_lambda: f32,

    /// Minimum cluster mass (document count) required before a candidate
    /// can be considered for promotion.
    #[serde(default = "default_m_min")]
    pub m_min: usize,

    /// Minimum smoothed cohesion required for promotion.
    #[serde(default = "default_tau_cohesion")]
    pub tau_cohesion: f32,

    /// Maximum smoothed cosine-to-parent allowed for promotion (separation
    /// is `1 - cos`, so this bounds how close the candidate may remain to
    /// its parent's identity).
    #[serde(default = "default_tau_separation")]
    pub tau_separation: f32,

    /// Minimum consecutive qualifying ticks required before promotion.
    #[serde(default = "default_persistence_min")]
    pub persistence_min: u32,

    /// EMA factor for the topic's optional short-term centroid.
    #[serde(default = "default_ema_alpha_topic")]
    pub ema_alpha_topic: f32,

    /// EMA factor for candidate-state centroid/cohesion/separation smoothing.
    #[serde(default = "default_ema_beta_cluster")]
    pub ema_beta_cluster: f32,
}

fn default_w_sim() -> f32 {
    0.6
}
fn default_w_auth() -> f32 {
    0.4
}
fn default_mmr_lambda() -> f32 {
    0.3
}
fn default_m_min() -> usize {
    6
}
fn default_tau_cohesion() -> f32 {
    0.55
}
fn default_tau_separation() -> f32 {
    0.70
}
fn default_persistence_min() -> u32 {
    2
}
fn default_ema_alpha_topic() -> f32 {
    0.10
}
fn default_ema_beta_cluster() -> f32 {
    0.25
}

impl Default for TopicPolicy {
    fn default() -> Self {
        Self {
            w_sim: default_w_sim(),
            w_auth: default_w_auth(),
            mmr_lambda: default_mmr_lambda(),
            m_min: default_m_min(),
            tau_cohesion: default_tau_cohesion(),
            tau_separation: default_tau_separation(),
            persistence_min: default_persistence_min(),
            ema_alpha_topic: default_ema_alpha_topic(),
            ema_beta_cluster: default_ema_beta_cluster(),
        }
    }
}

/// Block-list rules used to filter out irrelevant documents before they can
/// pollute a topic's centroid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NegativeRules {
    /// Keywords/phrases that exclude a document if present in title or text.
    #[serde(default)]
    pub block_terms: Vec<String>,

    /// Hostnames always blocked for this topic.
    #[serde(default)]
    pub block_domains: Vec<String>,

    /// Document types (`Document::dtype`) to ignore outright.
    #[serde(default)]
    pub block_types: Vec<String>,
}
