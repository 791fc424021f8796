//! Reference/testing adapters: deterministic, dependency-free
//! implementations of every port, useful for integration tests and as a
//! worked example for real adapter authors. None of these touch the
//! network; `ToySearcher`/`ToyFetcher` replay a scripted corpus instead.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use topic_types::{ClusterSnapshot, Document, NegativeRules, Topic};
use topic_vector::{cos, norm, weighted_mean, Vector};

use crate::adapters::{
    Clusterer, Deduper, Embedder, EmergenceNamer, Fetcher, Filter, QueryPlanner, Ranker, Searcher,
};
use crate::error::PortError;
use crate::types::{FetchedPage, SearchHit};

/// Issues the topic's own seed terms as queries, truncated to `k_queries`.
pub struct ToyQueryPlanner;

#[async_trait]
impl QueryPlanner for ToyQueryPlanner {
    async fn plan(&self, topic: &Topic, k_queries: usize) -> Result<Vec<String>, PortError> {
        Ok(topic.seeds.iter().take(k_queries).cloned().collect())
    }
}

/// Feeds a scripted batch of URLs per call, ignoring the query text. Each
/// call to [`ToySearcher::search`] pops the next scenario batch; once
/// exhausted it returns an empty result.
pub struct ToySearcher {
    batches: Mutex<Vec<Vec<String>>>,
}

impl ToySearcher {
    /// `batches[i]` is returned (once) on the `i`-th call across all queries
    /// this tick; callers that issue multiple queries per tick should supply
    /// one batch per query.
    pub fn new(batches: Vec<Vec<String>>) -> Self {
        Self {
            batches: Mutex::new(batches),
        }
    }
}

#[async_trait]
impl Searcher for ToySearcher {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>, PortError> {
        let mut batches = self.batches.lock().unwrap();
        if batches.is_empty() {
            return Ok(Vec::new());
        }
        let batch = batches.remove(0);
        Ok(batch.into_iter().map(|url| SearchHit { url }).collect())
    }
}

/// Looks URLs up in a fixed in-memory corpus.
pub struct ToyFetcher {
    corpus: HashMap<String, FetchedPage>,
}

impl ToyFetcher {
    pub fn new(corpus: HashMap<String, FetchedPage>) -> Self {
        Self { corpus }
    }
}

#[async_trait]
impl Fetcher for ToyFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PortError> {
        self.corpus
            .get(url)
            .cloned()
            .ok_or_else(|| PortError::Adapter(format!("no such page in corpus: {url}")))
    }
}

/// Hash-bucket bag-of-words embedding, L2-normalized. Deterministic and
/// dependency-free — not meant to capture real semantics, only to exercise
/// the pipeline's geometry.
pub struct ToyEmbedder {
    dim: usize,
}

impl ToyEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }

    fn vectorize(&self, text: &str) -> Vector {
        let mut v = vec![0.0f32; self.dim];
        for tok in text.to_lowercase().split_whitespace() {
            let bucket = fnv1a(tok) as usize % self.dim;
            v[bucket] += 1.0;
        }
        let n = norm(&v);
        v.iter().map(|x| x / n).collect()
    }
}

fn fnv1a(s: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in s.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[async_trait]
impl Embedder for ToyEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vector>, PortError> {
        Ok(texts.iter().map(|t| self.vectorize(t)).collect())
    }
}

/// Passes every document through unchanged.
pub struct PassFilter;

#[async_trait]
impl Filter for PassFilter {
    async fn apply(&self, _negative: &NegativeRules, docs: Vec<Document>) -> Vec<Document> {
        docs
    }
}

/// Drops documents seen in prior ticks, then drops within-batch repeats.
pub struct SeenDeduper;

#[async_trait]
impl Deduper for SeenDeduper {
    async fn drop_duplicates(&self, seen_hashes: &HashSet<String>, docs: Vec<Document>) -> Vec<Document> {
        let mut seen_in_batch = HashSet::new();
        let mut out = Vec::with_capacity(docs.len());
        for doc in docs {
            if seen_hashes.contains(&doc.hash) || seen_in_batch.contains(&doc.hash) {
                continue;
            }
            seen_in_batch.insert(doc.hash.clone());
            out.push(doc);
        }
        out
    }
}

/// Scores by `w_sim * cos(doc, centroid_long) + w_auth * authority`; falls
/// back to authority-only while the topic has no centroid yet.
pub struct SimpleRanker;

#[async_trait]
impl Ranker for SimpleRanker {
    async fn select(&self, topic: &Topic, mut docs: Vec<Document>, k: usize) -> Vec<Document> {
        match topic.centroid_long.as_deref() {
            None => {
                docs.sort_by(|a, b| b.authority.partial_cmp(&a.authority).unwrap());
            }
            Some(centroid) => {
                let w_sim = topic.policy.w_sim;
                let w_auth = topic.policy.w_auth;
                docs.sort_by(|a, b| {
                    let score_a = w_sim * cos(&a.vec, centroid) + w_auth * a.authority;
                    let score_b = w_sim * cos(&b.vec, centroid) + w_auth * b.authority;
                    score_b.partial_cmp(&score_a).unwrap()
                });
            }
        }
        docs.truncate(k);
        docs
    }
}

/// Tiny k=2 k-means, weighted by `sample_weight`. Returns 0–2 clusters
/// depending on how the window splits.
pub struct KMeans2Clusterer {
    max_iter: usize,
}

impl KMeans2Clusterer {
    pub fn new(max_iter: usize) -> Self {
        Self { max_iter }
    }
}

impl Default for KMeans2Clusterer {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl Clusterer for KMeans2Clusterer {
    async fn cluster(&self, centroid_long: Option<&Vector>, docs_window: &[Document]) -> Vec<ClusterSnapshot> {
        if docs_window.is_empty() {
            return Vec::new();
        }

        let mut v1 = docs_window[0].vec.clone();
        let mut v2 = if docs_window.len() > 1 {
            docs_window[docs_window.len() - 1].vec.clone()
        } else {
            v1.clone()
        };

        let mut group_a: Vec<&Document> = Vec::new();
        let mut group_b: Vec<&Document> = Vec::new();

        for _ in 0..self.max_iter {
            group_a.clear();
            group_b.clear();
            for d in docs_window {
                if cos(&d.vec, &v1) >= cos(&d.vec, &v2) {
                    group_a.push(d);
                } else {
                    group_b.push(d);
                }
            }
            if group_a.is_empty() || group_b.is_empty() {
                break;
            }
            let (c1, _) = weighted_mean(
                &group_a.iter().map(|d| d.vec.clone()).collect::<Vec<_>>(),
                &group_a.iter().map(|d| d.sample_weight).collect::<Vec<_>>(),
            );
            let (c2, _) = weighted_mean(
                &group_b.iter().map(|d| d.vec.clone()).collect::<Vec<_>>(),
                &group_b.iter().map(|d| d.sample_weight).collect::<Vec<_>>(),
            );
            v1 = c1;
            v2 = c2;
        }

        let groups: [(&str, &[&Document], &Vector); 2] = [("C0", &group_a, &v1), ("C1", &group_b, &v2)];
        let mut snapshots = Vec::new();
        for (cluster_id, group, centroid) in groups {
            if group.is_empty() {
                continue;
            }
            let size_w: f32 = group.iter().map(|d| d.sample_weight).sum();
            let cohesion_num: f32 = group
                .iter()
                .map(|d| d.sample_weight * cos(&d.vec, centroid))
                .sum();
            let cohesion_now = cohesion_num / size_w.max(1e-12);
            let separation_now = match centroid_long {
                Some(parent) => 1.0 - cos(parent, centroid),
                None => 0.0,
            };
            snapshots.push(ClusterSnapshot {
                cluster_id: cluster_id.to_string(),
                centroid_now: centroid.clone(),
                size: size_w.round() as usize,
                cohesion_now,
                separation_now,
                doc_ids: group.iter().map(|d| d.id.clone()).collect(),
            });
        }
        snapshots
    }
}

/// Names a cluster after its three most frequent non-stopword tokens.
pub struct SimpleNamer;

const STOPWORDS: &[&str] = &[
    "the", "and", "of", "a", "to", "in", "on", "for", "with", "is", "are",
];

#[async_trait]
impl EmergenceNamer for SimpleNamer {
    async fn name_and_seeds(&self, cluster_docs: &[Document]) -> (String, Vec<String>) {
        let mut freq: HashMap<String, usize> = HashMap::new();
        for doc in cluster_docs {
            for word in doc.text.to_lowercase().split_whitespace() {
                if word.len() < 3 || STOPWORDS.contains(&word) {
                    continue;
                }
                *freq.entry(word.to_string()).or_insert(0) += 1;
            }
        }
        let mut ranked: Vec<(String, usize)> = freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        let seeds: Vec<String> = ranked.into_iter().take(3).map(|(w, _)| w).collect();

        let name = if seeds.is_empty() {
            "Topic: emergent".to_string()
        } else {
            format!("Topic: {}", seeds.join(", "))
        };
        let seeds = if seeds.is_empty() {
            vec!["emergent".to_string()]
        } else {
            seeds
        };
        (name, seeds)
    }
}
