//! Density-based clustering with HDBSCAN: auto-discovers cluster count,
//! labels noise, and is the default production [`Clusterer`] (the reference
//! adapters' [`crate::reference::KMeans2Clusterer`] always forces a 2-way
//! split and is only meant for deterministic tests).

use async_trait::async_trait;
use hdbscan::{Hdbscan, HdbscanHyperParams};

use topic_types::{ClusterSnapshot, Document};
use topic_vector::{dot, norm, Vector};

use crate::adapters::Clusterer;

/// Runs on L2-normalized embeddings, so Euclidean distance behaves like
/// cosine distance. Clusters smaller than `min_mass` or whose cohesion
/// falls below `min_cohesion` are dropped even if HDBSCAN keeps them.
pub struct HdbscanClusterer {
    min_cluster_size: usize,
    min_samples: usize,
    min_mass: usize,
    min_cohesion: f32,
}

impl HdbscanClusterer {
    pub fn new(min_cluster_size: usize, min_samples: usize, min_mass: usize, min_cohesion: f32) -> Self {
        Self {
            min_cluster_size,
            min_samples,
            min_mass,
            min_cohesion,
        }
    }
}

impl Default for HdbscanClusterer {
    /// Mirrors the defaults of the original production clusterer: a window
    /// has to hold at least 30 documents before any subtopic is even
    /// attempted, which is also what keeps small windows from ever
    /// reporting more than one cluster.
    fn default() -> Self {
        Self::new(30, 15, 10, 0.55)
    }
}

fn l2_normalize(v: &Vector) -> Vector {
    let n = norm(v);
    v.iter().map(|x| x / n).collect()
}

/// Plain mean centroid, renormalized to unit L2.
fn centroid(vecs: &[&Vector]) -> Vector {
    let dim = vecs[0].len();
    let mut sum = vec![0.0f32; dim];
    for v in vecs {
        for (i, x) in v.iter().enumerate() {
            sum[i] += x;
        }
    }
    let count = vecs.len() as f32;
    for x in sum.iter_mut() {
        *x /= count;
    }
    l2_normalize(&sum)
}

/// Average cosine(doc, centroid); with unit vectors cosine reduces to dot.
fn cohesion(vecs: &[&Vector], c: &Vector) -> f32 {
    let sum: f32 = vecs.iter().map(|v| dot(v, c)).sum();
    sum / vecs.len() as f32
}

#[async_trait]
impl Clusterer for HdbscanClusterer {
    async fn cluster(&self, centroid_long: Option<&Vector>, docs_window: &[Document]) -> Vec<ClusterSnapshot> {
        if docs_window.len() < self.min_cluster_size {
            return Vec::new();
        }

        let normalized: Vec<Vector> = docs_window.iter().map(|d| l2_normalize(&d.vec)).collect();

        let hyper_params = HdbscanHyperParams::builder()
            .min_cluster_size(self.min_cluster_size)
            .min_samples(self.min_samples)
            .build();
        let clusterer = Hdbscan::new(&normalized, hyper_params);
        let labels = match clusterer.cluster() {
            Ok(labels) => labels,
            Err(_) => return Vec::new(),
        };

        let parent = match centroid_long {
            Some(p) => l2_normalize(p),
            None => centroid(&normalized.iter().collect::<Vec<_>>()),
        };

        let mut unique_labels: Vec<i32> = labels.iter().copied().filter(|&l| l >= 0).collect();
        unique_labels.sort_unstable();
        unique_labels.dedup();

        let mut snapshots = Vec::new();
        for label in unique_labels {
            let idx: Vec<usize> = labels
                .iter()
                .enumerate()
                .filter(|(_, &l)| l == label)
                .map(|(i, _)| i)
                .collect();

            let mass = idx.len();
            if mass < self.min_mass {
                continue;
            }

            let members: Vec<&Vector> = idx.iter().map(|&i| &normalized[i]).collect();
            let c = centroid(&members);
            let coh = cohesion(&members, &c);
            if coh < self.min_cohesion {
                continue;
            }

            let sep = 1.0 - dot(&parent, &c);

            snapshots.push(ClusterSnapshot {
                cluster_id: format!("h{label}"),
                centroid_now: c,
                size: mass,
                cohesion_now: coh,
                separation_now: sep,
                doc_ids: idx.iter().map(|&i| docs_window[i].id.clone()).collect(),
            });
        }
        snapshots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(id: &str, vec: Vector) -> Document {
        Document {
            id: id.to_string(),
            ts: 0.0,
            url: String::new(),
            domain: String::new(),
            title: String::new(),
            text: String::new(),
            dtype: "blog".into(),
            authority: 0.5,
            vec,
            hash: id.to_string(),
            arm_id: String::new(),
            sample_weight: 1.0,
        }
    }

    #[tokio::test]
    async fn window_below_min_cluster_size_reports_no_clusters() {
        let clusterer = HdbscanClusterer::default();
        let docs = vec![doc("d1", vec![1.0, 0.0]), doc("d2", vec![1.0, 0.0])];
        let snapshots = clusterer.cluster(None, &docs).await;
        assert!(snapshots.is_empty());
    }

    #[tokio::test]
    async fn empty_window_reports_no_clusters() {
        let clusterer = HdbscanClusterer::default();
        let snapshots = clusterer.cluster(None, &[]).await;
        assert!(snapshots.is_empty());
    }

    #[tokio::test]
    async fn low_min_cluster_size_finds_a_dense_group() {
        let clusterer = HdbscanClusterer::new(3, 1, 1, 0.0);
        let docs = vec![
            doc("d1", vec![1.0, 0.0]),
            doc("d2", vec![0.99, 0.01]),
            doc("d3", vec![0.98, 0.02]),
            doc("d4", vec![0.0, 1.0]),
            doc("d5", vec![0.01, 0.99]),
            doc("d6", vec![0.02, 0.98]),
        ];
        let snapshots = clusterer.cluster(None, &docs).await;
        assert!(!snapshots.is_empty());
        for snap in &snapshots {
            assert!(snap.size >= 1);
            assert!(!snap.doc_ids.is_empty());
        }
    }
}
