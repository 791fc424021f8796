//! Folds accepted documents into a topic's long-term centroid.

use topic_types::{Document, Timestamp, Topic};
use topic_vector::{incremental_mean, weighted_incremental_mean};

/// Folds `accepted_docs` into `topic.centroid_long` in insertion order using
/// the unweighted running mean, then advances `last_updated_ts`.
///
/// This is the canonical update path: deterministic, and exact over the full
/// history without retaining past vectors.
pub fn apply(topic: &mut Topic, accepted_docs: &[Document], now_ts: Timestamp) {
    for doc in accepted_docs {
        let (centroid, count) =
            incremental_mean(topic.centroid_long.as_deref(), topic.doc_count, &doc.vec);
        topic.centroid_long = Some(centroid);
        topic.doc_count = count;
    }
    topic.last_updated_ts = now_ts;
}

/// Recency-decayed weighting: `w = authority * exp(-recency_lambda * age_days)`.
/// `recency_lambda = 0.0` degenerates to pure authority weighting.
fn time_weight(recency_lambda: f32, now_ts: Timestamp, doc_ts: Timestamp) -> f32 {
    if recency_lambda <= 0.0 {
        return 1.0;
    }
    let age_days = ((now_ts - doc_ts) / topic_types::SECONDS_PER_DAY).max(0.0) as f32;
    (-recency_lambda * age_days).exp()
}

/// Optional weighted variant behind an explicit opt-in: folds documents using
/// `weighted_incremental_mean` with `w = authority * time_weight`, tracking
/// the running weight sum in `weight_sum` (owned by the caller — the engine
/// keeps no process-wide state).
pub fn apply_weighted(
    topic: &mut Topic,
    weight_sum: &mut f32,
    accepted_docs: &[Document],
    now_ts: Timestamp,
    recency_lambda: f32,
) {
    for doc in accepted_docs {
        let w = doc.authority * time_weight(recency_lambda, now_ts, doc.ts);
        let (centroid, total) = weighted_incremental_mean(
            topic.centroid_long.as_deref(),
            *weight_sum,
            &doc.vec,
            w,
        );
        topic.centroid_long = Some(centroid);
        *weight_sum = total;
        topic.doc_count += 1;
    }
    topic.last_updated_ts = now_ts;
}
