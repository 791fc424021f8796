//! # topic-vector
//!
//! Pure, allocation-light vector primitives shared by the topic-evolution
//! engine: dot products, cosine similarity, exponential moving averages, and
//! the incremental-mean updates that let a topic's long-term centroid be
//! maintained in O(1) per document without retaining past vectors.
//!
//! Every function here is a pure function of its inputs: no I/O, no shared
//! state, no panics on degenerate input (empty or zero vectors are handled
//! via the epsilon clamp in [`norm`]).

/// A dense embedding vector. Dimension is uniform across one engine instance
/// but not enforced by the type itself — callers that mix dimensions will
/// get nonsensical results from `zip`-based functions, not a panic.
pub type Vector = Vec<f32>;

/// Lower clamp applied to squared norms to avoid division by zero.
pub const EPSILON: f32 = 1e-12;

/// Dot product of two vectors. Trailing elements of the longer vector are
/// ignored (this matches `zip`-based semantics used throughout the engine;
/// callers are responsible for dimension consistency).
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// L2 norm with a lower clamp so the result is always finite and positive.
pub fn norm(a: &[f32]) -> f32 {
    dot(a, a).max(EPSILON).sqrt()
}

/// Cosine similarity. Guaranteed finite and in `[-1, 1]` for non-degenerate
/// inputs; returns `0.0` when either input is the zero vector, courtesy of
/// the epsilon clamp in [`norm`].
pub fn cos(a: &[f32], b: &[f32]) -> f32 {
    dot(a, b) / (norm(a) * norm(b))
}

/// Elementwise vector addition. Panics if lengths differ (internal helper;
/// all public entry points in this crate validate or zip instead).
fn add(a: &[f32], b: &[f32]) -> Vector {
    a.iter().zip(b.iter()).map(|(x, y)| x + y).collect()
}

/// Elementwise scalar multiplication.
fn scale(a: &[f32], s: f32) -> Vector {
    a.iter().map(|x| x * s).collect()
}

/// Unweighted batch mean of a non-empty slice of equal-dimension vectors.
///
/// Returns an empty vector if `vs` is empty rather than panicking, so callers
/// (e.g. a clusterer computing a centroid for an empty candidate) can treat
/// it as a degenerate-but-safe case.
pub fn mean(vs: &[Vector]) -> Vector {
    let Some(first) = vs.first() else {
        return Vec::new();
    };
    let mut acc = vec![0.0f32; first.len()];
    for v in vs {
        acc = add(&acc, v);
    }
    scale(&acc, 1.0 / vs.len() as f32)
}

/// Exponential moving average update: `(1-beta)*v_prev + beta*v_now`.
///
/// If `v_prev` is `None` (no prior smoothed value exists yet), returns a
/// copy of `v_now` — the first observation seeds the EMA exactly.
pub fn ema(v_prev: Option<&[f32]>, v_now: &[f32], beta: f32) -> Vector {
    match v_prev {
        None => v_now.to_vec(),
        Some(prev) => prev
            .iter()
            .zip(v_now.iter())
            .map(|(p, n)| (1.0 - beta) * p + beta * n)
            .collect(),
    }
}

/// Scalar EMA update, used for cohesion/separation smoothing where the
/// "vector" has collapsed to a single float.
pub fn ema_scalar(prev: f32, now: f32, beta: f32) -> f32 {
    (1.0 - beta) * prev + beta * now
}

/// O(1) unweighted incremental mean update.
///
/// `c_prev` is the running mean of `n_prev` samples; `e` is the new sample.
/// Returns `(copy(e), 1)` when there is no valid prior mean (`n_prev <= 0` or
/// `c_prev` is `None`), otherwise the updated mean and incremented count.
pub fn incremental_mean(c_prev: Option<&[f32]>, n_prev: u64, e: &[f32]) -> (Vector, u64) {
    match c_prev {
        Some(prev) if n_prev > 0 => {
            let n_new = n_prev + 1;
            let c_new = prev
                .iter()
                .zip(e.iter())
                .map(|(ci, ei)| ci + (ei - ci) / n_new as f32)
                .collect();
            (c_new, n_new)
        }
        _ => (e.to_vec(), 1),
    }
}

/// O(1) weighted incremental mean update.
///
/// `W = W_prev + w`; `c = (c_prev*W_prev + e*w) / max(W, EPSILON)`. Returns
/// `(copy(e), w)` when there is no valid prior mean (`W_prev <= 0` or
/// `c_prev` is `None`).
pub fn weighted_incremental_mean(
    c_prev: Option<&[f32]>,
    w_prev: f32,
    e: &[f32],
    w: f32,
) -> (Vector, f32) {
    match c_prev {
        Some(prev) if w_prev > 0.0 => {
            let w_new = w_prev + w;
            let denom = w_new.max(EPSILON);
            let c_new = prev
                .iter()
                .zip(e.iter())
                .map(|(ci, ei)| (ci * w_prev + ei * w) / denom)
                .collect();
            (c_new, w_new)
        }
        _ => (e.to_vec(), w),
    }
}

/// Batch weighted mean over parallel `vecs`/`weights` slices.
///
/// Returns `(vector, total_weight)`; the division guards against a zero
/// total weight via the epsilon clamp. Panics if `vecs` is empty.
pub fn weighted_mean(vecs: &[Vector], weights: &[f32]) -> (Vector, f32) {
    let dim = vecs[0].len();
    let mut acc = vec![0.0f32; dim];
    let mut total = 0.0f32;
    for (v, w) in vecs.iter().zip(weights.iter()) {
        total += w;
        for (a, vi) in acc.iter_mut().zip(v.iter()) {
            *a += vi * w;
        }
    }
    let denom = total.max(EPSILON);
    let out = acc.into_iter().map(|x| x / denom).collect();
    (out, total)
}
