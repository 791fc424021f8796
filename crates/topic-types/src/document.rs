//! The document model: one unit of retrieved evidence.

use serde::{Deserialize, Serialize};

use topic_vector::Vector;

use crate::timestamp::Timestamp;

/// A single piece of evidence folded into a topic (or considered for one).
///
/// Constructed once inside a tick and never mutated afterward; persisted
/// documents form an append-only log per topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Engine-assigned unique id (a ULID, not derived from the source URL).
    pub id: String,

    /// Source publish/observed time, epoch seconds.
    pub ts: Timestamp,

    /// Canonical URL, if known.
    pub url: String,

    /// Hostname of the source, used for negative-rule domain blocking.
    pub domain: String,

    /// Title, if known.
    pub title: String,

    /// Extracted plaintext used for embedding and naming.
    pub text: String,

    /// Source type tag (e.g. "paper", "repo", "blog", "news").
    pub dtype: String,

    /// Trust/importance score in `[0, 1]`.
    pub authority: f32,

    /// Embedding vector; dimension must match the engine instance's
    /// embedder output.
    pub vec: Vector,

    /// Content fingerprint used for deduplication. Two documents with equal
    /// hash are considered duplicates regardless of other fields.
    pub hash: String,

    /// Retrieval provenance (which query/arm surfaced this document).
    #[serde(default)]
    pub arm_id: String,

    /// Multiplicity after within-tick dedup aggregation: counts how many
    /// near-identical records a deduper collapsed into this one. Defaults to
    /// `1.0` for documents that were never collapsed.
    #[serde(default = "default_sample_weight")]
    pub sample_weight: f32,
}

fn default_sample_weight() -> f32 {
    1.0
}

impl Document {
    /// Derive a deterministic content hash from normalized text: lowercase,
    /// whitespace-collapsed, then SHA-256 hex. Used when an adapter does not
    /// supply its own hash.
    pub fn derive_hash(text: &str) -> String {
        let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
        let digest = Sha256::digest(normalized.as_bytes());
        format!("{:x}", digest)
    }
}

use sha2::{Digest, Sha256};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_hash_is_deterministic() {
        let a = Document::derive_hash("Hello   World");
        let b = Document::derive_hash("hello world");
        assert_eq!(a, b);
    }

    #[test]
    fn derive_hash_differs_on_content_change() {
        let a = Document::derive_hash("hello world");
        let b = Document::derive_hash("hello there");
        assert_ne!(a, b);
    }

    #[test]
    fn sample_weight_defaults_to_one() {
        let json = r#"{
            "id": "x", "ts": 0.0, "url": "", "domain": "", "title": "",
            "text": "", "dtype": "", "authority": 0.5, "vec": [1.0],
            "hash": "abc"
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.sample_weight, 1.0);
        assert_eq!(doc.arm_id, "");
    }
}
