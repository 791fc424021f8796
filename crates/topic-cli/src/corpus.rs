//! Reads a corpus directory of `tick_NNN.json` files, each an array of
//! pre-fetched hit records, and exposes them through one-shot
//! [`Searcher`]/[`Fetcher`] adapters so a tick can run without any live
//! network access.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::Deserialize;

use topic_ports::{Fetcher, FetchedPage, PortError, SearchHit, Searcher};
use topic_types::Timestamp;

use crate::error::CliError;

/// One record in a `tick_NNN.json` file: a pre-fetched page, since the
/// corpus driver bypasses live search entirely.
#[derive(Debug, Clone, Deserialize)]
pub struct HitRecord {
    pub url: String,
    pub text: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub ts: Option<Timestamp>,
    #[serde(default = "default_dtype")]
    pub dtype: String,
    #[serde(default)]
    pub authority: Option<f32>,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub arm_id: String,
    #[serde(default = "default_sample_weight")]
    pub sample_weight: f32,
}

fn default_dtype() -> String {
    "unknown".to_string()
}
fn default_sample_weight() -> f32 {
    1.0
}

/// `tick_NNN.json` files in `dir`, sorted by name so ticks replay in order.
pub fn discover_tick_files(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| CliError::Corpus(format!("reading corpus dir {}: {e}", dir.display())))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("tick_") && n.ends_with(".json"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

pub fn load_tick_file(path: &Path) -> Result<Vec<HitRecord>, CliError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::Corpus(format!("reading {}: {e}", path.display())))?;
    serde_json::from_str(&raw).map_err(|e| CliError::Corpus(format!("parsing {}: {e}", path.display())))
}

/// Serves one tick's worth of pre-fetched records. `search` returns every
/// record exactly once (on whichever query first calls it); later queries
/// in the same tick see nothing further, since the whole file is already
/// "found".
pub struct CorpusAdapter {
    pending: Mutex<Option<Vec<HitRecord>>>,
    by_url: HashMap<String, HitRecord>,
}

impl CorpusAdapter {
    pub fn new(records: Vec<HitRecord>) -> Self {
        let by_url = records.iter().map(|r| (r.url.clone(), r.clone())).collect();
        Self {
            pending: Mutex::new(Some(records)),
            by_url,
        }
    }
}

#[async_trait]
impl Searcher for CorpusAdapter {
    async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<SearchHit>, PortError> {
        let mut pending = self.pending.lock().unwrap();
        let records = pending.take().unwrap_or_default();
        Ok(records.into_iter().map(|r| SearchHit { url: r.url }).collect())
    }
}

#[async_trait]
impl Fetcher for CorpusAdapter {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, PortError> {
        self.by_url
            .get(url)
            .cloned()
            .map(|r| FetchedPage {
                url: r.url,
                text: r.text,
                ts: r.ts,
                domain: r.domain,
                title: r.title,
                dtype: r.dtype,
                authority: r.authority,
                hash: r.hash,
                arm_id: r.arm_id,
                sample_weight: r.sample_weight,
            })
            .ok_or_else(|| PortError::Adapter(format!("no such url in this tick's corpus: {url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_returns_all_records_once_then_nothing() {
        let records = vec![HitRecord {
            url: "https://a".into(),
            text: "hello".into(),
            title: String::new(),
            domain: String::new(),
            ts: None,
            dtype: default_dtype(),
            authority: None,
            hash: None,
            arm_id: String::new(),
            sample_weight: 1.0,
        }];
        let adapter = CorpusAdapter::new(records);
        let first = adapter.search("ignored", 10).await.unwrap();
        assert_eq!(first.len(), 1);
        let second = adapter.search("ignored", 10).await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn fetch_looks_up_by_url() {
        let records = vec![HitRecord {
            url: "https://a".into(),
            text: "hello".into(),
            title: String::new(),
            domain: String::new(),
            ts: None,
            dtype: default_dtype(),
            authority: None,
            hash: None,
            arm_id: String::new(),
            sample_weight: 1.0,
        }];
        let adapter = CorpusAdapter::new(records);
        let page = adapter.fetch("https://a").await.unwrap();
        assert_eq!(page.text, "hello");
        assert!(adapter.fetch("https://missing").await.is_err());
    }
}
