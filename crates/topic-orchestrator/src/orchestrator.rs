//! Sequences one end-to-end refresh ("tick") for a single topic.

use tracing::{debug, info, instrument};

use topic_engine::{ClusterMatcher, ClusterSmoother, EmergenceDetector};
use topic_ports::{Clusterer, Deduper, Embedder, EmergenceNamer, Fetcher, Filter, QueryPlanner, Ranker, Searcher};
use topic_storage::Storage;
use topic_types::{Document, Timestamp};

use crate::error::OrchestratorError;
use crate::summary::Summary;

/// Policy knobs governing how much work one tick does, independent of any
/// one topic's own policy thresholds.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// How many days back the recency window reaches when re-clustering.
    pub window_days: u32,
    /// Queries issued per tick.
    pub k_queries: usize,
    /// Documents accepted per tick after ranking.
    pub k_keep: usize,
    /// Candidate-cluster-state expiry horizon.
    pub max_age_days: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            window_days: 30,
            k_queries: 6,
            k_keep: 20,
            max_age_days: 90,
        }
    }
}

/// Wires every port and core service together to drive one topic's
/// lifecycle. Intentionally thin: it sequences calls and persists/returns
/// results; all policy and math live in the injected services.
pub struct Orchestrator<'a> {
    pub storage: &'a dyn Storage,
    pub planner: &'a dyn QueryPlanner,
    pub searcher: &'a dyn Searcher,
    pub fetcher: &'a dyn Fetcher,
    pub embedder: &'a dyn Embedder,
    pub filter: &'a dyn Filter,
    pub deduper: &'a dyn Deduper,
    pub ranker: &'a dyn Ranker,
    pub clusterer: &'a dyn Clusterer,
    pub namer: &'a dyn EmergenceNamer,
    pub matcher: ClusterMatcher,
    pub smoother: ClusterSmoother,
    pub emergence: EmergenceDetector,
    pub config: TickConfig,
}

impl<'a> Orchestrator<'a> {
    /// Runs one refresh cycle for `topic_id` at `now_ts` (the caller
    /// supplies wall-clock time so ticks stay deterministic under test).
    #[instrument(skip(self), fields(topic_id = %topic_id))]
    pub async fn tick(&self, topic_id: &str, now_ts: Timestamp) -> Result<Summary, OrchestratorError> {
        let mut topic = self.storage.load_topic(topic_id)?;

        // 1) Plan & harvest.
        let queries = self.planner.plan(&topic, self.config.k_queries).await?;
        debug!(query_count = queries.len(), "Planned queries");

        let mut hits = Vec::new();
        for query in &queries {
            hits.extend(self.searcher.search(query, 10).await?);
        }

        let mut pages = Vec::with_capacity(hits.len());
        for hit in &hits {
            pages.push(self.fetcher.fetch(&hit.url).await?);
        }

        let texts: Vec<String> = pages.iter().map(|p| p.text.clone()).collect();
        let vecs = self.embedder.embed(&texts).await?;

        // 2) Assemble documents. A non-finite vector component is a data
        // fault: the offending page is dropped rather than poisoning
        // topic.centroid_long via incremental_mean.
        let total_fetched = pages.len();
        let assembled: Vec<Document> = pages
            .into_iter()
            .zip(vecs)
            .filter(|(_, vec)| vec.iter().all(|x| x.is_finite()))
            .map(|(page, vec)| {
                let hash = page
                    .hash
                    .clone()
                    .unwrap_or_else(|| Document::derive_hash(&page.text));
                Document {
                    id: ulid::Ulid::new().to_string(),
                    ts: page.ts.unwrap_or(now_ts),
                    url: page.url,
                    domain: page.domain,
                    title: page.title,
                    text: page.text,
                    dtype: page.dtype,
                    authority: page.authority.unwrap_or(0.5),
                    vec,
                    hash,
                    arm_id: page.arm_id,
                    sample_weight: page.sample_weight,
                }
            })
            .collect();
        if assembled.len() < total_fetched {
            debug!(
                dropped = total_fetched - assembled.len(),
                "Dropped pages with non-finite embedding components"
            );
        }

        // 3) Filter → dedup → rank.
        let filtered = self.filter.apply(&topic.negative_rules, assembled).await;
        let seen = self.storage.seen(&topic.id)?;
        let unique = self.deduper.drop_duplicates(&seen, filtered).await;
        let top_k = self.ranker.select(&topic, unique, self.config.k_keep).await;
        debug!(accepted = top_k.len(), "Ranked and accepted documents");

        // 4) Update topic identity and persist.
        topic_engine::apply(&mut topic, &top_k, now_ts);
        self.storage.save_docs(&topic.id, &top_k)?;
        self.storage
            .mark_seen_hashes(&topic.id, &top_k.iter().map(|d| d.hash.clone()).collect::<Vec<_>>())?;
        self.storage.save_topic(&topic)?;

        // 5) Re-cluster the recent window.
        let window_docs = self
            .storage
            .recent_docs(&topic.id, self.config.window_days, 500, now_ts)?;
        let snapshots = self
            .clusterer
            .cluster(topic.centroid_long.as_ref(), &window_docs)
            .await;
        debug!(clusters_observed = snapshots.len(), "Re-clustered recent window");

        // 6) Match → smooth → promote.
        let mut promotions = Vec::new();
        for snapshot in &snapshots {
            let state = self
                .matcher
                .match_or_create(self.storage, &topic, snapshot, now_ts)?;
            let state = self
                .smoother
                .update(self.storage, &topic, snapshot, state, now_ts)?;

            if self.emergence.ready(&topic, snapshot, &state) {
                let cluster_docs: Vec<Document> = window_docs
                    .iter()
                    .filter(|d| snapshot.doc_ids.contains(&d.id))
                    .cloned()
                    .collect();

                let child = self
                    .emergence
                    .promote(&topic, snapshot, self.namer, &cluster_docs, now_ts)
                    .await;
                self.storage.save_topic(&child)?;
                topic.children.push(child.id.clone());
                info!(child_id = %child.id, child_name = %child.name, "Promoted new topic");
                promotions.push((child.id, child.name));

                self.storage.delete_cluster_state(&topic.id, &state.cluster_id)?;
            }
        }
        self.storage.save_topic(&topic)?;

        // 7) Housekeeping.
        self.matcher
            .expire_stale(self.storage, &topic.id, self.config.max_age_days, now_ts)?;

        Ok(Summary {
            ingested: top_k.len(),
            clusters_observed: snapshots.len(),
            promotions,
            topic_id: topic.id,
            updated_at: now_ts,
        })
    }
}
