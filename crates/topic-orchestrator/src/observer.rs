//! Read-only snapshots of every topic and its live candidate clusters, for
//! telemetry and test assertions. The observer never mutates core state.

use serde::{Deserialize, Serialize};

use topic_storage::Storage;
use topic_vector::Vector;

use crate::error::OrchestratorError;

/// Snapshot of one persisted candidate-cluster state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterObservation {
    pub id: String,
    pub centroid_ema: Option<Vector>,
    pub cohesion_ema: f32,
    pub separation_ema: f32,
    pub persistence: u32,
}

/// Snapshot of one topic and its live candidate clusters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicObservation {
    pub topic_id: String,
    pub seeds: Vec<String>,
    pub clusters: Vec<ClusterObservation>,
    pub centroid_long: Option<Vector>,
    pub doc_count: u64,
    pub centroid_short_ema: Option<Vector>,
}

/// One full sweep across every topic, tagged with the sweep index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub tick: u64,
    pub topics: Vec<TopicObservation>,
}

/// Accumulates observations across calls to [`Observer::observe_on_tick`].
/// The log is an in-process `Vec`, not persisted by the core; a driver may
/// serialize it for test assertions or telemetry export.
pub struct Observer<'a> {
    storage: &'a dyn Storage,
    tick: u64,
    observations: Vec<Observation>,
}

impl<'a> Observer<'a> {
    pub fn new(storage: &'a dyn Storage) -> Self {
        Self {
            storage,
            tick: 0,
            observations: Vec::new(),
        }
    }

    /// Snapshots every topic and its candidate-cluster states, appends the
    /// result to the internal log, and returns the full log so far.
    pub fn observe_on_tick(&mut self) -> Result<&[Observation], OrchestratorError> {
        let topics = self.storage.list_topics()?;

        let mut topic_observations = Vec::with_capacity(topics.len());
        for topic in &topics {
            let clusters = self
                .storage
                .list_cluster_states(&topic.id)?
                .into_iter()
                .map(|state| ClusterObservation {
                    id: state.cluster_id,
                    centroid_ema: state.centroid_ema,
                    cohesion_ema: state.cohesion_ema,
                    separation_ema: state.separation_ema,
                    persistence: state.persistence,
                })
                .collect();

            topic_observations.push(TopicObservation {
                topic_id: topic.id.clone(),
                seeds: topic.seeds.clone(),
                clusters,
                centroid_long: topic.centroid_long.clone(),
                doc_count: topic.doc_count,
                centroid_short_ema: topic.centroid_short_ema.clone(),
            });
        }

        self.observations.push(Observation {
            tick: self.tick,
            topics: topic_observations,
        });
        self.tick += 1;
        Ok(&self.observations)
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topic_storage::MemoryStorage;
    use topic_types::{Topic, TopicPolicy};

    #[test]
    fn observe_on_tick_captures_every_topic_and_increments_tick() {
        let storage = MemoryStorage::new();
        let topic = Topic::new_root("t", vec!["seed".into()], TopicPolicy::default(), 0.0);
        storage.save_topic(&topic).unwrap();

        let mut observer = Observer::new(&storage);
        let log = observer.observe_on_tick().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].tick, 0);
        assert_eq!(log[0].topics.len(), 1);
        assert_eq!(log[0].topics[0].topic_id, topic.id);

        observer.observe_on_tick().unwrap();
        assert_eq!(observer.latest().unwrap().tick, 1);
    }
}
