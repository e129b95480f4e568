use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use extract::{Entity, Relation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::graph::{ContractGraph, GraphId, StoreError};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Bound on retained graphs; 0 disables eviction.
    pub max_graphs: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { max_graphs: 10_000 }
    }
}

/// Process-local registry of completed contract graphs.
///
/// Snapshots are shared as `Arc`s and inserted only into vacant slots, so a
/// reader never observes a partially built graph and an id is never reused.
pub struct GraphStore {
    graphs: Arc<DashMap<GraphId, StoredGraph>>,
    sequence: AtomicU64,
    max_graphs: usize,
}

struct StoredGraph {
    /// Insertion order, used for eviction.
    seq: u64,
    graph: Arc<ContractGraph>,
}

impl GraphStore {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            graphs: Arc::new(DashMap::new()),
            sequence: AtomicU64::new(0),
            max_graphs: config.max_graphs,
        }
    }

    /// Store a new graph under a freshly generated id and return the stored
    /// snapshot. The caller keeps it even if a concurrent create evicts it.
    pub fn create(
        &self,
        entities: Vec<Entity>,
        relations: Vec<Relation>,
    ) -> Result<Arc<ContractGraph>, StoreError> {
        let mut graph = ContractGraph::new(GraphId::new(), entities, relations)?;

        self.evict_if_full();

        loop {
            match self.graphs.entry(graph.id) {
                Entry::Vacant(slot) => {
                    let graph = Arc::new(graph);
                    slot.insert(StoredGraph {
                        seq: self.sequence.fetch_add(1, Ordering::Relaxed),
                        graph: Arc::clone(&graph),
                    });
                    tracing::debug!(graph_id = %graph.id, "Stored contract graph");
                    return Ok(graph);
                }
                Entry::Occupied(_) => {
                    graph.id = GraphId::new();
                }
            }
        }
    }

    pub fn get(&self, id: &GraphId) -> Result<Arc<ContractGraph>, StoreError> {
        self.graphs
            .get(id)
            .map(|r| Arc::clone(&r.value().graph))
            .ok_or(StoreError::NotFound(*id))
    }

    pub fn remove(&self, id: &GraphId) -> Option<Arc<ContractGraph>> {
        self.graphs.remove(id).map(|(_, stored)| stored.graph)
    }

    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            graphs_stored: self.graphs.len(),
            max_graphs: self.max_graphs,
        }
    }

    pub fn clear(&self) {
        self.graphs.clear();
    }

    /// Drop the oldest quarter of graphs once the bound is reached
    fn evict_if_full(&self) {
        if self.max_graphs == 0 || self.graphs.len() < self.max_graphs {
            return;
        }

        let mut by_age: Vec<_> = self
            .graphs
            .iter()
            .map(|r| (r.value().seq, *r.key()))
            .collect();
        by_age.sort_by_key(|(seq, _)| *seq);

        let to_remove = (self.max_graphs / 4).max(1);
        for (_, id) in by_age.into_iter().take(to_remove) {
            self.graphs.remove(&id);
        }

        tracing::warn!(
            evicted = to_remove,
            max_graphs = self.max_graphs,
            "Graph store full, evicted oldest graphs"
        );
    }
}

#[derive(Debug, Serialize)]
pub struct StoreStats {
    pub graphs_stored: usize,
    pub max_graphs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract::EntityLabel;
    use std::collections::HashSet;

    fn entities() -> Vec<Entity> {
        vec![Entity::new("ACME LTDA", EntityLabel::Contratante)]
    }

    #[test]
    fn test_create_then_get() {
        let store = GraphStore::new(&StoreConfig::default());
        let created = store.create(entities(), vec![]).unwrap();

        let graph = store.get(&created.id).unwrap();
        assert!(Arc::ptr_eq(&graph, &created));
        assert_eq!(graph.entities, entities());
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let store = GraphStore::new(&StoreConfig::default());
        let id = GraphId::new();
        assert_eq!(store.get(&id).unwrap_err(), StoreError::NotFound(id));
    }

    #[test]
    fn test_each_create_gets_a_fresh_id() {
        let store = GraphStore::new(&StoreConfig::default());
        let a = store.create(entities(), vec![]).unwrap();
        let b = store.create(entities(), vec![]).unwrap();
        assert_ne!(a.id, b.id);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_concurrent_creates_never_collide() {
        let store = Arc::new(GraphStore::new(&StoreConfig { max_graphs: 0 }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50)
                        .map(|_| store.create(entities(), vec![]).unwrap().id)
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }

    #[test]
    fn test_eviction_keeps_store_bounded() {
        let store = GraphStore::new(&StoreConfig { max_graphs: 4 });
        let first = store.create(entities(), vec![]).unwrap().id;
        for _ in 0..3 {
            store.create(entities(), vec![]).unwrap();
        }
        assert_eq!(store.len(), 4);

        let newest = store.create(entities(), vec![]).unwrap().id;
        assert_eq!(store.len(), 4);
        assert!(store.get(&newest).is_ok());
        assert!(store.get(&first).is_err());
    }

    #[test]
    fn test_created_snapshot_survives_concurrent_eviction() {
        let store = Arc::new(GraphStore::new(&StoreConfig { max_graphs: 1 }));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..200)
                        .map(|_| store.create(entities(), vec![]).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for graph in handles.into_iter().flat_map(|h| h.join().unwrap()) {
            assert_eq!(graph.entities, entities());
        }
    }

    #[test]
    fn test_remove() {
        let store = GraphStore::new(&StoreConfig::default());
        let id = store.create(entities(), vec![]).unwrap().id;
        assert!(store.remove(&id).is_some());
        assert!(store.is_empty());
    }
}
