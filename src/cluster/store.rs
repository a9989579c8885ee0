//! Cluster store
//!
//! Owns the mapping from cluster name to cluster. The map lives behind an
//! `Arc` snapshot swapped atomically under a write lock: a reader holds
//! either the entire old set or the entire new set, never a mix. BTreeMap
//! keeps display iteration order stable across refreshes of the same
//! snapshot.

use crate::cluster::Cluster;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Thread-safe owner of the session's cluster set
pub struct ClusterStore {
    clusters: RwLock<Arc<BTreeMap<String, Cluster>>>,
}

impl ClusterStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            clusters: RwLock::new(Arc::new(BTreeMap::new())),
        }
    }

    /// Atomically swap the entire cluster set
    ///
    /// Called once per completed recognition run. Readers never observe a
    /// partially-updated set.
    pub async fn replace_all(&self, clusters: Vec<Cluster>) {
        let map: BTreeMap<String, Cluster> = clusters
            .into_iter()
            .map(|c| (c.name().to_string(), c))
            .collect();
        *self.clusters.write().await = Arc::new(map);
    }

    /// Drop all clusters (new media file opened)
    pub async fn clear(&self) {
        self.replace_all(Vec::new()).await;
    }

    /// Snapshot of the current set, in stable display order
    pub async fn snapshot(&self) -> Arc<BTreeMap<String, Cluster>> {
        Arc::clone(&*self.clusters.read().await)
    }

    /// Look up a cluster by name
    ///
    /// Fails with [`Error::ClusterNotFound`] when the name is absent, e.g. a
    /// stale selection after a full replacement. Callers re-derive their
    /// selection from the current store rather than retrying.
    pub async fn get(&self, name: &str) -> Result<Cluster> {
        self.clusters
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::ClusterNotFound(name.to_string()))
    }

    /// Assign a speaker label to a cluster
    ///
    /// An empty label is rejected as a no-op: the input is ignored and
    /// `Ok(None)` returned. Otherwise the label is updated in place and the
    /// new display string `"<name> (<label>)"` returned.
    pub async fn rename_speaker(&self, name: &str, label: &str) -> Result<Option<String>> {
        if label.is_empty() {
            return Ok(None);
        }

        let mut guard = self.clusters.write().await;
        let map = Arc::make_mut(&mut *guard);
        let cluster = map
            .get_mut(name)
            .ok_or_else(|| Error::ClusterNotFound(name.to_string()))?;
        cluster.set_speaker(label);
        Ok(Some(cluster.display_label()))
    }

    /// `(unknown, known)` cluster counts, where unknown means the speaker
    /// label still equals the sentinel
    pub async fn aggregate_counts(&self) -> (usize, usize) {
        let snapshot = self.snapshot().await;
        let unknown = snapshot.values().filter(|c| c.is_unknown()).count();
        (unknown, snapshot.len() - unknown)
    }

    /// Number of clusters in the current set
    pub async fn len(&self) -> usize {
        self.clusters.read().await.len()
    }

    /// Whether the current set is empty
    pub async fn is_empty(&self) -> bool {
        self.clusters.read().await.is_empty()
    }
}

impl Default for ClusterStore {
    fn default() -> Self {
        Self::new()
    }
}
