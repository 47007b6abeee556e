//! Coordination-store boundary.
//!
//! The production deployment talks to an etcd/ZooKeeper-class service; this
//! crate only defines the operations the metadata layer needs (point reads,
//! child listing, writes, compare-and-set for version publish, and change
//! notification) plus an in-memory implementation for tests and single-node
//! runs. Consensus and durability are the external service's problem.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use banyan_common::error::MetadataError;
use tokio::sync::{broadcast, Mutex};

/// Change notification emitted for every successful write or delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchEvent {
    pub kind: WatchEventKind,
    pub path: String,
    /// New value for `Put`; `None` for `Delete`.
    pub value: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEventKind {
    Put,
    Delete,
}

/// Operations the metadata layer requires from the coordination store.
#[async_trait]
pub trait CoordinationStore: Send + Sync {
    async fn get(&self, path: &str) -> Result<Option<String>, MetadataError>;

    /// Immediate child segment names under `path`, sorted, deduplicated.
    async fn get_children(&self, path: &str) -> Result<Vec<String>, MetadataError>;

    async fn put(&self, path: &str, value: &str) -> Result<(), MetadataError>;

    async fn delete(&self, path: &str) -> Result<(), MetadataError>;

    /// Atomically set `path` to `value` iff its current value equals
    /// `expected` (`None` = key absent). Returns false without writing when
    /// the precondition fails.
    async fn compare_and_set(
        &self,
        path: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, MetadataError>;

    /// Subscribe to change notifications. Events may lag arbitrarily behind
    /// the writes that caused them; consumers reload from the store rather
    /// than trusting event payloads for correctness.
    fn watch(&self) -> broadcast::Receiver<WatchEvent>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// In-memory coordination store backed by a flat `BTreeMap` keyspace.
///
/// Clone shares the underlying map, mirroring how a client handle to the real
/// service would behave.
#[derive(Clone)]
pub struct MemoryCoordinationStore {
    inner: Arc<Mutex<BTreeMap<String, String>>>,
    events: broadcast::Sender<WatchEvent>,
}

impl Default for MemoryCoordinationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCoordinationStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self {
            inner: Arc::new(Mutex::new(BTreeMap::new())),
            events,
        }
    }

    fn notify(&self, event: WatchEvent) {
        // Send fails only when no receiver is subscribed; that is fine.
        let _ = self.events.send(event);
    }
}

#[async_trait]
impl CoordinationStore for MemoryCoordinationStore {
    async fn get(&self, path: &str) -> Result<Option<String>, MetadataError> {
        Ok(self.inner.lock().await.get(path).cloned())
    }

    async fn get_children(&self, path: &str) -> Result<Vec<String>, MetadataError> {
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let inner = self.inner.lock().await;
        let mut children: Vec<String> = inner
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, _)| key[prefix.len()..].split('/').next())
            .map(str::to_string)
            .collect();
        children.dedup();
        Ok(children)
    }

    async fn put(&self, path: &str, value: &str) -> Result<(), MetadataError> {
        self.inner.lock().await.insert(path.to_string(), value.to_string());
        tracing::debug!(path, "metadata put");
        self.notify(WatchEvent {
            kind: WatchEventKind::Put,
            path: path.to_string(),
            value: Some(value.to_string()),
        });
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), MetadataError> {
        if self.inner.lock().await.remove(path).is_some() {
            tracing::debug!(path, "metadata delete");
            self.notify(WatchEvent {
                kind: WatchEventKind::Delete,
                path: path.to_string(),
                value: None,
            });
        }
        Ok(())
    }

    async fn compare_and_set(
        &self,
        path: &str,
        expected: Option<&str>,
        value: &str,
    ) -> Result<bool, MetadataError> {
        let mut inner = self.inner.lock().await;
        if inner.get(path).map(String::as_str) != expected {
            return Ok(false);
        }
        inner.insert(path.to_string(), value.to_string());
        drop(inner);
        self.notify(WatchEvent {
            kind: WatchEventKind::Put,
            path: path.to_string(),
            value: Some(value.to_string()),
        });
        Ok(true)
    }

    fn watch(&self) -> broadcast::Receiver<WatchEvent> {
        self.events.subscribe()
    }
}
