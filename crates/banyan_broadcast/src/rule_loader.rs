//! Watch-driven refresh of the broadcast rule from cluster metadata.
//!
//! The designated table list lives in the coordination store as one versioned
//! entry per database (`/metadata/{db}/rules/broadcast/tables`), payload a
//! JSON array of table names. The loader reads the active version at startup
//! and reloads wholesale whenever the entry's `active_version` pointer moves.
//! Routing decisions made before a notification arrives use the previous
//! membership; the staleness window is bounded by the store's watch latency.

use std::sync::Arc;

use banyan_common::error::MetadataError;
use banyan_metadata::path::generator::BroadcastTablesNodePath;
use banyan_metadata::{CoordinationStore, VersionManager, WatchEvent};
use tokio::sync::broadcast::error::RecvError;

use crate::rule::BroadcastRule;

/// Keeps one database's [`BroadcastRule`] in sync with the metadata tree.
pub struct BroadcastRuleLoader {
    rule: Arc<BroadcastRule>,
    versions: VersionManager,
    store: Arc<dyn CoordinationStore>,
    entry: BroadcastTablesNodePath,
}

impl BroadcastRuleLoader {
    pub fn new(
        rule: Arc<BroadcastRule>,
        store: Arc<dyn CoordinationStore>,
        database: impl Into<String>,
    ) -> Self {
        Self {
            rule,
            versions: VersionManager::new(store.clone()),
            store,
            entry: BroadcastTablesNodePath::new(database),
        }
    }

    /// Load the current snapshot into the rule. An absent entry means no
    /// tables are designated broadcast.
    pub async fn load(&self) -> Result<(), MetadataError> {
        let names = match self.versions.load_active(&self.entry.version()).await? {
            Some(active) => serde_json::from_str::<Vec<String>>(&active.payload)?,
            None => Vec::new(),
        };
        self.rule.reload(names);
        Ok(())
    }

    /// React to one store event. Only this entry's `active_version` pointer
    /// is relevant; everything else in the keyspace is someone else's key.
    pub async fn handle_event(&self, event: &WatchEvent) -> Result<(), MetadataError> {
        if self.entry.version().is_active_version_path(&event.path) {
            tracing::debug!(path = %event.path, "broadcast rule metadata changed");
            self.load().await?;
        }
        Ok(())
    }

    /// Drive the loader from the store's watch stream until it closes.
    /// Lagged receivers resync by reloading from the store rather than
    /// replaying missed events.
    pub async fn run(&self) -> Result<(), MetadataError> {
        let mut events = self.store.watch();
        loop {
            match events.recv().await {
                Ok(event) => self.handle_event(&event).await?,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "broadcast rule watch lagged; reloading");
                    self.load().await?;
                }
                Err(RecvError::Closed) => return Ok(()),
            }
        }
    }
}
