//! Optimistic-concurrency versioning over the coordination store.
//!
//! Each versioned entity keeps `versions/{n}` payload entries plus an
//! `active_version` pointer. Publishing appends the next version entry and
//! compare-and-sets the pointer from the value the writer observed; a lost
//! race surfaces as [`MetadataError::PublishConflict`] and the caller
//! re-reads and retries. Readers never lock: they follow the pointer to an
//! immutable payload.

use std::sync::Arc;

use banyan_common::error::MetadataError;

use crate::path::version::{parse_version, VersionNodePath};
use crate::store::CoordinationStore;

/// Snapshot of an entity's currently active version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveVersion {
    pub version: u64,
    pub payload: String,
}

/// Versioning protocol driver over one coordination store.
#[derive(Clone)]
pub struct VersionManager {
    store: Arc<dyn CoordinationStore>,
}

impl VersionManager {
    pub fn new(store: Arc<dyn CoordinationStore>) -> Self {
        Self { store }
    }

    /// Read and strictly parse the active-version pointer. A malformed
    /// pointer is an error, never coerced: a corrupt marker threatens the
    /// whole optimistic-concurrency protocol.
    pub async fn active_version(
        &self,
        entity: &VersionNodePath,
    ) -> Result<Option<u64>, MetadataError> {
        let raw = self.store.get(&entity.active_version_path().to_string()).await?;
        raw.as_deref().map(parse_version).transpose()
    }

    /// Follow the pointer to the active payload. `None` when the entity has
    /// no published version yet; a pointer naming a missing version entry is
    /// corrupt state and errors.
    pub async fn load_active(
        &self,
        entity: &VersionNodePath,
    ) -> Result<Option<ActiveVersion>, MetadataError> {
        let version = match self.active_version(entity).await? {
            Some(version) => version,
            None => return Ok(None),
        };
        let payload_path = entity.version_path(version).to_string();
        match self.store.get(&payload_path).await? {
            Some(payload) => Ok(Some(ActiveVersion { version, payload })),
            None => Err(MetadataError::ActiveVersionMissing { path: payload_path }),
        }
    }

    /// All version numbers present in the history, ascending.
    pub async fn list_versions(&self, entity: &VersionNodePath) -> Result<Vec<u64>, MetadataError> {
        let children = self.store.get_children(&entity.versions_path().to_string()).await?;
        let mut versions = children
            .iter()
            .map(|segment| parse_version(segment))
            .collect::<Result<Vec<_>, _>>()?;
        versions.sort_unstable();
        Ok(versions)
    }

    /// Publish `payload` as the next version and swap the active pointer.
    ///
    /// Returns the new version number. The pointer swap is conditional on the
    /// pointer value observed at the start; a concurrent publisher winning the
    /// race yields `PublishConflict` and leaves the pointer untouched. The
    /// orphaned version entry is harmless and reclaimed by [`prune_stale`].
    ///
    /// [`prune_stale`]: VersionManager::prune_stale
    pub async fn publish(
        &self,
        entity: &VersionNodePath,
        payload: &str,
    ) -> Result<u64, MetadataError> {
        let pointer_path = entity.active_version_path().to_string();
        let observed = self.store.get(&pointer_path).await?;
        if let Some(raw) = observed.as_deref() {
            // Validate before building on top of it.
            parse_version(raw)?;
        }
        let next = match self.list_versions(entity).await?.last() {
            Some(latest) => latest + 1,
            None => 0,
        };
        self.store
            .put(&entity.version_path(next).to_string(), payload)
            .await?;
        let swapped = self
            .store
            .compare_and_set(&pointer_path, observed.as_deref(), &next.to_string())
            .await?;
        if !swapped {
            return Err(MetadataError::PublishConflict { path: pointer_path });
        }
        tracing::debug!(entity = %entity.entity_path(), version = next, "published metadata version");
        Ok(next)
    }

    /// Delete history entries older than the active version.
    pub async fn prune_stale(&self, entity: &VersionNodePath) -> Result<(), MetadataError> {
        let active = match self.active_version(entity).await? {
            Some(version) => version,
            None => return Ok(()),
        };
        for version in self.list_versions(entity).await? {
            if version < active {
                self.store.delete(&entity.version_path(version).to_string()).await?;
            }
        }
        Ok(())
    }
}
