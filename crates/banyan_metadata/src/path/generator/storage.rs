//! Paths for storage nodes (physical data sources of one logical database):
//!
//! ```text
//! /metadata/{database}/data_sources/nodes
//! /metadata/{database}/data_sources/nodes/{dataSourceName}
//! ```

use crate::path::version::VersionNodePath;
use crate::path::NodePath;

use super::{split_metadata, DatabaseNodePath};

const DATA_SOURCES: &str = "data_sources";
const NODES: &str = "nodes";

/// Generator scoped to one database's storage nodes.
#[derive(Debug, Clone)]
pub struct StorageNodeNodePath {
    database: String,
}

impl StorageNodeNodePath {
    pub fn new(database: impl Into<String>) -> Self {
        Self { database: database.into() }
    }

    /// `/metadata/{database}/data_sources/nodes`
    pub fn root_path(&self) -> NodePath {
        DatabaseNodePath::path(&self.database).join(DATA_SOURCES).join(NODES)
    }

    /// `/metadata/{database}/data_sources/nodes/{dataSourceName}`
    pub fn path(&self, data_source: &str) -> NodePath {
        self.root_path().join(data_source)
    }

    /// Versioned view of one storage node's metadata entry.
    pub fn version(&self, data_source: &str) -> VersionNodePath {
        VersionNodePath::new(self.path(data_source))
    }

    /// Parse `(database, dataSourceName)` back out of a storage-node path.
    pub fn parse(path: &str) -> Option<(String, String)> {
        let parsed = NodePath::parse(path)?;
        let (database, rest) = split_metadata(parsed.segments())?;
        match rest {
            [data_sources, nodes, data_source]
                if data_sources == DATA_SOURCES && nodes == NODES =>
            {
                Some((database.to_string(), data_source.to_string()))
            }
            _ => None,
        }
    }

    pub fn find_data_source_name(path: &str) -> Option<String> {
        Self::parse(path).map(|(_, data_source)| data_source)
    }

    pub fn is_storage_node_path(path: &str) -> bool {
        Self::parse(path).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(
            StorageNodeNodePath::new("foo_db").root_path().to_string(),
            "/metadata/foo_db/data_sources/nodes"
        );
    }

    #[test]
    fn test_path() {
        assert_eq!(
            StorageNodeNodePath::new("foo_db").path("foo_ds").to_string(),
            "/metadata/foo_db/data_sources/nodes/foo_ds"
        );
    }

    #[test]
    fn test_version() {
        let version = StorageNodeNodePath::new("foo_db").version("foo_ds");
        assert_eq!(
            version.active_version_path().to_string(),
            "/metadata/foo_db/data_sources/nodes/foo_ds/active_version"
        );
        assert_eq!(
            version.versions_path().to_string(),
            "/metadata/foo_db/data_sources/nodes/foo_ds/versions"
        );
        assert_eq!(
            version.version_path(0).to_string(),
            "/metadata/foo_db/data_sources/nodes/foo_ds/versions/0"
        );
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            StorageNodeNodePath::parse("/metadata/foo_db/data_sources/nodes/foo_ds"),
            Some(("foo_db".to_string(), "foo_ds".to_string()))
        );
        assert_eq!(StorageNodeNodePath::parse("/metadata/foo_db/data_sources/units/foo_ds"), None);
        assert!(StorageNodeNodePath::is_storage_node_path(
            "/metadata/foo_db/data_sources/nodes/foo_ds"
        ));
        assert!(!StorageNodeNodePath::is_storage_node_path(
            "/metadata/foo_db/data_sources/nodes"
        ));
    }
}
