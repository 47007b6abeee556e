//! Cluster-wide state paths for qualified data sources:
//!
//! ```text
//! /nodes/qualified_data_sources
//! /nodes/qualified_data_sources/{qualifiedDataSourceId}
//! ```
//!
//! A qualified data source ties a logical database and logical data source to
//! one physical replica. The addressing layer treats the composite id as an
//! opaque token; it never parses the `.`-separated parts back out.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::path::NodePath;

const NODES_ROOT: &str = "nodes";
const QUALIFIED_DATA_SOURCES: &str = "qualified_data_sources";

/// Composite identifier `{logicalDatabase}.{logicalDataSource}.{physicalDataSource}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QualifiedDataSource(String);

impl QualifiedDataSource {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn of(database: &str, group: &str, data_source: &str) -> Self {
        Self(format!("{}.{}.{}", database, group, data_source))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QualifiedDataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generator for qualified-data-source state paths.
#[derive(Debug, Clone)]
pub struct QualifiedDataSourceNodePath;

impl QualifiedDataSourceNodePath {
    /// `/nodes/qualified_data_sources`
    pub fn root_path() -> NodePath {
        NodePath::new([NODES_ROOT, QUALIFIED_DATA_SOURCES])
    }

    /// `/nodes/qualified_data_sources/{qualifiedDataSourceId}`
    pub fn path(qualified: &QualifiedDataSource) -> NodePath {
        Self::root_path().join(qualified.as_str())
    }

    /// Parse the opaque id back out of a qualified-data-source path.
    pub fn parse(path: &str) -> Option<QualifiedDataSource> {
        let parsed = NodePath::parse(path)?;
        match parsed.segments() {
            [nodes, qualified_root, id]
                if nodes == NODES_ROOT && qualified_root == QUALIFIED_DATA_SOURCES =>
            {
                Some(QualifiedDataSource::new(id.clone()))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path() {
        assert_eq!(
            QualifiedDataSourceNodePath::root_path().to_string(),
            "/nodes/qualified_data_sources"
        );
    }

    #[test]
    fn test_qualified_data_source_path() {
        let qualified = QualifiedDataSource::new("replica_query_db.readwrite_ds.replica_ds_0");
        assert_eq!(
            QualifiedDataSourceNodePath::path(&qualified).to_string(),
            "/nodes/qualified_data_sources/replica_query_db.readwrite_ds.replica_ds_0"
        );
    }

    #[test]
    fn test_of_joins_parts() {
        let qualified = QualifiedDataSource::of("replica_query_db", "readwrite_ds", "replica_ds_0");
        assert_eq!(qualified.as_str(), "replica_query_db.readwrite_ds.replica_ds_0");
        assert_eq!(qualified.to_string(), "replica_query_db.readwrite_ds.replica_ds_0");
    }

    #[test]
    fn test_parse_is_opaque() {
        // The id keeps its internal dots untouched; only path segments matter.
        let parsed = QualifiedDataSourceNodePath::parse(
            "/nodes/qualified_data_sources/replica_query_db.readwrite_ds.replica_ds_0",
        )
        .unwrap();
        assert_eq!(parsed.as_str(), "replica_query_db.readwrite_ds.replica_ds_0");
        assert_eq!(QualifiedDataSourceNodePath::parse("/nodes/compute_nodes/x"), None);
    }
}
