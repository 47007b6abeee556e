//! Paths for logical databases, schemas, and tables:
//!
//! ```text
//! /metadata/{database}
//! /metadata/{database}/schemas/{schema}
//! /metadata/{database}/schemas/{schema}/tables/{table}
//! ```

use crate::path::version::VersionNodePath;
use crate::path::NodePath;

use super::{split_metadata, METADATA_ROOT};

const SCHEMAS: &str = "schemas";
const TABLES: &str = "tables";

/// Generator for the logical-database subtree root.
#[derive(Debug, Clone)]
pub struct DatabaseNodePath;

impl DatabaseNodePath {
    /// `/metadata`
    pub fn root_path() -> NodePath {
        NodePath::new([METADATA_ROOT])
    }

    /// `/metadata/{database}`
    pub fn path(database: &str) -> NodePath {
        NodePath::new([METADATA_ROOT, database])
    }

    pub fn find_database_name(path: &str) -> Option<String> {
        let parsed = NodePath::parse(path)?;
        match split_metadata(parsed.segments())? {
            (database, []) => Some(database.to_string()),
            _ => None,
        }
    }
}

/// Generator scoped to one database's schemas.
#[derive(Debug, Clone)]
pub struct SchemaNodePath {
    database: String,
}

impl SchemaNodePath {
    pub fn new(database: impl Into<String>) -> Self {
        Self { database: database.into() }
    }

    /// `/metadata/{database}/schemas`
    pub fn root_path(&self) -> NodePath {
        DatabaseNodePath::path(&self.database).join(SCHEMAS)
    }

    /// `/metadata/{database}/schemas/{schema}`
    pub fn path(&self, schema: &str) -> NodePath {
        self.root_path().join(schema)
    }
}

/// Fully qualified table identity parsed back out of a table path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableIdentity {
    pub database: String,
    pub schema: String,
    pub table: String,
}

/// Generator scoped to one schema's tables.
#[derive(Debug, Clone)]
pub struct TableNodePath {
    database: String,
    schema: String,
}

impl TableNodePath {
    pub fn new(database: impl Into<String>, schema: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
        }
    }

    /// `/metadata/{database}/schemas/{schema}/tables`
    pub fn root_path(&self) -> NodePath {
        SchemaNodePath::new(self.database.clone()).path(&self.schema).join(TABLES)
    }

    /// `/metadata/{database}/schemas/{schema}/tables/{table}`
    pub fn path(&self, table: &str) -> NodePath {
        self.root_path().join(table)
    }

    /// Versioned view of one table's metadata entry.
    pub fn version(&self, table: &str) -> VersionNodePath {
        VersionNodePath::new(self.path(table))
    }

    /// Strict parse of a table path into its full identity. Wrong literal
    /// segments (wrong root keyword, wrong subtree) yield `None`, never a
    /// partial match.
    pub fn parse(path: &str) -> Option<TableIdentity> {
        let parsed = NodePath::parse(path)?;
        let (database, rest) = split_metadata(parsed.segments())?;
        match rest {
            [schemas, schema, tables, table] if schemas == SCHEMAS && tables == TABLES => {
                Some(TableIdentity {
                    database: database.to_string(),
                    schema: schema.to_string(),
                    table: table.to_string(),
                })
            }
            _ => None,
        }
    }

    pub fn find_table_name(path: &str) -> Option<String> {
        Self::parse(path).map(|identity| identity.table)
    }

    pub fn is_table_path(path: &str) -> bool {
        Self::parse(path).is_some()
    }
}
