//! Paths for per-database rule configuration. The broadcast rule stores its
//! designated table list as one versioned entry:
//!
//! ```text
//! /metadata/{database}/rules/broadcast/tables
//! ```

use crate::path::version::VersionNodePath;
use crate::path::NodePath;

use super::{split_metadata, DatabaseNodePath};

const RULES: &str = "rules";
const BROADCAST: &str = "broadcast";
const TABLES: &str = "tables";

/// Generator for one database's broadcast-table rule entry.
#[derive(Debug, Clone)]
pub struct BroadcastTablesNodePath {
    database: String,
}

impl BroadcastTablesNodePath {
    pub fn new(database: impl Into<String>) -> Self {
        Self { database: database.into() }
    }

    /// `/metadata/{database}/rules/broadcast/tables`
    pub fn path(&self) -> NodePath {
        DatabaseNodePath::path(&self.database)
            .join(RULES)
            .join(BROADCAST)
            .join(TABLES)
    }

    /// Versioned view of the rule entry.
    pub fn version(&self) -> VersionNodePath {
        VersionNodePath::new(self.path())
    }

    /// Parse the database name back out of a broadcast-rule path.
    pub fn parse(path: &str) -> Option<String> {
        let parsed = NodePath::parse(path)?;
        let (database, rest) = split_metadata(parsed.segments())?;
        match rest {
            [rules, broadcast, tables]
                if rules == RULES && broadcast == BROADCAST && tables == TABLES =>
            {
                Some(database.to_string())
            }
            _ => None,
        }
    }
}
