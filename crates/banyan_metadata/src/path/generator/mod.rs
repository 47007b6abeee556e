//! Per-entity-kind node path generators and parsers.
//!
//! Each entity kind shares the same two conventions (a plain entity path and
//! a versioned entity path), so new kinds can be added without touching
//! existing ones. Generators build keys; the parser companions recognize
//! relevant keys among unrelated ones (watchers probe every event path), so
//! they return `Option`/`bool`, never errors.

pub mod database;
pub mod rule;
pub mod state;
pub mod storage;

pub use database::{DatabaseNodePath, SchemaNodePath, TableNodePath};
pub use rule::BroadcastTablesNodePath;
pub use state::{QualifiedDataSource, QualifiedDataSourceNodePath};
pub use storage::StorageNodeNodePath;

/// Root literal of the per-database metadata subtree.
pub(crate) const METADATA_ROOT: &str = "metadata";

/// Split a canonical path into segments if it starts under `/metadata/{db}`.
/// Returns the database segment and the remainder.
pub(crate) fn split_metadata<'a>(segments: &'a [String]) -> Option<(&'a str, &'a [String])> {
    match segments {
        [root, database, rest @ ..] if root == METADATA_ROOT => Some((database.as_str(), rest)),
        _ => None,
    }
}
