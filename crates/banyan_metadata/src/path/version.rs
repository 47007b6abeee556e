//! The `active_version` / `versions/{n}` suffix convention.
//!
//! Every versioned entity keeps an immutable history of numbered version
//! entries plus a pointer key naming the currently active one. Readers
//! snapshot a version without locking; writers append `versions/{n+1}` and
//! atomically swap the pointer.

use banyan_common::error::MetadataError;

use super::NodePath;

/// Literal segment of the active-version pointer key.
pub const ACTIVE_VERSION: &str = "active_version";
/// Literal segment of the version-history subtree.
pub const VERSIONS: &str = "versions";

/// Version-path view over one entity path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNodePath {
    entity_path: NodePath,
}

impl VersionNodePath {
    pub fn new(entity_path: NodePath) -> Self {
        Self { entity_path }
    }

    pub fn entity_path(&self) -> &NodePath {
        &self.entity_path
    }

    /// `{entity}/active_version`
    pub fn active_version_path(&self) -> NodePath {
        self.entity_path.join(ACTIVE_VERSION)
    }

    /// `{entity}/versions`
    pub fn versions_path(&self) -> NodePath {
        self.entity_path.join(VERSIONS)
    }

    /// `{entity}/versions/{n}`
    pub fn version_path(&self, version: u64) -> NodePath {
        self.versions_path().join(version.to_string())
    }

    /// True iff `path` is this entity's active-version pointer key. Used by
    /// metadata watchers to pick the relevant key out of unrelated events.
    pub fn is_active_version_path(&self, path: &str) -> bool {
        NodePath::parse(path).is_some_and(|p| p == self.active_version_path())
    }

    /// Extract the version number from `{entity}/versions/{n}`, if `path` is
    /// under this entity's version subtree. A malformed version segment is a
    /// distinct error, never coerced.
    pub fn find_version(&self, path: &str) -> Result<Option<u64>, MetadataError> {
        let parsed = match NodePath::parse(path) {
            Some(p) => p,
            None => return Ok(None),
        };
        let versions_root = self.versions_path();
        let (last, prefix) = match parsed.segments().split_last() {
            Some(split) => split,
            None => return Ok(None),
        };
        if prefix != versions_root.segments() {
            return Ok(None);
        }
        parse_version(last).map(Some)
    }
}

/// Strictly parse one version segment: base-10, non-negative, no sign, no
/// leading zeros (other than `"0"` itself).
pub fn parse_version(segment: &str) -> Result<u64, MetadataError> {
    let invalid = || MetadataError::InvalidVersion {
        segment: segment.to_string(),
    };
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if segment.len() > 1 && segment.starts_with('0') {
        return Err(invalid());
    }
    segment.parse::<u64>().map_err(|_| invalid())
}
