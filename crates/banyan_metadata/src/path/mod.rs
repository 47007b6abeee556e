//! Hierarchical node paths over the coordination store keyspace.
//!
//! A `NodePath` is an ordered sequence of string segments with a canonical
//! `/`-joined textual form. Parsing is segment-exact: no normalization of
//! case or whitespace, and formatting then parsing a path yields the original
//! segments. Per-entity-kind generators live in [`generator`]; the
//! `active_version`/`versions/{n}` suffix convention lives in [`version`].

pub mod generator;
pub mod version;

use std::fmt;

/// Immutable, cheaply clonable sequence of path segments.
///
/// Segments never contain the `/` separator; `NodePath::new` skips empty
/// segments so that `parse(format(p)) == p` holds for every constructible
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// Build a path from segments. Empty segments are dropped; a segment
    /// containing `/` is split at the separator so the canonical form stays
    /// parseable.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments = segments
            .into_iter()
            .flat_map(|s| {
                s.into()
                    .split('/')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect();
        Self { segments }
    }

    /// Parse a canonical `/`-prefixed path. Returns `None` for anything that
    /// is not a non-empty absolute path with non-empty segments.
    pub fn parse(raw: &str) -> Option<Self> {
        let rest = raw.strip_prefix('/')?;
        if rest.is_empty() {
            return None;
        }
        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return None;
            }
            segments.push(segment.to_string());
        }
        Some(Self { segments })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// New path with one more trailing segment.
    pub fn join(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            segment
                .into()
                .split('/')
                .filter(|p| !p.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_is_slash_joined() {
        let path = NodePath::new(["metadata", "foo_db", "schemas", "foo_schema"]);
        assert_eq!(path.to_string(), "/metadata/foo_db/schemas/foo_schema");
    }

    #[test]
    fn test_round_trip() {
        let path = NodePath::new(["metadata", "foo_db", "data_sources", "nodes", "foo_ds"]);
        let parsed = NodePath::parse(&path.to_string()).unwrap();
        assert_eq!(parsed, path);
        assert_eq!(parsed.segments(), path.segments());
    }

    #[test]
    fn test_parse_is_segment_exact() {
        let parsed = NodePath::parse("/Metadata/FOO_db").unwrap();
        assert_eq!(parsed.segments(), ["Metadata", "FOO_db"]);
    }

    #[test]
    fn test_parse_rejects_relative_and_empty() {
        assert!(NodePath::parse("metadata/foo_db").is_none());
        assert!(NodePath::parse("").is_none());
        assert!(NodePath::parse("/").is_none());
        assert!(NodePath::parse("/metadata//foo_db").is_none());
    }

    #[test]
    fn test_join_appends_segment() {
        let root = NodePath::new(["nodes", "qualified_data_sources"]);
        let child = root.join("replica_query_db.readwrite_ds.replica_ds_0");
        assert_eq!(
            child.to_string(),
            "/nodes/qualified_data_sources/replica_query_db.readwrite_ds.replica_ds_0"
        );
    }
}
