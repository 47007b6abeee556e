//! Metadata path addressing and versioning for the BanyanDB proxy.
//!
//! Every piece of cluster metadata lives under a hierarchical string key in
//! the coordination store (an etcd/ZooKeeper-class external service). This
//! crate owns:
//!
//! - the node-path grammar (`path`): building and strictly parsing the keys,
//! - the `active_version` / `versions/{n}` optimistic-concurrency convention
//!   (`path::version`, `version_manager`),
//! - the coordination-store boundary trait plus an in-memory implementation
//!   used by tests and single-node runs (`store`).

pub mod path;
pub mod store;
pub mod version_manager;

pub use path::version::{parse_version, VersionNodePath};
pub use path::NodePath;
pub use store::{CoordinationStore, MemoryCoordinationStore, WatchEvent, WatchEventKind};
pub use version_manager::{ActiveVersion, VersionManager};
