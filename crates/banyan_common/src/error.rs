use thiserror::Error;

/// Top-level error type that all crate-specific errors convert into.
#[derive(Error, Debug)]
pub enum BanyanError {
    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("SQL error: {0}")]
    Sql(#[from] SqlError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Metadata layer errors.
///
/// Path lookups that simply miss (probing an unrelated key) are `Option::None`
/// at the call site, not errors. Everything here signals state that must not
/// be masked: a corrupt version marker threatens the optimistic-concurrency
/// protocol.
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Invalid version segment: {segment:?}")]
    InvalidVersion { segment: String },

    #[error("Active version pointer at {path} names a missing version entry")]
    ActiveVersionMissing { path: String },

    #[error("Version publish conflict at {path}: active version moved")]
    PublishConflict { path: String },

    #[error("Coordination store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// SQL frontend errors.
#[derive(Error, Debug)]
pub enum SqlError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unsupported statement: {0}")]
    Unsupported(String),
}
