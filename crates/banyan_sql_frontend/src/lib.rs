//! SQL statement frontend for the BanyanDB proxy.
//!
//! Parses incoming SQL with sqlparser-rs and distills each statement into a
//! [`StatementContext`]: its category (transaction control, DDL, DAL, DCL,
//! DML, cursor operations) plus the capability record the routing layer
//! pattern-matches on, with table references and cursor semantics resolved
//! once at construction time.

pub mod classifier;
pub mod context;
pub mod extractor;
pub mod parser;

pub use classifier::{classify, StatementCategory};
pub use context::{CursorContext, StatementContext};
pub use extractor::extract_table_names;
pub use parser::parse_sql;
