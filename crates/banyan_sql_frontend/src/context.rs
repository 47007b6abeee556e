//! Statement capability record.
//!
//! Instead of probing the AST at routing time, each parsed statement is
//! distilled once into a `StatementContext`: its category plus two explicit
//! capabilities, whether the shape exposes table references and whether it
//! carries cursor semantics. The routing engine pattern-matches on
//! present/absent fields and never touches the AST again.

use std::collections::BTreeSet;

use sqlparser::ast::{GrantObjects, Statement};

use crate::classifier::{classify, StatementCategory};
use crate::extractor::extract_table_names;

/// Cursor semantics of a statement, present only for cursor statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorContext {
    /// True for `CLOSE ALL`.
    pub closes_all: bool,
}

/// Post-parse representation of one statement as the routing layer sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementContext {
    pub category: StatementCategory,
    /// Referenced table names; `None` when the statement's shape exposes no
    /// table references at all (distinct from `Some(empty)`).
    pub table_refs: Option<BTreeSet<String>>,
    pub cursor: Option<CursorContext>,
}

impl StatementContext {
    /// Build the capability record for one parsed statement.
    pub fn of(statement: &Statement) -> Self {
        let category = classify(statement);
        let cursor = match category {
            StatementCategory::CursorCloseAll => Some(CursorContext { closes_all: true }),
            StatementCategory::CursorOperation => Some(CursorContext { closes_all: false }),
            _ => None,
        };
        let table_refs = if exposes_table_refs(statement, category) {
            Some(extract_table_names(statement))
        } else {
            None
        };
        Self { category, table_refs, cursor }
    }

    pub fn exposes_tables(&self) -> bool {
        self.table_refs.is_some()
    }

    /// Referenced tables, empty when the shape exposes none.
    pub fn table_names(&self) -> BTreeSet<String> {
        self.table_refs.clone().unwrap_or_default()
    }

    pub fn is_cursor_operation(&self) -> bool {
        matches!(self.cursor, Some(CursorContext { closes_all: false }))
    }

    pub fn closes_all_cursors(&self) -> bool {
        matches!(self.cursor, Some(CursorContext { closes_all: true }))
    }
}

/// Whether this statement shape carries table references.
///
/// DDL always does: the extractor resolves names even for statements without
/// a FROM clause. DAL and DCL only do for shapes that name tables (ANALYZE,
/// EXPLAIN, GRANT ... ON table). FETCH/CLOSE name a cursor, not a table.
fn exposes_table_refs(statement: &Statement, category: StatementCategory) -> bool {
    match category {
        StatementCategory::DataDefinition
        | StatementCategory::DataManipulationSelect
        | StatementCategory::DataManipulationOther => true,
        StatementCategory::CursorOperation => {
            matches!(statement, Statement::Declare { .. })
        }
        StatementCategory::DataAdministration => matches!(
            statement,
            Statement::Analyze { .. }
                | Statement::Explain { .. }
                | Statement::ExplainTable { .. }
                | Statement::ShowColumns { .. }
        ),
        StatementCategory::DataControl => matches!(
            statement,
            Statement::Grant { objects: GrantObjects::Tables(_), .. }
                | Statement::Revoke { objects: GrantObjects::Tables(_), .. }
        ),
        StatementCategory::TransactionControl
        | StatementCategory::CursorCloseAll
        | StatementCategory::Other => false,
    }
}
