//! Statement classification by static type/shape.
//!
//! Mirrors the classic TCL/DDL/DAL/DCL/DML split a SQL proxy routes on. No
//! table information is resolved here; that belongs to the capability record
//! in [`crate::context`].

use sqlparser::ast::{CloseCursor, DeclareType, Statement};

/// Coarse statement category consumed by the routing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementCategory {
    /// BEGIN / COMMIT / ROLLBACK / SAVEPOINT / SET TRANSACTION.
    TransactionControl,
    /// CLOSE ALL: releases every open cursor on the connection.
    CursorCloseAll,
    /// DECLARE / FETCH / CLOSE of one named cursor.
    CursorOperation,
    /// CREATE / ALTER / DROP / TRUNCATE of schema objects.
    DataDefinition,
    /// SHOW / SET / ANALYZE / EXPLAIN and other administrative statements.
    DataAdministration,
    /// GRANT / REVOKE / role management.
    DataControl,
    /// SELECT.
    DataManipulationSelect,
    /// INSERT / UPDATE / DELETE / MERGE / COPY.
    DataManipulationOther,
    /// Anything the proxy does not recognize; routed as a no-op.
    Other,
}

/// Classify an already-parsed statement. Pure and total: unrecognized shapes
/// land in [`StatementCategory::Other`], never an error.
pub fn classify(statement: &Statement) -> StatementCategory {
    match statement {
        Statement::StartTransaction { .. }
        | Statement::Commit { .. }
        | Statement::Rollback { .. }
        | Statement::Savepoint { .. }
        | Statement::ReleaseSavepoint { .. }
        | Statement::SetTransaction { .. } => StatementCategory::TransactionControl,

        Statement::Close { cursor: CloseCursor::All } => StatementCategory::CursorCloseAll,
        Statement::Close { .. } | Statement::Fetch { .. } => StatementCategory::CursorOperation,
        Statement::Declare { stmts } => {
            let is_cursor = stmts.iter().any(|declare| {
                declare.for_query.is_some()
                    || matches!(&declare.declare_type, Some(DeclareType::Cursor))
            });
            if is_cursor {
                StatementCategory::CursorOperation
            } else {
                StatementCategory::Other
            }
        }

        Statement::CreateTable(_)
        | Statement::CreateView { .. }
        | Statement::CreateIndex(_)
        | Statement::CreateSchema { .. }
        | Statement::CreateDatabase { .. }
        | Statement::CreateSequence { .. }
        | Statement::AlterTable { .. }
        | Statement::AlterIndex { .. }
        | Statement::AlterView { .. }
        | Statement::Drop { .. }
        | Statement::Truncate { .. } => StatementCategory::DataDefinition,

        Statement::ShowTables { .. }
        | Statement::ShowColumns { .. }
        | Statement::ShowCreate { .. }
        | Statement::ShowFunctions { .. }
        | Statement::ShowVariable { .. }
        | Statement::ShowVariables { .. }
        | Statement::ShowStatus { .. }
        | Statement::ShowCollation { .. }
        | Statement::SetVariable { .. }
        | Statement::SetTimeZone { .. }
        | Statement::SetNames { .. }
        | Statement::SetNamesDefault { .. }
        | Statement::Analyze { .. }
        | Statement::Explain { .. }
        | Statement::ExplainTable { .. }
        | Statement::Flush { .. }
        | Statement::Kill { .. }
        | Statement::Use { .. } => StatementCategory::DataAdministration,

        Statement::Grant { .. }
        | Statement::Revoke { .. }
        | Statement::CreateRole { .. }
        | Statement::AlterRole { .. } => StatementCategory::DataControl,

        Statement::Query(_) => StatementCategory::DataManipulationSelect,

        Statement::Insert(_)
        | Statement::Update { .. }
        | Statement::Delete(_)
        | Statement::Merge { .. }
        | Statement::Copy { .. } => StatementCategory::DataManipulationOther,

        _ => StatementCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_one;

    fn category_of(sql: &str) -> StatementCategory {
        classify(&parse_one(sql).unwrap())
    }

    #[test]
    fn test_transaction_control() {
        assert_eq!(category_of("BEGIN"), StatementCategory::TransactionControl);
        assert_eq!(category_of("COMMIT"), StatementCategory::TransactionControl);
        assert_eq!(category_of("ROLLBACK"), StatementCategory::TransactionControl);
        assert_eq!(category_of("SAVEPOINT sp1"), StatementCategory::TransactionControl);
    }

    #[test]
    fn test_cursor_statements() {
        assert_eq!(category_of("CLOSE ALL"), StatementCategory::CursorCloseAll);
        assert_eq!(category_of("CLOSE foo_cursor"), StatementCategory::CursorOperation);
        assert_eq!(
            category_of("DECLARE foo_cursor CURSOR FOR SELECT * FROM foo_tbl"),
            StatementCategory::CursorOperation
        );
    }

    #[test]
    fn test_data_definition() {
        assert_eq!(
            category_of("CREATE TABLE foo_tbl (id INT)"),
            StatementCategory::DataDefinition
        );
        assert_eq!(category_of("DROP TABLE foo_tbl"), StatementCategory::DataDefinition);
        assert_eq!(
            category_of("ALTER TABLE foo_tbl ADD COLUMN c INT"),
            StatementCategory::DataDefinition
        );
        assert_eq!(category_of("TRUNCATE TABLE foo_tbl"), StatementCategory::DataDefinition);
    }

    #[test]
    fn test_data_administration() {
        assert_eq!(category_of("SHOW TABLES"), StatementCategory::DataAdministration);
        assert_eq!(category_of("SET search_path = public"), StatementCategory::DataAdministration);
        assert_eq!(
            category_of("EXPLAIN SELECT * FROM foo_tbl"),
            StatementCategory::DataAdministration
        );
    }

    #[test]
    fn test_data_control() {
        assert_eq!(
            category_of("GRANT SELECT ON foo_tbl TO alice"),
            StatementCategory::DataControl
        );
        assert_eq!(
            category_of("REVOKE SELECT ON foo_tbl FROM alice"),
            StatementCategory::DataControl
        );
    }

    #[test]
    fn test_data_manipulation() {
        assert_eq!(
            category_of("SELECT * FROM foo_tbl"),
            StatementCategory::DataManipulationSelect
        );
        assert_eq!(
            category_of("INSERT INTO foo_tbl VALUES (1)"),
            StatementCategory::DataManipulationOther
        );
        assert_eq!(
            category_of("UPDATE foo_tbl SET id = 1"),
            StatementCategory::DataManipulationOther
        );
        assert_eq!(category_of("DELETE FROM foo_tbl"), StatementCategory::DataManipulationOther);
    }
}
