//! Table-name extraction from arbitrary statement shapes.
//!
//! The routing layer needs table names even from statements that do not
//! naturally expose a FROM clause (CREATE TABLE, GRANT, DECLARE CURSOR).
//! Extraction is syntactic: names come out exactly as written, unqualified by
//! schema resolution, with CTE aliases excluded.

use std::collections::BTreeSet;

use sqlparser::ast::{
    CopySource, Delete, FromTable, GrantObjects, ObjectName, ObjectType, Query, SetExpr, Statement,
    TableFactor, TableWithJoins,
};

/// Collect every referenced table name from one statement.
pub fn extract_table_names(statement: &Statement) -> BTreeSet<String> {
    let mut tables = BTreeSet::new();
    collect_statement(statement, &mut tables);
    tables
}

fn collect_statement(statement: &Statement, out: &mut BTreeSet<String>) {
    match statement {
        Statement::Query(query) => collect_query(query, out),
        Statement::Insert(insert) => {
            push_object_name(&insert.table_name, out);
            if let Some(source) = &insert.source {
                collect_query(source, out);
            }
        }
        Statement::Update { table, from, .. } => {
            collect_table_with_joins(table, out);
            if let Some(from) = from {
                collect_table_with_joins(from, out);
            }
        }
        Statement::Delete(Delete { from, using, .. }) => {
            let relations = match from {
                FromTable::WithFromKeyword(relations) => relations,
                FromTable::WithoutKeyword(relations) => relations,
            };
            for relation in relations {
                collect_table_with_joins(relation, out);
            }
            if let Some(using) = using {
                for relation in using {
                    collect_table_with_joins(relation, out);
                }
            }
        }
        Statement::Merge { table, source, .. } => {
            collect_table_factor(table, out);
            collect_table_factor(source, out);
        }
        Statement::Copy { source, .. } => {
            match source {
                CopySource::Table { table_name, .. } => push_object_name(table_name, out),
                CopySource::Query(query) => collect_query(query, out),
            }
        }

        Statement::CreateTable(create) => push_object_name(&create.name, out),
        Statement::CreateView { name, query, .. } => {
            push_object_name(name, out);
            collect_query(query, out);
        }
        Statement::CreateIndex(create_index) => push_object_name(&create_index.table_name, out),
        Statement::AlterTable { name, .. } => push_object_name(name, out),
        Statement::AlterIndex { .. } => {}
        Statement::AlterView { name, query, .. } => {
            push_object_name(name, out);
            collect_query(query, out);
        }
        Statement::Drop { object_type, names, .. } => {
            if matches!(object_type, ObjectType::Table | ObjectType::View) {
                for name in names {
                    push_object_name(name, out);
                }
            }
        }
        Statement::Truncate { table_name, .. } => push_object_name(table_name, out),

        Statement::Analyze { table_name, .. } => push_object_name(table_name, out),
        Statement::ExplainTable { table_name, .. } => push_object_name(table_name, out),
        Statement::Explain { statement, .. } => collect_statement(statement, out),
        Statement::ShowColumns { table_name, .. } => push_object_name(table_name, out),

        Statement::Grant { objects, .. } | Statement::Revoke { objects, .. } => {
            if let GrantObjects::Tables(names) = objects {
                for name in names {
                    push_object_name(name, out);
                }
            }
        }

        Statement::Declare { stmts } => {
            for declare in stmts {
                if let Some(query) = &declare.for_query {
                    collect_query(query, out);
                }
            }
        }

        // Statements without table references (TCL, cursor FETCH/CLOSE,
        // session administration) contribute nothing.
        _ => {}
    }
}

fn collect_query(query: &Query, out: &mut BTreeSet<String>) {
    let mut cte_aliases = BTreeSet::new();
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            cte_aliases.insert(cte.alias.name.value.clone());
            collect_query(&cte.query, out);
        }
    }
    collect_set_expr(&query.body, out);
    // A CTE alias is a derived relation, not a table of the database.
    for alias in cte_aliases {
        out.remove(&alias);
    }
}

fn collect_set_expr(body: &SetExpr, out: &mut BTreeSet<String>) {
    match body {
        SetExpr::Select(select) => {
            for relation in &select.from {
                collect_table_with_joins(relation, out);
            }
        }
        SetExpr::Query(query) => collect_query(query, out),
        SetExpr::SetOperation { left, right, .. } => {
            collect_set_expr(left, out);
            collect_set_expr(right, out);
        }
        SetExpr::Insert(statement) | SetExpr::Update(statement) => {
            collect_statement(statement, out);
        }
        // VALUES and bare TABLE bodies reference no stored table here.
        _ => {}
    }
}

fn collect_table_with_joins(relation: &TableWithJoins, out: &mut BTreeSet<String>) {
    collect_table_factor(&relation.relation, out);
    for join in &relation.joins {
        collect_table_factor(&join.relation, out);
    }
}

fn collect_table_factor(factor: &TableFactor, out: &mut BTreeSet<String>) {
    match factor {
        TableFactor::Table { name, .. } => push_object_name(name, out),
        TableFactor::Derived { subquery, .. } => collect_query(subquery, out),
        TableFactor::NestedJoin { table_with_joins, .. } => {
            collect_table_with_joins(table_with_joins, out);
        }
        // Table functions, UNNEST and friends reference no stored table.
        _ => {}
    }
}

fn push_object_name(name: &ObjectName, out: &mut BTreeSet<String>) {
    if let Some(last) = name.0.last() {
        out.insert(last.value.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_one;

    fn tables_of(sql: &str) -> Vec<String> {
        extract_table_names(&parse_one(sql).unwrap()).into_iter().collect()
    }

    #[test]
    fn test_select_single_table() {
        assert_eq!(tables_of("SELECT * FROM foo_tbl"), ["foo_tbl"]);
    }

    #[test]
    fn test_select_with_join_and_subquery() {
        assert_eq!(
            tables_of(
                "SELECT * FROM foo_tbl f \
                 JOIN bar_tbl b ON f.id = b.id \
                 WHERE f.id IN (SELECT 1)"
            ),
            ["bar_tbl", "foo_tbl"]
        );
        assert_eq!(
            tables_of("SELECT * FROM (SELECT id FROM foo_tbl) t"),
            ["foo_tbl"]
        );
    }

    #[test]
    fn test_set_operation() {
        assert_eq!(
            tables_of("SELECT id FROM foo_tbl UNION SELECT id FROM bar_tbl"),
            ["bar_tbl", "foo_tbl"]
        );
    }

    #[test]
    fn test_cte_alias_is_not_a_table() {
        assert_eq!(
            tables_of("WITH recent AS (SELECT * FROM foo_tbl) SELECT * FROM recent"),
            ["foo_tbl"]
        );
    }

    #[test]
    fn test_dml_targets() {
        assert_eq!(tables_of("INSERT INTO foo_tbl VALUES (1)"), ["foo_tbl"]);
        assert_eq!(
            tables_of("INSERT INTO foo_tbl SELECT id FROM bar_tbl"),
            ["bar_tbl", "foo_tbl"]
        );
        assert_eq!(tables_of("UPDATE foo_tbl SET id = 1"), ["foo_tbl"]);
        assert_eq!(tables_of("DELETE FROM foo_tbl WHERE id = 1"), ["foo_tbl"]);
    }

    #[test]
    fn test_ddl_names_without_from_clause() {
        assert_eq!(tables_of("CREATE TABLE foo_tbl (id INT)"), ["foo_tbl"]);
        assert_eq!(tables_of("DROP TABLE foo_tbl, bar_tbl"), ["bar_tbl", "foo_tbl"]);
        assert_eq!(tables_of("ALTER TABLE foo_tbl ADD COLUMN c INT"), ["foo_tbl"]);
        assert_eq!(tables_of("TRUNCATE TABLE foo_tbl"), ["foo_tbl"]);
        // Dropping a non-table object references no table.
        assert_eq!(tables_of("DROP SCHEMA foo_schema"), Vec::<String>::new());
    }

    #[test]
    fn test_grant_on_tables() {
        assert_eq!(tables_of("GRANT SELECT ON foo_tbl TO alice"), ["foo_tbl"]);
    }

    #[test]
    fn test_declare_cursor_query() {
        assert_eq!(
            tables_of("DECLARE foo_cursor CURSOR FOR SELECT * FROM foo_tbl"),
            ["foo_tbl"]
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(
            tables_of("SELECT * FROM foo_tbl a JOIN foo_tbl b ON a.id = b.id"),
            ["foo_tbl"]
        );
    }

    #[test]
    fn test_qualified_name_keeps_table_segment() {
        assert_eq!(tables_of("SELECT * FROM foo_schema.foo_tbl"), ["foo_tbl"]);
    }
}
