use banyan_common::error::SqlError;
use sqlparser::ast::Statement;
use sqlparser::dialect::PostgreSqlDialect;
use sqlparser::parser::Parser;

/// Parse a SQL string into one or more AST statements using sqlparser-rs.
pub fn parse_sql(sql: &str) -> Result<Vec<Statement>, SqlError> {
    let dialect = PostgreSqlDialect {};
    Parser::parse_sql(&dialect, sql).map_err(|e| SqlError::Parse(e.to_string()))
}

/// Parse a string expected to hold exactly one statement.
pub fn parse_one(sql: &str) -> Result<Statement, SqlError> {
    let mut statements = parse_sql(sql)?;
    if statements.len() != 1 {
        return Err(SqlError::Parse(format!(
            "expected exactly one statement, got {}",
            statements.len()
        )));
    }
    Ok(statements.remove(0))
}
