//! Per-statement routing decision.
//!
//! The cascade below is evaluated top to bottom, first match wins. It is a
//! total function: every classified statement maps to exactly one engine
//! variant, with `Ignore` as the fall-through. Broadcast routing is a
//! consistency layer for broadcast tables, not a correctness gate for
//! ordinary statements.

use banyan_sql_frontend::{StatementCategory, StatementContext};

use crate::route::{LogicalDatabase, RouteEngine};
use crate::rule::BroadcastRule;

/// Select the routing engine for one statement.
///
/// - Transaction control and `CLOSE ALL` apply uniformly to every instance.
/// - Cursor state is instance-local: a cursor over broadcast tables must be
///   served by a single instance, anything else is not ours to route.
/// - DDL and table-scoped DAL/DCL over broadcast tables fan out per table.
/// - A broadcast-table read is consistent from any one instance; a
///   broadcast-table write must land on all of them.
pub fn new_route_engine(
    rule: &BroadcastRule,
    database: &LogicalDatabase,
    ctx: &StatementContext,
) -> RouteEngine {
    let engine = decide(rule, ctx);
    tracing::debug!(
        database = %database.name,
        category = ?ctx.category,
        engine = ?engine,
        "broadcast route decision"
    );
    engine
}

fn decide(rule: &BroadcastRule, ctx: &StatementContext) -> RouteEngine {
    if ctx.category == StatementCategory::TransactionControl {
        return RouteEngine::DatabaseBroadcast;
    }
    if ctx.closes_all_cursors() {
        return RouteEngine::DatabaseBroadcast;
    }
    if ctx.is_cursor_operation() {
        if !ctx.exposes_tables() {
            return RouteEngine::Ignore;
        }
        let tables = ctx.table_names();
        if rule.is_all_broadcast_tables(&tables) {
            return RouteEngine::Unicast(rule.filter_broadcast_table_names(&tables));
        }
        return RouteEngine::Ignore;
    }
    match ctx.category {
        StatementCategory::DataDefinition => {
            let tables = ctx.table_names();
            if rule.is_all_broadcast_tables(&tables) {
                RouteEngine::TableBroadcast(rule.filter_broadcast_table_names(&tables))
            } else {
                RouteEngine::Ignore
            }
        }
        StatementCategory::DataAdministration | StatementCategory::DataControl => {
            if !ctx.exposes_tables() {
                return RouteEngine::Ignore;
            }
            let tables = ctx.table_names();
            if !tables.is_empty() && rule.is_all_broadcast_tables(&tables) {
                RouteEngine::TableBroadcast(rule.filter_broadcast_table_names(&tables))
            } else {
                RouteEngine::Ignore
            }
        }
        StatementCategory::DataManipulationSelect | StatementCategory::DataManipulationOther => {
            if !ctx.exposes_tables() {
                return RouteEngine::Ignore;
            }
            let tables = ctx.table_names();
            if tables.is_empty() || !rule.is_all_broadcast_tables(&tables) {
                return RouteEngine::Ignore;
            }
            if ctx.category == StatementCategory::DataManipulationSelect {
                RouteEngine::Unicast(rule.filter_broadcast_table_names(&tables))
            } else {
                RouteEngine::DatabaseBroadcast
            }
        }
        _ => RouteEngine::Ignore,
    }
}
