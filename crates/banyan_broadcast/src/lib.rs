//! Broadcast routing for the BanyanDB proxy.
//!
//! A broadcast table is mirrored identically across every physical instance
//! of a logical database. This crate owns the rule that tracks which tables
//! are designated broadcast ([`rule`], refreshed from cluster metadata by
//! [`rule_loader`]) and the per-statement decision engine that picks one of
//! four execution strategies: fan out to every instance, fan out per table,
//! serve from exactly one instance, or skip broadcast entirely ([`route`]).

pub mod route;
pub mod rule;
pub mod rule_loader;

pub use route::factory::new_route_engine;
pub use route::{LogicalDatabase, RouteDecision, RouteEngine, RouteUnit};
pub use rule::{BroadcastRule, BroadcastTableSet};
pub use rule_loader::BroadcastRuleLoader;
