//! Broadcast routing engine variants.
//!
//! A `RouteEngine` is chosen per statement by [`factory::new_route_engine`]
//! and owned by that statement's caller; it is immutable once constructed.
//! The execution layer materializes the actual fan-out by calling
//! [`RouteEngine::route`] against the logical database's storage topology.

pub mod factory;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

/// Logical database as the router sees it: a name plus the physical storage
/// units (data sources) backing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalDatabase {
    pub name: String,
    pub storage_units: Vec<String>,
}

impl LogicalDatabase {
    pub fn new(name: impl Into<String>, storage_units: Vec<String>) -> Self {
        Self { name: name.into(), storage_units }
    }
}

/// One routed execution target: a storage unit and the broadcast tables the
/// statement touches on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteUnit {
    pub storage_unit: String,
    pub tables: BTreeSet<String>,
}

/// Materialized fan-out for one statement.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RouteDecision {
    pub units: Vec<RouteUnit>,
}

impl RouteDecision {
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

/// Execution strategy for one statement, decided by the factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteEngine {
    /// Execute on every physical instance of the logical database.
    DatabaseBroadcast,
    /// Execute on every instance hosting the named broadcast tables.
    TableBroadcast(BTreeSet<String>),
    /// Execute on exactly one deterministically chosen instance.
    Unicast(BTreeSet<String>),
    /// No cross-instance fan-out required.
    Ignore,
}

impl RouteEngine {
    /// Materialize the target list against the database's storage topology.
    pub fn route(&self, database: &LogicalDatabase) -> RouteDecision {
        match self {
            RouteEngine::DatabaseBroadcast => RouteDecision {
                units: database
                    .storage_units
                    .iter()
                    .map(|unit| RouteUnit {
                        storage_unit: unit.clone(),
                        tables: BTreeSet::new(),
                    })
                    .collect(),
            },
            RouteEngine::TableBroadcast(tables) => RouteDecision {
                units: database
                    .storage_units
                    .iter()
                    .map(|unit| RouteUnit {
                        storage_unit: unit.clone(),
                        tables: tables.clone(),
                    })
                    .collect(),
            },
            RouteEngine::Unicast(tables) => {
                let units = &database.storage_units;
                if units.is_empty() {
                    return RouteDecision::default();
                }
                // Stable pick: same tables + same topology → same unit, on
                // every node of the proxy fleet.
                let key = tables.iter().map(String::as_str).collect::<Vec<_>>().join(",");
                let index = (xxh3_64(key.as_bytes()) % units.len() as u64) as usize;
                RouteDecision {
                    units: vec![RouteUnit {
                        storage_unit: units[index].clone(),
                        tables: tables.clone(),
                    }],
                }
            }
            RouteEngine::Ignore => RouteDecision::default(),
        }
    }
}
