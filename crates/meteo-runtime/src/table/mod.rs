//! Decision table lookup and rule expansion

pub mod expander;

pub use expander::RuleExpander;

use meteo_core::types::{DecisionTable, DiscreteKey};
use meteo_core::Value;

/// Result of resolving a key against a table
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub value: Value,
    /// True when the key was absent and the default was returned
    pub fallback: bool,
}

/// A decision table with its fail-open default
#[derive(Debug, Clone, PartialEq)]
pub struct TableLookup {
    table: DecisionTable,
    default: Value,
}

impl TableLookup {
    pub fn new(table: DecisionTable, default: Value) -> Self {
        Self { table, default }
    }

    /// Mapped value for `key`, or the default if the table has no entry
    pub fn resolve(&self, key: &DiscreteKey) -> Resolution {
        match self.table.get(key) {
            Some(value) => Resolution {
                value: value.clone(),
                fallback: false,
            },
            None => {
                tracing::debug!("Key {} not in table, using default {}", key, self.default);
                Resolution {
                    value: self.default.clone(),
                    fallback: true,
                }
            }
        }
    }

    pub fn table(&self) -> &DecisionTable {
        &self.table
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_hit_and_miss() {
        let table: DecisionTable = [(DiscreteKey::from("0101"), Value::label("A"))]
            .into_iter()
            .collect();
        let lookup = TableLookup::new(table, Value::label("B"));

        let hit = lookup.resolve(&"0101".into());
        assert_eq!(hit.value, Value::label("A"));
        assert!(!hit.fallback);

        let miss = lookup.resolve(&"2222".into());
        assert_eq!(miss.value, Value::label("B"));
        assert!(miss.fallback);
    }
}
