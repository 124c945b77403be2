//! Decision tables

use super::key::DiscreteKey;
use super::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from discrete key to decision value.
///
/// Entries are kept ordered by key so exports are byte-for-byte stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecisionTable {
    entries: BTreeMap<DiscreteKey, Value>,
}

impl DecisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the previous value for the key
    pub fn insert(&mut self, key: DiscreteKey, value: Value) -> Option<Value> {
        self.entries.insert(key, value)
    }

    pub fn get(&self, key: &DiscreteKey) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &DiscreteKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&DiscreteKey, &Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &DiscreteKey> {
        self.entries.keys()
    }
}

impl FromIterator<(DiscreteKey, Value)> for DecisionTable {
    fn from_iter<I: IntoIterator<Item = (DiscreteKey, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_lookup() {
        let table: DecisionTable = vec![
            (DiscreteKey::from("0000"), Value::label("A")),
            (DiscreteKey::from("2222"), Value::label("C")),
        ]
        .into_iter()
        .collect();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(&"2222".into()), Some(&Value::label("C")));
        assert_eq!(table.get(&"1111".into()), None);
    }

    #[test]
    fn test_table_serializes_sorted() {
        let mut table = DecisionTable::new();
        table.insert("2000".into(), Value::Number(3.0));
        table.insert("0001".into(), Value::label("A"));

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"0001":"A","2000":3}"#);

        let back: DecisionTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }
}
