//! Decision table documents
//!
//! The on-disk shape of a decision configuration. A document carries either
//! an explicit `mapping` or a `rule`; `bins`, `feature_order`, `default` and
//! `evaluation` are optional. Exports use the same shape with `mapping`.

use crate::types::{BinTable, BoundRepr, DecisionTable, Feature, Value};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// How a rule document is evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationKind {
    /// Expand the rule into a full table at load time
    #[default]
    Table,
    /// Run the rule against every observation
    Direct,
}

/// Raw decision configuration document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableDocument {
    /// Feature names in key order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_order: Option<Vec<String>>,

    /// Bin overrides, keyed by feature name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bins: Option<BinsSpec>,

    /// Explicit key to decision mapping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapping: Option<DecisionTable>,

    /// Rule expression over `i1..i4` and `s`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,

    /// Rule evaluation strategy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<EvaluationKind>,

    /// Decision returned for keys the mapping does not contain
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl TableDocument {
    /// Build the export form of a table: mapping plus feature order and bins
    pub fn for_export(bins: &BinTable, mapping: DecisionTable, default: Value) -> Self {
        Self {
            feature_order: Some(Feature::order()),
            bins: Some(BinsSpec::from_table(bins)),
            mapping: Some(mapping),
            rule: None,
            evaluation: None,
            default: Some(default),
        }
    }
}

/// A `[lo, hi]` pair as written in a document
pub type BoundPair = [BoundRepr; 2];

/// Bin overrides in document order.
///
/// Serialized as a JSON/YAML map; entry order is preserved on both sides
/// so exports list features in key order and duplicate names can be
/// reported instead of silently overwritten.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinsSpec {
    pub entries: Vec<(String, Vec<BoundPair>)>,
}

impl BinsSpec {
    /// Document form of a bin table, infinities written as sentinels
    pub fn from_table(table: &BinTable) -> Self {
        let entries = table
            .iter()
            .map(|(feature, bins)| {
                let pairs = bins
                    .iter()
                    .map(|bin| [BoundRepr::from_f64(bin.lo), BoundRepr::from_f64(bin.hi)])
                    .collect();
                (feature.name().to_string(), pairs)
            })
            .collect();
        Self { entries }
    }
}

impl Serialize for BinsSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, pairs) in &self.entries {
            map.serialize_entry(name, pairs)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BinsSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BinsVisitor;

        impl<'de> Visitor<'de> for BinsVisitor {
            type Value = BinsSpec;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of feature name to [[lo, hi], ...]")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<BinsSpec, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, pairs)) = access.next_entry::<String, Vec<BoundPair>>()? {
                    entries.push((name, pairs));
                }
                Ok(BinsSpec { entries })
            }
        }

        deserializer.deserialize_map(BinsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_spec_preserves_order() {
        let json = r#"{"relative_humidity_pct": [[0, "inf"]], "wind_speed_mps": [["-inf", 3], [3, "inf"]]}"#;
        let spec: BinsSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.entries.len(), 2);
        assert_eq!(spec.entries[0].0, "relative_humidity_pct");
        assert_eq!(spec.entries[1].1.len(), 2);
        assert_eq!(spec.entries[1].1[0][0], BoundRepr::Text("-inf".into()));
    }

    #[test]
    fn test_bins_spec_from_default_table() {
        let spec = BinsSpec::from_table(&BinTable::default());
        let names: Vec<&str> = spec.entries.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "wind_speed_mps",
                "dry_bulb_temperature",
                "precipitation_mm",
                "relative_humidity_pct"
            ]
        );

        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["wind_speed_mps"][2][1], serde_json::json!("inf"));
        assert_eq!(json["dry_bulb_temperature"][0][0], serde_json::json!(-50.0));
    }

    #[test]
    fn test_document_rule_shape() {
        let doc: TableDocument =
            serde_json::from_str(r#"{"rule": "s <= 2 ? \"A\" : \"B\"", "evaluation": "direct"}"#)
                .unwrap();
        assert!(doc.mapping.is_none());
        assert_eq!(doc.evaluation, Some(EvaluationKind::Direct));
        assert!(doc.bins.is_none());
    }

    #[test]
    fn test_export_document_omits_rule_fields() {
        let doc = TableDocument::for_export(
            &BinTable::default(),
            DecisionTable::new(),
            Value::label("B"),
        );
        let json = serde_json::to_value(&doc).unwrap();
        assert!(json.get("rule").is_none());
        assert!(json.get("evaluation").is_none());
        assert_eq!(json["feature_order"][0], "wind_speed_mps");
        assert_eq!(json["default"], "B");
    }
}
