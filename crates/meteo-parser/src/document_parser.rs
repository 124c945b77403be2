//! Decision table document parser
//!
//! Reads a JSON or YAML document and interprets it into bins plus a
//! decision source (an explicit mapping or a parsed rule).

use crate::bins_parser::BinsParser;
use crate::error::{ParseError, Result};
use crate::expression_parser::ExpressionParser;
use meteo_core::ast::{EvaluationKind, Expression, TableDocument};
use meteo_core::types::{BinPolicy, BinTable, DecisionTable, Feature};
use meteo_core::Value;
use std::path::Path;

/// Serialization format of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` files are YAML, everything else JSON
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DocumentFormat::Yaml,
            _ => DocumentFormat::Json,
        }
    }
}

/// Where decisions come from
#[derive(Debug, Clone, PartialEq)]
pub enum DecisionSource {
    /// Explicit key to decision mapping
    Mapping(DecisionTable),
    /// Rule text and its parsed expression
    Rule {
        text: String,
        expression: Expression,
        evaluation: EvaluationKind,
    },
}

/// A fully interpreted document
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedDocument {
    pub bins: BinTable,
    pub source: DecisionSource,
    pub default: Option<Value>,
}

/// Document parser
pub struct DocumentParser;

impl DocumentParser {
    /// Deserialize a raw document
    pub fn parse(content: &str, format: DocumentFormat) -> Result<TableDocument> {
        let doc = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(doc)
    }

    /// Deserialize and interpret in one step
    pub fn parse_and_interpret(
        content: &str,
        format: DocumentFormat,
        policy: BinPolicy,
    ) -> Result<ParsedDocument> {
        let doc = Self::parse(content, format)?;
        Self::interpret(doc, policy)
    }

    /// Validate a raw document and resolve its bins and decision source
    pub fn interpret(doc: TableDocument, policy: BinPolicy) -> Result<ParsedDocument> {
        if let Some(order) = &doc.feature_order {
            if *order != Feature::order() {
                return Err(ParseError::InvalidValue {
                    field: "feature_order".to_string(),
                    message: format!(
                        "expected [{}], got [{}]",
                        Feature::order().join(", "),
                        order.join(", ")
                    ),
                });
            }
        }

        if let Some(default) = &doc.default {
            log::debug!("Document overrides default decision with {}", default);
        }

        let bins = BinsParser::parse(doc.bins.as_ref(), policy)?;

        let source = match (doc.mapping, doc.rule) {
            (Some(_), Some(_)) => {
                return Err(ParseError::InvalidValue {
                    field: "mapping".to_string(),
                    message: "'mapping' and 'rule' are mutually exclusive".to_string(),
                })
            }
            (None, None) => {
                return Err(ParseError::MissingField {
                    field: "mapping or rule".to_string(),
                })
            }
            (Some(mapping), None) => {
                if doc.evaluation.is_some() {
                    return Err(ParseError::InvalidValue {
                        field: "evaluation".to_string(),
                        message: "only applies to 'rule' documents".to_string(),
                    });
                }
                Self::check_mapping_keys(&mapping, &bins);
                DecisionSource::Mapping(mapping)
            }
            (None, Some(text)) => {
                let expression = ExpressionParser::parse(&text)?;
                DecisionSource::Rule {
                    text,
                    expression,
                    evaluation: doc.evaluation.unwrap_or_default(),
                }
            }
        };

        Ok(ParsedDocument {
            bins,
            source,
            default: doc.default,
        })
    }

    /// Keys are kept verbatim; ones the bins can never produce are reported
    fn check_mapping_keys(mapping: &DecisionTable, bins: &BinTable) {
        let cardinalities = bins.cardinalities();
        let unreachable = mapping
            .keys()
            .filter(|key| match key.indices() {
                Some(indices) => {
                    indices.len() != Feature::COUNT
                        || indices.iter().zip(cardinalities).any(|(i, n)| *i >= n)
                }
                None => true,
            })
            .count();

        if unreachable > 0 {
            log::warn!(
                "{} of {} mapping keys can never be produced by the configured bins",
                unreachable,
                mapping.len()
            );
        }
    }
}
