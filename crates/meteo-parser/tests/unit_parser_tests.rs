//! Unit tests for document and rule parsing
//!
//! Exercises the public parser surface the way the engine uses it: raw
//! document text in, bins and decision source out.

use meteo_core::ast::{EvaluationKind, Expression, Operator};
use meteo_core::types::{BinPolicy, Feature};
use meteo_core::Value;
use meteo_parser::*;

// =============================================================================
// Document Tests
// =============================================================================

#[test]
fn test_parse_rule_document_with_bins_override() {
    let json = r#"{
        "bins": {
            "wind_speed_mps": [[0, 3], [3, 8], [8, 15], [15, "inf"]],
            "dry_bulb_temperature": [["-inf", 5], [5, 25], [25, "inf"]],
            "precipitation_mm": [[0, 0.1], [0.1, 5], [5, "inf"]],
            "relative_humidity_pct": [[0, 30], [30, 60], [60, "inf"]]
        },
        "rule": "s <= 2 ? \"A\" : s <= 5 ? \"B\" : \"C\""
    }"#;

    let result = DocumentParser::parse_and_interpret(json, DocumentFormat::Json, BinPolicy::Strict);
    assert!(result.is_ok(), "Failed to parse document: {:?}", result.err());

    let parsed = result.unwrap();
    assert_eq!(parsed.bins.cardinalities(), [4, 3, 3, 3]);
    assert_eq!(parsed.bins.key_space_size(), 108);
    assert_eq!(parsed.default, None);

    match parsed.source {
        DecisionSource::Rule {
            text,
            expression,
            evaluation,
        } => {
            assert!(text.starts_with("s <= 2"));
            assert_eq!(evaluation, EvaluationKind::Table);
            assert!(matches!(expression, Expression::Ternary { .. }));
        }
        other => panic!("Expected rule source, got {:?}", other),
    }
}

#[test]
fn test_parse_yaml_mapping_document() {
    let yaml = r#"
feature_order:
  - wind_speed_mps
  - dry_bulb_temperature
  - precipitation_mm
  - relative_humidity_pct
mapping:
  "0000": 1
  "0101": "A"
  "2222": true
default: null
"#;

    let parsed =
        DocumentParser::parse_and_interpret(yaml, DocumentFormat::Yaml, BinPolicy::Strict).unwrap();

    match parsed.source {
        DecisionSource::Mapping(mapping) => {
            assert_eq!(mapping.get(&"0000".into()), Some(&Value::Number(1.0)));
            assert_eq!(mapping.get(&"0101".into()), Some(&Value::label("A")));
            assert_eq!(mapping.get(&"2222".into()), Some(&Value::Bool(true)));
        }
        other => panic!("Expected mapping source, got {:?}", other),
    }
}

#[test]
fn test_strict_bins_reject_gap() {
    let json = r#"{
        "bins": {
            "wind_speed_mps": [[0, 3], [4, "inf"]],
            "dry_bulb_temperature": [["-inf", "inf"]],
            "precipitation_mm": [[0, "inf"]],
            "relative_humidity_pct": [[0, "inf"]]
        },
        "rule": "i1"
    }"#;

    let strict = DocumentParser::parse_and_interpret(json, DocumentFormat::Json, BinPolicy::Strict);
    assert!(matches!(strict, Err(ParseError::Core(_))));

    let lenient = DocumentParser::parse_and_interpret(json, DocumentFormat::Json, BinPolicy::Lenient);
    let parsed = lenient.unwrap();
    // 3.5 sits in the gap and clamps to the last bin
    assert_eq!(parsed.bins.index_of(Feature::WindSpeed, Some(3.5)), 1);
}

#[test]
fn test_non_scalar_mapping_value_rejected() {
    let json = r#"{"mapping": {"0000": ["A"]}}"#;
    let result = DocumentParser::parse(json, DocumentFormat::Json);
    assert!(matches!(result, Err(ParseError::JsonError(_))));
}

// =============================================================================
// Expression Tests
// =============================================================================

#[test]
fn test_parse_word_operators_match_symbols() {
    let words = ExpressionParser::parse("not (i1 == 0) and i2 >= 1 or s > 6").unwrap();
    let symbols = ExpressionParser::parse("!(i1 == 0) && i2 >= 1 || s > 6").unwrap();
    assert_eq!(words, symbols);
}

#[test]
fn test_parse_modulo_and_division() {
    let expr = ExpressionParser::parse("s % 3 / 2").unwrap();
    match expr {
        Expression::Binary { left, op, .. } => {
            assert_eq!(op, Operator::Div);
            assert!(matches!(*left, Expression::Binary { op: Operator::Mod, .. }));
        }
        other => panic!("Expected binary, got {:?}", other),
    }
}

#[test]
fn test_variables_collected() {
    let expr = ExpressionParser::parse("max(i1, i3) + wind_speed_mps").unwrap();
    let vars: Vec<&str> = expr.variables().into_iter().collect();
    assert_eq!(vars, vec!["i1", "i3", "wind_speed_mps"]);
}

#[test]
fn test_lexer_error_offsets() {
    let err = ExpressionParser::parse("s <= 2 ; 'A'").unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedChar { ch: ';', offset: 7 }));
}
