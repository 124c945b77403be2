//! Core DecisionEngine implementation

use super::compiler_helper::CompilerHelper;
use super::export::Exporter;
use super::strategy::EvaluationMode;
use super::types::{DecisionOutcome, EngineMode};
use crate::config::EngineConfig;
use crate::error::Result;
use meteo_core::ast::TableDocument;
use meteo_core::types::{BinTable, DecisionTable, DiscreteKey, Observation};
use meteo_core::Value;
use meteo_parser::DocumentFormat;
use meteo_runtime::KeyEncoder;
use std::path::{Path, PathBuf};

/// Maps weather observations to decisions through a discrete key table.
///
/// All state is fixed once construction succeeds, so a single engine can
/// be shared across threads and queried concurrently.
pub struct DecisionEngine {
    /// Bin table in effect (defaults merged with document overrides)
    bins: BinTable,

    /// Evaluation strategy chosen at load time
    mode: EvaluationMode,

    /// Fail-open decision
    default: Value,

    /// Configuration
    config: EngineConfig,
}

impl DecisionEngine {
    /// Create a new decision engine from configuration
    pub fn new(config: EngineConfig) -> Result<Self> {
        let loaded = CompilerHelper::load(&config)?;

        Ok(Self {
            bins: loaded.bins,
            mode: loaded.strategy,
            default: loaded.default,
            config,
        })
    }

    /// Load an engine from a JSON or YAML document on disk
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        Self::new(EngineConfig::new().with_table_file(path))
    }

    /// Load an engine from in-memory document content
    pub fn from_content(content: impl Into<String>, format: DocumentFormat) -> Result<Self> {
        Self::new(EngineConfig::new().with_table_content(content, format))
    }

    /// Decide for one observation.
    ///
    /// Never fails: keys absent from the table and direct-mode evaluation
    /// errors both yield the default decision.
    pub fn decide(&self, observation: &Observation) -> Value {
        self.evaluate(observation).decision
    }

    /// Decide and report the key, indices and whether the default was used
    pub fn evaluate(&self, observation: &Observation) -> DecisionOutcome {
        let encoder = KeyEncoder::new(&self.bins);

        let encoded = match encoder.encode(observation) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!("Failed to encode observation: {}; using default {}", e, self.default);
                return DecisionOutcome {
                    key: DiscreteKey::new(String::new()),
                    indices: encoder.indices(observation),
                    decision: self.default.clone(),
                    fallback: true,
                };
            }
        };

        let resolution = self.mode.resolve(&encoded, observation);
        tracing::debug!(
            "key={} sum={} decision={} fallback={}",
            encoded.key,
            encoded.index_sum(),
            resolution.value,
            resolution.fallback
        );

        DecisionOutcome {
            key: encoded.key,
            indices: encoded.indices,
            decision: resolution.value,
            fallback: resolution.fallback,
        }
    }

    /// Evaluation mode selected at construction
    pub fn mode(&self) -> EngineMode {
        self.mode.mode()
    }

    /// Bin table in effect
    pub fn bins(&self) -> &BinTable {
        &self.bins
    }

    /// In-memory table; `None` in direct mode
    pub fn table(&self) -> Option<&DecisionTable> {
        self.mode.table()
    }

    /// Decision returned for unmapped keys
    pub fn default_value(&self) -> &Value {
        &self.default
    }

    /// Source text of the rule, if the engine was built from one
    pub fn rule_source(&self) -> Option<&str> {
        self.mode.program().map(|p| p.metadata.source.as_str())
    }

    /// Configuration the engine was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Export document for the active table.
    ///
    /// Direct-mode engines are expanded first; this fails if the rule reads
    /// raw readings.
    pub fn export_document(&self) -> Result<TableDocument> {
        Exporter::document(&self.bins, &self.mode, &self.default)
    }

    /// Write the active table to `dest` (YAML for `.yaml`/`.yml`, JSON otherwise)
    pub fn export(&self, dest: impl AsRef<Path>) -> Result<()> {
        let doc = self.export_document()?;
        Exporter::write(&doc, dest.as_ref())
    }

    /// The export document as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        let doc = self.export_document()?;
        Exporter::serialize(&doc, DocumentFormat::Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meteo_core::types::BinPolicy;

    const SEVERITY_RULE: &str = r#"{"rule": "s <= 2 ? 'A' : s <= 5 ? 'B' : 'C'"}"#;

    fn engine(content: &str) -> DecisionEngine {
        DecisionEngine::from_content(content, DocumentFormat::Json).unwrap()
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DecisionEngine>();
    }

    #[test]
    fn test_compiled_rule_mode() {
        let engine = engine(SEVERITY_RULE);
        assert_eq!(engine.mode(), EngineMode::Compiled);
        assert_eq!(engine.table().map(|t| t.len()), Some(81));
        assert_eq!(engine.rule_source(), Some("s <= 2 ? 'A' : s <= 5 ? 'B' : 'C'"));

        let outcome = engine.evaluate(&Observation::new(2.0, 10.0, 0.0, 50.0));
        assert_eq!(outcome.key.as_str(), "0101");
        assert_eq!(outcome.index_sum(), 2);
        assert_eq!(outcome.decision, Value::label("A"));
        assert!(!outcome.fallback);
    }

    #[test]
    fn test_mapping_mode_falls_back() {
        let engine = engine(r#"{"mapping": {"0101": "A"}}"#);
        assert_eq!(engine.mode(), EngineMode::Table);
        assert!(engine.rule_source().is_none());

        let outcome = engine.evaluate(&Observation::new(10.0, 30.0, 6.0, 70.0));
        assert_eq!(outcome.key.as_str(), "2222");
        assert_eq!(outcome.decision, Value::label("B"));
        assert!(outcome.fallback);
    }

    #[test]
    fn test_direct_mode_has_no_table() {
        let engine = engine(r#"{"rule": "precipitation_mm > 2 ? 'wet' : 'dry'", "evaluation": "direct"}"#);
        assert_eq!(engine.mode(), EngineMode::Direct);
        assert!(engine.table().is_none());

        assert_eq!(engine.decide(&Observation::new(2.0, 10.0, 4.0, 50.0)), Value::label("wet"));
        assert_eq!(engine.decide(&Observation::new(2.0, 10.0, 0.5, 50.0)), Value::label("dry"));
        assert!(engine.to_json().is_err());
    }

    #[test]
    fn test_direct_mode_error_fails_open() {
        let engine = engine(
            r#"{"rule": "relative_humidity_pct / (i1 - 1) > 10 ? 'A' : 'C'", "evaluation": "direct", "default": "X"}"#,
        );
        // wind 4.0 lands in bin 1 so the divisor is zero
        let outcome = engine.evaluate(&Observation::new(4.0, 10.0, 0.0, 50.0));
        assert_eq!(outcome.decision, Value::label("X"));
        assert!(outcome.fallback);
    }

    #[test]
    fn test_config_default_beats_document_default() {
        let config = EngineConfig::new()
            .with_table_content(r#"{"mapping": {}, "default": "D"}"#, DocumentFormat::Json)
            .with_default_label("Z")
            .with_bin_policy(BinPolicy::Strict);
        let engine = DecisionEngine::new(config).unwrap();
        assert_eq!(engine.default_value(), &Value::label("Z"));
        assert_eq!(engine.decide(&Observation::default()), Value::label("Z"));
    }

    #[test]
    fn test_to_json_exports_mapping_shape() {
        let json = engine(SEVERITY_RULE).to_json().unwrap();
        let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(doc["mapping"]["0101"], "A");
        assert_eq!(doc["mapping"]["2222"], "C");
        assert_eq!(doc["default"], "B");
        assert_eq!(doc["feature_order"][0], "wind_speed_mps");
        assert!(doc.get("rule").is_none());
    }
}
