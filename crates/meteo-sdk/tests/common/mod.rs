//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use meteo_sdk::{
    BinPolicy, DecisionEngine, DecisionEngineBuilder, DecisionOutcome, DocumentFormat, Observation,
    Value,
};

/// The three-way severity rule used throughout the suites
pub const SEVERITY_RULE: &str = r#"s <= 2 ? "A" : s <= 5 ? "B" : "C""#;

/// Test helper to create a DecisionEngine from an inline document
pub struct TestEngine {
    document: serde_json::Map<String, serde_json::Value>,
    policy: BinPolicy,
}

impl TestEngine {
    /// Create a new test engine with an empty document
    pub fn new() -> Self {
        Self {
            document: serde_json::Map::new(),
            policy: BinPolicy::Strict,
        }
    }

    /// Use a rule, expanded into a table at load
    pub fn with_rule(mut self, rule: &str) -> Self {
        self.document.insert("rule".to_string(), rule.into());
        self
    }

    /// Use a rule evaluated per observation
    pub fn with_direct_rule(mut self, rule: &str) -> Self {
        self.document.insert("rule".to_string(), rule.into());
        self.document.insert("evaluation".to_string(), "direct".into());
        self
    }

    /// Use an explicit mapping
    pub fn with_mapping(mut self, mapping: serde_json::Value) -> Self {
        self.document.insert("mapping".to_string(), mapping);
        self
    }

    /// Override the bins
    pub fn with_bins(mut self, bins: serde_json::Value) -> Self {
        self.document.insert("bins".to_string(), bins);
        self
    }

    /// Set the document's default decision
    pub fn with_default(mut self, default: serde_json::Value) -> Self {
        self.document.insert("default".to_string(), default);
        self
    }

    pub fn with_policy(mut self, policy: BinPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The document as JSON text
    pub fn content(&self) -> String {
        serde_json::Value::Object(self.document.clone()).to_string()
    }

    /// Build the engine, returning the load error if any
    pub fn try_build(&self) -> meteo_sdk::Result<DecisionEngine> {
        DecisionEngineBuilder::new()
            .with_table_content(self.content(), DocumentFormat::Json)
            .with_bin_policy(self.policy)
            .build()
    }

    /// Build the engine
    pub fn build(&self) -> DecisionEngine {
        self.try_build().expect("Failed to build engine")
    }
}

/// Observation with all four readings present
pub fn observation(wind: f64, temperature: f64, precipitation: f64, humidity: f64) -> Observation {
    Observation::new(wind, temperature, precipitation, humidity)
}

/// A spread of observations covering every default bin of every feature
pub fn observation_grid() -> Vec<Observation> {
    let winds = [0.5, 3.0, 7.9, 12.0];
    let temperatures = [-10.0, 5.0, 24.9, 35.0];
    let precipitations = [0.0, 0.1, 4.0, 9.0];
    let humidities = [10.0, 30.0, 59.0, 95.0];

    let mut grid = Vec::new();
    for &w in &winds {
        for &t in &temperatures {
            for &p in &precipitations {
                for &h in &humidities {
                    grid.push(observation(w, t, p, h));
                }
            }
        }
    }
    grid
}

/// Assertion helpers for DecisionOutcome
pub trait OutcomeAssertions {
    fn assert_key(&self, expected: &str);
    fn assert_decision(&self, expected: impl Into<Value>);
    fn assert_fallback(&self, expected: bool);
}

impl OutcomeAssertions for DecisionOutcome {
    fn assert_key(&self, expected: &str) {
        assert_eq!(self.key.as_str(), expected, "unexpected key for {:?}", self.indices);
    }

    fn assert_decision(&self, expected: impl Into<Value>) {
        assert_eq!(self.decision, expected.into(), "unexpected decision for key {}", self.key);
    }

    fn assert_fallback(&self, expected: bool) {
        assert_eq!(self.fallback, expected, "unexpected fallback for key {}", self.key);
    }
}
