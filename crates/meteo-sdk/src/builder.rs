//! Builder pattern for DecisionEngine

use crate::config::EngineConfig;
use crate::decision_engine::DecisionEngine;
use crate::error::Result;
use meteo_core::types::BinPolicy;
use meteo_core::Value;
use meteo_parser::DocumentFormat;
use std::path::PathBuf;

/// Builder for DecisionEngine
///
/// # Example
///
/// ```rust,ignore
/// use meteo_sdk::{BinPolicy, DecisionEngineBuilder};
///
/// let engine = DecisionEngineBuilder::new()
///     .with_table_file("tables/severity.yaml")
///     .with_bin_policy(BinPolicy::Lenient)
///     .with_default_label("B")
///     .build()?;
/// ```
pub struct DecisionEngineBuilder {
    config: EngineConfig,
}

impl DecisionEngineBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: EngineConfig::new(),
        }
    }

    /// Start from an existing configuration
    pub fn from_config(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Load the decision table from a file
    pub fn with_table_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.table_file = Some(path.into());
        self
    }

    /// Load the decision table from in-memory content
    pub fn with_table_content(mut self, content: impl Into<String>, format: DocumentFormat) -> Self {
        self.config.table_content = Some((content.into(), format));
        self
    }

    /// Set the bin validation policy
    pub fn with_bin_policy(mut self, policy: BinPolicy) -> Self {
        self.config.bin_policy = policy;
        self
    }

    /// Override the decision returned for unmapped keys
    pub fn with_default_label(mut self, label: impl Into<Value>) -> Self {
        self.config.default_label = Some(label.into());
        self
    }

    /// Enable or disable constant folding of rules
    pub fn enable_constant_folding(mut self, enabled: bool) -> Self {
        self.config.compiler_options.enable_constant_folding = enabled;
        self
    }

    /// Enable or disable semantic analysis of rules
    pub fn enable_semantic_analysis(mut self, enabled: bool) -> Self {
        self.config.compiler_options.enable_semantic_analysis = enabled;
        self
    }

    /// Build the decision engine
    pub fn build(self) -> Result<DecisionEngine> {
        DecisionEngine::new(self.config)
    }
}

impl Default for DecisionEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
