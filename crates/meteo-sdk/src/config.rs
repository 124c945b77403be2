//! Configuration types for DecisionEngine

use meteo_core::types::BinPolicy;
use meteo_core::Value;
use meteo_parser::DocumentFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Decision returned when a key has no entry, unless overridden
pub const DEFAULT_LABEL: &str = "B";

/// Main engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decision table document path (`.json`, `.yaml` or `.yml`)
    pub table_file: Option<PathBuf>,

    /// Document content - alternative to a file path
    #[serde(skip)]
    pub table_content: Option<(String, DocumentFormat)>,

    /// Bin validation policy
    #[serde(default)]
    pub bin_policy: BinPolicy,

    /// Fail-open decision; takes precedence over the document's `default`
    #[serde(default)]
    pub default_label: Option<Value>,

    /// Compiler options
    #[serde(default)]
    pub compiler_options: CompilerOptions,
}

impl EngineConfig {
    /// Create a new engine configuration
    pub fn new() -> Self {
        Self {
            table_file: None,
            table_content: None,
            bin_policy: BinPolicy::default(),
            default_label: None,
            compiler_options: CompilerOptions::default(),
        }
    }

    /// Load the table from a file
    pub fn with_table_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.table_file = Some(path.into());
        self
    }

    /// Load the table from in-memory content
    pub fn with_table_content(mut self, content: impl Into<String>, format: DocumentFormat) -> Self {
        self.table_content = Some((content.into(), format));
        self
    }

    /// Set the bin validation policy
    pub fn with_bin_policy(mut self, policy: BinPolicy) -> Self {
        self.bin_policy = policy;
        self
    }

    /// Override the fail-open decision
    pub fn with_default_label(mut self, label: impl Into<Value>) -> Self {
        self.default_label = Some(label.into());
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiler options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerOptions {
    /// Enable semantic analysis
    pub enable_semantic_analysis: bool,

    /// Enable constant folding
    pub enable_constant_folding: bool,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            enable_semantic_analysis: true,
            enable_constant_folding: true,
        }
    }
}

impl From<&CompilerOptions> for meteo_compiler::CompilerOptions {
    fn from(opts: &CompilerOptions) -> Self {
        Self {
            enable_semantic_analysis: opts.enable_semantic_analysis,
            enable_constant_folding: opts.enable_constant_folding,
        }
    }
}
