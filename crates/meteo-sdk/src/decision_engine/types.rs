//! Result types for DecisionEngine

use meteo_core::types::{DiscreteKey, Feature};
use meteo_core::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How an engine resolves decisions, fixed at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Mapping loaded as-is
    Table,
    /// Rule expanded into a table at load
    Compiled,
    /// Rule executed per observation
    Direct,
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EngineMode::Table => "table",
            EngineMode::Compiled => "compiled",
            EngineMode::Direct => "direct",
        };
        write!(f, "{}", name)
    }
}

/// A decision together with how it was reached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    /// Discrete key of the observation
    pub key: DiscreteKey,

    /// Bin index per feature in key order
    pub indices: [usize; Feature::COUNT],

    /// The decision value
    pub decision: Value,

    /// True when the default label was returned (key absent or direct
    /// evaluation failed)
    pub fallback: bool,
}

impl DecisionOutcome {
    /// Sum of the bin indices
    pub fn index_sum(&self) -> usize {
        self.indices.iter().sum()
    }
}
