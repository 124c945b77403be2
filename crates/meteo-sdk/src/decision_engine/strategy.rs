//! Evaluation strategies
//!
//! One strategy per engine mode. The mode is chosen once at load time and
//! never changes afterwards.

use super::types::EngineMode;
use meteo_core::ir::Program;
use meteo_core::types::{DecisionTable, Observation};
use meteo_core::Value;
use meteo_runtime::{observation_bindings, EncodedObservation, Executor, Resolution, TableLookup};

/// Lookup in a mapping loaded from the document
pub(crate) struct TableStrategy {
    pub(crate) lookup: TableLookup,
}

/// Lookup in a table expanded from a rule at load time
pub(crate) struct CompiledRuleStrategy {
    pub(crate) program: Program,
    pub(crate) lookup: TableLookup,
}

/// Rule program executed on every observation
pub(crate) struct DirectStrategy {
    pub(crate) program: Program,
    pub(crate) default: Value,
}

impl DirectStrategy {
    fn resolve(&self, encoded: &EncodedObservation, observation: &Observation) -> Resolution {
        let bindings = observation_bindings(&encoded.indices, observation);
        match Executor::execute(&self.program, &bindings) {
            Ok(value) => Resolution {
                value,
                fallback: false,
            },
            Err(e) => {
                tracing::warn!(
                    "Rule '{}' failed for key {}: {}; using default {}",
                    self.program.metadata.source,
                    encoded.key,
                    e,
                    self.default
                );
                Resolution {
                    value: self.default.clone(),
                    fallback: true,
                }
            }
        }
    }
}

/// The strategy an engine was built with
pub(crate) enum EvaluationMode {
    Table(TableStrategy),
    Compiled(CompiledRuleStrategy),
    Direct(DirectStrategy),
}

impl EvaluationMode {
    pub(crate) fn resolve(&self, encoded: &EncodedObservation, observation: &Observation) -> Resolution {
        match self {
            EvaluationMode::Table(s) => s.lookup.resolve(&encoded.key),
            EvaluationMode::Compiled(s) => s.lookup.resolve(&encoded.key),
            EvaluationMode::Direct(s) => s.resolve(encoded, observation),
        }
    }

    pub(crate) fn mode(&self) -> EngineMode {
        match self {
            EvaluationMode::Table(_) => EngineMode::Table,
            EvaluationMode::Compiled(_) => EngineMode::Compiled,
            EvaluationMode::Direct(_) => EngineMode::Direct,
        }
    }

    /// The in-memory table, if this mode has one
    pub(crate) fn table(&self) -> Option<&DecisionTable> {
        match self {
            EvaluationMode::Table(s) => Some(s.lookup.table()),
            EvaluationMode::Compiled(s) => Some(s.lookup.table()),
            EvaluationMode::Direct(_) => None,
        }
    }

    /// The compiled rule, if this mode has one
    pub(crate) fn program(&self) -> Option<&Program> {
        match self {
            EvaluationMode::Table(_) => None,
            EvaluationMode::Compiled(s) => Some(&s.program),
            EvaluationMode::Direct(s) => Some(&s.program),
        }
    }
}
