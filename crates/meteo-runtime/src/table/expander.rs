//! Rule expansion
//!
//! Evaluates an index-only rule program on every combination of bin
//! indices and collects the results into a complete decision table.

use crate::error::{Result, RuntimeError};
use crate::executor::{index_bindings, Executor};
use meteo_core::ir::Program;
use meteo_core::types::{BinTable, DecisionTable, DiscreteKey, Feature};
use meteo_core::Value;

/// Expands rule programs into decision tables
pub struct RuleExpander;

impl RuleExpander {
    /// Expand `program` over the key space of `bins`.
    ///
    /// Keys are visited in lexicographic order. Any evaluation error or
    /// non-finite numeric result fails the whole expansion.
    pub fn expand(program: &Program, bins: &BinTable) -> Result<DecisionTable> {
        // Names that are neither indices nor readings would fail on every key
        if let Some(name) = program
            .non_index_variables()
            .find(|name| name.parse::<Feature>().is_err())
        {
            return Err(RuntimeError::UnboundVariable(name.to_string()));
        }
        if !program.reads_only_indices() {
            return Err(RuntimeError::InvalidOperation(format!(
                "rule '{}' reads raw readings and cannot be expanded into a table",
                program.metadata.source
            )));
        }

        let cardinalities = bins.cardinalities();
        let mut table = DecisionTable::new();
        let mut indices = [0usize; Feature::COUNT];

        loop {
            let key = DiscreteKey::from_indices(&indices)
                .ok_or_else(|| RuntimeError::InvalidKey(indices.to_vec()))?;

            let decision = Executor::execute(program, &index_bindings(&indices))
                .and_then(Self::check_decision)
                .map_err(|e| RuntimeError::Expansion {
                    key: key.to_string(),
                    source: Box::new(e),
                })?;
            table.insert(key, decision);

            if !Self::advance(&mut indices, &cardinalities) {
                break;
            }
        }

        tracing::debug!(
            "Expanded rule '{}' into {} entries",
            program.metadata.source,
            table.len()
        );

        Ok(table)
    }

    /// Step to the next index combination, last feature fastest.
    /// Returns false once every combination has been visited.
    fn advance(indices: &mut [usize; Feature::COUNT], cardinalities: &[usize; Feature::COUNT]) -> bool {
        for pos in (0..Feature::COUNT).rev() {
            indices[pos] += 1;
            if indices[pos] < cardinalities[pos] {
                return true;
            }
            indices[pos] = 0;
        }
        false
    }

    fn check_decision(value: Value) -> Result<Value> {
        match value {
            Value::Number(n) if !n.is_finite() => Err(RuntimeError::InvalidDecision(format!(
                "{} is not a finite number",
                n
            ))),
            other => Ok(other),
        }
    }
}
