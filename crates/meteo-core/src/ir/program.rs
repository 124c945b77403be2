//! IR Program
//!
//! A program is a sequence of IR instructions with associated metadata.

use crate::ir::Instruction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Which inputs a rule program may read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleScope {
    /// Bin indices `i1..i4` and their sum `s`
    Indices,
    /// Bin indices plus the raw readings by feature name
    Readings,
}

/// An IR program ready for execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// The sequence of instructions
    pub instructions: Vec<Instruction>,

    /// Program metadata
    pub metadata: ProgramMetadata,
}

/// Metadata associated with a program
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramMetadata {
    /// Rule text the program was compiled from
    pub source: String,

    /// Inputs the program was checked against
    pub scope: RuleScope,

    /// Variables the program reads
    pub variables: BTreeSet<String>,

    /// Version of the compiler that generated this
    pub compiler_version: String,
}

impl Program {
    /// Create a new program
    pub fn new(instructions: Vec<Instruction>, metadata: ProgramMetadata) -> Self {
        Self {
            instructions,
            metadata,
        }
    }

    /// Get the number of instructions
    pub fn instruction_count(&self) -> usize {
        self.instructions.len()
    }

    /// Check if program is empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Get instruction at index
    pub fn get_instruction(&self, index: usize) -> Option<&Instruction> {
        self.instructions.get(index)
    }

    /// True if the program only reads bin indices, so it can be expanded
    /// over the whole key space
    pub fn reads_only_indices(&self) -> bool {
        self.non_index_variables().next().is_none()
    }

    /// Variables read by the program other than `i1`..`i4` and `s`
    pub fn non_index_variables(&self) -> impl Iterator<Item = &str> {
        self.metadata
            .variables
            .iter()
            .map(String::as_str)
            .filter(|v| !matches!(*v, "i1" | "i2" | "i3" | "i4" | "s"))
    }
}

impl ProgramMetadata {
    /// Create metadata for a compiled rule
    pub fn for_rule(source: impl Into<String>, scope: RuleScope) -> Self {
        Self {
            source: source.into(),
            scope,
            variables: BTreeSet::new(),
            compiler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Record the variables the program reads
    pub fn with_variables<I, S>(mut self, variables: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variables = variables.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;

    #[test]
    fn test_program_basics() {
        let program = Program::new(
            vec![
                Instruction::LoadConst {
                    value: Value::label("A"),
                },
                Instruction::Return,
            ],
            ProgramMetadata::for_rule("\"A\"", RuleScope::Indices),
        );

        assert_eq!(program.instruction_count(), 2);
        assert!(!program.is_empty());
        assert!(matches!(
            program.get_instruction(1),
            Some(Instruction::Return)
        ));
        assert!(program.reads_only_indices());
    }

    #[test]
    fn test_program_reading_raw_inputs() {
        let metadata = ProgramMetadata::for_rule("wind_speed_mps > 10", RuleScope::Readings)
            .with_variables(["wind_speed_mps", "s"]);
        let program = Program::new(Vec::new(), metadata);
        assert!(!program.reads_only_indices());
    }
}
