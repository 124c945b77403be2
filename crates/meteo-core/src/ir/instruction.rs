//! IR Instructions
//!
//! Low-level instructions for the Meteo stack machine. The instruction set
//! has no way to reach anything outside the bound rule inputs: there are no
//! loads from the environment, no stores and no calls besides the built-in
//! pure functions.

use crate::ast::{Operator, UnaryOperator};
use crate::Value;
use serde::{Deserialize, Serialize};

/// A single IR instruction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instruction {
    // ===== Data Loading =====
    /// Load a bound input (`i1`, `s`, a raw reading) onto the stack
    LoadVar {
        /// Variable name
        name: String,
    },

    /// Load a constant value onto the stack
    LoadConst {
        /// The constant value
        value: Value,
    },

    // ===== Operations =====
    /// Perform a binary operation (+ - * / % && ||)
    BinaryOp {
        /// The operator to apply
        op: Operator,
    },

    /// Perform a comparison operation (== != < > etc.)
    Compare {
        /// The comparison operator
        op: Operator,
    },

    /// Perform a unary operation (! -)
    UnaryOp {
        /// The unary operator
        op: UnaryOperator,
    },

    /// Call a built-in function with the top `argc` stack values
    CallFunction {
        /// Function name
        name: String,
        /// Number of arguments on the stack
        argc: usize,
    },

    // ===== Control Flow =====
    /// Unconditional jump, relative to this instruction
    Jump {
        /// Offset to jump (can be negative)
        offset: isize,
    },

    /// Pop the condition and jump if it is truthy
    JumpIfTrue {
        /// Offset to jump
        offset: isize,
    },

    /// Pop the condition and jump if it is falsy
    JumpIfFalse {
        /// Offset to jump
        offset: isize,
    },

    /// Stop execution; the top of the stack is the result
    Return,
}

impl Instruction {
    /// Returns true if this instruction may change the program counter
    /// by more than one
    pub fn is_jump(&self) -> bool {
        matches!(
            self,
            Instruction::Jump { .. } | Instruction::JumpIfTrue { .. } | Instruction::JumpIfFalse { .. }
        )
    }
}
