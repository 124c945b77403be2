//! IR instruction executor
//!
//! Executes IR programs in a stack-based virtual machine. A program can only
//! read the variables it is given and call the built-in pure functions.

use crate::engine::operators::{
    execute_binary_op, execute_compare, execute_function, execute_unary_op,
};
use crate::error::{Result, RuntimeError};
use meteo_core::ir::{Instruction, Program};
use meteo_core::types::{Feature, Observation};
use meteo_core::Value;
use std::collections::HashMap;

/// Variables visible to a rule program
pub type Bindings = HashMap<String, Value>;

/// Bind `i1..i4` to the bin indices and `s` to their sum
pub fn index_bindings(indices: &[usize; Feature::COUNT]) -> Bindings {
    let mut bindings: Bindings = Feature::ALL
        .iter()
        .map(|f| {
            (
                f.index_variable().to_string(),
                Value::Number(indices[f.position()] as f64),
            )
        })
        .collect();
    let sum: usize = indices.iter().sum();
    bindings.insert("s".to_string(), Value::Number(sum as f64));
    bindings
}

/// Index bindings plus the raw readings under their feature names.
///
/// Missing precipitation reads as 0.0; other missing readings are null.
pub fn observation_bindings(indices: &[usize; Feature::COUNT], observation: &Observation) -> Bindings {
    let mut bindings = index_bindings(indices);
    for feature in Feature::ALL {
        let reading = match feature {
            Feature::Precipitation => Some(observation.reading(feature).unwrap_or(0.0)),
            _ => observation.reading(feature),
        };
        bindings.insert(
            feature.name().to_string(),
            reading.map_or(Value::Null, Value::Number),
        );
    }
    bindings
}

/// IR program executor
pub struct Executor;

impl Executor {
    /// Execute an IR program against the given bindings and return the
    /// value on top of the stack
    pub fn execute(program: &Program, bindings: &Bindings) -> Result<Value> {
        let mut stack: Vec<Value> = Vec::with_capacity(8);
        let mut pc = 0; // Program Counter

        while pc < program.instructions.len() {
            let instruction = &program.instructions[pc];

            match instruction {
                Instruction::LoadVar { name } => {
                    let value = bindings
                        .get(name)
                        .cloned()
                        .ok_or_else(|| RuntimeError::UnboundVariable(name.clone()))?;
                    stack.push(value);
                    pc += 1;
                }

                Instruction::LoadConst { value } => {
                    stack.push(value.clone());
                    pc += 1;
                }

                Instruction::BinaryOp { op } => {
                    let right = Self::pop(&mut stack)?;
                    let left = Self::pop(&mut stack)?;
                    stack.push(execute_binary_op(&left, op, &right)?);
                    pc += 1;
                }

                Instruction::Compare { op } => {
                    let right = Self::pop(&mut stack)?;
                    let left = Self::pop(&mut stack)?;
                    stack.push(Value::Bool(execute_compare(&left, op, &right)?));
                    pc += 1;
                }

                Instruction::UnaryOp { op } => {
                    let operand = Self::pop(&mut stack)?;
                    stack.push(execute_unary_op(&operand, op)?);
                    pc += 1;
                }

                Instruction::CallFunction { name, argc } => {
                    if stack.len() < *argc {
                        return Err(RuntimeError::StackUnderflow);
                    }
                    let args = stack.split_off(stack.len() - argc);
                    stack.push(execute_function(name, &args)?);
                    pc += 1;
                }

                Instruction::Jump { offset } => {
                    pc = Self::jump_target(pc, *offset, program)?;
                }

                Instruction::JumpIfTrue { offset } => {
                    let condition = Self::pop(&mut stack)?;
                    if condition.is_truthy() {
                        pc = Self::jump_target(pc, *offset, program)?;
                    } else {
                        pc += 1;
                    }
                }

                Instruction::JumpIfFalse { offset } => {
                    let condition = Self::pop(&mut stack)?;
                    if !condition.is_truthy() {
                        pc = Self::jump_target(pc, *offset, program)?;
                    } else {
                        pc += 1;
                    }
                }

                Instruction::Return => {
                    break;
                }
            }
        }

        Self::pop(&mut stack)
    }

    fn pop(stack: &mut Vec<Value>) -> Result<Value> {
        stack.pop().ok_or(RuntimeError::StackUnderflow)
    }

    /// Jumps may land one past the last instruction, which ends execution
    fn jump_target(pc: usize, offset: isize, program: &Program) -> Result<usize> {
        match pc.checked_add_signed(offset) {
            Some(target) if target <= program.instructions.len() => Ok(target),
            _ => Err(RuntimeError::PCOutOfBounds(pc)),
        }
    }
}
