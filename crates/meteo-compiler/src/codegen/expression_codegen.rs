//! Expression compiler
//!
//! Compiles Expression AST nodes into IR instructions for the stack
//! executor. Jump offsets are relative to the jump instruction itself.

use crate::error::Result;
use meteo_core::ast::{Expression, Operator};
use meteo_core::ir::Instruction;
use meteo_core::Value;

/// Expression compiler
pub struct ExpressionCompiler;

impl ExpressionCompiler {
    /// Compile an expression into IR instructions
    pub fn compile(expr: &Expression) -> Result<Vec<Instruction>> {
        match expr {
            Expression::Literal(value) => Ok(vec![Instruction::LoadConst {
                value: value.clone(),
            }]),

            Expression::Variable(name) => Ok(vec![Instruction::LoadVar { name: name.clone() }]),

            Expression::Binary { left, op, right } => match op {
                Operator::And => Self::compile_short_circuit(left, right, false),
                Operator::Or => Self::compile_short_circuit(left, right, true),
                _ => {
                    let mut instructions = Self::compile(left)?;
                    instructions.extend(Self::compile(right)?);

                    if op.is_comparison() {
                        instructions.push(Instruction::Compare { op: *op });
                    } else {
                        instructions.push(Instruction::BinaryOp { op: *op });
                    }

                    Ok(instructions)
                }
            },

            Expression::Unary { op, operand } => {
                let mut instructions = Self::compile(operand)?;
                instructions.push(Instruction::UnaryOp { op: *op });
                Ok(instructions)
            }

            Expression::FunctionCall { name, args } => {
                let mut instructions = Vec::new();
                for arg in args {
                    instructions.extend(Self::compile(arg)?);
                }
                instructions.push(Instruction::CallFunction {
                    name: name.clone(),
                    argc: args.len(),
                });
                Ok(instructions)
            }

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                let mut instructions = Self::compile(condition)?;
                let true_instructions = Self::compile(true_expr)?;
                let false_instructions = Self::compile(false_expr)?;

                // Skip the true branch and its trailing jump
                instructions.push(Instruction::JumpIfFalse {
                    offset: (true_instructions.len() + 2) as isize,
                });
                instructions.extend(true_instructions);

                // Land just past the false branch
                instructions.push(Instruction::Jump {
                    offset: (false_instructions.len() + 1) as isize,
                });
                instructions.extend(false_instructions);

                Ok(instructions)
            }
        }
    }

    /// Compile `&&` (`settle_on == false`) or `||` (`settle_on == true`).
    ///
    /// The right operand only runs when the left does not settle the
    /// result. Either way the expression leaves a boolean on the stack.
    ///
    /// ```text
    ///   <left>
    ///   JumpIf{settle}   -> SETTLED
    ///   <right>
    ///   JumpIf{settle}   -> SETTLED
    ///   LoadConst !settle
    ///   Jump             -> END
    /// SETTLED:
    ///   LoadConst settle
    /// END:
    /// ```
    fn compile_short_circuit(
        left: &Expression,
        right: &Expression,
        settle_on: bool,
    ) -> Result<Vec<Instruction>> {
        let jump = |offset: isize| {
            if settle_on {
                Instruction::JumpIfTrue { offset }
            } else {
                Instruction::JumpIfFalse { offset }
            }
        };

        let mut instructions = Self::compile(left)?;
        let right_instructions = Self::compile(right)?;

        instructions.push(jump((right_instructions.len() + 4) as isize));
        instructions.extend(right_instructions);
        instructions.push(jump(3));
        instructions.push(Instruction::LoadConst {
            value: Value::Bool(!settle_on),
        });
        instructions.push(Instruction::Jump { offset: 2 });
        instructions.push(Instruction::LoadConst {
            value: Value::Bool(settle_on),
        });

        Ok(instructions)
    }
}
