//! Constant folding optimizer
//!
//! Evaluates constant sub-expressions of a rule at compile time. Only
//! operations whose result cannot depend on runtime inputs and cannot fail
//! are folded; anything else is left for the executor so both paths agree.

use meteo_core::ast::{Expression, Operator, UnaryOperator};
use meteo_core::Value;

/// Constant folding optimizer
pub struct ConstantFolder;

impl ConstantFolder {
    /// Create a new constant folder
    pub fn new() -> Self {
        Self
    }

    /// Optimize an expression by folding constants
    pub fn fold(&self, expr: &Expression) -> Expression {
        match expr {
            Expression::Literal(_) | Expression::Variable(_) => expr.clone(),

            Expression::Binary { left, op, right } => {
                let left_folded = self.fold(left);
                let right_folded = self.fold(right);

                // Short-circuit on a constant left operand
                if let Expression::Literal(left_val) = &left_folded {
                    match op {
                        Operator::And if !left_val.is_truthy() => {
                            return Expression::literal(false)
                        }
                        Operator::Or if left_val.is_truthy() => return Expression::literal(true),
                        _ => {}
                    }
                }

                // Try to fold if both operands are literals
                if let (Expression::Literal(left_val), Expression::Literal(right_val)) =
                    (&left_folded, &right_folded)
                {
                    if let Some(result) = self.fold_binary_op(left_val, op, right_val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::binary(left_folded, *op, right_folded)
            }

            Expression::Unary { op, operand } => {
                let operand_folded = self.fold(operand);

                if let Expression::Literal(val) = &operand_folded {
                    if let Some(result) = self.fold_unary_op(op, val) {
                        return Expression::Literal(result);
                    }
                }

                Expression::unary(*op, operand_folded)
            }

            Expression::FunctionCall { name, args } => Expression::FunctionCall {
                name: name.clone(),
                args: args.iter().map(|arg| self.fold(arg)).collect(),
            },

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                let condition_folded = self.fold(condition);

                // A constant condition selects one branch
                if let Expression::Literal(cond) = &condition_folded {
                    return if cond.is_truthy() {
                        self.fold(true_expr)
                    } else {
                        self.fold(false_expr)
                    };
                }

                Expression::ternary(
                    condition_folded,
                    self.fold(true_expr),
                    self.fold(false_expr),
                )
            }
        }
    }

    /// Fold a binary operation on two constant values
    fn fold_binary_op(&self, left: &Value, op: &Operator, right: &Value) -> Option<Value> {
        match (left, op, right) {
            // Arithmetic operations on numbers
            (Value::Number(l), Operator::Add, Value::Number(r)) => Some(Value::Number(l + r)),
            (Value::Number(l), Operator::Sub, Value::Number(r)) => Some(Value::Number(l - r)),
            (Value::Number(l), Operator::Mul, Value::Number(r)) => Some(Value::Number(l * r)),
            (Value::Number(l), Operator::Div, Value::Number(r)) if *r != 0.0 => {
                Some(Value::Number(l / r))
            }

            // Comparison operations on numbers
            (Value::Number(l), Operator::Gt, Value::Number(r)) => Some(Value::Bool(l > r)),
            (Value::Number(l), Operator::Ge, Value::Number(r)) => Some(Value::Bool(l >= r)),
            (Value::Number(l), Operator::Lt, Value::Number(r)) => Some(Value::Bool(l < r)),
            (Value::Number(l), Operator::Le, Value::Number(r)) => Some(Value::Bool(l <= r)),

            // Equality on same-typed scalars
            (Value::Number(l), Operator::Eq, Value::Number(r)) => Some(Value::Bool(l == r)),
            (Value::Number(l), Operator::Ne, Value::Number(r)) => Some(Value::Bool(l != r)),
            (Value::String(l), Operator::Eq, Value::String(r)) => Some(Value::Bool(l == r)),
            (Value::String(l), Operator::Ne, Value::String(r)) => Some(Value::Bool(l != r)),
            (Value::Bool(l), Operator::Eq, Value::Bool(r)) => Some(Value::Bool(l == r)),
            (Value::Bool(l), Operator::Ne, Value::Bool(r)) => Some(Value::Bool(l != r)),

            // Logical operations yield booleans from truthiness
            (l, Operator::And, r) => Some(Value::Bool(l.is_truthy() && r.is_truthy())),
            (l, Operator::Or, r) => Some(Value::Bool(l.is_truthy() || r.is_truthy())),

            // Can't fold
            _ => None,
        }
    }

    /// Fold a unary operation on a constant value
    fn fold_unary_op(&self, op: &UnaryOperator, operand: &Value) -> Option<Value> {
        match (op, operand) {
            (UnaryOperator::Not, val) => Some(Value::Bool(!val.is_truthy())),
            (UnaryOperator::Negate, Value::Number(n)) => Some(Value::Number(-n)),
            _ => None,
        }
    }
}

impl Default for ConstantFolder {
    fn default() -> Self {
        Self::new()
    }
}
