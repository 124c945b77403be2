//! Unary operator execution

use crate::error::{Result, RuntimeError};
use meteo_core::ast::UnaryOperator;
use meteo_core::Value;

/// Execute a unary operation
pub(crate) fn execute_unary_op(operand: &Value, op: &UnaryOperator) -> Result<Value> {
    match (op, operand) {
        (UnaryOperator::Not, v) => Ok(Value::Bool(!v.is_truthy())),
        (UnaryOperator::Negate, Value::Number(n)) => Ok(Value::Number(-n)),
        (UnaryOperator::Negate, Value::Null) => Ok(Value::Null),
        _ => Err(RuntimeError::TypeError(format!(
            "Cannot apply {:?} to {}",
            op,
            operand.type_name()
        ))),
    }
}
