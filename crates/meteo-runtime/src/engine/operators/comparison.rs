//! Comparison operator execution

use crate::error::{Result, RuntimeError};
use meteo_core::ast::Operator;
use meteo_core::Value;

/// Execute a comparison operation
pub(crate) fn execute_compare(left: &Value, op: &Operator, right: &Value) -> Result<bool> {
    // Null compared to anything returns false, so rules over missing
    // readings fall through to their else branch
    if left.is_null() || right.is_null() {
        tracing::debug!(
            "Null comparison: {:?} {:?} {:?}, returning false",
            left,
            op,
            right
        );
        return Ok(false);
    }

    match (left, op, right) {
        (Value::Number(l), Operator::Eq, Value::Number(r)) => Ok(l == r),
        (Value::Number(l), Operator::Ne, Value::Number(r)) => Ok(l != r),
        (Value::Number(l), Operator::Gt, Value::Number(r)) => Ok(l > r),
        (Value::Number(l), Operator::Ge, Value::Number(r)) => Ok(l >= r),
        (Value::Number(l), Operator::Lt, Value::Number(r)) => Ok(l < r),
        (Value::Number(l), Operator::Le, Value::Number(r)) => Ok(l <= r),

        (Value::String(l), Operator::Eq, Value::String(r)) => Ok(l == r),
        (Value::String(l), Operator::Ne, Value::String(r)) => Ok(l != r),
        (Value::String(l), Operator::Gt, Value::String(r)) => Ok(l > r),
        (Value::String(l), Operator::Ge, Value::String(r)) => Ok(l >= r),
        (Value::String(l), Operator::Lt, Value::String(r)) => Ok(l < r),
        (Value::String(l), Operator::Le, Value::String(r)) => Ok(l <= r),

        (Value::Bool(l), Operator::Eq, Value::Bool(r)) => Ok(l == r),
        (Value::Bool(l), Operator::Ne, Value::Bool(r)) => Ok(l != r),

        // Differently typed values are never equal
        (_, Operator::Eq, _) => Ok(false),
        (_, Operator::Ne, _) => Ok(true),

        _ => Err(RuntimeError::TypeError(format!(
            "Cannot compare {} and {} with {}",
            left.type_name(),
            right.type_name(),
            op.symbol()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers() {
        assert_eq!(
            execute_compare(&Value::Number(2.0), &Operator::Le, &Value::Number(2.0)),
            Ok(true)
        );
    }

    #[test]
    fn test_null_is_false() {
        assert_eq!(
            execute_compare(&Value::Null, &Operator::Ne, &Value::Number(1.0)),
            Ok(false)
        );
    }

    #[test]
    fn test_mixed_types() {
        assert_eq!(
            execute_compare(&Value::Number(1.0), &Operator::Eq, &Value::label("1")),
            Ok(false)
        );
        assert!(execute_compare(&Value::Number(1.0), &Operator::Lt, &Value::label("1")).is_err());
    }
}
