//! Built-in function execution
//!
//! `min`, `max` and `abs` over numbers. A null argument makes the result
//! null, matching arithmetic.

use crate::error::{Result, RuntimeError};
use meteo_core::Value;

/// Execute a built-in function on already-evaluated arguments
pub(crate) fn execute_function(name: &str, args: &[Value]) -> Result<Value> {
    if args.iter().any(Value::is_null) {
        return Ok(Value::Null);
    }

    let numbers = args
        .iter()
        .map(|arg| {
            arg.as_f64().ok_or_else(|| {
                RuntimeError::TypeError(format!(
                    "{}() expects numbers, got {}",
                    name,
                    arg.type_name()
                ))
            })
        })
        .collect::<Result<Vec<f64>>>()?;

    match (name, numbers.as_slice()) {
        ("abs", [n]) => Ok(Value::Number(n.abs())),
        ("min", [first, rest @ ..]) => Ok(Value::Number(rest.iter().fold(*first, |a, b| a.min(*b)))),
        ("max", [first, rest @ ..]) => Ok(Value::Number(rest.iter().fold(*first, |a, b| a.max(*b)))),
        ("abs" | "min" | "max", _) => Err(RuntimeError::InvalidOperation(format!(
            "{}() called with {} argument(s)",
            name,
            numbers.len()
        ))),
        _ => Err(RuntimeError::UnknownFunction(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nums(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::Number).collect()
    }

    #[test]
    fn test_min_max_abs() {
        assert_eq!(execute_function("max", &nums(&[1.0, 3.0, 2.0])), Ok(Value::Number(3.0)));
        assert_eq!(execute_function("min", &nums(&[1.0, 3.0, 2.0])), Ok(Value::Number(1.0)));
        assert_eq!(execute_function("abs", &nums(&[-2.5])), Ok(Value::Number(2.5)));
    }

    #[test]
    fn test_null_argument() {
        let args = vec![Value::Number(1.0), Value::Null];
        assert_eq!(execute_function("max", &args), Ok(Value::Null));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            execute_function("max", &[Value::label("A")]),
            Err(RuntimeError::TypeError(_))
        ));
        assert!(matches!(
            execute_function("abs", &nums(&[1.0, 2.0])),
            Err(RuntimeError::InvalidOperation(_))
        ));
        assert_eq!(
            execute_function("open", &[]),
            Err(RuntimeError::UnknownFunction("open".to_string()))
        );
    }
}
