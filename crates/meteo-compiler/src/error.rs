//! Compiler error types

use thiserror::Error;

/// Compiler error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Identifier the rule scope does not bind
    #[error("Undefined symbol: {0}")]
    UndefinedSymbol(String),

    /// Function outside the built-in set
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Built-in called with the wrong number of arguments
    #[error("Function '{name}' expects {expected} argument(s), got {found}")]
    ArityMismatch {
        name: String,
        expected: String,
        found: usize,
    },

    /// Invalid expression
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),
}

/// Result type for compiler operations
pub type Result<T> = std::result::Result<T, CompileError>;
