//! Runtime error types

use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Stack underflow
    #[error("Stack underflow")]
    StackUnderflow,

    /// Type error
    #[error("Type error: {0}")]
    TypeError(String),

    /// Variable the bindings do not provide
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Function outside the built-in set
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Invalid operation
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Program counter out of bounds
    #[error("Program counter out of bounds: {0}")]
    PCOutOfBounds(usize),

    /// Rule result that cannot be stored as a decision
    #[error("Invalid decision value: {0}")]
    InvalidDecision(String),

    /// Bin index that does not fit in a key digit
    #[error("Cannot encode bin indices {0:?} as a key")]
    InvalidKey(Vec<usize>),

    /// Rule failed for one combination during table expansion
    #[error("Rule failed for key {key}: {source}")]
    Expansion {
        key: String,
        #[source]
        source: Box<RuntimeError>,
    },
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
