//! Execution engine module
//!
//! Operator semantics shared by the IR executor.

pub(crate) mod operators;
