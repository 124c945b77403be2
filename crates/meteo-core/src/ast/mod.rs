//! Abstract Syntax Tree (AST) definitions for Meteo
//!
//! This module contains:
//! - Rule expressions and operators
//! - The decision table document (configuration blob) shape

pub mod document;
pub mod expression;
pub mod operator;

pub use document::{BinsSpec, BoundPair, EvaluationKind, TableDocument};
pub use expression::{Expression, UnaryOperator};
pub use operator::Operator;
