//! Semantic analyzer
//!
//! Checks a rule expression against the inputs its scope binds and the
//! built-in function set before any code is generated.

use crate::error::{CompileError, Result};
use meteo_core::ast::Expression;
use meteo_core::ir::RuleScope;
use meteo_core::types::Feature;
use std::collections::HashSet;

/// Variables every rule may read
pub const INDEX_VARIABLES: [&str; 5] = ["i1", "i2", "i3", "i4", "s"];

/// Built-in functions as `(name, min_args, max_args)`
pub const BUILTIN_FUNCTIONS: [(&str, usize, Option<usize>); 3] =
    [("min", 1, None), ("max", 1, None), ("abs", 1, Some(1))];

/// Semantic analyzer
pub struct SemanticAnalyzer {
    /// Variables that are defined in the current scope
    defined_variables: HashSet<String>,
}

impl SemanticAnalyzer {
    /// Create an analyzer for rules over bin indices only
    pub fn new() -> Self {
        Self::for_scope(RuleScope::Indices)
    }

    /// Create an analyzer for the given rule scope
    pub fn for_scope(scope: RuleScope) -> Self {
        let mut defined_variables: HashSet<String> =
            INDEX_VARIABLES.iter().map(|v| v.to_string()).collect();

        if scope == RuleScope::Readings {
            defined_variables.extend(Feature::ALL.iter().map(|f| f.name().to_string()));
        }

        Self { defined_variables }
    }

    /// Check whether a variable is bound in this scope
    pub fn is_defined(&self, name: &str) -> bool {
        self.defined_variables.contains(name)
    }

    /// Analyze an expression
    pub fn analyze_expression(&self, expr: &Expression) -> Result<()> {
        match expr {
            Expression::Literal(_) => Ok(()),

            Expression::Variable(name) => {
                if self.is_defined(name) {
                    Ok(())
                } else {
                    Err(CompileError::UndefinedSymbol(name.clone()))
                }
            }

            Expression::Binary { left, right, .. } => {
                self.analyze_expression(left)?;
                self.analyze_expression(right)
            }

            Expression::Unary { operand, .. } => self.analyze_expression(operand),

            Expression::FunctionCall { name, args } => {
                Self::check_function(name, args.len())?;
                for arg in args {
                    self.analyze_expression(arg)?;
                }
                Ok(())
            }

            Expression::Ternary {
                condition,
                true_expr,
                false_expr,
            } => {
                self.analyze_expression(condition)?;
                self.analyze_expression(true_expr)?;
                self.analyze_expression(false_expr)
            }
        }
    }

    fn check_function(name: &str, argc: usize) -> Result<()> {
        let (_, min, max) = BUILTIN_FUNCTIONS
            .iter()
            .find(|(builtin, _, _)| *builtin == name)
            .ok_or_else(|| CompileError::UnknownFunction(name.to_string()))?;

        let too_few = argc < *min;
        let too_many = max.is_some_and(|max| argc > max);
        if too_few || too_many {
            let expected = match max {
                Some(max) if max == min => min.to_string(),
                Some(max) => format!("{}..={}", min, max),
                None => format!("at least {}", min),
            };
            return Err(CompileError::ArityMismatch {
                name: name.to_string(),
                expected,
                found: argc,
            });
        }

        Ok(())
    }
}

impl Default for SemanticAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
