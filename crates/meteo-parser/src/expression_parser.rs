//! Expression parser
//!
//! Parses rule text into Expression AST nodes.
//!
//! Supported syntax, lowest precedence first:
//! - Conditionals: `cond ? a : b` and `a if cond else b` (right-associative)
//! - Logical: `||` / `or`, then `&&` / `and`
//! - Word negation: `not` (applies to a whole comparison)
//! - Comparison: `==`, `!=`, `<`, `<=`, `>`, `>=`
//! - Additive: `+`, `-`
//! - Multiplicative: `*`, `/`, `%`
//! - Unary: `!` / `not`, `-`
//! - Primary: numbers, strings, `true`/`false`/`null`, identifiers,
//!   function calls `max(i1, i2)`, parentheses

use crate::error::{ParseError, Result};
use crate::lexer::{Lexer, Token};
use meteo_core::ast::{Expression, Operator, UnaryOperator};
use meteo_core::Value;

/// Deepest AST the parser will build. Evaluation, folding and code
/// generation all recurse over the tree.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Expression parser
pub struct ExpressionParser;

impl ExpressionParser {
    /// Parse an expression from a string
    pub fn parse(input: &str) -> Result<Expression> {
        let tokens = Lexer::tokenize(input)?;

        if tokens.is_empty() {
            return Err(ParseError::InvalidExpression("Empty expression".to_string()));
        }
        Self::check_balanced(&tokens)?;

        Self::parse_expression(&tokens, 0)
    }

    /// Depth of a child node, or an error past `MAX_NESTING_DEPTH`
    fn descend(depth: usize) -> Result<usize> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::InvalidExpression(format!(
                "Expression nested deeper than {} levels",
                MAX_NESTING_DEPTH
            )));
        }
        Ok(depth + 1)
    }

    /// Parse a complete expression (handles operators with precedence)
    fn parse_expression(tokens: &[Token], depth: usize) -> Result<Expression> {
        if tokens.is_empty() {
            return Err(ParseError::InvalidExpression(
                "Missing operand".to_string(),
            ));
        }

        // Conditionals bind loosest
        if let Some(expr) = Self::parse_ternary(tokens, depth)? {
            return Ok(expr);
        }
        if let Some(expr) = Self::parse_if_else(tokens, depth)? {
            return Ok(expr);
        }

        for (tier, operators) in [
            &["||"][..],
            &["&&"][..],
            &["==", "!=", "<=", ">=", "<", ">"][..],
            &["+", "-"][..],
            &["*", "/", "%"][..],
        ]
        .into_iter()
        .enumerate()
        {
            // `not x == y` negates the whole comparison
            if tier == 2 && tokens[0] == Token::Not {
                return Ok(Expression::unary(
                    UnaryOperator::Not,
                    Self::parse_expression(&tokens[1..], Self::descend(depth)?)?,
                ));
            }

            if let Some(i) = Self::split_by_operator(tokens, operators) {
                let op = match &tokens[i] {
                    Token::Op(symbol) => Self::parse_operator(symbol)?,
                    other => {
                        return Err(ParseError::InvalidExpression(format!(
                            "Expected operator, found {}",
                            other
                        )))
                    }
                };
                let child = Self::descend(depth)?;
                return Ok(Expression::binary(
                    Self::parse_expression(&tokens[..i], child)?,
                    op,
                    Self::parse_expression(&tokens[i + 1..], child)?,
                ));
            }
        }

        Self::parse_unary(tokens, depth)
    }

    /// `cond ? a : b`, splitting at the first top-level `?`
    fn parse_ternary(tokens: &[Token], depth: usize) -> Result<Option<Expression>> {
        let Some(q) = Self::find_top_level(tokens, 0, |t| *t == Token::Question) else {
            return Ok(None);
        };
        let colon = Self::find_matching(tokens, q, &Token::Question, &Token::Colon)
            .ok_or_else(|| ParseError::InvalidExpression("'?' without matching ':'".to_string()))?;

        let child = Self::descend(depth)?;
        Ok(Some(Expression::ternary(
            Self::parse_expression(&tokens[..q], child)?,
            Self::parse_expression(&tokens[q + 1..colon], child)?,
            Self::parse_expression(&tokens[colon + 1..], child)?,
        )))
    }

    /// `a if cond else b`, splitting at the first top-level `if`
    fn parse_if_else(tokens: &[Token], depth: usize) -> Result<Option<Expression>> {
        let Some(if_pos) = Self::find_top_level(tokens, 0, |t| *t == Token::If) else {
            return Ok(None);
        };
        let else_pos = Self::find_matching(tokens, if_pos, &Token::If, &Token::Else)
            .ok_or_else(|| ParseError::InvalidExpression("'if' without matching 'else'".to_string()))?;

        let child = Self::descend(depth)?;
        Ok(Some(Expression::ternary(
            Self::parse_expression(&tokens[if_pos + 1..else_pos], child)?,
            Self::parse_expression(&tokens[..if_pos], child)?,
            Self::parse_expression(&tokens[else_pos + 1..], child)?,
        )))
    }

    /// Parse prefix operators, then a primary expression
    fn parse_unary(tokens: &[Token], depth: usize) -> Result<Expression> {
        match tokens.first() {
            Some(t) if t.is_op("!") => Ok(Expression::unary(
                UnaryOperator::Not,
                Self::parse_unary(&tokens[1..], Self::descend(depth)?)?,
            )),
            Some(t) if t.is_op("-") => {
                let operand = Self::parse_unary(&tokens[1..], Self::descend(depth)?)?;
                // Fold negative number literals directly
                if let Expression::Literal(Value::Number(n)) = operand {
                    Ok(Expression::literal(-n))
                } else {
                    Ok(Expression::unary(UnaryOperator::Negate, operand))
                }
            }
            _ => Self::parse_primary(tokens, depth),
        }
    }

    /// Parse a primary expression
    fn parse_primary(tokens: &[Token], depth: usize) -> Result<Expression> {
        match tokens {
            [] => Err(ParseError::InvalidExpression("Missing operand".to_string())),

            [Token::Number(n)] => Ok(Expression::literal(*n)),

            [Token::Str(s)] => Ok(Expression::literal(s.as_str())),

            [Token::Ident(name)] => Ok(match name.as_str() {
                "true" | "True" => Expression::literal(true),
                "false" | "False" => Expression::literal(false),
                "null" | "None" => Expression::Literal(Value::Null),
                _ => Expression::variable(name.as_str()),
            }),

            // Parenthesized group spanning the whole slice
            [Token::LParen, .., Token::RParen] if Self::closing_paren(tokens, 0) == Some(tokens.len() - 1) => {
                Self::parse_expression(&tokens[1..tokens.len() - 1], Self::descend(depth)?)
            }

            // Function call: name(args...)
            [Token::Ident(name), Token::LParen, .., Token::RParen]
                if Self::closing_paren(tokens, 1) == Some(tokens.len() - 1) =>
            {
                let args = Self::parse_function_args(&tokens[2..tokens.len() - 1], Self::descend(depth)?)?;
                Ok(Expression::function_call(name.as_str(), args))
            }

            _ => Err(ParseError::InvalidExpression(format!(
                "Cannot parse: {}",
                tokens
                    .iter()
                    .map(|t| t.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            ))),
        }
    }

    /// Index of the rightmost top-level binary operator from `operators`.
    ///
    /// Scanning right to left gives left associativity. A `+` or `-` only
    /// counts as binary when the previous token can end an operand;
    /// otherwise it is a prefix sign.
    fn split_by_operator(tokens: &[Token], operators: &[&str]) -> Option<usize> {
        let mut depth = 0i32;

        for i in (0..tokens.len()).rev() {
            match &tokens[i] {
                Token::RParen => depth += 1,
                Token::LParen => depth -= 1,
                Token::Op(op) if depth == 0 && operators.contains(op) => {
                    let is_binary = i > 0 && tokens[i - 1].ends_operand();
                    if is_binary || !matches!(*op, "+" | "-") {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }

        None
    }

    /// First index at or after `start` outside any parentheses matching `pred`
    fn find_top_level(tokens: &[Token], start: usize, pred: impl Fn(&Token) -> bool) -> Option<usize> {
        let mut depth = 0i32;
        for (i, token) in tokens.iter().enumerate().skip(start) {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth -= 1,
                t if depth == 0 && pred(t) => return Some(i),
                _ => {}
            }
        }
        None
    }

    /// Position of the `close` token pairing with the `open` at `open_pos`,
    /// skipping nested open/close pairs
    fn find_matching(tokens: &[Token], open_pos: usize, open: &Token, close: &Token) -> Option<usize> {
        let mut depth = 0i32;
        let mut nesting = 0usize;
        for (i, token) in tokens.iter().enumerate().skip(open_pos + 1) {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth -= 1,
                t if depth == 0 && t == open => nesting += 1,
                t if depth == 0 && t == close => {
                    if nesting == 0 {
                        return Some(i);
                    }
                    nesting -= 1;
                }
                _ => {}
            }
        }
        None
    }

    /// Index of the `)` closing the `(` at `open`
    fn closing_paren(tokens: &[Token], open: usize) -> Option<usize> {
        let mut depth = 0i32;
        for (i, token) in tokens.iter().enumerate().skip(open) {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Reject unbalanced parentheses up front
    fn check_balanced(tokens: &[Token]) -> Result<()> {
        let mut depth = 0i32;
        for token in tokens {
            match token {
                Token::LParen => depth += 1,
                Token::RParen => {
                    depth -= 1;
                    if depth < 0 {
                        return Err(ParseError::InvalidExpression("Unmatched ')'".to_string()));
                    }
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(ParseError::InvalidExpression("Unmatched '('".to_string()));
        }
        Ok(())
    }

    /// Parse comma-separated function arguments
    fn parse_function_args(tokens: &[Token], depth: usize) -> Result<Vec<Expression>> {
        if tokens.is_empty() {
            return Ok(Vec::new());
        }

        let mut args = Vec::new();
        let mut start = 0;
        while let Some(comma) = Self::find_top_level(tokens, start, |t| *t == Token::Comma) {
            args.push(Self::parse_expression(&tokens[start..comma], depth)?);
            start = comma + 1;
        }
        args.push(Self::parse_expression(&tokens[start..], depth)?);

        Ok(args)
    }

    /// Parse an operator symbol
    fn parse_operator(op: &str) -> Result<Operator> {
        match op {
            "==" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            "<" => Ok(Operator::Lt),
            ">" => Ok(Operator::Gt),
            "<=" => Ok(Operator::Le),
            ">=" => Ok(Operator::Ge),
            "+" => Ok(Operator::Add),
            "-" => Ok(Operator::Sub),
            "*" => Ok(Operator::Mul),
            "/" => Ok(Operator::Div),
            "%" => Ok(Operator::Mod),
            "&&" => Ok(Operator::And),
            "||" => Ok(Operator::Or),
            _ => Err(ParseError::InvalidExpression(format!(
                "Invalid operator: {}",
                op
            ))),
        }
    }
}
