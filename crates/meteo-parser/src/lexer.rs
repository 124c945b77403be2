//! Rule expression lexer
//!
//! Splits rule text into tokens. The word operators `and` / `or` are
//! folded into `&&` / `||` here. `not` stays a keyword because it binds
//! looser than comparisons, unlike `!`.

use crate::error::{ParseError, Result};
use std::fmt;

/// Rule expression token
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal
    Number(f64),
    /// String literal (quotes removed, escapes resolved)
    Str(String),
    /// Identifier or keyword literal (`true`, `false`, `null`)
    Ident(String),
    /// Operator symbol (`+`, `<=`, `&&`, `!`, ...)
    Op(&'static str),
    LParen,
    RParen,
    Comma,
    /// `?` of a ternary
    Question,
    /// `:` of a ternary
    Colon,
    /// `if` of a `x if cond else y` conditional
    If,
    /// `else` of a `x if cond else y` conditional
    Else,
    /// Word negation, looser than comparisons
    Not,
}

impl Token {
    /// True if a binary operator may follow this token
    pub fn ends_operand(&self) -> bool {
        matches!(
            self,
            Token::Number(_) | Token::Str(_) | Token::Ident(_) | Token::RParen
        )
    }

    pub fn is_op(&self, symbol: &str) -> bool {
        matches!(self, Token::Op(op) if *op == symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Number(n) => write!(f, "{}", n),
            Token::Str(s) => write!(f, "\"{}\"", s),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Op(op) => write!(f, "{}", op),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Question => write!(f, "?"),
            Token::Colon => write!(f, ":"),
            Token::If => write!(f, "if"),
            Token::Else => write!(f, "else"),
            Token::Not => write!(f, "not"),
        }
    }
}

const TWO_CHAR_OPS: [&str; 6] = ["==", "!=", "<=", ">=", "&&", "||"];
const ONE_CHAR_OPS: [&str; 8] = ["+", "-", "*", "/", "%", "<", ">", "!"];

/// Rule expression lexer
pub struct Lexer;

impl Lexer {
    /// Tokenize a rule expression
    pub fn tokenize(input: &str) -> Result<Vec<Token>> {
        let chars: Vec<char> = input.chars().collect();
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c.is_whitespace() {
                i += 1;
                continue;
            }

            if c.is_ascii_digit() || (c == '.' && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())) {
                let (number, next) = Self::read_number(&chars, i)?;
                tokens.push(Token::Number(number));
                i = next;
                continue;
            }

            if c == '"' || c == '\'' {
                let (text, next) = Self::read_string(&chars, i)?;
                tokens.push(Token::Str(text));
                i = next;
                continue;
            }

            if c.is_ascii_alphabetic() || c == '_' {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let word: String = chars[start..i].iter().collect();
                tokens.push(match word.as_str() {
                    "and" => Token::Op("&&"),
                    "or" => Token::Op("||"),
                    "not" => Token::Not,
                    "if" => Token::If,
                    "else" => Token::Else,
                    _ => Token::Ident(word),
                });
                continue;
            }

            let pair: String = chars[i..chars.len().min(i + 2)].iter().collect();
            if let Some(op) = TWO_CHAR_OPS.iter().find(|op| **op == pair) {
                tokens.push(Token::Op(*op));
                i += 2;
                continue;
            }

            let single = c.to_string();
            if let Some(op) = ONE_CHAR_OPS.iter().find(|op| **op == single) {
                tokens.push(Token::Op(*op));
                i += 1;
                continue;
            }

            let token = match c {
                '(' => Token::LParen,
                ')' => Token::RParen,
                ',' => Token::Comma,
                '?' => Token::Question,
                ':' => Token::Colon,
                _ => return Err(ParseError::UnexpectedChar { ch: c, offset: i }),
            };
            tokens.push(token);
            i += 1;
        }

        Ok(tokens)
    }

    /// Read `digits [. digits] [(e|E) [+-] digits]`
    fn read_number(chars: &[char], start: usize) -> Result<(f64, usize)> {
        let mut i = start;
        while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
            i += 1;
        }
        if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
            let mut j = i + 1;
            if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                j += 1;
            }
            if j < chars.len() && chars[j].is_ascii_digit() {
                while j < chars.len() && chars[j].is_ascii_digit() {
                    j += 1;
                }
                i = j;
            }
        }

        let text: String = chars[start..i].iter().collect();
        text.parse::<f64>()
            .map(|n| (n, i))
            .map_err(|_| ParseError::InvalidExpression(format!("Invalid number: {}", text)))
    }

    /// Read a quoted string starting at the opening quote
    fn read_string(chars: &[char], start: usize) -> Result<(String, usize)> {
        let quote = chars[start];
        let mut out = String::new();
        let mut i = start + 1;

        while i < chars.len() {
            match chars[i] {
                '\\' if i + 1 < chars.len() => {
                    out.push(match chars[i + 1] {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                    i += 2;
                }
                c if c == quote => return Ok((out, i + 1)),
                c => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        Err(ParseError::InvalidExpression(format!(
            "Unterminated string starting at offset {}",
            start
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_ternary_rule() {
        let tokens = Lexer::tokenize(r#"s <= 2 ? "A" : "B""#).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("s".into()),
                Token::Op("<="),
                Token::Number(2.0),
                Token::Question,
                Token::Str("A".into()),
                Token::Colon,
                Token::Str("B".into()),
            ]
        );
    }

    #[test]
    fn test_tokenize_word_operators() {
        let tokens = Lexer::tokenize("not i1 and i2 or i3").unwrap();
        assert_eq!(tokens[0], Token::Not);
        assert_eq!(tokens[2], Token::Op("&&"));
        assert_eq!(tokens[4], Token::Op("||"));
    }

    #[test]
    fn test_tokenize_python_conditional() {
        let tokens = Lexer::tokenize("'A' if s <= 2 else 'B'").unwrap();
        assert_eq!(tokens[0], Token::Str("A".into()));
        assert_eq!(tokens[1], Token::If);
        assert_eq!(tokens[5], Token::Else);
    }

    #[test]
    fn test_tokenize_numbers() {
        let tokens = Lexer::tokenize("1e-3 + .5 * 2.25").unwrap();
        assert_eq!(tokens[0], Token::Number(0.001));
        assert_eq!(tokens[2], Token::Number(0.5));
        assert_eq!(tokens[4], Token::Number(2.25));
    }

    #[test]
    fn test_tokenize_string_with_operators_inside() {
        let tokens = Lexer::tokenize(r#""a+b ? c""#).unwrap();
        assert_eq!(tokens, vec![Token::Str("a+b ? c".into())]);
    }

    #[test]
    fn test_tokenize_rejects_unknown_character() {
        assert!(matches!(
            Lexer::tokenize("i1 @ 2"),
            Err(ParseError::UnexpectedChar { ch: '@', offset: 3 })
        ));
        assert!(Lexer::tokenize(r#""open"#).is_err());
    }
}
