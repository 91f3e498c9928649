//! Arithmetic expression evaluation for calculator lines.
//!
//! A small recursive-descent evaluator over numbers, `+ - * /`, unary signs,
//! and parentheses. Number literals may carry thousands separators (`1,234`)
//! and a percent suffix (`15%` evaluates as `15 / 100`).
//!
//! # Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER ['%'] | '(' expr ')'
//! ```

use std::fmt;

use thiserror::Error;

/// Maximum nesting of parentheses and unary signs.
const MAX_DEPTH: usize = 256;

/// Errors raised while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExprError {
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedCharacter { ch: char, offset: usize },

    #[error("malformed number '{literal}'")]
    MalformedNumber { literal: String },

    #[error("unexpected '{token}' at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unclosed parenthesis at offset {offset}")]
    UnclosedParen { offset: usize },

    #[error("expression is nested too deeply")]
    TooDeep,

    #[error("result is not a finite number")]
    NonFinite,
}

/// Evaluates an arithmetic expression.
///
/// Operators follow the usual precedence: `*` and `/` bind tighter than
/// `+` and `-`, both left-associative; parentheses override. The result
/// must be finite, so division by zero is an error rather than infinity.
///
/// # Examples
///
/// ```
/// use tally::domain::evaluate;
///
/// assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
/// assert_eq!(evaluate("1,200 * 15%").unwrap(), 180.0);
/// assert!(evaluate("10 / 0").is_err());
/// ```
pub fn evaluate(expr: &str) -> Result<f64, ExprError> {
    let tokens = Lexer::new(expr).tokenize()?;
    if tokens.is_empty() {
        return Err(ExprError::UnexpectedEnd);
    }

    let mut parser = Parser::new(&tokens);
    let value = parser.parse_expr()?;
    if let Some(token) = parser.peek() {
        return Err(token.unexpected());
    }

    if !value.is_finite() {
        return Err(ExprError::NonFinite);
    }
    Ok(value)
}

// ===========================================
// Lexer
// ===========================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Token {
    kind: TokenKind,
    offset: usize,
}

impl Token {
    fn unexpected(&self) -> ExprError {
        ExprError::UnexpectedToken {
            token: self.kind.to_string(),
            offset: self.offset,
        }
    }
}

struct Lexer {
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Self {
            chars: input.char_indices().collect(),
            pos: 0,
        }
    }

    fn peek_char(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    fn tokenize(mut self) -> Result<Vec<Token>, ExprError> {
        let mut tokens = Vec::new();

        while let Some(&(offset, ch)) = self.chars.get(self.pos) {
            let kind = match ch {
                c if c.is_whitespace() => {
                    self.pos += 1;
                    continue;
                }
                '0'..='9' | '.' => {
                    let value = self.lex_number()?;
                    tokens.push(Token {
                        kind: TokenKind::Number(value),
                        offset,
                    });
                    continue;
                }
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                _ => return Err(ExprError::UnexpectedCharacter { ch, offset }),
            };
            self.pos += 1;
            tokens.push(Token { kind, offset });
        }

        Ok(tokens)
    }

    /// Lexes a number literal with optional group separators and percent suffix.
    fn lex_number(&mut self) -> Result<f64, ExprError> {
        let mut literal = String::new();
        let mut digits = String::new();
        let mut seen_point = false;
        let mut malformed = false;
        // Digits in the current integer group, and whether a separator was seen.
        let mut group_len = 0;
        let mut grouped = false;

        while let Some(c) = self.peek_char(0) {
            match c {
                '0'..='9' => {
                    digits.push(c);
                    if !seen_point {
                        group_len += 1;
                    }
                }
                '.' => {
                    malformed |= seen_point || (grouped && group_len != 3);
                    seen_point = true;
                    digits.push(c);
                }
                // A comma only belongs to the literal when a digit follows it.
                // The leading group has 1-3 digits, every later group exactly 3.
                ',' if self.peek_char(1).is_some_and(|n| n.is_ascii_digit()) => {
                    malformed |= seen_point
                        || group_len == 0
                        || group_len > 3
                        || (grouped && group_len != 3);
                    grouped = true;
                    group_len = 0;
                }
                _ => break,
            }
            literal.push(c);
            self.pos += 1;
        }
        malformed |= grouped && !seen_point && group_len != 3;

        if malformed {
            return Err(ExprError::MalformedNumber { literal });
        }
        let mut value: f64 = digits
            .parse()
            .map_err(|_| ExprError::MalformedNumber {
                literal: literal.clone(),
            })?;

        if self.peek_char(0) == Some('%') {
            self.pos += 1;
            value /= 100.0;
        }
        Ok(value)
    }
}

// ===========================================
// Parser
// ===========================================

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos);
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn parse_expr(&mut self) -> Result<f64, ExprError> {
        let mut acc = self.parse_term()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Plus => {
                    self.pos += 1;
                    acc += self.parse_term()?;
                }
                TokenKind::Minus => {
                    self.pos += 1;
                    acc -= self.parse_term()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn parse_term(&mut self) -> Result<f64, ExprError> {
        let mut acc = self.parse_unary()?;
        while let Some(token) = self.peek() {
            match token.kind {
                TokenKind::Star => {
                    self.pos += 1;
                    acc *= self.parse_unary()?;
                }
                TokenKind::Slash => {
                    self.pos += 1;
                    acc /= self.parse_unary()?;
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn parse_unary(&mut self) -> Result<f64, ExprError> {
        match self.peek().map(|t| t.kind) {
            Some(TokenKind::Plus) => {
                self.pos += 1;
                self.nested(Self::parse_unary)
            }
            Some(TokenKind::Minus) => {
                self.pos += 1;
                self.nested(Self::parse_unary).map(|v| -v)
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<f64, ExprError> {
        let token = self.advance().ok_or(ExprError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(value),
            TokenKind::LParen => {
                let value = self.nested(Self::parse_expr)?;
                match self.advance() {
                    Some(Token {
                        kind: TokenKind::RParen,
                        ..
                    }) => Ok(value),
                    Some(other) => Err(other.unexpected()),
                    None => Err(ExprError::UnclosedParen {
                        offset: token.offset,
                    }),
                }
            }
            _ => Err(token.unexpected()),
        }
    }

    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<f64, ExprError>,
    ) -> Result<f64, ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::TooDeep);
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }
}
