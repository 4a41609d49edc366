use crate::{
    parser::{
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A number literal, such as `16` or `3.14`, kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The digits of the number, with `.` as the decimal separator.
    pub value: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl LitNum {
    /// Returns true if the number has a fractional part.
    pub fn is_decimal(&self) -> bool {
        self.value.contains('.')
    }
}

impl fmt::Display for LitNum {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A symbol, such as `x`, or a command naming a symbol, such as `\alpha`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol. Commands keep their leading backslash.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

impl fmt::Display for LitSym {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    /// A number literal.
    Number(LitNum),

    /// A symbol.
    Symbol(LitSym),

    /// The constant `\pi`.
    Pi(Range<usize>),

    /// `\infty`.
    Infinity(Range<usize>),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Literal::Number(num) => num.span.clone(),
            Literal::Symbol(sym) => sym.span.clone(),
            Literal::Pi(span) | Literal::Infinity(span) => span.clone(),
        }
    }
}

impl Parse for Literal {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        let token = input.next_token()?;
        match token.kind {
            TokenKind::Int | TokenKind::Float => Ok(Literal::Number(LitNum {
                value: token.lexeme.to_owned(),
                span: token.span,
            })),
            TokenKind::Name | TokenKind::Command => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            // non-ascii letters, such as `θ`
            TokenKind::Symbol if token.lexeme.chars().all(char::is_alphabetic) => Ok(Literal::Symbol(LitSym {
                name: token.lexeme.to_owned(),
                span: token.span,
            })),
            TokenKind::Pi => Ok(Literal::Pi(token.span)),
            TokenKind::Infinity => Ok(Literal::Infinity(token.span)),
            _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
                expected: &[
                    TokenKind::Int,
                    TokenKind::Float,
                    TokenKind::Name,
                    TokenKind::Pi,
                    TokenKind::Infinity,
                ],
                found: token.kind,
            })),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Literal::Number(num) => num.fmt(f),
            Literal::Symbol(sym) => sym.fmt(f),
            Literal::Pi(_) => write!(f, "pi"),
            Literal::Infinity(_) => write!(f, "inf"),
        }
    }
}
