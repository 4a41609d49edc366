use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        error::Error,
        op::{UnaryOp, UnaryOpKind},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A unary expression, such as `-x`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The region of the source code that this unary expression was parsed from.
    pub span: Range<usize>,
}

impl Unary {
    /// Returns the span of the unary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a unary operator followed by an operand parsed with the given function.
    pub fn parse_with<F>(input: &mut Parser<'_>, operand: F) -> Result<Expr, Error>
    where
        F: FnOnce(&mut Parser<'_>) -> Result<Expr, Error>,
    {
        let op = UnaryOp::parse(input)?;
        let operand = operand(input)?;
        let span = op.span.start..operand.span().end;
        Ok(Expr::Unary(Unary {
            operand: Box::new(operand),
            op,
            span,
        }))
    }

    /// Parses a negation if there is one, or an operand otherwise. A leading `+` is ignored.
    ///
    /// The operand of a negation holds everything that binds tighter than negation, so `-x^{2}`
    /// negates `x^{2}` while `-2x` multiplies `-2` by `x`.
    pub fn parse_or_lower(input: &mut Parser<'_>) -> Result<Expr, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::Sub) => Self::parse_with(input, |input| {
                Binary::parse_expr(input, UnaryOpKind::Neg.precedence())
            }),
            Some(TokenKind::Add) => {
                while input.peek_token().is_some_and(|token| token.kind == TokenKind::Add) {
                    input.next_token()?;
                }
                Self::parse_or_lower(input)
            },
            _ => Expr::parse_primary(input),
        }
    }
}

impl fmt::Display for Unary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.op.fmt(f)?;
        self.operand.fmt(f)
    }
}
