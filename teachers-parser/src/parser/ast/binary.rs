use crate::{
    parser::{
        ast::{expr::Expr, unary::Unary},
        error::{kind, Error},
        op::{BinOp, BinOpKind},
        Associativity,
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A binary expression, such as `1 + 2`. Binary expressions can include nested expressions.
///
/// Relations (`=`, `>` and `<`) are binary expressions too, with the lowest precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this binary expression was parsed from.
    pub span: Range<usize>,
}

impl Binary {
    /// Returns the span of the binary expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns true if this expression is a relation.
    pub fn is_relation(&self) -> bool {
        self.op.kind.is_relation()
    }

    /// Peeks at the operator after an operand, if any.
    ///
    /// An operand directly following another operand is joined to it by an implicit
    /// multiplication, as in `2x` or `3\pi r`. Unsupported relations are reported as errors
    /// instead of ending the expression.
    fn next_op(input: &mut Parser<'_>) -> Result<Option<BinOp>, Error> {
        let Some(token) = input.peek_token() else {
            return Ok(None);
        };

        if token.kind.starts_operand() {
            return Ok(Some(BinOp::implicit_mul(token.span.start)));
        }

        match token.kind {
            TokenKind::Exp
                | TokenKind::Mul
                | TokenKind::Div
                | TokenKind::Add
                | TokenKind::Sub => BinOp::parse(input).map(Some),
            kind if kind.is_relation() => BinOp::parse(input).map(Some),
            _ => Ok(None),
        }
    }

    /// Parses the right-hand side of `^`. In LaTeX, a superscript is a single operand, usually a
    /// braced group.
    fn parse_script(input: &mut Parser<'_>) -> Result<Expr, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::Sub) => Unary::parse_with(input, Expr::parse_primary),
            _ => Expr::parse_argument(input),
        }
    }

    /// Parses an expression whose operators all bind tighter than `precedence`, using precedence
    /// climbing.
    ///
    /// Operators of equal precedence are grouped to the left, so `a - b - c` is `(a - b) - c`.
    /// Only one relation may appear in the whole expression.
    pub fn parse_expr(input: &mut Parser<'_>, precedence: Precedence) -> Result<Expr, Error> {
        let depth = input.depth();
        let result = Self::parse_chain(input, precedence);
        input.leave(depth);
        result
    }

    /// [`Binary::parse_expr`], one level deeper for the operand and for every operator joined
    /// to it.
    fn parse_chain(input: &mut Parser<'_>, precedence: Precedence) -> Result<Expr, Error> {
        input.enter()?;
        let mut lhs = Unary::parse_or_lower(input)?;

        loop {
            let checkpoint = input.checkpoint();
            let Some(op) = Self::next_op(input)? else {
                break;
            };

            let binds = op.precedence() > precedence
                || (op.associativity() == Associativity::Right && op.precedence() >= precedence);
            if !binds {
                input.restore(checkpoint);
                break;
            }
            input.enter()?;

            if op.kind.is_relation() {
                if let Expr::Binary(first) = &lhs {
                    if first.is_relation() {
                        return Err(Error::new(
                            vec![first.op.span.clone(), op.span.clone()],
                            kind::ChainedRelation,
                        ));
                    }
                }
            }

            let rhs = match op.kind {
                BinOpKind::Exp => Self::parse_script(input)?,
                _ => Self::parse_expr(input, op.precedence())?,
            };

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
                span,
            });
        }

        Ok(lhs)
    }
}

impl fmt::Display for Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.lhs.fmt(f)?;
        self.op.fmt(f)?;
        self.rhs.fmt(f)
    }
}
