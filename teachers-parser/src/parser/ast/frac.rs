use crate::{
    parser::{
        ast::expr::Expr,
        error::Error,
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A fraction written with `\frac`, `\dfrac` or `\tfrac`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frac {
    /// The numerator, as written (usually a braced group).
    pub numerator: Box<Expr>,

    /// The denominator, as written (usually a braced group).
    pub denominator: Box<Expr>,

    /// The region of the source code that this fraction was parsed from.
    pub span: Range<usize>,
}

impl Frac {
    /// Returns the span of the fraction.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Frac {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        let command = input.expect(&[TokenKind::Frac])?;
        let numerator = Expr::parse_argument(input)?;
        let denominator = Expr::parse_argument(input)?;
        let span = command.span.start..denominator.span().end;
        Ok(Self {
            numerator: Box::new(numerator),
            denominator: Box::new(denominator),
            span,
        })
    }
}

impl fmt::Display for Frac {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}) / ({})", self.numerator.innermost(), self.denominator.innermost())
    }
}
