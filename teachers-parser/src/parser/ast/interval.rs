use crate::{
    parser::{
        ast::{binary::Binary, expr::Expr},
        error::{kind, Error},
        Parse,
        Parser,
        Precedence,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An interval in French notation, where a bracket turned away from the bound excludes it:
/// `[0; 5[` holds `0` but not `5`. `\lbracket` and `\rbracket` stand for `[` and `]`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    /// The lower bound.
    pub left: Box<Expr>,

    /// The upper bound.
    pub right: Box<Expr>,

    /// Whether the lower bound is excluded.
    pub left_open: bool,

    /// Whether the upper bound is excluded.
    pub right_open: bool,

    /// The region of the source code that this interval was parsed from.
    pub span: Range<usize>,
}

impl Interval {
    /// Returns the span of the interval.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Interval {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        let open = input.expect(&[
            TokenKind::OpenSquare,
            TokenKind::LBracket,
            TokenKind::CloseSquare,
            TokenKind::RBracket,
        ])?;
        let left_open = matches!(open.kind, TokenKind::CloseSquare | TokenKind::RBracket);

        // bounds cannot contain relations
        let left = Binary::parse_expr(input, Precedence::Compare)?;
        input.expect(&[TokenKind::Semicolon, TokenKind::Comma])?;
        let right = Binary::parse_expr(input, Precedence::Compare)?;

        let close = input
            .expect(&[
                TokenKind::CloseSquare,
                TokenKind::RBracket,
                TokenKind::OpenSquare,
                TokenKind::LBracket,
            ])
            .map_err(|_| Error::new(
                vec![open.span.clone(), input.span()],
                kind::UnclosedParenthesis { closing: "]" },
            ))?;
        let right_open = matches!(close.kind, TokenKind::OpenSquare | TokenKind::LBracket);

        Ok(Self {
            left: Box::new(left),
            right: Box::new(right),
            left_open,
            right_open,
            span: open.span.start..close.span.end,
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}; {}{}",
            if self.left_open { "]" } else { "[" },
            self.left,
            self.right,
            if self.right_open { "[" } else { "]" },
        )
    }
}
