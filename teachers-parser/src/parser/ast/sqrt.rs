use crate::{
    parser::{
        ast::expr::Expr,
        error::{kind, Error},
        Parse,
        Parser,
    },
    tokenizer::TokenKind,
};
use std::{fmt, ops::Range};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A root, such as `\sqrt{2}` or `\sqrt[3]{x}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sqrt {
    /// The index of the root, if one is given between square brackets.
    pub index: Option<Box<Expr>>,

    /// The expression under the root.
    pub radicand: Box<Expr>,

    /// The region of the source code that this root was parsed from.
    pub span: Range<usize>,
}

impl Sqrt {
    /// Returns the span of the root.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

impl Parse for Sqrt {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        let command = input.expect(&[TokenKind::Sqrt])?;

        let index = if input.peek_token().map_or(false, |token| token.kind == TokenKind::OpenSquare) {
            let open = input.next_token()?;
            let index = Expr::parse(input)?;
            input.expect(&[TokenKind::CloseSquare]).map_err(|_| Error::new(
                vec![open.span, input.span()],
                kind::UnclosedParenthesis { closing: "]" },
            ))?;
            Some(Box::new(index))
        } else {
            None
        };

        let radicand = Expr::parse_argument(input)?;
        let span = command.span.start..radicand.span().end;
        Ok(Self {
            index,
            radicand: Box::new(radicand),
            span,
        })
    }
}

impl fmt::Display for Sqrt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.index {
            Some(index) => write!(f, "root({}, {})", self.radicand.innermost(), index),
            None => write!(f, "sqrt({})", self.radicand.innermost()),
        }
    }
}
