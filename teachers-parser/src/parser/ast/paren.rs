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

/// A parenthesized expression. A [`Paren`] can only contain a single expression.
///
/// LaTeX braces also group, so `x^{2}` holds its exponent in a braced [`Paren`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The inner expression.
    pub expr: Box<Expr>,

    /// Whether the group was written with braces instead of parentheses.
    pub braces: bool,

    /// The region of the source code that this [`Paren`] was parsed from.
    pub span: Range<usize>,
}

impl Paren {
    /// Returns the span of the parenthesized expression.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Returns the innermost expression in the parenthesized expression, consuming the [`Paren`].
    pub fn into_innermost(self) -> Expr {
        let mut inner = self.expr;
        while let Expr::Paren(paren) = *inner {
            inner = paren.expr;
        }
        *inner
    }

    /// Parses a braced group, such as `{x + 1}`.
    pub fn parse_braced(input: &mut Parser<'_>) -> Result<Self, Error> {
        let (open, elements, close) = parse_delimited(
            input,
            &[TokenKind::OpenBrace],
            TokenKind::CloseBrace,
            "}",
            false,
        )?;
        let expr = elements.into_iter().next().ok_or_else(|| {
            Error::new(vec![open.start..close.end], kind::EmptyGroup)
        })?;
        Ok(Self {
            expr: Box::new(expr),
            braces: true,
            span: open.start..close.end,
        })
    }
}

impl fmt::Display for Paren {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        self.expr.fmt(f)?;
        write!(f, ")")
    }
}

/// Several expressions between parentheses, separated by commas, such as `(1, y)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tuple {
    /// The elements of the tuple. There are always at least two.
    pub elements: Vec<Expr>,

    /// The region of the source code that this tuple was parsed from.
    pub span: Range<usize>,
}

impl Tuple {
    /// Returns the span of the tuple.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }

    /// Parses a parenthesized group. If it holds a single expression, a [`Paren`] is returned,
    /// otherwise a [`Tuple`].
    pub fn parse_or_paren(input: &mut Parser<'_>) -> Result<Expr, Error> {
        let (open, mut elements, close) = parse_delimited(
            input,
            &[TokenKind::OpenParen],
            TokenKind::CloseParen,
            ")",
            true,
        )?;
        let span = open.start..close.end;

        match elements.len() {
            0 => Err(Error::new(vec![span], kind::EmptyGroup)),
            1 => Ok(Expr::Paren(Paren {
                expr: Box::new(elements.remove(0)),
                braces: false,
                span,
            })),
            _ => Ok(Expr::Tuple(Tuple { elements, span })),
        }
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(")?;
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            element.fmt(f)?;
        }
        write!(f, ")")
    }
}

/// Parses the expressions between an opening and a closing delimiter, returning the spans of
/// both delimiters. An empty group yields no elements.
pub(crate) fn parse_delimited(
    input: &mut Parser<'_>,
    open: &'static [TokenKind],
    close: TokenKind,
    closing: &'static str,
    allow_commas: bool,
) -> Result<(Range<usize>, Vec<Expr>, Range<usize>), Error> {
    let open_token = input.expect(open)?;

    if let Some(token) = input.peek_token().filter(|token| token.kind == close) {
        let close_span = token.span.clone();
        input.next_token()?;
        return Ok((open_token.span, Vec::new(), close_span));
    }

    let mut elements = vec![Expr::parse(input)?];
    while allow_commas && input.peek_token().map_or(false, |token| token.kind == TokenKind::Comma) {
        input.next_token()?;
        elements.push(Expr::parse(input)?);
    }

    match input.peek_token() {
        Some(token) if token.kind == close => {
            let close_span = token.span.clone();
            input.next_token()?;
            Ok((open_token.span, elements, close_span))
        },
        _ => Err(Error::new(
            vec![open_token.span, input.span()],
            kind::UnclosedParenthesis { closing },
        )),
    }
}
