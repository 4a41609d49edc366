use crate::{
    parser::{
        ast::{
            binary::Binary,
            call::{self, Call},
            frac::Frac,
            interval::Interval,
            literal::Literal,
            paren::{Paren, Tuple},
            sqrt::Sqrt,
            unary::Unary,
        },
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

/// Represents any kind of expression that can appear in an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized or braced expression, such as `(1 + 2)` or `{x}`.
    Paren(Paren),

    /// Several comma-separated expressions between parentheses, such as `(1, y)`.
    Tuple(Tuple),

    /// A fraction, such as `\frac{3}{4}`.
    Frac(Frac),

    /// A square or n-th root, such as `\sqrt{2}` or `\sqrt[3]{x}`.
    Sqrt(Sqrt),

    /// A function application, such as `\sin x` or `f(x)`.
    Call(Call),

    /// An interval in French notation, such as `]0; 5]`.
    Interval(Interval),

    /// A unary operation, such as `-x`.
    Unary(Unary),

    /// A binary operation, such as `1 + 2` or `x = 5`.
    Binary(Binary),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Expr::Literal(literal) => literal.span(),
            Expr::Paren(paren) => paren.span(),
            Expr::Tuple(tuple) => tuple.span(),
            Expr::Frac(frac) => frac.span(),
            Expr::Sqrt(sqrt) => sqrt.span(),
            Expr::Call(call) => call.span(),
            Expr::Interval(interval) => interval.span(),
            Expr::Unary(unary) => unary.span(),
            Expr::Binary(binary) => binary.span(),
        }
    }

    /// Returns the direct subexpressions of this expression.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Literal(_) => Vec::new(),
            Expr::Paren(paren) => vec![&*paren.expr],
            Expr::Tuple(tuple) => tuple.elements.iter().collect(),
            Expr::Frac(frac) => vec![&*frac.numerator, &*frac.denominator],
            Expr::Sqrt(sqrt) => sqrt.index.iter().map(|index| &**index).chain([&*sqrt.radicand]).collect(),
            Expr::Call(call) => call.args.iter().collect(),
            Expr::Interval(interval) => vec![&*interval.left, &*interval.right],
            Expr::Unary(unary) => vec![&*unary.operand],
            Expr::Binary(binary) => vec![&*binary.lhs, &*binary.rhs],
        }
    }

    /// Returns the number of levels in the tree, counting this expression. A literal has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((expr, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(expr.children().into_iter().map(|child| (child, depth + 1)));
        }
        deepest
    }

    /// If this expression is a [`Expr::Paren`], returns the innermost expression in the
    /// parenthesized expression. Otherwise, returns `self`.
    pub fn innermost(&self) -> &Expr {
        let mut inner = self;
        while let Expr::Paren(paren) = inner {
            inner = &paren.expr;
        }
        inner
    }

    /// Parses a single operand: a literal, a group, or any construct that starts with its own
    /// command or delimiter.
    pub fn parse_primary(input: &mut Parser<'_>) -> Result<Self, Error> {
        let token = input.peek_token()
            .cloned()
            .ok_or_else(|| input.error(kind::UnexpectedEof))?;

        match token.kind {
            TokenKind::Frac => Frac::parse(input).map(Expr::Frac),
            TokenKind::Sqrt => Sqrt::parse(input).map(Expr::Sqrt),
            TokenKind::Command if call::is_function_command(token.lexeme) => {
                Call::parse(input).map(Expr::Call)
            },
            TokenKind::Name if input.is_function(token.lexeme) => match input.try_parse::<Call>() {
                Ok(call) => Ok(Expr::Call(call)),
                Err(err) if input.is_too_deep() => Err(err),
                Err(_) => Literal::parse(input).map(Expr::Literal),
            },
            TokenKind::OpenParen => Tuple::parse_or_paren(input),
            TokenKind::OpenBrace => Paren::parse_braced(input).map(Expr::Paren),
            TokenKind::OpenSquare
                | TokenKind::CloseSquare
                | TokenKind::LBracket
                | TokenKind::RBracket => Interval::parse(input).map(Expr::Interval),
            _ => Literal::parse(input).map(Expr::Literal),
        }
    }

    /// Parses the argument of a command such as `\frac` or `\sqrt`: a braced group, or a single
    /// operand.
    pub fn parse_argument(input: &mut Parser<'_>) -> Result<Self, Error> {
        match input.peek_token().map(|token| token.kind) {
            Some(TokenKind::OpenBrace) => Paren::parse_braced(input).map(Expr::Paren),
            _ => Self::parse_primary(input),
        }
    }
}

impl Parse for Expr {
    fn parse(input: &mut Parser<'_>) -> Result<Self, Error> {
        Binary::parse_expr(input, Precedence::Any)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(literal) => literal.fmt(f),
            Expr::Paren(paren) => paren.fmt(f),
            Expr::Tuple(tuple) => tuple.fmt(f),
            Expr::Frac(frac) => frac.fmt(f),
            Expr::Sqrt(sqrt) => sqrt.fmt(f),
            Expr::Call(call) => call.fmt(f),
            Expr::Interval(interval) => interval.fmt(f),
            Expr::Unary(unary) => unary.fmt(f),
            Expr::Binary(binary) => binary.fmt(f),
        }
    }
}
