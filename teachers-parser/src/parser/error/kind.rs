use ariadne::Fmt;
use teachers_attrs::ErrorKind;
use teachers_error::{ErrorKind, EXPR};
use crate::tokenizer::TokenKind;

/// The end of the answer was reached unexpectedly.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected end of input",
    labels = [format!("you might need to add another {} here", "expression".fg(EXPR))],
)]
pub struct UnexpectedEof;

/// The end of the answer was expected, but something else was found.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "expected end of input",
    labels = [format!("I could not understand the remaining {} here", "expression".fg(EXPR))],
)]
pub struct ExpectedEof;

/// An unexpected token was encountered.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "unexpected token",
    labels = [format!("expected one of: {}", expected.iter().map(|t| format!("{:?}", t)).collect::<Vec<_>>().join(", "))],
    help = format!("found {:?}", found),
)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

/// A parenthesis or bracket was opened but never closed.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "missing closing parenthesis",
    labels = ["this parenthesis is never closed".to_string(), format!("add a closing `{}` here", closing)],
)]
pub struct UnclosedParenthesis {
    /// The delimiter that would close the group.
    pub closing: &'static str,
}

/// A pair of delimiters with nothing between them.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "empty group",
    labels = ["there is nothing inside this group"],
    help = format!("write an {} between the delimiters, or remove them", "expression".fg(EXPR)),
)]
pub struct EmptyGroup;

/// A relation that answers cannot use, such as `\geq`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the relation `{}` is not supported", relation),
    labels = ["this relation"],
    help = "only `=`, `>` and `<` can be used in an answer",
)]
pub struct UnsupportedRelation {
    /// The lexeme of the relation.
    pub relation: String,
}

/// Two relations were used in the same expression, such as `1 < x < 2`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "relations cannot be chained",
    labels = ["this is the first relation".to_string(), "and this is the second".to_string()],
    help = "write an interval instead, such as `]1; 2[`",
)]
pub struct ChainedRelation;

/// The answer is too long or too deeply nested to be read.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the answer is nested too deeply",
    labels = ["this part of the answer goes too deep"],
    help = format!("an answer can chain or nest at most {} operations", limit),
)]
pub struct TooDeep {
    /// The deepest tree accepted.
    pub limit: usize,
}

/// A decimal number written with a bare comma, such as `0,75`. The comma separates the elements
/// of tuples and intervals, so a decimal comma must be braced.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "a decimal comma must be written `{,}`",
    labels = ["this comma is between two digits"],
    help = "write `0{,}75` or `0.75` instead of `0,75`",
)]
pub struct DecimalComma;
