//! Error types produced while building, evaluating and rewriting expressions.

use thiserror::Error;

/// An expression could not be built because one of its operands is invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConstructionError {
    /// The denominator of a fraction is equal to zero.
    #[error("the denominator of a fraction cannot be zero")]
    InvalidDenominator,

    /// An operand has a kind that the node cannot hold, such as a relation inside a sum.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The bounds of an interval are not scalar values.
    #[error("invalid interval: {0}")]
    InvalidInterval(&'static str),
}

/// An expression could not be evaluated to a finite number.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFinite {
    /// The expression contains a symbol with no value bound to it.
    #[error("no value is bound to the symbol `{0}`")]
    UnboundSymbol(String),

    /// The expression applies a function that has no numeric definition.
    #[error("cannot evaluate the function `{0}`")]
    UnknownFunction(String),

    /// The value is undefined or infinite, such as `\ln 0`.
    #[error("the expression is undefined")]
    Undefined,

    /// The expression is a relation, an interval, a tuple or a bare function.
    #[error("the expression is not a scalar value")]
    NotScalar,
}

/// A formal representation, such as `Integer(n=5)`, could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReprError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected `{found}` at offset {at}")]
    Unexpected { found: char, at: usize },

    #[error("unknown variant `{0}`")]
    UnknownVariant(String),

    #[error("`{variant}` is missing the field `{field}`")]
    MissingField {
        variant: String,
        field: &'static str,
    },

    #[error("the field `{0}` must be a plain value")]
    ExpectedWord(&'static str),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// An arithmetic operation of the backend has no result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("division by zero")]
    DivisionByZero,
}

/// A backend expression has no counterpart in the tagged expression model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LiftError {
    #[error("cannot lift backend expression: {0}")]
    UnsupportedShape(String),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// The generic fallback of the simplifier could not produce a node. This never reaches callers of
/// [`MathsObject::simplified`](crate::MathsObject::simplified): the node is kept unchanged and the
/// failure is logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub(crate) enum SimplificationFailure {
    #[error("could not rebuild the node: {0}")]
    Rebuild(#[from] ConstructionError),

    #[error(transparent)]
    Lift(#[from] LiftError),
}
