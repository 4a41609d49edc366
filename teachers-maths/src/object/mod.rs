//! The typed expression tree.
//!
//! A [`MathsObject`] is an immutable node of a closed set of variants ([`ObjectKind`]). Every
//! node computes its [`BackendExpr`] from the backends of its children when it is built, and the
//! node is never changed afterwards: rewriting an expression, such as with
//! [`MathsObject::simplified`], returns a new tree.
//!
//! Nodes are built with smart constructors that validate their operands and fail with a
//! [`ConstructionError`] instead of building an invalid node:
//!
//! ```
//! use teachers_maths::{ConstructionError, MathsObject};
//!
//! let three_quarters = MathsObject::new_fraction(3, 4).unwrap();
//! assert_eq!(three_quarters.to_string(), "Fraction(p=Integer(n=3), q=Integer(n=4))");
//!
//! assert_eq!(MathsObject::new_fraction(1, 0), Err(ConstructionError::InvalidDenominator));
//! ```
//!
//! Equality of nodes is structural: `\dfrac{6}{8}` and `\dfrac{3}{4}` are different nodes with
//! the same value.

mod construct;
mod numeric;
mod ops;
mod repr;

pub use numeric::Numeric;

use rug::{Integer, Rational};
use std::collections::HashMap;
use crate::{
    backend::{BackendExpr, Poly},
    error::NotFinite,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The variant of a [`MathsObject`] and its operands.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ObjectKind {
    /// An integer of any size.
    Integer(Integer),

    /// A named symbol, such as `x` or `\alpha`.
    Symbol(String),

    /// A number written with decimals. The value is the exact rational the decimal denotes.
    Decimal(Rational),

    /// `\infty`.
    Inf,

    /// `\pi`.
    Pi,

    Add(Box<MathsObject>, Box<MathsObject>),
    Mul(Box<MathsObject>, Box<MathsObject>),

    /// A base raised to an exponent.
    Pow(Box<MathsObject>, Box<MathsObject>),

    /// A numerator over a denominator whose value is never zero.
    Fraction(Box<MathsObject>, Box<MathsObject>),

    /// `l = r`
    Equality(Box<MathsObject>, Box<MathsObject>),

    /// `l > r`
    StrictGreaterThan(Box<MathsObject>, Box<MathsObject>),

    /// A real interval, written `[a; b]`, `]a; b]`, etc.
    Interval {
        left: Box<MathsObject>,
        right: Box<MathsObject>,
        left_open: bool,
        right_open: bool,
    },

    /// An ordered sequence of expressions.
    Collection(Vec<MathsObject>),

    /// A named function that is never interpreted.
    Function(String),

    /// A function applied to an argument. Several arguments are given as a collection.
    Image {
        function: String,
        argument: Box<MathsObject>,
    },
}

/// An algebraic expression.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "ObjectKind", into = "ObjectKind")
)]
pub struct MathsObject {
    kind: ObjectKind,
    backend: BackendExpr,
}

impl PartialEq for MathsObject {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for MathsObject {}

impl MathsObject {
    /// Returns the variant of the node.
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Consumes the node, returning its variant.
    pub fn into_kind(self) -> ObjectKind {
        self.kind
    }

    /// Returns the backend representation computed when the node was built.
    pub fn backend(&self) -> &BackendExpr {
        &self.backend
    }

    /// Returns the backend value if the node is a scalar expression.
    pub fn value(&self) -> Option<&Poly> {
        self.backend.as_value()
    }

    /// The name of the variant, used in error messages.
    pub fn variant_name(&self) -> &'static str {
        match self.kind {
            ObjectKind::Integer(_) => "Integer",
            ObjectKind::Symbol(_) => "Symbol",
            ObjectKind::Decimal(_) => "Decimal",
            ObjectKind::Inf => "Inf",
            ObjectKind::Pi => "Pi",
            ObjectKind::Add(..) => "Add",
            ObjectKind::Mul(..) => "Mul",
            ObjectKind::Pow(..) => "Pow",
            ObjectKind::Fraction(..) => "Fraction",
            ObjectKind::Equality(..) => "Equality",
            ObjectKind::StrictGreaterThan(..) => "StrictGreaterThan",
            ObjectKind::Interval { .. } => "Interval",
            ObjectKind::Collection(_) => "Collection",
            ObjectKind::Function(_) => "Function",
            ObjectKind::Image { .. } => "Image",
        }
    }

    /// Returns the integer if the node is an [`ObjectKind::Integer`].
    pub fn as_integer(&self) -> Option<&Integer> {
        match &self.kind {
            ObjectKind::Integer(n) => Some(n),
            _ => None,
        }
    }

    /// Returns true if the node is an integer with the given value.
    pub fn is_integer(&self, value: i32) -> bool {
        self.as_integer().map_or(false, |n| *n == value)
    }

    /// Returns the element at the given index of a collection.
    pub fn get(&self, index: usize) -> Option<&MathsObject> {
        match &self.kind {
            ObjectKind::Collection(elements) => elements.get(index),
            _ => None,
        }
    }

    /// Returns true if the node is an interval that contains no number, such as `]2; 2[` or
    /// `[3; 1]`. Returns false for every other node.
    pub fn is_empty(&self) -> bool {
        matches!(self.backend, BackendExpr::Interval { empty: true, .. })
    }

    /// Evaluates the expression to a number.
    ///
    /// Fails with [`NotFinite::UnboundSymbol`] if the expression contains a symbol.
    pub fn eval(&self) -> Result<f64, NotFinite> {
        self.eval_with(&HashMap::new())
    }

    /// Evaluates the expression with the given values bound to its symbols.
    pub fn eval_with(&self, bindings: &HashMap<String, f64>) -> Result<f64, NotFinite> {
        self.backend.eval_float(bindings)
    }
}

impl From<MathsObject> for ObjectKind {
    fn from(object: MathsObject) -> Self {
        object.kind
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn structural_equality() {
        let three_quarters = MathsObject::new_fraction(3, 4).unwrap();
        let six_eighths = MathsObject::new_fraction(6, 8).unwrap();
        assert_ne!(three_quarters, six_eighths);
        assert_eq!(three_quarters.value(), six_eighths.value());
    }

    #[test]
    fn eval_fraction() {
        for (p, q) in [(3, 4), (-6, 8), (5, -2)] {
            let fraction = MathsObject::new_fraction(p, q).unwrap();
            assert_float_relative_eq!(fraction.eval().unwrap(), p as f64 / q as f64, 1e-12);
        }
    }

    #[test]
    fn eval_unbound_symbol() {
        let expr = (MathsObject::symbol("x") + 1).unwrap();
        assert_eq!(expr.eval(), Err(NotFinite::UnboundSymbol("x".to_string())));

        let bindings = HashMap::from([("x".to_string(), 2.5)]);
        assert_eq!(expr.eval_with(&bindings), Ok(3.5));
    }

    #[test]
    fn collection_indexing() {
        let collection = MathsObject::new_collection(vec![
            MathsObject::symbol("x"),
            MathsObject::integer(2),
        ]).unwrap();
        assert_eq!(collection.get(1), Some(&MathsObject::integer(2)));
        assert_eq!(collection.get(2), None);
        assert_eq!(collection.eval(), Err(NotFinite::NotScalar));
    }
}
