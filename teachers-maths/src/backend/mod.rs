//! An exact computer algebra backend.
//!
//! Every [`MathsObject`](crate::MathsObject) owns a [`BackendExpr`], computed once when the node
//! is built. Scalar values are [`Poly`]s: fully distributed sums of [`Monomial`]s with exact
//! rational coefficients. Because the representation is canonical, like terms combine and
//! `\dfrac{6}{8}` and `\dfrac{3}{4}` produce the same value.
//!
//! ```
//! use teachers_maths::backend::Poly;
//! use teachers_maths::primitive::rat;
//!
//! let x = Poly::symbol("x");
//! let sum = &(&x + &Poly::constant(rat(1))) * &(&x - &Poly::constant(rat(1)));
//! let expected = &x.pow(&Poly::constant(rat(2))).unwrap() - &Poly::constant(rat(1));
//! assert_eq!(sum, expected);
//! ```

pub mod atom;
mod eval;
pub mod poly;
pub(crate) mod radical;
pub(crate) mod univariate;

pub use atom::{Atom, Monomial};
pub use poly::Poly;

use rug::Integer;
use std::{collections::{BTreeSet, HashMap}, fmt};
use crate::error::NotFinite;

/// The kind of a relation between two values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RelationKind {
    /// `l = r`
    Eq,

    /// `l > r`
    Greater,
}

/// The backend representation of an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BackendExpr {
    /// A scalar value.
    Value(Poly),

    /// A bare function name.
    Function(String),

    /// A relation between two scalar values.
    Relation(RelationKind, Poly, Poly),

    /// A real interval. `empty` is true if the interval contains no number.
    Interval {
        left: Poly,
        right: Poly,
        left_open: bool,
        right_open: bool,
        empty: bool,
    },

    /// An ordered sequence of values.
    Tuple(Vec<BackendExpr>),
}

impl BackendExpr {
    /// Returns the scalar value, if this is one.
    pub fn as_value(&self) -> Option<&Poly> {
        match self {
            BackendExpr::Value(poly) => Some(poly),
            _ => None,
        }
    }

    /// A short name of the kind of expression, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BackendExpr::Value(_) => "a value",
            BackendExpr::Function(_) => "a function",
            BackendExpr::Relation(..) => "a relation",
            BackendExpr::Interval { .. } => "an interval",
            BackendExpr::Tuple(_) => "a tuple",
        }
    }

    /// Multiplies out every sum raised to a positive integer power.
    pub fn expand(&self) -> BackendExpr {
        match self {
            BackendExpr::Value(poly) => BackendExpr::Value(poly.expand()),
            BackendExpr::Function(name) => BackendExpr::Function(name.clone()),
            BackendExpr::Relation(kind, left, right) => {
                BackendExpr::Relation(*kind, left.expand(), right.expand())
            },
            BackendExpr::Interval { left, right, left_open, right_open, empty } => BackendExpr::Interval {
                left: left.expand(),
                right: right.expand(),
                left_open: *left_open,
                right_open: *right_open,
                empty: *empty,
            },
            BackendExpr::Tuple(elements) => {
                BackendExpr::Tuple(elements.iter().map(BackendExpr::expand).collect())
            },
        }
    }

    /// Returns true if a decimal number took part in computing any part of the expression.
    pub fn is_inexact(&self) -> bool {
        match self {
            BackendExpr::Value(poly) => poly.is_inexact(),
            BackendExpr::Function(_) => false,
            BackendExpr::Relation(_, left, right)
                | BackendExpr::Interval { left, right, .. } => left.is_inexact() || right.is_inexact(),
            BackendExpr::Tuple(elements) => elements.iter().any(BackendExpr::is_inexact),
        }
    }

    /// Returns the names of every symbol in the expression, in sorted order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        match self {
            BackendExpr::Value(poly) => poly.free_symbols(),
            BackendExpr::Function(_) => BTreeSet::new(),
            BackendExpr::Relation(_, left, right)
                | BackendExpr::Interval { left, right, .. } => {
                let mut symbols = left.free_symbols();
                symbols.extend(right.free_symbols());
                symbols
            },
            BackendExpr::Tuple(elements) => elements.iter()
                .flat_map(BackendExpr::free_symbols)
                .collect(),
        }
    }

    /// Evaluates a scalar value with the given values bound to its symbols.
    pub fn eval_float(&self, bindings: &HashMap<String, f64>) -> Result<f64, NotFinite> {
        self.as_value()
            .ok_or(NotFinite::NotScalar)?
            .eval_float(bindings)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RelationKind::Eq => write!(f, "="),
            RelationKind::Greater => write!(f, ">"),
        }
    }
}

/// Returns the greatest common divisor of two integers, which is non-negative.
pub fn gcd(a: &Integer, b: &Integer) -> Integer {
    Integer::from(a.gcd_ref(b))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::{int, rat};
    use super::*;

    #[test]
    fn gcd_is_non_negative() {
        assert_eq!(gcd(&int(-12), &int(18)), int(6));
        assert_eq!(gcd(&int(0), &int(5)), int(5));
    }

    #[test]
    fn scalar_evaluation() {
        let value = BackendExpr::Value(Poly::constant(rat((3, 4))));
        assert_eq!(value.eval_float(&HashMap::new()), Ok(0.75));

        let relation = BackendExpr::Relation(RelationKind::Eq, Poly::symbol("x"), Poly::zero());
        assert_eq!(relation.eval_float(&HashMap::new()), Err(NotFinite::NotScalar));
        assert_eq!(relation.free_symbols().into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);
    }
}
