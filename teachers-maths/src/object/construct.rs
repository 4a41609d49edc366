//! Smart constructors. Each one validates its operands and computes the canonical backend value
//! of the new node.

use rug::{Integer, Rational};
use crate::{
    backend::{BackendExpr, Poly, RelationKind},
    error::ConstructionError,
};
use super::{MathsObject, ObjectKind};

/// Returns the scalar value of an operand, or fails if the operand is a relation, an interval, a
/// collection or a bare function.
fn scalar(object: &MathsObject) -> Result<&Poly, ConstructionError> {
    object.value().ok_or(ConstructionError::TypeMismatch {
        expected: "a value",
        found: object.variant_name(),
    })
}

/// Returns true if the interval with the given bounds contains no number.
///
/// Bounds whose order cannot be decided, such as `[x; 2]`, give a non-empty interval.
fn interval_is_empty(left: &Poly, right: &Poly, left_open: bool, right_open: bool) -> bool {
    let width = match (right - left).as_constant() {
        Some(width) => width.cmp0(),
        None => match (left.approximate(), right.approximate()) {
            (Some(left), Some(right)) => match right.partial_cmp(&left) {
                Some(order) => order,
                None => return false,
            },
            _ => return false,
        },
    };

    width.is_lt() || (width.is_eq() && (left_open || right_open))
}

impl MathsObject {
    /// Builds a node whose backend value is already known.
    pub(crate) fn raw(kind: ObjectKind, backend: BackendExpr) -> Self {
        Self { kind, backend }
    }

    /// Builds a node from its variant, validating the operands.
    pub fn from_kind(kind: ObjectKind) -> Result<Self, ConstructionError> {
        let backend = match &kind {
            ObjectKind::Integer(n) => BackendExpr::Value(Poly::constant(Rational::from(n))),
            ObjectKind::Symbol(name) => BackendExpr::Value(Poly::symbol(name.as_str())),
            ObjectKind::Decimal(value) => BackendExpr::Value(Poly::decimal(value.clone())),
            ObjectKind::Inf => BackendExpr::Value(Poly::inf()),
            ObjectKind::Pi => BackendExpr::Value(Poly::pi()),
            ObjectKind::Add(left, right) => BackendExpr::Value(scalar(left)? + scalar(right)?),
            ObjectKind::Mul(left, right) => BackendExpr::Value(scalar(left)? * scalar(right)?),
            ObjectKind::Pow(base, exp) => BackendExpr::Value(
                scalar(base)?
                    .pow(scalar(exp)?)
                    .map_err(|_| ConstructionError::InvalidDenominator)?,
            ),
            ObjectKind::Fraction(numerator, denominator) => {
                let denominator = scalar(denominator)?;
                if denominator.is_zero() {
                    return Err(ConstructionError::InvalidDenominator);
                }
                BackendExpr::Value(
                    scalar(numerator)?
                        .fractionalize(denominator)
                        .map_err(|_| ConstructionError::InvalidDenominator)?,
                )
            },
            ObjectKind::Equality(left, right) => {
                BackendExpr::Relation(RelationKind::Eq, scalar(left)?.clone(), scalar(right)?.clone())
            },
            ObjectKind::StrictGreaterThan(left, right) => {
                BackendExpr::Relation(RelationKind::Greater, scalar(left)?.clone(), scalar(right)?.clone())
            },
            ObjectKind::Interval { left, right, left_open, right_open } => {
                let (Some(left), Some(right)) = (left.value(), right.value()) else {
                    return Err(ConstructionError::InvalidInterval("the bounds must be values"));
                };
                BackendExpr::Interval {
                    left: left.clone(),
                    right: right.clone(),
                    left_open: *left_open,
                    right_open: *right_open,
                    empty: interval_is_empty(left, right, *left_open, *right_open),
                }
            },
            ObjectKind::Collection(elements) => BackendExpr::Tuple(
                elements.iter().map(|element| element.backend.clone()).collect(),
            ),
            ObjectKind::Function(name) => BackendExpr::Function(name.clone()),
            ObjectKind::Image { function, argument } => {
                let args = match &argument.kind {
                    ObjectKind::Collection(elements) => elements.iter()
                        .map(|element| scalar(element).cloned())
                        .collect::<Result<Vec<_>, _>>()?,
                    _ => vec![scalar(argument)?.clone()],
                };
                BackendExpr::Value(Poly::call(function.as_str(), args))
            },
        };

        Ok(Self { kind, backend })
    }

    /// An integer.
    pub fn integer<T>(n: T) -> Self
    where
        Integer: From<T>,
    {
        let n = Integer::from(n);
        let backend = BackendExpr::Value(Poly::constant(Rational::from(&n)));
        Self::raw(ObjectKind::Integer(n), backend)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        let name = name.into();
        let backend = BackendExpr::Value(Poly::symbol(name.as_str()));
        Self::raw(ObjectKind::Symbol(name), backend)
    }

    pub fn pi() -> Self {
        Self::raw(ObjectKind::Pi, BackendExpr::Value(Poly::pi()))
    }

    pub fn inf() -> Self {
        Self::raw(ObjectKind::Inf, BackendExpr::Value(Poly::inf()))
    }

    /// A named function, which can be applied with [`MathsObject::new_image`].
    pub fn function(name: impl Into<String>) -> Self {
        let name = name.into();
        let backend = BackendExpr::Function(name.clone());
        Self::raw(ObjectKind::Function(name), backend)
    }

    /// A decimal with the exact value of the given float. Fails if the float is NaN or infinite.
    pub fn decimal(value: f64) -> Result<Self, ConstructionError> {
        Rational::from_f64(value)
            .map(Self::decimal_from_rational)
            .ok_or(ConstructionError::TypeMismatch {
                expected: "a finite number",
                found: "a non-finite float",
            })
    }

    /// A decimal with the value `p / q`.
    pub fn decimal_ratio<P, Q>(p: P, q: Q) -> Result<Self, ConstructionError>
    where
        Integer: From<P> + From<Q>,
    {
        let q = Integer::from(q);
        if q == 0 {
            return Err(ConstructionError::InvalidDenominator);
        }
        Ok(Self::decimal_from_rational(Rational::from((Integer::from(p), q))))
    }

    pub fn decimal_from_rational(value: Rational) -> Self {
        let backend = BackendExpr::Value(Poly::decimal(value.clone()));
        Self::raw(ObjectKind::Decimal(value), backend)
    }

    pub fn new_add(
        left: impl Into<MathsObject>,
        right: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Add(Box::new(left.into()), Box::new(right.into())))
    }

    pub fn new_mul(
        left: impl Into<MathsObject>,
        right: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Mul(Box::new(left.into()), Box::new(right.into())))
    }

    /// `base^{exp}`. Fails if `base` is zero and `exp` is negative.
    pub fn new_pow(
        base: impl Into<MathsObject>,
        exp: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Pow(Box::new(base.into()), Box::new(exp.into())))
    }

    /// `\dfrac{p}{q}`. Fails with [`ConstructionError::InvalidDenominator`] if `q` is zero.
    pub fn new_fraction(
        numerator: impl Into<MathsObject>,
        denominator: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Fraction(Box::new(numerator.into()), Box::new(denominator.into())))
    }

    pub fn new_equality(
        left: impl Into<MathsObject>,
        right: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Equality(Box::new(left.into()), Box::new(right.into())))
    }

    pub fn new_greater_than(
        left: impl Into<MathsObject>,
        right: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::StrictGreaterThan(Box::new(left.into()), Box::new(right.into())))
    }

    /// An interval between two values.
    ///
    /// An interval whose left bound is greater than its right bound, or whose bounds are equal
    /// with an open end, is valid and empty.
    pub fn new_interval(
        left: impl Into<MathsObject>,
        right: impl Into<MathsObject>,
        left_open: bool,
        right_open: bool,
    ) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Interval {
            left: Box::new(left.into()),
            right: Box::new(right.into()),
            left_open,
            right_open,
        })
    }

    pub fn new_collection(elements: Vec<MathsObject>) -> Result<Self, ConstructionError> {
        Self::from_kind(ObjectKind::Collection(elements))
    }

    /// Applies a [`ObjectKind::Function`] to an argument, or to a collection of arguments.
    pub fn new_image(
        function: MathsObject,
        argument: impl Into<MathsObject>,
    ) -> Result<Self, ConstructionError> {
        let found = function.variant_name();
        let ObjectKind::Function(name) = function.kind else {
            return Err(ConstructionError::TypeMismatch { expected: "a function", found });
        };
        Self::from_kind(ObjectKind::Image { function: name, argument: Box::new(argument.into()) })
    }
}

impl From<i32> for MathsObject {
    fn from(n: i32) -> Self {
        Self::integer(n)
    }
}

impl From<i64> for MathsObject {
    fn from(n: i64) -> Self {
        Self::integer(n)
    }
}

impl From<Integer> for MathsObject {
    fn from(n: Integer) -> Self {
        Self::integer(n)
    }
}

impl TryFrom<ObjectKind> for MathsObject {
    type Error = ConstructionError;

    fn try_from(kind: ObjectKind) -> Result<Self, Self::Error> {
        Self::from_kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::rat;
    use super::*;

    #[test]
    fn zero_denominator() {
        let zero = (MathsObject::symbol("x") - MathsObject::symbol("x")).unwrap();
        assert_eq!(MathsObject::new_fraction(1, zero), Err(ConstructionError::InvalidDenominator));
        assert_eq!(MathsObject::new_pow(0, -1), Err(ConstructionError::InvalidDenominator));
        assert_eq!(MathsObject::decimal_ratio(1, 0), Err(ConstructionError::InvalidDenominator));
    }

    #[test]
    fn operands_must_be_values() {
        let relation = MathsObject::new_equality(MathsObject::symbol("x"), 2).unwrap();
        assert_eq!(
            MathsObject::new_add(relation.clone(), 1),
            Err(ConstructionError::TypeMismatch { expected: "a value", found: "Equality" }),
        );
        assert!(matches!(
            MathsObject::new_interval(relation, 2, false, false),
            Err(ConstructionError::InvalidInterval(_)),
        ));
        assert!(matches!(
            MathsObject::new_image(MathsObject::symbol("f"), 2),
            Err(ConstructionError::TypeMismatch { expected: "a function", .. }),
        ));
    }

    #[test]
    fn decimals_are_exact() {
        let decimal = MathsObject::decimal(2.5).unwrap();
        assert_eq!(decimal.value().and_then(Poly::as_constant), Some(rat((5, 2))));
        assert!(decimal.value().unwrap().is_inexact());
        assert!(MathsObject::decimal(f64::NAN).is_err());
    }

    #[test]
    fn empty_intervals() {
        let cases = [
            ((2, 2), (true, true), true),
            ((2, 2), (false, true), true),
            ((2, 2), (false, false), false),
            ((3, 1), (false, false), true),
            ((0, 5), (true, false), false),
        ];
        for ((left, right), (left_open, right_open), empty) in cases {
            let interval = MathsObject::new_interval(left, right, left_open, right_open).unwrap();
            assert_eq!(interval.is_empty(), empty, "{}", interval);
        }

        let unbounded = MathsObject::new_interval(MathsObject::pi(), MathsObject::inf(), true, true).unwrap();
        assert!(!unbounded.is_empty());
        let reversed = MathsObject::new_interval(MathsObject::inf(), MathsObject::pi(), true, true).unwrap();
        assert!(reversed.is_empty());
    }

    #[test]
    fn image_of_several_arguments() {
        let f = MathsObject::function("f");
        let args = MathsObject::new_collection(vec![MathsObject::symbol("x"), MathsObject::integer(2)]).unwrap();
        let image = MathsObject::new_image(f, args).unwrap();
        assert_eq!(
            image.value().unwrap().free_symbols().into_iter().collect::<Vec<_>>(),
            vec!["x".to_string()],
        );
    }
}
