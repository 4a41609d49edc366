//! Operator overloads that build nodes. None of them simplify: `x + 0` is an `Add` node.
//!
//! Building can fail, since the operands are validated, so every operator returns a
//! [`Result`].

use std::ops::{Add, Div, Mul, Neg, Sub};
use crate::error::ConstructionError;
use super::{MathsObject, ObjectKind};

impl<T: Into<MathsObject>> Add<T> for MathsObject {
    type Output = Result<MathsObject, ConstructionError>;

    fn add(self, rhs: T) -> Self::Output {
        MathsObject::new_add(self, rhs)
    }
}

/// `a - b` is `Add(a, -b)`.
impl<T: Into<MathsObject>> Sub<T> for MathsObject {
    type Output = Result<MathsObject, ConstructionError>;

    fn sub(self, rhs: T) -> Self::Output {
        let rhs: MathsObject = rhs.into();
        MathsObject::new_add(self, (-rhs)?)
    }
}

impl<T: Into<MathsObject>> Mul<T> for MathsObject {
    type Output = Result<MathsObject, ConstructionError>;

    fn mul(self, rhs: T) -> Self::Output {
        MathsObject::new_mul(self, rhs)
    }
}

impl<T: Into<MathsObject>> Div<T> for MathsObject {
    type Output = Result<MathsObject, ConstructionError>;

    fn div(self, rhs: T) -> Self::Output {
        MathsObject::new_fraction(self, rhs)
    }
}

/// Negation multiplies by `-1`. The sign of an integer is flipped directly, and `-(-1 \cdot x)`
/// gives back `x`.
impl Neg for MathsObject {
    type Output = Result<MathsObject, ConstructionError>;

    fn neg(self) -> Self::Output {
        match &self.kind {
            ObjectKind::Integer(n) => Ok(MathsObject::integer(-n.clone())),
            ObjectKind::Mul(left, right) if left.is_integer(-1) => Ok((**right).clone()),
            _ => MathsObject::new_mul(-1, self),
        }
    }
}

impl MathsObject {
    /// `self^{exp}`.
    pub fn pow(self, exp: impl Into<MathsObject>) -> Result<MathsObject, ConstructionError> {
        MathsObject::new_pow(self, exp)
    }

    /// `self = other`.
    pub fn equals(self, other: impl Into<MathsObject>) -> Result<MathsObject, ConstructionError> {
        MathsObject::new_equality(self, other)
    }

    /// `self > other`.
    pub fn greater_than(self, other: impl Into<MathsObject>) -> Result<MathsObject, ConstructionError> {
        MathsObject::new_greater_than(self, other)
    }

    /// `self < other`, stored as `other > self`.
    pub fn less_than(self, other: impl Into<MathsObject>) -> Result<MathsObject, ConstructionError> {
        MathsObject::new_greater_than(other, self)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::rat;
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    #[test]
    fn builders_do_not_simplify() {
        let sum = (x() + 0).unwrap();
        assert_eq!(sum.kind(), &ObjectKind::Add(Box::new(x()), Box::new(MathsObject::integer(0))));
    }

    #[test]
    fn negation() {
        assert_eq!((-MathsObject::integer(5)).unwrap(), MathsObject::integer(-5));

        let negated = (-x()).unwrap();
        assert_eq!(negated, MathsObject::new_mul(-1, x()).unwrap());
        assert_eq!((-negated).unwrap(), x());
    }

    #[test]
    fn subtraction_adds_the_opposite() {
        let difference = (x() - 3).unwrap();
        assert_eq!(difference, MathsObject::new_add(x(), -3).unwrap());
        assert_eq!(difference.value().unwrap().coeff("x", 0).as_constant(), Some(rat(-3)));
    }

    #[test]
    fn less_than_swaps_operands() {
        let relation = x().less_than(2).unwrap();
        assert_eq!(relation, MathsObject::integer(2).greater_than(x()).unwrap());
    }

    #[test]
    fn division_by_zero_fails() {
        assert_eq!(x() / 0, Err(ConstructionError::InvalidDenominator));
    }
}
