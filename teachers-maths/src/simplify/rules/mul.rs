//! Simplification rules for products.
//!
//! Numeric coefficients are moved to the left of a product and merged, so that `x \cdot 2 \cdot 3`
//! becomes `6x`. Products of sums are multiplied out term by term.

use crate::{
    backend::Poly,
    object::{MathsObject, ObjectKind},
    simplify::{step::Step, step_collector::StepCollector},
};
use super::{build, numeric_op, pair};

/// `left * right`, without simplification.
fn product(left: &MathsObject, right: &MathsObject) -> Option<MathsObject> {
    MathsObject::new_mul(left.clone(), right.clone()).ok()
}

/// `0*a = 0`
/// `a*0 = 0`
///
/// Does not apply when `a` is unbounded, since `0 \cdot \infty` is undefined.
pub fn multiply_zero(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let other = if left.is_integer(0) {
        right
    } else if right.is_integer(0) {
        left
    } else {
        return None;
    };
    if other.value().is_some_and(Poly::is_unbounded) {
        return None;
    }

    step_collector.push(Step::MultiplyZero);
    Some(MathsObject::integer(0))
}

/// `1*a = a`
/// `a*1 = a`
pub fn multiply_one(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let opt = if left.is_integer(1) {
        right.clone()
    } else if right.is_integer(1) {
        left.clone()
    } else {
        return None;
    };

    step_collector.push(Step::MultiplyOne);
    Some(opt)
}

/// `2*\dfrac{3}{4} = \dfrac{3}{2}`
pub fn multiply_numbers(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let opt = numeric_op(left, right, |a, b| Some(a * b))?;
    step_collector.push(Step::MultiplyNumbers);
    Some(opt)
}

/// `2*(3*a) = 6*a`
/// `(3*a)*2 = 6*a`
pub fn combine_coefficients(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let (coefficient, rest) = match (left.kind(), right.kind()) {
        (_, ObjectKind::Mul(inner, rest)) if left.is_numeric() && inner.is_numeric() => {
            (numeric_op(left, inner, |a, b| Some(a * b))?, rest)
        },
        (ObjectKind::Mul(inner, rest), _) if right.is_numeric() && inner.is_numeric() => {
            (numeric_op(inner, right, |a, b| Some(a * b))?, rest)
        },
        _ => return None,
    };

    let opt = build(ObjectKind::Mul(Box::new(coefficient), rest.clone()))?;
    step_collector.push(Step::CombineCoefficients);
    Some(opt)
}

/// `(a+b)*(c+d) = a*c + a*d + b*c + b*d`
pub fn foil(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let (ObjectKind::Add(a, b), ObjectKind::Add(c, d)) = (left.kind(), right.kind()) else {
        return None;
    };

    let first = MathsObject::new_add(product(a, c)?, product(a, d)?).ok()?;
    let second = MathsObject::new_add(product(b, c)?, product(b, d)?).ok()?;
    let opt = MathsObject::new_add(first, second).ok()?;
    step_collector.push(Step::Foil);
    Some(opt)
}

/// Keeps `2x`, `2\pi`, `2f(x)`, `2x^{2}` and `2 \dfrac{x}{3}` as written.
pub fn keep_coefficient(
    left: &MathsObject,
    right: &MathsObject,
    _: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !left.is_numeric() {
        return None;
    }

    let keep = match right.kind() {
        ObjectKind::Symbol(_) | ObjectKind::Pi | ObjectKind::Image { .. } | ObjectKind::Pow(..) => true,
        ObjectKind::Fraction(..) => !right.is_numeric(),
        _ => false,
    };
    if keep {
        let (left, right) = pair(left, right);
        build(ObjectKind::Mul(left, right))
    } else {
        None
    }
}

/// `a*2 = 2*a`
pub fn coefficient_first(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if left.is_numeric() || !right.is_numeric() {
        return None;
    }

    let opt = product(right, left)?;
    step_collector.push(Step::CoefficientFirst);
    Some(opt)
}

/// Keeps products of two distinct symbols, and `\pi` times a power, as written.
pub fn keep_factors(
    left: &MathsObject,
    right: &MathsObject,
    _: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let keep = match (left.kind(), right.kind()) {
        (ObjectKind::Symbol(a), ObjectKind::Symbol(b)) => a != b,
        (ObjectKind::Pi, ObjectKind::Pow(..)) | (ObjectKind::Pow(..), ObjectKind::Pi) => true,
        _ => false,
    };
    if keep {
        let (left, right) = pair(left, right);
        build(ObjectKind::Mul(left, right))
    } else {
        None
    }
}

/// Applies all multiplication rules.
pub fn all(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    multiply_zero(left, right, step_collector)
        .or_else(|| multiply_one(left, right, step_collector))
        .or_else(|| multiply_numbers(left, right, step_collector))
        .or_else(|| combine_coefficients(left, right, step_collector))
        .or_else(|| foil(left, right, step_collector))
        .or_else(|| keep_coefficient(left, right, step_collector))
        .or_else(|| coefficient_first(left, right, step_collector))
        .or_else(|| keep_factors(left, right, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    #[test]
    fn identities() {
        let mut steps = Vec::new();
        assert_eq!(all(&x(), &MathsObject::integer(0), &mut steps), Some(MathsObject::integer(0)));
        assert_eq!(all(&MathsObject::integer(1), &x(), &mut steps), Some(x()));
        assert_eq!(steps, vec![Step::MultiplyZero, Step::MultiplyOne]);
    }

    #[test]
    fn zero_times_infinity_is_not_zero() {
        let mut steps = Vec::new();
        let zero = MathsObject::integer(0);
        assert_eq!(multiply_zero(&zero, &MathsObject::inf(), &mut steps), None);
        assert_eq!(multiply_zero(&MathsObject::inf(), &zero, &mut steps), None);
        assert!(steps.is_empty());

        let product = MathsObject::new_mul(0, MathsObject::inf()).unwrap();
        assert!(product.value().unwrap().is_undefined());
        assert_ne!(product.simplified(), zero);
    }

    #[test]
    fn coefficients() {
        let mut steps = Vec::new();
        let three_x = MathsObject::new_mul(3, x()).unwrap();
        assert_eq!(
            all(&MathsObject::integer(2), &three_x, &mut steps),
            Some(MathsObject::new_mul(6, x()).unwrap()),
        );
        assert_eq!(
            all(&x(), &MathsObject::integer(2), &mut steps),
            Some(MathsObject::new_mul(2, x()).unwrap()),
        );
        assert_eq!(steps, vec![Step::CombineCoefficients, Step::CoefficientFirst]);
    }

    #[test]
    fn foil_keeps_every_product() {
        let mut steps = Vec::new();
        let sum = |a: i32| MathsObject::new_add(x(), a).unwrap();
        let product = all(&sum(1), &sum(2), &mut steps).unwrap();
        assert_eq!(steps, vec![Step::Foil]);

        let ObjectKind::Add(first, second) = product.kind() else {
            panic!("expected a sum, found {}", product);
        };
        assert_eq!(**first, MathsObject::new_add(
            MathsObject::new_mul(x(), x()).unwrap(),
            MathsObject::new_mul(x(), 2).unwrap(),
        ).unwrap());
        assert_eq!(**second, MathsObject::new_add(
            MathsObject::new_mul(1, x()).unwrap(),
            MathsObject::new_mul(1, 2).unwrap(),
        ).unwrap());
        assert_eq!(product.value(), (sum(1) * sum(2)).unwrap().value());
    }

    #[test]
    fn kept_products() {
        let mut steps = Vec::new();
        for right in [x(), MathsObject::pi(), MathsObject::new_pow(x(), 2).unwrap()] {
            let kept = MathsObject::new_mul(5, right.clone()).unwrap();
            assert_eq!(all(&MathsObject::integer(5), &right, &mut steps), Some(kept));
        }
        assert!(steps.is_empty());

        assert_eq!(all(&x(), &x(), &mut steps), None);
    }
}
