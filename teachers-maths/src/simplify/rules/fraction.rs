//! Simplification rules for fractions.
//!
//! Numeric fractions are reduced to lowest terms with a positive denominator. Fractions of other
//! nodes are kept as written when they are already reduced, so that `\dfrac{x}{2}` is not turned
//! into `\dfrac{1}{2}x`.

use rug::Integer;
use crate::{
    backend::gcd,
    object::{MathsObject, ObjectKind},
    simplify::{step::Step, step_collector::StepCollector},
};
use super::{build, numeric_op, pair};

/// `\dfrac{a}{1} = a`
pub fn divide_one(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !denominator.is_integer(1) {
        return None;
    }

    step_collector.push(Step::DivideOne);
    Some(numerator.clone())
}

/// `\dfrac{a}{-1} = -a`
pub fn divide_minus_one(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !denominator.is_integer(-1) {
        return None;
    }

    let opt = (-numerator.clone()).ok()?;
    step_collector.push(Step::DivideMinusOne);
    Some(opt)
}

/// `\dfrac{0}{a} = 0`
pub fn zero_numerator(
    numerator: &MathsObject,
    _: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !numerator.is_integer(0) {
        return None;
    }

    step_collector.push(Step::ZeroNumerator);
    Some(MathsObject::integer(0))
}

/// `\dfrac{a}{a} = 1`
pub fn divide_self(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if numerator != denominator {
        return None;
    }

    step_collector.push(Step::DivideSelf);
    Some(MathsObject::integer(1))
}

/// `\dfrac{6}{8} = \dfrac{3}{4}`
/// `\dfrac{8}{4} = 2`
/// `\dfrac{3}{-4} = \dfrac{-3}{4}`
///
/// A fraction that is already in lowest terms is returned unchanged.
pub fn reduce_numbers(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let opt = numeric_op(numerator, denominator, |a, b| {
        if b.cmp0().is_eq() {
            None
        } else {
            Some(a / b)
        }
    })?;

    let (numerator, denominator) = pair(numerator, denominator);
    if opt.kind() != &ObjectKind::Fraction(numerator, denominator) {
        step_collector.push(Step::ReduceFraction);
    }
    Some(opt)
}

/// `\dfrac{a}{-2} = \dfrac{-a}{2}`
pub fn negative_denominator(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let q = denominator.as_integer().filter(|q| q.cmp0().is_lt())?;
    let opt = MathsObject::new_fraction((-numerator.clone()).ok()?, MathsObject::integer(-q.clone())).ok()?;
    step_collector.push(Step::NegativeDenominator);
    Some(opt)
}

/// The integer coefficient of a node: `n` for `n` and `n \cdot x`, and `1` otherwise.
fn integer_coefficient(object: &MathsObject) -> Integer {
    let n = match object.kind() {
        ObjectKind::Integer(n) => n,
        ObjectKind::Mul(left, _) => match left.as_integer() {
            Some(n) => n,
            None => return Integer::from(1),
        },
        _ => return Integer::from(1),
    };
    n.clone().abs()
}

/// Keeps a fraction with no sum or nested fraction in it as written, unless its integer
/// coefficients share a factor. A denominator that is a number must be an integer.
pub fn keep_reduced(
    numerator: &MathsObject,
    denominator: &MathsObject,
    _: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let is_compound = |object: &MathsObject| matches!(object.kind(), ObjectKind::Add(..) | ObjectKind::Fraction(..));
    if is_compound(numerator) || is_compound(denominator) {
        return None;
    }
    if denominator.is_numeric() && (numerator.is_numeric() || denominator.as_integer().is_none()) {
        return None;
    }
    if gcd(&integer_coefficient(numerator), &integer_coefficient(denominator)) != 1 {
        return None;
    }

    let (numerator, denominator) = pair(numerator, denominator);
    build(ObjectKind::Fraction(numerator, denominator))
}

/// Applies all fraction rules.
pub fn all(
    numerator: &MathsObject,
    denominator: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    divide_one(numerator, denominator, step_collector)
        .or_else(|| divide_minus_one(numerator, denominator, step_collector))
        .or_else(|| zero_numerator(numerator, denominator, step_collector))
        .or_else(|| divide_self(numerator, denominator, step_collector))
        .or_else(|| reduce_numbers(numerator, denominator, step_collector))
        .or_else(|| negative_denominator(numerator, denominator, step_collector))
        .or_else(|| keep_reduced(numerator, denominator, step_collector))
}
