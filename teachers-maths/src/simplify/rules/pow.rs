//! Simplification rules for powers.

use crate::object::{MathsObject, Numeric, ObjectKind};
use crate::simplify::{step::Step, step_collector::StepCollector};
use super::{build, pair};

/// `a^0 = 1`
pub fn power_zero(
    _: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !exp.is_integer(0) {
        return None;
    }

    step_collector.push(Step::PowerZero);
    Some(MathsObject::integer(1))
}

/// `a^1 = a`
pub fn power_one(
    base: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !exp.is_integer(1) {
        return None;
    }

    step_collector.push(Step::PowerOne);
    Some(base.clone())
}

/// `2^{3} = 8`
/// `2^{-3} = \dfrac{1}{8}`
/// `8^{\frac{1}{3}} = 2`
///
/// Applies to numeric bases with numeric exponents whose value is a rational number. Powers with
/// an irrational value, such as `2^{\frac{1}{2}}`, are left to the other rules.
pub fn power_numbers(
    base: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    if !base.is_numeric() || !exp.is_numeric() {
        return None;
    }

    let (base, exp) = pair(base, exp);
    let node = build(ObjectKind::Pow(base, exp))?;
    let value = node.value()?;
    let opt = MathsObject::from_numeric(Numeric {
        value: value.as_constant()?,
        inexact: value.is_inexact(),
    });
    step_collector.push(Step::PowerNumbers);
    Some(opt)
}

/// `a^{-1} = \dfrac{1}{a}`
/// `a^{-n} = \dfrac{1}{a^n}`
pub fn negative_exponent(
    base: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let exp = exp.as_numeric()?;
    if base.is_numeric() || !exp.value.cmp0().is_lt() {
        return None;
    }

    let positive = MathsObject::from_numeric(Numeric { value: -exp.value, inexact: exp.inexact });
    let denominator = if positive.is_integer(1) {
        base.clone()
    } else {
        MathsObject::new_pow(base.clone(), positive).ok()?
    };
    let opt = MathsObject::new_fraction(1, denominator).ok()?;
    step_collector.push(Step::NegativeExponent);
    Some(opt)
}

/// `(a+b)^2 = a^2 + 2*a*b + b^2`
pub fn square_of_sum(
    base: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let ObjectKind::Add(a, b) = base.kind() else {
        return None;
    };
    if !exp.is_integer(2) {
        return None;
    }

    let a = (**a).clone();
    let b = (**b).clone();
    let double_product = MathsObject::new_mul(MathsObject::new_mul(2, a.clone()).ok()?, b.clone()).ok()?;
    let opt = MathsObject::new_add(
        MathsObject::new_add(a.pow(2).ok()?, double_product).ok()?,
        b.pow(2).ok()?,
    ).ok()?;
    step_collector.push(Step::SquareOfSum);
    Some(opt)
}

/// Keeps powers of symbols, of `\pi` and of function images, and roots of products, as written.
pub fn keep_power(
    base: &MathsObject,
    exp: &MathsObject,
    _: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let keep = match base.kind() {
        ObjectKind::Symbol(_) | ObjectKind::Pi | ObjectKind::Image { .. } => true,
        ObjectKind::Mul(..) => matches!(exp.kind(), ObjectKind::Fraction(..)),
        _ => false,
    };
    if keep {
        let (base, exp) = pair(base, exp);
        build(ObjectKind::Pow(base, exp))
    } else {
        None
    }
}

/// Applies all power rules.
pub fn all(
    base: &MathsObject,
    exp: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    power_zero(base, exp, step_collector)
        .or_else(|| power_one(base, exp, step_collector))
        .or_else(|| power_numbers(base, exp, step_collector))
        .or_else(|| negative_exponent(base, exp, step_collector))
        .or_else(|| square_of_sum(base, exp, step_collector))
        .or_else(|| keep_power(base, exp, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    fn fraction(p: i32, q: i32) -> MathsObject {
        MathsObject::new_fraction(p, q).unwrap()
    }

    #[test]
    fn numeric_powers() {
        let mut steps = Vec::new();
        let cases = [
            (MathsObject::integer(2), MathsObject::integer(10), MathsObject::integer(1024)),
            (MathsObject::integer(2), MathsObject::integer(-3), fraction(1, 8)),
            (MathsObject::integer(-2), MathsObject::integer(-3), fraction(-1, 8)),
            (MathsObject::integer(8), fraction(1, 3), MathsObject::integer(2)),
            (fraction(2, 3), MathsObject::integer(2), fraction(4, 9)),
            (MathsObject::decimal(0.5).unwrap(), MathsObject::integer(2), MathsObject::decimal(0.25).unwrap()),
        ];
        for (base, exp, expected) in cases {
            assert_eq!(all(&base, &exp, &mut steps), Some(expected));
        }
        assert!(steps.iter().all(|step| *step == Step::PowerNumbers));

        assert_eq!(all(&MathsObject::integer(2), &fraction(1, 2), &mut steps), None);
    }

    #[test]
    fn negative_exponents() {
        let mut steps = Vec::new();
        assert_eq!(
            all(&x(), &MathsObject::integer(-1), &mut steps),
            Some(MathsObject::new_fraction(1, x()).unwrap()),
        );
        assert_eq!(
            all(&x(), &MathsObject::integer(-2), &mut steps),
            Some(MathsObject::new_fraction(1, x().pow(2).unwrap()).unwrap()),
        );
        assert_eq!(steps, vec![Step::NegativeExponent, Step::NegativeExponent]);
    }

    #[test]
    fn square_of_sum() {
        let mut steps = Vec::new();
        let sum = MathsObject::new_add(x(), 3).unwrap();
        let square = all(&sum, &MathsObject::integer(2), &mut steps).unwrap();
        assert_eq!(steps, vec![Step::SquareOfSum]);
        assert_eq!(square.value(), sum.pow(2).unwrap().value());
    }

    #[test]
    fn kept_powers() {
        let mut steps = Vec::new();
        let square = MathsObject::new_pow(x(), 2).unwrap();
        assert_eq!(all(&x(), &MathsObject::integer(2), &mut steps), Some(square));
        assert!(steps.is_empty());

        let power_of_power = MathsObject::new_pow(x(), 2).unwrap();
        assert_eq!(all(&power_of_power, &MathsObject::integer(3), &mut steps), None);
    }
}
