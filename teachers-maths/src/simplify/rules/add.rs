//! Simplification rules for sums.

use crate::{
    object::{MathsObject, ObjectKind},
    simplify::{step::Step, step_collector::StepCollector},
};
use super::{build, numeric_op, pair};

/// `0+a = a`
/// `a+0 = a`
pub fn add_zero(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let opt = if left.is_integer(0) {
        right.clone()
    } else if right.is_integer(0) {
        left.clone()
    } else {
        return None;
    };

    step_collector.push(Step::AddZero);
    Some(opt)
}

/// `\dfrac{1}{2}+3 = \dfrac{7}{2}`
pub fn add_numbers(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let opt = numeric_op(left, right, |a, b| Some(a + b))?;
    step_collector.push(Step::AddNumbers);
    Some(opt)
}

/// Keeps a number added to a symbol or to `\pi` in its written order.
pub fn keep_constant_term(
    left: &MathsObject,
    right: &MathsObject,
    _: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    let is_atom = |object: &MathsObject| matches!(object.kind(), ObjectKind::Symbol(_) | ObjectKind::Pi);
    if (is_atom(left) && right.is_numeric()) || (left.is_numeric() && is_atom(right)) {
        let (left, right) = pair(left, right);
        build(ObjectKind::Add(left, right))
    } else {
        None
    }
}

/// Applies all addition rules.
pub fn all(
    left: &MathsObject,
    right: &MathsObject,
    step_collector: &mut dyn StepCollector<Step>,
) -> Option<MathsObject> {
    add_zero(left, right, step_collector)
        .or_else(|| add_numbers(left, right, step_collector))
        .or_else(|| keep_constant_term(left, right, step_collector))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn zero_is_dropped() {
        let mut steps = Vec::new();
        let x = MathsObject::symbol("x");
        assert_eq!(all(&x, &MathsObject::integer(0), &mut steps), Some(x.clone()));
        assert_eq!(all(&MathsObject::integer(0), &x, &mut steps), Some(x));
        assert_eq!(steps, vec![Step::AddZero, Step::AddZero]);
    }

    #[test]
    fn numbers_are_added_exactly() {
        let mut steps = Vec::new();
        let half = MathsObject::new_fraction(1, 2).unwrap();
        assert_eq!(
            all(&half, &MathsObject::integer(3), &mut steps),
            Some(MathsObject::new_fraction(7, 2).unwrap()),
        );
        assert_eq!(all(&half, &half, &mut steps), Some(MathsObject::integer(1)));
        assert_eq!(steps, vec![Step::AddNumbers, Step::AddNumbers]);
    }

    #[test]
    fn constant_terms_keep_their_order() {
        let mut steps = Vec::new();
        let sum = all(&MathsObject::integer(3), &MathsObject::pi(), &mut steps).unwrap();
        assert_eq!(sum, MathsObject::new_add(3, MathsObject::pi()).unwrap());
        assert!(steps.is_empty());

        let x = MathsObject::symbol("x");
        assert_eq!(all(&x, &x, &mut steps), None);
    }
}
