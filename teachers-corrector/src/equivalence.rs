//! Value comparison of two expressions.

use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::HashMap;
use teachers_maths::{
    backend::{BackendExpr, Poly, RelationKind},
    MathsObject,
};
use tracing::trace;
use crate::config::CorrectionConfig;

/// Sample points are drawn from `[-SAMPLE_RANGE, SAMPLE_RANGE]`.
const SAMPLE_RANGE: f64 = 10.0;

/// Compares two values by evaluating them at random points.
///
/// Points at which either value cannot be evaluated, such as a pole of a fraction, are skipped.
/// The values are equivalent if they are close at every remaining point, and at least one point
/// remains.
fn numerically_equivalent(left: &Poly, right: &Poly, config: &CorrectionConfig) -> bool {
    let mut symbols = left.free_symbols();
    symbols.extend(right.free_symbols());
    let rounds = if symbols.is_empty() { 1 } else { config.samples };

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut compared = 0;
    for _ in 0..rounds {
        let bindings = symbols.iter()
            .map(|symbol| (symbol.clone(), rng.gen_range(-SAMPLE_RANGE..=SAMPLE_RANGE)))
            .collect::<HashMap<_, _>>();
        match (left.eval_float(&bindings), right.eval_float(&bindings)) {
            (Ok(a), Ok(b)) => {
                if !config.close(a, b) {
                    trace!(target: "correct", a, b, "values differ at a sample point");
                    return false;
                }
                compared += 1;
            },
            (a, b) => trace!(target: "correct", ?a, ?b, "skipped a sample point"),
        }
    }
    compared > 0
}

/// Compares two values exactly, then numerically if either is inexact.
///
/// Identical values are equivalent even when their difference is undefined, as with `\infty`.
/// An undefined value is never equivalent to anything.
fn values_equivalent(left: &Poly, right: &Poly, config: &CorrectionConfig) -> bool {
    if left.is_undefined() || right.is_undefined() {
        return false;
    }
    if left.terms().eq(right.terms()) || (left - right).is_zero() {
        return true;
    }
    (left.is_inexact() || right.is_inexact()) && numerically_equivalent(left, right, config)
}

fn backends_equivalent(left: &BackendExpr, right: &BackendExpr, config: &CorrectionConfig) -> bool {
    match (left, right) {
        (BackendExpr::Value(a), BackendExpr::Value(b)) => values_equivalent(a, b, config),
        (BackendExpr::Function(a), BackendExpr::Function(b)) => a == b,
        (BackendExpr::Relation(kind, l1, r1), BackendExpr::Relation(other, l2, r2)) => {
            if kind != other {
                return false;
            }
            let first = l1 - r1;
            let second = l2 - r2;
            values_equivalent(&first, &second, config)
                || (*kind == RelationKind::Eq && values_equivalent(&first, &-&second, config))
        },
        (
            BackendExpr::Interval { left: l1, right: r1, left_open: lo1, right_open: ro1, empty: e1 },
            BackendExpr::Interval { left: l2, right: r2, left_open: lo2, right_open: ro2, empty: e2 },
        ) => {
            if *e1 || *e2 {
                return e1 == e2;
            }
            lo1 == lo2 && ro1 == ro2
                && values_equivalent(l1, l2, config)
                && values_equivalent(r1, r2, config)
        },
        (BackendExpr::Tuple(a), BackendExpr::Tuple(b)) => a.len() == b.len()
            && a.iter().zip(b).all(|(a, b)| backends_equivalent(a, b, config)),
        _ => false,
    }
}

/// Returns true if two expressions have the same value.
///
/// - Values are equivalent if their difference is zero. If a decimal number took part in
///   either value, they are also equivalent if they are close at [`CorrectionConfig::samples`]
///   random points.
/// - Relations are equivalent if they have the same kind, and the differences between their two
///   sides are equivalent. An equation may also have its sides swapped.
/// - Intervals are equivalent if they are both empty, or have equivalent bounds and the same
///   open ends.
/// - Tuples are compared element by element, and functions by name.
///
/// Expressions of different kinds are never equivalent.
pub fn equivalent(left: &MathsObject, right: &MathsObject, config: &CorrectionConfig) -> bool {
    backends_equivalent(left.backend(), right.backend(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    fn check(left: &MathsObject, right: &MathsObject) -> bool {
        equivalent(left, right, &CorrectionConfig::default())
    }

    #[test]
    fn exact_values() {
        assert!(check(&MathsObject::new_fraction(6, 8).unwrap(), &MathsObject::new_fraction(3, 4).unwrap()));
        assert!(!check(&MathsObject::new_fraction(1, 2).unwrap(), &MathsObject::new_fraction(3, 4).unwrap()));

        let square = MathsObject::new_pow((x() + 1).unwrap(), 2).unwrap();
        let expanded = MathsObject::new_add(
            MathsObject::new_add(x().pow(2).unwrap(), MathsObject::new_mul(2, x()).unwrap()).unwrap(),
            1,
        ).unwrap();
        assert!(check(&square, &expanded));
        assert!(!check(&square, &x().pow(2).unwrap()));
    }

    #[test]
    fn rational_expressions() {
        let sum = MathsObject::new_add(
            MathsObject::new_fraction(1, x()).unwrap(),
            MathsObject::new_fraction(1, MathsObject::new_mul(2, x()).unwrap()).unwrap(),
        ).unwrap();
        let expected = MathsObject::new_fraction(3, MathsObject::new_mul(2, x()).unwrap()).unwrap();
        assert!(check(&sum, &expected));
    }

    #[test]
    fn decimal_values() {
        assert!(check(&MathsObject::decimal(0.75).unwrap(), &MathsObject::new_fraction(3, 4).unwrap()));
        assert!(!check(&MathsObject::decimal(0.33).unwrap(), &MathsObject::new_fraction(1, 3).unwrap()));

        let close = MathsObject::new_mul(MathsObject::decimal(1.0000000001).unwrap(), x()).unwrap();
        assert!(check(&close, &x()));

        let far = MathsObject::new_mul(MathsObject::decimal(1.001).unwrap(), x()).unwrap();
        assert!(!check(&far, &x()));
    }

    #[test]
    fn relations() {
        let equation = MathsObject::new_equality(x(), 5).unwrap();
        assert!(check(&equation, &MathsObject::new_equality(5, x()).unwrap()));
        assert!(check(&equation, &MathsObject::new_equality((x() - 5).unwrap(), 0).unwrap()));
        assert!(!check(&equation, &MathsObject::new_greater_than(x(), 5).unwrap()));

        let inequality = MathsObject::new_greater_than(x(), 5).unwrap();
        assert!(check(&inequality, &MathsObject::integer(5).less_than(x()).unwrap()));
        assert!(!check(&inequality, &MathsObject::new_greater_than(5, x()).unwrap()));
    }

    #[test]
    fn intervals() {
        let interval = MathsObject::new_interval(0, 5, false, true).unwrap();
        let same = MathsObject::new_interval(MathsObject::new_fraction(0, 3).unwrap(), 5, false, true).unwrap();
        assert!(check(&interval, &same));
        assert!(!check(&interval, &MathsObject::new_interval(0, 5, true, true).unwrap()));

        let empty = MathsObject::new_interval(5, 0, false, false).unwrap();
        let other_empty = MathsObject::new_interval(1, 1, true, false).unwrap();
        assert!(check(&empty, &other_empty));
        assert!(!check(&empty, &interval));
    }

    #[test]
    fn tuples_and_kinds() {
        let pair = MathsObject::new_collection(vec![MathsObject::integer(1), MathsObject::new_fraction(4, 2).unwrap()]).unwrap();
        let expected = MathsObject::new_collection(vec![MathsObject::integer(1), MathsObject::integer(2)]).unwrap();
        assert!(check(&pair, &expected));

        let swapped = MathsObject::new_collection(vec![MathsObject::integer(2), MathsObject::integer(1)]).unwrap();
        assert!(!check(&pair, &swapped));

        assert!(!check(&MathsObject::integer(5), &MathsObject::new_equality(x(), 5).unwrap()));
        assert!(check(&MathsObject::function("f"), &MathsObject::function("f")));
    }
}
