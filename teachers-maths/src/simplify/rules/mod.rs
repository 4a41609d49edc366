//! Implementation of the simplification rules.
//!
//! Rules are grouped by the binary variant they rewrite. Each rule takes the already simplified
//! operands of a node and returns `Some(node)` if the rule applies, or `None` if it does not. A
//! rule may also return the node unchanged, which keeps it in its written form: `3 + x` stays as
//! it is instead of being reordered by the backend.
//!
//! When no rule of a variant applies, the node is handed to the [`fallback`], which expands it
//! with the backend and lifts the canonical result back into a node.

pub mod add;
pub mod fraction;
pub mod mul;
pub mod pow;

use rug::Rational;
use tracing::warn;
use crate::{
    error::SimplificationFailure,
    lift::lift,
    object::{MathsObject, Numeric, ObjectKind},
};
use super::{step::Step, step_collector::StepCollector};

/// Builds a node for a rule. A node that cannot be built means the rule does not apply.
pub(crate) fn build(kind: ObjectKind) -> Option<MathsObject> {
    MathsObject::from_kind(kind).ok()
}

/// Boxes a pair of operands.
pub(crate) fn pair(left: &MathsObject, right: &MathsObject) -> (Box<MathsObject>, Box<MathsObject>) {
    (Box::new(left.clone()), Box::new(right.clone()))
}

/// Combines two numeric nodes into the most specific numeric node. Returns `None` if either
/// operand is not numeric, or if `op` returns `None`.
pub(crate) fn numeric_op<F>(left: &MathsObject, right: &MathsObject, op: F) -> Option<MathsObject>
where
    F: FnOnce(Rational, Rational) -> Option<Rational>,
{
    let left = left.as_numeric()?;
    let right = right.as_numeric()?;
    let value = op(left.value, right.value)?;
    Some(MathsObject::from_numeric(Numeric { value, inexact: left.inexact || right.inexact }))
}

/// Applies the rules of the node's variant, then the fallback if none of them apply.
///
/// `kind` holds the simplified operands, and `original` is the node before its operands were
/// simplified.
pub(crate) fn apply(
    original: &MathsObject,
    kind: ObjectKind,
    step_collector: &mut dyn StepCollector<Step>,
) -> MathsObject {
    let rewritten = match &kind {
        ObjectKind::Add(left, right) => add::all(left, right, step_collector),
        ObjectKind::Mul(left, right) => mul::all(left, right, step_collector),
        ObjectKind::Pow(base, exp) => pow::all(base, exp, step_collector),
        ObjectKind::Fraction(numerator, denominator) => fraction::all(numerator, denominator, step_collector),
        _ => None,
    };

    rewritten.unwrap_or_else(|| fallback(original, kind, step_collector))
}

/// Rebuilds the node, expands its backend value and lifts the result.
///
/// The fallback never fails. If the node cannot be rebuilt, `original` is returned, and if the
/// expanded value cannot be lifted, the rebuilt node is returned.
pub(crate) fn fallback(
    original: &MathsObject,
    kind: ObjectKind,
    step_collector: &mut dyn StepCollector<Step>,
) -> MathsObject {
    let rebuilt = match MathsObject::from_kind(kind) {
        Ok(rebuilt) => rebuilt,
        Err(err) => {
            warn!(target: "simplify", node = %original, error = %SimplificationFailure::from(err), "fallback failed");
            return original.clone();
        },
    };

    match lift(&rebuilt.backend().expand()) {
        Ok(lifted) => {
            if lifted != rebuilt {
                step_collector.push(Step::Fallback);
            }
            lifted
        },
        Err(err) => {
            warn!(target: "simplify", node = %rebuilt, error = %SimplificationFailure::from(err), "fallback failed");
            rebuilt
        },
    }
}
