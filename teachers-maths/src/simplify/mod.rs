//! Module to simplify expressions.
//!
//! Simplification rewrites a tree bottom-up: the operands of a node are simplified first, then
//! the rules of the node's variant are tried on the simplified operands (see [`rules`]). When no
//! rule applies, the backend expands the node and the canonical result is lifted back into a
//! node. Passes are repeated until the tree stops changing, so simplifying a simplified
//! expression gives it back unchanged.
//!
//! Every rewrite preserves the value of the expression.
//!
//! ```
//! use teachers_maths::MathsObject;
//!
//! let expr = MathsObject::new_fraction(6, 8).unwrap();
//! assert_eq!(expr.simplified(), MathsObject::new_fraction(3, 4).unwrap());
//! ```

pub mod rules;
pub mod step;
pub mod step_collector;

use tracing::{debug, trace, warn};
use crate::{
    object::{MathsObject, ObjectKind},
    primitive::is_integral,
};
use step::Step;
use step_collector::StepCollector;

/// The maximum number of passes before simplification gives up on reaching a fixed point.
const MAX_PASSES: usize = 64;

/// Rebuilds a node from simplified operands, keeping `original` if the node cannot be built.
fn rebuild(original: &MathsObject, kind: ObjectKind) -> MathsObject {
    MathsObject::from_kind(kind).unwrap_or_else(|err| {
        warn!(target: "simplify", node = %original, error = %err, "cannot rebuild node");
        original.clone()
    })
}

/// [`simplify_once`], boxed for use as an operand.
fn boxed(object: &MathsObject, step_collector: &mut dyn StepCollector<Step>) -> Box<MathsObject> {
    Box::new(simplify_once(object, step_collector))
}

/// One bottom-up pass over the tree.
fn simplify_once(expr: &MathsObject, step_collector: &mut dyn StepCollector<Step>) -> MathsObject {
    match expr.kind() {
        ObjectKind::Integer(_)
            | ObjectKind::Symbol(_)
            | ObjectKind::Inf
            | ObjectKind::Pi
            | ObjectKind::Function(_) => expr.clone(),
        ObjectKind::Decimal(value) => {
            if is_integral(value) {
                step_collector.push(Step::DecimalToInteger);
                MathsObject::integer(value.numer().clone())
            } else {
                expr.clone()
            }
        },
        ObjectKind::Add(left, right) => {
            let kind = ObjectKind::Add(boxed(left, step_collector), boxed(right, step_collector));
            rules::apply(expr, kind, step_collector)
        },
        ObjectKind::Mul(left, right) => {
            let kind = ObjectKind::Mul(boxed(left, step_collector), boxed(right, step_collector));
            rules::apply(expr, kind, step_collector)
        },
        ObjectKind::Pow(base, exp) => {
            let kind = ObjectKind::Pow(boxed(base, step_collector), boxed(exp, step_collector));
            rules::apply(expr, kind, step_collector)
        },
        ObjectKind::Fraction(numerator, denominator) => {
            let kind = ObjectKind::Fraction(boxed(numerator, step_collector), boxed(denominator, step_collector));
            rules::apply(expr, kind, step_collector)
        },
        ObjectKind::Equality(left, right) => {
            let kind = ObjectKind::Equality(boxed(left, step_collector), boxed(right, step_collector));
            rebuild(expr, kind)
        },
        ObjectKind::StrictGreaterThan(left, right) => {
            let kind = ObjectKind::StrictGreaterThan(boxed(left, step_collector), boxed(right, step_collector));
            rebuild(expr, kind)
        },
        ObjectKind::Interval { left, right, left_open, right_open } => {
            let kind = ObjectKind::Interval {
                left: boxed(left, step_collector),
                right: boxed(right, step_collector),
                left_open: *left_open,
                right_open: *right_open,
            };
            rebuild(expr, kind)
        },
        ObjectKind::Collection(elements) => {
            let kind = ObjectKind::Collection(
                elements.iter().map(|element| simplify_once(element, step_collector)).collect(),
            );
            rebuild(expr, kind)
        },
        ObjectKind::Image { function, argument } => {
            let kind = ObjectKind::Image {
                function: function.clone(),
                argument: boxed(argument, step_collector),
            };
            rebuild(expr, kind)
        },
    }
}

impl MathsObject {
    /// Returns the simplified form of the expression.
    ///
    /// The result has the same value as `self`, and simplifying it again returns it unchanged.
    pub fn simplified(&self) -> MathsObject {
        self.simplified_with(&mut ())
    }

    /// Returns the simplified form of the expression, reporting every rewrite to the given
    /// [`StepCollector`].
    pub fn simplified_with(&self, step_collector: &mut dyn StepCollector<Step>) -> MathsObject {
        let mut current = self.clone();
        for pass in 1..=MAX_PASSES {
            let next = simplify_once(&current, step_collector);
            trace!(target: "simplify", pass, node = %next, "pass done");
            if next == current {
                debug!(target: "simplify", input = %self, output = %next, passes = pass, "simplified");
                return next;
            }
            current = next;
        }

        warn!(target: "simplify", input = %self, output = %current, "no fixed point after {} passes", MAX_PASSES);
        current
    }

    /// Returns the simplified form of the expression along with the rewrites that produced it.
    pub fn simplified_with_steps(&self) -> (MathsObject, Vec<Step>) {
        let mut steps = Vec::new();
        let simplified = self.simplified_with(&mut steps);
        (simplified, steps)
    }
}
