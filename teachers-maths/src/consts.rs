//! Constants used when evaluating expressions. Each static is a [`Float`] computed once at
//! [`PRECISION`](crate::primitive::PRECISION) bits.

use once_cell::sync::Lazy;
use rug::Float;
use super::primitive::float;

pub static ZERO: Lazy<Float> = Lazy::new(|| float(0));

pub static PI: Lazy<Float> = Lazy::new(|| float(-1).acos());

/// Positive infinity, the value of `\infty`.
pub static INFINITY: Lazy<Float> = Lazy::new(|| float(rug::float::Special::Infinity));

/// The value of an indeterminate form, such as `\infty - \infty`.
pub static NAN: Lazy<Float> = Lazy::new(|| float(rug::float::Special::Nan));
