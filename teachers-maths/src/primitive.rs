//! Functions to construct [`Integer`]s, [`Rational`]s and [`Float`]s from various types.

use rug::{Assign, Float, Integer, Rational};

/// The number of bits of precision to use when evaluating expressions numerically.
pub const PRECISION: u32 = 1 << 9;

/// Creates an [`Integer`] with the given value.
pub fn int<T>(n: T) -> Integer
where
    Integer: From<T>,
{
    Integer::from(n)
}

/// Creates a [`Rational`] with the given value.
pub fn rat<T>(n: T) -> Rational
where
    Rational: From<T>,
{
    Rational::from(n)
}

/// Creates a [`Float`] with the given value.
pub fn float<T>(n: T) -> Float
where
    Float: Assign<T>,
{
    Float::with_val(PRECISION, n)
}

/// Returns true if the rational number has no fractional part.
pub fn is_integral(r: &Rational) -> bool {
    *r.denom() == 1
}

/// Parses a decimal number written with `.` as the separator, such as `3.14`, into the exact
/// [`Rational`] it denotes.
///
/// Returns [`None`] if the string is not made of ASCII digits with at most one separator.
pub fn rat_from_decimal_str(s: &str) -> Option<Rational> {
    let (whole, frac) = s.split_once('.').unwrap_or((s, ""));
    if whole.is_empty() && frac.is_empty()
        || !whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let digits = format!("{}{}", whole, frac);
    let numerator = Integer::from_str_radix(&digits, 10).ok()?;
    let denominator = Integer::from(Integer::u_pow_u(10, frac.len() as u32));
    Some(Rational::from((numerator, denominator)))
}
