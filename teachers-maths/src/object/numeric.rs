//! The numeric tower: integers, fractions of integers and decimals.

use rug::{ops::Pow, Integer, Rational};
use crate::{
    backend::{radical::factorize, BackendExpr, Poly},
    primitive::is_integral,
};
use super::{MathsObject, ObjectKind};

/// The value of a numeric node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Numeric {
    /// The exact value.
    pub value: Rational,

    /// True if a decimal took part in the value.
    pub inexact: bool,
}

impl Numeric {
    pub fn exact(value: Rational) -> Self {
        Self { value, inexact: false }
    }
}

impl MathsObject {
    /// Returns the value of the node if it is an integer, a decimal or a fraction of numeric
    /// nodes.
    pub fn as_numeric(&self) -> Option<Numeric> {
        match &self.kind {
            ObjectKind::Integer(n) => Some(Numeric::exact(Rational::from(n))),
            ObjectKind::Decimal(value) => Some(Numeric { value: value.clone(), inexact: true }),
            ObjectKind::Fraction(numerator, denominator) => {
                let numerator = numerator.as_numeric()?;
                let denominator = denominator.as_numeric()?;
                if denominator.value.cmp0().is_eq() {
                    return None;
                }
                Some(Numeric {
                    value: numerator.value / denominator.value,
                    inexact: numerator.inexact || denominator.inexact,
                })
            },
            _ => None,
        }
    }

    /// Returns true if the node is an integer, a decimal or a fraction of numeric nodes.
    pub fn is_numeric(&self) -> bool {
        match &self.kind {
            ObjectKind::Integer(_) | ObjectKind::Decimal(_) => true,
            ObjectKind::Fraction(numerator, denominator) => {
                numerator.is_numeric() && denominator.is_numeric()
            },
            _ => false,
        }
    }

    /// Returns true if the node is a numeric node with a negative value.
    pub fn is_negative_number(&self) -> bool {
        self.as_numeric().map_or(false, |numeric| numeric.value.cmp0().is_lt())
    }

    /// Builds the most specific node for a number: an [`ObjectKind::Integer`] if the value is
    /// integral, otherwise an irreducible [`ObjectKind::Fraction`] with a positive denominator,
    /// or an [`ObjectKind::Decimal`] if the value is inexact.
    pub fn from_numeric(numeric: Numeric) -> MathsObject {
        let Numeric { value, inexact } = numeric;
        if is_integral(&value) {
            return MathsObject::integer(value.into_numer_denom().0);
        }
        if inexact {
            return MathsObject::decimal_from_rational(value);
        }

        let backend = BackendExpr::Value(Poly::constant(value.clone()));
        let (numerator, denominator) = value.into_numer_denom();
        MathsObject::raw(
            ObjectKind::Fraction(
                Box::new(MathsObject::integer(numerator)),
                Box::new(MathsObject::integer(denominator)),
            ),
            backend,
        )
    }

    /// Returns the same number as a decimal.
    pub fn as_decimal(&self) -> Option<MathsObject> {
        self.as_numeric().map(|numeric| MathsObject::decimal_from_rational(numeric.value))
    }

    /// Returns the number multiplied by 100, as an integer if it is integral and as a decimal
    /// otherwise. `\dfrac{3}{8}` is `37.5` percent.
    pub fn as_percent(&self) -> Option<MathsObject> {
        let percent = self.as_numeric()?.value * Rational::from(100);
        Some(if is_integral(&percent) {
            MathsObject::integer(percent.into_numer_denom().0)
        } else {
            MathsObject::decimal_from_rational(percent)
        })
    }

    /// Returns the distinct prime factors of an integer, in ascending order.
    ///
    /// Integers above `10^12` are only decomposed as perfect powers, and a base that cannot be
    /// decomposed further is reported as a single factor.
    pub fn prime_factors(&self) -> Option<Vec<Integer>> {
        let n = self.as_integer()?.clone().abs();
        if n < 2 {
            return Some(Vec::new());
        }
        Some(factorize(&n).into_iter().map(|(prime, _)| prime).collect())
    }

    /// Rounds a number to the given number of digits after the decimal point, rounding half
    /// away from zero. The result is a decimal.
    pub fn round(&self, digits: u32) -> Option<MathsObject> {
        let scale = Rational::from(Integer::from(10).pow(digits));
        let scaled = self.as_numeric()?.value * &scale;
        Some(MathsObject::decimal_from_rational(scaled.round() / scale))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::{int, rat};
    use super::*;

    #[test]
    fn tower() {
        assert_eq!(MathsObject::from_numeric(Numeric::exact(rat((8, 4)))), MathsObject::integer(2));
        assert_eq!(
            MathsObject::from_numeric(Numeric::exact(rat((6, -8)))),
            MathsObject::new_fraction(-3, 4).unwrap(),
        );
        assert_eq!(
            MathsObject::from_numeric(Numeric { value: rat((5, 2)), inexact: true }),
            MathsObject::decimal(2.5).unwrap(),
        );
        assert_eq!(
            MathsObject::from_numeric(Numeric { value: rat(3), inexact: true }),
            MathsObject::integer(3),
        );
    }

    #[test]
    fn nested_fractions_are_numeric() {
        let half = MathsObject::new_fraction(1, 2).unwrap();
        let nested = MathsObject::new_fraction(half, MathsObject::decimal(0.25).unwrap()).unwrap();
        assert_eq!(nested.as_numeric(), Some(Numeric { value: rat(2), inexact: true }));
        assert!(!MathsObject::new_fraction(MathsObject::symbol("x"), 2).unwrap().is_numeric());
    }

    #[test]
    fn decimal_and_percent() {
        let fraction = MathsObject::new_fraction(3, 8).unwrap();
        assert_eq!(fraction.as_decimal(), Some(MathsObject::decimal(0.375).unwrap()));
        assert_eq!(fraction.as_percent(), Some(MathsObject::decimal(37.5).unwrap()));
        assert_eq!(MathsObject::integer(3).as_percent(), Some(MathsObject::integer(300)));
        assert_eq!(MathsObject::symbol("x").as_percent(), None);
    }

    #[test]
    fn prime_factors() {
        assert_eq!(MathsObject::integer(360).prime_factors(), Some(vec![int(2), int(3), int(5)]));
        assert_eq!(MathsObject::integer(-49).prime_factors(), Some(vec![int(7)]));
        assert_eq!(MathsObject::integer(1).prime_factors(), Some(vec![]));
    }

    #[test]
    fn rounding() {
        let decimal = MathsObject::decimal_ratio(31415, 10000).unwrap();
        assert_eq!(decimal.round(2), Some(MathsObject::decimal_ratio(314, 100).unwrap()));
        assert_eq!(
            MathsObject::decimal(2.5).unwrap().round(0),
            Some(MathsObject::decimal(3.0).unwrap()),
        );
        assert_eq!(
            MathsObject::decimal(-0.125).unwrap().round(2),
            Some(MathsObject::decimal_ratio(-13, 100).unwrap()),
        );
    }
}
