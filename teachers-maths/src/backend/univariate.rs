//! Polynomials in a single symbol, used to cancel the common factor of the numerator and the
//! denominator of a rational expression.

use rug::Rational;
use crate::primitive::is_integral;
use super::{atom::{Atom, Monomial}, poly::Poly};

/// The coefficients of a polynomial in one symbol, lowest degree first. The last coefficient is
/// never zero, so the zero polynomial has no coefficients.
#[derive(Debug, Clone, PartialEq)]
struct Univariate {
    symbol: String,
    coefficients: Vec<Rational>,
}

impl Univariate {
    /// Reads `poly` as a polynomial in `symbol`. Returns [`None`] if any other atom appears, or if
    /// the symbol has a negative or fractional exponent.
    fn from_poly(poly: &Poly, symbol: &str) -> Option<Self> {
        let target = Atom::Symbol(symbol.to_string());
        let mut coefficients = Vec::new();
        for (monomial, coefficient) in poly.terms() {
            let k = match monomial.factors().collect::<Vec<_>>().as_slice() {
                [] => 0,
                [(atom, exp)] if **atom == target && is_integral(exp) && exp.cmp0().is_gt() => {
                    exp.numer().to_usize()?
                },
                _ => return None,
            };
            if coefficients.len() <= k {
                coefficients.resize(k + 1, Rational::new());
            }
            coefficients[k] = coefficient.clone();
        }
        Some(Self { symbol: symbol.to_string(), coefficients })
    }

    fn to_poly(&self) -> Poly {
        self.coefficients.iter()
            .enumerate()
            .filter(|(_, coefficient)| coefficient.cmp0().is_ne())
            .map(|(k, coefficient)| {
                let monomial = match k {
                    0 => Monomial::one(),
                    _ => Monomial::from_power(Atom::Symbol(self.symbol.clone()), Rational::from(k)),
                };
                Poly::from_raw_term(coefficient.clone(), monomial, false)
            })
            .fold(Poly::zero(), |acc, term| &acc + &term)
    }

    fn with_coefficients(&self, mut coefficients: Vec<Rational>) -> Self {
        while coefficients.last().is_some_and(|c| c.cmp0().is_eq()) {
            coefficients.pop();
        }
        Self { symbol: self.symbol.clone(), coefficients }
    }

    fn is_zero(&self) -> bool {
        self.coefficients.is_empty()
    }

    fn is_constant(&self) -> bool {
        self.coefficients.len() <= 1
    }

    /// Divides `self` by a non-zero `divisor`, returning the quotient and the remainder.
    fn div_rem(&self, divisor: &Univariate) -> (Univariate, Univariate) {
        let width = divisor.coefficients.len();
        let Some(lead) = divisor.coefficients.last() else {
            return (self.with_coefficients(Vec::new()), self.clone());
        };
        if self.coefficients.len() < width {
            return (self.with_coefficients(Vec::new()), self.clone());
        }

        let mut remainder = self.coefficients.clone();
        let mut quotient = vec![Rational::new(); remainder.len() - width + 1];
        for i in (0..quotient.len()).rev() {
            let factor = Rational::from(&remainder[i + width - 1] / lead);
            if factor.cmp0().is_ne() {
                for (j, coefficient) in divisor.coefficients.iter().enumerate() {
                    remainder[i + j] -= Rational::from(&factor * coefficient);
                }
            }
            quotient[i] = factor;
        }
        remainder.truncate(width - 1);
        (self.with_coefficients(quotient), self.with_coefficients(remainder))
    }

    /// The monic greatest common divisor, by Euclid's algorithm.
    fn gcd(&self, other: &Univariate) -> Univariate {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, remainder) = a.div_rem(&b);
            a = b;
            b = remainder;
        }

        if let Some(lead) = a.coefficients.last().cloned() {
            for coefficient in &mut a.coefficients {
                *coefficient /= &lead;
            }
        }
        a
    }
}

/// Divides `numerator` and `denominator` by their greatest common divisor when both are
/// polynomials in the same single symbol, as in `\dfrac{x^{2} - 1}{x - 1}`.
///
/// Returns [`None`] if the two have no common factor of positive degree, or are not polynomials
/// in one symbol.
pub(crate) fn cancel_common_factor(numerator: &Poly, denominator: &Poly) -> Option<(Poly, Poly)> {
    let mut symbols = numerator.free_symbols();
    symbols.extend(denominator.free_symbols());
    if symbols.len() != 1 {
        return None;
    }
    let symbol = symbols.into_iter().next()?;

    let top = Univariate::from_poly(numerator, &symbol)?;
    let bottom = Univariate::from_poly(denominator, &symbol)?;
    if top.is_zero() || bottom.is_zero() {
        return None;
    }

    let common = top.gcd(&bottom);
    if common.is_constant() {
        return None;
    }
    let (top, _) = top.div_rem(&common);
    let (bottom, _) = bottom.div_rem(&common);
    Some((top.to_poly(), bottom.to_poly()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::rat;
    use super::*;

    fn x() -> Poly {
        Poly::symbol("x")
    }

    fn c(n: i64) -> Poly {
        Poly::constant(rat(n))
    }

    fn square(p: &Poly) -> Poly {
        p * p
    }

    #[test]
    fn difference_of_squares() {
        let numerator = &square(&x()) - &c(1);
        let denominator = &x() - &c(1);
        assert_eq!(
            cancel_common_factor(&numerator, &denominator),
            Some((&x() + &c(1), c(1))),
        );
    }

    #[test]
    fn partial_cancellation() {
        // (x^2 + 3x + 2) / (x^2 + 4x + 3) = (x + 2) / (x + 3)
        let numerator = &(&x() + &c(1)) * &(&x() + &c(2));
        let denominator = &(&x() + &c(1)) * &(&x() + &c(3));
        assert_eq!(
            cancel_common_factor(&numerator, &denominator),
            Some((&x() + &c(2), &x() + &c(3))),
        );
    }

    #[test]
    fn nothing_to_cancel() {
        assert_eq!(cancel_common_factor(&(&x() + &c(1)), &(&x() + &c(2))), None);
        assert_eq!(cancel_common_factor(&c(3), &(&x() + &c(2))), None);

        let y = Poly::symbol("y");
        assert_eq!(cancel_common_factor(&(&square(&x()) - &square(&y)), &(&x() - &y)), None);
    }
}
