//! Normalization of single terms.
//!
//! Numeric bases raised to fractional powers are rewritten over their prime factors, with every
//! exponent reduced into `(0, 1)` and the integral part moved into the coefficient. This makes
//! the representation of a radical unique: `\sqrt{8}` becomes `2 \cdot 2^{1/2}` and
//! `\sqrt{6} \sqrt{2}` becomes `2 \cdot 3^{1/2}`.

use rug::{ops::Pow, Integer, Rational};
use std::collections::BTreeMap;
use crate::primitive::is_integral;
use super::{atom::{Atom, Monomial}, poly::Poly};

/// Numbers up to this bound are fully factored by trial division.
const FACTOR_LIMIT: u64 = 1_000_000_000_000;

/// Sums raised to positive integer powers up to this bound are multiplied out.
pub(crate) const EXPAND_LIMIT: u32 = 16;

/// Bound used by [`Poly::expand`] and the zero test, which must multiply out every power.
pub(crate) const FULL_EXPAND_LIMIT: u32 = 64;

/// Returns the factorization of `n > 0` as `(base, multiplicity)` pairs in ascending order.
///
/// Numbers above [`FACTOR_LIMIT`] are not factored; they are returned as the largest perfect
/// power they are.
pub(crate) fn factorize(n: &Integer) -> Vec<(Integer, u32)> {
    let Some(mut rest) = n.to_u64().filter(|&n| n <= FACTOR_LIMIT) else {
        return vec![perfect_power(n)];
    };

    let mut factors = Vec::new();
    let mut divisor = 2u64;
    while divisor * divisor <= rest {
        let mut multiplicity = 0;
        while rest % divisor == 0 {
            rest /= divisor;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            factors.push((Integer::from(divisor), multiplicity));
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if rest > 1 {
        factors.push((Integer::from(rest), 1));
    }
    factors
}

/// Writes `n` as `base^k` with `k` as large as possible.
fn perfect_power(n: &Integer) -> (Integer, u32) {
    let bits = n.significant_bits();
    for k in (2..=bits.min(64)).rev() {
        let (root, rem) = n.clone().root_rem(Integer::new(), k);
        if rem == 0 {
            return (root, k);
        }
    }
    (n.clone(), 1)
}

/// Exact powers whose numerator or denominator would exceed this many bits are kept symbolic.
const POW_BIT_LIMIT: u64 = 1 << 16;

/// Raises `r` to the integral power `e`.
///
/// Returns [`None`] for `0^{-n}`, and for powers too large to compute exactly, such as
/// `9^{99999999}`.
pub(crate) fn pow_rational(r: &Rational, e: &Integer) -> Option<Rational> {
    let e = e.to_i32()?;
    if r.cmp0().is_eq() && e < 0 {
        return None;
    }

    let unit = *r.denom() == 1 && r.numer().significant_bits() <= 1;
    let bits = r.numer().significant_bits().max(r.denom().significant_bits());
    if !unit && u64::from(bits) * u64::from(e.unsigned_abs()) > POW_BIT_LIMIT {
        return None;
    }
    Some(r.clone().pow(e))
}

/// Builds the canonical polynomial of `coefficient * monomial`.
pub(crate) fn normalize_term(coefficient: Rational, monomial: Monomial, inexact: bool) -> Poly {
    normalize_term_with(coefficient, monomial, inexact, EXPAND_LIMIT)
}

/// [`normalize_term`], multiplying out sums raised to positive integer powers up to `limit`.
pub(crate) fn normalize_term_with(
    mut coefficient: Rational,
    monomial: Monomial,
    inexact: bool,
    limit: u32,
) -> Poly {
    let mut kept = Monomial::one();
    let mut primes: BTreeMap<Integer, Rational> = BTreeMap::new();
    let mut expansions = Vec::new();

    for (atom, exp) in monomial.factors() {
        if let Some(radicand) = atom.as_radicand() {
            if is_integral(exp) {
                match pow_rational(&radicand, exp.numer()) {
                    Some(value) => coefficient *= value,
                    None => kept.insert(atom.clone(), exp.clone()),
                }
            } else if radicand.cmp0().is_lt() {
                kept.insert(atom.clone(), exp.clone());
            } else {
                let (numer, denom) = radicand.into_numer_denom();
                for (prime, multiplicity) in factorize(&numer) {
                    *primes.entry(prime).or_default() += Rational::from(exp * multiplicity);
                }
                for (prime, multiplicity) in factorize(&denom) {
                    *primes.entry(prime).or_default() -= Rational::from(exp * multiplicity);
                }
            }
            continue;
        }

        if let Atom::Group(group) = atom {
            let positive = is_integral(exp) && exp.cmp0().is_gt();
            if let Some(k) = exp.numer().to_u32().filter(|&k| positive && k <= limit) {
                expansions.push((group, k));
                continue;
            }
        }

        kept.insert(atom.clone(), exp.clone());
    }

    for (prime, exp) in primes {
        if prime == 1 {
            continue;
        }
        let whole = exp.clone().floor();
        let fraction = exp - &whole;
        match pow_rational(&Rational::from(prime.clone()), whole.numer()) {
            Some(value) => coefficient *= value,
            None => kept.insert(Atom::Group(Box::new(Poly::constant(Rational::from(prime.clone())))), whole),
        }
        if fraction.cmp0().is_ne() {
            kept.insert(Atom::Group(Box::new(Poly::constant(Rational::from(prime)))), fraction);
        }
    }

    let mut result = Poly::from_raw_term(coefficient, kept, inexact);
    for (group, k) in expansions {
        for _ in 0..k {
            result = result.mul_with_limit(group, limit);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::{int, rat};
    use super::*;

    fn radical(base: i64, exp: (i64, i64)) -> Poly {
        Poly::constant(rat(base)).pow(&Poly::constant(rat(exp))).unwrap()
    }

    #[test]
    fn factorization() {
        assert_eq!(factorize(&int(360)), vec![(int(2), 3), (int(3), 2), (int(5), 1)]);
        assert_eq!(factorize(&int(97)), vec![(int(97), 1)]);

        let huge = int(1_000_003).pow(4u32);
        assert_eq!(factorize(&huge), vec![(int(1_000_003), 4)]);
    }

    #[test]
    fn square_root_of_eight() {
        let expected = &Poly::constant(rat(2)) * &radical(2, (1, 2));
        assert_eq!(radical(8, (1, 2)), expected);
    }

    #[test]
    fn perfect_roots() {
        assert_eq!(radical(8, (1, 3)), Poly::constant(rat(2)));
        assert_eq!(radical(4, (1, 4)), radical(2, (1, 2)));
        assert_eq!(radical(4, (3, 2)), Poly::constant(rat(8)));
    }

    #[test]
    fn product_of_radicals() {
        let product = &radical(6, (1, 2)) * &radical(2, (1, 2));
        let expected = &Poly::constant(rat(2)) * &radical(3, (1, 2));
        assert_eq!(product, expected);

        let square = &radical(2, (1, 2)) * &radical(2, (1, 2));
        assert_eq!(square, Poly::constant(rat(2)));
    }

    #[test]
    fn huge_powers_stay_symbolic() {
        assert_eq!(pow_rational(&rat(9), &int(99_999_999)), None);
        assert_eq!(pow_rational(&rat(-1), &int(99_999_999)), Some(rat(-1)));
        assert_eq!(pow_rational(&rat((2, 3)), &int(-3)), Some(rat((27, 8))));

        let power = Poly::constant(rat(9)).pow(&Poly::constant(rat(99_999_999))).unwrap();
        assert_eq!(power.as_constant(), None);
        assert_eq!(power.terms().count(), 1);

        let root = Poly::constant(rat(9)).pow(&Poly::constant(rat((99_999_999, 2)))).unwrap();
        assert_eq!(root.as_constant(), None);
    }

    #[test]
    fn rational_radicand() {
        // (1/2)^(1/2) = 2^(1/2) / 2
        let expected = &Poly::constant(rat((1, 2))) * &radical(2, (1, 2));
        assert_eq!(
            Poly::constant(rat((1, 2))).pow(&Poly::constant(rat((1, 2)))).unwrap(),
            expected,
        );
    }
}
