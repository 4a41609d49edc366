use rug::Rational;
use std::{
    collections::{btree_map::Entry, BTreeMap, BTreeSet},
    ops::{Add, Mul, Neg, Sub},
};
use crate::{error::BackendError, primitive::is_integral};
use super::{
    atom::{Atom, Monomial},
    radical::{normalize_term, normalize_term_with, EXPAND_LIMIT, FULL_EXPAND_LIMIT},
};

/// A canonical sum of monomials with exact rational coefficients.
///
/// Two polynomials that are equal as values are equal as Rust values, with the exception of sums
/// raised to negative or fractional powers, which are kept as [`Atom::Group`]s. Use
/// [`Poly::is_zero`] on the difference to compare those.
///
/// The `inexact` flag records that a decimal number took part in computing the value. It does not
/// change the arithmetic, which stays exact, but tells callers to compare such values numerically.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Poly {
    terms: BTreeMap<Monomial, Rational>,
    inexact: bool,
}

impl Poly {
    /// The empty sum.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::constant(Rational::from(1))
    }

    /// An exact constant.
    pub fn constant(value: Rational) -> Self {
        Self::from_raw_term(value, Monomial::one(), false)
    }

    /// A constant that was written as a decimal number.
    pub fn decimal(value: Rational) -> Self {
        Self::from_raw_term(value, Monomial::one(), true)
    }

    pub fn from_atom(atom: Atom) -> Self {
        Self::from_raw_term(Rational::from(1), Monomial::from_atom(atom), false)
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Self::from_atom(Atom::Symbol(name.into()))
    }

    pub fn pi() -> Self {
        Self::from_atom(Atom::Pi)
    }

    pub fn inf() -> Self {
        Self::from_atom(Atom::Inf)
    }

    /// The value of an indeterminate form. Every operation on it is undefined too.
    pub fn undefined() -> Self {
        Self::from_atom(Atom::Undefined)
    }

    /// The uninterpreted function `name` applied to the given arguments.
    pub fn call(name: impl Into<String>, args: Vec<Poly>) -> Self {
        let inexact = args.iter().any(Poly::is_inexact);
        let args = args.into_iter().map(Poly::stripped).collect();
        Self::from_raw_term(Rational::from(1), Monomial::from_atom(Atom::Call(name.into(), args)), inexact)
    }

    /// Builds the canonical polynomial of `coefficient * monomial`.
    pub fn from_term(coefficient: Rational, monomial: Monomial) -> Self {
        normalize_term(coefficient, monomial, false)
    }

    /// Builds a polynomial from a term that is already normalized.
    ///
    /// An unbounded term keeps only the sign of its coefficient: `2\infty` is `\infty`.
    pub(crate) fn from_raw_term(coefficient: Rational, monomial: Monomial, inexact: bool) -> Self {
        let mut terms = BTreeMap::new();
        if coefficient.cmp0().is_ne() {
            let coefficient = if monomial.is_unbounded() {
                Rational::from(coefficient.cmp0() as i32)
            } else {
                coefficient
            };
            terms.insert(monomial, coefficient);
        }
        Self { terms, inexact }
    }

    /// Returns the same polynomial, marked as inexact if `inexact` is true.
    pub fn with_inexact(mut self, inexact: bool) -> Self {
        self.inexact |= inexact;
        self
    }

    /// Returns the same polynomial with the inexact flag cleared, to be stored inside an atom.
    fn stripped(mut self) -> Self {
        self.inexact = false;
        self
    }

    /// Returns an iterator over the monomials of the sum and their coefficients, ordered by
    /// monomial.
    pub fn terms(&self) -> impl DoubleEndedIterator<Item = (&Monomial, &Rational)> + '_ {
        self.terms.iter()
    }

    /// Returns true if the sum has no terms, which is the value zero.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn is_inexact(&self) -> bool {
        self.inexact
    }

    /// Returns true if the value is an indeterminate form, such as `\infty - \infty`.
    pub fn is_undefined(&self) -> bool {
        self.terms.keys().any(|monomial| monomial.exponent_of(&Atom::Undefined).is_some())
    }

    /// Returns true if some term is unbounded, such as `-\infty` or `x \infty`.
    pub fn is_unbounded(&self) -> bool {
        self.terms.keys().any(Monomial::is_unbounded)
    }

    /// Returns the value of the polynomial if it is a rational constant.
    pub fn as_constant(&self) -> Option<Rational> {
        match self.as_single_term() {
            Some((coefficient, monomial)) if monomial.is_one() => Some(coefficient.clone()),
            Some(_) => None,
            None if self.is_empty() => Some(Rational::new()),
            None => None,
        }
    }

    /// Returns the coefficient and monomial of the polynomial if it has exactly one term.
    pub fn as_single_term(&self) -> Option<(&Rational, &Monomial)> {
        if self.terms.len() == 1 {
            self.terms.iter().next().map(|(monomial, coefficient)| (coefficient, monomial))
        } else {
            None
        }
    }

    /// Multiplies every coefficient by a non-zero factor.
    fn scale(&self, factor: &Rational) -> Poly {
        let terms = self.terms.iter()
            .map(|(monomial, coefficient)| {
                let scaled = Rational::from(coefficient * factor);
                if monomial.is_unbounded() {
                    (monomial.clone(), Rational::from(scaled.cmp0() as i32))
                } else {
                    (monomial.clone(), scaled)
                }
            })
            .collect();
        Poly { terms, inexact: self.inexact }
    }

    /// Multiplies two polynomials, multiplying out sums raised to positive integer powers up to
    /// `limit`.
    ///
    /// `0 \cdot \infty` and `\dfrac{\infty}{\infty}` are undefined.
    pub(crate) fn mul_with_limit(&self, rhs: &Poly, limit: u32) -> Poly {
        let inexact = self.inexact || rhs.inexact;
        if self.is_undefined()
            || rhs.is_undefined()
            || (self.is_empty() && rhs.is_unbounded())
            || (rhs.is_empty() && self.is_unbounded())
        {
            return Poly::undefined().with_inexact(inexact);
        }

        let mut result = Poly::zero();
        for (lhs_monomial, lhs_coefficient) in &self.terms {
            for (rhs_monomial, rhs_coefficient) in &rhs.terms {
                if lhs_monomial.cancels_infinity(rhs_monomial) {
                    return Poly::undefined().with_inexact(inexact);
                }
                let term = normalize_term_with(
                    Rational::from(lhs_coefficient * rhs_coefficient),
                    lhs_monomial.mul(rhs_monomial),
                    inexact,
                    limit,
                );
                result = &result + &term;
            }
        }
        result.with_inexact(inexact)
    }

    /// Raises the polynomial to the given power.
    ///
    /// Sums raised to a positive integer power of at most 16 are multiplied out. Other powers of
    /// sums are kept as [`Atom::Group`]s, after dividing the sum by its leading coefficient when
    /// the power is an integer, so that `(2x + 2)^{-1}` and `2^{-1} (x + 1)^{-1}` share a form.
    pub fn pow(&self, exp: &Poly) -> Result<Poly, BackendError> {
        let inexact = self.inexact || exp.inexact;
        if self.is_undefined() || exp.is_undefined() {
            return Ok(Poly::undefined().with_inexact(inexact));
        }

        let Some(e) = exp.as_constant() else {
            if self.as_constant().map_or(false, |base| base == 1) {
                return Ok(Poly::one().with_inexact(inexact));
            }
            let atom = Atom::Exp(Box::new(self.clone().stripped()), Box::new(exp.clone().stripped()));
            return Ok(Poly::from_raw_term(Rational::from(1), Monomial::from_atom(atom), inexact));
        };

        if e.cmp0().is_eq() {
            return Ok(Poly::one().with_inexact(inexact));
        }

        if self.is_empty() {
            return if e.cmp0().is_gt() {
                Ok(Poly::zero().with_inexact(inexact))
            } else {
                Err(BackendError::DivisionByZero)
            };
        }

        let single_term = self.as_single_term().filter(|(_, monomial)| distributes(monomial, &e));
        if let Some((coefficient, monomial)) = single_term {
            let mut monomial = monomial.pow(&e);
            monomial.insert(Atom::Group(Box::new(Poly::constant(coefficient.clone()))), e);
            return Ok(normalize_term(Rational::from(1), monomial, inexact));
        }

        if !is_integral(&e) {
            let atom = Atom::Group(Box::new(self.clone().stripped()));
            return Ok(Poly::from_raw_term(Rational::from(1), Monomial::from_power(atom, e), inexact));
        }

        if let Some(k) = e.numer().to_u32().filter(|&k| k <= EXPAND_LIMIT) {
            let mut result = Poly::one();
            for _ in 0..k {
                result = &result * self;
            }
            return Ok(result.with_inexact(inexact));
        }

        let leading = self.leading_coefficient();
        let monic = self.scale(&Rational::from(leading.recip_ref())).stripped();
        let mut monomial = Monomial::from_power(Atom::Group(Box::new(Poly::constant(leading))), e.clone());
        monomial.insert(Atom::Group(Box::new(monic)), e);
        Ok(normalize_term(Rational::from(1), monomial, inexact))
    }

    /// The coefficient of the greatest monomial.
    fn leading_coefficient(&self) -> Rational {
        self.terms.values().next_back().cloned().unwrap_or_else(|| Rational::from(1))
    }

    /// Divides `self` by `rhs`.
    pub fn fractionalize(&self, rhs: &Poly) -> Result<Poly, BackendError> {
        let inverse = rhs.pow(&Poly::constant(Rational::from(-1)))?;
        Ok(self * &inverse)
    }

    /// Multiplies out every sum raised to a positive integer power.
    pub fn expand(&self) -> Poly {
        self.terms.iter()
            .map(|(monomial, coefficient)| normalize_term_with(
                coefficient.clone(),
                monomial.clone(),
                self.inexact,
                FULL_EXPAND_LIMIT,
            ))
            .fold(Poly::zero(), |acc, term| &acc + &term)
            .with_inexact(self.inexact)
    }

    /// Returns true if the polynomial is zero once every denominator is cleared.
    pub fn is_zero(&self) -> bool {
        if self.is_empty() {
            return true;
        }

        let mut lowest: BTreeMap<&Atom, &Rational> = BTreeMap::new();
        for monomial in self.terms.keys() {
            for (atom, exp) in monomial.factors() {
                if !matches!(atom, Atom::Group(_)) || atom.as_radicand().is_some() || exp.cmp0().is_ge() {
                    continue;
                }
                let entry = lowest.entry(atom).or_insert(exp);
                if exp < *entry {
                    *entry = exp;
                }
            }
        }

        let mut clearing = Monomial::one();
        for (atom, exp) in lowest {
            clearing.insert(atom.clone(), Rational::from(-exp));
        }
        let clearing = Poly::from_raw_term(Rational::from(1), clearing, false);
        self.mul_with_limit(&clearing, FULL_EXPAND_LIMIT).is_empty()
    }

    /// Returns the degree of the polynomial in the given symbol.
    ///
    /// Returns [`None`] if the symbol has a negative or fractional exponent somewhere, or appears
    /// inside a sum that is not multiplied out. Function applications are opaque: `x \sin x` has
    /// degree 1 in `x`.
    pub fn degree(&self, symbol: &str) -> Option<u32> {
        let target = Atom::Symbol(symbol.to_string());
        let mut degree = 0;
        for monomial in self.terms.keys() {
            for (atom, exp) in monomial.factors() {
                if *atom == target {
                    if !is_integral(exp) || exp.cmp0().is_lt() {
                        return None;
                    }
                    degree = degree.max(exp.numer().to_u32()?);
                } else if matches!(atom, Atom::Group(_) | Atom::Exp(..)) && atom.mentions(symbol) {
                    return None;
                }
            }
        }
        Some(degree)
    }

    /// Returns the coefficient of `symbol^k`.
    pub fn coeff(&self, symbol: &str, k: u32) -> Poly {
        let target = Atom::Symbol(symbol.to_string());
        let terms = self.terms.iter()
            .filter(|(monomial, _)| match monomial.exponent_of(&target) {
                Some(exp) => *exp == k,
                None => k == 0,
            })
            .map(|(monomial, coefficient)| (monomial.without(&target), coefficient.clone()))
            .collect();
        Poly { terms, inexact: self.inexact }
    }

    /// Returns the names of every symbol in the polynomial, in sorted order.
    pub fn free_symbols(&self) -> BTreeSet<String> {
        let mut symbols = BTreeSet::new();
        self.collect_symbols(&mut symbols);
        symbols
    }

    fn collect_symbols(&self, symbols: &mut BTreeSet<String>) {
        for monomial in self.terms.keys() {
            for (atom, _) in monomial.factors() {
                match atom {
                    Atom::Pi | Atom::Inf | Atom::Undefined => {},
                    Atom::Symbol(name) => {
                        symbols.insert(name.clone());
                    },
                    Atom::Call(_, args) => args.iter().for_each(|arg| arg.collect_symbols(symbols)),
                    Atom::Exp(base, exp) => {
                        base.collect_symbols(symbols);
                        exp.collect_symbols(symbols);
                    },
                    Atom::Group(poly) => poly.collect_symbols(symbols),
                }
            }
        }
    }
}

/// Returns true if `monomial^{e}` is the product of the powers of its atoms.
///
/// An even root of an even power is the absolute value of the base, so `(x^2)^{1/2}` is kept
/// whole, unless the base is known to be non-negative.
fn distributes(monomial: &Monomial, e: &Rational) -> bool {
    e.denom().is_odd()
        || monomial.factors().all(|(atom, exp)| exp.numer().is_odd() || atom.is_nonnegative())
}

impl Add for &Poly {
    type Output = Poly;

    /// Adds two polynomials. `\infty - \infty` is undefined.
    fn add(self, rhs: &Poly) -> Poly {
        let inexact = self.inexact || rhs.inexact;
        if self.is_undefined() || rhs.is_undefined() {
            return Poly::undefined().with_inexact(inexact);
        }

        let mut terms = self.terms.clone();
        for (monomial, coefficient) in &rhs.terms {
            match terms.entry(monomial.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(coefficient.clone());
                },
                Entry::Occupied(entry) if monomial.is_unbounded() => {
                    if entry.get().cmp0() != coefficient.cmp0() {
                        return Poly::undefined().with_inexact(inexact);
                    }
                },
                Entry::Occupied(mut entry) => {
                    *entry.get_mut() += coefficient;
                    if entry.get().cmp0().is_eq() {
                        entry.remove();
                    }
                },
            }
        }
        Poly { terms, inexact }
    }
}

impl Sub for &Poly {
    type Output = Poly;

    fn sub(self, rhs: &Poly) -> Poly {
        self + &-rhs
    }
}

impl Mul for &Poly {
    type Output = Poly;

    fn mul(self, rhs: &Poly) -> Poly {
        self.mul_with_limit(rhs, EXPAND_LIMIT)
    }
}

impl Neg for &Poly {
    type Output = Poly;

    fn neg(self) -> Poly {
        self.scale(&Rational::from(-1))
    }
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

    #[test]
    fn like_terms_combine() {
        let sum = &(&x() + &x()) + &c(3);
        let expected = &(&c(2) * &x()) + &c(3);
        assert_eq!(sum, expected);
        assert!((&sum - &expected).is_empty());
    }

    #[test]
    fn binomial_square() {
        let binomial = &x() + &c(1);
        let square = binomial.pow(&c(2)).unwrap();
        let expected = &(&x().pow(&c(2)).unwrap() + &(&c(2) * &x())) + &c(1);
        assert_eq!(square, expected);
        assert_eq!(square.degree("x"), Some(2));
        assert_eq!(square.coeff("x", 1), c(2));
    }

    #[test]
    fn cancelling_denominators() {
        // (x^2 - 1) / (x - 1) - (x + 1) = 0
        let numerator = &x().pow(&c(2)).unwrap() - &c(1);
        let denominator = &x() - &c(1);
        let quotient = numerator.fractionalize(&denominator).unwrap();
        let difference = &quotient - &(&x() + &c(1));

        assert!(!difference.is_empty());
        assert!(difference.is_zero());
        assert_eq!(quotient.degree("x"), None);
    }

    #[test]
    fn content_is_factored_out_of_groups() {
        // 1 / (2x + 2) = (1/2) / (x + 1)
        let lhs = c(1).fractionalize(&(&(&c(2) * &x()) + &c(2))).unwrap();
        let rhs = c(1).fractionalize(&(&x() + &c(1))).unwrap();
        assert_eq!(lhs, &Poly::constant(rat((1, 2))) * &rhs);
    }

    #[test]
    fn large_powers_are_kept_until_expanded() {
        let binomial = &x() + &c(1);
        let power = binomial.pow(&c(20)).unwrap();
        assert_eq!(power.terms().count(), 1);
        assert_eq!(power.expand().terms().count(), 21);
        assert_eq!(power.expand().coeff("x", 1), c(20));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(x().fractionalize(&Poly::zero()), Err(BackendError::DivisionByZero));
        assert_eq!(Poly::zero().pow(&c(2)), Ok(Poly::zero()));
    }

    #[test]
    fn symbolic_exponent() {
        let power = c(2).pow(&x()).unwrap();
        assert_eq!(power.free_symbols().into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);
        assert_eq!(power.degree("x"), None);
    }

    #[test]
    fn even_roots_of_even_powers() {
        let half = Poly::constant(rat((1, 2)));
        let square = x().pow(&c(2)).unwrap();
        let root = square.pow(&half).unwrap();
        assert_ne!(root, x());
        assert!(!(&root - &x()).is_zero());
        assert_eq!(root.free_symbols().into_iter().collect::<Vec<_>>(), vec!["x".to_string()]);

        let cube = x().pow(&c(3)).unwrap();
        assert_eq!(cube.pow(&Poly::constant(rat((1, 3)))).unwrap(), x());
        assert_eq!(x().pow(&half).unwrap().pow(&c(2)).unwrap(), x());
        assert_eq!(Poly::pi().pow(&c(2)).unwrap().pow(&half).unwrap(), Poly::pi());
    }

    #[test]
    fn indeterminate_forms() {
        let inf = Poly::inf();
        assert!((&inf - &inf).is_undefined());
        assert!((&Poly::zero() * &inf).is_undefined());
        assert!(inf.fractionalize(&inf).unwrap().is_undefined());
        assert!((&(&inf - &inf) + &x()).is_undefined());
        assert!(!(&inf - &inf).is_zero());

        assert_eq!(&inf + &inf, inf);
        assert_eq!(&c(2) * &inf, inf);
        assert_eq!(&c(-3) * &inf, -&inf);
        assert!(!(&inf + &c(1)).is_undefined());
    }

    #[test]
    fn inexact_flag_propagates() {
        let decimal = Poly::decimal(rat((5, 2)));
        let product = &decimal * &x();
        assert!(product.is_inexact());
        assert!(!(&x() + &c(1)).is_inexact());
    }
}
