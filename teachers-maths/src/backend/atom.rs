use rug::Rational;
use std::collections::BTreeMap;
use super::poly::Poly;

/// An irreducible factor of a [`Monomial`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Atom {
    /// The constant `\pi`.
    Pi,

    /// `\infty`.
    Inf,

    /// The value of an indeterminate form, such as `\infty - \infty` or `0 \cdot \infty`.
    Undefined,

    /// A free symbol, such as `x`.
    Symbol(String),

    /// An uninterpreted function applied to its arguments, such as `f(x, y)`.
    Call(String, Vec<Poly>),

    /// A power whose exponent is not a number, such as `2^{x}`.
    Exp(Box<Poly>, Box<Poly>),

    /// A base that cannot be distributed. This is either a sum raised to a negative, fractional or
    /// large power, or the integer radicand of a root, such as the `2` of `\sqrt{2}`.
    Group(Box<Poly>),
}

impl Atom {
    /// Returns the constant value of the atom if it is the radicand of a root.
    pub fn as_radicand(&self) -> Option<Rational> {
        match self {
            Atom::Group(poly) => poly.as_constant(),
            _ => None,
        }
    }

    /// Returns true if the atom is known to be non-negative, so that roots of its powers can be
    /// distributed.
    pub fn is_nonnegative(&self) -> bool {
        matches!(self, Atom::Pi | Atom::Inf) || self.as_radicand().is_some_and(|r| r.cmp0().is_ge())
    }

    /// Returns true if the given symbol appears anywhere inside this atom.
    pub fn mentions(&self, symbol: &str) -> bool {
        match self {
            Atom::Pi | Atom::Inf | Atom::Undefined => false,
            Atom::Symbol(name) => name == symbol,
            Atom::Call(_, args) => args.iter().any(|arg| arg.free_symbols().contains(symbol)),
            Atom::Exp(base, exp) => base.free_symbols().contains(symbol)
                || exp.free_symbols().contains(symbol),
            Atom::Group(poly) => poly.free_symbols().contains(symbol),
        }
    }
}

/// A product of [`Atom`]s, each raised to a non-zero rational exponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Monomial(BTreeMap<Atom, Rational>);

impl Monomial {
    /// The empty product.
    pub fn one() -> Self {
        Self(BTreeMap::new())
    }

    /// A single atom with exponent 1.
    pub fn from_atom(atom: Atom) -> Self {
        Self::from_power(atom, Rational::from(1))
    }

    /// A single atom raised to the given exponent.
    pub fn from_power(atom: Atom, exp: Rational) -> Self {
        let mut monomial = Self::one();
        monomial.insert(atom, exp);
        monomial
    }

    pub fn is_one(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the atoms of the product and their exponents.
    pub fn factors(&self) -> impl Iterator<Item = (&Atom, &Rational)> + '_ {
        self.0.iter()
    }

    /// Returns the exponent of the given atom, if it is part of the product.
    pub fn exponent_of(&self, atom: &Atom) -> Option<&Rational> {
        self.0.get(atom)
    }

    /// Returns true if the product is unbounded: `\infty` appears with a positive exponent, or the
    /// product is undefined.
    pub fn is_unbounded(&self) -> bool {
        self.0.get(&Atom::Inf).is_some_and(|exp| exp.cmp0().is_gt())
            || self.0.contains_key(&Atom::Undefined)
    }

    /// Returns true if multiplying the two products divides `\infty` by itself.
    pub fn cancels_infinity(&self, other: &Monomial) -> bool {
        match (self.0.get(&Atom::Inf), other.0.get(&Atom::Inf)) {
            (Some(a), Some(b)) => Rational::from(a + b).cmp0().is_eq(),
            _ => false,
        }
    }

    /// Returns true if any atom has a negative exponent.
    pub fn has_negative_exponent(&self) -> bool {
        self.0.values().any(|exp| exp.cmp0().is_lt())
    }

    /// The sum of the exponents of every atom that is not a numeric radicand. Used to order the
    /// terms of a sum.
    pub fn total_degree(&self) -> Rational {
        self.0.iter()
            .filter(|(atom, _)| atom.as_radicand().is_none())
            .fold(Rational::new(), |acc, (_, exp)| acc + exp)
    }

    /// Multiplies the atom into the product, adding exponents if it is already present.
    pub fn insert(&mut self, atom: Atom, exp: Rational) {
        if exp.cmp0().is_eq() {
            return;
        }

        match self.0.get_mut(&atom) {
            Some(current) => {
                *current += exp;
                if current.cmp0().is_eq() {
                    self.0.remove(&atom);
                }
            },
            None => {
                self.0.insert(atom, exp);
            },
        }
    }

    pub fn mul(&self, other: &Monomial) -> Monomial {
        let mut result = self.clone();
        for (atom, exp) in other.factors() {
            result.insert(atom.clone(), exp.clone());
        }
        result
    }

    /// Raises every atom of the product to the given power.
    pub fn pow(&self, exp: &Rational) -> Monomial {
        let mut result = Monomial::one();
        for (atom, current) in self.factors() {
            result.insert(atom.clone(), Rational::from(current * exp));
        }
        result
    }

    /// Returns the product without the given atom.
    pub fn without(&self, atom: &Atom) -> Monomial {
        let mut result = self.clone();
        result.0.remove(atom);
        result
    }

    /// Splits the product into the atoms with a positive exponent and the atoms with a negative
    /// exponent, the latter with their exponent negated.
    pub fn split_by_sign(&self) -> (Monomial, Monomial) {
        let mut numerator = Monomial::one();
        let mut denominator = Monomial::one();
        for (atom, exp) in self.factors() {
            if exp.cmp0().is_lt() {
                denominator.insert(atom.clone(), Rational::from(-exp));
            } else {
                numerator.insert(atom.clone(), exp.clone());
            }
        }
        (numerator, denominator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::primitive::rat;
    use super::*;

    #[test]
    fn exponents_merge_and_cancel() {
        let x = Atom::Symbol("x".to_string());
        let mut monomial = Monomial::from_power(x.clone(), rat(2));
        monomial.insert(x.clone(), rat(-1));
        assert_eq!(monomial.exponent_of(&x), Some(&rat(1)));

        monomial.insert(x.clone(), rat(-1));
        assert!(monomial.is_one());
    }

    #[test]
    fn split_numerator_and_denominator() {
        let x = Atom::Symbol("x".to_string());
        let y = Atom::Symbol("y".to_string());
        let monomial = Monomial::from_power(x.clone(), rat(2))
            .mul(&Monomial::from_power(y.clone(), rat(-3)));

        let (numerator, denominator) = monomial.split_by_sign();
        assert_eq!(numerator, Monomial::from_power(x, rat(2)));
        assert_eq!(denominator, Monomial::from_power(y, rat(3)));
        assert_eq!(monomial.total_degree(), rat(-1));
    }
}
