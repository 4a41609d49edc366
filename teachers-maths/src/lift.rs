//! Converts a backend expression back into the tagged expression model.
//!
//! The conversion follows a fixed table:
//!
//! | backend                              | node                                    |
//! | ------------------------------------ | --------------------------------------- |
//! | empty sum                            | `Integer(0)`                            |
//! | constant                             | `Integer`, `Fraction` or `Decimal`      |
//! | `Symbol`, `Pi`, `Inf` atom           | `Symbol`, `Pi`, `Inf`                   |
//! | `Call` atom                          | `Image`                                 |
//! | `Group` atom                         | the lifted sum or radicand              |
//! | `Exp` atom                           | `Pow`                                   |
//! | atom with exponent other than 1      | `Pow`                                   |
//! | term with negative exponents         | `Fraction`                              |
//! | sum of terms with one denominator    | one `Fraction`, common factor cancelled |
//! | product                              | left-nested `Mul`, coefficient first    |
//! | sum                                  | left-nested `Add`, highest degree first |
//! | relation, interval, tuple, function  | `Equality` or `StrictGreaterThan`, `Interval`, `Collection`, `Function` |
//!
//! Anything else fails with [`LiftError::UnsupportedShape`].

use rug::{Integer, Rational};
use std::cmp::Reverse;
use tracing::trace;
use crate::{
    backend::{univariate::cancel_common_factor, Atom, BackendExpr, Monomial, Poly, RelationKind},
    error::LiftError,
    object::{MathsObject, Numeric},
    primitive::is_integral,
};

/// Lifts a backend expression into a [`MathsObject`].
pub fn lift(expr: &BackendExpr) -> Result<MathsObject, LiftError> {
    match expr {
        BackendExpr::Value(poly) => lift_poly(poly),
        BackendExpr::Function(name) => Ok(MathsObject::function(name.as_str())),
        BackendExpr::Relation(RelationKind::Eq, left, right) => {
            Ok(MathsObject::new_equality(lift_poly(left)?, lift_poly(right)?)?)
        },
        BackendExpr::Relation(RelationKind::Greater, left, right) => {
            Ok(MathsObject::new_greater_than(lift_poly(left)?, lift_poly(right)?)?)
        },
        BackendExpr::Interval { left, right, left_open, right_open, .. } => Ok(MathsObject::new_interval(
            lift_poly(left)?,
            lift_poly(right)?,
            *left_open,
            *right_open,
        )?),
        BackendExpr::Tuple(elements) => Ok(MathsObject::new_collection(
            elements.iter().map(lift).collect::<Result<_, _>>()?,
        )?),
    }
}

/// Lifts a sum, highest degree first and constants last.
pub(crate) fn lift_poly(poly: &Poly) -> Result<MathsObject, LiftError> {
    if let Some(fraction) = lift_rational(poly) {
        return fraction;
    }

    let mut terms = poly.terms().rev().collect::<Vec<_>>();
    terms.sort_by_key(|(monomial, _)| (monomial.is_one(), Reverse(monomial.total_degree())));

    let mut lifted = terms.into_iter()
        .map(|(monomial, coefficient)| lift_term(coefficient, monomial, poly.is_inexact()));
    let Some(first) = lifted.next() else {
        return Ok(MathsObject::integer(0));
    };

    let sum = lifted.try_fold(first?, |sum, term| {
        Ok::<_, LiftError>(MathsObject::new_add(sum, term?)?)
    })?;
    trace!(target: "lift", terms = poly.terms().count(), result = %sum, "lifted sum");
    Ok(sum)
}

/// Lifts a sum of several terms that all share a denominator as a single fraction, such as
/// `\dfrac{x + 1}{2x + 3}`. Returns [`None`] for any other sum.
///
/// The common factor of the numerator and the denominator is cancelled when both are
/// polynomials in one symbol, so `\dfrac{x^{2} - 1}{x - 1}` lifts to `x + 1`.
fn lift_rational(poly: &Poly) -> Option<Result<MathsObject, LiftError>> {
    let (first, _) = poly.terms().next()?;
    let (_, shared) = first.split_by_sign();
    if shared.is_one() || poly.terms().count() < 2 {
        return None;
    }

    let mut numerator = Poly::zero();
    for (monomial, coefficient) in poly.terms() {
        let (top, bottom) = monomial.split_by_sign();
        if bottom != shared {
            return None;
        }
        numerator = &numerator + &Poly::from_raw_term(coefficient.clone(), top, false);
    }
    let numerator = numerator.expand();
    let denominator = Poly::from_raw_term(Rational::from(1), shared, false).expand();
    let (numerator, denominator) = cancel_common_factor(&numerator, &denominator)
        .unwrap_or((numerator, denominator));

    trace!(target: "lift", numerator = ?numerator, denominator = ?denominator, "combined a rational sum");
    Some(lift_quotient(&numerator, &denominator, poly.is_inexact()))
}

/// Lifts `\dfrac{numerator}{denominator}`, scaled so that no coefficient of an exact quotient is
/// a fraction.
fn lift_quotient(numerator: &Poly, denominator: &Poly, inexact: bool) -> Result<MathsObject, LiftError> {
    if let Some(constant) = denominator.as_constant().filter(|constant| constant.cmp0().is_ne()) {
        let quotient = numerator * &Poly::constant(constant.recip());
        return lift_poly(&quotient.with_inexact(inexact));
    }

    let scale = if inexact {
        Integer::from(1)
    } else {
        numerator.terms()
            .chain(denominator.terms())
            .fold(Integer::from(1), |scale, (_, coefficient)| scale.lcm(coefficient.denom()))
    };
    let scale = Poly::constant(Rational::from(scale));
    let numerator = (numerator * &scale).with_inexact(inexact);
    let denominator = denominator * &scale;
    Ok(MathsObject::new_fraction(lift_poly(&numerator)?, lift_poly(&denominator)?)?)
}

/// Lifts `coefficient * monomial`.
fn lift_term(coefficient: &Rational, monomial: &Monomial, inexact: bool) -> Result<MathsObject, LiftError> {
    if coefficient.cmp0().is_eq() {
        return Err(LiftError::UnsupportedShape("a term with a zero coefficient".to_string()));
    }

    let (numerator, denominator) = monomial.split_by_sign();
    if denominator.is_one() {
        let number = MathsObject::from_numeric(Numeric { value: coefficient.clone(), inexact });
        let Some(product) = lift_product(&numerator)? else {
            return Ok(number);
        };
        return Ok(if *coefficient == 1 {
            product
        } else if *coefficient == -1 {
            MathsObject::new_mul(-1, product)?
        } else {
            MathsObject::new_mul(number, product)?
        });
    }

    let (top, bottom) = if inexact {
        (coefficient.clone(), Rational::from(1))
    } else {
        let (top, bottom) = coefficient.clone().into_numer_denom();
        (Rational::from(top), Rational::from(bottom))
    };
    let numerator = Poly::from_raw_term(top, numerator, inexact);
    let denominator = Poly::from_raw_term(bottom, denominator, false).expand();
    Ok(MathsObject::new_fraction(lift_poly(&numerator)?, lift_poly(&denominator)?)?)
}

/// The position of an atom in a lifted product: roots first, then `\pi` and `\infty`, then
/// everything else.
fn factor_class(atom: &Atom) -> u8 {
    match atom {
        Atom::Group(_) if atom.as_radicand().is_some() => 0,
        Atom::Pi => 1,
        Atom::Inf => 2,
        _ => 3,
    }
}

/// Lifts a product of atoms with positive exponents, or returns [`None`] for the empty product.
///
/// Roots with the same index are merged, so that `\sqrt{2} \sqrt{3}` lifts to `\sqrt{6}`.
fn lift_product(monomial: &Monomial) -> Result<Option<MathsObject>, LiftError> {
    let mut factors: Vec<(Atom, Rational)> = Vec::new();
    let mut radicands: Vec<(Rational, Integer)> = Vec::new();
    for (atom, exp) in monomial.factors() {
        match atom.as_radicand() {
            Some(radicand) if radicand.cmp0().is_gt() && is_integral(&radicand) => {
                let radicand = radicand.into_numer_denom().0;
                match radicands.iter_mut().find(|(index, _)| index == exp) {
                    Some((_, product)) => *product *= radicand,
                    None => radicands.push((exp.clone(), radicand)),
                }
            },
            _ => factors.push((atom.clone(), exp.clone())),
        }
    }
    factors.extend(radicands.into_iter().map(|(exp, product)| {
        (Atom::Group(Box::new(Poly::constant(Rational::from(product)))), exp)
    }));
    factors.sort_by(|(a, a_exp), (b, b_exp)| {
        factor_class(a).cmp(&factor_class(b))
            .then_with(|| b_exp.cmp(a_exp))
            .then_with(|| a.cmp(b))
    });

    let mut product = None;
    for (atom, exp) in factors {
        let factor = lift_power(&atom, exp)?;
        product = Some(match product {
            Some(product) => MathsObject::new_mul(product, factor)?,
            None => factor,
        });
    }
    Ok(product)
}

/// Lifts `atom^{exp}`.
fn lift_power(atom: &Atom, exp: Rational) -> Result<MathsObject, LiftError> {
    let base = lift_atom(atom)?;
    if exp == 1 {
        return Ok(base);
    }
    if *atom == Atom::Inf {
        return Err(LiftError::UnsupportedShape("a power of infinity".to_string()));
    }
    Ok(MathsObject::new_pow(base, MathsObject::from_numeric(Numeric::exact(exp)))?)
}

fn lift_atom(atom: &Atom) -> Result<MathsObject, LiftError> {
    match atom {
        Atom::Pi => Ok(MathsObject::pi()),
        Atom::Inf => Ok(MathsObject::inf()),
        Atom::Undefined => Err(LiftError::UnsupportedShape("an undefined value".to_string())),
        Atom::Symbol(name) => Ok(MathsObject::symbol(name.as_str())),
        Atom::Call(name, args) => {
            let argument = match args.as_slice() {
                [] => return Err(LiftError::UnsupportedShape(format!("`{}` without arguments", name))),
                [arg] => lift_poly(arg)?,
                args => MathsObject::new_collection(args.iter().map(lift_poly).collect::<Result<_, _>>()?)?,
            };
            Ok(MathsObject::new_image(MathsObject::function(name.as_str()), argument)?)
        },
        Atom::Exp(base, exp) => Ok(MathsObject::new_pow(lift_poly(base)?, lift_poly(exp)?)?),
        Atom::Group(poly) => lift_poly(poly),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::{object::ObjectKind, primitive::rat};
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    /// Lifting a node's own backend value gives back a node with the same value.
    fn assert_same_value(object: &MathsObject) -> MathsObject {
        let lifted = lift(object.backend()).unwrap();
        assert_eq!(lifted.value(), object.value(), "{}", lifted);
        lifted
    }

    #[test]
    fn constants() {
        assert_eq!(lift_poly(&Poly::zero()).unwrap(), MathsObject::integer(0));
        assert_eq!(lift_poly(&Poly::constant(rat(-7))).unwrap(), MathsObject::integer(-7));
        assert_eq!(
            lift_poly(&Poly::constant(rat((6, 8)))).unwrap(),
            MathsObject::new_fraction(3, 4).unwrap(),
        );
        assert_eq!(
            lift_poly(&Poly::decimal(rat((5, 2)))).unwrap(),
            MathsObject::decimal(2.5).unwrap(),
        );
    }

    #[test]
    fn sum_is_ordered_by_degree() {
        // 3 + x^2 - 2x
        let poly = &(&Poly::constant(rat(3)) + &Poly::symbol("x").pow(&Poly::constant(rat(2))).unwrap())
            - &(&Poly::constant(rat(2)) * &Poly::symbol("x"));
        let lifted = lift_poly(&poly).unwrap();
        let expected = MathsObject::new_add(
            MathsObject::new_add(
                x().pow(2).unwrap(),
                MathsObject::new_mul(-2, x()).unwrap(),
            ).unwrap(),
            3,
        ).unwrap();
        assert_eq!(lifted, expected);
    }

    #[test]
    fn coefficient_comes_first() {
        let poly = &Poly::constant(rat(-1)) * &Poly::pi();
        assert_eq!(lift_poly(&poly).unwrap(), MathsObject::new_mul(-1, MathsObject::pi()).unwrap());

        // \pi r^2 h
        let r = Poly::symbol("r");
        let h = Poly::symbol("h");
        let poly = &(&h * &r.pow(&Poly::constant(rat(2))).unwrap()) * &Poly::pi();
        let expected = MathsObject::new_mul(
            MathsObject::new_mul(MathsObject::pi(), MathsObject::symbol("r").pow(2).unwrap()).unwrap(),
            MathsObject::symbol("h"),
        ).unwrap();
        assert_eq!(lift_poly(&poly).unwrap(), expected);
    }

    #[test]
    fn negative_exponents_become_fractions() {
        let expr = MathsObject::new_fraction(3, (x() + 1).unwrap()).unwrap();
        let lifted = assert_same_value(&expr);
        assert_eq!(lifted, expr);

        let expr = MathsObject::new_fraction(x(), 2).unwrap();
        let lifted = assert_same_value(&expr);
        assert_eq!(lifted, MathsObject::new_mul(MathsObject::new_fraction(1, 2).unwrap(), x()).unwrap());
    }

    #[test]
    fn rational_sums_become_one_fraction() {
        let numerator = MathsObject::new_add(x().pow(2).unwrap(), -1).unwrap();
        let denominator = MathsObject::new_add(x(), -1).unwrap();
        let quotient = MathsObject::new_fraction(numerator, denominator).unwrap();
        assert_eq!(lift(quotient.backend()).unwrap(), (x() + 1).unwrap());

        let expr = MathsObject::new_fraction(
            (x() + 1).unwrap(),
            MathsObject::new_add(MathsObject::new_mul(2, x()).unwrap(), 3).unwrap(),
        ).unwrap();
        let lifted = assert_same_value(&expr);
        assert_eq!(lifted, expr);
        assert_eq!(lift(lifted.backend()).unwrap(), lifted);
    }

    #[test]
    fn roots_are_merged() {
        let root = |n: i32| MathsObject::new_pow(n, MathsObject::new_fraction(1, 2).unwrap()).unwrap();
        let product = MathsObject::new_mul(root(2), root(3)).unwrap();
        assert_eq!(assert_same_value(&product), root(6));

        let eight = root(8);
        assert_eq!(assert_same_value(&eight), MathsObject::new_mul(2, root(2)).unwrap());
    }

    #[test]
    fn images_and_structures() {
        let image = MathsObject::new_image(
            MathsObject::function("f"),
            MathsObject::new_collection(vec![x(), MathsObject::integer(2)]).unwrap(),
        ).unwrap();
        assert_eq!(assert_same_value(&image), image);

        let interval = MathsObject::new_interval(0, MathsObject::inf(), false, true).unwrap();
        assert_eq!(lift(interval.backend()).unwrap(), interval);

        let relation = x().greater_than(MathsObject::new_fraction(2, 4).unwrap()).unwrap();
        let lifted = lift(relation.backend()).unwrap();
        assert!(matches!(lifted.kind(), ObjectKind::StrictGreaterThan(..)));
        assert_eq!(lifted, x().greater_than(MathsObject::new_fraction(1, 2).unwrap()).unwrap());
    }

    #[test]
    fn unsupported_shapes() {
        let squared_infinity = Poly::inf().pow(&Poly::constant(rat(2))).unwrap();
        assert!(matches!(lift_poly(&squared_infinity), Err(LiftError::UnsupportedShape(_))));

        let indeterminate = &Poly::inf() - &Poly::inf();
        assert!(matches!(lift_poly(&indeterminate), Err(LiftError::UnsupportedShape(_))));

        let no_arguments = Poly::call("f", vec![]);
        assert!(matches!(lift_poly(&no_arguments), Err(LiftError::UnsupportedShape(_))));
    }
}
