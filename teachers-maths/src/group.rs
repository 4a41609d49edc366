//! Grouping of like terms by descending power of a symbol.

use thiserror::Error;
use tracing::debug;
use crate::{
    backend::Poly,
    error::{ConstructionError, LiftError},
    lift::lift_poly,
    object::MathsObject,
};

/// The reasons an expression cannot be grouped. [`group_terms`] returns its input unchanged in
/// every case.
#[derive(Debug, Error)]
enum GroupError {
    #[error("the expression is not a value")]
    NotAValue,

    #[error("the expression is not a polynomial in `{0}`")]
    NotPolynomial(String),

    #[error(transparent)]
    Lift(#[from] LiftError),

    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

/// `symbol^k`, or `None` for `k = 0`.
fn power(symbol: &str, k: u32) -> Result<Option<MathsObject>, ConstructionError> {
    Ok(match k {
        0 => None,
        1 => Some(MathsObject::symbol(symbol)),
        _ => Some(MathsObject::new_pow(MathsObject::symbol(symbol), MathsObject::integer(k))?),
    })
}

/// `coefficient \cdot symbol^k`, with a coefficient of `1` or `-1` written as a sign.
fn term(coefficient: &Poly, symbol: &str, k: u32) -> Result<MathsObject, GroupError> {
    let Some(power) = power(symbol, k)? else {
        return Ok(lift_poly(coefficient)?);
    };

    Ok(match coefficient.as_constant() {
        Some(c) if c == 1 => power,
        Some(c) if c == -1 => MathsObject::new_mul(-1, power)?,
        _ => MathsObject::new_mul(lift_poly(coefficient)?, power)?,
    })
}

fn try_group(expr: &MathsObject, symbol: Option<&str>) -> Result<MathsObject, GroupError> {
    let poly = expr.value().ok_or(GroupError::NotAValue)?.expand();
    let symbol = match symbol {
        Some(symbol) => symbol.to_string(),
        None => match poly.free_symbols().into_iter().next() {
            Some(symbol) => symbol,
            None => return Ok(lift_poly(&poly)?),
        },
    };
    let degree = poly.degree(&symbol).ok_or_else(|| GroupError::NotPolynomial(symbol.clone()))?;

    let mut grouped: Option<MathsObject> = None;
    for k in (0..=degree).rev() {
        let coefficient = poly.coeff(&symbol, k);
        if coefficient.is_empty() {
            continue;
        }
        let term = term(&coefficient, &symbol, k)?;
        grouped = Some(match grouped {
            Some(sum) => MathsObject::new_add(sum, term)?,
            None => term,
        });
    }

    let grouped = grouped.unwrap_or_else(|| MathsObject::integer(0));
    debug!(target: "group", symbol = %symbol, degree, result = %grouped, "grouped terms");
    Ok(grouped)
}

/// Rewrites an expression as a sum of terms ordered by descending power of `symbol`, each term
/// being a coefficient followed by the power of the symbol.
///
/// Without a symbol, the first free symbol of the expression in alphabetical order is used.
/// Function applications, such as `\sin x`, are opaque and grouped with the constant term. The
/// result has the same value as `expr`.
///
/// If the expression is not a polynomial in the symbol, for example because the symbol appears
/// with a negative exponent, the expression is returned unchanged.
///
/// ```
/// use teachers_maths::{group_terms, MathsObject};
///
/// let x = MathsObject::symbol("x");
/// let expr = MathsObject::new_add(MathsObject::integer(3), (x.clone() * x).unwrap()).unwrap();
/// assert_eq!(group_terms(&expr, None).latex(), "x^{2} + 3");
/// ```
pub fn group_terms(expr: &MathsObject, symbol: Option<&str>) -> MathsObject {
    try_group(expr, symbol).unwrap_or_else(|err| {
        debug!(target: "group", expr = %expr, error = %err, "cannot group terms");
        expr.clone()
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    /// `a \cdot x + b`
    fn linear(a: i32, b: i32) -> MathsObject {
        MathsObject::new_add(MathsObject::new_mul(a, x()).unwrap(), b).unwrap()
    }

    #[test]
    fn product_of_two_binomials() {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();

        let expr = MathsObject::new_mul(linear(3, -8), linear(4, -1)).unwrap();
        let grouped = group_terms(&expr.simplified(), None);
        assert_eq!(grouped.latex(), "12x^{2} -35x + 8");
    }

    #[test]
    fn product_of_three_binomials() {
        let expr = MathsObject::new_mul(
            MathsObject::new_mul(linear(1, 1), linear(1, 2)).unwrap(),
            linear(1, 3),
        ).unwrap();
        let grouped = group_terms(&expr.simplified(), None);
        assert_eq!(grouped.latex(), "x^{3} + 6x^{2} + 11x + 6");
    }

    #[test]
    fn idempotent_and_value_preserving() {
        let expr = MathsObject::new_pow(linear(2, -1), 3).unwrap();
        let grouped = group_terms(&expr, Some("x"));
        assert_eq!(group_terms(&grouped, Some("x")), grouped);
        assert_eq!(grouped.value(), Some(&expr.value().unwrap().expand()));
        assert_eq!(grouped.latex(), "8x^{3} -12x^{2} + 6x -1");
    }

    #[test]
    fn other_symbols_are_coefficients() {
        let y = MathsObject::symbol("y");
        let expr = MathsObject::new_add(
            MathsObject::new_add(
                MathsObject::new_mul(x(), y.clone().pow(2).unwrap()).unwrap(),
                MathsObject::new_mul(2, y).unwrap(),
            ).unwrap(),
            x(),
        ).unwrap();
        assert_eq!(group_terms(&expr, Some("y")).latex(), "xy^{2} + 2y + x");
        assert_eq!(group_terms(&expr, Some("x")).latex(), r"\left(y^{2} + 1\right)x + 2y");
    }

    #[test]
    fn signs_of_unit_coefficients() {
        let expr = MathsObject::new_add((-x().pow(2).unwrap()).unwrap(), x()).unwrap();
        assert_eq!(group_terms(&expr, None).latex(), "-x^{2} + x");
    }

    #[test]
    fn square_of_a_difference() {
        let difference = (x() - MathsObject::symbol("y")).unwrap();
        let square = MathsObject::new_pow(difference, 2).unwrap();
        let latex = group_terms(&square, Some("x")).latex();
        assert_eq!(latex, r"x^{2} - \left(2yx\right) + y^{2}");
        assert!(!latex.contains("+ \\left(-"));
    }

    #[test]
    fn ungroupable_expressions_are_unchanged() {
        let reciprocal = MathsObject::new_add(MathsObject::new_fraction(1, x()).unwrap(), x()).unwrap();
        assert_eq!(group_terms(&reciprocal, None), reciprocal);

        let equation = MathsObject::new_equality(x(), 2).unwrap();
        assert_eq!(group_terms(&equation, None), equation);

        let zero = (x() - x()).unwrap();
        assert_eq!(group_terms(&zero, None), MathsObject::integer(0));
    }
}
