//! Conversion of parsed LaTeX answers into [`MathsObject`]s.

use rug::Integer;
use teachers_parser::parser::{
    ast::{Expr, LitNum, Literal},
    op::{BinOpKind, UnaryOpKind},
};
use crate::{
    error::ConstructionError,
    object::MathsObject,
    primitive::rat_from_decimal_str,
};

/// Fails with the error of a number literal the parser accepted but that is not a number.
fn invalid_number() -> ConstructionError {
    ConstructionError::TypeMismatch { expected: "a number", found: "an invalid number literal" }
}

fn from_number(num: &LitNum) -> Result<MathsObject, ConstructionError> {
    if num.is_decimal() {
        let value = rat_from_decimal_str(&num.value).ok_or_else(invalid_number)?;
        Ok(MathsObject::decimal_from_rational(value))
    } else {
        let value = num.value.parse::<Integer>().map_err(|_| invalid_number())?;
        Ok(MathsObject::integer(value))
    }
}

fn from_literal(literal: &Literal) -> Result<MathsObject, ConstructionError> {
    Ok(match literal {
        Literal::Number(num) => from_number(num)?,
        Literal::Symbol(sym) => MathsObject::symbol(sym.name.as_str()),
        Literal::Pi(_) => MathsObject::pi(),
        Literal::Infinity(_) => MathsObject::inf(),
    })
}

fn from_all(exprs: &[Expr]) -> Result<Vec<MathsObject>, ConstructionError> {
    exprs.iter().map(MathsObject::from_ast).collect()
}

impl MathsObject {
    /// Builds an expression from a parsed LaTeX answer.
    ///
    /// The conversion does not simplify: `a - b` becomes `a + (-1 \cdot b)`, `\frac{6}{8}` stays
    /// a fraction of `6` and `8`, and `a < b` becomes `b > a`. Roots become powers with a
    /// fractional exponent, and a function applied to several arguments is applied to a
    /// collection.
    ///
    /// ```
    /// use teachers_maths::MathsObject;
    ///
    /// let expr = teachers_parser::parse(r"\frac{6}{8}").unwrap();
    /// assert_eq!(MathsObject::from_ast(&expr).unwrap(), MathsObject::new_fraction(6, 8).unwrap());
    /// ```
    pub fn from_ast(expr: &Expr) -> Result<Self, ConstructionError> {
        match expr {
            Expr::Literal(literal) => from_literal(literal),
            Expr::Paren(paren) => Self::from_ast(&paren.expr),
            Expr::Tuple(tuple) => Self::new_collection(from_all(&tuple.elements)?),
            Expr::Frac(frac) => Self::new_fraction(
                Self::from_ast(&frac.numerator)?,
                Self::from_ast(&frac.denominator)?,
            ),
            Expr::Sqrt(sqrt) => {
                let index = match &sqrt.index {
                    Some(index) => Self::from_ast(index)?,
                    None => Self::integer(2),
                };
                Self::new_pow(Self::from_ast(&sqrt.radicand)?, Self::new_fraction(1, index)?)
            },
            Expr::Call(call) => {
                let argument = match call.args.as_slice() {
                    [arg] => Self::from_ast(arg)?,
                    args => Self::new_collection(from_all(args)?)?,
                };
                Self::new_image(Self::function(call.name.as_str()), argument)
            },
            Expr::Interval(interval) => Self::new_interval(
                Self::from_ast(&interval.left)?,
                Self::from_ast(&interval.right)?,
                interval.left_open,
                interval.right_open,
            ),
            Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => {
                    let operand = Self::from_ast(&unary.operand)?;
                    -operand
                },
            },
            Expr::Binary(binary) => {
                let lhs = Self::from_ast(&binary.lhs)?;
                let rhs = Self::from_ast(&binary.rhs)?;
                match binary.op.kind {
                    BinOpKind::Exp => Self::new_pow(lhs, rhs),
                    BinOpKind::Mul => Self::new_mul(lhs, rhs),
                    BinOpKind::Div => Self::new_fraction(lhs, rhs),
                    BinOpKind::Add => Self::new_add(lhs, rhs),
                    BinOpKind::Sub => lhs - rhs,
                    BinOpKind::Eq => Self::new_equality(lhs, rhs),
                    BinOpKind::Greater => Self::new_greater_than(lhs, rhs),
                    BinOpKind::Less => lhs.less_than(rhs),
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use teachers_parser::{parse, parse_with_functions};
    use super::*;

    fn convert(source: &str) -> MathsObject {
        MathsObject::from_ast(&parse(source).unwrap()).unwrap()
    }

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    #[test]
    fn numbers() {
        assert_eq!(convert("16"), MathsObject::integer(16));
        assert_eq!(convert("3.14"), MathsObject::decimal_ratio(314, 100).unwrap());
        assert_eq!(convert("-5"), MathsObject::integer(-5));
        assert_eq!(convert("123456789012345678901234567890").as_integer().map(|n| n.significant_bits()), Some(97));
    }

    #[test]
    fn operators() {
        assert_eq!(convert("3x"), MathsObject::new_mul(3, x()).unwrap());
        assert_eq!(
            convert("2x^2 - 3"),
            MathsObject::new_add(MathsObject::new_mul(2, x().pow(2).unwrap()).unwrap(), -3).unwrap(),
        );
        assert_eq!(convert("-x"), MathsObject::new_mul(-1, x()).unwrap());
        assert_eq!(
            convert(r"-\left(x + 1\right)"),
            MathsObject::new_mul(-1, (x() + 1).unwrap()).unwrap(),
        );
        assert_eq!(convert(r"\frac{3}{4}"), MathsObject::new_fraction(3, 4).unwrap());
        assert_eq!(convert("x / 2"), MathsObject::new_fraction(x(), 2).unwrap());
    }

    #[test]
    fn roots() {
        let half = MathsObject::new_fraction(1, 2).unwrap();
        assert_eq!(convert(r"\sqrt{2}"), MathsObject::new_pow(2, half).unwrap());

        let third = MathsObject::new_fraction(1, 3).unwrap();
        assert_eq!(convert(r"\sqrt[3]{8}"), MathsObject::new_pow(8, third).unwrap());
    }

    #[test]
    fn relations() {
        assert_eq!(convert("x + 2 = 5"), MathsObject::new_equality((x() + 2).unwrap(), 5).unwrap());
        assert_eq!(convert("x < 2"), MathsObject::new_greater_than(2, x()).unwrap());
        assert_eq!(convert("x > 2"), MathsObject::new_greater_than(x(), 2).unwrap());
    }

    #[test]
    fn structures() {
        assert_eq!(
            convert("]0; 5]"),
            MathsObject::new_interval(0, 5, true, false).unwrap(),
        );
        assert_eq!(
            convert(r"\left(1, y\right)"),
            MathsObject::new_collection(vec![MathsObject::integer(1), MathsObject::symbol("y")]).unwrap(),
        );
        assert_eq!(convert(r"\pi"), MathsObject::pi());
        assert_eq!(convert(r"\infty"), MathsObject::inf());
    }

    #[test]
    fn calls() {
        let call = MathsObject::from_ast(&parse_with_functions("f(x)", &["f"]).unwrap()).unwrap();
        assert_eq!(call, MathsObject::new_image(MathsObject::function("f"), x()).unwrap());

        let sine = convert(r"\sin x");
        assert_eq!(sine, MathsObject::new_image(MathsObject::function("sin"), x()).unwrap());
    }

    #[test]
    fn invalid_values() {
        let err = MathsObject::from_ast(&parse(r"\frac{1}{0}").unwrap()).unwrap_err();
        assert_eq!(err, ConstructionError::InvalidDenominator);
    }
}
