//! LaTeX rendering of [`MathsObject`]s.
//!
//! The renderer writes coefficients before the factor they multiply (`3x^{2}`, `\dfrac{1}{2}\pi`)
//! and uses an explicit `\times` between two numbers. A sum whose right operand is negative is
//! written as a subtraction, and the subtracted operand is wrapped in `\left( \right)` when it is
//! compound, so that a double minus is never written:
//!
//! ```
//! use teachers_maths::MathsObject;
//!
//! let x = MathsObject::symbol("x");
//! let sum = MathsObject::new_add(x.clone(), -5).unwrap();
//! assert_eq!(sum.latex(), "x -5");
//!
//! let y_plus_z = MathsObject::new_add(MathsObject::symbol("y"), MathsObject::symbol("z")).unwrap();
//! let difference = MathsObject::new_add(x, (-y_plus_z).unwrap()).unwrap();
//! assert_eq!(difference.latex(), r"x - \left(y + z\right)");
//! ```

use std::fmt::{Display, Formatter, Result};
use crate::{
    object::{MathsObject, Numeric, ObjectKind},
    primitive::is_integral,
};

/// A trait for types that can be formatted as LaTeX.
pub trait Latex {
    /// Format the value as LaTeX.
    fn fmt_latex(&self, f: &mut Formatter) -> Result;

    /// Wraps the value in a [`LatexFormatter`], which implements [`Display`].
    fn as_display(&self) -> LatexFormatter<'_, Self> {
        LatexFormatter(self)
    }
}

/// A wrapper type that implements [`Display`] for any type that implements [`Latex`].
pub struct LatexFormatter<'a, T: ?Sized>(&'a T);

impl<T: ?Sized> Display for LatexFormatter<'_, T>
where
    T: Latex,
{
    fn fmt(&self, f: &mut Formatter) -> Result {
        self.0.fmt_latex(f)
    }
}

/// Writes `latex` wrapped in `\left( \right)`.
fn fmt_paren(f: &mut Formatter, latex: &str) -> Result {
    write!(f, "\\left({}\\right)", latex)
}

/// Writes the operand, wrapped if `wrap` is true.
fn fmt_operand(f: &mut Formatter, latex: &str, wrap: bool) -> Result {
    if wrap {
        fmt_paren(f, latex)
    } else {
        write!(f, "{}", latex)
    }
}

fn is_add(object: &MathsObject) -> bool {
    matches!(object.kind(), ObjectKind::Add(..))
}

/// Numbers, and integer powers of numbers, which are multiplied with an explicit `\times`.
fn is_numeric_like(object: &MathsObject) -> bool {
    match object.kind() {
        ObjectKind::Integer(_) | ObjectKind::Decimal(_) => true,
        ObjectKind::Fraction(..) => object.is_numeric(),
        ObjectKind::Pow(base, exp) => base.is_numeric() && exp.as_integer().is_some(),
        _ => false,
    }
}

/// The number of factors of a product that are not numbers.
fn non_numeric_factors(object: &MathsObject) -> usize {
    match object.kind() {
        ObjectKind::Mul(left, right) => non_numeric_factors(left) + non_numeric_factors(right),
        _ if object.is_numeric() => 0,
        _ => 1,
    }
}

/// Returns true if a subtracted operand must be wrapped in parentheses.
fn is_compound(object: &MathsObject) -> bool {
    match object.kind() {
        ObjectKind::Add(..) | ObjectKind::Fraction(..) => true,
        ObjectKind::Mul(..) => non_numeric_factors(object) > 1,
        _ => false,
    }
}

fn opposite(numeric: Numeric) -> MathsObject {
    let Numeric { value, inexact } = numeric;
    MathsObject::from_numeric(Numeric { value: -value, inexact })
}

/// If `object` is written with a leading minus sign, returns the operand without it.
///
/// `-x`, `-5`, `-\dfrac{3}{4}`, `-2x` and `-2xy` are negations; `x - 1` is not. The sign of a
/// product is the sign of its leftmost factor.
fn negated(object: &MathsObject) -> Option<MathsObject> {
    match object.kind() {
        ObjectKind::Mul(left, right) if left.is_integer(-1) => Some((**right).clone()),
        ObjectKind::Integer(_) | ObjectKind::Decimal(_) if object.is_negative_number() => {
            object.as_numeric().map(opposite)
        },
        ObjectKind::Fraction(numerator, denominator) => {
            let n = numerator.as_integer().filter(|n| n.cmp0().is_lt())?;
            MathsObject::new_fraction(-n.clone(), (**denominator).clone()).ok()
        },
        ObjectKind::Mul(left, right) => {
            let left = negated(left)?;
            if left.is_integer(1) {
                Some((**right).clone())
            } else {
                MathsObject::new_mul(left, (**right).clone()).ok()
            }
        },
        _ => None,
    }
}

fn fmt_add(f: &mut Formatter, left: &MathsObject, right: &MathsObject) -> Result {
    left.fmt_latex(f)?;
    match negated(right) {
        Some(negated) => {
            let latex = negated.latex();
            if is_compound(&negated) || latex.starts_with('-') {
                write!(f, " - ")?;
                fmt_paren(f, &latex)
            } else {
                write!(f, " -{}", latex)
            }
        },
        None => {
            let latex = right.latex();
            write!(f, " + ")?;
            fmt_operand(f, &latex, latex.starts_with('-'))
        },
    }
}

/// Returns true if `latex` ends with a command name, such as `\pi`, that a letter written right
/// after it would extend.
fn ends_with_command(latex: &str) -> bool {
    let rest = latex.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    rest.len() < latex.len() && rest.ends_with('\\')
}

fn fmt_mul(f: &mut Formatter, left: &MathsObject, right: &MathsObject) -> Result {
    let right_latex = right.latex();
    let right_negative = right_latex.starts_with('-');

    if left.is_integer(-1) {
        write!(f, "-")?;
        return fmt_operand(f, &right_latex, is_add(right) || right_negative);
    }

    let fraction_or_add = |object: &MathsObject| {
        matches!(object.kind(), ObjectKind::Fraction(..) | ObjectKind::Add(..))
    };
    let mul_or_add = |object: &MathsObject| {
        matches!(object.kind(), ObjectKind::Mul(..) | ObjectKind::Add(..))
    };

    let times = (is_numeric_like(left) && is_numeric_like(right))
        || (fraction_or_add(left) && fraction_or_add(right))
        || (mul_or_add(left) && mul_or_add(right))
        || (!left.is_numeric() && right.is_numeric());

    let left_latex = left.latex();
    let wrap_right = is_add(right) || right_negative;
    fmt_operand(f, &left_latex, is_add(left))?;
    if times {
        write!(f, " \\times ")?;
    } else if !wrap_right
        && !is_add(left)
        && ends_with_command(&left_latex)
        && right_latex.starts_with(|c: char| c.is_ascii_alphabetic())
    {
        write!(f, " ")?;
    }
    fmt_operand(f, &right_latex, wrap_right)
}

fn fmt_pow(f: &mut Formatter, base: &MathsObject, exp: &MathsObject) -> Result {
    if let ObjectKind::Fraction(numerator, denominator) = exp.kind() {
        if numerator.is_integer(1) {
            if denominator.is_integer(2) {
                return write!(f, "\\sqrt{{{}}}", base.as_display());
            }
            if let Some(index) = denominator.as_integer() {
                return write!(f, "\\sqrt[{}]{{{}}}", index, base.as_display());
            }
        }
    }

    let latex = base.latex();
    let wrap = matches!(
        base.kind(),
        ObjectKind::Add(..) | ObjectKind::Mul(..) | ObjectKind::Fraction(..) | ObjectKind::Pow(..)
    ) || latex.starts_with('-');
    fmt_operand(f, &latex, wrap)?;
    write!(f, "^{{{}}}", exp.as_display())
}

fn fmt_fraction(f: &mut Formatter, numerator: &MathsObject, denominator: &MathsObject) -> Result {
    match numerator.as_integer() {
        Some(n) if n.cmp0().is_lt() => {
            write!(f, "-\\dfrac{{{}}}{{{}}}", n.clone().abs(), denominator.as_display())
        },
        _ => write!(f, "\\dfrac{{{}}}{{{}}}", numerator.as_display(), denominator.as_display()),
    }
}

/// Writes the name of a function. Names longer than one letter, such as `sin`, are commands.
fn fmt_function_name(f: &mut Formatter, name: &str) -> Result {
    if name.chars().count() > 1 {
        write!(f, "\\")?;
    }
    write!(f, "{}", name)
}

impl Latex for MathsObject {
    fn fmt_latex(&self, f: &mut Formatter) -> Result {
        match self.kind() {
            ObjectKind::Integer(n) => write!(f, "{}", n),
            ObjectKind::Decimal(value) => {
                if is_integral(value) {
                    write!(f, "{}", value.numer())
                } else {
                    write!(f, "{}", value.to_f64())
                }
            },
            ObjectKind::Symbol(name) => write!(f, "{}", name),
            ObjectKind::Function(name) => fmt_function_name(f, name),
            ObjectKind::Inf => write!(f, "\\infty"),
            ObjectKind::Pi => write!(f, "\\pi"),
            ObjectKind::Add(left, right) => fmt_add(f, left, right),
            ObjectKind::Mul(left, right) => fmt_mul(f, left, right),
            ObjectKind::Pow(base, exp) => fmt_pow(f, base, exp),
            ObjectKind::Fraction(numerator, denominator) => fmt_fraction(f, numerator, denominator),
            ObjectKind::Equality(left, right) => {
                write!(f, "{} = {}", left.as_display(), right.as_display())
            },
            ObjectKind::StrictGreaterThan(left, right) => {
                write!(f, "{} > {}", left.as_display(), right.as_display())
            },
            ObjectKind::Interval { left, right, left_open, right_open } => {
                let open = if *left_open { "\\rbracket " } else { "\\lbracket " };
                let close = if *right_open { "\\lbracket" } else { "\\rbracket" };
                write!(f, "{}{}; {}{}", open, left.as_display(), right.as_display(), close)
            },
            ObjectKind::Collection(elements) => {
                write!(f, "\\left(")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    element.fmt_latex(f)?;
                }
                write!(f, "\\right)")
            },
            ObjectKind::Image { function, argument } => {
                fmt_function_name(f, function)?;
                write!(f, "({})", argument.as_display())
            },
        }
    }
}

impl MathsObject {
    /// Renders the expression as LaTeX.
    pub fn latex(&self) -> String {
        self.as_display().to_string()
    }
}
