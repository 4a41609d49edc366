//! Numeric evaluation of backend values.

use rug::{ops::Pow, Float};
use std::collections::HashMap;
use crate::{
    consts::{INFINITY, NAN, PI, ZERO},
    error::NotFinite,
    primitive::{float, is_integral},
};
use super::{atom::Atom, poly::Poly};

/// Applies a named function to a single argument.
fn apply(name: &str, arg: Float) -> Result<Float, NotFinite> {
    Ok(match name {
        "exp" => arg.exp(),
        // `\log` is the natural logarithm
        "ln" | "log" => arg.ln(),
        "sqrt" => arg.sqrt(),
        "sin" => arg.sin(),
        "cos" => arg.cos(),
        "tan" => arg.tan(),
        "arcsin" => arg.asin(),
        "arccos" => arg.acos(),
        "arctan" => arg.atan(),
        "sinh" => arg.sinh(),
        "cosh" => arg.cosh(),
        "tanh" => arg.tanh(),
        _ => return Err(NotFinite::UnknownFunction(name.to_string())),
    })
}

impl Atom {
    fn eval(&self, bindings: &HashMap<String, f64>) -> Result<Float, NotFinite> {
        match self {
            Atom::Pi => Ok(PI.clone()),
            Atom::Inf => Ok(INFINITY.clone()),
            Atom::Undefined => Ok(NAN.clone()),
            Atom::Symbol(name) => bindings.get(name)
                .map(|&value| float(value))
                .ok_or_else(|| NotFinite::UnboundSymbol(name.clone())),
            Atom::Call(name, args) => match args.as_slice() {
                [arg] => apply(name, arg.eval(bindings)?),
                _ => Err(NotFinite::UnknownFunction(name.clone())),
            },
            Atom::Exp(base, exp) => Ok(base.eval(bindings)?.pow(exp.eval(bindings)?)),
            Atom::Group(poly) => poly.eval(bindings),
        }
    }
}

impl Poly {
    /// Evaluates the polynomial at full precision. The result may be infinite or NaN.
    pub(crate) fn eval(&self, bindings: &HashMap<String, f64>) -> Result<Float, NotFinite> {
        let mut sum = ZERO.clone();
        for (monomial, coefficient) in self.terms() {
            let mut product = float(coefficient);
            for (atom, exp) in monomial.factors() {
                let value = atom.eval(bindings)?;
                let factor = match exp.numer().to_i32().filter(|_| is_integral(exp)) {
                    Some(n) => value.pow(n),
                    None => value.pow(float(exp)),
                };
                product *= factor;
            }
            sum += product;
        }
        Ok(sum)
    }

    /// Evaluates the polynomial with the given values bound to its symbols.
    pub fn eval_float(&self, bindings: &HashMap<String, f64>) -> Result<f64, NotFinite> {
        let value = self.eval(bindings)?;
        if value.is_finite() {
            Ok(value.to_f64())
        } else {
            Err(NotFinite::Undefined)
        }
    }

    /// Returns an approximation of a constant polynomial, which may be infinite. Returns [`None`]
    /// if the polynomial has free symbols or is undefined.
    pub fn approximate(&self) -> Option<f64> {
        let value = self.eval(&HashMap::new()).ok()?;
        if value.is_nan() {
            None
        } else {
            Some(value.to_f64())
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::{
        afe_abs,
        afe_relative_error_msg,
        afe_is_relative_eq,
        assert_float_relative_eq,
    };
    use pretty_assertions::assert_eq;
    use crate::primitive::rat;
    use super::*;

    #[test]
    fn polynomial_at_a_point() {
        // 3x^2 - 35x + 8 at x = 2
        let x = Poly::symbol("x");
        let poly = &(&(&Poly::constant(rat(3)) * &x.pow(&Poly::constant(rat(2))).unwrap())
            - &(&Poly::constant(rat(35)) * &x))
            + &Poly::constant(rat(8));
        let bindings = HashMap::from([("x".to_string(), 2.0)]);
        assert_float_relative_eq!(poly.eval_float(&bindings).unwrap(), -50.0, 1e-12);
    }

    #[test]
    fn constants_and_functions() {
        let value = (&Poly::pi() * &Poly::call("sin", vec![Poly::constant(rat((1, 2)))]))
            .eval_float(&HashMap::new())
            .unwrap();
        assert_float_relative_eq!(value, std::f64::consts::PI * 0.5f64.sin(), 1e-12);

        let root = Poly::constant(rat(2)).pow(&Poly::constant(rat((1, 2)))).unwrap();
        assert_float_relative_eq!(root.eval_float(&HashMap::new()).unwrap(), std::f64::consts::SQRT_2, 1e-12);
    }

    #[test]
    fn root_of_a_square_is_positive() {
        let x = Poly::symbol("x");
        let root = x.pow(&Poly::constant(rat(2))).unwrap().pow(&Poly::constant(rat((1, 2)))).unwrap();
        let bindings = HashMap::from([("x".to_string(), -3.0)]);
        assert_float_relative_eq!(root.eval_float(&bindings).unwrap(), 3.0, 1e-12);
    }

    #[test]
    fn failures() {
        let x = Poly::symbol("x");
        assert_eq!(x.eval_float(&HashMap::new()), Err(NotFinite::UnboundSymbol("x".to_string())));

        let unknown = Poly::call("f", vec![x]);
        let bindings = HashMap::from([("x".to_string(), 1.0)]);
        assert_eq!(unknown.eval_float(&bindings), Err(NotFinite::UnknownFunction("f".to_string())));

        let log_zero = Poly::call("ln", vec![Poly::zero()]);
        assert_eq!(log_zero.eval_float(&HashMap::new()), Err(NotFinite::Undefined));
        assert_eq!(Poly::inf().eval_float(&HashMap::new()), Err(NotFinite::Undefined));
        assert_eq!(Poly::inf().approximate(), Some(f64::INFINITY));

        let indeterminate = &Poly::inf() - &Poly::inf();
        assert_eq!(indeterminate.eval_float(&HashMap::new()), Err(NotFinite::Undefined));
        assert_eq!(indeterminate.approximate(), None);
    }
}
