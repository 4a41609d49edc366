/// Possible simplification steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// `0+a = a`
    /// `a+0 = a`
    AddZero,

    /// `\dfrac{1}{2}+3 = \dfrac{7}{2}`
    AddNumbers,

    /// `0*a = 0`
    /// `a*0 = 0`
    MultiplyZero,

    /// `1*a = a`
    /// `a*1 = a`
    MultiplyOne,

    /// `2*\dfrac{3}{4} = \dfrac{3}{2}`
    MultiplyNumbers,

    /// `2*(3*a) = 6*a`
    CombineCoefficients,

    /// `a*2 = 2*a`
    CoefficientFirst,

    /// `(a+b)*(c+d) = a*c + a*d + b*c + b*d`
    Foil,

    /// `a^0 = 1`
    PowerZero,

    /// `a^1 = a`
    PowerOne,

    /// `a^{-1} = \dfrac{1}{a}`
    /// `a^{-n} = \dfrac{1}{a^n}`
    NegativeExponent,

    /// `2^{3} = 8`
    /// `8^{\frac{1}{3}} = 2`
    PowerNumbers,

    /// `(a+b)^2 = a^2 + 2*a*b + b^2`
    SquareOfSum,

    /// `\dfrac{a}{1} = a`
    DivideOne,

    /// `\dfrac{a}{-1} = -a`
    DivideMinusOne,

    /// `\dfrac{a}{a} = 1`
    DivideSelf,

    /// `\dfrac{0}{a} = 0`
    ZeroNumerator,

    /// `\dfrac{6}{8} = \dfrac{3}{4}`
    /// `\dfrac{8}{4} = 2`
    ReduceFraction,

    /// `\dfrac{a}{-2} = \dfrac{-a}{2}`
    NegativeDenominator,

    /// `2.0 = 2`
    DecimalToInteger,

    /// The node was expanded by the backend and rebuilt from its canonical form.
    Fallback,
}
