//! Normalization of the LaTeX produced by the answer editor, so that equal answers compare equal
//! as text.

use once_cell::sync::Lazy;
use regex::Regex;

/// `\frac16` or `\dfrac16`: a fraction whose arguments are single characters without braces.
static BARE_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\[dt]?frac([a-zA-Z0-9])([a-zA-Z0-9])").expect("valid regex literal")
});

/// A relation glued to both of its operands, such as `x=2`.
static TIGHT_RELATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([a-zA-Z0-9)\]}])([><=≥≤≠])([a-zA-Z0-9(\[{])").expect("valid regex literal")
});

/// `\frac` as a whole command, not the tail of `\dfrac`.
static PLAIN_FRACTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\frac\b").expect("valid regex literal")
});

/// Normalizes the raw LaTeX of a learner answer.
///
/// - `\frac16` becomes `\frac{1}{6}`,
/// - `\dfrac` and `\tfrac` become `\frac`,
/// - `\left(` and `\right)` become plain parentheses,
/// - the French decimal separator `{,}` becomes `.` (a bare `0,75` is kept and rejected by the
///   parser, since the comma also separates tuple elements),
/// - relations get a space on each side.
pub fn clean(raw: &str) -> String {
    let result = BARE_FRACTION.replace_all(raw.trim(), r"\frac{$1}{$2}");
    let result = result
        .replace("\\dfrac", "\\frac")
        .replace("\\tfrac", "\\frac")
        .replace("\\left(", "(")
        .replace("\\right)", ")")
        .replace("{,}", ".");
    TIGHT_RELATION.replace_all(&result, "$1 $2 $3").into_owned()
}

/// Brings LaTeX rendered from an expression to the editor convention, for textual comparison with
/// a cleaned answer.
pub fn clean_reference(latex: &str) -> String {
    latex.replace("\\dfrac", "\\frac")
}

/// Turns every `\frac` into `\dfrac`, which reads better in displayed answers.
pub fn for_display(latex: &str) -> String {
    PLAIN_FRACTION.replace_all(latex, "\\dfrac").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn bare_fractions() {
        assert_eq!(clean("\\frac16"), "\\frac{1}{6}");
        assert_eq!(clean("\\dfrac3x+1"), "\\frac{3}{x}+1");
        assert_eq!(clean("\\frac{12}{5}"), "\\frac{12}{5}");
    }

    #[test]
    fn delimiters() {
        assert_eq!(clean("2\\left(x+1\\right)"), "2(x+1)");
        assert_eq!(clean("\\left[0;1\\right]"), "\\left[0;1\\right]");
    }

    #[test]
    fn french_decimal_separator() {
        assert_eq!(clean("2{,}5"), "2.5");
    }

    #[test]
    fn relations_are_spaced() {
        assert_eq!(clean("x=2"), "x = 2");
        assert_eq!(clean("(x+1)>2"), "(x+1) > 2");
        assert_eq!(clean("x = 2"), "x = 2");
    }

    #[test]
    fn reference_and_display() {
        assert_eq!(clean_reference("\\dfrac{3}{4}"), "\\frac{3}{4}");
        assert_eq!(for_display("\\frac{3}{4}"), "\\dfrac{3}{4}");
        assert_eq!(for_display("\\dfrac{3}{4}"), "\\dfrac{3}{4}");
    }
}
