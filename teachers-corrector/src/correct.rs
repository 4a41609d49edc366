//! Grading of a single answer.

use std::collections::BTreeSet;
use teachers_maths::{ConstructionError, MathsObject, ObjectKind};
use teachers_parser::{clean, clean_reference, for_display, parse_with_functions};
use thiserror::Error;
use tracing::debug;
use crate::{
    config::CorrectionConfig,
    equivalence::equivalent,
    feedback::{Correction, Feedback},
};

/// An answer that cannot be read.
#[derive(Debug, Error)]
pub enum AnswerError {
    /// The answer is not valid LaTeX.
    #[error(transparent)]
    Parse(#[from] teachers_error::Error),

    /// The answer parses, but does not describe a valid expression, such as `\frac{1}{0}`.
    #[error(transparent)]
    Construction(#[from] ConstructionError),
}

impl AnswerError {
    /// Renders the error for the learner. Parse errors point into the cleaned answer.
    pub fn render(&self, cleaned: &str) -> String {
        match self {
            AnswerError::Parse(err) => err.render("answer", cleaned),
            AnswerError::Construction(err) => err.to_string(),
        }
    }
}

/// Collects the names of the functions applied in an expression.
fn collect_functions(expr: &MathsObject, names: &mut BTreeSet<String>) {
    match expr.kind() {
        ObjectKind::Integer(_)
            | ObjectKind::Symbol(_)
            | ObjectKind::Decimal(_)
            | ObjectKind::Inf
            | ObjectKind::Pi => {},
        ObjectKind::Function(name) => {
            names.insert(name.clone());
        },
        ObjectKind::Image { function, argument } => {
            names.insert(function.clone());
            collect_functions(argument, names);
        },
        ObjectKind::Add(l, r)
            | ObjectKind::Mul(l, r)
            | ObjectKind::Pow(l, r)
            | ObjectKind::Fraction(l, r)
            | ObjectKind::Equality(l, r)
            | ObjectKind::StrictGreaterThan(l, r)
            | ObjectKind::Interval { left: l, right: r, .. } => {
            collect_functions(l, names);
            collect_functions(r, names);
        },
        ObjectKind::Collection(elements) => {
            for element in elements {
                collect_functions(element, names);
            }
        },
    }
}

/// Parses a cleaned answer, treating the given single-letter names as functions.
pub fn parse_answer<S: AsRef<str>>(cleaned: &str, functions: &[S]) -> Result<MathsObject, AnswerError> {
    let expr = parse_with_functions(cleaned, functions)?;
    Ok(MathsObject::from_ast(&expr)?)
}

/// Grades a raw LaTeX answer against a reference expression.
///
/// The answer is cleaned of editor artifacts, parsed, and simplified along with the reference.
/// Single-letter names applied as functions in the reference, such as `f` in `f(x) + 1`, are
/// read as functions in the answer too.
///
/// The answer is correct if it has the value of the reference, as decided by [`equivalent`]. It
/// is an [`Feedback::ExactMatch`] if it is also written exactly like the simplified reference.
pub fn correct(raw: &str, reference: &MathsObject, config: &CorrectionConfig) -> Correction {
    let cleaned_input = clean(raw);
    let display_latex = for_display(&cleaned_input);
    let reference = reference.simplified();
    let reference_latex = reference.latex();

    let mut functions = BTreeSet::new();
    collect_functions(&reference, &mut functions);
    let functions = functions.into_iter().collect::<Vec<_>>();

    let answer = match parse_answer(&cleaned_input, &functions) {
        Ok(answer) => answer.simplified(),
        Err(err) => {
            debug!(target: "correct", answer = %cleaned_input, error = %err, "cannot read answer");
            let error = err.render(&cleaned_input);
            return Correction {
                is_correct: false,
                feedback: Feedback::ParseError,
                reference_latex,
                cleaned_input,
                display_latex,
                error: Some(error),
            };
        },
    };

    let feedback = if !equivalent(&answer, &reference, config) {
        Feedback::Incorrect
    } else if cleaned_input == clean_reference(&reference_latex) {
        Feedback::ExactMatch
    } else {
        Feedback::EquivalentDifferentForm
    };
    debug!(
        target: "correct",
        answer = %answer,
        reference = %reference,
        feedback = %feedback,
        "graded answer",
    );

    Correction {
        is_correct: feedback.is_correct(),
        feedback,
        reference_latex,
        cleaned_input,
        display_latex,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn x() -> MathsObject {
        MathsObject::symbol("x")
    }

    fn grade(raw: &str, reference: &MathsObject) -> Correction {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
        correct(raw, reference, &CorrectionConfig::default())
    }

    fn three_quarters() -> MathsObject {
        MathsObject::new_fraction(3, 4).unwrap()
    }

    #[test]
    fn exact_match() {
        let correction = grade(r"\frac{3}{4}", &three_quarters());
        assert_eq!(correction, Correction {
            is_correct: true,
            feedback: Feedback::ExactMatch,
            reference_latex: r"\dfrac{3}{4}".to_string(),
            cleaned_input: r"\frac{3}{4}".to_string(),
            display_latex: for_display(r"\frac{3}{4}"),
            error: None,
        });
    }

    #[test]
    fn equivalent_forms() {
        let unreduced = grade(r"\frac{6}{8}", &three_quarters());
        assert!(unreduced.is_correct);
        assert_eq!(unreduced.feedback, Feedback::EquivalentDifferentForm);

        let decimal = grade("0.75", &three_quarters());
        assert_eq!(decimal.feedback, Feedback::EquivalentDifferentForm);
    }

    #[test]
    fn wrong_values() {
        let half = grade(r"\frac{1}{2}", &three_quarters());
        assert!(!half.is_correct);
        assert_eq!(half.feedback, Feedback::Incorrect);
        assert_eq!(half.error, None);

        assert_eq!(grade("0.33", &MathsObject::new_fraction(1, 3).unwrap()).feedback, Feedback::Incorrect);
    }

    #[test]
    fn unreadable_answers() {
        let unfinished = grade(r"\frac{3}{", &three_quarters());
        assert!(!unfinished.is_correct);
        assert_eq!(unfinished.feedback, Feedback::ParseError);
        assert!(unfinished.error.is_some_and(|error| !error.is_empty()));

        let division_by_zero = grade(r"\frac{3}{0}", &three_quarters());
        assert_eq!(division_by_zero.feedback, Feedback::ParseError);
        assert_eq!(division_by_zero.reference_latex, r"\dfrac{3}{4}");
    }

    #[test]
    fn blank_answers() {
        for raw in ["", "   "] {
            let blank = grade(raw, &three_quarters());
            assert!(!blank.is_correct);
            assert_eq!(blank.feedback, Feedback::ParseError);
            assert!(blank.error.is_some_and(|error| !error.is_empty()));
        }
    }

    #[test]
    fn decimal_commas() {
        assert!(grade("0{,}75", &three_quarters()).is_correct);

        let bare = grade("0,75", &three_quarters());
        assert_eq!(bare.feedback, Feedback::ParseError);
        assert!(bare.error.is_some_and(|error| error.contains("0{,}75")));
    }

    #[test]
    fn overlong_answers() {
        let long_sum = vec!["x"; 500].join("+");
        let verdict = grade(&long_sum, &MathsObject::new_mul(500, x()).unwrap());
        assert_eq!(verdict.feedback, Feedback::ParseError);

        let sum = vec!["x"; 100].join("+");
        assert!(grade(&sum, &MathsObject::new_mul(100, x()).unwrap()).is_correct);
    }

    #[test]
    fn polynomials() {
        let reference = MathsObject::new_mul(
            MathsObject::new_add(MathsObject::new_mul(3, x()).unwrap(), -8).unwrap(),
            MathsObject::new_add(MathsObject::new_mul(4, x()).unwrap(), -1).unwrap(),
        ).unwrap();

        assert_eq!(grade("12x^{2} -35x + 8", &reference).feedback, Feedback::ExactMatch);
        assert_eq!(grade("12x^2-35x+8", &reference).feedback, Feedback::EquivalentDifferentForm);
        assert_eq!(grade("(3x-8)(4x-1)", &reference).feedback, Feedback::EquivalentDifferentForm);
        assert_eq!(grade("12x^2-35x-8", &reference).feedback, Feedback::Incorrect);
    }

    #[test]
    fn rational_expressions() {
        let sum = (x() + 1).unwrap();
        assert!(grade(r"\frac{x^2-1}{x-1}", &sum).is_correct);
        assert_eq!(grade(r"\frac{x^2-1}{x+1}", &sum).feedback, Feedback::Incorrect);
    }

    #[test]
    fn root_of_a_square() {
        assert_eq!(grade(r"\sqrt{x^{2}}", &x()).feedback, Feedback::Incorrect);

        let half = MathsObject::new_fraction(1, 2).unwrap();
        let root = MathsObject::new_pow(x().pow(2).unwrap(), half).unwrap();
        assert!(grade(r"\sqrt{x^{2}}", &root).is_correct);
    }

    #[test]
    fn infinity() {
        let zero = MathsObject::integer(0);
        assert_eq!(grade(r"\infty-\infty", &zero).feedback, Feedback::Incorrect);
        assert_eq!(grade(r"0\cdot\infty", &zero).feedback, Feedback::Incorrect);
        assert!(grade(r"\infty", &MathsObject::inf()).is_correct);
        assert!(!grade(r"\infty-\infty", &MathsObject::inf()).is_correct);
    }

    #[test]
    fn relations_and_intervals() {
        let equation = MathsObject::new_equality(x(), 5).unwrap();
        assert!(grade("5 = x", &equation).is_correct);
        assert_eq!(grade("x > 5", &equation).feedback, Feedback::Incorrect);
        assert_eq!(grade("5", &equation).feedback, Feedback::Incorrect);

        let interval = MathsObject::new_interval(0, 5, false, true).unwrap();
        assert_eq!(grade("[0; 5[", &interval).feedback, Feedback::EquivalentDifferentForm);
        assert_eq!(grade("]0; 5[", &interval).feedback, Feedback::Incorrect);
    }

    #[test]
    fn functions_of_the_reference() {
        let reference = MathsObject::new_add(
            MathsObject::new_image(MathsObject::function("f"), x()).unwrap(),
            1,
        ).unwrap();
        assert!(grade("f(x) + 1", &reference).is_correct);
        assert!(!grade("f(x) + 2", &reference).is_correct);
    }
}
