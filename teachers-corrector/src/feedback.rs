#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The verdict on an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "snake_case"))]
pub enum Feedback {
    /// The answer is written exactly like the simplified reference.
    ExactMatch,

    /// The answer has the value of the reference, written differently.
    EquivalentDifferentForm,

    /// The answer does not have the value of the reference.
    Incorrect,

    /// The answer could not be read.
    ParseError,
}

impl Feedback {
    /// Returns true if an answer with this verdict is accepted.
    pub fn is_correct(self) -> bool {
        matches!(self, Feedback::ExactMatch | Feedback::EquivalentDifferentForm)
    }
}

impl Display for Feedback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Feedback::ExactMatch => "exact match",
            Feedback::EquivalentDifferentForm => "equivalent, in a different form",
            Feedback::Incorrect => "incorrect",
            Feedback::ParseError => "parse error",
        })
    }
}

/// The result of grading an answer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Correction {
    pub is_correct: bool,
    pub feedback: Feedback,

    /// The simplified reference, rendered to LaTeX.
    pub reference_latex: String,

    /// The answer after cleaning, as it was parsed.
    pub cleaned_input: String,

    /// The cleaned answer, ready to be shown back to the learner.
    pub display_latex: String,

    /// The rendered error, if the answer could not be read.
    pub error: Option<String>,
}
