//! Grading of free-form LaTeX answers.
//!
//! An answer typed by a learner is cleaned, parsed and converted into a
//! [`MathsObject`](teachers_maths::MathsObject), then compared with the reference expression of
//! the exercise. Two expressions are accepted as equal if they have the same value: exactly when
//! both are exact, and by evaluation at sample points when a decimal number is involved.
//!
//! ```
//! use teachers_corrector::{correct, CorrectionConfig, Feedback};
//! use teachers_maths::MathsObject;
//!
//! let reference = MathsObject::new_fraction(3, 4).unwrap();
//! let correction = correct(r"\frac{6}{8}", &reference, &CorrectionConfig::default());
//! assert!(correction.is_correct);
//! assert_eq!(correction.feedback, Feedback::EquivalentDifferentForm);
//! ```

pub mod config;
pub mod correct;
pub mod equivalence;
pub mod feedback;

pub use config::CorrectionConfig;
pub use correct::{correct, parse_answer, AnswerError};
pub use equivalence::equivalent;
pub use feedback::{Correction, Feedback};
