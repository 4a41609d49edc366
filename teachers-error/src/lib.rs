//! Contains the common [`ErrorKind`] trait used by every error that points back into a piece of
//! learner input, such as a LaTeX answer that failed to parse.

extern crate self as teachers_error;

use ariadne::{Color, Report, Source};
use std::{fmt::{self, Debug, Display, Formatter}, ops::Range};

/// The color used to highlight expressions in reports.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// Represents any kind of error that can be traced back to regions of the input.
pub trait ErrorKind: Debug + Send + Sync {
    /// A one-line summary of the error, without any source context.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of the input that can be highlighted.
#[derive(Debug)]
pub struct Error {
    /// The regions of the input that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Build a report from this error kind.
    ///
    /// Kinds index into the spans to place their labels, so an error without spans is given a
    /// zero-width span at the start of the input.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        if self.spans.is_empty() {
            self.kind.build_report(src_id, &[0..0])
        } else {
            self.kind.build_report(src_id, &self.spans)
        }
    }

    /// Renders the report for this error against the given input, without colors or other
    /// terminal escapes.
    ///
    /// A blank input has nothing to point at, so only the message is returned.
    pub fn render(&self, src_id: &str, input: &str) -> String {
        if input.trim().is_empty() {
            return self.kind.message();
        }

        let mut buf = Vec::new();
        let report = self.build_report(src_id);
        if report.write((src_id, Source::from(input)), &mut buf).is_err() {
            return self.kind.message();
        }

        let plain = strip_ansi_escapes::strip(&buf);
        String::from_utf8(plain).unwrap_or_else(|_| self.kind.message())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.kind.message())
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;
    use teachers_attrs::ErrorKind;

    #[derive(Debug, Clone, ErrorKind, PartialEq)]
    #[error(
        message = format!("missing closing `{}`", delimiter),
        labels = ["this group is never closed"],
        help = "add the closing delimiter"
    )]
    struct Unclosed {
        delimiter: char,
    }

    #[test]
    fn message_from_derive() {
        let err = Error::new(vec![0..1], Unclosed { delimiter: ')' });
        assert_eq!(err.to_string(), "missing closing `)`");
    }

    #[test]
    fn render_contains_message_and_label() {
        let input = "(x + 1";
        let err = Error::new(vec![0..1], Unclosed { delimiter: ')' });
        let rendered = err.render("answer", input);

        assert!(!rendered.contains('\u{1b}'));
        assert!(rendered.contains("missing closing `)`"));
        assert!(rendered.contains("this group is never closed"));
        assert!(rendered.contains("add the closing delimiter"));
    }

    #[test]
    fn empty_spans_do_not_panic() {
        let err = Error::new(vec![], Unclosed { delimiter: '}' });
        let rendered = err.render("answer", "");
        assert!(rendered.contains("missing closing `}`"));
    }

    #[test]
    fn blank_input_renders_message() {
        let err = Error::new(vec![0..0], Unclosed { delimiter: ')' });
        assert_eq!(err.render("answer", ""), "missing closing `)`");
        assert_eq!(err.render("answer", "   "), "missing closing `)`");
    }
}
