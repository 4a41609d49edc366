//! Tokenizer and parser for the LaTeX answers typed into a maths editor.
//!
//! The parser produces an [`Expr`](parser::ast::Expr) tree that keeps the spans of the source, so
//! that errors can point back into the answer:
//!
//! ```
//! use teachers_parser::parser::{ast::Expr, parse};
//!
//! let expr = parse("\\frac{3}{4}x - 2").unwrap();
//! assert!(matches!(expr, Expr::Binary(_)));
//! ```

pub mod clean;
pub mod parser;
pub mod tokenizer;

pub use clean::{clean, clean_reference, for_display};
pub use parser::{parse, parse_with_functions};
