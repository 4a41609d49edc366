//! Abstract syntax tree of a LaTeX answer.

pub mod binary;
pub mod call;
pub mod expr;
pub mod frac;
pub mod interval;
pub mod literal;
pub mod paren;
pub mod sqrt;
pub mod unary;

pub use binary::Binary;
pub use call::Call;
pub use expr::Expr;
pub use frac::Frac;
pub use interval::Interval;
pub use literal::{LitNum, LitSym, Literal};
pub use paren::{Paren, Tuple};
pub use sqrt::Sqrt;
pub use unary::Unary;
