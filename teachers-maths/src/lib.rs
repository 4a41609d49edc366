//! Typed algebraic expressions for a maths exercise platform.
//!
//! A [`MathsObject`] is an immutable expression tree with a closed set of variants. Each node
//! carries its canonical value in an exact computer algebra [`backend`], which is used to
//! evaluate, expand and compare expressions. On top of the tree, this crate provides:
//!
//! - [`simplify`]: bottom-up rewriting with per-variant rules and a backend fallback,
//! - [`latex`]: rendering to LaTeX,
//! - [`group_terms`]: reordering of a polynomial by descending power of a symbol,
//! - [`lift`]: conversion of backend values back into trees,
//! - [`MathsObject::from_ast`]: conversion of parsed LaTeX answers.
//!
//! ```
//! use teachers_maths::{group_terms, MathsObject};
//!
//! let x = MathsObject::symbol("x");
//! let first = MathsObject::new_add(MathsObject::new_mul(3, x.clone()).unwrap(), -8).unwrap();
//! let second = MathsObject::new_add(MathsObject::new_mul(4, x).unwrap(), -1).unwrap();
//! let product = MathsObject::new_mul(first, second).unwrap();
//!
//! assert_eq!(group_terms(&product.simplified(), None).latex(), "12x^{2} -35x + 8");
//! ```

pub mod backend;
pub mod consts;
pub mod error;
pub mod from_ast;
pub mod group;
pub mod latex;
pub mod lift;
pub mod object;
pub mod primitive;
pub mod simplify;

pub use error::{ConstructionError, LiftError, NotFinite, ReprError};
pub use group::group_terms;
pub use latex::Latex;
pub use lift::lift;
pub use object::{MathsObject, Numeric, ObjectKind};
pub use simplify::{step::Step, step_collector::StepCollector};
