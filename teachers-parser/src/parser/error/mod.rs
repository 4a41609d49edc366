pub mod kind;

pub use teachers_error::Error;
