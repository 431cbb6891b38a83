//! fnspace: vector spaces, discretizations and an operator algebra
//!
//! This crate models finite-dimensional spaces `F^n`, products of spaces and
//! discretized `L2` function spaces, together with operators between them.
//! Operators combine into sums, compositions, scalar multiples and
//! adjoints, with domain/range compatibility checked when a combinator is
//! built and space membership checked before every application.

pub mod config;
pub mod core;
pub mod discr;
pub mod error;
pub mod operator;
pub mod space;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use core::*;
pub use discr::*;
pub use error::*;
pub use operator::*;
pub use space::*;
pub use utils::*;
