//! Backend selection and discretization options.

pub mod backend;
pub mod options;

pub use backend::{BackendCaps, Impl};
pub use options::DiscrOptions;
