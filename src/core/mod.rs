//! Scalars, typed buffers, dynamic values and matrix traits.

pub mod buffer;
pub mod dtype;
pub mod scalar;
pub mod traits;
pub mod value;
pub mod wrappers;

pub use buffer::Buffer;
pub use dtype::{DType, Field, Precision, dtype_ndigits, dtype_tol};
pub use scalar::{Number, Scalar};
pub use value::{Dense, NdArray, Order, Value};
