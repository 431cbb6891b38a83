//! Wrappers for faer dense matrix types.
//!
//! Implements the core matrix traits for `faer::Mat<T>` over any buffer
//! element type, so a dense matrix can back a linear operator whose
//! domain and range are typed spaces.
//!
//! # References
//! - [faer crate documentation](https://docs.rs/faer)

use crate::core::scalar::Scalar;
use crate::core::traits::{MatAdjVec, MatShape, MatVec};
use faer::Mat;

/// Implements matrix-vector multiplication for `faer::Mat`.
///
/// Computes `y = A * x` where `A` is a dense matrix, `x` and `y` are slices.
impl<T: Scalar> MatVec<T> for Mat<T> {
    fn matvec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.nrows(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.ncols(), x.len(), "Input vector x has incorrect length");
        for i in 0..self.nrows() {
            let mut acc = T::zero();
            for j in 0..self.ncols() {
                acc = acc.add(self[(i, j)].mul(x[j]));
            }
            y[i] = acc;
        }
    }
}

/// Implements conjugate-transpose-vector multiplication for `faer::Mat`.
///
/// Computes `y = A^H * x`; for real entries this is `A^T * x`.
impl<T: Scalar> MatAdjVec<T> for Mat<T> {
    fn mat_adj_vec(&self, x: &[T], y: &mut [T]) {
        assert_eq!(self.ncols(), y.len(), "Output vector y has incorrect length");
        assert_eq!(self.nrows(), x.len(), "Input vector x has incorrect length");
        for j in 0..self.ncols() {
            let mut acc = T::zero();
            for i in 0..self.nrows() {
                acc = acc.add(self[(i, j)].conj().mul(x[i]));
            }
            y[j] = acc;
        }
    }
}

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}
