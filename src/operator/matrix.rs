//! Linear operators given by dense `faer` matrices.

use std::fmt;

use faer::Mat;
use log::debug;

use crate::core::scalar::Scalar;
use crate::core::traits::{MatAdjVec, MatShape, MatVec};
use crate::error::{FnError, Result};
use crate::operator::{LinearOperator, Operator};
use crate::space::fn_space::FnSpace;
use crate::space::{Element, Space};

/// `x -> A x` for an `m x n` matrix `A`; the adjoint multiplies by the
/// conjugate transpose.
pub struct MatrixOperator<T: Scalar> {
    matrix: Mat<T>,
    domain: Space,
    range: Space,
}

impl<T: Scalar> MatrixOperator<T> {
    /// Operator `F^n -> F^m` on host spaces of `T` entries.
    pub fn new(matrix: Mat<T>) -> Result<MatrixOperator<T>> {
        let domain = FnSpace::new(MatShape::ncols(&matrix), T::DTYPE)?.into();
        let range = FnSpace::new(MatShape::nrows(&matrix), T::DTYPE)?.into();
        MatrixOperator::with_spaces(matrix, domain, range)
    }

    /// Operator between given spaces, which must be flat (`F^n` or
    /// discretized) with `T` entries and sizes matching the matrix.
    pub fn with_spaces(matrix: Mat<T>, domain: Space, range: Space) -> Result<MatrixOperator<T>> {
        for (space, n, what) in [
            (&domain, MatShape::ncols(&matrix), "domain"),
            (&range, MatShape::nrows(&matrix), "range"),
        ] {
            if matches!(space, Space::Product(_)) {
                return Err(FnError::Type(format!("{what} {space} is not a flat space")));
            }
            if space.dtype() != Some(T::DTYPE) {
                return Err(FnError::Type(format!("{what} {space} does not hold {} entries", T::DTYPE)));
            }
            if space.size() != n {
                return Err(FnError::Shape(format!("{what} {space} does not have {n} entries")));
            }
        }
        debug!(
            "matrix operator {}x{} from {domain} to {range}",
            MatShape::nrows(&matrix),
            MatShape::ncols(&matrix)
        );
        Ok(MatrixOperator {
            matrix,
            domain,
            range,
        })
    }

    pub fn matrix(&self) -> &Mat<T> {
        &self.matrix
    }
}

fn flat_parts<'a, T: Scalar>(x: &'a Element, out: &'a mut Element) -> Result<(&'a [T], &'a mut [T])> {
    let x = x
        .as_vector()
        .ok_or_else(|| FnError::Type("matrix input must be a flat vector".into()))?
        .as_slice::<T>()?;
    let out = out
        .as_vector_mut()
        .ok_or_else(|| FnError::Type("matrix output must be a flat vector".into()))?
        .as_mut_slice::<T>()?;
    Ok((x, out))
}

impl<T: Scalar> fmt::Debug for MatrixOperator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatrixOperator")
            .field("shape", &(MatShape::nrows(&self.matrix), MatShape::ncols(&self.matrix)))
            .field("dtype", &T::DTYPE)
            .finish()
    }
}

impl<T: Scalar> Operator for MatrixOperator<T> {
    fn domain(&self) -> &Space {
        &self.domain
    }

    fn range(&self) -> &Space {
        &self.range
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        let (x, y) = flat_parts::<T>(x, out)?;
        self.matrix.matvec(x, y);
        Ok(())
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        Some(self)
    }
}

impl<T: Scalar> LinearOperator for MatrixOperator<T> {
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        let (y, x) = flat_parts::<T>(y, out)?;
        self.matrix.mat_adj_vec(y, x);
        Ok(())
    }
}
