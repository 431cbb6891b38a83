//! Core linear-algebra traits for fnspace.

/// Matrix–vector product: y ← A x.
pub trait MatVec<T> {
    /// Compute y = A · x.
    fn matvec(&self, x: &[T], y: &mut [T]);
}

/// Adjoint matrix–vector product: y ← Aᴴ x.
pub trait MatAdjVec<T> {
    /// Compute y = Aᴴ · x (plain transpose for real entries).
    fn mat_adj_vec(&self, x: &[T], y: &mut [T]);
}

/// Shape of a matrix-like object.
pub trait MatShape {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
}
