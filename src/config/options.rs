//! Options for building discretized spaces.
//!
//! This module provides the `DiscrOptions` struct, which selects the
//! storage backend, the element dtype and the flattening order used by
//! the uniform discretization factory. Unset fields fall back to the
//! defaults of the discretized space (host storage, the field's default
//! floating dtype, row-major order).

use crate::config::backend::Impl;
use crate::core::dtype::DType;
use crate::core::value::Order;

/// Discretization backend & layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscrOptions {
    /// Storage backend of the backing `F^n` space.
    pub backend: Impl,

    /// Element dtype; `None` picks the field's default.
    pub dtype: Option<DType>,

    /// Flattening order of grid samples.
    pub order: Order,
}

impl DiscrOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, backend: Impl) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = Some(dtype);
        self
    }

    pub fn with_order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }
}
