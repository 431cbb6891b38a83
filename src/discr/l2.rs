//! The continuous function space `L2(domain)`.

use std::fmt;

use crate::core::dtype::Field;
use crate::discr::domain::IntervalProd;

/// Square-integrable functions on a rectangular domain. Not array-backed;
/// see [`DiscreteL2`](crate::discr::DiscreteL2) for a finite representation.
#[derive(Debug, Clone, PartialEq)]
pub struct L2 {
    domain: IntervalProd,
    field: Field,
}

impl L2 {
    /// Real-valued functions on `domain`.
    pub fn new(domain: IntervalProd) -> L2 {
        L2::with_field(domain, Field::Real)
    }

    pub fn with_field(domain: IntervalProd, field: Field) -> L2 {
        L2 { domain, field }
    }

    pub fn domain(&self) -> &IntervalProd {
        &self.domain
    }

    pub fn field(&self) -> Field {
        self.field
    }
}

impl fmt::Display for L2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field {
            Field::Real => write!(f, "L2({})", self.domain),
            Field::Complex => write!(f, "L2({}, {})", self.domain, self.field),
        }
    }
}
