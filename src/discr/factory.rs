//! Uniform discretization of `L2` spaces.

use log::debug;

use crate::config::options::DiscrOptions;
use crate::discr::discrete_l2::DiscreteL2;
use crate::discr::grid::uniform_sampling;
use crate::discr::l2::L2;
use crate::error::{FnError, Result};
use crate::space::fn_space::FnSpace;

/// Discretize `l2` on a cell-centred grid of `shape` points.
///
/// The backing space uses `options.dtype`, or the field's default dtype
/// when unset. A dtype from the wrong field is a type error; a dtype the
/// selected backend cannot store is `NotImplemented`.
pub fn l2_uniform_discretization(
    l2: &L2,
    shape: &[usize],
    options: DiscrOptions,
) -> Result<DiscreteL2> {
    let dtype = match options.dtype {
        Some(dtype) if dtype.field() != l2.field() => {
            return Err(FnError::Type(format!(
                "{dtype} entries cannot represent functions in {l2}"
            )));
        }
        Some(dtype) => dtype,
        None => l2.field().default_dtype(),
    };
    let grid = uniform_sampling(l2.domain(), shape)?;
    let dspace = FnSpace::with_backend(grid.ntotal(), dtype, options.backend)?;
    debug!("uniform discretization of {l2} with {options:?}");
    DiscreteL2::with_order(l2.clone(), grid, dspace, options.order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::backend::Impl;
    use crate::core::dtype::{DType, Field};
    use crate::discr::domain::IntervalProd;

    #[test]
    fn default_dtype_follows_field() {
        let unit = IntervalProd::interval(0.0, 1.0).unwrap();
        let real = l2_uniform_discretization(&L2::new(unit.clone()), &[10], DiscrOptions::default())
            .unwrap();
        assert_eq!(real.dtype(), DType::F64);
        let complex = L2::with_field(unit, Field::Complex);
        let discr = l2_uniform_discretization(&complex, &[10], DiscrOptions::default()).unwrap();
        assert_eq!(discr.dtype(), DType::C128);
    }

    #[test]
    fn device_rejects_complex() {
        let complex = L2::with_field(IntervalProd::interval(0.0, 1.0).unwrap(), Field::Complex);
        let options = DiscrOptions::new().with_backend(Impl::Device);
        let err = l2_uniform_discretization(&complex, &[10], options).unwrap_err();
        assert!(matches!(err, FnError::NotImplemented(_)));
    }
}
