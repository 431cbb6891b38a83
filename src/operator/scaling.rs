//! Scaling and identity operators.

use crate::core::scalar::Number;
use crate::core::value::Value;
use crate::error::{FnError, Result};
use crate::operator::{LinearOperator, Operator};
use crate::space::{Element, Space};

/// `x -> c x` on a single space. Can overwrite its input.
#[derive(Debug, Clone)]
pub struct ScalingOperator {
    space: Space,
    scalar: Number,
}

impl ScalingOperator {
    pub fn new(space: Space, scalar: impl Into<Value>) -> Result<ScalingOperator> {
        let scalar = match scalar.into() {
            Value::Number(n) => n,
            other => return Err(FnError::Type(format!("{other:?} is not a scalar"))),
        };
        if !space.accepts_scalar(scalar) {
            return Err(FnError::Type(format!("cannot scale elements of {space} by {scalar}")));
        }
        Ok(ScalingOperator { space, scalar })
    }

    pub fn scalar(&self) -> Number {
        self.scalar
    }

    fn is_identity(&self) -> bool {
        self.scalar == Number::Int(1)
    }
}

/// Identity on `space`; works for every dtype, booleans included.
pub fn identity(space: Space) -> ScalingOperator {
    ScalingOperator {
        space,
        scalar: Number::Int(1),
    }
}

impl Operator for ScalingOperator {
    fn domain(&self) -> &Space {
        &self.space
    }

    fn range(&self) -> &Space {
        &self.space
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        out.copy_from(x)?;
        if self.is_identity() {
            return Ok(());
        }
        out.scale(self.scalar)
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        Some(self)
    }

    fn supports_in_place(&self) -> bool {
        true
    }

    fn apply_in_place_impl(&self, x: &mut Element) -> Result<()> {
        if self.is_identity() {
            return Ok(());
        }
        x.scale(self.scalar)
    }
}

impl LinearOperator for ScalingOperator {
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        out.copy_from(y)?;
        if self.is_identity() {
            return Ok(());
        }
        out.scale(self.scalar.conj())
    }

    fn apply_adjoint_in_place_impl(&self, y: &mut Element) -> Result<()> {
        if self.is_identity() {
            return Ok(());
        }
        y.scale(self.scalar.conj())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::{LinearOperatorExt, OperatorExt};
    use crate::space::fn_space::{cn, rn};
    use num_complex::Complex64;

    #[test]
    fn scales_in_place() {
        let r2 = Space::from(rn(2).unwrap());
        let op = ScalingOperator::new(r2.clone(), 2.0).unwrap();
        let mut x = r2.element(vec![1.0, -3.0]).unwrap();
        op.apply_in_place(&mut x).unwrap();
        assert_eq!(x, r2.element(vec![2.0, -6.0]).unwrap());
    }

    #[test]
    fn adjoint_conjugates_scalar() {
        let c1 = Space::from(cn(1).unwrap());
        let i = Complex64::new(0.0, 1.0);
        let op = ScalingOperator::new(c1.clone(), i).unwrap();
        let y = c1.element(vec![Complex64::new(1.0, 0.0)]).unwrap();
        assert_eq!(op.call_adjoint(&y).unwrap(), c1.element(vec![-i]).unwrap());
    }

    #[test]
    fn rejects_out_of_field_scalars() {
        let r2 = Space::from(rn(2).unwrap());
        let err = ScalingOperator::new(r2.clone(), Complex64::new(0.0, 1.0)).unwrap_err();
        assert!(err.is_type_error());
        assert!(ScalingOperator::new(r2, vec![1.0, 2.0]).unwrap_err().is_type_error());
    }
}
