//! Operators between spaces and the algebra combining them.
//!
//! Implementors provide the unchecked maps (`apply_impl`,
//! `apply_adjoint_impl`); callers go through [`OperatorExt`] and
//! [`LinearOperatorExt`], which check space membership before any numeric
//! work. Combinators hold operators as shared [`OperatorRef`] handles.

use std::fmt;
use std::sync::Arc;

use crate::error::{FnError, Result};
use crate::space::{Element, Space};

pub mod combinator;
pub mod matrix;
pub mod overload;
pub mod scaling;

pub use combinator::{Adjoint, Composition, ScalarMultiplication, Side, Sum};
pub use matrix::MatrixOperator;
pub use scaling::{ScalingOperator, identity};

/// A map `domain -> range`.
pub trait Operator: fmt::Debug + Send + Sync {
    fn domain(&self) -> &Space;

    fn range(&self) -> &Space;

    /// Forward map. `x` is in the domain and `out` in the range.
    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()>;

    /// Linear view of this operator, if it is linear.
    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        None
    }

    /// Whether [`Operator::apply_in_place_impl`] is available.
    fn supports_in_place(&self) -> bool {
        false
    }

    /// Overwrite `x` with its image. Only called when
    /// [`Operator::supports_in_place`] holds and domain equals range.
    fn apply_in_place_impl(&self, _x: &mut Element) -> Result<()> {
        Err(FnError::NotImplemented(format!("in-place application of {self:?}")))
    }
}

/// An operator known to be linear.
pub trait LinearOperator: Operator {
    /// Adjoint map. `y` is in the range and `out` in the domain.
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()>;

    /// Overwrite `y` with its adjoint image, under the same conditions as
    /// [`Operator::apply_in_place_impl`].
    fn apply_adjoint_in_place_impl(&self, _y: &mut Element) -> Result<()> {
        Err(FnError::NotImplemented(format!("in-place adjoint of {self:?}")))
    }
}

fn check_member(x: &Element, space: &Space, what: &str) -> Result<()> {
    if !x.belongs_to(space) {
        return Err(FnError::Type(format!("{what} {} is not {space}", x.space())));
    }
    Ok(())
}

/// Checked entry points for every operator.
pub trait OperatorExt: Operator {
    /// `out = self(x)`. Type error if `x` is not in the domain or `out`
    /// is not in the range; nothing is written in that case.
    fn apply(&self, x: &Element, out: &mut Element) -> Result<()> {
        check_member(x, self.domain(), "input")?;
        check_member(out, self.range(), "output")?;
        self.apply_impl(x, out)
    }

    /// Allocate a range element and apply into it.
    fn call(&self, x: &Element) -> Result<Element> {
        check_member(x, self.domain(), "input")?;
        let mut out = self.range().empty();
        self.apply_impl(x, &mut out)?;
        Ok(out)
    }

    /// `x = self(x)`, using `x` as both input and output.
    ///
    /// Fails with an aliasing error unless the operator declares in-place
    /// support.
    fn apply_in_place(&self, x: &mut Element) -> Result<()> {
        check_member(x, self.domain(), "input")?;
        check_member(x, self.range(), "output")?;
        if !self.supports_in_place() {
            return Err(FnError::Aliasing(format!(
                "{self:?} cannot use its input as output"
            )));
        }
        self.apply_in_place_impl(x)
    }
}

impl<T: Operator + ?Sized> OperatorExt for T {}

/// Checked adjoint entry points for linear operators.
pub trait LinearOperatorExt: LinearOperator {
    /// `out = self^*(y)` with `y` in the range and `out` in the domain.
    fn apply_adjoint(&self, y: &Element, out: &mut Element) -> Result<()> {
        check_member(y, self.range(), "input")?;
        check_member(out, self.domain(), "output")?;
        self.apply_adjoint_impl(y, out)
    }

    fn call_adjoint(&self, y: &Element) -> Result<Element> {
        check_member(y, self.range(), "input")?;
        let mut out = self.domain().empty();
        self.apply_adjoint_impl(y, &mut out)?;
        Ok(out)
    }

    /// `y = self^*(y)`; aliasing error without in-place support.
    fn apply_adjoint_in_place(&self, y: &mut Element) -> Result<()> {
        check_member(y, self.range(), "input")?;
        check_member(y, self.domain(), "output")?;
        if !self.supports_in_place() {
            return Err(FnError::Aliasing(format!(
                "adjoint of {self:?} cannot use its input as output"
            )));
        }
        self.apply_adjoint_in_place_impl(y)
    }
}

impl<T: LinearOperator + ?Sized> LinearOperatorExt for T {}

/// Shared handle to an operator. Cloning is cheap and combinators built
/// from the same handle reference one underlying operator.
#[derive(Clone)]
pub struct OperatorRef(Arc<dyn Operator>);

impl OperatorRef {
    pub fn new(op: impl Operator + 'static) -> OperatorRef {
        OperatorRef(Arc::new(op))
    }

    pub fn is_linear(&self) -> bool {
        self.0.as_linear().is_some()
    }

    /// Linear view; type error for nonlinear operators.
    pub fn linear(&self) -> Result<&dyn LinearOperator> {
        self.0
            .as_linear()
            .ok_or_else(|| FnError::Type(format!("{:?} is not linear", self.0)))
    }

    /// The adjoint operator `range -> domain`.
    pub fn adjoint(&self) -> Result<OperatorRef> {
        Ok(OperatorRef::new(Adjoint::new(self.clone())?))
    }

    /// `y^*` applied with checks, for handles of linear operators.
    pub fn apply_adjoint(&self, y: &Element, out: &mut Element) -> Result<()> {
        self.linear()?.apply_adjoint(y, out)
    }

    pub fn call_adjoint(&self, y: &Element) -> Result<Element> {
        self.linear()?.call_adjoint(y)
    }

    pub fn apply_adjoint_in_place(&self, y: &mut Element) -> Result<()> {
        self.linear()?.apply_adjoint_in_place(y)
    }

    /// Whether both handles point at the same operator.
    pub fn ptr_eq(&self, other: &OperatorRef) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for OperatorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Operator for OperatorRef {
    fn domain(&self) -> &Space {
        self.0.domain()
    }

    fn range(&self) -> &Space {
        self.0.range()
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        self.0.apply_impl(x, out)
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        self.0.as_linear()
    }

    fn supports_in_place(&self) -> bool {
        self.0.supports_in_place()
    }

    fn apply_in_place_impl(&self, x: &mut Element) -> Result<()> {
        self.0.apply_in_place_impl(x)
    }
}
