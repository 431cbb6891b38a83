//! Operators built from other operators.
//!
//! Every combinator checks domain/range compatibility when it is built, so
//! a successfully constructed combinator never fails a space check at
//! application time. Combinators are linear exactly when all of their
//! operands are.

use log::debug;

use crate::core::scalar::Number;
use crate::core::value::Value;
use crate::error::{FnError, Result};
use crate::operator::{LinearOperator, Operator, OperatorRef};
use crate::space::{Element, Space};

/// `left + right`, evaluated pointwise.
#[derive(Debug, Clone)]
pub struct Sum {
    left: OperatorRef,
    right: OperatorRef,
}

impl Sum {
    pub fn new(left: OperatorRef, right: OperatorRef) -> Result<Sum> {
        if left.domain() != right.domain() {
            return Err(FnError::Type(format!(
                "domains {} and {} differ",
                left.domain(),
                right.domain()
            )));
        }
        if left.range() != right.range() {
            return Err(FnError::Type(format!(
                "ranges {} and {} differ",
                left.range(),
                right.range()
            )));
        }
        debug!("sum of {left:?} and {right:?}");
        Ok(Sum { left, right })
    }

    pub fn left(&self) -> &OperatorRef {
        &self.left
    }

    pub fn right(&self) -> &OperatorRef {
        &self.right
    }
}

impl Operator for Sum {
    fn domain(&self) -> &Space {
        self.left.domain()
    }

    fn range(&self) -> &Space {
        self.left.range()
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        let mut tmp = self.range().empty();
        self.right.apply_impl(x, &mut tmp)?;
        self.left.apply_impl(x, out)?;
        out.add_assign(&tmp)
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        (self.left.is_linear() && self.right.is_linear()).then_some(self as &dyn LinearOperator)
    }
}

impl LinearOperator for Sum {
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        let mut tmp = self.domain().empty();
        self.right.linear()?.apply_adjoint_impl(y, &mut tmp)?;
        self.left.linear()?.apply_adjoint_impl(y, out)?;
        out.add_assign(&tmp)
    }
}

/// `left ∘ right`: apply `right` first.
#[derive(Debug, Clone)]
pub struct Composition {
    left: OperatorRef,
    right: OperatorRef,
}

impl Composition {
    /// Requires `left.domain() == right.range()`.
    pub fn new(left: OperatorRef, right: OperatorRef) -> Result<Composition> {
        if left.domain() != right.range() {
            return Err(FnError::Type(format!(
                "cannot compose: domain {} of the outer operator is not range {} of the inner",
                left.domain(),
                right.range()
            )));
        }
        debug!("composition of {left:?} and {right:?}");
        Ok(Composition { left, right })
    }

    pub fn left(&self) -> &OperatorRef {
        &self.left
    }

    pub fn right(&self) -> &OperatorRef {
        &self.right
    }
}

impl Operator for Composition {
    fn domain(&self) -> &Space {
        self.right.domain()
    }

    fn range(&self) -> &Space {
        self.left.range()
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        let mut tmp = self.right.range().empty();
        self.right.apply_impl(x, &mut tmp)?;
        self.left.apply_impl(&tmp, out)
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        (self.left.is_linear() && self.right.is_linear()).then_some(self as &dyn LinearOperator)
    }

    fn supports_in_place(&self) -> bool {
        self.left.supports_in_place() && self.right.supports_in_place()
    }

    fn apply_in_place_impl(&self, x: &mut Element) -> Result<()> {
        self.right.apply_in_place_impl(x)?;
        self.left.apply_in_place_impl(x)
    }
}

impl LinearOperator for Composition {
    // (A B)^* = B^* A^*
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        let mut tmp = self.left.domain().empty();
        self.left.linear()?.apply_adjoint_impl(y, &mut tmp)?;
        self.right.linear()?.apply_adjoint_impl(&tmp, out)
    }

    fn apply_adjoint_in_place_impl(&self, y: &mut Element) -> Result<()> {
        self.left.linear()?.apply_adjoint_in_place_impl(y)?;
        self.right.linear()?.apply_adjoint_in_place_impl(y)
    }
}

/// Which side of the operator a scalar multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// `c * A`: scale the output.
    Left,
    /// `A * c`: scale the input.
    Right,
}

/// `scalar * op` or `op * scalar`.
#[derive(Debug, Clone)]
pub struct ScalarMultiplication {
    op: OperatorRef,
    scalar: Number,
    side: Side,
}

impl ScalarMultiplication {
    /// Type error unless `scalar` is a number the scaled space accepts:
    /// sequences, arrays and `None` are rejected, as are complex scalars
    /// for real operators.
    pub fn new(op: OperatorRef, scalar: impl Into<Value>, side: Side) -> Result<ScalarMultiplication> {
        let scalar = match scalar.into() {
            Value::Number(n) => n,
            other => {
                return Err(FnError::Type(format!("{other:?} is not a scalar")));
            }
        };
        let scaled = match side {
            Side::Left => op.range(),
            Side::Right => op.domain(),
        };
        if !scaled.accepts_scalar(scalar) {
            return Err(FnError::Type(format!("cannot scale elements of {scaled} by {scalar}")));
        }
        debug!("scalar multiplication of {op:?} by {scalar} ({side:?})");
        Ok(ScalarMultiplication { op, scalar, side })
    }

    pub fn operator(&self) -> &OperatorRef {
        &self.op
    }

    pub fn scalar(&self) -> Number {
        self.scalar
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

impl Operator for ScalarMultiplication {
    fn domain(&self) -> &Space {
        self.op.domain()
    }

    fn range(&self) -> &Space {
        self.op.range()
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        match self.side {
            Side::Left => {
                self.op.apply_impl(x, out)?;
                out.scale(self.scalar)
            }
            Side::Right => {
                let mut scaled = x.clone();
                scaled.scale(self.scalar)?;
                self.op.apply_impl(&scaled, out)
            }
        }
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        self.op.is_linear().then_some(self as &dyn LinearOperator)
    }

    fn supports_in_place(&self) -> bool {
        self.op.supports_in_place()
    }

    fn apply_in_place_impl(&self, x: &mut Element) -> Result<()> {
        match self.side {
            Side::Left => {
                self.op.apply_in_place_impl(x)?;
                x.scale(self.scalar)
            }
            Side::Right => {
                x.scale(self.scalar)?;
                self.op.apply_in_place_impl(x)
            }
        }
    }
}

impl LinearOperator for ScalarMultiplication {
    // (c A)^* = conj(c) A^*, and A c = c A for linear A.
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        self.op.linear()?.apply_adjoint_impl(y, out)?;
        out.scale(self.scalar.conj())
    }

    fn apply_adjoint_in_place_impl(&self, y: &mut Element) -> Result<()> {
        self.op.linear()?.apply_adjoint_in_place_impl(y)?;
        y.scale(self.scalar.conj())
    }
}

/// Adjoint of a linear operator, with domain and range swapped.
#[derive(Debug, Clone)]
pub struct Adjoint {
    op: OperatorRef,
}

impl Adjoint {
    /// Type error if `op` is not linear.
    pub fn new(op: OperatorRef) -> Result<Adjoint> {
        op.linear()?;
        Ok(Adjoint { op })
    }

    /// The operator this is the adjoint of.
    pub fn operator(&self) -> &OperatorRef {
        &self.op
    }
}

impl Operator for Adjoint {
    fn domain(&self) -> &Space {
        self.op.range()
    }

    fn range(&self) -> &Space {
        self.op.domain()
    }

    fn apply_impl(&self, x: &Element, out: &mut Element) -> Result<()> {
        self.op.linear()?.apply_adjoint_impl(x, out)
    }

    fn as_linear(&self) -> Option<&dyn LinearOperator> {
        Some(self)
    }

    fn supports_in_place(&self) -> bool {
        self.op.supports_in_place()
    }

    fn apply_in_place_impl(&self, x: &mut Element) -> Result<()> {
        self.op.linear()?.apply_adjoint_in_place_impl(x)
    }
}

impl LinearOperator for Adjoint {
    fn apply_adjoint_impl(&self, y: &Element, out: &mut Element) -> Result<()> {
        self.op.apply_impl(y, out)
    }

    fn apply_adjoint_in_place_impl(&self, y: &mut Element) -> Result<()> {
        self.op.apply_in_place_impl(y)
    }
}
