//! Arithmetic operators on [`OperatorRef`].
//!
//! `a + b` builds a [`Sum`], `a * b` a [`Composition`], `c * a` and
//! `a * c` a left or right [`ScalarMultiplication`], and `-a` scales by
//! `-1`. Results are `Result`s carrying exactly the errors of the explicit
//! constructors.

use std::ops::{Add, Mul, Neg, Sub};

use num_complex::Complex64;

use crate::core::scalar::Number;
use crate::core::value::Value;
use crate::error::Result;
use crate::operator::OperatorRef;
use crate::operator::combinator::{Composition, ScalarMultiplication, Side, Sum};

impl Add for OperatorRef {
    type Output = Result<OperatorRef>;

    fn add(self, rhs: OperatorRef) -> Self::Output {
        Sum::new(self, rhs).map(OperatorRef::new)
    }
}

impl Add for &OperatorRef {
    type Output = Result<OperatorRef>;

    fn add(self, rhs: &OperatorRef) -> Self::Output {
        self.clone() + rhs.clone()
    }
}

impl Sub for OperatorRef {
    type Output = Result<OperatorRef>;

    fn sub(self, rhs: OperatorRef) -> Self::Output {
        self + (-rhs)?
    }
}

impl Sub for &OperatorRef {
    type Output = Result<OperatorRef>;

    fn sub(self, rhs: &OperatorRef) -> Self::Output {
        self.clone() - rhs.clone()
    }
}

impl Mul for OperatorRef {
    type Output = Result<OperatorRef>;

    fn mul(self, rhs: OperatorRef) -> Self::Output {
        Composition::new(self, rhs).map(OperatorRef::new)
    }
}

impl Mul for &OperatorRef {
    type Output = Result<OperatorRef>;

    fn mul(self, rhs: &OperatorRef) -> Self::Output {
        self.clone() * rhs.clone()
    }
}

impl Neg for OperatorRef {
    type Output = Result<OperatorRef>;

    fn neg(self) -> Self::Output {
        ScalarMultiplication::new(self, Number::Int(-1), Side::Left).map(OperatorRef::new)
    }
}

impl Neg for &OperatorRef {
    type Output = Result<OperatorRef>;

    fn neg(self) -> Self::Output {
        -self.clone()
    }
}

macro_rules! scalar_mul {
    ($($t:ty),* $(,)?) => {
        $(
            impl Mul<$t> for OperatorRef {
                type Output = Result<OperatorRef>;

                fn mul(self, rhs: $t) -> Self::Output {
                    ScalarMultiplication::new(self, Value::from(rhs), Side::Right)
                        .map(OperatorRef::new)
                }
            }

            impl Mul<$t> for &OperatorRef {
                type Output = Result<OperatorRef>;

                fn mul(self, rhs: $t) -> Self::Output {
                    self.clone() * rhs
                }
            }

            impl Mul<OperatorRef> for $t {
                type Output = Result<OperatorRef>;

                fn mul(self, rhs: OperatorRef) -> Self::Output {
                    ScalarMultiplication::new(rhs, Value::from(self), Side::Left)
                        .map(OperatorRef::new)
                }
            }

            impl Mul<&OperatorRef> for $t {
                type Output = Result<OperatorRef>;

                fn mul(self, rhs: &OperatorRef) -> Self::Output {
                    self * rhs.clone()
                }
            }
        )*
    };
}

scalar_mul!(i32, i64, f32, f64, Complex64, Number, Value);
