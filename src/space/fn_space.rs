//! Finite-dimensional spaces `F^n` backed by flat typed buffers.

use std::fmt;
use std::ops::Range;

use log::debug;
use num_complex::Complex64;

use crate::config::backend::Impl;
use crate::core::buffer::Buffer;
use crate::core::dtype::{DType, Field};
use crate::core::scalar::{Number, Scalar};
use crate::core::value::{NdArray, Value};
use crate::error::{FnError, Result};

/// The space `F^n` of `size`-tuples of `dtype` entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FnSpace {
    size: usize,
    dtype: DType,
    backend: Impl,
}

/// Real Euclidean space `R^n` with `float64` entries.
pub fn rn(size: usize) -> Result<FnSpace> {
    FnSpace::new(size, DType::F64)
}

/// Complex Euclidean space `C^n` with `complex128` entries.
pub fn cn(size: usize) -> Result<FnSpace> {
    FnSpace::new(size, DType::C128)
}

impl FnSpace {
    pub fn new(size: usize, dtype: DType) -> Result<FnSpace> {
        FnSpace::with_backend(size, dtype, Impl::Host)
    }

    /// Space whose vectors live on `backend`. Fails with `NotImplemented`
    /// when the backend cannot hold `dtype` or is not available.
    pub fn with_backend(size: usize, dtype: DType, backend: Impl) -> Result<FnSpace> {
        if size == 0 {
            return Err(FnError::Value("space must have a positive number of entries".into()));
        }
        backend.check(dtype)?;
        debug!("created {backend:?} space of {size} {dtype} entries");
        Ok(FnSpace { size, dtype, backend })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dtype(&self) -> DType {
        self.dtype
    }

    pub fn field(&self) -> Field {
        self.dtype.field()
    }

    pub fn backend(&self) -> Impl {
        self.backend
    }

    pub fn zero(&self) -> Vector {
        Vector {
            space: *self,
            data: Buffer::zeros(self.dtype, self.size),
        }
    }

    /// Vector with unspecified contents; callers overwrite every entry
    /// before reading.
    pub fn empty(&self) -> Vector {
        self.zero()
    }

    pub fn one(&self) -> Result<Vector> {
        Ok(Vector {
            space: *self,
            data: Buffer::full(self.dtype, self.size, Number::Int(1))?,
        })
    }

    /// Copy `data` into a new vector.
    ///
    /// `data` must be one-dimensional with exactly `size` entries
    /// (`Shape` otherwise) whose values can be cast to the space's dtype
    /// without leaving its field (`Type` otherwise).
    pub fn element(&self, data: impl Into<Value>) -> Result<Vector> {
        let value = data.into();
        if let Value::Array(a) = &value {
            if a.shape() == [self.size] && a.dtype() == self.dtype {
                return self.element_from_buffer(a.to_buffer());
            }
        }
        let dense = value.to_dense()?;
        if dense.shape != [self.size] {
            return Err(FnError::Shape(format!(
                "input of shape {:?} does not fit {self}",
                dense.shape
            )));
        }
        self.element_from_buffer(Buffer::from_numbers(self.dtype, &dense.values)?)
    }

    /// Wrap an existing buffer without copying.
    pub fn element_from_buffer(&self, data: Buffer) -> Result<Vector> {
        if data.dtype() != self.dtype {
            return Err(FnError::Type(format!("{} data in {self}", data.dtype())));
        }
        if data.len() != self.size {
            return Err(FnError::Shape(format!("{} entries in {self}", data.len())));
        }
        Ok(Vector { space: *self, data })
    }

    /// Whether scaling vectors of this space by `scalar` stays in the space.
    pub fn accepts_scalar(&self, scalar: Number) -> bool {
        Buffer::accepts_scalar(self.dtype, scalar)
    }
}

impl fmt::Display for FnSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.dtype, self.backend) {
            (DType::F64, Impl::Host) => write!(f, "rn({})", self.size),
            (DType::C128, Impl::Host) => write!(f, "cn({})", self.size),
            (dtype, Impl::Host) => write!(f, "fn({}, {dtype})", self.size),
            (dtype, backend) => write!(f, "fn({}, {dtype}, {backend:?})", self.size),
        }
    }
}

// Fit `value` into `len` entries: exact length, a scalar, or a single
// entry broadcast to all positions.
pub(crate) fn broadcast_into(value: &Value, len: usize, dtype: DType) -> Result<Buffer> {
    if let Value::Number(n) = value {
        return Buffer::full(dtype, len, *n);
    }
    let dense = value.to_dense()?;
    match dense.shape.as_slice() {
        [n] if *n == len => Buffer::from_numbers(dtype, &dense.values),
        [1] => Buffer::full(dtype, len, dense.values[0]),
        shape => Err(FnError::Shape(format!(
            "cannot broadcast input of shape {shape:?} to length {len}"
        ))),
    }
}

/// Element of an [`FnSpace`]. Owns its buffer exclusively.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector {
    space: FnSpace,
    data: Buffer,
}

impl Vector {
    pub fn space(&self) -> &FnSpace {
        &self.space
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.space.dtype
    }

    pub fn data(&self) -> &Buffer {
        &self.data
    }

    pub fn into_data(self) -> Buffer {
        self.data
    }

    /// Typed view of the entries; `Type` error if `T` is not the dtype.
    pub fn as_slice<T: Scalar>(&self) -> Result<&[T]> {
        let dtype = self.dtype();
        self.data
            .as_slice::<T>()
            .ok_or_else(|| FnError::Type(format!("{} view of a {dtype} vector", T::DTYPE)))
    }

    pub fn as_mut_slice<T: Scalar>(&mut self) -> Result<&mut [T]> {
        let dtype = self.dtype();
        self.data
            .as_mut_slice::<T>()
            .ok_or_else(|| FnError::Type(format!("{} view of a {dtype} vector", T::DTYPE)))
    }

    pub fn get(&self, index: usize) -> Result<Number> {
        self.data.get(index).ok_or(FnError::IndexOutOfBounds {
            index,
            len: self.len(),
        })
    }

    pub fn set(&mut self, index: usize, value: impl Into<Number>) -> Result<()> {
        self.data.set(index, value.into())
    }

    /// Copy of the entries in `range` as a vector of a matching space.
    ///
    /// Spaces have at least one entry, so an empty `range` is a value
    /// error naming the range.
    pub fn get_range(&self, range: Range<usize>) -> Result<Vector> {
        if range.is_empty() && range.end <= self.len() {
            return Err(FnError::Value(format!(
                "empty range {range:?} of a vector of length {}",
                self.len()
            )));
        }
        let data = self.data.slice(range)?;
        FnSpace::with_backend(data.len(), self.dtype(), self.space.backend)?
            .element_from_buffer(data)
    }

    /// Assign to `range` from a full-length array, a scalar or a
    /// one-element sequence. Nothing is written on error.
    pub fn set_range(&mut self, range: Range<usize>, value: impl Into<Value>) -> Result<()> {
        if range.start > range.end || range.end > self.len() {
            return Err(FnError::IndexOutOfBounds {
                index: range.end,
                len: self.len(),
            });
        }
        let src = broadcast_into(&value.into(), range.len(), self.dtype())?;
        self.data.write_range(range, &src)
    }

    /// Assign to all entries (`v[:] = value`).
    pub fn assign(&mut self, value: impl Into<Value>) -> Result<()> {
        let len = self.len();
        self.set_range(0..len, value)
    }

    pub fn fill(&mut self, value: impl Into<Number>) -> Result<()> {
        self.data.fill(value.into())
    }

    pub fn scale(&mut self, scalar: Number) -> Result<()> {
        self.data.scale(scalar)
    }

    fn check_same_space(&self, other: &Vector) -> Result<()> {
        if self.space != other.space {
            return Err(FnError::Type(format!("{} is not {}", other.space, self.space)));
        }
        Ok(())
    }

    /// `self += other`.
    pub fn add_assign(&mut self, other: &Vector) -> Result<()> {
        self.check_same_space(other)?;
        self.data.add_assign(&other.data)
    }

    pub fn copy_from(&mut self, other: &Vector) -> Result<()> {
        self.check_same_space(other)?;
        self.data.copy_from(&other.data)
    }

    /// `<self, other>`, linear in `self` and conjugate-linear in `other`.
    pub fn inner(&self, other: &Vector) -> Result<Number> {
        self.check_same_space(other)?;
        let sum = self
            .data
            .to_numbers()
            .into_iter()
            .zip(other.data.to_numbers())
            .fold(Complex64::new(0.0, 0.0), |acc, (a, b)| {
                acc + a.to_complex() * b.to_complex().conj()
            });
        Ok(match self.space.field() {
            Field::Real => Number::Real(sum.re),
            Field::Complex => Number::Complex(sum),
        })
    }

    pub fn norm(&self) -> f64 {
        self.data
            .to_numbers()
            .into_iter()
            .map(|x| x.abs().powi(2))
            .sum::<f64>()
            .sqrt()
    }

    pub fn to_array(&self) -> NdArray {
        NdArray::from_buffer(self.data.clone())
    }

    pub fn to_value(&self) -> Value {
        Value::Array(self.to_array())
    }
}

impl From<&Vector> for Value {
    fn from(v: &Vector) -> Value {
        v.to_value()
    }
}
