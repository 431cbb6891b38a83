//! Flat, typed storage shared by every array-backed space.
//!
//! A `Buffer` is one `Vec` of a concrete element type, tagged by variant.
//! Generic code is written once against [`Scalar`] and routed through the
//! `dispatch!`/`by_dtype!` macros.

use std::ops::Range;

use num_complex::{Complex32, Complex64};

use crate::core::dtype::DType;
use crate::core::scalar::{Number, Scalar};
use crate::error::{FnError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Buffer {
    Bool(Vec<bool>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    C64(Vec<Complex32>),
    C128(Vec<Complex64>),
}

/// Run `$body` with `$v` bound to the inner `Vec` of whichever variant
/// `$buf` holds.
macro_rules! dispatch {
    ($buf:expr, $v:ident => $body:expr) => {
        match $buf {
            Buffer::Bool($v) => $body,
            Buffer::I8($v) => $body,
            Buffer::I16($v) => $body,
            Buffer::I32($v) => $body,
            Buffer::I64($v) => $body,
            Buffer::U8($v) => $body,
            Buffer::U16($v) => $body,
            Buffer::U32($v) => $body,
            Buffer::U64($v) => $body,
            Buffer::F32($v) => $body,
            Buffer::F64($v) => $body,
            Buffer::C64($v) => $body,
            Buffer::C128($v) => $body,
        }
    };
}

/// Run `$body` with the type alias `$t` set to the element type of `$dtype`.
macro_rules! by_dtype {
    ($dtype:expr, $t:ident => $body:expr) => {
        match $dtype {
            DType::Bool => {
                type $t = bool;
                $body
            }
            DType::I8 => {
                type $t = i8;
                $body
            }
            DType::I16 => {
                type $t = i16;
                $body
            }
            DType::I32 => {
                type $t = i32;
                $body
            }
            DType::I64 => {
                type $t = i64;
                $body
            }
            DType::U8 => {
                type $t = u8;
                $body
            }
            DType::U16 => {
                type $t = u16;
                $body
            }
            DType::U32 => {
                type $t = u32;
                $body
            }
            DType::U64 => {
                type $t = u64;
                $body
            }
            DType::F32 => {
                type $t = f32;
                $body
            }
            DType::F64 => {
                type $t = f64;
                $body
            }
            DType::C64 => {
                type $t = ::num_complex::Complex32;
                $body
            }
            DType::C128 => {
                type $t = ::num_complex::Complex64;
                $body
            }
        }
    };
}

pub(crate) use {by_dtype, dispatch};

fn dtype_of<T: Scalar>(_: &[T]) -> DType {
    T::DTYPE
}

fn cast<T: Scalar>(n: Number) -> Result<T> {
    T::from_number(n).ok_or_else(|| FnError::Type(format!("cannot cast {n} to {}", T::DTYPE)))
}

// View `other` with the element type of `like`, if the variants agree.
fn view_like<'a, T: Scalar>(_like: &[T], other: &'a Buffer) -> Option<&'a [T]> {
    T::view(other)
}

fn add_slices<T: Scalar>(dst: &mut [T], src: &[T]) {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        dst.par_iter_mut().zip(src.par_iter()).for_each(|(d, s)| *d = Scalar::add(*d, *s));
    }
    #[cfg(not(feature = "rayon"))]
    {
        dst.iter_mut().zip(src.iter()).for_each(|(d, s)| *d = Scalar::add(*d, *s));
    }
}

fn scale_slice<T: Scalar>(dst: &mut [T], c: T) {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        dst.par_iter_mut().for_each(|d| *d = Scalar::mul(*d, c));
    }
    #[cfg(not(feature = "rayon"))]
    {
        dst.iter_mut().for_each(|d| *d = Scalar::mul(*d, c));
    }
}

impl Buffer {
    pub fn zeros(dtype: DType, len: usize) -> Buffer {
        by_dtype!(dtype, T => T::into_buffer(vec![<T as Scalar>::zero(); len]))
    }

    pub fn full(dtype: DType, len: usize, value: Number) -> Result<Buffer> {
        by_dtype!(dtype, T => Ok(T::into_buffer(vec![cast::<T>(value)?; len])))
    }

    /// Build a buffer of `dtype` from runtime scalars, failing with a type
    /// error on the first value that cannot be cast.
    pub fn from_numbers(dtype: DType, values: &[Number]) -> Result<Buffer> {
        by_dtype!(dtype, T => {
            let data = values.iter().map(|&n| cast::<T>(n)).collect::<Result<Vec<T>>>()?;
            Ok(T::into_buffer(data))
        })
    }

    pub fn from_vec<T: Scalar>(data: Vec<T>) -> Buffer {
        T::into_buffer(data)
    }

    pub fn dtype(&self) -> DType {
        dispatch!(self, v => dtype_of(v))
    }

    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_slice<T: Scalar>(&self) -> Option<&[T]> {
        T::view(self)
    }

    pub fn as_mut_slice<T: Scalar>(&mut self) -> Option<&mut [T]> {
        T::view_mut(self)
    }

    pub fn get(&self, index: usize) -> Option<Number> {
        dispatch!(self, v => v.get(index).map(|x| x.to_number()))
    }

    pub fn set(&mut self, index: usize, value: Number) -> Result<()> {
        let len = self.len();
        dispatch!(self, v => {
            let slot = v
                .get_mut(index)
                .ok_or(FnError::IndexOutOfBounds { index, len })?;
            *slot = cast(value)?;
            Ok(())
        })
    }

    pub fn fill(&mut self, value: Number) -> Result<()> {
        dispatch!(self, v => {
            let c = cast(value)?;
            v.iter_mut().for_each(|x| *x = c);
            Ok(())
        })
    }

    pub fn to_numbers(&self) -> Vec<Number> {
        dispatch!(self, v => v.iter().map(|x| x.to_number()).collect())
    }

    pub fn cast(&self, dtype: DType) -> Result<Buffer> {
        if dtype == self.dtype() {
            return Ok(self.clone());
        }
        Buffer::from_numbers(dtype, &self.to_numbers())
    }

    pub fn slice(&self, range: Range<usize>) -> Result<Buffer> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(FnError::IndexOutOfBounds { index: range.end, len });
        }
        Ok(dispatch!(self, v => Scalar::into_buffer(v[range].to_vec())))
    }

    /// Overwrite `range` with the contents of `src`, which must have the
    /// same dtype and exactly `range.len()` entries.
    pub fn write_range(&mut self, range: Range<usize>, src: &Buffer) -> Result<()> {
        let len = self.len();
        if range.start > range.end || range.end > len {
            return Err(FnError::IndexOutOfBounds { index: range.end, len });
        }
        if src.len() != range.len() {
            return Err(FnError::Shape(format!(
                "cannot write {} values into a slice of length {}",
                src.len(),
                range.len()
            )));
        }
        let (dst_dtype, src_dtype) = (self.dtype(), src.dtype());
        dispatch!(self, v => {
            let s = view_like(v, src).ok_or_else(|| {
                FnError::Type(format!("dtype mismatch: {dst_dtype} vs {src_dtype}"))
            })?;
            v[range].copy_from_slice(s);
            Ok(())
        })
    }

    pub fn copy_from(&mut self, src: &Buffer) -> Result<()> {
        let len = self.len();
        self.write_range(0..len, src)
    }

    /// `self += other`, element-wise. Bool buffers add as logical or.
    pub fn add_assign(&mut self, other: &Buffer) -> Result<()> {
        if self.len() != other.len() {
            return Err(FnError::Shape(format!("length {} vs {}", self.len(), other.len())));
        }
        let (dst_dtype, src_dtype) = (self.dtype(), other.dtype());
        dispatch!(self, v => {
            let s = view_like(v, other).ok_or_else(|| {
                FnError::Type(format!("dtype mismatch: {dst_dtype} vs {src_dtype}"))
            })?;
            add_slices(v, s);
            Ok(())
        })
    }

    /// Whether multiplying by `scalar` keeps the buffer in its dtype: the
    /// scalar's field must fit and its value must be representable.
    pub fn accepts_scalar(dtype: DType, scalar: Number) -> bool {
        let field_ok = match scalar {
            Number::Complex(_) => dtype.is_complex_floating(),
            Number::Real(_) => dtype.is_floating(),
            Number::Int(_) | Number::Bool(_) => dtype.is_numeric(),
        };
        field_ok && by_dtype!(dtype, T => T::from_number(scalar).is_some())
    }

    /// `self *= scalar`. Integer buffers only accept integral scalars.
    pub fn scale(&mut self, scalar: Number) -> Result<()> {
        let dtype = self.dtype();
        if !Buffer::accepts_scalar(dtype, scalar) {
            return Err(FnError::Type(format!("cannot scale a {dtype} buffer by {scalar}")));
        }
        dispatch!(self, v => {
            let c = cast(scalar)?;
            scale_slice(v, c);
            Ok(())
        })
    }

    /// Complex conjugate in place; no-op for real dtypes.
    pub fn conj_in_place(&mut self) {
        match self {
            Buffer::C64(v) => v.iter_mut().for_each(|x| *x = x.conj()),
            Buffer::C128(v) => v.iter_mut().for_each(|x| *x = x.conj()),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_carry_dtype() {
        for dtype in DType::ALL {
            let b = Buffer::zeros(dtype, 4);
            assert_eq!(b.dtype(), dtype);
            assert_eq!(b.len(), 4);
        }
    }

    #[test]
    fn complex_values_rejected_by_real_buffers() {
        let values = [Number::Real(1.0), Number::Complex(Complex64::new(0.0, 1.0))];
        let err = Buffer::from_numbers(DType::F64, &values).unwrap_err();
        assert!(err.is_type_error());
        assert!(Buffer::from_numbers(DType::C128, &values).is_ok());
    }

    #[test]
    fn add_and_scale() {
        let mut a = Buffer::from_vec(vec![1.0f64, 2.0, 3.0]);
        let b = Buffer::from_vec(vec![0.5f64, 0.5, 0.5]);
        a.add_assign(&b).unwrap();
        a.scale(Number::Real(2.0)).unwrap();
        assert_eq!(a.as_slice::<f64>().unwrap(), &[3.0, 5.0, 7.0]);

        let c = Buffer::from_vec(vec![1.0f32; 3]);
        assert!(a.add_assign(&c).unwrap_err().is_type_error());
    }

    #[test]
    fn integer_buffers_reject_real_scalars() {
        let mut a = Buffer::from_vec(vec![1i32, 2, 3]);
        assert!(a.scale(Number::Real(1.5)).is_err());
        a.scale(Number::Int(-2)).unwrap();
        assert_eq!(a.as_slice::<i32>().unwrap(), &[-2, -4, -6]);
    }

    /// Out-of-range integral scalars are refused before any entry changes.
    #[test]
    fn unrepresentable_scalars_rejected() {
        assert!(!Buffer::accepts_scalar(DType::U8, Number::Int(-1)));
        assert!(!Buffer::accepts_scalar(DType::U8, Number::Int(300)));
        assert!(Buffer::accepts_scalar(DType::U8, Number::Int(3)));
        assert!(!Buffer::accepts_scalar(DType::I8, Number::Int(128)));
        assert!(Buffer::accepts_scalar(DType::F32, Number::Int(300)));

        let mut a = Buffer::from_vec(vec![1u8, 2, 3]);
        assert!(a.scale(Number::Int(-1)).unwrap_err().is_type_error());
        assert_eq!(a.as_slice::<u8>().unwrap(), &[1, 2, 3]);
    }

    #[test]
    fn bool_addition_is_logical_or() {
        let mut a = Buffer::from_vec(vec![true, false, false]);
        a.add_assign(&Buffer::from_vec(vec![true, true, false])).unwrap();
        assert_eq!(a.as_slice::<bool>().unwrap(), &[true, true, false]);
    }

    #[test]
    fn write_range() {
        let mut b = Buffer::zeros(DType::U8, 4);
        b.write_range(1..3, &Buffer::from_vec(vec![7u8, 8])).unwrap();
        assert_eq!(b.to_numbers(), vec![Number::Int(0), Number::Int(7), Number::Int(8), Number::Int(0)]);
        assert!(b.write_range(0..3, &Buffer::from_vec(vec![1u8])).is_err());
    }

    #[test]
    fn set_is_bounds_checked() {
        let mut a = Buffer::zeros(DType::F32, 2);
        assert_eq!(
            a.set(2, Number::Real(1.0)),
            Err(FnError::IndexOutOfBounds { index: 2, len: 2 })
        );
    }
}
