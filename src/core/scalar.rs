//! Runtime scalars and the element-type trait backing typed buffers.

use std::fmt;

use ndarray::ArrayD;
use num_complex::{Complex32, Complex64};
use num_traits::ToPrimitive;

use crate::core::buffer::Buffer;
use crate::core::dtype::{DType, Field};
use crate::core::value::NdArray;

/// A dynamically typed scalar.
///
/// Integers of every width fit into `Int` without loss; comparisons across
/// variants compare numeric values (`Int(1) == Real(1.0)`).
#[derive(Debug, Clone, Copy)]
pub enum Number {
    Bool(bool),
    Int(i128),
    Real(f64),
    Complex(Complex64),
}

impl Number {
    pub fn field(self) -> Field {
        match self {
            Number::Complex(_) => Field::Complex,
            _ => Field::Real,
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Number::Complex(_))
    }

    pub fn to_complex(self) -> Complex64 {
        match self {
            Number::Bool(b) => Complex64::new(f64::from(u8::from(b)), 0.0),
            Number::Int(i) => Complex64::new(i as f64, 0.0),
            Number::Real(r) => Complex64::new(r, 0.0),
            Number::Complex(c) => c,
        }
    }

    /// Real value, `None` for complex numbers.
    pub fn to_f64(self) -> Option<f64> {
        match self {
            Number::Complex(_) => None,
            other => Some(other.to_complex().re),
        }
    }

    pub fn conj(self) -> Number {
        match self {
            Number::Complex(c) => Number::Complex(c.conj()),
            other => other,
        }
    }

    pub fn is_nan(self) -> bool {
        let c = self.to_complex();
        c.re.is_nan() || c.im.is_nan()
    }

    pub fn abs(self) -> f64 {
        self.to_complex().norm()
    }

    /// `|a - b| <= atol + rtol * |b|`, with two NaNs comparing equal.
    pub fn is_close(self, other: Number, rtol: f64, atol: f64) -> bool {
        if self.is_nan() || other.is_nan() {
            return self.is_nan() && other.is_nan();
        }
        let (a, b) = (self.to_complex(), other.to_complex());
        if a.re.is_infinite() || a.im.is_infinite() || b.re.is_infinite() || b.im.is_infinite() {
            return a == b;
        }
        (a - b).norm() <= atol + rtol * b.norm()
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (*self, *other) {
            (Number::Int(a), Number::Int(b)) => a == b,
            (Number::Bool(a), Number::Bool(b)) => a == b,
            (a, b) => a.to_complex() == b.to_complex(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Bool(b) => write!(f, "{b}"),
            Number::Int(i) => write!(f, "{i}"),
            Number::Real(r) => write!(f, "{r}"),
            Number::Complex(c) => write!(f, "{c}"),
        }
    }
}

macro_rules! number_from {
    ($($t:ty => $variant:ident as $conv:ty),* $(,)?) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Number {
                    Number::$variant(<$conv>::from(v))
                }
            }
        )*
    };
}

number_from! {
    bool => Bool as bool,
    i8 => Int as i128,
    i16 => Int as i128,
    i32 => Int as i128,
    i64 => Int as i128,
    u8 => Int as i128,
    u16 => Int as i128,
    u32 => Int as i128,
    u64 => Int as i128,
    f32 => Real as f64,
    f64 => Real as f64,
    Complex64 => Complex as Complex64,
}

impl From<Complex32> for Number {
    fn from(v: Complex32) -> Number {
        Number::Complex(Complex64::new(f64::from(v.re), f64::from(v.im)))
    }
}

/// Element type of a typed buffer.
///
/// Every supported [`DType`] has exactly one implementor. Arithmetic
/// follows fixed-width semantics: integers wrap, booleans use `|`/`&`.
pub trait Scalar: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const DTYPE: DType;

    fn zero() -> Self;

    fn to_number(self) -> Number;

    /// Cast a runtime scalar into this type. Returns `None` when the value
    /// cannot be represented without leaving its field (complex into real)
    /// or the integer range.
    fn from_number(n: Number) -> Option<Self>;

    fn add(self, other: Self) -> Self;

    fn mul(self, other: Self) -> Self;

    /// Complex conjugate; identity for real types.
    fn conj(self) -> Self {
        self
    }

    fn view(buf: &Buffer) -> Option<&[Self]>;

    fn view_mut(buf: &mut Buffer) -> Option<&mut [Self]>;

    fn into_buffer(data: Vec<Self>) -> Buffer;

    fn array_view(arr: &NdArray) -> Option<&ArrayD<Self>>;

    fn into_array(arr: ArrayD<Self>) -> NdArray;
}

macro_rules! impl_storage_access {
    ($variant:ident) => {
        fn view(buf: &Buffer) -> Option<&[Self]> {
            match buf {
                Buffer::$variant(v) => Some(v.as_slice()),
                _ => None,
            }
        }

        fn view_mut(buf: &mut Buffer) -> Option<&mut [Self]> {
            match buf {
                Buffer::$variant(v) => Some(v.as_mut_slice()),
                _ => None,
            }
        }

        fn into_buffer(data: Vec<Self>) -> Buffer {
            Buffer::$variant(data)
        }

        fn array_view(arr: &NdArray) -> Option<&ArrayD<Self>> {
            match arr {
                NdArray::$variant(a) => Some(a),
                _ => None,
            }
        }

        fn into_array(arr: ArrayD<Self>) -> NdArray {
            NdArray::$variant(arr)
        }
    };
}

macro_rules! impl_int_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $t {
                const DTYPE: DType = DType::$variant;

                fn zero() -> Self {
                    0
                }

                fn to_number(self) -> Number {
                    Number::Int(i128::from(self))
                }

                fn from_number(n: Number) -> Option<Self> {
                    match n {
                        Number::Bool(b) => Some(<$t>::from(b)),
                        Number::Int(i) => num_traits::cast::<i128, $t>(i),
                        Number::Real(r) if r.is_finite() => num_traits::cast::<f64, $t>(r.trunc()),
                        _ => None,
                    }
                }

                fn add(self, other: Self) -> Self {
                    self.wrapping_add(other)
                }

                fn mul(self, other: Self) -> Self {
                    self.wrapping_mul(other)
                }

                impl_storage_access!($variant);
            }
        )*
    };
}

impl_int_scalar! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
}

macro_rules! impl_float_scalar {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl Scalar for $t {
                const DTYPE: DType = DType::$variant;

                fn zero() -> Self {
                    0.0
                }

                fn to_number(self) -> Number {
                    Number::Real(f64::from(self))
                }

                fn from_number(n: Number) -> Option<Self> {
                    match n {
                        Number::Complex(_) => None,
                        Number::Int(i) => i.to_f64().map(|v| v as $t),
                        other => other.to_f64().map(|v| v as $t),
                    }
                }

                fn add(self, other: Self) -> Self {
                    self + other
                }

                fn mul(self, other: Self) -> Self {
                    self * other
                }

                impl_storage_access!($variant);
            }
        )*
    };
}

impl_float_scalar! {
    f32 => F32,
    f64 => F64,
}

impl Scalar for Complex32 {
    const DTYPE: DType = DType::C64;

    fn zero() -> Self {
        Complex32::new(0.0, 0.0)
    }

    fn to_number(self) -> Number {
        Number::from(self)
    }

    fn from_number(n: Number) -> Option<Self> {
        let c = n.to_complex();
        Some(Complex32::new(c.re as f32, c.im as f32))
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn mul(self, other: Self) -> Self {
        self * other
    }

    fn conj(self) -> Self {
        Complex32::conj(&self)
    }

    impl_storage_access!(C64);
}

impl Scalar for Complex64 {
    const DTYPE: DType = DType::C128;

    fn zero() -> Self {
        Complex64::new(0.0, 0.0)
    }

    fn to_number(self) -> Number {
        Number::Complex(self)
    }

    fn from_number(n: Number) -> Option<Self> {
        Some(n.to_complex())
    }

    fn add(self, other: Self) -> Self {
        self + other
    }

    fn mul(self, other: Self) -> Self {
        self * other
    }

    fn conj(self) -> Self {
        Complex64::conj(&self)
    }

    impl_storage_access!(C128);
}

impl Scalar for bool {
    const DTYPE: DType = DType::Bool;

    fn zero() -> Self {
        false
    }

    fn to_number(self) -> Number {
        Number::Bool(self)
    }

    fn from_number(n: Number) -> Option<Self> {
        match n {
            Number::Bool(b) => Some(b),
            Number::Int(i) => Some(i != 0),
            Number::Real(r) => Some(r != 0.0),
            Number::Complex(_) => None,
        }
    }

    fn add(self, other: Self) -> Self {
        self | other
    }

    fn mul(self, other: Self) -> Self {
        self & other
    }

    impl_storage_access!(Bool);
}
