//! Dynamically shaped input/output data.
//!
//! [`Value`] is what spaces ingest (`element`, slice assignment) and what the
//! comparison and noise utilities produce and consume. It is either a bare
//! scalar, a rectangular typed array, or a sequence of sub-values whose
//! shapes may differ (the ragged case used by non-power product spaces).

use ndarray::{Array, ArrayD, ArrayViewD, Axis, IxDyn, Shape, ShapeBuilder, arr0};
use num_complex::{Complex32, Complex64};

use crate::core::buffer::{Buffer, dispatch};
use crate::core::dtype::DType;
use crate::core::scalar::{Number, Scalar};
use crate::error::{FnError, Result};

/// Memory ordering of a multi-dimensional array flattened into a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Row-major: the last index varies fastest.
    #[default]
    C,
    /// Column-major: the first index varies fastest.
    F,
}

impl Order {
    /// `shape` with the memory layout of this order.
    pub fn layout(self, shape: &[usize]) -> Shape<IxDyn> {
        IxDyn(shape).set_f(self == Order::F)
    }

    /// Entries of `a` in the sequence this order stores them.
    pub fn flatten<T: Clone>(self, a: ArrayViewD<'_, T>) -> Vec<T> {
        match self {
            Order::C => a.iter().cloned().collect(),
            // the transpose iterated row-major runs the first axis fastest
            Order::F => a.t().iter().cloned().collect(),
        }
    }
}

/// Rectangular typed array, one `ndarray` array per element type.
///
/// Equality is logical: two arrays with the same shape and entries are
/// equal whatever their memory layout.
#[derive(Debug, Clone, PartialEq)]
pub enum NdArray {
    Bool(ArrayD<bool>),
    I8(ArrayD<i8>),
    I16(ArrayD<i16>),
    I32(ArrayD<i32>),
    I64(ArrayD<i64>),
    U8(ArrayD<u8>),
    U16(ArrayD<u16>),
    U32(ArrayD<u32>),
    U64(ArrayD<u64>),
    F32(ArrayD<f32>),
    F64(ArrayD<f64>),
    C64(ArrayD<Complex32>),
    C128(ArrayD<Complex64>),
}

macro_rules! dispatch_array {
    ($arr:expr, $a:ident => $body:expr) => {
        match $arr {
            NdArray::Bool($a) => $body,
            NdArray::I8($a) => $body,
            NdArray::I16($a) => $body,
            NdArray::I32($a) => $body,
            NdArray::I64($a) => $body,
            NdArray::U8($a) => $body,
            NdArray::U16($a) => $body,
            NdArray::U32($a) => $body,
            NdArray::U64($a) => $body,
            NdArray::F32($a) => $body,
            NdArray::F64($a) => $body,
            NdArray::C64($a) => $body,
            NdArray::C128($a) => $body,
        }
    };
}

fn elem_dtype<T: Scalar>(_: &ArrayD<T>) -> DType {
    T::DTYPE
}

fn relayout<T: Scalar>(a: &ArrayD<T>, order: Order) -> ArrayD<T> {
    let mut out = Array::from_elem(order.layout(a.shape()), T::zero());
    out.assign(a);
    out
}

fn view_like<'a, T: Scalar>(_like: &ArrayD<T>, other: &'a NdArray) -> Option<ArrayViewD<'a, T>> {
    T::array_view(other).map(|a| a.view())
}

fn incompatible(len: usize, shape: &[usize]) -> FnError {
    FnError::Shape(format!("buffer of length {len} cannot have shape {shape:?}"))
}

impl NdArray {
    /// Array of `shape` over `data`, which holds the entries in the
    /// memory sequence of `order`.
    pub fn new(shape: Vec<usize>, order: Order, data: Buffer) -> Result<NdArray> {
        let len = data.len();
        dispatch!(data, v => Array::from_shape_vec(order.layout(&shape), v)
            .map(NdArray::from_array)
            .map_err(|_| incompatible(len, &shape)))
    }

    /// Array with C-ordered logical contents `c_data`, laid out in `order`.
    pub fn from_c_data(shape: Vec<usize>, order: Order, c_data: Buffer) -> Result<NdArray> {
        Ok(NdArray::new(shape, Order::C, c_data)?.to_order(order))
    }

    pub fn from_array<T: Scalar>(a: ArrayD<T>) -> NdArray {
        T::into_array(a)
    }

    /// Typed view; `None` if `T` is not the element type.
    pub fn as_array<T: Scalar>(&self) -> Option<&ArrayD<T>> {
        T::array_view(self)
    }

    /// One-dimensional array over `data`.
    pub fn from_buffer(data: Buffer) -> NdArray {
        dispatch!(data, v => NdArray::from_array(Array::from_vec(v).into_dyn()))
    }

    pub fn from_vec<T: Scalar>(data: Vec<T>) -> NdArray {
        NdArray::from_array(Array::from_vec(data).into_dyn())
    }

    /// Zero-dimensional array holding one value.
    pub fn scalar<T: Scalar>(value: T) -> NdArray {
        NdArray::from_array(arr0(value).into_dyn())
    }

    /// Reshape a C-ordered vector into `shape`.
    pub fn from_shape_vec<T: Scalar>(shape: &[usize], data: Vec<T>) -> Result<NdArray> {
        let len = data.len();
        Array::from_shape_vec(IxDyn(shape), data)
            .map(NdArray::from_array)
            .map_err(|_| incompatible(len, shape))
    }

    pub fn shape(&self) -> &[usize] {
        dispatch_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        dispatch_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DType {
        dispatch_array!(self, a => elem_dtype(a))
    }

    /// `F` for column-major layouts that are not also row-major.
    pub fn order(&self) -> Order {
        if self.is_f_contiguous() && !self.is_c_contiguous() {
            Order::F
        } else {
            Order::C
        }
    }

    /// Entries in memory order.
    pub fn to_buffer(&self) -> Buffer {
        let order = self.order();
        dispatch_array!(self, a => Scalar::into_buffer(order.flatten(a.view())))
    }

    pub fn is_c_contiguous(&self) -> bool {
        dispatch_array!(self, a => a.is_standard_layout())
    }

    pub fn is_f_contiguous(&self) -> bool {
        dispatch_array!(self, a => a.t().is_standard_layout())
    }

    pub fn get(&self, index: &[usize]) -> Option<Number> {
        dispatch_array!(self, a => a.get(index).map(|x| x.to_number()))
    }

    /// Contents flattened in row-major order.
    pub fn to_c_buffer(&self) -> Buffer {
        dispatch_array!(self, a => Scalar::into_buffer(Order::C.flatten(a.view())))
    }

    /// Same logical array laid out in `order`.
    pub fn to_order(&self, order: Order) -> NdArray {
        dispatch_array!(self, a => NdArray::from_array(relayout(a, order)))
    }

    /// Sub-arrays along the first axis; empty for zero-dimensional arrays.
    pub fn outer(&self) -> Vec<NdArray> {
        if self.ndim() == 0 {
            return Vec::new();
        }
        dispatch_array!(self, a => a
            .outer_iter()
            .map(|row| NdArray::from_array(row.to_owned()))
            .collect())
    }

    /// Stack equally shaped arrays of one dtype along a new leading axis.
    pub fn stack(parts: &[NdArray]) -> Result<NdArray> {
        let first = parts
            .first()
            .ok_or_else(|| FnError::Value("cannot stack zero arrays".into()))?;
        let (inner, dtype) = (first.shape(), first.dtype());
        for p in parts {
            if p.shape() != inner {
                return Err(FnError::Shape(format!("cannot stack {:?} with {inner:?}", p.shape())));
            }
            if p.dtype() != dtype {
                return Err(FnError::Type(format!("cannot stack {} with {dtype}", p.dtype())));
            }
        }
        dispatch_array!(first, a => {
            let views: Vec<_> = parts.iter().filter_map(|p| view_like(a, p)).collect();
            ndarray::stack(Axis(0), &views)
                .map(NdArray::from_array)
                .map_err(|e| FnError::Shape(e.to_string()))
        })
    }
}

/// Input/output data of arbitrary structure.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Number(Number),
    Array(NdArray),
    Seq(Vec<Value>),
}

/// Rectangular contents of a [`Value`]: shape, row-major values, and the
/// dtype when the data came from a typed array.
#[derive(Debug, Clone, PartialEq)]
pub struct Dense {
    pub shape: Vec<usize>,
    pub values: Vec<Number>,
    pub dtype: Option<DType>,
}

impl Value {
    pub fn array<T: Scalar>(data: Vec<T>) -> Value {
        Value::Array(NdArray::from_vec(data))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Typed leaf dtype, if any.
    pub fn dtype(&self) -> Option<DType> {
        match self {
            Value::Array(a) => Some(a.dtype()),
            _ => None,
        }
    }

    /// Children when iterated along the outermost axis.
    ///
    /// `None` for scalars, `None` and zero-dimensional arrays.
    pub fn children(&self) -> Option<Vec<Value>> {
        match self {
            Value::Seq(items) => Some(items.clone()),
            Value::Array(a) if a.ndim() > 0 => {
                Some(a.outer().into_iter().map(Value::Array).collect())
            }
            _ => None,
        }
    }

    /// Flatten into rectangular form, failing with a shape error for ragged
    /// nesting and a type error for `None` leaves.
    pub fn to_dense(&self) -> Result<Dense> {
        match self {
            Value::None => Err(FnError::Type("None is not numeric data".into())),
            Value::Number(n) => Ok(Dense {
                shape: Vec::new(),
                values: vec![*n],
                dtype: None,
            }),
            Value::Array(a) => Ok(Dense {
                shape: a.shape().to_vec(),
                values: a.to_c_buffer().to_numbers(),
                dtype: Some(a.dtype()),
            }),
            Value::Seq(items) => {
                let mut inner: Option<Vec<usize>> = None;
                let mut dtype: Option<DType> = None;
                let mut values = Vec::new();
                for item in items {
                    let d = item.to_dense()?;
                    match &inner {
                        Some(shape) if *shape != d.shape => {
                            return Err(FnError::Shape(format!(
                                "ragged sequence: {shape:?} vs {:?}",
                                d.shape
                            )));
                        }
                        Some(_) => {}
                        None => inner = Some(d.shape.clone()),
                    }
                    dtype = match (dtype, d.dtype) {
                        (None, t) | (t, None) => t,
                        (Some(a), Some(_)) => Some(a),
                    };
                    values.extend(d.values);
                }
                let mut shape = vec![items.len()];
                shape.extend(inner.unwrap_or_default());
                Ok(Dense { shape, values, dtype })
            }
        }
    }
}

macro_rules! value_from_number {
    ($($t:ty),* $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(v: $t) -> Value {
                    Value::Number(Number::from(v))
                }
            }
        )*
    };
}

value_from_number!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Complex32, Complex64);

impl From<Number> for Value {
    fn from(n: Number) -> Value {
        Value::Number(n)
    }
}

impl From<NdArray> for Value {
    fn from(a: NdArray) -> Value {
        Value::Array(a)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Value {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Value {
        Value::Seq(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value> + Clone> From<&[T]> for Value {
    fn from(items: &[T]) -> Value {
        Value::Seq(items.iter().cloned().map(Into::into).collect())
    }
}

impl From<&Value> for Value {
    fn from(v: &Value) -> Value {
        v.clone()
    }
}
