//! Recursive equality checks for nested data.
//!
//! Both functions accept anything convertible to [`Value`]: scalars, flat
//! or nested `Vec`s, arrays, and space elements. They never fail; values
//! of different structure simply compare unequal.

use crate::core::dtype::dtype_ndigits;
use crate::core::scalar::Number;
use crate::core::value::{NdArray, Value};

fn leaf(v: &Value) -> Option<Number> {
    match v {
        Value::Number(n) => Some(*n),
        Value::Array(a) if a.ndim() == 0 => a.get(&[]),
        _ => None,
    }
}

/// `true` if `a` and `b` are recursively identical. Sequences compare by
/// length, then element by element; two `None`s are equal.
pub fn all_equal(a: impl Into<Value>, b: impl Into<Value>) -> bool {
    equal(&a.into(), &b.into())
}

fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::None, _) | (_, Value::None) => false,
        (Value::Array(x), Value::Array(y)) if x.shape() == y.shape() => {
            x.to_c_buffer().to_numbers() == y.to_c_buffer().to_numbers()
        }
        _ => match (leaf(a), leaf(b)) {
            (Some(x), Some(y)) => x == y,
            (None, None) => recurse(a, b, equal),
            _ => false,
        },
    }
}

fn recurse(a: &Value, b: &Value, f: impl Fn(&Value, &Value) -> bool) -> bool {
    match (a.children(), b.children()) {
        (Some(xs), Some(ys)) => xs.len() == ys.len() && xs.iter().zip(&ys).all(|(x, y)| f(x, y)),
        _ => false,
    }
}

/// `true` if `a` and `b` agree up to `ndigits` digits, recursively.
///
/// Leaves compare with `|x - y| <= tol + tol * |y|`, `tol = 10^-ndigits`,
/// and two NaNs count as equal. Without `ndigits`, the tolerance comes
/// from the dtypes being compared: 3 digits for single precision, 5 for
/// everything else. Exactly equal inputs short-circuit to `true`.
pub fn all_almost_equal(a: impl Into<Value>, b: impl Into<Value>, ndigits: Option<u32>) -> bool {
    let (a, b) = (a.into(), b.into());
    a == b || almost_equal(&a, &b, ndigits)
}

fn default_ndigits(a: &Value, b: &Value) -> u32 {
    dtype_ndigits(a.dtype(), None).min(dtype_ndigits(b.dtype(), None))
}

fn almost_equal(a: &Value, b: &Value, ndigits: Option<u32>) -> bool {
    match (a, b) {
        (Value::None, Value::None) => true,
        (Value::None, _) | (_, Value::None) => false,
        (Value::Array(x), Value::Array(y)) => {
            let ndigits = ndigits.unwrap_or_else(|| default_ndigits(a, b));
            allclose(x, y, ndigits)
        }
        _ => match (leaf(a), leaf(b)) {
            (Some(x), Some(y)) => {
                let tol = 10f64.powi(-(ndigits.unwrap_or_else(|| default_ndigits(a, b)) as i32));
                x.is_close(y, tol, tol)
            }
            (None, None) => recurse(a, b, |x, y| almost_equal(x, y, ndigits)),
            _ => false,
        },
    }
}

// Bulk comparison; zero-dimensional arrays broadcast against the other side.
fn allclose(x: &NdArray, y: &NdArray, ndigits: u32) -> bool {
    let tol = 10f64.powi(-(ndigits as i32));
    let (xs, ys) = (x.to_c_buffer().to_numbers(), y.to_c_buffer().to_numbers());
    match (x.ndim(), y.ndim()) {
        (0, _) => ys.iter().all(|v| xs[0].is_close(*v, tol, tol)),
        (_, 0) => xs.iter().all(|v| v.is_close(ys[0], tol, tol)),
        _ if x.shape() == y.shape() => xs.iter().zip(&ys).all(|(u, v)| u.is_close(*v, tol, tol)),
        _ => false,
    }
}
