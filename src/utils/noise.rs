//! Random elements for tests and examples.
//!
//! Entries are drawn per dtype: standard normal for real floats,
//! `(N + iN) / sqrt(2)` for complex floats, uniform integers in `[-10, 10)`
//! for signed and `[0, 10)` for unsigned types, and fair coin flips for
//! booleans. Discretized spaces get arrays of their grid shape. Product
//! spaces recurse per component; power spaces return one stacked array.

use std::f64::consts::SQRT_2;

use num_complex::Complex64;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::buffer::Buffer;
use crate::core::dtype::DType;
use crate::core::scalar::Number;
use crate::core::value::{NdArray, Value};
use crate::error::Result;
use crate::space::{Element, Space};

fn sample<R: Rng + ?Sized>(dtype: DType, rng: &mut R) -> Number {
    if dtype.is_bool() {
        Number::Bool(rng.gen_bool(0.5))
    } else if dtype.is_signed_int() {
        Number::Int(rng.gen_range(-10..10))
    } else if dtype.is_unsigned_int() {
        Number::Int(rng.gen_range(0..10))
    } else if dtype.is_complex_floating() {
        let re: f64 = StandardNormal.sample(rng);
        let im: f64 = StandardNormal.sample(rng);
        Number::Complex(Complex64::new(re, im) / SQRT_2)
    } else {
        Number::Real(StandardNormal.sample(rng))
    }
}

fn noise_buffer<R: Rng + ?Sized>(dtype: DType, len: usize, rng: &mut R) -> Result<Buffer> {
    let values: Vec<Number> = (0..len).map(|_| sample(dtype, rng)).collect();
    Buffer::from_numbers(dtype, &values)
}

/// Random data shaped like an element of `space`, drawn from `rng`.
pub fn noise_array_with<R: Rng + ?Sized>(space: &Space, rng: &mut R) -> Result<Value> {
    match space {
        Space::Fn(s) => Ok(Value::Array(NdArray::from_buffer(noise_buffer(
            s.dtype(),
            s.size(),
            rng,
        )?))),
        // grid shaped, laid out in the space's order
        Space::Discrete(s) => {
            let c_data = noise_buffer(s.dtype(), s.size(), rng)?;
            Ok(Value::Array(NdArray::from_c_data(s.shape().to_vec(), s.order(), c_data)?))
        }
        Space::Product(p) => {
            let parts = p
                .components()
                .iter()
                .map(|c| noise_array_with(c, rng))
                .collect::<Result<Vec<_>>>()?;
            if p.is_power() {
                let arrays: Option<Vec<NdArray>> = parts
                    .iter()
                    .map(|v| match v {
                        Value::Array(a) => Some(a.clone()),
                        _ => None,
                    })
                    .collect();
                if let Some(arrays) = arrays {
                    return Ok(Value::Array(NdArray::stack(&arrays)?));
                }
            }
            Ok(Value::Seq(parts))
        }
    }
}

/// Random data shaped like an element of `space`.
pub fn noise_array(space: &Space) -> Result<Value> {
    noise_array_with(space, &mut rand::thread_rng())
}

/// Random element of `space`.
pub fn noise_element(space: &Space) -> Result<Element> {
    space.element(noise_array(space)?)
}

/// `n` random elements together with the data they were built from.
pub fn noise_elements(space: &Space, n: usize) -> Result<(Vec<Value>, Vec<Element>)> {
    let mut arrays = Vec::with_capacity(n);
    let mut elements = Vec::with_capacity(n);
    for _ in 0..n {
        let data = noise_array(space)?;
        elements.push(space.element(&data)?);
        arrays.push(data);
    }
    Ok((arrays, elements))
}
