//! Tests for the recursive equality helpers.

use fnspace::{
    DType, FnSpace, NdArray, Number, ProductSpace, Space, Value, all_almost_equal, all_equal, cn, rn,
};
use num_complex::Complex64;

#[test]
fn none_and_nan() {
    assert!(all_equal(Value::None, Value::None));
    assert!(all_almost_equal(Value::None, Value::None, None));
    assert!(!all_almost_equal(Value::None, 0.0, None));
    assert!(all_almost_equal(f64::NAN, f64::NAN, None));
    assert!(all_almost_equal(vec![1.0, f64::NAN], vec![1.0, f64::NAN], None));
    assert!(!all_almost_equal(f64::NAN, 1.0, None));
}

/// Sequences of different length never compare equal.
#[test]
fn length_mismatch() {
    assert!(!all_equal(vec![1, 2, 3], vec![1, 2]));
    assert!(!all_almost_equal(vec![1.0, 2.0], vec![1.0, 2.0, 3.0], None));
    assert!(!all_almost_equal(Value::array(vec![1.0, 2.0]), Value::array(vec![1.0]), None));
}

/// Single precision data gets three digits, double precision five.
#[test]
fn tolerance_follows_dtype() {
    let base = Value::array(vec![1.0f32, 2.0, 3.0]);
    let close = Value::array(vec![1.0015f32, 2.0, 3.0]);
    let far = Value::array(vec![1.05f32, 2.0, 3.0]);
    assert!(all_almost_equal(&base, &close, None));
    assert!(!all_almost_equal(&base, &far, None));

    let base64 = Value::array(vec![1.0f64, 2.0, 3.0]);
    let close64 = Value::array(vec![1.0015f64, 2.0, 3.0]);
    assert!(!all_almost_equal(&base64, &close64, None));
    assert!(all_almost_equal(&base64, &close64, Some(2)));
    assert!(all_almost_equal(1.0, 1.000001, None));
}

#[test]
fn arrays_against_nested_sequences() {
    let arr = NdArray::from_shape_vec(&[2, 2], vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    assert!(all_almost_equal(arr.clone(), vec![vec![1, 2], vec![3, 4]], None));
    assert!(!all_almost_equal(arr, vec![vec![1, 3], vec![2, 4]], None));
}

/// Elements of nested product spaces compare through their parts.
#[test]
fn nested_product_elements() {
    let r2 = Space::from(rn(2).unwrap());
    let f1 = Space::from(FnSpace::new(1, DType::F32).unwrap());
    let inner = Space::from(ProductSpace::new(vec![r2.clone(), f1]).unwrap());
    let outer = Space::from(ProductSpace::new(vec![inner, r2]).unwrap());

    let data = Value::from(vec![
        Value::from(vec![Value::from(vec![1.0, 2.0]), Value::from(vec![0.5])]),
        Value::from(vec![3.0, 4.0]),
    ]);
    let x = outer.element(&data).unwrap();
    assert!(all_equal(&x, &data));
    assert!(all_almost_equal(&x, &data, None));
    assert!(!all_equal(
        &x,
        vec![
            Value::from(vec![Value::from(vec![1.0, 2.0]), Value::from(vec![0.25])]),
            Value::from(vec![3.0, 4.0]),
        ]
    ));

    let mut y = x.clone();
    y.scale(Number::from(1.000001f64)).unwrap();
    assert!(all_almost_equal(&x, &y, None));
    assert!(!all_equal(&x, &y));
}

/// Complex components of mixed precision nest the same way.
#[test]
fn nested_complex_product_elements() {
    let c2 = Space::from(cn(2).unwrap());
    let c1 = Space::from(FnSpace::new(1, DType::C64).unwrap());
    let inner = Space::from(ProductSpace::new(vec![c2.clone(), c1]).unwrap());
    let outer = Space::from(ProductSpace::new(vec![c2, inner]).unwrap());

    let i = Complex64::new(0.0, 1.0);
    let one = Complex64::new(1.0, 0.0);
    let data = Value::from(vec![
        Value::from(vec![one, i]),
        Value::from(vec![Value::from(vec![i, one]), Value::from(vec![-i])]),
    ]);
    let x = outer.element(&data).unwrap();
    assert!(all_equal(&x, &data));

    let mut y = x.clone();
    y.scale(Number::from(Complex64::new(1.0, 1e-6))).unwrap();
    assert!(all_almost_equal(&x, &y, None));
    assert!(!all_equal(&x, &y));

    let mut z = x.clone();
    z.scale(Number::from(i)).unwrap();
    assert!(!all_almost_equal(&x, &z, None));
}

#[test]
fn integer_and_bool_data() {
    let u8s = FnSpace::new(3, DType::U8).unwrap();
    let x = u8s.element(vec![1, 2, 3]).unwrap();
    assert!(all_equal(&x, vec![1, 2, 3]));
    assert!(all_equal(vec![true, false], vec![true, false]));
    assert!(!all_equal(vec![true, false], vec![true, true]));
}
