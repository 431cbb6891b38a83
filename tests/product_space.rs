//! Integration tests for product spaces, random elements and the test
//! reporting helpers.

use fnspace::{
    DType, Element, FailCounter, FnError, FnSpace, Number, OperatorExt, OperatorRef, ProductSpace,
    Space, Timer, Value, all_almost_equal, cn, identity, noise_array, noise_element,
    noise_elements, rn,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn r(n: usize) -> Space {
    Space::from(rn(n).unwrap())
}

#[test]
fn construction() {
    init_logging();
    let pspace = ProductSpace::new(vec![r(2), r(3)]).unwrap();
    assert_eq!(pspace.len(), 2);
    assert_eq!(pspace.size(), 5);
    assert!(!pspace.is_power());
    assert_eq!(pspace.component(1).unwrap(), &r(3));
    assert!(matches!(
        pspace.component(2),
        Err(FnError::IndexOutOfBounds { index: 2, len: 2 })
    ));

    assert!(ProductSpace::new(Vec::new()).unwrap_err().is_value_error());
    let mixed = ProductSpace::new(vec![r(2), Space::from(cn(2).unwrap())]);
    assert!(mixed.unwrap_err().is_type_error());
}

/// Power spaces accept one stacked array and give one back.
#[test]
fn power_space_round_trip() {
    init_logging();
    let power = Space::from(ProductSpace::power(r(3), 2).unwrap());
    let data = vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]];
    let x = power.element(data.clone()).unwrap();
    match x.to_value() {
        Value::Array(a) => assert_eq!(a.shape(), &[2, 3]),
        other => panic!("expected a stacked array, got {other:?}"),
    }
    assert!(all_almost_equal(&x, data, None));
    assert!(power.element(vec![vec![1.0, 2.0, 3.0]]).unwrap_err().is_value_error());
}

/// Arithmetic on product elements acts part by part.
#[test]
fn parts_arithmetic() {
    init_logging();
    let pspace = Space::from(ProductSpace::new(vec![r(1), r(2)]).unwrap());
    let mut x = pspace.element(vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
    let y = pspace.element(vec![vec![1.0], vec![1.0, 1.0]]).unwrap();
    x.add_assign(&y).unwrap();
    x.scale(Number::Int(2)).unwrap();
    assert!(all_almost_equal(&x, vec![vec![4.0], vec![6.0, 8.0]], None));
    assert_eq!(x.inner(&y).unwrap(), Number::Real(18.0));
    assert!((x.norm() - 116f64.sqrt()).abs() < 1e-12);

    let other = Space::from(ProductSpace::new(vec![r(2), r(1)]).unwrap());
    assert!(x.add_assign(&other.zero()).unwrap_err().is_type_error());
}

/// A failed assignment leaves every part untouched.
#[test]
fn assign_is_atomic() {
    init_logging();
    let pspace = Space::from(ProductSpace::new(vec![r(1), r(2)]).unwrap());
    let mut x = pspace.element(vec![vec![1.0], vec![2.0, 3.0]]).unwrap();
    let err = x.assign(vec![vec![5.0], vec![6.0]]).unwrap_err();
    assert!(err.is_value_error());
    assert!(all_almost_equal(&x, vec![vec![1.0], vec![2.0, 3.0]], None));
    x.assign(0).unwrap();
    assert!(all_almost_equal(&x, vec![vec![0.0], vec![0.0, 0.0]], None));
}

#[test]
fn identity_on_product() {
    init_logging();
    let pspace = Space::from(ProductSpace::power(r(2), 3).unwrap());
    let id = OperatorRef::new(identity(pspace.clone()));
    let x = noise_element(&pspace).unwrap();
    assert_eq!(id.call(&x).unwrap(), x);
}

/// Random data lands in the space and matches the returned element.
#[test]
fn noise() {
    init_logging();
    let _timer = Timer::new("noise");
    let mut counter = FailCounter::new("noise");
    let spaces = [
        Space::from(FnSpace::new(5, DType::F32).unwrap()),
        Space::from(FnSpace::new(5, DType::I16).unwrap()),
        Space::from(FnSpace::new(5, DType::Bool).unwrap()),
        Space::from(cn(4).unwrap()),
        Space::from(ProductSpace::new(vec![r(2), r(3)]).unwrap()),
        Space::from(ProductSpace::power(r(2), 2).unwrap()),
    ];
    for space in &spaces {
        let data = noise_array(space).unwrap();
        let x = space.element(&data).unwrap();
        counter.check(x.belongs_to(space), format!("noise not in {space}"));
        counter.check(all_almost_equal(&x, &data, None), format!("data mismatch in {space}"));

        let (arrays, elements): (Vec<Value>, Vec<Element>) = noise_elements(space, 2).unwrap();
        counter.check(arrays.len() == 2 && elements.len() == 2, "noise_elements count");
    }
    assert_eq!(counter.checks(), 3 * spaces.len());
    assert_eq!(counter.fail_count(), 0, "{}", counter.summary());
}

#[test]
fn fail_counter_collects_messages() {
    init_logging();
    let mut counter = FailCounter::new("collect");
    assert!(counter.check(true, "never kept"));
    assert!(!counter.check(false, "first"));
    counter.fail("second");
    assert_eq!(counter.checks(), 3);
    assert_eq!(counter.failures(), ["first".to_string(), "second".to_string()]);
    assert!(counter.summary().contains("2 of 3"));
}
