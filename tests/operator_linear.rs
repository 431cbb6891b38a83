//! Tests for linear operators and their adjoints.
//!
//! Matrix operators with random entries are combined with sums, scalar
//! multiples and compositions; forward and adjoint results are compared
//! against direct matrix-vector products. Type checking and aliasing
//! rules are verified on operators between `R^3` and `R^4`.

use approx::assert_relative_eq;
use faer::Mat;
use fnspace::{
    Adjoint, Composition, DType, FnError, FnSpace, LinearOperatorExt, MatrixOperator, Number, Operator,
    OperatorExt, OperatorRef, ScalarMultiplication, ScalingOperator, Side, Space, Sum,
    all_almost_equal, cn, identity, rn,
};
use num_complex::Complex64;
use rand::Rng;

fn random_matrix(m: usize, n: usize) -> Mat<f64> {
    let mut rng = rand::thread_rng();
    let data: Vec<f64> = (0..m * n).map(|_| rng.r#gen()).collect();
    Mat::from_fn(m, n, |i, j| data[j * m + i])
}

fn random_vec(n: usize) -> Vec<f64> {
    let mut rng = rand::thread_rng();
    (0..n).map(|_| rng.r#gen()).collect()
}

fn dot(a: &Mat<f64>, x: &[f64]) -> Vec<f64> {
    (0..a.nrows())
        .map(|i| (0..a.ncols()).map(|j| a[(i, j)] * x[j]).sum())
        .collect()
}

fn dot_t(a: &Mat<f64>, y: &[f64]) -> Vec<f64> {
    (0..a.ncols())
        .map(|j| (0..a.nrows()).map(|i| a[(i, j)] * y[i]).sum())
        .collect()
}

fn scaled(c: f64, x: &[f64]) -> Vec<f64> {
    x.iter().map(|v| c * v).collect()
}

fn added(x: &[f64], y: &[f64]) -> Vec<f64> {
    x.iter().zip(y).map(|(u, v)| u + v).collect()
}

fn op(a: &Mat<f64>) -> OperatorRef {
    OperatorRef::new(MatrixOperator::new(a.clone()).unwrap())
}

/// `apply` and `call` agree with the matrix product, square and non-square.
#[test]
fn multiply_op() {
    for (m, n) in [(3, 3), (4, 3)] {
        let a = random_matrix(m, n);
        let x = random_vec(n);
        let aop = op(&a);
        let xvec = aop.domain().element(x.clone()).unwrap();
        let mut out = aop.range().empty();
        aop.apply(&xvec, &mut out).unwrap();
        assert!(all_almost_equal(&out, dot(&a, &x), None));
        assert!(all_almost_equal(&aop.call(&xvec).unwrap(), dot(&a, &x), None));
    }
}

/// The adjoint is available through `apply_adjoint`, an explicit
/// `Adjoint`, and `adjoint()`.
#[test]
fn adjoint() {
    let a = random_matrix(4, 3);
    let y = random_vec(4);
    let aop = op(&a);
    let yvec = aop.range().element(y.clone()).unwrap();
    let mut out = aop.domain().empty();
    aop.apply_adjoint(&yvec, &mut out).unwrap();
    assert!(all_almost_equal(&out, dot_t(&a, &y), None));

    let explicit = Adjoint::new(aop.clone()).unwrap();
    assert_eq!(explicit.domain(), aop.range());
    assert!(all_almost_equal(&explicit.call(&yvec).unwrap(), dot_t(&a, &y), None));

    let t = aop.adjoint().unwrap();
    assert!(all_almost_equal(&t.call(&yvec).unwrap(), dot_t(&a, &y), None));
    // adjoint of the adjoint is the operator again
    let x = aop.domain().element(random_vec(3)).unwrap();
    let tt = t.adjoint().unwrap();
    assert!(all_almost_equal(&tt.call(&x).unwrap(), &aop.call(&x).unwrap(), None));
}

/// `(A + B)^* = A^* + B^*`.
#[test]
fn add() {
    let (a, b) = (random_matrix(4, 3), random_matrix(4, 3));
    let (x, y) = (random_vec(3), random_vec(4));
    let (aop, bop) = (op(&a), op(&b));
    let xvec = aop.domain().element(x.clone()).unwrap();
    let yvec = aop.range().element(y.clone()).unwrap();

    let c = OperatorRef::new(Sum::new(aop.clone(), bop.clone()).unwrap());
    assert!(c.is_linear());
    assert!(all_almost_equal(&c.call(&xvec).unwrap(), added(&dot(&a, &x), &dot(&b, &x)), None));
    let adj = added(&dot_t(&a, &y), &dot_t(&b, &y));
    assert!(all_almost_equal(&c.adjoint().unwrap().call(&yvec).unwrap(), adj.clone(), None));

    let c = (&aop + &bop).unwrap();
    assert!(all_almost_equal(&c.call(&xvec).unwrap(), added(&dot(&a, &x), &dot(&b, &x)), None));
    assert!(all_almost_equal(&c.call_adjoint(&yvec).unwrap(), adj, None));
}

/// Scalar multiples commute with linear operators and their adjoints.
#[test]
fn scale() {
    let a = random_matrix(4, 3);
    let (x, y) = (random_vec(3), random_vec(4));
    let aop = op(&a);
    let xvec = aop.domain().element(x.clone()).unwrap();
    let yvec = aop.range().element(y.clone()).unwrap();

    for c in [-1.432f64, -1.0, 0.0, 1.0, 2.5] {
        let sc = ScalarMultiplication::new(aop.clone(), c, Side::Left).unwrap();
        assert!(all_almost_equal(&sc.call(&xvec).unwrap(), scaled(c, &dot(&a, &x)), None));
        assert!(all_almost_equal(&sc.call_adjoint(&yvec).unwrap(), scaled(c, &dot_t(&a, &y)), None));

        let left = (c * &aop).unwrap();
        let right = (&aop * c).unwrap();
        assert!(all_almost_equal(&left.call(&xvec).unwrap(), scaled(c, &dot(&a, &x)), None));
        assert!(all_almost_equal(&right.call(&xvec).unwrap(), dot(&a, &scaled(c, &x)), None));
        assert!(all_almost_equal(
            &left.adjoint().unwrap().call(&yvec).unwrap(),
            scaled(c, &dot_t(&a, &y)),
            None
        ));
        assert!(all_almost_equal(
            &right.adjoint().unwrap().call(&yvec).unwrap(),
            dot_t(&a, &scaled(c, &y)),
            None
        ));
    }
}

/// Integer scalars and negation build the same multiples.
#[test]
fn scale_by_integers_and_negate() {
    let a = random_matrix(2, 2);
    let x = random_vec(2);
    let aop = op(&a);
    let xvec = aop.domain().element(x.clone()).unwrap();
    let twice = (2i32 * &aop).unwrap();
    assert!(all_almost_equal(&twice.call(&xvec).unwrap(), scaled(2.0, &dot(&a, &x)), None));
    let neg = (-&aop).unwrap();
    assert!(all_almost_equal(&neg.call(&xvec).unwrap(), scaled(-1.0, &dot(&a, &x)), None));
    let zero = (&aop - &aop).unwrap();
    assert!(all_almost_equal(&zero.call(&xvec).unwrap(), vec![0.0, 0.0], None));
}

/// `(A B)^* = B^* A^*`.
#[test]
fn compose() {
    let (a, b) = (random_matrix(5, 4), random_matrix(4, 3));
    let (x, y) = (random_vec(3), random_vec(5));
    let (aop, bop) = (op(&a), op(&b));
    let xvec = bop.domain().element(x.clone()).unwrap();
    let yvec = aop.range().element(y.clone()).unwrap();

    let c = OperatorRef::new(Composition::new(aop.clone(), bop.clone()).unwrap());
    assert!(all_almost_equal(&c.call(&xvec).unwrap(), dot(&a, &dot(&b, &x)), None));
    assert!(all_almost_equal(&c.call_adjoint(&yvec).unwrap(), dot_t(&b, &dot_t(&a, &y)), None));

    let reversed = (bop.adjoint().unwrap() * aop.adjoint().unwrap()).unwrap();
    assert!(all_almost_equal(
        &reversed.call(&yvec).unwrap(),
        &c.adjoint().unwrap().call(&yvec).unwrap(),
        None
    ));
}

/// Inputs and outputs from the wrong space are type errors; nothing is
/// written to the output in that case.
#[test]
fn typechecking() {
    let r3 = Space::from(rn(3).unwrap());
    let r4 = Space::from(rn(4).unwrap());
    let aop = op(&random_matrix(3, 3));
    let mut r3_vec1 = r3.zero();
    let mut r3_vec2 = r3.zero();
    let mut r4_vec1 = r4.zero();
    let mut r4_vec2 = r4.element(vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    aop.apply(&r3_vec1, &mut r3_vec2).unwrap();
    aop.apply_adjoint(&r3_vec1, &mut r3_vec2).unwrap();

    let type_err = |r: fnspace::Result<()>| matches!(r, Err(FnError::Type(_)));
    assert!(aop.call(&r4_vec1).unwrap_err().is_type_error());
    assert!(aop.adjoint().unwrap().call(&r4_vec1).unwrap_err().is_type_error());
    assert!(type_err(aop.apply(&r3_vec1, &mut r4_vec1)));
    assert!(type_err(aop.apply_adjoint(&r3_vec1, &mut r4_vec1)));
    assert!(type_err(aop.apply(&r4_vec1, &mut r3_vec1)));
    assert!(type_err(aop.apply_adjoint(&r4_vec1, &mut r3_vec1)));
    assert!(type_err(aop.apply(&r4_vec1, &mut r4_vec2)));
    assert!(type_err(aop.apply_adjoint(&r4_vec1, &mut r4_vec2)));
    assert!(all_almost_equal(&r4_vec2, vec![1.0, 2.0, 3.0, 4.0], None));
}

/// Using one element as input and output is an aliasing error unless the
/// operator supports in-place application.
#[test]
fn aliasing() {
    let r3 = Space::from(rn(3).unwrap());
    let aop = op(&random_matrix(3, 3));
    let mut x = r3.element(vec![1.0, 2.0, 3.0]).unwrap();
    let err = aop.apply_in_place(&mut x).unwrap_err();
    assert!(matches!(err, FnError::Aliasing(_)));
    assert!(err.is_value_error());
    assert!(matches!(aop.apply_adjoint_in_place(&mut x), Err(FnError::Aliasing(_))));
    assert!(all_almost_equal(&x, vec![1.0, 2.0, 3.0], None));

    let scaling = OperatorRef::new(ScalingOperator::new(r3.clone(), 2.0).unwrap());
    scaling.apply_in_place(&mut x).unwrap();
    assert!(all_almost_equal(&x, vec![2.0, 4.0, 6.0], None));
    let half = (0.25f64 * &scaling).unwrap();
    half.apply_in_place(&mut x).unwrap();
    assert!(all_almost_equal(&x, vec![1.0, 2.0, 3.0], None));
    half.apply_adjoint_in_place(&mut x).unwrap();
    assert!(all_almost_equal(&x, vec![0.5, 1.0, 1.5], None));
}

/// Complex scalars need a complex operator; the adjoint conjugates them.
#[test]
fn complex_scalars() {
    let i = Complex64::new(0.0, 1.0);
    let real = OperatorRef::new(identity(Space::from(rn(2).unwrap())));
    assert!((i * &real).unwrap_err().is_type_error());

    let c2 = Space::from(cn(2).unwrap());
    let id = OperatorRef::new(identity(c2.clone()));
    let iop = (i * &id).unwrap();
    let x = c2.element(vec![Complex64::new(1.0, 0.0), Complex64::new(0.0, 1.0)]).unwrap();
    let fwd = iop.call(&x).unwrap();
    let adj = iop.call_adjoint(&x).unwrap();
    assert!(all_almost_equal(&fwd, vec![i, -Complex64::new(1.0, 0.0)], None));
    assert!(all_almost_equal(&adj, vec![-i, Complex64::new(1.0, 0.0)], None));

    // <A x, y> = <x, A^* y>
    let lhs = fwd.inner(&x).unwrap();
    let rhs = x.inner(&adj).unwrap();
    assert_eq!(lhs, rhs);
    assert_eq!(lhs, Number::Complex(Complex64::new(0.0, 2.0)));
}

/// The adjoint satisfies `<A x, y> = <x, A^* y>` for random inputs.
#[test]
fn adjoint_inner_product_identity() {
    let a = random_matrix(5, 3);
    let aop = op(&a);
    let x = aop.domain().element(random_vec(3)).unwrap();
    let y = aop.range().element(random_vec(5)).unwrap();
    let lhs = aop.call(&x).unwrap().inner(&y).unwrap().to_f64().unwrap();
    let rhs = x.inner(&aop.call_adjoint(&y).unwrap()).unwrap().to_f64().unwrap();
    assert_relative_eq!(lhs, rhs, epsilon = 1e-10);
}

/// Unsigned spaces refuse negative or oversized scalars when the multiple
/// is built, so application never half-writes `out`.
#[test]
fn unsigned_scalars_checked_on_construction() {
    let u8s = Space::from(FnSpace::new(3, DType::U8).unwrap());
    let id = OperatorRef::new(identity(u8s.clone()));
    assert!((-&id).unwrap_err().is_type_error());
    assert!((Number::Int(300) * &id).unwrap_err().is_type_error());
    assert!((&id * Number::Int(-2)).unwrap_err().is_type_error());

    let triple = (3i32 * &id).unwrap();
    let x = u8s.element(vec![1, 2, 3]).unwrap();
    let mut out = u8s.element(vec![9, 9, 9]).unwrap();
    triple.apply(&x, &mut out).unwrap();
    assert_eq!(out, u8s.element(vec![3, 6, 9]).unwrap());

    let foreign = Space::from(FnSpace::new(3, DType::U16).unwrap()).zero();
    assert!(triple.apply(&foreign, &mut out).is_err());
    assert_eq!(out, u8s.element(vec![3, 6, 9]).unwrap());
}

/// Sums on boolean spaces combine pointwise with logical or.
#[test]
fn bool_sum() {
    let bools = Space::from(FnSpace::new(2, DType::Bool).unwrap());
    let id = OperatorRef::new(identity(bools.clone()));
    let twice = (&id + &id).unwrap();
    let x = bools.element(vec![true, false]).unwrap();
    let mut out = bools.element(vec![false, true]).unwrap();
    twice.apply(&x, &mut out).unwrap();
    assert_eq!(out, x);
    assert!((-&id).unwrap_err().is_type_error());
}
