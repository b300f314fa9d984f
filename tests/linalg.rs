#![allow(clippy::many_single_char_names)]

use ndcontainer::linalg::{mat_mul_raw, mat_vec_raw, outer_raw, vec_mat_raw};
use ndcontainer::prelude::*;

use approx::assert_relative_eq;
use defmac::defmac;

fn reference_mat_mul<A: Element, S, S2>(lhs: &ArrayBase<S, Ix2>, rhs: &ArrayBase<S2, Ix2>) -> Array2<A>
where
    S: ndcontainer::Data<Elem = A>,
    S2: ndcontainer::Data<Elem = A>,
{
    let ((m, k), (k2, n)) = (lhs.dim(), rhs.dim());
    assert_eq!(k, k2);
    Array2::from_shape_fn((m, n), |(i, j)| {
        (0..k).fold(A::zero(), |acc, x| acc + lhs[[i, x]] * rhs[[x, j]])
    })
}

fn range_mat(m: usize, n: usize) -> Array2<f64>
{
    Array2::from_shape_fn((m, n), |(i, j)| (i * n + j) as f64 / 7.)
}

fn range_mat_i32(m: usize, n: usize) -> Array2<i32>
{
    Array2::from_shape_fn((m, n), |(i, j)| (i * n + j) as i32 - 5)
}

#[test]
fn mat_mul_agrees_with_reference()
{
    let sizes = [(4, 4, 4), (8, 8, 1), (1, 3, 7), (5, 0, 3), (17, 15, 16), (3, 9, 2)];
    for &(m, k, n) in &sizes {
        let a = range_mat(m, k);
        let b = range_mat(k, n);
        let c = a.mat_mul(&b).unwrap();
        let expected = reference_mat_mul(&a, &b);
        for (x, y) in c.iter().zip(expected.iter()) {
            assert_relative_eq!(x, y, max_relative = 1e-12, epsilon = 1e-9);
        }

        let ai = range_mat_i32(m, k);
        let bi = range_mat_i32(k, n);
        assert_eq!(ai.mat_mul(&bi).unwrap(), reference_mat_mul(&ai, &bi));
    }
}

#[test]
fn mat_mul_through_views_and_orders()
{
    let a = range_mat(6, 5);
    let b = range_mat(5, 6);
    let expected = reference_mat_mul(&b.t(), &a.t());

    // transposed operands and a column major destination
    let mut c = Array2::zeros((6, 6).f());
    c.product_of(&b.t(), &a.t()).unwrap();
    assert!(c.almost_equal(&expected, 1e-9));

    // inverted axis and windowed operands
    let mut rev = a.view();
    rev.invert_axis(Axis(0));
    let win = b.window(&[1, 2], &[3, 4]).unwrap();
    let lhs = rev.window(&[0, 1], &[4, 3]).unwrap();
    let prod = lhs.mat_mul(&win).unwrap();
    assert!(prod.almost_equal(&reference_mat_mul(&lhs, &win), 1e-9));

    // writing into a window of a bigger matrix leaves the rest alone
    let mut big = Array2::from_elem((6, 6), -1.);
    big.window_mut(&[1, 1], &[4, 4]).unwrap().product_of(&lhs, &win).unwrap();
    assert!(big.window(&[1, 1], &[4, 4]).unwrap().almost_equal(&prod, 1e-9));
    assert_eq!(big.row(0).sum(), -6.);
    assert_eq!(big[[5, 5]], -1.);
}

#[test]
fn f32_products()
{
    let a = Array2::from_shape_fn((7, 3), |(i, j)| (i + j) as f32);
    let b = Array2::from_shape_fn((3, 7).f(), |(i, j)| i as f32 - j as f32);
    let c = a.mat_mul(&b).unwrap();
    assert!(c.almost_equal(&reference_mat_mul(&a, &b), 1e-4));
}

#[test]
fn vector_products()
{
    let a = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
    let x = arr1(&[1., 0., -1.]);
    assert_eq!(a.mat_vec(&x).unwrap(), arr1(&[-2., -2.]));
    assert_eq!(arr1(&[1., 1.]).vec_mat(&a).unwrap(), arr1(&[5., 7., 9.]));
    assert_eq!(a.mat_vec(&arr1(&[1., 2.])).unwrap_err().kind(), ErrorKind::SizeMismatch);
    assert_eq!(x.vec_mat(&a).unwrap_err().kind(), ErrorKind::SizeMismatch);

    let o = arr1(&[1, 2]).outer(&arr1(&[3, 4, 5]));
    assert_eq!(o, arr2(&[[3, 4, 5], [6, 8, 10]]));
    let mut o2 = Array2::zeros((2, 3).f());
    o2.outer_product_of(&arr1(&[1, 2]), &arr1(&[3, 4, 5])).unwrap();
    assert_eq!(o, o2);

    assert_eq!(arr1(&[1, 2, 3]).dot(&arr1(&[3, 2, 1])).unwrap(), 10);
    assert_eq!(a.row(1).dot(&a.column(2)).unwrap_err().kind(), ErrorKind::SizeMismatch);
    assert_eq!(a.column(0).dot(&a.column(1)).unwrap(), 22.);
    let ex = arr1(&[1., 0., 0.]);
    assert_eq!(ex.cross_product(&arr1(&[0., 0., 1.])).unwrap(), arr1(&[0., -1., 0.]));
    assert!(ex.cross_product(&arr1(&[0., 1.])).is_err());
}

#[test]
fn aliasing_is_refused()
{
    let mut m = Array2::<f64>::eye(4);
    let a = Array2::<f64>::ones((4, 4));

    // writing into the right hand operand
    let rhs = m.raw_view();
    let err = unsafe { mat_mul_raw(m.raw_view_mut(), a.raw_view(), rhs) }.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Aliasing);
    assert_eq!(m, Array2::eye(4));

    // a row of `m` used as the vector operand of `y = m x`
    let x = m.row(1).raw_view();
    let mut y = m.column_mut(3);
    let err = unsafe { mat_vec_raw(y.raw_view_mut(), a.raw_view(), x) }.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Aliasing);

    let mut v = Array1::<f64>::zeros(4);
    let x = v.raw_view();
    let err = unsafe { vec_mat_raw(v.raw_view_mut(), x, a.raw_view()) }.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Aliasing);

    let mut c = Array2::<f64>::zeros((4, 4));
    let col = c.column(0).raw_view();
    let err = unsafe { outer_raw(c.raw_view_mut(), col, a.row(0).raw_view()) }.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Aliasing);
}

#[test]
fn disjoint_windows_may_share_an_allocation()
{
    let mut m = Array2::<f64>::zeros((6, 2));
    m.window_mut(&[0, 0], &[2, 2]).unwrap().assign(&arr2(&[[1., 2.], [3., 4.]])).unwrap();
    let lhs = m.window(&[0, 0], &[2, 2]).unwrap().raw_view();
    let mut out = m.raw_view_mut();
    out.restrict_window(&[4, 0], &[2, 2]).unwrap();
    unsafe { mat_mul_raw(out, lhs, Array2::<f64>::eye(2).raw_view()) }.unwrap();
    assert_eq!(m.window(&[4, 0], &[2, 2]).unwrap(), arr2(&[[1., 2.], [3., 4.]]));
}

#[test]
fn exchange_and_permute()
{
    let base = Array2::from_shape_fn((3, 4), |(i, j)| (10 * i + j) as u8);
    defmac!(check m => {
        let mut m = m;
        m.exchange_rows(0, 2).unwrap();
        assert_eq!(m.row(0), base.row(2));
        m.exchange_columns(1, 3).unwrap();
        assert_eq!(m[[0, 1]], 23);
        assert_eq!(m.exchange_rows(0, 3).unwrap_err().kind(), ErrorKind::IndexOutOfRange);

        let mut p = base.clone();
        p.permute_rows(&[1, 2, 0]).unwrap();
        assert_eq!(p.row(0), base.row(1));
        assert_eq!(p.row(2), base.row(0));
        p.permute_columns(&[3, 2, 1, 0]).unwrap();
        assert_eq!(p[[0, 0]], 13);
        assert!(p.permute_columns(&[0, 0, 1, 2]).is_err());
        assert!(p.permute_rows(&[0, 1]).is_err());
    });
    check!(base.clone());
    let mut f = Array2::zeros((3, 4).f());
    f.assign(&base).unwrap();
    check!(f);
}

#[test]
fn gather_rows_and_columns()
{
    let m = arr2(&[[1, 2, 3], [4, 5, 6]]);
    assert_eq!(m.select_rows(&[1, 1, 0]).unwrap(), arr2(&[[4, 5, 6], [4, 5, 6], [1, 2, 3]]));
    assert_eq!(m.select_columns(&[2, 0]).unwrap(), arr2(&[[3, 1], [6, 4]]));
    assert_eq!(m.select_columns(&[3]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(m.row(1).select(&[2, 0]).unwrap(), arr1(&[6, 4]));
    assert!(m.select_rows(&[]).unwrap().is_empty());
}

#[test]
fn fixed_size_products()
{
    let a = FixedMatrix([[1, 2, 3], [4, 5, 6]]);
    let b = FixedMatrix([[1, 0], [0, 1], [1, 1]]);
    let c: FixedMatrix<i32, 2, 2> = a.mat_mul(&b);
    assert_eq!(c, FixedMatrix([[4, 5], [10, 11]]));
    assert_eq!(c.to_array(), a.to_array().mat_mul(&b.to_array()).unwrap());
    assert_eq!(a.mat_vec(&FixedVector([1, 1, 1])), FixedVector([6, 15]));
    assert_eq!(FixedMatrix::<i32, 3, 3>::identity().mat_mul(&b), b);
    assert_eq!(a.transpose().transpose(), a);
}
