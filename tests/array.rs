#![allow(clippy::many_single_char_names, clippy::float_cmp)]

use defmac::defmac;
use itertools::assert_equal;
use ndcontainer::prelude::*;
use ndcontainer::{aview_mut1, ErrorKind};

#[test]
fn storage_order_and_logical_index()
{
    let c = Array2::from_shape_fn((3, 4), |(i, j)| (10 * i + j) as i32);
    let f = Array2::from_shape_fn((3, 4).f(), |(i, j)| (10 * i + j) as i32);
    assert_eq!(c, f);
    assert_eq!(c.storage_order(), Order::RowMajor);
    assert_eq!(f.storage_order(), Order::ColumnMajor);
    assert_eq!(c.strides(), &[4, 1]);
    assert_eq!(f.strides(), &[1, 3]);
    assert!(c.is_compact() && f.is_compact());
    // iter() follows memory
    assert_equal(f.iter().take(3), &[0, 10, 20]);
    assert_equal(c.iter().take(3), &[0, 1, 2]);
}

#[test]
fn row_view_pointer_identity()
{
    let m = Array2::from_shape_fn((5, 3), |(i, j)| (i + j) as f64);
    defmac!(ptr_at i, j => &m[[i, j]] as *const f64);
    assert_eq!(m.row(2).as_ptr(), ptr_at!(2, 0));
    assert_eq!(m.column(1).as_ptr(), ptr_at!(0, 1));
    let d = m.diagonal();
    for i in 0..3 {
        assert_eq!(&d[i] as *const f64, ptr_at!(i, i));
    }
}

#[test]
fn window_permutation_and_reversal_identity()
{
    let a = Array3::<u32>::from_shape_fn((3, 4, 5), |(p, i, j)| (100 * p + 10 * i + j) as u32);
    let w = a.window(&[1, 1, 2], &[2, 3, 2]).unwrap();
    let p = w.view().permuted_axes((2, 0, 1)).unwrap();
    for (idx, &x) in p.indexed_iter() {
        let (k, q, i) = idx;
        let orig = [q + 1, i + 1, k + 2];
        assert_eq!(&p[[k, q, i]] as *const u32, &a[orig] as *const u32);
        assert_eq!(x, a[orig]);
    }

    let mut r = a.view();
    r.invert_axis(Axis(2));
    assert!(r.stride_of(Axis(2)) < 0);
    assert_eq!(&r[[0, 0, 0]] as *const u32, &a[[0, 0, 4]] as *const u32);
    assert_eq!(r.subview(Axis(0), 2).unwrap()[[3, 1]], 233);
}

#[test]
fn invalid_windows()
{
    let m = Array2::<i8>::zeros((4, 4));
    assert_eq!(m.window(&[3, 0], &[2, 1]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert_eq!(m.window(&[0], &[1]).unwrap_err().kind(), ErrorKind::SizeMismatch);
    assert_eq!(m.subview(Axis(1), 4).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    assert!(m.window(&[4, 4], &[0, 0]).unwrap().is_empty());
}

#[test]
fn checked_access()
{
    let mut v = arr1(&[1, 2, 3]);
    assert_eq!(v.at(2), Ok(&3));
    assert_eq!(v.at(3).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    *v.at_mut(0).unwrap() = 9;
    assert_eq!(v.get(0), Some(&9));
    assert!(v.get(7).is_none());
    let m = aview2(&[[1, 2, 3]]);
    assert_eq!(m.try_row(0).unwrap().len(), 3);
    assert_eq!(m.try_column(3).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
}

#[test]
fn views_over_slices()
{
    let mut data = [1., 2., 3., 4., 5., 6.];
    {
        let mut v = aview_mut1(&mut data);
        v *= 2.;
    }
    let m = ArrayView2::from_shape((2, 3), &data).unwrap();
    assert_eq!(m, arr2(&[[2., 4., 6.], [8., 10., 12.]]));
    assert_eq!(
        ArrayView2::from_shape((4, 2), &data[..5]).unwrap_err().kind(),
        ErrorKind::SizeMismatch
    );
}

#[test]
fn resize_and_set_size()
{
    let mut m = Array2::from_shape_vec((2, 2).f(), vec![1, 2, 3, 4]).unwrap();
    m.resize((3, 3));
    assert_eq!(m.storage_order(), Order::ColumnMajor);
    assert_eq!(m, arr2(&[[1, 3, 0], [2, 4, 0], [0, 0, 0]]));

    let ptr = m.as_ptr();
    m.set_size((3, 3));
    assert_eq!(m.as_ptr(), ptr);
    m.set_size((1, 2));
    assert_eq!(m.shape(), &[1, 2]);
    m.set_all(5);
    assert_eq!(m.sum(), 10);
}

fn reduction_identities<T: Element>(shape: (usize, usize))
{
    let mut a = Array2::<T>::ones(shape);
    let n = a.len() as f64;
    assert_eq!(a.product(), T::one());
    assert_eq!(a.sum().as_f64(), n);
    assert!((a.norm() - n.sqrt()).abs() < 1e-6);
    a.set_zero();
    assert_eq!(a.sum(), T::zero());
    assert!(a.is_non_negative() && a.is_non_positive());
}

macro_rules! for_element_types {
    ($($name:ident: $t:ty),*) => {
        $(
            #[test]
            fn $name()
            {
                reduction_identities::<$t>((7, 9));
                reduction_identities::<$t>((0, 4));

                let m = Array2::<$t>::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as $t);
                assert_eq!(m.max_element(), Some(11 as $t));
                assert_eq!(m.min_and_max(), Some((0 as $t, 11 as $t)));
                assert_eq!(m.t().row(1).to_vec(), vec![1 as $t, 5 as $t, 9 as $t]);
                assert_eq!(Array2::<$t>::zeros((0, 3)).max_element(), None);
                assert!(m.almost_equal(&m.t().t(), <$t as Element>::TOLERANCE));
            }
        )*
    };
}

for_element_types!(reductions_f64: f64, reductions_f32: f32, reductions_i32: i32);

#[test]
fn normalize_vectors()
{
    let mut v = arr1(&[3., 0., 4.]);
    assert!(!v.is_normalized(1e-9));
    v.normalize();
    assert!(v.is_normalized(1e-9));
    assert!(v.almost_equal(&arr1(&[0.6, 0., 0.8]), 1e-12));
}

#[test]
fn formatting()
{
    let m = arr2(&[[1, 2], [3, 4]]);
    assert_eq!(format!("{}", m), "[[1, 2],\n [3, 4]]");
    assert_eq!(format!("{}", m.t()), "[[1, 3],\n [2, 4]]");
}
