// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Matrix and vector products.
//!
//! Every product writes into a destination that must already have the
//! result's shape, and refuses to run when the destination's memory
//! overlaps an operand: the overlap is detected from the address ranges
//! the containers span, so partially overlapping views are caught too.
//!
//! Safe code cannot create such overlaps, which is why the raw-view entry
//! points [`mat_mul_raw`] and friends exist: they accept pointers that may
//! alias and report [`ErrorKind::Aliasing`] instead of computing garbage.
//!
//! `f32` and `f64` products use the `matrixmultiply` kernels for every
//! stride pattern; other element types use a plain triple loop.

use std::any::TypeId;
use std::mem;

use crate::dimension::memory_span;
use crate::error::{ArrayError, ErrorKind};
use crate::{ArrayBase, Data, DataMut, Dimension, Element, Ix1, Ix2, RawArrayView, RawArrayViewMut, RawData};

/// Byte addresses `[low, high)` spanned by the container; `None` when it
/// addresses no element.
fn byte_range<S, D>(a: &ArrayBase<S, D>) -> Option<(usize, usize)>
where
    S: RawData,
    D: Dimension,
{
    let size = mem::size_of::<S::Elem>() as isize;
    let (low, high) = memory_span(&a.dim, &a.strides)?;
    let base = a.ptr.as_ptr() as isize;
    Some(((base + low * size) as usize, (base + (high + 1) * size) as usize))
}

/// Return `true` if the memory spanned by `a` and `b` overlaps.
pub(crate) fn overlaps<S, S2, D, E>(a: &ArrayBase<S, D>, b: &ArrayBase<S2, E>) -> bool
where
    S: RawData,
    S2: RawData,
    D: Dimension,
    E: Dimension,
{
    match (byte_range(a), byte_range(b)) {
        (Some((alo, ahi)), Some((blo, bhi))) => alo < bhi && blo < ahi,
        _ => false,
    }
}

fn check_no_alias<A, D, E>(out: &RawArrayViewMut<A, D>, operand: &RawArrayView<A, E>) -> Result<(), ArrayError>
where
    D: Dimension,
    E: Dimension,
{
    if overlaps(out, operand) {
        Err(ArrayError::new(
            ErrorKind::Aliasing,
            format!("destination of shape {:?} overlaps an operand of shape {:?}", out.shape(), operand.shape()),
        ))
    } else {
        Ok(())
    }
}

/// View a vector as a matrix of shape `(rows, cols)`, one of them 1.
fn vector_as_matrix<S>(v: ArrayBase<S, Ix1>, column: bool) -> ArrayBase<S, Ix2>
where S: RawData
{
    let n = v.dim[0];
    let s = v.strides[0];
    let (dim, strides) = if column {
        (Ix2::new([n, 1]), Ix2::new([s, 1]))
    } else {
        (Ix2::new([1, n]), Ix2::new([1, s]))
    };
    unsafe { v.with_strides_dim(strides, dim) }
}

#[inline(always)]
/// Return `true` if `A` and `B` are the same type
fn same_type<A: 'static, B: 'static>() -> bool
{
    TypeId::of::<A>() == TypeId::of::<B>()
}

// Read pointer to type `A` as type `B`.
//
// **Panics** if `A` and `B` are not the same type
fn cast_as<A: 'static + Copy, B: 'static + Copy>(a: &A) -> B
{
    assert!(
        same_type::<A, B>(),
        "expect type {} and {} to match",
        std::any::type_name::<A>(),
        std::any::type_name::<B>()
    );
    unsafe { ::std::ptr::read(a as *const _ as *const B) }
}

/// Compute `c = a b` for matrices given as raw views.
///
/// `a` is *m* × *k*, `b` is *k* × *n* and `c` must be *m* × *n*.
///
/// **Errors** with `SizeMismatch` if the shapes don't agree, and with
/// `Aliasing` if the memory of `c` overlaps `a` or `b`. Nothing is written
/// on error.
///
/// # Safety
///
/// Every element addressed by the three views must be valid for reads, and
/// those of `c` valid for writes, for the duration of the call.
///
/// ```
/// use ndcontainer::{arr2, Array2, ErrorKind};
/// use ndcontainer::linalg::mat_mul_raw;
///
/// let mut m = arr2(&[[1., 2.], [3., 4.]]);
/// let a = Array2::<f64>::eye(2);
/// // `m = a m` would read `m` while writing it
/// let out = m.raw_view_mut();
/// let rhs = m.raw_view();
/// let err = unsafe { mat_mul_raw(out, a.raw_view(), rhs) }.unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Aliasing);
/// ```
pub unsafe fn mat_mul_raw<A>(
    mut c: RawArrayViewMut<A, Ix2>, a: RawArrayView<A, Ix2>, b: RawArrayView<A, Ix2>,
) -> Result<(), ArrayError>
where A: Element
{
    let ((m, k), (k2, n)) = (a.dim(), b.dim());
    if k != k2 || c.dim() != (m, n) {
        return Err(ArrayError::new(
            ErrorKind::SizeMismatch,
            format!(
                "product of {} × {} and {} × {} into {:?}",
                m,
                k,
                k2,
                n,
                c.shape()
            ),
        ));
    }
    check_no_alias(&c, &a)?;
    check_no_alias(&c, &b)?;
    if m == 0 || n == 0 {
        return Ok(());
    }

    let ap = a.as_ptr();
    let bp = b.as_ptr();
    let cp = c.as_mut_ptr();
    let (rsa, csa) = (a.strides()[0], a.strides()[1]);
    let (rsb, csb) = (b.strides()[0], b.strides()[1]);
    let (rsc, csc) = (c.strides()[0], c.strides()[1]);
    if k == 0 {
        for i in 0..m as isize {
            for j in 0..n as isize {
                *cp.offset(i * rsc + j * csc) = A::zero();
            }
        }
    } else if same_type::<A, f32>() {
        matrixmultiply::sgemm(
            m,
            k,
            n,
            cast_as(&1f32),
            ap as *const _,
            rsa,
            csa,
            bp as *const _,
            rsb,
            csb,
            cast_as(&0f32),
            cp as *mut _,
            rsc,
            csc,
        );
    } else if same_type::<A, f64>() {
        matrixmultiply::dgemm(
            m,
            k,
            n,
            cast_as(&1f64),
            ap as *const _,
            rsa,
            csa,
            bp as *const _,
            rsb,
            csb,
            cast_as(&0f64),
            cp as *mut _,
            rsc,
            csc,
        );
    } else {
        for i in 0..m as isize {
            for j in 0..n as isize {
                let mut sum = A::zero();
                for x in 0..k as isize {
                    sum = sum + *ap.offset(i * rsa + x * csa) * *bp.offset(x * rsb + j * csb);
                }
                *cp.offset(i * rsc + j * csc) = sum;
            }
        }
    }
    Ok(())
}

/// Compute `y = a x` for raw views; see [`mat_mul_raw`].
///
/// # Safety
///
/// As for [`mat_mul_raw`].
pub unsafe fn mat_vec_raw<A>(
    y: RawArrayViewMut<A, Ix1>, a: RawArrayView<A, Ix2>, x: RawArrayView<A, Ix1>,
) -> Result<(), ArrayError>
where A: Element
{
    mat_mul_raw(vector_as_matrix(y, true), a, vector_as_matrix(x, true))
}

/// Compute `y = x a` (the row vector `x` times `a`) for raw views; see
/// [`mat_mul_raw`].
///
/// # Safety
///
/// As for [`mat_mul_raw`].
pub unsafe fn vec_mat_raw<A>(
    y: RawArrayViewMut<A, Ix1>, x: RawArrayView<A, Ix1>, a: RawArrayView<A, Ix2>,
) -> Result<(), ArrayError>
where A: Element
{
    mat_mul_raw(vector_as_matrix(y, false), vector_as_matrix(x, false), a)
}

/// Compute the outer product `c = x yᵀ` for raw views; see
/// [`mat_mul_raw`].
///
/// # Safety
///
/// As for [`mat_mul_raw`].
pub unsafe fn outer_raw<A>(
    c: RawArrayViewMut<A, Ix2>, x: RawArrayView<A, Ix1>, y: RawArrayView<A, Ix1>,
) -> Result<(), ArrayError>
where A: Element
{
    mat_mul_raw(c, vector_as_matrix(x, true), vector_as_matrix(y, false))
}

/// # Matrix Products Into a Destination
impl<A, S> ArrayBase<S, Ix2>
where
    A: Element,
    S: DataMut<Elem = A>,
{
    /// Store the matrix product `a b` in `self`.
    ///
    /// **Errors** with `SizeMismatch` unless `a` is *m* × *k*, `b` is
    /// *k* × *n* and `self` is *m* × *n*.
    ///
    /// ```
    /// use ndcontainer::{arr2, Array2};
    ///
    /// let a = arr2(&[[1, 2], [3, 4]]);
    /// let mut c = Array2::zeros((2, 2));
    /// c.product_of(&a, &a.t()).unwrap();
    /// assert_eq!(c, arr2(&[[5, 11], [11, 25]]));
    /// ```
    pub fn product_of<S2, S3>(&mut self, a: &ArrayBase<S2, Ix2>, b: &ArrayBase<S3, Ix2>) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        S3: Data<Elem = A>,
    {
        unsafe { mat_mul_raw(self.raw_view_mut(), a.raw_view(), b.raw_view()) }
    }

    /// Store the outer product of the vectors `x` and `y` in `self`.
    ///
    /// **Errors** with `SizeMismatch` unless `self` is
    /// `x.len()` × `y.len()`.
    pub fn outer_product_of<S2, S3>(&mut self, x: &ArrayBase<S2, Ix1>, y: &ArrayBase<S3, Ix1>) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        S3: Data<Elem = A>,
    {
        unsafe { outer_raw(self.raw_view_mut(), x.raw_view(), y.raw_view()) }
    }
}

/// # Matrix-Vector Products Into a Destination
impl<A, S> ArrayBase<S, Ix1>
where
    A: Element,
    S: DataMut<Elem = A>,
{
    /// Store the product of the matrix `a` and the vector `x` in `self`.
    ///
    /// **Errors** with `SizeMismatch` unless `a` is *m* × *n*, `x` has
    /// length *n* and `self` has length *m*.
    pub fn product_of_matrix_vector<S2, S3>(
        &mut self, a: &ArrayBase<S2, Ix2>, x: &ArrayBase<S3, Ix1>,
    ) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        S3: Data<Elem = A>,
    {
        unsafe { mat_vec_raw(self.raw_view_mut(), a.raw_view(), x.raw_view()) }
    }

    /// Store the product of the row vector `x` and the matrix `a` in
    /// `self`.
    ///
    /// **Errors** with `SizeMismatch` unless `x` has length *m*, `a` is
    /// *m* × *n* and `self` has length *n*.
    pub fn product_of_vector_matrix<S2, S3>(
        &mut self, x: &ArrayBase<S2, Ix1>, a: &ArrayBase<S3, Ix2>,
    ) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        S3: Data<Elem = A>,
    {
        unsafe { vec_mat_raw(self.raw_view_mut(), x.raw_view(), a.raw_view()) }
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{arr1, arr2, Array1, Array2, ShapeBuilder};

    #[test]
    fn products_agree_across_layouts()
    {
        let a = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
        let mut b = Array2::zeros((3, 2).f());
        b.assign(&arr2(&[[1., 0.], [0., 1.], [1., 1.]])).unwrap();
        let mut c = Array2::zeros((2, 2));
        c.product_of(&a, &b).unwrap();
        assert_eq!(c, arr2(&[[4., 5.], [10., 11.]]));

        let ai = a.mapv(|x| x as i64);
        let bi = b.mapv(|x| x as i64);
        let mut ci = Array2::zeros((2, 2).f());
        ci.product_of(&ai, &bi).unwrap();
        assert_eq!(ci, arr2(&[[4, 5], [10, 11]]));
    }

    #[test]
    fn shape_errors_come_first()
    {
        let a = Array2::<f32>::ones((2, 3));
        let mut c = Array2::zeros((2, 2));
        assert_eq!(c.product_of(&a, &a).unwrap_err().kind(), ErrorKind::SizeMismatch);
        let mut y = Array1::zeros(3);
        assert_eq!(
            y.product_of_matrix_vector(&a, &arr1(&[1., 1., 1.])).unwrap_err().kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn vector_products()
    {
        let a = arr2(&[[1, 2], [3, 4], [5, 6]]);
        let mut y = Array1::zeros(3);
        y.product_of_matrix_vector(&a, &arr1(&[1, -1])).unwrap();
        assert_eq!(y, arr1(&[-1, -1, -1]));
        let mut z = Array1::zeros(2);
        z.product_of_vector_matrix(&arr1(&[1, 0, 1]), &a).unwrap();
        assert_eq!(z, arr1(&[6, 8]));
        let mut o = Array2::zeros((2, 3));
        o.outer_product_of(&arr1(&[1., 2.]), &arr1(&[1., 0., -1.])).unwrap();
        assert_eq!(o, arr2(&[[1., 0., -1.], [2., 0., -2.]]));
    }

    #[test]
    fn partial_overlap_is_aliasing()
    {
        let mut m = Array2::<f64>::zeros((4, 4));
        let a = Array2::<f64>::ones((2, 2));
        let rhs = m.window(&[2, 2], &[2, 2]).unwrap().raw_view();
        let mut out = m.raw_view_mut();
        out.restrict_window(&[1, 1], &[2, 2]).unwrap();
        let err = unsafe { mat_mul_raw(out, a.raw_view(), rhs) }.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Aliasing);

        let rhs = m.window(&[2, 2], &[2, 2]).unwrap().raw_view();
        let mut out = m.raw_view_mut();
        out.restrict_window(&[0, 0], &[2, 2]).unwrap();
        // rows 0..2 of a row major 4 × 4 end before row 2 starts
        unsafe { mat_mul_raw(out, a.raw_view(), rhs) }.unwrap();
    }

    #[test]
    fn empty_inner_dimension_gives_zeros()
    {
        let a = Array2::<f64>::zeros((2, 0));
        let b = Array2::<f64>::zeros((0, 3));
        let mut c = Array2::from_elem((2, 3), 7.);
        c.product_of(&a, &b).unwrap();
        assert_eq!(c, Array2::<f64>::zeros((2, 3)));
    }
}
