// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ptr::NonNull;

use crate::error::{ArrayError, ErrorKind};
use crate::{ArrayView, ArrayViewMut, Dimension, ShapeBuilder};

fn check_slice_len<D: Dimension>(dim: &D, len: usize) -> Result<(), ArrayError>
{
    if dim.size_checked() == Some(len) {
        Ok(())
    } else {
        Err(ArrayError::new(
            ErrorKind::SizeMismatch,
            format!("slice of {} elements for shape {:?}", len, dim),
        ))
    }
}

/// Methods for read-only container views.
impl<'a, A, D> ArrayView<'a, A, D>
where D: Dimension
{
    /// Create a read-only view borrowing its data from a slice, laid out in
    /// the storage order the shape requests.
    ///
    /// **Errors** with `SizeMismatch` unless the slice length equals the
    /// number of elements of the shape.
    ///
    /// ```
    /// use ndcontainer::{ArrayView, ShapeBuilder};
    ///
    /// let s = [1, 2, 3, 4, 5, 6];
    /// let a = ArrayView::from_shape((2, 3).f(), &s).unwrap();
    /// assert_eq!(a[[1, 0]], 2);
    /// assert!(ArrayView::from_shape((4, 2), &s).is_err());
    /// ```
    pub fn from_shape<Sh>(shape: Sh, xs: &'a [A]) -> Result<Self, ArrayError>
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        check_slice_len(&shape.dim, xs.len())?;
        let strides = shape.strides();
        unsafe { Ok(Self::new_(xs.as_ptr(), shape.dim, strides)) }
    }

    /// Create an `ArrayView<A, D>` from shape information and a raw pointer
    /// to the elements.
    ///
    /// # Safety
    ///
    /// The caller is responsible for ensuring all of the following:
    ///
    /// * The elements seen by moving `ptr` according to the shape and
    ///   storage order must live at least as long as `'a` and must not be
    ///   mutably aliased for the duration of `'a`.
    ///
    /// * `ptr` must be non-null and aligned.
    pub unsafe fn from_shape_ptr<Sh>(shape: Sh, ptr: *const A) -> Self
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        let strides = shape.strides();
        Self::new_(ptr, shape.dim, strides)
    }
}

/// Methods for read-write container views.
impl<'a, A, D> ArrayViewMut<'a, A, D>
where D: Dimension
{
    /// Create a read-write view borrowing its data from a slice, laid out
    /// in the storage order the shape requests.
    ///
    /// **Errors** with `SizeMismatch` unless the slice length equals the
    /// number of elements of the shape.
    pub fn from_shape<Sh>(shape: Sh, xs: &'a mut [A]) -> Result<Self, ArrayError>
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        check_slice_len(&shape.dim, xs.len())?;
        let strides = shape.strides();
        unsafe { Ok(Self::new_(xs.as_mut_ptr(), shape.dim, strides)) }
    }

    /// Create an `ArrayViewMut<A, D>` from shape information and a raw
    /// pointer to the elements.
    ///
    /// # Safety
    ///
    /// As [`ArrayView::from_shape_ptr`], and the elements must not be
    /// aliased at all for the duration of `'a`.
    pub unsafe fn from_shape_ptr<Sh>(shape: Sh, ptr: *mut A) -> Self
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        let strides = shape.strides();
        Self::new(NonNull::new_unchecked(ptr), shape.dim, strides)
    }
}
