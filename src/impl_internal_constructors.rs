// Copyright 2021-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::ptr::NonNull;

use crate::{
    ArrayBase, ArrayView, ArrayViewMut, Dimension, RawArrayView, RawArrayViewMut, RawData, RawViewRepr, ViewRepr,
};

// internal "builder-like" methods
impl<A, S, D> ArrayBase<S, D>
where
    S: RawData<Elem = A>,
    D: Dimension,
{
    /// Create a container from its four parts.
    ///
    /// ## Safety
    ///
    /// The caller must ensure that every index in `dim` addresses a valid
    /// element of the storage when offset from `ptr` through `strides`.
    #[inline]
    pub(crate) unsafe fn from_parts(data: S, ptr: NonNull<A>, dim: D, strides: D) -> Self
    {
        ArrayBase { data, ptr, dim, strides }
    }

    /// Set strides and dimension of the container to the new values
    ///
    /// The argument order with strides before dimensions is used because strides are often
    /// computed as derived from the dimension.
    ///
    /// ## Safety
    ///
    /// The caller needs to ensure that the new strides and dimensions are correct
    /// for the container data.
    pub(crate) unsafe fn with_strides_dim<E>(self, strides: E, dim: E) -> ArrayBase<S, E>
    where E: Dimension
    {
        debug_assert_eq!(strides.ndim(), dim.ndim());
        ArrayBase {
            data: self.data,
            ptr: self.ptr,
            dim,
            strides,
        }
    }
}

impl<'a, A, D> ArrayView<'a, A, D>
where D: Dimension
{
    /// Create a new `ArrayView`
    ///
    /// Unsafe because: `ptr` must be valid for the given dimension and strides.
    #[inline(always)]
    pub(crate) unsafe fn new(ptr: NonNull<A>, dim: D, strides: D) -> Self
    {
        ArrayBase::from_parts(ViewRepr::new(), ptr, dim, strides)
    }

    #[inline]
    pub(crate) unsafe fn new_(ptr: *const A, dim: D, strides: D) -> Self
    {
        Self::new(NonNull::new_unchecked(ptr as *mut A), dim, strides)
    }
}

impl<'a, A, D> ArrayViewMut<'a, A, D>
where D: Dimension
{
    /// Create a new `ArrayViewMut`
    ///
    /// Unsafe because: `ptr` must be valid for the given dimension and strides.
    #[inline(always)]
    pub(crate) unsafe fn new(ptr: NonNull<A>, dim: D, strides: D) -> Self
    {
        ArrayBase::from_parts(ViewRepr::new(), ptr, dim, strides)
    }

    #[inline]
    pub(crate) unsafe fn new_(ptr: *mut A, dim: D, strides: D) -> Self
    {
        Self::new(NonNull::new_unchecked(ptr), dim, strides)
    }
}

impl<A, D> RawArrayView<A, D>
where D: Dimension
{
    #[inline]
    pub(crate) unsafe fn new(ptr: NonNull<A>, dim: D, strides: D) -> Self
    {
        ArrayBase::from_parts(RawViewRepr::new(), ptr, dim, strides)
    }
}

impl<A, D> RawArrayViewMut<A, D>
where D: Dimension
{
    #[inline]
    pub(crate) unsafe fn new(ptr: NonNull<A>, dim: D, strides: D) -> Self
    {
        ArrayBase::from_parts(RawViewRepr::new(), ptr, dim, strides)
    }
}
