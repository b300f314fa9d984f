// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::marker::PhantomData;
use std::ptr::NonNull;

/// Owned container representation.
///
/// *Don’t use this type directly; use the type alias
/// [`Array`](crate::Array) for the container type!*
#[derive(Debug)]
pub struct OwnedRepr<A>(pub(crate) Vec<A>);

impl<A> OwnedRepr<A>
{
    pub(crate) fn from(v: Vec<A>) -> Self
    {
        OwnedRepr(v)
    }

    pub(crate) fn into_vec(self) -> Vec<A>
    {
        self.0
    }

    pub(crate) fn as_slice(&self) -> &[A]
    {
        &self.0
    }

    pub(crate) fn len(&self) -> usize
    {
        self.0.len()
    }

    pub(crate) fn as_nonnull_mut(&mut self) -> NonNull<A>
    {
        // Vec's pointer is never null, dangling when unallocated
        NonNull::new(self.0.as_mut_ptr()).unwrap_or(NonNull::dangling())
    }

    /// Replace the storage by the vector returned from `f`; return the new
    /// data pointer.
    ///
    /// Existing pointers into the data are invalidated.
    #[must_use = "must use new pointer to update existing pointers"]
    pub(crate) fn modify_as_vec(&mut self, f: impl FnOnce(Vec<A>) -> Vec<A>) -> NonNull<A>
    {
        let v = std::mem::take(&mut self.0);
        self.0 = f(v);
        self.as_nonnull_mut()
    }
}

impl<A: Clone> Clone for OwnedRepr<A>
{
    fn clone(&self) -> Self
    {
        OwnedRepr(self.0.clone())
    }

    fn clone_from(&mut self, other: &Self)
    {
        self.0.clone_from(&other.0);
    }
}

/// Container view’s representation.
///
/// *Don’t use this type directly; use the type aliases
/// [`ArrayView`](crate::ArrayView) / [`ArrayViewMut`](crate::ArrayViewMut)
/// for the container type!*
#[derive(Copy, Clone)]
pub struct ViewRepr<A>
{
    /// A non-nullable pointer with no drop semantics
    life: PhantomData<A>,
}

impl<A> ViewRepr<A>
{
    #[inline(always)]
    pub(crate) const fn new() -> Self
    {
        ViewRepr { life: PhantomData }
    }
}

/// Raw container view’s representation.
///
/// *Don’t use this type directly; use the type aliases
/// [`RawArrayView`](crate::RawArrayView) /
/// [`RawArrayViewMut`](crate::RawArrayViewMut) for the container type!*
#[derive(Copy, Clone)]
pub struct RawViewRepr<A>
{
    ptr: PhantomData<A>,
}

impl<A> RawViewRepr<A>
{
    #[inline(always)]
    pub(crate) const fn new() -> Self
    {
        RawViewRepr { ptr: PhantomData }
    }
}
