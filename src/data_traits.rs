// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The data (inner representation) traits for containers.
//!
//! The representation decides ownership: an owned container frees its
//! vector on drop, a view borrows another container's memory for a
//! lifetime, and a raw view carries only a pointer.

use std::mem;
use std::ptr::NonNull;

use crate::{Array, ArrayBase, Dimension, OwnedRepr, RawViewRepr, ViewRepr};

mod sealed
{
    pub trait Sealed {}
}

impl<A> sealed::Sealed for OwnedRepr<A> {}
impl<'a, A> sealed::Sealed for ViewRepr<&'a A> {}
impl<'a, A> sealed::Sealed for ViewRepr<&'a mut A> {}
impl<A> sealed::Sealed for RawViewRepr<*const A> {}
impl<A> sealed::Sealed for RawViewRepr<*mut A> {}

/// Container representation trait.
///
/// For a container that may or may not allow element access.
///
/// ***Note:*** `RawData` is not an extension interface at this point.
/// It is public because it is used as a bound on public methods.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait RawData: Sized + sealed::Sealed
{
    /// The container element type.
    type Elem;
}

/// Container representation trait.
///
/// For a container with writable elements.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait RawDataMut: RawData {}

/// Container representation trait.
///
/// A representation that can be cloned.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait RawDataClone: RawData
{
    /// Unsafe because, `ptr` must point inside the current storage.
    #[doc(hidden)]
    unsafe fn clone_with_ptr(&self, ptr: NonNull<Self::Elem>) -> (Self, NonNull<Self::Elem>);
}

/// Container representation trait.
///
/// For a container with elements that can be accessed with safe code.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait Data: RawData
{
    /// Converts the container to a uniquely owned container, cloning
    /// elements if necessary.
    #[doc(hidden)]
    fn into_owned<D>(self_: ArrayBase<Self, D>) -> Array<Self::Elem, D>
    where
        Self::Elem: Clone,
        D: Dimension;
}

/// Container representation trait.
///
/// For a container with elements that can be accessed and mutated with
/// safe code.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait DataMut: Data + RawDataMut {}

/// Container representation trait.
///
/// A representation that is the unique owner of its data.
#[allow(clippy::missing_safety_doc)]
pub unsafe trait DataOwned: DataMut
{
    #[doc(hidden)]
    fn new(elements: Vec<Self::Elem>) -> Self;
}

unsafe impl<A> RawData for OwnedRepr<A>
{
    type Elem = A;
}

unsafe impl<A> RawDataMut for OwnedRepr<A> {}

unsafe impl<A> Data for OwnedRepr<A>
{
    #[inline]
    fn into_owned<D>(self_: ArrayBase<Self, D>) -> Array<A, D>
    where
        A: Clone,
        D: Dimension,
    {
        self_
    }
}

unsafe impl<A> DataMut for OwnedRepr<A> {}

unsafe impl<A> DataOwned for OwnedRepr<A>
{
    fn new(elements: Vec<A>) -> Self
    {
        OwnedRepr::from(elements)
    }
}

unsafe impl<A> RawDataClone for OwnedRepr<A>
where A: Clone
{
    unsafe fn clone_with_ptr(&self, ptr: NonNull<A>) -> (Self, NonNull<A>)
    {
        let mut u = self.clone();
        let mut new_ptr = u.as_nonnull_mut();
        if mem::size_of::<A>() != 0 {
            let our_off = (ptr.as_ptr() as isize - self.as_slice().as_ptr() as isize)
                / mem::size_of::<A>() as isize;
            new_ptr = new_ptr.offset(our_off);
        }
        (u, new_ptr)
    }
}

unsafe impl<'a, A> RawData for ViewRepr<&'a A>
{
    type Elem = A;
}

unsafe impl<'a, A> Data for ViewRepr<&'a A>
{
    fn into_owned<D>(self_: ArrayBase<Self, D>) -> Array<A, D>
    where
        A: Clone,
        D: Dimension,
    {
        self_.to_owned()
    }
}

unsafe impl<'a, A> RawDataClone for ViewRepr<&'a A>
{
    unsafe fn clone_with_ptr(&self, ptr: NonNull<A>) -> (Self, NonNull<A>)
    {
        (*self, ptr)
    }
}

unsafe impl<'a, A> RawData for ViewRepr<&'a mut A>
{
    type Elem = A;
}

unsafe impl<'a, A> RawDataMut for ViewRepr<&'a mut A> {}

unsafe impl<'a, A> Data for ViewRepr<&'a mut A>
{
    fn into_owned<D>(self_: ArrayBase<Self, D>) -> Array<A, D>
    where
        A: Clone,
        D: Dimension,
    {
        self_.to_owned()
    }
}

unsafe impl<'a, A> DataMut for ViewRepr<&'a mut A> {}

unsafe impl<A> RawData for RawViewRepr<*const A>
{
    type Elem = A;
}

unsafe impl<A> RawDataClone for RawViewRepr<*const A>
{
    unsafe fn clone_with_ptr(&self, ptr: NonNull<A>) -> (Self, NonNull<A>)
    {
        (*self, ptr)
    }
}

unsafe impl<A> RawData for RawViewRepr<*mut A>
{
    type Elem = A;
}

unsafe impl<A> RawDataMut for RawViewRepr<*mut A> {}

unsafe impl<A> RawDataClone for RawViewRepr<*mut A>
{
    unsafe fn clone_with_ptr(&self, ptr: NonNull<A>) -> (Self, NonNull<A>)
    {
        (*self, ptr)
    }
}
