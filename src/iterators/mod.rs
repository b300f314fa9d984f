// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::marker::PhantomData;
use std::ptr::NonNull;
use std::slice::{self, Iter as SliceIter, IterMut as SliceIterMut};

use rawpointer::PointerExt;

use crate::dimension;
use crate::order::Order;
use crate::{ArrayView, ArrayViewMut, Dimension};

/// Base for container iterators
///
/// Walks the logical positions `front..back` of a shape in the given
/// traversal order and yields element pointers.
pub(crate) struct Baseiter<A, D>
{
    ptr: NonNull<A>,
    dim: D,
    strides: D,
    order: Order,
    front: usize,
    back: usize,
}

impl<A, D: Dimension> Baseiter<A, D>
{
    /// Creating a Baseiter is unsafe because shape and strides must be
    /// valid for `ptr`, and it must be placed in the correct mother
    /// iterator to be safe.
    #[inline]
    pub unsafe fn new(ptr: NonNull<A>, dim: D, strides: D, order: Order) -> Self
    {
        let back = dim.size();
        Baseiter {
            ptr,
            dim,
            strides,
            order,
            front: 0,
            back,
        }
    }

    /// The multi-index of logical position `pos`.
    fn index_of(&self, mut pos: usize) -> D
    {
        let mut index = D::default();
        let mut visit = |ax: usize| {
            let d = self.dim[ax];
            index[ax] = pos % d;
            pos /= d;
        };
        match self.order {
            Order::RowMajor => (0..D::NDIM).rev().for_each(&mut visit),
            Order::ColumnMajor => (0..D::NDIM).for_each(&mut visit),
        }
        index
    }

    /// Pointer to the element at `index`, which must be in bounds.
    #[inline]
    unsafe fn element_ptr(&self, index: &D) -> NonNull<A>
    {
        index
            .slice()
            .iter()
            .zip(self.strides.slice())
            .fold(self.ptr, |p, (&i, &s)| p.stride_offset(s as isize, i))
    }

    #[inline]
    fn ptr_at(&self, pos: usize) -> NonNull<A>
    {
        unsafe { self.element_ptr(&self.index_of(pos)) }
    }

    #[inline]
    pub fn next(&mut self) -> Option<NonNull<A>>
    {
        if self.front == self.back {
            return None;
        }
        let p = self.ptr_at(self.front);
        self.front += 1;
        Some(p)
    }

    #[inline]
    pub fn next_back(&mut self) -> Option<NonNull<A>>
    {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.ptr_at(self.back))
    }

    /// Like `next`, also returning the multi-index.
    #[inline]
    fn next_indexed(&mut self) -> Option<(D, NonNull<A>)>
    {
        if self.front == self.back {
            return None;
        }
        let index = self.index_of(self.front);
        let ptr = unsafe { self.element_ptr(&index) };
        self.front += 1;
        Some((index, ptr))
    }

    #[inline]
    pub fn len(&self) -> usize
    {
        self.back - self.front
    }
}

impl<A, D: Clone> Clone for Baseiter<A, D>
{
    fn clone(&self) -> Self
    {
        Baseiter {
            ptr: self.ptr,
            dim: self.dim.clone(),
            strides: self.strides.clone(),
            order: self.order,
            front: self.front,
            back: self.back,
        }
    }
}

/// Either a slice iterator, when the elements are contiguous in traversal
/// order, or the strided base iterator.
enum ElementsRepr<S, C>
{
    Slice(S),
    Counted(C),
}

/// Returns `true` when traversal in `order` visits memory contiguously
/// and in increasing address order.
fn is_contiguous_for<D: Dimension>(dim: &D, strides: &D, order: Order) -> bool
{
    match order {
        Order::RowMajor => dimension::is_standard_layout(dim, strides),
        Order::ColumnMajor => dimension::is_fortran_layout(dim, strides),
    }
}

/// An iterator over the elements of a container.
///
/// Iterator element type is `&'a A`.
///
/// See [`.iter()`](crate::ArrayBase::iter) for more information.
pub struct Iter<'a, A, D>
{
    inner: ElementsRepr<SliceIter<'a, A>, Baseiter<A, D>>,
    life: PhantomData<&'a A>,
}

impl<'a, A, D: Dimension> Iter<'a, A, D>
{
    pub(crate) fn new(view: ArrayView<'a, A, D>, order: Order) -> Self
    {
        let inner = if is_contiguous_for(&view.dim, &view.strides, order) {
            ElementsRepr::Slice(unsafe { slice::from_raw_parts(view.ptr.as_ptr(), view.dim.size()) }.iter())
        } else {
            ElementsRepr::Counted(unsafe { Baseiter::new(view.ptr, view.dim, view.strides, order) })
        };
        Iter {
            inner,
            life: PhantomData,
        }
    }
}

impl<'a, A, D: Clone> Clone for Iter<'a, A, D>
{
    fn clone(&self) -> Self
    {
        Iter {
            inner: match self.inner {
                ElementsRepr::Slice(ref iter) => ElementsRepr::Slice(iter.clone()),
                ElementsRepr::Counted(ref iter) => ElementsRepr::Counted(iter.clone()),
            },
            life: PhantomData,
        }
    }
}

impl<'a, A, D: Dimension> Iterator for Iter<'a, A, D>
{
    type Item = &'a A;

    #[inline]
    fn next(&mut self) -> Option<&'a A>
    {
        match self.inner {
            ElementsRepr::Slice(ref mut iter) => iter.next(),
            ElementsRepr::Counted(ref mut iter) => iter.next().map(|p| unsafe { &*p.as_ptr() }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, A, D: Dimension> DoubleEndedIterator for Iter<'a, A, D>
{
    #[inline]
    fn next_back(&mut self) -> Option<&'a A>
    {
        match self.inner {
            ElementsRepr::Slice(ref mut iter) => iter.next_back(),
            ElementsRepr::Counted(ref mut iter) => iter.next_back().map(|p| unsafe { &*p.as_ptr() }),
        }
    }
}

impl<'a, A, D: Dimension> ExactSizeIterator for Iter<'a, A, D>
{
    fn len(&self) -> usize
    {
        match self.inner {
            ElementsRepr::Slice(ref iter) => iter.len(),
            ElementsRepr::Counted(ref iter) => iter.len(),
        }
    }
}

/// An iterator over the elements of a container (mutable).
///
/// Iterator element type is `&'a mut A`.
///
/// See [`.iter_mut()`](crate::ArrayBase::iter_mut) for more information.
pub struct IterMut<'a, A, D>
{
    inner: ElementsRepr<SliceIterMut<'a, A>, Baseiter<A, D>>,
    life: PhantomData<&'a mut A>,
}

impl<'a, A, D: Dimension> IterMut<'a, A, D>
{
    pub(crate) fn new(view: ArrayViewMut<'a, A, D>, order: Order) -> Self
    {
        let inner = if is_contiguous_for(&view.dim, &view.strides, order) {
            ElementsRepr::Slice(unsafe { slice::from_raw_parts_mut(view.ptr.as_ptr(), view.dim.size()) }.iter_mut())
        } else {
            ElementsRepr::Counted(unsafe { Baseiter::new(view.ptr, view.dim, view.strides, order) })
        };
        IterMut {
            inner,
            life: PhantomData,
        }
    }
}

impl<'a, A, D: Dimension> Iterator for IterMut<'a, A, D>
{
    type Item = &'a mut A;

    #[inline]
    fn next(&mut self) -> Option<&'a mut A>
    {
        match self.inner {
            ElementsRepr::Slice(ref mut iter) => iter.next(),
            ElementsRepr::Counted(ref mut iter) => iter.next().map(|p| unsafe { &mut *p.as_ptr() }),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        let len = self.len();
        (len, Some(len))
    }
}

impl<'a, A, D: Dimension> DoubleEndedIterator for IterMut<'a, A, D>
{
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut A>
    {
        match self.inner {
            ElementsRepr::Slice(ref mut iter) => iter.next_back(),
            ElementsRepr::Counted(ref mut iter) => iter.next_back().map(|p| unsafe { &mut *p.as_ptr() }),
        }
    }
}

impl<'a, A, D: Dimension> ExactSizeIterator for IterMut<'a, A, D>
{
    fn len(&self) -> usize
    {
        match self.inner {
            ElementsRepr::Slice(ref iter) => iter.len(),
            ElementsRepr::Counted(ref iter) => iter.len(),
        }
    }
}

/// An iterator over the indexes and elements of a container, in row
/// major order.
///
/// See [`.indexed_iter()`](crate::ArrayBase::indexed_iter) for more information.
pub struct IndexedIter<'a, A, D>
{
    inner: Baseiter<A, D>,
    life: PhantomData<&'a A>,
}

impl<'a, A, D: Dimension> IndexedIter<'a, A, D>
{
    pub(crate) fn new(view: ArrayView<'a, A, D>) -> Self
    {
        IndexedIter {
            inner: unsafe { Baseiter::new(view.ptr, view.dim, view.strides, Order::RowMajor) },
            life: PhantomData,
        }
    }
}

impl<'a, A, D: Dimension> Iterator for IndexedIter<'a, A, D>
{
    type Item = (D::Pattern, &'a A);

    #[inline]
    fn next(&mut self) -> Option<Self::Item>
    {
        self.inner
            .next_indexed()
            .map(|(index, p)| (index.into_pattern(), unsafe { &*p.as_ptr() }))
    }

    fn size_hint(&self) -> (usize, Option<usize>)
    {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<'a, A, D: Dimension> ExactSizeIterator for IndexedIter<'a, A, D> {}

unsafe impl<'a, A: Sync, D: Send> Send for Iter<'a, A, D> {}
unsafe impl<'a, A: Sync, D: Sync> Sync for Iter<'a, A, D> {}
unsafe impl<'a, A: Send, D: Send> Send for IterMut<'a, A, D> {}
unsafe impl<'a, A: Sync, D: Sync> Sync for IterMut<'a, A, D> {}

#[cfg(test)]
mod tests
{
    use crate::{arr2, Array, Axis, ShapeBuilder};

    #[test]
    fn strided_iteration_both_ends()
    {
        let m = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let t = m.t();
        let fwd: Vec<_> = t.iter().cloned().collect();
        // transposed row-major data is column-major storage
        assert_eq!(fwd, vec![1, 2, 3, 4, 5, 6]);
        let col = m.column(1);
        let rev: Vec<_> = col.iter().rev().cloned().collect();
        assert_eq!(rev, vec![5, 2]);
        let mut it = col.iter();
        assert_eq!(it.len(), 2);
        it.next();
        assert_eq!(it.len(), 1);
    }

    #[test]
    fn column_major_storage_order()
    {
        let a = Array::from_shape_vec((2, 3).f(), (0..6).collect()).unwrap();
        let visited: Vec<i32> = a.iter().cloned().collect();
        assert_eq!(visited, (0..6).collect::<Vec<_>>());
        let indexed: Vec<_> = a.indexed_iter().map(|(ix, &x)| (ix, x)).collect();
        assert_eq!(indexed[1], ((0, 1), 2));
    }

    #[test]
    fn windowed_mut_iteration()
    {
        let mut a = Array::from_shape_fn((4, 4), |(i, j)| (i * 4 + j) as i64);
        {
            let mut w = a.window_mut(&[1, 1], &[2, 2]).unwrap();
            for x in w.iter_mut().rev() {
                *x = 0;
            }
        }
        assert_eq!(a.sum(), 120 - (5 + 6 + 9 + 10));
    }

    #[test]
    fn inverted_axes_walk_backwards_in_memory()
    {
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let mut v = a.view();
        v.invert_axis(Axis(0));
        v.invert_axis(Axis(1));
        let visited: Vec<_> = v.iter().cloned().collect();
        assert_eq!(visited, vec![6, 5, 4, 3, 2, 1]);
        for ((i, j), x) in v.indexed_iter() {
            assert!(std::ptr::eq(x, &a[[1 - i, 2 - j]]));
        }
        assert_eq!(v.iter().rev().next(), Some(&1));
    }
}
