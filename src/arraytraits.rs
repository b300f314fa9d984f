// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::hash;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};

use crate::dimension::IntoDimension;
use crate::iterators::{Iter, IterMut};
use crate::{
    Array, Array1, ArrayBase, ArrayView, ArrayView1, ArrayViewMut, ArrayViewMut1, Data, DataMut, Dimension, Ix1,
    RawDataClone,
};

#[cold]
#[inline(never)]
pub(crate) fn array_out_of_bounds() -> !
{
    panic!("ndcontainer: index out of bounds");
}

/// Access the element at **index**.
///
/// **Panics** if index is out of bounds.
impl<S, D, I> Index<I> for ArrayBase<S, D>
where
    D: Dimension,
    I: IntoDimension<Dim = D>,
    S: Data,
{
    type Output = S::Elem;
    #[inline]
    fn index(&self, index: I) -> &S::Elem
    {
        match self.get_ptr(index) {
            Some(p) => unsafe { &*p },
            None => array_out_of_bounds(),
        }
    }
}

/// Access the element at **index** mutably.
///
/// **Panics** if index is out of bounds.
impl<S, D, I> IndexMut<I> for ArrayBase<S, D>
where
    D: Dimension,
    I: IntoDimension<Dim = D>,
    S: DataMut,
{
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut S::Elem
    {
        match self.get_mut(index) {
            Some(x) => x,
            None => array_out_of_bounds(),
        }
    }
}

/// Return `true` if the container shapes and all elements of `self` and
/// `rhs` are equal. Return `false` otherwise.
impl<A, B, S, S2, D> PartialEq<ArrayBase<S2, D>> for ArrayBase<S, D>
where
    A: PartialEq<B>,
    S: Data<Elem = A>,
    S2: Data<Elem = B>,
    D: Dimension,
{
    fn eq(&self, rhs: &ArrayBase<S2, D>) -> bool
    {
        if self.shape() != rhs.shape() {
            return false;
        }
        if self.is_standard_layout() && rhs.is_standard_layout() {
            if let (Some(a), Some(b)) = (self.as_slice(), rhs.as_slice()) {
                return a.iter().zip(b).all(|(x, y)| x == y);
            }
        }
        self.iter_logical().zip(rhs.iter_logical()).all(|(x, y)| x == y)
    }
}

impl<S, D> Eq for ArrayBase<S, D>
where
    D: Dimension,
    S: Data,
    S::Elem: Eq,
{
}

impl<S, D> hash::Hash for ArrayBase<S, D>
where
    D: Dimension,
    S: Data,
    S::Elem: hash::Hash,
{
    fn hash<H: hash::Hasher>(&self, state: &mut H)
    {
        self.shape().hash(state);
        for elt in self.iter_logical() {
            elt.hash(state)
        }
    }
}

impl<S: RawDataClone, D: Clone> Clone for ArrayBase<S, D>
{
    fn clone(&self) -> ArrayBase<S, D>
    {
        // safe because `clone_with_ptr` receives our own pointer
        unsafe {
            let (data, ptr) = self.data.clone_with_ptr(self.ptr);
            ArrayBase {
                data,
                ptr,
                dim: self.dim.clone(),
                strides: self.strides.clone(),
            }
        }
    }
}

impl<S: RawDataClone + Copy, D: Copy> Copy for ArrayBase<S, D> {}

/// Create an owned container with a default state.
///
/// The container is created with dimension `D::default()`, which results
/// in for example dimensions `0` and `(0, 0)` with zero elements for the
/// one-dimensional and two-dimensional cases respectively.
impl<A, D> Default for Array<A, D>
where
    D: Dimension,
    A: Default,
{
    fn default() -> Self
    {
        Array::default(D::default())
    }
}

impl<A> From<Vec<A>> for Array1<A>
{
    /// Create a one-dimensional container from a vector (no copying needed).
    fn from(v: Vec<A>) -> Self
    {
        Self::from_vec(v)
    }
}

impl<A> FromIterator<A> for Array1<A>
{
    fn from_iter<I>(iterable: I) -> Array1<A>
    where I: IntoIterator<Item = A>
    {
        Self::from_vec(iterable.into_iter().collect())
    }
}

/// Implementation of `ArrayView1::from(&S)` where `S` is a slice or
/// slicable.
impl<'a, A, Slice: ?Sized> From<&'a Slice> for ArrayView1<'a, A>
where Slice: AsRef<[A]>
{
    fn from(slice: &'a Slice) -> Self
    {
        let xs = slice.as_ref();
        unsafe { ArrayView::new_(xs.as_ptr(), Ix1::new([xs.len()]), Ix1::new([1])) }
    }
}

/// Implementation of `ArrayViewMut1::from(&mut S)` where `S` is a slice
/// or slicable.
impl<'a, A, Slice: ?Sized> From<&'a mut Slice> for ArrayViewMut1<'a, A>
where Slice: AsMut<[A]>
{
    fn from(slice: &'a mut Slice) -> Self
    {
        let xs = slice.as_mut();
        unsafe { ArrayViewMut::new_(xs.as_mut_ptr(), Ix1::new([xs.len()]), Ix1::new([1])) }
    }
}

/// Implementation of `ArrayView::from(&A)` where `A` is an array.
impl<'a, A, S, D> From<&'a ArrayBase<S, D>> for ArrayView<'a, A, D>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    fn from(array: &'a ArrayBase<S, D>) -> Self
    {
        array.view()
    }
}

impl<'a, S, D> IntoIterator for &'a ArrayBase<S, D>
where
    D: Dimension,
    S: Data,
{
    type Item = &'a S::Elem;
    type IntoIter = Iter<'a, S::Elem, D>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.iter()
    }
}

impl<'a, S, D> IntoIterator for &'a mut ArrayBase<S, D>
where
    D: Dimension,
    S: DataMut,
{
    type Item = &'a mut S::Elem;
    type IntoIter = IterMut<'a, S::Elem, D>;

    fn into_iter(self) -> Self::IntoIter
    {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests
{
    use crate::{arr1, arr2, Array, Array2, ArrayView1, ShapeBuilder};

    #[test]
    fn equality_ignores_layout()
    {
        let a = arr2(&[[1, 2], [3, 4]]);
        let b = Array::from_shape_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, b.t());
        assert_ne!(a, Array2::<i32>::zeros((2, 3)));
    }

    #[test]
    fn clone_of_window_keeps_offset()
    {
        let mut a = Array2::from_shape_fn((3, 3), |(i, j)| i * 3 + j);
        a.restrict_window(&[1, 1], &[2, 2]).unwrap();
        let b = a.clone();
        assert_eq!(b, arr2(&[[4, 5], [7, 8]]));
        assert_ne!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds_panics()
    {
        let a = arr1(&[1., 2.]);
        let x = a[2];
        assert!(x > 0.);
    }

    #[test]
    fn views_from_slices()
    {
        let xs = vec![1, 2, 3];
        let v = ArrayView1::from(&xs);
        assert_eq!(v, arr1(&[1, 2, 3]));
        let total: i32 = (&v).into_iter().sum();
        assert_eq!(total, 6);
        let default = <Array2<u8> as Default>::default();
        assert_eq!(default.shape(), &[0, 0]);
    }
}
