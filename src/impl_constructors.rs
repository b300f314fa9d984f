// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for owned containers.

use std::ptr::NonNull;

use num_traits::{One, Zero};

use crate::error::{ArrayError, ErrorKind};
use crate::order::Order;
use crate::{ArrayBase, DataOwned, Dimension, Ix1, Ix2, ShapeBuilder};

/// Constructor methods for one-dimensional containers.
impl<S, A> ArrayBase<S, Ix1>
where S: DataOwned<Elem = A>
{
    /// Create a one-dimensional container from a vector (no copying needed).
    ///
    /// ```rust
    /// use ndcontainer::Array1;
    ///
    /// let v = Array1::from_vec(vec![1., 2., 3., 4.]);
    /// assert_eq!(v.len(), 4);
    /// ```
    pub fn from_vec(v: Vec<A>) -> Self
    {
        let len = v.len();
        unsafe { Self::from_vec_dim_stride_unchecked(Ix1::new([len]), Ix1::new([1]), v) }
    }

    /// Create a one-dimensional container from an iterable.
    ///
    /// ```rust
    /// use ndcontainer::{Array1, arr1};
    ///
    /// let v = Array1::from_iter((0..5).map(|x| x * x));
    /// assert!(v == arr1(&[0, 1, 4, 9, 16]))
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_iter<I>(iterable: I) -> Self
    where I: IntoIterator<Item = A>
    {
        Self::from_vec(iterable.into_iter().collect())
    }
}

/// Constructor methods for two-dimensional containers.
impl<S, A> ArrayBase<S, Ix2>
where S: DataOwned<Elem = A>
{
    /// Create an identity matrix of size `n` (square 2D container).
    pub fn eye(n: usize) -> Self
    where A: Clone + Zero + One
    {
        let mut eye = Self::zeros((n, n));
        for i in 0..n {
            eye[[i, i]] = A::one();
        }
        eye
    }
}

/// Constructor methods for n-dimensional containers.
///
/// The `shape` argument can be an integer, a tuple, an array or a `Dim`
/// value. Use [`.f()`](ShapeBuilder::f) on it to request column major
/// storage.
impl<S, A, D> ArrayBase<S, D>
where
    S: DataOwned<Elem = A>,
    D: Dimension,
{
    /// Create a container with copies of `elem`, shape `shape`.
    ///
    /// **Panics** if the product of non-zero axis lengths overflows `isize`.
    ///
    /// ```
    /// use ndcontainer::{Array, arr3, ShapeBuilder};
    ///
    /// let a = Array::from_elem((2, 2, 2), 1.);
    ///
    /// assert!(
    ///     a == arr3(&[[[1., 1.],
    ///                  [1., 1.]],
    ///                 [[1., 1.],
    ///                  [1., 1.]]])
    /// );
    /// assert!(a.strides() == &[4, 2, 1]);
    ///
    /// let b = Array::from_elem((2, 2, 2).f(), 1.);
    /// assert!(b.strides() == &[1, 2, 4]);
    /// ```
    pub fn from_elem<Sh>(shape: Sh, elem: A) -> Self
    where
        A: Clone,
        Sh: ShapeBuilder<Dim = D>,
    {
        let shape = shape.into_shape_with_order();
        let size = size_of_shape_checked_unwrap(&shape.dim);
        let v = vec![elem; size];
        unsafe { Self::from_shape_vec_unchecked(shape, v) }
    }

    /// Create a container with zeros, shape `shape`.
    pub fn zeros<Sh>(shape: Sh) -> Self
    where
        A: Clone + Zero,
        Sh: ShapeBuilder<Dim = D>,
    {
        Self::from_elem(shape, A::zero())
    }

    /// Create a container with ones, shape `shape`.
    pub fn ones<Sh>(shape: Sh) -> Self
    where
        A: Clone + One,
        Sh: ShapeBuilder<Dim = D>,
    {
        Self::from_elem(shape, A::one())
    }

    /// Create a container with default values, shape `shape`
    pub fn default<Sh>(shape: Sh) -> Self
    where
        A: Default,
        Sh: ShapeBuilder<Dim = D>,
    {
        Self::from_shape_simple_fn(shape, A::default)
    }

    /// Create a container with values created by the function `f`.
    ///
    /// `f` is called with no argument, and it should return the element to
    /// create.
    pub fn from_shape_simple_fn<Sh, F>(shape: Sh, mut f: F) -> Self
    where
        Sh: ShapeBuilder<Dim = D>,
        F: FnMut() -> A,
    {
        let shape = shape.into_shape_with_order();
        let len = size_of_shape_checked_unwrap(&shape.dim);
        let v = (0..len).map(|_| f()).collect();
        unsafe { Self::from_shape_vec_unchecked(shape, v) }
    }

    /// Create a container with values created by the function `f`.
    ///
    /// `f` is called with the index of the element to create; the elements
    /// are visited in memory order.
    ///
    /// ```
    /// use ndcontainer::{Array, arr2};
    ///
    /// let a = Array::from_shape_fn((2, 2), |(i, j)| i * 10 + j);
    /// assert_eq!(a, arr2(&[[0, 1], [10, 11]]));
    /// ```
    pub fn from_shape_fn<Sh, F>(shape: Sh, mut f: F) -> Self
    where
        Sh: ShapeBuilder<Dim = D>,
        F: FnMut(D::Pattern) -> A,
    {
        let shape = shape.into_shape_with_order();
        let len = size_of_shape_checked_unwrap(&shape.dim);
        let mut v = Vec::with_capacity(len);
        let mut index = shape.dim.first_index();
        while let Some(ix) = index {
            v.push(f(ix.clone().into_pattern()));
            index = match shape.order {
                Order::RowMajor => shape.dim.next_for(ix),
                Order::ColumnMajor => shape.dim.next_for_f(ix),
            };
        }
        unsafe { Self::from_shape_vec_unchecked(shape, v) }
    }

    /// Create a container with the given shape from a vector. (No cloning of
    /// elements needed.)
    ///
    /// The vector is laid out in the storage order the shape requests.
    ///
    /// **Errors** with `SizeMismatch` if the vector length doesn't match the
    /// number of elements of the shape.
    ///
    /// ```
    /// use ndcontainer::{Array, ErrorKind, ShapeBuilder, arr2};
    ///
    /// let a = Array::from_shape_vec((2, 2), vec![1., 2., 3., 4.]).unwrap();
    /// assert!(a == arr2(&[[1., 2.], [3., 4.]]));
    ///
    /// let b = Array::from_shape_vec((2, 2).f(), vec![1., 2., 3., 4.]).unwrap();
    /// assert!(b == arr2(&[[1., 3.], [2., 4.]]));
    ///
    /// let err = Array::from_shape_vec((3, 2), vec![1., 2.]).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    /// ```
    pub fn from_shape_vec<Sh>(shape: Sh, v: Vec<A>) -> Result<Self, ArrayError>
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        match shape.dim.size_checked() {
            Some(size) if size == v.len() => unsafe { Ok(Self::from_shape_vec_unchecked(shape, v)) },
            _ => Err(ArrayError::new(
                ErrorKind::SizeMismatch,
                format!("{} elements for shape {:?}", v.len(), shape.dim),
            )),
        }
    }

    /// Create a container from a vector and interpret it according to the
    /// provided shape. No checks are performed.
    ///
    /// # Safety
    ///
    /// The caller must ensure that the vector length equals the number of
    /// elements of the shape.
    pub unsafe fn from_shape_vec_unchecked<Sh>(shape: Sh, v: Vec<A>) -> Self
    where Sh: ShapeBuilder<Dim = D>
    {
        let shape = shape.into_shape_with_order();
        let strides = shape.strides();
        Self::from_vec_dim_stride_unchecked(shape.dim, strides, v)
    }

    /// Build the container from a vector whose element zero is the logically
    /// first element (all strides non-negative).
    pub(crate) unsafe fn from_vec_dim_stride_unchecked(dim: D, strides: D, mut v: Vec<A>) -> Self
    {
        debug_assert!(dim.size() <= v.len());
        // moving the vector leaves its heap buffer in place
        let ptr = NonNull::new(v.as_mut_ptr()).unwrap_or(NonNull::dangling());
        ArrayBase::from_parts(DataOwned::new(v), ptr, dim, strides)
    }
}

fn size_of_shape_checked_unwrap<D: Dimension>(dim: &D) -> usize
{
    match dim.size_checked() {
        Some(sz) if sz <= isize::MAX as usize => sz,
        _ => panic!("ndcontainer: Shape too large, product of non-zero axis lengths overflows isize in shape {:?}", dim),
    }
}
