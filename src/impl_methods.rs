// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::slice;

use num_traits::Zero;

use crate::dimension::{self, Axis, IntoDimension};
use crate::error::{self, ArrayError};
use crate::iterators::{IndexedIter, Iter, IterMut};
use crate::order::Order;
use crate::{
    Array, ArrayBase, ArrayView, ArrayViewMut, Data, DataMut, Dimension, Ix, Ixs, RawArrayView, RawArrayViewMut,
    RawData, RawDataMut,
};

/// # Methods For All Container Types
impl<A, S, D> ArrayBase<S, D>
where
    S: RawData<Elem = A>,
    D: Dimension,
{
    /// Return the total number of elements in the container.
    pub fn len(&self) -> usize
    {
        self.dim.size()
    }

    /// Return the length of `axis`.
    ///
    /// **Panics** if the axis is out of bounds.
    pub fn len_of(&self, axis: Axis) -> usize
    {
        self.dim[axis.index()]
    }

    /// Return whether the container has any elements
    pub fn is_empty(&self) -> bool
    {
        self.len() == 0
    }

    /// Return the number of dimensions (axes) in the container
    pub fn ndim(&self) -> usize
    {
        D::NDIM
    }

    /// Return the shape of the container in its “pattern” form,
    /// an integer in the one-dimensional case, tuple in the n-dimensional cases.
    pub fn dim(&self) -> D::Pattern
    {
        self.dim.clone().into_pattern()
    }

    /// Return the shape of the container as it's stored in the container.
    pub fn raw_dim(&self) -> D
    {
        self.dim.clone()
    }

    /// Return the shape of the container as a slice.
    ///
    /// ```
    /// use ndcontainer::Array2;
    ///
    /// let m = Array2::<i8>::zeros((3, 4));
    /// assert_eq!(m.shape(), &[3, 4]);
    /// ```
    pub fn shape(&self) -> &[Ix]
    {
        self.dim.slice()
    }

    /// Return the strides of the container as a slice, in units of elements.
    pub fn strides(&self) -> &[Ixs]
    {
        let s = self.strides.slice();
        // reinterpret unsigned integer as signed
        unsafe { slice::from_raw_parts(s.as_ptr() as *const _, s.len()) }
    }

    /// Return the stride of `axis`.
    ///
    /// **Panics** if the axis is out of bounds.
    pub fn stride_of(&self, axis: Axis) -> isize
    {
        self.strides[axis.index()] as isize
    }

    /// Return a pointer to the first element in the container.
    ///
    /// Raw access to container elements needs to follow the strided
    /// indexing scheme: an element at multi-index *I* in a container with
    /// strides *S* is located at offset
    ///
    /// *Σ<sub>0 ≤ k < d</sub> I<sub>k</sub> × S<sub>k</sub>*
    ///
    /// where *d* is `self.ndim()`.
    #[inline(always)]
    pub fn as_ptr(&self) -> *const A
    {
        self.ptr.as_ptr() as *const A
    }

    /// Return a pointer to the element at `index`, or `None` if the index
    /// is out of bounds.
    pub fn get_ptr<I>(&self, index: I) -> Option<*const A>
    where I: IntoDimension<Dim = D>
    {
        let ptr = self.ptr;
        self.dim
            .stride_offset_checked(&self.strides, &index.into_dimension())
            .map(move |offset| unsafe { ptr.as_ptr().offset(offset) as *const _ })
    }

    /// Return a raw view of the container.
    #[inline]
    pub fn raw_view(&self) -> RawArrayView<A, D>
    {
        unsafe { RawArrayView::new(self.ptr, self.dim.clone(), self.strides.clone()) }
    }

    /// Return a mutable pointer to the first element in the container.
    #[inline(always)]
    pub fn as_mut_ptr(&mut self) -> *mut A
    where S: RawDataMut
    {
        self.ptr.as_ptr()
    }

    /// Return a raw mutable view of the container.
    #[inline]
    pub fn raw_view_mut(&mut self) -> RawArrayViewMut<A, D>
    where S: RawDataMut
    {
        unsafe { RawArrayViewMut::new(self.ptr, self.dim.clone(), self.strides.clone()) }
    }

    /// Return `true` if the container data is laid out in contiguous
    /// “C order” in memory (where the last index is the most rapidly
    /// varying).
    ///
    /// Return `false` otherwise, i.e. the container is possibly not
    /// contiguous in memory, it has custom strides, etc.
    pub fn is_standard_layout(&self) -> bool
    {
        dimension::is_standard_layout(&self.dim, &self.strides)
    }

    /// Return `true` if the container is compact: its elements are
    /// contiguous in memory in either row major or column major order.
    pub fn is_compact(&self) -> bool
    {
        self.is_standard_layout() || dimension::is_fortran_layout(&self.dim, &self.strides)
    }

    /// Return the storage order of the container.
    ///
    /// Compact containers report the order their memory is laid out in.
    /// Strided views report column major when the first axis has the
    /// smaller stride. Vectors are always row major.
    pub fn storage_order(&self) -> Order
    {
        if D::NDIM == 1 || self.is_standard_layout() {
            Order::RowMajor
        } else if dimension::is_fortran_layout(&self.dim, &self.strides) {
            Order::ColumnMajor
        } else {
            let first = (self.strides[0] as isize).abs();
            let last = (self.strides[D::NDIM - 1] as isize).abs();
            if first < last {
                Order::ColumnMajor
            } else {
                Order::RowMajor
            }
        }
    }
}

/// # Methods For Containers With Readable Elements
impl<A, S, D> ArrayBase<S, D>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Return a read-only view of the container
    pub fn view(&self) -> ArrayView<'_, A, D>
    {
        unsafe { ArrayView::new(self.ptr, self.dim.clone(), self.strides.clone()) }
    }

    /// Return an uniquely owned copy of the container.
    ///
    /// A compact container keeps its storage order, anything else is copied
    /// into row major order.
    pub fn to_owned(&self) -> Array<A, D>
    where A: Clone
    {
        if let Some(slc) = self.as_slice_memory_order() {
            let strides = if self.is_standard_layout() {
                self.dim.default_strides()
            } else {
                self.dim.fortran_strides()
            };
            unsafe { Array::from_vec_dim_stride_unchecked(self.dim.clone(), strides, slc.to_vec()) }
        } else {
            self.map(A::clone)
        }
    }

    /// Turn the container into a uniquely owned container, cloning the
    /// elements if it is a view.
    pub fn into_owned(self) -> Array<A, D>
    where A: Clone
    {
        S::into_owned(self)
    }

    /// Return an iterator of references to the elements of the container.
    ///
    /// Elements are visited in the container's
    /// [storage order](ArrayBase::storage_order).
    ///
    /// Iterator element type is `&A`.
    pub fn iter(&self) -> Iter<'_, A, D>
    {
        Iter::new(self.view(), self.storage_order())
    }

    /// Return an iterator of indexes and references to the elements of the
    /// container, in row major order.
    ///
    /// Iterator element type is `(D::Pattern, &A)`.
    pub fn indexed_iter(&self) -> IndexedIter<'_, A, D>
    {
        IndexedIter::new(self.view())
    }

    /// Iterate the elements in row major order, whatever the storage order.
    pub(crate) fn iter_logical(&self) -> Iter<'_, A, D>
    {
        Iter::new(self.view(), Order::RowMajor)
    }

    /// Return a reference to the element at `index`, or return `None`
    /// if the index is out of bounds.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.]]);
    ///
    /// assert!(
    ///     a.get((0, 1)) == Some(&2.) &&
    ///     a.get((0, 2)) == None &&
    ///     a[(0, 1)] == a[[0, 1]]
    /// );
    /// ```
    pub fn get<I>(&self, index: I) -> Option<&A>
    where I: IntoDimension<Dim = D>
    {
        self.get_ptr(index).map(|p| unsafe { &*p })
    }

    /// Return a reference to the element at `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if the index is out of bounds.
    pub fn at<I>(&self, index: I) -> Result<&A, ArrayError>
    where I: IntoDimension<Dim = D>
    {
        let index = index.into_dimension();
        match self.get_ptr(index.clone()) {
            Some(p) => Ok(unsafe { &*p }),
            None => Err(self.out_of_bounds(&index)),
        }
    }

    fn out_of_bounds(&self, index: &D) -> ArrayError
    {
        error::index_out_of_range(format!("index {:?} for shape {:?}", index, self.dim))
    }

    /// Return the container’s data as a slice, if it is contiguous and in
    /// standard order. Return `None` otherwise.
    pub fn as_slice(&self) -> Option<&[A]>
    {
        if self.is_standard_layout() {
            unsafe { Some(slice::from_raw_parts(self.ptr.as_ptr(), self.len())) }
        } else {
            None
        }
    }

    /// Return the container’s data as a slice if it is compact, in the
    /// order of memory. Return `None` otherwise.
    pub fn as_slice_memory_order(&self) -> Option<&[A]>
    {
        if self.is_compact() {
            unsafe { Some(slice::from_raw_parts(self.ptr.as_ptr(), self.len())) }
        } else {
            None
        }
    }

    /// Call `f` by reference on each element and create a new container
    /// with the new values.
    ///
    /// A compact container keeps its storage order, anything else produces
    /// a row major container.
    pub fn map<'a, B, F>(&'a self, f: F) -> Array<B, D>
    where
        F: FnMut(&'a A) -> B,
        A: 'a,
    {
        if let Some(slc) = self.as_slice_memory_order() {
            let strides = if self.is_standard_layout() {
                self.dim.default_strides()
            } else {
                self.dim.fortran_strides()
            };
            let v = slc.iter().map(f).collect();
            unsafe { Array::from_vec_dim_stride_unchecked(self.dim.clone(), strides, v) }
        } else {
            let v = self.iter_logical().map(f).collect();
            unsafe { Array::from_shape_vec_unchecked(self.dim.clone(), v) }
        }
    }

    /// Call `f` by value on each element and create a new container with
    /// the new values.
    pub fn mapv<B, F>(&self, mut f: F) -> Array<B, D>
    where
        F: FnMut(A) -> B,
        A: Clone,
    {
        self.map(move |x| f(x.clone()))
    }

    /// Create a new container pairing elements of `self` and `rhs` by
    /// logical index. The result is row major.
    pub(crate) fn zip_map_same_shape<B, C, S2, F>(&self, rhs: &ArrayBase<S2, D>, mut f: F) -> Array<C, D>
    where
        S2: Data<Elem = B>,
        F: FnMut(&A, &B) -> C,
    {
        debug_assert_eq!(self.shape(), rhs.shape());
        let v = self
            .iter_logical()
            .zip(rhs.iter_logical())
            .map(|(a, b)| f(a, b))
            .collect();
        unsafe { Array::from_shape_vec_unchecked(self.dim.clone(), v) }
    }

    /// Return `Ok` if the shapes of `self` and `rhs` agree, otherwise a
    /// `SizeMismatch` error.
    pub(crate) fn check_same_shape<S2>(&self, rhs: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: RawData
    {
        if self.dim == rhs.dim {
            Ok(())
        } else {
            Err(error::incompatible_shapes(self.shape(), rhs.shape()))
        }
    }
}

/// # Methods For Containers With Writable Elements
impl<A, S, D> ArrayBase<S, D>
where
    S: DataMut<Elem = A>,
    D: Dimension,
{
    /// Return a read-write view of the container
    pub fn view_mut(&mut self) -> ArrayViewMut<'_, A, D>
    {
        unsafe { ArrayViewMut::new(self.ptr, self.dim.clone(), self.strides.clone()) }
    }

    /// Return an iterator of mutable references to the elements of the
    /// container, in storage order.
    ///
    /// Iterator element type is `&mut A`.
    pub fn iter_mut(&mut self) -> IterMut<'_, A, D>
    {
        let order = self.storage_order();
        IterMut::new(self.view_mut(), order)
    }

    /// Return a mutable reference to the element at `index`, or return
    /// `None` if the index is out of bounds.
    pub fn get_mut<I>(&mut self, index: I) -> Option<&mut A>
    where I: IntoDimension<Dim = D>
    {
        let ptr = self.ptr;
        self.dim
            .stride_offset_checked(&self.strides, &index.into_dimension())
            .map(move |offset| unsafe { &mut *ptr.as_ptr().offset(offset) })
    }

    /// Return a mutable reference to the element at `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if the index is out of bounds.
    pub fn at_mut<I>(&mut self, index: I) -> Result<&mut A, ArrayError>
    where I: IntoDimension<Dim = D>
    {
        let index = index.into_dimension();
        let ptr = self.ptr;
        match self.dim.stride_offset_checked(&self.strides, &index) {
            Some(offset) => Ok(unsafe { &mut *ptr.as_ptr().offset(offset) }),
            None => Err(self.out_of_bounds(&index)),
        }
    }

    /// Return the container’s data as a mutable slice, if it is contiguous
    /// and in standard order. Return `None` otherwise.
    pub fn as_slice_mut(&mut self) -> Option<&mut [A]>
    {
        if self.is_standard_layout() {
            unsafe { Some(slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len())) }
        } else {
            None
        }
    }

    /// Return the container’s data as a mutable slice if it is compact, in
    /// the order of memory. Return `None` otherwise.
    pub fn as_slice_memory_order_mut(&mut self) -> Option<&mut [A]>
    {
        if self.is_compact() {
            unsafe { Some(slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len())) }
        } else {
            None
        }
    }

    /// Set every element to a clone of `x`.
    pub fn set_all(&mut self, x: A)
    where A: Clone
    {
        self.map_inplace(move |elt| *elt = x.clone());
    }

    /// Set every element to zero.
    pub fn set_zero(&mut self)
    where A: Clone + Zero
    {
        self.set_all(A::zero());
    }

    /// Copy the elements of `rhs` into `self`, pairing them by logical
    /// index. The layouts of the two containers may differ.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn assign<S2>(&mut self, rhs: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        A: Clone,
    {
        self.zip_mut_with(rhs, |x, y| *x = y.clone())
    }

    /// Traverse two containers of the same shape in unspecified order and
    /// apply `f` to each pair of elements with the same logical index.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn zip_mut_with<B, S2, F>(&mut self, rhs: &ArrayBase<S2, D>, f: F) -> Result<(), ArrayError>
    where
        S2: Data<Elem = B>,
        F: FnMut(&mut A, &B),
    {
        self.check_same_shape(rhs)?;
        self.zip_mut_with_same_shape(rhs, f);
        Ok(())
    }

    /// Like `zip_mut_with`, the caller has checked the shapes.
    pub(crate) fn zip_mut_with_same_shape<B, S2, F>(&mut self, rhs: &ArrayBase<S2, D>, mut f: F)
    where
        S2: Data<Elem = B>,
        F: FnMut(&mut A, &B),
    {
        debug_assert_eq!(self.shape(), rhs.shape());
        // same traversal order on both sides pairs equal logical indices
        let order = self.storage_order();
        for (x, y) in IterMut::new(self.view_mut(), order).zip(Iter::new(rhs.view(), order)) {
            f(x, y);
        }
    }

    /// Modify the container in place by calling `f` by mutable reference on
    /// each element.
    pub fn map_inplace<F>(&mut self, f: F)
    where F: FnMut(&mut A)
    {
        self.iter_mut().for_each(f);
    }

    /// Modify the container in place by calling `f` by value on each
    /// element and storing the result.
    pub fn mapv_inplace<F>(&mut self, mut f: F)
    where
        F: FnMut(A) -> A,
        A: Clone,
    {
        self.map_inplace(move |x| *x = f(x.clone()));
    }
}

#[cfg(test)]
mod tests
{
    use crate::{arr2, Array, Array2, ErrorKind, Order, ShapeBuilder};

    #[test]
    fn at_reports_out_of_range()
    {
        let mut m = Array2::<f64>::zeros((3, 4));
        assert!(m.at((2, 3)).is_ok());
        assert_eq!(m.at((3, 0)).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        *m.at_mut([1, 1]).unwrap() = 2.;
        assert_eq!(m[[1, 1]], 2.);
        assert!(m.get_mut((0, 4)).is_none());
    }

    #[test]
    fn assign_across_storage_orders()
    {
        let a = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let mut b = Array::zeros((2, 3).f());
        b.assign(&a).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.storage_order(), Order::ColumnMajor);
        assert_eq!(b.as_slice_memory_order(), Some(&[1, 4, 2, 5, 3, 6][..]));

        let mut c = Array::zeros((3, 2));
        assert_eq!(c.assign(&a).unwrap_err().kind(), ErrorKind::SizeMismatch);
        c.set_all(7);
        assert!(c.iter().all(|&x| x == 7));
    }

    #[test]
    fn to_owned_keeps_compact_order()
    {
        let a = Array::from_shape_vec((2, 2).f(), vec![1., 2., 3., 4.]).unwrap();
        let b = a.view().to_owned();
        assert_eq!(b.storage_order(), Order::ColumnMajor);
        assert_eq!(a, b);

        let m = arr2(&[[1, 2, 3], [4, 5, 6]]);
        let col = m.column(2).to_owned();
        assert!(col.is_standard_layout());
        assert_eq!(col.as_slice(), Some(&[3, 6][..]));
    }

    #[test]
    fn strided_view_storage_order()
    {
        let m = Array::from_shape_fn((4, 6).f(), |(i, j)| i + j);
        let w = m.window(&[1, 1], &[2, 3]).unwrap();
        assert!(!w.is_compact());
        assert_eq!(w.storage_order(), Order::ColumnMajor);
    }
}
