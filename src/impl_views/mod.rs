// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Views sharing the memory of a container: windows, slices (one index
//! fixed), axis permutations, reversed axes and transposes.

use rawpointer::PointerExt;

use crate::dimension::{self, stride_offset, Axis, IntoDimension, RemoveAxis};
use crate::error::{self, ArrayError, ErrorKind};
use crate::{ArrayBase, ArrayView, ArrayViewMut, Data, DataMut, Dimension, RawData};

mod constructors;

/// # View Construction
///
/// The methods that consume `self` work on any storage; call them on a
/// `.view()` or `.view_mut()` to keep the original container.
impl<A, S, D> ArrayBase<S, D>
where
    S: RawData<Elem = A>,
    D: Dimension,
{
    /// Restrict the container in place to the window starting at
    /// `offsets` with the given `lengths` along each axis. Strides are
    /// unchanged, so the window shares memory with the old extent.
    ///
    /// **Errors** with `SizeMismatch` if the argument lengths differ from
    /// the number of axes, and with `IndexOutOfRange` if the window reaches
    /// outside the container. The container is unchanged on error.
    pub fn restrict_window(&mut self, offsets: &[usize], lengths: &[usize]) -> Result<(), ArrayError>
    {
        if offsets.len() != D::NDIM || lengths.len() != D::NDIM {
            return Err(ArrayError::new(
                ErrorKind::SizeMismatch,
                format!("window of {} axes for a container of {}", offsets.len().max(lengths.len()), D::NDIM),
            ));
        }
        for (ax, ((&off, &len), &d)) in offsets.iter().zip(lengths).zip(self.dim.slice()).enumerate() {
            if off.checked_add(len).map_or(true, |end| end > d) {
                return Err(error::index_out_of_range(format!(
                    "window {}..{} on axis {} of length {}",
                    off,
                    off.saturating_add(len),
                    ax,
                    d
                )));
            }
        }
        self.restrict_window_unchecked(offsets, lengths);
        Ok(())
    }

    /// Restrict to a window the caller has checked.
    pub(crate) fn restrict_window_unchecked(&mut self, offsets: &[usize], lengths: &[usize])
    {
        let mut new_dim = self.dim.clone();
        new_dim.slice_mut().copy_from_slice(lengths);
        // an empty window addresses nothing, leave the pointer alone
        if new_dim.size() != 0 {
            let offset = offsets
                .iter()
                .zip(self.strides.slice())
                .fold(0, |acc, (&i, &s)| acc + stride_offset(i, s));
            self.ptr = unsafe { self.ptr.offset(offset) };
        }
        self.dim = new_dim;
    }

    /// Select the subview where `axis` is fixed at `index`, consuming the
    /// container and returning one with one axis less.
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` or `index` is out of
    /// bounds.
    pub fn index_axis_move(self, axis: Axis, index: usize) -> Result<ArrayBase<S, D::Smaller>, ArrayError>
    where D: RemoveAxis
    {
        let ax = axis.index();
        if ax >= D::NDIM || index >= self.dim[ax] {
            return Err(error::index_out_of_range(format!(
                "index {} on axis {} of shape {:?}",
                index, ax, self.dim
            )));
        }
        let dim = self.dim.remove_axis(axis);
        let strides = self.strides.remove_axis(axis);
        unsafe {
            let ptr = self.ptr.stride_offset(self.strides[ax] as isize, index);
            Ok(ArrayBase::from_parts(self.data, ptr, dim, strides))
        }
    }

    /// Permute the axes without moving memory.
    ///
    /// `axes[i]` is the axis of the original container that becomes axis
    /// `i`. For a matrix, `permuted_axes((1, 0))` is the transpose.
    ///
    /// **Errors** with `IndexOutOfRange` if `axes` is not a permutation of
    /// `0..ndim`.
    ///
    /// ```
    /// use ndcontainer::Array3;
    ///
    /// let a = Array3::<u8>::zeros((2, 3, 4));
    /// let p = a.view().permuted_axes((2, 0, 1)).unwrap();
    /// assert_eq!(p.shape(), &[4, 2, 3]);
    /// assert_eq!(p.strides(), &[1, 12, 4]);
    /// ```
    pub fn permuted_axes<T>(self, axes: T) -> Result<ArrayBase<S, D>, ArrayError>
    where T: IntoDimension<Dim = D>
    {
        let axes = axes.into_dimension();
        if !dimension::is_axis_permutation(axes.slice(), D::NDIM) {
            return Err(error::index_out_of_range(format!("{:?} is not an axis permutation", axes)));
        }
        let mut new_dim = D::default();
        let mut new_strides = D::default();
        for (new_axis, &axis) in axes.slice().iter().enumerate() {
            new_dim[new_axis] = self.dim[axis];
            new_strides[new_axis] = self.strides[axis];
        }
        unsafe { Ok(self.with_strides_dim(new_strides, new_dim)) }
    }

    /// Swap axes `ax` and `bx`.
    ///
    /// **Panics** if the axes are out of bounds.
    pub fn swap_axes(&mut self, ax: usize, bx: usize)
    {
        self.dim.slice_mut().swap(ax, bx);
        self.strides.slice_mut().swap(ax, bx);
    }

    /// Reverse the order of the axes; for a matrix this is the transpose.
    pub fn reversed_axes(mut self) -> ArrayBase<S, D>
    {
        self.dim.slice_mut().reverse();
        self.strides.slice_mut().reverse();
        self
    }

    /// Reverse the direction of `axis`. The stride of the axis becomes
    /// negative.
    ///
    /// **Panics** if the axis is out of bounds.
    ///
    /// ```
    /// use ndcontainer::{arr1, Axis};
    ///
    /// let a = arr1(&[1, 2, 3]);
    /// let mut r = a.view();
    /// r.invert_axis(Axis(0));
    /// assert_eq!(r, arr1(&[3, 2, 1]));
    /// assert_eq!(r.strides(), &[-1]);
    /// ```
    pub fn invert_axis(&mut self, axis: Axis)
    {
        let ax = axis.index();
        let s = self.strides[ax] as isize;
        let m = self.dim[ax];
        if m != 0 && self.dim.size() != 0 {
            self.ptr = unsafe { self.ptr.stride_offset(s, m - 1) };
        }
        self.strides[ax] = (-s) as usize;
    }
}

/// # Borrowed Views
impl<A, S, D> ArrayBase<S, D>
where
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Return a view of the window starting at `offsets` with `lengths`
    /// along each axis.
    ///
    /// **Errors** as [`restrict_window`](ArrayBase::restrict_window).
    ///
    /// ```
    /// use ndcontainer::{arr2, Array2};
    ///
    /// let m = Array2::from_shape_fn((4, 5), |(i, j)| i * 10 + j);
    /// let w = m.window(&[1, 2], &[2, 2]).unwrap();
    /// assert_eq!(w, arr2(&[[12, 13], [22, 23]]));
    /// assert!(m.window(&[3, 0], &[2, 1]).is_err());
    /// ```
    pub fn window(&self, offsets: &[usize], lengths: &[usize]) -> Result<ArrayView<'_, A, D>, ArrayError>
    {
        let mut view = self.view();
        view.restrict_window(offsets, lengths)?;
        Ok(view)
    }

    /// Return the view with `axis` fixed at `index` (a slice of the
    /// container).
    ///
    /// **Errors** with `IndexOutOfRange` if `axis` or `index` is out of
    /// bounds.
    pub fn subview(&self, axis: Axis, index: usize) -> Result<ArrayView<'_, A, D::Smaller>, ArrayError>
    where D: RemoveAxis
    {
        self.view().index_axis_move(axis, index)
    }

    /// Return a transposed view of the container.
    ///
    /// This is a shorthand for `self.view().reversed_axes()`.
    pub fn t(&self) -> ArrayView<'_, A, D>
    {
        self.view().reversed_axes()
    }
}

/// # Mutable Borrowed Views
impl<A, S, D> ArrayBase<S, D>
where
    S: DataMut<Elem = A>,
    D: Dimension,
{
    /// Return a mutable view of a window, see
    /// [`window`](ArrayBase::window).
    pub fn window_mut(&mut self, offsets: &[usize], lengths: &[usize]) -> Result<ArrayViewMut<'_, A, D>, ArrayError>
    {
        let mut view = self.view_mut();
        view.restrict_window(offsets, lengths)?;
        Ok(view)
    }

    /// Return a mutable view with `axis` fixed at `index`.
    pub fn subview_mut(&mut self, axis: Axis, index: usize) -> Result<ArrayViewMut<'_, A, D::Smaller>, ArrayError>
    where D: RemoveAxis
    {
        self.view_mut().index_axis_move(axis, index)
    }
}

impl<'a, A, D> ArrayView<'a, A, D>
where D: Dimension
{
    /// Convert the view into an `ArrayView<'b, A, D>` where `'b` is a lifetime
    /// outlived by `'a'`.
    pub fn reborrow<'b>(self) -> ArrayView<'b, A, D>
    where 'a: 'b
    {
        unsafe { ArrayView::new(self.ptr, self.dim, self.strides) }
    }
}

impl<'a, A, D> ArrayViewMut<'a, A, D>
where D: Dimension
{
    /// Convert the view into an `ArrayViewMut<'b, A, D>` where `'b` is a lifetime
    /// outlived by `'a'`.
    pub fn reborrow<'b>(self) -> ArrayViewMut<'b, A, D>
    where 'a: 'b
    {
        unsafe { ArrayViewMut::new(self.ptr, self.dim, self.strides) }
    }
}
