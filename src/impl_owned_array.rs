// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dimension::IntoDimension;
use crate::order::Order;
use crate::{Array, Dimension, ShapeBuilder};

/// Methods specific to `Array`.
///
/// ***See also all methods for [`ArrayBase`]***
///
/// [`ArrayBase`]: crate::ArrayBase
impl<A, D> Array<A, D>
where D: Dimension
{
    /// Return a vector of the elements in the container's storage, in the
    /// order they are stored in memory.
    ///
    /// The vector can contain elements outside the current logical shape
    /// when a window was restricted in place.
    pub fn into_raw_vec(self) -> Vec<A>
    {
        self.data.into_vec()
    }

    /// Change the shape of the container, preserving the values of the
    /// region both shapes have in common (the smaller length along each
    /// axis). New elements are `A::default()`.
    ///
    /// The storage order is kept. A resize to the current shape does
    /// nothing; otherwise the container gets a fresh compact allocation and
    /// views taken before the call must not be used any more (the borrow
    /// checker enforces this).
    ///
    /// ```
    /// use ndcontainer::{arr2, Array2};
    ///
    /// let mut m = arr2(&[[1, 2, 3], [4, 5, 6]]);
    /// m.resize((3, 2));
    /// assert_eq!(m, arr2(&[[1, 2], [4, 5], [0, 0]]));
    /// ```
    pub fn resize<E>(&mut self, shape: E)
    where
        E: IntoDimension<Dim = D>,
        A: Clone + Default,
    {
        let new_dim = shape.into_dimension();
        if new_dim == self.dim {
            return;
        }

        // vector fast path: storage is the whole vector with unit stride
        if D::NDIM == 1
            && self.is_standard_layout()
            && self.data.len() == self.len()
            && self.as_ptr() == self.data.as_slice().as_ptr()
        {
            let new_len = new_dim.size();
            log::debug!("resizing vector from {} to {} elements", self.len(), new_len);
            self.ptr = self.data.modify_as_vec(|mut v| {
                v.resize(new_len, A::default());
                v
            });
            self.strides = new_dim.default_strides();
            self.dim = new_dim;
            return;
        }

        let order = self.storage_order();
        log::debug!("resizing container from {:?} to {:?} ({:?})", self.dim, new_dim, order);
        let mut overlap = new_dim.clone();
        for (o, &d) in overlap.slice_mut().iter_mut().zip(self.dim.slice()) {
            *o = (*o).min(d);
        }
        let mut fresh = Array::default(new_dim.with_order(order));
        {
            let zeros = vec![0; D::NDIM];
            let mut src = self.view();
            src.restrict_window_unchecked(&zeros, overlap.slice());
            let mut dst = fresh.view_mut();
            dst.restrict_window_unchecked(&zeros, overlap.slice());
            dst.zip_mut_with_same_shape(&src, |x, y| *x = y.clone());
        }
        *self = fresh;
    }

    /// Change the shape of the container without preserving its values;
    /// every element is `A::default()` afterwards.
    ///
    /// When the requested shape equals the current shape nothing happens,
    /// in particular the data pointer stays the same and the values are
    /// kept. Otherwise the existing allocation is reused when it has the
    /// capacity. The storage order is kept.
    pub fn set_size<E>(&mut self, shape: E)
    where
        E: IntoDimension<Dim = D>,
        A: Clone + Default,
    {
        let new_dim = shape.into_dimension();
        if new_dim == self.dim {
            return;
        }
        let new_len = new_dim.size();
        let strides = match self.storage_order() {
            Order::RowMajor => new_dim.default_strides(),
            Order::ColumnMajor => new_dim.fortran_strides(),
        };
        self.ptr = self.data.modify_as_vec(|mut v| {
            if v.capacity() < new_len {
                log::debug!("set_size reallocates for {} elements (capacity {})", new_len, v.capacity());
            }
            v.clear();
            v.resize(new_len, A::default());
            v
        });
        self.dim = new_dim;
        self.strides = strides;
    }
}
