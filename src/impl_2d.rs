// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Methods for two-dimensional containers.
use std::ptr;

use crate::arraytraits::array_out_of_bounds;
use crate::dimension::Axis;
use crate::error::{self, ArrayError};
use crate::{Array1, Array2, ArrayBase, ArrayView1, ArrayViewMut1, Data, DataMut, Element, Ix, Ix1, Ix2, RawData};

/// Return `Ok` if `perm` holds every index of `0..n` exactly once.
fn check_permutation(perm: &[usize], n: usize) -> Result<(), ArrayError>
{
    let mut seen = vec![false; n];
    if perm.len() == n && perm.iter().all(|&i| i < n && !std::mem::replace(&mut seen[i], true)) {
        Ok(())
    } else {
        Err(error::index_out_of_range(format!("{:?} is not a permutation of 0..{}", perm, n)))
    }
}

/// # Methods For 2-D Containers
impl<A, S> ArrayBase<S, Ix2>
where S: RawData<Elem = A>
{
    /// Return the number of rows (length of `Axis(0)`) in the matrix.
    ///
    /// ```
    /// use ndcontainer::{arr2, Axis};
    ///
    /// let m = arr2(&[[1., 2.],
    ///                [3., 4.],
    ///                [5., 6.]]);
    /// assert_eq!(m.nrows(), 3);
    ///
    /// // equivalent ways of getting the dimensions
    /// let (rows, cols) = m.dim();
    /// assert_eq!(rows, m.nrows());
    /// assert_eq!(rows, m.len_of(Axis(0)));
    /// assert_eq!(cols, m.ncols());
    /// ```
    pub fn nrows(&self) -> usize
    {
        self.len_of(Axis(0))
    }

    /// Return the number of columns (length of `Axis(1)`) in the matrix.
    pub fn ncols(&self) -> usize
    {
        self.len_of(Axis(1))
    }

    /// Return the distance in elements between two consecutive rows.
    pub fn row_stride(&self) -> isize
    {
        self.stride_of(Axis(0))
    }

    /// Return the distance in elements between two consecutive columns.
    pub fn col_stride(&self) -> isize
    {
        self.stride_of(Axis(1))
    }

    /// Return true if the matrix is square, false otherwise.
    pub fn is_square(&self) -> bool
    {
        let (m, n) = self.dim();
        m == n
    }
}

impl<A, S> ArrayBase<S, Ix2>
where S: Data<Elem = A>
{
    /// Return a view of row `index`. Its stride is the column stride of
    /// the matrix.
    ///
    /// **Panics** if `index` is out of bounds.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let m = arr2(&[[1., 2.], [3., 4.]]);
    /// assert_eq!(m.row(0), arr2(&[[1., 2.]]).row(0));
    /// assert_eq!(m.row(1).as_ptr(), &m[[1, 0]] as *const f64);
    /// ```
    pub fn row(&self, index: Ix) -> ArrayView1<'_, A>
    {
        self.try_row(index).unwrap_or_else(|_| array_out_of_bounds())
    }

    /// Return a view of row `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index` is out of bounds.
    pub fn try_row(&self, index: Ix) -> Result<ArrayView1<'_, A>, ArrayError>
    {
        self.subview(Axis(0), index)
    }

    /// Return a view of column `index`. Its stride is the row stride of
    /// the matrix.
    ///
    /// **Panics** if `index` is out of bounds.
    pub fn column(&self, index: Ix) -> ArrayView1<'_, A>
    {
        self.try_column(index).unwrap_or_else(|_| array_out_of_bounds())
    }

    /// Return a view of column `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index` is out of bounds.
    pub fn try_column(&self, index: Ix) -> Result<ArrayView1<'_, A>, ArrayError>
    {
        self.subview(Axis(1), index)
    }

    /// Return a view of the main diagonal, of length `min(rows, cols)`.
    ///
    /// ```
    /// use ndcontainer::{arr1, arr2};
    ///
    /// let m = arr2(&[[1, 2, 3], [4, 5, 6]]);
    /// assert_eq!(m.diagonal(), arr1(&[1, 5]));
    /// ```
    pub fn diagonal(&self) -> ArrayView1<'_, A>
    {
        let n = self.nrows().min(self.ncols());
        let stride = self.strides[0].wrapping_add(self.strides[1]);
        unsafe { ArrayView1::new(self.ptr, Ix1::new([n]), Ix1::new([stride])) }
    }

    /// Gather the rows listed in `indices`, in that order, into a new
    /// matrix. Indices may repeat.
    ///
    /// **Errors** with `IndexOutOfRange` if an index is out of bounds.
    pub fn select_rows(&self, indices: &[Ix]) -> Result<Array2<A>, ArrayError>
    where A: Clone
    {
        self.select_along(Axis(0), indices)
    }

    /// Gather the columns listed in `indices`, in that order, into a new
    /// matrix.
    ///
    /// **Errors** with `IndexOutOfRange` if an index is out of bounds.
    pub fn select_columns(&self, indices: &[Ix]) -> Result<Array2<A>, ArrayError>
    where A: Clone
    {
        self.select_along(Axis(1), indices)
    }

    fn select_along(&self, axis: Axis, indices: &[Ix]) -> Result<Array2<A>, ArrayError>
    where A: Clone
    {
        let len = self.len_of(axis);
        if let Some(&bad) = indices.iter().find(|&&i| i >= len) {
            return Err(error::index_out_of_range(format!("index {} on axis {} of length {}", bad, axis.index(), len)));
        }
        let (m, n) = self.dim();
        let shape = if axis.index() == 0 { (indices.len(), n) } else { (m, indices.len()) };
        Ok(Array2::from_shape_fn(shape, |(i, j)| {
            let src = if axis.index() == 0 { [indices[i], j] } else { [i, indices[j]] };
            self[src].clone()
        }))
    }

    /// Return the matrix product of `self` and `rhs` as a new row major
    /// matrix.
    ///
    /// **Errors** with `SizeMismatch` if the inner dimensions differ.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let a = arr2(&[[1, 2], [3, 4]]);
    /// let b = arr2(&[[0, 1], [1, 0]]);
    /// assert_eq!(a.mat_mul(&b).unwrap(), arr2(&[[2, 1], [4, 3]]));
    /// ```
    pub fn mat_mul<S2>(&self, rhs: &ArrayBase<S2, Ix2>) -> Result<Array2<A>, ArrayError>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        let mut c = Array2::zeros((self.nrows(), rhs.ncols()));
        c.product_of(self, rhs)?;
        Ok(c)
    }

    /// Return the product of `self` and the vector `x`.
    ///
    /// **Errors** with `SizeMismatch` if `x.len()` differs from the
    /// number of columns.
    pub fn mat_vec<S2>(&self, x: &ArrayBase<S2, Ix1>) -> Result<Array1<A>, ArrayError>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        let mut y = Array1::zeros(self.nrows());
        y.product_of_matrix_vector(self, x)?;
        Ok(y)
    }
}

impl<A, S> ArrayBase<S, Ix2>
where S: DataMut<Elem = A>
{
    /// Return a mutable view of row `index`.
    ///
    /// **Panics** if `index` is out of bounds.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let mut m = arr2(&[[1., 2.], [3., 4.]]);
    /// m.row_mut(0)[1] = 5.;
    /// assert_eq!(m, arr2(&[[1., 5.], [3., 4.]]));
    /// ```
    pub fn row_mut(&mut self, index: Ix) -> ArrayViewMut1<'_, A>
    {
        self.subview_mut(Axis(0), index)
            .unwrap_or_else(|_| array_out_of_bounds())
    }

    /// Return a mutable view of column `index`.
    ///
    /// **Panics** if `index` is out of bounds.
    pub fn column_mut(&mut self, index: Ix) -> ArrayViewMut1<'_, A>
    {
        self.subview_mut(Axis(1), index)
            .unwrap_or_else(|_| array_out_of_bounds())
    }

    /// Swap rows `a` and `b` in place.
    ///
    /// **Errors** with `IndexOutOfRange` if either row is out of bounds.
    pub fn exchange_rows(&mut self, a: Ix, b: Ix) -> Result<(), ArrayError>
    {
        self.exchange_along(Axis(0), a, b)
    }

    /// Swap columns `a` and `b` in place.
    ///
    /// **Errors** with `IndexOutOfRange` if either column is out of bounds.
    pub fn exchange_columns(&mut self, a: Ix, b: Ix) -> Result<(), ArrayError>
    {
        self.exchange_along(Axis(1), a, b)
    }

    fn exchange_along(&mut self, axis: Axis, a: Ix, b: Ix) -> Result<(), ArrayError>
    {
        let len = self.len_of(axis);
        if a >= len || b >= len {
            return Err(error::index_out_of_range(format!(
                "lanes {} and {} on axis {} of length {}",
                a,
                b,
                axis.index(),
                len
            )));
        }
        if a == b {
            return Ok(());
        }
        let other = Axis(1 - axis.index());
        let stride = self.stride_of(axis);
        let lane_stride = self.stride_of(other);
        let p = self.as_mut_ptr();
        for k in 0..self.len_of(other) as isize {
            unsafe {
                ptr::swap(
                    p.offset(a as isize * stride + k * lane_stride),
                    p.offset(b as isize * stride + k * lane_stride),
                );
            }
        }
        Ok(())
    }

    /// Reorder the rows so that row `k` becomes the old row `perm[k]`.
    ///
    /// **Errors** with `IndexOutOfRange` if `perm` is not a permutation of
    /// the row indices.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let mut m = arr2(&[[1, 1], [2, 2], [3, 3]]);
    /// m.permute_rows(&[2, 0, 1]).unwrap();
    /// assert_eq!(m, arr2(&[[3, 3], [1, 1], [2, 2]]));
    /// ```
    pub fn permute_rows(&mut self, perm: &[Ix]) -> Result<(), ArrayError>
    where A: Clone
    {
        check_permutation(perm, self.nrows())?;
        let permuted = self.select_rows(perm)?;
        self.zip_mut_with_same_shape(&permuted, |x, y| *x = y.clone());
        Ok(())
    }

    /// Reorder the columns so that column `k` becomes the old column
    /// `perm[k]`.
    ///
    /// **Errors** with `IndexOutOfRange` if `perm` is not a permutation of
    /// the column indices.
    pub fn permute_columns(&mut self, perm: &[Ix]) -> Result<(), ArrayError>
    where A: Clone
    {
        check_permutation(perm, self.ncols())?;
        let permuted = self.select_columns(perm)?;
        self.zip_mut_with_same_shape(&permuted, |x, y| *x = y.clone());
        Ok(())
    }
}
