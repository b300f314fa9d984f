// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Methods for one-dimensional containers.
use crate::error::{self, ArrayError};
use crate::numeric_util;
use crate::{Array1, Array2, ArrayBase, Data, Element, Ix, Ix1, Ix2};

/// # Methods For 1-D Containers
impl<A, S> ArrayBase<S, Ix1>
where S: Data<Elem = A>
{
    /// Return a vector with the elements of the one-dimensional container.
    pub fn to_vec(&self) -> Vec<A>
    where A: Clone
    {
        if let Some(slc) = self.as_slice() {
            slc.to_vec()
        } else {
            self.iter().cloned().collect()
        }
    }

    /// Gather the elements at `indices`, in that order. Indices may repeat.
    ///
    /// **Errors** with `IndexOutOfRange` if an index is out of bounds.
    pub fn select(&self, indices: &[Ix]) -> Result<Array1<A>, ArrayError>
    where A: Clone
    {
        indices
            .iter()
            .map(|&i| self.at(i).cloned())
            .collect::<Result<Vec<_>, _>>()
            .map(Array1::from_vec)
    }

    /// Return the dot product of two vectors.
    ///
    /// **Errors** with `SizeMismatch` if the lengths differ.
    ///
    /// ```
    /// use ndcontainer::arr1;
    ///
    /// let a = arr1(&[1., 2., 3.]);
    /// assert_eq!(a.dot(&arr1(&[4., 5., 6.])).unwrap(), 32.);
    /// ```
    pub fn dot<S2>(&self, rhs: &ArrayBase<S2, Ix1>) -> Result<A, ArrayError>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        self.check_same_shape(rhs)?;
        if let (Some(xs), Some(ys)) = (self.as_slice(), rhs.as_slice()) {
            return Ok(numeric_util::unrolled_dot(xs, ys));
        }
        Ok(self
            .iter()
            .zip(rhs.iter())
            .fold(A::zero(), |acc, (&x, &y)| acc + x * y))
    }

    /// Return the cross product of two vectors of length 3.
    ///
    /// **Errors** with `SizeMismatch` if either length is not 3.
    ///
    /// ```
    /// use ndcontainer::arr1;
    ///
    /// let x = arr1(&[1, 0, 0]);
    /// let y = arr1(&[0, 1, 0]);
    /// assert_eq!(x.cross_product(&y).unwrap(), arr1(&[0, 0, 1]));
    /// ```
    pub fn cross_product<S2>(&self, rhs: &ArrayBase<S2, Ix1>) -> Result<Array1<A>, ArrayError>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        if self.len() != 3 || rhs.len() != 3 {
            return Err(error::incompatible_shapes(self.shape(), rhs.shape()));
        }
        let (a, b) = (self, rhs);
        Ok(Array1::from_vec(vec![
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]))
    }

    /// Return the product of the row vector `self` and the matrix `m`.
    ///
    /// **Errors** with `SizeMismatch` if the length of `self` differs from
    /// the number of rows of `m`.
    pub fn vec_mat<S2>(&self, m: &ArrayBase<S2, Ix2>) -> Result<Array1<A>, ArrayError>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        let mut y = Array1::zeros(m.ncols());
        y.product_of_vector_matrix(self, m)?;
        Ok(y)
    }

    /// Return the outer product `self yᵀ` as a row major matrix.
    pub fn outer<S2>(&self, y: &ArrayBase<S2, Ix1>) -> Array2<A>
    where
        A: Element,
        S2: Data<Elem = A>,
    {
        Array2::from_shape_fn((self.len(), y.len()), |(i, j)| self[i] * y[j])
    }
}

#[cfg(test)]
mod tests
{
    use crate::{arr1, arr2, Array1, ErrorKind};

    #[test]
    fn strided_dot()
    {
        let m = arr2(&[[1, 2], [3, 4], [5, 6]]);
        assert_eq!(m.column(1).dot(&arr1(&[1, 1, 1])).unwrap(), 12);
        assert_eq!(m.column(0).dot(&m.column(1)).unwrap(), 2 + 12 + 30);
        let long = Array1::from_iter((0..20).map(|x| x as f64));
        assert_eq!(long.dot(&long).unwrap(), 2470.);
        assert_eq!(long.dot(&arr1(&[1.])).unwrap_err().kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn cross_product_needs_three()
    {
        let x = arr1(&[1., 2.]);
        assert_eq!(x.cross_product(&x).unwrap_err().kind(), ErrorKind::SizeMismatch);
        let y = arr1(&[2., 3., 4.]);
        assert_eq!(y.cross_product(&y).unwrap(), arr1(&[0., 0., 0.]));
    }

    #[test]
    fn select_and_vector_products()
    {
        let v = arr1(&[5, 6, 7]);
        assert_eq!(v.select(&[2, 0, 2]).unwrap(), arr1(&[7, 5, 7]));
        assert_eq!(v.select(&[3]).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        let m = arr2(&[[1, 0], [0, 1], [1, 1]]);
        assert_eq!(v.vec_mat(&m).unwrap(), arr1(&[12, 13]));
        assert_eq!(arr1(&[1, 2]).outer(&arr1(&[3, 4, 5])), arr2(&[[3, 4, 5], [6, 8, 10]]));
        assert_eq!(v.to_vec(), vec![5, 6, 7]);
    }
}
