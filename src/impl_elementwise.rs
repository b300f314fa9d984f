// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Elementwise arithmetic into a pre-sized destination.
//!
//! Every method here writes its result into `self`, which must already
//! have the shape of the operands. Shape disagreements are reported as
//! `SizeMismatch` before any element is written.

use std::ops::Neg;

use crate::error::ArrayError;
use crate::iterators::{Iter, IterMut};
use crate::{Array, ArrayBase, Data, DataMut, Dimension, Element};

#[inline]
fn min_of<A: PartialOrd>(a: A, b: A) -> A
{
    if b < a {
        b
    } else {
        a
    }
}

#[inline]
fn max_of<A: PartialOrd>(a: A, b: A) -> A
{
    if b > a {
        b
    } else {
        a
    }
}

macro_rules! impl_binary_family {
    ($of:ident, $of_scalar:ident, $scalar_of:ident, $f:expr, $doc:expr) => {
        #[doc = concat!("Store the elementwise ", $doc, " of `lhs` and `rhs` in `self`.")]
        ///
        /// **Errors** with `SizeMismatch` unless all three shapes agree.
        pub fn $of<S2, S3>(&mut self, lhs: &ArrayBase<S2, D>, rhs: &ArrayBase<S3, D>) -> Result<(), ArrayError>
        where
            S2: Data<Elem = A>,
            S3: Data<Elem = A>,
        {
            self.zip3_with(lhs, rhs, $f)
        }

        #[doc = concat!("Store the elementwise ", $doc, " of `lhs` and the scalar `rhs` in `self`.")]
        ///
        /// **Errors** with `SizeMismatch` if the shapes disagree.
        pub fn $of_scalar<S2>(&mut self, lhs: &ArrayBase<S2, D>, rhs: A) -> Result<(), ArrayError>
        where S2: Data<Elem = A>
        {
            let f = $f;
            self.zip_mut_with(lhs, |out, &x| *out = f(x, rhs))
        }

        #[doc = concat!("Store the elementwise ", $doc, " of the scalar `lhs` and `rhs` in `self`.")]
        ///
        /// **Errors** with `SizeMismatch` if the shapes disagree.
        pub fn $scalar_of<S2>(&mut self, lhs: A, rhs: &ArrayBase<S2, D>) -> Result<(), ArrayError>
        where S2: Data<Elem = A>
        {
            let f = $f;
            self.zip_mut_with(rhs, |out, &x| *out = f(lhs, x))
        }
    };
}

/// # Elementwise Arithmetic
impl<A, S, D> ArrayBase<S, D>
where
    A: Element,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    /// Walk `self`, `lhs` and `rhs` in the same order, writing `f(l, r)`.
    fn zip3_with<S2, S3, F>(&mut self, lhs: &ArrayBase<S2, D>, rhs: &ArrayBase<S3, D>, f: F) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        S3: Data<Elem = A>,
        F: Fn(A, A) -> A,
    {
        lhs.check_same_shape(rhs)?;
        self.check_same_shape(lhs)?;
        let order = self.storage_order();
        let outs = IterMut::new(self.view_mut(), order);
        let pairs = Iter::new(lhs.view(), order).zip(Iter::new(rhs.view(), order));
        for (out, (&l, &r)) in outs.zip(pairs) {
            *out = f(l, r);
        }
        Ok(())
    }

    impl_binary_family!(sum_of, sum_of_scalar, scalar_sum_of, |a: A, b: A| a + b, "sum");
    impl_binary_family!(difference_of, difference_of_scalar, scalar_difference_of, |a: A, b: A| a - b, "difference");
    impl_binary_family!(
        elementwise_product_of,
        elementwise_product_of_scalar,
        scalar_elementwise_product_of,
        |a: A, b: A| a * b,
        "product"
    );
    impl_binary_family!(
        elementwise_ratio_of,
        elementwise_ratio_of_scalar,
        scalar_elementwise_ratio_of,
        |a: A, b: A| a / b,
        "ratio"
    );
    impl_binary_family!(
        elementwise_min_of,
        elementwise_min_of_scalar,
        scalar_elementwise_min_of,
        min_of::<A>,
        "minimum"
    );
    impl_binary_family!(
        elementwise_max_of,
        elementwise_max_of_scalar,
        scalar_elementwise_max_of,
        max_of::<A>,
        "maximum"
    );

    /// Replace every element by the smaller of itself and the element of
    /// `rhs` at the same index.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn elementwise_min_with<S2>(&mut self, rhs: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        self.zip_mut_with(rhs, |x, &y| *x = min_of(*x, y))
    }

    /// Replace every element by the larger of itself and the element of
    /// `rhs` at the same index.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn elementwise_max_with<S2>(&mut self, rhs: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        self.zip_mut_with(rhs, |x, &y| *x = max_of(*x, y))
    }

    /// Set every element greater than `upper` to `upper`.
    pub fn clip_above(&mut self, upper: A)
    {
        self.mapv_inplace(|x| min_of(x, upper));
    }

    /// Set every element less than `lower` to `lower`.
    pub fn clip_below(&mut self, lower: A)
    {
        self.mapv_inplace(|x| max_of(x, lower));
    }

    /// Replace every element by its absolute value.
    pub fn abs_self(&mut self)
    {
        self.mapv_inplace(A::abs);
    }

    /// Store the absolute values of `src` in `self`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn abs_of<S2>(&mut self, src: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        self.zip_mut_with(src, |x, &y| *x = y.abs())
    }

    /// Round every element down.
    pub fn floor_self(&mut self)
    {
        self.mapv_inplace(A::floor);
    }

    /// Store the rounded down elements of `src` in `self`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn floor_of<S2>(&mut self, src: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        self.zip_mut_with(src, |x, &y| *x = y.floor())
    }

    /// Round every element up.
    pub fn ceil_self(&mut self)
    {
        self.mapv_inplace(A::ceil);
    }

    /// Store the rounded up elements of `src` in `self`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn ceil_of<S2>(&mut self, src: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        self.zip_mut_with(src, |x, &y| *x = y.ceil())
    }

    /// Negate every element.
    pub fn negation_self(&mut self)
    where A: Neg<Output = A>
    {
        self.mapv_inplace(A::neg);
    }

    /// Store the negated elements of `src` in `self`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn negation_of<S2>(&mut self, src: &ArrayBase<S2, D>) -> Result<(), ArrayError>
    where
        S2: Data<Elem = A>,
        A: Neg<Output = A>,
    {
        self.zip_mut_with(src, |x, &y| *x = -y)
    }
}

/// # Elementwise Arithmetic Into New Containers
impl<A, S, D> ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Return the elementwise minimum of `self` and `rhs`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    ///
    /// ```
    /// use ndcontainer::arr1;
    ///
    /// let a = arr1(&[1, 5, 3]);
    /// let b = arr1(&[4, 2, 3]);
    /// assert_eq!(a.elementwise_min(&b).unwrap(), arr1(&[1, 2, 3]));
    /// assert_eq!(a.elementwise_max(&b).unwrap(), arr1(&[4, 5, 3]));
    /// ```
    pub fn elementwise_min<S2>(&self, rhs: &ArrayBase<S2, D>) -> Result<Array<A, D>, ArrayError>
    where S2: Data<Elem = A>
    {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map_same_shape(rhs, |&a, &b| min_of(a, b)))
    }

    /// Return the elementwise maximum of `self` and `rhs`.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn elementwise_max<S2>(&self, rhs: &ArrayBase<S2, D>) -> Result<Array<A, D>, ArrayError>
    where S2: Data<Elem = A>
    {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map_same_shape(rhs, |&a, &b| max_of(a, b)))
    }

    /// Return a copy with every element greater than `upper` replaced by
    /// `upper`.
    pub fn clipped_above(&self, upper: A) -> Array<A, D>
    {
        self.mapv(|x| min_of(x, upper))
    }

    /// Return a copy with every element less than `lower` replaced by
    /// `lower`.
    pub fn clipped_below(&self, lower: A) -> Array<A, D>
    {
        self.mapv(|x| max_of(x, lower))
    }

    /// Return the elementwise absolute values.
    pub fn abs(&self) -> Array<A, D>
    {
        self.mapv(A::abs)
    }

    /// Return the elementwise negation.
    pub fn negation(&self) -> Array<A, D>
    where A: Neg<Output = A>
    {
        self.mapv(A::neg)
    }

    pub fn floor(&self) -> Array<A, D>
    {
        self.mapv(A::floor)
    }

    pub fn ceil(&self) -> Array<A, D>
    {
        self.mapv(A::ceil)
    }
}

#[cfg(test)]
mod tests
{
    use crate::{arr1, arr2, Array, Array1, Array2, ErrorKind, ShapeBuilder};

    #[test]
    fn destination_must_be_presized()
    {
        let a = arr1(&[1., 2.]);
        let b = arr1(&[3., 5.]);
        let mut out = Array1::zeros(2);
        out.sum_of(&a, &b).unwrap();
        assert_eq!(out, arr1(&[4., 7.]));
        out.difference_of(&a, &b).unwrap();
        assert_eq!(out, arr1(&[-2., -3.]));
        out.elementwise_ratio_of(&b, &a).unwrap();
        assert_eq!(out, arr1(&[3., 2.5]));

        let mut short = Array1::zeros(1);
        assert_eq!(short.sum_of(&a, &b).unwrap_err().kind(), ErrorKind::SizeMismatch);
        assert_eq!(out.sum_of(&a, &short).unwrap_err().kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn scalar_operand_order()
    {
        let a = arr1(&[2, 4, 8]);
        let mut out = Array1::zeros(3);
        out.difference_of_scalar(&a, 1).unwrap();
        assert_eq!(out, arr1(&[1, 3, 7]));
        out.scalar_difference_of(1, &a).unwrap();
        assert_eq!(out, arr1(&[-1, -3, -7]));
        out.scalar_elementwise_ratio_of(16, &a).unwrap();
        assert_eq!(out, arr1(&[8, 4, 2]));
        out.elementwise_max_of_scalar(&a, 3).unwrap();
        assert_eq!(out, arr1(&[3, 4, 8]));
    }

    #[test]
    fn mixed_storage_orders()
    {
        let a = arr2(&[[1, 2], [3, 4]]);
        let b = Array::from_shape_vec((2, 2).f(), vec![4, 3, 2, 1]).unwrap();
        let mut out = Array2::zeros((2, 2).f());
        out.elementwise_product_of(&a, &b).unwrap();
        assert_eq!(out, arr2(&[[4, 4], [9, 4]]));
        out.elementwise_min_with(&a).unwrap();
        assert_eq!(out, arr2(&[[1, 2], [3, 4]]));
    }

    #[test]
    fn unary_forms()
    {
        let a = arr1(&[-1.5, 0.25, 2.]);
        assert_eq!(a.abs(), arr1(&[1.5, 0.25, 2.]));
        assert_eq!(a.floor(), arr1(&[-2., 0., 2.]));
        assert_eq!(a.ceil(), arr1(&[-1., 1., 2.]));
        assert_eq!(a.negation(), arr1(&[1.5, -0.25, -2.]));

        let mut b = a.clone();
        b.abs_self();
        assert_eq!(b, a.abs());
        b.negation_of(&a).unwrap();
        assert_eq!(b, -&a);
        b.ceil_self();
        assert_eq!(b, arr1(&[2., -0., -2.]));
    }

    #[test]
    fn clipping()
    {
        let mut a = arr1(&[-3, 0, 7]);
        assert_eq!(a.clipped_above(2), arr1(&[-3, 0, 2]));
        assert_eq!(a.clipped_below(-1), arr1(&[-1, 0, 7]));
        a.clip_above(5);
        a.clip_below(0);
        assert_eq!(a, arr1(&[0, 0, 5]));
    }
}
