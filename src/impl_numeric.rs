// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reductions and structural queries over all elements.

use crate::numeric_util;
use crate::{Array, ArrayBase, Data, DataMut, Dimension, Element};

/// # Numerical Methods for Containers
impl<A, S, D> ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Return the sum of all elements in the container; zero when empty.
    ///
    /// ```
    /// use ndcontainer::arr2;
    ///
    /// let a = arr2(&[[1., 2.],
    ///                [3., 4.]]);
    /// assert_eq!(a.sum(), 10.);
    /// ```
    pub fn sum(&self) -> A
    {
        if let Some(slc) = self.as_slice_memory_order() {
            return numeric_util::unrolled_fold(slc, A::zero, A::add);
        }
        self.iter().fold(A::zero(), |acc, &x| acc + x)
    }

    /// Return the product of all elements in the container; one when empty.
    pub fn product(&self) -> A
    {
        if let Some(slc) = self.as_slice_memory_order() {
            return numeric_util::unrolled_fold(slc, A::one, A::mul);
        }
        self.iter().fold(A::one(), |acc, &x| acc * x)
    }

    /// Return the sum of the absolute values (the L1 norm).
    pub fn l1_norm(&self) -> A
    {
        self.iter().fold(A::zero(), |acc, &x| acc + x.abs())
    }

    /// Return the largest absolute value (the L-infinity norm); zero when
    /// empty.
    pub fn linf_norm(&self) -> A
    {
        self.max_abs_element().unwrap_or_else(A::zero)
    }

    /// Return the sum of squares, accumulated in `f64`.
    pub fn norm_square(&self) -> f64
    {
        self.iter().fold(0., |acc, &x| {
            let x = x.as_f64();
            acc + x * x
        })
    }

    /// Return the Euclidean norm, computed in `f64` for every element type.
    pub fn norm(&self) -> f64
    {
        self.norm_square().sqrt()
    }

    /// Return the largest element, or `None` if the container is empty.
    ///
    /// NaN elements are skipped unless every element is NaN.
    pub fn max_element(&self) -> Option<A>
    {
        self.min_and_max().map(|(_, max)| max)
    }

    /// Return the smallest element, or `None` if the container is empty.
    pub fn min_element(&self) -> Option<A>
    {
        self.min_and_max().map(|(min, _)| min)
    }

    /// Return the largest absolute value, or `None` if the container is
    /// empty.
    pub fn max_abs_element(&self) -> Option<A>
    {
        fold_extreme(self.iter().map(|x| x.abs()), |x, best| x > best)
    }

    /// Return the smallest absolute value, or `None` if the container is
    /// empty.
    pub fn min_abs_element(&self) -> Option<A>
    {
        fold_extreme(self.iter().map(|x| x.abs()), |x, best| x < best)
    }

    /// Return the smallest and the largest element, found in a single
    /// pass, or `None` if the container is empty.
    pub fn min_and_max(&self) -> Option<(A, A)>
    {
        let mut iter = self.iter().cloned();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(min, max), x| {
            let min = if x < min || min.is_nan() { x } else { min };
            let max = if x > max || max.is_nan() { x } else { max };
            (min, max)
        }))
    }

    /// Return `true` if no element is negative.
    pub fn is_non_negative(&self) -> bool
    {
        self.iter().all(|&x| x >= A::zero())
    }

    /// Return `true` if no element is positive.
    pub fn is_non_positive(&self) -> bool
    {
        self.iter().all(|&x| x <= A::zero())
    }

    /// Return `true` if every element is negative.
    pub fn is_negative(&self) -> bool
    {
        self.iter().all(|&x| x < A::zero())
    }

    /// Return `true` if every element is positive.
    pub fn is_positive(&self) -> bool
    {
        self.iter().all(|&x| x > A::zero())
    }

    /// Return `true` if any element is NaN.
    pub fn has_nan(&self) -> bool
    {
        A::HAS_NAN && self.iter().any(|x| x.is_nan())
    }

    /// Return `true` if every element is finite.
    pub fn is_finite(&self) -> bool
    {
        !A::HAS_NAN || self.iter().all(|x| x.is_finite())
    }

    /// Return `true` if the norm is within `tolerance` of one.
    pub fn is_normalized(&self, tolerance: A) -> bool
    {
        (self.norm() - 1.).abs() <= tolerance.as_f64()
    }

    /// Return a copy divided by its norm.
    ///
    /// Integer element types truncate toward zero. A container with norm
    /// zero gives non-finite floats (or zeros for integers).
    pub fn normalized(&self) -> Array<A, D>
    {
        let mut a = self.to_owned();
        a.normalize();
        a
    }
}

impl<A, S, D> ArrayBase<S, D>
where
    A: Element,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    /// Divide every element by the norm, in place.
    pub fn normalize(&mut self)
    {
        let norm = self.norm();
        self.map_inplace(|x| *x = A::from_f64(x.as_f64() / norm));
    }
}

/// Keep the value for which `better(x, best)` holds, starting from the
/// first. A NaN start is replaced by the first comparable value.
fn fold_extreme<A, I, F>(mut iter: I, better: F) -> Option<A>
where
    A: Element,
    I: Iterator<Item = A>,
    F: Fn(A, A) -> bool,
{
    let first = iter.next()?;
    Some(iter.fold(first, |best, x| if better(x, best) || best.is_nan() { x } else { best }))
}

#[cfg(test)]
mod tests
{
    use crate::{arr1, arr2, Array1, Array2};

    #[test]
    fn reductions()
    {
        let a = arr2(&[[1., -2.], [3., -4.]]);
        assert_eq!(a.sum(), -2.);
        assert_eq!(a.product(), 24.);
        assert_eq!(a.l1_norm(), 10.);
        assert_eq!(a.linf_norm(), 4.);
        assert_eq!(a.norm_square(), 30.);
        assert_eq!(a.min_and_max(), Some((-4., 3.)));
        assert_eq!(a.min_abs_element(), Some(1.));
        assert_eq!(a.t().max_element(), Some(3.));
    }

    #[test]
    fn empty_reductions_give_identities()
    {
        let e = Array2::<i32>::zeros((0, 5));
        assert_eq!(e.sum(), 0);
        assert_eq!(e.product(), 1);
        assert_eq!(e.max_element(), None);
        assert_eq!(e.min_and_max(), None);
        assert_eq!(e.norm(), 0.);
    }

    #[test]
    fn predicates()
    {
        let a = arr1(&[0, 1, 2]);
        assert!(a.is_non_negative());
        assert!(!a.is_positive());
        assert!(arr1(&[-1, -2]).is_negative());
        assert!(arr1(&[f64::NAN, 1.]).has_nan());
        assert!(!arr1(&[f64::INFINITY]).is_finite());
        assert!(arr1(&[i8::MAX]).is_finite());
    }

    #[test]
    fn normalization()
    {
        let mut v = arr1(&[3.0f32, 4.]);
        assert!(!v.is_normalized(1e-6));
        let n = v.normalized();
        assert!(n.is_normalized(1e-6));
        v.normalize();
        assert_eq!(v, n);
        let ones = Array1::<f64>::ones(16);
        assert_eq!(ones.norm(), 4.);
    }
}
