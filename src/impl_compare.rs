// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Elementwise relational comparisons.

use crate::error::ArrayError;
use crate::{Array, ArrayBase, Data, Dimension, Element};

/// An elementwise relation between two values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Relation
{
    Equal,
    NotEqual,
    Lesser,
    LesserOrEqual,
    Greater,
    GreaterOrEqual,
}

impl Relation
{
    /// Return `true` if `a` relates to `b` by this relation.
    #[inline]
    pub fn holds<A: PartialOrd>(self, a: &A, b: &A) -> bool
    {
        match self {
            Relation::Equal => a == b,
            Relation::NotEqual => a != b,
            Relation::Lesser => a < b,
            Relation::LesserOrEqual => a <= b,
            Relation::Greater => a > b,
            Relation::GreaterOrEqual => a >= b,
        }
    }
}

/// # Comparisons
impl<A, S, D> ArrayBase<S, D>
where
    A: Element,
    S: Data<Elem = A>,
    D: Dimension,
{
    /// Return `true` if every element of `self` relates to the element of
    /// `rhs` at the same index. An empty container satisfies any relation.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    ///
    /// ```
    /// use ndcontainer::{arr1, Relation};
    ///
    /// let a = arr1(&[1, 2, 3]);
    /// let b = arr1(&[1, 5, 4]);
    /// assert!(a.all_satisfy(Relation::LesserOrEqual, &b).unwrap());
    /// assert!(!a.all_satisfy(Relation::Lesser, &b).unwrap());
    /// assert!(a.any_satisfy(Relation::Lesser, &b).unwrap());
    /// ```
    pub fn all_satisfy<S2>(&self, relation: Relation, rhs: &ArrayBase<S2, D>) -> Result<bool, ArrayError>
    where S2: Data<Elem = A>
    {
        self.check_same_shape(rhs)?;
        Ok(self
            .iter_logical()
            .zip(rhs.iter_logical())
            .all(|(a, b)| relation.holds(a, b)))
    }

    /// Return `true` if some element of `self` relates to the element of
    /// `rhs` at the same index.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn any_satisfy<S2>(&self, relation: Relation, rhs: &ArrayBase<S2, D>) -> Result<bool, ArrayError>
    where S2: Data<Elem = A>
    {
        self.check_same_shape(rhs)?;
        Ok(self
            .iter_logical()
            .zip(rhs.iter_logical())
            .any(|(a, b)| relation.holds(a, b)))
    }

    /// Return `true` if every element relates to `scalar`.
    pub fn all_satisfy_scalar(&self, relation: Relation, scalar: A) -> bool
    {
        self.iter().all(|a| relation.holds(a, &scalar))
    }

    /// Return `true` if some element relates to `scalar`.
    pub fn any_satisfy_scalar(&self, relation: Relation, scalar: A) -> bool
    {
        self.iter().any(|a| relation.holds(a, &scalar))
    }

    /// Return a boolean container of the same shape holding the relation
    /// of each pair of elements.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    pub fn elementwise_compare<S2>(&self, relation: Relation, rhs: &ArrayBase<S2, D>) -> Result<Array<bool, D>, ArrayError>
    where S2: Data<Elem = A>
    {
        self.check_same_shape(rhs)?;
        Ok(self.zip_map_same_shape(rhs, |a, b| relation.holds(a, b)))
    }

    /// Return a boolean container holding the relation of each element
    /// to `scalar`.
    pub fn elementwise_compare_scalar(&self, relation: Relation, scalar: A) -> Array<bool, D>
    {
        self.map(|a| relation.holds(a, &scalar))
    }

    /// Shorthand for `elementwise_compare(Relation::Equal, rhs)`.
    pub fn elementwise_equal<S2>(&self, rhs: &ArrayBase<S2, D>) -> Result<Array<bool, D>, ArrayError>
    where S2: Data<Elem = A>
    {
        self.elementwise_compare(Relation::Equal, rhs)
    }

    /// Return `true` if the shapes agree and every pair of elements
    /// differs by at most `tolerance`.
    ///
    /// ```
    /// use ndcontainer::arr1;
    ///
    /// let a = arr1(&[1.0, 2.0]);
    /// assert!(a.almost_equal(&arr1(&[1.001, 1.999]), 0.01));
    /// assert!(!a.almost_equal(&arr1(&[1.1, 2.0]), 0.01));
    /// assert!(!a.almost_equal(&arr1(&[1.0]), 0.01));
    /// ```
    pub fn almost_equal<S2>(&self, rhs: &ArrayBase<S2, D>, tolerance: A) -> bool
    where S2: Data<Elem = A>
    {
        self.shape() == rhs.shape()
            && self.iter_logical().zip(rhs.iter_logical()).all(|(&a, &b)| {
                let diff = if a > b { a - b } else { b - a };
                diff <= tolerance
            })
    }

    /// `almost_equal` with the element type's default tolerance.
    pub fn almost_equal_default<S2>(&self, rhs: &ArrayBase<S2, D>) -> bool
    where S2: Data<Elem = A>
    {
        self.almost_equal(rhs, A::TOLERANCE)
    }
}

#[cfg(test)]
mod tests
{
    use super::Relation;
    use crate::{arr1, arr2, Array, ErrorKind, ShapeBuilder};

    #[test]
    fn boolean_container()
    {
        let a = arr2(&[[1, 5], [3, 4]]);
        // column major storage, logically [[2, 5], [3, 4]]
        let b = Array::from_shape_vec((2, 2).f(), vec![2, 3, 5, 4]).unwrap();
        let lt = a.elementwise_compare(Relation::Lesser, &b).unwrap();
        assert_eq!(lt, arr2(&[[true, false], [false, false]]));
        let eq = a.elementwise_equal(&b).unwrap();
        assert_eq!(eq, arr2(&[[false, true], [true, true]]));
        let ne = a.elementwise_compare(Relation::NotEqual, &b).unwrap();
        assert_eq!(ne, arr2(&[[true, false], [false, false]]));
        let ge = a.elementwise_compare_scalar(Relation::GreaterOrEqual, 4);
        assert_eq!(ge, arr2(&[[false, true], [false, true]]));
    }

    #[test]
    fn aggregates_and_mismatch()
    {
        let a = arr1(&[1., 2.]);
        assert!(a.all_satisfy_scalar(Relation::Greater, 0.));
        assert!(!a.any_satisfy_scalar(Relation::Equal, 3.));
        let err = a.all_satisfy(Relation::Equal, &arr1(&[1.])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn integer_almost_equal_is_exact()
    {
        let a = arr1(&[u8::MAX, 0]);
        assert!(a.almost_equal_default(&a.view()));
        assert!(!a.almost_equal_default(&arr1(&[u8::MAX, 1])));
        assert!(a.almost_equal(&arr1(&[u8::MAX - 1, 1]), 1));
    }
}
