// Copyright 2016-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;
use std::ops::{Index, IndexMut};

use super::Dimension;
use crate::Ix;

/// Dimension description.
///
/// `Dim` holds the length of each axis of a container with `N` axes. It is
/// also used as a multi-index and to store strides.
///
/// Containers are usually created from a tuple, which is converted to `Dim`
/// by the constructor:
///
/// ```
/// use ndcontainer::{Array2, Dim};
///
/// let mut m = Array2::<f64>::zeros((3, 2));
/// m[[0, 0]] = 1.;
/// assert_eq!(m.raw_dim(), Dim::new([3, 2]));
/// ```
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Dim<const N: usize>([Ix; N]);

impl<const N: usize> Dim<N>
{
    /// Create a dimension value from the axis lengths.
    #[inline(always)]
    pub const fn new(index: [Ix; N]) -> Self
    {
        Dim(index)
    }

    #[inline(always)]
    pub(crate) fn ix(&self) -> &[Ix; N]
    {
        &self.0
    }

    #[inline(always)]
    pub(crate) fn ixm(&mut self) -> &mut [Ix; N]
    {
        &mut self.0
    }

    /// Return the axis lengths as an array.
    #[inline]
    pub fn into_array(self) -> [Ix; N]
    {
        self.0
    }
}

impl<const N: usize> Default for Dim<N>
{
    fn default() -> Self
    {
        Dim([0; N])
    }
}

impl<const N: usize> PartialEq<[Ix; N]> for Dim<N>
{
    fn eq(&self, rhs: &[Ix; N]) -> bool
    {
        self.0 == *rhs
    }
}

impl<const N: usize> fmt::Debug for Dim<N>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{:?}", self.0)
    }
}

impl<const N: usize> Index<usize> for Dim<N>
{
    type Output = Ix;
    #[inline(always)]
    fn index(&self, index: usize) -> &Ix
    {
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Dim<N>
{
    #[inline(always)]
    fn index_mut(&mut self, index: usize) -> &mut Ix
    {
        &mut self.0[index]
    }
}

/// Argument conversion into a dimension value.
///
/// Implemented for `usize`, tuples and arrays of `usize`, and the
/// dimension types themselves.
pub trait IntoDimension
{
    type Dim: Dimension;
    fn into_dimension(self) -> Self::Dim;
}

impl<D> IntoDimension for D
where D: Dimension
{
    type Dim = D;
    #[inline(always)]
    fn into_dimension(self) -> Self
    {
        self
    }
}

impl IntoDimension for Ix
{
    type Dim = Dim<1>;
    #[inline(always)]
    fn into_dimension(self) -> Dim<1>
    {
        Dim([self])
    }
}

macro_rules! tuple_into_dim {
    (@ix $ix:ident) => { Ix };
    ($n:expr; $($ix:ident),+) => {
        impl IntoDimension for [Ix; $n]
        {
            type Dim = Dim<$n>;
            #[inline(always)]
            fn into_dimension(self) -> Dim<$n>
            {
                Dim(self)
            }
        }

        impl IntoDimension for ($(tuple_into_dim!(@ix $ix),)+)
        {
            type Dim = Dim<$n>;
            #[inline(always)]
            #[allow(non_snake_case)]
            fn into_dimension(self) -> Dim<$n>
            {
                let ($($ix,)+) = self;
                Dim([$($ix),+])
            }
        }
    };
}

tuple_into_dim!(1; a);
tuple_into_dim!(2; a, b);
tuple_into_dim!(3; a, b, c);
tuple_into_dim!(4; a, b, c, d);
tuple_into_dim!(5; a, b, c, d, e);
tuple_into_dim!(6; a, b, c, d, e, f);
