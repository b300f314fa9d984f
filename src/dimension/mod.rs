// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Axis lengths, strides and the index arithmetic that maps a multi-index
//! to a memory offset.

use std::fmt::Debug;
use std::hash::Hash;
use std::ops::IndexMut;

use crate::{Ix, Ixs};

pub use self::axis::Axis;
pub use self::dim::{Dim, IntoDimension};

mod axis;
mod dim;

/// One axis.
pub type Ix1 = Dim<1>;
/// Two axes: rows and columns.
pub type Ix2 = Dim<2>;
pub type Ix3 = Dim<3>;
pub type Ix4 = Dim<4>;
pub type Ix5 = Dim<5>;
pub type Ix6 = Dim<6>;

/// Calculate offset from `Ix` stride converting sign properly
#[inline(always)]
pub fn stride_offset(n: Ix, stride: Ix) -> isize
{
    (n as isize) * (stride as Ixs)
}

/// Container shape and index trait.
///
/// This trait defines a number of methods and operations that can be used on
/// dimensions and indices. It is implemented for `Dim<N>` with one to six
/// axes.
///
/// ***Note:*** *This trait can not be implemented outside the crate*
pub trait Dimension:
    Clone + Eq + Debug + Hash + Send + Sync + Default + IndexMut<usize, Output = Ix> + 'static
{
    /// Number of axes.
    const NDIM: usize;

    /// Pattern matching friendly form of the dimension value.
    ///
    /// - For `Ix1`: `usize`,
    /// - For `Ix2`: `(usize, usize)`
    /// - and so on..
    type Pattern: IntoDimension<Dim = Self> + Clone + Debug + PartialEq + Eq;

    /// Returns the number of dimensions (number of axes).
    #[inline(always)]
    fn ndim(&self) -> usize
    {
        Self::NDIM
    }

    /// Convert the dimension into a pattern matching friendly value.
    fn into_pattern(self) -> Self::Pattern;

    /// Compute the size of the dimension (number of elements)
    fn size(&self) -> usize
    {
        self.slice().iter().product()
    }

    /// Compute the size while checking for overflow.
    fn size_checked(&self) -> Option<usize>
    {
        self.slice()
            .iter()
            .try_fold(1_usize, |s, &a| s.checked_mul(a))
    }

    #[doc(hidden)]
    fn slice(&self) -> &[Ix];

    #[doc(hidden)]
    fn slice_mut(&mut self) -> &mut [Ix];

    /// Compute the row-major strides for this shape.
    ///
    /// Shape (a, b, c) gives strides (b * c, c, 1). An empty shape has all
    /// strides zero.
    #[doc(hidden)]
    fn default_strides(&self) -> Self
    {
        let mut strides = Self::default();
        if self.slice().iter().all(|&d| d != 0) {
            let mut cum_prod = 1;
            for (rs, &dim) in strides.slice_mut().iter_mut().zip(self.slice()).rev() {
                *rs = cum_prod;
                cum_prod *= dim;
            }
        }
        strides
    }

    /// Compute the column-major strides for this shape.
    ///
    /// Shape (a, b, c) gives strides (1, a, a * b).
    #[doc(hidden)]
    fn fortran_strides(&self) -> Self
    {
        let mut strides = Self::default();
        if self.slice().iter().all(|&d| d != 0) {
            let mut cum_prod = 1;
            for (rs, &dim) in strides.slice_mut().iter_mut().zip(self.slice()) {
                *rs = cum_prod;
                cum_prod *= dim;
            }
        }
        strides
    }

    #[doc(hidden)]
    #[inline]
    fn first_index(&self) -> Option<Self>
    {
        if self.slice().contains(&0) {
            None
        } else {
            Some(Self::default())
        }
    }

    /// Use self as shape and return the row-major successor of `index`, or
    /// `None` after the last index.
    #[doc(hidden)]
    #[inline]
    fn next_for(&self, mut index: Self) -> Option<Self>
    {
        for (&dim, ix) in self.slice().iter().zip(index.slice_mut()).rev() {
            *ix += 1;
            if *ix == dim {
                *ix = 0;
            } else {
                return Some(index);
            }
        }
        None
    }

    /// Column-major successor of `index`.
    #[doc(hidden)]
    #[inline]
    fn next_for_f(&self, mut index: Self) -> Option<Self>
    {
        for (&dim, ix) in self.slice().iter().zip(index.slice_mut()) {
            *ix += 1;
            if *ix == dim {
                *ix = 0;
            } else {
                return Some(index);
            }
        }
        None
    }

    /// Return stride offset for index.
    #[doc(hidden)]
    fn stride_offset(index: &Self, strides: &Self) -> isize
    {
        let mut offset = 0;
        for (&i, &s) in index.slice().iter().zip(strides.slice()) {
            offset += stride_offset(i, s);
        }
        offset
    }

    /// Return stride offset for this dimension and index, or `None` if the
    /// index is out of bounds.
    #[doc(hidden)]
    fn stride_offset_checked(&self, strides: &Self, index: &Self) -> Option<isize>
    {
        let mut offset = 0;
        for ((&d, &i), &s) in self.slice().iter().zip(index.slice()).zip(strides.slice()) {
            if i >= d {
                return None;
            }
            offset += stride_offset(i, s);
        }
        Some(offset)
    }
}

macro_rules! impl_dimension {
    ($n:expr, $pattern:ty, |$d:ident| $into:expr) => {
        impl Dimension for Dim<$n>
        {
            const NDIM: usize = $n;
            type Pattern = $pattern;

            #[inline]
            fn into_pattern(self) -> Self::Pattern
            {
                let $d = self.into_array();
                $into
            }
            #[inline(always)]
            fn slice(&self) -> &[Ix]
            {
                self.ix()
            }
            #[inline(always)]
            fn slice_mut(&mut self) -> &mut [Ix]
            {
                self.ixm()
            }
        }
    };
}

impl_dimension!(1, Ix, |d| d[0]);
impl_dimension!(2, (Ix, Ix), |d| (d[0], d[1]));
impl_dimension!(3, (Ix, Ix, Ix), |d| (d[0], d[1], d[2]));
impl_dimension!(4, (Ix, Ix, Ix, Ix), |d| (d[0], d[1], d[2], d[3]));
impl_dimension!(5, (Ix, Ix, Ix, Ix, Ix), |d| (d[0], d[1], d[2], d[3], d[4]));
impl_dimension!(6, (Ix, Ix, Ix, Ix, Ix, Ix), |d| (d[0], d[1], d[2], d[3], d[4], d[5]));

/// Dimensions from which one axis can be removed, giving a smaller dimension.
pub trait RemoveAxis: Dimension
{
    type Smaller: Dimension;
    fn remove_axis(&self, axis: Axis) -> Self::Smaller;
}

macro_rules! impl_remove_axis {
    ($($n:expr => $m:expr),*) => {
        $(
        impl RemoveAxis for Dim<$n>
        {
            type Smaller = Dim<$m>;
            #[inline]
            fn remove_axis(&self, axis: Axis) -> Dim<$m>
            {
                let mut smaller = Dim::<$m>::default();
                let mut k = 0;
                for (i, &d) in self.slice().iter().enumerate() {
                    if i != axis.index() {
                        smaller[k] = d;
                        k += 1;
                    }
                }
                smaller
            }
        }
        )*
    };
}

impl_remove_axis!(2 => 1, 3 => 2, 4 => 3, 5 => 4, 6 => 5);

/// Return true if the strides are the row-major strides of `dim`.
///
/// Axes of length one are ignored, and an empty shape is always
/// standard, since no element is ever addressed through its strides.
pub(crate) fn is_standard_layout<D: Dimension>(dim: &D, strides: &D) -> bool
{
    if dim.slice().contains(&0) {
        return true;
    }
    let mut contig_stride = 1_isize;
    for (&d, &s) in dim.slice().iter().zip(strides.slice()).rev() {
        if d != 1 && s as isize != contig_stride {
            return false;
        }
        contig_stride *= d as isize;
    }
    true
}

/// Return true if the strides are the column-major strides of `dim`.
pub(crate) fn is_fortran_layout<D: Dimension>(dim: &D, strides: &D) -> bool
{
    if dim.slice().contains(&0) {
        return true;
    }
    let mut contig_stride = 1_isize;
    for (&d, &s) in dim.slice().iter().zip(strides.slice()) {
        if d != 1 && s as isize != contig_stride {
            return false;
        }
        contig_stride *= d as isize;
    }
    true
}

/// Offset from the lowest-address element to the logically first element,
/// which is nonzero when some strides are negative.
pub(crate) fn offset_from_low_addr_ptr_to_logical_ptr<D: Dimension>(dim: &D, strides: &D) -> usize
{
    let offset = dim
        .slice()
        .iter()
        .zip(strides.slice())
        .fold(0, |_offset, (&d, &s)| {
            let s = s as isize;
            if s < 0 && d > 1 {
                _offset - s * (d as isize - 1)
            } else {
                _offset
            }
        });
    debug_assert!(offset >= 0);
    offset as usize
}

/// Lowest and highest element offset (inclusive) addressed by the shape,
/// relative to the logically first element. `None` for an empty shape.
pub(crate) fn memory_span<D: Dimension>(dim: &D, strides: &D) -> Option<(isize, isize)>
{
    if dim.size() == 0 {
        return None;
    }
    let mut low = 0;
    let mut high = 0;
    for (&d, &s) in dim.slice().iter().zip(strides.slice()) {
        let reach = stride_offset(d - 1, s);
        if reach < 0 {
            low += reach;
        } else {
            high += reach;
        }
    }
    Some((low, high))
}

/// Return `true` when the axes in `perm` are a permutation of `0..ndim`.
pub(crate) fn is_axis_permutation(perm: &[usize], ndim: usize) -> bool
{
    if perm.len() != ndim {
        return false;
    }
    let mut seen = [false; 8];
    for &ax in perm {
        if ax >= ndim || seen[ax] {
            return false;
        }
        seen[ax] = true;
    }
    true
}
