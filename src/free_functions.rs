// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::{Array1, Array2, Array3, ArrayView1, ArrayView2, ArrayViewMut1, Ix2};

/// Create a one-dimensional container with elements from `xs`.
///
/// ```
/// use ndcontainer::arr1;
///
/// assert!(arr1(&[1, 2, 3, 4, 5, 6]).shape() == [6]);
/// ```
pub fn arr1<A: Clone>(xs: &[A]) -> Array1<A>
{
    Array1::from_vec(xs.to_vec())
}

/// Create a two-dimensional container with elements from `xs`.
///
/// ```
/// use ndcontainer::arr2;
///
/// let a = arr2(&[[1, 2, 3],
///                [4, 5, 6]]);
/// assert!(a.shape() == [2, 3]);
/// ```
pub fn arr2<A: Clone, const N: usize>(xs: &[[A; N]]) -> Array2<A>
{
    let v: Vec<A> = xs.iter().flat_map(|row| row.iter().cloned()).collect();
    // cannot fail: v holds exactly rows * N elements
    unsafe { Array2::from_shape_vec_unchecked((xs.len(), N), v) }
}

/// Create a three-dimensional container with elements from `xs`.
///
/// ```
/// use ndcontainer::arr3;
///
/// let a = arr3(&[[[1, 2], [3, 4]],
///                [[5, 6], [7, 8]],
///                [[9, 0], [1, 2]]]);
/// assert!(a.shape() == [3, 2, 2]);
/// ```
pub fn arr3<A: Clone, const N: usize, const M: usize>(xs: &[[[A; M]; N]]) -> Array3<A>
{
    let v: Vec<A> = xs
        .iter()
        .flat_map(|plane| plane.iter().flat_map(|row| row.iter().cloned()))
        .collect();
    unsafe { Array3::from_shape_vec_unchecked((xs.len(), N, M), v) }
}

/// Create a one-dimensional container view with elements borrowing `xs`.
pub fn aview1<A>(xs: &[A]) -> ArrayView1<'_, A>
{
    ArrayView1::from(xs)
}

/// Create a one-dimensional read-write view with elements borrowing `xs`.
pub fn aview_mut1<A>(xs: &mut [A]) -> ArrayViewMut1<'_, A>
{
    ArrayViewMut1::from(xs)
}

/// Create a two-dimensional container view with elements borrowing `xs`.
///
/// ```
/// use ndcontainer::aview2;
///
/// let data = [[1., 2.], [3., 4.]];
/// let v = aview2(&data);
/// assert_eq!(v[[1, 0]], 3.);
/// ```
pub fn aview2<A, const N: usize>(xs: &[[A; N]]) -> ArrayView2<'_, A>
{
    let rows = xs.len();
    let dim = Ix2::new([rows, N]);
    let strides = if rows == 0 || N == 0 { Ix2::new([0, 0]) } else { Ix2::new([N, 1]) };
    unsafe { ArrayView2::new_(xs.as_ptr() as *const A, dim, strides) }
}
