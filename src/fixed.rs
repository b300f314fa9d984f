// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Containers with compile-time axis lengths.
//!
//! [`FixedVector`], [`FixedMatrix`] and [`FixedArray3`] store their
//! elements inline, in row major order, so they can live on the stack and
//! be copied by value. They don't reimplement the container engine:
//! [`FixedContainer::view`] and [`FixedContainer::view_mut`] expose the
//! storage as an ordinary [`ArrayView`], and every reduction, comparison
//! and elementwise operation of [`ArrayBase`] runs on it.
//!
//! ```
//! use ndcontainer::{FixedContainer, FixedMatrix, FixedVector};
//!
//! let v = FixedVector([3., 4.]);
//! assert_eq!(v.view().norm(), 5.);
//!
//! let m = FixedMatrix([[1, 2], [3, 4]]);
//! assert_eq!(m.view().t().row(0).to_vec(), vec![1, 3]);
//! assert_eq!(m.mat_vec(&FixedVector([1, 1])), FixedVector([3, 7]));
//! ```
//!
//! The `Ref`/`Mut` wrappers go the other way: they check once that a
//! dynamic view has exactly the fixed shape and then dereference to it.

use std::array;
use std::fmt;
use std::ops::{Add, AddAssign, Deref, DerefMut, Div, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{self, ArrayError};
use crate::{
    Array, ArrayBase, ArrayView, ArrayView1, ArrayView2, ArrayViewMut, ArrayViewMut1, ArrayViewMut2, Data, Dimension,
    Element, Ix1, Ix2, Ix3,
};

/// A vector of `N` elements stored inline.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FixedVector<A, const N: usize>(pub [A; N]);

/// An `R` × `C` matrix stored inline in row major order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FixedMatrix<A, const R: usize, const C: usize>(pub [[A; C]; R]);

/// A `P` × `R` × `C` array stored inline in row major order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct FixedArray3<A, const P: usize, const R: usize, const C: usize>(pub [[[A; C]; R]; P]);

/// The interface every fixed-size container shares: views of its inline
/// storage, through which the container engine operates on it.
pub trait FixedContainer
{
    /// The element type
    type Elem: Copy;
    /// The dimension of the views
    type Dim: Dimension;
    /// The number of elements, known at compile time.
    const LEN: usize;

    /// Return the axis lengths.
    fn raw_dim() -> Self::Dim;

    /// Return a read-only view of the elements.
    fn view(&self) -> ArrayView<'_, Self::Elem, Self::Dim>;

    /// Return a read-write view of the elements.
    fn view_mut(&mut self) -> ArrayViewMut<'_, Self::Elem, Self::Dim>;

    /// Return a dynamic container with a copy of the elements.
    fn to_array(&self) -> Array<Self::Elem, Self::Dim>
    {
        self.view().to_owned()
    }

    /// Copy the elements of `src`, pairing them by logical index.
    ///
    /// **Errors** with `SizeMismatch` if the shapes disagree.
    fn assign_from<S>(&mut self, src: &ArrayBase<S, Self::Dim>) -> Result<(), ArrayError>
    where S: Data<Elem = Self::Elem>
    {
        self.view_mut().assign(src)
    }
}

/// Compile-time check that `N + M == K`.
struct SumIs<const N: usize, const M: usize, const K: usize>;

impl<const N: usize, const M: usize, const K: usize> SumIs<N, M, K>
{
    const OK: () = assert!(N + M == K, "concatenated length must be the sum of the lengths");
}

macro_rules! impl_fixed_container {
    ([$($cg:tt)*] $ty:ty, $dim:ident, [$($n:ident),*], $index:ty, |$s:ident, $ix:ident| $at:expr, |$sm:ident, $ixm:ident| $at_mut:expr) => {
        impl<A: Copy, $($cg)*> FixedContainer for $ty
        {
            type Elem = A;
            type Dim = $dim;
            const LEN: usize = 1 $(* $n)*;

            fn raw_dim() -> $dim
            {
                $dim::new([$($n),*])
            }

            fn view(&self) -> ArrayView<'_, A, $dim>
            {
                let dim = Self::raw_dim();
                let strides = dim.default_strides();
                unsafe { ArrayView::new_(self.0.as_ptr() as *const A, dim, strides) }
            }

            fn view_mut(&mut self) -> ArrayViewMut<'_, A, $dim>
            {
                let dim = Self::raw_dim();
                let strides = dim.default_strides();
                unsafe { ArrayViewMut::new_(self.0.as_mut_ptr() as *mut A, dim, strides) }
            }
        }

        impl<A: Copy + Default, $($cg)*> Default for $ty
        {
            fn default() -> Self
            {
                Self::from_elem(A::default())
            }
        }

        impl<A: Copy + Default, $($cg)*> $ty
        {
            /// Copy a dynamic container of exactly this shape.
            ///
            /// **Errors** with `SizeMismatch` if the shapes differ.
            pub fn try_from_view<S>(src: &ArrayBase<S, $dim>) -> Result<Self, ArrayError>
            where S: Data<Elem = A>
            {
                let mut out = Self::default();
                out.assign_from(src)?;
                Ok(out)
            }
        }

        impl<'a, A: Copy + Default, S, $($cg)*> TryFrom<&'a ArrayBase<S, $dim>> for $ty
        where S: Data<Elem = A>
        {
            type Error = ArrayError;

            fn try_from(src: &'a ArrayBase<S, $dim>) -> Result<Self, ArrayError>
            {
                Self::try_from_view(src)
            }
        }

        impl<A: Copy, $($cg)*> From<$ty> for Array<A, $dim>
        {
            fn from(fixed: $ty) -> Self
            {
                fixed.to_array()
            }
        }

        impl<A, $($cg)*> Index<$index> for $ty
        {
            type Output = A;
            #[inline]
            fn index(&self, $ix: $index) -> &A
            {
                let $s = self;
                $at
            }
        }

        impl<A, $($cg)*> IndexMut<$index> for $ty
        {
            #[inline]
            fn index_mut(&mut self, $ixm: $index) -> &mut A
            {
                let $sm = self;
                $at_mut
            }
        }

        impl<A: Copy + fmt::Display, $($cg)*> fmt::Display for $ty
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                fmt::Display::fmt(&self.view(), f)
            }
        }

        impl<A: Element, $($cg)*> Add for $ty
        {
            type Output = Self;
            fn add(mut self, rhs: Self) -> Self
            {
                self += rhs;
                self
            }
        }

        impl<A: Element, $($cg)*> Sub for $ty
        {
            type Output = Self;
            fn sub(mut self, rhs: Self) -> Self
            {
                self -= rhs;
                self
            }
        }

        impl<A: Element, $($cg)*> AddAssign for $ty
        {
            fn add_assign(&mut self, rhs: Self)
            {
                self.view_mut().zip_mut_with_same_shape(&rhs.view(), |x, &y| *x = *x + y);
            }
        }

        impl<A: Element, $($cg)*> SubAssign for $ty
        {
            fn sub_assign(&mut self, rhs: Self)
            {
                self.view_mut().zip_mut_with_same_shape(&rhs.view(), |x, &y| *x = *x - y);
            }
        }

        impl<A: Element, $($cg)*> Mul<A> for $ty
        {
            type Output = Self;
            fn mul(mut self, rhs: A) -> Self
            {
                self *= rhs;
                self
            }
        }

        impl<A: Element, $($cg)*> MulAssign<A> for $ty
        {
            fn mul_assign(&mut self, rhs: A)
            {
                self.view_mut().mapv_inplace(|x| x * rhs);
            }
        }

        impl<A: Element, $($cg)*> Div<A> for $ty
        {
            type Output = Self;
            fn div(mut self, rhs: A) -> Self
            {
                self.view_mut().mapv_inplace(|x| x / rhs);
                self
            }
        }

        impl<A: Element + Neg<Output = A>, $($cg)*> Neg for $ty
        {
            type Output = Self;
            fn neg(mut self) -> Self
            {
                self.view_mut().negation_self();
                self
            }
        }
    };
}

impl_fixed_container!([const N: usize] FixedVector<A, N>, Ix1, [N], usize,
    |s, i| &s.0[i], |s, i| &mut s.0[i]);
impl_fixed_container!([const R: usize, const C: usize] FixedMatrix<A, R, C>, Ix2, [R, C], [usize; 2],
    |s, ix| &s.0[ix[0]][ix[1]], |s, ix| &mut s.0[ix[0]][ix[1]]);
impl_fixed_container!([const P: usize, const R: usize, const C: usize] FixedArray3<A, P, R, C>, Ix3, [P, R, C],
    [usize; 3], |s, ix| &s.0[ix[0]][ix[1]][ix[2]], |s, ix| &mut s.0[ix[0]][ix[1]][ix[2]]);

impl<A: Copy, const N: usize> FixedVector<A, N>
{
    /// Create a vector with copies of `elem`.
    pub fn from_elem(elem: A) -> Self
    {
        FixedVector([elem; N])
    }

    /// Create a vector with the values `f(i)`.
    pub fn from_fn<F: FnMut(usize) -> A>(f: F) -> Self
    {
        FixedVector(array::from_fn(f))
    }

    pub fn as_slice(&self) -> &[A]
    {
        &self.0
    }

    /// Return the vector of `N + M` elements made of `self` followed by
    /// `other`. The length `K` is checked at compile time.
    ///
    /// ```
    /// use ndcontainer::FixedVector;
    ///
    /// let v: FixedVector<i32, 5> = FixedVector([1, 2]).concat(FixedVector([3, 4, 5]));
    /// assert_eq!(v, FixedVector([1, 2, 3, 4, 5]));
    /// ```
    pub fn concat<const M: usize, const K: usize>(self, other: FixedVector<A, M>) -> FixedVector<A, K>
    {
        #[allow(clippy::let_unit_value)]
        let () = SumIs::<N, M, K>::OK;
        FixedVector(array::from_fn(|i| if i < N { self.0[i] } else { other.0[i - N] }))
    }
}

impl<A: Element, const N: usize> FixedVector<A, N>
{
    pub fn zeros() -> Self
    {
        Self::from_elem(A::zero())
    }

    /// Return the dot product.
    pub fn dot(&self, other: &Self) -> A
    {
        self.0.iter().zip(&other.0).fold(A::zero(), |acc, (&x, &y)| acc + x * y)
    }
}

impl<A: Element> FixedVector<A, 3>
{
    /// Return the cross product.
    pub fn cross(&self, other: &Self) -> Self
    {
        let (a, b) = (&self.0, &other.0);
        FixedVector([
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ])
    }
}

impl<A: Copy, const R: usize, const C: usize> FixedMatrix<A, R, C>
{
    pub const ROWS: usize = R;
    pub const COLS: usize = C;

    /// Create a matrix with copies of `elem`.
    pub fn from_elem(elem: A) -> Self
    {
        FixedMatrix([[elem; C]; R])
    }

    /// Create a matrix with the values `f((i, j))`.
    pub fn from_fn<F: FnMut((usize, usize)) -> A>(mut f: F) -> Self
    {
        FixedMatrix(array::from_fn(|i| array::from_fn(|j| f((i, j)))))
    }

    /// Return the transposed matrix.
    pub fn transpose(&self) -> FixedMatrix<A, C, R>
    {
        FixedMatrix::from_fn(|(j, i)| self.0[i][j])
    }

    /// Return a copy of row `i`.
    ///
    /// **Panics** if `i` is out of bounds.
    pub fn row(&self, i: usize) -> FixedVector<A, C>
    {
        FixedVector(self.0[i])
    }

    /// Return a copy of column `j`.
    ///
    /// **Panics** if `j` is out of bounds.
    pub fn column(&self, j: usize) -> FixedVector<A, R>
    {
        FixedVector::from_fn(|i| self.0[i][j])
    }
}

impl<A: Element, const R: usize, const C: usize> FixedMatrix<A, R, C>
{
    pub fn zeros() -> Self
    {
        Self::from_elem(A::zero())
    }

    /// Return the matrix product; the inner dimensions agree by
    /// construction.
    pub fn mat_mul<const K: usize>(&self, rhs: &FixedMatrix<A, C, K>) -> FixedMatrix<A, R, K>
    {
        FixedMatrix::from_fn(|(i, j)| (0..C).fold(A::zero(), |acc, k| acc + self.0[i][k] * rhs.0[k][j]))
    }

    /// Return the product of the matrix and the vector `x`.
    pub fn mat_vec(&self, x: &FixedVector<A, C>) -> FixedVector<A, R>
    {
        FixedVector::from_fn(|i| self.row(i).dot(x))
    }
}

impl<A: Element, const N: usize> FixedMatrix<A, N, N>
{
    /// Return the identity matrix.
    pub fn identity() -> Self
    {
        Self::from_fn(|(i, j)| if i == j { A::one() } else { A::zero() })
    }
}

impl<A: Copy, const P: usize, const R: usize, const C: usize> FixedArray3<A, P, R, C>
{
    /// Create an array with copies of `elem`.
    pub fn from_elem(elem: A) -> Self
    {
        FixedArray3([[[elem; C]; R]; P])
    }

    /// Create an array with the values `f((p, i, j))`.
    pub fn from_fn<F: FnMut((usize, usize, usize)) -> A>(mut f: F) -> Self
    {
        FixedArray3(array::from_fn(|p| array::from_fn(|i| array::from_fn(|j| f((p, i, j))))))
    }
}

macro_rules! impl_fixed_ref {
    ($name:ident, $name_mut:ident, [$($cg:ident),*], $fixed:ident, $view:ident, $view_mut:ident, $dim:ident) => {
        /// A read-only view of a dynamic container whose shape was checked
        /// against the compile-time shape once, at construction.
        ///
        /// Dereferences to the dynamic view.
        #[derive(Copy, Clone, Debug)]
        pub struct $name<'a, A, $(const $cg: usize),*>
        {
            view: $view<'a, A>,
        }

        /// A read-write view of a dynamic container whose shape was checked
        /// against the compile-time shape once, at construction.
        #[derive(Debug)]
        pub struct $name_mut<'a, A, $(const $cg: usize),*>
        {
            view: $view_mut<'a, A>,
        }

        impl<'a, A, $(const $cg: usize),*> $name<'a, A, $($cg),*>
        {
            /// Wrap `view`.
            ///
            /// **Errors** with `SizeMismatch` unless the shape of `view` is
            /// exactly the fixed shape.
            pub fn new(view: $view<'a, A>) -> Result<Self, ArrayError>
            {
                let expected = $dim::new([$($cg),*]);
                if view.raw_dim() == expected {
                    Ok($name { view })
                } else {
                    Err(error::incompatible_shapes(view.shape(), expected.slice()))
                }
            }

            /// Return a fixed-size copy of the elements.
            pub fn to_fixed(&self) -> $fixed<A, $($cg),*>
            where A: Copy + Default
            {
                let mut out = $fixed::default();
                out.view_mut().zip_mut_with_same_shape(&self.view, |x, &y| *x = y);
                out
            }
        }

        impl<'a, A, $(const $cg: usize),*> $name_mut<'a, A, $($cg),*>
        {
            /// Wrap `view`.
            ///
            /// **Errors** with `SizeMismatch` unless the shape of `view` is
            /// exactly the fixed shape.
            pub fn new(view: $view_mut<'a, A>) -> Result<Self, ArrayError>
            {
                let expected = $dim::new([$($cg),*]);
                if view.raw_dim() == expected {
                    Ok($name_mut { view })
                } else {
                    Err(error::incompatible_shapes(view.shape(), expected.slice()))
                }
            }

            /// Copy the elements of `src` into the viewed memory.
            pub fn assign_fixed(&mut self, src: &$fixed<A, $($cg),*>)
            where A: Copy
            {
                self.view.zip_mut_with_same_shape(&src.view(), |x, &y| *x = y);
            }
        }

        impl<'a, A, $(const $cg: usize),*> Deref for $name<'a, A, $($cg),*>
        {
            type Target = $view<'a, A>;
            fn deref(&self) -> &Self::Target
            {
                &self.view
            }
        }

        impl<'a, A, $(const $cg: usize),*> Deref for $name_mut<'a, A, $($cg),*>
        {
            type Target = $view_mut<'a, A>;
            fn deref(&self) -> &Self::Target
            {
                &self.view
            }
        }

        impl<'a, A, $(const $cg: usize),*> DerefMut for $name_mut<'a, A, $($cg),*>
        {
            fn deref_mut(&mut self) -> &mut Self::Target
            {
                &mut self.view
            }
        }
    };
}

impl_fixed_ref!(FixedVectorRef, FixedVectorMut, [N], FixedVector, ArrayView1, ArrayViewMut1, Ix1);
impl_fixed_ref!(FixedMatrixRef, FixedMatrixMut, [R, C], FixedMatrix, ArrayView2, ArrayViewMut2, Ix2);

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{arr1, arr2, Array2, ErrorKind, ShapeBuilder};

    #[test]
    fn views_share_inline_storage()
    {
        let mut m = FixedMatrix([[1, 2, 3], [4, 5, 6]]);
        assert_eq!(m.view().as_ptr(), &m[[0, 0]] as *const i32);
        assert_eq!(m.view().row(1).as_ptr(), &m[[1, 0]] as *const i32);
        m.view_mut().column_mut(2).set_all(0);
        assert_eq!(m, FixedMatrix([[1, 2, 0], [4, 5, 0]]));
        assert_eq!(<FixedMatrix<i32, 2, 3> as FixedContainer>::LEN, 6);
    }

    #[test]
    fn round_trip_with_dynamic()
    {
        let m = FixedMatrix::from_fn(|(i, j)| (i * 3 + j) as f64);
        let d: Array2<f64> = m.into();
        assert_eq!(d, m.view());
        let back = FixedMatrix::<f64, 2, 3>::try_from_view(&d).unwrap();
        assert_eq!(back, m);

        let column_major = Array2::from_shape_vec((2, 3).f(), vec![0., 3., 1., 4., 2., 5.]).unwrap();
        assert_eq!(FixedMatrix::try_from(&column_major).unwrap(), m);

        let err = FixedMatrix::<f64, 3, 2>::try_from_view(&d).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SizeMismatch);
    }

    #[test]
    fn arithmetic_through_views()
    {
        let a = FixedVector([1., 2., 3.]);
        let b = FixedVector([3., 2., 1.]);
        assert_eq!(a + b, FixedVector::from_elem(4.));
        assert_eq!((a - b) * 2., FixedVector([-4., 0., 4.]));
        assert_eq!(-a / 2., FixedVector([-0.5, -1., -1.5]));
        assert_eq!(a.dot(&b), 10.);
        assert_eq!(a.cross(&b), FixedVector([-4., 8., -4.]));
        assert_eq!(a.view().sum(), 6.);
    }

    #[test]
    fn matrix_products()
    {
        let m = FixedMatrix([[1, 2], [3, 4], [5, 6]]);
        let t = m.transpose();
        assert_eq!(t, FixedMatrix([[1, 3, 5], [2, 4, 6]]));
        assert_eq!(m.mat_mul(&FixedMatrix::identity()), m);
        assert_eq!(t.mat_mul(&m), FixedMatrix([[35, 44], [44, 56]]));
        assert_eq!(m.column(1), FixedVector([2, 4, 6]));
        assert_eq!(m.view().mat_mul(&t.view()).unwrap(), m.mat_mul(&t).to_array());
    }

    #[test]
    fn checked_references()
    {
        let mut d = arr2(&[[1, 2, 3], [4, 5, 6], [7, 8, 9]]);
        let win = d.window(&[1, 1], &[2, 2]).unwrap();
        let r = FixedMatrixRef::<i32, 2, 2>::new(win).unwrap();
        assert_eq!(r.to_fixed(), FixedMatrix([[5, 6], [8, 9]]));
        assert_eq!(r[[1, 0]], 8);
        assert!(FixedMatrixRef::<i32, 2, 3>::new(d.view()).is_err());

        {
            let mut w = FixedVectorMut::<i32, 3>::new(d.row_mut(0)).unwrap();
            w.assign_fixed(&FixedVector([0, 0, 1]));
            w[0] = -1;
        }
        assert_eq!(d.row(0), arr1(&[-1, 0, 1]));
        let v = FixedVectorRef::<i32, 3>::new(d.column(2)).unwrap();
        assert_eq!(v.sum(), 16);
    }

    #[test]
    fn concat_and_array3()
    {
        let v: FixedVector<u8, 4> = FixedVector([1]).concat(FixedVector([2, 3, 4]));
        assert_eq!(v.as_slice(), &[1, 2, 3, 4]);
        let a = FixedArray3::<i64, 2, 2, 3>::from_fn(|(p, i, j)| (p * 100 + i * 10 + j) as i64);
        assert_eq!(a[[1, 1, 2]], 112);
        assert_eq!(a.view().subview(crate::Axis(0), 1).unwrap()[[0, 1]], 101);
        assert_eq!(format!("{}", FixedVector([1, 2])), "[1, 2]");
    }
}
