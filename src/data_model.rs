// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The flattened scalar view of values, containers and nested containers.
//!
//! Every [`ScalarData`] value decomposes into a sequence of leaf numbers
//! that can be read as `f64` by position. A container contributes its own
//! axis lengths first, one scalar per axis, followed by the scalars of its
//! elements in row major order. Fixed-size containers don't record their
//! shape, since it is part of their type.
//!
//! ```
//! use ndcontainer::data_model::ScalarData;
//! use ndcontainer::arr2;
//!
//! let m = arr2(&[[1., 2., 3.], [4., 5., 6.]]);
//! assert_eq!(m.scalar_number(), 2 + 6);
//! assert_eq!(m.scalar(0).unwrap(), 2.);
//! assert_eq!(m.scalar(7).unwrap(), 6.);
//! assert_eq!(m.scalar_description(1, "m").unwrap(), "m.cols:{usize}");
//! assert_eq!(m.scalar_description(3, "m").unwrap(), "m[0,1]:{f64}");
//! ```

use crate::error::{self, ArrayError, ErrorKind};
use crate::fixed::{FixedArray3, FixedContainer, FixedMatrix, FixedVector};
use crate::{ArrayBase, Data, Dimension};

/// Values with a flattened scalar decomposition.
pub trait ScalarData
{
    /// `false` for types without a numeric decomposition, like `String`.
    const HAS_SCALARS: bool;

    /// `true` when every value of the type has the same number of scalars.
    const SCALAR_NUMBER_IS_FIXED: bool;

    /// Return the number of scalars.
    fn scalar_number(&self) -> usize;

    /// Return the scalar at flattened position `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index >= self.scalar_number()`.
    fn scalar(&self, index: usize) -> Result<f64, ArrayError>;

    /// Return a label for the scalar at `index`, prefixed by `user`.
    ///
    /// **Errors** with `IndexOutOfRange` if `index` is out of range and with
    /// `UnsupportedElementType` if the leaf type has no scalars.
    fn scalar_description(&self, index: usize, user: &str) -> Result<String, ArrayError>;

    /// Return whether the number of scalars is known from the type alone.
    fn scalar_number_is_fixed(&self) -> bool
    {
        Self::SCALAR_NUMBER_IS_FIXED
    }

    /// Return the descriptions of all scalars, joined by `delimiter`.
    fn serialize_description(&self, delimiter: char, user: &str) -> Result<String, ArrayError>
    {
        let mut out = String::new();
        for i in 0..self.scalar_number() {
            if i > 0 {
                out.push(delimiter);
            }
            out.push_str(&self.scalar_description(i, user)?);
        }
        Ok(out)
    }
}

fn out_of_range(index: usize, len: usize) -> ArrayError
{
    error::index_out_of_range(format!("scalar {} of {}", index, len))
}

fn leaf_description(user: &str, type_name: &str) -> String
{
    if user.is_empty() {
        format!("{{{}}}", type_name)
    } else {
        format!("{}:{{{}}}", user, type_name)
    }
}

macro_rules! impl_scalar_leaf {
    ($t:ty) => {
        impl ScalarData for $t
        {
            const HAS_SCALARS: bool = true;
            const SCALAR_NUMBER_IS_FIXED: bool = true;

            fn scalar_number(&self) -> usize
            {
                1
            }

            fn scalar(&self, index: usize) -> Result<f64, ArrayError>
            {
                if index == 0 {
                    Ok(*self as f64)
                } else {
                    Err(out_of_range(index, 1))
                }
            }

            fn scalar_description(&self, index: usize, user: &str) -> Result<String, ArrayError>
            {
                if index == 0 {
                    Ok(leaf_description(user, stringify!($t)))
                } else {
                    Err(out_of_range(index, 1))
                }
            }
        }
    };
}

for_each_numeric!(impl_scalar_leaf);
impl_scalar_leaf!(usize);

impl ScalarData for bool
{
    const HAS_SCALARS: bool = true;
    const SCALAR_NUMBER_IS_FIXED: bool = true;

    fn scalar_number(&self) -> usize
    {
        1
    }

    fn scalar(&self, index: usize) -> Result<f64, ArrayError>
    {
        if index == 0 {
            Ok(if *self { 1. } else { 0. })
        } else {
            Err(out_of_range(index, 1))
        }
    }

    fn scalar_description(&self, index: usize, user: &str) -> Result<String, ArrayError>
    {
        if index == 0 {
            Ok(leaf_description(user, "bool"))
        } else {
            Err(out_of_range(index, 1))
        }
    }
}

impl ScalarData for String
{
    const HAS_SCALARS: bool = false;
    const SCALAR_NUMBER_IS_FIXED: bool = true;

    fn scalar_number(&self) -> usize
    {
        0
    }

    fn scalar(&self, index: usize) -> Result<f64, ArrayError>
    {
        Err(out_of_range(index, 0))
    }

    fn scalar_description(&self, _index: usize, user: &str) -> Result<String, ArrayError>
    {
        Err(ArrayError::new(ErrorKind::UnsupportedElementType, format!("{}: String has no scalars", user)))
    }
}

/// Find the element holding the scalar at `index` among `elems`, in order.
/// Return the element's position, the element and the position of the
/// scalar inside it.
fn locate<'a, A, I>(mut elems: I, index: usize) -> Option<(usize, &'a A, usize)>
where
    A: ScalarData + 'a,
    I: Iterator<Item = &'a A> + Clone,
{
    if A::SCALAR_NUMBER_IS_FIXED {
        let per = elems.clone().next()?.scalar_number();
        if per == 0 {
            return None;
        }
        let k = index / per;
        return elems.nth(k).map(|e| (k, e, index % per));
    }
    let mut first = 0;
    for (k, e) in elems.enumerate() {
        let n = e.scalar_number();
        if index < first + n {
            return Some((k, e, index - first));
        }
        first += n;
    }
    None
}

fn elements_scalar_number<'a, A, I>(mut elems: I, len: usize) -> usize
where
    A: ScalarData + 'a,
    I: Iterator<Item = &'a A>,
{
    if A::SCALAR_NUMBER_IS_FIXED {
        elems.next().map_or(0, |e| e.scalar_number() * len)
    } else {
        elems.map(ScalarData::scalar_number).sum()
    }
}

/// Format the row major position `k` in `shape` as `[i,j,..]`.
fn index_suffix(shape: &[usize], mut k: usize) -> String
{
    let mut index = vec![0; shape.len()];
    for (ix, &len) in index.iter_mut().zip(shape).rev() {
        if len > 0 {
            *ix = k % len;
            k /= len;
        }
    }
    let parts: Vec<String> = index.iter().map(|i| i.to_string()).collect();
    format!("[{}]", parts.join(","))
}

fn shape_label(ndim: usize, axis: usize) -> String
{
    match (ndim, axis) {
        (1, _) => ".size".to_string(),
        (2, 0) => ".rows".to_string(),
        (2, _) => ".cols".to_string(),
        _ => format!(".sizes[{}]", axis),
    }
}

fn element_scalar<'a, A, I>(elems: I, index: usize, total: usize) -> Result<f64, ArrayError>
where
    A: ScalarData + 'a,
    I: Iterator<Item = &'a A> + Clone,
{
    match locate(elems, index) {
        Some((_, e, inner)) => e.scalar(inner),
        None => Err(out_of_range(index, total)),
    }
}

fn element_description<'a, A, I>(
    elems: I, shape: &[usize], index: usize, total: usize, user: &str,
) -> Result<String, ArrayError>
where
    A: ScalarData + 'a,
    I: Iterator<Item = &'a A> + Clone,
{
    match locate(elems, index) {
        Some((k, e, inner)) => e.scalar_description(inner, &format!("{}{}", user, index_suffix(shape, k))),
        None => Err(out_of_range(index, total)),
    }
}

fn unsupported(user: &str) -> ArrayError
{
    ArrayError::new(ErrorKind::UnsupportedElementType, format!("{}: elements have no scalars", user))
}

/// Dynamic containers record their axis lengths first, then their elements
/// in row major order whatever the storage order.
impl<A, S, D> ScalarData for ArrayBase<S, D>
where
    A: ScalarData,
    S: Data<Elem = A>,
    D: Dimension,
{
    const HAS_SCALARS: bool = A::HAS_SCALARS;
    const SCALAR_NUMBER_IS_FIXED: bool = false;

    fn scalar_number(&self) -> usize
    {
        D::NDIM + elements_scalar_number(self.iter_logical(), self.len())
    }

    fn scalar(&self, index: usize) -> Result<f64, ArrayError>
    {
        if index < D::NDIM {
            return Ok(self.shape()[index] as f64);
        }
        element_scalar(self.iter_logical(), index - D::NDIM, self.scalar_number())
    }

    fn scalar_description(&self, index: usize, user: &str) -> Result<String, ArrayError>
    {
        if !A::HAS_SCALARS {
            return Err(unsupported(user));
        }
        if index < D::NDIM {
            return Ok(leaf_description(&format!("{}{}", user, shape_label(D::NDIM, index)), "usize"));
        }
        element_description(self.iter_logical(), self.shape(), index - D::NDIM, self.scalar_number(), user)
    }
}

macro_rules! impl_scalar_fixed {
    ([$($cg:tt)*] $ty:ty) => {
        impl<A: ScalarData + Copy, $($cg)*> ScalarData for $ty
        {
            const HAS_SCALARS: bool = A::HAS_SCALARS;
            const SCALAR_NUMBER_IS_FIXED: bool = A::SCALAR_NUMBER_IS_FIXED;

            fn scalar_number(&self) -> usize
            {
                let v = self.view();
                elements_scalar_number(v.iter_logical(), v.len())
            }

            fn scalar(&self, index: usize) -> Result<f64, ArrayError>
            {
                element_scalar(self.view().iter_logical(), index, self.scalar_number())
            }

            fn scalar_description(&self, index: usize, user: &str) -> Result<String, ArrayError>
            {
                if !A::HAS_SCALARS {
                    return Err(unsupported(user));
                }
                let v = self.view();
                element_description(v.iter_logical(), v.shape(), index, self.scalar_number(), user)
            }
        }
    };
}

impl_scalar_fixed!([const N: usize] FixedVector<A, N>);
impl_scalar_fixed!([const R: usize, const C: usize] FixedMatrix<A, R, C>);
impl_scalar_fixed!([const P: usize, const R: usize, const C: usize] FixedArray3<A, P, R, C>);

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{arr1, Array1, Array2, ShapeBuilder};

    #[test]
    fn leaves()
    {
        assert_eq!(3u8.scalar_number(), 1);
        assert_eq!((-2i16).scalar(0).unwrap(), -2.);
        assert_eq!(1.5f32.scalar_description(0, "").unwrap(), "{f32}");
        assert_eq!(true.scalar(0).unwrap(), 1.);
        assert_eq!(7i32.scalar(1).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
    }

    #[test]
    fn column_major_walks_logically()
    {
        let m = Array2::from_shape_vec((2, 2).f(), vec![1, 3, 2, 4]).unwrap();
        let scalars: Vec<f64> = (0..m.scalar_number()).map(|i| m.scalar(i).unwrap()).collect();
        assert_eq!(scalars, vec![2., 2., 1., 2., 3., 4.]);
    }

    #[test]
    fn fixed_containers_have_no_shape_scalars()
    {
        let m = FixedMatrix([[1u16; 3]; 6]);
        assert_eq!(m.scalar_number(), 18);
        assert!(m.scalar_number_is_fixed());
        assert_eq!(m.scalar(17).unwrap(), 1.);
        assert_eq!(m.scalar(18).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(m.scalar_description(4, "m").unwrap(), "m[1,1]:{u16}");
    }

    #[test]
    fn nested_vectors()
    {
        let outer = Array1::from_vec(vec![arr1(&[1.]), arr1(&[]), arr1(&[2., 3.])]);
        assert!(!outer.scalar_number_is_fixed());
        // 1 + (1 + 1) + (1 + 0) + (1 + 2)
        assert_eq!(outer.scalar_number(), 7);
        assert_eq!(outer.scalar(4).unwrap(), 2.);
        assert_eq!(outer.scalar(6).unwrap(), 3.);
        assert_eq!(outer.scalar_description(3, "v").unwrap(), "v[1].size:{usize}");
        assert_eq!(outer.scalar(7).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(
            arr1(&[1, 2]).serialize_description(',', "x").unwrap(),
            "x.size:{usize},x[0]:{i32},x[1]:{i32}"
        );
    }

    #[test]
    fn strings_have_no_scalars()
    {
        let words = Array1::from_vec(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(words.scalar_number(), 1);
        assert_eq!(words.scalar(0).unwrap(), 2.);
        assert_eq!(words.scalar(1).unwrap_err().kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(words.scalar_description(0, "w").unwrap_err().kind(), ErrorKind::UnsupportedElementType);
        assert_eq!("x".to_string().scalar_description(0, "").unwrap_err().kind(), ErrorKind::UnsupportedElementType);
    }
}
