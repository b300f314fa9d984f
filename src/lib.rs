// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndcontainer"]
#![doc(html_root_url = "https://docs.rs/ndcontainer/0.1/")]
#![allow(
    clippy::many_single_char_names,
    clippy::deref_addrof,
    clippy::unreadable_literal,
    clippy::manual_map,
    clippy::type_complexity
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ndcontainer` crate provides strided numeric containers: vectors,
//! matrices and n-dimensional arrays, in fixed-size and dynamic-size
//! flavours, that share a single algorithmic engine.
//!
//! - [`ArrayBase`]: the dynamic-size container. The storage decides
//!   ownership: [`Array`] owns and resizes a heap vector, [`ArrayView`] and
//!   [`ArrayViewMut`] borrow another container's memory and
//!   [`RawArrayView`]/[`RawArrayViewMut`] carry only a pointer.
//! - Every container has a shape and signed strides, so windows, slices
//!   (one axis fixed), axis permutations, transposes and reversed axes are
//!   all views of the original memory.
//! - [`fixed`]: [`FixedVector`], [`FixedMatrix`] and [`FixedArray3`] with
//!   compile-time axis lengths, stored inline. They expose their contents as
//!   views and therefore run the same engine.
//! - Reductions, elementwise arithmetic, comparisons, normalization, matrix
//!   products and bulk copies are written once over any storage and shape.
//! - [`data_model`] flattens nested containers into numeric scalars, and
//!   [`serialize`] encodes them to binary or delimited text streams.
//!
//! ## Crate Feature Flags
//!
//! - `approx`: implementations of `approx`'s traits for containers.
//! - `serde`: `Serialize` and `Deserialize` for owned containers.
//!
//! ## Errors
//!
//! Recoverable conditions are reported through [`ArrayError`], whose
//! [`ErrorKind`] tells them apart. Operator overloads and `[]` indexing
//! panic instead; each has a fallible sibling method.
//!
//! ## Logging
//!
//! The crate emits a few `debug` and `trace` events through the `log`
//! facade (reallocation on resize, rejected fast copies, byte swapping of
//! foreign-endian streams). It never installs a logger.

use std::ptr::NonNull;

pub use crate::data_repr::{OwnedRepr, RawViewRepr, ViewRepr};
pub use crate::data_traits::{Data, DataMut, DataOwned, RawData, RawDataClone, RawDataMut};
pub use crate::dimension::{Axis, Dim, Dimension, IntoDimension, RemoveAxis};
pub use crate::dimension::{Ix1, Ix2, Ix3, Ix4, Ix5, Ix6};
pub use crate::element::Element;
pub use crate::error::{ArrayError, ErrorKind};
pub use crate::fast_copy::CopyCheck;
pub use crate::fixed::{
    FixedArray3, FixedContainer, FixedMatrix, FixedMatrixMut, FixedMatrixRef, FixedVector, FixedVectorMut,
    FixedVectorRef,
};
pub use crate::free_functions::*;
pub use crate::impl_compare::Relation;
pub use crate::impl_ops::ScalarOperand;
pub use crate::order::Order;
pub use crate::shape_builder::{Shape, ShapeBuilder};

#[macro_use]
mod macro_utils;

mod arrayformat;
mod arraytraits;
#[cfg(feature = "approx")]
mod array_approx;
#[cfg(feature = "serde")]
mod array_serde;
mod data_repr;
mod data_traits;
mod dimension;
mod element;
mod error;
mod fast_copy;
mod free_functions;
mod impl_1d;
mod impl_2d;
mod impl_compare;
mod impl_constructors;
mod impl_elementwise;
mod impl_internal_constructors;
mod impl_methods;
mod impl_numeric;
mod impl_ops;
mod impl_owned_array;
mod impl_views;
mod iterators;
mod numeric_util;
mod order;
mod shape_builder;

pub mod data_model;
pub mod fixed;
pub mod image;
pub mod linalg;
pub mod prelude;
pub mod serialize;

/// Iterators over container elements.
pub mod iter
{
    pub use crate::iterators::{IndexedIter, Iter, IterMut};
}

/// Array index type
pub type Ix = usize;
/// Array index type (signed)
pub type Ixs = isize;

/// A strided n-dimensional container.
///
/// The container is a general container of elements. Its data is
/// described by a pointer to the logically first element, the axis
/// lengths and one signed stride per axis (in units of elements):
/// the element at multi-index `idx` lives at `ptr + Σ idx[k] * strides[k]`.
///
/// `ArrayBase` is generic over the storage `S` (owned, view, mutable view
/// or raw view) and the dimension `D` (`Ix1` for vectors, `Ix2` for
/// matrices, up to `Ix6`). Most code uses the type aliases [`Array`],
/// [`ArrayView`] and [`ArrayViewMut`].
///
/// ## Storage order
///
/// Owned containers are created in row major order unless the shape is
/// marked with [`.f()`](ShapeBuilder::f), which selects column major. The
/// storage order only affects memory layout and the order of
/// [`.iter()`](ArrayBase::iter); indexing, elementwise operations and
/// serialization always work on logical indices.
///
/// ## Views
///
/// Views never own memory. Windows, slices, permutations, transposes and
/// row/column views all share the viewed container's elements:
///
/// ```
/// use ndcontainer::arr2;
///
/// let m = arr2(&[[1, 2, 3], [4, 5, 6]]);
/// let row = m.row(1);
/// assert_eq!(row.as_ptr(), &m[[1, 0]] as *const _);
/// assert_eq!(m.t()[[2, 0]], 3);
/// ```
pub struct ArrayBase<S, D>
where S: RawData
{
    /// Data buffer / ownership information. (If owned, contains the data
    /// buffer; if borrowed, contains the lifetime and mutability.)
    data: S,
    /// A non-null pointer into the buffer held by `data`; may point anywhere
    /// in its range. If `S: Data`, this pointer must be aligned.
    ptr: NonNull<S::Elem>,
    /// The lengths of the axes.
    dim: D,
    /// The element count stride per axis. To be parsed as `isize`.
    strides: D,
}

/// An owned container, resizable through [`resize`](ArrayBase::resize) and
/// [`set_size`](ArrayBase::set_size).
pub type Array<A, D> = ArrayBase<OwnedRepr<A>, D>;
/// An owned dynamic vector.
pub type Array1<A> = Array<A, Ix1>;
/// An owned dynamic matrix.
pub type Array2<A> = Array<A, Ix2>;
/// An owned dynamic three-dimensional array.
pub type Array3<A> = Array<A, Ix3>;
pub type Array4<A> = Array<A, Ix4>;
pub type Array5<A> = Array<A, Ix5>;
pub type Array6<A> = Array<A, Ix6>;

/// A read-only container view.
///
/// The view borrows the memory of another container for the lifetime `'a`.
pub type ArrayView<'a, A, D> = ArrayBase<ViewRepr<&'a A>, D>;
pub type ArrayView1<'a, A> = ArrayView<'a, A, Ix1>;
pub type ArrayView2<'a, A> = ArrayView<'a, A, Ix2>;
pub type ArrayView3<'a, A> = ArrayView<'a, A, Ix3>;

/// A read-write container view.
///
/// The view borrows the memory of another container mutably for the
/// lifetime `'a`.
pub type ArrayViewMut<'a, A, D> = ArrayBase<ViewRepr<&'a mut A>, D>;
pub type ArrayViewMut1<'a, A> = ArrayViewMut<'a, A, Ix1>;
pub type ArrayViewMut2<'a, A> = ArrayViewMut<'a, A, Ix2>;
pub type ArrayViewMut3<'a, A> = ArrayViewMut<'a, A, Ix3>;

/// A read-only container view without a lifetime.
///
/// Element access is `unsafe`; the caller guarantees the memory is valid.
/// Raw views are the only way to present overlapping operands to the
/// product kernels in [`linalg`].
pub type RawArrayView<A, D> = ArrayBase<RawViewRepr<*const A>, D>;

/// A mutable container view without a lifetime.
pub type RawArrayViewMut<A, D> = ArrayBase<RawViewRepr<*mut A>, D>;

unsafe impl<S, D> Send for ArrayBase<S, D>
where
    S: Send + Data,
    D: Send,
{
}

unsafe impl<S, D> Sync for ArrayBase<S, D>
where
    S: Sync + Data,
    D: Sync,
{
}
