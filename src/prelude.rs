// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndcontainer prelude.
//!
//! This module contains the most used types, type aliases, traits and
//! functions that you can import easily as a group.
//!
//! ```
//! use ndcontainer::prelude::*;
//!
//! let m = Array2::<f64>::eye(3);
//! assert_eq!(m.scalar_number(), 2 + 9);
//! ```

#[doc(no_inline)]
pub use crate::{ArrayBase, Array, ArrayView, ArrayViewMut, RawArrayView, RawArrayViewMut};

#[doc(no_inline)]
pub use crate::{Axis, Dim, Dimension};

#[doc(no_inline)]
pub use crate::{Array1, Array2, Array3, Array4, Array5, Array6};

#[doc(no_inline)]
pub use crate::{ArrayView1, ArrayView2, ArrayView3};

#[doc(no_inline)]
pub use crate::{ArrayViewMut1, ArrayViewMut2, ArrayViewMut3};

#[doc(no_inline)]
pub use crate::{Ix1, Ix2, Ix3, Ix4, Ix5, Ix6};

#[doc(no_inline)]
pub use crate::{arr1, arr2, arr3, aview1, aview2, aview_mut1};

#[doc(no_inline)]
pub use crate::{ArrayError, CopyCheck, Element, ErrorKind, Order, Relation, ShapeBuilder};

#[doc(no_inline)]
pub use crate::fixed::{FixedArray3, FixedContainer, FixedMatrix, FixedVector};

#[doc(no_inline)]
pub use crate::data_model::ScalarData;

#[doc(no_inline)]
pub use crate::serialize::{BinaryDeserialize, BinarySerialize, TextDeserialize, TextSerialize};
