// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::dimension::IntoDimension;
use crate::{ArrayBase, Data, Dimension};

/// Write the elements as nested brackets, one line per innermost row.
///
/// The indexed iterator walks in row major order; a change in any index
/// but the last closes and reopens the brackets below that axis.
fn format_array<A, S, D, F>(view: &ArrayBase<S, D>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    F: FnMut(&A, &mut fmt::Formatter<'_>) -> fmt::Result,
    D: Dimension,
    S: Data<Elem = A>,
{
    let ndim = D::NDIM;
    let mut last_index = view.dim.first_index().unwrap_or_else(|| view.dim.clone());
    f.write_str(&"[".repeat(ndim))?;
    let mut first = true;
    for (index, elt) in view.indexed_iter() {
        let index = index.into_dimension();
        let mut new_row = false;
        for (i, (a, b)) in index.slice().iter().zip(last_index.slice()).take(ndim - 1).enumerate() {
            if a != b {
                let n = ndim - i - 1;
                write!(f, "{},\n{}{}", "]".repeat(n), " ".repeat(ndim - n), "[".repeat(n))?;
                first = true;
                new_row = true;
                break;
            }
        }
        if !first {
            f.write_str(", ")?;
        }
        first = false;
        format(elt, f)?;
        if new_row {
            last_index = index;
        }
    }
    f.write_str(&"]".repeat(ndim))
}

/// Format the container using `Display` and apply the formatting parameters
/// used to each element.
///
/// The container is shown in nested brackets, one row per line:
///
/// ```
/// use ndcontainer::arr2;
///
/// let m = arr2(&[[1, 2], [3, 4]]);
/// assert_eq!(format!("{}", m), "[[1, 2],\n [3, 4]]");
/// ```
impl<A: fmt::Display, S, D: Dimension> fmt::Display for ArrayBase<S, D>
where S: Data<Elem = A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the container using `Debug` and apply the formatting parameters
/// used to each element, followed by the shape, strides and storage order.
impl<A: fmt::Debug, S, D: Dimension> fmt::Debug for ArrayBase<S, D>
where S: Data<Elem = A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            ", shape={:?}, strides={:?}, order={:?}",
            self.shape(),
            self.strides(),
            self.storage_order()
        )
    }
}

/// Format the container using `LowerExp` and apply the formatting parameters
/// used to each element.
impl<A: fmt::LowerExp, S, D: Dimension> fmt::LowerExp for ArrayBase<S, D>
where S: Data<Elem = A>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        format_array(self, f, <_>::fmt)
    }
}

impl<A: fmt::Display, S, D: Dimension> ArrayBase<S, D>
where S: Data<Elem = A>
{
    /// Return the nested-bracket text form of the container.
    pub fn human_readable(&self) -> String
    {
        self.to_string()
    }
}
