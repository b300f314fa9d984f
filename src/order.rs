// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

/// Storage order of a matrix or N-dimensional container.
///
/// With `RowMajor` the last index varies fastest in memory, with
/// `ColumnMajor` the first one does. The six values 1..=6 stored in a 2 × 3
/// matrix read
///
/// ```text
/// RowMajor     ColumnMajor
/// 1  2  3      1  3  5
/// 4  5  6      2  4  6
/// ```
///
/// Vectors and other degenerate shapes are compatible with both; they report
/// `RowMajor`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Order
{
    /// Row major or "C" order
    #[default]
    RowMajor,
    /// Column major or "F" order
    ColumnMajor,
}

impl Order
{
    /// Return true if input is Order::RowMajor, false otherwise
    #[inline]
    pub fn is_row_major(self) -> bool
    {
        matches!(self, Order::RowMajor)
    }

    /// Return true if input is Order::ColumnMajor, false otherwise
    #[inline]
    pub fn is_column_major(self) -> bool
    {
        !self.is_row_major()
    }

    /// Return the transpose: row major becomes column major and vice versa.
    #[inline]
    pub fn transpose(self) -> Self
    {
        match self {
            Order::RowMajor => Order::ColumnMajor,
            Order::ColumnMajor => Order::RowMajor,
        }
    }
}
