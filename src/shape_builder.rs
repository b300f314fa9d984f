// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dimension::IntoDimension;
use crate::order::Order;
use crate::Dimension;

/// A compact container shape of n dimensions.
///
/// Either row major or column major storage (row major is the default).
#[derive(Copy, Clone, Debug)]
pub struct Shape<D>
{
    /// Shape (axis lengths)
    pub(crate) dim: D,
    pub(crate) order: Order,
}

impl<D> Shape<D>
where D: Dimension
{
    /// Return the storage order.
    pub fn order(&self) -> Order
    {
        self.order
    }

    /// Return a reference to the dimension
    pub fn raw_dim(&self) -> &D
    {
        &self.dim
    }

    /// Return the size of the shape in number of elements
    pub fn size(&self) -> usize
    {
        self.dim.size()
    }

    /// The strides this shape gets in memory.
    pub(crate) fn strides(&self) -> D
    {
        match self.order {
            Order::RowMajor => self.dim.default_strides(),
            Order::ColumnMajor => self.dim.fortran_strides(),
        }
    }
}

/// A trait for `Shape` and everything convertible into a dimension that
/// allows choosing the storage order of a new container.
///
/// ```
/// use ndcontainer::{Array2, Order, ShapeBuilder};
///
/// let m = Array2::<i32>::zeros((2, 3).f());
/// assert_eq!(m.storage_order(), Order::ColumnMajor);
/// assert_eq!(m.strides(), &[1, 2]);
/// ```
pub trait ShapeBuilder
{
    type Dim: Dimension;

    fn into_shape_with_order(self) -> Shape<Self::Dim>;
    /// Use column major storage.
    fn f(self) -> Shape<Self::Dim>;
    fn set_f(self, is_f: bool) -> Shape<Self::Dim>;
    fn with_order(self, order: Order) -> Shape<Self::Dim>;
}

impl<T> ShapeBuilder for T
where T: IntoDimension
{
    type Dim = T::Dim;

    fn into_shape_with_order(self) -> Shape<Self::Dim>
    {
        Shape {
            dim: self.into_dimension(),
            order: Order::RowMajor,
        }
    }

    fn f(self) -> Shape<Self::Dim>
    {
        self.set_f(true)
    }

    fn set_f(self, is_f: bool) -> Shape<Self::Dim>
    {
        self.into_shape_with_order().set_f(is_f)
    }

    fn with_order(self, order: Order) -> Shape<Self::Dim>
    {
        self.into_shape_with_order().with_order(order)
    }
}

impl<D> ShapeBuilder for Shape<D>
where D: Dimension
{
    type Dim = D;

    fn into_shape_with_order(self) -> Shape<D>
    {
        self
    }

    fn f(self) -> Self
    {
        self.set_f(true)
    }

    fn set_f(self, is_f: bool) -> Self
    {
        self.with_order(if is_f { Order::ColumnMajor } else { Order::RowMajor })
    }

    fn with_order(mut self, order: Order) -> Self
    {
        self.order = order;
        self
    }
}

impl<D> From<D> for Shape<D>
where D: Dimension
{
    /// Create a `Shape` from `dimension`, using row major storage.
    fn from(dimension: D) -> Shape<D>
    {
        dimension.into_shape_with_order()
    }
}
