// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Bulk memory copies between containers with matching layouts.

use std::ptr;

use crate::error::{self, ArrayError, ErrorKind};
use crate::order::Order;
use crate::{ArrayBase, Data, DataMut, Dimension};

/// Whether [`fast_copy_of`](ArrayBase::fast_copy_of) verifies sizes and
/// layouts before copying.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CopyCheck
{
    /// Verify sizes and layouts; the default.
    #[default]
    PerformChecks,
    /// The caller has verified compatibility. Compact containers are copied
    /// as raw memory blocks, as many elements as fit in both.
    SkipChecks,
}

/// How a pair of containers can be copied in bulk.
enum CopyPlan
{
    /// Equal shapes, both compact with equal strides: one block.
    Block,
    /// Matrices of equal shape with unit stride along `axis`: one block
    /// per lane.
    Lanes { axis: usize },
}

fn memory_order<S: Data, D: Dimension>(a: &ArrayBase<S, D>) -> Option<Order>
{
    if a.is_standard_layout() {
        Some(Order::RowMajor)
    } else if a.is_compact() {
        Some(Order::ColumnMajor)
    } else {
        None
    }
}

/// Equal strides on every axis that has more than one element.
fn same_strides<S, S2, D>(dst: &ArrayBase<S, D>, src: &ArrayBase<S2, D>) -> bool
where
    S: Data,
    S2: Data,
    D: Dimension,
{
    (0..D::NDIM).all(|k| dst.dim[k] <= 1 || dst.strides[k] == src.strides[k])
}

fn copy_plan<S, S2, D>(dst: &ArrayBase<S, D>, src: &ArrayBase<S2, D>) -> Option<CopyPlan>
where
    S: Data,
    S2: Data,
    D: Dimension,
{
    if dst.dim != src.dim {
        return None;
    }
    if memory_order(dst).is_some() && memory_order(src).is_some() && same_strides(dst, src) {
        return Some(CopyPlan::Block);
    }
    if D::NDIM == 2 {
        for axis in 0..2 {
            if dst.strides[axis] as isize == 1 && src.strides[axis] as isize == 1 {
                return Some(CopyPlan::Lanes { axis });
            }
        }
    }
    None
}

/// # Fast Copies
impl<A, S, D> ArrayBase<S, D>
where
    A: Copy,
    S: DataMut<Elem = A>,
    D: Dimension,
{
    /// Return `true` if [`fast_copy_of`](Self::fast_copy_of) with checks
    /// would accept `src`: equal shapes and either both compact with the
    /// same strides, or matrices with unit stride along the same axis.
    pub fn fast_copy_compatible<S2>(&self, src: &ArrayBase<S2, D>) -> bool
    where S2: Data<Elem = A>
    {
        copy_plan(self, src).is_some()
    }

    /// Copy `src` into `self` with raw memory copies instead of elementwise
    /// assignment.
    ///
    /// **Errors** with `SizeMismatch` if the element counts differ and with
    /// `IncompatibleLayout` if the shapes or strides don't allow a bulk copy; fall
    /// back to [`assign`](Self::assign) in that case. With
    /// [`CopyCheck::SkipChecks`], two compact containers are always copied
    /// block to block, whatever their shapes and orders, and anything else
    /// still reports `IncompatibleLayout`.
    ///
    /// ```
    /// use ndcontainer::{Array2, CopyCheck, ErrorKind, ShapeBuilder};
    ///
    /// let a = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f32);
    /// let mut b = Array2::zeros((3, 4));
    /// b.fast_copy_of(&a, CopyCheck::PerformChecks).unwrap();
    /// assert_eq!(a, b);
    ///
    /// let mut c = Array2::zeros((3, 4).f());
    /// assert!(!c.fast_copy_compatible(&a));
    /// let err = c.fast_copy_of(&a, CopyCheck::PerformChecks).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::IncompatibleLayout);
    /// c.assign(&a).unwrap();
    /// assert_eq!(a, c);
    /// ```
    pub fn fast_copy_of<S2>(&mut self, src: &ArrayBase<S2, D>, check: CopyCheck) -> Result<(), ArrayError>
    where S2: Data<Elem = A>
    {
        let plan = match check {
            CopyCheck::PerformChecks => {
                if self.len() != src.len() {
                    return Err(error::incompatible_shapes(self.shape(), src.shape()));
                }
                copy_plan(self, src)
            }
            CopyCheck::SkipChecks => {
                log::trace!(
                    "unchecked fast copy from {:?} into {:?}",
                    src.shape(),
                    self.shape()
                );
                if self.is_compact() && src.is_compact() {
                    Some(CopyPlan::Block)
                } else {
                    copy_plan(self, src)
                }
            }
        };
        let plan = match plan {
            Some(plan) => plan,
            None => {
                log::trace!(
                    "fast copy rejected: strides {:?} into {:?}",
                    src.strides(),
                    self.strides()
                );
                return Err(ArrayError::new(
                    ErrorKind::IncompatibleLayout,
                    format!("strides {:?} and {:?}", src.strides(), self.strides()),
                ));
            }
        };
        unsafe {
            match plan {
                CopyPlan::Block => {
                    let n = self.len().min(src.len());
                    ptr::copy_nonoverlapping(src.as_ptr(), self.as_mut_ptr(), n);
                }
                CopyPlan::Lanes { axis } => {
                    let other = 1 - axis;
                    let lane_len = self.dim[axis];
                    let (ds, ss) = (self.strides[other] as isize, src.strides[other] as isize);
                    let (dp, sp) = (self.as_mut_ptr(), src.as_ptr());
                    for k in 0..self.dim[other] as isize {
                        ptr::copy_nonoverlapping(sp.offset(k * ss), dp.offset(k * ds), lane_len);
                    }
                }
            }
        }
        Ok(())
    }
}
