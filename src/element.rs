// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Per element type constants and predicates.

use std::fmt;

use num_traits::{Num, ToPrimitive};

/// A numeric element type usable with every container operation.
///
/// The trait is implemented for the primitive integer and floating point
/// types. It collects the constants the engine consults for tolerance,
/// NaN and infinity handling and value ranges.
pub trait Element:
    Copy + PartialOrd + fmt::Debug + fmt::Display + Default + Num + Send + Sync + 'static
{
    /// Default tolerance used by `almost_equal_default` and `is_normalized`.
    const TOLERANCE: Self;
    /// Whether the type can represent NaN.
    const HAS_NAN: bool;
    /// Whether the type can represent infinity.
    const HAS_INFINITY: bool;
    /// Smallest finite value.
    const MIN_VALUE: Self;
    /// Largest finite value.
    const MAX_VALUE: Self;

    /// Absolute value. For unsigned types this is the identity.
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn is_nan(self) -> bool;
    fn is_finite(self) -> bool;
    /// Lossy conversion to `f64`.
    fn as_f64(self) -> f64;
    /// Conversion from `f64`; integer types truncate toward zero and saturate.
    fn from_f64(x: f64) -> Self;
}

macro_rules! impl_element_int {
    ($($t:ty => $abs:expr),*) => {
        $(
        impl Element for $t
        {
            const TOLERANCE: Self = 0;
            const HAS_NAN: bool = false;
            const HAS_INFINITY: bool = false;
            const MIN_VALUE: Self = <$t>::MIN;
            const MAX_VALUE: Self = <$t>::MAX;

            #[inline]
            fn abs(self) -> Self
            {
                let f: fn($t) -> $t = $abs;
                f(self)
            }
            #[inline]
            fn floor(self) -> Self { self }
            #[inline]
            fn ceil(self) -> Self { self }
            #[inline]
            fn is_nan(self) -> bool { false }
            #[inline]
            fn is_finite(self) -> bool { true }
            #[inline]
            fn as_f64(self) -> f64
            {
                self.to_f64().unwrap_or(0.)
            }
            #[inline]
            fn from_f64(x: f64) -> Self
            {
                x as $t
            }
        }
        )*
    };
}

impl_element_int! {
    i8 => |x| x.wrapping_abs(),
    i16 => |x| x.wrapping_abs(),
    i32 => |x| x.wrapping_abs(),
    i64 => |x| x.wrapping_abs(),
    u8 => |x| x,
    u16 => |x| x,
    u32 => |x| x,
    u64 => |x| x
}

macro_rules! impl_element_float {
    ($($t:ident, $tol:expr);*) => {
        $(
        impl Element for $t
        {
            const TOLERANCE: Self = $tol;
            const HAS_NAN: bool = true;
            const HAS_INFINITY: bool = true;
            const MIN_VALUE: Self = $t::MIN;
            const MAX_VALUE: Self = $t::MAX;

            #[inline]
            fn abs(self) -> Self { $t::abs(self) }
            #[inline]
            fn floor(self) -> Self { $t::floor(self) }
            #[inline]
            fn ceil(self) -> Self { $t::ceil(self) }
            #[inline]
            fn is_nan(self) -> bool { $t::is_nan(self) }
            #[inline]
            fn is_finite(self) -> bool { $t::is_finite(self) }
            #[inline]
            fn as_f64(self) -> f64 { self as f64 }
            #[inline]
            fn from_f64(x: f64) -> Self { x as $t }
        }
        )*
    };
}

impl_element_float! {
    f32, 1.0e-5;
    f64, 1.0e-5
}
