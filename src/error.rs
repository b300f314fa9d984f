// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::borrow::Cow;
use std::error::Error;
use std::fmt;
use std::io;

/// An error related to container shape, layout or stream format.
///
/// Every fallible operation of the crate reports one of these; use
/// [`.kind()`](ArrayError::kind) to tell the conditions apart.
#[derive(Clone, Debug)]
pub struct ArrayError
{
    // we want to be able to change this representation later
    repr: ErrorKind,
    context: Cow<'static, str>,
}

impl ArrayError
{
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind
    {
        self.repr
    }

    /// Create a new `ArrayError` from the given kind and context message.
    pub fn new(kind: ErrorKind, context: impl Into<Cow<'static, str>>) -> Self
    {
        ArrayError {
            repr: kind,
            context: context.into(),
        }
    }

    /// Create a new `ArrayError` with no context message.
    #[inline]
    pub fn from_kind(kind: ErrorKind) -> Self
    {
        from_kind(kind)
    }
}

/// Error code for an error related to container shape, layout or stream format.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind
{
    /// element, scalar or view index outside of the valid range
    IndexOutOfRange,
    /// operands with incompatible sizes
    SizeMismatch,
    /// sizes match but the memory layouts can't be copied in bulk
    IncompatibleLayout,
    /// destination memory overlaps an operand
    Aliasing,
    /// text stream uses another delimiter than the one requested
    DelimiterMismatch,
    /// truncated, oversized or otherwise malformed stream
    StreamCorrupt,
    /// element type without a numeric scalar decomposition
    UnsupportedElementType,
}

#[inline(always)]
pub fn from_kind(k: ErrorKind) -> ArrayError
{
    ArrayError {
        repr: k,
        context: Cow::Borrowed(""),
    }
}

impl PartialEq for ArrayError
{
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool
    {
        self.repr == rhs.repr
    }
}

impl Eq for ArrayError {}

impl ErrorKind
{
    fn description(self) -> &'static str
    {
        match self {
            ErrorKind::IndexOutOfRange => "index out of range",
            ErrorKind::SizeMismatch => "incompatible sizes",
            ErrorKind::IncompatibleLayout => "incompatible layout for a fast copy",
            ErrorKind::Aliasing => "destination overlaps an operand",
            ErrorKind::DelimiterMismatch => "unexpected delimiter in text stream",
            ErrorKind::StreamCorrupt => "corrupt or truncated stream",
            ErrorKind::UnsupportedElementType => "element type has no scalar decomposition",
        }
    }
}

impl Error for ArrayError {}

impl fmt::Display for ArrayError
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        if self.context.is_empty() {
            f.write_str(self.repr.description())
        } else {
            write!(f, "{}: {}", self.repr.description(), self.context)
        }
    }
}

impl From<io::Error> for ArrayError
{
    fn from(err: io::Error) -> Self
    {
        ArrayError::new(ErrorKind::StreamCorrupt, err.to_string())
    }
}

pub(crate) fn index_out_of_range(context: impl Into<Cow<'static, str>>) -> ArrayError
{
    ArrayError::new(ErrorKind::IndexOutOfRange, context)
}

pub(crate) fn incompatible_shapes(a: &[usize], b: &[usize]) -> ArrayError
{
    ArrayError::new(ErrorKind::SizeMismatch, format!("shapes {:?} and {:?}", a, b))
}

pub(crate) fn stream_corrupt(context: impl Into<Cow<'static, str>>) -> ArrayError
{
    ArrayError::new(ErrorKind::StreamCorrupt, context)
}
