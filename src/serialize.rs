// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binary and delimited text streams of values and containers.
//!
//! Both encodings write the same sequence a value decomposes into in
//! [`data_model`](crate::data_model): the axis lengths of dynamic
//! containers first, then the elements in row major order, recursively.
//! Reading into an owned container resizes it to the recorded shape;
//! reading into a view or a fixed-size container checks the shape instead.
//!
//! A binary stream starts with a header describing the writer's
//! [`DataFormat`]. Readers on a machine with a different byte order swap
//! the bytes of every number.
//!
//! ```
//! use ndcontainer::serialize::{from_binary, from_text, to_binary, to_text};
//! use ndcontainer::{arr2, Array2, ErrorKind};
//!
//! let m = arr2(&[[1.5, -2.], [0.25, 8.]]);
//!
//! let bytes = to_binary(&m).unwrap();
//! assert_eq!(from_binary::<Array2<f64>>(&bytes).unwrap(), m);
//!
//! let text = to_text(&m, '|');
//! assert_eq!(text, "2|2|1.5|-2|0.25|8|");
//! assert_eq!(from_text::<Array2<f64>>(&text, '|').unwrap(), m);
//! let err = from_text::<Array2<f64>>(&text, ',').unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::DelimiterMismatch);
//! ```

use std::io::{Read, Write};
use std::mem;
use std::str::FromStr;

use crate::error::{self, ArrayError, ErrorKind};
use crate::fixed::{FixedArray3, FixedContainer, FixedMatrix, FixedVector};
use crate::iterators::IterMut;
use crate::order::Order;
use crate::{Array, ArrayBase, ArrayViewMut, Data, Dimension};

const MAGIC: &[u8; 4] = b"NDCS";
const VERSION: u8 = 1;

/// Byte order of the numbers in a binary stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endianness
{
    Little,
    Big,
}

impl Endianness
{
    /// The byte order of this machine.
    pub const fn native() -> Self
    {
        if cfg!(target_endian = "big") {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

/// Width of the axis lengths and string lengths in a binary stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SizeWidth
{
    U32,
    U64,
}

impl SizeWidth
{
    /// The width of `usize` on this machine.
    pub const fn native() -> Self
    {
        if cfg!(target_pointer_width = "64") {
            SizeWidth::U64
        } else {
            SizeWidth::U32
        }
    }

    fn bytes(self) -> u8
    {
        match self {
            SizeWidth::U32 => 4,
            SizeWidth::U64 => 8,
        }
    }
}

/// The description of a binary stream, recorded in its header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DataFormat
{
    pub endianness: Endianness,
    pub size_width: SizeWidth,
}

impl Default for DataFormat
{
    fn default() -> Self
    {
        Self::native()
    }
}

impl DataFormat
{
    /// The format this machine writes.
    pub const fn native() -> Self
    {
        DataFormat {
            endianness: Endianness::native(),
            size_width: SizeWidth::native(),
        }
    }

    /// The seven header bytes: magic, version, byte order and size width.
    fn header_bytes(&self) -> [u8; 7]
    {
        let endianness = match self.endianness {
            Endianness::Little => 0,
            Endianness::Big => 1,
        };
        let [m0, m1, m2, m3] = *MAGIC;
        [m0, m1, m2, m3, VERSION, endianness, self.size_width.bytes()]
    }

    /// Write the header of a stream in the [`native`](Self::native) format,
    /// the only one the binary writers produce.
    pub fn write_header<W: Write + ?Sized>(w: &mut W) -> Result<(), ArrayError>
    {
        w.write_all(&Self::native().header_bytes())?;
        Ok(())
    }

    /// Read and validate a stream header.
    ///
    /// **Errors** with `StreamCorrupt` if the header is truncated, isn't
    /// one of ours, or has an unknown version.
    pub fn read_header<Rd: Read + ?Sized>(r: &mut Rd) -> Result<Self, ArrayError>
    {
        let mut header = [0u8; 7];
        r.read_exact(&mut header)?;
        if &header[..4] != MAGIC {
            return Err(error::stream_corrupt("not a binary container stream"));
        }
        if header[4] != VERSION {
            return Err(error::stream_corrupt(format!("unknown stream version: {}", header[4])));
        }
        let endianness = match header[5] {
            0 => Endianness::Little,
            1 => Endianness::Big,
            b => return Err(error::stream_corrupt(format!("unknown byte order: {}", b))),
        };
        let size_width = match header[6] {
            4 => SizeWidth::U32,
            8 => SizeWidth::U64,
            b => return Err(error::stream_corrupt(format!("unknown size width: {}", b))),
        };
        Ok(DataFormat { endianness, size_width })
    }
}

/// Values that can be written to a binary stream.
pub trait BinarySerialize
{
    /// Write the body of `self` in the native format, without a header.
    fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>;
}

/// Values that can be read back from a binary stream.
pub trait BinaryDeserialize
{
    /// Read a body written in `format` into `self`.
    fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>;
}

/// Values that can be written to a delimited text stream.
pub trait TextSerialize
{
    /// Append the scalars of `self` to `out`, each followed by `delimiter`.
    fn serialize_text(&self, out: &mut String, delimiter: char);
}

/// Values that can be read back from a delimited text stream.
pub trait TextDeserialize
{
    fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>;
}

/// A cursor over a delimited text stream.
///
/// Every token must be followed by the delimiter the reader was created
/// with; a stream written with another delimiter fails with
/// `DelimiterMismatch` instead of being split at the wrong places.
#[derive(Clone, Debug)]
pub struct TextReader<'a>
{
    input: &'a str,
    delimiter: char,
}

/// Characters that can't appear in a number token: finding one in a token
/// that fails to parse means the stream uses another delimiter.
fn is_foreign_separator(c: char) -> bool
{
    !(c.is_alphanumeric() || c == '+' || c == '-' || c == '.')
}

impl<'a> TextReader<'a>
{
    pub fn new(input: &'a str, delimiter: char) -> Self
    {
        TextReader { input, delimiter }
    }

    pub fn delimiter(&self) -> char
    {
        self.delimiter
    }

    /// Return `true` if the whole stream has been consumed.
    pub fn is_empty(&self) -> bool
    {
        self.input.is_empty()
    }

    /// Return the next token, without its delimiter.
    ///
    /// **Errors** with `StreamCorrupt` at the end of the stream and with
    /// `DelimiterMismatch` if the rest of the stream has no delimiter.
    pub fn next_token(&mut self) -> Result<&'a str, ArrayError>
    {
        if self.input.is_empty() {
            return Err(error::stream_corrupt("unexpected end of text stream"));
        }
        match self.input.find(self.delimiter) {
            Some(end) => {
                let token = &self.input[..end];
                self.input = &self.input[end + self.delimiter.len_utf8()..];
                Ok(token)
            }
            None => {
                let rest: String = self.input.chars().take(16).collect();
                Err(ArrayError::new(
                    ErrorKind::DelimiterMismatch,
                    format!("expected {:?} after {:?}", self.delimiter, rest),
                ))
            }
        }
    }

    /// Parse the next token.
    pub fn parse<T: FromStr>(&mut self) -> Result<T, ArrayError>
    {
        let token = self.next_token()?;
        token.parse().map_err(|_| {
            if token.chars().any(is_foreign_separator) {
                ArrayError::new(
                    ErrorKind::DelimiterMismatch,
                    format!("token {:?} isn't separated by {:?}", token, self.delimiter),
                )
            } else {
                error::stream_corrupt(format!("can't parse {:?}", token))
            }
        })
    }
}

fn write_size<W: Write + ?Sized>(w: &mut W, n: usize) -> Result<(), ArrayError>
{
    w.write_all(&n.to_ne_bytes())?;
    Ok(())
}

fn read_size<Rd: Read + ?Sized>(r: &mut Rd, format: &DataFormat) -> Result<usize, ArrayError>
{
    let n = match format.size_width {
        SizeWidth::U32 => {
            let mut n = 0u32;
            n.deserialize_binary(r, format)?;
            u64::from(n)
        }
        SizeWidth::U64 => {
            let mut n = 0u64;
            n.deserialize_binary(r, format)?;
            n
        }
    };
    usize::try_from(n).map_err(|_| error::stream_corrupt(format!("size {} doesn't fit in usize", n)))
}

macro_rules! impl_stream_leaf {
    ($t:ty) => {
        impl BinarySerialize for $t
        {
            fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>
            {
                w.write_all(&self.to_ne_bytes())?;
                Ok(())
            }
        }

        impl BinaryDeserialize for $t
        {
            fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>
            {
                let mut buf = [0u8; mem::size_of::<$t>()];
                r.read_exact(&mut buf)?;
                *self = match format.endianness {
                    Endianness::Little => <$t>::from_le_bytes(buf),
                    Endianness::Big => <$t>::from_be_bytes(buf),
                };
                Ok(())
            }
        }

        impl TextSerialize for $t
        {
            fn serialize_text(&self, out: &mut String, delimiter: char)
            {
                out.push_str(&self.to_string());
                out.push(delimiter);
            }
        }

        impl TextDeserialize for $t
        {
            fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
            {
                *self = reader.parse()?;
                Ok(())
            }
        }
    };
}

for_each_numeric!(impl_stream_leaf);

impl BinarySerialize for bool
{
    fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>
    {
        w.write_all(&[*self as u8])?;
        Ok(())
    }
}

impl BinaryDeserialize for bool
{
    fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, _format: &DataFormat) -> Result<(), ArrayError>
    {
        let mut b = [0u8];
        r.read_exact(&mut b)?;
        *self = match b[0] {
            0 => false,
            1 => true,
            x => return Err(error::stream_corrupt(format!("invalid bool byte {}", x))),
        };
        Ok(())
    }
}

impl TextSerialize for bool
{
    fn serialize_text(&self, out: &mut String, delimiter: char)
    {
        out.push(if *self { '1' } else { '0' });
        out.push(delimiter);
    }
}

impl TextDeserialize for bool
{
    fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
    {
        *self = reader.parse::<u8>()? != 0;
        Ok(())
    }
}

impl BinarySerialize for String
{
    fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>
    {
        write_size(w, self.len())?;
        w.write_all(self.as_bytes())?;
        Ok(())
    }
}

impl BinaryDeserialize for String
{
    fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>
    {
        let len = read_size(r, format)?;
        let mut bytes = Vec::new();
        (&mut *r).take(len as u64).read_to_end(&mut bytes)?;
        if bytes.len() != len {
            return Err(error::stream_corrupt(format!("string of {} bytes truncated to {}", len, bytes.len())));
        }
        *self = String::from_utf8(bytes).map_err(|e| error::stream_corrupt(e.to_string()))?;
        Ok(())
    }
}

/// Strings are written verbatim and must not contain the delimiter.
impl TextSerialize for String
{
    fn serialize_text(&self, out: &mut String, delimiter: char)
    {
        out.push_str(self);
        out.push(delimiter);
    }
}

impl TextDeserialize for String
{
    fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
    {
        *self = reader.next_token()?.to_string();
        Ok(())
    }
}

impl<A, S, D> BinarySerialize for ArrayBase<S, D>
where
    A: BinarySerialize,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>
    {
        for &len in self.shape() {
            write_size(w, len)?;
        }
        for elt in self.iter_logical() {
            elt.serialize_binary(w)?;
        }
        Ok(())
    }
}

impl<A, S, D> TextSerialize for ArrayBase<S, D>
where
    A: TextSerialize,
    S: Data<Elem = A>,
    D: Dimension,
{
    fn serialize_text(&self, out: &mut String, delimiter: char)
    {
        for &len in self.shape() {
            out.push_str(&len.to_string());
            out.push(delimiter);
        }
        for elt in self.iter_logical() {
            elt.serialize_text(out, delimiter);
        }
    }
}

fn checked_len<D: Dimension>(dim: &D) -> Result<usize, ArrayError>
{
    dim.size_checked()
        .ok_or_else(|| error::stream_corrupt(format!("shape {:?} overflows", dim.slice())))
}

/// Owned containers are resized to the shape recorded in the stream.
impl<A, D> BinaryDeserialize for Array<A, D>
where
    A: BinaryDeserialize + Default,
    D: Dimension,
{
    fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>
    {
        let mut dim = D::default();
        for len in dim.slice_mut() {
            *len = read_size(r, format)?;
        }
        let n = checked_len(&dim)?;
        // grow with the stream so a corrupt shape can't force a huge allocation
        let mut elems = Vec::new();
        for _ in 0..n {
            let mut elt = A::default();
            elt.deserialize_binary(r, format)?;
            elems.push(elt);
        }
        *self = Array::from_shape_vec(dim, elems)?;
        Ok(())
    }
}

impl<A, D> TextDeserialize for Array<A, D>
where
    A: TextDeserialize + Default,
    D: Dimension,
{
    fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
    {
        let mut dim = D::default();
        for len in dim.slice_mut() {
            *len = reader.parse()?;
        }
        let n = checked_len(&dim)?;
        let mut elems = Vec::new();
        for _ in 0..n {
            let mut elt = A::default();
            elt.deserialize_text(reader)?;
            elems.push(elt);
        }
        *self = Array::from_shape_vec(dim, elems)?;
        Ok(())
    }
}

fn check_recorded_shape(recorded: &[usize], expected: &[usize]) -> Result<(), ArrayError>
{
    if recorded == expected {
        Ok(())
    } else {
        Err(error::incompatible_shapes(recorded, expected))
    }
}

/// Views can't be resized: the recorded shape must match.
impl<'a, A, D> BinaryDeserialize for ArrayViewMut<'a, A, D>
where
    A: BinaryDeserialize,
    D: Dimension,
{
    fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>
    {
        let mut dim = D::default();
        for len in dim.slice_mut() {
            *len = read_size(r, format)?;
        }
        check_recorded_shape(dim.slice(), self.shape())?;
        for elt in IterMut::new(self.view_mut(), Order::RowMajor) {
            elt.deserialize_binary(r, format)?;
        }
        Ok(())
    }
}

impl<'a, A, D> TextDeserialize for ArrayViewMut<'a, A, D>
where
    A: TextDeserialize,
    D: Dimension,
{
    fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
    {
        let mut dim = D::default();
        for len in dim.slice_mut() {
            *len = reader.parse()?;
        }
        check_recorded_shape(dim.slice(), self.shape())?;
        for elt in IterMut::new(self.view_mut(), Order::RowMajor) {
            elt.deserialize_text(reader)?;
        }
        Ok(())
    }
}

macro_rules! impl_stream_fixed {
    ([$($cg:tt)*] $ty:ty) => {
        impl<A: BinarySerialize + Copy, $($cg)*> BinarySerialize for $ty
        {
            fn serialize_binary<W: Write + ?Sized>(&self, w: &mut W) -> Result<(), ArrayError>
            {
                for elt in self.view().iter() {
                    elt.serialize_binary(w)?;
                }
                Ok(())
            }
        }

        impl<A: BinaryDeserialize + Copy, $($cg)*> BinaryDeserialize for $ty
        {
            fn deserialize_binary<Rd: Read + ?Sized>(&mut self, r: &mut Rd, format: &DataFormat) -> Result<(), ArrayError>
            {
                for elt in self.view_mut().iter_mut() {
                    elt.deserialize_binary(r, format)?;
                }
                Ok(())
            }
        }

        impl<A: TextSerialize + Copy, $($cg)*> TextSerialize for $ty
        {
            fn serialize_text(&self, out: &mut String, delimiter: char)
            {
                for elt in self.view().iter() {
                    elt.serialize_text(out, delimiter);
                }
            }
        }

        impl<A: TextDeserialize + Copy, $($cg)*> TextDeserialize for $ty
        {
            fn deserialize_text(&mut self, reader: &mut TextReader<'_>) -> Result<(), ArrayError>
            {
                for elt in self.view_mut().iter_mut() {
                    elt.deserialize_text(reader)?;
                }
                Ok(())
            }
        }
    };
}

impl_stream_fixed!([const N: usize] FixedVector<A, N>);
impl_stream_fixed!([const R: usize, const C: usize] FixedMatrix<A, R, C>);
impl_stream_fixed!([const P: usize, const R: usize, const C: usize] FixedArray3<A, P, R, C>);

/// Write a header in the native format followed by `value`.
///
/// Several values can share one header: call
/// [`DataFormat::write_header`] once and then
/// [`serialize_binary`](BinarySerialize::serialize_binary) for each.
pub fn write_binary<W, T>(w: &mut W, value: &T) -> Result<(), ArrayError>
where
    W: Write + ?Sized,
    T: BinarySerialize + ?Sized,
{
    DataFormat::write_header(w)?;
    value.serialize_binary(w)
}

/// Return the binary stream of `value`, header included.
pub fn to_binary<T>(value: &T) -> Result<Vec<u8>, ArrayError>
where T: BinarySerialize + ?Sized
{
    let mut buf = Vec::new();
    write_binary(&mut buf, value)?;
    Ok(buf)
}

/// Read a header and then a value into `value`.
///
/// **Errors** with `StreamCorrupt` if the header is invalid or the stream
/// ends early, and with `SizeMismatch` if `value` can't be resized to the
/// recorded shape.
pub fn read_binary<R, T>(r: &mut R, value: &mut T) -> Result<(), ArrayError>
where
    R: Read + ?Sized,
    T: BinaryDeserialize + ?Sized,
{
    let format = DataFormat::read_header(r)?;
    if format.endianness != Endianness::native() {
        log::debug!("byte swapping {:?} endian stream", format.endianness);
    }
    value.deserialize_binary(r, &format)
}

/// Read a value from a complete binary stream.
///
/// **Errors** with `StreamCorrupt` if `bytes` holds more or less than one
/// value.
pub fn from_binary<T>(bytes: &[u8]) -> Result<T, ArrayError>
where T: BinaryDeserialize + Default
{
    let mut r = bytes;
    let mut value = T::default();
    read_binary(&mut r, &mut value)?;
    if !r.is_empty() {
        return Err(error::stream_corrupt(format!("{} trailing bytes", r.len())));
    }
    Ok(value)
}

/// Return the text stream of `value`, each scalar followed by `delimiter`.
pub fn to_text<T>(value: &T, delimiter: char) -> String
where T: TextSerialize + ?Sized
{
    let mut out = String::new();
    value.serialize_text(&mut out, delimiter);
    out
}

/// Read `text` into `value`.
///
/// **Errors** with `DelimiterMismatch` if `text` was written with another
/// delimiter and with `StreamCorrupt` if it is truncated, malformed or has
/// trailing data.
pub fn read_text<T>(text: &str, delimiter: char, value: &mut T) -> Result<(), ArrayError>
where T: TextDeserialize + ?Sized
{
    let mut reader = TextReader::new(text, delimiter);
    value.deserialize_text(&mut reader)?;
    if !reader.is_empty() {
        return Err(error::stream_corrupt("trailing data in text stream"));
    }
    Ok(())
}

/// Read a value from a complete text stream.
pub fn from_text<T>(text: &str, delimiter: char) -> Result<T, ArrayError>
where T: TextDeserialize + Default
{
    let mut value = T::default();
    read_text(text, delimiter, &mut value)?;
    Ok(value)
}
