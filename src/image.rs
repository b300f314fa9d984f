// Copyright 2014-2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Byte images as three-dimensional containers.
//!
//! An image is a `height × width × channels` container of bytes, so a row
//! major image has the memory layout of an interleaved pixel buffer (as
//! delivered by capture devices) and pixels move in and out with a single
//! copy.
//!
//! ```
//! use ndcontainer::image::ImageBuffer;
//!
//! let rgb = [255u8, 0, 0, 0, 255, 0, 0, 0, 255, 9, 9, 9];
//! let img = ImageBuffer::from_pixels(2, 2, 3, &rgb).unwrap();
//! assert_eq!((img.width(), img.height(), img.channels()), (2, 2, 3));
//! assert_eq!(img[[1, 0, 2]], 255);
//! ```

use std::ptr;

use crate::error::{self, ArrayError};
use crate::{Array3, ArrayBase, Data, DataMut, Ix3};

/// An owned `height × width × channels` byte image.
pub type ImageBuffer = Array3<u8>;

fn check_pixels(shape: &[usize], len: usize) -> Result<(), ArrayError>
{
    if shape.iter().product::<usize>() == len {
        Ok(())
    } else {
        Err(error::incompatible_shapes(shape, &[len]))
    }
}

impl ImageBuffer
{
    /// Create an image from an interleaved, row by row pixel buffer.
    ///
    /// **Errors** with `SizeMismatch` unless `pixels` holds exactly
    /// `width * height * channels` bytes.
    pub fn from_pixels(width: usize, height: usize, channels: usize, pixels: &[u8]) -> Result<Self, ArrayError>
    {
        check_pixels(&[height, width, channels], pixels.len())?;
        Self::from_shape_vec((height, width, channels), pixels.to_vec())
    }
}

/// # Image Methods
impl<S> ArrayBase<S, Ix3>
where S: Data<Elem = u8>
{
    pub fn height(&self) -> usize
    {
        self.dim[0]
    }

    pub fn width(&self) -> usize
    {
        self.dim[1]
    }

    pub fn channels(&self) -> usize
    {
        self.dim[2]
    }

    /// Copy the image into an interleaved pixel buffer of the same size.
    ///
    /// **Errors** with `SizeMismatch` if the lengths differ.
    pub fn copy_to_pixels(&self, pixels: &mut [u8]) -> Result<(), ArrayError>
    {
        check_pixels(self.shape(), pixels.len())?;
        match self.as_slice() {
            Some(src) => pixels.copy_from_slice(src),
            None => {
                for (dst, &src) in pixels.iter_mut().zip(self.iter_logical()) {
                    *dst = src;
                }
            }
        }
        Ok(())
    }
}

impl<S> ArrayBase<S, Ix3>
where S: DataMut<Elem = u8>
{
    /// Copy an interleaved pixel buffer of the same size into the image.
    ///
    /// **Errors** with `SizeMismatch` if the lengths differ.
    pub fn copy_from_pixels(&mut self, pixels: &[u8]) -> Result<(), ArrayError>
    {
        check_pixels(self.shape(), pixels.len())?;
        if self.is_standard_layout() {
            unsafe {
                ptr::copy_nonoverlapping(pixels.as_ptr(), self.as_mut_ptr(), pixels.len());
            }
        } else {
            let src = crate::ArrayView::from_shape(self.raw_dim(), pixels)?;
            self.zip_mut_with_same_shape(&src, |x, &y| *x = y);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::{Axis, ErrorKind};

    #[test]
    fn pixel_round_trip()
    {
        let pixels: Vec<u8> = (0..24).collect();
        let img = ImageBuffer::from_pixels(4, 2, 3, &pixels).unwrap();
        assert_eq!(img.shape(), &[2, 4, 3]);
        // second row, first pixel, green
        assert_eq!(img[[1, 0, 1]], 13);
        let mut out = vec![0; 24];
        img.copy_to_pixels(&mut out).unwrap();
        assert_eq!(out, pixels);
        assert_eq!(
            ImageBuffer::from_pixels(4, 2, 4, &pixels).unwrap_err().kind(),
            ErrorKind::SizeMismatch
        );
    }

    #[test]
    fn strided_views_copy_elementwise()
    {
        let pixels: Vec<u8> = (0..12).collect();
        let mut img = ImageBuffer::zeros((2, 2, 3));
        {
            // mirrored image: columns reversed
            let mut mirrored = img.view_mut();
            mirrored.invert_axis(Axis(1));
            mirrored.copy_from_pixels(&pixels).unwrap();
        }
        assert_eq!(&img.as_slice().unwrap()[..3], &[3, 4, 5]);
        let mut back = vec![0; 12];
        img.view().reversed_axes().copy_to_pixels(&mut back).unwrap();
        assert_eq!(back[1], 9);
        assert!(img.copy_to_pixels(&mut back[..6]).is_err());
    }
}
