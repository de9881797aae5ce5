/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Building blocks for presenting frames in host pixel formats.
use core::slice::IterMut;

use super::Rgb;

/// Writes host pixels into a single line of a frame buffer.
pub trait PixelBuffer<'a> {
    type Pixel: Copy;
    /// Wraps the bytes of one line of the frame buffer.
    fn from_line(line_buffer: &'a mut [u8]) -> Self;
    /// Writes `pixel` at the cursor and moves the cursor right.
    ///
    /// Pixels past the end of the line are dropped.
    fn put_pixel(&mut self, pixel: Self::Pixel);
}

/// A trait used for converting palette colors to host pixels.
pub trait PixelFormat {
    /// Specifies the type used for pixels.
    type Pixel: Copy;
    /// Should return a pixel representing the given color.
    fn from_rgb(rgb: Rgb) -> Self::Pixel;
}

/// Byte triples, 3 bytes per pixel.
pub struct PixelBufA24<'a> {
    iter: IterMut<'a, [u8;3]>
}

/// Byte quads, 4 bytes per pixel.
pub struct PixelBufA32<'a> {
    iter: IterMut<'a, [u8;4]>
}

/// Native endian `u32` words. Unaligned leading bytes of a line are skipped.
pub struct PixelBufP32<'a> {
    iter: IterMut<'a, u32>
}

/// Native endian `u16` words. Unaligned leading bytes of a line are skipped.
pub struct PixelBufP16<'a> {
    iter: IterMut<'a, u16>
}

/// [PixelFormat] to be used with [PixelBufA24].
pub struct FormatRGB24;

/// [PixelFormat] to be used with [PixelBufA32].
pub struct FormatRGBA32;

/// [PixelFormat] to be used with [PixelBufA32].
pub struct FormatARGB32;

/// [PixelFormat] to be used with [PixelBufP32].
pub struct FormatA8R8G8B8;

/// [PixelFormat] to be used with [PixelBufP32].
pub struct FormatR8G8B8A8;

/// [PixelFormat] to be used with [PixelBufP16].
pub struct FormatR5G6B5;

macro_rules! impl_pixel_buffer {
    ($pixel_buf:ty, $pixel:ty) => {
        impl<'a> PixelBuffer<'a> for $pixel_buf {
            type Pixel = $pixel;

            fn from_line(line_buffer: &'a mut [u8]) -> Self {
                let (_, pixels, _) = unsafe { line_buffer.align_to_mut::<Self::Pixel>() };
                let iter = pixels.iter_mut();
                Self { iter }
            }

            #[inline]
            fn put_pixel(&mut self, pixel: Self::Pixel) {
                if let Some(dest) = self.iter.next() {
                    *dest = pixel;
                }
            }
        }
    };
}

impl_pixel_buffer!(PixelBufA24<'a>, [u8;3]);
impl_pixel_buffer!(PixelBufA32<'a>, [u8;4]);
impl_pixel_buffer!(PixelBufP32<'a>, u32);
impl_pixel_buffer!(PixelBufP16<'a>, u16);

const ALPHA_MAX: u8 = u8::MAX;

#[inline(always)]
const fn pack_8888(a: u8, b: u8, c: u8, d: u8) -> u32 {
    ((a as u32) << 24) | ((b as u32) << 16) | ((c as u32) << 8) | (d as u32)
}

#[inline(always)]
const fn pack_565(a: u8, b: u8, c: u8) -> u16 {
    (((a as u16) >> 3) << 11) | (((b as u16) >> 2) << 5) | ((c as u16) >> 3)
}

macro_rules! impl_pixel_format {
    ($format:ty, $pixel:ty, |$rgb:ident| $ex:expr) => {
        impl PixelFormat for $format {
            type Pixel = $pixel;
            #[inline(always)]
            fn from_rgb($rgb: Rgb) -> Self::Pixel {
                $ex
            }
        }
    };
}

impl_pixel_format!(FormatRGB24, [u8;3], |c| [c.r, c.g, c.b]);
impl_pixel_format!(FormatRGBA32, [u8;4], |c| [c.r, c.g, c.b, ALPHA_MAX]);
impl_pixel_format!(FormatARGB32, [u8;4], |c| [ALPHA_MAX, c.r, c.g, c.b]);
impl_pixel_format!(FormatA8R8G8B8, u32, |c| pack_8888(ALPHA_MAX, c.r, c.g, c.b));
impl_pixel_format!(FormatR8G8B8A8, u32, |c| pack_8888(c.r, c.g, c.b, ALPHA_MAX));
impl_pixel_format!(FormatR5G6B5, u16, |c| pack_565(c.r, c.g, c.b));
