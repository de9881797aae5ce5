/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! # Palette API
//!
//! Pixels on a [Canvas] are one byte indexes into a 256 entry [Palette]. Just before a frame
//! is presented the indexes are passed once more through a [PaletteMapping], which allows
//! swapping the displayed colors of the whole screen without touching the pixel data.
pub mod pixel;

use core::ops::{Index, IndexMut};

#[cfg(feature = "snapshot")]
use serde::{Serialize, Deserialize};

use crate::surface::Canvas;
pub use pixel::{PixelBuffer, PixelFormat};

/// A palette index of a single pixel.
pub type Color = u8;

/// The number of palette entries.
pub const PALETTE_SIZE: usize = 256;

/// A 24-bit color.
#[cfg_attr(feature = "snapshot", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8
}

/// Maps each [Color] to its displayed [Rgb] value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette(pub [Rgb; PALETTE_SIZE]);

/// A display palette swap applied only when the frame is presented.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteMapping(pub [Color; PALETTE_SIZE]);

const DEFAULT_COLORS: [u32; 16] = [
    0x000000, 0x1D2B53, 0x7E2553, 0x008751,
    0xAB5236, 0x5F574F, 0xC2C3C7, 0xFFF1E8,
    0xFF004D, 0xFFA300, 0xFFEC27, 0x00E436,
    0x29ADFF, 0x83769C, 0xFF77A8, 0xFFCCAA
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }
    /// Creates a color from a packed `0xRRGGBB` value.
    pub const fn from_hex(rgb: u32) -> Self {
        Rgb { r: (rgb >> 16) as u8, g: (rgb >> 8) as u8, b: rgb as u8 }
    }
    /// Returns the color packed as `0xRRGGBB`.
    pub const fn to_hex(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    #[inline]
    fn distance_sq(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr*dr + dg*dg + db*db) as u32
    }
}

impl Default for Palette {
    fn default() -> Self {
        let mut colors = [Rgb::default(); PALETTE_SIZE];
        for (color, &hex) in colors.iter_mut().zip(DEFAULT_COLORS.iter()) {
            *color = Rgb::from_hex(hex);
        }
        Palette(colors)
    }
}

impl Palette {
    /// Returns a palette with every entry set to black.
    pub fn black() -> Self {
        Palette([Rgb::default(); PALETTE_SIZE])
    }
    /// Returns the index of the entry nearest to `rgb`.
    ///
    /// On a tie the lowest index wins.
    pub fn closest(&self, rgb: Rgb) -> Color {
        let mut best = 0;
        let mut best_distance = u32::MAX;
        for (index, entry) in self.0.iter().enumerate() {
            let distance = entry.distance_sq(rgb);
            if distance < best_distance {
                best = index;
                best_distance = distance;
                if distance == 0 {
                    break
                }
            }
        }
        best as Color
    }
}

impl Index<Color> for Palette {
    type Output = Rgb;
    #[inline(always)]
    fn index(&self, color: Color) -> &Rgb {
        &self.0[color as usize]
    }
}

impl IndexMut<Color> for Palette {
    #[inline(always)]
    fn index_mut(&mut self, color: Color) -> &mut Rgb {
        &mut self.0[color as usize]
    }
}

impl Default for PaletteMapping {
    fn default() -> Self {
        let mut mapping = [0; PALETTE_SIZE];
        for (index, color) in mapping.iter_mut().enumerate() {
            *color = index as Color;
        }
        PaletteMapping(mapping)
    }
}

impl PaletteMapping {
    /// Restores the identity mapping.
    pub fn reset(&mut self) {
        *self = PaletteMapping::default();
    }
}

impl Index<Color> for PaletteMapping {
    type Output = Color;
    #[inline(always)]
    fn index(&self, color: Color) -> &Color {
        &self.0[color as usize]
    }
}

impl IndexMut<Color> for PaletteMapping {
    #[inline(always)]
    fn index_mut(&mut self, color: Color) -> &mut Color {
        &mut self.0[color as usize]
    }
}

/// Renders `canvas` pixels into the provided pixel `buffer`.
///
/// * `pitch` is the number of bytes in a single row of pixel data, including padding between lines.
/// * [PixelBuffer] implementation is used to write pixels into the `buffer`.
/// * [PixelFormat] implementation is used to create pixels from the [Rgb] colors.
///
/// Each pixel is first remapped by `mapping` and then looked up in `palette`.
/// Lines or pixels which do not fit into the `buffer` are silently skipped.
pub fn render_frame<'a, B, F>(
        canvas: &Canvas,
        palette: &Palette,
        mapping: &PaletteMapping,
        buffer: &'a mut [u8],
        pitch: usize
    )
    where B: PixelBuffer<'a>, F: PixelFormat<Pixel=B::Pixel>
{
    let width = canvas.width() as usize;
    if width == 0 || pitch == 0 {
        return
    }
    for (line, row) in buffer.chunks_mut(pitch).zip(canvas.data().chunks(width)) {
        let mut writer = B::from_line(line);
        for &color in row {
            writer.put_pixel(F::from_rgb(palette[mapping[color]]));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::pixel::{PixelBufA24, PixelBufA32, FormatRGB24, FormatRGBA32};

    #[test]
    fn rgb_hex_works() {
        assert_eq!(Rgb::from_hex(0x123456), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(Rgb::new(0xFF, 0x00, 0x4D).to_hex(), 0xFF004D);
    }

    #[test]
    fn palette_closest_works() {
        let palette = Palette::default();
        assert_eq!(palette.closest(Rgb::from_hex(0xFF004D)), 8);
        assert_eq!(palette.closest(Rgb::from_hex(0xFE014C)), 8);
        assert_eq!(palette.closest(Rgb::from_hex(0x000000)), 0);
        assert_eq!(palette.closest(Rgb::from_hex(0xFFFFFF)), 7);
        assert_eq!(Palette::black().closest(Rgb::from_hex(0xFFFFFF)), 0);
    }

    #[test]
    fn render_frame_works() {
        let mut canvas = Canvas::new(2, 2);
        canvas.set(0, 0, 8);
        canvas.set(1, 1, 7);
        let palette = Palette::default();
        let mut mapping = PaletteMapping::default();
        let mut buffer = vec![0u8; 2*2*3];
        render_frame::<PixelBufA24, FormatRGB24>(&canvas, &palette, &mapping, &mut buffer, 2*3);
        assert_eq!(buffer, [0xFF, 0x00, 0x4D, 0, 0, 0,
                            0, 0, 0, 0xFF, 0xF1, 0xE8]);

        mapping[8] = 0;
        mapping[0] = 12;
        let mut buffer = vec![0u8; 2*2*4 + 4];
        render_frame::<PixelBufA32, FormatRGBA32>(&canvas, &palette, &mapping, &mut buffer, 2*4 + 4);
        assert_eq!(&buffer[..8], &[0, 0, 0, 255, 0x29, 0xAD, 0xFF, 255]);
        assert_eq!(&buffer[8..12], &[0, 0, 0, 0]);
        mapping.reset();
        assert_eq!(mapping, PaletteMapping::default());
    }
}
