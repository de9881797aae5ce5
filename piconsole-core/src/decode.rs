/*
    Copyright (C) 2026  PICONSOLE contributors

    This file is part of PICONSOLE, a Rust library for building fantasy consoles.

    For the full copyright notice, see the lib.rs file.
*/
//! Decoding of PNG images into canvases and palettes.
//!
//! Requires "png" feature to be enabled.
use core::fmt;
use std::collections::HashMap;
use std::error::Error;

#[allow(unused_imports)]
use log::{error, warn, info, debug, trace};

use png::{BitDepth, ColorType, Decoder, Reader, Transformations};

use crate::palette::{Color, Palette, Rgb, PALETTE_SIZE};
use crate::surface::Canvas;

/// Non-indexed images with more pixels than this are reported as slow to decode.
pub const SLOW_DECODE_WARN_PIXELS: usize = 128*128;

/// An error returned by the decoding functions.
#[non_exhaustive]
#[derive(Debug)]
pub enum DecodeError {
    /// The image could not be read.
    Png(png::DecodingError),
    /// The image has a color type or bit depth which can't be handled.
    UnsupportedFormat(String),
    /// The image holds more distinct colors than a palette can.
    TooManyColors(usize),
    /// The image is too large to fit in a canvas.
    InvalidSize { width: u32, height: u32 }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecodeError::Png(err) => Some(err),
            _ => None
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Png(err) => write!(f, "PNG decoding failed: {}", err),
            DecodeError::UnsupportedFormat(desc) => write!(f, "unsupported image format: {}", desc),
            DecodeError::TooManyColors(count) =>
                write!(f, "image has {} colors, the palette can hold only {}", count, PALETTE_SIZE),
            DecodeError::InvalidSize { width, height } =>
                write!(f, "image size {}x{} is not supported", width, height)
        }
    }
}

impl From<png::DecodingError> for DecodeError {
    fn from(err: png::DecodingError) -> Self {
        DecodeError::Png(err)
    }
}

/// Decodes a PNG image into a [Canvas] of `palette` indexes.
///
/// An 8-bit indexed image whose embedded palette is equal to the leading entries of `palette`
/// is copied as is. Every other image has each of its pixels mapped to the closest `palette`
/// entry. Transparency is ignored.
pub fn decode_png(bytes: &[u8], palette: &Palette) -> Result<Canvas, DecodeError> {
    let mut reader = read_info(bytes, Transformations::IDENTITY)?;
    if let Some(canvas) = decode_matching_indexed(&mut reader, palette)? {
        return Ok(canvas)
    }
    let mut reader = read_info(bytes, Transformations::EXPAND | Transformations::STRIP_16)?;
    let (width, height) = canvas_size(&reader)?;
    if width as usize * height as usize > SLOW_DECODE_WARN_PIXELS
       && reader.info().color_type != ColorType::Indexed {
        warn!("decoding {}x{} non-indexed image, mapping each pixel to the closest palette color",
              width, height);
    }
    let mut canvas = Canvas::new(width, height);
    let mut cache: HashMap<Rgb, Color> = HashMap::new();
    for_each_rgb(&mut reader, |index, rgb| {
        let color = *cache.entry(rgb).or_insert_with(|| palette.closest(rgb));
        canvas.data_mut()[index] = color;
    })?;
    Ok(canvas)
}

/// Decodes a palette from a PNG image.
///
/// The embedded palette of an indexed image is used directly. Otherwise the distinct colors of
/// the image, in the order of their first appearance, become the palette entries. Entries not
/// present in the image are black.
pub fn decode_palette(bytes: &[u8]) -> Result<Palette, DecodeError> {
    let reader = read_info(bytes, Transformations::IDENTITY)?;
    let mut palette = Palette::black();
    if reader.info().color_type == ColorType::Indexed {
        if let Some(entries) = reader.info().palette.as_ref() {
            for (color, rgb) in palette.0.iter_mut().zip(entries.chunks_exact(3)) {
                *color = Rgb::new(rgb[0], rgb[1], rgb[2]);
            }
            return Ok(palette)
        }
    }
    let mut reader = read_info(bytes, Transformations::EXPAND | Transformations::STRIP_16)?;
    let mut colors: Vec<Rgb> = Vec::new();
    let mut seen: HashMap<Rgb, ()> = HashMap::new();
    for_each_rgb(&mut reader, |_, rgb| {
        if seen.insert(rgb, ()).is_none() {
            colors.push(rgb);
        }
    })?;
    if colors.len() > PALETTE_SIZE {
        return Err(DecodeError::TooManyColors(colors.len()))
    }
    for (entry, rgb) in palette.0.iter_mut().zip(colors) {
        *entry = rgb;
    }
    Ok(palette)
}

/// Calls [decode_png] and panics on error.
///
/// # Panics
/// Panics if the image can't be decoded.
pub fn must_decode_png(bytes: &[u8], palette: &Palette) -> Canvas {
    decode_png(bytes, palette).unwrap_or_else(|err| panic!("{}", err))
}

/// Calls [decode_palette] and panics on error.
///
/// # Panics
/// Panics if the palette can't be decoded.
pub fn must_decode_palette(bytes: &[u8]) -> Palette {
    decode_palette(bytes).unwrap_or_else(|err| panic!("{}", err))
}

fn read_info(bytes: &[u8], transformations: Transformations) -> Result<Reader<&[u8]>, DecodeError> {
    let mut decoder = Decoder::new(bytes);
    decoder.set_transformations(transformations);
    decoder.read_info().map_err(From::from)
}

fn canvas_size<R: std::io::Read>(reader: &Reader<R>) -> Result<(i32, i32), DecodeError> {
    let info = reader.info();
    let (width, height) = (info.width, info.height);
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) if (w as usize).checked_mul(h as usize).is_some() => Ok((w, h)),
        _ => Err(DecodeError::InvalidSize { width, height })
    }
}

/// Copies the pixels of an 8-bit indexed image if its palette matches the leading `palette` entries.
fn decode_matching_indexed(
        reader: &mut Reader<&[u8]>,
        palette: &Palette
    ) -> Result<Option<Canvas>, DecodeError>
{
    let info = reader.info();
    if info.color_type != ColorType::Indexed || info.bit_depth != BitDepth::Eight {
        return Ok(None)
    }
    let matches = match info.palette.as_ref() {
        Some(entries) => entries.chunks_exact(3).zip(palette.0.iter())
                                .all(|(rgb, entry)| Rgb::new(rgb[0], rgb[1], rgb[2]) == *entry),
        None => false
    };
    if !matches {
        debug!("image palette differs from the active palette");
        return Ok(None)
    }
    let (width, height) = canvas_size(reader)?;
    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    let mut canvas = Canvas::new(width, height);
    let width = width as usize;
    if width != 0 {
        for (target, line) in canvas.data_mut().chunks_exact_mut(width)
                                    .zip(buffer.chunks(frame.line_size)) {
            target.copy_from_slice(&line[..width]);
        }
    }
    Ok(Some(canvas))
}

/// Calls `f` with the index and the color of each pixel of an 8-bit expanded image.
fn for_each_rgb<F: FnMut(usize, Rgb)>(reader: &mut Reader<&[u8]>, mut f: F) -> Result<(), DecodeError> {
    let mut buffer = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buffer)?;
    if frame.bit_depth != BitDepth::Eight {
        return Err(DecodeError::UnsupportedFormat(format!("bit depth: {:?}", frame.bit_depth)))
    }
    let channels = frame.color_type.samples();
    let width = frame.width as usize;
    let mut index = 0;
    for line in buffer.chunks(frame.line_size).take(frame.height as usize) {
        for pixel in line.chunks_exact(channels).take(width) {
            let rgb = match frame.color_type {
                ColorType::Grayscale|ColorType::GrayscaleAlpha => Rgb::new(pixel[0], pixel[0], pixel[0]),
                ColorType::Rgb|ColorType::Rgba => Rgb::new(pixel[0], pixel[1], pixel[2]),
                ColorType::Indexed => {
                    return Err(DecodeError::UnsupportedFormat("indexed image without a palette".into()))
                }
            };
            f(index, rgb);
            index += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(width: u32, height: u32, color: png::ColorType, palette: Option<Vec<u8>>, data: &[u8]) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            if let Some(palette) = palette {
                encoder.set_palette(palette);
            }
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        bytes
    }

    fn palette_bytes(palette: &Palette, count: usize) -> Vec<u8> {
        palette.0[..count].iter().flat_map(|c| vec![c.r, c.g, c.b]).collect()
    }

    #[test]
    fn decodes_matching_indexed_image() {
        let palette = Palette::default();
        let png = encode(3, 2, png::ColorType::Indexed, Some(palette_bytes(&palette, 16)),
                         &[0, 1, 2, 13, 14, 15]);
        let canvas = decode_png(&png, &palette).unwrap();
        assert_eq!((canvas.width(), canvas.height()), (3, 2));
        assert_eq!(canvas.data(), &[0, 1, 2, 13, 14, 15]);
    }

    #[test]
    fn maps_other_images_to_closest_colors() {
        let palette = Palette::default();
        // indexed image with a different palette order
        let swapped = vec![0xFF, 0x00, 0x4D,  0x00, 0x00, 0x00];
        let png = encode(2, 1, png::ColorType::Indexed, Some(swapped), &[0, 1]);
        assert_eq!(decode_png(&png, &palette).unwrap().data(), &[8, 0]);

        let png = encode(2, 2, png::ColorType::Rgb, None,
                         &[0xFF, 0xF1, 0xE8,  0x29, 0xAD, 0xFF,
                           0xFE, 0x00, 0x4C,  0x01, 0x01, 0x01]);
        assert_eq!(decode_png(&png, &palette).unwrap().data(), &[7, 12, 8, 0]);

        let png = encode(1, 2, png::ColorType::Grayscale, None, &[0xFF, 0x00]);
        assert_eq!(must_decode_png(&png, &palette).data(), &[7, 0]);
    }

    #[test]
    fn decodes_palettes() {
        let png = encode(2, 1, png::ColorType::Indexed, Some(vec![1, 2, 3,  4, 5, 6]), &[0, 1]);
        let palette = decode_palette(&png).unwrap();
        assert_eq!(palette[0], Rgb::new(1, 2, 3));
        assert_eq!(palette[1], Rgb::new(4, 5, 6));
        assert_eq!(palette[2], Rgb::default());

        let png = encode(3, 1, png::ColorType::Rgba, None,
                         &[9, 9, 9, 255,  1, 1, 1, 0,  9, 9, 9, 255]);
        let palette = must_decode_palette(&png);
        assert_eq!(palette[0], Rgb::new(9, 9, 9));
        assert_eq!(palette[1], Rgb::new(1, 1, 1));
        assert_eq!(palette[2], Rgb::default());
    }

    #[test]
    fn reports_errors() {
        let data: Vec<u8> = (0..300u32).flat_map(|i| vec![i as u8, (i >> 8) as u8, 0]).collect();
        let png = encode(300, 1, png::ColorType::Rgb, None, &data);
        match decode_palette(&png) {
            Err(DecodeError::TooManyColors(300)) => {}
            res => panic!("unexpected result: {:?}", res.map(|_| ()))
        }
        let err = decode_png(b"not a png", &Palette::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Png(..)));
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("PNG decoding failed"));
    }

    #[test]
    #[should_panic]
    fn must_decode_panics() {
        must_decode_png(&[0, 1, 2], &Palette::default());
    }
}
