// glyph-line/src/bitmap.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Decodes rendered glyph bitmaps into canvases.
//!
//! The rasterizer hands out one raw buffer per glyph, tagged with a pixel mode and laid out in
//! rows of `pitch` bytes. This module turns that buffer into a `Canvas` whose format follows the
//! pixel mode:
//!
//! | Pixel mode      | Canvas format |
//! |-----------------|---------------|
//! | `Mono`, `Gray`  | `Gray8`       |
//! | `Lcd`, `LcdV`   | `Rgb24`       |
//! | `Bgra`          | `Rgba32`      |

use pathfinder_geometry::vector::Vector2I;
use std::cmp;

use crate::canvas::{Canvas, Format};
use crate::error::ExtractionError;

const FT_PIXEL_MODE_NONE: u8 = 0;
const FT_PIXEL_MODE_MONO: u8 = 1;
const FT_PIXEL_MODE_GRAY: u8 = 2;
const FT_PIXEL_MODE_GRAY2: u8 = 3;
const FT_PIXEL_MODE_GRAY4: u8 = 4;
const FT_PIXEL_MODE_LCD: u8 = 5;
const FT_PIXEL_MODE_LCD_V: u8 = 6;
const FT_PIXEL_MODE_BGRA: u8 = 7;

/// The pixel layout of a rendered glyph bitmap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelMode {
    /// No bitmap.
    None,
    /// One bit per pixel, most significant bit first.
    Mono,
    /// One byte of coverage per pixel.
    Gray,
    /// Two bits per pixel. Only found in some embedded bitmap fonts.
    Gray2,
    /// Four bits per pixel. Only found in some embedded bitmap fonts.
    Gray4,
    /// Three bytes per pixel, horizontal RGB subpixel order.
    Lcd,
    /// Three bytes per pixel, vertical subpixel order.
    LcdV,
    /// Premultiplied B8G8R8A8 color.
    Bgra,
    /// A pixel mode code this crate does not know about.
    Unknown(u8),
}

impl PixelMode {
    /// Maps a FreeType `FT_Pixel_Mode` code.
    pub fn from_freetype(code: u8) -> PixelMode {
        match code {
            FT_PIXEL_MODE_NONE => PixelMode::None,
            FT_PIXEL_MODE_MONO => PixelMode::Mono,
            FT_PIXEL_MODE_GRAY => PixelMode::Gray,
            FT_PIXEL_MODE_GRAY2 => PixelMode::Gray2,
            FT_PIXEL_MODE_GRAY4 => PixelMode::Gray4,
            FT_PIXEL_MODE_LCD => PixelMode::Lcd,
            FT_PIXEL_MODE_LCD_V => PixelMode::LcdV,
            FT_PIXEL_MODE_BGRA => PixelMode::Bgra,
            code => PixelMode::Unknown(code),
        }
    }

    /// The canvas format bitmaps in this mode decode to, or `None` if the mode is unsupported.
    pub fn format(self) -> Option<Format> {
        match self {
            PixelMode::Mono | PixelMode::Gray => Some(Format::Gray8),
            PixelMode::Lcd | PixelMode::LcdV => Some(Format::Rgb24),
            PixelMode::Bgra => Some(Format::Rgba32),
            PixelMode::None | PixelMode::Gray2 | PixelMode::Gray4 | PixelMode::Unknown(_) => None,
        }
    }

    /// Returns true if the bytes of this mode are ink coverage rather than color.
    #[inline]
    pub fn is_coverage(self) -> bool {
        match self.format() {
            Some(Format::Gray8) | Some(Format::Rgb24) => true,
            _ => false,
        }
    }
}

/// A borrowed view of one rendered glyph bitmap, as the rasterizer laid it out.
#[derive(Clone, Copy, Debug)]
pub struct RawBitmap<'a> {
    /// The pixel rows, or `None` if the rasterizer returned a NULL buffer.
    pub buffer: Option<&'a [u8]>,
    /// The width of a row. For the LCD modes this counts bytes, three per pixel.
    pub width: u32,
    /// The number of rows.
    pub rows: u32,
    /// The number of bytes between successive rows. Negative values mean the rows are stored
    /// bottom to top.
    pub pitch: i32,
    /// The pixel layout.
    pub pixel_mode: PixelMode,
}

impl<'a> RawBitmap<'a> {
    /// Returns true if the bitmap covers no pixels at all, as for a space.
    pub fn is_degenerate(&self) -> bool {
        let width = match self.pixel_mode {
            PixelMode::Lcd | PixelMode::LcdV => self.width / 3,
            _ => self.width,
        };
        width == 0 || self.rows == 0 || self.pitch == 0
    }
}

/// Decodes a rendered glyph bitmap into a canvas.
///
/// Returns `Ok(None)` for empty bitmaps.
#[inline]
pub fn extract(bitmap: &RawBitmap) -> Result<Option<Canvas>, ExtractionError> {
    extract_with(bitmap, |value| value)
}

/// Decodes a rendered glyph bitmap into a canvas, passing every channel value through
/// `transform`.
///
/// Returns `Ok(None)` for empty bitmaps. Empty bitmaps are recognized before the buffer is
/// looked at, so a NULL buffer with zero width is empty rather than an error.
pub fn extract_with<F>(bitmap: &RawBitmap, transform: F) -> Result<Option<Canvas>, ExtractionError>
where
    F: Fn(u8) -> u8,
{
    if bitmap.is_degenerate() {
        return Ok(None);
    }
    let buffer = bitmap.buffer.ok_or(ExtractionError::NullBuffer)?;
    let format = bitmap
        .pixel_mode
        .format()
        .ok_or(ExtractionError::UnsupportedPixelMode(bitmap.pixel_mode))?;

    let stride = bitmap.pitch.unsigned_abs() as usize;
    let expected = stride * bitmap.rows as usize;
    if buffer.len() < expected {
        return Err(ExtractionError::TruncatedBuffer {
            expected,
            found: buffer.len(),
        });
    }
    let buffer = &buffer[0..expected];

    // Rows never extend past the pitch.
    let (width, rows) = (bitmap.width as usize, bitmap.rows as i32);
    let mut canvas = match bitmap.pixel_mode {
        PixelMode::Mono => {
            let size = Vector2I::new(cmp::min(width, stride * 8) as i32, rows);
            let mut canvas = Canvas::new(size, format);
            canvas.blit_from_bitmap_1bpp(buffer, size, stride);
            canvas
        }
        PixelMode::Gray => {
            let size = Vector2I::new(cmp::min(width, stride) as i32, rows);
            let mut canvas = Canvas::new(size, format);
            canvas.blit_from(buffer, size, stride, Format::Gray8);
            canvas
        }
        PixelMode::Lcd | PixelMode::LcdV => {
            let size = Vector2I::new((cmp::min(width, stride) / 3) as i32, rows);
            let mut canvas = Canvas::new(size, format);
            canvas.blit_from(buffer, size, stride, Format::Rgb24);
            canvas
        }
        PixelMode::Bgra => {
            let size = Vector2I::new(cmp::min(width, stride / 4) as i32, rows);
            let mut canvas = Canvas::new(size, format);
            canvas.blit_from_bgra32(buffer, size, stride);
            canvas
        }
        PixelMode::None | PixelMode::Gray2 | PixelMode::Gray4 | PixelMode::Unknown(_) => {
            return Err(ExtractionError::UnsupportedPixelMode(bitmap.pixel_mode))
        }
    };

    if bitmap.pitch < 0 {
        canvas.flip_vertical();
    }
    canvas.map_pixels(transform);
    Ok(Some(canvas))
}
