// glyph-line/src/canvas.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! An in-memory bitmap surface for glyph images and composed lines.

use lazy_static::lazy_static;
use pathfinder_geometry::vector::Vector2I;
use std::cmp;

#[cfg(feature = "image")]
use image::error::{ImageError, ParameterError, ParameterErrorKind};
#[cfg(feature = "image")]
use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};
#[cfg(feature = "image")]
use std::path::Path;

lazy_static! {
    static ref BITMAP_1BPP_TO_8BPP_LUT: [[u8; 8]; 256] = {
        let mut lut = [[0; 8]; 256];
        for byte in 0..0x100 {
            let mut value = [0; 8];
            for bit in 0..8 {
                if (byte & (0x80 >> bit)) != 0 {
                    value[bit] = 0xff;
                }
            }
            lut[byte] = value
        }
        lut
    };
}

/// An in-memory bitmap surface.
///
/// Rows run top to bottom; `stride` may exceed `width * bytes_per_pixel`.
#[derive(Clone, Debug, PartialEq)]
pub struct Canvas {
    /// The raw pixel data.
    pub pixels: Vec<u8>,
    /// The size of the buffer, in pixels.
    pub size: Vector2I,
    /// The number of *bytes* between successive rows.
    pub stride: usize,
    /// The image format of the canvas.
    pub format: Format,
}

impl Canvas {
    /// Creates a new blank canvas with the given pixel size and format.
    ///
    /// Stride is automatically calculated from width.
    ///
    /// The canvas is initialized with zeroes (black, or transparent black for `Rgba32`).
    #[inline]
    pub fn new(size: Vector2I, format: Format) -> Canvas {
        Canvas::with_stride(
            size,
            size.x() as usize * format.bytes_per_pixel() as usize,
            format,
        )
    }

    /// Creates a new blank canvas with the given pixel size, stride (number of bytes between
    /// successive rows), and format.
    ///
    /// The canvas is initialized with zeroes.
    pub fn with_stride(size: Vector2I, stride: usize, format: Format) -> Canvas {
        Canvas {
            pixels: vec![0; stride * size.y() as usize],
            size,
            stride,
            format,
        }
    }

    /// Creates a canvas with every channel of every pixel set to `value`.
    ///
    /// `Canvas::filled(size, format, 0xff)` is opaque white in all formats.
    pub fn filled(size: Vector2I, format: Format, value: u8) -> Canvas {
        let stride = size.x() as usize * format.bytes_per_pixel() as usize;
        Canvas {
            pixels: vec![value; stride * size.y() as usize],
            size,
            stride,
            format,
        }
    }

    /// The width of the canvas, in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.size.x()
    }

    /// The height of the canvas, in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.size.y()
    }

    /// Returns the channel values of the pixel at `(x, y)`, or `None` if the point lies outside
    /// the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<&[u8]> {
        if x < 0 || y < 0 || x >= self.size.x() || y >= self.size.y() {
            return None;
        }
        let bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let start = y as usize * self.stride + x as usize * bytes_per_pixel;
        Some(&self.pixels[start..(start + bytes_per_pixel)])
    }

    /// Returns row `y` without any trailing stride padding.
    pub fn row(&self, y: i32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.pixels[start..(start + self.row_len())]
    }

    /// Copies the pixels into a tightly packed buffer (stride equal to the row length).
    pub fn to_packed(&self) -> Vec<u8> {
        let mut packed = Vec::with_capacity(self.row_len() * self.size.y() as usize);
        for y in 0..self.size.y() {
            packed.extend_from_slice(self.row(y));
        }
        packed
    }

    /// Applies `transform` to every channel value of every pixel.
    pub fn map_pixels<F>(&mut self, transform: F)
    where
        F: Fn(u8) -> u8,
    {
        let row_len = self.row_len();
        for y in 0..(self.size.y() as usize) {
            let start = y * self.stride;
            for byte in &mut self.pixels[start..(start + row_len)] {
                *byte = transform(*byte);
            }
        }
    }

    /// Reverses the order of the rows.
    pub fn flip_vertical(&mut self) {
        let height = self.size.y() as usize;
        for y in 0..(height / 2) {
            let (top, bottom) = self.pixels.split_at_mut((height - 1 - y) * self.stride);
            top[(y * self.stride)..((y + 1) * self.stride)]
                .swap_with_slice(&mut bottom[0..self.stride]);
        }
    }

    /// Copies `src` onto this canvas with its top left corner at `origin`, replacing the
    /// destination pixels.
    ///
    /// Parts of `src` that fall outside this canvas are clipped. If the formats differ, `src` is
    /// converted to this canvas's format on the fly.
    pub fn paste(&mut self, src: &Canvas, origin: Vector2I) {
        let dest_x0 = cmp::max(origin.x(), 0);
        let dest_y0 = cmp::max(origin.y(), 0);
        let dest_x1 = cmp::min(origin.x() + src.size.x(), self.size.x());
        let dest_y1 = cmp::min(origin.y() + src.size.y(), self.size.y());
        if dest_x1 <= dest_x0 || dest_y1 <= dest_y0 {
            return;
        }

        let region = Region {
            src_origin: Vector2I::new(dest_x0 - origin.x(), dest_y0 - origin.y()),
            dest_origin: Vector2I::new(dest_x0, dest_y0),
            size: Vector2I::new(dest_x1 - dest_x0, dest_y1 - dest_y0),
        };
        self.blit_region(&src.pixels, src.stride, src.format, &region)
    }

    pub(crate) fn blit_from(
        &mut self,
        src_bytes: &[u8],
        src_size: Vector2I,
        src_stride: usize,
        src_format: Format,
    ) {
        let region = Region::at_origin(self.size, src_size);
        self.blit_region(src_bytes, src_stride, src_format, &region)
    }

    pub(crate) fn blit_from_bgra32(
        &mut self,
        src_bytes: &[u8],
        src_size: Vector2I,
        src_stride: usize,
    ) {
        debug_assert_eq!(self.format, Format::Rgba32);
        let region = Region::at_origin(self.size, src_size);
        self.blit_region_with::<BlitBgra32ToRgba32>(src_bytes, src_stride, 4, &region)
    }

    pub(crate) fn blit_from_bitmap_1bpp(
        &mut self,
        src_bytes: &[u8],
        src_size: Vector2I,
        src_stride: usize,
    ) {
        debug_assert_eq!(self.format, Format::Gray8);

        let width = cmp::min(src_size.x(), self.size.x()) as usize;
        let height = cmp::min(src_size.y(), self.size.y()) as usize;

        let src_row_stride = cmp::min((width + 7) / 8, src_stride);

        for y in 0..height {
            let (dest_row_start, src_row_start) = (y * self.stride, y * src_stride);
            let dest_row_pixels = &mut self.pixels[dest_row_start..(dest_row_start + width)];
            let src_row_pixels = &src_bytes[src_row_start..(src_row_start + src_row_stride)];
            for x in 0..src_row_stride {
                let pattern = &BITMAP_1BPP_TO_8BPP_LUT[src_row_pixels[x] as usize];
                let dest_start = x * 8;
                let dest_end = cmp::min(dest_start + 8, width);
                dest_row_pixels[dest_start..dest_end]
                    .copy_from_slice(&pattern[0..(dest_end - dest_start)]);
            }
        }
    }

    fn blit_region(
        &mut self,
        src_bytes: &[u8],
        src_stride: usize,
        src_format: Format,
        region: &Region,
    ) {
        let src_bpp = src_format.bytes_per_pixel() as usize;
        match (self.format, src_format) {
            (Format::Gray8, Format::Gray8)
            | (Format::Rgb24, Format::Rgb24)
            | (Format::Rgba32, Format::Rgba32) => {
                self.blit_region_with::<BlitMemcpy>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Gray8, Format::Rgb24) => {
                self.blit_region_with::<BlitRgb24ToGray8>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Gray8, Format::Rgba32) => {
                self.blit_region_with::<BlitRgba32ToGray8>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Rgb24, Format::Gray8) => {
                self.blit_region_with::<BlitGray8ToRgb24>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Rgb24, Format::Rgba32) => {
                self.blit_region_with::<BlitRgba32ToRgb24>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Rgba32, Format::Gray8) => {
                self.blit_region_with::<BlitGray8ToRgba32>(src_bytes, src_stride, src_bpp, region)
            }
            (Format::Rgba32, Format::Rgb24) => {
                self.blit_region_with::<BlitRgb24ToRgba32>(src_bytes, src_stride, src_bpp, region)
            }
        }
    }

    fn blit_region_with<B>(
        &mut self,
        src_bytes: &[u8],
        src_stride: usize,
        src_bytes_per_pixel: usize,
        region: &Region,
    ) where
        B: Blit,
    {
        let dest_bytes_per_pixel = self.format.bytes_per_pixel() as usize;
        let width = region.size.x() as usize;

        for y in 0..(region.size.y() as usize) {
            let dest_row_start = (region.dest_origin.y() as usize + y) * self.stride
                + region.dest_origin.x() as usize * dest_bytes_per_pixel;
            let src_row_start = (region.src_origin.y() as usize + y) * src_stride
                + region.src_origin.x() as usize * src_bytes_per_pixel;
            let dest_row_end = dest_row_start + width * dest_bytes_per_pixel;
            let src_row_end = src_row_start + width * src_bytes_per_pixel;
            let dest_row_pixels = &mut self.pixels[dest_row_start..dest_row_end];
            let src_row_pixels = &src_bytes[src_row_start..src_row_end];
            B::blit(dest_row_pixels, src_row_pixels)
        }
    }

    #[inline]
    fn row_len(&self) -> usize {
        self.size.x() as usize * self.format.bytes_per_pixel() as usize
    }

    /// Converts the canvas into an `image` buffer of the matching color type.
    ///
    /// Returns `None` only if the pixel buffer is shorter than the canvas size claims.
    #[cfg(feature = "image")]
    pub fn to_image(&self) -> Option<DynamicImage> {
        let (width, height) = (self.size.x() as u32, self.size.y() as u32);
        let packed = self.to_packed();
        match self.format {
            Format::Gray8 => {
                GrayImage::from_raw(width, height, packed).map(DynamicImage::ImageLuma8)
            }
            Format::Rgb24 => {
                RgbImage::from_raw(width, height, packed).map(DynamicImage::ImageRgb8)
            }
            Format::Rgba32 => {
                RgbaImage::from_raw(width, height, packed).map(DynamicImage::ImageRgba8)
            }
        }
    }

    /// Encodes the canvas to a file. The image format is chosen from the path's extension.
    #[cfg(feature = "image")]
    pub fn save<P>(&self, path: P) -> Result<(), ImageError>
    where
        P: AsRef<Path>,
    {
        match self.to_image() {
            Some(image) => image.save(path),
            None => Err(ImageError::Parameter(ParameterError::from_kind(
                ParameterErrorKind::DimensionMismatch,
            ))),
        }
    }
}

/// The image format for the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Format {
    /// Premultiplied R8G8B8A8, little-endian.
    Rgba32,
    /// R8G8B8, little-endian.
    Rgb24,
    /// 8-bit luminance.
    Gray8,
}

impl Format {
    /// Returns the number of bits per pixel that this image format corresponds to.
    #[inline]
    pub fn bits_per_pixel(self) -> u8 {
        match self {
            Format::Rgba32 => 32,
            Format::Rgb24 => 24,
            Format::Gray8 => 8,
        }
    }

    /// Returns the number of color channels per pixel that this image format corresponds to.
    #[inline]
    pub fn components_per_pixel(self) -> u8 {
        match self {
            Format::Rgba32 => 4,
            Format::Rgb24 => 3,
            Format::Gray8 => 1,
        }
    }

    /// Returns the number of bytes per pixel that this image format corresponds to.
    #[inline]
    pub fn bytes_per_pixel(self) -> u8 {
        self.bits_per_pixel() / 8
    }
}

struct Region {
    src_origin: Vector2I,
    dest_origin: Vector2I,
    size: Vector2I,
}

impl Region {
    fn at_origin(dest_size: Vector2I, src_size: Vector2I) -> Region {
        Region {
            src_origin: Vector2I::new(0, 0),
            dest_origin: Vector2I::new(0, 0),
            size: Vector2I::new(
                cmp::min(src_size.x(), dest_size.x()),
                cmp::min(src_size.y(), dest_size.y()),
            ),
        }
    }
}

trait Blit {
    fn blit(dest: &mut [u8], src: &[u8]);
}

struct BlitMemcpy;

impl Blit for BlitMemcpy {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        dest.copy_from_slice(src)
    }
}

struct BlitRgb24ToGray8;

impl Blit for BlitRgb24ToGray8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(3)) {
            *dest = src[1]
        }
    }
}

struct BlitRgba32ToGray8;

impl Blit for BlitRgba32ToGray8 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.iter_mut().zip(src.chunks(4)) {
            *dest = over_white(src[1], src[3])
        }
    }
}

struct BlitGray8ToRgb24;

impl Blit for BlitGray8ToRgb24 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(3).zip(src.iter()) {
            dest[0] = *src;
            dest[1] = *src;
            dest[2] = *src;
        }
    }
}

struct BlitRgba32ToRgb24;

impl Blit for BlitRgba32ToRgb24 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(3).zip(src.chunks(4)) {
            dest[0] = over_white(src[0], src[3]);
            dest[1] = over_white(src[1], src[3]);
            dest[2] = over_white(src[2], src[3]);
        }
    }
}

struct BlitGray8ToRgba32;

impl Blit for BlitGray8ToRgba32 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.iter()) {
            dest.copy_from_slice(&[*src, *src, *src, 0xff]);
        }
    }
}

struct BlitRgb24ToRgba32;

impl Blit for BlitRgb24ToRgba32 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.chunks(3)) {
            dest[0..3].copy_from_slice(src);
            dest[3] = 0xff;
        }
    }
}

struct BlitBgra32ToRgba32;

impl Blit for BlitBgra32ToRgba32 {
    #[inline]
    fn blit(dest: &mut [u8], src: &[u8]) {
        for (dest, src) in dest.chunks_mut(4).zip(src.chunks(4)) {
            dest.copy_from_slice(&[src[2], src[1], src[0], src[3]]);
        }
    }
}

// Premultiplied color composited over opaque white.
#[inline]
fn over_white(color: u8, alpha: u8) -> u8 {
    color.saturating_add(0xff - alpha)
}
