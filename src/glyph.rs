// glyph-line/src/glyph.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A rendered glyph, decoded and positioned relative to the pen.

use std::fmt::{self, Display, Formatter};

use crate::bitmap::{self, RawBitmap};
use crate::canvas::Canvas;
use crate::error::ExtractionError;

/// What a loader exposes for one rendered character: the raw bitmap plus its placement.
#[derive(Clone, Copy, Debug)]
pub struct GlyphSlot<'a> {
    pub bitmap: RawBitmap<'a>,
    /// Horizontal distance from the pen to the left edge of the bitmap.
    pub left: i32,
    /// Vertical distance from the baseline up to the top edge of the bitmap.
    pub top: i32,
    /// Horizontal advance, in 26.6 fixed point.
    pub advance_x: i64,
}

/// A glyph image with dark ink on a light background, plus the metrics needed to place it.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    pub image: Canvas,
    pub left: i32,
    pub top: i32,
    /// Whole pixels to move the pen after this glyph.
    pub advance: i32,
}

impl GlyphBitmap {
    /// Decodes a rendered glyph. Returns `Ok(None)` if the glyph has no pixels.
    ///
    /// Coverage values are inverted (`255 - v`) so ink comes out dark. Color glyphs are kept as
    /// they are.
    pub fn from_slot(slot: &GlyphSlot) -> Result<Option<GlyphBitmap>, ExtractionError> {
        let image = if slot.bitmap.pixel_mode.is_coverage() {
            bitmap::extract_with(&slot.bitmap, |value| 0xff - value)?
        } else {
            bitmap::extract(&slot.bitmap)?
        };
        Ok(image.map(|image| GlyphBitmap {
            image,
            left: slot.left,
            top: slot.top,
            advance: ft_fixed_26_6_to_pixels(slot.advance_x),
        }))
    }

    /// How far the image reaches below the baseline.
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.image.height() - self.top
    }

    /// How far the pen moves past this glyph: the bearing plus the advance.
    #[inline]
    pub fn pen_advance(&self) -> i32 {
        self.left + self.advance
    }
}

impl Display for GlyphBitmap {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "left={:3},top={:4},adv={:4},bot={:4},img={}x{}",
            self.left,
            self.top,
            self.advance,
            self.bottom(),
            self.image.width(),
            self.image.height()
        )
    }
}

// Truncates toward negative infinity, dropping the fractional 1/64ths.
#[inline]
fn ft_fixed_26_6_to_pixels(fixed: i64) -> i32 {
    (fixed >> 6) as i32
}
