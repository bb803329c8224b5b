// glyph-line/src/line.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lays out one line of text and composites its glyphs onto a single canvas.
//!
//! Rendering happens in two passes. The first renders every character and measures the line:
//! the tallest ascent, the deepest descent, and the total pen advance. Only then is the size of
//! the canvas known, and the second pass pastes each glyph at its pen position on a shared
//! baseline.
//!
//! There is no shaping. Characters map to glyphs one to one and the pen moves by each glyph's
//! left bearing plus its advance, truncated to whole pixels.

use log::{debug, warn};
use pathfinder_geometry::vector::Vector2I;
use std::cmp;

use crate::canvas::{Canvas, Format};
use crate::error::GlyphLoadingError;
use crate::glyph::GlyphBitmap;
use crate::loader::Loader;
use crate::options::{FailurePolicy, LineOptions, Margin};

/// What rendering one character produced.
#[derive(Clone, Debug, PartialEq)]
pub enum GlyphEntry {
    /// A glyph with pixels. It takes part in measurement and gets drawn.
    Glyph(GlyphBitmap),
    /// The glyph has no pixels (a space, for instance). It is left out of the line.
    Blank,
    /// The glyph could not be loaded, rendered, or decoded. It is left out of the line.
    Failed(GlyphLoadingError),
}

impl GlyphEntry {
    #[inline]
    pub fn glyph(&self) -> Option<&GlyphBitmap> {
        match *self {
            GlyphEntry::Glyph(ref glyph) => Some(glyph),
            GlyphEntry::Blank | GlyphEntry::Failed(_) => None,
        }
    }
}

/// The rendered characters of a line, in input order, before anything is drawn.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LineLayout {
    pub entries: Vec<(char, GlyphEntry)>,
}

/// The extent of a line, measured from the glyphs that have pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineMetrics {
    /// The greatest distance any glyph reaches above the baseline.
    pub ascent: i32,
    /// The greatest distance any glyph reaches below the baseline.
    pub descent: i32,
    /// The sum of every glyph's left bearing plus advance.
    pub advance_width: i32,
    /// The number of glyphs measured.
    pub glyph_count: usize,
}

impl LineMetrics {
    /// The size of the canvas the line is drawn on, margins included.
    ///
    /// Negative extents, which only odd fonts produce, collapse to zero.
    pub fn canvas_size(&self, margin: &Margin) -> Vector2I {
        Vector2I::new(
            cmp::max(self.advance_width + margin.horizontal() as i32, 0),
            cmp::max(self.ascent + self.descent + margin.vertical() as i32, 0),
        )
    }
}

impl LineLayout {
    /// Iterates over the glyphs that will be drawn, in order.
    pub fn glyphs(&self) -> impl Iterator<Item = &GlyphBitmap> {
        self.entries.iter().filter_map(|&(_, ref entry)| entry.glyph())
    }

    /// Iterates over the characters that failed, with the reason.
    pub fn failures(&self) -> impl Iterator<Item = (char, &GlyphLoadingError)> {
        self.entries.iter().filter_map(|&(character, ref entry)| match *entry {
            GlyphEntry::Failed(ref error) => Some((character, error)),
            GlyphEntry::Glyph(_) | GlyphEntry::Blank => None,
        })
    }

    /// Measures the line.
    pub fn metrics(&self) -> LineMetrics {
        let mut metrics = LineMetrics::default();
        for glyph in self.glyphs() {
            metrics.ascent = cmp::max(metrics.ascent, glyph.top);
            metrics.descent = cmp::max(metrics.descent, glyph.bottom());
            metrics.advance_width += glyph.pen_advance();
            metrics.glyph_count += 1;
        }
        metrics
    }

    /// The format of the composited canvas: that of the first glyph, or `None` if there are no
    /// glyphs.
    pub fn format(&self) -> Option<Format> {
        self.glyphs().next().map(|glyph| glyph.image.format)
    }

    /// Draws the line onto a new white canvas.
    ///
    /// Returns `None` if no character produced a glyph. Glyphs whose format differs from the
    /// first glyph's are converted as they are pasted. Pixels that land outside the canvas, for
    /// instance from a negative left bearing larger than the margin, are clipped.
    pub fn composite(&self, margin: &Margin) -> Option<Canvas> {
        let format = self.format()?;
        let metrics = self.metrics();
        let size = metrics.canvas_size(margin);
        debug!(
            "compositing {} glyphs: ascent={} descent={} advance={} canvas={}x{} {:?}",
            metrics.glyph_count,
            metrics.ascent,
            metrics.descent,
            metrics.advance_width,
            size.x(),
            size.y(),
            format
        );

        let mut canvas = Canvas::filled(size, format, 0xff);
        let mut x = margin.left as i32;
        let y = margin.top as i32 + metrics.ascent;
        for glyph in self.glyphs() {
            canvas.paste(&glyph.image, Vector2I::new(x + glyph.left, y - glyph.top));
            x += glyph.pen_advance();
        }
        Some(canvas)
    }
}

/// Renders every character of `text` and collects the outcomes, without drawing anything.
///
/// Under `FailurePolicy::Skip` failed characters are logged and recorded as
/// `GlyphEntry::Failed`; under `FailurePolicy::Abort` the first failure is returned.
pub fn layout_line<L>(
    loader: &L,
    text: &str,
    options: &LineOptions,
) -> Result<LineLayout, GlyphLoadingError>
where
    L: Loader,
{
    let mut layout = LineLayout::default();
    for character in text.chars() {
        let outcome = loader
            .with_rendered_char(
                character,
                options.render_mode,
                options.load_flags,
                GlyphBitmap::from_slot,
            )
            .and_then(|extracted| {
                extracted.map_err(|error| GlyphLoadingError::Extraction(character, error))
            });

        let entry = match outcome {
            Ok(Some(glyph)) => {
                debug!("{:?}: {}", character, glyph);
                GlyphEntry::Glyph(glyph)
            }
            Ok(None) => {
                debug!("{:?}: blank", character);
                GlyphEntry::Blank
            }
            Err(error) => match options.failure_policy {
                FailurePolicy::Abort => return Err(error),
                FailurePolicy::Skip => {
                    warn!("skipping {:?}: {}", character, error);
                    GlyphEntry::Failed(error)
                }
            },
        };
        layout.entries.push((character, entry));
    }
    Ok(layout)
}

/// Renders `text` as a single line onto one canvas.
///
/// Returns `Ok(None)` when there is nothing to draw: the text is empty, or every character came
/// out blank or failed. An `Err` is only returned under `FailurePolicy::Abort`.
pub fn render_line<L>(
    loader: &L,
    text: &str,
    options: &LineOptions,
) -> Result<Option<Canvas>, GlyphLoadingError>
where
    L: Loader,
{
    Ok(layout_line(loader, text, options)?.composite(&options.margin))
}
