// glyph-line/src/options.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Options that control how a line of text is rasterized and laid out.

use bitflags::bitflags;

/// The rasterization mode FreeType uses to turn a loaded glyph into a bitmap.
///
/// This picks both the antialiasing strategy and the pixel mode of the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    /// 8-bit grayscale antialiasing with the hinting the glyph was loaded with.
    Normal,
    /// 8-bit grayscale antialiasing, intended for light (vertical-only) hinting.
    Light,
    /// "Black-and-white" rendering. Each pixel is either entirely on or off.
    Mono,
    /// Horizontal subpixel (LCD) antialiasing. Produces three bytes per pixel.
    Lcd,
    /// Vertical subpixel (LCD) antialiasing.
    LcdV,
}

impl Default for RenderMode {
    #[inline]
    fn default() -> RenderMode {
        RenderMode::Light
    }
}

bitflags! {
    /// Flags passed to FreeType when loading a glyph, before it is rendered.
    ///
    /// The empty set is FreeType's `FT_LOAD_DEFAULT`.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct LoadFlags: u32 {
        /// Disable hinting.
        const NO_HINTING = 1 << 1;
        /// Ignore embedded bitmap strikes and always scan-convert outlines.
        const NO_BITMAP = 1 << 3;
        /// Prefer the auto-hinter over the font's own hinting instructions.
        const FORCE_AUTOHINT = 1 << 5;
        /// Hint for monochrome rendering.
        const MONOCHROME = 1 << 12;
        /// Never use the auto-hinter.
        const NO_AUTOHINT = 1 << 15;
        /// Load embedded color bitmaps. Needed to get `Bgra` glyphs out of color fonts.
        const COLOR = 1 << 20;
    }
}

/// Blank space, in pixels, added around a rendered line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Margin {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Margin {
    /// The same margin on every side.
    #[inline]
    pub fn uniform(width: u32) -> Margin {
        Margin {
            left: width,
            right: width,
            top: width,
            bottom: width,
        }
    }

    #[inline]
    pub fn horizontal(&self) -> u32 {
        self.left + self.right
    }

    #[inline]
    pub fn vertical(&self) -> u32 {
        self.top + self.bottom
    }
}

impl Default for Margin {
    #[inline]
    fn default() -> Margin {
        Margin::uniform(1)
    }
}

/// `(left, right, top, bottom)`.
impl From<(u32, u32, u32, u32)> for Margin {
    #[inline]
    fn from((left, right, top, bottom): (u32, u32, u32, u32)) -> Margin {
        Margin {
            left,
            right,
            top,
            bottom,
        }
    }
}

/// What to do with a character whose glyph fails to load, render, or decode.
///
/// Blank glyphs, such as spaces, are never failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and leave the character out of the line.
    Skip,
    /// Stop and return the error.
    Abort,
}

impl Default for FailurePolicy {
    #[inline]
    fn default() -> FailurePolicy {
        FailurePolicy::Skip
    }
}

/// Everything that controls how a line is rendered, apart from the face and its size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LineOptions {
    pub render_mode: RenderMode,
    pub load_flags: LoadFlags,
    pub margin: Margin,
    pub failure_policy: FailurePolicy,
}

impl LineOptions {
    #[inline]
    pub fn new() -> LineOptions {
        LineOptions::default()
    }

    #[inline]
    pub fn render_mode(mut self, render_mode: RenderMode) -> LineOptions {
        self.render_mode = render_mode;
        self
    }

    #[inline]
    pub fn load_flags(mut self, load_flags: LoadFlags) -> LineOptions {
        self.load_flags = load_flags;
        self
    }

    #[inline]
    pub fn margin<M>(mut self, margin: M) -> LineOptions
    where
        M: Into<Margin>,
    {
        self.margin = margin.into();
        self
    }

    #[inline]
    pub fn failure_policy(mut self, failure_policy: FailurePolicy) -> LineOptions {
        self.failure_policy = failure_policy;
        self
    }
}
