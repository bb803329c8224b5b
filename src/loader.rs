// glyph-line/src/loader.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Provides a common interface to whatever rasterizes individual characters.

use crate::error::GlyphLoadingError;
use crate::glyph::GlyphSlot;
use crate::options::{LoadFlags, RenderMode};

/// Renders single characters into glyph bitmaps.
///
/// The FreeType `Face` is the implementation used in practice. The line compositor only talks to
/// this trait, so anything that can produce a `GlyphSlot` can feed it.
pub trait Loader {
    /// Loads and renders the glyph for `character`, then passes the rendered slot to `f`.
    ///
    /// The slot borrows the rasterizer's internal buffer and is only valid for the duration of
    /// the callback. Rendering the next character may overwrite it.
    fn with_rendered_char<F, R>(
        &self,
        character: char,
        render_mode: RenderMode,
        load_flags: LoadFlags,
        f: F,
    ) -> Result<R, GlyphLoadingError>
    where
        F: FnOnce(&GlyphSlot) -> R;
}
