// glyph-line/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `glyph-line` can return.

use std::convert::From;
use std::io;
use thiserror::Error;

use crate::bitmap::PixelMode;

/// Reasons why a face might fail to load.
#[derive(Debug, Error)]
pub enum FaceLoadingError {
    /// Attempted to load a malformed, corrupted, or unrecognized font.
    #[error("parse error")]
    Parse,

    /// Attempted to load an invalid index in a TrueType or OpenType font collection.
    ///
    /// For example, if a `.ttc` file has 2 faces in it, and you ask for the 5th one, you'll get
    /// this error.
    #[error("no such face in the collection")]
    NoSuchFaceInCollection,

    /// FreeType refused the requested pixel size and the face has no bitmap strike to fall back
    /// on.
    #[error("cannot set size {0}")]
    SizeRejected(f32),

    /// A disk or similar I/O error occurred while attempting to read the font.
    #[error("I/O error")]
    Io(io::Error),
}

impl From<io::Error> for FaceLoadingError {
    fn from(error: io::Error) -> FaceLoadingError {
        FaceLoadingError::Io(error)
    }
}

/// Reasons why a rendered glyph bitmap could not be turned into an image.
///
/// Empty glyphs (whitespace and the like) are not errors; they show up as `Ok(None)` from the
/// extractor.
#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum ExtractionError {
    /// The rasterizer produced no pixel buffer at all.
    #[error("bitmap buffer is NULL")]
    NullBuffer,

    /// The bitmap uses a pixel mode that cannot be decoded.
    #[error("unsupported pixel mode {0:?}")]
    UnsupportedPixelMode(PixelMode),

    /// The buffer holds fewer bytes than `rows * |pitch|`.
    #[error("bitmap buffer is truncated: expected {expected} bytes, found {found}")]
    TruncatedBuffer { expected: usize, found: usize },
}

/// Reasons why a glyph might fail to load or render.
#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum GlyphLoadingError {
    /// The face could not load an outline or bitmap for this character.
    #[error("no such glyph for {0:?}")]
    NoSuchGlyph(char),

    /// The rasterizer failed to render the loaded glyph.
    #[error("failed to render {0:?}")]
    RenderFailed(char),

    /// The glyph rendered, but its bitmap could not be decoded.
    #[error("cannot extract {0:?}: {1}")]
    Extraction(char, ExtractionError),
}
