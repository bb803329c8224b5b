// glyph-line/src/handle.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Encapsulates the information needed to locate and open a face.
//!
//! This is either the path to a font file or the raw in-memory font data, plus the index of the
//! face within it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::FaceLoadingError;
use crate::face::Face;

/// Encapsulates the information needed to locate and open a face.
#[derive(Debug, Clone)]
pub enum Handle {
    /// A font on disk referenced by a path.
    Path {
        /// The path to the font.
        path: PathBuf,
        /// The index of the face, if the path refers to a collection.
        ///
        /// If the path refers to a single font, this value will be 0.
        face_index: u32,
    },
    /// A font in memory.
    Memory {
        /// The raw TrueType/OpenType/etc. data that makes up this font.
        bytes: Arc<Vec<u8>>,
        /// The index of the face, if the memory consists of a collection.
        ///
        /// If the memory consists of a single font, this value will be 0.
        face_index: u32,
    },
}

impl Handle {
    /// Creates a new handle from a path.
    #[inline]
    pub fn from_path(path: PathBuf, face_index: u32) -> Handle {
        Handle::Path { path, face_index }
    }

    /// Creates a new handle from raw TTF/OTF/etc. data in memory.
    #[inline]
    pub fn from_memory(bytes: Arc<Vec<u8>>, face_index: u32) -> Handle {
        Handle::Memory { bytes, face_index }
    }

    /// The index of the face within its file.
    #[inline]
    pub fn face_index(&self) -> u32 {
        match *self {
            Handle::Path { face_index, .. } | Handle::Memory { face_index, .. } => face_index,
        }
    }

    /// A convenience method to open this handle with FreeType.
    #[inline]
    pub fn load(&self) -> Result<Face, FaceLoadingError> {
        Face::from_handle(self)
    }
}
