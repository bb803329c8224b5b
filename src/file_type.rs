// glyph-line/src/file_type.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Whether a font file holds one face or a collection of them.

/// Whether a font file holds one face or a collection of them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FileType {
    /// The file holds a single face (`.ttf`, `.otf`, `.woff`, etc.). Open it with face index 0.
    Single,
    /// The file is a collection (`.ttc`, `.otc`, etc.) with this many faces. Valid face indices
    /// run from 0 up to, but not including, the count.
    Collection(u32),
}

impl FileType {
    /// The number of faces in the file.
    #[inline]
    pub fn face_count(self) -> u32 {
        match self {
            FileType::Single => 1,
            FileType::Collection(count) => count,
        }
    }
}
