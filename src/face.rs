// glyph-line/src/face.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A face loader that uses the FreeType library to load and rasterize glyphs.
//!
//! Font data is always read into memory first, whatever the platform; FreeType then parses it
//! from there.

use freetype::freetype::{FT_Done_Face, FT_Face, FT_Get_Char_Index, FT_Init_FreeType};
use freetype::freetype::{FT_Library, FT_Load_Glyph, FT_Long, FT_New_Memory_Face};
use freetype::freetype::{FT_Render_Glyph, FT_Render_Mode, FT_Set_Char_Size, FT_ULong};
use log::{debug, warn};
use std::ffi::CStr;
use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::os::raw::{c_char, c_int};
use std::path::Path;
use std::ptr;
use std::slice;
use std::sync::Arc;

use crate::bitmap::{PixelMode, RawBitmap};
use crate::error::{FaceLoadingError, GlyphLoadingError};
use crate::file_type::FileType;
use crate::glyph::GlyphSlot;
use crate::handle::Handle;
use crate::loader::Loader;
use crate::options::{LoadFlags, RenderMode};

const FT_ERR_INVALID_ARGUMENT: c_int = 0x06;

thread_local! {
    static FREETYPE_LIBRARY: FT_Library = {
        unsafe {
            let mut library = ptr::null_mut();
            let error = FT_Init_FreeType(&mut library);
            if error != 0 {
                warn!("FT_Init_FreeType() failed with error {}", error);
            }
            library
        }
    };
}

/// A single face of a font file, opened with FreeType.
///
/// The face keeps its font data alive for as long as it exists. It holds a raw FreeType handle,
/// so it is neither `Send` nor `Sync`; share it between threads by loading it once per thread.
pub struct Face {
    freetype_face: FT_Face,
    font_data: Arc<Vec<u8>>,
}

impl Face {
    /// Loads a face from raw font data (the contents of a `.ttf`/`.otf`/etc. file).
    ///
    /// If the data represents a collection (`.ttc`/`.otc`/etc.), `face_index` specifies the index
    /// of the face to load from it. If the data represents a single font, pass 0 for `face_index`.
    pub fn from_bytes(font_data: Arc<Vec<u8>>, face_index: u32) -> Result<Face, FaceLoadingError> {
        let freetype_face = new_memory_face(&font_data, face_index)?;
        debug!(
            "opened face {} of {} bytes of font data",
            face_index,
            font_data.len()
        );
        Ok(Face {
            freetype_face,
            font_data,
        })
    }

    /// Loads a face from the path to a `.ttf`/`.otf`/etc. file.
    ///
    /// The whole file is read into memory.
    pub fn from_path<P>(path: P, face_index: u32) -> Result<Face, FaceLoadingError>
    where
        P: AsRef<Path>,
    {
        Face::from_bytes(Arc::new(fs::read(path)?), face_index)
    }

    /// Loads the face pointed to by a handle.
    pub fn from_handle(handle: &Handle) -> Result<Face, FaceLoadingError> {
        match *handle {
            Handle::Memory {
                ref bytes,
                face_index,
            } => Face::from_bytes((*bytes).clone(), face_index),
            Handle::Path {
                ref path,
                face_index,
            } => Face::from_path(path, face_index),
        }
    }

    /// Determines whether a blob of raw font data represents a supported font, and, if so, how
    /// many faces it holds.
    pub fn analyze_bytes(font_data: Arc<Vec<u8>>) -> Result<FileType, FaceLoadingError> {
        let freetype_face = new_memory_face(&font_data, 0)?;
        unsafe {
            let file_type = match (*freetype_face).num_faces {
                1 => FileType::Single,
                num_faces => FileType::Collection(num_faces as u32),
            };
            FT_Done_Face(freetype_face);
            Ok(file_type)
        }
    }

    /// Determines whether a path points to a supported font, and, if so, how many faces it
    /// holds.
    #[inline]
    pub fn analyze_path<P>(path: P) -> Result<FileType, FaceLoadingError>
    where
        P: AsRef<Path>,
    {
        Face::analyze_bytes(Arc::new(fs::read(path)?))
    }

    /// Sets the size glyphs are rendered at, in pixels per em.
    ///
    /// Faces that only carry fixed-size bitmap strikes (color emoji fonts, mostly) cannot be
    /// scaled to arbitrary sizes. For those the strike closest to `pixel_size` is selected
    /// instead.
    pub fn set_size(&self, pixel_size: f32) -> Result<(), FaceLoadingError> {
        unsafe {
            let char_size = f32_to_ft_fixed_26_6(pixel_size);
            if FT_Set_Char_Size(self.freetype_face, char_size, 0, 0, 0) == 0 {
                return Ok(());
            }

            let strike_count = (*self.freetype_face).num_fixed_sizes as usize;
            if strike_count == 0 || (*self.freetype_face).available_sizes.is_null() {
                return Err(FaceLoadingError::SizeRejected(pixel_size));
            }
            let strikes =
                slice::from_raw_parts((*self.freetype_face).available_sizes, strike_count);
            let wanted = char_size as i64;
            let mut best_index = 0;
            for (index, strike) in strikes.iter().enumerate() {
                let distance = (strike.y_ppem as i64 - wanted).abs();
                if distance < (strikes[best_index].y_ppem as i64 - wanted).abs() {
                    best_index = index;
                }
            }
            debug!(
                "{:?}: selecting bitmap strike {} for size {}",
                self, best_index, pixel_size
            );
            if FT_Select_Size(self.freetype_face, best_index as c_int) != 0 {
                return Err(FaceLoadingError::SizeRejected(pixel_size));
            }
            Ok(())
        }
    }

    /// Returns the usual glyph ID for a Unicode character.
    ///
    /// Be careful with this function; typographically correct character-to-glyph mapping must be
    /// done using a *shaper* such as HarfBuzz. This function is only useful for best-effort simple
    /// use cases like "what does character X look like on its own".
    pub fn glyph_for_char(&self, character: char) -> Option<u32> {
        unsafe {
            match FT_Get_Char_Index(self.freetype_face, character as FT_ULong) {
                0 => None,
                glyph_id => Some(glyph_id as u32),
            }
        }
    }

    /// Returns the name of the font family.
    pub fn family_name(&self) -> String {
        unsafe { c_string_or_empty((*self.freetype_face).family_name) }
    }

    /// Returns the name of the style within the family, such as "Bold Italic".
    pub fn style_name(&self) -> String {
        unsafe { c_string_or_empty((*self.freetype_face).style_name) }
    }

    /// Returns the number of faces in the file this face was loaded from.
    pub fn face_count(&self) -> u32 {
        unsafe { (*self.freetype_face).num_faces as u32 }
    }

    /// Returns the font data this face was loaded from.
    ///
    /// If this face is a member of a collection, this is the data for the entire collection.
    #[inline]
    pub fn font_data(&self) -> Arc<Vec<u8>> {
        self.font_data.clone()
    }

    // The slot returned is only valid until the next glyph is loaded on this face.
    unsafe fn render_char(
        &self,
        character: char,
        render_mode: RenderMode,
        load_flags: LoadFlags,
    ) -> Result<GlyphSlot, GlyphLoadingError> {
        // A character missing from the cmap maps to glyph 0, the `.notdef` box. It still gets
        // drawn, like any other glyph.
        let glyph_id = FT_Get_Char_Index(self.freetype_face, character as FT_ULong);
        if FT_Load_Glyph(self.freetype_face, glyph_id, load_flags.bits() as i32) != 0 {
            return Err(GlyphLoadingError::NoSuchGlyph(character));
        }

        let glyph = (*self.freetype_face).glyph;
        let error = FT_Render_Glyph(glyph, render_mode_to_freetype(render_mode));
        if error != 0 {
            warn!(
                "{:?}: FT_Render_Glyph() failed for {:?} with error {}",
                self, character, error
            );
            return Err(GlyphLoadingError::RenderFailed(character));
        }

        let bitmap = &(*glyph).bitmap;
        let pitch = bitmap.pitch as i32;
        let rows = bitmap.rows as u32;
        let buffer = if bitmap.buffer.is_null() {
            None
        } else {
            let length = pitch.unsigned_abs() as usize * rows as usize;
            Some(slice::from_raw_parts(bitmap.buffer as *const u8, length))
        };

        Ok(GlyphSlot {
            bitmap: RawBitmap {
                buffer,
                width: bitmap.width as u32,
                rows,
                pitch,
                pixel_mode: PixelMode::from_freetype(bitmap.pixel_mode as u8),
            },
            left: (*glyph).bitmap_left as i32,
            top: (*glyph).bitmap_top as i32,
            advance_x: (*glyph).advance.x as i64,
        })
    }
}

impl Loader for Face {
    fn with_rendered_char<F, R>(
        &self,
        character: char,
        render_mode: RenderMode,
        load_flags: LoadFlags,
        f: F,
    ) -> Result<R, GlyphLoadingError>
    where
        F: FnOnce(&GlyphSlot) -> R,
    {
        unsafe {
            let slot = self.render_char(character, render_mode, load_flags)?;
            Ok(f(&slot))
        }
    }
}

impl Drop for Face {
    fn drop(&mut self) {
        unsafe {
            if !self.freetype_face.is_null() {
                let error = FT_Done_Face(self.freetype_face);
                if error != 0 {
                    warn!("FT_Done_Face() failed with error {}", error);
                }
            }
        }
    }
}

impl Debug for Face {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), fmt::Error> {
        write!(fmt, "{} {}", self.family_name(), self.style_name())
    }
}

fn new_memory_face(font_data: &[u8], face_index: u32) -> Result<FT_Face, FaceLoadingError> {
    FREETYPE_LIBRARY.with(|freetype_library| unsafe {
        if freetype_library.is_null() {
            return Err(FaceLoadingError::Parse);
        }

        let mut freetype_face = ptr::null_mut();
        let error = FT_New_Memory_Face(
            *freetype_library,
            font_data.as_ptr(),
            font_data.len() as FT_Long,
            face_index as FT_Long,
            &mut freetype_face,
        );
        match error {
            0 => Ok(freetype_face),
            FT_ERR_INVALID_ARGUMENT if face_index > 0 => {
                Err(FaceLoadingError::NoSuchFaceInCollection)
            }
            _ => Err(FaceLoadingError::Parse),
        }
    })
}

fn render_mode_to_freetype(render_mode: RenderMode) -> FT_Render_Mode {
    match render_mode {
        RenderMode::Normal => FT_Render_Mode::FT_RENDER_MODE_NORMAL,
        RenderMode::Light => FT_Render_Mode::FT_RENDER_MODE_LIGHT,
        RenderMode::Mono => FT_Render_Mode::FT_RENDER_MODE_MONO,
        RenderMode::Lcd => FT_Render_Mode::FT_RENDER_MODE_LCD,
        RenderMode::LcdV => FT_Render_Mode::FT_RENDER_MODE_LCD_V,
    }
}

unsafe fn c_string_or_empty(string: *const c_char) -> String {
    if string.is_null() {
        return String::new();
    }
    CStr::from_ptr(string).to_string_lossy().into_owned()
}

fn f32_to_ft_fixed_26_6(float: f32) -> FT_Long {
    f32::round(float * 64.0) as FT_Long
}

extern "C" {
    fn FT_Select_Size(face: FT_Face, strike_index: c_int) -> c_int;
}
