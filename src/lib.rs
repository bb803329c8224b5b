// glyph-line/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `glyph-line` renders a short string into a single bitmap.
//!
//! Each character is rendered on its own by FreeType, decoded from whatever pixel mode FreeType
//! produced, and pasted onto one canvas along a shared baseline:
//!
//! ```no_run
//! use glyph_line::face::Face;
//! use glyph_line::line;
//! use glyph_line::options::{LineOptions, RenderMode};
//!
//! let face = Face::from_path("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", 0).unwrap();
//! face.set_size(32.0).unwrap();
//! let options = LineOptions::new().render_mode(RenderMode::Normal).margin((4, 4, 2, 2));
//! if let Some(canvas) = line::render_line(&face, "Hello", &options).unwrap() {
//!     println!("{}x{} {:?}", canvas.width(), canvas.height(), canvas.format);
//! }
//! ```
//!
//! There is no shaping, kerning, fallback, or line breaking. Ink comes out dark on a white
//! background.

pub mod bitmap;
pub mod canvas;
pub mod error;
pub mod face;
pub mod file_type;
pub mod glyph;
pub mod handle;
pub mod line;
pub mod loader;
pub mod options;
