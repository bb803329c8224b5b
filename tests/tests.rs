// glyph-line/tests/tests.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Tests against FreeType and a real font.
//
// These need a TrueType font on disk. `GLYPH_LINE_TEST_FONT` picks one explicitly; otherwise
// DejaVu Sans is looked for in the usual places. When no font is found the tests log that and
// pass without checking anything.

use glyph_line::canvas::{Canvas, Format};
use glyph_line::error::FaceLoadingError;
use glyph_line::face::Face;
use glyph_line::file_type::FileType;
use glyph_line::handle::Handle;
use glyph_line::line;
use glyph_line::options::{LineOptions, RenderMode};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

static TEST_FONT_ENV_VAR: &str = "GLYPH_LINE_TEST_FONT";
static TEST_FONT_FAMILY_NAME: &str = "DejaVu Sans";
static TEST_FONT_CANDIDATE_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
];

static TEST_SIZE: f32 = 32.0;

fn test_font_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(TEST_FONT_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    let found = TEST_FONT_CANDIDATE_PATHS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists());
    if found.is_none() {
        eprintln!("no test font found; set {} to run this test", TEST_FONT_ENV_VAR);
    }
    found
}

fn test_face() -> Option<Face> {
    let face = Face::from_path(test_font_path()?, 0).unwrap();
    face.set_size(TEST_SIZE).unwrap();
    Some(face)
}

fn render(face: &Face, text: &str, options: &LineOptions) -> Option<Canvas> {
    line::render_line(face, text, options).unwrap()
}

fn has_ink(canvas: &Canvas) -> bool {
    canvas.pixels.iter().any(|&value| value < 0x80)
}

#[test]
pub fn load_face_from_path() {
    let path = match test_font_path() {
        Some(path) => path,
        None => return,
    };
    let face = Face::from_path(&path, 0).unwrap();
    if env::var_os(TEST_FONT_ENV_VAR).is_none() {
        assert_eq!(face.family_name(), TEST_FONT_FAMILY_NAME);
    }
    assert_eq!(face.face_count(), 1);
}

#[test]
pub fn load_face_from_memory_and_handle() {
    let path = match test_font_path() {
        Some(path) => path,
        None => return,
    };
    let bytes = Arc::new(fs::read(&path).unwrap());
    let from_memory = Face::from_bytes(bytes.clone(), 0).unwrap();
    let from_handle = Handle::from_memory(bytes, 0).load().unwrap();
    let from_path_handle = Handle::from_path(path, 0).load().unwrap();
    assert_eq!(from_memory.family_name(), from_handle.family_name());
    assert_eq!(from_memory.family_name(), from_path_handle.family_name());
}

#[test]
pub fn analyze_single_font() {
    let path = match test_font_path() {
        Some(path) => path,
        None => return,
    };
    if env::var_os(TEST_FONT_ENV_VAR).is_none() {
        assert_eq!(Face::analyze_path(&path).unwrap(), FileType::Single);
    }
}

#[test]
pub fn load_face_from_garbage_fails() {
    let garbage = Arc::new(vec![0x42; 256]);
    match Face::from_bytes(garbage, 0) {
        Err(FaceLoadingError::Parse) => {}
        other => panic!("expected a parse error, got {:?}", other),
    }
}

#[test]
pub fn load_face_from_missing_file_fails() {
    match Face::from_path("/nonexistent/glyph-line/NoSuchFont.ttf", 0) {
        Err(FaceLoadingError::Io(_)) => {}
        other => panic!("expected an I/O error, got {:?}", other),
    }
}

#[test]
pub fn glyph_for_char() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    assert!(face.glyph_for_char('A').is_some());
    assert_eq!(face.glyph_for_char('\u{10fffd}'), None);
}

#[test]
pub fn render_line_grayscale() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let canvas = render(&face, "Hello", &LineOptions::default()).unwrap();
    assert_eq!(canvas.format, Format::Gray8);
    assert!(canvas.width() > canvas.height());
    assert!(has_ink(&canvas));
    // The margin stays white.
    assert_eq!(canvas.pixel(0, 0), Some(&[0xff][..]));
    let (right, bottom) = (canvas.width() - 1, canvas.height() - 1);
    assert_eq!(canvas.pixel(right, bottom), Some(&[0xff][..]));
}

#[test]
pub fn render_line_matches_measured_size() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::new().margin((3, 5, 7, 11));
    let layout = line::layout_line(&face, "Typography", &options).unwrap();
    let metrics = layout.metrics();
    assert_eq!(metrics.glyph_count, 10);
    assert!(metrics.descent > 0, "'y', 'p' and 'g' descend");

    let canvas = layout.composite(&options.margin).unwrap();
    assert_eq!(canvas.width(), metrics.advance_width + 3 + 5);
    assert_eq!(canvas.height(), metrics.ascent + metrics.descent + 7 + 11);
}

#[test]
pub fn render_line_is_repeatable() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::default();
    assert_eq!(render(&face, "AVAWAY", &options), render(&face, "AVAWAY", &options));
}

#[test]
pub fn render_line_widths_add_up() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::default();
    let margins = options.margin.horizontal() as i32;
    let width = |text| render(&face, text, &options).unwrap().width() - margins;
    assert_eq!(width("AB"), width("A") + width("B"));
}

#[test]
pub fn render_line_without_ink_is_none() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::default();
    assert_eq!(render(&face, "", &options), None);
    assert_eq!(render(&face, "   ", &options), None);
}

#[test]
pub fn render_line_monochrome_is_bilevel() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::new().render_mode(RenderMode::Mono);
    let canvas = render(&face, "Mono", &options).unwrap();
    assert_eq!(canvas.format, Format::Gray8);
    assert!(canvas
        .pixels
        .iter()
        .all(|&value| value == 0 || value == 0xff));
    assert!(has_ink(&canvas));
}

#[test]
pub fn render_line_subpixel_is_rgb() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::new().render_mode(RenderMode::Lcd);
    let canvas = render(&face, "LCD", &options).unwrap();
    assert_eq!(canvas.format, Format::Rgb24);
    assert!(has_ink(&canvas));
}

#[test]
pub fn render_line_grows_with_size() {
    let face = match test_face() {
        Some(face) => face,
        None => return,
    };
    let options = LineOptions::default();
    face.set_size(12.0).unwrap();
    let small = render(&face, "Size", &options).unwrap();
    face.set_size(48.0).unwrap();
    let large = render(&face, "Size", &options).unwrap();
    assert!(large.width() > small.width());
    assert!(large.height() > small.height());
}
