// glyph-line/demos/render-text.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use glyph_line::canvas::{Canvas, Format};
use glyph_line::face::Face;
use glyph_line::line;
use glyph_line::options::{FailurePolicy, LineOptions, LoadFlags, Margin, RenderMode};
use log::info;
use std::fmt::Write;
use std::process;

#[cfg(any(target_family = "windows", target_os = "macos"))]
static DEFAULT_FONT_PATH: &str = "/Library/Fonts/Arial Unicode.ttf";
#[cfg(not(any(target_family = "windows", target_os = "macos")))]
static DEFAULT_FONT_PATH: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

fn get_args() -> ArgMatches {
    let font_arg = Arg::new("FONT")
        .help("Path to the font file")
        .default_value(DEFAULT_FONT_PATH)
        .index(1);
    let text_arg = Arg::new("TEXT")
        .help("Text to render")
        .default_value("Hello")
        .index(2);
    let size_arg = Arg::new("size")
        .help("Size in pixels per em")
        .short('S')
        .long("size")
        .value_parser(clap::value_parser!(f32))
        .default_value("32");
    let index_arg = Arg::new("index")
        .help("Index of the face within a font collection")
        .short('i')
        .long("index")
        .value_parser(clap::value_parser!(u32))
        .default_value("0");
    let mode_value_parser =
        clap::builder::PossibleValuesParser::new(["normal", "light", "mono", "lcd", "lcd-v"]);
    let mode_arg = Arg::new("mode")
        .help("Select the render mode")
        .short('m')
        .long("mode")
        .value_parser(mode_value_parser)
        .default_value("light");
    let color_arg = Arg::new("color")
        .help("Load embedded color bitmaps")
        .short('c')
        .long("color")
        .action(ArgAction::SetTrue);
    let strict_arg = Arg::new("strict")
        .help("Fail instead of skipping characters that cannot be rendered")
        .long("strict")
        .action(ArgAction::SetTrue);
    let margin_arg = Arg::new("margin")
        .help("Margin in pixels: left, right, top, bottom")
        .long("margin")
        .value_parser(clap::value_parser!(u32))
        .value_names(["LEFT", "RIGHT", "TOP", "BOTTOM"])
        .num_args(4);
    let output_arg = Arg::new("output")
        .help("Write the image to this file instead of printing it")
        .short('o')
        .long("output");
    Command::new("render-text")
        .version("0.1")
        .author("The Pathfinder Project Developers")
        .about("Simple example tool to render a line of text with `glyph-line`")
        .arg(font_arg)
        .arg(text_arg)
        .arg(size_arg)
        .arg(index_arg)
        .arg(mode_arg)
        .arg(color_arg)
        .arg(strict_arg)
        .arg(margin_arg)
        .arg(output_arg)
        .get_matches()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = get_args();
    let font_path = matches.get_one::<String>("FONT").map(|s| s.as_str()).unwrap();
    let text = matches.get_one::<String>("TEXT").map(|s| s.as_str()).unwrap();
    let size = *matches.get_one::<f32>("size").unwrap();
    let face_index = *matches.get_one::<u32>("index").unwrap();

    let render_mode = match matches.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("normal") => RenderMode::Normal,
        Some("mono") => RenderMode::Mono,
        Some("lcd") => RenderMode::Lcd,
        Some("lcd-v") => RenderMode::LcdV,
        _ => RenderMode::Light,
    };
    let load_flags = if matches.get_flag("color") {
        LoadFlags::COLOR
    } else {
        LoadFlags::empty()
    };
    let failure_policy = if matches.get_flag("strict") {
        FailurePolicy::Abort
    } else {
        FailurePolicy::Skip
    };
    let mut margin = Margin::default();
    if let Some(values) = matches.get_many::<u32>("margin") {
        if let [left, right, top, bottom] = values.copied().collect::<Vec<_>>()[..] {
            margin = Margin::from((left, right, top, bottom));
        }
    }

    let options = LineOptions::new()
        .render_mode(render_mode)
        .load_flags(load_flags)
        .margin(margin)
        .failure_policy(failure_policy);

    let face = Face::from_path(font_path, face_index).unwrap_or_else(|error| {
        eprintln!("cannot open {}: {}", font_path, error);
        process::exit(1)
    });
    face.set_size(size).unwrap_or_else(|error| {
        eprintln!("{:?}: {}", face, error);
        process::exit(1)
    });

    let canvas = match line::render_line(&face, text, &options) {
        Ok(Some(canvas)) => canvas,
        Ok(None) => {
            eprintln!("nothing to draw for {:?}", text);
            process::exit(1)
        }
        Err(error) => {
            eprintln!("{}", error);
            process::exit(1)
        }
    };
    info!(
        "{:?}: {}x{} {:?}",
        face,
        canvas.width(),
        canvas.height(),
        canvas.format
    );

    match matches.get_one::<String>("output") {
        Some(path) => {
            if let Err(error) = canvas.save(path) {
                eprintln!("cannot write {}: {}", path, error);
                process::exit(1)
            }
        }
        None => print_canvas(&canvas),
    }
}

fn print_canvas(canvas: &Canvas) {
    for y in 0..canvas.height() {
        let mut line = String::new();
        for x in 0..canvas.width() {
            let pixel = canvas.pixel(x, y).unwrap();
            match canvas.format {
                Format::Rgba32 | Format::Rgb24 => {
                    write!(
                        &mut line,
                        "{}{}{}",
                        shade(pixel[0]).to_string().red(),
                        shade(pixel[1]).to_string().green(),
                        shade(pixel[2]).to_string().blue()
                    )
                    .unwrap();
                }
                Format::Gray8 => {
                    let shade = shade(pixel[0]);
                    line.push(shade);
                    line.push(shade);
                }
            }
        }
        println!("{}", line);
    }
}

// Ink is dark, so the darkest values get the densest blocks.
fn shade(value: u8) -> char {
    match value {
        0 => '█',
        1..=85 => '▓',
        86..=170 => '▒',
        171..=254 => '░',
        _ => ' ',
    }
}
