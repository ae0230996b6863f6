//! Atlas baking demo application
//!
//! Loads a TrueType/OpenType font, bakes a glyph atlas, lays out a
//! sample paragraph and reports the measurements. The baked coverage
//! image is written next to the working directory as `atlas.png` so the
//! packing can be inspected visually.
//!
//! Usage:
//!
//! ```text
//! bake_atlas <font.ttf> [text] [pixel_height] [wrap_width] [config.toml|config.ron]
//! ```
//!
//! When a config file is given, bake settings come from it and the
//! `pixel_height` argument overrides its bake height.

use std::process::ExitCode;

use text_engine::{Anchor, BakeConfig, Config, Font};

const DEFAULT_TEXT: &str = "The quick brown fox jumps over the lazy dog";
const DEFAULT_PIXEL_HEIGHT: f32 = 24.0;
const DEFAULT_WRAP_WIDTH: f32 = 240.0;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(font_path) = args.next() else {
        eprintln!(
            "usage: bake_atlas <font.ttf> [text] [pixel_height] [wrap_width] [config.toml|config.ron]"
        );
        return ExitCode::FAILURE;
    };
    let text = args.next().unwrap_or_else(|| DEFAULT_TEXT.to_string());
    let pixel_height: f32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_PIXEL_HEIGHT);
    let wrap_width: f32 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_WRAP_WIDTH);
    let config_path = args.next();

    match run(&font_path, &text, pixel_height, wrap_width, config_path.as_deref()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    font_path: &str,
    text: &str,
    pixel_height: f32,
    wrap_width: f32,
    config_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(font_path)?;
    let mut config = match config_path {
        Some(path) => BakeConfig::load_from_file(path)?,
        None => BakeConfig::default(),
    };
    config.bake_pixel_height = pixel_height;
    let font = Font::from_bytes(&data, &config)?;

    let meta = font.metadata();
    println!(
        "{} ({:?}{}) - {} code points baked",
        meta.family,
        meta.weight,
        if meta.italic { ", italic" } else { "" },
        font.glyphs().len(),
    );

    let metrics = font.metrics();
    println!(
        "block: {:.1} x {:.1} px at wrap width {wrap_width}",
        metrics.text_width(text, pixel_height, wrap_width),
        metrics.text_height(text, pixel_height, wrap_width),
    );
    for line in metrics.split_text(text, pixel_height, wrap_width) {
        println!("  {:6.1}px | {line}", metrics.line_width(&line, pixel_height));
    }

    let placed = metrics.layout_block(
        text,
        pixel_height,
        wrap_width,
        wrap_width,
        0.0,
        Anchor::TopCenter,
    );
    let visible: usize = placed.iter().map(|line| line.glyphs.len()).sum();
    log::info!("placed {} visible glyphs across {} lines", visible, placed.len());

    let atlas = font.atlas();
    let image = image::GrayImage::from_raw(atlas.width, atlas.height, atlas.pixels.clone())
        .ok_or("atlas buffer does not match its dimensions")?;
    image.save("atlas.png")?;
    println!("wrote atlas.png ({}x{})", atlas.width, atlas.height);

    Ok(())
}
