//! # Text Engine
//!
//! Font atlas baking and kerning-aware text layout.
//!
//! A font program is baked once into an immutable [`Font`]: a packed
//! single-channel glyph atlas plus a dense per-codepoint metrics table
//! covering, by default, the full Basic Multilingual Plane. Layout
//! queries (measurement, greedy word wrap, nine-way anchor alignment)
//! borrow that font and never fail.
//!
//! Rendering is out of scope: the contract ends at a CPU-side atlas
//! image and, per visible character, a destination rectangle and a UV
//! rectangle. Uploading textures and emitting vertices is the caller's
//! job.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use text_engine::{Anchor, BakeConfig, Font};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("fonts/default.ttf")?;
//! let font = Font::from_bytes(&data, &BakeConfig::default())?;
//!
//! let metrics = font.metrics();
//! let lines = metrics.split_text("hello atlas world", 24.0, 120.0);
//! let width = metrics.text_width("hello atlas world", 24.0, 120.0);
//!
//! let placed = metrics.layout_block(
//!     "hello atlas world", 24.0, 120.0, 640.0, 480.0, Anchor::Center,
//! );
//! # let _ = (lines, width, placed);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod font;
pub mod layout;

pub use config::{BakeConfig, Config, ConfigError};
pub use font::atlas::AtlasImage;
pub use font::glyph::{GlyphBounds, GlyphRecord, GlyphTable, UvRect};
pub use font::kerning::{FaceKerning, KerningSource, NoKerning};
pub use font::{Font, FontError, FontMetadata, FontResult, FontWeight};
pub use layout::{Anchor, LaidOutLine, PlacedGlyph, Rect, TextMetrics};
