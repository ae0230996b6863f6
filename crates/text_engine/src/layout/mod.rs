//! Text measurement, wrapping and alignment
//!
//! # Architecture
//!
//! - [`TextMetrics`]: pure measurement and word wrapping over a baked font
//! - [`Anchor`]: nine-way alignment of a text block within a box
//! - [`LaidOutLine`]: per-glyph destination and UV rectangles for one line

mod align;
mod line;
mod metrics;

pub use align::Anchor;
pub use line::{LaidOutLine, PlacedGlyph, Rect};
pub use metrics::TextMetrics;
