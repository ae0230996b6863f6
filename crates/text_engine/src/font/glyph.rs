//! Glyph records and the per-codepoint metrics table
//!
//! A [`GlyphTable`] is built once per font by the atlas baker and is
//! immutable afterwards. It holds exactly one [`GlyphRecord`] for every
//! code point in the baked range, including non-printing characters:
//! a glyph without visible ink is represented by a zero-area [`UvRect`],
//! never by a missing entry, so layout code has no "missing glyph" path.

use ttf_parser::GlyphId;

/// Normalized texture coordinates of a packed glyph image in the atlas.
///
/// All four coordinates are zero for glyphs that carry no ink (space,
/// control characters) or that did not fit into the atlas at the size
/// ceiling. Such glyphs still advance the pen normally.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    /// Left edge, normalized to [0, 1]
    pub u0: f32,
    /// Top edge, normalized to [0, 1]
    pub v0: f32,
    /// Right edge, normalized to [0, 1]
    pub u1: f32,
    /// Bottom edge, normalized to [0, 1]
    pub v1: f32,
}

impl UvRect {
    /// Whether this rectangle covers no atlas area (blank or unpacked glyph)
    pub fn is_empty(&self) -> bool {
        self.u0 >= self.u1 || self.v0 >= self.v1
    }
}

/// Glyph bounding box in font design units, y-down from the ascent line.
///
/// The vertical axis is flipped relative to the font's native y-up
/// convention: `y0 = ascent - bbox_top` and `y1 = ascent - bbox_bottom`,
/// so placing a glyph is a plain addition against a line-top coordinate
/// in y-down screen space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphBounds {
    /// Left edge in design units
    pub x0: i32,
    /// Top edge (ascent-relative, smaller means higher on screen)
    pub y0: i32,
    /// Right edge in design units
    pub x1: i32,
    /// Bottom edge (ascent-relative)
    pub y1: i32,
}

impl GlyphBounds {
    /// Width in design units
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    /// Height in design units
    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }
}

/// Metrics and atlas location for a single code point.
///
/// All linear measurements are integers in font design units; they are
/// converted to pixels by the per-size scale factor at layout time and
/// never stored pre-scaled.
#[derive(Debug, Clone)]
pub struct GlyphRecord {
    /// The code point this record answers queries for
    pub codepoint: u32,
    /// Font-internal glyph identifier; several code points may share one
    pub glyph_id: GlyphId,
    /// Horizontal advance in design units
    pub advance_width: i32,
    /// Left side bearing in design units
    pub left_bearing: i32,
    /// Ascent-relative bounding box in design units
    pub bounds: GlyphBounds,
    /// Atlas location, zero-area when the glyph has no packed image
    pub uv: UvRect,
}

/// Immutable per-codepoint lookup table over a contiguous range.
///
/// Storage is dense: `len() == end - start + 1` always holds, with no
/// gaps and no duplicates. Code points outside the baked range resolve
/// to the font's `.notdef` record.
#[derive(Debug)]
pub struct GlyphTable {
    start: u32,
    records: Vec<GlyphRecord>,
    notdef: GlyphRecord,
}

impl GlyphTable {
    pub(crate) fn new(start: u32, records: Vec<GlyphRecord>, notdef: GlyphRecord) -> Self {
        debug_assert!(!records.is_empty());
        Self { start, records, notdef }
    }

    /// Number of code points covered by the table
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table covers no code points (never true for a built font)
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First code point of the covered range
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Last code point of the covered range (inclusive)
    pub fn end(&self) -> u32 {
        self.start + self.records.len() as u32 - 1
    }

    /// Look up the record for a raw code point.
    ///
    /// Out-of-range code points fall back to the `.notdef` record so the
    /// caller never has to branch on a missing entry.
    pub fn get(&self, codepoint: u32) -> &GlyphRecord {
        match codepoint.checked_sub(self.start) {
            Some(index) if (index as usize) < self.records.len() => &self.records[index as usize],
            _ => &self.notdef,
        }
    }

    /// Look up the record for a character
    pub fn get_char(&self, ch: char) -> &GlyphRecord {
        self.get(ch as u32)
    }

    /// Iterate over all records in code point order
    pub fn iter(&self) -> impl Iterator<Item = &GlyphRecord> {
        self.records.iter()
    }
}
