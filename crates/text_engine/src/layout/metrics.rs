//! Text measurement and word wrapping
//!
//! [`TextMetrics`] is a borrowed view over an immutable font's glyph
//! table, vertical metrics and kerning source. Every operation is pure:
//! measurements allocate nothing beyond the returned line list, so the
//! same view can be shared across threads freely.
//!
//! Two numeric domains are kept strictly apart: font design units
//! (integers, size-independent) and pixels (floats). [`TextMetrics::scale`]
//! is the only bridge between them.

use crate::font::glyph::GlyphTable;
use crate::font::kerning::KerningSource;
use crate::font::FontMetadata;

/// Measurement and wrapping operations for one font at arbitrary sizes
pub struct TextMetrics<'a, K: KerningSource> {
    pub(crate) table: &'a GlyphTable,
    pub(crate) meta: &'a FontMetadata,
    pub(crate) kerning: K,
}

impl<'a, K: KerningSource> TextMetrics<'a, K> {
    /// Create a view over a glyph table and its font's metadata
    pub fn new(table: &'a GlyphTable, meta: &'a FontMetadata, kerning: K) -> Self {
        Self { table, meta, kerning }
    }

    /// Design-unit to pixel conversion factor for a target pixel height.
    ///
    /// Monotonically increasing in `pixel_height` and independent of any
    /// particular string.
    pub fn scale(&self, pixel_height: f32) -> f32 {
        pixel_height / (self.meta.ascent - self.meta.descent) as f32
    }

    /// Advance width of a single line in pixels, kerning included
    pub fn line_width(&self, line: &str, pixel_height: f32) -> f32 {
        self.line_advance_units(line) as f32 * self.scale(pixel_height)
    }

    /// Height of a single line in pixels.
    ///
    /// Constant for every non-empty line of a given font and size, which
    /// keeps the vertical rhythm of a paragraph monospaced; an empty line
    /// contributes no height.
    pub fn line_height(&self, line: &str, pixel_height: f32) -> f32 {
        if line.is_empty() {
            return 0.0;
        }
        (self.meta.ascent - self.meta.descent + self.meta.line_gap) as f32
            * self.scale(pixel_height)
    }

    /// Split text into lines under a width constraint.
    ///
    /// Hard breaks (`\n`, `\r\n`, `\n\r`) always split. When `max_width`
    /// is positive, segments wider than it are greedily word-wrapped on
    /// single spaces; a lone word wider than `max_width` is emitted as
    /// its own overflowing line rather than split mid-word. The result is
    /// a plain finite list, regenerated on every call.
    pub fn split_text(&self, text: &str, pixel_height: f32, max_width: f32) -> Vec<String> {
        let mut lines = Vec::new();
        for segment in split_hard_breaks(text) {
            if max_width <= 0.0 || self.line_width(&segment, pixel_height) <= max_width {
                lines.push(segment);
            } else {
                wrap_segment(&segment, max_width, |s| self.line_width(s, pixel_height), &mut lines);
            }
        }
        lines
    }

    /// Widest wrapped line of the text, in pixels
    pub fn text_width(&self, text: &str, pixel_height: f32, max_width: f32) -> f32 {
        self.split_text(text, pixel_height, max_width)
            .iter()
            .map(|line| self.line_width(line, pixel_height))
            .fold(0.0, f32::max)
    }

    /// Summed height of all wrapped lines, in pixels
    pub fn text_height(&self, text: &str, pixel_height: f32, max_width: f32) -> f32 {
        self.split_text(text, pixel_height, max_width)
            .iter()
            .map(|line| self.line_height(line, pixel_height))
            .sum()
    }

    /// Advance of a line in design units: per character, its advance
    /// width plus the kerning against the previous glyph
    pub(crate) fn line_advance_units(&self, line: &str) -> i64 {
        let mut total = 0i64;
        let mut prev = None;
        for ch in line.chars() {
            let record = self.table.get_char(ch);
            total += i64::from(record.advance_width)
                + i64::from(self.kerning.pair_adjust(prev, record.glyph_id));
            prev = Some(record.glyph_id);
        }
        total
    }
}

/// Split on hard line breaks only.
///
/// `\r\n` and `\n\r` count as a single break; a lone `\r` is ordinary
/// content.
pub(crate) fn split_hard_breaks(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' => {
                if chars.peek() == Some(&'\r') {
                    chars.next();
                }
                segments.push(std::mem::take(&mut current));
            }
            '\r' if chars.peek() == Some(&'\n') => {
                chars.next();
                segments.push(std::mem::take(&mut current));
            }
            _ => current.push(ch),
        }
    }
    segments.push(current);
    segments
}

/// Greedy word wrap of one hard-break-free segment.
///
/// Words are whole tokens between single spaces; each is appended while
/// the extended line still fits, otherwise the accumulated line flushes
/// and the word starts a new one. The final line always flushes.
fn wrap_segment(
    segment: &str,
    max_width: f32,
    width_of: impl Fn(&str) -> f32,
    out: &mut Vec<String>,
) {
    let mut words = segment.split(' ');
    let Some(first) = words.next() else {
        out.push(String::new());
        return;
    };
    let mut current = first.to_string();
    for word in words {
        let mut extended = current.clone();
        extended.push(' ');
        extended.push_str(word);
        if width_of(&extended) <= max_width {
            current = extended;
        } else {
            out.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    out.push(current);
}
