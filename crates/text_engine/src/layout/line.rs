//! Block layout: wrapped, anchored, per-glyph placed lines
//!
//! The contract ends at [`PlacedGlyph`]: a destination rectangle in
//! pixels and a UV rectangle into the atlas per visible character.
//! Turning those into vertices is the renderer's concern.

use super::align::{axis_offset, Anchor};
use super::metrics::TextMetrics;
use crate::font::glyph::UvRect;
use crate::font::kerning::KerningSource;

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge (y-down screen space)
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

/// One visible character of a laid-out line
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    /// The character this placement renders
    pub codepoint: char,
    /// Destination rectangle in pixels
    pub dest: Rect,
    /// Atlas location of the glyph image
    pub uv: UvRect,
}

/// One visual line of a laid-out block.
///
/// Regenerable from the source text at any time; never mutated in place.
/// Characters without ink (spaces, unpacked glyphs) advance the pen but
/// appear in no line.
#[derive(Debug, Clone)]
pub struct LaidOutLine {
    /// Visible glyphs in left-to-right order
    pub glyphs: Vec<PlacedGlyph>,
    /// Measured advance width of the full line in pixels
    pub width: f32,
    /// Line height in pixels (0 for empty lines)
    pub height: f32,
}

impl<K: KerningSource> TextMetrics<'_, K> {
    /// Wrap, align and place a text block inside a target box.
    ///
    /// The block offset comes from the anchor weights against the box
    /// size; each line is additionally aligned within the block by the
    /// horizontal weight, and lines stack downward by their own height.
    /// A zero-size box anchors the block around a point.
    pub fn layout_block(
        &self,
        text: &str,
        pixel_height: f32,
        max_width: f32,
        box_width: f32,
        box_height: f32,
        anchor: Anchor,
    ) -> Vec<LaidOutLine> {
        let lines = self.split_text(text, pixel_height, max_width);
        let scale = self.scale(pixel_height);

        let block_width = lines
            .iter()
            .map(|line| self.line_width(line, pixel_height))
            .fold(0.0, f32::max);
        let block_height: f32 =
            lines.iter().map(|line| self.line_height(line, pixel_height)).sum();

        let offset = anchor.resolve(block_width, block_height, box_width, box_height);
        let (h_weight, _) = anchor.weights();

        let mut laid_out = Vec::with_capacity(lines.len());
        let mut top = offset.y;
        for line in &lines {
            let width = self.line_width(line, pixel_height);
            let height = self.line_height(line, pixel_height);
            let line_x = offset.x + axis_offset(h_weight, width, block_width);

            let mut glyphs = Vec::with_capacity(line.len());
            let mut pen = line_x;
            let mut prev = None;
            for ch in line.chars() {
                let record = self.table.get_char(ch);
                pen += self.kerning.pair_adjust(prev, record.glyph_id) as f32 * scale;
                if !record.uv.is_empty() {
                    let mut x = pen + record.bounds.x0 as f32 * scale;
                    let mut y = top + record.bounds.y0 as f32 * scale;
                    if self.meta.integer_align {
                        x = x.round();
                        y = y.round();
                    }
                    glyphs.push(PlacedGlyph {
                        codepoint: ch,
                        dest: Rect {
                            x,
                            y,
                            width: record.bounds.width() as f32 * scale,
                            height: record.bounds.height() as f32 * scale,
                        },
                        uv: record.uv,
                    });
                }
                pen += record.advance_width as f32 * scale;
                prev = Some(record.glyph_id);
            }

            laid_out.push(LaidOutLine { glyphs, width, height });
            top += height;
        }
        laid_out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::glyph::{GlyphBounds, GlyphRecord, GlyphTable};
    use crate::font::kerning::NoKerning;
    use crate::font::{FontMetadata, FontWeight};
    use approx::assert_relative_eq;
    use ttf_parser::GlyphId;

    /// ASCII font, 10 units advance, ink box (1, 100)-(9, 800); space has
    /// no ink. Scale at 100px is 0.1, so one character advances 1px.
    fn fixture(integer_align: bool) -> (GlyphTable, FontMetadata) {
        let record = |cp: u32| {
            let blank = cp == 32;
            GlyphRecord {
                codepoint: cp,
                glyph_id: GlyphId(cp as u16),
                advance_width: 10,
                left_bearing: 1,
                bounds: GlyphBounds { x0: 1, y0: 100, x1: 9, y1: 800 },
                uv: if blank {
                    UvRect::default()
                } else {
                    UvRect { u0: 0.1, v0: 0.1, u1: 0.2, v1: 0.2 }
                },
            }
        };
        let table = GlyphTable::new(32, (32..127).map(record).collect(), record(0));
        let meta = FontMetadata {
            family: "Test Sans".to_string(),
            weight: FontWeight::Regular,
            italic: false,
            ascent: 800,
            descent: -200,
            line_gap: 0,
            units_per_em: 1000,
            kerning: false,
            integer_align,
        };
        (table, meta)
    }

    const PX: f32 = 100.0;

    #[test]
    fn top_left_places_ink_from_origin() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let lines = metrics.layout_block("ab", PX, 0.0, 0.0, 0.0, Anchor::TopLeft);
        assert_eq!(lines.len(), 1);
        assert_relative_eq!(lines[0].width, 2.0);
        assert_relative_eq!(lines[0].height, 100.0);

        let a = &lines[0].glyphs[0];
        assert_relative_eq!(a.dest.x, 0.1); // pen 0 + x0 * scale
        assert_relative_eq!(a.dest.y, 10.0); // ascent-relative y0 * scale
        assert_relative_eq!(a.dest.width, 0.8);
        assert_relative_eq!(a.dest.height, 70.0);

        let b = &lines[0].glyphs[1];
        assert_relative_eq!(b.dest.x, 1.1); // advanced one character
    }

    #[test]
    fn blank_glyphs_advance_but_emit_nothing() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let lines = metrics.layout_block("a b", PX, 0.0, 0.0, 0.0, Anchor::TopLeft);
        assert_eq!(lines[0].glyphs.len(), 2);
        assert_eq!(lines[0].glyphs[1].codepoint, 'b');
        // The space still advanced the pen by one character
        assert_relative_eq!(lines[0].glyphs[1].dest.x, 2.1);
        assert_relative_eq!(lines[0].width, 3.0);
    }

    #[test]
    fn lines_stack_downward_by_their_height() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let lines = metrics.layout_block("a\nb", PX, 0.0, 0.0, 0.0, Anchor::TopLeft);
        assert_eq!(lines.len(), 2);
        assert_relative_eq!(lines[0].glyphs[0].dest.y, 10.0);
        assert_relative_eq!(lines[1].glyphs[0].dest.y, 110.0);
    }

    #[test]
    fn per_line_alignment_within_the_block() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        // Block is 4px wide ("abcd"); the short line aligns right inside it
        let lines = metrics.layout_block("ab\nabcd", PX, 0.0, 0.0, 0.0, Anchor::TopRight);
        // offset.x = 0 - block_width = -4; short line shifts by +2
        assert_relative_eq!(lines[0].glyphs[0].dest.x, -4.0 + 2.0 + 0.1);
        assert_relative_eq!(lines[1].glyphs[0].dest.x, -4.0 + 0.1);
    }

    #[test]
    fn centered_block_in_a_box() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let lines = metrics.layout_block("ab", PX, 0.0, 10.0, 300.0, Anchor::Center);
        // Block 2x100 in a 10x300 box: offset (4, 100)
        assert_relative_eq!(lines[0].glyphs[0].dest.x, 4.0 + 0.1);
        assert_relative_eq!(lines[0].glyphs[0].dest.y, 100.0 + 10.0);
    }

    #[test]
    fn integer_alignment_rounds_destinations() {
        let (table, meta) = fixture(true);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let lines = metrics.layout_block("ab", PX, 0.0, 0.0, 0.0, Anchor::TopLeft);
        assert_relative_eq!(lines[0].glyphs[0].dest.x, 0.0); // 0.1 rounds down
        assert_relative_eq!(lines[0].glyphs[1].dest.x, 1.0); // 1.1 rounds down
        assert_relative_eq!(lines[0].glyphs[0].dest.y, 10.0);
    }

    #[test]
    fn relayout_is_reproducible() {
        let (table, meta) = fixture(false);
        let metrics = TextMetrics::new(&table, &meta, NoKerning);
        let first = metrics.layout_block("wrap these words", PX, 6.0, 50.0, 50.0, Anchor::Center);
        let second = metrics.layout_block("wrap these words", PX, 6.0, 50.0, 50.0, Anchor::Center);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.glyphs.len(), b.glyphs.len());
            for (ga, gb) in a.glyphs.iter().zip(&b.glyphs) {
                assert_eq!(ga.dest, gb.dest);
            }
        }
    }
}
