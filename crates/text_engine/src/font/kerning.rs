//! Pairwise kerning lookup
//!
//! Kerning is queried live from the font program's `kern` table; values
//! are in design units and adjust the advance between two adjacent
//! glyphs. There is no caching: the underlying lookup is a cheap binary
//! search and layout passes touch each pair at most once.

use ttf_parser::{Face, GlyphId};

/// Source of pairwise advance adjustments in font design units.
///
/// Implementations must return 0 when there is no previous glyph (start
/// of a line) and when the pair is simply absent from the font. A missing
/// pair is not an error.
pub trait KerningSource {
    /// Advance adjustment to apply between `prev` and `curr`
    fn pair_adjust(&self, prev: Option<GlyphId>, curr: GlyphId) -> i32;
}

/// Kerning backed by a parsed font face.
///
/// Becomes a no-op when kerning was disabled at bake time or the font
/// carries no horizontal kern subtable.
pub struct FaceKerning<'a, 'data> {
    face: &'a Face<'data>,
    enabled: bool,
}

impl<'a, 'data> FaceKerning<'a, 'data> {
    /// Wrap a face, optionally disabling all lookups
    pub fn new(face: &'a Face<'data>, enabled: bool) -> Self {
        Self { face, enabled }
    }
}

impl KerningSource for FaceKerning<'_, '_> {
    fn pair_adjust(&self, prev: Option<GlyphId>, curr: GlyphId) -> i32 {
        guarded_adjust(self.enabled, prev, curr, |prev, curr| {
            let kern = self.face.tables().kern?;
            kern.subtables
                .into_iter()
                .filter(|subtable| subtable.horizontal && !subtable.variable)
                .find_map(|subtable| subtable.glyphs_kerning(prev, curr))
                .map(i32::from)
        })
    }
}

/// Guards shared by every pair lookup: the first glyph of a line and
/// disabled kerning adjust by 0 without consulting the font, and an
/// absent pair adjusts by 0.
fn guarded_adjust(
    enabled: bool,
    prev: Option<GlyphId>,
    curr: GlyphId,
    lookup: impl FnOnce(GlyphId, GlyphId) -> Option<i32>,
) -> i32 {
    let Some(prev) = prev else { return 0 };
    if !enabled {
        return 0;
    }
    lookup(prev, curr).unwrap_or(0)
}

/// Kerning source that always returns 0, for fonts without kerning data
pub struct NoKerning;

impl KerningSource for NoKerning {
    fn pair_adjust(&self, _prev: Option<GlyphId>, _curr: GlyphId) -> i32 {
        0
    }
}
