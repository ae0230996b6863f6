//! Font loading and baked font data
//!
//! A [`Font`] is built once from raw font program bytes: parsing,
//! metric extraction and atlas baking all happen in [`Font::from_bytes`].
//! The resulting value is immutable; layout queries borrow it and never
//! fail, so callers only ever observe a fully constructed font or a
//! failed construction.

pub mod atlas;
pub mod glyph;
pub mod kerning;
pub(crate) mod raster;

use ttf_parser::Face;

use crate::config::BakeConfig;
use crate::layout::TextMetrics;
use atlas::AtlasImage;
use glyph::GlyphTable;
use kerning::FaceKerning;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur while loading a font
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// The font program bytes were empty
    #[error("font data is empty")]
    EmptyData,

    /// The font program failed to parse
    #[error("failed to parse font: {0}")]
    Parse(#[from] ttf_parser::FaceParsingError),
}

/// Weight classification, nine ordinal levels from thinnest to heaviest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FontWeight {
    /// Thin (hairline)
    Thin,
    /// Extra light (ultra light)
    ExtraLight,
    /// Light
    Light,
    /// Regular (book, normal); also the fallback when nothing matches
    Regular,
    /// Medium
    Medium,
    /// Semi bold (demi bold)
    SemiBold,
    /// Bold
    Bold,
    /// Extra bold (ultra bold)
    ExtraBold,
    /// Black (heavy)
    Black,
}

impl FontWeight {
    /// Classify a subfamily name string by substring matching.
    ///
    /// Compound names are checked before their substrings so that
    /// "Semi Bold" never classifies as plain bold.
    pub fn classify(subfamily: &str) -> Self {
        let name = subfamily.to_ascii_lowercase();
        let contains = |needles: &[&str]| needles.iter().any(|n| name.contains(n));
        if contains(&["thin"]) {
            Self::Thin
        } else if contains(&["extra light", "extralight", "ultra light", "ultralight"]) {
            Self::ExtraLight
        } else if contains(&["semi bold", "semibold", "demi bold", "demibold", "demi"]) {
            Self::SemiBold
        } else if contains(&["extra bold", "extrabold", "ultra bold", "ultrabold"]) {
            Self::ExtraBold
        } else if contains(&["black", "heavy"]) {
            Self::Black
        } else if contains(&["light"]) {
            Self::Light
        } else if contains(&["medium"]) {
            Self::Medium
        } else if contains(&["bold"]) {
            Self::Bold
        } else {
            Self::Regular
        }
    }
}

/// Font-wide properties captured at load time
#[derive(Debug, Clone)]
pub struct FontMetadata {
    /// Family name from the font's name table
    pub family: String,
    /// Weight classified from the subfamily name
    pub weight: FontWeight,
    /// Whether the subfamily name marks the font as italic
    pub italic: bool,
    /// Ascent in design units (positive, above the baseline)
    pub ascent: i32,
    /// Descent in design units (negative, below the baseline)
    pub descent: i32,
    /// Extra gap between lines in design units
    pub line_gap: i32,
    /// Design units per em square
    pub units_per_em: u16,
    /// Whether pairwise kerning is applied during layout
    pub kerning: bool,
    /// Whether glyph placement is rounded to integer pixels
    pub integer_align: bool,
}

impl FontMetadata {
    fn from_face(face: &Face<'_>, config: &BakeConfig) -> Self {
        let family =
            name_string(face, ttf_parser::name_id::FAMILY).unwrap_or_else(|| "Unnamed".to_string());
        let subfamily = name_string(face, ttf_parser::name_id::SUBFAMILY).unwrap_or_default();
        let (weight, italic) = Self::parse_style(&subfamily);
        Self {
            family,
            weight,
            italic,
            ascent: i32::from(face.ascender()),
            descent: i32::from(face.descender()),
            line_gap: i32::from(face.line_gap()),
            units_per_em: face.units_per_em(),
            kerning: config.kerning,
            integer_align: config.integer_align,
        }
    }

    /// Weight and italic flag derived from a subfamily name string
    pub(crate) fn parse_style(subfamily: &str) -> (FontWeight, bool) {
        let italic = subfamily.to_ascii_lowercase().contains("italic");
        (FontWeight::classify(subfamily), italic)
    }
}

/// Read a name-table entry, preferring Unicode records.
///
/// Fonts whose name table only carries legacy (Macintosh) records still
/// resolve when the bytes are plain ASCII, which they are for almost
/// every Latin family name.
fn name_string(face: &Face<'_>, name_id: u16) -> Option<String> {
    let names = face.names();
    for i in 0..names.len() {
        if let Some(name) = names.get(i) {
            if name.name_id == name_id && name.is_unicode() {
                if let Some(value) = name.to_string() {
                    return Some(value);
                }
            }
        }
    }
    for i in 0..names.len() {
        if let Some(name) = names.get(i) {
            if name.name_id == name_id {
                if let Some(value) = ascii_name(name.name) {
                    return Some(value);
                }
            }
        }
    }
    None
}

/// Decode a legacy name record when it happens to be pure ASCII.
///
/// Mac Roman agrees with ASCII over 0x00..0x7F, so this never
/// misdecodes; anything with high bytes is skipped rather than guessed.
fn ascii_name(raw: &[u8]) -> Option<String> {
    if raw.is_empty() || !raw.iter().all(u8::is_ascii) {
        return None;
    }
    std::str::from_utf8(raw).ok().map(str::to_string)
}

/// A loaded font: parsed face, metadata, glyph table and atlas image.
///
/// Construction is a single synchronous call; afterwards every part is
/// read-only, so one `Font` can serve measurement and layout queries
/// from any number of threads without synchronization.
pub struct Font<'data> {
    face: Face<'data>,
    metadata: FontMetadata,
    glyphs: GlyphTable,
    atlas: AtlasImage,
}

impl<'data> Font<'data> {
    /// Parse font program bytes and bake the atlas and glyph table.
    ///
    /// Parsing failure is fatal and produces no font. Hitting the atlas
    /// size ceiling is not: the font loads with a partial atlas and the
    /// unpacked glyphs stay metrically correct but invisible.
    pub fn from_bytes(data: &'data [u8], config: &BakeConfig) -> FontResult<Self> {
        if data.is_empty() {
            return Err(FontError::EmptyData);
        }
        let face = Face::parse(data, 0)?;
        let metadata = FontMetadata::from_face(&face, config);
        log::info!(
            "loading '{}' ({:?}{}): {} code points at {}px",
            metadata.family,
            metadata.weight,
            if metadata.italic { ", italic" } else { "" },
            config.codepoint_count(),
            config.bake_pixel_height,
        );
        let (atlas, glyphs) = atlas::build(&face, metadata.ascent, metadata.descent, config);
        Ok(Self { face, metadata, glyphs, atlas })
    }

    /// Font-wide properties
    pub fn metadata(&self) -> &FontMetadata {
        &self.metadata
    }

    /// Per-codepoint metrics table
    pub fn glyphs(&self) -> &GlyphTable {
        &self.glyphs
    }

    /// CPU-side coverage atlas
    pub fn atlas(&self) -> &AtlasImage {
        &self.atlas
    }

    /// Measurement and layout view over this font.
    ///
    /// Kerning honors the flag the font was baked with.
    pub fn metrics<'font>(&'font self) -> TextMetrics<'font, FaceKerning<'font, 'data>> {
        TextMetrics::new(
            &self.glyphs,
            &self.metadata,
            FaceKerning::new(&self.face, self.metadata.kerning),
        )
    }
}
