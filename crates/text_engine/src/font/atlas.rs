//! Atlas baking
//!
//! Packs every distinct glyph referenced by the configured code point
//! range into a single-channel coverage image and records the resulting
//! UV rectangles in a [`GlyphTable`]. Packing is retried with doubled
//! dimensions until it succeeds or the configured ceiling is reached; at
//! the ceiling the partial placement set is kept, so a font always loads
//! even when some glyphs end up without an atlas image.

use std::collections::HashMap;

use etagere::{size2, AtlasAllocator};
use ttf_parser::{Face, GlyphId, Rect};

use super::glyph::{GlyphBounds, GlyphRecord, GlyphTable, UvRect};
use super::raster;
use crate::config::BakeConfig;

/// Smallest atlas dimension ever attempted
const MIN_ATLAS_DIM: u32 = 256;

/// Empty pixels kept between neighboring packed glyphs
const GLYPH_PADDING: u32 = 1;

/// Finished CPU-side atlas: one coverage byte per pixel.
///
/// Uploading this image to a GPU texture is the caller's concern.
#[derive(Debug)]
pub struct AtlasImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major coverage values, `width * height` bytes
    pub pixels: Vec<u8>,
}

/// Design-unit metrics shared by every code point mapping to one glyph
struct IdInfo {
    advance: i32,
    bearing: i32,
    bounds: GlyphBounds,
    bbox: Option<Rect>,
}

impl IdInfo {
    fn query(face: &Face<'_>, id: GlyphId, ascent: i32) -> Self {
        let bbox = face.glyph_bounding_box(id);
        let bounds = bbox.map_or_else(GlyphBounds::default, |r| GlyphBounds {
            x0: i32::from(r.x_min),
            y0: ascent - i32::from(r.y_max),
            x1: i32::from(r.x_max),
            y1: ascent - i32::from(r.y_min),
        });
        Self {
            advance: face.glyph_hor_advance(id).map_or(0, i32::from),
            bearing: face.glyph_hor_side_bearing(id).map_or(0, i32::from),
            bounds,
            bbox,
        }
    }
}

/// Bake the atlas image and glyph table for one face.
pub(crate) fn build(
    face: &Face<'_>,
    ascent: i32,
    descent: i32,
    config: &BakeConfig,
) -> (AtlasImage, GlyphTable) {
    let raster_scale = config.raster_pixel_height() / (ascent - descent) as f32;
    let start = config.codepoint_start;
    let end = config.codepoint_end.max(start);

    // Resolve every code point to a glyph id; unmapped and non-character
    // code points (surrogates) fall back to .notdef so the table stays
    // dense over the whole range.
    let mut ids = Vec::with_capacity((end - start + 1) as usize);
    let mut info: HashMap<u16, IdInfo> = HashMap::new();
    for cp in start..=end {
        let id = char::from_u32(cp)
            .and_then(|c| face.glyph_index(c))
            .unwrap_or(GlyphId(0));
        ids.push(id);
        info.entry(id.0).or_insert_with(|| IdInfo::query(face, id, ascent));
    }
    info.entry(0).or_insert_with(|| IdInfo::query(face, GlyphId(0), ascent));

    // Distinct glyphs with ink, largest first so shelf packing stays tight
    let mut entries: Vec<(GlyphId, (u32, u32))> = info
        .iter()
        .filter_map(|(&id, i)| {
            i.bbox.map(|bbox| (GlyphId(id), raster::raster_dims(bbox, raster_scale)))
        })
        .collect();
    entries.sort_by(|a, b| (b.1 .1, b.1 .0, b.0 .0).cmp(&(a.1 .1, a.1 .0, a.0 .0)));

    let ceiling = config.max_atlas_dim.max(MIN_ATLAS_DIM);
    let side = initial_side(config.raster_pixel_height(), ceiling);
    let (width, height, placements, failed) = pack_all(&entries, side, side, ceiling);

    if failed > 0 {
        log::warn!(
            "atlas ceiling {}x{} reached: {} of {} glyphs left unpacked",
            width,
            height,
            failed,
            entries.len()
        );
    }

    // Rasterize once, after placement settled
    let mut pixels = vec![0u8; (width * height) as usize];
    let mut uvs: HashMap<u16, UvRect> = HashMap::with_capacity(placements.len());
    for (&id, &(x, y)) in &placements {
        let Some(coverage) = raster::rasterize(face, GlyphId(id), raster_scale) else {
            continue;
        };
        blit(&mut pixels, width, x, y, &coverage);
        uvs.insert(
            id,
            UvRect {
                u0: x as f32 / width as f32,
                v0: y as f32 / height as f32,
                u1: (x + coverage.width) as f32 / width as f32,
                v1: (y + coverage.height) as f32 / height as f32,
            },
        );
    }

    log::info!(
        "baked atlas {}x{}: {} code points, {} glyph images",
        width,
        height,
        ids.len(),
        uvs.len()
    );

    let record = |cp: u32, id: GlyphId| {
        let i = &info[&id.0];
        GlyphRecord {
            codepoint: cp,
            glyph_id: id,
            advance_width: i.advance,
            left_bearing: i.bearing,
            bounds: i.bounds,
            uv: uvs.get(&id.0).copied().unwrap_or_default(),
        }
    };

    let records = (start..=end).zip(&ids).map(|(cp, &id)| record(cp, id)).collect();
    let notdef = record(0, GlyphId(0));

    let atlas = AtlasImage { width, height, pixels };
    (atlas, GlyphTable::new(start, records, notdef))
}

fn blit(pixels: &mut [u8], atlas_width: u32, x: u32, y: u32, coverage: &raster::Coverage) {
    for row in 0..coverage.height {
        let src = (row * coverage.width) as usize;
        let dst = ((y + row) * atlas_width + x) as usize;
        pixels[dst..dst + coverage.width as usize]
            .copy_from_slice(&coverage.pixels[src..src + coverage.width as usize]);
    }
}

/// Starting dimension, proportional to the raster pixel height
fn initial_side(raster_pixel_height: f32, ceiling: u32) -> u32 {
    let side = (raster_pixel_height * 16.0).ceil() as u32;
    side.next_power_of_two().clamp(MIN_ATLAS_DIM, ceiling)
}

/// Next atlas size after a failed pack, or `None` at the ceiling.
///
/// The smaller dimension doubles first so area grows by 2x per retry;
/// the loop is bounded because both dimensions only ever grow toward the
/// ceiling.
fn grow(width: u32, height: u32, ceiling: u32) -> Option<(u32, u32)> {
    if width < ceiling && (width <= height || height >= ceiling) {
        return Some(((width * 2).min(ceiling), height));
    }
    if height < ceiling {
        return Some((width, (height * 2).min(ceiling)));
    }
    None
}

/// Run the bounded retry loop over full pack attempts.
///
/// Returns the final dimensions, the placement of every packed glyph
/// (top-left pixel corner) and the number of glyphs that did not fit.
fn pack_all(
    entries: &[(GlyphId, (u32, u32))],
    mut width: u32,
    mut height: u32,
    ceiling: u32,
) -> (u32, u32, HashMap<u16, (u32, u32)>, usize) {
    loop {
        let (placements, failed) = try_pack(entries, width, height);
        if failed == 0 {
            return (width, height, placements, 0);
        }
        match grow(width, height, ceiling) {
            Some((w, h)) => {
                log::debug!("atlas {}x{} too small, retrying at {}x{}", width, height, w, h);
                width = w;
                height = h;
            }
            None => return (width, height, placements, failed),
        }
    }
}

/// One full packing attempt at fixed dimensions
fn try_pack(
    entries: &[(GlyphId, (u32, u32))],
    width: u32,
    height: u32,
) -> (HashMap<u16, (u32, u32)>, usize) {
    let mut allocator = AtlasAllocator::new(size2(width as i32, height as i32));
    let mut placements = HashMap::with_capacity(entries.len());
    let mut failed = 0usize;
    for &(id, (w, h)) in entries {
        let padded = size2((w + 2 * GLYPH_PADDING) as i32, (h + 2 * GLYPH_PADDING) as i32);
        match allocator.allocate(padded) {
            Some(allocation) => {
                let min = allocation.rectangle.min;
                placements
                    .insert(id.0, (min.x as u32 + GLYPH_PADDING, min.y as u32 + GLYPH_PADDING));
            }
            None => failed += 1,
        }
    }
    (placements, failed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_side_is_proportional_and_clamped() {
        assert_eq!(initial_side(32.0, 8192), 512);
        assert_eq!(initial_side(64.0, 8192), 1024);
        // Tiny bakes still start at the floor
        assert_eq!(initial_side(4.0, 8192), MIN_ATLAS_DIM);
        // The ceiling wins over proportionality
        assert_eq!(initial_side(1024.0, 4096), 4096);
    }

    #[test]
    fn grow_doubles_smaller_dimension_first() {
        assert_eq!(grow(512, 512, 8192), Some((1024, 512)));
        assert_eq!(grow(1024, 512, 8192), Some((1024, 1024)));
        assert_eq!(grow(8192, 4096, 8192), Some((8192, 8192)));
    }

    #[test]
    fn grow_stops_at_ceiling() {
        assert_eq!(grow(8192, 8192, 8192), None);
        assert_eq!(grow(256, 256, 256), None);
    }

    #[test]
    fn growth_sequence_terminates() {
        let (mut w, mut h) = (256, 256);
        let mut steps = 0;
        while let Some(next) = grow(w, h, 8192) {
            (w, h) = next;
            steps += 1;
            assert!(steps < 64, "growth loop must be bounded");
        }
        assert_eq!((w, h), (8192, 8192));
    }

    #[test]
    fn pack_all_grows_until_everything_fits() {
        // 16 glyphs of 100x100 cannot fit in 256x256 but fit in 512x512
        let entries: Vec<_> = (0..16).map(|i| (GlyphId(i), (100, 100))).collect();
        let (w, h, placements, failed) = pack_all(&entries, 256, 256, 8192);
        assert_eq!(failed, 0);
        assert_eq!(placements.len(), 16);
        assert!(w * h >= 16 * 102 * 102);
        assert!(w <= 8192 && h <= 8192);
    }

    #[test]
    fn pack_all_keeps_partial_result_at_ceiling() {
        let entries: Vec<_> = (0..16).map(|i| (GlyphId(i), (100, 100))).collect();
        let (w, h, placements, failed) = pack_all(&entries, 256, 256, 256);
        assert_eq!((w, h), (256, 256));
        assert!(failed > 0);
        // Whatever did fit is kept
        assert_eq!(placements.len() + failed, 16);
        assert!(!placements.is_empty());
    }

    #[test]
    fn packed_rects_do_not_overlap() {
        let entries: Vec<_> = (0..32).map(|i| (GlyphId(i), (31, 17))).collect();
        let (w, h, placements, failed) = pack_all(&entries, 256, 256, 256);
        assert_eq!(failed, 0);
        let rects: Vec<_> = placements.values().copied().collect();
        for (i, &(ax, ay)) in rects.iter().enumerate() {
            assert!(ax + 31 <= w && ay + 17 <= h);
            for &(bx, by) in &rects[i + 1..] {
                let disjoint = ax + 31 <= bx || bx + 31 <= ax || ay + 17 <= by || by + 17 <= ay;
                assert!(disjoint, "glyph rects overlap");
            }
        }
    }
}
