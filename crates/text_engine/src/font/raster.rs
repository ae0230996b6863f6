//! Outline scan conversion
//!
//! Bridges `ttf-parser` glyph outlines to `ab_glyph_rasterizer`, producing
//! a tight single-channel coverage bitmap for one glyph at a given scale.
//! Coordinates arrive in y-up design units and leave in y-down raster
//! pixels; the flip happens once, in [`OutlineSink::map`].

use ab_glyph_rasterizer::{point, Point, Rasterizer};
use ttf_parser::{Face, GlyphId, OutlineBuilder, Rect};

/// Tight coverage bitmap for a single rasterized glyph
pub(crate) struct Coverage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Raster dimensions of a glyph bounding box at the given scale.
///
/// Shared with the atlas packer so that packing and rasterization always
/// agree on the rectangle size.
pub(crate) fn raster_dims(bounds: Rect, scale: f32) -> (u32, u32) {
    let width = (f32::from(bounds.x_max - bounds.x_min) * scale).ceil() as u32;
    let height = (f32::from(bounds.y_max - bounds.y_min) * scale).ceil() as u32;
    (width.max(1), height.max(1))
}

/// Rasterize one glyph, or `None` when the glyph has no outline (blank
/// glyphs such as space)
pub(crate) fn rasterize(face: &Face<'_>, glyph: GlyphId, scale: f32) -> Option<Coverage> {
    let bounds = face.glyph_bounding_box(glyph)?;
    let (width, height) = raster_dims(bounds, scale);
    let mut sink = OutlineSink::new(bounds, scale, width, height);
    face.outline_glyph(glyph, &mut sink)?;
    Some(sink.finish())
}

struct OutlineSink {
    rasterizer: Rasterizer,
    width: u32,
    height: u32,
    scale: f32,
    x_min: f32,
    y_max: f32,
    first: Point,
    last: Point,
}

impl OutlineSink {
    fn new(bounds: Rect, scale: f32, width: u32, height: u32) -> Self {
        Self {
            rasterizer: Rasterizer::new(width as usize, height as usize),
            width,
            height,
            scale,
            x_min: f32::from(bounds.x_min),
            y_max: f32::from(bounds.y_max),
            first: point(0.0, 0.0),
            last: point(0.0, 0.0),
        }
    }

    /// Design space (y-up) to raster space (y-down)
    fn map(&self, x: f32, y: f32) -> Point {
        point((x - self.x_min) * self.scale, (self.y_max - y) * self.scale)
    }

    fn finish(self) -> Coverage {
        let mut pixels = vec![0u8; (self.width * self.height) as usize];
        let width = self.width;
        self.rasterizer.for_each_pixel_2d(|x, y, coverage| {
            let index = (y * width + x) as usize;
            pixels[index] = (coverage.clamp(0.0, 1.0) * 255.0) as u8;
        });
        Coverage { width: self.width, height: self.height, pixels }
    }
}

impl OutlineBuilder for OutlineSink {
    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.first = p;
        self.last = p;
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.rasterizer.draw_line(self.last, p);
        self.last = p;
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let control = self.map(x1, y1);
        let p = self.map(x, y);
        self.rasterizer.draw_quad(self.last, control, p);
        self.last = p;
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let control0 = self.map(x1, y1);
        let control1 = self.map(x2, y2);
        let p = self.map(x, y);
        self.rasterizer.draw_cubic(self.last, control0, control1, p);
        self.last = p;
    }

    fn close(&mut self) {
        if self.last != self.first {
            self.rasterizer.draw_line(self.last, self.first);
        }
        self.last = self.first;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x_min: i16, y_min: i16, x_max: i16, y_max: i16) -> Rect {
        Rect { x_min, y_min, x_max, y_max }
    }

    #[test]
    fn raster_dims_scale_and_round_up() {
        // 500 x 700 design units at 1/100 scale -> 5 x 7 pixels
        assert_eq!(raster_dims(rect(0, 0, 500, 700), 0.01), (5, 7));
        // Fractional sizes round up
        assert_eq!(raster_dims(rect(0, 0, 501, 701), 0.01), (6, 8));
    }

    #[test]
    fn raster_dims_never_zero() {
        assert_eq!(raster_dims(rect(0, 0, 1, 1), 0.01), (1, 1));
    }

    #[test]
    fn map_flips_vertically() {
        let sink = OutlineSink::new(rect(0, -200, 1000, 800), 0.1, 100, 100);
        // Top of the box lands at raster y = 0
        let top = sink.map(0.0, 800.0);
        assert_eq!(top.y, 0.0);
        // Bottom of the box lands at raster y = height
        let bottom = sink.map(0.0, -200.0);
        assert_eq!(bottom.y, 100.0);
    }

    #[test]
    fn filled_triangle_produces_coverage() {
        let bounds = rect(0, 0, 100, 100);
        let mut sink = OutlineSink::new(bounds, 0.1, 10, 10);
        sink.move_to(0.0, 0.0);
        sink.line_to(100.0, 0.0);
        sink.line_to(50.0, 100.0);
        sink.close();
        let coverage = sink.finish();
        assert_eq!(coverage.pixels.len(), 100);
        assert!(coverage.pixels.iter().any(|&p| p > 0));
    }
}
