//! Nine-way anchor alignment
//!
//! An [`Anchor`] names one of nine horizontal/vertical alignment
//! combinations. Each variant carries a pair of integer weights; the
//! resolver is a pure function over those weights, not per-variant
//! behavior.

use nalgebra::Vector2;

/// Anchor position for aligning a text block within a target box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner
    TopLeft,
    /// Top-center
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Middle-left
    MiddleLeft,
    /// Center of the box
    Center,
    /// Middle-right
    MiddleRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-center
    BottomCenter,
    /// Bottom-right corner
    BottomRight,
}

impl Anchor {
    /// Horizontal and vertical weights, each in {-1, 0, 1}.
    ///
    /// -1 is left/top, 0 is centered, 1 is right/bottom.
    pub fn weights(self) -> (i8, i8) {
        match self {
            Self::TopLeft => (-1, -1),
            Self::TopCenter => (0, -1),
            Self::TopRight => (1, -1),
            Self::MiddleLeft => (-1, 0),
            Self::Center => (0, 0),
            Self::MiddleRight => (1, 0),
            Self::BottomLeft => (-1, 1),
            Self::BottomCenter => (0, 1),
            Self::BottomRight => (1, 1),
        }
    }

    /// Pixel offset that places a measured block inside a target box.
    ///
    /// With a zero-size box the block is anchored around a point: the
    /// offsets degenerate to the negated block extents, which puts the
    /// anchor above/right of the text as expected.
    pub fn resolve(
        self,
        block_width: f32,
        block_height: f32,
        box_width: f32,
        box_height: f32,
    ) -> Vector2<f32> {
        let (h, v) = self.weights();
        Vector2::new(
            axis_offset(h, block_width, box_width),
            axis_offset(v, block_height, box_height),
        )
    }
}

pub(crate) fn axis_offset(weight: i8, block: f32, bounds: f32) -> f32 {
    match weight {
        -1 => 0.0,
        0 => 0.5 * (bounds - block),
        _ => bounds - block,
    }
}
