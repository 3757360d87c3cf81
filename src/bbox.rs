//! Bounding boxes in percentage space and pixel space.
//!
//! Detection strategies speak percentage space (0 to 100 of page width/height,
//! resolution independent); the cropper needs integer pixel offsets into a
//! specific raster. [`PctBox::to_pixels`] is the only bridge between the two,
//! and it is total: any input, including inverted or out-of-range boxes,
//! yields an in-bounds box of at least 1×1 pixels.

use serde::{Deserialize, Serialize};

/// An axis-aligned box in percentage space.
///
/// Each coordinate is a fraction of page width/height in `[0, 100]`.
/// Ordering (`left < right`, `top < bottom`) is *not* enforced at creation;
/// detection strategies and external analyzers produce unchecked values and
/// normalization repairs them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PctBox {
    /// Top edge as percentage of page height
    pub top: f64,
    /// Left edge as percentage of page width
    pub left: f64,
    /// Bottom edge as percentage of page height
    pub bottom: f64,
    /// Right edge as percentage of page width
    pub right: f64,
}

impl PctBox {
    /// Create a box from top/left/bottom/right percentages.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Convert to pixel coordinates against a raster of the given dimensions.
    ///
    /// Each edge is rounded from `pct / 100 * dim`, then clamped so the
    /// result satisfies `0 <= left < right <= width` and
    /// `0 <= top < bottom <= height`. Degenerate input (zero-area,
    /// inverted, or out of range) still produces a croppable ≥1×1 box.
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelBox {
        // A zero-dimension raster is treated as 1x1 so the clamp bounds
        // below can never invert.
        let width = width.max(1);
        let height = height.max(1);
        let to_px = |pct: f64, dim: u32| -> i64 { (pct / 100.0 * f64::from(dim)).round() as i64 };

        let left = to_px(self.left, width).clamp(0, i64::from(width) - 1);
        let top = to_px(self.top, height).clamp(0, i64::from(height) - 1);
        let right = to_px(self.right, width).clamp(left + 1, i64::from(width));
        let bottom = to_px(self.bottom, height).clamp(top + 1, i64::from(height));

        PixelBox {
            left: left as u32,
            top: top as u32,
            right: right as u32,
            bottom: bottom as u32,
        }
    }

    /// True when every edge lies in `[0, 100]` and edges are ordered.
    pub fn is_well_formed(&self) -> bool {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        in_range(self.top)
            && in_range(self.left)
            && in_range(self.bottom)
            && in_range(self.right)
            && self.left < self.right
            && self.top < self.bottom
    }
}

/// An axis-aligned box in pixel space, guaranteed in-bounds and non-empty.
///
/// Derived from a [`PctBox`] and a raster's dimensions; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBox {
    /// Crop width in pixels (always ≥1).
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Crop height in pixels (always ≥1).
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}
