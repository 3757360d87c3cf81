//! Pixel-variance heuristic detection.

use log::debug;

use crate::bbox::PctBox;
use crate::error::Result;
use crate::model::{PageRaster, Region, RegionKind, TextReference};

use super::{DetectorConfig, RegionAnalyzer, RegionDetector};

/// Detects regions by scanning grayscale intensity variance.
///
/// The page is tiled into non-overlapping square windows; a window whose
/// variance exceeds the threshold is taken as "not uniform background or
/// body text" and emitted as a figure region. Emitted boxes are expanded
/// beyond the sampling window to enclose more of the underlying figure.
/// Placeholder policy: a page with no qualifying window yields one region
/// covering the central ~90% of the page.
pub struct VarianceDetector {
    config: DetectorConfig,
}

impl VarianceDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Scan the raster and emit regions for high-variance windows.
    pub fn scan(&self, page: &PageRaster) -> Vec<Region> {
        let gray = page.image().to_luma8();
        let (w, h) = (gray.width(), gray.height());
        let window = self.config.window_size;
        let mut regions = Vec::new();

        let mut y = 0;
        'scan: while y + window <= h {
            let mut x = 0;
            while x + window <= w {
                let variance = window_variance(&gray, x, y, window);
                if variance > self.config.variance_threshold {
                    debug!(
                        "page {}: window ({}, {}) variance {:.0}",
                        page.page_number(),
                        x,
                        y,
                        variance
                    );
                    regions.push(self.window_region(x, y, w, h, regions.len() + 1));
                    if regions.len() >= self.config.max_regions_per_page {
                        break 'scan;
                    }
                }
                x += window;
            }
            y += window;
        }

        if regions.is_empty() {
            regions.push(self.fallback_region());
        }

        regions
    }

    /// Expanded, clamped percentage-space region for a qualifying window.
    fn window_region(&self, x: u32, y: u32, w: u32, h: u32, ordinal: usize) -> Region {
        let expand = self.config.box_expansion;
        let max_pct = self.config.max_extent_pct;

        let bbox = PctBox::new(
            f64::from(y) / f64::from(h) * 100.0,
            f64::from(x) / f64::from(w) * 100.0,
            (f64::from(y + expand) / f64::from(h) * 100.0).min(max_pct),
            (f64::from(x + expand) / f64::from(w) * 100.0).min(max_pct),
        );

        Region::new(RegionKind::Figure, ordinal.to_string(), bbox)
            .with_description("Detected visual element")
    }

    /// Placeholder policy: the central ~90% of the page.
    fn fallback_region(&self) -> Region {
        Region::new(RegionKind::Figure, "1", self.config.fallback_box)
            .with_description("Page content")
    }
}

impl RegionDetector for VarianceDetector {
    fn detect(
        &self,
        page: &PageRaster,
        _refs: &[TextReference],
        _analyzer: Option<&dyn RegionAnalyzer>,
    ) -> Result<Vec<Region>> {
        Ok(self.scan(page))
    }
}

/// Intensity variance of a square window of the grayscale raster.
fn window_variance(gray: &image::GrayImage, x: u32, y: u32, window: u32) -> f64 {
    let n = f64::from(window) * f64::from(window);
    let mut sum = 0.0;
    let mut sum_sq = 0.0;

    for dy in 0..window {
        for dx in 0..window {
            let v = f64::from(gray.get_pixel(x + dx, y + dy).0[0]);
            sum += v;
            sum_sq += v * v;
        }
    }

    let mean = sum / n;
    sum_sq / n - mean * mean
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma};

    fn uniform_page(w: u32, h: u32, value: u8) -> PageRaster {
        let img = image::GrayImage::from_pixel(w, h, Luma([value]));
        PageRaster::new(0, DynamicImage::ImageLuma8(img), "page_000.png")
    }

    /// White page with a checkerboard patch at the given pixel offset.
    fn page_with_patch(w: u32, h: u32, px: u32, py: u32, size: u32) -> PageRaster {
        let mut img = image::GrayImage::from_pixel(w, h, Luma([255]));
        for y in 0..size {
            for x in 0..size {
                let value = if (x / 4 + y / 4) % 2 == 0 { 0 } else { 255 };
                img.put_pixel(px + x, py + y, Luma([value]));
            }
        }
        PageRaster::new(0, DynamicImage::ImageLuma8(img), "page_000.png")
    }

    #[test]
    fn test_uniform_page_falls_back_to_central_region() {
        let detector = VarianceDetector::new(DetectorConfig::default());
        let regions = detector.scan(&uniform_page(800, 1000, 230));

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].description, "Page content");
        assert_eq!(regions[0].bbox, DetectorConfig::default().fallback_box);
    }

    #[test]
    fn test_checkerboard_patch_is_detected() {
        // Patch occupies pixels (200..500, 300..600) of an 800x1000 page.
        let page = page_with_patch(800, 1000, 200, 300, 300);
        let detector = VarianceDetector::new(DetectorConfig::default());
        let regions = detector.scan(&page);

        assert!(!regions.is_empty());
        assert_ne!(regions[0].description, "Page content");

        // At least one emitted box overlaps the patch's true location
        // (25..62.5% horizontally, 30..60% vertically).
        let overlaps = regions.iter().any(|r| {
            r.bbox.left < 62.5 && r.bbox.right > 25.0 && r.bbox.top < 60.0 && r.bbox.bottom > 30.0
        });
        assert!(overlaps, "no region overlaps the patch: {:?}", regions);
    }

    #[test]
    fn test_output_capped_at_max_regions() {
        // Checkerboard everywhere: every window qualifies.
        let page = page_with_patch(800, 1000, 0, 0, 800);
        let detector = VarianceDetector::new(DetectorConfig::default());
        let regions = detector.scan(&page);

        assert_eq!(regions.len(), DetectorConfig::default().max_regions_per_page);
    }

    #[test]
    fn test_page_smaller_than_window_falls_back() {
        let detector = VarianceDetector::new(DetectorConfig::default());
        let regions = detector.scan(&uniform_page(50, 60, 128));
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].description, "Page content");
    }

    #[test]
    fn test_emitted_boxes_stay_in_percentage_space() {
        let page = page_with_patch(300, 300, 0, 0, 300);
        let detector = VarianceDetector::new(DetectorConfig::default());
        for region in detector.scan(&page) {
            let b = region.bbox;
            assert!(b.top >= 0.0 && b.bottom <= 100.0);
            assert!(b.left >= 0.0 && b.right <= 100.0);
        }
    }

    #[test]
    fn test_window_variance_values() {
        let flat = image::GrayImage::from_pixel(10, 10, Luma([77]));
        assert!(window_variance(&flat, 0, 0, 10) < f64::EPSILON);

        let mut half = image::GrayImage::from_pixel(10, 10, Luma([0]));
        for y in 0..10 {
            for x in 5..10 {
                half.put_pixel(x, y, Luma([255]));
            }
        }
        // Two-point distribution at 0 and 255: variance = (255/2)^2.
        let v = window_variance(&half, 0, 0, 10);
        assert!((v - 16256.25).abs() < 1e-6);
    }
}
