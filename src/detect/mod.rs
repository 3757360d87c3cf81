//! Region detection strategies.
//!
//! Four interchangeable strategies implement [`RegionDetector`]: delegate to
//! an external vision analyzer, scan pixel variance, anchor placeholder
//! boxes to caption lines, or pre-index captions across the whole document.
//! None of them performs true localization. Every strategy has an explicit,
//! named placeholder policy for the cases it cannot decide, and all of them
//! emit percentage-space boxes with enumerated kinds and non-empty numbers.

mod targeted;
mod text_guided;
mod variance;
mod vision;

pub use targeted::{ReferenceIndex, TargetedDetector};
pub use text_guided::TextGuidedDetector;
pub use variance::VarianceDetector;
pub use vision::{RegionAnalyzer, VisionDetector, ANALYZE_INSTRUCTION};

use crate::bbox::PctBox;
use crate::error::Result;
use crate::model::{PageRaster, Region, TextReference};

/// Detects candidate regions on one rendered page.
pub trait RegionDetector {
    /// Produce candidate regions for `page`.
    ///
    /// `refs` holds the text references scanned from this page (empty when
    /// the strategy does not use them); `analyzer` is the optional external
    /// vision hook. Implementations must return percentage-space boxes and
    /// never more than [`DetectorConfig::max_regions_per_page`] regions.
    fn detect(
        &self,
        page: &PageRaster,
        refs: &[TextReference],
        analyzer: Option<&dyn RegionAnalyzer>,
    ) -> Result<Vec<Region>>;
}

/// Which detection strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectStrategy {
    /// Delegate to an external vision analyzer (whole-page placeholder
    /// without one)
    Vision,
    /// Pixel-variance window scan
    #[default]
    Variance,
    /// One placeholder box per same-page caption line
    TextGuided,
    /// Two-pass: index captions across the document, then canonical boxes
    Targeted,
}

/// Tuned constants shared by the detection strategies.
///
/// The thresholds were calibrated against academic papers rendered at 2x
/// scale; they are proxies ("high variance ≈ not plain text or margin"),
/// not correctness guarantees.
#[derive(Debug, Clone)]
pub struct DetectorConfig {
    /// Edge length of the square variance sampling window, in pixels.
    /// Also the scan stride: windows tile the page without overlap.
    pub window_size: u32,
    /// Grayscale intensity variance above which a window counts as visual
    /// content rather than text or background.
    pub variance_threshold: f64,
    /// Emitted boxes extend this many pixels right/down from the window
    /// origin, to enclose more of the figure than the window sampled.
    pub box_expansion: u32,
    /// Expanded edges are clamped to this percentage of the page.
    pub max_extent_pct: f64,
    /// Hard cap on regions per page, bounding downstream crop work.
    pub max_regions_per_page: usize,
    /// Whole-page fallback when a scan finds nothing (central ~90%).
    pub fallback_box: PctBox,
    /// Placeholder geometry for caption-anchored regions.
    pub placeholder_box: PctBox,
    /// Canonical box for figures in the targeted strategy (wider, taller).
    pub figure_box: PctBox,
    /// Canonical box for tables in the targeted strategy (narrower,
    /// more centered).
    pub table_box: PctBox,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            window_size: 100,
            variance_threshold: 1000.0,
            box_expansion: 150,
            max_extent_pct: 95.0,
            max_regions_per_page: 3,
            fallback_box: PctBox::new(5.0, 5.0, 95.0, 95.0),
            placeholder_box: PctBox::new(10.0, 10.0, 80.0, 90.0),
            figure_box: PctBox::new(15.0, 10.0, 85.0, 90.0),
            table_box: PctBox::new(25.0, 15.0, 75.0, 85.0),
        }
    }
}
