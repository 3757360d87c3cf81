//! Caption-anchored placeholder detection.

use log::debug;

use crate::error::Result;
use crate::model::{PageRaster, Region, TextReference};

use super::{DetectorConfig, RegionAnalyzer, RegionDetector, VarianceDetector};

/// Emits one placeholder region per caption line found on the page.
///
/// Placeholder policy: caption position alone cannot localize the
/// associated image without real layout analysis, so every region gets the
/// same fixed geometry and only the kind/number/description vary. Pages
/// with no caption lines fall back to the variance scan.
pub struct TextGuidedDetector {
    config: DetectorConfig,
}

impl TextGuidedDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }
}

impl RegionDetector for TextGuidedDetector {
    fn detect(
        &self,
        page: &PageRaster,
        refs: &[TextReference],
        _analyzer: Option<&dyn RegionAnalyzer>,
    ) -> Result<Vec<Region>> {
        if refs.is_empty() {
            debug!(
                "page {}: no caption lines, falling back to variance scan",
                page.page_number()
            );
            return Ok(VarianceDetector::new(self.config.clone()).scan(page));
        }

        Ok(refs
            .iter()
            .map(|r| {
                Region::new(r.kind, r.number.clone(), self.config.placeholder_box)
                    .with_description(r.label())
                    .with_text(r.line.clone())
            })
            .collect())
    }
}
