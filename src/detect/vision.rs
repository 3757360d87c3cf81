//! External vision-analysis detection.

use log::warn;

use crate::bbox::PctBox;
use crate::error::Result;
use crate::model::{PageRaster, Region, RegionKind, TextReference};

use super::{DetectorConfig, RegionDetector, VarianceDetector};

/// Instruction passed to the external analyzer for every page.
pub const ANALYZE_INSTRUCTION: &str = "\
Analyze this document page and identify ALL visual elements (figures, tables, diagrams, charts).

For each visual element found, provide:
1. Type: figure/table/diagram/chart
2. Approximate bounding box as percentages (top, left, bottom, right)
3. Content description
4. Figure/table number (if visible)
5. Key text labels or data

IGNORE: Plain text, page numbers, headers, footers
FOCUS ON: Visual data representations and diagrams";

/// External vision-analysis capability.
///
/// The call is opaque to the detector: whether it shells out, crosses the
/// network, or runs in-process is the implementor's business, and it is
/// synchronous and blocking from the caller's perspective. Implementors
/// mapping free-form kind strings should use [`RegionKind::parse_lenient`].
pub trait RegionAnalyzer {
    /// Analyze a rendered page and return candidate regions in
    /// percentage space.
    fn analyze(&self, page: &PageRaster, instruction: &str) -> Result<Vec<Region>>;
}

/// Detection that delegates entirely to an injected [`RegionAnalyzer`].
///
/// Placeholder policy: without an analyzer the whole page becomes one
/// `unknown` region. An analyzer failure falls back to the variance
/// heuristic rather than aborting the run.
pub struct VisionDetector {
    config: DetectorConfig,
}

/// Whole-page box emitted when no analyzer is configured.
const UNAVAILABLE_BOX: PctBox = PctBox {
    top: 10.0,
    left: 10.0,
    bottom: 90.0,
    right: 90.0,
};

impl VisionDetector {
    /// Create a detector with the given configuration.
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    fn placeholder(&self) -> Vec<Region> {
        vec![Region::new(RegionKind::Unknown, "1", UNAVAILABLE_BOX)
            .with_description("Visual element (analysis unavailable)")]
    }

    /// Ensure every analyzer region satisfies the contract: `number` is
    /// never empty, even when the analyzer omitted it.
    fn sanitize(mut regions: Vec<Region>) -> Vec<Region> {
        for (idx, region) in regions.iter_mut().enumerate() {
            if region.number.trim().is_empty() {
                region.number = (idx + 1).to_string();
            }
        }
        regions
    }
}

impl RegionDetector for VisionDetector {
    fn detect(
        &self,
        page: &PageRaster,
        refs: &[TextReference],
        analyzer: Option<&dyn RegionAnalyzer>,
    ) -> Result<Vec<Region>> {
        let Some(analyzer) = analyzer else {
            warn!(
                "page {}: no analyzer configured, emitting whole-page placeholder",
                page.page_number()
            );
            return Ok(self.placeholder());
        };

        match analyzer.analyze(page, ANALYZE_INSTRUCTION) {
            Ok(regions) => Ok(Self::sanitize(regions)),
            Err(err) => {
                warn!(
                    "page {}: analyzer failed ({}), falling back to variance scan",
                    page.page_number(),
                    err
                );
                VarianceDetector::new(self.config.clone()).detect(page, refs, None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use image::{DynamicImage, Luma};

    fn blank_page() -> PageRaster {
        let img = image::GrayImage::from_pixel(400, 500, Luma([255]));
        PageRaster::new(0, DynamicImage::ImageLuma8(img), "page_000.png")
    }

    struct FixedAnalyzer(Vec<Region>);

    impl RegionAnalyzer for FixedAnalyzer {
        fn analyze(&self, _page: &PageRaster, instruction: &str) -> Result<Vec<Region>> {
            assert!(instruction.contains("bounding box as percentages"));
            Ok(self.0.clone())
        }
    }

    struct FailingAnalyzer;

    impl RegionAnalyzer for FailingAnalyzer {
        fn analyze(&self, _page: &PageRaster, _instruction: &str) -> Result<Vec<Region>> {
            Err(Error::Analyzer("service unavailable".to_string()))
        }
    }

    #[test]
    fn test_no_analyzer_yields_whole_page_placeholder() {
        let detector = VisionDetector::new(DetectorConfig::default());
        let regions = detector.detect(&blank_page(), &[], None).unwrap();

        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].kind, RegionKind::Unknown);
        assert_eq!(regions[0].bbox, UNAVAILABLE_BOX);
    }

    #[test]
    fn test_analyzer_regions_pass_through() {
        let expected = vec![
            Region::new(RegionKind::Chart, "1", PctBox::new(5.0, 5.0, 40.0, 95.0))
                .with_description("Bar chart of results"),
            Region::new(RegionKind::Table, "2", PctBox::new(50.0, 10.0, 90.0, 90.0)),
        ];
        let analyzer = FixedAnalyzer(expected.clone());
        let detector = VisionDetector::new(DetectorConfig::default());

        let regions = detector.detect(&blank_page(), &[], Some(&analyzer)).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].kind, RegionKind::Chart);
        assert_eq!(regions[1].number, "2");
    }

    #[test]
    fn test_empty_numbers_are_synthesized() {
        let analyzer = FixedAnalyzer(vec![
            Region::new(RegionKind::Figure, "", PctBox::new(0.0, 0.0, 50.0, 50.0)),
            Region::new(RegionKind::Figure, " ", PctBox::new(50.0, 0.0, 100.0, 50.0)),
        ]);
        let detector = VisionDetector::new(DetectorConfig::default());

        let regions = detector.detect(&blank_page(), &[], Some(&analyzer)).unwrap();
        assert_eq!(regions[0].number, "1");
        assert_eq!(regions[1].number, "2");
    }

    #[test]
    fn test_analyzer_failure_falls_back_to_variance() {
        let detector = VisionDetector::new(DetectorConfig::default());
        let regions = detector
            .detect(&blank_page(), &[], Some(&FailingAnalyzer))
            .unwrap();

        // The blank page has no variance anywhere, so the variance
        // fallback produces its central placeholder region.
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].description, "Page content");
    }
}
