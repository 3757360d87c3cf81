//! Extraction orchestration.
//!
//! Drives the full pipeline: render pages into a temp directory, detect
//! regions per page, crop and record each, persist the metadata document,
//! and clean up the intermediate rasters. Pages are processed sequentially
//! in page order; a failing page is skipped and logged rather than
//! aborting the run, but render failures and output I/O failures are fatal.

use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::crop::crop_region;
use crate::detect::{
    DetectStrategy, DetectorConfig, ReferenceIndex, RegionAnalyzer, RegionDetector,
    TargetedDetector, TextGuidedDetector, VarianceDetector, VisionDetector,
};
use crate::error::{Error, Result};
use crate::model::ExtractedElement;
use crate::scan::ReferenceScanner;
use crate::source::{PageRenderer, PageTextSource};

/// Filename of the run's metadata document.
pub const METADATA_FILENAME: &str = "figures_metadata.json";
/// Subdirectory for crop files.
pub const FIGURES_SUBDIR: &str = "figures";
/// Subdirectory for intermediate rendered pages, deleted after the run.
pub const TEMP_SUBDIR: &str = "temp";

/// Options for an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Rendering scale factor
    pub scale: f32,

    /// Which detection strategy to run
    pub strategy: DetectStrategy,

    /// Detection constants
    pub detector: DetectorConfig,

    /// Keep the rendered-page temp directory after the run (debug aid)
    pub keep_pages: bool,
}

impl ExtractOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rendering scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Set the detection strategy.
    pub fn with_strategy(mut self, strategy: DetectStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the detection constants.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.detector = detector;
        self
    }

    /// Keep intermediate rendered pages on disk after the run.
    pub fn keep_pages(mut self, keep: bool) -> Self {
        self.keep_pages = keep;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            scale: 2.0,
            strategy: DetectStrategy::default(),
            detector: DetectorConfig::default(),
            keep_pages: false,
        }
    }
}

/// Drives extraction over all pages of one document.
pub struct Extractor<'a> {
    renderer: &'a dyn PageRenderer,
    text_source: Option<&'a dyn PageTextSource>,
    analyzer: Option<&'a dyn RegionAnalyzer>,
    detector: Option<&'a dyn RegionDetector>,
    options: ExtractOptions,
}

impl<'a> Extractor<'a> {
    /// Create an extractor over a page renderer.
    pub fn new(renderer: &'a dyn PageRenderer) -> Self {
        Self {
            renderer,
            text_source: None,
            analyzer: None,
            detector: None,
            options: ExtractOptions::default(),
        }
    }

    /// Attach a page text source (required by the text-guided and
    /// targeted strategies).
    pub fn with_text_source(mut self, text_source: &'a dyn PageTextSource) -> Self {
        self.text_source = Some(text_source);
        self
    }

    /// Attach an external region analyzer (used by the vision strategy).
    pub fn with_analyzer(mut self, analyzer: &'a dyn RegionAnalyzer) -> Self {
        self.analyzer = Some(analyzer);
        self
    }

    /// Use a caller-supplied detector instead of the one implied by
    /// [`ExtractOptions::strategy`].
    pub fn with_region_detector(mut self, detector: &'a dyn RegionDetector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Set run options.
    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Run extraction, returning the metadata for every saved crop.
    ///
    /// Writes crops under `<output_dir>/figures/` and the metadata array
    /// to `<output_dir>/figures_metadata.json`. The metadata document is
    /// written even when no region was extracted (empty array, not absent).
    pub fn run(&self, document: &Path, output_dir: &Path) -> Result<Vec<ExtractedElement>> {
        if !document.exists() {
            return Err(Error::InputNotFound(document.to_path_buf()));
        }

        let figures_dir = output_dir.join(FIGURES_SUBDIR);
        let temp_dir = output_dir.join(TEMP_SUBDIR);
        fs::create_dir_all(&figures_dir).map_err(|e| Error::io_at(e, &figures_dir))?;
        fs::create_dir_all(&temp_dir).map_err(|e| Error::io_at(e, &temp_dir))?;

        let built;
        let detector: &dyn RegionDetector = match self.detector {
            Some(detector) => detector,
            None => {
                built = self.build_detector(document)?;
                built.as_ref()
            }
        };
        let scanner = ReferenceScanner::new();

        info!("rendering pages of {}", document.display());
        let pages = self
            .renderer
            .render_pages(document, self.options.scale, &temp_dir)?;
        info!("rendered {} pages at {}x", pages.len(), self.options.scale);

        let mut elements = Vec::new();
        let mut skipped_pages = 0usize;

        for page in &pages {
            // Only the text-guided strategy consumes per-page references
            // here; the targeted strategy reads its own prebuilt index.
            let refs = if self.options.strategy == DetectStrategy::TextGuided {
                self.page_references(document, page.index(), &scanner)
            } else {
                Vec::new()
            };

            let mut regions = match detector.detect(page, &refs, self.analyzer) {
                Ok(regions) => regions,
                Err(err) => {
                    warn!("page {}: detection failed, skipping: {}", page.page_number(), err);
                    skipped_pages += 1;
                    continue;
                }
            };
            regions.truncate(self.options.detector.max_regions_per_page);

            for region in &regions {
                match crop_region(page, region, &figures_dir) {
                    Ok(element) => elements.push(element),
                    Err(err) => {
                        warn!("page {}: crop failed, skipping region: {}", page.page_number(), err);
                    }
                }
            }
        }

        self.write_metadata(&elements, output_dir)?;

        if !self.options.keep_pages {
            cleanup_rendered_pages(&pages, &temp_dir);
        }

        info!(
            "extracted {} elements from {} pages ({} skipped)",
            elements.len(),
            pages.len(),
            skipped_pages
        );
        Ok(elements)
    }

    /// Scan one page's text for caption references. Text extraction
    /// failures degrade to "no references" so the strategy's fallback can
    /// still run.
    fn page_references(
        &self,
        document: &Path,
        page_index: usize,
        scanner: &ReferenceScanner,
    ) -> Vec<crate::model::TextReference> {
        let Some(text_source) = self.text_source else {
            return Vec::new();
        };
        match text_source.page_text(document, page_index) {
            Ok(text) => scanner.scan_page(&text, page_index),
            Err(err) => {
                warn!("page {}: text extraction failed: {}", page_index + 1, err);
                Vec::new()
            }
        }
    }

    fn build_detector(&self, document: &Path) -> Result<Box<dyn RegionDetector>> {
        let config = self.options.detector.clone();
        let detector: Box<dyn RegionDetector> = match self.options.strategy {
            DetectStrategy::Vision => Box::new(VisionDetector::new(config)),
            DetectStrategy::Variance => Box::new(VarianceDetector::new(config)),
            DetectStrategy::TextGuided => Box::new(TextGuidedDetector::new(config)),
            DetectStrategy::Targeted => {
                let text_source = self.text_source.ok_or_else(|| {
                    Error::Other("targeted strategy requires a page text source".to_string())
                })?;
                let index = ReferenceIndex::build(text_source, document)?;
                Box::new(TargetedDetector::new(config, index))
            }
        };
        Ok(detector)
    }

    fn write_metadata(&self, elements: &[ExtractedElement], output_dir: &Path) -> Result<()> {
        let metadata_path = output_dir.join(METADATA_FILENAME);
        let json = serde_json::to_string_pretty(elements)
            .map_err(|e| Error::Metadata(e.to_string()))?;
        fs::write(&metadata_path, json).map_err(|e| Error::io_at(e, &metadata_path))?;
        info!("saved metadata to {}", metadata_path.display());
        Ok(())
    }
}

/// Delete the intermediate rendered-page files and their directory.
/// Cleanup failures are logged, not fatal: the extraction output is
/// already complete at this point.
fn cleanup_rendered_pages(pages: &[crate::model::PageRaster], temp_dir: &Path) {
    for page in pages {
        if let Err(err) = fs::remove_file(page.path()) {
            warn!("failed to remove {}: {}", page.path().display(), err);
        }
    }
    if let Err(err) = fs::remove_dir_all(temp_dir) {
        warn!("failed to remove {}: {}", temp_dir.display(), err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = ExtractOptions::new()
            .with_scale(3.0)
            .with_strategy(DetectStrategy::Targeted)
            .keep_pages(true);

        assert_eq!(options.scale, 3.0);
        assert_eq!(options.strategy, DetectStrategy::Targeted);
        assert!(options.keep_pages);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.scale, 2.0);
        assert_eq!(options.strategy, DetectStrategy::Variance);
        assert!(!options.keep_pages);
    }
}
