//! # unfig
//!
//! Figure and table extraction from rendered document pages.
//!
//! This library locates visual regions (figures, tables, diagrams, charts)
//! on rendered pages of a document, crops them to individual PNG files, and
//! writes one JSON metadata document describing every extracted region.
//!
//! ## Quick Start
//!
//! With the `pdfium` feature enabled (requires a Pdfium shared library at
//! runtime):
//!
//! ```ignore
//! use unfig::{extract_file, DetectStrategy, ExtractOptions};
//!
//! let options = ExtractOptions::new().with_strategy(DetectStrategy::TextGuided);
//! let elements = unfig::extract_file_with_options("paper.pdf", "out", options)?;
//! println!("extracted {} elements", elements.len());
//! # Ok::<(), unfig::Error>(())
//! ```
//!
//! Any page source works; the pipeline only consumes the
//! [`source::PageRenderer`] and [`source::PageTextSource`] traits:
//!
//! ```no_run
//! use unfig::{DetectStrategy, ExtractOptions, Extractor};
//! # fn run(renderer: &dyn unfig::source::PageRenderer) -> unfig::Result<()> {
//! let options = ExtractOptions::new()
//!     .with_scale(2.0)
//!     .with_strategy(DetectStrategy::Variance);
//!
//! let elements = Extractor::new(renderer)
//!     .with_options(options)
//!     .run("paper.pdf".as_ref(), "out".as_ref())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Detection strategies
//!
//! - **Variance** (default): grayscale pixel-variance window scan; high
//!   variance is a proxy for "not background or body text"
//! - **TextGuided**: one placeholder region per caption line on the page
//! - **Targeted**: pre-indexes caption lines across the whole document,
//!   then substitutes canonical figure/table geometry
//! - **Vision**: delegates to an injected external analyzer
//!
//! None of these performs true localization; each has an explicit
//! placeholder policy for what it cannot decide.

pub mod bbox;
pub mod crop;
pub mod detect;
pub mod error;
pub mod extract;
pub mod model;
pub mod scan;
pub mod source;

// Re-export commonly used types
pub use bbox::{PctBox, PixelBox};
pub use detect::{
    DetectStrategy, DetectorConfig, ReferenceIndex, RegionAnalyzer, RegionDetector,
    TargetedDetector, TextGuidedDetector, VarianceDetector, VisionDetector,
};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, Extractor, FIGURES_SUBDIR, METADATA_FILENAME};
pub use model::{ExtractedElement, PageRaster, Region, RegionKind, TextReference};
pub use scan::ReferenceScanner;

#[cfg(feature = "pdfium")]
pub use source::PdfiumSource;

use std::path::Path;

/// Extract figures from a document with default options.
///
/// Renders and reads the document through Pdfium; see [`ExtractOptions`]
/// for the defaults (variance strategy, scale 2.0).
#[cfg(feature = "pdfium")]
pub fn extract_file<P: AsRef<Path>, Q: AsRef<Path>>(
    document: P,
    output_dir: Q,
) -> Result<Vec<ExtractedElement>> {
    extract_file_with_options(document, output_dir, ExtractOptions::default())
}

/// Extract figures from a document with custom options.
#[cfg(feature = "pdfium")]
pub fn extract_file_with_options<P: AsRef<Path>, Q: AsRef<Path>>(
    document: P,
    output_dir: Q,
    options: ExtractOptions,
) -> Result<Vec<ExtractedElement>> {
    let source = PdfiumSource::new()?;
    Extractor::new(&source)
        .with_text_source(&source)
        .with_options(options)
        .run(document.as_ref(), output_dir.as_ref())
}

/// Builder for configuring and running figure extraction.
///
/// # Example
///
/// ```ignore
/// use unfig::{DetectStrategy, Unfig};
///
/// let elements = Unfig::new()
///     .with_scale(3.0)
///     .with_strategy(DetectStrategy::Targeted)
///     .extract("paper.pdf", "out")?;
/// # Ok::<(), unfig::Error>(())
/// ```
pub struct Unfig {
    options: ExtractOptions,
}

impl Unfig {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            options: ExtractOptions::default(),
        }
    }

    /// Set the rendering scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.options = self.options.with_scale(scale);
        self
    }

    /// Set the detection strategy.
    pub fn with_strategy(mut self, strategy: DetectStrategy) -> Self {
        self.options = self.options.with_strategy(strategy);
        self
    }

    /// Set the detection constants.
    pub fn with_detector(mut self, detector: DetectorConfig) -> Self {
        self.options = self.options.with_detector(detector);
        self
    }

    /// Keep intermediate rendered pages after the run.
    pub fn keep_pages(mut self, keep: bool) -> Self {
        self.options = self.options.keep_pages(keep);
        self
    }

    /// The accumulated options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Run extraction through Pdfium.
    #[cfg(feature = "pdfium")]
    pub fn extract<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        document: P,
        output_dir: Q,
    ) -> Result<Vec<ExtractedElement>> {
        extract_file_with_options(document, output_dir, self.options.clone())
    }

    /// Run extraction through a caller-supplied renderer and optional
    /// text source.
    pub fn extract_with(
        &self,
        renderer: &dyn source::PageRenderer,
        text_source: Option<&dyn source::PageTextSource>,
        document: &Path,
        output_dir: &Path,
    ) -> Result<Vec<ExtractedElement>> {
        let mut extractor = Extractor::new(renderer).with_options(self.options.clone());
        if let Some(text_source) = text_source {
            extractor = extractor.with_text_source(text_source);
        }
        extractor.run(document, output_dir)
    }
}

impl Default for Unfig {
    fn default() -> Self {
        Self::new()
    }
}
