//! Two-pass targeted detection.
//!
//! Pass 1 scans every page's text up front and builds an immutable index of
//! caption references keyed by page. Pass 2 runs per page during extraction
//! and substitutes a canonical box per reference. The phases never
//! interleave: the index is complete before the first crop.

use std::collections::BTreeMap;
use std::path::Path;

use log::info;

use crate::error::Result;
use crate::model::{PageRaster, Region, RegionKind, TextReference};
use crate::scan::ReferenceScanner;
use crate::source::PageTextSource;

use super::{DetectorConfig, RegionAnalyzer, RegionDetector};

/// Immutable whole-document index of caption references, keyed by
/// 0-based page index.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    by_page: BTreeMap<usize, Vec<TextReference>>,
}

impl ReferenceIndex {
    /// Pass 1: scan every page of the document.
    pub fn build(text_source: &dyn PageTextSource, document: &Path) -> Result<Self> {
        let scanner = ReferenceScanner::new();
        let mut by_page: BTreeMap<usize, Vec<TextReference>> = BTreeMap::new();

        let page_count = text_source.page_count(document)?;
        for page_index in 0..page_count {
            let text = text_source.page_text(document, page_index)?;
            for reference in scanner.scan_page(&text, page_index) {
                by_page.entry(page_index).or_default().push(reference);
            }
        }

        let total: usize = by_page.values().map(Vec::len).sum();
        info!("indexed {} caption references across {} pages", total, page_count);

        Ok(Self { by_page })
    }

    /// Build from already-scanned references (each keyed by its own
    /// `page_index`).
    pub fn from_references(refs: impl IntoIterator<Item = TextReference>) -> Self {
        let mut by_page: BTreeMap<usize, Vec<TextReference>> = BTreeMap::new();
        for reference in refs {
            by_page.entry(reference.page_index).or_default().push(reference);
        }
        Self { by_page }
    }

    /// References assigned to one page (empty slice when none).
    pub fn for_page(&self, page_index: usize) -> &[TextReference] {
        self.by_page.get(&page_index).map_or(&[], Vec::as_slice)
    }

    /// Total number of indexed references.
    pub fn len(&self) -> usize {
        self.by_page.values().map(Vec::len).sum()
    }

    /// True when no page has any reference.
    pub fn is_empty(&self) -> bool {
        self.by_page.is_empty()
    }
}

/// Detection from a pre-built [`ReferenceIndex`].
///
/// Placeholder policy: true localization is out of scope, so each
/// reference becomes a representative region: a wider, taller canonical
/// box for figures, a narrower centered one for tables. Pages without
/// indexed references yield no regions.
pub struct TargetedDetector {
    config: DetectorConfig,
    index: ReferenceIndex,
}

impl TargetedDetector {
    /// Create a detector over a pre-built index.
    pub fn new(config: DetectorConfig, index: ReferenceIndex) -> Self {
        Self { config, index }
    }

    /// The underlying index.
    pub fn index(&self) -> &ReferenceIndex {
        &self.index
    }
}

impl RegionDetector for TargetedDetector {
    fn detect(
        &self,
        page: &PageRaster,
        _refs: &[TextReference],
        _analyzer: Option<&dyn RegionAnalyzer>,
    ) -> Result<Vec<Region>> {
        let regions = self
            .index
            .for_page(page.index())
            .iter()
            .map(|r| {
                let bbox = match r.kind {
                    RegionKind::Table => self.config.table_box,
                    _ => self.config.figure_box,
                };
                Region::new(r.kind, r.number.clone(), bbox)
                    .with_description(r.title.clone())
                    .with_text(r.line.clone())
            })
            .collect();

        Ok(regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Luma};

    fn page(index: usize) -> PageRaster {
        let img = image::GrayImage::from_pixel(200, 200, Luma([255]));
        PageRaster::new(index, DynamicImage::ImageLuma8(img), format!("page_{index:03}.png"))
    }

    fn reference(kind: RegionKind, number: &str, page_index: usize) -> TextReference {
        TextReference {
            kind,
            number: number.to_string(),
            title: format!("Caption {number}"),
            line: format!("{} {number}. Caption {number}", kind),
            page_index,
        }
    }

    #[test]
    fn test_index_groups_by_page() {
        let index = ReferenceIndex::from_references(vec![
            reference(RegionKind::Figure, "1", 0),
            reference(RegionKind::Table, "1", 2),
            reference(RegionKind::Figure, "2", 2),
        ]);

        assert_eq!(index.len(), 3);
        assert_eq!(index.for_page(0).len(), 1);
        assert!(index.for_page(1).is_empty());
        assert_eq!(index.for_page(2).len(), 2);
    }

    #[test]
    fn test_canonical_geometry_per_kind() {
        let config = DetectorConfig::default();
        let index = ReferenceIndex::from_references(vec![
            reference(RegionKind::Figure, "1", 0),
            reference(RegionKind::Table, "2", 0),
        ]);
        let detector = TargetedDetector::new(config.clone(), index);

        let regions = detector.detect(&page(0), &[], None).unwrap();
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].bbox, config.figure_box);
        assert_eq!(regions[1].bbox, config.table_box);
        assert_eq!(regions[0].description, "Caption 1");
    }

    #[test]
    fn test_page_without_references_yields_nothing() {
        let index = ReferenceIndex::from_references(vec![reference(RegionKind::Figure, "1", 0)]);
        let detector = TargetedDetector::new(DetectorConfig::default(), index);

        let regions = detector.detect(&page(5), &[], None).unwrap();
        assert!(regions.is_empty());
    }

    #[test]
    fn test_empty_index() {
        let index = ReferenceIndex::from_references(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
    }
}
