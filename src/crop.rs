//! Cropping and metadata building.

use std::path::Path;

use log::info;

use crate::error::{Error, Result};
use crate::model::{ExtractedElement, PageRaster, Region};

/// Maximum length of the description fragment embedded in a crop filename.
const FILENAME_DESC_LEN: usize = 30;

/// Crop one region from a page raster, save it as a PNG under
/// `figures_dir`, and build its metadata record.
///
/// The filename is derived deterministically from kind, 1-based page
/// number, declared number, and the sanitized description; two regions on
/// one page sharing all four collide and the later crop overwrites the
/// earlier file. The returned element keeps the *original* percentage-space
/// box, not the pixel box.
pub fn crop_region(
    page: &PageRaster,
    region: &Region,
    figures_dir: &Path,
) -> Result<ExtractedElement> {
    let pixel_box = region.bbox.to_pixels(page.width(), page.height());
    let cropped = page.image().crop_imm(
        pixel_box.left,
        pixel_box.top,
        pixel_box.width(),
        pixel_box.height(),
    );

    let filename = crop_filename(region, page.page_number());
    let output_path = figures_dir.join(&filename);
    cropped
        .save(&output_path)
        .map_err(|e| Error::Other(format!("{}: {e}", output_path.display())))?;
    info!("saved crop: {}", output_path.display());

    Ok(ExtractedElement {
        filename,
        kind: region.kind,
        number: region.number.clone(),
        page: page.page_number(),
        description: region.description.clone(),
        text_content: region.text.clone(),
        bbox: region.bbox,
    })
}

/// `{kind}{page}_{number}_{sanitized_description}.png`
pub fn crop_filename(region: &Region, page_number: u32) -> String {
    format!(
        "{}{}_{}_{}.png",
        region.kind,
        page_number,
        region.number,
        sanitize_description(&region.description)
    )
}

/// First 30 chars of the description with whitespace and slashes mapped
/// to underscores.
fn sanitize_description(description: &str) -> String {
    description
        .chars()
        .take(FILENAME_DESC_LEN)
        .map(|c| if c.is_whitespace() || c == '/' { '_' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::PctBox;
    use crate::model::RegionKind;
    use image::{DynamicImage, GenericImageView, Luma};
    use tempfile::TempDir;

    fn test_page(w: u32, h: u32) -> PageRaster {
        let img = image::GrayImage::from_pixel(w, h, Luma([200]));
        PageRaster::new(0, DynamicImage::ImageLuma8(img), "page_000.png")
    }

    fn region(description: &str) -> Region {
        Region::new(RegionKind::Figure, "2", PctBox::new(10.0, 20.0, 60.0, 80.0))
            .with_description(description)
    }

    #[test]
    fn test_filename_synthesis() {
        let r = region("Model architecture overview");
        assert_eq!(
            crop_filename(&r, 1),
            "figure1_2_Model_architecture_overview.png"
        );
    }

    #[test]
    fn test_filename_sanitizes_slashes() {
        let r = region("I/O throughput");
        assert_eq!(crop_filename(&r, 3), "figure3_2_I_O_throughput.png");
    }

    #[test]
    fn test_filename_empty_description() {
        let r = region("");
        assert_eq!(crop_filename(&r, 1), "figure1_2_.png");
    }

    #[test]
    fn test_truncation_collision_is_real() {
        // Known weakness: descriptions sharing their first 30 chars
        // collide when kind, page, and number also match.
        let a = region("A very long shared description, variant one");
        let b = region("A very long shared description, variant two");
        assert_ne!(a.description, b.description);
        assert_eq!(crop_filename(&a, 1), crop_filename(&b, 1));
    }

    #[test]
    fn test_crop_writes_file_with_box_dimensions() {
        let dir = TempDir::new().unwrap();
        let page = test_page(1000, 500);
        let r = region("Throughput chart");

        let element = crop_region(&page, &r, dir.path()).unwrap();

        let crop_path = dir.path().join(&element.filename);
        assert!(crop_path.exists());

        // 20..80% of 1000 = 600 wide; 10..60% of 500 = 250 tall.
        let saved = image::open(&crop_path).unwrap();
        assert_eq!(saved.dimensions(), (600, 250));
    }

    #[test]
    fn test_element_preserves_percentage_bbox() {
        let dir = TempDir::new().unwrap();
        let page = test_page(400, 400);
        let r = region("chart");

        let element = crop_region(&page, &r, dir.path()).unwrap();
        assert_eq!(element.bbox, r.bbox);
        assert_eq!(element.page, 1);
        assert_eq!(element.kind, RegionKind::Figure);
    }

    #[test]
    fn test_degenerate_region_still_crops() {
        let dir = TempDir::new().unwrap();
        let page = test_page(100, 100);
        let r = Region::new(RegionKind::Table, "1", PctBox::new(50.0, 50.0, 50.0, 50.0));

        let element = crop_region(&page, &r, dir.path()).unwrap();
        let saved = image::open(dir.path().join(&element.filename)).unwrap();
        assert_eq!(saved.dimensions(), (1, 1));
    }

    #[test]
    fn test_missing_output_dir_fails_with_path() {
        let page = test_page(100, 100);
        let r = region("chart");

        let err = crop_region(&page, &r, Path::new("/nonexistent/figures")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/figures"));
    }
}
