//! Rendered page rasters.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};

use crate::error::Result;

/// A decoded bitmap for one rendered document page.
///
/// Created by the renderer, consumed by detection and cropping; the
/// orchestrator deletes the on-disk representation once extraction for the
/// run completes.
pub struct PageRaster {
    /// 0-based page index
    index: usize,
    /// Decoded bitmap
    image: DynamicImage,
    /// On-disk representation (inside the run's temp directory)
    path: PathBuf,
}

impl PageRaster {
    /// Wrap an already-decoded bitmap.
    pub fn new(index: usize, image: DynamicImage, path: impl Into<PathBuf>) -> Self {
        Self {
            index,
            image,
            path: path.into(),
        }
    }

    /// Load a rendered page from disk.
    pub fn open(index: usize, path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let image = image::open(&path)?;
        Ok(Self { index, image, path })
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number as used in filenames and metadata.
    pub fn page_number(&self) -> u32 {
        self.index as u32 + 1
    }

    /// Pixel width of the raster.
    pub fn width(&self) -> u32 {
        self.image.dimensions().0
    }

    /// Pixel height of the raster.
    pub fn height(&self) -> u32 {
        self.image.dimensions().1
    }

    /// The decoded bitmap.
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Path of the on-disk representation.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl std::fmt::Debug for PageRaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRaster")
            .field("index", &self.index)
            .field("width", &self.width())
            .field("height", &self.height())
            .field("path", &self.path)
            .finish()
    }
}
