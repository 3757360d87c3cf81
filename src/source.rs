//! Document access seams: page rendering and page text.
//!
//! The pipeline never touches a PDF library directly. It consumes two
//! narrow traits, [`PageRenderer`] for rasters and [`PageTextSource`] for
//! plain text, so the concrete backend stays swappable and tests can feed
//! synthetic pages. [`PdfiumSource`] (behind the `pdfium` feature)
//! implements both over `pdfium-render`.

use std::path::Path;

use crate::error::Result;
use crate::model::PageRaster;

/// Renders document pages to rasters on disk.
pub trait PageRenderer {
    /// Render every page of `document` at `scale` into `temp_dir`,
    /// one PNG per page named `page_{index:03}.png`, returned in page order.
    fn render_pages(&self, document: &Path, scale: f32, temp_dir: &Path)
        -> Result<Vec<PageRaster>>;
}

/// Provides whole-page plain text, newline-delimited.
pub trait PageTextSource {
    /// Number of pages in the document.
    fn page_count(&self, document: &Path) -> Result<usize>;

    /// Plain text of one page (0-based index).
    fn page_text(&self, document: &Path, page_index: usize) -> Result<String>;
}

#[cfg(feature = "pdfium")]
mod pdfium_source {
    use std::path::Path;

    use log::info;
    use pdfium_render::prelude::*;

    use crate::error::{Error, Result};
    use crate::model::PageRaster;

    use super::{PageRenderer, PageTextSource};

    /// Concrete renderer and text source backed by `pdfium-render`.
    ///
    /// Binds the Pdfium shared library at construction time: the system
    /// library first, then a copy next to the executable.
    pub struct PdfiumSource {
        pdfium: Pdfium,
    }

    impl PdfiumSource {
        /// Bind the Pdfium library.
        pub fn new() -> Result<Self> {
            let bindings = Pdfium::bind_to_system_library()
                .or_else(|_| {
                    Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
                })
                .map_err(|e| Error::Render(format!("failed to bind Pdfium library: {e}")))?;

            Ok(Self {
                pdfium: Pdfium::new(bindings),
            })
        }

        fn load(&self, document: &Path) -> Result<PdfDocument<'_>> {
            self.pdfium
                .load_pdf_from_file(document, None)
                .map_err(|e| Error::Render(format!("{}: {e}", document.display())))
        }
    }

    impl PageRenderer for PdfiumSource {
        fn render_pages(
            &self,
            document: &Path,
            scale: f32,
            temp_dir: &Path,
        ) -> Result<Vec<PageRaster>> {
            let doc = self.load(document)?;
            let page_count = doc.pages().len() as usize;
            let mut rasters = Vec::with_capacity(page_count);

            for (index, page) in doc.pages().iter().enumerate() {
                let config = PdfRenderConfig::new().scale_page_by_factor(scale);
                let bitmap = page.render_with_config(&config).map_err(|e| {
                    Error::Render(format!("page {}: {e}", index + 1))
                })?;

                let image = bitmap.as_image();
                let path = temp_dir.join(format!("page_{index:03}.png"));
                image.save(&path)?;
                info!("rendered page {}/{}: {}", index + 1, page_count, path.display());

                rasters.push(PageRaster::new(index, image, path));
            }

            Ok(rasters)
        }
    }

    impl PageTextSource for PdfiumSource {
        fn page_count(&self, document: &Path) -> Result<usize> {
            Ok(self.load(document)?.pages().len() as usize)
        }

        fn page_text(&self, document: &Path, page_index: usize) -> Result<String> {
            let doc = self.load(document)?;
            let page = doc.pages().get(page_index as u16).map_err(|e| {
                Error::TextExtract(format!("page {}: {e}", page_index + 1))
            })?;
            let text = page.text().map_err(|e| {
                Error::TextExtract(format!("page {}: {e}", page_index + 1))
            })?;
            Ok(text.all())
        }
    }
}

#[cfg(feature = "pdfium")]
pub use pdfium_source::PdfiumSource;
