//! Error types for the unfig library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for unfig operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during figure extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input document does not exist.
    #[error("Input document not found: {0}")]
    InputNotFound(PathBuf),

    /// The renderer could not produce a raster for a page.
    #[error("Page render error: {0}")]
    Render(String),

    /// Page text could not be extracted.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// The external region analyzer failed or returned malformed data.
    #[error("Analyzer error: {0}")]
    Analyzer(String),

    /// Error decoding or encoding a raster image.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Error writing the metadata document.
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an I/O error with the path it concerns.
    ///
    /// Raw `io::Error` values rarely carry the offending path; extraction
    /// touches many files, so failures must name what they touched.
    pub fn io_at(err: io::Error, path: &std::path::Path) -> Self {
        Error::Other(format!("{}: {}", path.display(), err))
    }
}
