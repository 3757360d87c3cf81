//! Output metadata records.

use serde::{Deserialize, Serialize};

use crate::bbox::PctBox;

use super::RegionKind;

/// Metadata for one successfully cropped region.
///
/// Serialized as one element of the run's `figures_metadata.json` array.
/// The `bbox` field keeps the *original percentage-space* box rather than
/// the pixel box, so downstream consumers stay resolution independent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedElement {
    /// Crop filename, unique within the run
    pub filename: String,
    /// Kind of visual element
    #[serde(rename = "type")]
    pub kind: RegionKind,
    /// Declared number
    pub number: String,
    /// 1-based page number
    pub page: u32,
    /// Free-text description
    pub description: String,
    /// Associated caption text
    pub text_content: String,
    /// Original percentage-space bounding box
    pub bbox: PctBox,
}
