//! Parsed figure/table mentions from page text.

use serde::{Deserialize, Serialize};

use super::RegionKind;

/// A parsed mention of a figure or table in page text.
///
/// Produced by the reference scanner; immutable. `kind` is always
/// `Figure` or `Table`; the scanner recognizes nothing else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextReference {
    /// `Figure` or `Table`
    pub kind: RegionKind,
    /// Declared number as written ("3", "12"), defaulting to "1" when absent
    pub number: String,
    /// Caption title, or a placeholder when the line has none
    pub title: String,
    /// The raw source line
    pub line: String,
    /// 0-based index of the owning page
    pub page_index: usize,
}

impl TextReference {
    /// Short human-readable label, e.g. "Figure 3".
    pub fn label(&self) -> String {
        let name = match self.kind {
            RegionKind::Table => "Table",
            _ => "Figure",
        };
        format!("{} {}", name, self.number)
    }
}
