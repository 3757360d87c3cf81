//! Candidate region types produced by detection.

use crate::bbox::PctBox;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of visual element a region represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    Figure,
    Table,
    Diagram,
    Chart,
    /// Kind could not be determined (e.g. analyzer unavailable).
    Unknown,
}

impl RegionKind {
    /// Lowercase name used in filenames and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKind::Figure => "figure",
            RegionKind::Table => "table",
            RegionKind::Diagram => "diagram",
            RegionKind::Chart => "chart",
            RegionKind::Unknown => "unknown",
        }
    }

    /// Parse a kind name, falling back to `Unknown` for anything else.
    ///
    /// External analyzers report kinds as free-form strings; unrecognized
    /// values must not abort the run.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "figure" => RegionKind::Figure,
            "table" => RegionKind::Table,
            "diagram" => RegionKind::Diagram,
            "chart" => RegionKind::Chart,
            _ => RegionKind::Unknown,
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A candidate visual element on one page, pre-normalization.
///
/// The bounding box lives in percentage space and may be degenerate;
/// ordering is repaired by [`PctBox::to_pixels`] at crop time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Kind of visual element
    #[serde(rename = "type")]
    pub kind: RegionKind,
    /// Declared number ("3", "II", ...); present but not guaranteed unique
    pub number: String,
    /// Free-text description, may be empty
    pub description: String,
    /// Associated caption line, may be empty
    pub text: String,
    /// Bounding box in percentage space
    pub bbox: PctBox,
}

impl Region {
    /// Create a region with the given kind and box.
    pub fn new(kind: RegionKind, number: impl Into<String>, bbox: PctBox) -> Self {
        Self {
            kind,
            number: number.into(),
            description: String::new(),
            text: String::new(),
            bbox,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the associated caption text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display() {
        assert_eq!(RegionKind::Figure.to_string(), "figure");
        assert_eq!(RegionKind::Unknown.to_string(), "unknown");
    }

    #[test]
    fn test_kind_parse_lenient() {
        assert_eq!(RegionKind::parse_lenient("Table"), RegionKind::Table);
        assert_eq!(RegionKind::parse_lenient(" chart "), RegionKind::Chart);
        assert_eq!(RegionKind::parse_lenient("photo"), RegionKind::Unknown);
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&RegionKind::Diagram).unwrap();
        assert_eq!(json, "\"diagram\"");
    }

    #[test]
    fn test_region_builder() {
        let r = Region::new(RegionKind::Figure, "2", PctBox::new(10.0, 10.0, 80.0, 90.0))
            .with_description("Architecture diagram")
            .with_text("Figure 2. Architecture diagram");
        assert_eq!(r.number, "2");
        assert!(r.text.starts_with("Figure 2"));
    }
}
