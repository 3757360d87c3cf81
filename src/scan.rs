//! Text reference scanning.
//!
//! Finds figure/table caption lines in a page's plain text. A line counts
//! only when it *starts* with a marker ("fig.", "figure", "table"); lines
//! that merely mention a figure mid-sentence ("as shown in figure 2") are
//! ignored. Precision over recall: body-text mentions vastly outnumber
//! captions, and a false caption produces a bogus crop downstream.

use log::warn;
use regex::Regex;

use crate::model::{RegionKind, TextReference};

/// Placeholder title when a caption line carries no title text.
const UNTITLED_FIGURE: &str = "Untitled Figure";
/// Placeholder title for tables.
const UNTITLED_TABLE: &str = "Untitled Table";
/// Placeholder number when no digit run follows the marker.
const DEFAULT_NUMBER: &str = "1";

/// Scans page text for figure and table references.
///
/// Pure over its input: no side effects beyond logging. Construct once and
/// reuse across pages; the regexes are compiled in [`ReferenceScanner::new`].
pub struct ReferenceScanner {
    figure_number: Regex,
    table_number: Regex,
}

impl ReferenceScanner {
    /// Create a scanner with compiled patterns.
    pub fn new() -> Self {
        Self {
            figure_number: Regex::new(r"(?i)(?:fig\.|figure)\s+(\d+)").unwrap(),
            table_number: Regex::new(r"(?i)table\s+(\d+)").unwrap(),
        }
    }

    /// Scan one page's plain text, returning references in line order.
    pub fn scan_page(&self, text: &str, page_index: usize) -> Vec<TextReference> {
        let mut refs = Vec::new();

        for raw_line in text.lines() {
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }

            let lower = line.to_ascii_lowercase();
            let (kind, number_re, placeholder) =
                if lower.starts_with("fig.") || lower.starts_with("figure") {
                    (RegionKind::Figure, &self.figure_number, UNTITLED_FIGURE)
                } else if lower.starts_with("table") {
                    (RegionKind::Table, &self.table_number, UNTITLED_TABLE)
                } else {
                    continue;
                };

            let number = match number_re.captures(line) {
                Some(caps) => caps[1].to_string(),
                None => {
                    // Known collision hazard: distinct unnumbered captions on
                    // one page all become "{kind} 1".
                    warn!(
                        "page {}: no number in caption line {:?}, defaulting to {:?}",
                        page_index + 1,
                        line,
                        DEFAULT_NUMBER
                    );
                    DEFAULT_NUMBER.to_string()
                }
            };

            refs.push(TextReference {
                kind,
                number,
                title: extract_title(line, placeholder),
                line: line.to_string(),
                page_index,
            });
        }

        refs
    }
}

impl Default for ReferenceScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Title = remainder of the line after the first period, trimmed.
fn extract_title(line: &str, placeholder: &str) -> String {
    match line.split_once('.') {
        Some((_, rest)) if !rest.trim().is_empty() => rest.trim().to_string(),
        _ => placeholder.to_string(),
    }
}
