//! Vendor extraction: the first non-blank line.

use super::{ExtractionMatch, FieldExtractor};

/// Vendor field extractor.
///
/// Invoice headers conventionally put the issuer first, so the first line
/// with visible content is taken as the vendor. Purely positional.
pub struct VendorExtractor;

impl VendorExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VendorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for VendorExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        non_blank_lines(text).next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        non_blank_lines(text).collect()
    }
}

/// Extract the vendor line from text.
pub fn extract_vendor(text: &str) -> Option<String> {
    VendorExtractor::new().extract(text).map(|m| m.value)
}

fn is_blank_char(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = ExtractionMatch<String>> + '_ {
    let mut offset = 0;
    text.split('\n').filter_map(move |line| {
        let line_start = offset;
        offset += line.len() + 1;

        let leading = line.len() - line.trim_start_matches(is_blank_char).len();
        let trimmed = line.trim_matches(is_blank_char);
        if trimmed.is_empty() {
            return None;
        }

        let start = line_start + leading;
        Some(ExtractionMatch::new(trimmed.to_string(), line).with_position(start, start + trimmed.len()))
    })
}
