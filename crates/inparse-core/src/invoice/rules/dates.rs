//! Date extraction.
//!
//! Dates are reported as written. No calendar parsing happens here: "03/14/2024"
//! and "March 5, 2023" both come back verbatim.

use super::patterns::LABELED_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Labeled date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        LABELED_DATE
            .captures_iter(text)
            .filter_map(|caps| {
                let date = caps.get(1)?;
                Some(
                    ExtractionMatch::new(date.as_str().to_string(), &caps[0])
                        .with_position(date.start(), date.end()),
                )
            })
            .collect()
    }
}

/// Extract the first labeled date from text.
pub fn extract_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_numeric_date() {
        assert_eq!(
            extract_date("Invoice Date: 03/14/2024"),
            Some("03/14/2024".to_string())
        );
        assert_eq!(extract_date("date 1-2-24"), Some("1-2-24".to_string()));
    }

    #[test]
    fn test_worded_date() {
        assert_eq!(
            extract_date("Date - March 5, 2023"),
            Some("March 5, 2023".to_string())
        );
        assert_eq!(
            extract_date("DATE:December 25, 1999"),
            Some("December 25, 1999".to_string())
        );
    }

    #[test]
    fn test_year_greedy_up_to_four_digits() {
        assert_eq!(extract_date("Date: 1/2/20245"), Some("1/2/2024".to_string()));
    }

    #[test]
    fn test_iso_date_not_matched() {
        // The numeric form wants a 1-2 digit leading component.
        assert_eq!(extract_date("Date: 2024-03-14"), None);
    }

    #[test]
    fn test_first_match_wins() {
        let text = "Due Date: 04/30/2024\nInvoice Date: 03/14/2024";
        assert_eq!(extract_date(text), Some("04/30/2024".to_string()));
        assert_eq!(DateExtractor::new().extract_all(text).len(), 2);
    }

    #[test]
    fn test_unlabeled_date() {
        assert_eq!(extract_date("Issued 03/14/2024"), None);
        assert_eq!(extract_date(""), None);
    }
}
