//! Invoice number extraction.

use super::patterns::INVOICE_NUMBER;
use super::{ExtractionMatch, FieldExtractor};

/// Invoice number field extractor.
pub struct InvoiceNumberExtractor;

impl InvoiceNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for InvoiceNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for InvoiceNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        INVOICE_NUMBER
            .captures_iter(text)
            .filter_map(|caps| {
                let number = caps.get(1)?;
                Some(
                    ExtractionMatch::new(number.as_str().to_string(), &caps[0])
                        .with_position(number.start(), number.end()),
                )
            })
            .collect()
    }
}

/// Extract the invoice number from text.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    InvoiceNumberExtractor::new().extract(text).map(|m| m.value)
}
