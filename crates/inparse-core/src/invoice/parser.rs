//! Rule-based invoice parser.

use std::time::Instant;

use tracing::debug;

use crate::models::invoice::ExtractedInvoice;
use crate::ocr::OcrResult;

use super::rules::{
    amounts::extract_total, dates::DateExtractor, number::InvoiceNumberExtractor,
    vendor::VendorExtractor, FieldExtractor, TotalSource,
};
use super::InvoiceExtractor;

/// Result of invoice extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted invoice data.
    pub invoice: ExtractedInvoice,
    /// Raw text the fields were extracted from.
    pub raw_text: String,
    /// One entry per field that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Invoice parser running the four field rules over a text.
///
/// Stateless; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvoiceParser;

impl InvoiceParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self
    }

    /// Run every rule and build the record.
    pub fn extract_fields(&self, text: &str) -> ExtractedInvoice {
        let vendor = VendorExtractor::new().extract(text).map(|m| m.value);
        let invoice_number = InvoiceNumberExtractor::new().extract(text).map(|m| m.value);
        let date = DateExtractor::new().extract(text).map(|m| m.value);

        let total = extract_total(text).map(|total| {
            if total.source == TotalSource::LargestAmount {
                debug!("Total {} inferred from the largest amount", total.value);
            }
            total.value
        });

        ExtractedInvoice {
            invoice_number,
            date,
            vendor,
            total,
        }
    }

    /// Parse invoice from text, with diagnostics.
    pub fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        debug!("Parsing invoice from {} characters of text", text.len());

        let invoice = self.extract_fields(text);
        let warnings: Vec<String> = invoice
            .missing_fields()
            .into_iter()
            .map(|field| format!("Could not extract {}", field))
            .collect();

        debug!(
            "Extracted {}/4 fields ({} warnings)",
            invoice.found_count(),
            warnings.len()
        );

        ExtractionResult {
            invoice,
            raw_text: text.to_string(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl InvoiceExtractor for InvoiceParser {
    fn extract(&self, ocr_result: &OcrResult) -> ExtractedInvoice {
        self.extract_fields(&ocr_result.text)
    }

    fn extract_from_text(&self, text: &str) -> ExtractedInvoice {
        self.extract_fields(text)
    }
}

/// Extract invoice fields from text with the default parser.
pub fn extract_invoice(text: &str) -> ExtractedInvoice {
    InvoiceParser::new().extract_fields(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_basic_invoice() {
        let text = r#"

            Acme Corp
            123 Main Street

            Invoice #: AB-1234
            Invoice Date: 03/14/2024

            Widget x2        $40.00
            Gadget x1        $19.99

            Total: $59.99
        "#;

        let result = InvoiceParser::new().parse(text);

        assert_eq!(
            result.invoice,
            ExtractedInvoice {
                invoice_number: Some("AB-1234".to_string()),
                date: Some("03/14/2024".to_string()),
                vendor: Some("Acme Corp".to_string()),
                total: Some("59.99".to_string()),
            }
        );
        assert!(result.warnings.is_empty());
        assert_eq!(result.raw_text, text);
    }

    #[test]
    fn test_partial_result_warnings() {
        let result = InvoiceParser::new().parse("Corner Shop\nItem $3.50");

        assert_eq!(result.invoice.vendor.as_deref(), Some("Corner Shop"));
        assert_eq!(result.invoice.total.as_deref(), Some("3.50"));
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract invoice number".to_string(),
                "Could not extract date".to_string(),
            ]
        );
    }

    #[test]
    fn test_extract_from_ocr_result() {
        let mut ocr = OcrResult::empty(100, 100);
        ocr.text = "Globex\nInvoice No: 9\nBalance: 10".to_string();

        let invoice = InvoiceParser::new().extract(&ocr);
        assert_eq!(invoice.vendor.as_deref(), Some("Globex"));
        assert_eq!(invoice.invoice_number.as_deref(), Some("9"));
        assert_eq!(invoice.total.as_deref(), Some("10"));
    }
}
