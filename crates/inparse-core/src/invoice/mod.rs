//! Invoice field extraction module.

mod parser;
pub mod rules;

pub use parser::{extract_invoice, ExtractionResult, InvoiceParser};

use crate::models::invoice::ExtractedInvoice;
use crate::ocr::OcrResult;

/// Trait for invoice field extractors.
///
/// Extraction never fails: fields that cannot be found are left absent.
pub trait InvoiceExtractor {
    /// Extract invoice data from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> ExtractedInvoice;

    /// Extract invoice data from plain text.
    fn extract_from_text(&self, text: &str) -> ExtractedInvoice;
}
