//! One document's trip from bytes to an extracted invoice record.

use std::time::Instant;

use tracing::{info, warn};

use crate::document::{Document, TextSource};
use crate::error::ProcessError;
use crate::invoice::{ExtractionResult, InvoiceParser};

/// Extract text from `document` and run the field rules over it.
///
/// Text that is empty after trimming is an [`ProcessError::EmptyExtraction`];
/// any text source failure is wrapped in [`ProcessError::ExtractionFailure`].
pub fn process_document(
    source: &dyn TextSource,
    parser: &InvoiceParser,
    document: &Document,
) -> Result<ExtractionResult, ProcessError> {
    let start = Instant::now();

    if document.media_type.is_image() {
        info!("Processing image ({} bytes)", document.len());
    } else {
        info!("Processing PDF ({} bytes)", document.len());
    }

    let text = source
        .extract_text(document)
        .map_err(ProcessError::ExtractionFailure)?;

    if text.trim().is_empty() {
        warn!("No text extracted from {}", document.media_type);
        return Err(ProcessError::EmptyExtraction);
    }

    let mut result = parser.parse(&text);
    result.processing_time_ms = start.elapsed().as_millis() as u64;

    info!(
        "Extraction complete: {}/4 fields in {}ms",
        result.invoice.found_count(),
        result.processing_time_ms
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MediaType;
    use crate::error::{InparseError, PdfError};
    use pretty_assertions::assert_eq;

    struct FixedText(&'static str);

    impl TextSource for FixedText {
        fn extract_text(&self, _document: &Document) -> crate::Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Broken;

    impl TextSource for Broken {
        fn extract_text(&self, _document: &Document) -> crate::Result<String> {
            Err(InparseError::Pdf(PdfError::Encrypted))
        }
    }

    fn pdf() -> Document {
        Document::new(b"%PDF-1.5".to_vec(), MediaType::Pdf)
    }

    #[test]
    fn test_process_document() {
        let source = FixedText("Acme Corp\nInvoice #: A-1\nDate: 01/02/2024\nTotal: $12.50");
        let result = process_document(&source, &InvoiceParser::new(), &pdf()).unwrap();

        assert_eq!(result.invoice.vendor.as_deref(), Some("Acme Corp"));
        assert_eq!(result.invoice.invoice_number.as_deref(), Some("A-1"));
        assert_eq!(result.invoice.date.as_deref(), Some("01/02/2024"));
        assert_eq!(result.invoice.total.as_deref(), Some("12.50"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_whitespace_text_is_empty_extraction() {
        let source = FixedText(" \n\t \n");
        let err = process_document(&source, &InvoiceParser::new(), &pdf()).unwrap_err();
        assert!(matches!(err, ProcessError::EmptyExtraction));
        assert_eq!(err.client_message(), "Could not extract text from file.");
    }

    #[test]
    fn test_source_failure() {
        let image = Document::new(vec![0u8; 4], MediaType::Jpeg);
        let err = process_document(&Broken, &InvoiceParser::new(), &image).unwrap_err();
        assert!(matches!(err, ProcessError::ExtractionFailure(_)));
        assert!(!err.is_client_error());
        assert_eq!(
            err.client_message(),
            "An error occurred while processing the file."
        );
    }
}
