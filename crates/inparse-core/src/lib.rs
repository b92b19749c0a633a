//! Core library for invoice parsing.
//!
//! This crate provides:
//! - PDF text-layer extraction
//! - OCR for scanned invoices (JPEG/PNG) using PaddleOCR models
//! - Heuristic invoice field extraction (vendor, number, date, total)
//! - The upload pipeline tying a document to an extracted record

pub mod document;
pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pdf;
pub mod pipeline;

pub use document::{check_upload, Document, DocumentTextSource, MediaType, TextSource};
pub use error::{InparseError, InputError, ProcessError, Result};
pub use invoice::{extract_invoice, ExtractionResult, InvoiceExtractor, InvoiceParser};
pub use models::config::InparseConfig;
pub use models::invoice::ExtractedInvoice;
pub use ocr::{OcrResult, TextBox};
#[cfg(feature = "native")]
pub use ocr::OcrSession;
pub use pdf::{PdfExtractor, PdfProcessor};
pub use pipeline::process_document;
