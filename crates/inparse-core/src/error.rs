//! Error types for the inparse-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the inparse library.
#[derive(Error, Debug)]
pub enum InparseError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The worker running a text extraction died before reporting back.
    #[error("text extraction worker failed: {0}")]
    Worker(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// A model file is missing from the model directory.
    #[error("model file not found: {}", .0.display())]
    ModelNotFound(PathBuf),

    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text detection or recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// This build carries no OCR engine.
    #[error("OCR is not available in this build")]
    Unavailable,
}

/// Rejections raised before a document reaches text extraction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// The request carried no file.
    #[error("no file uploaded")]
    MissingFile,

    /// The declared media type is not PDF, JPEG, or PNG.
    #[error("unsupported media type: {0}")]
    UnsupportedType(String),

    /// The payload exceeds the configured size bound.
    #[error("file of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
}

/// Failure of one document's trip through the pipeline.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The document was rejected before extraction.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),

    /// The text source produced no usable text.
    #[error("no text could be extracted from the document")]
    EmptyExtraction,

    /// The text source failed.
    #[error("text extraction failed: {0}")]
    ExtractionFailure(#[source] InparseError),
}

impl ProcessError {
    /// Whether the client, not the server, is at fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ProcessError::InvalidInput(_))
    }

    /// Message safe to show to the client.
    ///
    /// Extraction failures collapse to one generic message; the underlying
    /// cause stays in server-side logs.
    pub fn client_message(&self) -> String {
        match self {
            ProcessError::InvalidInput(InputError::MissingFile) => "No file uploaded.".to_string(),
            ProcessError::InvalidInput(InputError::UnsupportedType(_)) => {
                "Invalid file type. Only PDF, JPG, and PNG are allowed.".to_string()
            }
            ProcessError::InvalidInput(InputError::TooLarge { limit, .. }) => {
                format!("File too large. Maximum size is {}MB.", limit / (1024 * 1024))
            }
            ProcessError::EmptyExtraction => "Could not extract text from file.".to_string(),
            ProcessError::ExtractionFailure(_) => {
                "An error occurred while processing the file.".to_string()
            }
        }
    }
}

/// Result type for the inparse library.
pub type Result<T> = std::result::Result<T, InparseError>;
