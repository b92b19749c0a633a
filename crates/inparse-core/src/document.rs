//! Documents, their media types, and the text sources that read them.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::{InputError, Result};
use crate::models::config::{ModelConfig, OcrConfig, PdfConfig};
use crate::pdf::PdfExtractor;

/// Declared format of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    /// `application/pdf`
    Pdf,
    /// `image/jpeg`
    Jpeg,
    /// `image/png`
    Png,
}

impl MediaType {
    /// Resolve a declared MIME type. Parameters such as `; charset=` are ignored.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/pdf" => Some(MediaType::Pdf),
            "image/jpeg" => Some(MediaType::Jpeg),
            "image/png" => Some(MediaType::Png),
            _ => None,
        }
    }

    /// Resolve a file extension (without the dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(MediaType::Pdf),
            "jpg" | "jpeg" => Some(MediaType::Jpeg),
            "png" => Some(MediaType::Png),
            _ => None,
        }
    }

    /// Canonical MIME type.
    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Pdf => "application/pdf",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Png => "image/png",
        }
    }

    /// Whether the document goes through OCR.
    pub fn is_image(&self) -> bool {
        matches!(self, MediaType::Jpeg | MediaType::Png)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// One file's bytes and declared media type.
#[derive(Debug, Clone)]
pub struct Document {
    pub data: Vec<u8>,
    pub media_type: MediaType,
}

impl Document {
    pub fn new(data: impl Into<Vec<u8>>, media_type: MediaType) -> Self {
        Self {
            data: data.into(),
            media_type,
        }
    }

    /// Read a local file, taking the media type from its extension.
    pub fn from_path(path: &Path) -> std::result::Result<Self, crate::error::ProcessError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        let media_type = MediaType::from_extension(extension)
            .ok_or_else(|| InputError::UnsupportedType(extension.to_string()))?;

        let data = std::fs::read(path).map_err(|e| {
            crate::error::ProcessError::ExtractionFailure(crate::error::InparseError::Io(e))
        })?;

        Ok(Self::new(data, media_type))
    }

    /// Size in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Check an upload before it reaches text extraction.
///
/// Returns the media type to dispatch on.
pub fn check_upload(
    content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> std::result::Result<MediaType, InputError> {
    let declared = content_type.unwrap_or("");
    let media_type = MediaType::from_mime(declared)
        .ok_or_else(|| InputError::UnsupportedType(declared.to_string()))?;

    if size > max_bytes {
        return Err(InputError::TooLarge {
            size,
            limit: max_bytes,
        });
    }

    Ok(media_type)
}

/// Something that turns a document's bytes into text.
///
/// Implementations hold no per-request state, so one instance can serve
/// concurrent requests.
pub trait TextSource: Send + Sync {
    /// Extract the document's full text.
    fn extract_text(&self, document: &Document) -> Result<String>;
}

/// Production text source: PDF text layer for PDFs, OCR for images.
#[derive(Debug, Clone, Default)]
pub struct DocumentTextSource {
    pdf: PdfConfig,
    ocr: OcrConfig,
    models: ModelConfig,
}

impl DocumentTextSource {
    pub fn new(pdf: PdfConfig, ocr: OcrConfig, models: ModelConfig) -> Self {
        Self { pdf, ocr, models }
    }

    /// Build from the relevant sections of a full configuration.
    pub fn from_config(config: &crate::models::config::InparseConfig) -> Self {
        Self::new(
            config.pdf.clone(),
            config.ocr.clone(),
            config.models.clone(),
        )
    }

    /// The model configuration images are recognized with.
    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    fn pdf_text(&self, data: &[u8]) -> Result<String> {
        Ok(PdfExtractor::text_from_bytes(data, self.pdf.allow_empty_password)?)
    }

    #[cfg(feature = "native")]
    fn image_text(&self, document: &Document) -> Result<String> {
        use crate::ocr::OcrSession;

        let format = match document.media_type {
            MediaType::Png => image::ImageFormat::Png,
            _ => image::ImageFormat::Jpeg,
        };
        let image = image::load_from_memory_with_format(&document.data, format)?;

        // Scoped to this call; dropped on every return path.
        let session = OcrSession::acquire(&self.models, &self.ocr)?;
        let text = session.extract_text(&image)?;
        Ok(text)
    }

    #[cfg(not(feature = "native"))]
    fn image_text(&self, _document: &Document) -> Result<String> {
        Err(crate::error::OcrError::Unavailable.into())
    }
}

impl TextSource for DocumentTextSource {
    fn extract_text(&self, document: &Document) -> Result<String> {
        debug!(
            "Extracting text from {} bytes of {}",
            document.len(),
            document.media_type
        );

        match document.media_type {
            MediaType::Pdf => self.pdf_text(&document.data),
            MediaType::Jpeg | MediaType::Png => self.image_text(document),
        }
    }
}
