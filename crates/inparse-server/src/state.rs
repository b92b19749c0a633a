use std::sync::Arc;

use inparse_core::models::config::ServerConfig;
use inparse_core::{DocumentTextSource, InparseConfig, InvoiceParser, TextSource};

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn TextSource>,
    pub parser: InvoiceParser,
    pub max_upload_bytes: usize,
    pub upload_field: Arc<str>,
}

impl AppState {
    pub fn new(source: Arc<dyn TextSource>, server: &ServerConfig) -> Self {
        Self {
            source,
            parser: InvoiceParser::new(),
            max_upload_bytes: server.max_upload_bytes,
            upload_field: Arc::from(server.upload_field.as_str()),
        }
    }

    /// State backed by the PDF and OCR text sources.
    pub fn from_config(config: &InparseConfig) -> Self {
        Self::new(
            Arc::new(DocumentTextSource::from_config(config)),
            &config.server,
        )
    }
}
