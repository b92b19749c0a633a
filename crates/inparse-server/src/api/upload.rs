//! POST /upload

use std::sync::Arc;

use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inparse_core::{
    check_upload, process_document, Document, ExtractedInvoice, InparseError, InputError,
    ProcessError,
};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::state::AppState;

struct Upload {
    content_type: Option<String>,
    data: Vec<u8>,
}

/// Extract the invoice record from the uploaded document.
pub async fn upload(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractedInvoice>, ApiError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Request is not a multipart form: {}", e);
        InputError::MissingFile
    })?;

    let upload = read_upload(&mut multipart, &state).await?;
    let media_type = check_upload(
        upload.content_type.as_deref(),
        upload.data.len(),
        state.max_upload_bytes,
    )?;

    info!("Received {} upload of {} bytes", media_type, upload.data.len());

    let document = Document::new(upload.data, media_type);
    let source = Arc::clone(&state.source);
    let parser = state.parser;

    let result = tokio::task::spawn_blocking(move || {
        process_document(source.as_ref(), &parser, &document)
    })
    .await
    .map_err(|e| ProcessError::ExtractionFailure(InparseError::Worker(e.to_string())))??;

    Ok(Json(result.invoice))
}

/// Find the upload field and read it, stopping once it passes the size limit.
async fn read_upload(multipart: &mut Multipart, state: &AppState) -> Result<Upload, InputError> {
    let limit = state.max_upload_bytes;

    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, 0, limit))?
    {
        if field.name() != Some(&*state.upload_field) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let mut data = Vec::new();

        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| multipart_error(e, data.len(), limit))?
        {
            data.extend_from_slice(&chunk);
            if data.len() > limit {
                break;
            }
        }

        return Ok(Upload { content_type, data });
    }

    Err(InputError::MissingFile)
}

fn multipart_error(err: MultipartError, read: usize, limit: usize) -> InputError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        InputError::TooLarge {
            size: read.max(limit.saturating_add(1)),
            limit,
        }
    } else {
        debug!("Malformed multipart body: {}", err.body_text());
        InputError::MissingFile
    }
}
