use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inparse_core::{InputError, ProcessError};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// A failed upload, rendered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub ProcessError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ProcessError::InvalidInput(InputError::TooLarge { .. }) => StatusCode::PAYLOAD_TOO_LARGE,
            ProcessError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ProcessError::EmptyExtraction | ProcessError::ExtractionFailure(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ProcessError> for ApiError {
    fn from(err: ProcessError) -> Self {
        Self(err)
    }
}

impl From<InputError> for ApiError {
    fn from(err: InputError) -> Self {
        Self(ProcessError::InvalidInput(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // The full cause stays here; clients get the generic message.
        if status.is_server_error() {
            error!("Error processing file: {}", self.0);
        } else {
            warn!("Rejected upload: {}", self.0);
        }

        let body = Json(ErrorResponse {
            error: self.0.client_message(),
        });

        (status, body).into_response()
    }
}
