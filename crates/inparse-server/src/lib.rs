//! HTTP upload endpoint for invoice parsing.
//!
//! `POST /upload` takes a multipart form with the document in one file
//! field and answers with the extracted invoice record as JSON.

mod api;
mod error;
mod state;

use std::path::Path;

use anyhow::Context;
use axum::extract::DefaultBodyLimit;
use axum::Router;
use inparse_core::InparseConfig;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tracing::info;

pub use error::ApiError;
pub use state::AppState;

/// Room for multipart boundaries and part headers on top of the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Build the application router.
///
/// When `static_dir` is set, every path other than the API falls through to
/// files under it, with `index.html` served for directories.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    let mut router = api::router()
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state);

    if let Some(dir) = static_dir {
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Bind `server.host:server.port` and serve until the process ends.
pub async fn serve(config: &InparseConfig) -> anyhow::Result<()> {
    let server = &config.server;
    let state = AppState::from_config(config);
    let app = app(state, server.static_dir.as_deref());

    let addr = format!("{}:{}", server.host, server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server running on http://{}", listener.local_addr()?);
    if let Some(dir) = &server.static_dir {
        info!("Serving static files from {}", dir.display());
    }

    axum::serve(listener, app).await?;
    Ok(())
}
