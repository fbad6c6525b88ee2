//! Axum Router Configuration
//!
//! This module defines the complete HTTP routing for the application,
//! including the REST endpoints, the WebSocket endpoint, static assets and
//! OpenAPI documentation.

use crate::{
    handlers,
    models::{
        ErrorResponse, ImprovePayload, ImproveResponse, TranscriptionResponse,
        TranscriptionUpload,
    },
    state::AppState,
    ws::ws_handler,
};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Largest accepted audio upload; matches the transcription backend's own limit.
pub const MAX_AUDIO_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(handlers::improve, handlers::get_transcription),
    components(
        schemas(ImprovePayload, ImproveResponse, TranscriptionUpload, TranscriptionResponse, ErrorResponse)
    ),
    tags(
        (name = "Pitch Coach API", description = "One-shot helpers for the AI pitch coach")
    )
)]
pub struct ApiDoc;

/// Creates the main Axum router for the application.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let static_dir = app_state.config.static_dir.clone();

    // Group all routes that require AppState into their own router.
    let api_router = Router::new()
        .route("/improve", post(handlers::improve))
        .route(
            "/get-transcription",
            post(handlers::get_transcription)
                .layer(DefaultBodyLimit::max(MAX_AUDIO_UPLOAD_BYTES)),
        )
        .route("/ws", get(ws_handler))
        .with_state(app_state);

    // Merge in the stateless routes: API docs and the browser client.
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(api_router)
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
}
