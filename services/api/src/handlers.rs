//! Axum Handlers for the REST API
//!
//! The two one-shot operations that sit beside the coaching session: pitch
//! polishing and audio transcription. Both call their backend exactly once
//! and surface any failure directly to the caller.
//! It uses `utoipa` doc comments to generate OpenAPI documentation.

use axum::{
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use pitch_coach_core::{
    error::{BackendError, with_deadline},
    transcription::AudioClip,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    models::{
        ErrorResponse, ImprovePayload, ImproveResponse, TranscriptionResponse,
        TranscriptionUpload,
    },
    state::AppState,
};

pub enum ApiError {
    BadRequest(String),
    PayloadTooLarge(String),
    Backend(BackendError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse { message })).into_response()
            }
            ApiError::PayloadTooLarge(message) => {
                (StatusCode::PAYLOAD_TOO_LARGE, Json(ErrorResponse { message })).into_response()
            }
            ApiError::Backend(err) => {
                error!("Backend call failed: {}", err);
                let status = match err {
                    BackendError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                    _ => StatusCode::BAD_GATEWAY,
                };
                let message = err.to_string();
                (status, Json(ErrorResponse { message })).into_response()
            }
        }
    }
}

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self::Backend(err)
    }
}

// Extractor rejections carry plain-text bodies; re-wrap them so every
// client error shares the `{"message"}` shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(err.body_text())
        } else {
            Self::BadRequest(err.body_text())
        }
    }
}

/// Rewrite raw founder text into a polished, investor-ready pitch.
#[utoipa::path(
    post,
    path = "/improve",
    request_body = ImprovePayload,
    responses(
        (status = 200, description = "Polished pitch text", body = ImproveResponse),
        (status = 400, description = "Missing, blank or malformed `text`", body = ErrorResponse),
        (status = 502, description = "Generation backend failed", body = ErrorResponse),
        (status = 504, description = "Generation backend timed out", body = ErrorResponse)
    )
)]
pub async fn improve(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ImprovePayload>, JsonRejection>,
) -> Result<Json<ImproveResponse>, ApiError> {
    let Json(payload) = payload?;
    if payload.text.trim().is_empty() {
        return Err(ApiError::BadRequest("`text` must not be blank".to_string()));
    }

    let improved = state.polisher.polish(&payload.text).await?;
    Ok(Json(ImproveResponse { improved }))
}

/// Transcribe an uploaded audio clip to plain text.
#[utoipa::path(
    post,
    path = "/get-transcription",
    request_body(content = TranscriptionUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Transcript of the clip", body = TranscriptionResponse),
        (status = 400, description = "Missing or empty audio upload", body = ErrorResponse),
        (status = 413, description = "Upload exceeds the size limit", body = ErrorResponse),
        (status = 502, description = "Transcription backend failed", body = ErrorResponse),
        (status = 504, description = "Transcription backend timed out", body = ErrorResponse)
    )
)]
pub async fn get_transcription(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<TranscriptionResponse>, ApiError> {
    let mut multipart = multipart?;
    let mut clip = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("audio") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field.bytes().await?;
        clip = Some(AudioClip::new(file_name.as_deref(), bytes.to_vec()));
        break;
    }

    let clip = clip.ok_or_else(|| ApiError::BadRequest("`audio` field is required".to_string()))?;
    if clip.bytes.is_empty() {
        return Err(ApiError::BadRequest("`audio` upload is empty".to_string()));
    }

    info!(file_name = %clip.file_name, bytes = clip.bytes.len(), "Transcribing upload");
    let transcript = with_deadline(
        state.config.generation_timeout,
        state
            .transcriber
            .transcribe(clip, &state.config.transcription_language),
    )
    .await?;

    Ok(Json(TranscriptionResponse { transcript }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_backend_errors_map_to_gateway_statuses() {
        let resp = ApiError::Backend(BackendError::Unavailable("down".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp = ApiError::Backend(BackendError::Malformed("blank".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let resp =
            ApiError::Backend(BackendError::Timeout(Duration::from_secs(1))).into_response();
        assert_eq!(resp.status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[test]
    fn test_bad_request_status() {
        let resp = ApiError::BadRequest("nope".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_oversized_upload_keeps_413_with_json_body() {
        let resp = ApiError::PayloadTooLarge("length limit exceeded".into()).into_response();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(
            resp.headers()[axum::http::header::CONTENT_TYPE],
            "application/json"
        );
    }
}
