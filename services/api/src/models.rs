//! API Models
//!
//! Request and response bodies for the REST endpoints, shared between the
//! handlers and the generated OpenAPI document.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, ToSchema, Debug)]
pub struct ImprovePayload {
    #[schema(example = "um so basically we, uh, want to help restaurants waste less food")]
    pub text: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ImproveResponse {
    #[schema(example = "We help restaurants cut food waste.")]
    pub improved: String,
}

/// Multipart form accepted by the transcription endpoint.
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct TranscriptionUpload {
    /// The recorded audio clip (WebM, MP3, WAV, ...).
    #[schema(value_type = String, format = Binary)]
    pub audio: Vec<u8>,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct TranscriptionResponse {
    pub transcript: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorResponse {
    pub message: String,
}
