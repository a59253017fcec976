use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not configured: {0}")]
    NotConfigured(String),

    #[error("TTS generation failed: {details}")]
    SpeechFailed { details: String },
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotConfigured(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            AppError::SpeechFailed { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TTS generation failed".to_string(),
                Some(details),
            ),
        };

        tracing::error!(
            status = status.as_u16(),
            details = details.as_deref().unwrap_or(""),
            "Request failed: {}",
            message
        );

        (
            status,
            Json(ErrorResponse {
                error: message,
                details,
            }),
        )
            .into_response()
    }
}
