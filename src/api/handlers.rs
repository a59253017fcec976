use axum::{body::Bytes, extract::State, Json};
use std::sync::Arc;

use super::{
    GenerateImageRequest, HealthResponse, NarrationRequest, NarrationResponse,
    SpeechSynthesisRequest, VoicesResponse,
};
use crate::api::routes::AppState;
use crate::error::AppError;
use crate::image::{ImageRequest, ImageResult};
use crate::plan;
use crate::tts::{SpeechRequest, SpeechResult};

pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ImageResult>, AppError> {
    // An unreadable request still gets a picture.
    let payload = match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(json) => GenerateImageRequest::from_json(&json),
        Err(e) => {
            tracing::error!("Image request could not be read: {}", e);
            None
        }
    };
    let Some(payload) = payload else {
        return Ok(Json(ImageResult::static_fallback()));
    };

    let request = ImageRequest::new(payload.prompt, payload.category)?;

    let result = state.images.generate(&request).await?;
    Ok(Json(result))
}

pub async fn text_to_speech(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SpeechResult>, AppError> {
    let payload: SpeechSynthesisRequest =
        serde_json::from_slice(&body).map_err(|e| AppError::SpeechFailed {
            details: e.to_string(),
        })?;

    let voice = payload
        .voice
        .unwrap_or_else(|| state.speech.default_voice().to_string());
    let request = SpeechRequest::new(payload.text.unwrap_or_default(), voice)?;

    let result = state.speech.synthesize(&request).await?;
    Ok(Json(result))
}

pub async fn list_voices(State(state): State<Arc<AppState>>) -> Json<VoicesResponse> {
    Json(VoicesResponse {
        voices: state.speech.list_voices(),
    })
}

pub async fn narrate_plan(body: Bytes) -> Result<Json<NarrationResponse>, AppError> {
    let request: NarrationRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Invalid plan: {}", e)))?;

    Ok(Json(NarrationResponse {
        text: plan::narrate(&request.plan, request.section),
    }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
