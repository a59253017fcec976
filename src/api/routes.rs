use axum::{
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::config::Config;
use crate::image::{GeminiImageClient, ImageService, ImageStrategy, PollinationsStrategy};
use crate::tts::{ElevenLabsClient, SpeechService};

pub struct AppState {
    pub images: ImageService,
    pub speech: SpeechService,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let primary = config.gemini.api_key.clone().map(|key| {
            Arc::new(GeminiImageClient::new(client.clone(), key, &config.gemini))
                as Arc<dyn ImageStrategy>
        });
        let fallback: Arc<dyn ImageStrategy> =
            Arc::new(PollinationsStrategy::new(config.pollinations_base.clone()));

        let tts = config
            .elevenlabs
            .api_key
            .clone()
            .map(|key| ElevenLabsClient::new(client.clone(), key, &config.elevenlabs));

        Ok(Self {
            images: ImageService::new(primary, vec![fallback]),
            speech: SpeechService::new(tts, config.elevenlabs.default_voice.clone()),
        })
    }
}

pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/generate-image", post(handlers::generate_image))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .route("/voices", get(handlers::list_voices))
        .route("/plan/narration", post(handlers::narrate_plan))
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
