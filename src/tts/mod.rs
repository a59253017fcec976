pub mod elevenlabs;
pub mod voice;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Serialize;

use crate::error::AppError;

pub use elevenlabs::ElevenLabsClient;
pub use voice::VoiceInfo;

#[derive(Debug, Clone)]
pub struct SpeechRequest {
    text: String,
    voice_id: String,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>, voice_id: impl Into<String>) -> Result<Self, AppError> {
        let text = text.into();
        if text.is_empty() {
            return Err(AppError::BadRequest("No text provided".into()));
        }
        Ok(Self {
            text,
            voice_id: voice_id.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechResult {
    pub audio_url: String,
}

pub struct SpeechService {
    client: Option<ElevenLabsClient>,
    default_voice: String,
}

impl SpeechService {
    pub fn new(client: Option<ElevenLabsClient>, default_voice: impl Into<String>) -> Self {
        Self {
            client,
            default_voice: default_voice.into(),
        }
    }

    pub fn default_voice(&self) -> &str {
        &self.default_voice
    }

    pub async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechResult, AppError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Missing ElevenLabs API key".into()))?;

        tracing::info!(voice_id = %request.voice_id, "Synthesizing speech");

        let audio = client
            .convert(&request.voice_id, &request.text)
            .await
            .map_err(|e| AppError::SpeechFailed {
                details: e.to_string(),
            })?;

        Ok(SpeechResult {
            audio_url: format!("data:audio/mp3;base64,{}", BASE64.encode(&audio)),
        })
    }

    pub fn list_voices(&self) -> Vec<VoiceInfo> {
        voice::catalog(&self.default_voice)
    }
}
