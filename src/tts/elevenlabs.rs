use futures::{Stream, StreamExt};
use reqwest::{header, Client, Url};
use serde::Serialize;

use crate::config::ElevenLabsSettings;

const XI_API_KEY_HEADER: &str = "xi-api-key";

#[derive(thiserror::Error, Debug)]
pub enum ElevenLabsError {
    #[error("Invalid ElevenLabs endpoint: {0}")]
    InvalidUrl(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("ElevenLabs API error {status}: {body}")]
    Api { status: u16, body: String },
}

pub struct ElevenLabsClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

impl ElevenLabsClient {
    pub fn new(client: Client, api_key: String, settings: &ElevenLabsSettings) -> Self {
        Self {
            client,
            api_key,
            model: settings.model.clone(),
            api_base: settings.api_base.clone(),
        }
    }

    fn speech_url(&self, voice_id: &str) -> Result<Url, ElevenLabsError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| ElevenLabsError::InvalidUrl(format!("{}: {}", self.api_base, e)))?;
        url.path_segments_mut()
            .map_err(|_| ElevenLabsError::InvalidUrl(self.api_base.clone()))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", voice_id]);
        Ok(url)
    }

    pub async fn convert(&self, voice_id: &str, text: &str) -> Result<Vec<u8>, ElevenLabsError> {
        let url = self.speech_url(voice_id)?;

        tracing::debug!(voice_id, model = %self.model, text_len = text.len(), "Requesting speech");

        let response = self
            .client
            .post(url)
            .header(XI_API_KEY_HEADER, &self.api_key)
            .header(header::ACCEPT, "audio/mpeg")
            .json(&TextToSpeechRequest {
                text,
                model_id: &self.model,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(ElevenLabsError::Api { status, body });
        }

        let audio = collect_chunks(response.bytes_stream()).await?;
        tracing::debug!(bytes = audio.len(), "Speech stream drained");
        Ok(audio)
    }
}

/// Drains a chunked body into one buffer, preserving arrival order.
pub async fn collect_chunks<S, B, E>(stream: S) -> Result<Vec<u8>, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    futures::pin_mut!(stream);

    let mut buffer = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(chunk?.as_ref());
    }

    Ok(buffer)
}
