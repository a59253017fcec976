//! Gemini image model client.
//!
//! Sends a single `generateContent` call and looks for an inline image
//! part in the first candidate.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Category, ImageMethod, ImageRequest, ImageStrategy, StageOutcome};
use crate::config::GeminiSettings;

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(thiserror::Error, Debug)]
pub enum GeminiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Gemini API error {status}: {body}")]
    Api { status: u16, body: String },
}

pub struct GeminiImageClient {
    client: Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiImageClient {
    pub fn new(client: Client, api_key: String, settings: &GeminiSettings) -> Self {
        Self {
            client,
            api_key,
            model: settings.model.clone(),
            api_base: settings.api_base.trim_end_matches('/').to_string(),
        }
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    pub async fn generate_image(&self, prompt: &str) -> Result<Option<String>, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Sending request to Gemini");

        let response = self
            .client
            .post(self.api_url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Api { status, body });
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.first_inline_image().map(|inline| inline.data.clone()))
    }
}

#[async_trait]
impl ImageStrategy for GeminiImageClient {
    fn method(&self) -> ImageMethod {
        ImageMethod::PrimaryModel
    }

    async fn attempt(&self, request: &ImageRequest) -> StageOutcome {
        match self.generate_image(&primary_prompt(request)).await {
            Ok(Some(data)) => StageOutcome::Produced(format!("data:image/png;base64,{}", data)),
            Ok(None) => StageOutcome::Declined("response carried no inline image".into()),
            Err(e) => StageOutcome::Declined(e.to_string()),
        }
    }
}

pub fn primary_prompt(request: &ImageRequest) -> String {
    match request.category() {
        Category::Exercise => format!(
            "Professional fitness photograph: {}. Realistic lighting, gym or home environment, proper form.",
            request.subject()
        ),
        Category::Meal => format!(
            "Professional food photograph: {}. Appetizing, clean background, vivid colors.",
            request.subject()
        ),
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    data: String,
}

impl GenerateContentResponse {
    fn first_inline_image(&self) -> Option<&InlineData> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .find_map(|part| part.inline_data.as_ref())
            .filter(|inline| !inline.data.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MODEL_PATH: &str = "/models/gemini-2.5-flash-image:generateContent";

    fn client_for(server: &MockServer) -> GeminiImageClient {
        let settings = GeminiSettings {
            api_key: Some("test-key".into()),
            model: "gemini-2.5-flash-image".into(),
            api_base: server.uri(),
        };
        GeminiImageClient::new(Client::new(), "test-key".into(), &settings)
    }

    fn squat() -> ImageRequest {
        ImageRequest::new("Goblet squat", Category::Exercise).unwrap()
    }

    #[test]
    fn prompt_framing() {
        assert!(primary_prompt(&squat()).starts_with("Professional fitness photograph: Goblet squat."));
        let meal = ImageRequest::new("Greek salad", Category::Meal).unwrap();
        assert_eq!(
            primary_prompt(&meal),
            "Professional food photograph: Greek salad. Appetizing, clean background, vivid colors."
        );
    }

    #[test]
    fn inline_image_lookup_skips_text_parts() {
        let body: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [
                    { "text": "Here is your image" },
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                ]}
            }]
        }))
        .unwrap();
        assert_eq!(body.first_inline_image().unwrap().data, "iVBORw0KGgo=");
    }

    #[test]
    fn inline_image_lookup_handles_empty_shapes() {
        for value in [
            json!({}),
            json!({ "candidates": [] }),
            json!({ "candidates": [{}] }),
            json!({ "candidates": [{ "content": { "parts": [{ "text": "no image" }] } }] }),
            json!({ "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "" } }] } }] }),
        ] {
            let body: GenerateContentResponse = serde_json::from_value(value).unwrap();
            assert!(body.first_inline_image().is_none());
        }
    }

    #[tokio::test]
    async fn inline_image_becomes_png_data_uri() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "contents": [{ "parts": [{ "text": primary_prompt(&squat()) }] }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "QUJD" } }
                ]}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let outcome = client_for(&server).attempt(&squat()).await;
        assert_eq!(
            outcome,
            StageOutcome::Produced("data:image/png;base64,QUJD".into())
        );
    }

    #[tokio::test]
    async fn text_only_response_declines() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{ "content": { "parts": [{ "text": "I cannot draw that" }] } }]
            })))
            .mount(&server)
            .await;

        let outcome = client_for(&server).attempt(&squat()).await;
        assert!(matches!(outcome, StageOutcome::Declined(_)));
    }

    #[tokio::test]
    async fn api_error_carries_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_image("anything")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Api { status: 429, ref body } if body == "quota exceeded"));
    }

    #[tokio::test]
    async fn garbage_body_declines() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(MODEL_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let outcome = client_for(&server).attempt(&squat()).await;
        assert!(matches!(outcome, StageOutcome::Declined(_)));
    }
}
