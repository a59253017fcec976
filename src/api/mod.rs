pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::image::Category;
use crate::plan::{FitnessPlan, Section};
use crate::tts::VoiceInfo;

#[derive(Debug)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub category: Category,
}

impl GenerateImageRequest {
    // A `null` body has no fields to read at all.
    pub fn from_json(body: &Value) -> Option<Self> {
        if body.is_null() {
            return None;
        }

        let prompt = body
            .get("prompt")
            .filter(|v| is_truthy(v))
            .map(interpolate)
            .unwrap_or_default();

        Some(Self {
            prompt,
            category: Category::from_type(body.get("type")),
        })
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Renders a value the way a string template would.
fn interpolate(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(interpolate).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

#[derive(Debug, Deserialize)]
pub struct SpeechSynthesisRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub voice: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NarrationRequest {
    pub plan: FitnessPlan,
    #[serde(default)]
    pub section: Section,
}

#[derive(Debug, Serialize)]
pub struct NarrationResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<VoiceInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
