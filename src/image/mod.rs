pub mod gemini;
pub mod pollinations;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::AppError;

pub use gemini::GeminiImageClient;
pub use pollinations::PollinationsStrategy;

const EXERCISE_STOCK_PHOTO: &str =
    "https://images.unsplash.com/photo-1571019613454-1cb2f99b2d8b?w=600&q=80";
const MEAL_STOCK_PHOTO: &str =
    "https://images.unsplash.com/photo-1512621776951-a57141f2eefd?w=600&q=80";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Category {
    #[default]
    Exercise,
    Meal,
}

impl Category {
    /// Absent means exercise; any other value, `null` included, gets the food framing.
    pub fn from_type(value: Option<&serde_json::Value>) -> Self {
        match value {
            None => Category::Exercise,
            Some(v) if v.as_str() == Some("exercise") => Category::Exercise,
            Some(_) => Category::Meal,
        }
    }

    pub fn stock_photo_url(self) -> &'static str {
        match self {
            Category::Exercise => EXERCISE_STOCK_PHOTO,
            Category::Meal => MEAL_STOCK_PHOTO,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ImageRequest {
    subject: String,
    category: Category,
}

impl ImageRequest {
    pub fn new(subject: impl Into<String>, category: Category) -> Result<Self, AppError> {
        let subject = subject.into();
        if subject.is_empty() {
            return Err(AppError::BadRequest("Prompt is required".into()));
        }
        Ok(Self { subject, category })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMethod {
    #[serde(rename = "gemini-sdk")]
    PrimaryModel,
    #[serde(rename = "pollinations")]
    FallbackService,
    #[serde(rename = "static-fallback")]
    StaticFallback,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResult {
    pub success: bool,
    pub method: ImageMethod,
    pub image_url: String,
}

impl ImageResult {
    /// Last-resort answer. Always the exercise photo, whatever was requested.
    pub fn static_fallback() -> Self {
        Self {
            success: true,
            method: ImageMethod::StaticFallback,
            image_url: Category::Exercise.stock_photo_url().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Produced(String),
    Declined(String),
}

#[async_trait]
pub trait ImageStrategy: Send + Sync {
    fn method(&self) -> ImageMethod;

    async fn attempt(&self, request: &ImageRequest) -> StageOutcome;
}

pub struct ImageService {
    primary: Option<Arc<dyn ImageStrategy>>,
    fallbacks: Vec<Arc<dyn ImageStrategy>>,
}

impl ImageService {
    pub fn new(
        primary: Option<Arc<dyn ImageStrategy>>,
        fallbacks: Vec<Arc<dyn ImageStrategy>>,
    ) -> Self {
        Self { primary, fallbacks }
    }

    pub async fn generate(&self, request: &ImageRequest) -> Result<ImageResult, AppError> {
        let primary = self
            .primary
            .as_ref()
            .ok_or_else(|| AppError::NotConfigured("Gemini API key missing".into()))?;

        for stage in std::iter::once(primary).chain(self.fallbacks.iter()) {
            let method = stage.method();
            tracing::info!(?method, category = ?request.category(), "Generating image");

            match stage.attempt(request).await {
                StageOutcome::Produced(image_url) => {
                    tracing::info!(?method, "Image stage succeeded");
                    return Ok(ImageResult {
                        success: true,
                        method,
                        image_url,
                    });
                }
                StageOutcome::Declined(reason) => {
                    tracing::warn!(?method, %reason, "Image stage declined, moving on");
                }
            }
        }

        tracing::error!("Every image stage declined, using static fallback");
        Ok(ImageResult::static_fallback())
    }
}
