use async_trait::async_trait;

use super::{Category, ImageMethod, ImageRequest, ImageStrategy, StageOutcome};

pub struct PollinationsStrategy {
    base: String,
}

impl PollinationsStrategy {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn image_url(&self, request: &ImageRequest) -> String {
        format!(
            "{}/prompt/{}?width=512&height=512&nologo=true",
            self.base,
            urlencoding::encode(&fallback_prompt(request))
        )
    }
}

#[async_trait]
impl ImageStrategy for PollinationsStrategy {
    fn method(&self) -> ImageMethod {
        ImageMethod::FallbackService
    }

    async fn attempt(&self, request: &ImageRequest) -> StageOutcome {
        StageOutcome::Produced(self.image_url(request))
    }
}

fn fallback_prompt(request: &ImageRequest) -> String {
    match request.category() {
        Category::Exercise => format!("professional fitness photo, {}", request.subject()),
        Category::Meal => format!("professional food photo, {}", request.subject()),
    }
}
