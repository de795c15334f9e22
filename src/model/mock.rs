//! In-process model provider for tests and offline runs.
use async_trait::async_trait;
use image::DynamicImage;

use crate::error::{AppError, AppResult};
use crate::model::{AestheticModel, Device, DEFAULT_MODEL_ID};

/// Returns the same logits for every image, or fails every call.
pub struct FixedLogits {
    logits: Option<Vec<f32>>,
}

impl FixedLogits {
    pub fn new(logits: Vec<f32>) -> Self {
        FixedLogits { logits: Some(logits) }
    }

    pub fn failing() -> Self {
        FixedLogits { logits: None }
    }
}

#[async_trait]
impl AestheticModel for FixedLogits {
    async fn compare(&self, _image: &DynamicImage, _prompts: &[&str]) -> AppResult<Vec<f32>> {
        self.logits.clone()
            .ok_or_else(|| AppError::Model("inference unavailable".to_string()))
    }

    fn model_id(&self) -> &str {
        DEFAULT_MODEL_ID
    }

    fn device(&self) -> Device {
        Device::Cpu
    }
}
