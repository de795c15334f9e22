//! Thin HTTP client for a CLIP inference backend.
//!
//! - `compare` posts a PNG-encoded image and the prompt texts to `/compare`
//!   and returns the `logits_per_image` row for that image.
//! - `check_backend` pings `/health` so startup can warn about an unreachable backend.
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{DynamicImage, ImageFormat};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::io::Cursor;

use crate::error::{AppError, AppResult};
use crate::model::{AestheticModel, Device};

#[derive(Clone)]
pub struct ClipClient {
    client: Client,
    base_url: String,
    model_id: String,
    device: Device,
}

#[derive(Serialize)]
struct CompareRequest<'a> {
    model: &'a str,
    device: Device,
    image: String,
    texts: &'a [&'a str],
}

#[derive(Deserialize)]
struct CompareResponse {
    logits_per_image: Vec<Vec<f32>>,
}

impl ClipClient {
    pub fn new(base_url: String, model_id: String, device: Device) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        ClipClient { client: Client::new(), base_url: base, model_id, device }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// One `GET /health` round trip; any non-2xx status is an error.
    pub async fn check_backend(&self) -> AppResult<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url)
            .send()
            .await
            .map_err(AppError::HttpClient)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Model(format!("backend health check failed: {:?}", response.status())))
        }
    }

    fn encode_png(image: &DynamicImage) -> AppResult<String> {
        let mut buf = Vec::new();
        image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
        Ok(BASE64.encode(buf))
    }
}

#[async_trait]
impl AestheticModel for ClipClient {
    async fn compare(&self, image: &DynamicImage, prompts: &[&str]) -> AppResult<Vec<f32>> {
        let url = format!("{}/compare", self.base_url);
        tracing::debug!("Comparing image against {} prompts at {}", prompts.len(), url);

        let body = CompareRequest {
            model: &self.model_id,
            device: self.device,
            image: Self::encode_png(image)?,
            texts: prompts,
        };
        let response = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().await.unwrap_or_else(|_| "Unable to read error body".to_string());
            return Err(AppError::Model(format!("compare failed. Status: {}, Body: {}", status, error_body)));
        }

        let parsed: CompareResponse = response.json().await.map_err(AppError::HttpClient)?;
        let row = parsed.logits_per_image.into_iter().next()
            .ok_or_else(|| AppError::Model("empty logits_per_image".to_string()))?;
        if row.len() != prompts.len() {
            return Err(AppError::Model(format!(
                "expected {} logits, got {}", prompts.len(), row.len()
            )));
        }
        Ok(row)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    fn device(&self) -> Device {
        self.device
    }
}
