//! Thin HTTP client for a running scoring server, used by `scorectl`.
use reqwest::Client;
use serde_json::Value;

use crate::api::types::{ErrorBody, ScoreRequest, ScoreResponse};
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct ScorerClient {
    client: Client,
    base_url: String,
}

impl ScorerClient {
    pub fn new(base_url: String) -> Self {
        let base = base_url.trim_end_matches('/').to_string();
        ScorerClient { client: Client::new(), base_url: base }
    }

    /// Fetch `/health` as JSON.
    pub async fn health(&self) -> AppResult<Value> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url)
            .send()
            .await
            .map_err(AppError::HttpClient)?;
        if response.status().is_success() {
            response.json().await.map_err(AppError::HttpClient)
        } else {
            Err(AppError::Model(format!("Health check failed: {:?}", response.status())))
        }
    }

    /// Post a layout to `/score`.
    ///
    /// A `500` carries `{"error": ...}`; its message is surfaced as the error.
    pub async fn score(&self, request: &ScoreRequest) -> AppResult<ScoreResponse> {
        let url = format!("{}/score", self.base_url);
        tracing::debug!("Posting layout to {}", url);
        let response = self.client.post(&url)
            .json(request)
            .send()
            .await
            .map_err(AppError::HttpClient)?;

        if response.status().is_success() {
            return response.json().await.map_err(AppError::HttpClient);
        }
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => format!("Scoring failed. Status: {}", status),
        };
        Err(AppError::Model(message))
    }
}
