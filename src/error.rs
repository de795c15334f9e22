//! Common error type and result alias.
//!
//! Anything that escapes a handler is turned into a `500` with a JSON
//! `{"error": "..."}` body by the `IntoResponse` impl below.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use crate::api::types::ErrorBody;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid request body: {0}")]
    Request(String),

    #[error("invalid base64 image: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid image data: {0}")]
    Image(#[from] image::ImageError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("model provider error: {0}")]
    Model(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        tracing::error!("Error scoring layout: {}", message);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorBody { error: message })).into_response()
    }
}
