//! Axum request handlers for the HTTP API.
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::DynamicImage;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::api::routes::AppState;
use crate::api::types::{HealthResponse, ScoreRequest, ScoreResponse};
use crate::error::{AppError, AppResult};
use crate::model::AestheticModel;
use crate::scoring::{
    generate_reasoning, score_balance, score_color_harmony, score_composition, score_with_clip,
    to_score, AestheticOutcome,
};

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model: state.model.model_id().to_string(),
        device: state.model.device(),
    })
}

pub async fn score(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Json<ScoreResponse>, AppError> {
    let span = tracing::info_span!("score", request_id = %Uuid::new_v4());
    async move {
        let Json(request) = payload.map_err(|e| AppError::Request(e.body_text()))?;
        score_layout(state.model.as_ref(), &request).await.map(Json)
    }
    .instrument(span)
    .await
}

/// Run the full scoring pipeline for one request.
pub async fn score_layout(model: &dyn AestheticModel, request: &ScoreRequest) -> AppResult<ScoreResponse> {
    let outcome = match request.image.as_deref() {
        Some(encoded) => {
            let image = decode_image(encoded)?;
            score_with_clip(model, &image).await
        }
        None => AestheticOutcome::Fallback { reason: "no image provided".to_string() },
    };
    if let AestheticOutcome::Fallback { reason } = &outcome {
        tracing::info!(fallback = true, "Using fallback aesthetic score: {}", reason);
    }
    let aesthetic = outcome.score();

    let composition = score_composition(&request.variant);
    let color_harmony = score_color_harmony(&request.variant);
    let balance = score_balance(&request.variant, &request.event_data);
    let reasoning = generate_reasoning(aesthetic, composition, color_harmony, balance);

    let response = ScoreResponse {
        aesthetic_score: to_score(aesthetic),
        composition_score: composition.min(100),
        color_harmony_score: color_harmony.min(100),
        balance_score: balance.min(100),
        reasoning,
    };
    tracing::info!(
        aesthetic = response.aesthetic_score,
        composition = response.composition_score,
        color_harmony = response.color_harmony_score,
        balance = response.balance_score,
        "Scored layout"
    );
    Ok(response)
}

/// Decode a base64 screenshot, optionally wrapped in a `data:` URL.
pub fn decode_image(encoded: &str) -> AppResult<DynamicImage> {
    let payload = match encoded.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };
    let cleaned: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = BASE64.decode(cleaned.as_bytes())?;
    Ok(image::load_from_memory(&bytes)?)
}
