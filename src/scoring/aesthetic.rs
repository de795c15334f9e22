//! CLIP-backed aesthetic score.
//!
//! The image is compared against a fixed set of positive and negative prompts;
//! the score is the share of softmax mass landing on the positive ones.
use image::DynamicImage;

use crate::model::AestheticModel;

pub const AESTHETIC_PROMPTS: [&str; 5] = [
    "a beautiful, well-designed, professional layout",
    "an aesthetically pleasing, balanced composition",
    "a harmonious, visually appealing design",
    "a cluttered, unbalanced, poorly designed layout",
    "an unappealing, messy composition",
];

/// Number of leading entries in `AESTHETIC_PROMPTS` that are positive.
pub const POSITIVE_PROMPTS: usize = 3;

pub const FALLBACK_AESTHETIC_SCORE: f64 = 75.0;

#[derive(Debug, Clone, PartialEq)]
pub enum AestheticOutcome {
    Computed(f64),
    Fallback { reason: String },
}

impl AestheticOutcome {
    pub fn score(&self) -> f64 {
        match self {
            AestheticOutcome::Computed(score) => *score,
            AestheticOutcome::Fallback { .. } => FALLBACK_AESTHETIC_SCORE,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AestheticOutcome::Fallback { .. })
    }
}

pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Positive share of the softmax over `logits`, scaled to 0-100.
pub fn preference_score(logits: &[f32]) -> Option<f64> {
    if logits.len() != AESTHETIC_PROMPTS.len() {
        return None;
    }
    let probs = softmax(logits);
    let positive: f64 = probs[..POSITIVE_PROMPTS].iter().sum();
    let negative: f64 = probs[POSITIVE_PROMPTS..].iter().sum();
    let score = positive / (positive + negative) * 100.0;
    score.is_finite().then_some(score)
}

pub async fn score_with_clip(model: &dyn AestheticModel, image: &DynamicImage) -> AestheticOutcome {
    let logits = match model.compare(image, &AESTHETIC_PROMPTS).await {
        Ok(logits) => logits,
        Err(e) => {
            tracing::warn!("Error in CLIP scoring: {}", e);
            return AestheticOutcome::Fallback { reason: e.to_string() };
        }
    };
    match preference_score(&logits) {
        Some(score) => AestheticOutcome::Computed(score),
        None => {
            let reason = format!("unusable logits from {}: {:?}", model.model_id(), logits);
            tracing::warn!("Error in CLIP scoring: {}", reason);
            AestheticOutcome::Fallback { reason }
        }
    }
}
