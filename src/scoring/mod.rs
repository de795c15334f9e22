//! Scoring pipeline: CLIP aesthetic score, layout heuristics and reasoning.
pub mod aesthetic;
pub mod heuristics;
pub mod reasoning;

pub use aesthetic::{score_with_clip, AestheticOutcome, AESTHETIC_PROMPTS, FALLBACK_AESTHETIC_SCORE};
pub use heuristics::{score_balance, score_color_harmony, score_composition};
pub use reasoning::generate_reasoning;

/// Clamp to the 0-100 response range, truncating toward zero.
pub fn to_score(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    (value.trunc() as i64).clamp(0, 100) as u32
}
