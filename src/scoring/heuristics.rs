//! Rule-based scores over layout metadata.
//!
//! Tables are ordered slices, checked front to back; the first match wins.
use crate::api::types::{EventData, Variant};

pub const DEFAULT_HEURISTIC_SCORE: u32 = 75;

pub const LAYOUT_SCORES: &[(&str, u32)] = &[
    ("centered", 85),
    ("left-aligned", 75),
    ("split", 80),
    ("overlay", 70),
];

/// Gradient colour pairs; both substrings must appear (case-sensitive).
pub const COLOR_PAIRS: &[(&str, &str, u32)] = &[
    ("purple", "pink", 88),
    ("blue", "indigo", 90),
    ("green", "emerald", 87),
];

const BALANCE_BASE: u32 = 70;
const CENTERED_BONUS: u32 = 15;
const TITLE_BONUS: u32 = 10;
const TITLE_MIN_EXCLUSIVE: usize = 10;
const TITLE_MAX_EXCLUSIVE: usize = 40;

pub fn score_composition(variant: &Variant) -> u32 {
    let Some(layout) = variant.layout.as_deref() else {
        return DEFAULT_HEURISTIC_SCORE;
    };
    LAYOUT_SCORES
        .iter()
        .find(|(name, _)| *name == layout)
        .map(|(_, score)| *score)
        .unwrap_or(DEFAULT_HEURISTIC_SCORE)
}

pub fn score_color_harmony(variant: &Variant) -> u32 {
    let gradient = variant.gradient.as_deref().unwrap_or("");
    COLOR_PAIRS
        .iter()
        .find(|(a, b, _)| gradient.contains(a) && gradient.contains(b))
        .map(|(_, _, score)| *score)
        .unwrap_or(DEFAULT_HEURISTIC_SCORE)
}

pub fn score_balance(variant: &Variant, event_data: &EventData) -> u32 {
    let mut score = BALANCE_BASE;
    if variant.layout.as_deref() == Some("centered") {
        score += CENTERED_BONUS;
    }
    let title_len = event_data.title.as_deref().map(|t| t.chars().count()).unwrap_or(0);
    if title_len > TITLE_MIN_EXCLUSIVE && title_len < TITLE_MAX_EXCLUSIVE {
        score += TITLE_BONUS;
    }
    score.min(100)
}
