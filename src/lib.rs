//! Layout aesthetics scoring service library
//!
//! Modules:
//! - `api`: Axum HTTP handlers, wire types and router setup used by the binary.
//! - `model`: Model provider trait, the CLIP backend client and a test double.
//! - `scoring`: CLIP aesthetic score, layout heuristics and reasoning text.
//! - `config`: Env-driven configuration loader.
//! - `error`: Common error type and alias.
//!
//! Re-exports are provided for common types: `Config`, `ClipClient`,
//! `AestheticModel`, `ScoreRequest` and `ScoreResponse`.
pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod scoring;

pub use api::types::{ScoreRequest, ScoreResponse};
pub use config::Config;
pub use model::client::ClipClient;
pub use model::AestheticModel;
