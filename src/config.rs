//! Env-driven configuration for the scoring service and CLI.
//!
//! Values are read from the process environment; `dotenv` is loaded on demand
//! by the binaries. Defaults are provided for convenience during development.
use std::env;

use crate::error::{AppError, AppResult};

pub const DEFAULT_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub struct Config {
    pub api_host: String,
    pub api_port: String,
    pub clip_url: String,
    pub clip_model: String,
    pub scorer_device: String,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn dotenv_load() {
        dotenv::dotenv().ok();
    }

    pub fn new() -> AppResult<Self> {
        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(raw) => raw.trim().parse::<usize>().map_err(|e| {
                AppError::Config(format!("MAX_BODY_BYTES must be a byte count, got '{}': {}", raw, e))
            })?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };
        Ok(Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            api_port: env::var("API_PORT").unwrap_or_else(|_| "5000".to_string()),
            clip_url: env::var("CLIP_URL").unwrap_or_else(|_| "http://localhost:8000".to_string()),
            clip_model: env::var("CLIP_MODEL").unwrap_or_else(|_| "CLIP-ViT-B/32".to_string()),
            scorer_device: env::var("SCORER_DEVICE").unwrap_or_else(|_| "auto".to_string()),
            max_body_bytes,
        })
    }

    /// Base URL of a running scoring server, for clients. Independent of the
    /// server-only settings validated by `new`.
    pub fn scorer_url() -> String {
        env::var("SCORER_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
    }

    pub fn print_env_vars() {
        for key in ["API_HOST", "API_PORT", "CLIP_URL", "CLIP_MODEL", "SCORER_DEVICE", "MAX_BODY_BYTES"] {
            println!("{}: {}", key, env::var(key).unwrap_or_else(|_| "<unset>".to_string()));
        }
    }
}
