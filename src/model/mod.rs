//! Model provider seam.
//!
//! The scoring pipeline only needs one capability from a vision-language
//! model: compare an image against a list of text prompts and get back one
//! compatibility logit per prompt. `ClipClient` talks to a CLIP inference
//! backend over HTTP; `mock::FixedLogits` is used in tests.
pub mod client;
pub mod mock;

use async_trait::async_trait;
use image::DynamicImage;
use serde::Serialize;
use std::fmt;
use std::path::Path;

use crate::error::AppResult;

pub const DEFAULT_MODEL_ID: &str = "CLIP-ViT-B/32";

#[async_trait]
pub trait AestheticModel: Send + Sync {
    /// Raw image/text compatibility logits, in the same order as `prompts`.
    async fn compare(&self, image: &DynamicImage, prompts: &[&str]) -> AppResult<Vec<f32>>;

    fn model_id(&self) -> &str;

    fn device(&self) -> Device;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Cpu,
    Gpu,
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Gpu => f.write_str("gpu"),
        }
    }
}

impl Device {
    /// Pick the inference device once at startup.
    ///
    /// `preference` is `auto`, `cpu` or `gpu`. `auto` uses an accelerator when
    /// one is visible; an explicit `gpu` without one falls back to `cpu`.
    pub fn select(preference: &str) -> Device {
        Self::select_with(preference, accelerator_visible())
    }

    fn select_with(preference: &str, accelerator: bool) -> Device {
        match preference.trim().to_ascii_lowercase().as_str() {
            "cpu" => Device::Cpu,
            "gpu" | "cuda" if accelerator => Device::Gpu,
            "gpu" | "cuda" => {
                tracing::warn!("SCORER_DEVICE requests a GPU but none is visible, using cpu");
                Device::Cpu
            }
            "auto" | "" => {
                if accelerator { Device::Gpu } else { Device::Cpu }
            }
            other => {
                tracing::warn!("Unknown SCORER_DEVICE '{}', selecting automatically", other);
                if accelerator { Device::Gpu } else { Device::Cpu }
            }
        }
    }
}

fn accelerator_visible() -> bool {
    if let Ok(devices) = std::env::var("CUDA_VISIBLE_DEVICES") {
        let devices = devices.trim();
        if devices.is_empty() || devices == "-1" {
            return false;
        }
        return true;
    }
    Path::new("/dev/nvidiactl").exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_prefers_accelerator() {
        assert_eq!(Device::select_with("auto", true), Device::Gpu);
        assert_eq!(Device::select_with("auto", false), Device::Cpu);
    }

    #[test]
    fn explicit_gpu_without_accelerator_falls_back() {
        assert_eq!(Device::select_with("gpu", false), Device::Cpu);
        assert_eq!(Device::select_with("GPU", true), Device::Gpu);
    }

    #[test]
    fn explicit_cpu_wins_over_accelerator() {
        assert_eq!(Device::select_with("cpu", true), Device::Cpu);
    }

    #[test]
    fn device_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Device::Gpu).unwrap(), "\"gpu\"");
        assert_eq!(Device::Cpu.to_string(), "cpu");
    }
}
