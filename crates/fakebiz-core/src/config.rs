//! Configuration models.
//!
//! `config.toml` holds non-secret settings; `secret.json` holds the
//! inference credential. Loading lives in `fakebiz-infrastructure`.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/hf-inference";
pub const DEFAULT_TEXT_MODEL: &str = "HuggingFaceH4/zephyr-7b-beta";
pub const DEFAULT_IMAGE_MODEL: &str = "runwayml/stable-diffusion-v1-5";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;

/// Root of `config.toml`. Every key is optional.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub inference: InferenceConfig,
    pub retry: RetryConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InferenceConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub request_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl InferenceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Retry settings of the image stage.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay_secs: DEFAULT_BASE_DELAY.as_secs(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_secs(self.base_delay_secs))
    }
}

/// Root configuration structure for secret.json
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SecretConfig {
    #[serde(default)]
    pub huggingface: Option<HuggingFaceConfig>,
}

/// Hugging Face Inference credential
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct HuggingFaceConfig {
    pub api_token: String,
}
