//! Retrying image acquisition over an unreliable image endpoint.

use std::time::Duration;

use image::DynamicImage;
use thiserror::Error;
use tracing::{debug, warn};

use crate::inference::{ImageGenerator, ImageParameters, InferenceError};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(5);

/// How many times to try and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Effective attempt budget; never below one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the failed attempt `attempt_index` (0-based).
    pub fn delay_after(&self, attempt_index: u32) -> Duration {
        LinearBackoff::calculate_delay(self.base_delay, attempt_index)
    }
}

/// `base * (attempt_index + 1)`: 5s, 10s, 15s, ... for the default policy.
#[derive(Debug, Clone)]
pub struct LinearBackoff;

impl LinearBackoff {
    pub fn calculate_delay(base: Duration, attempt_index: u32) -> Duration {
        base.saturating_mul(attempt_index.saturating_add(1))
    }
}

/// Any attempt outcome that warrants another try.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RetryableFailure {
    #[error("malformed image payload: {0}")]
    MalformedImage(String),

    #[error("generation failed: {0}")]
    Generation(InferenceError),

    #[error("no image returned")]
    EmptyResult,
}

/// Terminal result of [`acquire_image`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AcquireError {
    #[error("image prompt must not be empty")]
    EmptyPrompt,

    #[error("image generation failed after {attempts} attempts (last: {last})")]
    Exhausted {
        attempts: u32,
        last: RetryableFailure,
    },
}

/// Maps one raw attempt outcome to a decoded image or a retryable failure.
pub fn classify_attempt(
    outcome: Result<Vec<u8>, InferenceError>,
) -> Result<DynamicImage, RetryableFailure> {
    let bytes = match outcome {
        Ok(bytes) if bytes.is_empty() => return Err(RetryableFailure::EmptyResult),
        Ok(bytes) => bytes,
        Err(InferenceError::EmptyResponse) => return Err(RetryableFailure::EmptyResult),
        Err(err) => return Err(RetryableFailure::Generation(err)),
    };

    let image = image::load_from_memory(&bytes)
        .map_err(|err| RetryableFailure::MalformedImage(err.to_string()))?;

    if image.width() == 0 || image.height() == 0 {
        return Err(RetryableFailure::MalformedImage(
            "decoded image has zero size".to_string(),
        ));
    }

    Ok(image)
}

/// Obtains one decoded image for `prompt`, retrying with linear backoff.
///
/// Returns on the first well-formed payload. After `policy.attempts()`
/// consecutive failures returns [`AcquireError::Exhausted`]; the wait after
/// the final attempt is skipped.
pub async fn acquire_image(
    generator: &dyn ImageGenerator,
    prompt: &str,
    params: &ImageParameters,
    policy: &RetryPolicy,
) -> Result<DynamicImage, AcquireError> {
    if prompt.trim().is_empty() {
        return Err(AcquireError::EmptyPrompt);
    }

    let attempts = policy.attempts();
    let mut last = RetryableFailure::EmptyResult;

    for attempt in 0..attempts {
        let outcome = generator.text_to_image(prompt, params).await;
        let payload_size = outcome.as_ref().map(Vec::len).unwrap_or(0);

        match classify_attempt(outcome) {
            Ok(image) => {
                debug!(
                    attempt = attempt + 1,
                    payload_size,
                    width = image.width(),
                    height = image.height(),
                    "Image generation succeeded"
                );
                return Ok(image);
            }
            Err(failure) => {
                warn!(
                    "[Attempt {}] Image generation failed: {}",
                    attempt + 1,
                    failure
                );
                if attempt + 1 < attempts {
                    tokio::time::sleep(policy.delay_after(attempt)).await;
                }
                last = failure;
            }
        }
    }

    Err(AcquireError::Exhausted { attempts, last })
}
