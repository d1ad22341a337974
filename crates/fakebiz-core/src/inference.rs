//! Boundary to the remote text- and image-generation services.
//!
//! The domain only talks to these traits. Concrete HTTP clients live in
//! `fakebiz-interaction`; tests substitute in-memory implementations.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role tag of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One role-tagged message of a chat completion request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// Sampling parameters for a chat completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChatParameters {
    pub max_tokens: u32,
    pub temperature: f32,
    /// Nucleus sampling; omitted from the request when `None`.
    pub top_p: Option<f32>,
}

/// Parameters for a text-to-image call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageParameters {
    pub guidance_scale: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for ImageParameters {
    fn default() -> Self {
        Self {
            guidance_scale: 7.5,
            width: 512,
            height: 512,
        }
    }
}

/// Error returned by an inference endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferenceError {
    /// The endpoint answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The request never completed (connect, timeout, body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint answered successfully but without usable content.
    #[error("endpoint returned no result")]
    EmptyResponse,

    /// The response body could not be parsed.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A chat-style text-completion endpoint.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends the ordered messages and returns the first completion's text.
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        params: &ChatParameters,
    ) -> Result<String, InferenceError>;
}

/// A text-to-image endpoint returning encoded image bytes.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn text_to_image(
        &self,
        prompt: &str,
        params: &ImageParameters,
    ) -> Result<Vec<u8>, InferenceError>;
}
