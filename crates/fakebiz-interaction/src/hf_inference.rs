//! Hugging Face Inference clients - direct REST implementations.
//!
//! Text generation goes through the OpenAI-compatible chat completions route
//! of the inference router; image generation posts a prompt to the model
//! route and receives raw image bytes.

use std::time::Duration;

use async_trait::async_trait;
use fakebiz_core::config::InferenceConfig;
use fakebiz_core::inference::{
    ChatMessage, ChatParameters, ImageGenerator, ImageParameters, InferenceError, TextGenerator,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

fn build_client(timeout: Duration) -> Result<Client, InferenceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| InferenceError::Transport(format!("Failed to build HTTP client: {err}")))
}

fn model_url(base_url: &str, model: &str) -> String {
    format!("{}/models/{}", base_url.trim_end_matches('/'), model)
}

/// Chat-completion client bound to one text model.
#[derive(Clone)]
pub struct HuggingFaceTextClient {
    client: Client,
    api_token: String,
    base_url: String,
    model: String,
}

impl HuggingFaceTextClient {
    pub fn new(api_token: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = InferenceConfig::default();
        Self {
            client: Client::new(),
            api_token: api_token.into(),
            base_url: defaults.base_url,
            model: model.into(),
        }
    }

    pub fn from_config(
        config: &InferenceConfig,
        api_token: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            client: build_client(config.request_timeout())?,
            api_token: api_token.into(),
            base_url: config.base_url.clone(),
            model: config.text_model.clone(),
        })
    }

    /// Overrides the router base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the underlying HTTP client (proxy or TLS settings).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", model_url(&self.base_url, &self.model))
    }

    async fn send_request(
        &self,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, InferenceError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_token)
            .json(body)
            .send()
            .await
            .map_err(|err| {
                InferenceError::Transport(format!("Chat completion request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|err| {
            InferenceError::InvalidResponse(format!("Failed to parse chat completion: {err}"))
        })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceTextClient {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        params: &ChatParameters,
    ) -> Result<String, InferenceError> {
        let request = ChatCompletionRequest::new(&self.model, messages, params);
        tracing::debug!(
            model = %self.model,
            messages = messages.len(),
            max_tokens = params.max_tokens,
            "Sending chat completion"
        );
        self.send_request(&request).await
    }
}

/// Text-to-image client bound to one image model.
#[derive(Clone)]
pub struct HuggingFaceImageClient {
    client: Client,
    api_token: String,
    base_url: String,
    model: String,
}

impl HuggingFaceImageClient {
    pub fn new(api_token: impl Into<String>, model: impl Into<String>) -> Self {
        let defaults = InferenceConfig::default();
        Self {
            client: Client::new(),
            api_token: api_token.into(),
            base_url: defaults.base_url,
            model: model.into(),
        }
    }

    pub fn from_config(
        config: &InferenceConfig,
        api_token: impl Into<String>,
    ) -> Result<Self, InferenceError> {
        Ok(Self {
            client: build_client(config.request_timeout())?,
            api_token: api_token.into(),
            base_url: config.base_url.clone(),
            model: config.image_model.clone(),
        })
    }

    /// Overrides the router base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Replaces the underlying HTTP client (proxy or TLS settings).
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ImageGenerator for HuggingFaceImageClient {
    async fn text_to_image(
        &self,
        prompt: &str,
        params: &ImageParameters,
    ) -> Result<Vec<u8>, InferenceError> {
        let body = TextToImageRequest {
            inputs: prompt,
            parameters: params,
        };

        let response = self
            .client
            .post(model_url(&self.base_url, &self.model))
            .bearer_auth(&self.api_token)
            .header("accept", "image/png")
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                InferenceError::Transport(format!("Text-to-image request failed: {err}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|err| InferenceError::Transport(format!("Failed to read image body: {err}")))?;

        tracing::debug!(
            model = %self.model,
            status = status.as_u16(),
            size = bytes.len(),
            "Text-to-image response received"
        );

        if bytes.is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(bytes.to_vec())
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn new(model: &'a str, messages: &'a [ChatMessage], params: &ChatParameters) -> Self {
        Self {
            model,
            messages,
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            top_p: params.top_p,
        }
    }
}

#[derive(Serialize)]
struct TextToImageRequest<'a> {
    inputs: &'a str,
    parameters: &'a ImageParameters,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// The router answers either `{"error": "..."}` or `{"error": {"message": "..."}}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Text(String),
    Structured { message: String },
}

fn extract_text_response(response: ChatCompletionResponse) -> Result<String, InferenceError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(InferenceError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> InferenceError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| match wrapper.error {
            ErrorBody::Text(message) | ErrorBody::Structured { message } => message,
        })
        .unwrap_or(body);

    InferenceError::Http {
        status: status.as_u16(),
        message,
    }
}
