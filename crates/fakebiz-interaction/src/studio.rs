//! Studio - one interactive session bound to its inference clients.

use std::sync::Arc;

use fakebiz_core::error::Result;
use fakebiz_core::inference::{ImageGenerator, TextGenerator};
use fakebiz_core::stage::{self, BrandIdentity, LandingPage, Logo, StageOutcome};
use fakebiz_core::{BrandRequest, FakeBizError, LogoRequest, RetryPolicy, SessionState};
use fakebiz_infrastructure::Settings;

use crate::hf_inference::{HuggingFaceImageClient, HuggingFaceTextClient};

/// Owns the session state for the lifetime of one session plus one client
/// handle per model. Stages run one at a time through `&mut self`.
pub struct Studio {
    session: SessionState,
    text: Arc<dyn TextGenerator>,
    images: Arc<dyn ImageGenerator>,
    retry: RetryPolicy,
}

impl Studio {
    pub fn new(
        text: Arc<dyn TextGenerator>,
        images: Arc<dyn ImageGenerator>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            session: SessionState::new(),
            text,
            images,
            retry,
        }
    }

    /// Builds Hugging Face clients from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let inference = &settings.config.inference;
        let text = HuggingFaceTextClient::from_config(inference, settings.api_token.clone())
            .map_err(FakeBizError::from)?;
        let images = HuggingFaceImageClient::from_config(inference, settings.api_token.clone())
            .map_err(FakeBizError::from)?;

        tracing::info!(
            text_model = text.model(),
            image_model = images.model(),
            "Studio session started"
        );

        Ok(Self::new(
            Arc::new(text),
            Arc::new(images),
            settings.config.retry.policy(),
        ))
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub async fn generate_brand(&mut self, request: &BrandRequest) -> StageOutcome<BrandIdentity> {
        stage::generate_brand(&mut self.session, self.text.as_ref(), request).await
    }

    pub async fn generate_logo(&mut self, request: &LogoRequest) -> StageOutcome<Logo> {
        stage::generate_logo(&mut self.session, self.images.as_ref(), request, &self.retry).await
    }

    pub async fn generate_landing_page(&mut self) -> StageOutcome<LandingPage> {
        stage::generate_landing_page(&mut self.session, self.text.as_ref()).await
    }
}
