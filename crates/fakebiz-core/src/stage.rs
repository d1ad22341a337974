//! The three generation stages as explicit functions over [`SessionState`].
//!
//! Every remote call is wrapped here and folded into a [`StageOutcome`];
//! nothing escapes to the caller as an error.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info};

use crate::brand::{BrandRequest, LogoRequest, extract_brand_name};
use crate::error::{FakeBizError, Result};
use crate::inference::{ImageGenerator, ImageParameters, TextGenerator};
use crate::prompt::{self, BRAND_PARAMETERS, LANDING_PAGE_PARAMETERS};
use crate::retry::{RetryPolicy, acquire_image};
use crate::session::{SessionState, StageKind};

pub const MISSING_BRAND_GUIDANCE: &str = "Please generate a brand identity first.";
pub const IMAGE_FAILURE_MESSAGE: &str = "Image generation failed after multiple retries.";
pub const LANDING_PAGE_FILE_NAME: &str = "fake_business.html";

/// Tagged result of one stage invocation.
#[derive(Debug)]
pub enum StageOutcome<T> {
    Success(T),
    Failure(StageFailure),
    /// The stage's precondition is unmet; no remote call was made.
    Skipped(Guidance),
}

impl<T> StageOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn success(self) -> Option<T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }
}

/// User-visible failure of a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageFailure {
    pub stage: StageKind,
    pub message: String,
    /// Full diagnostic text, when the stage exposes it.
    pub detail: Option<String>,
}

/// Informational message for a stage that cannot run yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    pub stage: StageKind,
    pub message: String,
}

impl Guidance {
    fn missing_brand(stage: StageKind) -> Self {
        Self {
            stage,
            message: MISSING_BRAND_GUIDANCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandIdentity {
    pub markdown: String,
}

impl BrandIdentity {
    pub fn brand_name(&self) -> String {
        extract_brand_name(&self.markdown)
    }
}

#[derive(Debug, Clone)]
pub struct Logo {
    pub image: DynamicImage,
    pub brand_name: String,
    pub prompt: String,
}

impl Logo {
    pub fn caption(&self) -> String {
        format!("Logo for {}", self.brand_name)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }

    /// Re-encodes the decoded logo as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Cursor::new(Vec::new());
        self.image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| FakeBizError::internal(format!("Failed to encode logo as PNG: {e}")))?;
        Ok(buf.into_inner())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandingPage {
    pub html: String,
}

impl LandingPage {
    /// HTML anchor that downloads the page from an inline data URI.
    pub fn download_link(&self) -> String {
        let b64 = BASE64_STANDARD.encode(self.html.as_bytes());
        format!(
            r#"<a href="data:text/html;base64,{b64}" download="{LANDING_PAGE_FILE_NAME}">Download HTML</a>"#
        )
    }
}

/// Generates a brand identity and stores it as the session's brand record.
pub async fn generate_brand(
    session: &mut SessionState,
    text: &dyn TextGenerator,
    request: &BrandRequest,
) -> StageOutcome<BrandIdentity> {
    session.begin(StageKind::Brand);
    let messages = prompt::brand_messages(request);

    let markdown = match text.chat_completion(&messages, &BRAND_PARAMETERS).await {
        Ok(raw) => raw.trim().to_string(),
        Err(err) => {
            debug!("[Brand] chat completion failed: {}", err);
            session.finish(StageKind::Brand, false);
            return StageOutcome::Failure(StageFailure {
                stage: StageKind::Brand,
                message: "Failed to generate brand identity.".to_string(),
                detail: Some(err.to_string()),
            });
        }
    };

    if markdown.is_empty() {
        debug!("[Brand] chat completion returned only whitespace");
        session.finish(StageKind::Brand, false);
        return StageOutcome::Failure(StageFailure {
            stage: StageKind::Brand,
            message: "Failed to generate brand identity.".to_string(),
            detail: Some("the model returned an empty completion".to_string()),
        });
    }

    session.replace_brand_record(markdown.clone());
    session.finish(StageKind::Brand, true);
    info!("[Brand] stored brand record ({} bytes)", markdown.len());

    StageOutcome::Success(BrandIdentity { markdown })
}

/// Generates a logo for the brand named in the session's brand record.
pub async fn generate_logo(
    session: &mut SessionState,
    images: &dyn ImageGenerator,
    request: &LogoRequest,
    policy: &RetryPolicy,
) -> StageOutcome<Logo> {
    if !session.has_brand_record() {
        return StageOutcome::Skipped(Guidance::missing_brand(StageKind::Logo));
    }

    let brand_name = extract_brand_name(session.brand_record());
    let prompt = prompt::logo_prompt(&brand_name, request);

    session.begin(StageKind::Logo);
    match acquire_image(images, &prompt, &ImageParameters::default(), policy).await {
        Ok(image) => {
            session.finish(StageKind::Logo, true);
            info!(
                "[Logo] generated {}x{} logo for '{}'",
                image.width(),
                image.height(),
                brand_name
            );
            StageOutcome::Success(Logo {
                image,
                brand_name,
                prompt,
            })
        }
        Err(err) => {
            debug!("[Logo] {}", err);
            session.finish(StageKind::Logo, false);
            StageOutcome::Failure(StageFailure {
                stage: StageKind::Logo,
                message: IMAGE_FAILURE_MESSAGE.to_string(),
                detail: None,
            })
        }
    }
}

/// Renders the session's brand record as an HTML + CSS landing page.
///
/// Each call issues a fresh request; nothing is cached.
pub async fn generate_landing_page(
    session: &mut SessionState,
    text: &dyn TextGenerator,
) -> StageOutcome<LandingPage> {
    if !session.has_brand_record() {
        return StageOutcome::Skipped(Guidance::missing_brand(StageKind::LandingPage));
    }

    let messages = prompt::landing_page_messages(session.brand_record());

    session.begin(StageKind::LandingPage);
    match text.chat_completion(&messages, &LANDING_PAGE_PARAMETERS).await {
        Ok(raw) => {
            session.finish(StageKind::LandingPage, true);
            let html = raw.trim().to_string();
            info!("[LandingPage] received {} bytes of markup", html.len());
            StageOutcome::Success(LandingPage { html })
        }
        Err(err) => {
            debug!("[LandingPage] chat completion failed: {}", err);
            session.finish(StageKind::LandingPage, false);
            StageOutcome::Failure(StageFailure {
                stage: StageKind::LandingPage,
                message: "Failed to generate landing page.".to_string(),
                detail: Some(err.to_string()),
            })
        }
    }
}
