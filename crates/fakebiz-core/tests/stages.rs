mod common;

use std::time::Duration;

use common::{BRAND_MARKDOWN, FakeTextModel, ScriptedImages, png_bytes};
use fakebiz_core::inference::InferenceError;
use fakebiz_core::prompt::BRAND_SECTIONS;
use fakebiz_core::stage::{
    IMAGE_FAILURE_MESSAGE, MISSING_BRAND_GUIDANCE, generate_brand, generate_landing_page,
    generate_logo,
};
use fakebiz_core::{
    BrandRequest, LogoRequest, RetryPolicy, SessionState, StageKind, StageOutcome, StageState,
    Tone,
};

fn coffee_request() -> BrandRequest {
    BrandRequest {
        business_type: "Luxury coffee subscription".to_string(),
        tone: Tone::Luxury,
        audience: "Millennial professionals".to_string(),
    }
}

#[tokio::test]
async fn test_end_to_end_coffee_brand() {
    let text = FakeTextModel::default();
    let images = ScriptedImages::new(vec![Ok(png_bytes(512, 512))]);
    let mut session = SessionState::new();
    let request = coffee_request();

    // Brand
    let brand = generate_brand(&mut session, &text, &request)
        .await
        .success()
        .expect("brand generation succeeds");
    assert_eq!(brand.markdown, BRAND_MARKDOWN.trim());
    assert_eq!(session.brand_record(), brand.markdown);

    let mut cursor = 0;
    for heading in BRAND_SECTIONS {
        let offset = brand.markdown[cursor..]
            .find(heading)
            .unwrap_or_else(|| panic!("missing or out of order: {heading}"));
        cursor += offset + heading.len();
    }
    for section in brand.markdown.split("### ").skip(1) {
        let body = section.split_once('\n').map(|(_, body)| body.trim()).unwrap_or("");
        assert!(!body.is_empty(), "empty section: {section}");
    }

    // Logo
    let logo = generate_logo(
        &mut session,
        &images,
        &LogoRequest::from(&request),
        &RetryPolicy::default(),
    )
    .await
    .success()
    .expect("logo generation succeeds");
    assert_eq!(logo.dimensions(), (512, 512));
    assert_eq!(logo.brand_name, "Velour Roast Co.");
    assert_eq!(logo.caption(), "Logo for Velour Roast Co.");
    assert_eq!(images.call_count(), 1);
    assert!(images.prompts()[0].contains("'Velour Roast Co.'"));
    assert!(images.prompts()[0].contains("luxury brand"));
    assert!(images.prompts()[0].contains("luxury coffee subscription industry"));

    // Landing page
    let page = generate_landing_page(&mut session, &text)
        .await
        .success()
        .expect("landing page generation succeeds");
    assert!(page.html.starts_with("<!DOCTYPE html>"));
    assert!(page.html.ends_with("</html>"));
    assert!(page.html.contains("Velour Roast Co."));
    assert!(page.download_link().contains(r#"download="fake_business.html""#));

    for stage in StageKind::ALL {
        assert_eq!(session.stage_state(stage), StageState::Succeeded);
    }
}

#[tokio::test]
async fn test_logo_prompt_carries_extracted_name() {
    let text = FakeTextModel::default();
    let images = ScriptedImages::new(vec![Ok(png_bytes(32, 32))]);
    let mut session = SessionState::new();
    generate_brand(&mut session, &text, &coffee_request()).await;

    // Overwrite the brand through a second, differently named generation.
    let record = "### Brand Name\nBrand Name: Acme Roasters\nBrand Name: Ignored";
    let named = FakeNamed(record);
    generate_brand(&mut session, &named, &coffee_request()).await;

    generate_logo(
        &mut session,
        &images,
        &LogoRequest::default(),
        &RetryPolicy::default(),
    )
    .await;

    assert!(images.prompts()[0].contains("Acme Roasters"));
    assert!(!images.prompts()[0].contains("Ignored"));
}

#[tokio::test]
async fn test_downstream_stages_skip_without_brand_record() {
    let text = FakeTextModel::default();
    let images = ScriptedImages::new(vec![Ok(png_bytes(8, 8))]);
    let mut session = SessionState::new();

    let logo = generate_logo(
        &mut session,
        &images,
        &LogoRequest::default(),
        &RetryPolicy::default(),
    )
    .await;
    let page = generate_landing_page(&mut session, &text).await;

    match logo {
        StageOutcome::Skipped(guidance) => {
            assert_eq!(guidance.stage, StageKind::Logo);
            assert_eq!(guidance.message, MISSING_BRAND_GUIDANCE);
        }
        other => panic!("expected skip, got {other:?}"),
    }
    assert!(matches!(page, StageOutcome::Skipped(_)));
    assert_eq!(images.call_count(), 0);
    assert_eq!(text.request_count(), 0);
    assert_eq!(session.stage_state(StageKind::Logo), StageState::Idle);
}

#[tokio::test]
async fn test_text_failure_keeps_previous_record() {
    let text = FakeTextModel::default();
    let mut session = SessionState::new();
    generate_brand(&mut session, &text, &coffee_request()).await;
    let before = session.brand_record().to_string();

    let broken = FakeTextModel::failing(InferenceError::Http {
        status: 500,
        message: "upstream exploded".into(),
    });
    let outcome = generate_brand(&mut session, &broken, &coffee_request()).await;

    match outcome {
        StageOutcome::Failure(failure) => {
            assert_eq!(failure.stage, StageKind::Brand);
            assert_eq!(failure.message, "Failed to generate brand identity.");
            assert!(failure.detail.unwrap().contains("upstream exploded"));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(session.brand_record(), before);
    assert_eq!(session.stage_state(StageKind::Brand), StageState::Idle);
    // Not retried.
    assert_eq!(broken.request_count(), 1);

    broken.recover();
    assert!(
        generate_brand(&mut session, &broken, &coffee_request())
            .await
            .is_success()
    );
}

#[tokio::test]
async fn test_first_brand_failure_leaves_session_empty() {
    let broken = FakeTextModel::failing(InferenceError::Transport("dns".into()));
    let mut session = SessionState::new();

    let outcome = generate_brand(&mut session, &broken, &coffee_request()).await;

    assert!(matches!(outcome, StageOutcome::Failure(_)));
    assert!(!session.has_brand_record());
}

#[tokio::test(start_paused = true)]
async fn test_logo_failure_hides_raw_detail() {
    let text = FakeTextModel::default();
    let images = ScriptedImages::new(vec![
        Err(InferenceError::Transport("secret internals".into())),
        Ok(b"garbage".to_vec()),
    ]);
    let mut session = SessionState::new();
    generate_brand(&mut session, &text, &coffee_request()).await;

    let outcome = generate_logo(
        &mut session,
        &images,
        &LogoRequest::default(),
        &RetryPolicy::new(2, Duration::from_secs(1)),
    )
    .await;

    match outcome {
        StageOutcome::Failure(failure) => {
            assert_eq!(failure.stage, StageKind::Logo);
            assert_eq!(failure.message, IMAGE_FAILURE_MESSAGE);
            assert!(failure.detail.is_none());
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(images.call_count(), 2);
    assert!(session.has_brand_record());
}

#[tokio::test]
async fn test_landing_page_is_not_cached() {
    let text = FakeTextModel::default();
    let mut session = SessionState::new();
    generate_brand(&mut session, &text, &coffee_request()).await;

    let first = generate_landing_page(&mut session, &text).await.success().unwrap();
    let second = generate_landing_page(&mut session, &text).await.success().unwrap();

    // One brand request plus two independent page requests.
    assert_eq!(text.request_count(), 3);
    assert_ne!(first, second);

    let requests = text.requests();
    assert_eq!(requests[1], requests[2]);
    assert!(requests[1][1].content.contains(session.brand_record()));
}

/// Text endpoint that always answers with one fixed record.
struct FakeNamed(&'static str);

#[async_trait::async_trait]
impl fakebiz_core::TextGenerator for FakeNamed {
    async fn chat_completion(
        &self,
        _messages: &[fakebiz_core::inference::ChatMessage],
        _params: &fakebiz_core::inference::ChatParameters,
    ) -> Result<String, InferenceError> {
        Ok(self.0.to_string())
    }
}
