#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use async_trait::async_trait;
use fakebiz_core::extract_brand_name;
use fakebiz_core::inference::{
    ChatMessage, ChatParameters, ImageGenerator, ImageParameters, InferenceError, TextGenerator,
};
use image::{DynamicImage, ImageFormat};
use tokio::time::Instant;

pub const BRAND_MARKDOWN: &str = "\
### Brand Name
Brand Name: Velour Roast Co.

### Tagline
Every morning, a small luxury.

### About Us
Single-origin beans, roasted to order and delivered before you wake.

### Founder Bio
Ines Marlow left a career in finance to chase the perfect espresso.

### Products (3, each with name + description)
1. Aurora Blend - bright Ethiopian notes for early risers.
2. Midnight Reserve - a velvet dark roast.
3. Tasting Flight - four rotating micro-lots every month.

### Customer Reviews (3 short fictional reviews)
- \"Worth every cent.\" - Sam K.
- \"My commute finally smells good.\" - Priya D.
- \"The Midnight Reserve is dangerous.\" - Leo F.
";

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    DynamicImage::new_rgba8(width, height)
        .write_to(&mut buf, ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Image endpoint replaying a fixed script; answers `EmptyResponse` once exhausted.
pub struct ScriptedImages {
    script: Mutex<VecDeque<Result<Vec<u8>, InferenceError>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl ScriptedImages {
    pub fn new(script: Vec<Result<Vec<u8>, InferenceError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

#[async_trait]
impl ImageGenerator for ScriptedImages {
    async fn text_to_image(
        &self,
        prompt: &str,
        _params: &ImageParameters,
    ) -> Result<Vec<u8>, InferenceError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), Instant::now()));
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(InferenceError::EmptyResponse))
    }
}

/// Text endpoint that plays both the branding strategist and the web designer.
#[derive(Default)]
pub struct FakeTextModel {
    requests: Mutex<Vec<Vec<ChatMessage>>>,
    fail_with: Mutex<Option<InferenceError>>,
}

impl FakeTextModel {
    pub fn failing(err: InferenceError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Mutex::new(Some(err)),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
        self.requests.lock().unwrap().clone()
    }

    pub fn recover(&self) {
        *self.fail_with.lock().unwrap() = None;
    }
}

#[async_trait]
impl TextGenerator for FakeTextModel {
    async fn chat_completion(
        &self,
        messages: &[ChatMessage],
        _params: &ChatParameters,
    ) -> Result<String, InferenceError> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(messages.to_vec());
            requests.len()
        };

        if let Some(err) = self.fail_with.lock().unwrap().clone() {
            return Err(err);
        }

        let user = &messages.last().expect("at least one message").content;
        if user.contains("Create a fake business identity") {
            return Ok(format!("\n{BRAND_MARKDOWN}\n"));
        }

        let name = extract_brand_name(user);
        Ok(format!(
            "<!DOCTYPE html>\n<html>\n<head><style>body {{ font-family: serif; }}</style></head>\n\
             <body><h1>{name}</h1><p data-request=\"{count}\">Every morning, a small luxury.</p></body>\n</html>\n"
        ))
    }
}
