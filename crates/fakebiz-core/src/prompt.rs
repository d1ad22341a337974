//! Outbound prompt templates for the three stages.

use crate::brand::{BrandRequest, LogoRequest};
use crate::inference::{ChatMessage, ChatParameters};

const BRAND_SYSTEM_PROMPT: &str = "You are a creative branding strategist AI.";
const LANDING_PAGE_SYSTEM_PROMPT: &str = "You are an expert web designer.";

/// Section headings requested from the brand stage, in order.
pub const BRAND_SECTIONS: [&str; 6] = [
    "### Brand Name",
    "### Tagline",
    "### About Us",
    "### Founder Bio",
    "### Products (3, each with name + description)",
    "### Customer Reviews (3 short fictional reviews)",
];

/// Sections every generated landing page must contain.
pub const LANDING_PAGE_CHECKLIST: [&str; 4] = [
    "Brand name & tagline",
    "Product section",
    "About/founder blurb",
    "Fake testimonials",
];

pub const BRAND_PARAMETERS: ChatParameters = ChatParameters {
    max_tokens: 800,
    temperature: 0.9,
    top_p: Some(0.95),
};

pub const LANDING_PAGE_PARAMETERS: ChatParameters = ChatParameters {
    max_tokens: 1000,
    temperature: 0.85,
    top_p: None,
};

pub fn brand_messages(request: &BrandRequest) -> Vec<ChatMessage> {
    let user = format!(
        "Create a fake business identity:\n\n\
         - Industry: {}\n\
         - Tone: {}\n\
         - Target Audience: {}\n\n\
         Include markdown sections for:\n{}\n",
        request.business_type,
        request.tone,
        request.audience,
        BRAND_SECTIONS.join("\n"),
    );

    vec![ChatMessage::system(BRAND_SYSTEM_PROMPT), ChatMessage::user(user)]
}

/// Image prompt for the logo. Tone and industry are lower-cased.
pub fn logo_prompt(brand_name: &str, request: &LogoRequest) -> String {
    format!(
        "Minimalist modern logo for a {} brand named '{}' in the {} industry.",
        request.tone.label().to_lowercase(),
        brand_name,
        request.business_type.to_lowercase(),
    )
}

/// Embeds the brand record verbatim.
pub fn landing_page_messages(brand_record: &str) -> Vec<ChatMessage> {
    let checklist: Vec<String> = LANDING_PAGE_CHECKLIST
        .iter()
        .map(|item| format!("- {item}"))
        .collect();

    let user = format!(
        "Create an HTML + CSS landing page based on this fake brand:\n\n\
         {brand_record}\n\n\
         The page should include:\n{}\n\n\
         Use clean, modern styling. Return only HTML with embedded CSS.\n",
        checklist.join("\n"),
    );

    vec![
        ChatMessage::system(LANDING_PAGE_SYSTEM_PROMPT),
        ChatMessage::user(user),
    ]
}
