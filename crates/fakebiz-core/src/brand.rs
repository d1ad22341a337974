//! Brand inputs and brand-record scanning.

use std::fmt;
use std::str::FromStr;

/// Label scanned for by [`extract_brand_name`], compared lower-cased.
pub const BRAND_NAME_LABEL: &str = "brand name:";

/// Returned by [`extract_brand_name`] when the record has no labelled line.
pub const FALLBACK_BRAND_NAME: &str = "Brand";

pub const DEFAULT_BUSINESS_TYPE: &str = "Luxury coffee subscription";
pub const DEFAULT_AUDIENCE: &str = "Millennial professionals";

/// Voice the generated brand should adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tone {
    #[default]
    Luxury,
    Playful,
    EcoConscious,
    Minimalist,
    Edgy,
}

impl Tone {
    /// All tones in menu order.
    pub const ALL: [Tone; 5] = [
        Tone::Luxury,
        Tone::Playful,
        Tone::EcoConscious,
        Tone::Minimalist,
        Tone::Edgy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Luxury => "Luxury",
            Tone::Playful => "Playful",
            Tone::EcoConscious => "Eco-conscious",
            Tone::Minimalist => "Minimalist",
            Tone::Edgy => "Edgy",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Tone::ALL
            .into_iter()
            .find(|tone| tone.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                let choices: Vec<&str> = Tone::ALL.iter().map(Tone::label).collect();
                format!("unknown tone '{wanted}' (expected one of: {})", choices.join(", "))
            })
    }
}

/// Form inputs of the brand stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRequest {
    pub business_type: String,
    pub tone: Tone,
    pub audience: String,
}

impl Default for BrandRequest {
    fn default() -> Self {
        Self {
            business_type: DEFAULT_BUSINESS_TYPE.to_string(),
            tone: Tone::default(),
            audience: DEFAULT_AUDIENCE.to_string(),
        }
    }
}

/// Form inputs of the logo stage, re-supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoRequest {
    pub business_type: String,
    pub tone: Tone,
}

impl Default for LogoRequest {
    fn default() -> Self {
        Self {
            business_type: DEFAULT_BUSINESS_TYPE.to_string(),
            tone: Tone::default(),
        }
    }
}

impl From<&BrandRequest> for LogoRequest {
    fn from(request: &BrandRequest) -> Self {
        Self {
            business_type: request.business_type.clone(),
            tone: request.tone,
        }
    }
}

/// Recovers the brand name from a generated brand record.
///
/// Returns the trimmed text after the first colon of the first line starting
/// (case-insensitively) with `brand name:`, or [`FALLBACK_BRAND_NAME`].
pub fn extract_brand_name(document: &str) -> String {
    document
        .lines()
        .find(|line| {
            line.get(..BRAND_NAME_LABEL.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(BRAND_NAME_LABEL))
        })
        .and_then(|line| line.split_once(':'))
        .map(|(_, rest)| rest.trim().to_string())
        .unwrap_or_else(|| FALLBACK_BRAND_NAME.to_string())
}
