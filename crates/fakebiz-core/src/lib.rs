pub mod brand;
pub mod config;
pub mod error;
pub mod inference;
pub mod prompt;
pub mod retry;
pub mod session;
pub mod stage;

// Re-export common error type
pub use error::FakeBizError;

pub use brand::{BrandRequest, LogoRequest, Tone, extract_brand_name};
pub use inference::{ImageGenerator, TextGenerator};
pub use retry::{RetryPolicy, acquire_image};
pub use session::{SessionState, StageKind, StageState};
pub use stage::{BrandIdentity, LandingPage, Logo, StageOutcome};
