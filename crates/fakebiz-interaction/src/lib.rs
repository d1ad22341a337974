//! Remote inference clients and the session facade driving the stages.

pub mod hf_inference;
pub mod studio;

pub use hf_inference::{HuggingFaceImageClient, HuggingFaceTextClient};
pub use studio::Studio;
