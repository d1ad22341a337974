//! Error types for the FakeBiz application.

use thiserror::Error;

use crate::inference::InferenceError;

/// A shared error type for the entire FakeBiz application.
///
/// Stage functions never return this type; they fold failures into a
/// [`crate::stage::StageOutcome`]. It is used by configuration loading and
/// by the adapters wiring clients together.
#[derive(Error, Debug, Clone)]
pub enum FakeBizError {
    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error (missing credential, bad value)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error reported by a remote inference endpoint
    #[error("Inference error: {0}")]
    Inference(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FakeBizError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for FakeBizError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FakeBizError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FakeBizError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<InferenceError> for FakeBizError {
    fn from(err: InferenceError) -> Self {
        Self::Inference(err.to_string())
    }
}

/// A type alias for `Result<T, FakeBizError>`.
pub type Result<T> = std::result::Result<T, FakeBizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let err: FakeBizError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing").into();
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_toml_error_is_serialization() {
        let err: FakeBizError = toml::from_str::<toml::Value>("= broken").unwrap_err().into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: FakeBizError = serde_json::from_str::<serde_json::Value>("{ nope")
            .unwrap_err()
            .into();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }
}
