//! Secret configuration file storage.
//!
//! Loads the inference credential from `secret.json`, falling back to the
//! `HF_TOKEN` environment variable.

use fakebiz_core::FakeBizError;
use fakebiz_core::config::SecretConfig;
use std::fs;
use std::path::PathBuf;

/// Environment variable consulted when secret.json holds no token.
pub const TOKEN_ENV_VAR: &str = "HF_TOKEN";

/// Errors that can occur during secret storage operations.
#[derive(Debug)]
pub enum SecretStorageError {
    /// Configuration file not found.
    NotFound(PathBuf),
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON parsing error.
    ParseError(serde_json::Error),
    /// Neither the file nor the environment provided a token.
    MissingToken(PathBuf),
}

impl std::fmt::Display for SecretStorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretStorageError::NotFound(path) => {
                write!(f, "Configuration file not found at: {}", path.display())
            }
            SecretStorageError::IoError(e) => write!(f, "I/O error: {}", e),
            SecretStorageError::ParseError(e) => write!(f, "JSON parse error: {}", e),
            SecretStorageError::MissingToken(path) => write!(
                f,
                "No Hugging Face token found in {} or the {} environment variable",
                path.display(),
                TOKEN_ENV_VAR
            ),
        }
    }
}

impl std::error::Error for SecretStorageError {}

impl From<std::io::Error> for SecretStorageError {
    fn from(e: std::io::Error) -> Self {
        SecretStorageError::IoError(e)
    }
}

impl From<serde_json::Error> for SecretStorageError {
    fn from(e: serde_json::Error) -> Self {
        SecretStorageError::ParseError(e)
    }
}

impl From<SecretStorageError> for FakeBizError {
    fn from(e: SecretStorageError) -> Self {
        match e {
            SecretStorageError::IoError(e) => e.into(),
            SecretStorageError::ParseError(e) => e.into(),
            other @ (SecretStorageError::NotFound(_) | SecretStorageError::MissingToken(_)) => {
                FakeBizError::config(other.to_string())
            }
        }
    }
}

/// Storage for secret configuration file (secret.json).
///
/// Read-only: never writes or validates the credential.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the secret configuration from the JSON file.
    pub fn load(&self) -> Result<SecretConfig, SecretStorageError> {
        if !self.path.exists() {
            return Err(SecretStorageError::NotFound(self.path.clone()));
        }

        let content = fs::read_to_string(&self.path)?;
        let config = serde_json::from_str(&content)?;

        Ok(config)
    }

    /// Returns the API token from secret.json, else from [`TOKEN_ENV_VAR`].
    pub fn resolve_token(&self) -> Result<String, SecretStorageError> {
        self.resolve_token_with(|key| std::env::var(key).ok())
    }

    /// Like [`Self::resolve_token`] with an injectable environment lookup.
    ///
    /// A missing file falls through to the environment; an unreadable or
    /// malformed file is reported.
    pub fn resolve_token_with<F>(&self, env_lookup: F) -> Result<String, SecretStorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let from_file = match self.load() {
            Ok(config) => config
                .huggingface
                .map(|hf| hf.api_token.trim().to_string())
                .filter(|token| !token.is_empty()),
            Err(SecretStorageError::NotFound(_)) => None,
            Err(err) => return Err(err),
        };

        if let Some(token) = from_file {
            tracing::debug!("Using Hugging Face token from {}", self.path.display());
            return Ok(token);
        }

        env_lookup(TOKEN_ENV_VAR)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SecretStorageError::MissingToken(self.path.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        let storage = SecretStorage::with_path(file_path.clone());

        match storage.load() {
            Err(SecretStorageError::NotFound(path)) => assert_eq!(path, file_path),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[test]
    fn test_load_valid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ "huggingface": { "api_token": "hf_test123" } }"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let config = storage.load().unwrap();

        assert_eq!(config.huggingface.unwrap().api_token, "hf_test123");
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ invalid json"#).unwrap();

        let storage = SecretStorage::with_path(file_path);

        assert!(matches!(storage.load(), Err(SecretStorageError::ParseError(_))));
        assert!(matches!(
            storage.resolve_token_with(no_env),
            Err(SecretStorageError::ParseError(_))
        ));
    }

    #[test]
    fn test_file_token_wins_over_env() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("secret.json");
        fs::write(&file_path, r#"{ "huggingface": { "api_token": " hf_file " } }"#).unwrap();

        let storage = SecretStorage::with_path(file_path);
        let token = storage
            .resolve_token_with(|_| Some("hf_env".to_string()))
            .unwrap();

        assert_eq!(token, "hf_file");
    }

    #[test]
    fn test_env_fallback_for_missing_file_or_blank_token() {
        let temp_dir = TempDir::new().unwrap();
        let missing = SecretStorage::with_path(temp_dir.path().join("absent.json"));
        let env = |key: &str| (key == TOKEN_ENV_VAR).then(|| "hf_env".to_string());
        assert_eq!(missing.resolve_token_with(env).unwrap(), "hf_env");

        let blank_path = temp_dir.path().join("secret.json");
        fs::write(&blank_path, r#"{ "huggingface": { "api_token": "" } }"#).unwrap();
        let blank = SecretStorage::with_path(blank_path);
        assert_eq!(blank.resolve_token_with(env).unwrap(), "hf_env");
    }

    #[test]
    fn test_missing_everywhere() {
        let temp_dir = TempDir::new().unwrap();
        let storage = SecretStorage::with_path(temp_dir.path().join("secret.json"));

        let err = storage.resolve_token_with(no_env).unwrap_err();
        assert!(matches!(err, SecretStorageError::MissingToken(_)));
        assert!(err.to_string().contains(TOKEN_ENV_VAR));
    }
}
