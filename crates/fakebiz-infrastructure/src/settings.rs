//! Resolved runtime settings: `config.toml` plus the API token.

use fakebiz_core::config::AppConfig;
use fakebiz_core::error::Result;

use crate::paths::FakeBizPaths;
use crate::storage::{ConfigStorage, SecretStorage};

#[derive(Debug, Clone)]
pub struct Settings {
    pub config: AppConfig,
    pub api_token: String,
}

/// Loads config.toml and the token from the files under `paths`.
///
/// Unreadable files surface as `Io`, malformed ones as `Serialization`, and a
/// missing token as `Config`.
pub fn load_settings(paths: &FakeBizPaths) -> Result<Settings> {
    let config = ConfigStorage::new(paths.config_file()).load()?;
    let api_token = SecretStorage::with_path(paths.secret_file()).resolve_token()?;

    tracing::info!(
        text_model = %config.inference.text_model,
        image_model = %config.inference.image_model,
        "Loaded settings from {}",
        paths.config_dir().display()
    );

    Ok(Settings { config, api_token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_settings_from_files() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FakeBizPaths::new(Some(temp_dir.path())).unwrap();
        fs::write(paths.config_file(), "[retry]\nmax_attempts = 3\n").unwrap();
        fs::write(paths.secret_file(), r#"{ "huggingface": { "api_token": "hf_abc" } }"#).unwrap();

        let settings = load_settings(&paths).unwrap();

        assert_eq!(settings.api_token, "hf_abc");
        assert_eq!(settings.config.retry.max_attempts, 3);
    }

    #[test]
    fn test_malformed_config_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FakeBizPaths::new(Some(temp_dir.path())).unwrap();
        fs::write(paths.config_file(), "retry = [").unwrap();

        let err = load_settings(&paths).unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_malformed_secret_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FakeBizPaths::new(Some(temp_dir.path())).unwrap();
        fs::write(paths.secret_file(), r#"{ "huggingface": "#).unwrap();

        let err = load_settings(&paths).unwrap_err();
        assert!(err.is_serialization());
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_blank_token_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FakeBizPaths::new(Some(temp_dir.path())).unwrap();
        fs::write(paths.secret_file(), r#"{ "huggingface": { "api_token": "" } }"#).unwrap();

        let err = SecretStorage::with_path(paths.secret_file())
            .resolve_token_with(|_| None)
            .map_err(fakebiz_core::FakeBizError::from)
            .unwrap_err();
        assert!(err.is_config());
    }
}
