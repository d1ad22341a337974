//! Path management for fakebiz configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/fakebiz/
//! ├── config.toml              # Models, endpoint, retry settings
//! └── secret.json              # Hugging Face API token
//! ```

use std::path::{Path, PathBuf};

use fakebiz_core::config::{HuggingFaceConfig, SecretConfig};

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolves fakebiz file locations, optionally rooted at a custom directory.
#[derive(Debug, Clone)]
pub struct FakeBizPaths {
    config_dir: PathBuf,
}

impl FakeBizPaths {
    /// Uses `base` as the config directory when given, else `~/.config/fakebiz`.
    pub fn new(base: Option<&Path>) -> Result<Self, PathError> {
        let config_dir = match base {
            Some(dir) => dir.to_path_buf(),
            None => Self::default_config_dir()?,
        };
        Ok(Self { config_dir })
    }

    fn default_config_dir() -> Result<PathBuf, PathError> {
        let home = dirs::home_dir().ok_or(PathError::HomeDirNotFound)?;
        Ok(home.join(".config").join("fakebiz"))
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Returns the path to the main configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Returns the path to the secrets file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to prevent
    /// unauthorized access.
    pub fn secret_file(&self) -> PathBuf {
        self.config_dir.join("secret.json")
    }

    /// Ensures the secret file exists, creating it with an empty-token template if it doesn't.
    ///
    /// On Unix the new file is created with mode 600.
    pub fn ensure_secret_file(&self) -> Result<PathBuf, std::io::Error> {
        let secret_path = self.secret_file();

        if secret_path.exists() {
            return Ok(secret_path);
        }

        std::fs::create_dir_all(&self.config_dir)?;

        let template_config = SecretConfig {
            huggingface: Some(HuggingFaceConfig {
                api_token: String::new(),
            }),
        };
        let template_json = serde_json::to_string_pretty(&template_config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

        std::fs::write(&secret_path, template_json)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            std::fs::set_permissions(&secret_path, permissions)?;
        }

        Ok(secret_path)
    }
}
