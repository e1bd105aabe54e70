use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::errors::{ClientError, Result};

/// Client configuration.
///
/// Serialized to TOML and saved at `~/.jobboard/client.toml`. A default file
/// is written on first use.
///
/// ```toml
/// server_url = "http://127.0.0.1:8080"
/// drafts_path = "~/.jobboard/drafts.json"
/// request_timeout_secs = 10
/// offline_drafts = true
///
/// [logging]
/// level = "warn"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the job board service
    pub server_url: String,

    /// Local draft file; `~` is expanded
    pub drafts_path: String,

    /// Timeout applied to every request to the service
    pub request_timeout_secs: u64,

    /// Save postings locally when the service is unreachable
    pub offline_drafts: bool,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8080".to_string(),
            drafts_path: "~/.jobboard/drafts.json".to_string(),
            request_timeout_secs: 10,
            offline_drafts: true,
            logging: LoggingConfig {
                level: "warn".to_string(),
            },
        }
    }
}

impl ClientConfig {
    /// Get default configuration file path: `~/.jobboard/client.toml`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Config` if home directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ClientError::Config("Could not determine home directory".to_string()))?;

        Ok(home.join(".jobboard").join("client.toml"))
    }

    /// Replace the service URL, validating the result like a loaded file
    pub fn with_server_url(mut self, url: impl Into<String>) -> Result<Self> {
        self.server_url = url.into();
        self.validate()?;
        Ok(self)
    }

    pub fn drafts_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.drafts_path).into_owned())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "server_url must start with http:// or https://, got '{}'",
                self.server_url
            )));
        }

        if self.drafts_path.trim().is_empty() {
            return Err(ClientError::Config("drafts_path must not be empty".to_string()));
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ClientError::Config(
                "request_timeout_secs must be between 1 and 300".to_string(),
            ));
        }

        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
            _ => Err(ClientError::Config(
                "log level must be one of: trace, debug, info, warn, error".to_string(),
            )),
        }
    }

    /// Save configuration to file.
    ///
    /// Creates parent directories if they don't exist.
    /// Uses atomic write (temp file + rename) to prevent corruption.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                tracing::error!(
                    path = %parent.display(),
                    error = %e,
                    "Failed to create config directory"
                );
                e
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;

        let temp_path = path.with_extension("toml.tmp");
        fs::write(&temp_path, &toml_string).map_err(|e| {
            tracing::error!(
                path = %temp_path.display(),
                error = %e,
                "Failed to write temp config file"
            );
            e
        })?;

        fs::rename(&temp_path, path)?;

        tracing::info!(path = %path.display(), "Client configuration saved");
        Ok(())
    }

    /// Load configuration from file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, TOML parsing fails, or the
    /// loaded values do not validate.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            tracing::error!(path = %path.display(), error = %e, "Failed to read config file");
            e
        })?;

        let config: ClientConfig = toml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Client configuration loaded");
        Ok(config)
    }

    /// Load `path` if it exists, otherwise write the defaults there first
    pub fn load_or_init(path: &Path) -> Result<(Self, bool)> {
        if path.exists() {
            return Ok((Self::load(path)?, false));
        }

        let config = Self::default();
        config.save(path)?;
        Ok((config, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();

        assert!(config.validate().is_ok());
        assert!(config.offline_drafts);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_drafts_path_expands_tilde() {
        let config = ClientConfig::default();
        let path = config.drafts_path();

        assert!(!path.starts_with("~"));
        assert!(path.ends_with(".jobboard/drafts.json"));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ClientConfig::default();
        config.server_url = "localhost:8080".to_string();
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = ClientConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_server_url_override_validated() {
        let err = ClientConfig::default()
            .with_server_url("localhost:8080")
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("localhost:8080")));

        let config = ClientConfig::default()
            .with_server_url("https://jobs.example.com")
            .unwrap();
        assert_eq!(config.server_url, "https://jobs.example.com");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("client.toml");

        let mut config = ClientConfig::default();
        config.server_url = "https://jobs.example.com".to_string();
        config.offline_drafts = false;
        config.save(&config_path).expect("Failed to save");

        let loaded = ClientConfig::load(&config_path).expect("Failed to load");

        assert_eq!(loaded, config);
        assert!(!config_path.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_load_or_init() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sub").join("client.toml");

        let (config, created) = ClientConfig::load_or_init(&config_path).unwrap();
        assert!(created);
        assert_eq!(config, ClientConfig::default());

        let (_, created) = ClientConfig::load_or_init(&config_path).unwrap();
        assert!(!created);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ClientConfig::load(Path::new("/nonexistent/path/client.toml"));
        assert!(result.is_err());
    }
}
