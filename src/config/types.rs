//! Configuration types, defaults, loading, and validation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Application endpoint
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Security verification
    #[serde(default)]
    pub verification: VerificationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Scheme, host and port of the server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path the application is POSTed to
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Full URL of the submission endpoint
    pub fn submit_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.endpoint)
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_endpoint() -> String {
    "/api/partnership-application".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log to file
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Pre-obtained challenge token, for servers that do not check it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Canonical base directory: `~/.partnerapply/`
pub fn partnerapply_home() -> PathBuf {
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    let p = home.join(".partnerapply");
    if !p.exists() {
        let _ = fs::create_dir_all(&p);
    }
    p
}

/// Directory for rolling log files
pub fn logs_dir() -> PathBuf {
    partnerapply_home().join("logs")
}

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Config {
    /// Load configuration from default locations
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. System config: ~/.partnerapply/config.toml
    /// 3. Local config: ./partnerapply.toml
    /// 4. Environment variables
    pub fn load() -> Result<Self> {
        tracing::debug!("Loading configuration...");

        let mut config = Self::default();

        if let Some(system_config_path) = Self::system_config_path()
            && system_config_path.exists()
        {
            tracing::debug!("Loading system config from: {:?}", system_config_path);
            config = Self::from_file(&system_config_path)?;
        }

        let local_config_path = Self::local_config_path();
        if local_config_path.exists() {
            tracing::debug!("Loading local config from: {:?}", local_config_path);
            config = Self::from_file(&local_config_path)?;
        }

        config = Self::apply_env_overrides(config)?;

        tracing::debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from a specific file path
    ///
    /// Priority (lowest to highest):
    /// 1. Default values
    /// 2. Custom config file (specified path)
    /// 3. Environment variables
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading configuration from custom path: {:?}", path);

        if !path.exists() {
            anyhow::bail!("Config file not found: {:?}", path);
        }
        let config = Self::apply_env_overrides(Self::from_file(path)?)?;

        tracing::debug!("Configuration loaded successfully from custom path");
        Ok(config)
    }

    /// Get the system config path: ~/.partnerapply/config.toml
    pub fn system_config_path() -> Option<PathBuf> {
        Some(partnerapply_home().join("config.toml"))
    }

    /// Get the local config path: ./partnerapply.toml
    pub fn local_config_path() -> PathBuf {
        PathBuf::from("./partnerapply.toml")
    }

    /// Parse a TOML file. Sections it omits take their defaults; a later
    /// file replaces an earlier one wholesale.
    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    fn apply_env_overrides(config: Self) -> Result<Self> {
        Self::apply_overrides(config, |key| std::env::var(key).ok())
    }

    /// Apply `PARTNERAPPLY_*` overrides read through `lookup`
    fn apply_overrides(mut config: Self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(url) = lookup("PARTNERAPPLY_API_URL") {
            config.api.base_url = url;
        }

        if let Some(timeout) = lookup("PARTNERAPPLY_API_TIMEOUT") {
            config.api.timeout_secs = timeout
                .trim()
                .parse()
                .with_context(|| format!("Invalid PARTNERAPPLY_API_TIMEOUT: {:?}", timeout))?;
        }

        if let Some(level) = lookup("PARTNERAPPLY_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(file) = lookup("PARTNERAPPLY_LOG_FILE") {
            config.logging.file = Some(PathBuf::from(file));
        }

        if let Some(token) = lookup("PARTNERAPPLY_VERIFICATION_TOKEN")
            && !token.is_empty()
        {
            config.verification.token = Some(token);
        }

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        tracing::debug!("Validating configuration...");

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            anyhow::bail!(
                "Invalid log level: {}. Must be one of: {:?}",
                self.logging.level,
                VALID_LEVELS
            );
        }

        let base = &self.api.base_url;
        if base.is_empty() || !(base.starts_with("http://") || base.starts_with("https://")) {
            anyhow::bail!("api.base_url must be an http:// or https:// URL, got {:?}", base);
        }

        if !self.api.endpoint.starts_with('/') {
            anyhow::bail!(
                "api.endpoint must start with '/', got {:?}",
                self.api.endpoint
            );
        }

        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be greater than zero");
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let toml_string =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;

        tracing::info!("Configuration saved to: {:?}", path);
        Ok(())
    }

    /// Copy safe to print: the verification token is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.verification.token.is_some() {
            copy.verification.token = Some("[REDACTED]".to_string());
        }
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::{NamedTempFile, TempDir};

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(
            config.api.submit_url(),
            "http://127.0.0.1:5000/api/partnership-application"
        );
        assert!(config.verification.token.is_none());
    }

    #[test]
    fn test_config_validation() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_api() {
        let mut config = Config::default();
        config.api.base_url = String::new();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.endpoint = "api/partnership-application".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_submit_url_trailing_slash() {
        let api = ApiConfig {
            base_url: "https://apply.example.com/".to_string(),
            ..ApiConfig::default()
        };
        assert_eq!(
            api.submit_url(),
            "https://apply.example.com/api/partnership-application"
        );
    }

    #[test]
    fn test_config_from_toml() {
        let toml_content = r#"
[api]
base_url = "https://apply.example.com"
timeout_secs = 10

[logging]
level = "debug"
        "#;

        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://apply.example.com");
        assert_eq!(config.api.endpoint, "/api/partnership-application");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_file = NamedTempFile::new().unwrap();
        let mut config = Config::default();
        config.api.timeout_secs = 12;
        config.verification.token = Some("tok".to_string());

        config.save(temp_file.path()).unwrap();
        let loaded = Config::from_file(temp_file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::default().save(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_load_from_missing_path() {
        let dir = TempDir::new().unwrap();
        assert!(Config::load_from_path(dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_load_from_malformed_file() {
        let temp_file = NamedTempFile::new().unwrap();
        fs::write(temp_file.path(), "[api\nbase_url = ").unwrap();
        assert!(Config::from_file(temp_file.path()).is_err());
    }

    #[test]
    fn test_env_overrides() {
        let lookup = lookup_from(&[
            ("PARTNERAPPLY_API_URL", "https://override.example.com"),
            ("PARTNERAPPLY_API_TIMEOUT", "7"),
            ("PARTNERAPPLY_LOG_LEVEL", "trace"),
            ("PARTNERAPPLY_LOG_FILE", "/tmp/partnerapply.log"),
            ("PARTNERAPPLY_VERIFICATION_TOKEN", "abc"),
        ]);
        let config = Config::apply_overrides(Config::default(), lookup).unwrap();

        assert_eq!(config.api.base_url, "https://override.example.com");
        assert_eq!(config.api.timeout_secs, 7);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(
            config.logging.file,
            Some(PathBuf::from("/tmp/partnerapply.log"))
        );
        assert_eq!(config.verification.token.as_deref(), Some("abc"));
    }

    #[test]
    fn test_env_override_bad_timeout() {
        let lookup = lookup_from(&[("PARTNERAPPLY_API_TIMEOUT", "soon")]);
        assert!(Config::apply_overrides(Config::default(), lookup).is_err());
    }

    #[test]
    fn test_redacted() {
        let mut config = Config::default();
        assert_eq!(config.redacted(), config);

        config.verification.token = Some("secret-token".to_string());
        let shown = toml::to_string_pretty(&config.redacted()).unwrap();
        assert!(!shown.contains("secret-token"));
        assert!(shown.contains("[REDACTED]"));
    }
}
