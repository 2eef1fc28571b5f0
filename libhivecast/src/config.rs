//! Configuration management for Hivecast

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Public Hive API node used when none is configured
pub const DEFAULT_API_URL: &str = "https://api.hive.blog";

/// Environment variable holding the WIF posting key
pub const POSTING_KEY_ENV: &str = "HIVE_POSTING_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub hive: HiveConfig,
    #[serde(default)]
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HiveConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    pub username: String,
    /// File containing the WIF posting key; `HIVE_POSTING_KEY` wins if set
    #[serde(default)]
    pub posting_key_file: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Options applied to every published post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_app")]
    pub app: String,
    /// Parent permlink used when a post has no tags
    #[serde(default = "default_category")]
    pub default_category: String,
    #[serde(default = "default_beneficiary_account")]
    pub beneficiary_account: String,
    /// Basis points, 500 = 5%
    #[serde(default = "default_beneficiary_weight")]
    pub beneficiary_weight: u16,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            app: default_app(),
            default_category: default_category(),
            beneficiary_account: default_beneficiary_account(),
            beneficiary_weight: default_beneficiary_weight(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_app() -> String {
    format!("hivecast/{}", env!("CARGO_PKG_VERSION"))
}

fn default_category() -> String {
    "hive".to_string()
}

fn default_beneficiary_account() -> String {
    "hivecast".to_string()
}

fn default_beneficiary_weight() -> u16 {
    500
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::ParseError)?;
        if config.hive.username.trim().is_empty() {
            return Err(ConfigError::MissingField("hive.username".to_string()).into());
        }
        Ok(config)
    }

    /// Create a configuration for `username` with every other value defaulted
    pub fn for_user(username: &str) -> Self {
        Self {
            hive: HiveConfig {
                api_url: default_api_url(),
                username: username.to_string(),
                posting_key_file: None,
                timeout_secs: default_timeout_secs(),
            },
            publish: PublishConfig::default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.hive.timeout_secs)
    }

    /// Resolve the WIF posting key from the environment or the key file
    pub fn posting_key(&self) -> Result<SecretString> {
        if let Ok(key) = std::env::var(POSTING_KEY_ENV) {
            if !key.trim().is_empty() {
                return Ok(SecretString::from(key.trim().to_string()));
            }
        }

        let key_file = self.hive.posting_key_file.as_deref().ok_or_else(|| {
            ConfigError::MissingField(format!(
                "hive.posting_key_file (or set {})",
                POSTING_KEY_ENV
            ))
        })?;

        let expanded = shellexpand::tilde(key_file).to_string();
        let content = std::fs::read_to_string(&expanded).map_err(ConfigError::ReadError)?;
        let key = content.trim();
        if key.is_empty() {
            return Err(ConfigError::MissingField(format!("posting key in {}", expanded)).into());
        }

        Ok(SecretString::from(key.to_string()))
    }
}

/// Resolve the configuration file path under the XDG config directory
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("HIVECAST_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("hivecast").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HivecastError;
    use secrecy::ExposeSecret;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = Config::from_toml(
            r#"
[hive]
username = "alice"
"#,
        )
        .unwrap();

        assert_eq!(config.hive.api_url, DEFAULT_API_URL);
        assert_eq!(config.hive.username, "alice");
        assert_eq!(config.hive.timeout_secs, 30);
        assert_eq!(config.publish, PublishConfig::default());
        assert_eq!(config.publish.beneficiary_weight, 500);
        assert_eq!(config.publish.default_category, "hive");
        assert!(config.publish.app.starts_with("hivecast/"));
    }

    #[test]
    fn test_full_config() {
        let config = Config::from_toml(
            r#"
[hive]
api_url = "https://api.deathwing.me"
username = "bob"
posting_key_file = "/tmp/bob.key"
timeout_secs = 5

[publish]
app = "myapp/1.0"
default_category = "blog"
beneficiary_account = "platform"
beneficiary_weight = 1000
"#,
        )
        .unwrap();

        assert_eq!(config.hive.api_url, "https://api.deathwing.me");
        assert_eq!(config.hive.posting_key_file.as_deref(), Some("/tmp/bob.key"));
        assert_eq!(config.timeout(), Duration::from_secs(5));
        assert_eq!(config.publish.app, "myapp/1.0");
        assert_eq!(config.publish.beneficiary_account, "platform");
        assert_eq!(config.publish.beneficiary_weight, 1000);
    }

    #[test]
    fn test_empty_username_rejected() {
        let err = Config::from_toml("[hive]\nusername = \"  \"\n").unwrap_err();
        assert!(matches!(
            err,
            HivecastError::Config(ConfigError::MissingField(ref f)) if f == "hive.username"
        ));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = Config::from_toml("[hive\nusername=").unwrap_err();
        assert!(matches!(err, HivecastError::Config(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = Config::load_from_path(Path::new("/nonexistent/hivecast.toml")).unwrap_err();
        assert!(matches!(err, HivecastError::Config(ConfigError::ReadError(_))));
    }

    #[test]
    #[serial]
    fn test_posting_key_from_file() {
        std::env::remove_var(POSTING_KEY_ENV);
        let temp_dir = TempDir::new().unwrap();
        let key_path = temp_dir.path().join("posting.key");
        std::fs::write(&key_path, "  5JfileKey\n").unwrap();

        let mut config = Config::for_user("alice");
        config.hive.posting_key_file = Some(key_path.to_string_lossy().to_string());

        assert_eq!(config.posting_key().unwrap().expose_secret(), "5JfileKey");
    }

    #[test]
    #[serial]
    fn test_posting_key_env_wins() {
        std::env::set_var(POSTING_KEY_ENV, "5JenvKey");
        let mut config = Config::for_user("alice");
        config.hive.posting_key_file = Some("/nonexistent".to_string());

        let key = config.posting_key();
        std::env::remove_var(POSTING_KEY_ENV);

        assert_eq!(key.unwrap().expose_secret(), "5JenvKey");
    }

    #[test]
    #[serial]
    fn test_posting_key_missing() {
        std::env::remove_var(POSTING_KEY_ENV);
        let config = Config::for_user("alice");
        let err = config.posting_key().unwrap_err();
        assert!(err.to_string().contains("hive.posting_key_file"));
    }

    #[test]
    #[serial]
    fn test_resolve_config_path_from_env() {
        std::env::set_var("HIVECAST_CONFIG", "/tmp/custom.toml");
        let path = resolve_config_path().unwrap();
        std::env::remove_var("HIVECAST_CONFIG");
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }
}
