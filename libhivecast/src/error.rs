//! Error types for Hivecast

use hive_rs::HiveError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HivecastError>;

#[derive(Error, Debug)]
pub enum HivecastError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chain error: {0}")]
    Chain(#[from] ChainError),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl HivecastError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            HivecastError::InvalidInput(_) => 3,
            HivecastError::Key(_) => 2,
            HivecastError::Chain(_) => 1,
            HivecastError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

#[derive(Error, Debug, Clone)]
pub enum ChainError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Broadcast failed: {0}")]
    Broadcast(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid WIF private key: {0}")]
    InvalidWif(String),

    #[error("Signing failed: {0}")]
    Signing(String),
}

impl From<HiveError> for HivecastError {
    fn from(error: HiveError) -> Self {
        match error {
            HiveError::InvalidKey(msg) => KeyError::InvalidWif(msg).into(),
            HiveError::Signing(msg) => KeyError::Signing(msg).into(),
            other => ChainError::from(other).into(),
        }
    }
}

impl From<HiveError> for ChainError {
    fn from(error: HiveError) -> Self {
        match error {
            HiveError::Rpc { code, message, .. } => ChainError::Rpc { code, message },
            HiveError::Transport(msg) => ChainError::Network(msg),
            HiveError::Timeout | HiveError::AllNodesFailed => {
                ChainError::Network(error.to_string())
            }
            HiveError::Serialization(msg) => ChainError::Decode(msg),
            other => ChainError::Broadcast(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_invalid_input() {
        let error = HivecastError::InvalidInput("Empty title".to_string());
        assert_eq!(error.exit_code(), 3);
    }

    #[test]
    fn test_exit_code_key_error() {
        let error = HivecastError::Key(KeyError::InvalidWif("bad checksum".to_string()));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_exit_code_chain_and_config_errors() {
        let network = HivecastError::Chain(ChainError::Network("timeout".to_string()));
        assert_eq!(network.exit_code(), 1);

        let rpc = HivecastError::Chain(ChainError::Rpc {
            code: -32000,
            message: "missing required posting authority".to_string(),
        });
        assert_eq!(rpc.exit_code(), 1);

        let config = HivecastError::Config(ConfigError::MissingField("hive.username".to_string()));
        assert_eq!(config.exit_code(), 1);
    }

    #[test]
    fn test_error_message_formatting_rpc() {
        let error: HivecastError = ChainError::Rpc {
            code: 10,
            message: "Assert Exception".to_string(),
        }
        .into();
        assert_eq!(error.to_string(), "Chain error: RPC error 10: Assert Exception");
    }

    #[test]
    fn test_error_message_formatting_config() {
        let config_error = ConfigError::MissingField("hive.username".to_string());
        let error = HivecastError::Config(config_error);
        assert_eq!(
            error.to_string(),
            "Configuration error: Missing required field: hive.username"
        );
    }

    #[test]
    fn test_error_message_formatting_key() {
        let error: HivecastError = KeyError::InvalidWif("wrong version byte".to_string()).into();
        assert_eq!(
            error.to_string(),
            "Key error: Invalid WIF private key: wrong version byte"
        );
    }

    #[test]
    fn test_config_error_read_error_formatting() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let config_error = ConfigError::ReadError(io_error);
        assert!(config_error.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_hive_error_mapping() {
        let rpc: HivecastError = HiveError::Rpc {
            code: -32000,
            message: "missing required posting authority".to_string(),
            data: None,
        }
        .into();
        assert!(matches!(
            rpc,
            HivecastError::Chain(ChainError::Rpc { code: -32000, .. })
        ));

        let down: HivecastError = HiveError::AllNodesFailed.into();
        assert!(matches!(down, HivecastError::Chain(ChainError::Network(_))));
        assert_eq!(down.exit_code(), 1);

        let timeout: HivecastError = HiveError::Timeout.into();
        assert!(matches!(timeout, HivecastError::Chain(ChainError::Network(_))));

        let bad_json: HivecastError = HiveError::Serialization("eof".to_string()).into();
        assert!(matches!(bad_json, HivecastError::Chain(ChainError::Decode(_))));
    }

    #[test]
    fn test_hive_key_errors_map_to_key_errors() {
        let bad_key: HivecastError = HiveError::InvalidKey("checksum mismatch".to_string()).into();
        assert_eq!(bad_key.exit_code(), 2);
        assert_eq!(
            bad_key.to_string(),
            "Key error: Invalid WIF private key: checksum mismatch"
        );

        let signing: HivecastError =
            HiveError::Signing("no canonical signature".to_string()).into();
        assert!(matches!(signing, HivecastError::Key(KeyError::Signing(_))));
    }

    #[test]
    fn test_chain_error_clone() {
        let original = ChainError::Network("Connection refused".to_string());
        let cloned = original.clone();
        assert_eq!(original.to_string(), cloned.to_string());
    }
}
