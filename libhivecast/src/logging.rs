//! Logging setup shared by the library's callers
//!
//! Everything is written to stderr so that `hive-post` can keep stdout for
//! results (post URLs, account JSON) that may be piped elsewhere.
//!
//! ```no_run
//! use libhivecast::logging::{LogFormat, LoggingConfig};
//!
//! LoggingConfig::new(LogFormat::Json, "libhivecast=debug").init();
//! ```

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

/// Environment variable selecting the output format
pub const LOG_FORMAT_ENV: &str = "HIVECAST_LOG_FORMAT";

/// Environment variable selecting the filter directive
pub const LOG_LEVEL_ENV: &str = "HIVECAST_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Plain single-line output
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line colored output
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(format!(
                "Unknown log format '{}' (expected text, json or pretty)",
                other
            )),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        };
        f.write_str(name)
    }
}

/// Output format plus an `EnvFilter` directive such as `"warn"` or
/// `"libhivecast=debug,hive_rs=info"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub filter: String,
}

impl LoggingConfig {
    pub fn new(format: LogFormat, filter: impl Into<String>) -> Self {
        Self {
            format,
            filter: filter.into(),
        }
    }

    /// Build a config from `HIVECAST_LOG_FORMAT` / `HIVECAST_LOG_LEVEL`,
    /// falling back to text output at `default_filter`.
    pub fn from_env(default_filter: &str) -> Self {
        let format = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(LogFormat::Text);
        let filter = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_filter.to_string());

        Self::new(format, filter)
    }

    /// Install the global subscriber
    ///
    /// Returns an error if the filter directive does not parse or a
    /// subscriber is already installed (e.g. a second call in tests).
    pub fn try_init(&self) -> Result<(), String> {
        let filter = EnvFilter::try_new(&self.filter)
            .map_err(|e| format!("Invalid log filter '{}': {}", self.filter, e))?;

        let installed = match self.format {
            LogFormat::Json => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .flatten_event(true)
                .with_current_span(true)
                .with_target(true)
                .try_init(),
            LogFormat::Pretty => tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_file(true)
                .with_line_number(true)
                .try_init(),
            LogFormat::Text => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .try_init(),
        };

        installed.map_err(|e| format!("Failed to install log subscriber: {}", e))
    }

    /// Like [`try_init`](Self::try_init) but ignores failures
    pub fn init(&self) {
        if let Err(e) = self.try_init() {
            eprintln!("warning: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!(" Pretty ".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
    }

    #[test]
    fn test_log_format_from_str_invalid() {
        let err = "xml".parse::<LogFormat>().unwrap_err();
        assert!(err.contains("Unknown log format 'xml'"));
    }

    #[test]
    fn test_log_format_display_round_trips() {
        for format in [LogFormat::Text, LogFormat::Json, LogFormat::Pretty] {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        std::env::remove_var(LOG_FORMAT_ENV);
        std::env::remove_var(LOG_LEVEL_ENV);

        let config = LoggingConfig::from_env("warn");
        assert_eq!(config, LoggingConfig::new(LogFormat::Text, "warn"));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        std::env::set_var(LOG_FORMAT_ENV, "json");
        std::env::set_var(LOG_LEVEL_ENV, "libhivecast=trace");

        let config = LoggingConfig::from_env("warn");

        std::env::remove_var(LOG_FORMAT_ENV);
        std::env::remove_var(LOG_LEVEL_ENV);

        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.filter, "libhivecast=trace");
    }

    #[test]
    fn test_invalid_filter_is_rejected() {
        let config = LoggingConfig::new(LogFormat::Text, "libhivecast=notalevel");
        assert!(config.try_init().unwrap_err().contains("Invalid log filter"));
    }
}
