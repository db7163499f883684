//! Application configuration persisted to `rui.toml`.
//!
//! ```toml
//! [server]
//! address = "127.0.0.1:8080"
//! path = "/ws"
//! answer_timeout_ms = 10000
//!
//! [log]
//! filter = "info"
//! ```
//!
//! Every field is optional; missing ones take the values above.

use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default file name of the configuration.
pub const CONFIG_FILE: &str = "rui.toml";

/// Configuration of a RUI application.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuiConfig {
    /// Websocket server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub log: LogConfig,
}

/// The `[server]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Websocket bind address.
    pub address: String,
    /// Request path accepted for the websocket upgrade; empty accepts any.
    pub path: String,
    /// Deadline of synchronous page requests in milliseconds.
    pub answer_timeout_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:8080".to_string(),
            path: "/ws".to_string(),
            answer_timeout_ms: 10_000,
        }
    }
}

impl ServerConfig {
    /// The answer deadline as a duration.
    #[must_use]
    pub const fn answer_timeout(&self) -> Duration {
        Duration::from_millis(self.answer_timeout_ms)
    }
}

/// The `[log]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing` filter directives used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: crate::logging::DEFAULT_FILTER.to_string(),
        }
    }
}

impl FromStr for RuiConfig {
    type Err = toml::de::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        toml::from_str(text)
    }
}

impl RuiConfig {
    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        let config = text
            .parse()
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Reads `path` when it exists, otherwise returns the defaults.
    ///
    /// # Errors
    ///
    /// Fails when an existing file cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Writes the configuration as pretty TOML.
    ///
    /// # Errors
    ///
    /// Fails when serialization or writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = toml::to_string_pretty(self).context("failed to serialize the configuration")?;
        fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Installs the logging subscriber with the configured filter.
    pub fn init_logging(&self) {
        crate::logging::set_filter(&self.log.filter);
        crate::logging::init();
    }

    /// Websocket server options of this configuration.
    #[cfg(feature = "web")]
    #[must_use]
    pub fn server_options(&self) -> rui_web::ServerOptions {
        rui_web::ServerOptions::new(self.server.address.clone())
            .with_path(self.server.path.clone())
            .with_answer_timeout(self.server.answer_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: RuiConfig = "[server]\naddress = \"0.0.0.0:9000\"\n".parse().unwrap();
        assert_eq!(config.server.address, "0.0.0.0:9000");
        assert_eq!(config.server.path, "/ws");
        assert_eq!(config.server.answer_timeout(), Duration::from_secs(10));
        assert_eq!(config.log.filter, "info");

        let empty: RuiConfig = "".parse().unwrap();
        assert_eq!(empty, RuiConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!("[server]\nanswer_timeout_ms = \"soon\"\n".parse::<RuiConfig>().is_err());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = RuiConfig::default();
        config.server.answer_timeout_ms = 2500;
        config.log.filter = "rui_web=debug".to_string();
        config.save(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("answer_timeout_ms = 2500"));
        assert_eq!(RuiConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn load_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let error = RuiConfig::load(&path).unwrap_err();
        assert!(format!("{error:#}").contains("missing.toml"));
        assert_eq!(RuiConfig::load_or_default(&path).unwrap(), RuiConfig::default());
    }

    #[cfg(feature = "web")]
    #[test]
    fn server_options_follow_the_config() {
        let mut config = RuiConfig::default();
        config.server.path = String::new();
        config.server.answer_timeout_ms = 300;
        let options = config.server_options();
        assert_eq!(options.address(), "127.0.0.1:8080");
        assert!(options.accepts_path("/anything"));
        assert_eq!(options.answer_timeout(), Duration::from_millis(300));
    }
}
