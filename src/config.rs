//! # Configuration Management
//!
//! Connection settings for the RCON client.
//!
//! This module provides structured configuration for the RCON session driver:
//! endpoint, credentials, and the timeout budgets that bound every read the
//! driver performs against the game server.
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Environment variables via `from_env()`
//! - Direct instantiation with defaults
//!
//! ## Bind Normalization
//! Starbound's `rconServerBind` setting accepts `*`, `localhost`, or an empty
//! string to mean the loopback interface; [`RconConfig::normalized_address`]
//! folds all three into `127.0.0.1` before the client ever dials out.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Default RCON port in a stock `starbound_server.config`.
pub const DEFAULT_RCON_PORT: u16 = 21026;

/// Default budget for establishing the TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default budget for each read phase (authentication scan, command response).
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// RCON connection configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RconConfig {
    /// Address the game server's RCON listener is bound to.
    /// Empty, `*`, and `localhost` are treated as `127.0.0.1`.
    pub address: String,

    /// RCON listener port (`rconServerPort`).
    pub port: u16,

    /// RCON password (`rconServerPassword`).
    pub password: String,

    /// Budget for establishing the TCP connection.
    pub connect_timeout: Duration,

    /// Budget for each read phase. This bounds the authentication-response
    /// scan and the single command-response read; an unresponsive peer fails
    /// the call instead of stalling it forever.
    pub read_timeout: Duration,
}

impl Default for RconConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1".to_string(),
            port: DEFAULT_RCON_PORT,
            password: String::new(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl RconConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| ProtocolError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Start with defaults
        let mut config = Self::default();

        // Override with environment variables
        if let Ok(address) = std::env::var("STARBOUND_RCON_ADDRESS") {
            config.address = address;
        }

        if let Ok(port) = std::env::var("STARBOUND_RCON_PORT") {
            if let Ok(val) = port.parse::<u16>() {
                config.port = val;
            }
        }

        if let Ok(password) = std::env::var("STARBOUND_RCON_PASSWORD") {
            config.password = password;
        }

        if let Ok(timeout) = std::env::var("STARBOUND_RCON_CONNECT_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.connect_timeout = Duration::from_millis(val);
            }
        }

        if let Ok(timeout) = std::env::var("STARBOUND_RCON_READ_TIMEOUT_MS") {
            if let Ok(val) = timeout.parse::<u64>() {
                config.read_timeout = Duration::from_millis(val);
            }
        }

        Ok(config)
    }

    /// The address the client should actually dial. Starbound treats an
    /// empty bind, `*`, and `localhost` as the loopback interface.
    pub fn normalized_address(&self) -> String {
        let trimmed = self.address.trim();
        if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("localhost") {
            "127.0.0.1".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.port == 0 {
            errors.push("RCON port must be non-zero".to_string());
        }

        if self.password.is_empty() {
            errors.push("RCON password is empty; the server will reject authentication".to_string());
        }

        if self.connect_timeout.is_zero() {
            errors.push("connect_timeout must be non-zero".to_string());
        }

        if self.read_timeout.is_zero() {
            errors.push("read_timeout must be non-zero".to_string());
        }

        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ProtocolError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn defaults_are_valid_except_password() {
        let config = RconConfig::default();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("password"));
    }

    #[test]
    fn toml_roundtrip() {
        let config = RconConfig {
            address: "10.0.0.5".to_string(),
            port: 21027,
            password: "hunter2".to_string(),
            ..RconConfig::default()
        };

        let text = toml::to_string(&config).unwrap();
        let parsed = RconConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.address, "10.0.0.5");
        assert_eq!(parsed.port, 21027);
        assert_eq!(parsed.password, "hunter2");
        assert_eq!(parsed.read_timeout, DEFAULT_READ_TIMEOUT);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let parsed = RconConfig::from_toml("password = \"secret\"").unwrap();
        assert_eq!(parsed.address, "127.0.0.1");
        assert_eq!(parsed.port, DEFAULT_RCON_PORT);
        assert_eq!(parsed.connect_timeout, DEFAULT_CONNECT_TIMEOUT);
    }

    #[test]
    fn bind_normalization() {
        for bind in ["", "  ", "*", "localhost", "LOCALHOST", " localhost "] {
            let config = RconConfig {
                address: bind.to_string(),
                ..RconConfig::default()
            };
            assert_eq!(config.normalized_address(), "127.0.0.1", "bind {bind:?}");
        }

        let config = RconConfig {
            address: " 192.168.1.20 ".to_string(),
            ..RconConfig::default()
        };
        assert_eq!(config.normalized_address(), "192.168.1.20");
    }

    #[test]
    fn zero_timeouts_rejected() {
        let config = RconConfig {
            password: "secret".to_string(),
            connect_timeout: Duration::ZERO,
            read_timeout: Duration::ZERO,
            ..RconConfig::default()
        };
        assert_eq!(config.validate().len(), 2);
        assert!(config.validate_strict().is_err());
    }
}
