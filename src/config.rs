//! TOML-based service configuration.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Top-level service configuration parsed from TOML.
///
/// All sections have defaults. Load from TOML with
/// [`ServiceConfig::from_toml_file`] or use [`ServiceConfig::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    /// Listener address and route prefix.
    #[serde(default)]
    pub server: ServerConfig,
    /// HTTP error mapping.
    #[serde(default)]
    pub api: ApiConfig,
    /// Calculator-wide defaults.
    #[serde(default)]
    pub calculation: CalculationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Interface to bind.
    pub host: String,
    pub port: u16,
    /// Prefix for all calculator routes, e.g. `/api/electrical`.
    pub base_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            base_path: "/api/electrical".to_string(),
        }
    }
}

/// HTTP error mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Report calculator input errors as 500 instead of 400, for clients
    /// written against the older backend.
    pub legacy_error_status: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculationConfig {
    /// Seed for the placeholder THD/flicker estimates.
    pub power_quality_seed: u64,
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self {
            power_quality_seed: 42,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"server.port"`).
    pub field: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

impl ServiceConfig {
    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.server;

        if s.host.trim().is_empty() {
            errors.push(ConfigError::new("server.host", "must not be empty"));
        }
        if s.port == 0 {
            errors.push(ConfigError::new("server.port", "must be > 0"));
        }
        if !s.base_path.is_empty() && !s.base_path.starts_with('/') {
            errors.push(ConfigError::new(
                "server.base_path",
                format!("must start with '/', got \"{}\"", s.base_path),
            ));
        }
        if s.base_path.len() > 1 && s.base_path.ends_with('/') {
            errors.push(ConfigError::new(
                "server.base_path",
                "must not end with '/'",
            ));
        }

        // Bare levels only; full directives belong in RUST_LOG.
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            errors.push(ConfigError::new(
                "logging.level",
                format!(
                    "must be one of {}, got \"{}\"",
                    LOG_LEVELS.join(", "),
                    self.logging.level
                ),
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let errors = ServiceConfig::default().validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn full_toml_parses() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080
base_path = "/calc"

[api]
legacy_error_status = true

[calculation]
power_quality_seed = 7

[logging]
level = "debug"
"#;
        let cfg = ServiceConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(8080));
        assert_eq!(cfg.as_ref().map(|c| &*c.server.base_path), Some("/calc"));
        assert_eq!(cfg.as_ref().map(|c| c.api.legacy_error_status), Some(true));
        assert_eq!(
            cfg.as_ref().map(|c| c.calculation.power_quality_seed),
            Some(7)
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = ServiceConfig::from_toml_str("[server]\nport = 9000\n");
        assert!(cfg.is_ok());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.server.port), Some(9000));
        assert_eq!(
            cfg.as_ref().map(|c| &*c.server.base_path),
            Some("/api/electrical")
        );
        assert_eq!(cfg.as_ref().map(|c| &*c.logging.level), Some("info"));
    }

    #[test]
    fn unknown_field_rejected() {
        let result = ServiceConfig::from_toml_str("[server]\nbogus = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn validation_catches_zero_port() {
        let mut cfg = ServiceConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().iter().any(|e| e.field == "server.port"));
    }

    #[test]
    fn validation_catches_relative_base_path() {
        let mut cfg = ServiceConfig::default();
        cfg.server.base_path = "api".to_string();
        assert!(cfg.validate().iter().any(|e| e.field == "server.base_path"));
    }

    #[test]
    fn empty_base_path_mounts_at_root() {
        let mut cfg = ServiceConfig::default();
        cfg.server.base_path = String::new();
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validation_catches_bad_log_level() {
        let mut cfg = ServiceConfig::default();
        cfg.logging.level = "loud".to_string();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "logging.level"));
        assert!(errors[0].to_string().contains("loud"));
    }
}
