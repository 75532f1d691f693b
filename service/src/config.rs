//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};

use crate::ServiceError;
use weft_types::FeedParams;

/// Configuration for an embedded weft core.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Content validation limits.
    #[serde(default)]
    pub params: FeedParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whether to register Prometheus metrics.
    #[serde(default)]
    pub enable_metrics: bool,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            params: FeedParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            enable_metrics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = ServiceConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = ServiceConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.params.max_body_chars, config.params.max_body_chars);
        assert_eq!(parsed.log_format, config.log_format);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.params.max_body_chars, 255);
        assert_eq!(config.log_format, "human");
        assert_eq!(config.log_level, "info");
        assert!(!config.enable_metrics);
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            log_level = "debug"

            [params]
            max_body_chars = 500
        "#;
        let config = ServiceConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.params.max_body_chars, 500);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_format, "human"); // default
    }

    #[test]
    fn config_loads_from_a_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "log_format = \"json\"").unwrap();
        let config =
            ServiceConfig::from_toml_file(file.path().to_str().unwrap()).expect("should load");
        assert_eq!(config.log_format, "json");
    }

    #[test]
    fn unreadable_file_is_a_config_error() {
        let err = ServiceConfig::from_toml_file("/does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ServiceError::Config(_)));
    }
}
