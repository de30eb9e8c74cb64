//! Configuration management for the conversion service
//!
//! Supports loading configuration from environment variables with fallback to defaults.

use std::path::PathBuf;
use std::str::FromStr;

use html2go_core::{NormalizePipeline, ValidationMode};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_WORKER_COUNT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Explicit static asset directory, searched before the built-in candidates.
    pub public_dir: Option<PathBuf>,
    pub pipeline: NormalizePipeline,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            workers: DEFAULT_WORKER_COUNT,
            public_dir: None,
            pipeline: NormalizePipeline::default(),
        }
    }
}

impl ServiceConfig {
    /// Load ServiceConfig from environment variables
    ///
    /// Environment variables:
    /// - `APP_HOST`: Bind address (default: 127.0.0.1)
    /// - `APP_PORT`: Listen port (default: 8080)
    /// - `APP_WORKERS`: HTTP worker count (default: 10)
    /// - `PUBLIC_DIR`: Static asset directory (default: searched)
    /// - `HTML2GO_REPAIR`: Run the syntax repair pass (default: false)
    /// - `HTML2GO_VALIDATION`: `off`, `warn` or `enforce` (default: warn)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("APP_HOST")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.host),
            port: parse_or(lookup("APP_PORT"), defaults.port),
            workers: parse_or(lookup("APP_WORKERS"), defaults.workers).max(1),
            public_dir: lookup("PUBLIC_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            pipeline: NormalizePipeline {
                repair: lookup("HTML2GO_REPAIR")
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(defaults.pipeline.repair),
                validation: parse_or::<ValidationMode>(
                    lookup("HTML2GO_VALIDATION"),
                    defaults.pipeline.validation,
                ),
            },
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ServiceConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServiceConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_service_config_has_sensible_defaults() {
        let config = config_from(&[]);
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert!(!config.pipeline.repair);
        assert_eq!(config.pipeline.validation, ValidationMode::Warn);
    }

    #[test]
    fn test_service_config_reads_overrides() {
        let config = config_from(&[
            ("APP_HOST", "0.0.0.0"),
            ("APP_PORT", "9000"),
            ("APP_WORKERS", "2"),
            ("PUBLIC_DIR", "/srv/public"),
            ("HTML2GO_REPAIR", "yes"),
            ("HTML2GO_VALIDATION", "enforce"),
        ]);
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
        assert_eq!(config.workers, 2);
        assert_eq!(config.public_dir, Some(PathBuf::from("/srv/public")));
        assert!(config.pipeline.repair);
        assert_eq!(config.pipeline.validation, ValidationMode::Enforce);
    }

    #[test]
    fn test_service_config_ignores_garbage() {
        let config = config_from(&[
            ("APP_PORT", "eighty"),
            ("APP_WORKERS", "0"),
            ("HTML2GO_REPAIR", "maybe"),
            ("HTML2GO_VALIDATION", "sometimes"),
        ]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.workers, 1);
        assert!(!config.pipeline.repair);
        assert_eq!(config.pipeline.validation, ValidationMode::Warn);
    }
}
