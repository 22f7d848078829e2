//! Runtime configuration.
//!
//! Environment variables:
//! - `HOST`: bind address (default: 0.0.0.0)
//! - `PORT`: service port (default: 8080)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: json)
//! - `QUERY_TIMEOUT_MS`: deadline for a single shortest-path query (default: 5000)
//! - `MAX_VERTICES`: largest accepted graph, in vertices (default: 100000)
//! - `MAX_EDGES`: largest accepted graph, in declared edges (default: 1000000)

use std::time::Duration;
use serde::{Deserialize, Serialize};

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: {value:?}")]
    InvalidValue {
        /// Variable name.
        key: &'static str,
        /// Raw value found.
        value: String,
    },
}

/// Size limits enforced on submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Maximum number of vertices per graph.
    pub max_vertices: usize,
    /// Maximum number of declared `(from, to)` pairs per graph.
    pub max_edges: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            max_vertices: 100_000,
            max_edges: 1_000_000,
        }
    }
}

impl RegistryConfig {
    /// No size limits.
    pub fn unbounded() -> Self {
        Self {
            max_vertices: usize::MAX,
            max_edges: usize::MAX,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable output for local development.
    Pretty,
}

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Log output format.
    pub log_format: LogFormat,
    /// Deadline for a single shortest-path query.
    pub query_timeout: Duration,
    /// Submission limits.
    pub registry: RegistryConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Json,
            query_timeout: Duration::from_millis(5000),
            registry: RegistryConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// Unset keys fall back to defaults; set but malformed keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("HOST")
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = parse_or(&lookup, "PORT", defaults.port)?;
        let log_format = match lookup("LOG_FORMAT") {
            None => defaults.log_format,
            Some(raw) => match raw.to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" => LogFormat::Pretty,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "LOG_FORMAT",
                        value: raw,
                    })
                }
            },
        };
        let timeout_ms = parse_or(
            &lookup,
            "QUERY_TIMEOUT_MS",
            defaults.query_timeout.as_millis() as u64,
        )?;
        let registry = RegistryConfig {
            max_vertices: parse_or(&lookup, "MAX_VERTICES", defaults.registry.max_vertices)?,
            max_edges: parse_or(&lookup, "MAX_EDGES", defaults.registry.max_edges)?,
        };

        Ok(Self {
            host,
            port,
            log_format,
            query_timeout: Duration::from_millis(timeout_ms),
            registry,
        })
    }

    /// `host:port` string suitable for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ServiceConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let config = ServiceConfig::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "Pretty"),
            ("QUERY_TIMEOUT_MS", "250"),
            ("MAX_VERTICES", "10"),
            ("MAX_EDGES", "20"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:9000");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.query_timeout, Duration::from_millis(250));
        assert_eq!(config.registry.max_vertices, 10);
        assert_eq!(config.registry.max_edges, 20);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServiceConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "PORT",
                value: "eighty".to_string()
            }
        );
    }

    #[test]
    fn test_invalid_log_format() {
        assert!(ServiceConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "xml")])).is_err());
    }
}
