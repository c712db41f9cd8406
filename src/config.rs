use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Application-level constants
pub const APP_NAME: &str = "Health Document Processor";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Service identifier reported by the health check.
pub const SERVICE_NAME: &str = "health-document-processor";

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024; // 20 MiB

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "info,healthdoc_lib=debug,tower_http=info"
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowedOrigins {
    Any,
    List(Vec<String>),
}

/// Runtime settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub host: IpAddr,
    pub port: u16,
    pub allowed_origins: AllowedOrigins,
    pub max_upload_bytes: usize,
    /// Directory containing `eng.traineddata`; searched for when unset.
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            allowed_origins: AllowedOrigins::Any,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            tessdata_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Read `HEALTHDOC_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = non_empty(lookup("HEALTHDOC_HOST")) {
            config.host = host.parse().map_err(|_| ConfigError::InvalidValue {
                key: "HEALTHDOC_HOST",
                value: host.clone(),
            })?;
        }

        if let Some(port) = non_empty(lookup("HEALTHDOC_PORT")) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "HEALTHDOC_PORT",
                value: port.clone(),
            })?;
        }

        if let Some(origins) = non_empty(lookup("HEALTHDOC_ALLOWED_ORIGINS")) {
            config.allowed_origins = parse_origins(&origins);
        }

        if let Some(limit) = non_empty(lookup("HEALTHDOC_MAX_UPLOAD_BYTES")) {
            config.max_upload_bytes = match limit.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        key: "HEALTHDOC_MAX_UPLOAD_BYTES",
                        value: limit,
                    })
                }
            };
        }

        config.tessdata_dir = non_empty(lookup("HEALTHDOC_TESSDATA")).map(PathBuf::from);

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// `*` (anywhere in the list) means any origin.
fn parse_origins(raw: &str) -> AllowedOrigins {
    let origins: Vec<String> = raw
        .split(',')
        .map(|o| o.trim())
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect();

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        AllowedOrigins::Any
    } else {
        AllowedOrigins::List(origins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let config = ServiceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    }

    #[test]
    fn reads_all_keys() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("HEALTHDOC_HOST", "127.0.0.1"),
            ("HEALTHDOC_PORT", "9100"),
            ("HEALTHDOC_ALLOWED_ORIGINS", "http://localhost:3000, https://app.example.com"),
            ("HEALTHDOC_MAX_UPLOAD_BYTES", "1048576"),
            ("HEALTHDOC_TESSDATA", "/opt/tessdata"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9100");
        assert_eq!(
            config.allowed_origins,
            AllowedOrigins::List(vec![
                "http://localhost:3000".into(),
                "https://app.example.com".into()
            ])
        );
        assert_eq!(config.max_upload_bytes, 1_048_576);
        assert_eq!(config.tessdata_dir, Some(PathBuf::from("/opt/tessdata")));
    }

    #[test]
    fn wildcard_origin_means_any() {
        let config = ServiceConfig::from_lookup(lookup(&[(
            "HEALTHDOC_ALLOWED_ORIGINS",
            "http://localhost:3000,*",
        )]))
        .unwrap();
        assert_eq!(config.allowed_origins, AllowedOrigins::Any);
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = ServiceConfig::from_lookup(lookup(&[("HEALTHDOC_PORT", "eighty")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: "HEALTHDOC_PORT",
                value: "eighty".into()
            }
        );
    }

    #[test]
    fn zero_upload_limit_is_rejected() {
        assert!(ServiceConfig::from_lookup(lookup(&[("HEALTHDOC_MAX_UPLOAD_BYTES", "0")])).is_err());
    }

    #[test]
    fn blank_values_are_ignored() {
        let config = ServiceConfig::from_lookup(lookup(&[("HEALTHDOC_HOST", "  ")])).unwrap();
        assert_eq!(config.host, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, env!("CARGO_PKG_VERSION"));
    }
}
