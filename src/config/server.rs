//! HTTP server settings

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Listener, logging and CORS settings for the HTTP boundary.
///
/// Every field has a default, so an empty `server` section is valid.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind, without the port
    pub host: String,
    /// Listening port
    pub port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub log_level: String,
    /// Seconds before a fetch or health request is abandoned
    pub request_timeout_secs: u64,
    /// Comma-separated list of allowed origins; unset allows none.
    pub cors_origins: Option<String>,
}

/// Deployment environment. Production switches logs to JSON.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            environment: Environment::default(),
            log_level: "info,coach_planning=debug,sqlx=warn".into(),
            request_timeout_secs: 30,
            cors_origins: None,
        }
    }
}

impl ServerConfig {
    /// Parse `host:port` into a bindable address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ValidationError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ValidationError::InvalidHost(raw))
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Structured JSON output is reserved for production.
    pub fn json_logs(&self) -> bool {
        self.is_production()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn cors_origins_list(&self) -> Vec<String> {
        let Some(raw) = self.cors_origins.as_deref() else {
            return Vec::new();
        };
        raw.split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !(1..=MAX_REQUEST_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
            return Err(ValidationError::InvalidTimeout);
        }
        self.socket_addr().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(f: impl FnOnce(&mut ServerConfig)) -> ServerConfig {
        let mut config = ServerConfig::default();
        f(&mut config);
        config
    }

    #[test]
    fn defaults_bind_all_interfaces_on_8080() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr().unwrap().to_string(), "0.0.0.0:8080");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn production_enables_json_logs() {
        let config = with(|c| c.environment = Environment::Production);
        assert!(config.is_production());
        assert!(config.json_logs());
    }

    #[test]
    fn unparsable_host_is_reported_with_the_address() {
        let config = with(|c| c.host = "not a host".into());
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidHost("not a host:8080".into()))
        );
    }

    #[test]
    fn cors_origins_skip_blank_entries() {
        let config = with(|c| {
            c.cors_origins = Some(" http://localhost:5173, ,http://localhost:3000,".into())
        });
        assert_eq!(
            config.cors_origins_list(),
            vec!["http://localhost:5173", "http://localhost:3000"]
        );
        assert!(ServerConfig::default().cors_origins_list().is_empty());
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            (with(|c| c.port = 0), ValidationError::InvalidPort),
            (with(|c| c.request_timeout_secs = 0), ValidationError::InvalidTimeout),
            (with(|c| c.request_timeout_secs = 301), ValidationError::InvalidTimeout),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }
}
