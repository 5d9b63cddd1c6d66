use std::env;
use thiserror::Error;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("STATUS_PORT must be a port number, got `{0}`")]
    InvalidPort(String),
}

/// Producer bind address.
///
/// ## Environment
/// - `STATUS_HOST`: interface to bind (default `127.0.0.1`)
/// - `STATUS_PORT`: TCP port (default `8080`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(env::var("STATUS_HOST").ok(), env::var("STATUS_PORT").ok())
    }

    fn from_vars(host: Option<String>, port: Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            config.host = host.trim().to_string();
        }
        if let Some(port) = port {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        Ok(config)
    }

    pub fn bind_addr(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = ServerConfig::from_vars(None, None).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.bind_addr(), ("127.0.0.1", 8080));
    }

    #[test]
    fn test_overrides_from_vars() {
        let config =
            ServerConfig::from_vars(Some("0.0.0.0".to_string()), Some(" 9090 ".to_string()))
                .unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
    }

    #[test]
    fn test_blank_host_keeps_default() {
        let config = ServerConfig::from_vars(Some("  ".to_string()), None).unwrap();
        assert_eq!(config.host, DEFAULT_HOST);
    }

    #[test]
    fn test_invalid_port() {
        let err = ServerConfig::from_vars(None, Some("http".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort("http".to_string()));

        assert!(ServerConfig::from_vars(None, Some("70000".to_string())).is_err());
    }
}
