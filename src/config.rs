//! Application configuration loaded from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Storage ===
    /// Path of the JSON file holding the student list.
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    // === Server Configuration ===
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_host")]
    pub bind_host: String,

    /// HTTP server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Expose Prometheus metrics at `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("bd.json")
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            bind_host: default_bind_host(),
            port: default_port(),
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.data_file.as_os_str().is_empty() {
            return Err("DATA_FILE must not be empty".to_string());
        }

        if self.port == 0 {
            return Err("PORT must be greater than 0".to_string());
        }

        if self.bind_host.parse::<IpAddr>().is_err() {
            return Err(format!("BIND_HOST must be an IP address, got {:?}", self.bind_host));
        }

        Ok(())
    }

    /// Socket address the server listens on.
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        let ip: IpAddr = self
            .bind_host
            .parse()
            .map_err(|e| format!("invalid BIND_HOST {:?}: {}", self.bind_host, e))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_are_sensible() {
        let config = Config::default();
        assert_eq!(config.data_file, PathBuf::from("bd.json"));
        assert_eq!(config.port, 8000);
        assert!(config.metrics_enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_data_file() {
        let config = Config {
            data_file: PathBuf::new(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_port() {
        let config = Config {
            port: 0,
            ..Config::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_hostname() {
        let config = Config {
            bind_host: "localhost".to_string(),
            ..Config::default()
        };

        assert!(config.validate().is_err());
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn bind_addr_combines_host_and_port() {
        let config = Config {
            bind_host: "127.0.0.1".to_string(),
            port: 9001,
            ..Config::default()
        };

        assert_eq!(config.bind_addr().unwrap().to_string(), "127.0.0.1:9001");
    }
}
