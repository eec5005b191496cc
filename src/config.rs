//! Configuration management for the health monitor

use crate::errors::{MonitorError, Result};
use crate::models::ServiceEntry;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Services to monitor, in declaration order
    pub services: Vec<ServiceEntry>,

    /// Timeout applied to each individual probe request
    pub request_timeout: Duration,

    /// Interval between scheduled background refreshes
    pub check_interval: Duration,

    /// Bind address for the HTTP server
    pub host: String,

    /// Bind port for the HTTP server
    pub port: u16,
}

const DEFAULT_SERVICES: &str = "github=https://api.github.com,google=https://www.google.com";

impl Default for Config {
    fn default() -> Self {
        Self {
            services: parse_services(DEFAULT_SERVICES).unwrap_or_default(),
            request_timeout: Duration::from_secs(10),
            check_interval: Duration::from_secs(60),
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A malformed `SERVICES_CONFIG` is rejected here so the process fails
    /// fast at startup instead of per request.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(services_config) = env::var("SERVICES_CONFIG") {
            config.services = parse_services(&services_config)?;
        }

        if let Ok(timeout) = env::var("REQUEST_TIMEOUT_SECONDS") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.request_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(interval) = env::var("CHECK_INTERVAL_SECONDS") {
            if let Ok(seconds) = interval.parse::<u64>() {
                config.check_interval = Duration::from_secs(seconds);
            }
        }

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.services.is_empty() {
            return Err(MonitorError::Config(
                "at least one service must be configured".to_string(),
            ));
        }

        for service in &self.services {
            if service.name.is_empty() || service.url.is_empty() {
                return Err(MonitorError::Config(format!(
                    "service entry with empty name or URL: '{}={}'",
                    service.name, service.url
                )));
            }
        }

        if self.request_timeout.is_zero() {
            return Err(MonitorError::Config(
                "request_timeout must be greater than zero".to_string(),
            ));
        }

        if self.check_interval.is_zero() {
            return Err(MonitorError::Config(
                "check_interval must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

/// Parse a `name=url,name2=url2` service list, preserving declaration order
pub fn parse_services(raw: &str) -> Result<Vec<ServiceEntry>> {
    let mut services = Vec::new();

    for item in raw.split(',') {
        let item = item.trim();
        if item.is_empty() {
            continue;
        }

        let Some((name, url)) = item.split_once('=') else {
            return Err(MonitorError::Config(format!(
                "invalid service entry '{}', expected 'name=url'",
                item
            )));
        };

        let name = name.trim();
        let url = url.trim();
        if name.is_empty() || url.is_empty() {
            return Err(MonitorError::Config(format!(
                "empty name or URL in service entry '{}'",
                item
            )));
        }

        services.push(ServiceEntry {
            name: name.to_string(),
            url: url.to_string(),
        });
    }

    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.services[0].name, "github");
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.check_interval, Duration::from_secs(60));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_services_preserves_order() {
        let services =
            parse_services("zeta=http://z.example, alpha = http://a.example ,mid=http://m.example")
                .unwrap();

        let names: Vec<&str> = services.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(services[1].url, "http://a.example");
    }

    #[test]
    fn test_parse_services_rejects_malformed_entry() {
        assert!(parse_services("github https://api.github.com").is_err());
        assert!(parse_services("=http://no-name.example").is_err());
        assert!(parse_services("no-url=").is_err());
    }

    #[test]
    fn test_parse_services_keeps_equals_in_url() {
        let services = parse_services("q=http://example.com/?a=b").unwrap();
        assert_eq!(services[0].url, "http://example.com/?a=b");
    }

    #[test]
    fn test_validate_rejects_zero_durations() {
        let mut config = Config::default();
        config.request_timeout = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.check_interval = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_service_list() {
        let mut config = Config::default();
        config.services.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_overrides() {
        // Single test touching the environment so parallel tests do not race.
        unsafe {
            env::set_var("SERVICES_CONFIG", "api=http://localhost:9000");
            env::set_var("REQUEST_TIMEOUT_SECONDS", "3");
            env::set_var("CHECK_INTERVAL_SECONDS", "15");
            env::set_var("PORT", "9090");
        }

        let config = Config::from_env().unwrap();
        assert_eq!(config.services.len(), 1);
        assert_eq!(config.services[0].name, "api");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.check_interval, Duration::from_secs(15));
        assert_eq!(config.port, 9090);

        unsafe {
            env::remove_var("SERVICES_CONFIG");
            env::remove_var("REQUEST_TIMEOUT_SECONDS");
            env::remove_var("CHECK_INTERVAL_SECONDS");
            env::remove_var("PORT");
        }
    }
}
