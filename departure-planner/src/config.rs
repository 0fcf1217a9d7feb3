//! Process configuration from environment variables.

use std::net::SocketAddr;

/// Default listen address.
pub const DEFAULT_ADDR: &str = "127.0.0.1:3000";

/// Default region appended to every geocoding query.
pub const DEFAULT_REGION: &str = "Hyderabad, India";

/// Errors reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or empty
    #[error("{0} is not set")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed
    #[error("{name} is invalid: {message}")]
    Invalid { name: &'static str, message: String },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `TOMTOM_API_KEY`
    pub tomtom_api_key: String,

    /// `WEATHERSTACK_API_KEY`
    pub weatherstack_api_key: String,

    /// `DEPARTURE_PLANNER_ADDR`
    pub addr: SocketAddr,

    /// `DEPARTURE_PLANNER_REGION`
    pub region: String,
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let tomtom_api_key =
            get("TOMTOM_API_KEY").ok_or(ConfigError::Missing("TOMTOM_API_KEY"))?;
        let weatherstack_api_key =
            get("WEATHERSTACK_API_KEY").ok_or(ConfigError::Missing("WEATHERSTACK_API_KEY"))?;

        let addr: SocketAddr = get("DEPARTURE_PLANNER_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "DEPARTURE_PLANNER_ADDR",
                message: e.to_string(),
            })?;

        let region = get("DEPARTURE_PLANNER_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string());

        Ok(Self {
            tomtom_api_key,
            weatherstack_api_key,
            addr,
            region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TOMTOM_API_KEY", "tt"),
            ("WEATHERSTACK_API_KEY", "ws"),
        ]))
        .unwrap();

        assert_eq!(config.tomtom_api_key, "tt");
        assert_eq!(config.weatherstack_api_key, "ws");
        assert_eq!(config.addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.region, "Hyderabad, India");
    }

    #[test]
    fn overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("TOMTOM_API_KEY", "tt"),
            ("WEATHERSTACK_API_KEY", "ws"),
            ("DEPARTURE_PLANNER_ADDR", "0.0.0.0:8080"),
            ("DEPARTURE_PLANNER_REGION", "Pune, India"),
        ]))
        .unwrap();

        assert_eq!(config.addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.region, "Pune, India");
    }

    #[test]
    fn missing_keys() {
        let err = AppConfig::from_lookup(lookup(&[("WEATHERSTACK_API_KEY", "ws")])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("TOMTOM_API_KEY"));
        assert_eq!(err.to_string(), "TOMTOM_API_KEY is not set");

        let err = AppConfig::from_lookup(lookup(&[
            ("TOMTOM_API_KEY", "tt"),
            ("WEATHERSTACK_API_KEY", "  "),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("WEATHERSTACK_API_KEY"));
    }

    #[test]
    fn invalid_addr() {
        let err = AppConfig::from_lookup(lookup(&[
            ("TOMTOM_API_KEY", "tt"),
            ("WEATHERSTACK_API_KEY", "ws"),
            ("DEPARTURE_PLANNER_ADDR", "localhost"),
        ]))
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "DEPARTURE_PLANNER_ADDR",
                ..
            }
        ));
    }
}
