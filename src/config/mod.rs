//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;

use crate::game::broadcast::DEFAULT_CAPACITY;

/// Application configuration loaded from environment variables.
/// Arena bounds and tick rate are fixed and deliberately not listed here.
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Allowed client origins for CORS (comma-separated); any origin when unset
    pub client_origin: Option<String>,
    /// Seed for spawn positions; OS entropy when unset
    pub spawn_seed: Option<u64>,
    /// Buffer depth of the broadcast channel
    pub broadcast_capacity: usize,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Hosting platforms provide PORT, fall back to SERVER_ADDR or default
        let server_addr = match lookup("PORT") {
            Some(port) => format!("0.0.0.0:{}", port),
            None => lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string()),
        };

        let spawn_seed = lookup("SPAWN_SEED")
            .map(|v| v.trim().parse::<u64>())
            .transpose()
            .map_err(|_| ConfigError::InvalidNumber("SPAWN_SEED"))?;

        let broadcast_capacity = lookup("BROADCAST_CAPACITY")
            .map(|v| v.trim().parse::<usize>())
            .transpose()
            .map_err(|_| ConfigError::InvalidNumber("BROADCAST_CAPACITY"))?
            .unwrap_or(DEFAULT_CAPACITY);

        if broadcast_capacity == 0 {
            return Err(ConfigError::InvalidNumber("BROADCAST_CAPACITY"));
        }

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            client_origin: lookup("CLIENT_ORIGIN").filter(|s| !s.trim().is_empty()),

            spawn_seed,
            broadcast_capacity,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            log_level: "info".to_string(),
            client_origin: None,
            spawn_seed: None,
            broadcast_capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server address format")]
    InvalidAddress,

    #[error("Invalid numeric value for environment variable: {0}")]
    InvalidNumber(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = load(&[]).unwrap();
        assert_eq!(config.server_addr.port(), 3000);
        assert_eq!(config.log_level, "info");
        assert!(config.client_origin.is_none());
        assert!(config.spawn_seed.is_none());
        assert_eq!(config.broadcast_capacity, DEFAULT_CAPACITY);
    }

    #[test]
    fn port_wins_over_server_addr() {
        let config = load(&[("PORT", "8081"), ("SERVER_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.server_addr.port(), 8081);

        let config = load(&[("SERVER_ADDR", "127.0.0.1:9000")]).unwrap();
        assert_eq!(config.server_addr.to_string(), "127.0.0.1:9000");
    }

    #[test]
    fn parses_optional_numbers() {
        let config = load(&[("SPAWN_SEED", "42"), ("BROADCAST_CAPACITY", "32")]).unwrap();
        assert_eq!(config.spawn_seed, Some(42));
        assert_eq!(config.broadcast_capacity, 32);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(load(&[("PORT", "nope")]), Err(ConfigError::InvalidAddress)));
        assert!(matches!(
            load(&[("SPAWN_SEED", "-1")]),
            Err(ConfigError::InvalidNumber("SPAWN_SEED"))
        ));
        assert!(matches!(
            load(&[("BROADCAST_CAPACITY", "0")]),
            Err(ConfigError::InvalidNumber("BROADCAST_CAPACITY"))
        ));
    }

    #[test]
    fn blank_origin_means_any() {
        let config = load(&[("CLIENT_ORIGIN", "  ")]).unwrap();
        assert!(config.client_origin.is_none());
    }
}
