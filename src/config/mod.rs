//! Configuration module - environment variable parsing

use std::env;
use std::net::SocketAddr;

use crate::game::WorldConfig;

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Server binding address
    pub server_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Allowed screen origins for CORS; empty allows any
    pub client_origins: Vec<String>,
    /// Enemy tanks spawned at session start
    pub enemy_count: usize,
    /// Seed for enemy placement
    pub world_seed: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        // Hosting platforms provide PORT, fall back to SERVER_ADDR or default
        let server_addr = match lookup("PORT") {
            Some(port) => format!("0.0.0.0:{}", port),
            None => lookup("SERVER_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
        };

        let client_origins = lookup("CLIENT_ORIGIN")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let enemy_count = match lookup("ENEMY_COUNT") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("ENEMY_COUNT", raw))?,
            None => 20,
        };

        let world_seed = match lookup("WORLD_SEED") {
            Some(raw) => raw
                .parse()
                .map_err(|_| ConfigError::Invalid("WORLD_SEED", raw))?,
            None => rand::random(),
        };

        Ok(Self {
            server_addr: server_addr
                .parse()
                .map_err(|_| ConfigError::InvalidAddress)?,
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            client_origins,
            enemy_count,
            world_seed,
        })
    }

    pub fn world(&self) -> WorldConfig {
        WorldConfig {
            enemy_count: self.enemy_count,
            seed: self.world_seed,
            ..WorldConfig::default()
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),

    #[error("Invalid server address format")]
    InvalidAddress,
}
