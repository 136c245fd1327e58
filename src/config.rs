//! Configuration management

use std::time::Duration;

use anyhow::{Context, Result};

use crate::services::transmitter::TransmitterConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Backend API base URL
    pub api_url: String,

    /// Records per submission chunk
    pub chunk_size: usize,

    /// Pacing delay between chunks, in milliseconds
    pub chunk_delay_ms: u64,

    /// Per-request timeout, in seconds
    pub request_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let api_url = std::env::var("ONBIT_API_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());

        let chunk_size = parse_var("IMPORT_CHUNK_SIZE", 100usize)?;
        if chunk_size == 0 {
            anyhow::bail!("IMPORT_CHUNK_SIZE must be at least 1");
        }

        let chunk_delay_ms = parse_var("IMPORT_CHUNK_DELAY_MS", 100u64)?;
        let request_timeout_secs = parse_var("IMPORT_REQUEST_TIMEOUT_SECS", 30u64)?;

        Ok(Self {
            api_url,
            chunk_size,
            chunk_delay_ms,
            request_timeout_secs,
        })
    }

    pub fn transmitter(&self) -> TransmitterConfig {
        TransmitterConfig {
            chunk_size: self.chunk_size,
            chunk_delay: Duration::from_millis(self.chunk_delay_ms),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("{} is not a valid value for {}", raw, name)),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults_apply_when_unset() {
        std::env::remove_var("IMPORT_CHUNK_SIZE");
        std::env::remove_var("IMPORT_CHUNK_DELAY_MS");

        let config = Config::from_env().unwrap();
        assert_eq!(config.chunk_size, 100);
        assert_eq!(config.chunk_delay_ms, 100);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_chunk_size_overridable() {
        std::env::set_var("IMPORT_CHUNK_SIZE", "250");
        let config = Config::from_env().unwrap();
        assert_eq!(config.chunk_size, 250);
        std::env::remove_var("IMPORT_CHUNK_SIZE");
    }

    #[test]
    #[ignore] // requires --test-threads=1 due to env var race
    fn test_config_rejects_zero_chunk_size() {
        std::env::set_var("IMPORT_CHUNK_SIZE", "0");
        assert!(Config::from_env().is_err());
        std::env::remove_var("IMPORT_CHUNK_SIZE");
    }

    #[test]
    fn test_transmitter_config_uses_millis() {
        let config = Config {
            api_url: "http://localhost:8080".to_string(),
            chunk_size: 50,
            chunk_delay_ms: 250,
            request_timeout_secs: 10,
        };
        let transmitter = config.transmitter();
        assert_eq!(transmitter.chunk_size, 50);
        assert_eq!(transmitter.chunk_delay, Duration::from_millis(250));
    }
}
