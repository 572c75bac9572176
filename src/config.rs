//! Configuration loader for the `sapm-alerts` service.
//!
//! This module centralizes all runtime configuration values and their defaults,
//! loading from environment variables (with optional `.env` file support
//! provided by the caller), so that `env::var` calls are not scattered
//! throughout the codebase.
//!
use std::{env, net::SocketAddr, path::PathBuf};

use anyhow::{anyhow, Result};

use crate::store::TimestampPolicy;

/// Parse an optional integer environment variable with a default value.
macro_rules! parse_env_usize {
    ($var_name:expr, $default:expr) => {
        env::var($var_name)
            .ok()
            .map(|v| v.parse::<usize>())
            .transpose()
            .map_err(|e| anyhow!("Invalid {}: {}", $var_name, e))?
            .unwrap_or($default)
    };
}

/// Parse a required string environment variable.
macro_rules! require_env {
    ($var_name:expr) => {
        env::var($var_name)
            .map_err(|_| anyhow!("{} must be set in .env or environment", $var_name))?
    };
}

/// Strongly typed application configuration.
///
/// All fields are immutable after loading, ensuring a consistent configuration
/// snapshot for the lifetime of the application.
#[derive(Debug, Clone)]
pub struct Config {
    // ---
    /// CSV file holding the sensor readings.
    pub data_path: PathBuf,

    /// Number of readings shown by the latest-alerts view when no limit is given.
    pub latest_count: usize,

    /// Upper bound applied to any requested `limit`.
    pub max_limit: usize,

    /// Handling of rows with an unparsable `time` value.
    pub timestamp_policy: TimestampPolicy,

    /// Address the HTTP server binds to.
    pub listen_addr: SocketAddr,
}

/// Load configuration from environment variables with defaults.
///
/// Required:
/// - `SAPM_DATA_PATH` – path of the reading CSV
///
/// Optional:
/// - `SAPM_LATEST_COUNT` – default latest readings (default: 3)
/// - `SAPM_MAX_LIMIT` – max readings per response (default: 1000)
/// - `SAPM_TIMESTAMP_POLICY` – `reject` or `skip` (default: `reject`)
/// - `SAPM_LISTEN_ADDR` – bind address (default: `0.0.0.0:8080`)
///
/// Returns an error if any required variable is missing or invalid.
pub fn load_from_env() -> Result<Config> {
    // ---
    let data_path = PathBuf::from(require_env!("SAPM_DATA_PATH"));
    let latest_count = parse_env_usize!("SAPM_LATEST_COUNT", 3);
    let max_limit = parse_env_usize!("SAPM_MAX_LIMIT", 1000);

    let timestamp_policy = match env::var("SAPM_TIMESTAMP_POLICY").ok().as_deref() {
        None => TimestampPolicy::default(),
        Some(v) => parse_policy(v)?,
    };

    let listen_addr = env::var("SAPM_LISTEN_ADDR")
        .ok()
        .map(|v| v.parse::<SocketAddr>())
        .transpose()
        .map_err(|e| anyhow!("Invalid SAPM_LISTEN_ADDR: {}", e))?
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 8080)));

    if max_limit == 0 {
        return Err(anyhow!("SAPM_MAX_LIMIT must be greater than zero"));
    }

    Ok(Config {
        data_path,
        latest_count: latest_count.min(max_limit),
        max_limit,
        timestamp_policy,
        listen_addr,
    })
}

fn parse_policy(value: &str) -> Result<TimestampPolicy> {
    // ---
    match value.trim().to_ascii_lowercase().as_str() {
        "reject" => Ok(TimestampPolicy::Reject),
        "skip" => Ok(TimestampPolicy::Skip),
        other => Err(anyhow!(
            "Invalid SAPM_TIMESTAMP_POLICY: '{}' (expected 'reject' or 'skip')",
            other
        )),
    }
}

impl Config {
    /// Log the loaded configuration for debugging purposes.
    pub fn log_config(&self) {
        // ---
        tracing::info!("Configuration loaded:");
        tracing::info!("  SAPM_DATA_PATH        : {}", self.data_path.display());
        tracing::info!("  SAPM_LATEST_COUNT     : {}", self.latest_count);
        tracing::info!("  SAPM_MAX_LIMIT        : {}", self.max_limit);
        tracing::info!("  SAPM_TIMESTAMP_POLICY : {:?}", self.timestamp_policy);
        tracing::info!("  SAPM_LISTEN_ADDR      : {}", self.listen_addr);
    }

    /// Clamp a requested limit, falling back to `default` when absent.
    pub fn effective_limit(&self, requested: Option<usize>, default: usize) -> usize {
        requested.unwrap_or(default).min(self.max_limit)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn create_test_config() -> Config {
        // ---
        Config {
            data_path: PathBuf::from("sensor_data.csv"),
            latest_count: 3,
            max_limit: 50,
            timestamp_policy: TimestampPolicy::Reject,
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }

    #[test]
    fn test_parse_policy() {
        // ---
        assert_eq!(parse_policy("reject").unwrap(), TimestampPolicy::Reject);
        assert_eq!(parse_policy(" Skip ").unwrap(), TimestampPolicy::Skip);
        assert!(parse_policy("drop").is_err());
    }

    #[test]
    fn test_effective_limit() {
        // ---
        let cfg = create_test_config();
        assert_eq!(cfg.effective_limit(None, cfg.latest_count), 3);
        assert_eq!(cfg.effective_limit(Some(10), 3), 10);
        assert_eq!(cfg.effective_limit(Some(500), 3), 50);
        assert_eq!(cfg.effective_limit(Some(0), 3), 0);
    }
}
