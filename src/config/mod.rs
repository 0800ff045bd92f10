//! Configuration module for the creator dashboard.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Number of growth snapshots kept when `DASHBOARD_HISTORY_LIMIT` is unset.
pub const DEFAULT_HISTORY_LIMIT: usize = 30;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pre-shared key guarding the JSON API (optional)
    pub api_psk: Option<String>,
    /// Path to the SQLite file backing the key-value store
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Maximum number of growth snapshots retained
    pub history_limit: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();

        let api_psk = env::var("DASHBOARD_API_PSK")
            .ok()
            .filter(|psk| !psk.trim().is_empty());

        let db_path = env::var("DASHBOARD_DB_PATH")
            .unwrap_or_else(|_| "./data/dashboard.sqlite".to_string())
            .into();

        let bind_addr = env::var("DASHBOARD_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e| format!("Invalid DASHBOARD_BIND_ADDR format: {}", e))?;

        let log_level = env::var("DASHBOARD_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let history_limit = match env::var("DASHBOARD_HISTORY_LIMIT") {
            Ok(raw) => match raw.trim().parse::<usize>() {
                Ok(limit) if limit > 0 => limit,
                _ => return Err(format!("Invalid DASHBOARD_HISTORY_LIMIT: {}", raw)),
            },
            Err(_) => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            api_psk,
            db_path,
            bind_addr,
            log_level,
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Both cases live in one test since they mutate process-wide env vars.
    #[test]
    fn test_config_from_env() {
        env::remove_var("DASHBOARD_API_PSK");
        env::remove_var("DASHBOARD_DB_PATH");
        env::remove_var("DASHBOARD_BIND_ADDR");
        env::remove_var("DASHBOARD_LOG_LEVEL");
        env::remove_var("DASHBOARD_HISTORY_LIMIT");

        let config = Config::from_env().unwrap();

        assert!(config.api_psk.is_none());
        assert_eq!(config.db_path, PathBuf::from("./data/dashboard.sqlite"));
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);

        env::set_var("DASHBOARD_HISTORY_LIMIT", "zero");
        assert!(Config::from_env().is_err());

        env::set_var("DASHBOARD_HISTORY_LIMIT", "5");
        assert_eq!(Config::from_env().unwrap().history_limit, 5);

        env::remove_var("DASHBOARD_HISTORY_LIMIT");
    }
}
