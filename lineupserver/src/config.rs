//! Server environment configuration
//!
//! Loaded from a `.env` file when present, then the process environment,
//! then defaults.

use std::path::Path;

use anyhow::Result;
use tracing::{info, warn};

/// Default port of the original lineup builder server.
pub const DEFAULT_PORT: u16 = 35007;

#[derive(Debug, Clone)]
pub struct LineupServerConfig {
    /// Listening host address.
    pub host: String,
    /// Listening port.
    pub port: u16,
    /// Path of the roster source file.
    pub roster_path: String,
}

impl LineupServerConfig {
    /// Loads the configuration from environment variables.
    ///
    /// Keys: `lineup_host` (default "127.0.0.1"), `lineup_port` (default
    /// 35007), `roster_path` (default "players.json").
    pub fn from_env() -> Result<Self> {
        Self::load_env_file();

        let config = Self {
            host: std::env::var("lineup_host").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("lineup_port")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            roster_path: std::env::var("roster_path").unwrap_or_else(|_| "players.json".to_string()),
        };

        info!("lineup server config loaded: {:?}", config);
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn load_env_file() {
        let env_paths = [".env", "../.env"];

        let mut loaded = false;
        for path in env_paths {
            if Path::new(path).exists() && dotenv::from_filename(path).is_ok() {
                info!(".env file loaded from {}", path);
                loaded = true;
                break;
            }
        }

        if !loaded {
            warn!("no .env file found, using system environment and defaults");
        }
    }
}

pub fn validate_config(config: &LineupServerConfig) -> Result<()> {
    if config.port == 0 {
        anyhow::bail!("invalid lineup server port: {}", config.port);
    }
    if config.host.is_empty() {
        anyhow::bail!("lineup server host is empty");
    }
    if config.roster_path.is_empty() {
        anyhow::bail!("roster path is empty");
    }
    Ok(())
}
