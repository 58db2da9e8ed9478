// Ward Reports - Runtime Configuration
// Read from the environment so nothing is hardcoded into the binary.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the SQLite database file.
pub const ENV_DATABASE: &str = "WARD_REPORTS_DB";

/// Environment variable naming the listen address.
pub const ENV_ADDR: &str = "WARD_REPORTS_ADDR";

const DEFAULT_DATABASE: &str = "reports.db";
const DEFAULT_ADDR: &str = "0.0.0.0:8000";

/// Runtime configuration for the server binary.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Build the configuration from environment variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let database_path = env::var(ENV_DATABASE)
            .unwrap_or_else(|_| DEFAULT_DATABASE.to_string())
            .into();

        let addr = env::var(ENV_ADDR).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
        let bind_addr = addr
            .parse()
            .with_context(|| format!("{} is not a valid socket address: {}", ENV_ADDR, addr))?;

        Ok(Self {
            database_path,
            bind_addr,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_env_unset() {
        let config = Config::from_env().unwrap();

        assert_eq!(config.database_path, PathBuf::from(DEFAULT_DATABASE));
        assert_eq!(config.bind_addr.port(), 8000);
    }
}
