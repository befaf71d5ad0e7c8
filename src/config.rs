use std::env;
use std::path::PathBuf;

use crate::error::ConfigError;

pub const DEFAULT_DATA_PATH: &str = "data/supermarket_sales.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8060;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    /// Development mode: verbose logs and per-request traces.
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            debug: false,
        }
    }
}

impl Config {
    /// Defaults overridden by `DASHBOARD_DATA`, `DASHBOARD_HOST` and
    /// `DASHBOARD_PORT`.
    pub fn from_env(debug: bool) -> Result<Self, ConfigError> {
        Self::from_lookup(debug, |name| env::var(name).ok())
    }

    fn from_lookup(
        debug: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Config {
            debug,
            ..Config::default()
        };
        if let Some(path) = lookup("DASHBOARD_DATA") {
            config.data_path = PathBuf::from(path);
        }
        if let Some(host) = lookup("DASHBOARD_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("DASHBOARD_PORT") {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidVar {
                    name: "DASHBOARD_PORT",
                    value: port.clone(),
                })?;
        }
        Ok(config)
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn log_level(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }
}
