use std::net::SocketAddr;

use anyhow::{Context, Result};

pub const DEFAULT_DB_PATH: &str = "iebank.db";
pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Runtime settings, read from `IEBANK_*` environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite file, or ":memory:"
    pub db_path: String,
    pub listen_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("IEBANK_DB_PATH").unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

        let listen_raw =
            lookup("IEBANK_LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_raw
            .parse()
            .with_context(|| format!("Invalid IEBANK_LISTEN_ADDR: {}", listen_raw))?;

        let log_format = lookup("IEBANK_LOG_FORMAT")
            .map(|v| LogFormat::parse(&v))
            .unwrap_or(LogFormat::Text);

        Ok(Config {
            db_path,
            listen_addr,
            log_format,
        })
    }
}
