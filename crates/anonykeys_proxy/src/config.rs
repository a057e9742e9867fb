//! Proxy server configuration from environment variables.
//!
//! - `ANONYKEYS_PROXY_LISTEN` - bind address (default: `127.0.0.1:8787`)
//! - `ANONYKEYS_PROXY_TIMEOUT_SECS` - upstream request timeout (default: 30)
//! - `ANONYKEYS_LOG` - log level (default: `info`)
//!
//! A `.env` file in the working directory is read first when present.

use std::net::SocketAddr;
use std::time::Duration;

use anonykeys_engine::FetchSettings;
use anyhow::{bail, Context, Result};
use log::LevelFilter;

pub const LISTEN_VAR: &str = "ANONYKEYS_PROXY_LISTEN";
pub const TIMEOUT_VAR: &str = "ANONYKEYS_PROXY_TIMEOUT_SECS";
pub const LOG_VAR: &str = "ANONYKEYS_LOG";

const DEFAULT_LISTEN: &str = "127.0.0.1:8787";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct ProxyConfig {
    pub listen_addr: SocketAddr,
    pub request_timeout: Duration,
    pub log_level: LevelFilter,
}

impl ProxyConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; unset keys take their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen = lookup(LISTEN_VAR).unwrap_or_else(|| DEFAULT_LISTEN.to_string());
        let listen_addr = listen
            .parse()
            .with_context(|| format!("{LISTEN_VAR} is not a socket address: {listen:?}"))?;

        let timeout_secs = match lookup(TIMEOUT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{TIMEOUT_VAR} must be a whole number of seconds"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("{TIMEOUT_VAR} must be greater than zero");
        }

        let log_level = match lookup(LOG_VAR) {
            Some(raw) => shell_logging::parse_level(&raw)
                .with_context(|| format!("{LOG_VAR} is not a log level: {raw:?}"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            listen_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.request_timeout,
            ..FetchSettings::default()
        }
    }
}
