//! Central module for application-wide configuration settings.
//!
//! Settings come from the process environment: the store connection URL and
//! the address the HTTP server binds to. Unset or blank variables fall back
//! to the defaults below.

use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://brewasis.db?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:6060";

/// Checked in order; the first non-blank value wins.
const DATABASE_URL_KEYS: [&str; 2] = ["BREWASIS_DATABASE_URL", "DATABASE_URL"];
const BIND_ADDR_KEY: &str = "BREWASIS_BIND_ADDR";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid {key} `{value}`: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup, e.g. a map in tests.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = DATABASE_URL_KEYS
            .iter()
            .find_map(|key| non_blank(*key))
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let bind = non_blank(BIND_ADDR_KEY).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind
            .trim()
            .parse::<SocketAddr>()
            .map_err(|err| ConfigError::Invalid {
                key: BIND_ADDR_KEY,
                value: bind.clone(),
                reason: err.to_string(),
            })?;

        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
