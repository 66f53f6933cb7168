use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_pool_size: u32,
    pub connection_timeout: Duration,
}

impl DatabaseSettings {
    pub const DEFAULT_MAX_POOL_SIZE: u32 = 10;
    pub const DEFAULT_CONNECTION_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_pool_size: Self::DEFAULT_MAX_POOL_SIZE,
            connection_timeout: Self::DEFAULT_CONNECTION_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database: DatabaseSettings,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// `DATABASE_URL` is required; `HOST`, `PORT`, `DB_POOL_MAX_SIZE` and
    /// `DB_CONNECTION_TIMEOUT_SECS` fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&lookup, "PORT", 8080u16)?;
        let max_pool_size = parse_or(
            &lookup,
            "DB_POOL_MAX_SIZE",
            DatabaseSettings::DEFAULT_MAX_POOL_SIZE,
        )?;
        if max_pool_size == 0 {
            return Err(ConfigError::Invalid {
                name: "DB_POOL_MAX_SIZE",
                value: "0".to_string(),
            });
        }
        let timeout_secs = parse_or(
            &lookup,
            "DB_CONNECTION_TIMEOUT_SECS",
            DatabaseSettings::DEFAULT_CONNECTION_TIMEOUT.as_secs(),
        )?;

        Ok(Settings {
            host,
            port,
            database: DatabaseSettings {
                url,
                max_pool_size,
                connection_timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}
