//! Configuration module for environment variables and application settings

use std::env;
use anyhow::{Result, anyhow};
use chrono::Duration;

use crate::database::connection::DatabaseConfig;

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// PostgreSQL configuration
    pub database: DatabaseConfig,

    /// Document store configuration (external collaborator, not queried
    /// by any handler — validated at startup only)
    pub mongo: MongoConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub uri: String,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Server-held HS256 signing secret
    pub secret: String,
    /// Lifetime of issued tokens
    pub expires_in: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required variables produce an error when absent, which the server
    /// bootstrap treats as fatal. Optional variables fall back to defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .unwrap_or_else(|_| "4001".to_string())
                    .parse()
                    .unwrap_or(4001),
            },

            database: DatabaseConfig::from_env()?,

            mongo: MongoConfig {
                uri: env::var("MONGO_URI")
                    .map_err(|_| anyhow!("MONGO_URI environment variable is required"))?,
            },

            jwt: JwtConfig {
                secret: env::var("JWT_SECRET")
                    .map_err(|_| anyhow!("JWT_SECRET environment variable is required"))?,
                expires_in: parse_expiry(
                    &env::var("JWT_EXPIRES_IN").unwrap_or_else(|_| "7d".to_string()),
                )?,
            },
        })
    }
}

/// Parse a token lifetime such as `7d`, `12h`, `30m`, `45s`, or a plain
/// number of seconds.
pub fn parse_expiry(raw: &str) -> Result<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(anyhow!("JWT_EXPIRES_IN must not be empty"));
    }

    let (value, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], Some(c.to_ascii_lowercase())),
        _ => (raw, None),
    };

    let value: i64 = value
        .parse()
        .map_err(|_| anyhow!("Invalid JWT_EXPIRES_IN value: {raw}"))?;
    if value <= 0 {
        return Err(anyhow!("JWT_EXPIRES_IN must be positive: {raw}"));
    }

    match unit {
        Some('d') => Ok(Duration::days(value)),
        Some('h') => Ok(Duration::hours(value)),
        Some('m') => Ok(Duration::minutes(value)),
        Some('s') | None => Ok(Duration::seconds(value)),
        Some(other) => Err(anyhow!("Unknown JWT_EXPIRES_IN unit: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_suffix() {
        assert_eq!(parse_expiry("7d").unwrap(), Duration::days(7));
    }

    #[test]
    fn parses_hour_and_minute_suffixes() {
        assert_eq!(parse_expiry("12h").unwrap(), Duration::hours(12));
        assert_eq!(parse_expiry("30m").unwrap(), Duration::minutes(30));
    }

    #[test]
    fn parses_bare_seconds() {
        assert_eq!(parse_expiry("3600").unwrap(), Duration::seconds(3600));
        assert_eq!(parse_expiry("45s").unwrap(), Duration::seconds(45));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_expiry("").is_err());
        assert!(parse_expiry("soon").is_err());
        assert!(parse_expiry("7w").is_err());
        assert!(parse_expiry("-1d").is_err());
    }
}
