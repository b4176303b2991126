//! Process configuration loaded via OrthoConfig.
//!
//! Values come from `TASKDECK_*` environment variables, matching CLI flags,
//! or a config file, in OrthoConfig's usual precedence order.

use std::net::SocketAddr;

use chrono::Duration;
use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::DEFAULT_TOKEN_TTL_DAYS;
use crate::outbound::security::HashCost;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const MAX_TOKEN_TTL_DAYS: i64 = 3650;

/// Errors raised while interpreting loaded settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The bind address is not a `host:port` socket address.
    #[error("invalid bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    /// Token lifetime must be between one day and ten years.
    #[error("token lifetime must be between 1 and 3650 days, got {days}")]
    InvalidTokenTtl { days: i64 },
}

/// Top-level server settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKDECK")]
pub struct AppSettings {
    /// Socket address the HTTP listener binds to.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. When absent the in-memory stores are used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub db_pool_size: Option<u32>,
    /// Bearer token lifetime in days.
    pub token_ttl_days: Option<i64>,
    /// Skip applying embedded migrations on startup.
    #[ortho_config(default = false)]
    pub skip_migrations: bool,
    /// Argon2 memory cost in KiB.
    pub hash_memory_kib: Option<u32>,
    /// Argon2 pass count.
    pub hash_iterations: Option<u32>,
}

impl AppSettings {
    /// Return the parsed bind address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBindAddr`] for unparsable values.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value
            .parse()
            .map_err(|source| SettingsError::InvalidBindAddr {
                value: value.to_owned(),
                source,
            })
    }

    /// Return the database URL, treating a blank value as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Return the token validity window.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidTokenTtl`] for values outside
    /// `1..=3650`.
    pub fn token_ttl(&self) -> Result<Duration, SettingsError> {
        let days = self.token_ttl_days.unwrap_or(DEFAULT_TOKEN_TTL_DAYS);
        if !(1..=MAX_TOKEN_TTL_DAYS).contains(&days) {
            return Err(SettingsError::InvalidTokenTtl { days });
        }
        Duration::try_days(days).ok_or(SettingsError::InvalidTokenTtl { days })
    }

    /// Return the Argon2 cost, using the library defaults for unset fields.
    pub fn hash_cost(&self) -> HashCost {
        let defaults = HashCost::default();
        HashCost {
            memory_kib: self.hash_memory_kib.unwrap_or(defaults.memory_kib),
            iterations: self.hash_iterations.unwrap_or(defaults.iterations),
        }
    }
}
