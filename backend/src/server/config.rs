//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use chrono::Duration;
use taskdeck::domain::DEFAULT_TOKEN_TTL_DAYS;
use taskdeck::outbound::persistence::DbPool;
use taskdeck::outbound::security::HashCost;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) token_key: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
    pub(crate) hash_cost: HashCost,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Construct a configuration with in-memory stores and default costs.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, token_key: Zeroizing<Vec<u8>>) -> Self {
        Self {
            bind_addr,
            token_key,
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
            hash_cost: HashCost::default(),
            db_pool: None,
        }
    }

    /// Attach a database connection pool for the Diesel repositories.
    ///
    /// Without one the server keeps accounts and tasks in process memory.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Override the bearer token validity window.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }

    /// Override the Argon2 cost parameters.
    #[must_use]
    pub fn with_hash_cost(mut self, hash_cost: HashCost) -> Self {
        self.hash_cost = hash_cost;
        self
    }
}
