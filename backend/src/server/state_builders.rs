//! Builders wiring adapters into the HTTP state.

use std::sync::Arc;

use chrono::Duration;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use taskdeck::domain::ports::{TaskRepository, UserRepository};
use taskdeck::domain::{AuthService, TaskService};
use taskdeck::inbound::http::state::HttpState;
use taskdeck::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use taskdeck::outbound::persistence::{DieselTaskRepository, DieselUserRepository};
use taskdeck::outbound::security::{Argon2PasswordHasher, HmacTokenCodec};

use super::ServerConfig;

/// Security adapters shared by both storage backends.
struct Security {
    hasher: Arc<Argon2PasswordHasher>,
    codec: Arc<HmacTokenCodec>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

fn assemble<U, R>(users: Arc<U>, tasks: Arc<R>, security: Security) -> HttpState
where
    U: UserRepository + 'static,
    R: TaskRepository + 'static,
{
    let Security {
        hasher,
        codec,
        clock,
        token_ttl,
    } = security;
    let auth = AuthService::new(users, hasher, codec, Arc::clone(&clock)).with_token_ttl(token_ttl);
    let tasks = Arc::new(TaskService::new(tasks, clock));
    HttpState::new(Arc::new(auth), tasks.clone(), tasks)
}

/// Build HTTP state backed by PostgreSQL when a pool is configured and by
/// process memory otherwise.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the Argon2 cost parameters are rejected.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let hasher = Argon2PasswordHasher::new(config.hash_cost)
        .map_err(|err| std::io::Error::other(format!("password hasher setup failed: {err}")))?;
    let codec = HmacTokenCodec::new(config.token_key.clone());
    info!(key_fingerprint = %codec.fingerprint(), "token signing key loaded");

    let security = Security {
        hasher: Arc::new(hasher),
        codec: Arc::new(codec),
        clock: Arc::new(DefaultClock),
        token_ttl: config.token_ttl,
    };

    Ok(match &config.db_pool {
        Some(pool) => assemble(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselTaskRepository::new(pool.clone())),
            security,
        ),
        None => {
            warn!("no database configured; accounts and tasks are kept in memory only");
            assemble(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTaskRepository::new()),
                security,
            )
        }
    })
}
