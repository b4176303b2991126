//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{Authenticator, TasksCommand, TasksQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn Authenticator>,
    pub tasks: Arc<dyn TasksCommand>,
    pub tasks_query: Arc<dyn TasksQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use taskdeck::domain::{AuthService, TaskService};
    /// use taskdeck::inbound::http::state::HttpState;
    /// use taskdeck::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
    /// use taskdeck::outbound::security::{Argon2PasswordHasher, HashCost, HmacTokenCodec};
    /// use zeroize::Zeroizing;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let clock = Arc::new(DefaultClock);
    /// let auth = AuthService::new(
    ///     Arc::new(InMemoryUserRepository::new()),
    ///     Arc::new(Argon2PasswordHasher::new(HashCost::default())?),
    ///     Arc::new(HmacTokenCodec::new(Zeroizing::new(vec![7; 32]))),
    ///     clock.clone(),
    /// );
    /// let tasks = Arc::new(TaskService::new(Arc::new(InMemoryTaskRepository::new()), clock));
    /// let state = HttpState::new(Arc::new(auth), tasks.clone(), tasks);
    /// let _auth = state.auth.clone();
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(
        auth: Arc<dyn Authenticator>,
        tasks: Arc<dyn TasksCommand>,
        tasks_query: Arc<dyn TasksQuery>,
    ) -> Self {
        Self {
            auth,
            tasks,
            tasks_query,
        }
    }
}
