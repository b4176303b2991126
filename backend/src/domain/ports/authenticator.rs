//! Driving port for registration, login, and bearer token validation.
//!
//! Inbound adapters call this port without knowing which hasher, codec, or
//! store backs it, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{AuthSession, Error, LoginCredentials, Registration, User, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    /// Create an account and issue a token for it.
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error>;

    /// Resolve a presented bearer token to its identity.
    async fn validate(&self, token: &str) -> Result<User, Error>;

    /// Fetch the public projection of an authenticated identity.
    async fn current_user(&self, user_id: &UserId) -> Result<User, Error>;
}
