//! Authentication service implementing the [`Authenticator`] driving port.
//!
//! Registration and login both end by issuing a signed token binding the
//! user's id and an expiry instant; validation reverses that and re-reads the
//! account so deleted users lose access immediately.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, error, info};

use crate::domain::ports::{
    Authenticator, PasswordHasher, PasswordHasherError, TokenCodec, UserPersistenceError,
    UserRepository,
};
use crate::domain::{
    AuthSession, DEFAULT_TOKEN_TTL_DAYS, Error, LoginCredentials, Registration, SessionToken,
    TokenClaims, User, UserCredentials, UserId,
};

/// Message returned for every failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "invalid email or password";
/// Message returned when no bearer token was presented.
pub const NO_TOKEN_MESSAGE: &str = "not authorized, no token";
/// Message returned for malformed, forged, or expired tokens.
pub const TOKEN_FAILED_MESSAGE: &str = "not authorized, token failed";
/// Message returned when a token names an account that no longer exists.
pub const USER_NOT_FOUND_MESSAGE: &str = "user not found";

const EMAIL_TAKEN_MESSAGE: &str = "email already registered";
const USERNAME_TAKEN_MESSAGE: &str = "username already taken";

/// Authentication service over a credential store, a hasher, and a codec.
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
    token_ttl: Duration,
}

impl<U, H, T> Clone for AuthService<U, H, T> {
    fn clone(&self) -> Self {
        Self {
            users: Arc::clone(&self.users),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
            clock: Arc::clone(&self.clock),
            token_ttl: self.token_ttl,
        }
    }
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a service issuing tokens valid for [`DEFAULT_TOKEN_TTL_DAYS`].
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
            token_ttl: Duration::days(DEFAULT_TOKEN_TTL_DAYS),
        }
    }

    /// Override the token validity window.
    #[must_use]
    pub fn with_token_ttl(mut self, token_ttl: Duration) -> Self {
        self.token_ttl = token_ttl;
        self
    }
}

impl<U, H, T> AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    fn issue_token(&self, user: &User) -> Result<SessionToken, Error> {
        let claims = TokenClaims::new(*user.id(), self.clock.utc(), self.token_ttl);
        self.tokens
            .encode(&claims)
            .map_err(|err| Error::internal(format!("token issuance failed: {err}")))
    }

    async fn ensure_available(&self, registration: &Registration) -> Result<(), Error> {
        if self
            .users
            .email_exists(registration.email())
            .await
            .map_err(map_user_error)?
        {
            return Err(duplicate_conflict("email"));
        }
        if self
            .users
            .username_exists(registration.username())
            .await
            .map_err(map_user_error)?
        {
            return Err(duplicate_conflict("username"));
        }
        Ok(())
    }
}

fn duplicate_conflict(field: &str) -> Error {
    let message = if field == "email" {
        EMAIL_TAKEN_MESSAGE
    } else {
        USERNAME_TAKEN_MESSAGE
    };
    Error::conflict(message).with_details(json!({ "field": field, "code": "duplicate" }))
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::service_unavailable("account store unavailable")
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal("account store error")
        }
        UserPersistenceError::Duplicate { field } => duplicate_conflict(&field),
    }
}

fn map_hasher_error(error: PasswordHasherError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H, T> Authenticator for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenCodec,
{
    async fn register(&self, registration: Registration) -> Result<AuthSession, Error> {
        self.ensure_available(&registration).await?;

        let hash = self
            .hasher
            .hash(registration.password())
            .await
            .map_err(map_hasher_error)?;
        let user = User::new(
            UserId::random(),
            registration.username().clone(),
            registration.email().clone(),
            self.clock.utc(),
        );
        self.users
            .insert(&UserCredentials::new(user.clone(), hash))
            .await
            .map_err(map_user_error)?;

        let token = self.issue_token(&user)?;
        info!(user_id = %user.id(), "registered user");
        Ok(AuthSession::new(user, token))
    }

    async fn login(&self, credentials: LoginCredentials) -> Result<AuthSession, Error> {
        let found = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?;
        let verified = self
            .hasher
            .verify(
                credentials.password(),
                found.as_ref().map(UserCredentials::password_hash),
            )
            .await
            .map_err(map_hasher_error)?;

        match found {
            Some(account) if verified => {
                let user = account.into_user();
                let token = self.issue_token(&user)?;
                debug!(user_id = %user.id(), "login succeeded");
                Ok(AuthSession::new(user, token))
            }
            _ => {
                debug!("login rejected");
                Err(Error::unauthorized(INVALID_CREDENTIALS_MESSAGE))
            }
        }
    }

    async fn validate(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.decode(token).map_err(|err| {
            debug!(reason = %err, "bearer token rejected");
            Error::unauthorized(TOKEN_FAILED_MESSAGE)
        })?;
        if claims.is_expired_at(self.clock.utc()) {
            debug!(user_id = %claims.subject(), "bearer token expired");
            return Err(Error::unauthorized(TOKEN_FAILED_MESSAGE));
        }
        self.current_user(claims.subject()).await
    }

    async fn current_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(USER_NOT_FOUND_MESSAGE))
    }
}

#[cfg(test)]
#[path = "auth_service_tests.rs"]
mod tests;
