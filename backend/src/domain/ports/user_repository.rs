//! Port abstraction for the credential store and its errors.
use async_trait::async_trait;

use crate::domain::{EmailAddress, User, UserCredentials, UserId, Username};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A unique field already belongs to another account.
        Duplicate { field: String } => "user repository duplicate value for {field}",
    }
}

/// Credential store.
///
/// Adapters guarantee that `username` and `email` are unique; a violating
/// insert fails with [`UserPersistenceError::Duplicate`] naming the field.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a newly registered account.
    async fn insert(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError>;

    /// Fetch the public projection of an account.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch an account and its stored hash by normalised email.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Whether any account uses `email`.
    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError>;

    /// Whether any account uses `username`.
    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError>;
}
