//! Port for one-way secret hashing.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHasherError {
        /// Hash computation failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// The stored hash could not be parsed.
        MalformedHash { message: String } => "stored password hash is malformed: {message}",
    }
}

/// Salted, slow, one-way hashing of secrets.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHasherError>;

    /// Verify `password` against `stored`.
    ///
    /// When `stored` is `None` the adapter verifies against a decoy hash and
    /// returns `false`, so a missing account costs the same as a wrong secret.
    async fn verify(
        &self,
        password: &Password,
        stored: Option<&PasswordHash>,
    ) -> Result<bool, PasswordHasherError>;
}
