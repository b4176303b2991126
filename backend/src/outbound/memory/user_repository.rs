//! In-memory `UserRepository`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, User, UserCredentials, UserId, Username};

/// Credential store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    accounts: RwLock<Vec<UserCredentials>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<UserCredentials>>, UserPersistenceError> {
        self.accounts
            .read()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<UserCredentials>>, UserPersistenceError> {
        self.accounts
            .write()
            .map_err(|_| UserPersistenceError::query("user store lock poisoned"))
    }

    /// Remove an account, as an operator deleting a user would.
    pub fn remove(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut accounts = self.write()?;
        let before = accounts.len();
        accounts.retain(|account| account.user().id() != id);
        Ok(accounts.len() != before)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        let mut accounts = self.write()?;
        let user = credentials.user();
        if accounts.iter().any(|a| a.user().email() == user.email()) {
            return Err(UserPersistenceError::duplicate("email"));
        }
        if accounts.iter().any(|a| a.user().username() == user.username()) {
            return Err(UserPersistenceError::duplicate("username"));
        }
        accounts.push(credentials.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .read()?
            .iter()
            .find(|a| a.user().id() == id)
            .map(|a| a.user().clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(self
            .read()?
            .iter()
            .find(|a| a.user().email().as_ref() == email)
            .cloned())
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        Ok(self.read()?.iter().any(|a| a.user().email() == email))
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        Ok(self.read()?.iter().any(|a| a.user().username() == username))
    }
}
