//! Port abstraction for the task record store.
//!
//! Every method takes the owning [`UserId`]. Adapters apply it as part of the
//! query predicate, so a record owned by someone else is indistinguishable
//! from one that does not exist.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Task, TaskId, TaskPatch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

/// Owner-scoped task store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks owned by `owner`, newest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Persist a freshly created task.
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// Apply `patch` to the task matching both `id` and `owner`.
    ///
    /// Returns `None` when no such task exists.
    async fn update_owned(
        &self,
        owner: &UserId,
        id: &TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError>;

    /// Remove the task matching both `id` and `owner`.
    ///
    /// Returns `false` when no such task exists.
    async fn delete_owned(&self, owner: &UserId, id: &TaskId)
    -> Result<bool, TaskPersistenceError>;
}
