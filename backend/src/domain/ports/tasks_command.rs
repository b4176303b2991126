//! Driving port for mutating the caller's tasks.
//!
//! Ids arrive as raw path segments; a segment that is not a task id is
//! reported exactly like a task owned by someone else.

use async_trait::async_trait;

use crate::domain::{Error, NewTask, Task, TaskPatch, UserId};

/// Domain use-case port for task mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksCommand: Send + Sync {
    /// Create a task owned by `owner`.
    async fn create_task(&self, owner: &UserId, new_task: NewTask) -> Result<Task, Error>;

    /// Apply a partial update to one of `owner`'s tasks.
    async fn update_task(
        &self,
        owner: &UserId,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<Task, Error>;

    /// Remove one of `owner`'s tasks.
    async fn delete_task(&self, owner: &UserId, task_id: &str) -> Result<(), Error>;
}
