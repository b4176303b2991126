//! Driving port for reading the caller's tasks.

use async_trait::async_trait;

use crate::domain::{Error, Task, UserId};

/// Domain use-case port for listing tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksQuery: Send + Sync {
    /// Tasks owned by `owner`, newest first.
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, Error>;
}
