//! Task service implementing the owner-scoped task driving ports.
//!
//! The caller's identity is always supplied by the inbound adapter after token
//! validation; it is never read from a request body.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{debug, error};

use crate::domain::ports::{TaskPersistenceError, TaskRepository, TasksCommand, TasksQuery};
use crate::domain::{Error, NewTask, Task, TaskId, TaskPatch, UserId};

/// Message returned for absent, foreign, or unparseable task ids.
pub const TASK_NOT_FOUND_MESSAGE: &str = "task not found";

/// Task service over an owner-scoped repository.
pub struct TaskService<R> {
    tasks: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> Clone for TaskService<R> {
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R> TaskService<R> {
    /// Create a new service with the given repository and clock.
    pub fn new(tasks: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }
}

fn map_task_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } => {
            error!(%message, "task repository unavailable");
            Error::service_unavailable("task store unavailable")
        }
        TaskPersistenceError::Query { message } => {
            error!(%message, "task repository query failed");
            Error::internal("task store error")
        }
    }
}

fn parse_task_id(raw: &str) -> Result<TaskId, Error> {
    TaskId::parse(raw).ok_or_else(|| Error::not_found(TASK_NOT_FOUND_MESSAGE))
}

#[async_trait]
impl<R> TasksQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn list_tasks(&self, owner: &UserId) -> Result<Vec<Task>, Error> {
        self.tasks
            .list_for_owner(owner)
            .await
            .map_err(map_task_error)
    }
}

#[async_trait]
impl<R> TasksCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create_task(&self, owner: &UserId, new_task: NewTask) -> Result<Task, Error> {
        let task = Task::create(
            *owner,
            new_task.title().clone(),
            new_task.description().clone(),
            self.clock.utc(),
        );
        self.tasks.insert(&task).await.map_err(map_task_error)?;
        debug!(user_id = %owner, task_id = %task.id(), "task created");
        Ok(task)
    }

    async fn update_task(
        &self,
        owner: &UserId,
        task_id: &str,
        patch: TaskPatch,
    ) -> Result<Task, Error> {
        let id = parse_task_id(task_id)?;
        self.tasks
            .update_owned(owner, &id, &patch, self.clock.utc())
            .await
            .map_err(map_task_error)?
            .ok_or_else(|| Error::not_found(TASK_NOT_FOUND_MESSAGE))
    }

    async fn delete_task(&self, owner: &UserId, task_id: &str) -> Result<(), Error> {
        let id = parse_task_id(task_id)?;
        let removed = self
            .tasks
            .delete_owned(owner, &id)
            .await
            .map_err(map_task_error)?;
        if !removed {
            return Err(Error::not_found(TASK_NOT_FOUND_MESSAGE));
        }
        debug!(user_id = %owner, task_id = %id, "task removed");
        Ok(())
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
