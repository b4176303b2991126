//! In-memory `TaskRepository`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskId, TaskPatch, UserId};

/// Task store held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

/// Owner scoping predicate shared by every lookup.
fn visible_to(task: &Task, owner: &UserId) -> bool {
    task.owner() == owner
}

impl InMemoryTaskRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<Task>>, TaskPersistenceError> {
        self.tasks
            .read()
            .map_err(|_| TaskPersistenceError::query("task store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<Task>>, TaskPersistenceError> {
        self.tasks
            .write()
            .map_err(|_| TaskPersistenceError::query("task store lock poisoned"))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut owned: Vec<Task> = self
            .read()?
            .iter()
            .filter(|task| visible_to(task, owner))
            .cloned()
            .collect();
        owned.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        Ok(owned)
    }

    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        self.write()?.push(task.clone());
        Ok(())
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut tasks = self.write()?;
        let updated = tasks
            .iter_mut()
            .find(|task| visible_to(task, owner) && task.id() == *id)
            .map(|task| {
                task.apply(patch, updated_at);
                task.clone()
            });
        Ok(updated)
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &TaskId,
    ) -> Result<bool, TaskPersistenceError> {
        let mut tasks = self.write()?;
        let position = tasks
            .iter()
            .position(|task| visible_to(task, owner) && task.id() == *id);
        Ok(position.map(|index| tasks.remove(index)).is_some())
    }
}
