//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.
//!
//! Every statement is built on [`owned_by`], so the owner predicate is part of
//! the SQL `WHERE` clause rather than a check on fetched rows.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{
    Task, TaskDescription, TaskDraft, TaskId, TaskPatch, TaskTitle, UserId,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewTaskRow, TaskChangeset, TaskRow};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the `TaskRepository` port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Owner scoping predicate shared by every task statement.
fn owned_by(owner: &UserId) -> diesel::dsl::Eq<tasks::user_id, Uuid> {
    tasks::user_id.eq(*owner.as_uuid())
}

fn map_pool_error(error: PoolError) -> TaskPersistenceError {
    TaskPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> TaskPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => TaskPersistenceError::connection(message),
        DieselFailure::Query(message) => TaskPersistenceError::query(message),
        DieselFailure::UniqueViolation { .. } => TaskPersistenceError::query("duplicate task id"),
    }
}

fn row_to_task(row: TaskRow) -> Result<Task, TaskPersistenceError> {
    let title = TaskTitle::new(&row.title)
        .map_err(|err| TaskPersistenceError::query(format!("stored title invalid: {err}")))?;
    let description = TaskDescription::new(&row.description)
        .map_err(|err| TaskPersistenceError::query(format!("stored description invalid: {err}")))?;
    Ok(Task::from_draft(TaskDraft {
        id: TaskId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        title,
        description,
        completed: row.completed,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn patch_changeset(patch: &TaskPatch, updated_at: DateTime<Utc>) -> TaskChangeset<'_> {
    TaskChangeset {
        title: patch.title.as_ref().map(TaskTitle::as_ref),
        description: patch.description.as_ref().map(TaskDescription::as_ref),
        completed: patch.completed,
        updated_at,
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(owned_by(owner))
            .order((tasks::created_at.desc(), tasks::id.desc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_task).collect()
    }

    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTaskRow {
            id: *task.id().as_uuid(),
            user_id: *task.owner().as_uuid(),
            title: task.title().as_ref(),
            description: task.description().as_ref(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        };

        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: &TaskId,
        patch: &TaskPatch,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TaskRow> = diesel::update(
            tasks::table
                .filter(owned_by(owner))
                .filter(tasks::id.eq(id.as_uuid())),
        )
        .set(&patch_changeset(patch, updated_at))
        .returning(TaskRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_task).transpose()
    }

    async fn delete_owned(
        &self,
        owner: &UserId,
        id: &TaskId,
    ) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(
            tasks::table
                .filter(owned_by(owner))
                .filter(tasks::id.eq(id.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(removed > 0)
    }
}
