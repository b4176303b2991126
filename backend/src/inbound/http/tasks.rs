//! Task HTTP handlers. Every route requires a bearer token and only ever
//! sees the caller's own tasks.
//!
//! ```text
//! GET /tasks
//! POST /tasks {"title":"Buy milk","description":"2 litres"}
//! PUT /tasks/{id} {"completed":true}
//! DELETE /tasks/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{NewTask, Task, TaskPatch};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, TaskSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;

/// Confirmation returned after a task is deleted.
pub const TASK_REMOVED_MESSAGE: &str = "task removed";

/// Request body for `POST /tasks`.
///
/// Any owner field in the body is ignored; tasks always belong to the caller.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    #[serde(default)]
    #[schema(example = "Buy milk")]
    pub title: String,
    #[schema(example = "2 litres")]
    pub description: Option<String>,
}

/// Request body for `PUT /tasks/{id}`.
///
/// Absent keys and explicit `null` both leave the field unchanged.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Body returned by `DELETE /tasks/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskRemovedResponse {
    #[schema(example = "task removed")]
    pub message: String,
}

/// List the caller's tasks, newest first.
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Caller's tasks, newest first", body = [TaskSchema]),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "listTasks",
    security(("bearer" = []))
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<Task>>> {
    let tasks = state.tasks_query.list_tasks(user.id()).await?;
    Ok(web::Json(tasks))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = TaskSchema),
        (status = 400, description = "Invalid title or description", body = ErrorSchema),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "createTask",
    security(("bearer" = []))
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<CreateTaskRequest>,
) -> ApiResult<HttpResponse> {
    let CreateTaskRequest { title, description } = payload.into_inner();
    let new_task =
        NewTask::try_from_parts(&title, description.as_deref()).map_err(invalid_field_error)?;
    let task = state.tasks.create_task(user.id(), new_task).await?;
    Ok(HttpResponse::Created().json(task))
}

/// Partially update one of the caller's tasks.
#[utoipa::path(
    put,
    path = "/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Updated task", body = TaskSchema),
        (status = 400, description = "Invalid title or description", body = ErrorSchema),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorSchema),
        (status = 404, description = "No such task for this caller", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "updateTask",
    security(("bearer" = []))
)]
#[put("/tasks/{id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskRequest>,
) -> ApiResult<web::Json<Task>> {
    let UpdateTaskRequest {
        title,
        description,
        completed,
    } = payload.into_inner();
    let patch = TaskPatch::try_from_parts(title.as_deref(), description.as_deref(), completed)
        .map_err(invalid_field_error)?;
    let task = state
        .tasks
        .update_task(user.id(), &path.into_inner(), patch)
        .await?;
    Ok(web::Json(task))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/tasks/{id}",
    params(("id" = String, Path, description = "Task identifier")),
    responses(
        (status = 200, description = "Task removed", body = TaskRemovedResponse),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorSchema),
        (status = 404, description = "No such task for this caller", body = ErrorSchema)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask",
    security(("bearer" = []))
)]
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskRemovedResponse>> {
    state.tasks.delete_task(user.id(), &path.into_inner()).await?;
    Ok(web::Json(TaskRemovedResponse {
        message: TASK_REMOVED_MESSAGE.to_owned(),
    }))
}

/// Register every task route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_tasks)
        .service(create_task)
        .service(update_task)
        .service(delete_task);
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
