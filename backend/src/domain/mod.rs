//! Domain primitives, services, and ports.
//!
//! Purpose: define strongly typed entities shared by the HTTP adapter and the
//! persistence adapters, plus the services that enforce authentication and
//! ownership rules. Nothing in here knows about HTTP or SQL.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failure payload.
//! - `User`, `UserCredentials`: account projection and its stored hash.
//! - `Task`, `NewTask`, `TaskPatch`: task records and mutations.
//! - `AuthService`, `TaskService`: implementations of the driving ports.

pub mod auth;
mod auth_service;
pub mod error;
pub mod ports;
pub mod task;
mod task_service;
pub mod trace_id;
pub mod user;

pub use self::auth::{
    AuthSession, CredentialValidationError, DEFAULT_TOKEN_TTL_DAYS, LoginCredentials,
    PASSWORD_MIN, Password, PasswordHash, PasswordHashError, Registration, SessionToken,
    TokenClaims,
};
pub use self::auth_service::{
    AuthService, INVALID_CREDENTIALS_MESSAGE, NO_TOKEN_MESSAGE, TOKEN_FAILED_MESSAGE,
    USER_NOT_FOUND_MESSAGE,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::task::{
    DESCRIPTION_MAX, NewTask, TITLE_MAX, Task, TaskDescription, TaskDraft, TaskId, TaskPatch,
    TaskTitle, TaskValidationError,
};
pub use self::task_service::{TASK_NOT_FOUND_MESSAGE, TaskService};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    EmailAddress, USERNAME_MIN, User, UserCredentials, UserId, UserValidationError, Username,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use taskdeck::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("task not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
