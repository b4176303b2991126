//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the JSON shape of their corresponding domain
//! types but live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The email or username is already registered.
    #[schema(rename = "conflict")]
    Conflict,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested resource does not exist or belongs to someone else.
    #[schema(rename = "not_found")]
    NotFound,
    /// The backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "title must not be empty")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Offending field and violation code, when applicable.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Public account projection returned by the auth endpoints.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Unique login handle.
    #[schema(example = "ada")]
    username: String,
    /// Normalised (lower-case) email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Account creation instant.
    #[schema(rename = "createdAt", value_type = String, format = DateTime)]
    created_at: String,
}

/// OpenAPI schema for [`crate::domain::Task`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Task)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TaskSchema {
    /// Stable task identifier.
    #[schema(value_type = String, example = "0b9c2f14-3a8e-4a53-9a4c-1f1e6f3f5b2d")]
    id: String,
    /// Short summary, 1 to 200 characters after trimming.
    #[schema(example = "Buy milk", max_length = 200)]
    title: String,
    /// Free-form notes, at most 1000 characters; empty when absent.
    #[schema(example = "", max_length = 1000)]
    description: String,
    /// Completion flag.
    completed: bool,
    /// Creation instant.
    #[schema(rename = "createdAt", value_type = String, format = DateTime)]
    created_at: String,
    /// Last modification instant.
    #[schema(rename = "updatedAt", value_type = String, format = DateTime)]
    updated_at: String,
}
