//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON responses and status
//! codes.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

pub use crate::domain::ApiResult;

const INTERNAL_MESSAGE: &str = "Internal server error";
const UNAVAILABLE_MESSAGE: &str = "Service temporarily unavailable";

/// Identity conflicts are reported as bad requests, matching the shape
/// clients already handle for validation failures.
fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Replace messages that may carry adapter detail with fixed text.
fn redact_if_internal(error: &Error) -> Error {
    let redacted = match error.code() {
        ErrorCode::InternalError => Error::internal(INTERNAL_MESSAGE),
        ErrorCode::ServiceUnavailable => Error::service_unavailable(UNAVAILABLE_MESSAGE),
        _ => return error.clone(),
    };
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal(INTERNAL_MESSAGE)
    }
}

/// Fallback service for paths no route matches.
pub async fn route_not_found() -> ApiResult<HttpResponse> {
    Err(Error::not_found("route not found"))
}

/// Map a rejected JSON body onto the domain error envelope.
///
/// Register with `web::JsonConfig::default().error_handler(json_error_handler)`
/// so malformed payloads surface as `400 invalid_request` rather than
/// Actix's plain-text default.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let code = match &err {
        JsonPayloadError::ContentType => "unsupported_content_type",
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            "payload_too_large"
        }
        _ => "invalid_json",
    };
    Error::invalid_request("request body must be valid JSON")
        .with_details(json!({ "code": code }))
        .into()
}

#[cfg(test)]
mod tests;
