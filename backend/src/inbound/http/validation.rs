//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors report which field failed and why; this module turns
//! those reports into `400 invalid_request` payloads with a stable
//! `{field, code}` details object.

use serde_json::json;

use crate::domain::{CredentialValidationError, Error, TaskValidationError};

/// A payload validation failure that names its field.
pub(crate) trait FieldViolation: std::fmt::Display {
    /// Name of the offending JSON field.
    fn field(&self) -> &'static str;
    /// Machine-readable violation code.
    fn code(&self) -> &'static str;
}

impl FieldViolation for CredentialValidationError {
    fn field(&self) -> &'static str {
        CredentialValidationError::field(self)
    }

    fn code(&self) -> &'static str {
        CredentialValidationError::code(self)
    }
}

impl FieldViolation for TaskValidationError {
    fn field(&self) -> &'static str {
        TaskValidationError::field(self)
    }

    fn code(&self) -> &'static str {
        TaskValidationError::code(self)
    }
}

/// Build the client-facing error for a rejected field.
pub(crate) fn invalid_field_error(violation: impl FieldViolation) -> Error {
    Error::invalid_request(violation.to_string()).with_details(json!({
        "field": violation.field(),
        "code": violation.code(),
    }))
}
