//! Shared classification of pool and Diesel failures.
//!
//! Repositories translate a [`DieselFailure`] into their own port error enum,
//! so the Diesel error taxonomy never crosses the adapter boundary.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Adapter-neutral view of a failed database operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    /// The connection was lost or could not be used.
    Connection(&'static str),
    /// The statement failed for any other reason.
    Query(&'static str),
    /// A unique constraint rejected the write.
    UniqueViolation {
        /// Name of the violated constraint, when the server reported it.
        constraint: Option<String>,
    },
}

/// Extract the message carried by a pool error.
pub(super) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    }
}

/// Classify a Diesel error, logging its kind at debug level.
pub(super) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: info.constraint_name().map(str::to_owned),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        _ => DieselFailure::Query("database error"),
    }
}
