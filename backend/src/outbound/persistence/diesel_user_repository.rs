//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, PasswordHash, User, UserCredentials, UserId, Username,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

/// Name the identity field protected by a unique constraint.
fn duplicate_field(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some(name) if name.contains("username") => "username",
        Some(name) if name.contains("email") => "email",
        other => {
            warn!(constraint = ?other, "unrecognised unique constraint on users");
            "email"
        }
    }
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
        DieselFailure::UniqueViolation { constraint } => {
            UserPersistenceError::duplicate(duplicate_field(constraint.as_deref()))
        }
    }
}

fn row_to_user(row: &UserRow) -> Result<User, UserPersistenceError> {
    let username = Username::new(&row.username)
        .map_err(|err| UserPersistenceError::query(format!("stored username invalid: {err}")))?;
    let email = EmailAddress::new(&row.email)
        .map_err(|err| UserPersistenceError::query(format!("stored email invalid: {err}")))?;
    Ok(User::new(
        UserId::from_uuid(row.id),
        username,
        email,
        row.created_at,
    ))
}

fn row_to_credentials(row: UserRow) -> Result<UserCredentials, UserPersistenceError> {
    let user = row_to_user(&row)?;
    let hash = PasswordHash::new(row.password_hash)
        .map_err(|err| UserPersistenceError::query(format!("stored hash invalid: {err}")))?;
    Ok(UserCredentials::new(user, hash))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, credentials: &UserCredentials) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user = credentials.user();
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username().as_ref(),
            email: user.email().as_ref(),
            password_hash: credentials.password_hash().as_str(),
            created_at: user.created_at(),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_credentials).transpose()
    }

    async fn email_exists(&self, email: &EmailAddress) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::email.eq(email.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn username_exists(&self, username: &Username) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            users::table.filter(users::username.eq(username.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row mapping and constraint naming.
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    use super::*;

    fn row(username: &str, email: &str, hash: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            username: username.to_owned(),
            email: email.to_owned(),
            password_hash: hash.to_owned(),
            created_at: Utc::now(),
        }
    }

    #[rstest]
    #[case(Some("users_username_key"), "username")]
    #[case(Some("users_email_key"), "email")]
    #[case(None, "email")]
    fn unique_constraints_name_their_field(
        #[case] constraint: Option<&str>,
        #[case] field: &str,
    ) {
        assert_eq!(duplicate_field(constraint), field);
    }

    #[rstest]
    fn valid_row_maps_to_credentials() {
        let credentials =
            row_to_credentials(row("ada", "ada@example.com", "$argon2id$stub")).expect("valid row");
        assert_eq!(credentials.user().username().as_ref(), "ada");
        assert_eq!(credentials.password_hash().as_str(), "$argon2id$stub");
    }

    #[rstest]
    #[case(row("ab", "ada@example.com", "$argon2id$stub"))]
    #[case(row("ada", "not-an-email", "$argon2id$stub"))]
    #[case(row("ada", "ada@example.com", ""))]
    fn corrupt_rows_surface_as_query_errors(#[case] bad: UserRow) {
        let err = row_to_credentials(bad).expect_err("corrupt row");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
