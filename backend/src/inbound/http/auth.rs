//! Account HTTP handlers.
//!
//! ```text
//! POST /auth/register {"username":"ada","email":"ada@example.com","password":"secret1"}
//! POST /auth/login {"email":"ada@example.com","password":"secret1"}
//! GET /auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    AuthSession, CredentialValidationError, Error, INVALID_CREDENTIALS_MESSAGE, LoginCredentials,
    Registration, User,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::invalid_field_error;

/// Registration request body for `POST /auth/register`.
///
/// Missing fields deserialise as empty strings so they are reported by the
/// field validators rather than as a malformed body.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "ada")]
    pub username: String,
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<RegisterRequest> for Registration {
    type Error = CredentialValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.email, &value.password)
    }
}

/// Login request body for `POST /auth/login`.
#[derive(Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "secret1")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = CredentialValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Token and account returned by registration and login.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    #[schema(value_type = UserSchema)]
    pub user: User,
}

impl From<AuthSession> for AuthResponse {
    fn from(session: AuthSession) -> Self {
        let (user, token) = session.into_parts();
        Self {
            token: token.as_str().to_owned(),
            user,
        }
    }
}

/// Create an account and return a token for it.
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Invalid payload or identity already taken", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        Registration::try_from(payload.into_inner()).map_err(invalid_field_error)?;
    let session = state.auth.register(registration).await?;
    Ok(HttpResponse::Created().json(AuthResponse::from(session)))
}

/// Exchange email and password for a token.
///
/// Unknown emails and wrong passwords produce the same `401` body.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from(payload.into_inner()).map_err(|err| {
        debug!(field = err.field(), "login rejected before lookup");
        Error::unauthorized(INVALID_CREDENTIALS_MESSAGE)
    })?;
    let session = state.auth.login(credentials).await?;
    Ok(HttpResponse::Ok().json(AuthResponse::from(session)))
}

/// Return the account behind the presented token.
#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserSchema),
        (status = 401, description = "Missing, invalid, or expired token", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser",
    security(("bearer" = []))
)]
#[get("/auth/me")]
pub async fn current_user(user: AuthenticatedUser) -> web::Json<User> {
    web::Json(user.into_inner())
}

/// Register every account route on an Actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register).service(login).service(current_user);
}

#[cfg(test)]
#[path = "auth_tests.rs"]
mod tests;
