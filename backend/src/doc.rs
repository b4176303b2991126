//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the account, task, and health endpoints
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`UserSchema`],
//!   [`TaskSchema`]) that provide OpenAPI definitions without coupling domain
//!   types to the utoipa framework
//! - **Security**: HTTP bearer token scheme
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, TaskSchema, UserSchema};
use crate::inbound::http::tasks::{CreateTaskRequest, TaskRemovedResponse, UpdateTaskRequest};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme referenced by protected paths.
pub const BEARER_SCHEME: &str = "bearer";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some(
                        "Token returned by POST /auth/register or POST /auth/login.",
                    ))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Taskdeck API",
        description = "Bearer-token accounts and per-user task lists.",
        license(name = "ISC", url = "https://opensource.org/license/isc-license-txt")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::tasks::list_tasks,
        crate::inbound::http::tasks::create_task,
        crate::inbound::http::tasks::update_task,
        crate::inbound::http::tasks::delete_task,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        TaskSchema,
        ErrorSchema,
        ErrorCodeSchema,
        RegisterRequest,
        LoginRequest,
        AuthResponse,
        CreateTaskRequest,
        UpdateTaskRequest,
        TaskRemovedResponse,
    )),
    tags(
        (name = "auth", description = "Registration, login, and the current account"),
        (name = "tasks", description = "Tasks owned by the authenticated user"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's structure.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // Note: utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";
    const USER_SCHEMA_NAME: &str = "crate.domain.User";
    const TASK_SCHEMA_NAME: &str = "crate.domain.Task";

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, &["code", "message", "traceId", "details"])]
    #[case(USER_SCHEMA_NAME, &["id", "username", "email", "createdAt"])]
    #[case(TASK_SCHEMA_NAME, &["id", "title", "description", "completed", "createdAt", "updatedAt"])]
    fn registered_schemas_have_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    #[case("/auth/register")]
    #[case("/auth/login")]
    #[case("/auth/me")]
    #[case("/tasks")]
    #[case("/tasks/{id}")]
    #[case("/health/ready")]
    fn paths_are_documented(#[case] path: &str) {
        assert!(ApiDoc::openapi().paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }
}
