//! Task tracking backend: bearer-token accounts and owner-scoped task lists.
//!
//! The crate follows a hexagonal layout. [`domain`] holds entities, services,
//! and ports; [`inbound`] adapts HTTP onto the driving ports; [`outbound`]
//! implements the driven ports over PostgreSQL, process memory, Argon2, and
//! HMAC.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
