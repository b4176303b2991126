//! In-process adapters for the credential and task store ports.
//!
//! They enforce the same uniqueness and ownership rules as the PostgreSQL
//! adapters and back the service when no database is configured, as well as
//! the HTTP integration tests.

mod task_repository;
mod user_repository;

pub use task_repository::InMemoryTaskRepository;
pub use user_repository::InMemoryUserRepository;
