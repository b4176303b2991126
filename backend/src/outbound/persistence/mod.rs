//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the credential and task store ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` pool.
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; rows read back are re-validated on the way in.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures map to the port
//!   error enums.
//!
//! # Example
//!
//! ```no_run
//! use taskdeck::outbound::persistence::{DbPool, DieselTaskRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), taskdeck::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/taskdeck")).await?;
//! let tasks = DieselTaskRepository::new(pool);
//! # let _ = tasks;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_task_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_task_repository::DieselTaskRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
