//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authenticator;
mod password_hasher;
mod task_repository;
mod tasks_command;
mod tasks_query;
mod token_codec;
mod user_repository;

#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::Authenticator;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use task_repository::MockTaskRepository;
pub use task_repository::{TaskPersistenceError, TaskRepository};
#[cfg(test)]
pub use tasks_command::MockTasksCommand;
pub use tasks_command::TasksCommand;
#[cfg(test)]
pub use tasks_query::MockTasksQuery;
pub use tasks_query::TasksQuery;
#[cfg(test)]
pub use token_codec::MockTokenCodec;
pub use token_codec::{TokenCodec, TokenCodecError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
