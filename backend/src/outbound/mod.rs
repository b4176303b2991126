//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **memory**: in-process repositories for development mode and tests
//! - **security**: Argon2id secret hashing and HMAC-SHA256 bearer tokens
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod security;
