//! HTTP inbound adapter exposing REST endpoints.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
pub mod tasks;
#[cfg(test)]
pub mod test_utils;
pub mod token_config;
mod validation;

pub use error::ApiResult;
