//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use crate::domain::ports::{MockAuthenticator, MockTasksCommand, MockTasksQuery};
use crate::inbound::http::state::HttpState;

/// Wrap port doubles in the shared state handlers extract.
pub fn mock_state(
    auth: MockAuthenticator,
    tasks: MockTasksCommand,
    tasks_query: MockTasksQuery,
) -> web::Data<HttpState> {
    web::Data::new(HttpState::new(
        Arc::new(auth),
        Arc::new(tasks),
        Arc::new(tasks_query),
    ))
}
