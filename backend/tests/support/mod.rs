//! Shared helpers for the HTTP integration tests.
//!
//! The harness wires the real services to the in-process repositories, a
//! cheap Argon2 cost, and a clock the tests can move forward, so each test
//! exercises the full request path without a database.

use std::sync::{Arc, Mutex};

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{App, test as actix_test, web};
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};
use taskdeck::Trace;
use taskdeck::domain::{AuthService, TRACE_ID_HEADER, TaskService};
use taskdeck::inbound::http::error::{json_error_handler, route_not_found};
use taskdeck::inbound::http::state::HttpState;
use taskdeck::inbound::http::{auth, tasks};
use taskdeck::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use taskdeck::outbound::security::{Argon2PasswordHasher, HashCost, HmacTokenCodec};
use zeroize::Zeroizing;

/// Lifetime of tokens issued by the harness, in minutes.
pub const TOKEN_TTL_MINUTES: i64 = 60;

/// Clock the tests advance by hand.
pub struct SteppingClock(Mutex<DateTime<Utc>>);

impl SteppingClock {
    fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
            .single()
            .expect("valid fixture timestamp");
        Self(Mutex::new(start))
    }

    pub fn advance(&self, delta: Duration) {
        *self.0.lock().expect("clock mutex") += delta;
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.0.lock().expect("clock mutex")
    }
}

/// Application state plus the handles tests reach into.
pub struct Harness {
    pub state: web::Data<HttpState>,
    pub clock: Arc<SteppingClock>,
}

impl Harness {
    pub fn new() -> Self {
        let clock = Arc::new(SteppingClock::new());
        let hasher = Argon2PasswordHasher::new(HashCost {
            memory_kib: 8,
            iterations: 1,
        })
        .expect("cheap argon2 parameters");
        let auth = AuthService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(hasher),
            Arc::new(HmacTokenCodec::new(Zeroizing::new(vec![42; 32]))),
            clock.clone(),
        )
        .with_token_ttl(Duration::minutes(TOKEN_TTL_MINUTES));
        let tasks = Arc::new(TaskService::new(
            Arc::new(InMemoryTaskRepository::new()),
            clock.clone(),
        ));
        let state = HttpState::new(Arc::new(auth), tasks.clone(), tasks);
        Self {
            state: web::Data::new(state),
            clock,
        }
    }

    /// Build the application the way the server does, minus health and docs.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .wrap(Trace)
            .configure(auth::configure)
            .configure(tasks::configure)
            .default_service(web::to(route_not_found))
    }
}

/// Status, trace header, and decoded body of one response.
#[derive(Debug)]
pub struct Reply {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

impl Reply {
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }
}

/// Send `request` and capture the response as JSON.
pub async fn send<S, B>(app: &S, request: actix_test::TestRequest) -> Reply
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = actix_test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON response body")
    };
    Reply {
        status,
        trace_id,
        body,
    }
}

/// Attach `token` as a bearer credential.
pub fn bearer(request: actix_test::TestRequest, token: &str) -> actix_test::TestRequest {
    request.insert_header((AUTHORIZATION, format!("Bearer {token}")))
}

/// Register `username` with a derived email and return the issued token.
pub async fn register<S, B>(app: &S, username: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        actix_test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "correct horse",
            })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "register {username}: {reply:?}");
    reply.body["token"]
        .as_str()
        .expect("token in registration response")
        .to_owned()
}

/// Create a task titled `title` for the bearer of `token`.
pub async fn create_task<S, B>(app: &S, token: &str, title: &str) -> Value
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let reply = send(
        app,
        bearer(actix_test::TestRequest::post().uri("/tasks"), token)
            .set_json(json!({ "title": title })),
    )
    .await;
    assert_eq!(reply.status, StatusCode::CREATED, "create {title}: {reply:?}");
    reply.body
}
