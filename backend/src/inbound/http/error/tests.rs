//! Tests for HTTP error mapping.

use super::*;
use crate::domain::Error;
use actix_web::ResponseError;
use actix_web::body::to_bytes;
use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, test as actix_test, web};
use rstest::{fixture, rstest};
use serde::Deserialize;
use serde_json::{Value, json};

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn expected_trace_id() -> String {
    TRACE_ID.to_owned()
}

#[fixture]
fn internal_error_case(expected_trace_id: String) -> Error {
    Error::internal("boom")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"secret": "x"}))
}

#[fixture]
fn invalid_request_case(expected_trace_id: String) -> Error {
    Error::invalid_request("bad")
        .with_trace_id(expected_trace_id)
        .with_details(json!({"field": "title"}))
}

#[rstest]
#[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
#[case(Error::conflict("email already registered"), StatusCode::BAD_REQUEST)]
#[case(Error::unauthorized("no auth"), StatusCode::UNAUTHORIZED)]
#[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
#[case(Error::service_unavailable("db down"), StatusCode::SERVICE_UNAVAILABLE)]
#[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
fn status_code_matches_error_code(#[case] err: Error, #[case] status: StatusCode) {
    assert_eq!(ResponseError::status_code(&err), status);
}

async fn assert_error_response(
    error: Error,
    expected_status: StatusCode,
    expected_trace_id: Option<&str>,
) -> Error {
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), expected_status);

    let header = response.headers().get(TRACE_ID_HEADER);
    match expected_trace_id {
        Some(expected) => {
            let trace_id = header
                .expect("trace-id header is set by error_response")
                .to_str()
                .expect("trace-id not valid UTF-8");
            assert_eq!(trace_id, expected);
        }
        None => assert!(header.is_none(), "trace-id header should not be present"),
    }

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");

    serde_json::from_slice(&bytes).expect("Error JSON deserialisation succeeds")
}

#[rstest]
#[actix_web::test]
async fn error_responses_include_trace_id_and_payloads(
    #[from(internal_error_case)] internal_error: Error,
    #[from(invalid_request_case)] invalid_request: Error,
    expected_trace_id: String,
) {
    let redacted = assert_error_response(
        internal_error,
        StatusCode::INTERNAL_SERVER_ERROR,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(redacted.code(), ErrorCode::InternalError);
    assert_eq!(redacted.message(), "Internal server error");
    assert!(redacted.details().is_none());

    let payload = assert_error_response(
        invalid_request,
        StatusCode::BAD_REQUEST,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.message(), "bad");
    assert_eq!(payload.details(), Some(&json!({"field": "title"})));
}

#[rstest]
#[actix_web::test]
async fn error_without_trace_id_omits_trace_header() {
    let error = Error::invalid_request("bad").with_details(json!({"field": "title"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::InvalidRequest);
    assert_eq!(payload.trace_id(), None);
}

#[rstest]
#[actix_web::test]
async fn conflicts_keep_their_code_on_a_bad_request() {
    let error = Error::conflict("username already taken")
        .with_details(json!({"field": "username", "code": "duplicate"}));

    let payload = assert_error_response(error, StatusCode::BAD_REQUEST, None).await;
    assert_eq!(payload.code(), ErrorCode::Conflict);
    assert_eq!(payload.message(), "username already taken");
}

#[rstest]
#[actix_web::test]
async fn unavailable_store_detail_stays_out_of_the_body(expected_trace_id: String) {
    let error = Error::service_unavailable(
        "error connecting to server: password authentication failed at db.internal:5432",
    )
    .with_trace_id(expected_trace_id.clone())
    .with_details(json!({"host": "db.internal"}));

    let payload = assert_error_response(
        error,
        StatusCode::SERVICE_UNAVAILABLE,
        Some(expected_trace_id.as_str()),
    )
    .await;
    assert_eq!(payload.code(), ErrorCode::ServiceUnavailable);
    assert_eq!(payload.message(), "Service temporarily unavailable");
    assert!(payload.details().is_none());
    assert_eq!(payload.trace_id(), Some(expected_trace_id.as_str()));
}

#[rstest]
fn redaction_leaves_client_errors_untouched() {
    let error = Error::not_found("task not found").with_trace_id(TRACE_ID);
    assert_eq!(redact_if_internal(&error), error);
}

#[test]
fn from_actix_error_is_redacted_internal_error() {
    use actix_web::error;

    let actix_err = error::ErrorBadRequest("boom");
    let err: Error = actix_err.into();

    assert_eq!(err.code(), ErrorCode::InternalError);
    assert_eq!(err.message(), "Internal server error");
    assert_eq!(err.trace_id(), None);
    assert_eq!(err.details(), None);
}

#[derive(Deserialize)]
struct Probe {
    title: String,
}

async fn accept_probe(body: web::Json<Probe>) -> HttpResponse {
    HttpResponse::Ok().body(body.into_inner().title)
}

#[rstest]
#[case("{not json", "invalid_json")]
#[case("{\"title\": 7}", "invalid_json")]
#[actix_web::test]
async fn malformed_bodies_use_the_error_envelope(#[case] body: &str, #[case] code: &str) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/probe", web::post().to(accept_probe)),
    )
    .await;
    let request = actix_test::TestRequest::post()
        .uri("/probe")
        .insert_header(("content-type", "application/json"))
        .set_payload(body.to_owned())
        .to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(value["code"], "invalid_request");
    assert_eq!(value["details"]["code"], code);
}

#[rstest]
#[actix_web::test]
async fn unknown_routes_use_the_error_envelope() {
    let app = actix_test::init_service(App::new().default_service(web::to(route_not_found))).await;
    let request = actix_test::TestRequest::get().uri("/nowhere").to_request();

    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let value: Value =
        serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
    assert_eq!(value["code"], "not_found");
    assert_eq!(value["message"], "route not found");
}
