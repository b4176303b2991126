//! End-to-end coverage of owner-scoped task CRUD.

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::Duration;
use rstest::rstest;
use serde_json::{Value, json};

mod support;

use support::{Harness, bearer, create_task, register, send};

fn titles(list: &Value) -> Vec<&str> {
    list.as_array()
        .expect("task list array")
        .iter()
        .map(|task| task["title"].as_str().expect("task title"))
        .collect()
}

fn task_uri(task: &Value) -> String {
    format!("/tasks/{}", task["id"].as_str().expect("task id"))
}

#[actix_web::test]
async fn tasks_are_listed_newest_first_per_owner() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let ada = register(&app, "ada").await;
    let grace = register(&app, "grace").await;

    create_task(&app, &ada, "first").await;
    harness.clock.advance(Duration::seconds(1));
    create_task(&app, &grace, "not yours").await;
    harness.clock.advance(Duration::seconds(1));
    create_task(&app, &ada, "second").await;

    let list = send(&app, bearer(actix_test::TestRequest::get().uri("/tasks"), &ada)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(titles(&list.body), ["second", "first"]);

    let theirs = send(&app, bearer(actix_test::TestRequest::get().uri("/tasks"), &grace)).await;
    assert_eq!(titles(&theirs.body), ["not yours"]);
}

#[actix_web::test]
async fn new_user_has_empty_list() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let token = register(&app, "ada").await;

    let list = send(&app, bearer(actix_test::TestRequest::get().uri("/tasks"), &token)).await;

    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body, json!([]));
}

#[actix_web::test]
async fn created_task_has_defaults_and_ignores_owner_field() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let ada = register(&app, "ada").await;
    let grace = register(&app, "grace").await;
    let grace_id = send(&app, bearer(actix_test::TestRequest::get().uri("/auth/me"), &grace))
        .await
        .body["id"]
        .clone();

    let reply = send(
        &app,
        bearer(actix_test::TestRequest::post().uri("/tasks"), &ada).set_json(json!({
            "title": "  Write report  ",
            "owner": grace_id,
            "user": grace_id,
            "completed": true,
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert_eq!(reply.body["title"], "Write report");
    assert_eq!(reply.body["description"], "");
    assert_eq!(reply.body["completed"], false);
    assert_eq!(reply.body["createdAt"], reply.body["updatedAt"]);

    let theirs = send(&app, bearer(actix_test::TestRequest::get().uri("/tasks"), &grace)).await;
    assert_eq!(theirs.body, json!([]));
}

#[actix_web::test]
async fn update_applies_only_supplied_fields() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let token = register(&app, "ada").await;
    let task = create_task(&app, &token, "Draft").await;

    harness.clock.advance(Duration::minutes(5));
    let reply = send(
        &app,
        bearer(actix_test::TestRequest::put().uri(&task_uri(&task)), &token).set_json(json!({
            "title": null,
            "description": "notes",
            "completed": true,
        })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["id"], task["id"]);
    assert_eq!(reply.body["title"], "Draft");
    assert_eq!(reply.body["description"], "notes");
    assert_eq!(reply.body["completed"], true);
    assert_eq!(reply.body["createdAt"], task["createdAt"]);
    assert_eq!(reply.body["updatedAt"], "2025-06-01T12:05:00Z");
}

#[actix_web::test]
async fn delete_removes_task() {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let token = register(&app, "ada").await;
    let task = create_task(&app, &token, "Ephemeral").await;

    let removed = send(
        &app,
        bearer(actix_test::TestRequest::delete().uri(&task_uri(&task)), &token),
    )
    .await;
    assert_eq!(removed.status, StatusCode::OK);
    assert_eq!(removed.body, json!({ "message": "task removed" }));

    let again = send(
        &app,
        bearer(actix_test::TestRequest::delete().uri(&task_uri(&task)), &token),
    )
    .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case::update("PUT")]
#[case::delete("DELETE")]
#[actix_web::test]
async fn foreign_task_looks_missing(#[case] method: &str) {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let owner = register(&app, "ada").await;
    let intruder = register(&app, "mallory").await;
    let task = create_task(&app, &owner, "Private").await;

    let request = match method {
        "PUT" => actix_test::TestRequest::put().set_json(json!({ "completed": true })),
        _ => actix_test::TestRequest::delete(),
    };
    let reply = send(&app, bearer(request.uri(&task_uri(&task)), &intruder)).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.code(), "not_found");
    assert_eq!(reply.message(), "task not found");

    let list = send(&app, bearer(actix_test::TestRequest::get().uri("/tasks"), &owner)).await;
    assert_eq!(list.body[0]["completed"], false);
    assert_eq!(titles(&list.body), ["Private"]);
}

#[rstest]
#[case("/tasks/not-a-uuid")]
#[case("/tasks/00000000-0000-0000-0000-000000000000")]
#[actix_web::test]
async fn unknown_task_id_is_not_found(#[case] uri: &str) {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let token = register(&app, "ada").await;

    let reply = send(
        &app,
        bearer(actix_test::TestRequest::put().uri(uri), &token)
            .set_json(json!({ "completed": true })),
    )
    .await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case(actix_test::TestRequest::get().uri("/tasks"))]
#[case(actix_test::TestRequest::post().uri("/tasks").set_json(json!({ "title": "x" })))]
#[case(actix_test::TestRequest::put().uri("/tasks/00000000-0000-0000-0000-000000000000").set_json(json!({})))]
#[case(actix_test::TestRequest::delete().uri("/tasks/00000000-0000-0000-0000-000000000000"))]
#[actix_web::test]
async fn task_routes_require_token(#[case] request: actix_test::TestRequest) {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;

    let reply = send(&app, request).await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.message(), "not authorized, no token");
}

#[rstest]
#[case(json!({}), "title")]
#[case(json!({ "title": "   " }), "title")]
#[case(json!({ "title": "x".repeat(201) }), "title")]
#[actix_web::test]
async fn invalid_task_is_rejected(#[case] body: Value, #[case] field: &str) {
    let harness = Harness::new();
    let app = actix_test::init_service(harness.app()).await;
    let token = register(&app, "ada").await;

    let reply = send(
        &app,
        bearer(actix_test::TestRequest::post().uri("/tasks"), &token).set_json(body),
    )
    .await;

    assert_eq!(reply.status, StatusCode::BAD_REQUEST);
    assert_eq!(reply.code(), "invalid_request");
    assert_eq!(reply.body["details"]["field"], field);
}
