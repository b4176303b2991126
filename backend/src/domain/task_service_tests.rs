//! Tests for the task service.

use chrono::{DateTime, Local, TimeZone, Utc};
use mockall::predicate::eq;
use rstest::rstest;

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockTaskRepository;

struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn local(&self) -> DateTime<Local> {
        self.0.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.0
    }
}

fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn make_service(repo: MockTaskRepository) -> TaskService<MockTaskRepository> {
    TaskService::new(Arc::new(repo), Arc::new(FixedClock(fixed_now())))
}

#[tokio::test]
async fn create_forces_owner_and_incomplete_state() {
    let owner = UserId::random();
    let mut repo = MockTaskRepository::new();
    repo.expect_insert()
        .withf(move |task| task.owner() == &owner && !task.completed())
        .times(1)
        .return_once(|_| Ok(()));

    let new_task = NewTask::try_from_parts("Buy milk", None).expect("valid input");
    let task = make_service(repo)
        .create_task(&owner, new_task)
        .await
        .expect("create succeeds");

    assert_eq!(task.title().as_ref(), "Buy milk");
    assert_eq!(task.description().as_ref(), "");
    assert!(!task.completed());
    assert_eq!(task.created_at(), fixed_now());
    assert_eq!(task.updated_at(), fixed_now());
}

#[tokio::test]
async fn list_is_scoped_to_caller() {
    let owner = UserId::random();
    let mut repo = MockTaskRepository::new();
    repo.expect_list_for_owner()
        .with(eq(owner))
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let tasks = make_service(repo)
        .list_tasks(&owner)
        .await
        .expect("list succeeds");
    assert!(tasks.is_empty());
}

#[rstest]
#[case("42")]
#[case("")]
#[case("not-a-uuid")]
#[tokio::test]
async fn unparseable_ids_are_not_found_without_touching_storage(#[case] raw: &str) {
    let mut repo = MockTaskRepository::new();
    repo.expect_update_owned().times(0);
    repo.expect_delete_owned().times(0);
    let service = make_service(repo);
    let owner = UserId::random();

    let update = service
        .update_task(&owner, raw, TaskPatch::default())
        .await
        .expect_err("update must fail");
    let delete = service
        .delete_task(&owner, raw)
        .await
        .expect_err("delete must fail");

    for err in [update, delete] {
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(err.message(), TASK_NOT_FOUND_MESSAGE);
    }
}

#[tokio::test]
async fn update_passes_owner_and_clock_through() {
    let owner = UserId::random();
    let id = TaskId::random();
    let mut repo = MockTaskRepository::new();
    repo.expect_update_owned()
        .withf(move |o, i, patch, at| {
            o == &owner && i == &id && patch.completed == Some(true) && *at == fixed_now()
        })
        .times(1)
        .return_once(|_, _, _, _| Ok(None));

    let patch = TaskPatch::try_from_parts(None, None, Some(true)).expect("valid patch");
    let err = make_service(repo)
        .update_task(&owner, &id.to_string(), patch)
        .await
        .expect_err("foreign task");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_of_missing_task_is_not_found() {
    let mut repo = MockTaskRepository::new();
    repo.expect_delete_owned()
        .times(1)
        .return_once(|_, _| Ok(false));

    let err = make_service(repo)
        .delete_task(&UserId::random(), &TaskId::random().to_string())
        .await
        .expect_err("missing task");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), TASK_NOT_FOUND_MESSAGE);
}

#[rstest]
#[case(
    TaskPersistenceError::connection(
        "password authentication failed for user \"taskdeck\" at db.internal:5432"
    ),
    ErrorCode::ServiceUnavailable
)]
#[case(
    TaskPersistenceError::query("column tasks.user_id does not exist at db.internal:5432"),
    ErrorCode::InternalError
)]
#[tokio::test]
async fn store_failures_map_to_server_errors(
    #[case] failure: TaskPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockTaskRepository::new();
    repo.expect_list_for_owner()
        .times(1)
        .return_once(move |_| Err(failure));

    let err = make_service(repo)
        .list_tasks(&UserId::random())
        .await
        .expect_err("store failure");
    assert_eq!(err.code(), expected);
    assert!(!err.message().contains("db.internal"), "{}", err.message());
    assert!(err.details().is_none());
}
