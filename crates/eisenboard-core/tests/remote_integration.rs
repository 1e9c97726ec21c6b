//! Integration tests for the remote task API client against a mock server.

use std::time::Duration;

use eisenboard_core::storage::{RemoteStore, TaskStore};
use eisenboard_core::{CoreError, NewTask, Priority, RemoteError, TaskPatch, TaskStatus};
use mockito::Matcher;

const TASK_JSON: &str = r#"{
    "id": 12,
    "title": "Call supplier",
    "description": "",
    "priority": "haute",
    "dueDate": "2026-07-01",
    "completed": false,
    "status": "todo",
    "createdAt": "2026-06-20T08:00:00",
    "estimatedDuration": null,
    "startDeadline": null
}"#;

fn store(server: &mockito::Server) -> RemoteStore {
    RemoteStore::new(&server.url(), Duration::from_secs(5)).unwrap()
}

#[test]
fn test_list_and_probe() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"success": true, "tasks": [{TASK_JSON}]}}"#))
        .expect(2)
        .create();

    let store = store(&server);
    store.probe(Duration::from_secs(1)).unwrap();
    let tasks = store.list().unwrap();

    mock.assert();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority, Priority::High);
    assert_eq!(tasks[0].status(), TaskStatus::Todo);
}

#[test]
fn test_create_posts_camel_case_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/tasks")
        .match_body(Matcher::PartialJsonString(
            r#"{"title": "Call supplier", "priority": "haute", "dueDate": "2026-07-01"}"#
                .into(),
        ))
        .with_status(201)
        .with_body(format!(r#"{{"success": true, "task": {TASK_JSON}}}"#))
        .create();

    let mut store = store(&server);
    let due = chrono::NaiveDate::from_ymd_opt(2026, 7, 1);
    let task = store
        .create(
            NewTask::new("Call supplier")
                .priority(Priority::High)
                .schedule(due, None),
        )
        .unwrap();

    mock.assert();
    assert_eq!(task.id, 12);
}

#[test]
fn test_update_sends_only_changed_fields() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", "/api/tasks/12")
        .match_body(Matcher::JsonString(r#"{"status": "done"}"#.into()))
        .with_status(200)
        .with_body(format!(r#"{{"success": true, "task": {TASK_JSON}}}"#))
        .create();

    let mut store = store(&server);
    store.update(12, &TaskPatch::status(TaskStatus::Done)).unwrap();
    mock.assert();
}

#[test]
fn test_update_sends_api_priority_name() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("PUT", "/api/tasks/12")
        .match_body(Matcher::JsonString(r#"{"priority": "basse"}"#.into()))
        .with_status(200)
        .with_body(format!(r#"{{"success": true, "task": {TASK_JSON}}}"#))
        .create();

    let mut store = store(&server);
    let patch = TaskPatch {
        priority: Some(Priority::Low),
        ..TaskPatch::default()
    };
    store.update(12, &patch).unwrap();
    mock.assert();
}

#[test]
fn test_toggle_and_delete_map_404_to_not_found() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/tasks/7/toggle")
        .with_status(404)
        .with_body(r#"{"success": false, "error": "Task not found"}"#)
        .create();
    server
        .mock("DELETE", "/api/tasks/7")
        .with_status(404)
        .with_body(r#"{"success": false, "error": "Task not found"}"#)
        .create();

    let mut store = store(&server);
    assert!(matches!(store.toggle(7), Err(CoreError::NotFound(7))));
    assert!(matches!(store.delete(7), Err(CoreError::NotFound(7))));
}

#[test]
fn test_server_errors_carry_message() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/tasks")
        .with_status(500)
        .with_body(r#"{"success": false, "error": "database is locked"}"#)
        .create();

    let err = store(&server).list().unwrap_err();
    match err {
        CoreError::Remote(RemoteError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database is locked");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_rejected_and_malformed_envelopes() {
    let mut server = mockito::Server::new();
    server
        .mock("POST", "/api/tasks")
        .with_status(200)
        .with_body(r#"{"success": false, "error": "title is required"}"#)
        .create();
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create();

    let mut store = store(&server);
    assert!(matches!(
        store.create(NewTask::new("x")),
        Err(CoreError::Remote(RemoteError::Rejected(msg))) if msg == "title is required"
    ));
    assert!(matches!(
        store.list(),
        Err(CoreError::Remote(RemoteError::Malformed(_)))
    ));
    assert!(store.probe(Duration::from_secs(1)).is_err());
}

#[test]
fn test_invalid_patch_is_not_sent() {
    let mut server = mockito::Server::new();
    let mock = server.mock("PUT", Matcher::Any).expect(0).create();

    let mut store = store(&server);
    assert!(matches!(
        store.update(1, &TaskPatch::default()),
        Err(CoreError::Validation(_))
    ));
    mock.assert();
}
