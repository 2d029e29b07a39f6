use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use std::time::SystemTime;
use tower::ServiceExt;

use crate::query::StatesResolver;
use crate::rest::{app_router, AppState};
use crate::seed;
use crate::storage::SqliteStorage;

fn seeded_storage(dir: &tempfile::TempDir) -> SqliteStorage {
    let storage = SqliteStorage::new(dir.path().join("stateql.sqlite"));
    storage.init().unwrap();
    seed::replace_states(&storage).unwrap();
    storage
}

async fn post_body(
    storage: SqliteStorage,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let router = app_router(AppState {
        resolver: StatesResolver::new(storage),
        started_at: SystemTime::now(),
    });
    let response = router
        .oneshot(
            Request::builder()
                .uri("/graphql")
                .method("POST")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_states_query(
    storage: SqliteStorage,
    filter: &str,
) -> (StatusCode, serde_json::Value) {
    post_body(
        storage,
        json!({
            "query": "query($filter: String) { states(filter: $filter) { name } }",
            "variables": { "filter": filter },
        }),
    )
    .await
}

fn returned_names(payload: &serde_json::Value) -> Vec<String> {
    payload["data"]["states"]
        .as_array()
        .expect("states array")
        .iter()
        .map(|state| state["name"].as_str().expect("name string").to_string())
        .collect()
}

#[tokio::test]
async fn empty_filter_returns_the_whole_seeded_collection() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_states_query(seeded_storage(&dir), "").await;
    assert_eq!(status, StatusCode::OK);

    let mut names = returned_names(&payload);
    names.sort();
    let mut expected: Vec<String> = seed::STATE_NAMES.iter().map(|s| s.to_string()).collect();
    expected.sort();
    assert_eq!(names, expected);
}

#[tokio::test]
async fn california_filter_returns_exactly_california() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_states_query(seeded_storage(&dir), "california").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned_names(&payload), ["California"]);
}

#[tokio::test]
async fn uppercase_new_filter_returns_the_four_new_states() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_states_query(seeded_storage(&dir), "NEW").await;
    assert_eq!(status, StatusCode::OK);

    let mut names = returned_names(&payload);
    names.sort();
    assert_eq!(
        names,
        ["New Hampshire", "New Jersey", "New Mexico", "New York"]
    );
}

#[tokio::test]
async fn unmatched_filter_returns_an_empty_sequence() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_states_query(seeded_storage(&dir), "zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert!(returned_names(&payload).is_empty());
}

#[tokio::test]
async fn period_filter_matches_no_state_name() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_states_query(seeded_storage(&dir), ".").await;
    assert_eq!(status, StatusCode::OK);
    assert!(returned_names(&payload).is_empty());
}

#[tokio::test]
async fn repeating_a_query_yields_identical_results() {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = seeded_storage(&dir);
    let (_, first) = post_states_query(storage.clone(), "new").await;
    let (_, second) = post_states_query(storage, "new").await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn reseeding_leaves_one_copy_of_each_state() {
    let dir = tempfile::TempDir::new().unwrap();
    let storage = seeded_storage(&dir);
    seed::replace_states(&storage).unwrap();

    let (status, payload) = post_states_query(storage, "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(returned_names(&payload).len(), seed::STATE_NAMES.len());
}

#[tokio::test]
async fn missing_filter_is_rejected_through_the_full_stack() {
    let dir = tempfile::TempDir::new().unwrap();
    let (status, payload) = post_body(
        seeded_storage(&dir),
        json!({ "query": "query { states { name } }", "variables": {} }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["message"], "missing filter variable in request");
}
