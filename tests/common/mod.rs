#![allow(dead_code)]

use axum_test::TestServer;
use campus_registry::domain::pagination::PaginationPolicy;
use campus_registry::routes::router;
use campus_registry::state::AppState;
use serde_json::{Value, json};

pub fn create_test_state() -> AppState {
    AppState::in_memory(PaginationPolicy::default())
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state, None)).unwrap()
}

/// Creates a user over HTTP and returns its id.
pub async fn create_test_user(server: &TestServer, first_name: &str, last_name: &str) -> String {
    let response = server
        .post("/users")
        .json(&json!({ "first_name": first_name, "last_name": last_name }))
        .await;
    response.assert_status_ok();

    id_of(&response.json::<Value>())
}

/// Creates a course over HTTP and returns its id.
pub async fn create_test_course(server: &TestServer, name: &str) -> String {
    let response = server
        .post("/courses")
        .json(&json!({
            "name": name,
            "start_date": "2025-03-01",
            "end_date": "2025-06-30"
        }))
        .await;
    response.assert_status_ok();

    id_of(&response.json::<Value>())
}

fn id_of(body: &Value) -> String {
    body["data"]["id"].as_str().unwrap().to_string()
}
