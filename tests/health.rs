mod common;

use axum::http::{Method, StatusCode};
use common::{json_request, spawn_app};

#[tokio::test]
async fn healthcheck_needs_no_token() {
    let app = spawn_app().await;

    let response = app
        .send(json_request(Method::GET, "/api/v1/healthcheck", None, None))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], 200);
    assert_eq!(response.body["message"], "OK");
    assert_eq!(response.body["success"], true);
}

#[tokio::test]
async fn protected_routes_reject_missing_or_bad_tokens() {
    let app = spawn_app().await;

    let missing = app
        .send(json_request(Method::GET, "/api/v1/users/get-current-user", None, None))
        .await;
    assert_eq!(missing.status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.body["success"], false);
    assert_eq!(missing.body["data"], serde_json::Value::Null);

    let garbage = app
        .send(json_request(
            Method::GET,
            "/api/v1/dashboard/stats",
            Some("not-a-jwt"),
            None,
        ))
        .await;
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
}
