//! Integration tests for the user endpoints

mod common;

use axum::http::StatusCode;
use common::{unique_username, user_body, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_user_crud() {
    let app = TestApp::new();
    let username = unique_username();

    let (status, body) = app
        .post("/api/v1/user", None, &user_body(&username, "secret123"))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, body) = app.get(&format!("/api/v1/user/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], username.as_str());
    assert!(body["data"]["fname"].is_string());

    let (status, body) = app
        .put(
            &format!("/api/v1/user/{}", id),
            None,
            &json!({
                "username": username,
                "fname": "Dana",
                "lname": "Cook",
                "email": "dana@example.com",
                "has_truck": true,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["fname"], "Dana");
    assert_eq!(body["data"]["has_truck"], true);

    // Password untouched by an update without one
    app.login(&username, "secret123").await;

    let (status, _) = app.delete(&format!("/api/v1/user/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.get(&format!("/api/v1/user/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn test_update_user_password() {
    let app = TestApp::new();
    let username = unique_username();
    let id = app.register(&username, "secret123").await;

    let mut update = user_body(&username, "new-secret");
    update["has_truck"] = json!(false);
    let (status, _) = app.put(&format!("/api/v1/user/{}", id), None, &update).await;
    assert_eq!(status, StatusCode::OK);

    app.login(&username, "new-secret").await;

    let (status, _) = app
        .post(
            "/api/v1/auth/authenticate",
            None,
            &json!({ "username": username, "password": "secret123" }),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_user_bad_ids() {
    let app = TestApp::new();

    let (status, body) = app.get("/api/v1/user/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid user ID");

    let (status, _) = app.delete("/api/v1/user/12", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_to_taken_username_conflicts() {
    let app = TestApp::new();
    let first = unique_username();
    let second = unique_username();
    app.register(&first, "secret123").await;
    let id = app.register(&second, "secret123").await;

    let (status, _) = app
        .put(&format!("/api/v1/user/{}", id), None, &user_body(&first, "secret123"))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}
