//! 認証ゲートの統合テスト（ルーター経由）

use crate::support::{
    admin_token, expired_token, foreign_token, json_request, send, spawn_app, token,
};
use axum::http::StatusCode;
use serde_json::json;
use tourdesk::common::auth::UserRole;

#[tokio::test]
async fn admin_token_reaches_admin_handler() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request("GET", "/api/admin/activity-logs", Some(&admin_token()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["total"], 0);
}

#[tokio::test]
async fn empty_bearer_token_is_invalid_format() {
    let app = spawn_app().await;
    let mut request = json_request("GET", "/api/admin/bookings", None, None);
    request
        .headers_mut()
        .insert("authorization", "Bearer ".parse().unwrap());
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({"success": false, "message": "Invalid token format"}));
}

#[tokio::test]
async fn missing_header_is_rejected_on_every_gate() {
    let app = spawn_app().await;
    for (method, uri) in [
        ("GET", "/api/admin/activity-logs"),
        ("POST", "/api/editor/blogs"),
        ("POST", "/api/bookings"),
    ] {
        let (status, body) = send(&app, json_request(method, uri, None, None)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(body["message"], "Access denied. No token provided.", "{uri}");
    }
}

#[tokio::test]
async fn admin_gate_rejects_other_roles() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/bookings",
            Some(&token("5", UserRole::Editor)),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. Admin privileges required.");
}

#[tokio::test]
async fn role_match_is_exact_admin_is_not_editor() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/editor/blogs",
            Some(&admin_token()),
            Some(json!({"title": "t", "content": "c"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. editor role required");
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_distinguished() {
    let app = spawn_app().await;

    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/bookings",
            Some(&expired_token(UserRole::Admin)),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token has expired");

    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/bookings",
            Some(&foreign_token(UserRole::Admin)),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token signature");

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/editor/blogs",
            Some(&expired_token(UserRole::Editor)),
            None,
        ),
    )
    .await;
    assert_eq!(body["message"], "Token expired");

    let (_, body) = send(
        &app,
        json_request(
            "POST",
            "/api/editor/blogs",
            Some(&foreign_token(UserRole::Editor)),
            None,
        ),
    )
    .await;
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn placeholder_tokens_are_invalid_format() {
    let app = spawn_app().await;
    for placeholder in ["null", "undefined"] {
        let (status, body) = send(
            &app,
            json_request("POST", "/api/bookings", Some(placeholder), None),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid token format");
    }
}
