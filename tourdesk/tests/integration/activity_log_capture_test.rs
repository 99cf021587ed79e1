//! 管理操作のアクティビティログ記録（エンドツーエンド）

use crate::support::{
    admin_token, create_tour, json_request, send, settle, spawn_app, token,
    wait_for_activity_logs,
};
use axum::http::StatusCode;
use serde_json::json;
use tourdesk::common::auth::UserRole;

#[tokio::test]
async fn created_tour_is_recorded_once() {
    let app = spawn_app().await;
    let tour = create_tour(&app, "Hanoi Tour").await;
    let tour_id = tour["id"].as_i64().unwrap();

    assert_eq!(wait_for_activity_logs(&app.pool, 1).await, 1);
    let (status, body) = send(
        &app,
        json_request("GET", "/api/admin/activity-logs", Some(&admin_token()), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let record = &body["data"]["records"][0];
    assert_eq!(record["action"], "create");
    assert_eq!(record["resource_type"], "tour");
    assert_eq!(record["resource_id"], tour_id.to_string());
    assert_eq!(record["resource_name"], "Hanoi Tour");
    assert_eq!(record["actor_id"], "1");
    assert_eq!(record["actor_name"], "admin 1");
    assert_eq!(record["ip_address"], "192.0.2.10");

    let changes: serde_json::Value =
        serde_json::from_str(record["changes"].as_str().unwrap()).unwrap();
    assert_eq!(changes["destination"], "Vietnam");
}

#[tokio::test]
async fn validation_failure_is_not_recorded() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/admin/tours",
            Some(&admin_token()),
            Some(json!({"title": " ", "destination": "Hue", "price": 10, "duration_days": 1})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Tour title is required");

    settle().await;
    assert_eq!(wait_for_activity_logs(&app.pool, 0).await, 0);
}

#[tokio::test]
async fn malformed_json_is_rejected_without_record() {
    let app = spawn_app().await;
    let mut request = json_request("POST", "/api/admin/tours", Some(&admin_token()), None);
    *request.body_mut() = axum::body::Body::from("{not json");
    request
        .headers_mut()
        .insert("content-type", "application/json".parse().unwrap());
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);

    settle().await;
    assert_eq!(wait_for_activity_logs(&app.pool, 0).await, 0);
}

#[tokio::test]
async fn missing_tour_update_is_not_recorded() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/tours/404",
            Some(&admin_token()),
            Some(json!({"price": 5})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tour not found");

    settle().await;
    assert_eq!(wait_for_activity_logs(&app.pool, 0).await, 0);
}

#[tokio::test]
async fn update_and_delete_are_recorded_with_actions() {
    let app = spawn_app().await;
    let tour = create_tour(&app, "Mekong Delta").await;
    let id = tour["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        json_request(
            "PUT",
            &format!("/api/admin/tours/{id}"),
            Some(&admin_token()),
            Some(json!({"price": 990_000})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    wait_for_activity_logs(&app.pool, 2).await;

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/tours/{id}"),
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(wait_for_activity_logs(&app.pool, 3).await, 3);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?resource_type=tour&action=delete",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(body["data"]["total"], 1);
    let record = &body["data"]["records"][0];
    assert_eq!(record["resource_id"], id.to_string());
    assert_eq!(record["resource_name"], "Mekong Delta");

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?action=update",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    let changes: serde_json::Value = serde_json::from_str(
        body["data"]["records"][0]["changes"].as_str().unwrap(),
    )
    .unwrap();
    assert_eq!(changes["price"], 990_000);
}

#[tokio::test]
async fn identical_creates_write_two_rows() {
    let app = spawn_app().await;
    create_tour(&app, "Da Lat").await;
    create_tour(&app, "Da Lat").await;
    assert_eq!(wait_for_activity_logs(&app.pool, 2).await, 2);
}

#[tokio::test]
async fn editor_blog_changes_are_attributed_to_editor() {
    let app = spawn_app().await;
    let editor = token("8", UserRole::Editor);
    let mut request = json_request(
        "POST",
        "/api/editor/blogs",
        Some(&editor),
        Some(json!({"title": "Street food in Hue", "content": "Bun bo", "published": true})),
    );
    request
        .headers_mut()
        .insert("x-forwarded-for", "203.0.113.7, 10.0.0.2".parse().unwrap());
    request
        .headers_mut()
        .insert("user-agent", "tourdesk-admin/1.0".parse().unwrap());
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["author"], "editor 8");

    assert_eq!(wait_for_activity_logs(&app.pool, 1).await, 1);
    let (_, logs) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?actor_id=8",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    let record = &logs["data"]["records"][0];
    assert_eq!(record["resource_type"], "blog");
    assert_eq!(record["resource_name"], "Street food in Hue");
    assert_eq!(record["actor_email"], "editor-8@tourdesk.test");
    assert_eq!(record["ip_address"], "203.0.113.7");
    assert_eq!(record["user_agent"], "tourdesk-admin/1.0");
}

#[tokio::test]
async fn activity_log_listing_validates_action() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?action=archive",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn activity_log_listing_paginates() {
    let app = spawn_app().await;
    for title in ["A", "B", "C"] {
        create_tour(&app, title).await;
    }
    assert_eq!(wait_for_activity_logs(&app.pool, 3).await, 3);

    let (_, body) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?page=2&per_page=2",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["page"], 2);
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 1);
}
