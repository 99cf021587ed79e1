//! 予約APIの統合テスト

use crate::support::{
    admin_token, create_tour, json_request, send, spawn_app, token, wait_for_activity_logs,
    TestApp,
};
use axum::http::StatusCode;
use serde_json::{json, Value};
use tourdesk::common::auth::UserRole;

fn booking_payload(tour_id: i64) -> Value {
    let date = chrono::Utc::now().date_naive() + chrono::Duration::days(45);
    json!({
        "tour_id": tour_id,
        "contact_name": "Nguyen Van A",
        "contact_email": "vana@example.com",
        "travelers": 3,
        "travel_date": date.to_string(),
        "note": "Vegetarian meals"
    })
}

async fn book(app: &TestApp, customer: &str, tour_id: i64) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/api/bookings",
            Some(&token(customer, UserRole::Customer)),
            Some(booking_payload(tour_id)),
        ),
    )
    .await
}

#[tokio::test]
async fn customer_can_book_existing_tour() {
    let app = spawn_app().await;
    let tour_id = create_tour(&app, "Ha Long Bay Cruise").await["id"]
        .as_i64()
        .unwrap();

    let (status, body) = book(&app, "42", tour_id).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["status"], "pending");
    assert_eq!(body["data"]["customer_id"], "42");
}

#[tokio::test]
async fn booking_unknown_tour_is_not_found() {
    let app = spawn_app().await;
    let (status, body) = book(&app, "42", 9999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Tour not found");
}

#[tokio::test]
async fn booking_requires_customer_role() {
    let app = spawn_app().await;
    let tour_id = create_tour(&app, "Phu Quoc").await["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/api/bookings",
            Some(&admin_token()),
            Some(booking_payload(tour_id)),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. customer role required");
}

#[tokio::test]
async fn admin_manages_bookings_with_activity_logs() {
    let app = spawn_app().await;
    let tour_id = create_tour(&app, "Sapa Trek").await["id"].as_i64().unwrap();
    let (_, created) = book(&app, "42", tour_id).await;
    let booking_id = created["data"]["id"].as_i64().unwrap();
    book(&app, "43", tour_id).await;
    // ツアー作成の1件
    wait_for_activity_logs(&app.pool, 1).await;

    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/api/admin/bookings/{booking_id}/status"),
            Some(&admin_token()),
            Some(json!({"status": "confirmed"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "confirmed");

    let (_, pending) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/bookings?status=pending",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(pending["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        json_request(
            "DELETE",
            &format!("/api/admin/bookings/{booking_id}"),
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(wait_for_activity_logs(&app.pool, 3).await, 3);
    let (_, logs) = send(
        &app,
        json_request(
            "GET",
            "/api/admin/activity-logs?resource_type=booking",
            Some(&admin_token()),
            None,
        ),
    )
    .await;
    assert_eq!(logs["data"]["total"], 2);
    let actions: Vec<&str> = logs["data"]["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["action"].as_str().unwrap())
        .collect();
    assert!(actions.contains(&"update"));
    assert!(actions.contains(&"delete"));
}

#[tokio::test]
async fn unknown_booking_status_update_is_not_found() {
    let app = spawn_app().await;
    let (status, body) = send(
        &app,
        json_request(
            "PATCH",
            "/api/admin/bookings/77/status",
            Some(&admin_token()),
            Some(json!({"status": "cancelled"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Booking not found");
}
