//! 統合テスト用ヘルパー
//!
//! インメモリDBを使ったアプリ構築、トークン発行、JSONリクエスト補助。

#![allow(dead_code)]

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::net::SocketAddr;
use std::time::Duration;
use tourdesk::auth::jwt::{create_jwt, encode_claims, TokenSubject};
use tourdesk::common::auth::{Claims, UserRole};
use tourdesk::config::ServerConfig;
use tourdesk::cors::CorsConfig;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

/// テスト用アプリとプール
pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

/// インメモリSQLiteプール（マイグレーション済み）
pub async fn create_test_db_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    tourdesk::db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        cors: CorsConfig::default(),
        audit_capture_limit: tourdesk::audit::middleware::DEFAULT_CAPTURE_LIMIT_BYTES,
    }
}

pub async fn spawn_app() -> TestApp {
    let pool = create_test_db_pool().await;
    let state = tourdesk::bootstrap::build_state(pool.clone(), &test_config());
    TestApp {
        router: tourdesk::api::create_app(state),
        pool,
    }
}

pub fn subject(sub: &str, role: UserRole) -> TokenSubject {
    TokenSubject {
        sub: sub.to_string(),
        name: Some(format!("{} {}", role, sub)),
        email: Some(format!("{}-{}@tourdesk.test", role, sub)),
        role,
    }
}

pub fn token(sub: &str, role: UserRole) -> String {
    create_jwt(&subject(sub, role), TEST_SECRET, 1).expect("Failed to sign token")
}

pub fn admin_token() -> String {
    token("1", UserRole::Admin)
}

pub fn expired_token(role: UserRole) -> String {
    let now = chrono::Utc::now().timestamp();
    encode_claims(
        &Claims {
            sub: "1".to_string(),
            name: None,
            email: None,
            role,
            iat: (now - 7200) as usize,
            exp: (now - 3600) as usize,
        },
        TEST_SECRET,
    )
    .expect("Failed to sign token")
}

pub fn foreign_token(role: UserRole) -> String {
    create_jwt(&subject("1", role), "some-other-secret", 1).expect("Failed to sign token")
}

/// JSONリクエストを組み立てる（接続元アドレス付き）
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let mut request = builder.body(body).expect("Failed to build request");
    let peer: SocketAddr = "[::ffff:192.0.2.10]:40000".parse().expect("valid addr");
    request.extensions_mut().insert(ConnectInfo(peer));
    request
}

/// リクエストを送信し、ステータスとJSON本文を返す
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// activity_logsの件数が `expected` に達するまで待つ（書き込みは非同期）
pub async fn wait_for_activity_logs(pool: &SqlitePool, expected: i64) -> i64 {
    let mut count = 0;
    for _ in 0..50 {
        count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM activity_logs")
            .fetch_one(pool)
            .await
            .expect("count query failed");
        if count >= expected {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    count
}

/// 非同期書き込みが来ないことを確認するための待機
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(150)).await;
}

pub async fn create_tour(app: &TestApp, title: &str) -> Value {
    let (status, json) = send(
        app,
        json_request(
            "POST",
            "/api/admin/tours",
            Some(&admin_token()),
            Some(serde_json::json!({
                "title": title,
                "destination": "Vietnam",
                "price": 1_200_000,
                "duration_days": 3
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{json}");
    json["data"].clone()
}
