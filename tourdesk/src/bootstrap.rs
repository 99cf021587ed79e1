//! サーバー初期化
//!
//! DB接続・マイグレーション・認証ゲート・監査レコーダーを構築し、
//! `AppState` にまとめる。

use crate::audit::AuditRecorder;
use crate::auth::AuthGate;
use crate::common::error::DeskResult;
use crate::config::ServerConfig;
use crate::db::audit_log::AuditLogStorage;
use crate::db::traits::AuditLogRepository;
use crate::AppState;
use sqlx::SqlitePool;
use std::sync::Arc;
use tracing::info;

/// 設定からDBを初期化し、AppStateを構築する
pub async fn initialize(config: &ServerConfig) -> DeskResult<AppState> {
    info!(database_url = %config.database_url, "Initializing database");
    let db_pool = crate::db::migrations::initialize_database(&config.database_url).await?;
    let state = build_state(db_pool, config);
    info!("Authentication gate and activity log recorder initialized");
    Ok(state)
}

/// 初期化済みのプールからAppStateを組み立てる
pub fn build_state(db_pool: SqlitePool, config: &ServerConfig) -> AppState {
    let audit_log_storage: Arc<dyn AuditLogRepository> =
        Arc::new(AuditLogStorage::new(db_pool.clone()));

    AppState {
        auth_gate: AuthGate::new(config.jwt_secret.clone()),
        audit_recorder: AuditRecorder::new(Arc::clone(&audit_log_storage)),
        audit_log_storage,
        audit_capture_limit: config.audit_capture_limit,
        cors: config.cors.clone(),
        db_pool,
    }
}
