//! Tourdesk admin backend
//!
//! 旅行代理店向けバックエンド。管理操作の認証ゲートとアクティビティログ記録を中核とする。

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// 認証・認可機能
pub mod auth;

/// 管理操作の監査ログ
pub mod audit;

/// データベースアクセス
pub mod db;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CORS設定
pub mod cors;

/// ロギング初期化ユーティリティ
pub mod logging;

/// サーバー初期化
pub mod bootstrap;

/// axumサーバー起動
pub mod server;

/// CLIインターフェース
pub mod cli;

use std::sync::Arc;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
    /// 認証ゲート（JWTシークレットを保持）
    pub auth_gate: auth::AuthGate,
    /// 監査レコーダー
    pub audit_recorder: audit::AuditRecorder,
    /// アクティビティログストレージ（閲覧API用）
    pub audit_log_storage: Arc<dyn db::traits::AuditLogRepository>,
    /// 監査対象レスポンスの読み取り上限（バイト）
    pub audit_capture_limit: usize,
    /// CORS許可設定
    pub cors: cors::CorsConfig,
}
