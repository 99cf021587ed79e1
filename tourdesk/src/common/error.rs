//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 認証系（`AuthError`）はリクエストを即座に終了させる。
//! `DeskError::AuditWriteFailed` は監査レコーダー内部で完結し、呼び出し元には返らない。

use axum::http::StatusCode;
use thiserror::Error;

/// JWTデコード失敗の種別
///
/// 検証ケーパビリティが返す閉じたエラー型。例外名の文字列判定は行わない。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JwtError {
    /// 署名不一致
    #[error("invalid token signature")]
    InvalidSignature,

    /// 有効期限切れ（署名は正しい）
    #[error("token expired")]
    Expired,

    /// その他のデコード失敗
    #[error("malformed token: {0}")]
    Malformed(String),

    /// トークン生成失敗
    #[error("failed to encode token: {0}")]
    Encode(String),
}

/// 認証・認可エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// Authorizationヘッダーがない、または `Bearer ` で始まらない
    #[error("Access denied. No token provided.")]
    Missing,

    /// トークンが空、または "null" / "undefined"
    #[error("Invalid token format")]
    Malformed,

    /// 署名不一致・デコード不能
    #[error("Invalid token")]
    Invalid,

    /// 有効期限切れ
    #[error("Token expired")]
    Expired,

    /// 認証コンテキストがない（authenticate未実行）
    #[error("Authentication required")]
    Required,

    /// ロール不一致
    #[error("Access denied. {0} role required")]
    Forbidden(crate::common::auth::UserRole),

    /// 管理者ゲート: 署名不一致
    #[error("Invalid token signature")]
    AdminInvalidSignature,

    /// 管理者ゲート: 有効期限切れ
    #[error("Token has expired")]
    AdminExpired,

    /// 管理者ゲート: その他のデコード失敗
    #[error("Token verification failed")]
    AdminInvalid,

    /// 管理者ゲート: ロール不一致
    #[error("Access denied. Admin privileges required.")]
    AdminForbidden,
}

impl AuthError {
    /// エラー種別コード（ログ出力用）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Missing => "AUTH_MISSING",
            Self::Malformed => "AUTH_MALFORMED",
            Self::Invalid | Self::AdminInvalidSignature | Self::AdminInvalid => "AUTH_INVALID",
            Self::Expired | Self::AdminExpired => "AUTH_EXPIRED",
            Self::Required => "AUTH_REQUIRED",
            Self::Forbidden(_) | Self::AdminForbidden => "FORBIDDEN",
        }
    }

    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Forbidden(_) | Self::AdminForbidden => StatusCode::FORBIDDEN,
            _ => StatusCode::UNAUTHORIZED,
        }
    }
}

/// アプリケーションエラー型
#[derive(Debug, Error)]
pub enum DeskError {
    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// データベースエラー
    #[error("Database error: {0}")]
    Database(String),

    /// 入力検証エラー
    #[error("Validation error: {0}")]
    Validation(String),

    /// リソースが存在しない
    #[error("Not found: {0}")]
    NotFound(String),

    /// 監査ログ書き込み失敗（呼び出し元へは伝播しない）
    #[error("Audit write failed: {0}")]
    AuditWriteFailed(String),

    /// 内部エラー
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DeskError {
    /// 外部クライアント向けの安全なメッセージ
    ///
    /// 内部詳細（SQL、パス等）は含めない。詳細は `Display` でログにのみ出力する。
    pub fn external_message(&self) -> String {
        match self {
            Self::Config(_) => "Server configuration error".to_string(),
            Self::Database(_) => "Database error".to_string(),
            Self::Validation(msg) => msg.clone(),
            Self::NotFound(what) => format!("{} not found", what),
            Self::AuditWriteFailed(_) => "Internal server error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// HTTPステータスコード
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Config(_) | Self::Database(_) | Self::AuditWriteFailed(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for DeskError {
    fn from(err: sqlx::Error) -> Self {
        DeskError::Database(err.to_string())
    }
}

/// Result type alias
pub type DeskResult<T> = Result<T, DeskError>;
