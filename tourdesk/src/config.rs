//! 環境変数による設定管理
//!
//! 新しい変数名が未設定の場合は旧変数名にフォールバックし、
//! 非推奨の警告をログに出す。

use crate::audit::middleware::DEFAULT_CAPTURE_LIMIT_BYTES;
use crate::common::error::{DeskError, DeskResult};
use crate::cors::CorsConfig;

/// 環境変数を取得（旧変数名へのフォールバック付き）
///
/// # Arguments
/// * `new_name` - 推奨される変数名
/// * `old_name` - 非推奨の変数名
///
/// # Returns
/// * `Some(value)` - いずれかが設定されている
/// * `None` - どちらも未設定
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    let val = std::env::var(old_name).ok()?;
    if old_name != new_name {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
    }
    Some(val)
}

/// 環境変数を取得し、未設定ならデフォルト値を返す
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// 環境変数を型変換して取得する
///
/// 未設定またはパース失敗時はデフォルト値。
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// デフォルトの待ち受けポート
pub const DEFAULT_PORT: u16 = 5000;
/// デフォルトのデータベースURL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/tourdesk.db";

/// サーバー設定
#[derive(Clone)]
pub struct ServerConfig {
    /// バインドアドレス
    pub host: String,
    /// 待ち受けポート
    pub port: u16,
    /// データベースURL
    pub database_url: String,
    /// JWT署名鍵
    pub jwt_secret: String,
    /// CORS許可設定
    pub cors: CorsConfig,
    /// 監査対象レスポンスの読み取り上限（バイト）
    pub audit_capture_limit: usize,
}

impl std::fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("jwt_secret", &"<redacted>")
            .field("cors", &self.cors)
            .field("audit_capture_limit", &self.audit_capture_limit)
            .finish()
    }
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// # Returns
    /// * `Err(DeskError::Config)` - JWTシークレット未設定、またはCORSパターン不正
    pub fn from_env() -> DeskResult<Self> {
        let jwt_secret = get_env_with_fallback("TOURDESK_JWT_SECRET", "JWT_SECRET")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| DeskError::Config("TOURDESK_JWT_SECRET must be set".to_string()))?;

        let origins = get_env_with_fallback_or("TOURDESK_CORS_ORIGINS", "CORS_ORIGINS", "");
        let pattern =
            get_env_with_fallback("TOURDESK_CORS_ORIGIN_PATTERN", "CORS_ORIGIN_PATTERN");
        let cors = CorsConfig::new(&origins, pattern.as_deref())?;

        Ok(Self {
            host: get_env_with_fallback_or("TOURDESK_HOST", "HOST", DEFAULT_HOST),
            port: get_env_with_fallback_parse("TOURDESK_PORT", "PORT", DEFAULT_PORT),
            database_url: get_env_with_fallback_or(
                "TOURDESK_DATABASE_URL",
                "DATABASE_URL",
                DEFAULT_DATABASE_URL,
            ),
            jwt_secret,
            cors,
            audit_capture_limit: get_env_with_fallback_parse(
                "TOURDESK_AUDIT_CAPTURE_LIMIT_BYTES",
                "TOURDESK_AUDIT_CAPTURE_LIMIT_BYTES",
                DEFAULT_CAPTURE_LIMIT_BYTES,
            ),
        })
    }

    /// CLI引数でホスト・ポートを上書き
    pub fn with_listen(mut self, host: Option<String>, port: Option<u16>) -> Self {
        if let Some(host) = host {
            self.host = host;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }

    /// バインドアドレス（host:port）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
