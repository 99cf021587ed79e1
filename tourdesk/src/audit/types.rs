//! 監査ログの型定義

use axum::http::{header, HeaderMap};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// 操作種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// 作成
    Create,
    /// 更新
    Update,
    /// 削除
    Delete,
}

impl AuditAction {
    /// AuditActionを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AuditAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(format!("unknown audit action: {}", other)),
        }
    }
}

/// 監査ログレコード（追記のみ、更新しない）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// レコードID（DB挿入後に設定）
    pub id: Option<i64>,
    /// 操作したユーザーのID
    pub actor_id: String,
    /// 操作したユーザーの表示名
    pub actor_name: String,
    /// 操作したユーザーのメールアドレス
    pub actor_email: String,
    /// 操作種別
    pub action: AuditAction,
    /// リソース種別（"tour", "blog" など）
    pub resource_type: String,
    /// リソースID
    pub resource_id: Option<String>,
    /// リソース表示名
    pub resource_name: Option<String>,
    /// 変更内容（JSON文字列）
    pub changes: Option<String>,
    /// 送信元IPアドレス
    pub ip_address: Option<String>,
    /// User-Agent
    pub user_agent: Option<String>,
    /// 書き込み時刻
    pub created_at: DateTime<Utc>,
}

/// 記録対象の変更操作
#[derive(Debug, Clone, PartialEq)]
pub struct AuditMutation {
    /// 操作種別
    pub action: AuditAction,
    /// リソース種別
    pub resource_type: String,
    /// リソースID
    pub resource_id: Option<String>,
    /// リソース表示名
    pub resource_name: Option<String>,
    /// 変更内容
    pub changes: Option<serde_json::Value>,
}

impl AuditMutation {
    /// IDや変更内容を持たない操作を作成
    pub fn new(action: AuditAction, resource_type: impl Into<String>) -> Self {
        Self {
            action,
            resource_type: resource_type.into(),
            resource_id: None,
            resource_name: None,
            changes: None,
        }
    }

    /// リソースIDを設定
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// 変更内容を設定
    pub fn with_changes(mut self, changes: serde_json::Value) -> Self {
        self.changes = Some(changes);
        self
    }
}

/// リクエストの送信元情報
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOrigin {
    /// クライアントIPアドレス（プロキシ対応）
    pub ip_address: Option<String>,
    /// User-Agent
    pub user_agent: Option<String>,
}

impl RequestOrigin {
    /// ヘッダーと接続元アドレスから送信元情報を取得
    pub fn from_parts(headers: &HeaderMap, peer: Option<SocketAddr>) -> Self {
        Self {
            ip_address: crate::common::ip::client_ip(headers, peer),
            user_agent: headers
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        }
    }
}

/// アクティビティログ検索フィルタ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLogFilter {
    /// リソース種別でフィルタ
    pub resource_type: Option<String>,
    /// 操作種別でフィルタ
    pub action: Option<AuditAction>,
    /// アクターIDでフィルタ
    pub actor_id: Option<String>,
    /// ページ番号（1始まり）
    pub page: Option<i64>,
    /// ページあたり件数
    pub per_page: Option<i64>,
}

/// ページあたり件数の上限
pub const MAX_PER_PAGE: i64 = 100;
/// ページあたり件数のデフォルト
pub const DEFAULT_PER_PAGE: i64 = 20;

impl ActivityLogFilter {
    /// 正規化済みのページ番号
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// 正規化済みのページあたり件数
    pub fn per_page(&self) -> i64 {
        self.per_page
            .unwrap_or(DEFAULT_PER_PAGE)
            .clamp(1, MAX_PER_PAGE)
    }
}

/// アクティビティログ検索結果
#[derive(Debug, Clone, Serialize)]
pub struct ActivityLogPage {
    /// レコード（新しい順）
    pub records: Vec<AuditRecord>,
    /// フィルタ後の総件数
    pub total: i64,
    /// ページ番号
    pub page: i64,
    /// ページあたり件数
    pub per_page: i64,
}
