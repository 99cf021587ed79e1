//! 監査レコーダー
//!
//! 管理操作を1件ずつアクティビティログへ書き込む。書き込みは別タスクで行い、
//! 呼び出し元のレスポンスを待たせない。失敗はログに残すだけで伝播させない。

use crate::audit::types::{AuditMutation, AuditRecord, RequestOrigin};
use crate::common::auth::Claims;
use crate::db::traits::AuditLogRepository;
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Claimsに表示名がない場合の代替値
pub const UNKNOWN_ACTOR_NAME: &str = "Unknown Admin";
/// Claimsにメールアドレスがない場合の代替値
pub const UNKNOWN_ACTOR_EMAIL: &str = "unknown@example.com";

/// 監査レコーダー
///
/// Clone可能（リポジトリの参照カウントのみ共有）。
#[derive(Clone)]
pub struct AuditRecorder {
    repo: Arc<dyn AuditLogRepository>,
}

impl AuditRecorder {
    /// 新しいAuditRecorderを作成
    pub fn new(repo: Arc<dyn AuditLogRepository>) -> Self {
        Self { repo }
    }

    /// 変更操作を記録する
    ///
    /// アクターがいない場合は何も書かずに `None` を返す。
    /// 戻り値のハンドルは完了待ちが必要な場合（テスト等）のためだけにあり、
    /// リクエスト処理側はawaitしない。
    pub fn record(
        &self,
        actor: Option<&Claims>,
        mutation: AuditMutation,
        origin: &RequestOrigin,
    ) -> Option<JoinHandle<()>> {
        let Some(actor) = actor.filter(|claims| !claims.sub.is_empty()) else {
            warn!(
                action = %mutation.action,
                resource_type = %mutation.resource_type,
                "Skipping activity log: no authenticated actor"
            );
            return None;
        };

        let changes = match mutation.changes {
            Some(value) if !value.is_null() => match serde_json::to_string(&value) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(error = %e, "Failed to serialize activity log changes");
                    None
                }
            },
            _ => None,
        };

        let record = AuditRecord {
            id: None,
            actor_id: actor.sub.clone(),
            actor_name: actor
                .name
                .clone()
                .unwrap_or_else(|| UNKNOWN_ACTOR_NAME.to_string()),
            actor_email: actor
                .email
                .clone()
                .unwrap_or_else(|| UNKNOWN_ACTOR_EMAIL.to_string()),
            action: mutation.action,
            resource_type: mutation.resource_type,
            resource_id: mutation.resource_id,
            resource_name: mutation.resource_name,
            changes,
            ip_address: origin.ip_address.clone(),
            user_agent: origin.user_agent.clone(),
            created_at: Utc::now(),
        };

        let repo = Arc::clone(&self.repo);
        Some(tokio::spawn(async move {
            match repo.insert(&record).await {
                Ok(id) => debug!(
                    id,
                    action = %record.action,
                    resource_type = %record.resource_type,
                    "Activity log recorded"
                ),
                Err(e) => warn!(
                    kind = "AUDIT_WRITE_FAILED",
                    error = %e,
                    actor_id = %record.actor_id,
                    action = %record.action,
                    resource_type = %record.resource_type,
                    resource_id = ?record.resource_id,
                    "Failed to write activity log"
                ),
            }
        }))
    }
}
