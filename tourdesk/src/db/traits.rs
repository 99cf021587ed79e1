//! Repository traitパターン定義
//!
//! 監査レコーダーが依存する永続化ケーパビリティを抽象化する。

use async_trait::async_trait;

use crate::audit::types::{ActivityLogFilter, ActivityLogPage, AuditRecord};
use crate::common::error::DeskResult;

// ---------------------------------------------------------------------------
// AuditLogRepository
// ---------------------------------------------------------------------------

/// 追記専用の監査ログストアのRepository trait
///
/// 更新・削除操作は持たない。
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    /// レコードを1件追記し、採番されたIDを返す
    async fn insert(&self, record: &AuditRecord) -> DeskResult<i64>;
    /// フィルタ条件で検索（新しい順）
    async fn list(&self, filter: &ActivityLogFilter) -> DeskResult<ActivityLogPage>;
}
