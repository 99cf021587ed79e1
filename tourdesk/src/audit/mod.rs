//! 管理操作の監査ログ
//!
//! 成功した作成・更新・削除をアクティビティログに追記する。

pub mod middleware;
pub mod recorder;
pub mod types;

pub use middleware::{audit_mutation, capture_mutation, AuditLayer, CapturedMutation};
pub use recorder::AuditRecorder;
