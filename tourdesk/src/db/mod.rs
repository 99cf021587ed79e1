//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// データベース初期化とマイグレーション
pub mod migrations;

/// アクティビティログストレージ
pub mod audit_log;

/// ツアー管理
pub mod tours;

/// ブログ記事管理
pub mod blogs;

/// 予約管理
pub mod bookings;

/// Repository traitパターン（テスタビリティ向上）
pub mod traits;
