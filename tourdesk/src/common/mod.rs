//! 共通型定義

/// 認証関連のデータモデル
pub mod auth;

/// エラー型定義
pub mod error;

/// IPアドレス正規化・送信元抽出
pub mod ip;
