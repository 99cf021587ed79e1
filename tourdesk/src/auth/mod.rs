// 認証モジュール

/// JWT生成・検証（jsonwebtoken）
pub mod jwt;

/// 認証ゲート（Bearer JWT検証, ロール判定）
pub mod middleware;

pub use middleware::{authorize_role, AuthGate};
