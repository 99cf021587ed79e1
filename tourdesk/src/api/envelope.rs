//! 成功レスポンスの共通形式

use serde::Serialize;

/// `{ "success": true, "data": ..., "message": ... }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// 成功フラグ
    pub success: bool,
    /// 本体
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 補足メッセージ
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// データ付きの成功レスポンス
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// メッセージを付与
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
