//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング。失敗レスポンスは常に
//! `{ "success": false, "message": ... }` の形で返す。

use crate::common::error::{AuthError, DeskError};
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub DeskError);

impl From<DeskError> for AppError {
    fn from(err: DeskError) -> Self {
        AppError(err)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError(DeskError::Validation(rejection.body_text()))
    }
}

// パス・クエリの解析詳細はクライアントへ返さない
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Path parameter rejected");
        AppError(DeskError::Validation("Invalid path parameter".to_string()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "Query string rejected");
        AppError(DeskError::Validation("Invalid query parameters".to_string()))
    }
}

fn failure(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        // 内部詳細はログにのみ出す
        if status.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, "Request rejected");
        }
        failure(status, self.0.external_message())
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        failure(self.status_code(), self.to_string())
    }
}
