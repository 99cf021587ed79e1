//! 変更系ハンドラーの監査ミドルウェア
//!
//! ハンドラーのJSONレスポンスを読み取り、成功した変更操作だけを
//! `AuditRecorder` へ渡す。レスポンスはステータス・ヘッダー・本文とも
//! そのままクライアントへ返す。

use crate::api::error::AppError;
use crate::audit::recorder::AuditRecorder;
use crate::audit::types::{AuditAction, AuditMutation, RequestOrigin};
use crate::common::auth::Claims;
use crate::common::error::DeskError;
use axum::{
    body::Body,
    extract::{ConnectInfo, FromRequestParts, RawPathParams, Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http_body::Body as _;
use serde_json::Value;
use std::net::SocketAddr;
use tracing::{trace, warn};

/// レスポンス本文を読み取る上限のデフォルト（1 MiB）
pub const DEFAULT_CAPTURE_LIMIT_BYTES: usize = 1024 * 1024;

/// 監査ミドルウェアの状態
///
/// ルートごとに操作種別とリソース種別を固定して生成する。
#[derive(Clone)]
pub struct AuditLayer {
    recorder: AuditRecorder,
    action: AuditAction,
    resource_type: String,
    capture_limit: usize,
}

impl AuditLayer {
    /// 新しいAuditLayerを作成
    pub fn new(recorder: AuditRecorder, action: AuditAction, resource_type: impl Into<String>) -> Self {
        Self {
            recorder,
            action,
            resource_type: resource_type.into(),
            capture_limit: DEFAULT_CAPTURE_LIMIT_BYTES,
        }
    }

    /// 本文読み取り上限を変更
    pub fn with_capture_limit(mut self, bytes: usize) -> Self {
        self.capture_limit = bytes;
        self
    }
}

/// レスポンスから抽出した記録対象
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedMutation {
    /// リソースID
    pub resource_id: Option<String>,
    /// リソース表示名
    pub resource_name: Option<String>,
    /// 変更内容（レスポンスの `data` フィールド）
    pub changes: Option<Value>,
}

/// レスポンスが記録対象の成功した変更か判定し、リソース情報を取り出す
///
/// 成功条件は `success == true` かつステータス < 400。
/// ID: `data.id` → `id` → パスパラメータ `id`。
/// 表示名: `data.name` → `data.title` → `name` → `title`。
pub fn capture_mutation(
    status: StatusCode,
    body: &[u8],
    path_id: Option<&str>,
) -> Option<CapturedMutation> {
    if status.as_u16() >= 400 {
        return None;
    }
    let payload: Value = serde_json::from_slice(body).ok()?;
    if payload.get("success") != Some(&Value::Bool(true)) {
        return None;
    }

    let data = payload.get("data").filter(|d| !d.is_null());
    let from_data = |key: &str| data.and_then(|d| d.get(key)).and_then(scalar_text);
    let from_root = |key: &str| payload.get(key).and_then(scalar_text);

    let resource_id = from_data("id")
        .or_else(|| from_root("id"))
        .or_else(|| path_id.filter(|id| !id.is_empty()).map(str::to_string));
    let resource_name = from_data("name")
        .or_else(|| from_data("title"))
        .or_else(|| from_root("name"))
        .or_else(|| from_root("title"));

    Some(CapturedMutation {
        resource_id,
        resource_name,
        changes: data.cloned(),
    })
}

/// 文字列・数値を記録用の文字列に変換（空文字はNone）
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

/// 監査ミドルウェア
///
/// `require_auth` / `require_admin` の内側に配置する（Claimsを参照するため）。
pub async fn audit_mutation(
    State(layer): State<AuditLayer>,
    request: Request,
    next: Next,
) -> Response {
    let (mut parts, body) = request.into_parts();

    let path_id = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .ok()
        .and_then(|params| {
            params
                .iter()
                .find(|(key, _)| *key == "id")
                .map(|(_, value)| value.to_string())
        });
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let origin = RequestOrigin::from_parts(&parts.headers, peer);
    let actor = parts.extensions.get::<Claims>().cloned();

    let response = next.run(Request::from_parts(parts, body)).await;

    if !is_json(&response) {
        return response;
    }
    let within_limit = response
        .body()
        .size_hint()
        .upper()
        .is_some_and(|upper| upper <= layer.capture_limit as u64);
    if !within_limit {
        trace!(
            resource_type = %layer.resource_type,
            "Response body too large to capture, skipping activity log"
        );
        return response;
    }

    let (parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, layer.capture_limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to read handler response body");
            return AppError(DeskError::Internal(format!(
                "Failed to read handler response body: {}",
                e
            )))
            .into_response();
        }
    };

    if let Some(captured) = capture_mutation(parts.status, &bytes, path_id.as_deref()) {
        let mutation = AuditMutation {
            action: layer.action,
            resource_type: layer.resource_type.clone(),
            resource_id: captured.resource_id,
            resource_name: captured.resource_name,
            changes: captured.changes,
        };
        // 書き込み完了は待たない
        let _ = layer.recorder.record(actor.as_ref(), mutation, &origin);
    }

    Response::from_parts(parts, Body::from(bytes))
}
