//! ヘルスチェックAPI

use crate::AppState;
use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

/// GET /health - 生存確認（DB疎通を含む）
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match sqlx::query_scalar::<_, i64>("SELECT 1")
        .fetch_one(&state.db_pool)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "success": true, "status": "ok" })),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Health check database probe failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "success": false, "status": "degraded" })),
            )
        }
    }
}
