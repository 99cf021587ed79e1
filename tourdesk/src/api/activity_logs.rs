//! アクティビティログ閲覧API（管理者専用）

use super::envelope::ApiResponse;
use super::error::AppError;
use crate::audit::types::{ActivityLogFilter, ActivityLogPage, AuditAction};
use crate::common::error::DeskError;
use crate::AppState;
use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

/// アクティビティログ一覧のクエリパラメータ
#[derive(Debug, Default, Deserialize)]
pub struct ActivityLogParams {
    /// リソース種別でフィルタ
    pub resource_type: Option<String>,
    /// 操作種別でフィルタ（create / update / delete）
    pub action: Option<String>,
    /// アクターIDでフィルタ
    pub actor_id: Option<String>,
    /// ページ番号（1始まり、デフォルト: 1）
    pub page: Option<i64>,
    /// ページあたり件数（デフォルト: 20、最大100）
    pub per_page: Option<i64>,
}

impl TryFrom<ActivityLogParams> for ActivityLogFilter {
    type Error = DeskError;

    fn try_from(params: ActivityLogParams) -> Result<Self, Self::Error> {
        let action = params
            .action
            .filter(|a| !a.is_empty())
            .map(|a| a.parse::<AuditAction>())
            .transpose()
            .map_err(DeskError::Validation)?;
        Ok(Self {
            resource_type: params.resource_type.filter(|r| !r.is_empty()),
            action,
            actor_id: params.actor_id.filter(|a| !a.is_empty()),
            page: params.page,
            per_page: params.per_page,
        })
    }
}

/// GET /api/admin/activity-logs - アクティビティログ一覧（新しい順）
pub async fn list_activity_logs(
    State(state): State<AppState>,
    query: Result<Query<ActivityLogParams>, QueryRejection>,
) -> Result<Json<ApiResponse<ActivityLogPage>>, AppError> {
    let Query(params) = query?;
    let filter = ActivityLogFilter::try_from(params)?;
    let page = state.audit_log_storage.list(&filter).await?;
    Ok(Json(ApiResponse::ok(page)))
}
