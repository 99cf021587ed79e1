//! ツアーAPI
//!
//! 一覧・詳細は公開、作成・更新・削除は管理者専用（監査対象）

use super::envelope::ApiResponse;
use super::error::AppError;
use crate::common::error::DeskError;
use crate::db::tours::{self, NewTour, Tour, TourChanges};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Json,
};

/// GET /api/tours - ツアー一覧
pub async fn list_tours(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Tour>>>, AppError> {
    let tours = tours::list(&state.db_pool).await?;
    Ok(Json(ApiResponse::ok(tours)))
}

/// GET /api/tours/:id - ツアー詳細
pub async fn get_tour(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Tour>>, AppError> {
    let Path(id) = path?;
    let tour = tours::find_by_id(&state.db_pool, id)
        .await?
        .ok_or_else(|| DeskError::NotFound("Tour".to_string()))?;
    Ok(Json(ApiResponse::ok(tour)))
}

/// POST /api/admin/tours - ツアー作成
///
/// # Returns
/// * `201 Created` - 作成されたツアー
/// * `422 Unprocessable Entity` - 入力不正
pub async fn create_tour(
    State(state): State<AppState>,
    payload: Result<Json<NewTour>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Tour>>), AppError> {
    let Json(input) = payload?;
    let tour = tours::create(&state.db_pool, &input).await?;
    tracing::info!(tour_id = tour.id, title = %tour.title, "Tour created");
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(tour).with_message("Tour created")),
    ))
}

/// PUT /api/admin/tours/:id - ツアー更新
pub async fn update_tour(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<TourChanges>, JsonRejection>,
) -> Result<Json<ApiResponse<Tour>>, AppError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    let tour = tours::update(&state.db_pool, id, &changes)
        .await?
        .ok_or_else(|| DeskError::NotFound("Tour".to_string()))?;
    Ok(Json(ApiResponse::ok(tour).with_message("Tour updated")))
}

/// DELETE /api/admin/tours/:id - ツアー削除
///
/// 削除したレコードを `data` で返す。
pub async fn delete_tour(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Tour>>, AppError> {
    let Path(id) = path?;
    let tour = tours::delete(&state.db_pool, id)
        .await?
        .ok_or_else(|| DeskError::NotFound("Tour".to_string()))?;
    tracing::info!(tour_id = tour.id, "Tour deleted");
    Ok(Json(ApiResponse::ok(tour).with_message("Tour deleted")))
}
