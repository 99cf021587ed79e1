//! 予約API
//!
//! 顧客による予約受付と、管理者による予約管理

use super::envelope::ApiResponse;
use super::error::AppError;
use crate::common::auth::Claims;
use crate::common::error::DeskError;
use crate::db::bookings::{self, Booking, BookingStatus, NewBooking};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

/// 予約一覧のクエリパラメータ
#[derive(Debug, Deserialize)]
pub struct BookingListParams {
    /// ステータスでフィルタ
    pub status: Option<BookingStatus>,
}

/// ステータス更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// 新しいステータス
    pub status: BookingStatus,
}

/// POST /api/bookings - 予約受付（customerロール）
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewBooking>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Booking>>), AppError> {
    let Json(input) = payload?;
    let booking = bookings::create(&state.db_pool, &claims.sub, &input).await?;
    tracing::info!(
        booking_id = booking.id,
        tour_id = booking.tour_id,
        customer_id = %booking.customer_id,
        "Booking received"
    );
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(booking).with_message("Booking received")),
    ))
}

/// GET /api/admin/bookings - 予約一覧
pub async fn list_bookings(
    State(state): State<AppState>,
    query: Result<Query<BookingListParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Booking>>>, AppError> {
    let Query(params) = query?;
    let bookings = bookings::list(&state.db_pool, params.status).await?;
    Ok(Json(ApiResponse::ok(bookings)))
}

/// PATCH /api/admin/bookings/:id/status - ステータス更新
pub async fn update_booking_status(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let Path(id) = path?;
    let Json(request) = payload?;
    let booking = bookings::update_status(&state.db_pool, id, request.status)
        .await?
        .ok_or_else(|| DeskError::NotFound("Booking".to_string()))?;
    Ok(Json(ApiResponse::ok(booking).with_message("Booking status updated")))
}

/// DELETE /api/admin/bookings/:id - 予約削除
pub async fn delete_booking(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Booking>>, AppError> {
    let Path(id) = path?;
    let booking = bookings::delete(&state.db_pool, id)
        .await?
        .ok_or_else(|| DeskError::NotFound("Booking".to_string()))?;
    Ok(Json(ApiResponse::ok(booking).with_message("Booking deleted")))
}
