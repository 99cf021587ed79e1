//! ブログAPI
//!
//! 公開記事の一覧は誰でも参照可能。記事の作成・更新・削除は編集者ロールのみ。

use super::envelope::ApiResponse;
use super::error::AppError;
use crate::common::auth::Claims;
use crate::common::error::DeskError;
use crate::db::blogs::{self, Blog, BlogChanges, NewBlog};
use crate::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    Extension, Json,
};

/// GET /api/blogs - 公開済み記事一覧
pub async fn list_blogs(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Blog>>>, AppError> {
    let blogs = blogs::list(&state.db_pool, true).await?;
    Ok(Json(ApiResponse::ok(blogs)))
}

/// POST /api/editor/blogs - 記事作成
///
/// 著者名はトークンの表示名（なければユーザーID）。
pub async fn create_blog(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    payload: Result<Json<NewBlog>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<Blog>>), AppError> {
    let Json(input) = payload?;
    let author = claims.name.as_deref().unwrap_or(&claims.sub);
    let blog = blogs::create(&state.db_pool, &input, author).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(blog).with_message("Blog created")),
    ))
}

/// PUT /api/editor/blogs/:id - 記事更新
pub async fn update_blog(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BlogChanges>, JsonRejection>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    let Path(id) = path?;
    let Json(changes) = payload?;
    let blog = blogs::update(&state.db_pool, id, &changes)
        .await?
        .ok_or_else(|| DeskError::NotFound("Blog".to_string()))?;
    Ok(Json(ApiResponse::ok(blog).with_message("Blog updated")))
}

/// DELETE /api/editor/blogs/:id - 記事削除
pub async fn delete_blog(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiResponse<Blog>>, AppError> {
    let Path(id) = path?;
    let blog = blogs::delete(&state.db_pool, id)
        .await?
        .ok_or_else(|| DeskError::NotFound("Blog".to_string()))?;
    Ok(Json(ApiResponse::ok(blog).with_message("Blog deleted")))
}
