// ツアーCRUD操作

use crate::common::error::{DeskError, DeskResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// ツアー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tour {
    /// ツアーID
    pub id: i64,
    /// タイトル
    pub title: String,
    /// 目的地
    pub destination: String,
    /// 説明
    pub description: String,
    /// 価格（最小通貨単位）
    pub price: i64,
    /// 日数
    pub duration_days: i64,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// ツアー作成リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct NewTour {
    /// タイトル
    pub title: String,
    /// 目的地
    pub destination: String,
    /// 説明
    #[serde(default)]
    pub description: String,
    /// 価格
    pub price: i64,
    /// 日数
    pub duration_days: i64,
}

/// ツアー更新リクエスト（指定されたフィールドのみ更新）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourChanges {
    /// タイトル
    pub title: Option<String>,
    /// 目的地
    pub destination: Option<String>,
    /// 説明
    pub description: Option<String>,
    /// 価格
    pub price: Option<i64>,
    /// 日数
    pub duration_days: Option<i64>,
}

fn validate(title: &str, destination: &str, price: i64, duration_days: i64) -> DeskResult<()> {
    if title.trim().is_empty() {
        return Err(DeskError::Validation("Tour title is required".to_string()));
    }
    if destination.trim().is_empty() {
        return Err(DeskError::Validation(
            "Tour destination is required".to_string(),
        ));
    }
    if price < 0 {
        return Err(DeskError::Validation(
            "Tour price must not be negative".to_string(),
        ));
    }
    if duration_days <= 0 {
        return Err(DeskError::Validation(
            "Tour duration must be at least one day".to_string(),
        ));
    }
    Ok(())
}

const SELECT_TOUR: &str = "SELECT id, title, destination, description, price, duration_days, \
                           created_at, updated_at FROM tours";

/// ツアー一覧を取得（新しい順）
pub async fn list(pool: &SqlitePool) -> DeskResult<Vec<Tour>> {
    let sql = format!("{} ORDER BY id DESC", SELECT_TOUR);
    sqlx::query_as::<_, Tour>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to list tours: {}", e)))
}

/// IDでツアーを取得
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> DeskResult<Option<Tour>> {
    let sql = format!("{} WHERE id = ?", SELECT_TOUR);
    sqlx::query_as::<_, Tour>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to find tour: {}", e)))
}

/// ツアーを作成
///
/// # Returns
/// * `Ok(Tour)` - 作成されたツアー
/// * `Err(DeskError::Validation)` - 入力不正
pub async fn create(pool: &SqlitePool, input: &NewTour) -> DeskResult<Tour> {
    validate(
        &input.title,
        &input.destination,
        input.price,
        input.duration_days,
    )?;
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO tours (title, destination, description, price, duration_days, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(input.title.trim())
    .bind(input.destination.trim())
    .bind(&input.description)
    .bind(input.price)
    .bind(input.duration_days)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| DeskError::Database(format!("Failed to create tour: {}", e)))?;

    Ok(Tour {
        id: result.last_insert_rowid(),
        title: input.title.trim().to_string(),
        destination: input.destination.trim().to_string(),
        description: input.description.clone(),
        price: input.price,
        duration_days: input.duration_days,
        created_at: now,
        updated_at: now,
    })
}

/// ツアーを更新
///
/// # Returns
/// * `Ok(Some(Tour))` - 更新後のツアー
/// * `Ok(None)` - ツアーが存在しない
pub async fn update(pool: &SqlitePool, id: i64, changes: &TourChanges) -> DeskResult<Option<Tour>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let updated = Tour {
        title: changes
            .title
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
            .unwrap_or(current.title),
        destination: changes
            .destination
            .as_deref()
            .map(str::trim)
            .map(str::to_string)
            .unwrap_or(current.destination),
        description: changes.description.clone().unwrap_or(current.description),
        price: changes.price.unwrap_or(current.price),
        duration_days: changes.duration_days.unwrap_or(current.duration_days),
        updated_at: Utc::now(),
        ..current
    };
    validate(
        &updated.title,
        &updated.destination,
        updated.price,
        updated.duration_days,
    )?;

    sqlx::query(
        "UPDATE tours SET title = ?, destination = ?, description = ?, price = ?, duration_days = ?, updated_at = ?
         WHERE id = ?",
    )
    .bind(&updated.title)
    .bind(&updated.destination)
    .bind(&updated.description)
    .bind(updated.price)
    .bind(updated.duration_days)
    .bind(updated.updated_at)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| DeskError::Database(format!("Failed to update tour: {}", e)))?;

    Ok(Some(updated))
}

/// ツアーを削除し、削除前のレコードを返す
pub async fn delete(pool: &SqlitePool, id: i64) -> DeskResult<Option<Tour>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM tours WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to delete tour: {}", e)))?;

    Ok(Some(current))
}
