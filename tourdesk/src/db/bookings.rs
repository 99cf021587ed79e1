// 予約受付とステータス管理

use crate::common::error::{DeskError, DeskResult};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// 予約ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BookingStatus {
    /// 受付済み（未確認）
    Pending,
    /// 確定
    Confirmed,
    /// キャンセル
    Cancelled,
}

/// 予約
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Booking {
    /// 予約ID
    pub id: i64,
    /// 対象ツアーID
    pub tour_id: i64,
    /// 予約した顧客のユーザーID
    pub customer_id: String,
    /// 連絡先氏名
    pub contact_name: String,
    /// 連絡先メールアドレス
    pub contact_email: String,
    /// 人数
    pub travelers: i64,
    /// 出発日
    pub travel_date: NaiveDate,
    /// ステータス
    pub status: BookingStatus,
    /// 備考
    pub note: Option<String>,
    /// 受付日時
    pub created_at: DateTime<Utc>,
}

/// 予約リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    /// 対象ツアーID
    pub tour_id: i64,
    /// 連絡先氏名
    pub contact_name: String,
    /// 連絡先メールアドレス
    pub contact_email: String,
    /// 人数
    pub travelers: i64,
    /// 出発日
    pub travel_date: NaiveDate,
    /// 備考
    #[serde(default)]
    pub note: Option<String>,
}

impl NewBooking {
    fn validate(&self) -> DeskResult<()> {
        if self.contact_name.trim().is_empty() {
            return Err(DeskError::Validation("Contact name is required".to_string()));
        }
        let email = self.contact_email.trim();
        if !email.contains('@') || email.starts_with('@') || email.ends_with('@') {
            return Err(DeskError::Validation(
                "A valid contact email is required".to_string(),
            ));
        }
        if self.travelers <= 0 {
            return Err(DeskError::Validation(
                "At least one traveler is required".to_string(),
            ));
        }
        if self.travel_date < Utc::now().date_naive() {
            return Err(DeskError::Validation(
                "Travel date must not be in the past".to_string(),
            ));
        }
        Ok(())
    }
}

const SELECT_BOOKING: &str = "SELECT id, tour_id, customer_id, contact_name, contact_email, \
                              travelers, travel_date, status, note, created_at FROM bookings";

/// 予約を受け付ける
///
/// # Returns
/// * `Ok(Booking)` - 受け付けた予約（status = pending）
/// * `Err(DeskError::NotFound)` - ツアーが存在しない
/// * `Err(DeskError::Validation)` - 入力不正
pub async fn create(pool: &SqlitePool, customer_id: &str, input: &NewBooking) -> DeskResult<Booking> {
    input.validate()?;
    if crate::db::tours::find_by_id(pool, input.tour_id)
        .await?
        .is_none()
    {
        return Err(DeskError::NotFound("Tour".to_string()));
    }
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO bookings (tour_id, customer_id, contact_name, contact_email, travelers, travel_date, status, note, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(input.tour_id)
    .bind(customer_id)
    .bind(input.contact_name.trim())
    .bind(input.contact_email.trim())
    .bind(input.travelers)
    .bind(input.travel_date)
    .bind(BookingStatus::Pending)
    .bind(&input.note)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| DeskError::Database(format!("Failed to create booking: {}", e)))?;

    Ok(Booking {
        id: result.last_insert_rowid(),
        tour_id: input.tour_id,
        customer_id: customer_id.to_string(),
        contact_name: input.contact_name.trim().to_string(),
        contact_email: input.contact_email.trim().to_string(),
        travelers: input.travelers,
        travel_date: input.travel_date,
        status: BookingStatus::Pending,
        note: input.note.clone(),
        created_at: now,
    })
}

/// 予約一覧を取得（ステータス指定可）
pub async fn list(pool: &SqlitePool, status: Option<BookingStatus>) -> DeskResult<Vec<Booking>> {
    let result = match status {
        Some(status) => {
            let sql = format!("{} WHERE status = ? ORDER BY id DESC", SELECT_BOOKING);
            sqlx::query_as::<_, Booking>(&sql)
                .bind(status)
                .fetch_all(pool)
                .await
        }
        None => {
            let sql = format!("{} ORDER BY id DESC", SELECT_BOOKING);
            sqlx::query_as::<_, Booking>(&sql).fetch_all(pool).await
        }
    };
    result.map_err(|e| DeskError::Database(format!("Failed to list bookings: {}", e)))
}

/// IDで予約を取得
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> DeskResult<Option<Booking>> {
    let sql = format!("{} WHERE id = ?", SELECT_BOOKING);
    sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to find booking: {}", e)))
}

/// 予約ステータスを更新
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: BookingStatus,
) -> DeskResult<Option<Booking>> {
    let result = sqlx::query("UPDATE bookings SET status = ? WHERE id = ?")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to update booking: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    find_by_id(pool, id).await
}

/// 予約を削除し、削除前のレコードを返す
pub async fn delete(pool: &SqlitePool, id: i64) -> DeskResult<Option<Booking>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM bookings WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to delete booking: {}", e)))?;

    Ok(Some(current))
}
