// ブログ記事CRUD操作

use crate::common::error::{DeskError, DeskResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// ブログ記事
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Blog {
    /// 記事ID
    pub id: i64,
    /// タイトル
    pub title: String,
    /// 本文
    pub content: String,
    /// 著者名
    pub author: String,
    /// 公開フラグ
    pub published: bool,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// 記事作成リクエスト
#[derive(Debug, Clone, Deserialize)]
pub struct NewBlog {
    /// タイトル
    pub title: String,
    /// 本文
    pub content: String,
    /// 公開フラグ
    #[serde(default)]
    pub published: bool,
}

/// 記事更新リクエスト
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BlogChanges {
    /// タイトル
    pub title: Option<String>,
    /// 本文
    pub content: Option<String>,
    /// 公開フラグ
    pub published: Option<bool>,
}

fn validate(title: &str, content: &str) -> DeskResult<()> {
    if title.trim().is_empty() {
        return Err(DeskError::Validation("Blog title is required".to_string()));
    }
    if content.trim().is_empty() {
        return Err(DeskError::Validation(
            "Blog content is required".to_string(),
        ));
    }
    Ok(())
}

const SELECT_BLOG: &str =
    "SELECT id, title, content, author, published, created_at, updated_at FROM blogs";

/// 記事一覧を取得
///
/// `published_only` がtrueの場合は公開済みのみ。
pub async fn list(pool: &SqlitePool, published_only: bool) -> DeskResult<Vec<Blog>> {
    let sql = if published_only {
        format!("{} WHERE published = 1 ORDER BY id DESC", SELECT_BLOG)
    } else {
        format!("{} ORDER BY id DESC", SELECT_BLOG)
    };
    sqlx::query_as::<_, Blog>(&sql)
        .fetch_all(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to list blogs: {}", e)))
}

/// IDで記事を取得
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> DeskResult<Option<Blog>> {
    let sql = format!("{} WHERE id = ?", SELECT_BLOG);
    sqlx::query_as::<_, Blog>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to find blog: {}", e)))
}

/// 記事を作成
pub async fn create(pool: &SqlitePool, input: &NewBlog, author: &str) -> DeskResult<Blog> {
    validate(&input.title, &input.content)?;
    let now = Utc::now();

    let result = sqlx::query(
        "INSERT INTO blogs (title, content, author, published, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(input.title.trim())
    .bind(&input.content)
    .bind(author)
    .bind(input.published)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| DeskError::Database(format!("Failed to create blog: {}", e)))?;

    Ok(Blog {
        id: result.last_insert_rowid(),
        title: input.title.trim().to_string(),
        content: input.content.clone(),
        author: author.to_string(),
        published: input.published,
        created_at: now,
        updated_at: now,
    })
}

/// 記事を更新
pub async fn update(pool: &SqlitePool, id: i64, changes: &BlogChanges) -> DeskResult<Option<Blog>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    let updated = Blog {
        title: changes
            .title
            .as_deref()
            .map(|t| t.trim().to_string())
            .unwrap_or(current.title),
        content: changes.content.clone().unwrap_or(current.content),
        published: changes.published.unwrap_or(current.published),
        updated_at: Utc::now(),
        ..current
    };
    validate(&updated.title, &updated.content)?;

    sqlx::query("UPDATE blogs SET title = ?, content = ?, published = ?, updated_at = ? WHERE id = ?")
        .bind(&updated.title)
        .bind(&updated.content)
        .bind(updated.published)
        .bind(updated.updated_at)
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to update blog: {}", e)))?;

    Ok(Some(updated))
}

/// 記事を削除し、削除前のレコードを返す
pub async fn delete(pool: &SqlitePool, id: i64) -> DeskResult<Option<Blog>> {
    let Some(current) = find_by_id(pool, id).await? else {
        return Ok(None);
    };

    sqlx::query("DELETE FROM blogs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to delete blog: {}", e)))?;

    Ok(Some(current))
}
