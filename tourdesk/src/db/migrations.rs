// データベース接続とマイグレーション実行

use crate::common::error::{DeskError, DeskResult};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

/// SQLiteデータベース接続プールを作成してマイグレーションを実行
///
/// # Arguments
/// * `database_url` - データベースURL（例: "sqlite:data/tourdesk.db"）
///
/// # Returns
/// * `Ok(SqlitePool)` - 初期化済みデータベースプール
/// * `Err(DeskError)` - 初期化失敗
pub async fn initialize_database(database_url: &str) -> DeskResult<SqlitePool> {
    if let Some(parent) = database_parent_dir(database_url) {
        std::fs::create_dir_all(&parent).map_err(|e| {
            DeskError::Database(format!(
                "Failed to create database directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| DeskError::Config(format!("Invalid database URL: {}", e)))?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePool::connect_with(connect_options)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to connect to database: {}", e)))?;

    run_migrations(&pool).await?;
    Ok(pool)
}

/// マイグレーションを実行（sqlx::migrate!マクロを使用）
pub async fn run_migrations(pool: &SqlitePool) -> DeskResult<()> {
    tracing::info!("Running database migrations");

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DeskError::Database(format!("Failed to run migrations: {}", e)))?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// ファイルDBの親ディレクトリを返す（`sqlite::memory:` などはNone）
fn database_parent_dir(database_url: &str) -> Option<std::path::PathBuf> {
    let path = database_url.strip_prefix("sqlite:")?;
    if path.starts_with(':') {
        return None;
    }
    // `sqlite://` 形式とクエリ部分を除去
    let normalized = path.trim_start_matches("//");
    let without_params = normalized.split('?').next().unwrap_or(normalized);
    Path::new(without_params)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
}
