//! アクティビティログストレージ（SQLite）

use async_trait::async_trait;
use chrono::SecondsFormat;
use sqlx::SqlitePool;

use crate::audit::types::{ActivityLogFilter, ActivityLogPage, AuditAction, AuditRecord};
use crate::common::error::{DeskError, DeskResult};
use crate::db::traits::AuditLogRepository;

/// アクティビティログのDB操作
#[derive(Clone)]
pub struct AuditLogStorage {
    pool: SqlitePool,
}

/// sqlx::FromRow用の行構造体
#[derive(Debug, sqlx::FromRow)]
struct ActivityLogRow {
    id: i64,
    actor_id: String,
    actor_name: String,
    actor_email: String,
    action: String,
    resource_type: String,
    resource_id: Option<String>,
    resource_name: Option<String>,
    changes: Option<String>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    created_at: String,
}

impl TryFrom<ActivityLogRow> for AuditRecord {
    type Error = DeskError;

    fn try_from(row: ActivityLogRow) -> Result<Self, Self::Error> {
        let created_at = chrono::DateTime::parse_from_rfc3339(&row.created_at)
            .map(|dt| dt.with_timezone(&chrono::Utc))
            .map_err(|e| DeskError::Database(format!("Failed to parse created_at: {}", e)))?;
        let action = row
            .action
            .parse::<AuditAction>()
            .map_err(DeskError::Database)?;

        Ok(AuditRecord {
            id: Some(row.id),
            actor_id: row.actor_id,
            actor_name: row.actor_name,
            actor_email: row.actor_email,
            action,
            resource_type: row.resource_type,
            resource_id: row.resource_id,
            resource_name: row.resource_name,
            changes: row.changes,
            ip_address: row.ip_address,
            user_agent: row.user_agent,
            created_at,
        })
    }
}

impl AuditLogStorage {
    /// 新しいAuditLogStorageを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditLogRepository for AuditLogStorage {
    async fn insert(&self, record: &AuditRecord) -> DeskResult<i64> {
        // 辞書順で時系列になるよう固定精度で保存する
        let created_at = record
            .created_at
            .to_rfc3339_opts(SecondsFormat::Micros, true);

        let result = sqlx::query(
            r#"INSERT INTO activity_logs (
                actor_id, actor_name, actor_email, action,
                resource_type, resource_id, resource_name, changes,
                ip_address, user_agent, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&record.actor_id)
        .bind(&record.actor_name)
        .bind(&record.actor_email)
        .bind(record.action.as_str())
        .bind(&record.resource_type)
        .bind(&record.resource_id)
        .bind(&record.resource_name)
        .bind(&record.changes)
        .bind(&record.ip_address)
        .bind(&record.user_agent)
        .bind(&created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| DeskError::AuditWriteFailed(format!("Failed to insert activity log: {}", e)))?;

        Ok(result.last_insert_rowid())
    }

    async fn list(&self, filter: &ActivityLogFilter) -> DeskResult<ActivityLogPage> {
        let (where_clause, bind_values) = build_where_clause(filter);
        let page = filter.page();
        let per_page = filter.per_page();
        let offset = (page - 1) * per_page;

        let count_sql = format!("SELECT COUNT(*) FROM activity_logs {}", where_clause);
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for val in &bind_values {
            count_query = count_query.bind(val.as_str());
        }
        let total = count_query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DeskError::Database(format!("Failed to count activity logs: {}", e)))?;

        let sql = format!(
            "SELECT id, actor_id, actor_name, actor_email, action, resource_type, \
             resource_id, resource_name, changes, ip_address, user_agent, created_at \
             FROM activity_logs {} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?",
            where_clause
        );
        let mut query = sqlx::query_as::<_, ActivityLogRow>(&sql);
        for val in &bind_values {
            query = query.bind(val.as_str());
        }
        query = query.bind(per_page).bind(offset);

        let rows = query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DeskError::Database(format!("Failed to query activity logs: {}", e)))?;

        let records = rows
            .into_iter()
            .map(AuditRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ActivityLogPage {
            records,
            total,
            page,
            per_page,
        })
    }
}

/// フィルタ条件からWHERE句とバインド値を組み立てる
fn build_where_clause(filter: &ActivityLogFilter) -> (String, Vec<String>) {
    let mut conditions: Vec<&str> = Vec::new();
    let mut bind_values: Vec<String> = Vec::new();

    if let Some(ref resource_type) = filter.resource_type {
        conditions.push("resource_type = ?");
        bind_values.push(resource_type.clone());
    }

    if let Some(action) = filter.action {
        conditions.push("action = ?");
        bind_values.push(action.as_str().to_string());
    }

    if let Some(ref actor_id) = filter.actor_id {
        conditions.push("actor_id = ?");
        bind_values.push(actor_id.clone());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}
