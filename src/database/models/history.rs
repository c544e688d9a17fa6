use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::medicine::HistoryAction;

/// Append-only audit entry for a counter change
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MedicineHistory {
    pub id: i64,
    pub taken_at: String, // RFC 3339
    pub action: String,   // 'take', 'increase', 'decrease'
}

impl MedicineHistory {
    pub async fn create<'e, E>(executor: E, action: HistoryAction) -> Result<Self, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let taken_at = Utc::now().to_rfc3339();

        let result = sqlx::query("INSERT INTO medicine_history (taken_at, action) VALUES (?, ?)")
            .bind(&taken_at)
            .bind(action.as_str())
            .execute(executor)
            .await?;

        Ok(MedicineHistory {
            id: result.last_insert_rowid(),
            taken_at,
            action: action.as_str().to_string(),
        })
    }

    /// Newest entries first
    pub async fn recent(pool: &sqlx::SqlitePool, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as::<_, MedicineHistory>(
            "SELECT id, taken_at, action FROM medicine_history ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn count(pool: &sqlx::SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM medicine_history")
            .fetch_one(pool)
            .await
    }

    pub fn action(&self) -> Option<HistoryAction> {
        self.action.parse().ok()
    }
}
