use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{Executor, FromRow, Sqlite};

use crate::medicine::MedicineStatus;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The single `medicine_status` row (always `id = 1`)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MedicineStatusRow {
    pub remaining: i64,
    pub last_taken_at: Option<String>, // YYYY-MM-DD
}

fn format_date(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format(DATE_FORMAT).to_string())
}

impl MedicineStatusRow {
    pub async fn find<'e, E>(executor: E) -> Result<Option<Self>, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query_as::<_, MedicineStatusRow>(
            "SELECT remaining, last_taken_at FROM medicine_status WHERE id = 1",
        )
        .fetch_optional(executor)
        .await
    }

    /// Seeds the row if it does not exist yet; an existing row is left alone.
    pub async fn insert_default<'e, E>(executor: E, remaining: i64) -> Result<(), sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT OR IGNORE INTO medicine_status (id, remaining, last_taken_at) VALUES (1, ?, NULL)",
        )
        .bind(remaining)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn update<'e, E>(executor: E, status: &MedicineStatus) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE medicine_status SET remaining = ?, last_taken_at = ? WHERE id = 1",
        )
        .bind(status.remaining)
        .bind(format_date(status.last_taken_at))
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Writes `status` only if no take has been recorded for `today`.
    /// Returns the number of rows changed, so 0 means another writer got there first.
    pub async fn update_unless_taken_on<'e, E>(
        executor: E,
        status: &MedicineStatus,
        today: NaiveDate,
    ) -> Result<u64, sqlx::Error>
    where
        E: Executor<'e, Database = Sqlite>,
    {
        let result = sqlx::query(
            "UPDATE medicine_status SET remaining = ?, last_taken_at = ? WHERE id = 1 AND last_taken_at IS NOT ?",
        )
        .bind(status.remaining)
        .bind(format_date(status.last_taken_at))
        .bind(today.format(DATE_FORMAT).to_string())
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub fn to_status(&self) -> MedicineStatus {
        let last_taken_at = self.last_taken_at.as_deref().and_then(|raw| {
            match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(e) => {
                    tracing::warn!("Ignoring unparsable last_taken_at '{}': {}", raw, e);
                    None
                }
            }
        });

        MedicineStatus {
            remaining: self.remaining,
            last_taken_at,
        }
    }
}
