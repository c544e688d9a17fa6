use chrono::NaiveDate;
use sqlx::SqliteConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::database::{connection::DatabaseManager, models::*};
use crate::medicine::{HistoryAction, MedicineStatus, StatusReport, TakeOutcome};
use crate::utils::logging::log_database_operation;

/// Persisted medicine counter.
///
/// Every operation runs read, decide and write as one unit: a process-wide
/// lock serializes callers and the status update shares a transaction with
/// its history entry. `take` additionally only writes if the stored row has
/// no take recorded for the same day.
#[derive(Clone)]
pub struct MedicineStore {
    db: DatabaseManager,
    max: i64,
    initial_remaining: i64,
    lock: Arc<Mutex<()>>,
}

impl MedicineStore {
    pub fn new(db: DatabaseManager, max: i64, initial_remaining: i64) -> Self {
        Self {
            db,
            max,
            initial_remaining,
            lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn max(&self) -> i64 {
        self.max
    }

    pub fn db(&self) -> &DatabaseManager {
        &self.db
    }

    /// Reads the row, seeding it on first use. A count outside `[0, max]`
    /// (left behind by a larger `MEDICINE_MAX`) is written back clamped.
    async fn load(
        conn: &mut SqliteConnection,
        max: i64,
        initial_remaining: i64,
    ) -> Result<MedicineStatus, sqlx::Error> {
        MedicineStatusRow::insert_default(&mut *conn, initial_remaining).await?;
        let status = MedicineStatusRow::find(&mut *conn)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?
            .to_status();

        let Some(clamped) = status.clamped(max) else {
            return Ok(status);
        };

        warn!(
            "Stored remaining {} is outside 0..={}, resetting to {}",
            status.remaining, max, clamped.remaining
        );
        MedicineStatusRow::update(&mut *conn, &clamped).await?;
        Ok(clamped)
    }

    /// Current stored status, creating the row with defaults on first use
    pub async fn current(&self) -> Result<MedicineStatus, sqlx::Error> {
        let mut conn = self.db.pool.acquire().await?;
        Self::load(&mut conn, self.max, self.initial_remaining).await
    }

    pub async fn status(&self, today: NaiveDate) -> Result<StatusReport, sqlx::Error> {
        Ok(self.current().await?.report(today))
    }

    pub async fn take(&self, today: NaiveDate) -> Result<TakeOutcome, sqlx::Error> {
        let _guard = self.lock.lock().await;
        let mut tx = self.db.pool.begin().await?;

        let status = Self::load(&mut tx, self.max, self.initial_remaining).await?;
        let (next, outcome) = status.take(today, self.max);
        let Some(next) = next else {
            tx.rollback().await?;
            return Ok(outcome);
        };

        let updated = MedicineStatusRow::update_unless_taken_on(&mut *tx, &next, today).await?;
        if updated == 0 {
            // someone outside this process recorded today's take in between
            tx.rollback().await?;
            let current = self.current().await?;
            return Ok(TakeOutcome::AlreadyTakenToday {
                remaining: current.remaining,
            });
        }

        MedicineHistory::create(&mut *tx, HistoryAction::Take).await?;
        tx.commit().await?;

        log_database_operation(
            "UPDATE",
            "medicine_status",
            Some(&format!("take: {} -> {}", status.remaining, next.remaining)),
        );
        Ok(outcome)
    }

    pub async fn decrease(&self) -> Result<i64, sqlx::Error> {
        self.apply(HistoryAction::Decrease, |status, max| status.decrease(max))
            .await
    }

    pub async fn increase(&self) -> Result<i64, sqlx::Error> {
        self.apply(HistoryAction::Increase, |status, max| status.increase(max))
            .await
    }

    /// Runs a manual correction. A `None` transition is a no-op and leaves no history.
    async fn apply<F>(&self, action: HistoryAction, transition: F) -> Result<i64, sqlx::Error>
    where
        F: FnOnce(&MedicineStatus, i64) -> Option<MedicineStatus>,
    {
        let _guard = self.lock.lock().await;
        let mut tx = self.db.pool.begin().await?;

        let status = Self::load(&mut tx, self.max, self.initial_remaining).await?;
        let Some(next) = transition(&status, self.max) else {
            tx.rollback().await?;
            log_database_operation(
                "SKIP",
                "medicine_status",
                Some(&format!("{action}: remaining stays at {}", status.remaining)),
            );
            return Ok(status.remaining);
        };

        MedicineStatusRow::update(&mut *tx, &next).await?;
        MedicineHistory::create(&mut *tx, action).await?;
        tx.commit().await?;

        log_database_operation(
            "UPDATE",
            "medicine_status",
            Some(&format!("{action}: {} -> {}", status.remaining, next.remaining)),
        );
        Ok(next.remaining)
    }

    pub async fn history(&self, limit: i64) -> Result<Vec<MedicineHistory>, sqlx::Error> {
        MedicineHistory::recent(&self.db.pool, limit).await
    }
}
