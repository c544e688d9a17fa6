use chrono::NaiveDate;
use tokio_cron_scheduler::{JobScheduler, Job};

use crate::bot::messages;
use crate::line::LineClient;
use crate::medicine::{pill_text, StatusReport};
use crate::services::medicine::MedicineStore;
use crate::utils::datetime::today_utc;

pub struct ReminderService {
    line: LineClient,
    store: MedicineStore,
    push_to: String,
    cron: String,
    scheduler: JobScheduler,
}

impl ReminderService {
    pub async fn new(
        line: LineClient,
        store: MedicineStore,
        push_to: String,
        cron: String,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let scheduler = JobScheduler::new().await?;

        Ok(Self {
            line,
            store,
            push_to,
            cron,
            scheduler,
        })
    }

    pub async fn start(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = self.line.clone();
        let store = self.store.clone();
        let push_to = self.push_to.clone();

        let reminder_job = Job::new_async(self.cron.as_str(), move |_uuid, _l| {
            let line = line.clone();
            let store = store.clone();
            let push_to = push_to.clone();
            Box::pin(async move {
                if let Err(e) = check_and_send_reminder(&line, &store, &push_to, today_utc()).await {
                    tracing::error!("Failed to send medicine reminder: {}", e);
                }
            })
        })?;

        self.scheduler.add(reminder_job).await?;
        self.scheduler.start().await?;

        tracing::info!("Reminder service started - schedule '{}' (UTC)", self.cron);
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.scheduler.shutdown().await?;
        Ok(())
    }

    /// Runs the reminder check immediately
    pub async fn check_now(&self) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        check_and_send_reminder(&self.line, &self.store, &self.push_to, today_utc()).await
    }
}

/// Reminder text for a status, or `None` once today's dose is taken
pub fn reminder_message(report: &StatusReport, max: i64) -> Option<String> {
    if report.taken_today {
        return None;
    }
    Some(messages::with_sheet(messages::REMINDER, &pill_text(report, max)))
}

/// Pushes a reminder if today's dose has not been taken. Returns whether a
/// reminder was sent. Single attempt, no retry.
pub async fn check_and_send_reminder(
    line: &LineClient,
    store: &MedicineStore,
    push_to: &str,
    today: NaiveDate,
) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
    let report = store.status(today).await?;

    let Some(text) = reminder_message(&report, store.max()) else {
        tracing::debug!("Dose already taken on {}, no reminder", today);
        return Ok(false);
    };

    line.push_text(push_to, &text).await?;
    tracing::info!("Sent medicine reminder ({} remaining)", report.remaining);
    Ok(true)
}
