use chrono::NaiveDate;

use crate::bot::messages;
use crate::medicine::{pill_text, TakeOutcome};
use crate::services::medicine::MedicineStore;

pub async fn handle_take(store: &MedicineStore, today: NaiveDate) -> Result<String, sqlx::Error> {
    let reply = match store.take(today).await? {
        TakeOutcome::Taken { remaining } => messages::taken_success(remaining),
        TakeOutcome::AlreadyTakenToday { .. } => messages::TAKEN_ALREADY.to_string(),
    };
    Ok(reply)
}

pub async fn handle_status(store: &MedicineStore, today: NaiveDate) -> Result<String, sqlx::Error> {
    let report = store.status(today).await?;
    let sheet = pill_text(&report, store.max());
    Ok(messages::with_sheet(&messages::status(report.remaining), &sheet))
}

pub async fn handle_today(store: &MedicineStore, today: NaiveDate) -> Result<String, sqlx::Error> {
    let report = store.status(today).await?;
    let sheet = pill_text(&report, store.max());
    let headline = if report.taken_today {
        messages::TODAY_YES
    } else {
        messages::TODAY_NO
    };
    Ok(messages::with_sheet(headline, &sheet))
}

pub async fn handle_decrease(store: &MedicineStore) -> Result<String, sqlx::Error> {
    let remaining = store.decrease().await?;
    Ok(messages::decreased(remaining))
}

pub async fn handle_increase(store: &MedicineStore) -> Result<String, sqlx::Error> {
    let remaining = store.increase().await?;
    Ok(messages::increased(remaining))
}
