use crate::bot::messages;
use crate::services::medicine::MedicineStore;

pub async fn handle_history(store: &MedicineStore) -> Result<String, sqlx::Error> {
    let entries = store.history(messages::HISTORY_LIMIT).await?;
    Ok(messages::history(&entries))
}
