use chrono::NaiveDate;

use crate::bot::commands::{history, medicine, Command};
use crate::services::medicine::MedicineStore;

/// Runs a command against the store and builds the reply text
pub async fn command_handler(
    store: &MedicineStore,
    cmd: Command,
    today: NaiveDate,
) -> Result<String, sqlx::Error> {
    match cmd {
        Command::Take => medicine::handle_take(store, today).await,
        Command::Status => medicine::handle_status(store, today).await,
        Command::Today => medicine::handle_today(store, today).await,
        Command::Decrease => medicine::handle_decrease(store).await,
        Command::Increase => medicine::handle_increase(store).await,
        Command::History => history::handle_history(store).await,
    }
}
