pub mod general_message;
pub mod message;

use chrono::NaiveDate;

use crate::bot::commands::Command;
use crate::line::{LineClient, WebhookEvent};
use crate::services::medicine::MedicineStore;
use crate::utils::datetime::today_utc;
use crate::utils::logging::{
    log_command_error, log_command_start, log_command_success, log_database_error,
};

#[derive(Clone)]
pub struct BotHandler {
    pub store: MedicineStore,
    pub line: LineClient,
}

impl BotHandler {
    pub fn new(store: MedicineStore, line: LineClient) -> Self {
        Self { store, line }
    }

    /// Builds the reply for a text message
    pub async fn respond(
        &self,
        text: &str,
        user: &str,
        today: NaiveDate,
    ) -> Result<String, sqlx::Error> {
        let Some(cmd) = Command::parse(text) else {
            return Ok(general_message::handle_general_message(text));
        };

        log_command_start(cmd.name(), user, None);
        match message::command_handler(&self.store, cmd, today).await {
            Ok(reply) => {
                log_command_success(cmd.name(), user, None);
                Ok(reply)
            }
            Err(e) => {
                log_command_error(cmd.name(), user, &e.to_string());
                log_database_error(cmd.name(), "medicine_status", &e.to_string(), None);
                Err(e)
            }
        }
    }

    /// Handles one webhook event. Store failures propagate; a failed reply
    /// is logged and dropped.
    pub async fn handle_event(&self, event: &WebhookEvent) -> Result<(), sqlx::Error> {
        let Some((reply_token, text)) = event.text_message() else {
            tracing::debug!("Ignoring non-text webhook event");
            return Ok(());
        };
        let user = event.user_id().unwrap_or("unknown");

        let reply = self.respond(text, user, today_utc()).await?;

        let Some(reply_token) = reply_token else {
            tracing::warn!("Message event from {} has no reply token", user);
            return Ok(());
        };
        if let Err(e) = self.line.reply_text(reply_token, &reply).await {
            tracing::error!("Failed to send reply to {}: {}", user, e);
        }

        Ok(())
    }

    /// Processes events in delivery order
    pub async fn handle_events(&self, events: &[WebhookEvent]) -> Result<(), sqlx::Error> {
        for event in events {
            self.handle_event(event).await?;
        }
        Ok(())
    }
}
