use anyhow::{anyhow, Result};
use std::env;

use crate::line::client::DEFAULT_API_BASE;

const DEFAULT_DATABASE_URL: &str = "sqlite:./data/medicine.db";
const DEFAULT_MEDICINE_MAX: i64 = 28;
const DEFAULT_REMINDER_CRON: &str = "0 0 12 * * *";

#[derive(Debug, Clone)]
pub struct Config {
    pub line_channel_secret: String,
    pub line_channel_access_token: String,
    pub line_api_base: String,
    pub database_url: String,
    pub http_port: u16,
    pub medicine_max: i64,
    pub initial_remaining: i64,
    /// Reminder recipient; the reminder job only runs when this is set
    pub line_push_to: Option<String>,
    pub reminder_cron: String,
}

fn required(name: &str) -> Result<String> {
    let value = env::var(name).map_err(|_| anyhow!("{} must be set", name))?;
    if value.trim().is_empty() {
        return Err(anyhow!("{} must be set", name));
    }
    Ok(value)
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// `DATABASE_URL`, or the default SQLite file
pub fn database_url_from_env() -> String {
    optional("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string())
}

/// `MEDICINE_MAX`, or 28 when unset. Must be a positive integer.
pub fn medicine_max_from_env() -> Result<i64> {
    match optional("MEDICINE_MAX") {
        Some(raw) => raw
            .parse::<i64>()
            .ok()
            .filter(|max| *max > 0)
            .ok_or_else(|| anyhow!("Invalid MEDICINE_MAX: must be a positive integer")),
        None => Ok(DEFAULT_MEDICINE_MAX),
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let line_channel_secret = required("LINE_CHANNEL_SECRET")?;
        let line_channel_access_token = required("LINE_CHANNEL_ACCESS_TOKEN")?;

        let line_api_base = optional("LINE_API_BASE")
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        let database_url = database_url_from_env();

        let port_str = env::var("HTTP_PORT")
            .unwrap_or_else(|_| "3000".to_string());
        let http_port = port_str.trim()
            .parse()
            .map_err(|_| anyhow!("Invalid HTTP_PORT"))?;

        let medicine_max = medicine_max_from_env()?;

        let initial_remaining = match optional("INITIAL_REMAINING") {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|n| (0..=medicine_max).contains(n))
                .ok_or_else(|| {
                    anyhow!("Invalid INITIAL_REMAINING: must be between 0 and {}", medicine_max)
                })?,
            None => medicine_max,
        };

        let line_push_to = optional("LINE_PUSH_TO");
        let reminder_cron = optional("REMINDER_CRON")
            .unwrap_or_else(|| DEFAULT_REMINDER_CRON.to_string());

        Ok(Config {
            line_channel_secret,
            line_channel_access_token,
            line_api_base,
            database_url,
            http_port,
            medicine_max,
            initial_remaining,
            line_push_to,
            reminder_cron,
        })
    }
}
