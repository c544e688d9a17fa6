use tracing::{error, info, debug};

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_START: {} by {} - {}", command, user, d),
        None => info!("CMD_START: {} by {}", command, user),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("CMD_SUCCESS: {} by {} - {}", command, user, d),
        None => info!("CMD_SUCCESS: {} by {}", command, user),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: &str, error: &str) {
    error!("CMD_ERROR: {} by {} - {}", command, user, error);
}

/// Logs database operations with consistent format
pub fn log_database_operation(operation: &str, table: &str, details: Option<&str>) {
    match details {
        Some(d) => debug!("DB_OP: {} on {} - {}", operation, table, d),
        None => debug!("DB_OP: {} on {}", operation, table),
    }
}

/// Logs database errors with consistent format
pub fn log_database_error(operation: &str, table: &str, error: &str, details: Option<&str>) {
    match details {
        Some(d) => error!("DB_ERROR: {} on {} failed: {} - {}", operation, table, error, d),
        None => error!("DB_ERROR: {} on {} failed: {}", operation, table, error),
    }
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
