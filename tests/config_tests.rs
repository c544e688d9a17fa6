use medicine_bot::config::{medicine_max_from_env, Config};
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const ALL_VARS: [&str; 9] = [
    "LINE_CHANNEL_SECRET",
    "LINE_CHANNEL_ACCESS_TOKEN",
    "LINE_API_BASE",
    "DATABASE_URL",
    "HTTP_PORT",
    "MEDICINE_MAX",
    "INITIAL_REMAINING",
    "LINE_PUSH_TO",
    "REMINDER_CRON",
];

fn clear_env() {
    for var in ALL_VARS {
        env::remove_var(var);
    }
}

fn set_required() {
    env::set_var("LINE_CHANNEL_SECRET", "secret");
    env::set_var("LINE_CHANNEL_ACCESS_TOKEN", "token");
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_required();
    env::set_var("LINE_API_BASE", "http://localhost:9000/");
    env::set_var("DATABASE_URL", "sqlite:test.db");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("MEDICINE_MAX", "21");
    env::set_var("INITIAL_REMAINING", "7");
    env::set_var("LINE_PUSH_TO", "U123");
    env::set_var("REMINDER_CRON", "0 30 8 * * *");

    let config = Config::from_env().unwrap();

    assert_eq!(config.line_channel_secret, "secret");
    assert_eq!(config.line_channel_access_token, "token");
    assert_eq!(config.line_api_base, "http://localhost:9000");
    assert_eq!(config.database_url, "sqlite:test.db");
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.medicine_max, 21);
    assert_eq!(config.initial_remaining, 7);
    assert_eq!(config.line_push_to.as_deref(), Some("U123"));
    assert_eq!(config.reminder_cron, "0 30 8 * * *");

    clear_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_required();

    let config = Config::from_env().unwrap();

    assert_eq!(config.line_api_base, "https://api.line.me");
    assert_eq!(config.database_url, "sqlite:./data/medicine.db");
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.medicine_max, 28);
    assert_eq!(config.initial_remaining, 28);
    assert_eq!(config.line_push_to, None);
    assert_eq!(config.reminder_cron, "0 0 12 * * *");

    clear_env();
}

#[test]
fn test_config_missing_required_secret() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("LINE_CHANNEL_ACCESS_TOKEN", "token");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("LINE_CHANNEL_SECRET must be set"));

    clear_env();
}

#[test]
fn test_config_blank_access_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("LINE_CHANNEL_SECRET", "secret");
    env::set_var("LINE_CHANNEL_ACCESS_TOKEN", "   ");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("LINE_CHANNEL_ACCESS_TOKEN must be set"));

    clear_env();
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_required();
    env::set_var("HTTP_PORT", "invalid_port");

    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid HTTP_PORT"));

    clear_env();
}

#[test]
fn test_config_invalid_medicine_max() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();

    for value in ["0", "-5", "many"] {
        clear_env();
        set_required();
        env::set_var("MEDICINE_MAX", value);

        let error_msg = Config::from_env().unwrap_err().to_string();
        assert!(error_msg.contains("Invalid MEDICINE_MAX"), "value {value}");
    }

    clear_env();
}

#[test]
fn test_config_initial_remaining_follows_max() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    set_required();
    env::set_var("MEDICINE_MAX", "14");

    let config = Config::from_env().unwrap();
    assert_eq!(config.initial_remaining, 14);

    env::set_var("INITIAL_REMAINING", "15");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid INITIAL_REMAINING"));

    clear_env();
}

#[test]
fn test_medicine_max_from_env() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    // needs no LINE credentials
    assert_eq!(medicine_max_from_env().unwrap(), 28);

    env::set_var("MEDICINE_MAX", " 14 ");
    assert_eq!(medicine_max_from_env().unwrap(), 14);

    env::set_var("MEDICINE_MAX", "0");
    let error_msg = medicine_max_from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid MEDICINE_MAX"));

    clear_env();
}
