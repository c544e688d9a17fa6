//! # Medicine Bot Main Entry Point
//!
//! Initializes logging, loads configuration, sets up the database,
//! starts the reminder job and serves the webhook and sheet endpoints.

use anyhow::Result;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medicine_bot::bot::handlers::BotHandler;
use medicine_bot::config::Config;
use medicine_bot::database::connection::DatabaseManager;
use medicine_bot::line::LineClient;
use medicine_bot::services::{
    health::HealthService, medicine::MedicineStore, pills::PillsService,
    reminder::ReminderService, webhook::WebhookService,
};
use medicine_bot::utils::logging::log_system_event;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "medicine_bot=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    info!("Starting Medicine Bot v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded - Database: {}, HTTP Port: {}, Sheet size: {}",
        config.database_url, config.http_port, config.medicine_max);

    // Initialize database
    info!("Initializing database connection...");
    let db_manager = DatabaseManager::new(&config.database_url).await?;
    info!("Running database migrations...");
    db_manager.run_migrations().await?;
    info!("Database initialized successfully");

    let store = MedicineStore::new(
        db_manager,
        config.medicine_max,
        config.initial_remaining,
    );
    let line = LineClient::new(&config.line_api_base, &config.line_channel_access_token);
    let handler = BotHandler::new(store.clone(), line.clone());

    // Reminder job only runs with a push recipient
    let mut reminder_service = match &config.line_push_to {
        Some(push_to) => {
            let mut service = ReminderService::new(
                line.clone(),
                store.clone(),
                push_to.clone(),
                config.reminder_cron.clone(),
            )
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create reminder service: {}", e))?;

            if let Err(e) = service.start().await {
                tracing::error!("Failed to start reminder service: {}", e);
            }
            Some(service)
        }
        None => {
            log_system_event("Reminder service disabled", Some("LINE_PUSH_TO is not set"));
            None
        }
    };

    let app = Router::new()
        .merge(HealthService::new(store.clone()).router)
        .merge(WebhookService::new(handler, &config.line_channel_secret).router)
        .merge(PillsService::new(store).router)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.http_port))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to port {}: {}", config.http_port, e))?;

    info!("HTTP server starting on port {}", config.http_port);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    // Stop reminder service on shutdown
    if let Some(service) = reminder_service.as_mut() {
        if let Err(e) = service.stop().await {
            tracing::warn!("Error stopping reminder service: {}", e);
        }
    }

    log_system_event("Application stopped", None);
    Ok(())
}
