use axum::{extract::State, http::StatusCode, response::Json, routing::get, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::database::models::MedicineHistory;
use crate::services::medicine::MedicineStore;

/// `/health` body: the counter row and history table are both readable
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub remaining: i64,
    pub history_entries: i64,
}

#[derive(Clone)]
struct HealthState {
    store: MedicineStore,
    started_at: DateTime<Utc>,
}

pub struct HealthService {
    pub router: Router,
}

impl HealthService {
    pub fn new(store: MedicineStore) -> Self {
        let state = HealthState {
            store,
            started_at: Utc::now(),
        };

        let router = Router::new()
            .route("/", get(root))
            .route("/health", get(health_check))
            .route("/health/ready", get(readiness_check))
            .route("/health/live", get(|| async { Json("alive") }))
            .with_state(state);

        Self { router }
    }
}

async fn root() -> &'static str {
    "LINE Bot is running!"
}

async fn health_check(
    State(state): State<HealthState>,
) -> Result<Json<HealthResponse>, StatusCode> {
    let status = state.store.current().await;
    let history_entries = MedicineHistory::count(&state.store.db().pool).await;

    let (Ok(status), Ok(history_entries)) = (status, history_entries) else {
        tracing::warn!("Health check failed: medicine tables unreadable");
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let uptime_seconds = (Utc::now() - state.started_at).num_seconds().max(0) as u64;
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds,
        remaining: status.remaining,
        history_entries,
    }))
}

async fn readiness_check(
    State(state): State<HealthState>,
) -> Result<Json<&'static str>, StatusCode> {
    state
        .store
        .current()
        .await
        .map(|_| Json("ready"))
        .map_err(|_| StatusCode::SERVICE_UNAVAILABLE)
}
