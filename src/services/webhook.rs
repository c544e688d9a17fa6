use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::post,
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::bot::handlers::BotHandler;
use crate::error::ApiError;
use crate::line::{verify_signature, WebhookPayload, SIGNATURE_HEADER};

#[derive(Clone)]
pub struct WebhookState {
    pub handler: BotHandler,
    pub channel_secret: Arc<str>,
}

pub struct WebhookService {
    pub router: Router,
}

impl WebhookService {
    pub fn new(handler: BotHandler, channel_secret: &str) -> Self {
        let state = WebhookState {
            handler,
            channel_secret: Arc::from(channel_secret),
        };

        let router = Router::new()
            .route("/webhook", post(webhook))
            .with_state(state);

        Self { router }
    }
}

async fn webhook(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .ok_or(ApiError::MissingSignature)?
        .to_str()
        .map_err(|_| ApiError::InvalidSignature)?;

    if !verify_signature(&state.channel_secret, &body, signature) {
        tracing::warn!("Rejected webhook delivery with invalid signature");
        return Err(ApiError::InvalidSignature);
    }

    let payload: WebhookPayload = serde_json::from_slice(&body)?;
    tracing::debug!("Webhook delivery with {} event(s)", payload.events.len());

    state.handler.handle_events(&payload.events).await?;

    Ok(Json(json!({ "success": true })))
}
