use serde::Deserialize;

/// Body of a webhook delivery
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub events: Vec<WebhookEvent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventSource {
    #[serde(rename = "userId", default)]
    pub user_id: Option<String>,
}

/// Webhook events. Only message events are acted on; anything else
/// (follow, postback, unsend...) deserializes as `Unsupported`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WebhookEvent {
    Message {
        #[serde(rename = "replyToken", default)]
        reply_token: Option<String>,
        #[serde(default)]
        source: EventSource,
        message: EventMessage,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum EventMessage {
    Text { text: String },
    #[serde(other)]
    Other,
}

impl WebhookEvent {
    /// Reply token and text of a text message event
    pub fn text_message(&self) -> Option<(Option<&str>, &str)> {
        match self {
            WebhookEvent::Message {
                reply_token,
                message: EventMessage::Text { text },
                ..
            } => Some((reply_token.as_deref(), text.as_str())),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            WebhookEvent::Message { source, .. } => source.user_id.as_deref(),
            WebhookEvent::Unsupported => None,
        }
    }
}
