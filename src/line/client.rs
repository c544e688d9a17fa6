use serde::Serialize;
use thiserror::Error;

/// Default Messaging API endpoint
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

#[derive(Debug, Error)]
pub enum LineError {
    #[error("request to LINE API failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("LINE API returned {status}: {body}")]
    Api { status: u16, body: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutgoingMessage {
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ReplyRequest<'a> {
    #[serde(rename = "replyToken")]
    reply_token: &'a str,
    messages: Vec<OutgoingMessage>,
}

#[derive(Debug, Serialize)]
struct PushRequest<'a> {
    to: &'a str,
    messages: Vec<OutgoingMessage>,
}

/// Outbound Messaging API client. Each call is a single attempt.
#[derive(Clone)]
pub struct LineClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl LineClient {
    pub fn new(api_base: &str, access_token: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<(), LineError> {
        let request = ReplyRequest {
            reply_token,
            messages: vec![OutgoingMessage::Text {
                text: text.to_string(),
            }],
        };
        self.post("/v2/bot/message/reply", &request).await
    }

    pub async fn push_text(&self, to: &str, text: &str) -> Result<(), LineError> {
        let request = PushRequest {
            to,
            messages: vec![OutgoingMessage::Text {
                text: text.to_string(),
            }],
        };
        self.post("/v2/bot/message/push", &request).await
    }

    async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<(), LineError> {
        let response = self
            .http
            .post(format!("{}{}", self.api_base, path))
            .bearer_auth(&self.access_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(LineError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_request_shape() {
        let request = ReplyRequest {
            reply_token: "token-1",
            messages: vec![OutgoingMessage::Text {
                text: "残り 27 個".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "replyToken": "token-1",
                "messages": [{"type": "text", "text": "残り 27 個"}]
            })
        );
    }

    #[test]
    fn test_push_request_shape() {
        let request = PushRequest {
            to: "U123",
            messages: vec![OutgoingMessage::Text {
                text: "hi".to_string(),
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["to"], "U123");
        assert_eq!(json["messages"][0]["type"], "text");
    }

    #[test]
    fn test_api_base_trailing_slash_trimmed() {
        let client = LineClient::new("http://localhost:9000/", "token");
        assert_eq!(client.api_base(), "http://localhost:9000");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        let client = LineClient::new("http://127.0.0.1:9", "token");
        let result = client.reply_text("token", "hello").await;
        assert!(matches!(result, Err(LineError::Http(_))));
    }
}
