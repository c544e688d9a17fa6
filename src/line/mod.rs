//! LINE Messaging API plumbing: webhook payloads, signature checks and the
//! outbound reply/push client.

pub mod client;
pub mod signature;
pub mod webhook;

pub use client::{LineClient, LineError};
pub use signature::{sign, verify_signature};
pub use webhook::{EventMessage, EventSource, WebhookEvent, WebhookPayload};

/// Header carrying the request signature
pub const SIGNATURE_HEADER: &str = "x-line-signature";
