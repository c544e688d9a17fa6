/// Command tokens and their reply builders
pub mod commands;
/// Webhook event dispatch
pub mod handlers;
/// Reply texts
pub mod messages;
