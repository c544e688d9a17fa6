//! # Medicine Bot
//!
//! A LINE bot that keeps track of a daily medicine sheet.
//!
//! ## Features
//! - Once-per-day "taken" tracking with automatic refill when a sheet runs out
//! - Manual corrections to the remaining count
//! - Pill sheet rendering as SVG or text, in snake order
//! - Daily reminder when today's dose has not been recorded
//! - Persistent storage with SQLite

/// Chat commands and webhook event dispatch
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database models, connections, and migrations
pub mod database;
/// HTTP error responses
pub mod error;
/// LINE Messaging API transport
pub mod line;
/// Counter state machine and pill sheet rendering
pub mod medicine;
/// Counter store, HTTP routers and the reminder job
pub mod services;
/// Utility functions for datetime handling and logging
pub mod utils;
