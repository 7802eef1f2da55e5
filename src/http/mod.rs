//! HTTP API for session front ends
//!
//! This module provides a REST API over the session core:
//! - GET /session/status - Connection status and counters
//! - GET /session/transcript - Rendered conversation
//! - GET /session/events - Grouped event log
//! - POST /session/events - Ingest one wire event
//! - POST /session/events/:group_id/toggle - Expand/collapse a group
//! - POST /session/reset - Clear transcript and event log
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
