//! Voice session management
//!
//! This module provides the `VoiceSession` abstraction that manages:
//! - Typed dispatch of bus events to the reducers
//! - Session boundaries according to the configured reset policy
//! - Speaking activity and connected time
//! - Session statistics and shared access for the HTTP API

mod activity;
mod config;
mod context;
mod handle;
mod session;
mod stats;

pub use activity::SpeakingActivity;
pub use config::SessionConfig;
pub use context::SessionContext;
pub use handle::{EntrySnapshot, EventGroupSnapshot, SessionHandle};
pub use session::VoiceSession;
pub use stats::{format_elapsed, SessionStats};
