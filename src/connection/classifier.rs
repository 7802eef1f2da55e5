use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

use crate::events::TransportState;

/// Shown when the transport drops while still connecting
pub const CONNECTION_FAILED_MESSAGE: &str =
    "Connection failed: the transport disconnected before the session became ready";

/// Number of transitions kept for diagnostics
pub const HISTORY_LIMIT: usize = 32;

/// One observed change of transport state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub previous: TransportState,
    pub current: TransportState,
    pub at: DateTime<Utc>,
}

impl Transition {
    /// Dropped while connecting: the only failure inferred from transitions
    pub fn is_failed_attempt(&self) -> bool {
        self.previous == TransportState::Connecting && self.current == TransportState::Disconnected
    }
}

/// User-facing connection status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Offline,
    Connecting,
    Connected,
    Failed,
}

impl ConnectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ConnectionStatus::Offline => "OFFLINE",
            ConnectionStatus::Connecting => "CONNECTING...",
            ConnectionStatus::Connected => "LINK ESTABLISHED",
            ConnectionStatus::Failed => "CONNECTION FAILED",
        }
    }
}

/// Tracks transport state and derives a single failure message
///
/// No transition is ever rejected; the transport decides what is legal.
#[derive(Debug, Clone, Default)]
pub struct ConnectionClassifier {
    state: TransportState,
    previous: Option<TransportState>,
    inferred_failure: Option<&'static str>,
    explicit_error: Option<String>,
    history: VecDeque<Transition>,
}

impl ConnectionClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a `TransportStateChanged` event
    ///
    /// Returns the transition, or `None` when the state did not change.
    pub fn observe(&mut self, next: TransportState) -> Option<Transition> {
        if next == self.state {
            debug!("Transport state repeated: {}", next);
            return None;
        }

        let transition = Transition {
            previous: self.state,
            current: next,
            at: Utc::now(),
        };

        info!("Transport state: {} -> {}", transition.previous, transition.current);

        self.previous = Some(self.state);
        self.state = next;

        if transition.is_failed_attempt() {
            warn!("Transport disconnected while connecting");
            self.inferred_failure = Some(CONNECTION_FAILED_MESSAGE);
        }

        if matches!(next, TransportState::Initializing | TransportState::Ready) {
            self.clear_failure();
        }

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(transition);

        Some(transition)
    }

    /// Record an explicit upstream error; it wins over any inferred failure
    pub fn record_error(&mut self, message: &str) {
        if message.is_empty() {
            debug!("Ignoring error event without a message");
            return;
        }

        warn!("Upstream error: {}", message);
        self.explicit_error = Some(message.to_string());
    }

    /// Message to display, if the connection is considered failed
    pub fn failure_message(&self) -> Option<&str> {
        self.explicit_error.as_deref().or(self.inferred_failure)
    }

    /// Forget both explicit and inferred failures (history is kept)
    pub fn clear_failure(&mut self) {
        self.inferred_failure = None;
        self.explicit_error = None;
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn previous_state(&self) -> Option<TransportState> {
        self.previous
    }

    pub fn history(&self) -> impl Iterator<Item = &Transition> {
        self.history.iter()
    }

    pub fn is_connected(&self) -> bool {
        self.state == TransportState::Ready
    }

    pub fn is_connecting(&self) -> bool {
        matches!(
            self.state,
            TransportState::Initializing
                | TransportState::Connecting
                | TransportState::Authenticating
        )
    }

    pub fn status(&self) -> ConnectionStatus {
        if self.failure_message().is_some() {
            ConnectionStatus::Failed
        } else if self.is_connected() {
            ConnectionStatus::Connected
        } else if self.is_connecting() {
            ConnectionStatus::Connecting
        } else {
            ConnectionStatus::Offline
        }
    }
}
