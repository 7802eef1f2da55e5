use serde::{Deserialize, Serialize};

use crate::connection::ResetPolicy;
use crate::event_log::{default_denylist, DEFAULT_CAPACITY};

/// Configuration for a voice session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// When transcript and event log are cleared
    /// Default: on a new connection attempt
    pub reset_policy: ResetPolicy,

    /// Number of raw events kept in the event log
    pub event_log_capacity: usize,

    /// Event types never recorded in the event log (high-rate telemetry)
    pub event_denylist: Vec<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_policy: ResetPolicy::default(),
            event_log_capacity: DEFAULT_CAPACITY,
            event_denylist: default_denylist(),
        }
    }
}
