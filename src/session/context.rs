use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of the session currently owning the reducers' state
///
/// A new context is created whenever a session boundary is crossed. Before
/// the first one the session holds an idle context numbered 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    /// Unique session identifier (e.g., "session-3f0c...")
    pub id: String,

    /// When this session started
    pub started_at: DateTime<Utc>,

    /// Sequence number of this session since the process started (0 = idle)
    pub attempt: u32,
}

impl SessionContext {
    pub fn new(attempt: u32) -> Self {
        Self {
            id: format!("session-{}", uuid::Uuid::new_v4()),
            started_at: Utc::now(),
            attempt,
        }
    }

    /// Context for the session that follows this one
    pub fn next(&self) -> Self {
        Self::new(self.attempt + 1)
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new(0)
    }
}
