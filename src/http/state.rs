use std::sync::Arc;

use crate::events::{EventBus, MessageSink};
use crate::session::SessionHandle;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The session being displayed
    pub session: SessionHandle,

    /// Bus that ingested events are published on
    pub bus: EventBus,

    /// Where typed client messages go; `None` when no bot link is configured
    pub outbound: Option<Arc<dyn MessageSink>>,
}

impl AppState {
    pub fn new(session: SessionHandle, bus: EventBus) -> Self {
        Self {
            session,
            bus,
            outbound: None,
        }
    }

    pub fn with_outbound(mut self, sink: Arc<dyn MessageSink>) -> Self {
        self.outbound = Some(sink);
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        let session = SessionHandle::default();
        let bus = EventBus::new();
        session.attach(&bus);
        Self::new(session, bus)
    }
}
