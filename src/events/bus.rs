use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;
use tracing::{debug, info};

use super::kind::SessionEvent;

/// Token returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(SubscriptionId, Handler)>,
}

/// Fan-out of session events to subscribed handlers
///
/// Handlers run synchronously in subscription order. `publish` works on a
/// snapshot of the handler list, so a handler that unsubscribes (itself or
/// another) mid-dispatch does not cut short the delivery already underway.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for every subsequent event
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.handlers.push((id, Arc::new(handler)));

        debug!("Subscribed handler {:?} ({} total)", id, registry.handlers.len());
        id
    }

    /// Remove a handler; returns false when it was already gone
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let before = registry.handlers.len();
        registry.handlers.retain(|(handler_id, _)| *handler_id != id);
        let removed = registry.handlers.len() != before;

        if removed {
            debug!("Unsubscribed handler {:?}", id);
        }
        removed
    }

    /// Deliver an event to every handler; returns how many were invoked
    pub fn publish(&self, event: &SessionEvent) -> usize {
        let handlers: Vec<Handler> = {
            let registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
            registry.handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };

        for handler in &handlers {
            handler(event);
        }

        handlers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .handlers
            .len()
    }
}

/// Forward events from a source receiver onto the bus in arrival order
///
/// Returns the number of events delivered once the source closes.
pub async fn pump(mut events: mpsc::Receiver<SessionEvent>, bus: EventBus) -> usize {
    info!("Event pump started");

    let mut delivered = 0;
    while let Some(event) = events.recv().await {
        bus.publish(&event);
        delivered += 1;
    }

    info!("Event pump stopped after {} events", delivered);
    delivered
}
