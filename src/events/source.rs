use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use super::kind::SessionEvent;

/// Capacity of the channel between a source task and the pump
pub const SOURCE_CHANNEL_CAPACITY: usize = 256;

/// Producer of session events
///
/// Implementations:
/// - NATS: events published by the voice pipeline
/// - Channel: in-process producer (embedding, tests)
#[async_trait::async_trait]
pub trait EventSource: Send + Sync {
    /// Start delivering events
    ///
    /// Returns a channel receiver yielding events in arrival order
    async fn start(&mut self) -> Result<mpsc::Receiver<SessionEvent>>;

    /// Stop delivering events; calling it twice is harmless
    async fn stop(&mut self) -> Result<()>;

    /// Check if the source is currently delivering
    fn is_running(&self) -> bool;

    /// Get source name for logging
    fn name(&self) -> &str;
}

/// In-process event source fed through a sender handle
pub struct ChannelEventSource {
    sender: Option<mpsc::Sender<SessionEvent>>,
    receiver: Option<mpsc::Receiver<SessionEvent>>,
    running: Arc<AtomicBool>,
}

impl ChannelEventSource {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
        Self {
            sender: Some(sender),
            receiver: Some(receiver),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Sender used to inject events; `None` once the source was stopped
    pub fn sender(&self) -> Option<mpsc::Sender<SessionEvent>> {
        self.sender.clone()
    }
}

impl Default for ChannelEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EventSource for ChannelEventSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<SessionEvent>> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| anyhow::anyhow!("Channel source already started"))?;

        self.running.store(true, Ordering::SeqCst);
        info!("Channel event source started");
        Ok(receiver)
    }

    async fn stop(&mut self) -> Result<()> {
        // Dropping our sender closes the channel once callers drop theirs
        if self.sender.take().is_some() {
            info!("Channel event source stopped");
        }
        self.running.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "channel"
    }
}
