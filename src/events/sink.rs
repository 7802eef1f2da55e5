use anyhow::Result;
use tokio::sync::mpsc;
use tracing::debug;

use super::wire::WireEvent;

/// Consumer of client-to-bot messages
///
/// Implementations:
/// - NATS: published for the voice pipeline to pick up
/// - Channel: in-process consumer (embedding, tests)
#[async_trait::async_trait]
pub trait MessageSink: Send + Sync {
    /// Hand one message to the bot side
    async fn send(&self, message: WireEvent) -> Result<()>;

    /// Get sink name for logging
    fn name(&self) -> &str;
}

/// In-process message sink backed by a channel
#[derive(Clone)]
pub struct ChannelMessageSink {
    sender: mpsc::Sender<WireEvent>,
}

impl ChannelMessageSink {
    /// Create a sink and the receiver its messages arrive on
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<WireEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }
}

#[async_trait::async_trait]
impl MessageSink for ChannelMessageSink {
    async fn send(&self, message: WireEvent) -> Result<()> {
        debug!("Queueing {} message", message.event_type);
        self.sender
            .send(message)
            .await
            .map_err(|_| anyhow::anyhow!("Message receiver dropped"))
    }

    fn name(&self) -> &str {
        "channel"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_channel_sink_delivers_in_order() {
        let (sink, mut rx) = ChannelMessageSink::new(4);
        sink.send(WireEvent::custom_message("one")).await.unwrap();
        sink.send(WireEvent::custom_message("two")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().data["text"], "one");
        assert_eq!(rx.recv().await.unwrap().data["text"], "two");
    }

    #[tokio::test]
    async fn test_send_after_receiver_dropped_fails() {
        let (sink, rx) = ChannelMessageSink::new(1);
        drop(rx);
        assert!(sink.send(WireEvent::custom_message("lost")).await.is_err());
    }
}
