use anyhow::{Context, Result};
use async_nats::Client;
use tracing::{debug, info};

use crate::events::WireEvent;

#[derive(Clone)]
pub struct NatsClient {
    client: Client,
}

impl NatsClient {
    /// Connect to NATS server
    pub async fn connect(url: &str) -> Result<Self> {
        info!("Connecting to NATS at {}", url);

        let client = async_nats::connect(url)
            .await
            .context("Failed to connect to NATS")?;

        info!("Connected to NATS successfully");

        Ok(Self { client })
    }

    /// Subscribe to session events
    pub async fn subscribe_events(&self, subject: &str) -> Result<async_nats::Subscriber> {
        info!("Subscribing to session events on {}", subject);

        let subscriber = self
            .client
            .subscribe(subject.to_string())
            .await
            .context("Failed to subscribe to session events")?;

        info!("Subscribed to {}", subject);

        Ok(subscriber)
    }

    /// Publish a message in wire form
    pub async fn publish(&self, subject: &str, message: &WireEvent) -> Result<()> {
        let payload = serde_json::to_vec(message)?;

        self.client
            .publish(subject.to_string(), payload.into())
            .await
            .context("Failed to publish message")?;

        debug!("Published {} on {}", message.event_type, subject);
        Ok(())
    }
}
