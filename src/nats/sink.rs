use anyhow::Result;

use super::client::NatsClient;
use crate::events::{MessageSink, WireEvent};

/// Client messages published for the voice pipeline over NATS
#[derive(Clone)]
pub struct NatsMessageSink {
    client: NatsClient,
    subject: String,
}

impl NatsMessageSink {
    pub fn new(client: NatsClient, subject: String) -> Self {
        Self { client, subject }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }
}

#[async_trait::async_trait]
impl MessageSink for NatsMessageSink {
    async fn send(&self, message: WireEvent) -> Result<()> {
        self.client.publish(&self.subject, &message).await
    }

    fn name(&self) -> &str {
        "nats"
    }
}
