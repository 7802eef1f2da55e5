use anyhow::{Context, Result};
use futures::stream::StreamExt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use super::client::NatsClient;
use super::sink::NatsMessageSink;
use crate::config::NatsConfig;
use crate::events::source::SOURCE_CHANNEL_CAPACITY;
use crate::events::{parse_event, EventSource, SessionEvent};

/// Session events received from the voice pipeline over NATS
pub struct NatsEventSource {
    config: NatsConfig,
    is_running: Arc<AtomicBool>,
    task_handle: Option<JoinHandle<()>>,
    client: Option<NatsClient>,
}

impl NatsEventSource {
    pub fn new(config: NatsConfig) -> Self {
        Self {
            config,
            is_running: Arc::new(AtomicBool::new(false)),
            task_handle: None,
            client: None,
        }
    }

    /// Sink publishing client messages over this source's connection
    ///
    /// `None` until the source has been started.
    pub fn message_sink(&self) -> Option<NatsMessageSink> {
        self.client
            .as_ref()
            .map(|client| NatsMessageSink::new(client.clone(), self.config.message_subject.clone()))
    }
}

#[async_trait::async_trait]
impl EventSource for NatsEventSource {
    async fn start(&mut self) -> Result<mpsc::Receiver<SessionEvent>> {
        if self.is_running.load(Ordering::SeqCst) {
            anyhow::bail!("NATS event source already started");
        }

        let client = NatsClient::connect(&self.config.url)
            .await
            .context("Failed to connect event source")?;

        let mut subscriber = client
            .subscribe_events(&self.config.subject)
            .await
            .context("Failed to subscribe event source")?;

        let client_handle = client.clone();
        let (event_tx, event_rx) = mpsc::channel(SOURCE_CHANNEL_CAPACITY);
        let is_running = Arc::clone(&self.is_running);
        is_running.store(true, Ordering::SeqCst);

        let task = tokio::spawn(async move {
            // Keep the connection alive for as long as the task runs
            let _client = client;
            info!("Event receiving task started");

            while let Some(msg) = subscriber.next().await {
                if !is_running.load(Ordering::SeqCst) {
                    break;
                }

                match parse_event(&msg.payload) {
                    Ok(event) => {
                        if let Err(e) = event_tx.send(event).await {
                            error!("Failed to forward event: {}", e);
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Dropping event from {}: {:#}", msg.subject, e);
                    }
                }
            }

            is_running.store(false, Ordering::SeqCst);
            info!("Event receiving task stopped");
        });

        self.task_handle = Some(task);
        self.client = Some(client_handle);

        Ok(event_rx)
    }

    async fn stop(&mut self) -> Result<()> {
        if !self.is_running.swap(false, Ordering::SeqCst) && self.task_handle.is_none() {
            return Ok(());
        }

        info!("Stopping NATS event source");
        self.client = None;

        // The subscriber only yields on new messages, so abort instead of
        // waiting for the next one
        if let Some(task) = self.task_handle.take() {
            task.abort();
            if let Err(e) = task.await {
                if !e.is_cancelled() {
                    error!("Event task panicked: {}", e);
                }
            }
        }

        Ok(())
    }

    fn is_running(&self) -> bool {
        self.is_running.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "nats"
    }
}
