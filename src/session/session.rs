use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use super::activity::SpeakingActivity;
use super::config::SessionConfig;
use super::context::SessionContext;
use super::stats::SessionStats;
use crate::connection::{ConnectionClassifier, Transition};
use crate::event_log::{EventLogBuffer, Groups};
use crate::events::{SessionEvent, TransportState};
use crate::transcript::{Message, TranscriptEngine};

/// The reactive core of a voice session
///
/// Owns the connection classifier, the transcript engine and the event log,
/// and feeds them from a single typed dispatch. Each reducer keeps its own
/// state; the only cross-cutting signal is the session boundary derived from
/// transport transitions and the configured reset policy.
#[derive(Debug)]
pub struct VoiceSession {
    /// Session configuration
    config: SessionConfig,

    /// Current session identity
    context: SessionContext,

    connection: ConnectionClassifier,

    transcript: TranscriptEngine,

    event_log: EventLogBuffer,

    activity: SpeakingActivity,

    /// When the transport last became ready
    connected_at: Option<DateTime<Utc>>,
}

impl VoiceSession {
    pub fn new(config: SessionConfig) -> Self {
        let context = SessionContext::default();
        info!(
            "Creating voice session: {} (reset policy {:?})",
            context.id, config.reset_policy
        );

        let event_log =
            EventLogBuffer::new(config.event_log_capacity, config.event_denylist.iter().cloned());

        Self {
            config,
            context,
            connection: ConnectionClassifier::new(),
            transcript: TranscriptEngine::new(),
            event_log,
            activity: SpeakingActivity::default(),
            connected_at: None,
        }
    }

    /// Fold one event into the session state
    ///
    /// The event runs to completion before this returns; nothing here can
    /// fail, malformed payloads are simply dropped.
    pub fn handle(&mut self, event: &SessionEvent) {
        if let SessionEvent::TransportStateChanged { state } = event {
            if let Some(transition) = self.connection.observe(*state) {
                self.on_transition(&transition);
            }
        }

        // Recorded after a boundary so the new log starts with the event
        // that opened the session
        if self.event_log.record(event.type_name(), event.data()).is_none() {
            debug!("Event {} filtered from the log", event.type_name());
        }

        match event {
            SessionEvent::TransportStateChanged { .. } => {}
            SessionEvent::Error { message } => self.connection.record_error(message),
            SessionEvent::UserTranscript { text, is_final } => {
                self.transcript.on_user_transcript(text, *is_final)
            }
            SessionEvent::BotTtsText { text } => self.transcript.on_bot_text(text),
            SessionEvent::BotTtsStopped => self.transcript.on_bot_stopped(),
            SessionEvent::UserStartedSpeaking => self.activity.user_speaking = true,
            SessionEvent::UserStoppedSpeaking => self.activity.user_speaking = false,
            SessionEvent::BotStartedSpeaking => self.activity.bot_speaking = true,
            SessionEvent::BotStoppedSpeaking => self.activity.bot_speaking = false,
            SessionEvent::BotTtsStarted | SessionEvent::Other { .. } => {}
        }
    }

    fn on_transition(&mut self, transition: &Transition) {
        if transition.current == TransportState::Ready {
            self.connected_at = Some(transition.at);
        } else if transition.previous == TransportState::Ready {
            self.connected_at = None;
            self.activity.reset();
        }

        if self.config.reset_policy.is_boundary(transition) {
            self.begin_session();
        }
    }

    fn begin_session(&mut self) {
        let next = self.context.next();
        info!(
            "Session boundary: {} -> {} ({} messages, {} events discarded)",
            self.context.id,
            next.id,
            self.transcript.len(),
            self.event_log.len()
        );

        self.context = next;
        self.clear_content();
    }

    fn clear_content(&mut self) {
        self.transcript.reset();
        self.event_log.reset();
        self.activity.reset();
    }

    /// Imperative reset: clears transcript, log and failure messages
    ///
    /// The transport state is left alone since it mirrors the transport.
    pub fn reset(&mut self) {
        info!("Resetting session {}", self.context.id);
        self.clear_content();
        self.connection.clear_failure();
    }

    /// Flip an event group between collapsed and expanded
    pub fn toggle_group(&mut self, group_id: Uuid) -> Option<bool> {
        self.event_log.toggle(group_id)
    }

    pub fn messages(&self) -> &[Message] {
        self.transcript.messages()
    }

    pub fn event_groups(&self) -> Groups<'_> {
        self.event_log.view()
    }

    pub fn event_log(&self) -> &EventLogBuffer {
        &self.event_log
    }

    pub fn connection(&self) -> &ConnectionClassifier {
        &self.connection
    }

    pub fn transport_state(&self) -> TransportState {
        self.connection.state()
    }

    pub fn failure_message(&self) -> Option<&str> {
        self.connection.failure_message()
    }

    pub fn activity(&self) -> SpeakingActivity {
        self.activity
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Get current session statistics
    pub fn stats(&self) -> SessionStats {
        let connected_secs = self
            .connected_at
            .map(|at| Utc::now().signed_duration_since(at).num_seconds().max(0) as u64)
            .unwrap_or(0);
        let status = self.connection.status();

        SessionStats {
            session_id: self.context.id.clone(),
            attempt: self.context.attempt,
            started_at: self.context.started_at,
            transport_state: self.connection.state(),
            status,
            status_label: status.label(),
            failure: self.failure_message().map(str::to_string),
            message_count: self.transcript.len(),
            event_count: self.event_log.len(),
            event_group_count: self.event_log.view().count(),
            user_speaking: self.activity.user_speaking,
            bot_speaking: self.activity.bot_speaking,
            activity_label: self.activity.label(),
            connected_secs,
        }
    }
}

impl Default for VoiceSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
