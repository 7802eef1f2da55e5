use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Connectivity phase of the real-time channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportState {
    #[default]
    Disconnected,
    Initializing,
    Connecting,
    Authenticating,
    Ready,
    Error,
}

impl TransportState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportState::Disconnected => "disconnected",
            TransportState::Initializing => "initializing",
            TransportState::Connecting => "connecting",
            TransportState::Authenticating => "authenticating",
            TransportState::Ready => "ready",
            TransportState::Error => "error",
        }
    }
}

impl fmt::Display for TransportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire names for the event kinds the core understands
pub mod names {
    pub const TRANSPORT_STATE_CHANGED: &str = "transportStateChanged";
    pub const ERROR: &str = "error";
    pub const USER_TRANSCRIPT: &str = "userTranscript";
    pub const BOT_TTS_TEXT: &str = "botTtsText";
    pub const BOT_TTS_STARTED: &str = "botTtsStarted";
    pub const BOT_TTS_STOPPED: &str = "botTtsStopped";
    pub const USER_STARTED_SPEAKING: &str = "userStartedSpeaking";
    pub const USER_STOPPED_SPEAKING: &str = "userStoppedSpeaking";
    pub const BOT_STARTED_SPEAKING: &str = "botStartedSpeaking";
    pub const BOT_STOPPED_SPEAKING: &str = "botStoppedSpeaking";
    pub const LOCAL_AUDIO_LEVEL: &str = "localAudioLevel";
    pub const REMOTE_AUDIO_LEVEL: &str = "remoteAudioLevel";
    /// Client-to-bot text message
    pub const CUSTOM_MESSAGE: &str = "custom-message";
    /// Bot acknowledgement of a `custom-message`
    pub const MESSAGE_RECEIVED: &str = "message-received";
}

/// A single event delivered by the session bus
///
/// The set of kinds is closed: anything the core does not reduce into typed
/// state arrives as `Other` and only reaches the event log.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    TransportStateChanged { state: TransportState },
    Error { message: String },
    UserTranscript { text: String, is_final: bool },
    BotTtsText { text: String },
    BotTtsStarted,
    BotTtsStopped,
    UserStartedSpeaking,
    UserStoppedSpeaking,
    BotStartedSpeaking,
    BotStoppedSpeaking,
    Other { event_type: String, data: Value },
}

impl SessionEvent {
    /// Wire name used when the event is recorded in the event log
    pub fn type_name(&self) -> &str {
        match self {
            SessionEvent::TransportStateChanged { .. } => names::TRANSPORT_STATE_CHANGED,
            SessionEvent::Error { .. } => names::ERROR,
            SessionEvent::UserTranscript { .. } => names::USER_TRANSCRIPT,
            SessionEvent::BotTtsText { .. } => names::BOT_TTS_TEXT,
            SessionEvent::BotTtsStarted => names::BOT_TTS_STARTED,
            SessionEvent::BotTtsStopped => names::BOT_TTS_STOPPED,
            SessionEvent::UserStartedSpeaking => names::USER_STARTED_SPEAKING,
            SessionEvent::UserStoppedSpeaking => names::USER_STOPPED_SPEAKING,
            SessionEvent::BotStartedSpeaking => names::BOT_STARTED_SPEAKING,
            SessionEvent::BotStoppedSpeaking => names::BOT_STOPPED_SPEAKING,
            SessionEvent::Other { event_type, .. } => event_type,
        }
    }

    /// Payload as it is shown in the event log
    pub fn data(&self) -> Value {
        match self {
            SessionEvent::TransportStateChanged { state } => Value::from(state.as_str()),
            SessionEvent::Error { message } => serde_json::json!({ "message": message }),
            SessionEvent::UserTranscript { text, is_final } => {
                serde_json::json!({ "text": text, "final": is_final })
            }
            SessionEvent::BotTtsText { text } => serde_json::json!({ "text": text }),
            SessionEvent::Other { data, .. } => data.clone(),
            _ => Value::Null,
        }
    }
}
