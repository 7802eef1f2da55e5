use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use super::kind::{names, SessionEvent, TransportState};

/// Event envelope as published on the bus (`{"type": ..., "data": ...}`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub data: Value,
}

/// Transport state payloads come either bare or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TransportStatePayload {
    Bare(TransportState),
    Wrapped { state: TransportState },
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserTranscriptPayload {
    #[serde(default)]
    text: String,
    /// `null` and absent both mean interim
    #[serde(rename = "final", default)]
    is_final: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct BotTtsTextPayload {
    #[serde(default)]
    text: String,
}

impl WireEvent {
    /// Text typed by the user, addressed to the bot
    pub fn custom_message(text: &str) -> Self {
        Self {
            event_type: names::CUSTOM_MESSAGE.to_string(),
            data: json!({ "text": text }),
        }
    }

    /// Parse a raw JSON payload
    pub fn from_slice(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload).context("Failed to parse event payload")
    }

    /// Convert into the closed event set
    ///
    /// A known type whose payload does not match its shape degrades to
    /// `Other`, so it still shows up in the log but never reaches a typed
    /// reducer.
    pub fn into_event(self) -> SessionEvent {
        let WireEvent { event_type, data } = self;

        let typed = match event_type.as_str() {
            names::TRANSPORT_STATE_CHANGED => {
                serde_json::from_value::<TransportStatePayload>(data.clone())
                    .ok()
                    .map(|payload| {
                        let state = match payload {
                            TransportStatePayload::Bare(state) => state,
                            TransportStatePayload::Wrapped { state } => state,
                        };
                        SessionEvent::TransportStateChanged { state }
                    })
            }
            names::ERROR => serde_json::from_value::<ErrorPayload>(data.clone())
                .ok()
                .map(|p| SessionEvent::Error { message: p.message }),
            names::USER_TRANSCRIPT => {
                serde_json::from_value::<UserTranscriptPayload>(data.clone())
                    .ok()
                    .map(|p| SessionEvent::UserTranscript {
                        text: p.text,
                        is_final: p.is_final.unwrap_or(false),
                    })
            }
            names::BOT_TTS_TEXT => serde_json::from_value::<BotTtsTextPayload>(data.clone())
                .ok()
                .map(|p| SessionEvent::BotTtsText { text: p.text }),
            names::BOT_TTS_STARTED => Some(SessionEvent::BotTtsStarted),
            names::BOT_TTS_STOPPED => Some(SessionEvent::BotTtsStopped),
            names::USER_STARTED_SPEAKING => Some(SessionEvent::UserStartedSpeaking),
            names::USER_STOPPED_SPEAKING => Some(SessionEvent::UserStoppedSpeaking),
            names::BOT_STARTED_SPEAKING => Some(SessionEvent::BotStartedSpeaking),
            names::BOT_STOPPED_SPEAKING => Some(SessionEvent::BotStoppedSpeaking),
            _ => return SessionEvent::Other { event_type, data },
        };

        match typed {
            Some(event) => event,
            None => {
                debug!("Malformed {} payload, keeping it as a plain log event", event_type);
                SessionEvent::Other { event_type, data }
            }
        }
    }
}

impl From<&SessionEvent> for WireEvent {
    fn from(event: &SessionEvent) -> Self {
        Self {
            event_type: event.type_name().to_string(),
            data: event.data(),
        }
    }
}

/// Parse a raw bus payload straight into a session event
pub fn parse_event(payload: &[u8]) -> Result<SessionEvent> {
    Ok(WireEvent::from_slice(payload)?.into_event())
}
