pub mod config;
pub mod connection;
pub mod event_log;
pub mod events;
pub mod http;
pub mod nats;
pub mod session;
pub mod transcript;

pub use config::Config;
pub use connection::{ConnectionClassifier, ConnectionStatus, ResetPolicy};
pub use event_log::{EventGroup, EventLogBuffer, EventLogEntry};
pub use events::{
    ChannelEventSource, ChannelMessageSink, EventBus, EventSource, MessageSink, SessionEvent,
    SubscriptionId, TransportState,
};
pub use http::{create_router, AppState};
pub use nats::{NatsClient, NatsEventSource, NatsMessageSink};
pub use session::{SessionConfig, SessionContext, SessionHandle, SessionStats, VoiceSession};
pub use transcript::{Chunk, Message, Speaker, TranscriptEngine};
