//! Session event bus
//!
//! This module provides the closed set of session events, the wire envelope
//! they arrive in, the synchronous fan-out bus, the async sources that
//! feed it and the sinks that carry client messages back to the bot.

pub mod bus;
pub mod kind;
pub mod sink;
pub mod source;
pub mod wire;

pub use bus::{pump, EventBus, SubscriptionId};
pub use kind::{names, SessionEvent, TransportState};
pub use sink::{ChannelMessageSink, MessageSink};
pub use source::{ChannelEventSource, EventSource};
pub use wire::{parse_event, WireEvent};
