pub mod client;
pub mod sink;
pub mod source;

pub use client::NatsClient;
pub use sink::NatsMessageSink;
pub use source::NatsEventSource;
