//! Conversation transcript
//!
//! Reduces user speech-recognition results and bot text-to-speech output
//! into per-speaker messages made of ordered chunks.

mod engine;
mod message;
mod render;

pub use engine::TranscriptEngine;
pub use message::{Chunk, Message, Speaker};
pub use render::{
    format_clock, render_message, render_message_at, speaker_prefix, RenderedMessage, Segment,
    SegmentStyle,
};
