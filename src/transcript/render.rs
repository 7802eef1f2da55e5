use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use super::message::{Message, Speaker};

/// How a segment of text should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentStyle {
    Final,
    /// Still subject to revision (drawn dim)
    Interim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub style: SegmentStyle,
}

/// Display form of a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub id: Uuid,
    pub speaker: Speaker,
    pub prefix: &'static str,
    pub time: String,
    pub text: String,
    pub segments: Vec<Segment>,
    /// Last chunk is interim; the UI shows a cursor after the text
    pub pending: bool,
}

pub fn speaker_prefix(speaker: Speaker) -> &'static str {
    match speaker {
        Speaker::User => "USR >",
        Speaker::Bot => "BOT <",
    }
}

/// 12-hour clock with seconds, e.g. `3:07:09 PM`
pub fn format_clock<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    at.format("%-I:%M:%S %p").to_string()
}

/// Render a message with its timestamp in the local time zone
pub fn render_message(message: &Message) -> RenderedMessage {
    render_message_at(message, &Local)
}

pub fn render_message_at<Tz: TimeZone>(message: &Message, zone: &Tz) -> RenderedMessage
where
    Tz::Offset: fmt::Display,
{
    let segments = message
        .chunks()
        .iter()
        .map(|chunk| Segment {
            text: chunk.text.clone(),
            style: if chunk.is_final {
                SegmentStyle::Final
            } else {
                SegmentStyle::Interim
            },
        })
        .collect();

    RenderedMessage {
        id: message.id,
        speaker: message.speaker,
        prefix: speaker_prefix(message.speaker),
        time: format_clock(&message.created_at.with_timezone(zone)),
        text: message.text(),
        segments,
        pending: message.is_pending(),
    }
}

impl fmt::Display for RenderedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} {}", self.time, self.prefix, self.text)
    }
}
