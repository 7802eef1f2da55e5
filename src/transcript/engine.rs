use tracing::debug;

use super::message::{Chunk, Message, Speaker};

/// Folds user transcripts and bot speech into an ordered message list
///
/// User text revises the pending hypothesis of the current turn; bot text
/// only ever streams forward. Both share the same message/chunk model so
/// rendering and reset behave the same in either direction.
#[derive(Debug, Clone, Default)]
pub struct TranscriptEngine {
    messages: Vec<Message>,
}

impl TranscriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a speech-recognition result for the user
    pub fn on_user_transcript(&mut self, text: &str, is_final: bool) {
        if text.is_empty() {
            debug!("Dropping empty user transcript");
            return;
        }

        let chunk = Chunk::new(text, is_final);
        match self.current_turn(Speaker::User) {
            // At most one interim chunk is expected per turn; with several,
            // only the first is ever revised.
            Some(message) => message.replace_interim(chunk),
            None => self.start_turn(Speaker::User, chunk),
        }
    }

    /// Fold a piece of synthesized bot speech
    pub fn on_bot_text(&mut self, text: &str) {
        if text.is_empty() {
            debug!("Dropping empty bot text");
            return;
        }

        let chunk = Chunk::new(text, false);
        match self.current_turn(Speaker::Bot) {
            Some(message) => message.append(chunk),
            None => self.start_turn(Speaker::Bot, chunk),
        }
    }

    /// Bot speech ended: everything in the bot's current turn is final
    pub fn on_bot_stopped(&mut self) {
        if let Some(message) = self.current_turn(Speaker::Bot) {
            message.finalize_all();
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    fn current_turn(&mut self, speaker: Speaker) -> Option<&mut Message> {
        self.messages.last_mut().filter(|m| m.speaker == speaker)
    }

    fn start_turn(&mut self, speaker: Speaker, chunk: Chunk) {
        debug!("New {:?} message ({} in transcript)", speaker, self.messages.len() + 1);
        self.messages.push(Message::new(speaker, chunk));
    }
}
