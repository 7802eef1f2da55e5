use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// A piece of text inside a message
///
/// Chunks are never edited; a correction replaces the chunk with a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: Uuid,
    pub text: String,
    #[serde(rename = "final")]
    pub is_final: bool,
}

impl Chunk {
    pub fn new(text: impl Into<String>, is_final: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_final,
        }
    }

    /// Same chunk, marked final
    pub fn finalized(&self) -> Self {
        Self {
            id: self.id,
            text: self.text.clone(),
            is_final: true,
        }
    }
}

/// One speaker turn in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub speaker: Speaker,
    pub created_at: DateTime<Utc>,
    chunks: Vec<Chunk>,
}

impl Message {
    pub(crate) fn new(speaker: Speaker, first: Chunk) -> Self {
        Self {
            id: Uuid::new_v4(),
            speaker,
            created_at: Utc::now(),
            chunks: vec![first],
        }
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Chunk texts joined by a single space, interim chunks included
    pub fn text(&self) -> String {
        self.chunks
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Last chunk is still an interim hypothesis
    pub fn is_pending(&self) -> bool {
        self.chunks.last().map_or(false, |c| !c.is_final)
    }

    pub fn is_final(&self) -> bool {
        self.chunks.iter().all(|c| c.is_final)
    }

    pub(crate) fn append(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    /// Replace the first interim chunk, or append if every chunk is final
    pub(crate) fn replace_interim(&mut self, chunk: Chunk) {
        match self.chunks.iter().position(|c| !c.is_final) {
            Some(index) => self.chunks[index] = chunk,
            None => self.chunks.push(chunk),
        }
    }

    pub(crate) fn finalize_all(&mut self) {
        for chunk in self.chunks.iter_mut() {
            if !chunk.is_final {
                *chunk = chunk.finalized();
            }
        }
    }
}
