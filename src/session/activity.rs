use serde::Serialize;

/// Who is talking right now, from speaking start/stop events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SpeakingActivity {
    pub user_speaking: bool,
    pub bot_speaking: bool,
}

impl SpeakingActivity {
    /// Indicator text; the user wins when both are talking
    pub fn label(&self) -> &'static str {
        if self.user_speaking {
            "USER TRANSMITTING"
        } else if self.bot_speaking {
            "BOT RESPONDING"
        } else {
            "AUDIO IDLE"
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
