use tracing::debug;

use game_core::{AudioSink, SoundId};

/// Audio sink that logs every cue and keeps a count.
#[derive(Clone, Debug, Default)]
pub struct LogAudio {
    played: u64,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, sound: SoundId) {
        self.played += 1;
        debug!(target: "runtime::audio", sound = %sound, "play");
    }
}
