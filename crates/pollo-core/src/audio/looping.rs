use crate::audio::sink::{AudioSink, CloneHandle};
use crate::audio::sound::Sound;

/// The one looped clone an entity may own at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopingSound {
    current: Option<CloneHandle>,
}

impl LoopingSound {
    /// Stop the previous loop, then start `sound` looped.
    pub fn start(&mut self, audio: &mut dyn AudioSink, sound: Sound) {
        self.stop(audio);
        self.current = audio.play_cloned(sound, true);
    }

    pub fn stop(&mut self, audio: &mut dyn AudioSink) {
        if let Some(handle) = self.current.take() {
            audio.stop_clone(handle);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.current.is_some()
    }
}
