//! Audio as a command stream: the simulation talks to an [`AudioBus`], the
//! host drains its commands every frame and drives the real audio elements.

use bytemuck::{Pod, Zeroable};

use crate::audio::sink::{AudioSink, CloneHandle};
use crate::audio::sound::Sound;

/// Numeric op codes of [`AudioRecord::op`].
pub mod audio_ops {
    pub const PLAY_ORIGINAL: f32 = 1.0;
    pub const PLAY_CLONE: f32 = 2.0;
    pub const STOP_ORIGINAL: f32 = 3.0;
    pub const STOP_CLONE: f32 = 4.0;
    pub const STOP_ALL: f32 = 5.0;
    pub const SET_MUTED: f32 = 6.0;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AudioCommand {
    PlayOriginal { sound: Sound, looped: bool },
    PlayClone { handle: CloneHandle, sound: Sound, looped: bool },
    StopOriginal(Sound),
    StopClone(CloneHandle),
    StopAll,
    SetMuted(bool),
}

/// Wire form of an [`AudioCommand`]: op, sound id, clone handle, flag.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct AudioRecord {
    pub op: f32,
    pub sound: f32,
    pub handle: f32,
    pub flag: f32,
}

impl AudioRecord {
    pub const FLOATS: usize = 4;
}

fn flag(b: bool) -> f32 {
    if b {
        1.0
    } else {
        0.0
    }
}

impl From<AudioCommand> for AudioRecord {
    fn from(cmd: AudioCommand) -> Self {
        use audio_ops::*;
        let (op, sound, handle, flag) = match cmd {
            AudioCommand::PlayOriginal { sound, looped } => {
                (PLAY_ORIGINAL, sound.id() as f32, 0.0, flag(looped))
            }
            AudioCommand::PlayClone { handle, sound, looped } => {
                (PLAY_CLONE, sound.id() as f32, handle.0 as f32, flag(looped))
            }
            AudioCommand::StopOriginal(sound) => (STOP_ORIGINAL, sound.id() as f32, 0.0, 0.0),
            AudioCommand::StopClone(handle) => (STOP_CLONE, 0.0, handle.0 as f32, 0.0),
            AudioCommand::StopAll => (STOP_ALL, 0.0, 0.0, 0.0),
            AudioCommand::SetMuted(muted) => (SET_MUTED, 0.0, 0.0, flag(muted)),
        };
        AudioRecord { op, sound, handle, flag }
    }
}

/// Command-queue implementation of [`AudioSink`].
///
/// Mirrors the browser audio rules: nothing starts while muted or while a
/// restart is in progress, a looping original is not restarted while it
/// still loops, and unmuting brings the chicken ambience back.
#[derive(Debug, Default)]
pub struct AudioBus {
    muted: bool,
    restarting: bool,
    looping: [bool; Sound::COUNT],
    live_clones: Vec<CloneHandle>,
    next_handle: u32,
    commands: Vec<AudioCommand>,
}

impl AudioBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_restarting(&self) -> bool {
        self.restarting
    }

    /// Whether a looped original is currently playing.
    pub fn is_looping(&self, sound: Sound) -> bool {
        self.looping[sound as usize]
    }

    pub fn live_clones(&self) -> &[CloneHandle] {
        &self.live_clones
    }

    /// Pending commands since the last drain.
    pub fn commands(&self) -> &[AudioCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<AudioCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Drain pending commands into wire records.
    pub fn drain_records(&mut self, out: &mut Vec<AudioRecord>) {
        out.extend(self.commands.drain(..).map(AudioRecord::from));
    }

    fn silent(&self) -> bool {
        self.muted || self.restarting
    }
}

impl AudioSink for AudioBus {
    fn play_original(&mut self, sound: Sound, looped: bool) {
        if self.silent() || self.looping[sound as usize] {
            return;
        }
        if looped {
            self.looping[sound as usize] = true;
        }
        self.commands.push(AudioCommand::PlayOriginal { sound, looped });
    }

    fn play_cloned(&mut self, sound: Sound, looped: bool) -> Option<CloneHandle> {
        if self.silent() {
            return None;
        }
        self.next_handle += 1;
        let handle = CloneHandle(self.next_handle);
        // One-shots end on their own; only loops wait for a stop.
        if looped {
            self.live_clones.push(handle);
        }
        self.commands.push(AudioCommand::PlayClone { handle, sound, looped });
        Some(handle)
    }

    fn stop_clone(&mut self, handle: CloneHandle) {
        if let Some(i) = self.live_clones.iter().position(|&h| h == handle) {
            self.live_clones.swap_remove(i);
            self.commands.push(AudioCommand::StopClone(handle));
        }
    }

    fn stop_original(&mut self, sound: Sound) {
        self.looping[sound as usize] = false;
        self.commands.push(AudioCommand::StopOriginal(sound));
    }

    fn stop_all_sounds(&mut self) {
        self.restarting = true;
        self.looping = [false; Sound::COUNT];
        self.live_clones.clear();
        self.commands.push(AudioCommand::StopAll);
    }

    fn clear_restart_flag(&mut self) {
        self.restarting = false;
    }

    fn toggle_mute(&mut self) {
        self.muted = !self.muted;
        self.commands.push(AudioCommand::SetMuted(self.muted));
        if !self.muted {
            self.play_original(Sound::ChickenRun, true);
            self.play_original(Sound::LittleChickenRun, true);
        }
    }

    fn is_muted(&self) -> bool {
        self.muted
    }
}
