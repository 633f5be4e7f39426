use crate::audio::sound::Sound;

/// Identifies one cloned playback so it can be stopped later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CloneHandle(pub u32);

/// Where the simulation sends sound. Playback failures never reach the caller.
pub trait AudioSink {
    /// Play the shared element for `sound` (restarts only if it is not playing).
    fn play_original(&mut self, sound: Sound, looped: bool);

    /// Start an independent copy. `None` when nothing was started (muted or restarting).
    fn play_cloned(&mut self, sound: Sound, looped: bool) -> Option<CloneHandle>;

    fn stop_clone(&mut self, handle: CloneHandle);

    fn stop_original(&mut self, sound: Sound);

    /// Stop everything and refuse new playback until [`clear_restart_flag`](Self::clear_restart_flag).
    fn stop_all_sounds(&mut self);

    fn clear_restart_flag(&mut self);

    fn toggle_mute(&mut self);

    fn is_muted(&self) -> bool;
}
