pub mod character;
pub mod collectible;
pub mod decor;
pub mod endboss;
pub mod roamer;
pub mod status_bar;
pub mod throwable;

use crate::audio::sink::AudioSink;
use crate::core::time::Millis;

/// An entity driven by timers on the simulation clock.
///
/// `run_due` must poll every timer that `next_deadline` reports, or the
/// world's scheduler would find the same deadline again.
pub trait Actor {
    /// Earliest pending timer, if any.
    fn next_deadline(&self) -> Option<Millis>;

    /// Fire every timer due at `now`.
    fn run_due(&mut self, now: Millis, audio: &mut dyn AudioSink);

    /// Re-arm behaviours after a pause. Running behaviours are left alone.
    fn animate(&mut self, now: Millis, audio: &mut dyn AudioSink);

    /// Cancel every behaviour and silence the entity's loop sound.
    fn cleanup(&mut self, audio: &mut dyn AudioSink);
}
