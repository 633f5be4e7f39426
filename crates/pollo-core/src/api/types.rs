use bytemuck::{Pod, Zeroable};

/// Event kinds carried in [`GameEvent::kind`].
pub mod event_kinds {
    /// Game Over screen shown. `a` = coins collected.
    pub const GAME_OVER: f32 = 1.0;
    /// Game Won screen shown. `a` = coins collected.
    pub const GAME_WON: f32 = 2.0;
    /// The boss woke up. `a` = boss x.
    pub const BATTLE_STARTED: f32 = 3.0;
    pub const PAUSED: f32 = 4.0;
    pub const RESUMED: f32 = 5.0;
    pub const RESET: f32 = 6.0;
}

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_a(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Whether this event puts an end screen up.
    pub fn is_end_screen(&self) -> bool {
        self.kind == event_kinds::GAME_OVER || self.kind == event_kinds::GAME_WON
    }
}
