use crate::input::queue::InputEvent;

/// Browser key codes the game listens to.
pub mod key_codes {
    pub const SPACE: u32 = 32;
    pub const LEFT: u32 = 37;
    pub const UP: u32 = 38;
    pub const RIGHT: u32 = 39;
    pub const DOWN: u32 = 40;
    pub const D: u32 = 68;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Space,
    D,
}

impl Key {
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            key_codes::LEFT => Some(Key::Left),
            key_codes::RIGHT => Some(Key::Right),
            key_codes::UP => Some(Key::Up),
            key_codes::DOWN => Some(Key::Down),
            key_codes::SPACE => Some(Key::Space),
            key_codes::D => Some(Key::D),
            _ => None,
        }
    }
}

/// Held-key flags. Read by the character and the throw check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub space: bool,
    pub d: bool,
}

impl Keyboard {
    pub fn set(&mut self, key: Key, pressed: bool) {
        let flag = match key {
            Key::Left => &mut self.left,
            Key::Right => &mut self.right,
            Key::Up => &mut self.up,
            Key::Down => &mut self.down,
            Key::Space => &mut self.space,
            Key::D => &mut self.d,
        };
        *flag = pressed;
    }

    /// Apply one host event. Unknown key codes are ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyDown { key_code } => {
                if let Some(key) = Key::from_code(key_code) {
                    self.set(key, true);
                }
            }
            InputEvent::KeyUp { key_code } => {
                if let Some(key) = Key::from_code(key_code) {
                    self.set(key, false);
                }
            }
            InputEvent::ReleaseAll => *self = Self::default(),
        }
    }
}
