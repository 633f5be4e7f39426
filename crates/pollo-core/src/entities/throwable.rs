use glam::Vec2;

use crate::assets::registry::FrameCatalog;
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::animation::{Clip, ClipPlayer, OneShot};
use crate::components::entity::{Renderable, Sprite};
use crate::core::collision::Hitbox;
use crate::core::physics::{apply_gravity, run_gravity, Motion, Physical};
use crate::core::time::{due_of, earliest, poll, poll_once, Delay, Millis, Repeater};
use crate::entities::Actor;
use crate::error::ConfigError;

pub const BOTTLE_SIZE: Vec2 = Vec2::new(80.0, 100.0);
/// Floor line for bottles, lower than the character's.
pub const BOTTLE_GROUND_Y: f32 = 330.0;
pub const THROW_IMPULSE: f32 = 30.0;
pub const TRAVEL_STEP: f32 = 10.0;
pub const TRAVEL_INTERVAL_MS: Millis = 25.0;
pub const ROTATION_FRAME_MS: Millis = 100.0;
pub const SPLASH_FRAME_MS: Millis = 80.0;
pub const SPLASH_REMOVAL_MS: Millis = 500.0;
/// Spawn offsets from the thrower's top-left corner.
const SPAWN_AHEAD: f32 = 100.0;
const SPAWN_BEHIND: f32 = -80.0;
const SPAWN_DROP: f32 = 100.0;
const HITBOX: Hitbox = Hitbox::Centered {
    pad_x: 8.0,
    pad_y: 10.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BottleClips {
    pub rotation: Clip,
    pub splash: Clip,
    pub ground: Clip,
}

impl BottleClips {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        Ok(Self {
            rotation: catalog.clip("bottle", "rotation")?,
            splash: catalog.clip("bottle", "splash")?,
            ground: catalog.clip("bottle", "ground")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowDirection {
    Right,
    Left,
}

impl ThrowDirection {
    pub fn facing(other_direction: bool) -> Self {
        if other_direction {
            ThrowDirection::Left
        } else {
            ThrowDirection::Right
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            ThrowDirection::Right => 1.0,
            ThrowDirection::Left => -1.0,
        }
    }
}

/// A thrown bottle: flies in an arc, rests on the floor, or splashes.
#[derive(Debug, Clone)]
pub struct ThrowableObject {
    sprite: Sprite,
    motion: Motion,
    clips: BottleClips,
    player: ClipPlayer,
    direction: ThrowDirection,
    on_ground: bool,
    splashed: bool,
    remove_from_world: bool,
    travel: Option<Repeater>,
    rotation: Option<Repeater>,
    splash_anim: Option<Repeater>,
    splash_seq: OneShot,
    removal: Option<Delay>,
}

impl ThrowableObject {
    /// Throw from a thrower at `origin` (its top-left corner).
    pub fn throw(clips: BottleClips, origin: Vec2, direction: ThrowDirection, now: Millis) -> Self {
        let offset = match direction {
            ThrowDirection::Right => SPAWN_AHEAD,
            ThrowDirection::Left => SPAWN_BEHIND,
        };
        let pos = Vec2::new(origin.x + offset, origin.y + SPAWN_DROP);
        let mut bottle = Self::at(clips, pos, direction);
        bottle.motion.speed_y = THROW_IMPULSE;
        bottle.start_flight(now);
        bottle
    }

    fn at(clips: BottleClips, pos: Vec2, direction: ThrowDirection) -> Self {
        let mut sprite = Sprite::new(BOTTLE_SIZE)
            .with_pos(pos)
            .with_hitbox(HITBOX)
            .with_frame(clips.rotation.first());
        sprite.other_direction = direction == ThrowDirection::Left;
        Self {
            sprite,
            motion: Motion::new(TRAVEL_STEP),
            clips,
            player: ClipPlayer::default(),
            direction,
            on_ground: false,
            splashed: false,
            remove_from_world: false,
            travel: None,
            rotation: None,
            splash_anim: None,
            splash_seq: OneShot::default(),
            removal: None,
        }
    }

    pub fn direction(&self) -> ThrowDirection {
        self.direction
    }

    pub fn is_on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn is_splashed(&self) -> bool {
        self.splashed
    }

    pub fn remove_from_world(&self) -> bool {
        self.remove_from_world
    }

    /// Landed and neither splashed nor removed: can be picked up again.
    pub fn is_collectable(&self) -> bool {
        self.on_ground && !self.splashed && !self.remove_from_world
    }

    /// Burst on impact. Returns false if it already splashed.
    pub fn splash(&mut self, now: Millis, audio: &mut dyn AudioSink) -> bool {
        if self.splashed {
            return false;
        }
        self.splashed = true;
        self.motion.speed_y = 0.0;
        self.stop_all();
        self.splash_seq.restart();
        if let Some(frame) = self.splash_seq.next_frame(&self.clips.splash) {
            self.sprite.frame = Some(frame);
        }
        self.splash_anim = Some(Repeater::start(now, SPLASH_FRAME_MS));
        self.removal = Some(Delay::start(now, SPLASH_REMOVAL_MS));
        audio.play_original(Sound::BottleSplash, false);
        true
    }

    fn start_flight(&mut self, now: Millis) {
        apply_gravity(self, now);
        if self.travel.is_none() {
            self.travel = Some(Repeater::start(now, TRAVEL_INTERVAL_MS));
        }
        if self.rotation.is_none() {
            self.rotation = Some(Repeater::start(now, ROTATION_FRAME_MS));
        }
    }

    fn stop_all(&mut self) {
        self.motion.gravity = None;
        self.travel = None;
        self.rotation = None;
    }
}

impl Actor for ThrowableObject {
    fn next_deadline(&self) -> Option<Millis> {
        earliest([
            due_of(&self.motion.gravity),
            due_of(&self.travel),
            due_of(&self.rotation),
            due_of(&self.splash_anim),
            due_of(&self.removal),
        ])
    }

    fn run_due(&mut self, now: Millis, _audio: &mut dyn AudioSink) {
        run_gravity(self, now);
        if poll(&mut self.travel, now) {
            self.sprite.pos.x += TRAVEL_STEP * self.direction.sign();
        }
        if poll(&mut self.rotation, now) {
            if let Some(frame) = self.player.advance(&self.clips.rotation) {
                self.sprite.frame = Some(frame);
            }
        }
        if poll(&mut self.splash_anim, now) {
            if let Some(frame) = self.splash_seq.next_frame(&self.clips.splash) {
                self.sprite.frame = Some(frame);
            }
            if self.splash_seq.is_finished(&self.clips.splash) {
                self.splash_anim = None;
            }
        }
        if poll_once(&mut self.removal, now) {
            self.remove_from_world = true;
        }
    }

    fn animate(&mut self, now: Millis, _audio: &mut dyn AudioSink) {
        if self.remove_from_world {
            return;
        }
        if self.splashed {
            if self.splash_anim.is_none() && !self.splash_seq.is_finished(&self.clips.splash) {
                self.splash_anim = Some(Repeater::start(now, SPLASH_FRAME_MS));
            }
            if self.removal.is_none() {
                self.removal = Some(Delay::start(now, SPLASH_REMOVAL_MS));
            }
        } else if !self.on_ground {
            self.start_flight(now);
        }
    }

    fn cleanup(&mut self, _audio: &mut dyn AudioSink) {
        self.stop_all();
        self.splash_anim = None;
        self.removal = None;
    }
}

impl Renderable for ThrowableObject {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physical for ThrowableObject {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }

    fn is_above_ground(&self) -> bool {
        !self.on_ground
    }

    fn crossed_ground(&self) -> bool {
        self.sprite.pos.y > BOTTLE_GROUND_Y
    }

    fn land(&mut self) {
        self.sprite.pos.y = BOTTLE_GROUND_Y;
        self.motion.speed_y = 0.0;
        self.on_ground = true;
        if let Some(frame) = self.clips.ground.first() {
            self.sprite.frame = Some(frame);
        }
        self.stop_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::test_library;
    use crate::audio::bus::{AudioBus, AudioCommand};

    fn bottle(direction: ThrowDirection) -> ThrowableObject {
        ThrowableObject::throw(test_library().bottle, Vec2::new(1000.0, 135.0), direction, 0.0)
    }

    fn run_until(b: &mut ThrowableObject, target: Millis, audio: &mut AudioBus) {
        while let Some(t) = b.next_deadline().filter(|&t| t <= target) {
            b.run_due(t, audio);
        }
    }

    #[test]
    fn spawn_offset_depends_on_direction() {
        assert_eq!(bottle(ThrowDirection::Right).sprite().pos, Vec2::new(1100.0, 235.0));
        let left = bottle(ThrowDirection::Left);
        assert_eq!(left.sprite().pos, Vec2::new(920.0, 235.0));
        assert!(left.sprite().other_direction);
    }

    #[test]
    fn flies_forward_and_lands() {
        let mut audio = AudioBus::new();
        let mut b = bottle(ThrowDirection::Right);
        run_until(&mut b, 900.0, &mut audio);
        assert!(!b.is_on_ground());
        assert!(b.sprite().pos.x > 1100.0);

        // 24 gravity ticks, 38 travel steps before the landing tick.
        run_until(&mut b, 1000.0, &mut audio);
        assert!(b.is_on_ground());
        assert!(b.is_collectable());
        assert_eq!(b.sprite().pos.y, BOTTLE_GROUND_Y);
        assert_eq!(b.sprite().pos.x, 1100.0 + 38.0 * TRAVEL_STEP);
        assert_eq!(b.sprite().frame, test_library().bottle.ground.first());
        assert_eq!(b.next_deadline(), None);
    }

    #[test]
    fn left_throw_travels_left() {
        let mut audio = AudioBus::new();
        let mut b = bottle(ThrowDirection::Left);
        run_until(&mut b, 500.0, &mut audio);
        assert!(b.sprite().pos.x < 920.0);
    }

    #[test]
    fn splash_is_idempotent_and_removes() {
        let mut audio = AudioBus::new();
        let mut b = bottle(ThrowDirection::Right);
        run_until(&mut b, 200.0, &mut audio);
        assert!(b.splash(200.0, &mut audio));
        assert!(!b.splash(210.0, &mut audio));
        let splashes = audio
            .commands()
            .iter()
            .filter(|c| matches!(c, AudioCommand::PlayOriginal { sound: Sound::BottleSplash, .. }))
            .count();
        assert_eq!(splashes, 1);
        assert_eq!(b.sprite().frame, test_library().bottle.splash.first());
        assert!(!b.is_collectable());

        let x = b.sprite().pos.x;
        run_until(&mut b, 699.0, &mut audio);
        assert_eq!(b.sprite().pos.x, x);
        assert!(!b.remove_from_world());
        run_until(&mut b, 700.0, &mut audio);
        assert!(b.remove_from_world());
        assert_eq!(b.next_deadline(), None);
    }

    #[test]
    fn paused_flight_resumes() {
        let mut audio = AudioBus::new();
        let mut b = bottle(ThrowDirection::Right);
        run_until(&mut b, 200.0, &mut audio);
        b.cleanup(&mut audio);
        assert_eq!(b.next_deadline(), None);
        b.animate(5000.0, &mut audio);
        run_until(&mut b, 7000.0, &mut audio);
        assert!(b.is_on_ground());
    }
}
