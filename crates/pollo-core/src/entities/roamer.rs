use glam::Vec2;

use crate::assets::registry::FrameCatalog;
use crate::audio::looping::LoopingSound;
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::animation::{Clip, ClipPlayer};
use crate::components::entity::{Renderable, Sprite};
use crate::core::collision::Hitbox;
use crate::core::physics::{Motion, Physical};
use crate::core::rng::Rng;
use crate::core::time::{due_of, earliest, poll, poll_once, Delay, Millis, Repeater, FRAME_MS};
use crate::entities::Actor;
use crate::error::ConfigError;

pub const WALK_FRAME_MS: Millis = 100.0;
/// A stomped or hit roamer lies on the floor this long before it is removed.
pub const REMOVAL_DELAY_MS: Millis = 1000.0;
const SPAWN_X: f32 = 400.0;
const SPAWN_SPREAD: f32 = 2900.0;
const MIN_SPEED: f32 = 0.2;
const SPEED_SPREAD: f32 = 0.8;

/// The two walking enemies. They differ only in size and voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoamerKind {
    Chicken,
    Little,
}

impl RoamerKind {
    pub fn size(self) -> Vec2 {
        match self {
            RoamerKind::Chicken => Vec2::new(80.0, 100.0),
            RoamerKind::Little => Vec2::new(50.0, 70.0),
        }
    }

    pub fn ground_y(self) -> f32 {
        match self {
            RoamerKind::Chicken => 330.0,
            RoamerKind::Little => 350.0,
        }
    }

    pub fn run_sound(self) -> Sound {
        match self {
            RoamerKind::Chicken => Sound::ChickenRun,
            RoamerKind::Little => Sound::LittleChickenRun,
        }
    }

    fn manifest_key(self) -> &'static str {
        match self {
            RoamerKind::Chicken => "chicken",
            RoamerKind::Little => "little_chicken",
        }
    }

    fn hitbox(self) -> Hitbox {
        let size = self.size();
        Hitbox::Centered {
            pad_x: size.x * 0.1,
            pad_y: size.y * 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoamerClips {
    pub walking: Clip,
    pub dead: Clip,
}

impl RoamerClips {
    pub fn load(catalog: &FrameCatalog, kind: RoamerKind) -> Result<Self, ConfigError> {
        let key = kind.manifest_key();
        Ok(Self {
            walking: catalog.clip(key, "walking")?,
            dead: catalog.clip(key, "dead")?,
        })
    }
}

/// A chicken walking left until it is stomped or hit by a bottle.
#[derive(Debug, Clone)]
pub struct Roamer {
    kind: RoamerKind,
    sprite: Sprite,
    motion: Motion,
    clips: RoamerClips,
    player: ClipPlayer,
    dead: bool,
    remove_from_world: bool,
    movement: Option<Repeater>,
    walking: Option<Repeater>,
    removal: Option<Delay>,
    run_loop: LoopingSound,
}

impl Roamer {
    /// Spawn at a random x with a random speed, already walking.
    pub fn new(
        kind: RoamerKind,
        clips: RoamerClips,
        rng: &mut Rng,
        now: Millis,
        audio: &mut dyn AudioSink,
    ) -> Self {
        let x = rng.spread(SPAWN_X, SPAWN_SPREAD);
        let speed = rng.spread(MIN_SPEED, SPEED_SPREAD);
        let mut roamer = Self::at(kind, clips, x, speed);
        roamer.animate(now, audio);
        roamer
    }

    /// A roamer at a fixed spot, not yet animated.
    pub fn at(kind: RoamerKind, clips: RoamerClips, x: f32, speed: f32) -> Self {
        let sprite = Sprite::new(kind.size())
            .with_pos(Vec2::new(x, kind.ground_y()))
            .with_hitbox(kind.hitbox())
            .with_frame(clips.walking.first());
        Self {
            kind,
            sprite,
            motion: Motion::new(speed),
            clips,
            player: ClipPlayer::default(),
            dead: false,
            remove_from_world: false,
            movement: None,
            walking: None,
            removal: None,
            run_loop: LoopingSound::default(),
        }
    }

    pub fn kind(&self) -> RoamerKind {
        self.kind
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn remove_from_world(&self) -> bool {
        self.remove_from_world
    }

    /// Kill the roamer. Returns false if it was already dead.
    pub fn die(&mut self, now: Millis, audio: &mut dyn AudioSink) -> bool {
        if self.dead {
            return false;
        }
        self.dead = true;
        self.motion.speed = 0.0;
        self.movement = None;
        self.walking = None;
        self.run_loop.stop(audio);
        audio.play_cloned(Sound::ChickenDead, false);
        self.sprite.frame = self.clips.dead.first();
        self.removal = Some(Delay::start(now, REMOVAL_DELAY_MS));
        log::debug!("{:?} killed at x={:.0}", self.kind, self.sprite.pos.x);
        true
    }
}

impl Actor for Roamer {
    fn next_deadline(&self) -> Option<Millis> {
        earliest([
            due_of(&self.movement),
            due_of(&self.walking),
            due_of(&self.removal),
        ])
    }

    fn run_due(&mut self, now: Millis, _audio: &mut dyn AudioSink) {
        if poll(&mut self.movement, now) {
            self.sprite.pos.x -= self.motion.speed;
        }
        if poll(&mut self.walking, now) {
            if let Some(frame) = self.player.advance(&self.clips.walking) {
                self.sprite.frame = Some(frame);
            }
        }
        if poll_once(&mut self.removal, now) {
            self.remove_from_world = true;
        }
    }

    fn animate(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.dead {
            return;
        }
        if self.movement.is_none() {
            self.movement = Some(Repeater::start(now, FRAME_MS));
        }
        if self.walking.is_none() {
            self.walking = Some(Repeater::start(now, WALK_FRAME_MS));
        }
        if !self.run_loop.is_playing() {
            self.run_loop.start(audio, self.kind.run_sound());
        }
    }

    fn cleanup(&mut self, audio: &mut dyn AudioSink) {
        self.movement = None;
        self.walking = None;
        self.run_loop.stop(audio);
    }
}

impl Renderable for Roamer {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physical for Roamer {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::test_library;
    use crate::audio::bus::{AudioBus, AudioCommand};

    fn chicken(audio: &mut AudioBus) -> Roamer {
        let mut rng = Rng::new(3);
        Roamer::new(RoamerKind::Chicken, test_library().chicken, &mut rng, 0.0, audio)
    }

    fn run_until(r: &mut Roamer, target: Millis, audio: &mut AudioBus) {
        while let Some(t) = r.next_deadline().filter(|&t| t <= target) {
            r.run_due(t, audio);
        }
    }

    #[test]
    fn spawns_in_range_and_walks_left() {
        let mut audio = AudioBus::new();
        let mut r = chicken(&mut audio);
        let x0 = r.sprite().pos.x;
        assert!((400.0..3300.0).contains(&x0));
        assert!((0.2..1.0).contains(&r.motion().speed));
        assert_eq!(audio.live_clones().len(), 1);
        run_until(&mut r, 1000.0, &mut audio);
        assert!(r.sprite().pos.x < x0);
    }

    #[test]
    fn die_is_idempotent() {
        let mut audio = AudioBus::new();
        let mut r = chicken(&mut audio);
        audio.drain();
        assert!(r.die(100.0, &mut audio));
        assert!(!r.die(150.0, &mut audio));
        let dead_sounds = audio
            .commands()
            .iter()
            .filter(|c| matches!(c, AudioCommand::PlayClone { sound: Sound::ChickenDead, .. }))
            .count();
        assert_eq!(dead_sounds, 1);
        assert_eq!(r.motion().speed, 0.0);
        assert_eq!(r.sprite().frame, test_library().chicken.dead.first());
        assert!(audio.live_clones().is_empty());

        run_until(&mut r, 1099.0, &mut audio);
        assert!(!r.remove_from_world());
        run_until(&mut r, 1100.0, &mut audio);
        assert!(r.remove_from_world());
        assert_eq!(r.next_deadline(), None);
    }

    #[test]
    fn dead_roamer_does_not_reanimate() {
        let mut audio = AudioBus::new();
        let mut r = chicken(&mut audio);
        r.die(0.0, &mut audio);
        r.cleanup(&mut audio);
        audio.drain();
        r.animate(10.0, &mut audio);
        assert!(audio.commands().is_empty());
        assert_eq!(r.next_deadline(), Some(REMOVAL_DELAY_MS));
    }

    #[test]
    fn cleanup_then_animate_restores_one_loop() {
        let mut audio = AudioBus::new();
        let mut r = chicken(&mut audio);
        r.cleanup(&mut audio);
        assert_eq!(r.next_deadline(), None);
        assert!(audio.live_clones().is_empty());
        r.animate(500.0, &mut audio);
        r.animate(510.0, &mut audio);
        assert_eq!(audio.live_clones().len(), 1);
    }

    #[test]
    fn little_chicken_geometry() {
        let clips = test_library().little_chicken;
        let r = Roamer::at(RoamerKind::Little, clips, 1000.0, 0.5);
        assert_eq!(r.sprite().pos.y, 350.0);
        let hb = r.collision_box();
        assert_eq!(hb.width, 45.0);
        assert_eq!(hb.height, 56.0);
    }
}
