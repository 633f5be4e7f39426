use glam::Vec2;

use crate::assets::registry::FrameCatalog;
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::animation::{Clip, ClipPlayer};
use crate::components::entity::{Renderable, Sprite};
use crate::components::vitals::{Damageable, Vitals};
use crate::core::collision::Hitbox;
use crate::core::physics::{self, GravityStep, Motion, Physical};
use crate::core::time::{due_of, earliest, poll, Millis, Repeater, FRAME_MS};
use crate::error::ConfigError;
use crate::input::keyboard::Keyboard;

pub const CHARACTER_SIZE: Vec2 = Vec2::new(100.0, 300.0);
pub const START_POS: Vec2 = Vec2::new(150.0, 80.0);
pub const WALK_SPEED: f32 = 10.0;
pub const JUMP_SPEED: f32 = 35.0;
/// Upward speed after stomping an enemy.
pub const BOUNCE_SPEED: f32 = 30.0;
pub const ANIMATION_INTERVAL_MS: Millis = 100.0;
/// Standing still this long switches to the long idle.
pub const LONG_IDLE_AFTER_MS: Millis = 5000.0;
const HITBOX: Hitbox = Hitbox::TopCut {
    pad_x: 40.0,
    top: 100.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterClips {
    pub walking: Clip,
    pub jumping: Clip,
    pub dead: Clip,
    pub hurt: Clip,
    pub short_idle: Clip,
    pub long_idle: Clip,
}

impl CharacterClips {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        Ok(Self {
            walking: catalog.clip("character", "walking")?,
            jumping: catalog.clip("character", "jumping")?,
            dead: catalog.clip("character", "dead")?,
            hurt: catalog.clip("character", "hurt")?,
            short_idle: catalog.clip("character", "short_idle")?,
            long_idle: catalog.clip("character", "long_idle")?,
        })
    }
}

/// Animation state, chosen by priority on every animation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterState {
    Dead,
    Hurt,
    Jumping,
    Walking,
    IdleShort,
    IdleLong,
}

/// What the character reads from the world each tick.
#[derive(Debug, Clone, Copy)]
pub struct CharacterInput<'a> {
    pub keyboard: &'a Keyboard,
    /// Rightmost x the character may walk to.
    pub max_x: f32,
}

/// The player.
#[derive(Debug, Clone)]
pub struct Character {
    sprite: Sprite,
    motion: Motion,
    vitals: Vitals,
    clips: CharacterClips,
    player: ClipPlayer,
    state: CharacterState,
    movement: Option<Repeater>,
    animation: Option<Repeater>,
    last_move: Millis,
    run_sound_playing: bool,
    idle_sound_playing: bool,
    jump_sound_played: bool,
    falling_sound_playing: bool,
    hurt_sound_played: bool,
}

impl Character {
    /// Spawn above the floor, falling, with movement and animation running.
    pub fn new(clips: CharacterClips, now: Millis) -> Self {
        let sprite = Sprite::new(CHARACTER_SIZE)
            .with_pos(START_POS)
            .with_hitbox(HITBOX)
            .with_frame(clips.short_idle.first());
        let mut character = Self {
            sprite,
            motion: Motion::new(WALK_SPEED),
            vitals: Vitals::new(),
            clips,
            player: ClipPlayer::default(),
            state: CharacterState::IdleShort,
            movement: None,
            animation: None,
            last_move: now,
            run_sound_playing: false,
            idle_sound_playing: false,
            jump_sound_played: false,
            falling_sound_playing: false,
            hurt_sound_played: false,
        };
        character.apply_gravity(now);
        character.animate(now);
        character
    }

    pub fn x(&self) -> f32 {
        self.sprite.pos.x
    }

    pub fn state(&self) -> CharacterState {
        self.state
    }

    pub fn apply_gravity(&mut self, now: Millis) {
        physics::apply_gravity(self, now);
    }

    /// Arm movement and animation. Already armed timers are kept.
    pub fn animate(&mut self, now: Millis) {
        if self.movement.is_none() {
            self.movement = Some(Repeater::start(now, FRAME_MS));
        }
        if self.animation.is_none() {
            self.animation = Some(Repeater::start(now, ANIMATION_INTERVAL_MS));
        }
    }

    pub fn cleanup(&mut self) {
        self.movement = None;
        self.animation = None;
        self.motion.gravity = None;
    }

    /// Silence the character and forget which sounds were played.
    pub fn reset(&mut self, audio: &mut dyn AudioSink) {
        self.run_sound_playing = false;
        self.idle_sound_playing = false;
        self.jump_sound_played = false;
        self.falling_sound_playing = false;
        self.hurt_sound_played = false;
        audio.stop_original(Sound::CharacterHurt);
        audio.stop_original(Sound::CharacterRun);
        audio.stop_original(Sound::CharacterFall);
        audio.stop_original(Sound::CharacterIdle);
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        earliest([
            due_of(&self.motion.gravity),
            due_of(&self.movement),
            due_of(&self.animation),
        ])
    }

    pub fn run_due(&mut self, now: Millis, input: CharacterInput<'_>, audio: &mut dyn AudioSink) {
        if let Some(GravityStep::Landed | GravityStep::Grounded) = physics::run_gravity(self, now) {
            self.handle_landing_sound(audio);
        }
        if poll(&mut self.movement, now) {
            self.handle_movement(now, input);
        }
        if poll(&mut self.animation, now) {
            self.handle_animation(now, input.keyboard, audio);
        }
    }

    pub fn jump(&mut self) {
        self.motion.speed_y = JUMP_SPEED;
    }

    pub fn bounce(&mut self) {
        self.motion.speed_y = BOUNCE_SPEED;
    }

    /// Take one hit unless still invincible. Returns whether it applied.
    pub fn hit(&mut self, now: Millis) -> bool {
        self.vitals.hit(now)
    }

    fn handle_movement(&mut self, now: Millis, input: CharacterInput<'_>) {
        let keyboard = input.keyboard;
        let mut moved = false;
        if keyboard.right && self.sprite.pos.x < input.max_x {
            self.sprite.other_direction = false;
            self.sprite.pos.x = (self.sprite.pos.x + self.motion.speed).min(input.max_x);
            moved = true;
        }
        if keyboard.left && self.sprite.pos.x > 0.0 {
            self.sprite.other_direction = true;
            self.sprite.pos.x = (self.sprite.pos.x - self.motion.speed).max(0.0);
            moved = true;
        }
        if keyboard.space && !self.is_above_ground() {
            self.jump();
            moved = true;
        }
        if moved {
            self.last_move = now;
        }
    }

    fn resolve_state(&self, now: Millis, keyboard: &Keyboard) -> CharacterState {
        if self.vitals.is_dead() {
            CharacterState::Dead
        } else if self.vitals.is_hurt(now) {
            CharacterState::Hurt
        } else if self.is_above_ground() {
            CharacterState::Jumping
        } else if keyboard.right || keyboard.left {
            CharacterState::Walking
        } else if now - self.last_move < LONG_IDLE_AFTER_MS {
            CharacterState::IdleShort
        } else {
            CharacterState::IdleLong
        }
    }

    fn handle_animation(&mut self, now: Millis, keyboard: &Keyboard, audio: &mut dyn AudioSink) {
        let state = self.resolve_state(now, keyboard);
        if state != CharacterState::Walking {
            self.stop_run_sound(audio);
        }
        if state != CharacterState::IdleLong && self.idle_sound_playing {
            audio.stop_original(Sound::CharacterIdle);
            self.idle_sound_playing = false;
        }
        let clip = match state {
            CharacterState::Dead => {
                self.jump_sound_played = false;
                self.falling_sound_playing = false;
                self.hurt_sound_played = false;
                &self.clips.dead
            }
            CharacterState::Hurt => {
                if !self.hurt_sound_played {
                    audio.play_original(Sound::CharacterHurt, false);
                    self.hurt_sound_played = true;
                }
                audio.stop_original(Sound::CharacterFall);
                self.jump_sound_played = false;
                self.falling_sound_playing = false;
                &self.clips.hurt
            }
            CharacterState::Jumping => {
                self.handle_jump_and_fall_sound(audio);
                self.hurt_sound_played = false;
                &self.clips.jumping
            }
            CharacterState::Walking => {
                if !self.run_sound_playing {
                    audio.play_original(Sound::CharacterRun, true);
                    self.run_sound_playing = true;
                }
                self.hurt_sound_played = false;
                &self.clips.walking
            }
            CharacterState::IdleShort => {
                self.hurt_sound_played = false;
                &self.clips.short_idle
            }
            CharacterState::IdleLong => {
                if !self.idle_sound_playing {
                    audio.play_original(Sound::CharacterIdle, true);
                    self.idle_sound_playing = true;
                }
                self.hurt_sound_played = false;
                &self.clips.long_idle
            }
        };
        if let Some(frame) = self.player.advance(clip) {
            self.sprite.frame = Some(frame);
        }
        self.state = state;
    }

    fn stop_run_sound(&mut self, audio: &mut dyn AudioSink) {
        if self.run_sound_playing {
            audio.stop_original(Sound::CharacterRun);
            self.run_sound_playing = false;
        }
    }

    fn handle_jump_and_fall_sound(&mut self, audio: &mut dyn AudioSink) {
        if !self.jump_sound_played && self.motion.speed_y > 0.0 {
            audio.play_original(Sound::CharacterJump, false);
            self.jump_sound_played = true;
        }
        if self.motion.speed_y < 0.0 && !self.falling_sound_playing {
            audio.play_original(Sound::CharacterFall, true);
            self.falling_sound_playing = true;
        }
    }

    fn handle_landing_sound(&mut self, audio: &mut dyn AudioSink) {
        if self.falling_sound_playing {
            audio.stop_original(Sound::CharacterFall);
            self.falling_sound_playing = false;
            self.jump_sound_played = false;
        }
    }
}

impl Renderable for Character {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physical for Character {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Damageable for Character {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::test_library;
    use crate::audio::bus::{AudioBus, AudioCommand};
    use crate::core::physics::GROUND_Y;

    const OPEN_FIELD: f32 = 4200.0;

    fn spawn() -> Character {
        Character::new(test_library().character, 0.0)
    }

    fn run_until(
        c: &mut Character,
        target: Millis,
        keyboard: &Keyboard,
        max_x: f32,
        audio: &mut AudioBus,
    ) {
        while let Some(t) = c.next_deadline().filter(|&t| t <= target) {
            c.run_due(t, CharacterInput { keyboard, max_x }, audio);
        }
    }

    fn count(audio: &AudioBus, cmd: AudioCommand) -> usize {
        audio.commands().iter().filter(|&&c| c == cmd).count()
    }

    #[test]
    fn falls_onto_the_floor_and_idles() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        run_until(&mut c, 1000.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert_eq!(c.sprite().pos.y, GROUND_Y);
        assert_eq!(c.state(), CharacterState::IdleShort);
    }

    #[test]
    fn walking_right_and_left() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        let kb = Keyboard {
            right: true,
            ..Keyboard::default()
        };
        run_until(&mut c, 1000.0, &kb, OPEN_FIELD, &mut audio);
        assert!(c.x() > START_POS.x);
        assert!(!c.sprite().other_direction);
        assert_eq!(c.state(), CharacterState::Walking);
        assert!(audio.is_looping(Sound::CharacterRun));

        let kb = Keyboard {
            left: true,
            ..Keyboard::default()
        };
        run_until(&mut c, 5000.0, &kb, OPEN_FIELD, &mut audio);
        assert_eq!(c.x(), 0.0);
        assert!(c.sprite().other_direction);
    }

    #[test]
    fn max_x_clamps_walking() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        let kb = Keyboard {
            right: true,
            ..Keyboard::default()
        };
        run_until(&mut c, 2000.0, &kb, 300.0, &mut audio);
        assert_eq!(c.x(), 300.0);
    }

    #[test]
    fn jump_only_from_the_floor_with_sounds() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        run_until(&mut c, 1000.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        audio.drain();

        let kb = Keyboard {
            space: true,
            ..Keyboard::default()
        };
        run_until(&mut c, 1020.0, &kb, OPEN_FIELD, &mut audio);
        assert_eq!(c.motion().speed_y, JUMP_SPEED);
        run_until(&mut c, 1600.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert!(c.is_above_ground());
        assert_eq!(c.state(), CharacterState::Jumping);
        assert_eq!(
            count(&audio, AudioCommand::PlayOriginal { sound: Sound::CharacterJump, looped: false }),
            1
        );
        run_until(&mut c, 3000.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert!(!c.is_above_ground());
        assert!(!audio.is_looping(Sound::CharacterFall));
    }

    #[test]
    fn hurt_sound_once_per_episode() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        run_until(&mut c, 1000.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert!(c.hit(1000.0));
        run_until(&mut c, 1900.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert_eq!(c.state(), CharacterState::Hurt);
        assert_eq!(
            count(&audio, AudioCommand::PlayOriginal { sound: Sound::CharacterHurt, looped: false }),
            1
        );
        assert_eq!(c.energy(), 80);
    }

    #[test]
    fn long_idle_loops_idle_sound() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        run_until(&mut c, 4000.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert_eq!(c.state(), CharacterState::IdleShort);
        run_until(&mut c, 5200.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert_eq!(c.state(), CharacterState::IdleLong);
        assert!(audio.is_looping(Sound::CharacterIdle));
    }

    #[test]
    fn dead_character_shows_dead_frames() {
        let mut c = spawn();
        let mut audio = AudioBus::new();
        for i in 0..5 {
            c.hit(i as f64 * 1500.0);
        }
        assert!(c.is_dead());
        run_until(&mut c, 7600.0, &Keyboard::default(), OPEN_FIELD, &mut audio);
        assert_eq!(c.state(), CharacterState::Dead);
        let frame = c.sprite().frame.unwrap();
        assert!(test_library().character.dead.frames().contains(&frame));
    }

    #[test]
    fn cleanup_cancels_and_animate_rearms() {
        let mut c = spawn();
        c.cleanup();
        assert_eq!(c.next_deadline(), None);
        c.animate(500.0);
        c.animate(600.0);
        c.apply_gravity(500.0);
        assert_eq!(c.next_deadline(), Some(500.0 + FRAME_MS));
    }
}
