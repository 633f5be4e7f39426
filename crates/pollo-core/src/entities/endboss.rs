//! The end boss: waits in alert until the player comes close, then charges.
//!
//! Phases: alert loop until activated, one attack sequence, walking left
//! with its run loop. Hits interrupt walking with the hurt sequence and make
//! it briefly faster. At zero energy it plays the death sequence once and
//! reports `is_animation_finished`, which is what wins the game.

use glam::Vec2;

use crate::assets::registry::{FrameCatalog, FrameId};
use crate::audio::looping::LoopingSound;
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::animation::{Clip, ClipPlayer, OneShot};
use crate::components::entity::{Renderable, Sprite};
use crate::components::vitals::{Damageable, Vitals};
use crate::core::collision::Hitbox;
use crate::core::physics::{Motion, Physical};
use crate::core::time::{
    due_of, earliest, poll, poll_once, Delay, Millis, Repeater, FRAME_MS,
};
use crate::entities::Actor;
use crate::error::ConfigError;

pub const BOSS_SIZE: Vec2 = Vec2::new(250.0, 400.0);
pub const BOSS_START: Vec2 = Vec2::new(4500.0, 50.0);
pub const CRUISE_SPEED: f32 = 2.0;
pub const ALERT_FRAME_MS: Millis = 200.0;
pub const ATTACK_FRAME_MS: Millis = 150.0;
pub const WALK_FRAME_MS: Millis = 180.0;
pub const HURT_FRAME_MS: Millis = 100.0;
pub const DEAD_FRAME_MS: Millis = 600.0;
/// How long the post-hit speed boost lasts.
pub const SPEED_RECOVERY_MS: Millis = 1000.0;
const BOOST_FACTOR: f32 = 1.5;
const MIN_BOOST_SPEED: f32 = 0.5;
const HITBOX: Hitbox = Hitbox::TopCut {
    pad_x: 40.0,
    top: 50.0,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BossClips {
    pub alert: Clip,
    pub walk: Clip,
    pub attack: Clip,
    pub hurt: Clip,
    pub dead: Clip,
}

impl BossClips {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        Ok(Self {
            alert: catalog.clip("endboss", "alert")?,
            walk: catalog.clip("endboss", "walk")?,
            attack: catalog.clip("endboss", "attack")?,
            hurt: catalog.clip("endboss", "hurt")?,
            dead: catalog.clip("endboss", "dead")?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossPhase {
    Alert,
    Attacking,
    Walking,
    Hurt,
    Dead,
}

#[derive(Debug, Clone)]
pub struct Endboss {
    sprite: Sprite,
    motion: Motion,
    vitals: Vitals,
    clips: BossClips,
    player: ClipPlayer,
    activated: bool,
    dead: bool,
    attacking: bool,
    hurt_running: bool,
    animation_finished: bool,
    remove_from_world: bool,
    alert_anim: Option<Repeater>,
    attack_anim: Option<Repeater>,
    attack_seq: OneShot,
    walk_anim: Option<Repeater>,
    movement: Option<Repeater>,
    hurt_anim: Option<Repeater>,
    hurt_seq: OneShot,
    dead_anim: Option<Repeater>,
    dead_seq: OneShot,
    speed_recovery: Option<Delay>,
    run_loop: LoopingSound,
}

impl Endboss {
    pub fn new(clips: BossClips, now: Millis) -> Self {
        let sprite = Sprite::new(BOSS_SIZE)
            .with_pos(BOSS_START)
            .with_hitbox(HITBOX)
            .with_frame(clips.alert.first());
        let mut boss = Self {
            sprite,
            motion: Motion::new(0.0),
            vitals: Vitals::new().with_invincibility(0.0),
            clips,
            player: ClipPlayer::default(),
            activated: false,
            dead: false,
            attacking: false,
            hurt_running: false,
            animation_finished: false,
            remove_from_world: false,
            alert_anim: None,
            attack_anim: None,
            attack_seq: OneShot::default(),
            walk_anim: None,
            movement: None,
            hurt_anim: None,
            hurt_seq: OneShot::default(),
            dead_anim: None,
            dead_seq: OneShot::default(),
            speed_recovery: None,
            run_loop: LoopingSound::default(),
        };
        boss.animate_alert(now);
        boss
    }

    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Activated and still alive.
    pub fn is_active(&self) -> bool {
        self.activated && !self.dead
    }

    pub fn is_animation_finished(&self) -> bool {
        self.animation_finished
    }

    /// Dead with the death sequence fully played.
    pub fn is_dead_and_finished(&self) -> bool {
        self.dead && self.animation_finished
    }

    pub fn remove_from_world(&self) -> bool {
        self.remove_from_world
    }

    pub fn phase(&self) -> BossPhase {
        if self.dead {
            BossPhase::Dead
        } else if self.hurt_running {
            BossPhase::Hurt
        } else if self.attacking {
            BossPhase::Attacking
        } else if self.activated {
            BossPhase::Walking
        } else {
            BossPhase::Alert
        }
    }

    /// Leave alert and attack. Returns true only on the first activation.
    pub fn start_battle(&mut self, now: Millis) -> bool {
        if self.activated || self.dead {
            return false;
        }
        self.activated = true;
        self.alert_anim = None;
        self.play_attack_once(now);
        true
    }

    /// The character ran into the boss: interrupt walking with an attack.
    pub fn collide_attack(&mut self, now: Millis) {
        if self.attacking || self.dead {
            return;
        }
        self.stop_walking();
        self.play_attack_once(now);
    }

    /// Take a bottle hit. Returns false if the boss was already dead.
    pub fn hit(&mut self, now: Millis, audio: &mut dyn AudioSink) -> bool {
        if !self.vitals.hit(now) {
            return false;
        }
        if self.vitals.is_dead() {
            self.die(now, audio);
            return true;
        }
        self.start_hurt(now);
        self.boost_speed(now);
        true
    }

    /// Silence the run loop (the character died).
    pub fn stop_loop_sound(&mut self, audio: &mut dyn AudioSink) {
        self.run_loop.stop(audio);
    }

    fn die(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        self.dead = true;
        self.vitals.set_energy(0);
        self.motion.speed = 0.0;
        self.attacking = false;
        self.hurt_running = false;
        self.stop_all_animations(audio);
        self.dead_seq.restart();
        self.animation_finished = false;
        self.arm_dead_anim(now);
        log::info!("end boss defeated");
    }

    fn arm_dead_anim(&mut self, now: Millis) {
        if self.dead_anim.is_none() {
            self.dead_anim = Some(Repeater::start(now, DEAD_FRAME_MS));
        }
    }

    fn stop_all_animations(&mut self, audio: &mut dyn AudioSink) {
        self.alert_anim = None;
        self.attack_anim = None;
        self.hurt_anim = None;
        self.dead_anim = None;
        self.speed_recovery = None;
        self.stop_walking();
        self.run_loop.stop(audio);
    }

    fn animate_alert(&mut self, now: Millis) {
        if self.alert_anim.is_none() {
            self.alert_anim = Some(Repeater::start(now, ALERT_FRAME_MS));
        }
    }

    fn play_attack_once(&mut self, now: Millis) {
        self.attacking = true;
        self.attack_seq.restart();
        self.attack_anim = Some(Repeater::start(now, ATTACK_FRAME_MS));
    }

    fn start_walking(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.speed_recovery.is_none() {
            self.motion.speed = CRUISE_SPEED;
        }
        self.walk_anim = Some(Repeater::start(now, WALK_FRAME_MS));
        self.movement = Some(Repeater::start(now, FRAME_MS));
        self.run_loop.start(audio, Sound::ChickenRun);
    }

    fn stop_walking(&mut self) {
        self.walk_anim = None;
        self.movement = None;
    }

    fn start_hurt(&mut self, now: Millis) {
        if self.hurt_running {
            return;
        }
        self.hurt_running = true;
        self.hurt_seq.restart();
        self.alert_anim = None;
        self.stop_walking();
        self.hurt_anim = Some(Repeater::start(now, HURT_FRAME_MS));
    }

    fn boost_speed(&mut self, now: Millis) {
        self.motion.speed = (CRUISE_SPEED * BOOST_FACTOR).max(MIN_BOOST_SPEED);
        self.speed_recovery = Some(Delay::start(now, SPEED_RECOVERY_MS));
    }

    /// After an attack or hurt sequence: walk if battling, else back to alert.
    fn resume_after_sequence(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.activated {
            self.start_walking(now, audio);
        } else {
            self.animate_alert(now);
        }
    }

    fn show(&mut self, frame: Option<FrameId>) {
        if frame.is_some() {
            self.sprite.frame = frame;
        }
    }
}

impl Actor for Endboss {
    fn next_deadline(&self) -> Option<Millis> {
        earliest([
            due_of(&self.alert_anim),
            due_of(&self.attack_anim),
            due_of(&self.walk_anim),
            due_of(&self.movement),
            due_of(&self.hurt_anim),
            due_of(&self.dead_anim),
            due_of(&self.speed_recovery),
        ])
    }

    fn run_due(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if poll(&mut self.alert_anim, now) && !self.hurt_running && !self.activated {
            let frame = self.player.advance(&self.clips.alert);
            self.show(frame);
        }
        if poll(&mut self.attack_anim, now) {
            let frame = self.attack_seq.next_frame(&self.clips.attack);
            self.show(frame);
            if self.attack_seq.is_finished(&self.clips.attack) {
                self.attack_anim = None;
                self.attacking = false;
                if !self.hurt_running {
                    self.resume_after_sequence(now, audio);
                }
            }
        }
        if poll(&mut self.walk_anim, now) {
            let frame = self.player.advance(&self.clips.walk);
            self.show(frame);
        }
        if poll(&mut self.movement, now) {
            self.sprite.pos.x -= self.motion.speed;
        }
        if poll(&mut self.hurt_anim, now) {
            let frame = self.hurt_seq.next_frame(&self.clips.hurt);
            self.show(frame);
            if self.hurt_seq.is_finished(&self.clips.hurt) {
                self.hurt_anim = None;
                self.hurt_running = false;
                if !self.attacking {
                    self.resume_after_sequence(now, audio);
                }
            }
        }
        if poll(&mut self.dead_anim, now) {
            let frame = self.dead_seq.next_frame(&self.clips.dead);
            self.show(frame);
            if self.dead_seq.is_finished(&self.clips.dead) {
                self.dead_anim = None;
                self.remove_from_world = true;
                self.animation_finished = true;
            }
        }
        if poll_once(&mut self.speed_recovery, now) && !self.dead {
            self.motion.speed = CRUISE_SPEED;
        }
    }

    fn animate(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        if self.dead {
            if !self.animation_finished {
                self.arm_dead_anim(now);
            }
            return;
        }
        if self.hurt_running && self.hurt_anim.is_none() {
            self.hurt_anim = Some(Repeater::start(now, HURT_FRAME_MS));
        }
        if self.attacking && self.attack_anim.is_none() {
            self.attack_anim = Some(Repeater::start(now, ATTACK_FRAME_MS));
        }
        if self.hurt_running || self.attacking {
            return;
        }
        if !self.activated {
            self.animate_alert(now);
        } else if self.walk_anim.is_none() && self.movement.is_none() {
            self.start_walking(now, audio);
        }
    }

    fn cleanup(&mut self, audio: &mut dyn AudioSink) {
        self.stop_all_animations(audio);
    }
}

impl Renderable for Endboss {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

impl Physical for Endboss {
    fn motion(&self) -> &Motion {
        &self.motion
    }

    fn motion_mut(&mut self) -> &mut Motion {
        &mut self.motion
    }
}

impl Damageable for Endboss {
    fn vitals(&self) -> &Vitals {
        &self.vitals
    }
}
