//! Pickups: coins hanging in the air and bottles lying on the floor.
//! Both disappear the moment the character touches them.

use glam::Vec2;

use crate::components::animation::Clip;
use crate::components::entity::{Renderable, Sprite};
use crate::core::collision::Hitbox;
use crate::core::rng::Rng;

pub const COIN_SIZE: Vec2 = Vec2::new(150.0, 150.0);
/// Radians added per logic tick.
pub const COIN_SPIN_STEP: f32 = 0.2;
pub const COIN_POSITIONS: [Vec2; 5] = [
    Vec2::new(600.0, 280.0),
    Vec2::new(1200.0, 20.0),
    Vec2::new(1800.0, 20.0),
    Vec2::new(2400.0, 20.0),
    Vec2::new(3000.0, 280.0),
];

pub const GROUND_BOTTLE_SIZE: Vec2 = Vec2::new(80.0, 100.0);
pub const GROUND_BOTTLE_Y: f32 = 330.0;
const BOTTLE_SPAWN_X: f32 = 400.0;
const BOTTLE_SPAWN_SPREAD: f32 = 2900.0;

#[derive(Debug, Clone)]
pub struct Coin {
    sprite: Sprite,
}

impl Coin {
    pub fn new(clip: &Clip, pos: Vec2) -> Self {
        Self {
            sprite: Sprite::new(COIN_SIZE)
                .with_pos(pos)
                .with_hitbox(Hitbox::Centered {
                    pad_x: 90.0,
                    pad_y: 90.0,
                })
                .with_frame(clip.first()),
        }
    }

    pub fn spin(&mut self) {
        self.sprite.rotation += COIN_SPIN_STEP;
    }
}

impl Renderable for Coin {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

/// A bottle lying on the floor, waiting to be picked up.
#[derive(Debug, Clone)]
pub struct GroundBottle {
    sprite: Sprite,
}

impl GroundBottle {
    pub fn new(clip: &Clip, rng: &mut Rng) -> Self {
        Self::at(clip, rng.spread(BOTTLE_SPAWN_X, BOTTLE_SPAWN_SPREAD))
    }

    pub fn at(clip: &Clip, x: f32) -> Self {
        Self {
            sprite: Sprite::new(GROUND_BOTTLE_SIZE)
                .with_pos(Vec2::new(x, GROUND_BOTTLE_Y))
                .with_hitbox(Hitbox::Centered {
                    pad_x: 40.0,
                    pad_y: 20.0,
                })
                .with_frame(clip.first()),
        }
    }
}

impl Renderable for GroundBottle {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}
