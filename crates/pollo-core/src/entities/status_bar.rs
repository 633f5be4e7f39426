//! HUD bars. Each bar picks one of six images from its fill percentage.

use glam::Vec2;

use crate::assets::registry::FrameCatalog;
use crate::components::animation::Clip;
use crate::components::entity::{Renderable, Sprite};
use crate::error::ConfigError;

pub const BAR_SIZE: Vec2 = Vec2::new(240.0, 60.0);
pub const BAR_STEPS: usize = 6;
/// Gap between the boss bar and the top of the boss sprite.
pub const BOSS_BAR_LIFT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarKind {
    Health,
    Bottle,
    Coin,
    Endboss,
}

impl BarKind {
    pub const ALL: [BarKind; 4] = [BarKind::Health, BarKind::Bottle, BarKind::Coin, BarKind::Endboss];

    fn key(self) -> &'static str {
        match self {
            BarKind::Health => "health",
            BarKind::Bottle => "bottle",
            BarKind::Coin => "coin",
            BarKind::Endboss => "endboss",
        }
    }

    /// Count-up bars fill as things are collected; the others drain.
    pub fn counts_up(self) -> bool {
        matches!(self, BarKind::Bottle | BarKind::Coin)
    }

    pub fn home(self) -> Vec2 {
        match self {
            BarKind::Health => Vec2::new(40.0, 40.0),
            BarKind::Bottle => Vec2::new(40.0, 0.0),
            BarKind::Coin => Vec2::new(40.0, 85.0),
            BarKind::Endboss => Vec2::new(400.0, 8.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarClips {
    pub health: Clip,
    pub bottle: Clip,
    pub coin: Clip,
    pub endboss: Clip,
}

impl StatusBarClips {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        let load = |kind: BarKind| catalog.clip_exact("status_bar", kind.key(), BAR_STEPS);
        Ok(Self {
            health: load(BarKind::Health)?,
            bottle: load(BarKind::Bottle)?,
            coin: load(BarKind::Coin)?,
            endboss: load(BarKind::Endboss)?,
        })
    }

    pub fn get(&self, kind: BarKind) -> &Clip {
        match kind {
            BarKind::Health => &self.health,
            BarKind::Bottle => &self.bottle,
            BarKind::Coin => &self.coin,
            BarKind::Endboss => &self.endboss,
        }
    }
}

/// Image index for a fill percentage.
pub fn step_index(percentage: f32, counts_up: bool) -> usize {
    let thresholds: [f32; 4] = if counts_up {
        [75.0, 50.0, 25.0, 0.0]
    } else {
        [80.0, 60.0, 40.0, 20.0]
    };
    if percentage >= 100.0 {
        return 5;
    }
    for (i, &t) in thresholds.iter().enumerate() {
        let reached = if counts_up && t == 0.0 {
            percentage > t
        } else {
            percentage >= t
        };
        if reached {
            return 4 - i;
        }
    }
    0
}

#[derive(Debug, Clone)]
pub struct StatusBar {
    kind: BarKind,
    sprite: Sprite,
    clip: Clip,
    percentage: f32,
}

impl StatusBar {
    pub fn new(kind: BarKind, clips: &StatusBarClips) -> Self {
        let mut bar = Self {
            kind,
            sprite: Sprite::new(BAR_SIZE).with_pos(kind.home()),
            clip: clips.get(kind).clone(),
            percentage: 0.0,
        };
        bar.set_percentage(if kind.counts_up() { 0.0 } else { 100.0 });
        bar
    }

    pub fn kind(&self) -> BarKind {
        self.kind
    }

    pub fn percentage(&self) -> f32 {
        self.percentage
    }

    pub fn set_percentage(&mut self, percentage: f32) {
        self.percentage = percentage;
        let index = step_index(percentage, self.kind.counts_up());
        self.sprite.frame = self.clip.frame(index);
    }

    /// Hover centered above a sprite.
    pub fn follow(&mut self, target: &Sprite) {
        self.sprite.pos.x = target.pos.x + target.size.x / 2.0 - self.sprite.size.x / 2.0;
        self.sprite.pos.y = target.pos.y - BOSS_BAR_LIFT;
    }
}

impl Renderable for StatusBar {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}
