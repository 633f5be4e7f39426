use crate::core::time::Millis;

pub const MAX_ENERGY: i32 = 100;
/// Energy removed by one hit.
pub const HIT_DAMAGE: i32 = 20;
/// Grace period after a hit during which further hits are ignored.
pub const INVINCIBLE_MS: Millis = 1000.0;

/// Energy, damage and the post-hit grace window.
#[derive(Debug, Clone, PartialEq)]
pub struct Vitals {
    energy: i32,
    damage: i32,
    invincible_ms: Millis,
    last_hit: Option<Millis>,
}

impl Vitals {
    pub fn new() -> Self {
        Self {
            energy: MAX_ENERGY,
            damage: HIT_DAMAGE,
            invincible_ms: INVINCIBLE_MS,
            last_hit: None,
        }
    }

    pub fn with_invincibility(mut self, ms: Millis) -> Self {
        self.invincible_ms = ms;
        self
    }

    pub fn energy(&self) -> i32 {
        self.energy
    }

    pub fn set_energy(&mut self, energy: i32) {
        self.energy = energy.clamp(0, MAX_ENERGY);
    }

    pub fn is_dead(&self) -> bool {
        self.energy <= 0
    }

    pub fn last_hit(&self) -> Option<Millis> {
        self.last_hit
    }

    /// Within the grace window of the last applied hit.
    pub fn is_hurt(&self, now: Millis) -> bool {
        self.last_hit
            .is_some_and(|t| now - t < self.invincible_ms)
    }

    /// Apply one hit. Returns false when ignored (dead or still invincible).
    pub fn hit(&mut self, now: Millis) -> bool {
        if self.is_dead() || self.is_hurt(now) {
            return false;
        }
        self.set_energy(self.energy - self.damage);
        self.last_hit = Some(now);
        true
    }
}

impl Default for Vitals {
    fn default() -> Self {
        Self::new()
    }
}

/// An entity that takes damage.
pub trait Damageable {
    fn vitals(&self) -> &Vitals;

    fn energy(&self) -> i32 {
        self.vitals().energy()
    }

    fn is_dead(&self) -> bool {
        self.vitals().is_dead()
    }

    fn is_hurt(&self, now: Millis) -> bool {
        self.vitals().is_hurt(now)
    }
}
