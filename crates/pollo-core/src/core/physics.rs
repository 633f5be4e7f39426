//! Vertical motion under gravity.

use crate::components::entity::Renderable;
use crate::core::time::{poll, Millis, Repeater};

/// Period of the gravity step.
pub const GRAVITY_INTERVAL_MS: Millis = 40.0;
/// Speed lost per gravity step.
pub const DEFAULT_ACCELERATION: f32 = 3.0;
/// Resting y for bodies standing on the level floor.
pub const GROUND_Y: f32 = 135.0;
/// Crossing below this y counts as touching the floor.
pub const GROUND_THRESHOLD: f32 = 130.0;

/// Horizontal speed, vertical speed and the gravity timer of a moving entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Motion {
    pub speed: f32,
    /// Positive is upward.
    pub speed_y: f32,
    pub acceleration: f32,
    pub gravity: Option<Repeater>,
}

impl Motion {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            speed_y: 0.0,
            acceleration: DEFAULT_ACCELERATION,
            gravity: None,
        }
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::new(0.0)
    }
}

/// Outcome of one gravity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GravityStep {
    /// Still in the air.
    Airborne,
    /// Came down this step.
    Landed,
    /// Standing on the floor, nothing moved.
    Grounded,
}

/// An entity that falls.
pub trait Physical: Renderable {
    fn motion(&self) -> &Motion;
    fn motion_mut(&mut self) -> &mut Motion;

    fn is_above_ground(&self) -> bool {
        self.sprite().pos.y < GROUND_Y
    }

    fn crossed_ground(&self) -> bool {
        self.sprite().pos.y > GROUND_THRESHOLD
    }

    /// Snap onto the floor and stop falling.
    fn land(&mut self) {
        self.sprite_mut().pos.y = GROUND_Y;
        self.motion_mut().speed_y = 0.0;
    }
}

/// Arm the gravity step. Arming twice is a no-op.
pub fn apply_gravity<P: Physical + ?Sized>(body: &mut P, now: Millis) {
    let motion = body.motion_mut();
    if motion.gravity.is_none() {
        motion.gravity = Some(Repeater::start(now, GRAVITY_INTERVAL_MS));
    }
}

/// Run the gravity step if it is due.
pub fn run_gravity<P: Physical + ?Sized>(body: &mut P, now: Millis) -> Option<GravityStep> {
    if poll(&mut body.motion_mut().gravity, now) {
        Some(gravity_step(body))
    } else {
        None
    }
}

/// One step: move by `speed_y`, lose `acceleration`, land on crossing the floor.
pub fn gravity_step<P: Physical + ?Sized>(body: &mut P) -> GravityStep {
    let moved = body.is_above_ground() || body.motion().speed_y > 0.0;
    if moved {
        let speed_y = body.motion().speed_y;
        body.sprite_mut().pos.y -= speed_y;
        body.motion_mut().speed_y -= body.motion().acceleration;
    }
    if body.crossed_ground() {
        body.land();
        if moved {
            GravityStep::Landed
        } else {
            GravityStep::Grounded
        }
    } else {
        GravityStep::Airborne
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Sprite;
    use glam::Vec2;

    struct Body {
        sprite: Sprite,
        motion: Motion,
    }

    impl Renderable for Body {
        fn sprite(&self) -> &Sprite {
            &self.sprite
        }
        fn sprite_mut(&mut self) -> &mut Sprite {
            &mut self.sprite
        }
    }

    impl Physical for Body {
        fn motion(&self) -> &Motion {
            &self.motion
        }
        fn motion_mut(&mut self) -> &mut Motion {
            &mut self.motion
        }
    }

    fn grounded_body() -> Body {
        Body {
            sprite: Sprite::new(Vec2::new(100.0, 300.0)).with_pos(Vec2::new(0.0, GROUND_Y)),
            motion: Motion::new(10.0),
        }
    }

    #[test]
    fn jump_arc_apex_and_landing() {
        let mut body = grounded_body();
        body.motion.speed_y = 35.0;

        let mut apex_tick = 0;
        let mut min_y = GROUND_Y;
        let mut landed_on = None;
        for tick in 1..=40 {
            let step = gravity_step(&mut body);
            if body.sprite.pos.y < min_y {
                min_y = body.sprite.pos.y;
                apex_tick = tick;
            }
            if step == GravityStep::Landed {
                landed_on = Some(tick);
                break;
            }
        }
        assert_eq!(apex_tick, 12);
        assert_eq!(min_y, GROUND_Y - 222.0);
        assert_eq!(landed_on, Some(25));
        assert_eq!(body.sprite.pos.y, GROUND_Y);
        assert_eq!(body.motion.speed_y, 0.0);
    }

    #[test]
    fn resting_body_stays_put() {
        let mut body = grounded_body();
        assert_eq!(gravity_step(&mut body), GravityStep::Grounded);
        assert_eq!(body.sprite.pos.y, GROUND_Y);
    }

    #[test]
    fn apply_gravity_is_idempotent() {
        let mut body = grounded_body();
        apply_gravity(&mut body, 0.0);
        apply_gravity(&mut body, 20.0);
        assert_eq!(run_gravity(&mut body, 39.0), None);
        assert!(run_gravity(&mut body, 40.0).is_some());
    }

    #[test]
    fn falling_body_lands_from_spawn_height() {
        let mut body = grounded_body();
        body.sprite.pos.y = 80.0;
        let mut ticks = 0;
        while gravity_step(&mut body) == GravityStep::Airborne {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(body.sprite.pos.y, GROUND_Y);
    }
}
