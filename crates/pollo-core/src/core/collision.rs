use glam::Vec2;

use crate::components::entity::Renderable;
use crate::core::physics::Physical;

/// How far above the target's top edge a falling body may be and still land on it.
pub const STOMP_TOLERANCE: f32 = 20.0;

/// Axis-aligned rectangle in world units (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict intersection: touching edges do not collide.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    pub fn overlaps_horizontally(&self, other: &Rect) -> bool {
        self.right() > other.x && self.x < other.right()
    }
}

/// Collision box shape relative to an entity's drawn quad.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Hitbox {
    /// The drawn quad itself.
    #[default]
    Full,
    /// Shrunk by `pad_x` horizontally and `pad_y` vertically, centered.
    Centered { pad_x: f32, pad_y: f32 },
    /// Centered horizontally, with `top` cut off the head.
    TopCut { pad_x: f32, top: f32 },
}

impl Hitbox {
    pub fn apply(&self, quad: Rect) -> Rect {
        match *self {
            Hitbox::Full => quad,
            Hitbox::Centered { pad_x, pad_y } => Rect::new(
                quad.x + pad_x / 2.0,
                quad.y + pad_y / 2.0,
                quad.width - pad_x,
                quad.height - pad_y,
            ),
            Hitbox::TopCut { pad_x, top } => Rect::new(
                quad.x + pad_x / 2.0,
                quad.y + top,
                quad.width - pad_x,
                quad.height - top,
            ),
        }
    }
}

/// True when a falling body with vertical speed `speed_y` lands on `target`.
pub fn lands_on(body: &Rect, speed_y: f32, target: &Rect) -> bool {
    speed_y < 0.0
        && body.bottom() <= target.y + STOMP_TOLERANCE
        && body.overlaps_horizontally(target)
}

pub fn is_colliding<A, B>(a: &A, b: &B) -> bool
where
    A: Renderable + ?Sized,
    B: Renderable + ?Sized,
{
    a.collision_box().intersects(&b.collision_box())
}

/// Stomp test: `a` is descending onto the top of `b`.
pub fn is_jumping_on<A, B>(a: &A, b: &B) -> bool
where
    A: Physical + ?Sized,
    B: Renderable + ?Sized,
{
    lands_on(&a.collision_box(), a.motion().speed_y, &b.collision_box())
}

/// Looser stomp test on the drawn quads: `a` is falling with its feet in the
/// upper half of `b`.
pub fn is_falling_onto<A, B>(a: &A, b: &B) -> bool
where
    A: Physical + ?Sized,
    B: Renderable + ?Sized,
{
    let feet = a.sprite().quad().bottom();
    let target = b.sprite().quad();
    a.motion().speed_y < 0.0 && feet <= target.y + target.height / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_edges_do_not_collide() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&b));
        let c = Rect::new(9.5, 9.5, 10.0, 10.0);
        assert!(a.intersects(&c));
    }

    #[test]
    fn centered_hitbox_shrinks_evenly() {
        let quad = Rect::new(100.0, 100.0, 80.0, 100.0);
        let hb = Hitbox::Centered { pad_x: 8.0, pad_y: 20.0 }.apply(quad);
        assert_eq!(hb, Rect::new(104.0, 110.0, 72.0, 80.0));
    }

    #[test]
    fn top_cut_keeps_feet() {
        let quad = Rect::new(0.0, 80.0, 100.0, 300.0);
        let hb = Hitbox::TopCut { pad_x: 40.0, top: 100.0 }.apply(quad);
        assert_eq!(hb, Rect::new(20.0, 180.0, 60.0, 200.0));
        assert_eq!(hb.bottom(), quad.bottom());
    }

    #[test]
    fn stomp_needs_descending_body() {
        let body = Rect::new(100.0, 100.0, 60.0, 200.0);
        let target = Rect::new(120.0, 290.0, 70.0, 80.0);
        assert!(lands_on(&body, -5.0, &target));
        assert!(!lands_on(&body, 0.0, &target));
        assert!(!lands_on(&body, 12.0, &target));
    }

    #[test]
    fn stomp_tolerance_is_twenty_pixels() {
        let target = Rect::new(0.0, 300.0, 50.0, 50.0);
        let just_inside = Rect::new(0.0, 120.0, 50.0, 200.0);
        let too_deep = Rect::new(0.0, 121.0, 50.0, 200.0);
        assert!(lands_on(&just_inside, -1.0, &target));
        assert!(!lands_on(&too_deep, -1.0, &target));
    }

    #[test]
    fn stomp_needs_horizontal_overlap() {
        let body = Rect::new(0.0, 100.0, 50.0, 200.0);
        let target = Rect::new(60.0, 290.0, 50.0, 50.0);
        assert!(!lands_on(&body, -5.0, &target));
    }
}
