use glam::Vec2;

use crate::assets::registry::FrameId;
use crate::core::collision::{Hitbox, Rect};
use crate::renderer::surface::RenderSurface;
use crate::systems::render::draw_sprite;

/// Drawable base shared by every entity: position, size, current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Top-left corner in world units.
    pub pos: Vec2,
    pub size: Vec2,
    /// Spin angle in radians, drawn as a horizontal squash.
    pub rotation: f32,
    /// Facing left; drawn mirrored.
    pub other_direction: bool,
    /// Frame currently shown. `None` draws nothing.
    pub frame: Option<FrameId>,
    pub hitbox: Hitbox,
}

impl Sprite {
    pub fn new(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
            rotation: 0.0,
            other_direction: false,
            frame: None,
            hitbox: Hitbox::Full,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_frame(mut self, frame: Option<FrameId>) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_hitbox(mut self, hitbox: Hitbox) -> Self {
        self.hitbox = hitbox;
        self
    }

    /// The drawn quad.
    pub fn quad(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    pub fn collision_box(&self) -> Rect {
        self.hitbox.apply(self.quad())
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Anything with a sprite that can be placed in the world and drawn.
pub trait Renderable {
    fn sprite(&self) -> &Sprite;
    fn sprite_mut(&mut self) -> &mut Sprite;

    fn collision_box(&self) -> Rect {
        self.sprite().collision_box()
    }

    fn draw(&self, surface: &mut dyn RenderSurface) {
        draw_sprite(surface, self.sprite());
    }
}
