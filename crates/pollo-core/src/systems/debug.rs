//! Debug rendering: opt-in hitbox outlines.
//!
//! Enabled with `GameConfig::debug_hitboxes`; every drawn object gets its
//! collision box stroked right after its image.

use crate::core::collision::Rect;
use crate::renderer::surface::RenderSurface;

/// Stroke a collision rectangle.
pub fn draw_hitbox(surface: &mut dyn RenderSurface, hitbox: &Rect) {
    surface.rect(hitbox.x, hitbox.y, hitbox.width, hitbox.height);
    surface.stroke();
}
