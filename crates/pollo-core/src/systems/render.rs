use crate::components::entity::{Renderable, Sprite};
use crate::renderer::camera::ScrollCamera;
use crate::renderer::surface::RenderSurface;
use crate::systems::debug::draw_hitbox;

/// Draw a sprite's frame around its center, squashed horizontally by its spin.
/// Sprites without a frame draw nothing.
pub fn draw_sprite(surface: &mut dyn RenderSurface, sprite: &Sprite) {
    let Some(frame) = sprite.frame else {
        return;
    };
    let center = sprite.center();
    let (w, h) = (sprite.size.x, sprite.size.y);
    surface.save();
    surface.translate(center.x, center.y);
    if sprite.rotation != 0.0 {
        surface.scale(sprite.rotation.cos(), 1.0);
    }
    surface.draw_image(frame, -w / 2.0, -h / 2.0, w, h);
    surface.restore();
}

/// Mirror the x axis around the sprite's quad. Pair with `surface.restore()`.
fn flip_image(surface: &mut dyn RenderSurface, sprite: &Sprite) {
    surface.save();
    surface.translate(sprite.pos.x + sprite.size.x, 0.0);
    surface.scale(-1.0, 1.0);
    surface.translate(-sprite.pos.x, 0.0);
}

/// Draw one object, mirrored if it faces left, with its hitbox when debugging.
pub fn add_to_map<R: Renderable + ?Sized>(surface: &mut dyn RenderSurface, item: &R, debug: bool) {
    let flipped = item.sprite().other_direction;
    if flipped {
        flip_image(surface, item.sprite());
    }
    item.draw(surface);
    if flipped {
        surface.restore();
    }
    if debug {
        draw_hitbox(surface, &item.collision_box());
    }
}

/// Draw a collection, skipping objects outside the camera view.
pub fn add_objects_to_map<'a, R, I>(
    surface: &mut dyn RenderSurface,
    items: I,
    camera: Option<&ScrollCamera>,
    debug: bool,
) where
    R: Renderable + 'a,
    I: IntoIterator<Item = &'a R>,
{
    for item in items {
        if camera.is_some_and(|cam| !cam.is_visible(&item.sprite().quad())) {
            continue;
        }
        add_to_map(surface, item, debug);
    }
}
