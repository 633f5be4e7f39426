//! The 2D drawing contract the world renders against.
//!
//! Modeled on a canvas context: a transform stack with save/restore,
//! translate and scale, image blits by frame handle, and stroked rectangles.

use crate::assets::registry::FrameId;

pub trait RenderSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Push the current transform.
    fn save(&mut self);
    /// Pop back to the last saved transform.
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn scale(&mut self, x: f32, y: f32);
    fn set_transform_identity(&mut self);

    fn draw_image(&mut self, frame: FrameId, x: f32, y: f32, w: f32, h: f32);

    /// Add a rectangle to the current path.
    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    /// Stroke and reset the current path.
    fn stroke(&mut self);
}
