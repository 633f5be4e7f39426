use crate::core::collision::Rect;

/// Side-scrolling camera: a horizontal offset that keeps the followed
/// target `lead` units from the left edge of the view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCamera {
    /// Translation applied to world space before drawing (usually negative).
    pub offset_x: f32,
    pub lead: f32,
    /// Visible width in world units.
    pub width: f32,
}

impl ScrollCamera {
    pub fn new(width: f32, lead: f32) -> Self {
        Self {
            offset_x: 0.0,
            lead,
            width,
        }
    }

    pub fn follow(&mut self, target_x: f32) {
        self.offset_x = -target_x + self.lead;
    }

    pub fn reset(&mut self) {
        self.offset_x = 0.0;
    }

    /// World x at the left edge of the view.
    pub fn left(&self) -> f32 {
        -self.offset_x
    }

    pub fn right(&self) -> f32 {
        self.left() + self.width
    }

    /// Any horizontal part of `rect` is on screen.
    pub fn is_visible(&self, rect: &Rect) -> bool {
        rect.right() >= self.left() && rect.x <= self.right()
    }
}
