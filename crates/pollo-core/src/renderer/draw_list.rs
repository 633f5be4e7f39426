use bytemuck::{Pod, Zeroable};

use crate::assets::registry::FrameId;
use crate::renderer::surface::RenderSurface;

/// Numeric op codes of [`DrawOp::op`].
pub mod draw_ops {
    pub const CLEAR_RECT: f32 = 1.0;
    pub const SAVE: f32 = 2.0;
    pub const RESTORE: f32 = 3.0;
    pub const TRANSLATE: f32 = 4.0;
    pub const SCALE: f32 = 5.0;
    pub const RESET_TRANSFORM: f32 = 6.0;
    pub const DRAW_IMAGE: f32 = 7.0;
    pub const RECT: f32 = 8.0;
    pub const STROKE: f32 = 9.0;
}

/// One recorded surface call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    ClearRect { x: f32, y: f32, w: f32, h: f32 },
    Save,
    Restore,
    Translate { x: f32, y: f32 },
    Scale { x: f32, y: f32 },
    ResetTransform,
    Image { frame: FrameId, x: f32, y: f32, w: f32, h: f32 },
    Rect { x: f32, y: f32, w: f32, h: f32 },
    Stroke,
}

/// Wire form of a [`DrawCommand`]: 6 floats = 24 bytes stride.
/// The host replays these on its canvas context in order.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DrawOp {
    pub op: f32,
    /// Frame id for image ops, otherwise 0.
    pub frame: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
}

impl DrawOp {
    pub const FLOATS: usize = 6;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    fn new(op: f32, frame: f32, a: f32, b: f32, c: f32, d: f32) -> Self {
        Self { op, frame, a, b, c, d }
    }
}

impl From<DrawCommand> for DrawOp {
    fn from(cmd: DrawCommand) -> Self {
        use draw_ops::*;
        match cmd {
            DrawCommand::ClearRect { x, y, w, h } => DrawOp::new(CLEAR_RECT, 0.0, x, y, w, h),
            DrawCommand::Save => DrawOp::new(SAVE, 0.0, 0.0, 0.0, 0.0, 0.0),
            DrawCommand::Restore => DrawOp::new(RESTORE, 0.0, 0.0, 0.0, 0.0, 0.0),
            DrawCommand::Translate { x, y } => DrawOp::new(TRANSLATE, 0.0, x, y, 0.0, 0.0),
            DrawCommand::Scale { x, y } => DrawOp::new(SCALE, 0.0, x, y, 0.0, 0.0),
            DrawCommand::ResetTransform => DrawOp::new(RESET_TRANSFORM, 0.0, 0.0, 0.0, 0.0, 0.0),
            DrawCommand::Image { frame, x, y, w, h } => {
                DrawOp::new(DRAW_IMAGE, frame.0 as f32, x, y, w, h)
            }
            DrawCommand::Rect { x, y, w, h } => DrawOp::new(RECT, 0.0, x, y, w, h),
            DrawCommand::Stroke => DrawOp::new(STROKE, 0.0, 0.0, 0.0, 0.0, 0.0),
        }
    }
}

/// A [`RenderSurface`] that records calls for the host to replay.
pub struct DrawList {
    width: f32,
    height: f32,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            commands: Vec::with_capacity(512),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Frames blitted this pass, in draw order.
    pub fn images(&self) -> impl Iterator<Item = FrameId> + '_ {
        self.commands.iter().filter_map(|c| match *c {
            DrawCommand::Image { frame, .. } => Some(frame),
            _ => None,
        })
    }

    /// Encode up to `max` commands into `out`. Returns how many were dropped.
    pub fn encode_into(&self, out: &mut Vec<DrawOp>, max: usize) -> usize {
        out.clear();
        out.extend(self.commands.iter().take(max).map(|&c| DrawOp::from(c)));
        self.commands.len().saturating_sub(max)
    }
}

impl RenderSurface for DrawList {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::ClearRect { x, y, w, h });
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Translate { x, y });
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.commands.push(DrawCommand::Scale { x, y });
    }

    fn set_transform_identity(&mut self) {
        self.commands.push(DrawCommand::ResetTransform);
    }

    fn draw_image(&mut self, frame: FrameId, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Image { frame, x, y, w, h });
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.commands.push(DrawCommand::Rect { x, y, w, h });
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }
}
