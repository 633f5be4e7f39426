use crate::assets::registry::FrameId;

/// An ordered list of frames for one animation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Clip {
    frames: Vec<FrameId>,
}

impl Clip {
    pub fn new(frames: Vec<FrameId>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frame(&self, index: usize) -> Option<FrameId> {
        self.frames.get(index).copied()
    }

    pub fn first(&self) -> Option<FrameId> {
        self.frame(0)
    }

    pub fn frames(&self) -> &[FrameId] {
        &self.frames
    }
}

/// Looping playback cursor. One cursor may drive several clips; switching
/// clips keeps counting from where the previous one stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipPlayer {
    current_image: usize,
}

impl ClipPlayer {
    /// Frame to show this tick, then step forward.
    pub fn advance(&mut self, clip: &Clip) -> Option<FrameId> {
        if clip.is_empty() {
            return None;
        }
        let frame = clip.frame(self.current_image % clip.len());
        self.current_image = self.current_image.wrapping_add(1);
        frame
    }

    pub fn reset(&mut self) {
        self.current_image = 0;
    }
}

/// Play-once cursor over a clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OneShot {
    next: usize,
}

impl OneShot {
    pub fn restart(&mut self) {
        self.next = 0;
    }

    /// Next frame of the sequence, or `None` once every frame was shown.
    pub fn next_frame(&mut self, clip: &Clip) -> Option<FrameId> {
        let frame = clip.frame(self.next)?;
        self.next += 1;
        Some(frame)
    }

    pub fn is_finished(&self, clip: &Clip) -> bool {
        self.next >= clip.len()
    }
}
