use glam::Vec2;

use crate::assets::registry::FrameCatalog;
use crate::audio::sink::AudioSink;
use crate::components::animation::Clip;
use crate::components::entity::{Renderable, Sprite};
use crate::core::rng::Rng;
use crate::core::time::{due_of, poll, Millis, Repeater, FRAME_MS};
use crate::entities::Actor;
use crate::error::ConfigError;

pub const CLOUD_SIZE: Vec2 = Vec2::new(500.0, 250.0);
pub const CLOUD_Y: f32 = 20.0;
pub const CLOUD_DRIFT: f32 = 0.2;
const CLOUD_SPAWN_X: f32 = 200.0;
const CLOUD_SPAWN_SPREAD: f32 = 2200.0;

pub const BACKGROUND_SIZE: Vec2 = Vec2::new(720.0, 480.0);
/// One pixel less than the image width so neighbouring segments overlap.
pub const SEGMENT_STEP: f32 = 719.0;
pub const BACKGROUND_SEGMENTS: i32 = 8;

pub const END_SCREEN_SIZE: Vec2 = Vec2::new(600.0, 300.0);
pub const END_SCREEN_POS: Vec2 = Vec2::new(60.0, 90.0);

/// A cloud drifting slowly left.
#[derive(Debug, Clone)]
pub struct Cloud {
    sprite: Sprite,
    drift: Option<Repeater>,
}

impl Cloud {
    pub fn new(clip: &Clip, rng: &mut Rng, now: Millis) -> Self {
        let x = rng.spread(CLOUD_SPAWN_X, CLOUD_SPAWN_SPREAD);
        Self {
            sprite: Sprite::new(CLOUD_SIZE)
                .with_pos(Vec2::new(x, CLOUD_Y))
                .with_frame(clip.first()),
            drift: Some(Repeater::start(now, FRAME_MS)),
        }
    }
}

impl Actor for Cloud {
    fn next_deadline(&self) -> Option<Millis> {
        due_of(&self.drift)
    }

    fn run_due(&mut self, now: Millis, _audio: &mut dyn AudioSink) {
        if poll(&mut self.drift, now) {
            self.sprite.pos.x -= CLOUD_DRIFT;
        }
    }

    fn animate(&mut self, now: Millis, _audio: &mut dyn AudioSink) {
        if self.drift.is_none() {
            self.drift = Some(Repeater::start(now, FRAME_MS));
        }
    }

    fn cleanup(&mut self, _audio: &mut dyn AudioSink) {
        self.drift = None;
    }
}

impl Renderable for Cloud {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

/// Parallax layers, back to front.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundClips {
    pub air: Clip,
    pub third_layer: Clip,
    pub second_layer: Clip,
    pub first_layer: Clip,
}

impl BackgroundClips {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        Ok(Self {
            air: catalog.clip("background", "air")?,
            third_layer: catalog.clip("background", "third_layer")?,
            second_layer: catalog.clip("background", "second_layer")?,
            first_layer: catalog.clip("background", "first_layer")?,
        })
    }

    fn layers(&self) -> [&Clip; 4] {
        [&self.air, &self.third_layer, &self.second_layer, &self.first_layer]
    }
}

#[derive(Debug, Clone)]
pub struct BackgroundObject {
    sprite: Sprite,
}

impl BackgroundObject {
    pub fn new(clip: &Clip, segment: i32) -> Self {
        let frame = if clip.is_empty() {
            None
        } else {
            clip.frame(segment.unsigned_abs() as usize % clip.len())
        };
        Self {
            sprite: Sprite::new(BACKGROUND_SIZE)
                .with_pos(Vec2::new(segment as f32 * SEGMENT_STEP, 0.0))
                .with_frame(frame),
        }
    }
}

impl Renderable for BackgroundObject {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

/// Every layer for every segment, starting one segment left of the origin.
pub fn build_background(clips: &BackgroundClips, segments: i32) -> Vec<BackgroundObject> {
    (-1..segments - 1)
        .flat_map(move |segment| {
            clips
                .layers()
                .into_iter()
                .map(move |clip| BackgroundObject::new(clip, segment))
        })
        .collect()
}

/// Game Over / Game Won overlay, drawn in screen space.
#[derive(Debug, Clone)]
pub struct EndScreen {
    sprite: Sprite,
}

impl EndScreen {
    pub fn new(clip: &Clip) -> Self {
        Self {
            sprite: Sprite::new(END_SCREEN_SIZE)
                .with_pos(END_SCREEN_POS)
                .with_frame(clip.first()),
        }
    }
}

impl Renderable for EndScreen {
    fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::test_library;
    use crate::audio::bus::AudioBus;

    #[test]
    fn cloud_drifts_left() {
        let mut audio = AudioBus::new();
        let mut rng = Rng::new(5);
        let mut cloud = Cloud::new(&test_library().cloud, &mut rng, 0.0);
        let x0 = cloud.sprite().pos.x;
        assert!((200.0..2400.0).contains(&x0));
        for _ in 0..60 {
            if let Some(t) = cloud.next_deadline() {
                cloud.run_due(t, &mut audio);
            }
        }
        assert!((x0 - cloud.sprite().pos.x - 12.0).abs() < 0.05);

        cloud.cleanup(&mut audio);
        assert_eq!(cloud.next_deadline(), None);
        cloud.animate(2000.0, &mut audio);
        assert!(cloud.next_deadline().is_some());
    }

    #[test]
    fn background_covers_eight_segments_of_four_layers() {
        let lib = test_library();
        let objects = build_background(&lib.background, BACKGROUND_SEGMENTS);
        assert_eq!(objects.len(), 32);
        assert_eq!(objects[0].sprite().pos.x, -719.0);
        assert_eq!(objects[31].sprite().pos.x, 6.0 * 719.0);
        // Segment -1 and 1 share the second image of two-image layers.
        assert_eq!(objects[3].sprite().frame, lib.background.first_layer.frame(1));
        assert_eq!(objects[7].sprite().frame, lib.background.first_layer.frame(0));
        assert_eq!(objects[0].sprite().frame, lib.background.air.first());
    }

    #[test]
    fn end_screen_geometry() {
        let screen = EndScreen::new(&test_library().game_over);
        assert_eq!(screen.sprite().pos, END_SCREEN_POS);
        assert_eq!(screen.sprite().size, END_SCREEN_SIZE);
        assert!(screen.sprite().frame.is_some());
    }
}
