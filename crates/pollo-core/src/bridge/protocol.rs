/// Shared buffer layout between the simulation and the browser host.
/// Must stay in sync with the host's `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 12 floats]
/// [Draw ops: max_draw_ops × 6 floats]
/// [Audio commands: max_sounds × 4 floats]
/// [Events: max_events × 4 floats]
/// ```
///
/// Capacities are written once into the header at init. The host reads them
/// from the header to compute offsets.

use crate::api::game::GameConfig;
use crate::api::types::GameEvent;
use crate::audio::bus::AudioRecord;
use crate::renderer::draw_list::DrawOp;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 12;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_DRAW_OPS: usize = 2;
pub const HEADER_DRAW_OP_COUNT: usize = 3;
pub const HEADER_MAX_SOUNDS: usize = 4;
pub const HEADER_SOUND_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_WORLD_WIDTH: usize = 8;
pub const HEADER_WORLD_HEIGHT: usize = 9;
pub const HEADER_PROTOCOL_VERSION: usize = 10;
/// Draw ops cut off this frame because the draw section was full.
pub const HEADER_DROPPED_DRAW_OPS: usize = 11;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per draw op: op, frame, a, b, c, d.
pub const DRAW_OP_FLOATS: usize = DrawOp::FLOATS;

/// Floats per audio command: op, sound, handle, flag.
pub const AUDIO_FLOATS: usize = AudioRecord::FLOATS;

/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = GameEvent::FLOATS;

/// Buffer layout computed from the per-frame capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum draw ops per frame.
    pub max_draw_ops: usize,
    /// Maximum audio commands per frame.
    pub max_sounds: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    pub draw_data_floats: usize,
    pub sound_data_floats: usize,
    pub event_data_floats: usize,

    /// Offset (in floats) where draw ops begin.
    pub draw_data_offset: usize,
    /// Offset (in floats) where audio commands begin.
    pub sound_data_offset: usize,
    /// Offset (in floats) where game events begin.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    pub fn new(max_draw_ops: usize, max_sounds: usize, max_events: usize) -> Self {
        let draw_data_floats = max_draw_ops * DRAW_OP_FLOATS;
        let sound_data_floats = max_sounds * AUDIO_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let draw_data_offset = HEADER_FLOATS;
        let sound_data_offset = draw_data_offset + draw_data_floats;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_draw_ops,
            max_sounds,
            max_events,
            draw_data_floats,
            sound_data_floats,
            event_data_floats,
            draw_data_offset,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_draw_ops, config.max_sounds, config.max_events)
    }

    /// Fill the static header fields: capacities, world size, version.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], config: &GameConfig) {
        header[HEADER_MAX_DRAW_OPS] = self.max_draw_ops as f32;
        header[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_WORLD_WIDTH] = config.world_width;
        header[HEADER_WORLD_HEIGHT] = config.world_height;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
    }
}
