use pollo_core::bridge::protocol::{
    HEADER_DRAW_OP_COUNT, HEADER_DROPPED_DRAW_OPS, HEADER_EVENT_COUNT, HEADER_FLOATS,
    HEADER_FRAME_COUNTER, HEADER_SOUND_COUNT,
};
use pollo_core::{
    AudioRecord, ConfigError, DrawList, DrawOp, Game, GameConfig, GameEvent, InputEvent,
    InputQueue, ProtocolLayout,
};

/// Generic game runner that wires a [`Game`] to the host.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see [`export_game!`](crate::export_game)),
/// because wasm-bindgen cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    input: InputQueue,
    draw_list: DrawList,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    frame_counter: u32,
    /// Flat draw ops for the host to replay.
    draw_ops: Vec<DrawOp>,
    /// Flat audio commands for the host to apply.
    audio: Vec<AudioRecord>,
    events: Vec<GameEvent>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(config);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(&mut header, config);
        let draw_list = DrawList::new(config.world_width, config.world_height);

        Self {
            draw_ops: Vec::with_capacity(layout.max_draw_ops),
            audio: Vec::with_capacity(layout.max_sounds),
            events: Vec::with_capacity(layout.max_events),
            game,
            input: InputQueue::new(),
            draw_list,
            layout,
            header,
            frame_counter: 0,
        }
    }

    /// Build the game from a config and wrap it.
    pub fn create(config: GameConfig) -> Result<Self, ConfigError> {
        G::create(config).map(Self::new)
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: simulate, draw, and pack the per-frame buffers.
    pub fn tick(&mut self, dt_ms: f32) {
        self.game.advance(f64::from(dt_ms), &self.input);
        self.input.drain();

        self.draw_list.clear();
        self.game.render(&mut self.draw_list);
        let dropped = self
            .draw_list
            .encode_into(&mut self.draw_ops, self.layout.max_draw_ops);
        if dropped > 0 {
            log::warn!("draw buffer full, {dropped} ops dropped");
        }

        self.audio.clear();
        self.game.drain_audio(&mut self.audio);
        if self.audio.len() > self.layout.max_sounds {
            log::warn!(
                "{} audio commands dropped",
                self.audio.len() - self.layout.max_sounds
            );
            self.audio.truncate(self.layout.max_sounds);
        }

        self.events.clear();
        self.game.drain_events(&mut self.events);
        if self.events.len() > self.layout.max_events {
            log::warn!(
                "{} game events dropped",
                self.events.len() - self.layout.max_events
            );
            self.events.truncate(self.layout.max_events);
        }

        self.frame_counter = self.frame_counter.wrapping_add(1);
        self.header[HEADER_FRAME_COUNTER] = self.frame_counter as f32;
        self.header[HEADER_DRAW_OP_COUNT] = self.draw_ops.len() as f32;
        self.header[HEADER_DROPPED_DRAW_OPS] = dropped as f32;
        self.header[HEADER_SOUND_COUNT] = self.audio.len() as f32;
        self.header[HEADER_EVENT_COUNT] = self.events.len() as f32;
    }

    pub fn pause(&mut self) {
        self.game.pause();
    }

    pub fn resume(&mut self) {
        self.game.resume();
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    pub fn toggle_mute(&mut self) {
        self.game.toggle_mute();
    }

    pub fn is_muted(&self) -> bool {
        self.game.is_muted()
    }

    pub fn frame_paths_json(&self) -> String {
        self.game.frame_paths_json()
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn draw_ops_ptr(&self) -> *const f32 {
        self.draw_ops.as_ptr() as *const f32
    }

    pub fn draw_op_count(&self) -> u32 {
        self.draw_ops.len() as u32
    }

    pub fn audio_ptr(&self) -> *const f32 {
        self.audio.as_ptr() as *const f32
    }

    pub fn audio_len(&self) -> u32 {
        self.audio.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.events.len() as u32
    }

    pub fn world_width(&self) -> f32 {
        self.game.config().world_width
    }

    pub fn world_height(&self) -> f32 {
        self.game.config().world_height
    }

    // ---- Capacity accessors ----

    pub fn max_draw_ops(&self) -> u32 {
        self.layout.max_draw_ops as u32
    }

    pub fn max_sounds(&self) -> u32 {
        self.layout.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pollo_core::bridge::protocol::{HEADER_MAX_DRAW_OPS, HEADER_PROTOCOL_VERSION};
    use pollo_core::{event_kinds, key_codes, World};

    fn runner() -> GameRunner<World> {
        GameRunner::create(GameConfig::default()).expect("default world builds")
    }

    #[test]
    fn tick_fills_buffers_and_header() {
        let mut r = runner();
        assert_eq!(r.header[HEADER_MAX_DRAW_OPS], 2048.0);
        assert_eq!(r.header[HEADER_PROTOCOL_VERSION], 1.0);
        r.tick(16.0);
        assert!(r.draw_op_count() > 0);
        assert_eq!(r.header[HEADER_FRAME_COUNTER], 1.0);
        assert_eq!(r.header[HEADER_DRAW_OP_COUNT], r.draw_op_count() as f32);
        // The roamers' run loops started at construction.
        assert!(r.audio_len() > 0);
        r.tick(16.0);
        assert_eq!(r.header[HEADER_FRAME_COUNTER], 2.0);
    }

    #[test]
    fn small_draw_buffer_drops_the_tail() {
        let config = GameConfig {
            max_draw_ops: 8,
            ..GameConfig::default()
        };
        let mut r: GameRunner<World> = GameRunner::create(config).expect("valid config");
        r.tick(16.0);
        assert_eq!(r.draw_op_count(), 8);
        assert!(r.header[HEADER_DROPPED_DRAW_OPS] > 0.0);
    }

    #[test]
    fn input_is_consumed_each_tick() {
        let mut r = runner();
        r.push_input(InputEvent::KeyDown {
            key_code: key_codes::RIGHT,
        });
        for _ in 0..20 {
            r.tick(20.0);
        }
        assert!(r.game().character().x() > 150.0);
        assert!(r.input.is_empty());
    }

    #[test]
    fn pause_event_reaches_the_host() {
        let mut r = runner();
        r.tick(16.0);
        r.pause();
        r.tick(16.0);
        assert_eq!(r.game_events_len(), 1);
        assert_eq!(r.events[0].kind, event_kinds::PAUSED);
        r.tick(16.0);
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn event_overflow_keeps_the_oldest() {
        let config = GameConfig {
            max_events: 1,
            ..GameConfig::default()
        };
        let mut r: GameRunner<World> = GameRunner::create(config).expect("valid config");
        r.pause();
        r.resume();
        r.tick(16.0);
        assert_eq!(r.game_events_len(), 1);
        assert_eq!(r.events[0].kind, event_kinds::PAUSED);
        assert_eq!(r.header[HEADER_EVENT_COUNT], 1.0);
    }
}
