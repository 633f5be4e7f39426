use serde::Deserialize;

use crate::api::types::GameEvent;
use crate::audio::bus::AudioRecord;
use crate::core::time::{Millis, FRAME_MS};
use crate::error::ConfigError;
use crate::input::queue::InputQueue;
use crate::renderer::surface::RenderSurface;

/// Session configuration. Every field has a default, so a host may send
/// only the values it wants to change.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in world units (default: 720).
    pub world_width: f32,
    /// Viewport height in world units (default: 480).
    pub world_height: f32,
    /// Period of the combat/pickup pass (default: 100 ms).
    pub logic_interval_ms: Millis,
    /// Period of the stomp-or-hit contact pass (default: one 60 Hz frame).
    pub contact_interval_ms: Millis,
    /// How long the dead character stays on screen before Game Over.
    pub death_linger_ms: Millis,
    /// Minimum time between two bottle throws.
    pub throw_cooldown_ms: Millis,
    /// Screen x the character is kept at while the camera scrolls.
    pub camera_lead: f32,
    /// Passing this x wakes the end boss.
    pub boss_trigger_x: f32,
    /// Pickups that fill a count-up bar.
    pub bar_capacity: u32,
    /// Seed for enemy, cloud and bottle placement.
    pub seed: u64,
    /// Stroke every collision box.
    pub debug_hitboxes: bool,
    /// Longest host frame simulated in one call; longer gaps are clipped.
    pub max_frame_ms: Millis,
    /// Draw ops packed per frame (default: 2048).
    pub max_draw_ops: usize,
    /// Audio commands packed per frame (default: 64).
    pub max_sounds: usize,
    /// Game events packed per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_width: 720.0,
            world_height: 480.0,
            logic_interval_ms: 100.0,
            contact_interval_ms: FRAME_MS,
            death_linger_ms: 600.0,
            throw_cooldown_ms: 1000.0,
            camera_lead: 100.0,
            boss_trigger_x: 4000.0,
            bar_capacity: 5,
            seed: 42,
            debug_hitboxes: false,
            max_frame_ms: 250.0,
            max_draw_ops: 2048,
            max_sounds: 64,
            max_events: 32,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("world_width", self.world_width as f64),
            ("world_height", self.world_height as f64),
            ("logic_interval_ms", self.logic_interval_ms),
            ("contact_interval_ms", self.contact_interval_ms),
            ("max_frame_ms", self.max_frame_ms),
        ];
        for (field, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must be a positive number, got {value}"),
                });
            }
        }
        let non_negative = [
            ("death_linger_ms", self.death_linger_ms),
            ("throw_cooldown_ms", self.throw_cooldown_ms),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) || !value.is_finite() {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }
        if self.bar_capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "bar_capacity",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// What a host needs from a game session.
pub trait Game: Sized {
    /// Build a session. Fails on invalid config or incomplete asset data.
    fn create(config: GameConfig) -> Result<Self, ConfigError>;

    fn config(&self) -> &GameConfig;

    /// Apply pending input, then simulate `dt_ms` of game time.
    fn advance(&mut self, dt_ms: Millis, input: &InputQueue);

    /// Draw the current state. Read-only.
    fn render(&self, surface: &mut dyn RenderSurface);

    fn pause(&mut self);
    fn resume(&mut self);
    fn reset(&mut self);

    fn toggle_mute(&mut self);
    fn is_muted(&self) -> bool;

    /// Move this frame's audio commands into `out`.
    fn drain_audio(&mut self, out: &mut Vec<AudioRecord>);

    /// Move this frame's game events into `out`.
    fn drain_events(&mut self, out: &mut Vec<GameEvent>);

    /// Image paths indexed by frame id, as a JSON array.
    fn frame_paths_json(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "debug_hitboxes": true }"#)
            .expect("valid config");
        assert_eq!(config.seed, 7);
        assert!(config.debug_hitboxes);
        assert_eq!(config.logic_interval_ms, 100.0);
        assert_eq!(config.world_width, 720.0);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = GameConfig::from_json(r#"{ "logic_interval_ms": 0 }"#);
        assert!(matches!(
            err,
            Err(ConfigError::InvalidValue { field: "logic_interval_ms", .. })
        ));
    }

    #[test]
    fn empty_bar_capacity_is_rejected() {
        let config = GameConfig {
            bar_capacity: 0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(GameConfig::from_json("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }
}
