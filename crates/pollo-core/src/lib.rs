pub mod api;
pub mod assets;
pub mod audio;
pub mod bridge;
pub mod components;
pub mod core;
pub mod entities;
pub mod error;
pub mod input;
pub mod renderer;
pub mod systems;
pub mod world;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig};
pub use api::types::{event_kinds, GameEvent};
pub use assets::manifest::AssetManifest;
pub use assets::registry::{FrameCatalog, FrameId};
pub use audio::bus::{AudioBus, AudioCommand, AudioRecord};
pub use audio::sink::{AudioSink, CloneHandle};
pub use audio::sound::{sound_table_json, Sound};
pub use bridge::protocol::ProtocolLayout;
pub use components::layer::RenderLayer;
pub use core::time::{Millis, FRAME_MS};
pub use error::ConfigError;
pub use input::keyboard::{key_codes, Keyboard};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::camera::ScrollCamera;
pub use renderer::draw_list::{DrawCommand, DrawList, DrawOp};
pub use renderer::surface::RenderSurface;
pub use world::World;
