pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, key handlers, session
///   controls, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use pollo_core::*;
///
/// pollo_web::export_game!(World, "pollo-loco");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game type that implements `pollo_core::Game`
/// - `$game_name`: A string literal used in log messages
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        /// Run `f` on the runner. `None` before a successful `game_init`.
        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: not initialized, call game_init() first", $game_name);
                        None
                    }
                }
            })
        }

        /// Build the session. `config_json` may be empty for the defaults.
        /// Returns false when the config or the asset data is rejected.
        #[wasm_bindgen]
        pub fn game_init(config_json: &str) -> bool {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config = if config_json.trim().is_empty() {
                Ok(GameConfig::default())
            } else {
                GameConfig::from_json(config_json)
            };
            let runner = config.and_then($crate::GameRunner::<$game_type>::create);
            match runner {
                Ok(runner) => {
                    RUNNER.with(|cell| {
                        *cell.borrow_mut() = Some(runner);
                    });
                    log::info!("{}: initialized", $game_name);
                    true
                }
                Err(err) => {
                    log::error!("{}: init failed: {}", $game_name, err);
                    false
                }
            }
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        #[wasm_bindgen]
        pub fn game_key_down(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_key_up(key_code: u32) {
            with_runner(|r| r.push_input(InputEvent::KeyUp { key_code }));
        }

        #[wasm_bindgen]
        pub fn game_pause() {
            with_runner(|r| r.pause());
        }

        #[wasm_bindgen]
        pub fn game_resume() {
            with_runner(|r| r.resume());
        }

        #[wasm_bindgen]
        pub fn game_reset() {
            with_runner(|r| r.reset());
        }

        #[wasm_bindgen]
        pub fn game_toggle_mute() {
            with_runner(|r| r.toggle_mute());
        }

        #[wasm_bindgen]
        pub fn game_is_muted() -> bool {
            with_runner(|r| r.is_muted()).unwrap_or(false)
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_header_ptr() -> *const f32 {
            with_runner(|r| r.header_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_draw_ops_ptr() -> *const f32 {
            with_runner(|r| r.draw_ops_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_draw_op_count() -> u32 {
            with_runner(|r| r.draw_op_count()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_audio_ptr() -> *const f32 {
            with_runner(|r| r.audio_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_audio_len() -> u32 {
            with_runner(|r| r.audio_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr()).unwrap_or(std::ptr::null())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_world_width() -> f32 {
            with_runner(|r| r.world_width()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_world_height() -> f32 {
            with_runner(|r| r.world_height()).unwrap_or(0.0)
        }

        #[wasm_bindgen]
        pub fn get_frame_paths_json() -> String {
            with_runner(|r| r.frame_paths_json()).unwrap_or_else(|| String::from("[]"))
        }

        /// Sound ids, names, paths and volumes. Available before `game_init`.
        #[wasm_bindgen]
        pub fn get_sound_table_json() -> String {
            sound_table_json()
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_draw_ops() -> u32 {
            with_runner(|r| r.max_draw_ops()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn get_buffer_total_floats() -> u32 {
            with_runner(|r| r.buffer_total_floats()).unwrap_or(0)
        }
    };
}
