use crate::api::game::{Game, GameConfig};
use crate::api::types::{event_kinds, GameEvent};
use crate::assets::library::ClipLibrary;
use crate::assets::manifest::AssetManifest;
use crate::assets::registry::FrameCatalog;
use crate::audio::bus::{AudioBus, AudioRecord};
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::entity::Renderable;
use crate::components::layer::RenderLayer;
use crate::components::vitals::Damageable;
use crate::core::rng::Rng;
use crate::core::time::{due_of, earliest, poll, Millis, Repeater};
use crate::entities::character::{Character, CharacterInput, CharacterState};
use crate::entities::decor::EndScreen;
use crate::entities::throwable::ThrowableObject;
use crate::entities::Actor;
use crate::error::ConfigError;
use crate::input::keyboard::Keyboard;
use crate::input::queue::InputQueue;
use crate::renderer::camera::ScrollCamera;
use crate::renderer::surface::RenderSurface;
use crate::systems::render::{add_objects_to_map, add_to_map};
use crate::world::level::Level;
use crate::world::levels::level_one;

/// Timer firings handled in one `advance` call; the rest wait for the next call.
const MAX_FIRINGS_PER_ADVANCE: usize = 10_000;

/// One game session: the character, the level, thrown bottles, counters and
/// the two world loops, all driven by one virtual clock.
///
/// `advance` moves the clock from deadline to deadline. At each deadline the
/// due timers fire in a fixed order: character, level, thrown bottles, the
/// contact loop, then the logic loop. End states are checked after every
/// deadline.
pub struct World<A: AudioSink = AudioBus> {
    pub(crate) config: GameConfig,
    pub(crate) catalog: FrameCatalog,
    pub(crate) library: ClipLibrary,
    pub(crate) audio: A,
    pub(crate) keyboard: Keyboard,
    pub(crate) rng: Rng,
    pub(crate) now: Millis,
    pub(crate) character: Character,
    pub(crate) level: Level,
    pub(crate) throwables: Vec<ThrowableObject>,
    pub(crate) camera: ScrollCamera,
    game_over_screen: EndScreen,
    game_won_screen: EndScreen,
    pub(crate) coin_count: u32,
    pub(crate) bottle_count: u32,
    pub(crate) last_bottle_throw: Option<Millis>,
    pub(crate) dead_since: Option<Millis>,
    pub(crate) game_over: bool,
    pub(crate) game_won: bool,
    pub(crate) paused: bool,
    pub(crate) game_over_sound_played: bool,
    pub(crate) game_won_sound_played: bool,
    pub(crate) logic_loop: Option<Repeater>,
    pub(crate) contact_loop: Option<Repeater>,
    pub(crate) events: Vec<GameEvent>,
}

impl<A: AudioSink> World<A> {
    /// Build a session from the shipped asset manifest.
    pub fn new(config: GameConfig, audio: A) -> Result<Self, ConfigError> {
        Self::with_manifest(config, AssetManifest::builtin()?, audio)
    }

    pub fn with_manifest(
        config: GameConfig,
        manifest: AssetManifest,
        mut audio: A,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let catalog = FrameCatalog::from_manifest(manifest);
        let library = ClipLibrary::load(&catalog)?;
        let mut rng = Rng::new(config.seed);
        let now = 0.0;
        let character = Character::new(library.character.clone(), now);
        let level = level_one(&library, &mut rng, now, &mut audio);
        let camera = ScrollCamera::new(config.world_width, config.camera_lead);
        let game_over_screen = EndScreen::new(&library.game_over);
        let game_won_screen = EndScreen::new(&library.game_won);

        let mut world = Self {
            config,
            catalog,
            library,
            audio,
            keyboard: Keyboard::default(),
            rng,
            now,
            character,
            level,
            throwables: Vec::new(),
            camera,
            game_over_screen,
            game_won_screen,
            coin_count: 0,
            bottle_count: 0,
            last_bottle_throw: None,
            dead_since: None,
            game_over: false,
            game_won: false,
            paused: false,
            game_over_sound_played: false,
            game_won_sound_played: false,
            logic_loop: None,
            contact_loop: None,
            events: Vec::new(),
        };
        world.start_loops();
        log::info!(
            "world ready: {} frames, seed {}",
            world.catalog.paths().len(),
            world.config.seed
        );
        Ok(world)
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn catalog(&self) -> &FrameCatalog {
        &self.catalog
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut A {
        &mut self.audio
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn throwables(&self) -> &[ThrowableObject] {
        &self.throwables
    }

    pub fn camera(&self) -> &ScrollCamera {
        &self.camera
    }

    pub fn coin_count(&self) -> u32 {
        self.coin_count
    }

    pub fn bottle_count(&self) -> u32 {
        self.bottle_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_game_won(&self) -> bool {
        self.game_won
    }

    /// Events raised since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Feed pending key events into the keyboard state.
    pub fn apply_input(&mut self, input: &InputQueue) {
        for event in input.iter() {
            self.keyboard.apply(event);
        }
    }

    /// Rightmost x the character may walk to: the level end, or the middle
    /// of an activated boss.
    pub fn max_x(&self) -> f32 {
        let mut max_x = self.level.level_end_x;
        if let Some(boss) = self.level.boss().filter(|boss| boss.is_active()) {
            let boss_sprite = boss.sprite();
            let limit = boss_sprite.pos.x + boss_sprite.size.x / 2.0
                - self.character.sprite().size.x / 2.0;
            max_x = max_x.min(limit);
        }
        max_x
    }

    /// Simulate `dt` milliseconds. Frames longer than the configured maximum
    /// are clipped so a backgrounded tab does not replay minutes of play.
    pub fn advance(&mut self, dt: Millis) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_ms)
        } else {
            0.0
        };
        let target = self.now + dt;
        if self.paused {
            self.now = target;
            return;
        }
        let mut fired = 0;
        while let Some(due) = self.next_deadline().filter(|&due| due <= target) {
            if fired == MAX_FIRINGS_PER_ADVANCE {
                log::warn!("dropping timers after {fired} firings at t={:.0}", self.now);
                break;
            }
            fired += 1;
            self.now = due.max(self.now);
            self.run_due();
            self.check_end_state();
            if self.paused {
                break;
            }
        }
        self.now = target;
        self.level.sync_boss_bar();
    }

    fn next_deadline(&self) -> Option<Millis> {
        earliest(
            [
                self.character.next_deadline(),
                self.level.next_deadline(),
                due_of(&self.contact_loop),
                due_of(&self.logic_loop),
            ]
            .into_iter()
            .chain(self.throwables.iter().map(|bottle| bottle.next_deadline())),
        )
    }

    fn run_due(&mut self) {
        let now = self.now;
        let input = CharacterInput {
            keyboard: &self.keyboard,
            max_x: self.max_x(),
        };
        self.character.run_due(now, input, &mut self.audio);
        if self.character.state() == CharacterState::Dead {
            if let Some(boss) = self.level.boss_mut() {
                boss.stop_loop_sound(&mut self.audio);
            }
        }
        self.camera.follow(self.character.x());

        self.level.run_due(now, &mut self.audio);
        for bottle in &mut self.throwables {
            bottle.run_due(now, &mut self.audio);
        }
        if poll(&mut self.contact_loop, now) {
            self.contact_tick();
        }
        if poll(&mut self.logic_loop, now) {
            self.logic_tick();
        }
    }

    pub(crate) fn start_loops(&mut self) {
        if self.logic_loop.is_none() {
            self.logic_loop = Some(Repeater::start(self.now, self.config.logic_interval_ms));
        }
        if self.contact_loop.is_none() {
            self.contact_loop = Some(Repeater::start(self.now, self.config.contact_interval_ms));
        }
    }

    fn check_end_state(&mut self) {
        if self.game_over || self.game_won {
            return;
        }
        if self.character.is_dead() {
            let since = *self.dead_since.get_or_insert(self.now);
            if self.now - since > self.config.death_linger_ms {
                self.show_game_over();
            }
            return;
        }
        if self.level.boss_defeated() {
            self.show_game_won();
        }
    }

    fn show_game_over(&mut self) {
        self.game_over = true;
        self.halt();
        if !self.game_over_sound_played {
            self.audio.clear_restart_flag();
            self.audio.play_original(Sound::GameOver, false);
            self.game_over_sound_played = true;
        }
        self.events
            .push(GameEvent::new(event_kinds::GAME_OVER).with_a(self.coin_count as f32));
        log::info!("game over at t={:.0}", self.now);
    }

    fn show_game_won(&mut self) {
        self.game_won = true;
        self.halt();
        if !self.game_won_sound_played {
            self.audio.clear_restart_flag();
            self.audio.play_original(Sound::GameWon, false);
            self.game_won_sound_played = true;
        }
        self.events
            .push(GameEvent::new(event_kinds::GAME_WON).with_a(self.coin_count as f32));
        log::info!("game won at t={:.0} with {} coins", self.now, self.coin_count);
    }

    /// Cancel both loops and every entity timer, and silence everything.
    pub(crate) fn halt(&mut self) {
        if self.paused {
            return;
        }
        self.paused = true;
        self.logic_loop = None;
        self.contact_loop = None;
        self.character.cleanup();
        self.character.reset(&mut self.audio);
        self.level.cleanup(&mut self.audio);
        for bottle in &mut self.throwables {
            bottle.cleanup(&mut self.audio);
        }
        self.audio.stop_all_sounds();
    }

    pub fn pause(&mut self) {
        if self.paused {
            return;
        }
        self.halt();
        self.events.push(GameEvent::new(event_kinds::PAUSED));
        log::info!("paused at t={:.0}", self.now);
    }

    /// Re-arm everything `pause` cancelled. Ignored once an end screen is up.
    pub fn resume(&mut self) {
        if !self.paused || self.game_over || self.game_won {
            return;
        }
        self.paused = false;
        let now = self.now;
        self.audio.clear_restart_flag();
        self.start_loops();
        self.character.apply_gravity(now);
        self.character.animate(now);
        self.level.animate(now, &mut self.audio);
        for bottle in &mut self.throwables {
            bottle.animate(now, &mut self.audio);
        }
        self.events.push(GameEvent::new(event_kinds::RESUMED));
        log::info!("resumed at t={now:.0}");
    }

    pub fn toggle_mute(&mut self) {
        self.audio.toggle_mute();
    }

    pub fn is_muted(&self) -> bool {
        self.audio.is_muted()
    }

    fn end_screen(&self) -> Option<&EndScreen> {
        if self.game_over {
            Some(&self.game_over_screen)
        } else if self.game_won {
            Some(&self.game_won_screen)
        } else {
            None
        }
    }

    /// Draw the frame: an end screen if one is up, otherwise the scrolled
    /// world back to front with the HUD on top.
    pub fn render(&self, surface: &mut dyn RenderSurface) {
        let (width, height) = (surface.width(), surface.height());
        surface.clear_rect(0.0, 0.0, width, height);
        if let Some(screen) = self.end_screen() {
            surface.set_transform_identity();
            surface.clear_rect(0.0, 0.0, width, height);
            add_to_map(surface, screen, false);
            return;
        }
        surface.save();
        surface.translate(self.camera.offset_x, 0.0);
        for layer in RenderLayer::ALL {
            if !layer.is_world_space() {
                surface.restore();
            }
            self.draw_layer(surface, layer);
        }
    }

    fn draw_layer(&self, surface: &mut dyn RenderSurface, layer: RenderLayer) {
        let camera = layer.is_culled().then_some(&self.camera);
        let debug = self.config.debug_hitboxes;
        let level = &self.level;
        match layer {
            RenderLayer::Background => add_objects_to_map(surface, &level.background, camera, debug),
            RenderLayer::Clouds => add_objects_to_map(surface, &level.clouds, camera, debug),
            RenderLayer::Pickups => {
                add_objects_to_map(surface, &level.coins, camera, debug);
                add_objects_to_map(surface, &level.bottles, camera, debug);
            }
            RenderLayer::Character => add_to_map(surface, &self.character, debug),
            RenderLayer::Enemies => {
                add_objects_to_map(surface, &level.enemies, camera, debug);
                add_objects_to_map(surface, &level.little_enemies, camera, debug);
            }
            RenderLayer::Projectiles => add_objects_to_map(surface, &self.throwables, camera, debug),
            RenderLayer::BossBar => {
                if let Some(bar) = level.visible_boss_bar() {
                    add_to_map(surface, bar, false);
                }
            }
            RenderLayer::Hud => {
                for bar in [&level.health_bar, &level.bottle_bar, &level.coin_bar] {
                    add_to_map(surface, bar, false);
                }
            }
        }
    }
}

impl Game for World<AudioBus> {
    fn create(config: GameConfig) -> Result<Self, ConfigError> {
        World::new(config, AudioBus::new())
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn advance(&mut self, dt_ms: Millis, input: &InputQueue) {
        self.apply_input(input);
        World::advance(self, dt_ms);
    }

    fn render(&self, surface: &mut dyn RenderSurface) {
        World::render(self, surface);
    }

    fn pause(&mut self) {
        World::pause(self);
    }

    fn resume(&mut self) {
        World::resume(self);
    }

    fn reset(&mut self) {
        World::reset(self);
    }

    fn toggle_mute(&mut self) {
        World::toggle_mute(self);
    }

    fn is_muted(&self) -> bool {
        World::is_muted(self)
    }

    fn drain_audio(&mut self, out: &mut Vec<AudioRecord>) {
        self.audio.drain_records(out);
    }

    fn drain_events(&mut self, out: &mut Vec<GameEvent>) {
        out.append(&mut self.events);
    }

    fn frame_paths_json(&self) -> String {
        self.catalog.paths_json()
    }
}

/// A session with the default config, for tests across the crate.
#[cfg(test)]
pub(crate) fn test_world() -> World {
    World::new(GameConfig::default(), AudioBus::new()).expect("default world builds")
}
