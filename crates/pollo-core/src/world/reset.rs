use crate::api::types::{event_kinds, GameEvent};
use crate::audio::sink::AudioSink;
use crate::components::vitals::Damageable;
use crate::entities::character::Character;
use crate::entities::Actor;
use crate::world::levels::level_one;
use crate::world::world::World;

impl<A: AudioSink> World<A> {
    /// Throw the session away and start level one again from the current
    /// clock. Works from any state, end screens included.
    pub fn reset(&mut self) {
        let now = self.now;
        self.audio.stop_all_sounds();
        self.logic_loop = None;
        self.contact_loop = None;
        self.level.cleanup(&mut self.audio);
        for bottle in &mut self.throwables {
            bottle.cleanup(&mut self.audio);
        }
        self.character.cleanup();
        self.audio.clear_restart_flag();

        self.level = level_one(&self.library, &mut self.rng, now, &mut self.audio);
        self.character = Character::new(self.library.character.clone(), now);
        self.character.reset(&mut self.audio);
        self.camera.reset();

        self.throwables.clear();
        self.coin_count = 0;
        self.bottle_count = 0;
        self.last_bottle_throw = None;
        self.dead_since = None;
        self.game_over = false;
        self.game_won = false;
        self.paused = false;
        self.game_over_sound_played = false;
        self.game_won_sound_played = false;

        let health = self.character.energy() as f32;
        let boss = self.level.boss().map_or(0.0, |boss| boss.energy() as f32);
        self.level.health_bar.set_percentage(health);
        self.level.bottle_bar.set_percentage(0.0);
        self.level.coin_bar.set_percentage(0.0);
        self.level.boss_bar.set_percentage(boss);

        self.start_loops();
        self.events.push(GameEvent::new(event_kinds::RESET));
        log::info!("world reset at t={now:.0}");
    }
}

#[cfg(test)]
mod tests {
    use crate::api::types::event_kinds;
    use crate::components::entity::Renderable;
    use crate::components::vitals::Damageable;
    use crate::entities::character::START_POS;
    use crate::world::world::test_world;

    #[test]
    fn reset_after_game_over_starts_fresh() {
        let mut w = test_world();
        w.advance(200.0);
        w.coin_count = 3;
        w.bottle_count = 2;
        w.level.coins.clear();
        w.game_over = true;
        w.halt();
        assert!(w.is_paused());

        w.reset();
        assert!(!w.is_paused());
        assert!(!w.is_game_over());
        assert_eq!(w.coin_count(), 0);
        assert_eq!(w.bottle_count(), 0);
        assert_eq!(w.level().coins.len(), 5);
        assert_eq!(w.character().sprite().pos, START_POS);
        assert_eq!(w.character().energy(), 100);
        assert_eq!(w.level().health_bar.percentage(), 100.0);
        assert_eq!(w.level().boss_bar.percentage(), 100.0);
        assert_eq!(w.camera().offset_x, 0.0);
        assert!(!w.audio().is_restarting());
        assert_eq!(w.events().last().map(|e| e.kind), Some(event_kinds::RESET));
    }

    #[test]
    fn reset_world_keeps_running() {
        let mut w = test_world();
        w.advance(250.0);
        w.reset();
        let xs: Vec<f32> = w.level().little_enemies.iter().map(|r| r.sprite().pos.x).collect();
        w.advance(250.0);
        let moved: Vec<f32> = w.level().little_enemies.iter().map(|r| r.sprite().pos.x).collect();
        assert_ne!(xs, moved);
        // Only the new level's run loops are live.
        assert_eq!(w.audio().live_clones().len(), 8);
    }
}
