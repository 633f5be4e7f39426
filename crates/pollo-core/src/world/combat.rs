//! Collision resolution and pickups, run by the world's two loops.
//!
//! The contact loop (every frame) only settles character/roamer touches.
//! The logic loop (every 100 ms) does everything else: boss activation,
//! touches with the looser stomp rule, pickups, bottle hits, pruning and
//! throwing.

use crate::api::types::{event_kinds, GameEvent};
use crate::audio::sink::AudioSink;
use crate::audio::sound::Sound;
use crate::components::entity::Renderable;
use crate::components::vitals::Damageable;
use crate::core::collision::{is_colliding, is_falling_onto, is_jumping_on};
use crate::core::time::Millis;
use crate::entities::character::Character;
use crate::entities::roamer::Roamer;
use crate::entities::status_bar::StatusBar;
use crate::entities::throwable::{ThrowDirection, ThrowableObject};
use crate::world::level::Enemy;
use crate::world::world::World;

/// Which stomp test decides a character/roamer touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StompRule {
    /// Feet within the stomp tolerance of the roamer's collision box top.
    Tolerance,
    /// Feet in the upper half of the roamer's drawn quad.
    UpperHalf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Touch {
    Stomped,
    Hurt,
}

/// Settle one character/roamer touch. `None` when they do not touch.
fn touch_roamer(
    character: &mut Character,
    roamer: &mut Roamer,
    rule: StompRule,
    now: Millis,
    audio: &mut dyn AudioSink,
) -> Option<Touch> {
    if roamer.is_dead() || roamer.remove_from_world() || !is_colliding(&*character, &*roamer) {
        return None;
    }
    let stomp = match rule {
        StompRule::Tolerance => is_jumping_on(&*character, &*roamer),
        StompRule::UpperHalf => is_falling_onto(&*character, &*roamer),
    };
    if stomp {
        roamer.die(now, audio);
        character.bounce();
        Some(Touch::Stomped)
    } else {
        character.hit(now);
        Some(Touch::Hurt)
    }
}

/// Fill a count-up bar for `count` of `capacity` pickups.
fn fill_bar(bar: &mut StatusBar, count: u32, capacity: u32) {
    let percentage = count as f32 / capacity as f32 * 100.0;
    bar.set_percentage(percentage.min(100.0));
}

impl<A: AudioSink> World<A> {
    pub(crate) fn contact_tick(&mut self) {
        self.touch_roamers(StompRule::Tolerance);
    }

    pub(crate) fn logic_tick(&mut self) {
        self.check_boss_trigger();
        self.check_collisions();
        self.level.prune();
        self.check_throw();
        self.throwables.retain(|bottle| !bottle.remove_from_world());
        self.collect_landed_bottles();
        self.level.spin_coins();
    }

    fn check_boss_trigger(&mut self) {
        if self.character.x() <= self.config.boss_trigger_x {
            return;
        }
        let now = self.now;
        let Some(boss) = self.level.boss_mut() else {
            return;
        };
        if boss.start_battle(now) {
            let x = boss.sprite().pos.x;
            self.events
                .push(GameEvent::new(event_kinds::BATTLE_STARTED).with_a(x));
            log::info!("boss battle started at t={now:.0}");
        }
        let energy = boss.energy();
        self.level.boss_bar.set_percentage(energy as f32);
    }

    fn check_collisions(&mut self) {
        self.touch_roamers(StompRule::UpperHalf);
        self.check_boss_contact();
        self.collect_coins();
        self.collect_ground_bottles();
        self.check_bottle_hits();
    }

    fn touch_roamers(&mut self, rule: StompRule) {
        let now = self.now;
        let mut hurt = false;
        let roamers = self
            .level
            .enemies
            .iter_mut()
            .filter_map(Enemy::as_roamer_mut)
            .chain(self.level.little_enemies.iter_mut());
        for roamer in roamers {
            let touch = touch_roamer(&mut self.character, roamer, rule, now, &mut self.audio);
            hurt |= touch == Some(Touch::Hurt);
        }
        if hurt {
            let energy = self.character.energy();
            self.level.health_bar.set_percentage(energy as f32);
        }
    }

    /// An activated boss touching the character attacks it.
    fn check_boss_contact(&mut self) {
        let now = self.now;
        let Some(boss) = self.level.boss_mut() else {
            return;
        };
        if !boss.is_active() || !is_colliding(&self.character, &*boss) {
            return;
        }
        boss.collide_attack(now);
        if self.character.hit(now) {
            let energy = self.character.energy();
            self.level.health_bar.set_percentage(energy as f32);
        }
    }

    fn collect_coins(&mut self) {
        let before = self.coin_count;
        let character = &self.character;
        let count = &mut self.coin_count;
        self.level.coins.retain(|coin| {
            let touched = is_colliding(character, coin);
            if touched {
                *count += 1;
            }
            !touched
        });
        if self.coin_count > before {
            fill_bar(&mut self.level.coin_bar, self.coin_count, self.config.bar_capacity);
            self.audio.play_original(Sound::CoinCollected, false);
            log::debug!("coins: {}", self.coin_count);
        }
    }

    fn collect_ground_bottles(&mut self) {
        let before = self.bottle_count;
        let character = &self.character;
        let count = &mut self.bottle_count;
        self.level.bottles.retain(|bottle| {
            let touched = is_colliding(character, bottle);
            if touched {
                *count += 1;
            }
            !touched
        });
        if self.bottle_count > before {
            self.bottles_changed();
            self.audio.play_original(Sound::BottleCollect, false);
            log::debug!("bottles: {}", self.bottle_count);
        }
    }

    /// Thrown bottles that came to rest can be picked up like ground bottles.
    fn collect_landed_bottles(&mut self) {
        let before = self.bottle_count;
        let character = &self.character;
        let count = &mut self.bottle_count;
        self.throwables.retain(|bottle| {
            let touched = bottle.is_collectable() && is_colliding(character, bottle);
            if touched {
                *count += 1;
            }
            !touched
        });
        if self.bottle_count > before {
            self.bottles_changed();
            self.audio.play_original(Sound::BottleCollect, false);
        }
    }

    fn bottles_changed(&mut self) {
        fill_bar(&mut self.level.bottle_bar, self.bottle_count, self.config.bar_capacity);
    }

    /// Each flying bottle bursts on the first thing it hits: a chicken, a
    /// little chicken, or the boss.
    fn check_bottle_hits(&mut self) {
        let now = self.now;
        for bottle in &mut self.throwables {
            if bottle.is_splashed() || bottle.is_on_ground() {
                continue;
            }
            let roamers = self
                .level
                .enemies
                .iter_mut()
                .filter_map(Enemy::as_roamer_mut)
                .chain(self.level.little_enemies.iter_mut());
            let mut burst = false;
            for roamer in roamers {
                if !roamer.is_dead() && is_colliding(&*bottle, &*roamer) {
                    roamer.die(now, &mut self.audio);
                    bottle.splash(now, &mut self.audio);
                    burst = true;
                    break;
                }
            }
            if burst {
                continue;
            }
            if let Some(boss) = self.level.boss_mut() {
                if !boss.is_dead() && is_colliding(&*bottle, &*boss) {
                    boss.hit(now, &mut self.audio);
                    bottle.splash(now, &mut self.audio);
                    let energy = boss.energy();
                    self.level.boss_bar.set_percentage(energy as f32);
                }
            }
        }
    }

    /// Throw a bottle while D is held, one per cooldown.
    fn check_throw(&mut self) {
        if !self.keyboard.d || self.bottle_count == 0 {
            return;
        }
        let now = self.now;
        if let Some(last) = self.last_bottle_throw {
            if now - last <= self.config.throw_cooldown_ms {
                return;
            }
        }
        self.last_bottle_throw = Some(now);
        let sprite = self.character.sprite();
        let direction = ThrowDirection::facing(sprite.other_direction);
        let bottle = ThrowableObject::throw(self.library.bottle.clone(), sprite.pos, direction, now);
        self.throwables.push(bottle);
        self.bottle_count -= 1;
        self.bottles_changed();
        self.audio.play_original(Sound::BottleThrow, false);
        log::debug!("bottle thrown {direction:?}, {} left", self.bottle_count);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::api::types::event_kinds;
    use crate::audio::bus::AudioCommand;
    use crate::audio::sound::Sound;
    use crate::components::entity::Renderable;
    use crate::components::vitals::Damageable;
    use crate::core::physics::{Physical, GROUND_Y};
    use crate::entities::collectible::Coin;
    use crate::entities::roamer::{Roamer, RoamerKind};
    use crate::entities::throwable::{ThrowDirection, ThrowableObject};
    use crate::input::keyboard::key_codes;
    use crate::input::queue::{InputEvent, InputQueue};
    use crate::world::level::Enemy;
    use crate::world::world::{test_world, World};

    /// A world with nothing in it but the character and the boss.
    fn quiet_world() -> World {
        let mut w = test_world();
        w.level.enemies.retain(|enemy| matches!(enemy, Enemy::Boss(_)));
        w.level.little_enemies.clear();
        w.level.coins.clear();
        w.level.bottles.clear();
        w
    }

    fn run_until(w: &mut World, t: f64) {
        while w.now() < t {
            let step = (t - w.now()).min(250.0);
            w.advance(step);
        }
    }

    fn press(w: &mut World, key_code: u32) {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyDown { key_code });
        w.apply_input(&queue);
    }

    fn release(w: &mut World, key_code: u32) {
        let mut queue = InputQueue::new();
        queue.push(InputEvent::KeyUp { key_code });
        w.apply_input(&queue);
    }

    fn count_played(w: &World, sound: Sound) -> usize {
        w.audio()
            .commands()
            .iter()
            .filter(|c| matches!(c, AudioCommand::PlayOriginal { sound: s, .. } if *s == sound))
            .count()
    }

    fn parked_chicken(w: &World, x: f32) -> Enemy {
        Enemy::Roamer(Roamer::at(RoamerKind::Chicken, w.library.chicken.clone(), x, 0.0))
    }

    fn first_roamer(w: &World) -> &Roamer {
        match w.level.enemies.first() {
            Some(Enemy::Roamer(roamer)) => roamer,
            _ => panic!("roamer expected first"),
        }
    }

    #[test]
    fn standing_in_a_chicken_drains_health_to_game_over() {
        let mut w = quiet_world();
        run_until(&mut w, 1000.0);
        assert_eq!(w.character().sprite().pos.y, GROUND_Y);
        let chicken = parked_chicken(&w, 150.0);
        w.level.enemies.insert(0, chicken);

        // One hit per grace window.
        run_until(&mut w, 1500.0);
        assert_eq!(w.character().energy(), 80);
        assert_eq!(w.level.health_bar.percentage(), 80.0);
        run_until(&mut w, 2600.0);
        assert_eq!(w.character().energy(), 60);
        run_until(&mut w, 3600.0);
        assert_eq!(w.character().energy(), 40);
        run_until(&mut w, 4600.0);
        assert_eq!(w.character().energy(), 20);
        run_until(&mut w, 5600.0);
        assert!(w.character().is_dead());
        assert!(!first_roamer(&w).is_dead());

        run_until(&mut w, 6000.0);
        assert!(w.is_game_over());
        assert!(w.is_paused());
        assert_eq!(count_played(&w, Sound::GameOver), 1);
        assert!(w.events().iter().any(|e| e.kind == event_kinds::GAME_OVER));
        w.resume();
        assert!(w.is_paused());
    }

    #[test]
    fn landing_on_a_chicken_kills_it() {
        let mut w = quiet_world();
        run_until(&mut w, 1000.0);
        // Feet just inside the chicken's box, falling.
        w.character.sprite_mut().pos.y = 50.0;
        w.character.motion_mut().speed_y = -5.0;
        let chicken = parked_chicken(&w, 150.0);
        w.level.enemies.insert(0, chicken);

        w.advance(20.0);
        assert!(first_roamer(&w).is_dead());
        assert_eq!(w.character().energy(), 100);
        assert!(w.character().motion().speed_y > 0.0);
    }

    #[test]
    fn boss_wakes_once_and_dies_to_five_hits() {
        let mut w = quiet_world();
        run_until(&mut w, 250.0);
        w.character.sprite_mut().pos.x = 4001.0;
        run_until(&mut w, 450.0);
        let started = w
            .events()
            .iter()
            .filter(|e| e.kind == event_kinds::BATTLE_STARTED)
            .count();
        assert_eq!(started, 1);
        assert!(w.level.boss().is_some_and(|b| b.is_active()));
        assert!(w.level.visible_boss_bar().is_some());

        let now = w.now();
        for i in 0..4 {
            let boss = w.level.boss_mut().expect("boss present");
            boss.hit(now + i as f64, &mut w.audio);
        }
        assert_eq!(w.level.boss().map(|b| b.energy()), Some(20));
        let boss = w.level.boss_mut().expect("boss present");
        boss.hit(now + 10.0, &mut w.audio);
        assert!(w.level.boss().is_some_and(|b| b.is_dead()));
        assert!(!w.is_game_won());

        run_until(&mut w, now + 2500.0);
        assert!(w.is_game_won());
        assert!(!w.is_game_over());
        assert_eq!(count_played(&w, Sound::GameWon), 1);
        assert!(w.events().iter().any(|e| e.kind == event_kinds::GAME_WON));
    }

    #[test]
    fn active_boss_blocks_the_character() {
        let mut w = quiet_world();
        assert_eq!(w.max_x(), 4200.0);
        let boss = w.level.boss_mut().expect("boss present");
        boss.sprite_mut().pos.x = 3000.0;
        assert_eq!(w.max_x(), 4200.0);
        let boss = w.level.boss_mut().expect("boss present");
        boss.start_battle(0.0);
        assert_eq!(w.max_x(), 3000.0 + 125.0 - 50.0);
    }

    #[test]
    fn throwing_needs_bottles_and_respects_the_cooldown() {
        let mut w = quiet_world();
        run_until(&mut w, 500.0);
        press(&mut w, key_codes::D);
        run_until(&mut w, 700.0);
        assert!(w.throwables().is_empty());
        assert_eq!(count_played(&w, Sound::BottleThrow), 0);

        w.bottle_count = 3;
        run_until(&mut w, 800.0);
        assert_eq!(w.throwables().len(), 1);
        assert_eq!(w.bottle_count(), 2);
        assert_eq!(w.level.bottle_bar.percentage(), 40.0);
        assert_eq!(count_played(&w, Sound::BottleThrow), 1);

        // Still held, but within the cooldown.
        run_until(&mut w, 1300.0);
        assert_eq!(w.bottle_count(), 2);
    }

    #[test]
    fn thrown_bottle_kills_a_chicken_in_its_path() {
        let mut w = quiet_world();
        run_until(&mut w, 1000.0);
        let chicken = parked_chicken(&w, 600.0);
        w.level.enemies.insert(0, chicken);
        w.bottle_count = 1;
        press(&mut w, key_codes::D);

        // Thrown on the next logic tick, it comes down on the chicken ~900 ms later.
        run_until(&mut w, 2250.0);
        assert_eq!(w.bottle_count(), 0);
        assert!(first_roamer(&w).is_dead());
        assert_eq!(w.throwables().len(), 1);
        assert!(w.throwables()[0].is_splashed());
        assert_eq!(count_played(&w, Sound::BottleSplash), 1);

        // The splash is cleared half a second later.
        run_until(&mut w, 2700.0);
        assert!(w.throwables().is_empty());
    }

    #[test]
    fn landed_bottle_can_be_picked_up_again() {
        let mut w = quiet_world();
        run_until(&mut w, 1000.0);
        w.bottle_count = 1;
        press(&mut w, key_codes::D);
        run_until(&mut w, 2250.0);
        release(&mut w, key_codes::D);
        assert_eq!(w.bottle_count(), 0);
        assert_eq!(w.level.bottle_bar.percentage(), 0.0);
        assert_eq!(w.throwables().len(), 1);
        assert!(w.throwables()[0].is_collectable());

        // Out of reach, it stays on the ground.
        run_until(&mut w, 2500.0);
        assert_eq!(w.throwables().len(), 1);

        let x = w.throwables()[0].sprite().pos.x;
        w.character.sprite_mut().pos.x = x - 20.0;
        run_until(&mut w, 2700.0);
        assert!(w.throwables().is_empty());
        assert_eq!(w.bottle_count(), 1);
        assert_eq!(w.level.bottle_bar.percentage(), 20.0);
        assert_eq!(count_played(&w, Sound::BottleCollect), 1);

        // Picked up, not thrown again.
        run_until(&mut w, 3500.0);
        assert_eq!(w.bottle_count(), 1);
        assert_eq!(count_played(&w, Sound::BottleThrow), 1);
    }

    #[test]
    fn five_bottles_beat_the_boss() {
        let mut w = quiet_world();
        run_until(&mut w, 250.0);
        w.character.sprite_mut().pos.x = 4001.0;
        run_until(&mut w, 450.0);
        assert!(w.level.boss().is_some_and(|b| b.is_active()));
        // Out of the boss's reach for the rest of the fight.
        w.character.sprite_mut().pos.x = 3000.0;

        for i in 1..=5 {
            let boss_x = w.level.boss().map(|b| b.sprite().pos.x).expect("boss present");
            let origin = Vec2::new(boss_x - 50.0, GROUND_Y);
            let bottle = ThrowableObject::throw(w.library.bottle.clone(), origin, ThrowDirection::Right, w.now());
            w.throwables.push(bottle);
            let t = w.now() + 100.0;
            run_until(&mut w, t);
            let energy = 100 - 20 * i;
            assert_eq!(w.level.boss().map(|b| b.energy()), Some(energy));
            assert!(w.throwables().last().is_some_and(|b| b.is_splashed()));
            assert_eq!(w.level.boss_bar.percentage(), energy as f32);
        }
        assert!(w.level.boss().is_some_and(|b| b.is_dead()));
        assert_eq!(count_played(&w, Sound::BottleSplash), 5);

        let t = w.now() + 2500.0;
        run_until(&mut w, t);
        assert!(w.is_game_won());
        assert!(!w.is_game_over());
        assert_eq!(count_played(&w, Sound::GameWon), 1);
    }

    #[test]
    fn coin_is_collected_once() {
        let mut w = quiet_world();
        let coin = Coin::new(&w.library.coin, Vec2::new(150.0, 200.0));
        w.level.coins.push(coin);
        run_until(&mut w, 1000.0);
        assert_eq!(w.coin_count(), 1);
        assert!(w.level.coins.is_empty());
        assert_eq!(w.level.coin_bar.percentage(), 20.0);
        assert_eq!(count_played(&w, Sound::CoinCollected), 1);
        run_until(&mut w, 1500.0);
        assert_eq!(w.coin_count(), 1);
    }

    #[test]
    fn bottle_bar_caps_at_full() {
        let mut w = quiet_world();
        w.bottle_count = 9;
        w.bottles_changed();
        assert_eq!(w.level.bottle_bar.percentage(), 100.0);
    }
}
