//! Level builders.

use crate::assets::library::ClipLibrary;
use crate::audio::sink::AudioSink;
use crate::core::rng::Rng;
use crate::core::time::Millis;
use crate::entities::collectible::{Coin, GroundBottle, COIN_POSITIONS};
use crate::entities::decor::{build_background, Cloud, BACKGROUND_SEGMENTS};
use crate::entities::endboss::Endboss;
use crate::entities::roamer::{Roamer, RoamerKind};
use crate::entities::status_bar::{BarKind, StatusBar};
use crate::world::level::{Enemy, Level};

const CHICKENS: usize = 3;
const LITTLE_CHICKENS: usize = 5;
const CLOUDS: usize = 5;
const GROUND_BOTTLES: usize = 7;

/// The one level of the game: three chickens and the boss, five little
/// chickens, five clouds, five coins, seven bottles on the floor.
pub fn level_one(
    library: &ClipLibrary,
    rng: &mut Rng,
    now: Millis,
    audio: &mut dyn AudioSink,
) -> Level {
    let mut enemies: Vec<Enemy> = (0..CHICKENS)
        .map(|_| {
            Enemy::Roamer(Roamer::new(
                RoamerKind::Chicken,
                library.chicken.clone(),
                rng,
                now,
                audio,
            ))
        })
        .collect();
    enemies.push(Enemy::Boss(Endboss::new(library.endboss.clone(), now)));

    let little_enemies = (0..LITTLE_CHICKENS)
        .map(|_| {
            Roamer::new(
                RoamerKind::Little,
                library.little_chicken.clone(),
                rng,
                now,
                audio,
            )
        })
        .collect();

    let clouds = (0..CLOUDS)
        .map(|_| Cloud::new(&library.cloud, rng, now))
        .collect();

    let coins = COIN_POSITIONS
        .iter()
        .map(|&pos| Coin::new(&library.coin, pos))
        .collect();

    let bottles = (0..GROUND_BOTTLES)
        .map(|_| GroundBottle::new(&library.bottle.ground, rng))
        .collect();

    let bars = BarKind::ALL.map(|kind| StatusBar::new(kind, &library.status_bars));

    log::debug!("level one built at t={now:.0}");
    Level::new(
        enemies,
        little_enemies,
        clouds,
        build_background(&library.background, BACKGROUND_SEGMENTS),
        coins,
        bottles,
        bars,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::library::test_library;
    use crate::audio::bus::AudioBus;
    use crate::components::entity::Renderable;

    #[test]
    fn level_one_population() {
        let mut audio = AudioBus::new();
        let mut rng = Rng::new(42);
        let level = level_one(&test_library(), &mut rng, 0.0, &mut audio);
        assert_eq!(level.enemies.len(), 4);
        assert!(level.boss().is_some());
        assert_eq!(level.little_enemies.len(), 5);
        assert_eq!(level.clouds.len(), 5);
        assert_eq!(level.background.len(), 32);
        assert_eq!(level.coins.len(), 5);
        assert_eq!(level.bottles.len(), 7);
        assert_eq!(level.level_end_x, 4200.0);
        assert_eq!(level.health_bar.kind(), BarKind::Health);
        assert_eq!(level.boss_bar.kind(), BarKind::Endboss);
        // One run loop per roamer.
        assert_eq!(audio.live_clones().len(), 8);
    }

    #[test]
    fn same_seed_same_layout() {
        let lib = test_library();
        let mut audio = AudioBus::new();
        let a = level_one(&lib, &mut Rng::new(9), 0.0, &mut audio);
        let b = level_one(&lib, &mut Rng::new(9), 0.0, &mut audio);
        let xs = |l: &Level| l.little_enemies.iter().map(|r| r.sprite().pos.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
    }

    #[test]
    fn boss_bar_hidden_until_battle() {
        let mut audio = AudioBus::new();
        let mut level = level_one(&test_library(), &mut Rng::new(1), 0.0, &mut audio);
        assert!(level.visible_boss_bar().is_none());
        if let Some(boss) = level.boss_mut() {
            boss.start_battle(0.0);
        }
        level.sync_boss_bar();
        let bar = level.visible_boss_bar().expect("boss bar visible after activation");
        assert_eq!(bar.sprite().pos.y, 10.0);
        assert_eq!(bar.sprite().pos.x, 4500.0 + 125.0 - 120.0);
    }
}
