use crate::audio::sink::AudioSink;
use crate::components::entity::{Renderable, Sprite};
use crate::core::time::{earliest, Millis};
use crate::entities::collectible::{Coin, GroundBottle};
use crate::entities::decor::{BackgroundObject, Cloud};
use crate::entities::endboss::Endboss;
use crate::entities::roamer::Roamer;
use crate::entities::status_bar::StatusBar;
use crate::entities::Actor;

/// Rightmost x the character can reach.
pub const LEVEL_END_X: f32 = 4200.0;

/// Anything in the main enemy list.
#[derive(Debug, Clone)]
pub enum Enemy {
    Roamer(Roamer),
    Boss(Endboss),
}

impl Enemy {
    pub fn as_roamer_mut(&mut self) -> Option<&mut Roamer> {
        match self {
            Enemy::Roamer(roamer) => Some(roamer),
            Enemy::Boss(_) => None,
        }
    }

    pub fn remove_from_world(&self) -> bool {
        match self {
            Enemy::Roamer(roamer) => roamer.remove_from_world(),
            Enemy::Boss(boss) => boss.remove_from_world(),
        }
    }

    fn actor_mut(&mut self) -> &mut dyn Actor {
        match self {
            Enemy::Roamer(roamer) => roamer,
            Enemy::Boss(boss) => boss,
        }
    }

    fn actor(&self) -> &dyn Actor {
        match self {
            Enemy::Roamer(roamer) => roamer,
            Enemy::Boss(boss) => boss,
        }
    }
}

impl Actor for Enemy {
    fn next_deadline(&self) -> Option<Millis> {
        self.actor().next_deadline()
    }

    fn run_due(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        self.actor_mut().run_due(now, audio);
    }

    fn animate(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        self.actor_mut().animate(now, audio);
    }

    fn cleanup(&mut self, audio: &mut dyn AudioSink) {
        self.actor_mut().cleanup(audio);
    }
}

impl Renderable for Enemy {
    fn sprite(&self) -> &Sprite {
        match self {
            Enemy::Roamer(roamer) => roamer.sprite(),
            Enemy::Boss(boss) => boss.sprite(),
        }
    }

    fn sprite_mut(&mut self) -> &mut Sprite {
        match self {
            Enemy::Roamer(roamer) => roamer.sprite_mut(),
            Enemy::Boss(boss) => boss.sprite_mut(),
        }
    }
}

/// Every entity of one level instance except the character and thrown bottles.
#[derive(Debug, Clone)]
pub struct Level {
    pub enemies: Vec<Enemy>,
    pub little_enemies: Vec<Roamer>,
    pub clouds: Vec<Cloud>,
    pub background: Vec<BackgroundObject>,
    pub coins: Vec<Coin>,
    pub bottles: Vec<GroundBottle>,
    pub health_bar: StatusBar,
    pub bottle_bar: StatusBar,
    pub coin_bar: StatusBar,
    pub boss_bar: StatusBar,
    pub level_end_x: f32,
    boss_cleared: bool,
}

impl Level {
    pub fn new(
        enemies: Vec<Enemy>,
        little_enemies: Vec<Roamer>,
        clouds: Vec<Cloud>,
        background: Vec<BackgroundObject>,
        coins: Vec<Coin>,
        bottles: Vec<GroundBottle>,
        bars: [StatusBar; 4],
    ) -> Self {
        let [health_bar, bottle_bar, coin_bar, boss_bar] = bars;
        Self {
            enemies,
            little_enemies,
            clouds,
            background,
            coins,
            bottles,
            health_bar,
            bottle_bar,
            coin_bar,
            boss_bar,
            level_end_x: LEVEL_END_X,
            boss_cleared: false,
        }
    }

    pub fn boss(&self) -> Option<&Endboss> {
        self.enemies.iter().find_map(|enemy| match enemy {
            Enemy::Boss(boss) => Some(boss),
            Enemy::Roamer(_) => None,
        })
    }

    pub fn boss_mut(&mut self) -> Option<&mut Endboss> {
        self.enemies.iter_mut().find_map(|enemy| match enemy {
            Enemy::Boss(boss) => Some(boss),
            Enemy::Roamer(_) => None,
        })
    }

    /// The boss finished dying, whether or not it was pruned yet.
    pub fn boss_defeated(&self) -> bool {
        self.boss_cleared
            || self
                .boss()
                .is_some_and(|boss| boss.is_dead_and_finished())
    }

    /// The boss bar, if it should be drawn this frame.
    pub fn visible_boss_bar(&self) -> Option<&StatusBar> {
        self.boss()
            .filter(|boss| boss.is_active())
            .map(|_| &self.boss_bar)
    }

    /// Keep the boss bar hovering over the boss.
    pub fn sync_boss_bar(&mut self) {
        let Some(sprite) = self.boss().map(|boss| boss.sprite().clone()) else {
            return;
        };
        self.boss_bar.follow(&sprite);
    }

    /// Drop enemies whose removal timer ran out.
    pub fn prune(&mut self) {
        let mut cleared = false;
        self.enemies.retain(|enemy| {
            let gone = enemy.remove_from_world();
            if gone && matches!(enemy, Enemy::Boss(_)) {
                cleared = true;
            }
            !gone
        });
        self.little_enemies.retain(|roamer| !roamer.remove_from_world());
        if cleared {
            self.boss_cleared = true;
        }
    }

    pub fn spin_coins(&mut self) {
        for coin in &mut self.coins {
            coin.spin();
        }
    }

    pub fn next_deadline(&self) -> Option<Millis> {
        earliest(
            self.enemies
                .iter()
                .map(|enemy| enemy.next_deadline())
                .chain(self.little_enemies.iter().map(|roamer| roamer.next_deadline()))
                .chain(self.clouds.iter().map(|cloud| cloud.next_deadline())),
        )
    }

    /// Enemies first, then little enemies, then clouds.
    pub fn run_due(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        for enemy in &mut self.enemies {
            enemy.run_due(now, audio);
        }
        for roamer in &mut self.little_enemies {
            roamer.run_due(now, audio);
        }
        for cloud in &mut self.clouds {
            cloud.run_due(now, audio);
        }
    }

    pub fn animate(&mut self, now: Millis, audio: &mut dyn AudioSink) {
        for enemy in &mut self.enemies {
            enemy.animate(now, audio);
        }
        for roamer in &mut self.little_enemies {
            roamer.animate(now, audio);
        }
        for cloud in &mut self.clouds {
            cloud.animate(now, audio);
        }
    }

    pub fn cleanup(&mut self, audio: &mut dyn AudioSink) {
        for enemy in &mut self.enemies {
            enemy.cleanup(audio);
        }
        for roamer in &mut self.little_enemies {
            roamer.cleanup(audio);
        }
        for cloud in &mut self.clouds {
            cloud.cleanup(audio);
        }
    }
}
