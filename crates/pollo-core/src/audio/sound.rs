use serde::Serialize;

/// Every sound the game plays. The discriminant is the id sent to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Sound {
    LittleChickenRun = 0,
    ChickenRun = 1,
    ChickenDead = 2,
    CharacterRun = 3,
    CharacterJump = 4,
    CharacterFall = 5,
    CharacterHurt = 6,
    CharacterIdle = 7,
    CoinCollected = 8,
    BottleSplash = 9,
    BottleCollect = 10,
    BottleThrow = 11,
    GameOver = 12,
    GameWon = 13,
}

impl Sound {
    pub const COUNT: usize = 14;

    pub const ALL: [Sound; Self::COUNT] = [
        Sound::LittleChickenRun,
        Sound::ChickenRun,
        Sound::ChickenDead,
        Sound::CharacterRun,
        Sound::CharacterJump,
        Sound::CharacterFall,
        Sound::CharacterHurt,
        Sound::CharacterIdle,
        Sound::CoinCollected,
        Sound::BottleSplash,
        Sound::BottleCollect,
        Sound::BottleThrow,
        Sound::GameOver,
        Sound::GameWon,
    ];

    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    /// Name the host uses as its audio element key.
    pub fn name(self) -> &'static str {
        match self {
            Sound::LittleChickenRun => "littleChickenRun",
            Sound::ChickenRun => "chickenRun",
            Sound::ChickenDead => "chickenDead",
            Sound::CharacterRun => "characterRun",
            Sound::CharacterJump => "characterJump",
            Sound::CharacterFall => "characterFall",
            Sound::CharacterHurt => "characterHurt",
            Sound::CharacterIdle => "characterIdle",
            Sound::CoinCollected => "coinCollected",
            Sound::BottleSplash => "bottleSplash",
            Sound::BottleCollect => "bottleCollect",
            Sound::BottleThrow => "bottleThrow",
            Sound::GameOver => "gameOver",
            Sound::GameWon => "gameWon",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Sound::LittleChickenRun => "audio/little_chicken_run.mp3",
            Sound::ChickenRun => "audio/chicken_normal_run.mp3",
            Sound::ChickenDead => "audio/chicken_dead.mp3",
            Sound::CharacterRun => "audio/charakter_run.mp3",
            Sound::CharacterJump => "audio/charakter_jump.mp3",
            Sound::CharacterFall => "audio/charakter_falling.mp3",
            Sound::CharacterHurt => "audio/charakter_hurt.mp3",
            Sound::CharacterIdle => "audio/charakter_idle.mp3",
            Sound::CoinCollected => "audio/coin_collected.mp3",
            Sound::BottleSplash => "audio/bottle_splash.mp3",
            Sound::BottleCollect => "audio/bottle_collect.mp3",
            Sound::BottleThrow => "audio/bottle_throw.mp3",
            Sound::GameOver => "audio/gameOver.mp3",
            Sound::GameWon => "audio/gameWon.mp3",
        }
    }

    /// Mixing level: ambience quiet, effects low, music loud.
    pub fn default_volume(self) -> f32 {
        match self {
            Sound::ChickenRun | Sound::LittleChickenRun | Sound::CoinCollected => 0.02,
            Sound::BottleCollect
            | Sound::CharacterHurt
            | Sound::CharacterFall
            | Sound::BottleThrow
            | Sound::ChickenDead
            | Sound::CharacterJump => 0.1,
            Sound::CharacterRun | Sound::CharacterIdle => 0.2,
            _ => 0.5,
        }
    }
}

/// One row of the table the host loads its audio elements from.
#[derive(Debug, Clone, Serialize)]
pub struct SoundInfo {
    pub id: u8,
    pub name: &'static str,
    pub path: &'static str,
    pub volume: f32,
}

/// Every sound with its id, key, path and volume.
pub fn sound_table() -> Vec<SoundInfo> {
    Sound::ALL
        .iter()
        .map(|&s| SoundInfo {
            id: s.id(),
            name: s.name(),
            path: s.path(),
            volume: s.default_volume(),
        })
        .collect()
}

/// The sound table as JSON.
pub fn sound_table_json() -> String {
    serde_json::to_string(&sound_table()).unwrap_or_else(|err| {
        log::warn!("audio: could not serialize sound table: {}", err);
        String::from("[]")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_match_table_order() {
        for (i, sound) in Sound::ALL.iter().enumerate() {
            assert_eq!(sound.id() as usize, i);
            assert_eq!(Sound::from_id(i as u8), Some(*sound));
        }
        assert!(Sound::from_id(Sound::COUNT as u8).is_none());
    }

    #[test]
    fn volumes() {
        assert_eq!(Sound::ChickenRun.default_volume(), 0.02);
        assert_eq!(Sound::CharacterJump.default_volume(), 0.1);
        assert_eq!(Sound::CharacterIdle.default_volume(), 0.2);
        assert_eq!(Sound::GameWon.default_volume(), 0.5);
        assert_eq!(Sound::BottleSplash.default_volume(), 0.5);
    }

    #[test]
    fn table_serializes() {
        let json = sound_table_json();
        assert!(json.contains("\"name\":\"chickenRun\""));
        assert_eq!(sound_table().len(), Sound::COUNT);
    }
}
