use crate::assets::registry::FrameCatalog;
use crate::components::animation::Clip;
use crate::entities::character::CharacterClips;
use crate::entities::decor::BackgroundClips;
use crate::entities::endboss::BossClips;
use crate::entities::roamer::{RoamerClips, RoamerKind};
use crate::entities::status_bar::StatusBarClips;
use crate::entities::throwable::BottleClips;
use crate::error::ConfigError;

/// Every clip the game uses, resolved once against the catalog.
///
/// Loading fails on the first missing or empty animation, so a level can
/// never be built from an incomplete manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipLibrary {
    pub character: CharacterClips,
    pub chicken: RoamerClips,
    pub little_chicken: RoamerClips,
    pub endboss: BossClips,
    pub bottle: BottleClips,
    pub coin: Clip,
    pub cloud: Clip,
    pub background: BackgroundClips,
    pub status_bars: StatusBarClips,
    pub game_over: Clip,
    pub game_won: Clip,
}

impl ClipLibrary {
    pub fn load(catalog: &FrameCatalog) -> Result<Self, ConfigError> {
        Ok(Self {
            character: CharacterClips::load(catalog)?,
            chicken: RoamerClips::load(catalog, RoamerKind::Chicken)?,
            little_chicken: RoamerClips::load(catalog, RoamerKind::Little)?,
            endboss: BossClips::load(catalog)?,
            bottle: BottleClips::load(catalog)?,
            coin: catalog.clip("coin", "spin")?,
            cloud: catalog.clip("cloud", "drift")?,
            background: BackgroundClips::load(catalog)?,
            status_bars: StatusBarClips::load(catalog)?,
            game_over: catalog.clip("end_screen", "game_over")?,
            game_won: catalog.clip("end_screen", "game_won")?,
        })
    }
}

#[cfg(test)]
pub fn test_library() -> ClipLibrary {
    use crate::assets::manifest::AssetManifest;

    let manifest = AssetManifest::builtin().expect("builtin manifest parses");
    ClipLibrary::load(&FrameCatalog::from_manifest(manifest)).expect("builtin manifest is complete")
}
