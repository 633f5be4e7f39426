/// Render layer: controls draw order of the world's collections.
///
/// Layers are drawn back-to-front: Background first, Hud last.
/// Every layer except `Hud` is drawn in camera space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    Background = 0,
    Clouds = 1,
    /// Coins, then ground bottles.
    Pickups = 2,
    Character = 3,
    /// Enemies, then little enemies.
    Enemies = 4,
    Projectiles = 5,
    /// The boss health bar floating above the boss.
    BossBar = 6,
    Hud = 7,
}

impl RenderLayer {
    pub const COUNT: usize = 8;

    /// Every layer, back to front.
    pub const ALL: [RenderLayer; Self::COUNT] = [
        Self::Background,
        Self::Clouds,
        Self::Pickups,
        Self::Character,
        Self::Enemies,
        Self::Projectiles,
        Self::BossBar,
        Self::Hud,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Drawn under the camera translation.
    pub fn is_world_space(self) -> bool {
        self != Self::Hud
    }

    /// Objects on this layer are skipped when outside the camera view.
    pub fn is_culled(self) -> bool {
        !matches!(self, Self::Character | Self::BossBar | Self::Hud)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_is_back_to_front() {
        for pair in RenderLayer::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn from_u8_matches_discriminant() {
        for layer in RenderLayer::ALL {
            assert_eq!(RenderLayer::from_u8(layer.as_u8()), Some(layer));
        }
        assert!(RenderLayer::from_u8(RenderLayer::COUNT as u8).is_none());
    }

    #[test]
    fn only_hud_is_screen_space() {
        let screen: Vec<_> = RenderLayer::ALL
            .into_iter()
            .filter(|l| !l.is_world_space())
            .collect();
        assert_eq!(screen, vec![RenderLayer::Hud]);
        assert!(!RenderLayer::Character.is_culled());
        assert!(RenderLayer::Enemies.is_culled());
    }
}
