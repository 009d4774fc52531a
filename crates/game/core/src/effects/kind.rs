//! Status effect kinds and their aggregation rules.

use strum::{Display, EnumCount, EnumIter};

/// Types of timed effects an actor can carry.
///
/// Adding a kind means adding a variant and deciding its contribution in
/// [`movement_multiplier`](Self::movement_multiplier),
/// [`blocks_action`](Self::blocks_action) and
/// [`is_periodic`](Self::is_periodic).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Placeholder for "no effect". Never stored.
    #[default]
    None,

    // ========================================================================
    // Damage over time (magnitude = damage per tick)
    // ========================================================================
    Burn,
    Poison,

    // ========================================================================
    // Crowd control
    // ========================================================================
    /// Movement scaled by magnitude.
    Slow,
    /// Cannot move or act.
    Stun,
    /// Cannot move; can still act.
    Freeze,
}

impl EffectKind {
    /// Movement contribution of one entry of this kind.
    ///
    /// The tracker takes the minimum across entries ("most severe wins").
    pub fn movement_multiplier(self, magnitude: f32) -> f32 {
        match self {
            Self::Slow => magnitude,
            Self::Stun | Self::Freeze => 0.0,
            Self::None | Self::Burn | Self::Poison => 1.0,
        }
    }

    /// Whether an entry of this kind prevents the owner from acting.
    ///
    /// Freeze only pins movement; the owner may still act.
    pub fn blocks_action(self) -> bool {
        matches!(self, Self::Stun)
    }

    /// Whether the magnitude is dealt as damage on a fixed interval.
    pub fn is_periodic(self) -> bool {
        matches!(self, Self::Burn | Self::Poison)
    }

    pub fn is_none(self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn only_stun_blocks_action() {
        let blocking: Vec<_> = EffectKind::iter().filter(|k| k.blocks_action()).collect();
        assert_eq!(blocking, vec![EffectKind::Stun]);
    }

    #[test]
    fn immobilizing_kinds_zero_movement() {
        assert_eq!(EffectKind::Stun.movement_multiplier(0.8), 0.0);
        assert_eq!(EffectKind::Freeze.movement_multiplier(0.8), 0.0);
        assert_eq!(EffectKind::Slow.movement_multiplier(0.4), 0.4);
        assert_eq!(EffectKind::Burn.movement_multiplier(25.0), 1.0);
    }
}
