//! Closed set of player stat keys.

use strum::{Display, EnumCount, EnumIter, IntoStaticStr};

/// Every stat a derived [`StatTable`](super::StatTable) carries.
///
/// The set is closed: authored content naming any other key fails to parse,
/// so lookups at runtime are infallible.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumCount, EnumIter, IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatKey {
    MovementSpeed,
    Acceleration,
    RotationSpeed,
    MaxHealth,
    HealthRegen,
    WeaponDamage,
    FireRate,
    ProjectileSpeed,
    TurboMultiplier,
    TurboRegen,
    MaxTurboEnergy,
    Mass,
    Drag,
}

impl StatKey {
    /// Dense index of this key, used to address fixed-size tables.
    #[inline]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}
