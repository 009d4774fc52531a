//! Immutable stat snapshots.

use core::ops::Index;

use strum::{EnumCount, IntoEnumIterator};

use super::StatKey;
use crate::error::ValidationError;

/// A full mapping from [`StatKey`] to value.
///
/// Tables are plain `Copy` values: recomputation produces a new one and
/// readers hold their own copy, never a reference into live state.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "StatOverrides", into = "StatOverrides"))]
pub struct StatTable {
    values: [f32; StatKey::COUNT],
}

impl StatTable {
    /// Creates a table with every stat set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self {
            values: [value; StatKey::COUNT],
        }
    }

    /// Reads one stat.
    #[inline]
    pub fn get(&self, key: StatKey) -> f32 {
        self.values[key.as_index()]
    }

    /// Writes one stat.
    #[inline]
    pub fn set(&mut self, key: StatKey, value: f32) {
        self.values[key.as_index()] = value;
    }

    /// Returns a copy with one stat replaced (builder pattern).
    #[must_use]
    pub fn with(mut self, key: StatKey, value: f32) -> Self {
        self.set(key, value);
        self
    }

    /// Iterates `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f32)> + '_ {
        StatKey::iter().map(move |key| (key, self.get(key)))
    }

    /// Rejects tables containing NaN or infinite values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.iter().find(|(_, value)| !value.is_finite()) {
            Some((stat, value)) => Err(ValidationError::NonFiniteStat { stat, value }),
            None => Ok(()),
        }
    }
}

impl Default for StatTable {
    /// Baseline tuning for a fresh run.
    fn default() -> Self {
        Self::splat(0.0)
            .with(StatKey::MovementSpeed, 8.0)
            .with(StatKey::Acceleration, 20.0)
            .with(StatKey::RotationSpeed, 3.5)
            .with(StatKey::MaxHealth, 100.0)
            .with(StatKey::HealthRegen, 0.5)
            .with(StatKey::WeaponDamage, 10.0)
            .with(StatKey::FireRate, 2.0)
            .with(StatKey::ProjectileSpeed, 18.0)
            .with(StatKey::TurboMultiplier, 1.6)
            .with(StatKey::TurboRegen, 10.0)
            .with(StatKey::MaxTurboEnergy, 100.0)
            .with(StatKey::Mass, 1.0)
            .with(StatKey::Drag, 0.2)
    }
}

impl Index<StatKey> for StatTable {
    type Output = f32;

    fn index(&self, key: StatKey) -> &f32 {
        &self.values[key.as_index()]
    }
}

/// Sparse authored form of a [`StatTable`].
///
/// Keys left out keep their [`StatTable::default`] value, so a preset only
/// lists what it changes.
#[cfg(feature = "serde")]
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct StatOverrides(pub std::collections::BTreeMap<StatKey, f32>);

#[cfg(feature = "serde")]
impl From<StatOverrides> for StatTable {
    fn from(overrides: StatOverrides) -> Self {
        overrides
            .0
            .into_iter()
            .fold(StatTable::default(), |table, (key, value)| table.with(key, value))
    }
}

#[cfg(feature = "serde")]
impl From<StatTable> for StatOverrides {
    fn from(table: StatTable) -> Self {
        StatOverrides(table.iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_replaces_single_stat() {
        let table = StatTable::default().with(StatKey::Mass, 4.0);
        assert_eq!(table[StatKey::Mass], 4.0);
        assert_eq!(table.get(StatKey::MaxHealth), StatTable::default()[StatKey::MaxHealth]);
    }

    #[test]
    fn iter_visits_every_key_once() {
        assert_eq!(StatTable::default().iter().count(), StatKey::COUNT);
    }

    #[test]
    fn validate_rejects_nan() {
        let table = StatTable::default().with(StatKey::Drag, f32::NAN);
        assert!(matches!(
            table.validate(),
            Err(ValidationError::NonFiniteStat {
                stat: StatKey::Drag,
                ..
            })
        ));
        assert!(StatTable::default().validate().is_ok());
    }
}
