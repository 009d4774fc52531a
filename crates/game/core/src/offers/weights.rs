//! Rarity tier weights and the upgrade preference used when drawing offers.

use std::collections::BTreeMap;

use crate::error::ValidationError;
use crate::skills::Rarity;

/// Authored weight per rarity tier plus the upgrade preference.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RarityWeights {
    /// Tiers missing from the table weigh 0 and are never drawn.
    pub weights: BTreeMap<Rarity, f32>,
    pub favor_upgrades: bool,
    /// Applied to upgrade candidates when `favor_upgrades` is set. At least 1.
    pub upgrade_multiplier: f32,
}

impl RarityWeights {
    pub const DEFAULT_UPGRADE_MULTIPLIER: f32 = 2.0;

    pub fn new(weights: impl IntoIterator<Item = (Rarity, f32)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
            favor_upgrades: false,
            upgrade_multiplier: 1.0,
        }
    }

    /// Enables the upgrade preference with the given multiplier.
    #[must_use]
    pub fn favoring_upgrades(mut self, multiplier: f32) -> Self {
        self.favor_upgrades = true;
        self.upgrade_multiplier = multiplier;
        self
    }

    pub fn weight_of(&self, rarity: Rarity) -> f32 {
        self.weights.get(&rarity).copied().unwrap_or(0.0)
    }

    /// Weight of a candidate resolved to `rarity`.
    pub fn candidate_weight(&self, rarity: Rarity, is_upgrade: bool) -> f32 {
        let weight = self.weight_of(rarity);
        if is_upgrade && self.favor_upgrades {
            weight * self.upgrade_multiplier
        } else {
            weight
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for (&rarity, &weight) in &self.weights {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(ValidationError::InvalidRarityWeight {
                    rarity: rarity.into(),
                    weight,
                });
            }
        }
        if !self.upgrade_multiplier.is_finite() || self.upgrade_multiplier < 1.0 {
            return Err(ValidationError::InvalidUpgradeMultiplier(
                self.upgrade_multiplier,
            ));
        }
        Ok(())
    }
}

impl Default for RarityWeights {
    fn default() -> Self {
        Self::new([
            (Rarity::Common, 60.0),
            (Rarity::Uncommon, 25.0),
            (Rarity::Rare, 12.0),
            (Rarity::Epic, 3.0),
            (Rarity::Legendary, 1.0),
        ])
        .favoring_upgrades(Self::DEFAULT_UPGRADE_MULTIPLIER)
    }
}
