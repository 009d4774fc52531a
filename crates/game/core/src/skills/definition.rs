//! Authored skill definitions.

use core::fmt;

use super::Rarity;
use crate::error::ValidationError;
use crate::stats::{ActiveModifier, ModifierOp, StatKey};

/// Stable identifier of a skill in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SkillId(String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SkillId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Name under which a host registers the code a skill runs when it fires.
///
/// The engine never interprets it; see [`PayloadRegistry`](super::PayloadRegistry).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PayloadKey(String);

impl PayloadKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayloadKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cooldown in seconds as a function of skill level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CooldownCurve {
    /// Same cooldown at every level.
    Fixed(f32),
    /// `base + per_level * (level - 1)`, never below `min`.
    Linear { base: f32, per_level: f32, min: f32 },
    /// Explicit value per level; levels past the end reuse the last entry.
    PerLevel(Vec<f32>),
}

impl CooldownCurve {
    /// Cooldown at `level`. Levels below 1 are read as 1.
    pub fn at(&self, level: u32) -> f32 {
        let level = level.max(1);
        match self {
            Self::Fixed(secs) => *secs,
            Self::Linear {
                base,
                per_level,
                min,
            } => (base + per_level * (level - 1) as f32).max(*min),
            Self::PerLevel(table) => {
                let index = (level as usize - 1).min(table.len().saturating_sub(1));
                table.get(index).copied().unwrap_or(0.0)
            }
        }
    }
}

/// Permanent stat bonus granted while a skill is owned, scaled by its level.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassiveBonus {
    pub stat: StatKey,
    /// Per-level operation; see [`ModifierOp::scaled`].
    pub op: ModifierOp,
}

impl PassiveBonus {
    /// The permanent modifier this bonus contributes at `level`.
    pub fn modifier_at(&self, level: u32) -> ActiveModifier {
        ActiveModifier::permanent(self.stat, self.op.scaled(level))
    }
}

/// Immutable authored description of a skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillDefinition {
    pub id: SkillId,
    pub name: String,
    pub max_level: u32,
    pub cooldown: CooldownCurve,
    /// Fires on its own whenever the cooldown lapses.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub autofire: bool,
    /// May appear in level-up offers.
    #[cfg_attr(feature = "serde", serde(default = "default_true"))]
    pub offerable: bool,
    /// Rarity when offered as a new skill.
    pub base_rarity: Rarity,
    /// Rarity when offered as an upgrade of an owned skill.
    pub upgrade_rarity: Rarity,
    pub payload: PayloadKey,
    #[cfg_attr(feature = "serde", serde(default))]
    pub passive: Option<PassiveBonus>,
}

#[cfg(feature = "serde")]
fn default_true() -> bool {
    true
}

impl SkillDefinition {
    /// Creates an offerable, autofiring definition whose payload key equals its id.
    pub fn new(id: impl Into<String>, max_level: u32, cooldown: CooldownCurve) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            payload: PayloadKey::new(id.clone()),
            id: SkillId::new(id),
            max_level,
            cooldown,
            autofire: true,
            offerable: true,
            base_rarity: Rarity::Common,
            upgrade_rarity: Rarity::Common,
            passive: None,
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, base: Rarity, upgrade: Rarity) -> Self {
        self.base_rarity = base;
        self.upgrade_rarity = upgrade;
        self
    }

    #[must_use]
    pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
        self.payload = PayloadKey::new(payload);
        self
    }

    #[must_use]
    pub fn with_passive(mut self, stat: StatKey, op: ModifierOp) -> Self {
        self.passive = Some(PassiveBonus { stat, op });
        self
    }

    #[must_use]
    pub fn manual(mut self) -> Self {
        self.autofire = false;
        self
    }

    #[must_use]
    pub fn not_offerable(mut self) -> Self {
        self.offerable = false;
        self
    }

    /// Rarity this skill is presented with for an actor at `owned_level`.
    pub fn rarity_for(&self, owned_level: u32) -> Rarity {
        if owned_level > 0 {
            self.upgrade_rarity
        } else {
            self.base_rarity
        }
    }

    pub fn cooldown_at(&self, level: u32) -> f32 {
        self.cooldown.at(level)
    }

    /// Checks authoring invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_level == 0 {
            return Err(ValidationError::ZeroMaxLevel {
                id: self.id.clone(),
            });
        }
        for level in 1..=self.max_level {
            let value = self.cooldown.at(level);
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::InvalidCooldown {
                    id: self.id.clone(),
                    level,
                    value,
                });
            }
        }
        Ok(())
    }
}
