//! Tunable progression parameters shared by the flow and the trackers.

use crate::error::ValidationError;
use crate::progression::LevelCurve;

/// Progression constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// Number of offers presented per level-up.
    pub offer_count: usize,
    /// Seconds between damage ticks of periodic effects (Burn, Poison).
    pub periodic_interval: f32,
    /// Level-ups retained while a selection is pending. Extra ones are dropped.
    pub max_pending_level_ups: u32,
    /// Experience required per player level.
    pub level_curve: LevelCurve,
}

impl ProgressionConfig {
    // ===== compile-time constants used as type parameters =====
    /// Capacity of a per-actor effect tracker. One slot per storable effect kind plus headroom.
    pub const MAX_ACTIVE_EFFECTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_OFFER_COUNT: usize = 3;
    pub const DEFAULT_PERIODIC_INTERVAL: f32 = 1.0;
    pub const DEFAULT_MAX_PENDING_LEVEL_UPS: u32 = 16;

    pub fn new() -> Self {
        Self {
            offer_count: Self::DEFAULT_OFFER_COUNT,
            periodic_interval: Self::DEFAULT_PERIODIC_INTERVAL,
            max_pending_level_ups: Self::DEFAULT_MAX_PENDING_LEVEL_UPS,
            level_curve: LevelCurve::default(),
        }
    }

    pub fn with_offer_count(offer_count: usize) -> Self {
        Self {
            offer_count,
            ..Self::new()
        }
    }

    /// Rejects values that would stall periodic damage or the level-up loop.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.periodic_interval.is_finite() || self.periodic_interval <= 0.0 {
            return Err(ValidationError::InvalidPeriodicInterval(self.periodic_interval));
        }
        if self.offer_count == 0 {
            return Err(ValidationError::ZeroOfferCount);
        }
        if self.max_pending_level_ups == 0 {
            return Err(ValidationError::ZeroPendingLevelUps);
        }
        let LevelCurve { base, growth } = self.level_curve;
        if base == 0 || !growth.is_finite() || growth <= 0.0 {
            return Err(ValidationError::InvalidLevelCurve { base, growth });
        }
        Ok(())
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self::new()
    }
}
