//! Common error infrastructure for progression-core.
//!
//! Runtime operations in this crate (ticking, activation, offer generation,
//! stat recomputation) never fail: missing references are silent no-ops that
//! surface through `tracing` only. The error types here cover the two places
//! where rejection is meaningful:
//!
//! - **Authoring**: content that violates an invariant (zero max level,
//!   non-positive rarity weight, ...) is rejected when it is constructed.
//! - **Explicit requests**: `level_up` and the two-phase selection report why
//!   a request could not be honoured so the host can react.

use crate::skills::SkillId;
use crate::stats::StatKey;

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSeverity {
    /// The request was valid in general but not in the current state.
    ///
    /// Examples: level-up on a maxed skill, completing a selection that was never started
    Recoverable,

    /// Invalid input that should not be retried without changes.
    ///
    /// Examples: malformed authored content, an out-of-range offer index
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all progression-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait ProgressionError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Useful for log fields and test assertions.
    fn error_code(&self) -> &'static str;
}

/// Authored content rejected at construction time.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("skill `{id}` has max level 0")]
    ZeroMaxLevel { id: SkillId },

    #[error("skill `{id}` is defined more than once")]
    DuplicateSkill { id: SkillId },

    #[error("skill `{id}` has an invalid cooldown at level {level}: {value}")]
    InvalidCooldown { id: SkillId, level: u32, value: f32 },

    #[error("rarity `{rarity}` has a non-positive weight: {weight}")]
    InvalidRarityWeight { rarity: &'static str, weight: f32 },

    #[error("upgrade weight multiplier must be >= 1, got {0}")]
    InvalidUpgradeMultiplier(f32),

    #[error("base stat `{stat}` is not finite: {value}")]
    NonFiniteStat { stat: StatKey, value: f32 },

    #[error("periodic interval must be finite and positive, got {0}")]
    InvalidPeriodicInterval(f32),

    #[error("offer count must be at least 1")]
    ZeroOfferCount,

    #[error("pending level-up cap must be at least 1")]
    ZeroPendingLevelUps,

    #[error("level curve needs a positive base and a finite positive growth, got base {base} growth {growth}")]
    InvalidLevelCurve { base: u32, growth: f32 },
}

impl ProgressionError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ZeroMaxLevel { .. } => "VALIDATION_ZERO_MAX_LEVEL",
            Self::DuplicateSkill { .. } => "VALIDATION_DUPLICATE_SKILL",
            Self::InvalidCooldown { .. } => "VALIDATION_INVALID_COOLDOWN",
            Self::InvalidRarityWeight { .. } => "VALIDATION_INVALID_RARITY_WEIGHT",
            Self::InvalidUpgradeMultiplier(_) => "VALIDATION_INVALID_UPGRADE_MULTIPLIER",
            Self::NonFiniteStat { .. } => "VALIDATION_NON_FINITE_STAT",
            Self::InvalidPeriodicInterval(_) => "VALIDATION_INVALID_PERIODIC_INTERVAL",
            Self::ZeroOfferCount => "VALIDATION_ZERO_OFFER_COUNT",
            Self::ZeroPendingLevelUps => "VALIDATION_ZERO_PENDING_LEVEL_UPS",
            Self::InvalidLevelCurve { .. } => "VALIDATION_INVALID_LEVEL_CURVE",
        }
    }
}

/// Why a level-up request was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LevelUpError {
    #[error("skill `{0}` is not owned")]
    NotOwned(SkillId),

    #[error("skill `{id}` is already at max level {level}")]
    AtMaxLevel { id: SkillId, level: u32 },
}

impl ProgressionError for LevelUpError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotOwned(_) => "LEVEL_UP_NOT_OWNED",
            Self::AtMaxLevel { .. } => "LEVEL_UP_AT_MAX_LEVEL",
        }
    }
}

/// Misuse of the two-phase level-up selection.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    #[error("no selection is in progress")]
    NotSelecting,

    #[error("choice {choice} is out of range for {available} offers")]
    InvalidChoice { choice: usize, available: usize },
}

impl ProgressionError for SelectionError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotSelecting => ErrorSeverity::Recoverable,
            Self::InvalidChoice { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotSelecting => "SELECTION_NOT_SELECTING",
            Self::InvalidChoice { .. } => "SELECTION_INVALID_CHOICE",
        }
    }
}
