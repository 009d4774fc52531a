//! Progression rules for a wave-survival game.
//!
//! `progression-core` holds the frame-stepped rules that sit between a host
//! simulation loop and authored content: stat modifiers, timed effects,
//! skill cooldowns and level-up offers. Everything is single-threaded and
//! infallible at tick time; the host owns one [`SkillScheduler`], one
//! [`LevelUpFlow`] and one [`TimedEffectTracker`] per actor and passes them
//! by reference to whichever system needs them.
pub mod config;
pub mod effects;
pub mod error;
pub mod offers;
pub mod progression;
pub mod skills;
pub mod stats;

pub use config::ProgressionConfig;
pub use effects::{ActiveEffect, DamageSink, EffectApply, EffectKind, TimedEffectTracker};
pub use error::{ErrorSeverity, LevelUpError, ProgressionError, SelectionError, ValidationError};
pub use offers::{OfferGenerator, RarityWeights, SkillOffer};
pub use progression::{
    EventQueue, Experience, LevelCurve, LevelUpFlow, ProgressionEvent, apply_offer, revoke_skill,
    sync_passives,
};
pub use skills::{
    Cast, CooldownCurve, OwnedLevels, PassiveBonus, PayloadKey, PayloadRegistry, Rarity,
    SchedulerCommand, SkillCatalog, SkillDefinition, SkillId, SkillInstance, SkillPayload,
    SkillScheduler, SkillState,
};
pub use stats::{
    ActiveModifier, ApplyOutcome, ModifierDuration, ModifierKind, ModifierOp, StatKey,
    StatModifierEngine, StatTable, recompute,
};
