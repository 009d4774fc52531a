//! Skill catalog, owned instances and the cooldown scheduler.
//!
//! Definitions are authored once and shared through [`SkillCatalog`].
//! The player owns [`SkillInstance`]s, which [`SkillScheduler`] ticks and
//! fires by invoking the payload registered for each definition.

pub mod catalog;
pub mod definition;
pub mod instance;
pub mod payload;
pub mod rarity;
pub mod scheduler;

pub use catalog::SkillCatalog;
pub use definition::{CooldownCurve, PassiveBonus, PayloadKey, SkillDefinition, SkillId};
pub use instance::{OwnedLevels, SkillInstance, SkillState};
pub use payload::{Cast, PayloadRegistry, SchedulerCommand, SkillPayload};
pub use rarity::Rarity;
pub use scheduler::SkillScheduler;
