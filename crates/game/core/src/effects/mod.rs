//! Timed effects on actors: damage over time, slows, stuns and freezes.
//!
//! Each actor owns one [`TimedEffectTracker`]. Enemies read
//! [`movement_multiplier`](TimedEffectTracker::movement_multiplier) and
//! [`can_act`](TimedEffectTracker::can_act) from it; periodic damage is
//! routed to the actor's [`DamageSink`]. Timed *stat* buffs on the player
//! live in [`StatModifierEngine`](crate::stats::StatModifierEngine) instead,
//! with the same refresh-on-reapply rule.

pub mod damage;
pub mod kind;
pub mod tracker;

pub use damage::DamageSink;
pub use kind::EffectKind;
pub use tracker::{ActiveEffect, EffectApply, ExpiredEffects, TimedEffectTracker};
