//! Per-actor collection of timed effects.
//!
//! # Tick order
//!
//! Within one [`TimedEffectTracker::tick`]:
//! 1. every entry's remaining duration drops by `dt`;
//! 2. periodic entries add `dt` to their time since the last damage tick and,
//!    once that reaches one interval, deal their magnitude to the owner;
//! 3. entries with no remaining duration are swept.
//!
//! An effect that runs out on the same tick its interval elapses therefore
//! still deals its final tick before it is removed.

use arrayvec::ArrayVec;
use tracing::{debug, trace, warn};

use super::{DamageSink, EffectKind};
use crate::config::ProgressionConfig;

/// One active effect on an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveEffect {
    pub kind: EffectKind,
    /// Damage per tick for periodic kinds, speed multiplier for Slow.
    pub magnitude: f32,
    /// Seconds until expiry.
    pub remaining: f32,
    /// Seconds since the last damage tick (or since insertion).
    pub since_tick: f32,
}

impl ActiveEffect {
    pub fn new(kind: EffectKind, magnitude: f32, duration: f32) -> Self {
        Self {
            kind,
            magnitude,
            remaining: duration,
            since_tick: 0.0,
        }
    }

    pub fn burn(damage_per_tick: f32, duration: f32) -> Self {
        Self::new(EffectKind::Burn, damage_per_tick, duration)
    }

    pub fn poison(damage_per_tick: f32, duration: f32) -> Self {
        Self::new(EffectKind::Poison, damage_per_tick, duration)
    }

    pub fn slow(multiplier: f32, duration: f32) -> Self {
        Self::new(EffectKind::Slow, multiplier, duration)
    }

    pub fn stun(duration: f32) -> Self {
        Self::new(EffectKind::Stun, 0.0, duration)
    }

    pub fn freeze(duration: f32) -> Self {
        Self::new(EffectKind::Freeze, 0.0, duration)
    }
}

/// Result of [`TimedEffectTracker::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectApply {
    Inserted,
    /// Same kind was present; duration and magnitude overwritten.
    Refreshed,
    /// `EffectKind::None`, or no capacity left.
    Ignored,
}

/// Kinds removed during one tick.
pub type ExpiredEffects = ArrayVec<EffectKind, { ProgressionConfig::MAX_ACTIVE_EFFECTS }>;

/// Timed effects carried by one actor, at most one entry per kind.
#[derive(Clone, Debug, PartialEq)]
pub struct TimedEffectTracker {
    effects: ArrayVec<ActiveEffect, { ProgressionConfig::MAX_ACTIVE_EFFECTS }>,
    periodic_interval: f32,
}

impl TimedEffectTracker {
    pub fn new() -> Self {
        Self::with_interval(ProgressionConfig::DEFAULT_PERIODIC_INTERVAL)
    }

    /// Creates a tracker whose periodic effects hit every `periodic_interval` seconds.
    pub fn with_interval(periodic_interval: f32) -> Self {
        Self {
            effects: ArrayVec::new(),
            periodic_interval,
        }
    }

    /// Adds an effect, or refreshes the entry of the same kind in place.
    ///
    /// A refresh overwrites remaining duration and magnitude; the periodic
    /// damage phase of the existing entry is kept.
    pub fn apply(&mut self, effect: ActiveEffect) -> EffectApply {
        if effect.kind.is_none() {
            trace!("ignoring EffectKind::None");
            return EffectApply::Ignored;
        }

        if let Some(existing) = self.effects.iter_mut().find(|e| e.kind == effect.kind) {
            existing.remaining = effect.remaining;
            existing.magnitude = effect.magnitude;
            debug!(kind = %effect.kind, remaining = effect.remaining, "refreshed effect");
            return EffectApply::Refreshed;
        }

        let entry = ActiveEffect {
            since_tick: 0.0,
            ..effect
        };
        match self.effects.try_push(entry) {
            Ok(()) => {
                debug!(kind = %effect.kind, remaining = effect.remaining, "applied effect");
                EffectApply::Inserted
            }
            Err(_) => {
                warn!(kind = %effect.kind, "effect tracker full, dropping effect");
                EffectApply::Ignored
            }
        }
    }

    /// Advances all effects by `dt`, dealing periodic damage to `owner`.
    ///
    /// Returns the kinds that expired this tick.
    pub fn tick<S>(&mut self, dt: f32, owner: &mut S) -> ExpiredEffects
    where
        S: DamageSink + ?Sized,
    {
        for effect in self.effects.iter_mut() {
            effect.remaining -= dt;

            if effect.kind.is_periodic() {
                effect.since_tick += dt;
                if effect.since_tick >= self.periodic_interval {
                    owner.take_damage(effect.magnitude);
                    effect.since_tick = 0.0;
                }
            }
        }

        let mut expired = ExpiredEffects::new();
        self.effects.retain(|effect| {
            let keep = effect.remaining > 0.0;
            if !keep {
                expired.push(effect.kind);
            }
            keep
        });
        if !expired.is_empty() {
            debug!(?expired, "effects expired");
        }
        expired
    }

    /// Most severe movement multiplier across active entries, 1.0 when empty.
    pub fn movement_multiplier(&self) -> f32 {
        self.effects
            .iter()
            .map(|e| e.kind.movement_multiplier(e.magnitude))
            .fold(1.0, f32::min)
    }

    /// False while any entry blocks action (Stun).
    pub fn can_act(&self) -> bool {
        !self.effects.iter().any(|e| e.kind.blocks_action())
    }

    /// Removes the entry of `kind`. Absent kinds are a no-op.
    pub fn remove(&mut self, kind: EffectKind) -> Option<ActiveEffect> {
        let index = self.effects.iter().position(|e| e.kind == kind)?;
        Some(self.effects.remove(index))
    }

    pub fn clear(&mut self) {
        self.effects.clear();
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    pub fn get(&self, kind: EffectKind) -> Option<&ActiveEffect> {
        self.effects.iter().find(|e| e.kind == kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for TimedEffectTracker {
    fn default() -> Self {
        Self::new()
    }
}
