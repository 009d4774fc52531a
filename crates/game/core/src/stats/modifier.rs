//! Stat modifiers applied on top of a base table.

use strum::{Display, EnumCount, EnumIter};

use super::StatKey;

/// A single operation on one stat value.
///
/// Operations are applied to the *running* value of the stat, in insertion
/// order, so `Add(10)` then `Multiply(1.5)` differs from the reverse.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierOp {
    /// Adds to the current value.
    Add(f32),
    /// Multiplies the current value.
    Multiply(f32),
    /// Replaces the current value outright.
    Override(f32),
}

impl ModifierOp {
    /// The slot this operation occupies for deduplication.
    pub const fn kind(self) -> ModifierKind {
        match self {
            Self::Add(_) => ModifierKind::Add,
            Self::Multiply(_) => ModifierKind::Multiply,
            Self::Override(_) => ModifierKind::Override,
        }
    }

    /// Applies the operation to a running value.
    #[inline]
    pub fn apply(self, current: f32) -> f32 {
        match self {
            Self::Add(amount) => current + amount,
            Self::Multiply(factor) => current * factor,
            Self::Override(value) => value,
        }
    }

    /// Scales the operation for a skill level.
    ///
    /// `Add` grows linearly, `Multiply` grows its bonus part linearly
    /// (`1.1` at level 3 becomes `1.3`), `Override` ignores the level.
    pub fn scaled(self, level: u32) -> Self {
        let level = level.max(1) as f32;
        match self {
            Self::Add(amount) => Self::Add(amount * level),
            Self::Multiply(factor) => Self::Multiply(1.0 + (factor - 1.0) * level),
            Self::Override(value) => Self::Override(value),
        }
    }
}

/// Operation family without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumCount, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierKind {
    Add,
    Multiply,
    Override,
}

/// Identity of a modifier within one actor: at most one entry per key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModifierKey {
    pub stat: StatKey,
    pub kind: ModifierKind,
}

/// How long a modifier stays active.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierDuration {
    /// Never expires on its own.
    Permanent,
    /// Seconds remaining.
    Timed(f32),
}

impl ModifierDuration {
    /// Authored durations of zero or less mean permanent.
    pub fn from_secs(secs: f32) -> Self {
        if secs > 0.0 {
            Self::Timed(secs)
        } else {
            Self::Permanent
        }
    }

    pub fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }

    fn is_expired(self) -> bool {
        matches!(self, Self::Timed(remaining) if remaining <= 0.0)
    }
}

/// A modifier currently affecting an actor's derived stats.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveModifier {
    pub stat: StatKey,
    pub op: ModifierOp,
    pub duration: ModifierDuration,
}

impl ActiveModifier {
    /// Creates a modifier lasting `duration_secs` (`<= 0` means permanent).
    pub fn new(stat: StatKey, op: ModifierOp, duration_secs: f32) -> Self {
        Self {
            stat,
            op,
            duration: ModifierDuration::from_secs(duration_secs),
        }
    }

    pub fn permanent(stat: StatKey, op: ModifierOp) -> Self {
        Self {
            stat,
            op,
            duration: ModifierDuration::Permanent,
        }
    }

    pub fn add(stat: StatKey, amount: f32, duration_secs: f32) -> Self {
        Self::new(stat, ModifierOp::Add(amount), duration_secs)
    }

    pub fn multiply(stat: StatKey, factor: f32, duration_secs: f32) -> Self {
        Self::new(stat, ModifierOp::Multiply(factor), duration_secs)
    }

    pub fn override_with(stat: StatKey, value: f32, duration_secs: f32) -> Self {
        Self::new(stat, ModifierOp::Override(value), duration_secs)
    }

    pub fn key(&self) -> ModifierKey {
        ModifierKey {
            stat: self.stat,
            kind: self.op.kind(),
        }
    }

    /// Counts down a timed modifier. Returns true once it has expired.
    pub(crate) fn advance(&mut self, dt: f32) -> bool {
        if let ModifierDuration::Timed(remaining) = &mut self.duration {
            *remaining -= dt;
        }
        self.duration.is_expired()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_duration_is_permanent() {
        assert!(ActiveModifier::add(StatKey::Mass, 1.0, 0.0).duration.is_permanent());
        assert!(ActiveModifier::add(StatKey::Mass, 1.0, -3.0).duration.is_permanent());
        assert_eq!(
            ActiveModifier::add(StatKey::Mass, 1.0, 2.5).duration,
            ModifierDuration::Timed(2.5)
        );
    }

    #[test]
    fn permanent_modifiers_never_expire() {
        let mut modifier = ActiveModifier::permanent(StatKey::Drag, ModifierOp::Override(0.0));
        assert!(!modifier.advance(1_000.0));
    }

    #[test]
    fn timed_modifier_expires_at_zero() {
        let mut modifier = ActiveModifier::multiply(StatKey::FireRate, 2.0, 1.0);
        assert!(!modifier.advance(0.5));
        assert!(modifier.advance(0.5));
    }

    #[test]
    fn scaling_by_level() {
        assert_eq!(ModifierOp::Add(5.0).scaled(3), ModifierOp::Add(15.0));
        match ModifierOp::Multiply(1.1).scaled(3) {
            ModifierOp::Multiply(factor) => assert!((factor - 1.3).abs() < 1e-6),
            other => panic!("unexpected op {other:?}"),
        }
        assert_eq!(ModifierOp::Override(2.0).scaled(4), ModifierOp::Override(2.0));
        assert_eq!(ModifierOp::Add(5.0).scaled(0), ModifierOp::Add(5.0));
    }

    #[test]
    fn dedup_key_separates_kinds() {
        let add = ActiveModifier::add(StatKey::MovementSpeed, 1.0, 0.0);
        let mul = ActiveModifier::multiply(StatKey::MovementSpeed, 1.5, 0.0);
        assert_ne!(add.key(), mul.key());
        assert_eq!(
            mul.key(),
            ActiveModifier::multiply(StatKey::MovementSpeed, 3.0, 5.0).key()
        );
    }
}
