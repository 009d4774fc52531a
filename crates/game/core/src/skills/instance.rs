//! Owned skill instances.

use std::collections::HashMap;
use std::sync::Arc;

use super::{SkillDefinition, SkillId};

/// Cooldown state of an instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillState {
    /// Cooldown lapsed; eligible to fire.
    Idle,
    /// Waiting on its cooldown.
    Cooling,
}

/// A skill owned by the player: definition, level, enable flag and cooldown.
#[derive(Clone, Debug, PartialEq)]
pub struct SkillInstance {
    definition: Arc<SkillDefinition>,
    level: u32,
    enabled: bool,
    cooldown_remaining: f32,
}

impl SkillInstance {
    /// Grants a skill at `start_level`, clamped to `1..=max_level`. Starts Idle.
    pub fn new(definition: Arc<SkillDefinition>, start_level: u32) -> Self {
        let level = start_level.clamp(1, definition.max_level.max(1));
        Self {
            definition,
            level,
            enabled: true,
            cooldown_remaining: 0.0,
        }
    }

    /// Rebuilds an instance from host-held state without correcting `level`.
    ///
    /// Hosts may keep `level == 0` to mean "granted but never leveled"; the
    /// scheduler reads such instances through [`effective_level`](Self::effective_level).
    pub fn restore(
        definition: Arc<SkillDefinition>,
        level: u32,
        enabled: bool,
        cooldown_remaining: f32,
    ) -> Self {
        Self {
            definition,
            level,
            enabled,
            cooldown_remaining,
        }
    }

    pub fn definition(&self) -> &Arc<SkillDefinition> {
        &self.definition
    }

    pub fn id(&self) -> &SkillId {
        &self.definition.id
    }

    /// Stored level, exactly as held.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Level used for activation and cooldown lookup: never below 1.
    pub fn effective_level(&self) -> u32 {
        self.level.max(1)
    }

    pub fn is_max_level(&self) -> bool {
        self.level >= self.definition.max_level
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn state(&self) -> SkillState {
        if self.cooldown_remaining > 0.0 {
            SkillState::Cooling
        } else {
            SkillState::Idle
        }
    }

    /// Enabled and Idle.
    pub fn is_ready(&self) -> bool {
        self.enabled && self.state() == SkillState::Idle
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Increments the level by one. Returns false at max level.
    pub(crate) fn level_up(&mut self) -> bool {
        if self.is_max_level() {
            return false;
        }
        self.level += 1;
        true
    }

    /// Counts the cooldown down. May go negative; negative reads as Idle.
    pub(crate) fn tick(&mut self, dt: f32) {
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining -= dt;
        }
    }

    /// Enters Cooling for the cooldown of `level`.
    pub(crate) fn start_cooldown(&mut self, level: u32) {
        self.cooldown_remaining = self.definition.cooldown_at(level);
    }

    pub(crate) fn reset_cooldown(&mut self) {
        self.cooldown_remaining = 0.0;
    }
}

/// Lookup of an actor's current level per skill (0 when not owned).
pub trait OwnedLevels {
    fn level_of(&self, id: &SkillId) -> u32;
}

impl OwnedLevels for HashMap<SkillId, u32> {
    fn level_of(&self, id: &SkillId) -> u32 {
        self.get(id).copied().unwrap_or(0)
    }
}

impl OwnedLevels for [SkillInstance] {
    fn level_of(&self, id: &SkillId) -> u32 {
        self.iter()
            .find(|instance| instance.id() == id)
            .map_or(0, SkillInstance::level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::CooldownCurve;

    fn definition(max_level: u32) -> Arc<SkillDefinition> {
        Arc::new(SkillDefinition::new("bolt", max_level, CooldownCurve::Fixed(2.0)))
    }

    #[test]
    fn start_level_is_clamped() {
        assert_eq!(SkillInstance::new(definition(5), 0).level(), 1);
        assert_eq!(SkillInstance::new(definition(5), 9).level(), 5);
        assert_eq!(SkillInstance::new(definition(5), 3).level(), 3);
    }

    #[test]
    fn new_instance_is_idle() {
        let instance = SkillInstance::new(definition(5), 1);
        assert_eq!(instance.state(), SkillState::Idle);
        assert!(instance.is_ready());
    }

    #[test]
    fn restored_zero_level_is_kept_but_read_as_one() {
        let instance = SkillInstance::restore(definition(5), 0, true, 0.0);
        assert_eq!(instance.level(), 0);
        assert_eq!(instance.effective_level(), 1);
    }

    #[test]
    fn cooldown_may_overshoot_below_zero() {
        let mut instance = SkillInstance::new(definition(5), 1);
        instance.start_cooldown(1);
        assert_eq!(instance.state(), SkillState::Cooling);
        instance.tick(2.5);
        assert_eq!(instance.cooldown_remaining(), -0.5);
        assert_eq!(instance.state(), SkillState::Idle);

        // Idle instances stop counting.
        instance.tick(1.0);
        assert_eq!(instance.cooldown_remaining(), -0.5);
    }

    #[test]
    fn owned_levels_from_map() {
        let mut owned = HashMap::new();
        owned.insert(SkillId::new("bolt"), 2);
        assert_eq!(owned.level_of(&SkillId::new("bolt")), 2);
        assert_eq!(owned.level_of(&SkillId::new("nova")), 0);
    }
}
