//! Cooldown-driven activation of owned skills.
//!
//! Each instance is either **Idle** (cooldown lapsed) or **Cooling**. Per
//! frame the host calls [`SkillScheduler::tick`] and then
//! [`SkillScheduler::try_activate_all`]; every enabled autofire instance that
//! is Idle runs its payload and re-enters Cooling.
//!
//! Nothing here fails on a missing reference: activating, leveling or
//! removing a skill that is not owned is logged and ignored, because the set
//! of instances changes under the scheduler every frame.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::{
    Cast, OwnedLevels, PayloadRegistry, SchedulerCommand, SkillCatalog, SkillId, SkillInstance,
};
use crate::error::LevelUpError;

/// Owns the player's skill instances and fires them on cooldown.
pub struct SkillScheduler<C: ?Sized> {
    catalog: Arc<SkillCatalog>,
    payloads: PayloadRegistry<C>,
    instances: Vec<SkillInstance>,
}

impl<C: ?Sized> SkillScheduler<C> {
    pub fn new(catalog: Arc<SkillCatalog>, payloads: PayloadRegistry<C>) -> Self {
        Self {
            catalog,
            payloads,
            instances: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<SkillCatalog> {
        &self.catalog
    }

    pub fn payloads_mut(&mut self) -> &mut PayloadRegistry<C> {
        &mut self.payloads
    }

    /// Owned instances in acquisition order.
    pub fn instances(&self) -> &[SkillInstance] {
        &self.instances
    }

    pub fn get(&self, id: &SkillId) -> Option<&SkillInstance> {
        self.instances.iter().find(|instance| instance.id() == id)
    }

    fn get_mut(&mut self, id: &SkillId) -> Option<&mut SkillInstance> {
        self.instances.iter_mut().find(|instance| instance.id() == id)
    }

    /// Grants a catalog skill at `start_level`, clamped to `1..=max_level`.
    ///
    /// Returns false (and changes nothing) when the id is unknown or already owned.
    pub fn add_skill(&mut self, id: &SkillId, start_level: u32) -> bool {
        let Some(definition) = self.catalog.get(id) else {
            warn!(skill = %id, "add_skill: unknown skill");
            return false;
        };
        if self.get(id).is_some() {
            debug!(skill = %id, "add_skill: already owned");
            return false;
        }

        let instance = SkillInstance::new(Arc::clone(definition), start_level);
        debug!(skill = %id, level = instance.level(), "skill granted");
        self.instances.push(instance);
        true
    }

    /// Inserts a pre-built instance, replacing any instance of the same skill.
    pub fn insert_instance(&mut self, instance: SkillInstance) {
        match self.get_mut(instance.id()) {
            Some(existing) => *existing = instance,
            None => self.instances.push(instance),
        }
    }

    /// Removes an owned skill. Unknown ids are a no-op.
    pub fn remove_skill(&mut self, id: &SkillId) -> Option<SkillInstance> {
        let Some(index) = self.instances.iter().position(|i| i.id() == id) else {
            trace!(skill = %id, "remove_skill: not owned");
            return None;
        };
        Some(self.instances.remove(index))
    }

    /// Raises an owned skill by exactly one level.
    ///
    /// Returns the new level, or an error leaving the instance unchanged.
    pub fn level_up(&mut self, id: &SkillId) -> Result<u32, LevelUpError> {
        let Some(instance) = self.get_mut(id) else {
            debug!(skill = %id, "level_up: not owned");
            return Err(LevelUpError::NotOwned(id.clone()));
        };
        if !instance.level_up() {
            return Err(LevelUpError::AtMaxLevel {
                id: id.clone(),
                level: instance.level(),
            });
        }
        debug!(skill = %id, level = instance.level(), "skill leveled up");
        Ok(instance.level())
    }

    pub fn set_enabled(&mut self, id: &SkillId, enabled: bool) -> bool {
        match self.get_mut(id) {
            Some(instance) => {
                instance.set_enabled(enabled);
                true
            }
            None => {
                trace!(skill = %id, "set_enabled: not owned");
                false
            }
        }
    }

    /// Returns an instance to Idle immediately.
    pub fn reset_cooldown(&mut self, id: &SkillId) -> bool {
        match self.get_mut(id) {
            Some(instance) => {
                instance.reset_cooldown();
                true
            }
            None => {
                trace!(skill = %id, "reset_cooldown: not owned");
                false
            }
        }
    }

    /// Counts every Cooling instance down by `dt`.
    pub fn tick(&mut self, dt: f32) {
        for instance in &mut self.instances {
            instance.tick(dt);
        }
    }

    /// Fires every enabled, autofire, Idle instance.
    ///
    /// Scheduler changes requested by payloads are applied after the pass.
    /// Returns how many instances fired.
    pub fn try_activate_all(&mut self, caster: &mut C) -> usize {
        let mut commands = Vec::new();
        let mut fired = 0;

        for instance in &mut self.instances {
            if !instance.definition().autofire || !instance.is_ready() {
                continue;
            }
            Self::fire(instance, &self.payloads, caster, &mut commands);
            fired += 1;
        }

        self.apply_commands(commands);
        fired
    }

    /// Fires one skill on demand (player input), with the same gating as autofire.
    ///
    /// Missing, disabled or cooling skills are a silent no-op returning false.
    pub fn activate(&mut self, id: &SkillId, caster: &mut C) -> bool {
        let mut commands = Vec::new();
        let Some(instance) = self.instances.iter_mut().find(|i| i.id() == id) else {
            trace!(skill = %id, "activate: not owned");
            return false;
        };
        if !instance.is_ready() {
            trace!(skill = %id, state = ?instance.state(), enabled = instance.enabled(), "activate: not ready");
            return false;
        }

        Self::fire(instance, &self.payloads, caster, &mut commands);
        self.apply_commands(commands);
        true
    }

    fn fire(
        instance: &mut SkillInstance,
        payloads: &PayloadRegistry<C>,
        caster: &mut C,
        commands: &mut Vec<SchedulerCommand>,
    ) {
        let level = instance.effective_level();
        match payloads.get(&instance.definition().payload) {
            Some(payload) => {
                let mut cast = Cast::new(caster, instance.id(), level, commands);
                payload.invoke(&mut cast);
            }
            None => {
                warn!(
                    skill = %instance.id(),
                    payload = %instance.definition().payload,
                    "no payload registered"
                );
            }
        }
        instance.start_cooldown(level);
        trace!(skill = %instance.id(), level, cooldown = instance.cooldown_remaining(), "skill fired");
    }

    /// Applies queued scheduler changes in order.
    pub fn apply_commands(&mut self, commands: impl IntoIterator<Item = SchedulerCommand>) {
        for command in commands {
            match command {
                SchedulerCommand::AddSkill { id, level } => {
                    self.add_skill(&id, level);
                }
                SchedulerCommand::RemoveSkill(id) => {
                    self.remove_skill(&id);
                }
                SchedulerCommand::LevelUp(id) => {
                    if let Err(e) = self.level_up(&id) {
                        debug!(error = %e, "deferred level_up ignored");
                    }
                }
                SchedulerCommand::SetEnabled { id, enabled } => {
                    self.set_enabled(&id, enabled);
                }
                SchedulerCommand::ResetCooldown(id) => {
                    self.reset_cooldown(&id);
                }
            }
        }
    }
}

impl<C: ?Sized> OwnedLevels for SkillScheduler<C> {
    fn level_of(&self, id: &SkillId) -> u32 {
        self.instances.level_of(id)
    }
}
