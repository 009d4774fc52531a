//! Host-provided code that runs when a skill fires.

use std::collections::HashMap;
use std::fmt;

use super::{PayloadKey, SkillId};

/// Scheduler mutation requested from inside a payload.
///
/// Payloads run while the scheduler is iterating its instances, so these are
/// queued and applied once the activation pass has finished.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SchedulerCommand {
    AddSkill { id: SkillId, level: u32 },
    RemoveSkill(SkillId),
    LevelUp(SkillId),
    SetEnabled { id: SkillId, enabled: bool },
    ResetCooldown(SkillId),
}

/// Everything a payload sees when its skill fires.
pub struct Cast<'a, C: ?Sized> {
    /// Host context of the caster (world access, the player's trackers, ...).
    pub caster: &'a mut C,
    skill: &'a SkillId,
    level: u32,
    commands: &'a mut Vec<SchedulerCommand>,
}

impl<'a, C: ?Sized> Cast<'a, C> {
    pub fn new(
        caster: &'a mut C,
        skill: &'a SkillId,
        level: u32,
        commands: &'a mut Vec<SchedulerCommand>,
    ) -> Self {
        Self {
            caster,
            skill,
            level,
            commands,
        }
    }

    /// The skill being cast.
    pub fn skill(&self) -> &SkillId {
        self.skill
    }

    /// Effective level of the cast, never below 1.
    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn defer(&mut self, command: SchedulerCommand) {
        self.commands.push(command);
    }

    pub fn grant_skill(&mut self, id: SkillId, level: u32) {
        self.defer(SchedulerCommand::AddSkill { id, level });
    }

    pub fn remove_skill(&mut self, id: SkillId) {
        self.defer(SchedulerCommand::RemoveSkill(id));
    }

    pub fn level_up(&mut self, id: SkillId) {
        self.defer(SchedulerCommand::LevelUp(id));
    }

    pub fn set_enabled(&mut self, id: SkillId, enabled: bool) {
        self.defer(SchedulerCommand::SetEnabled { id, enabled });
    }

    pub fn reset_cooldown(&mut self, id: SkillId) {
        self.defer(SchedulerCommand::ResetCooldown(id));
    }
}

/// Code run when a skill fires. Opaque to the scheduler.
pub trait SkillPayload<C: ?Sized> {
    fn invoke(&self, cast: &mut Cast<'_, C>);
}

impl<C, F> SkillPayload<C> for F
where
    C: ?Sized,
    F: Fn(&mut Cast<'_, C>),
{
    fn invoke(&self, cast: &mut Cast<'_, C>) {
        self(cast)
    }
}

/// Payloads registered by the host, keyed by [`PayloadKey`].
pub struct PayloadRegistry<C: ?Sized> {
    payloads: HashMap<PayloadKey, Box<dyn SkillPayload<C>>>,
}

impl<C: ?Sized> PayloadRegistry<C> {
    pub fn new() -> Self {
        Self {
            payloads: HashMap::new(),
        }
    }

    /// Registers a payload type under `key`, replacing any previous one.
    pub fn register<P>(&mut self, key: impl Into<String>, payload: P)
    where
        P: SkillPayload<C> + 'static,
    {
        self.payloads
            .insert(PayloadKey::new(key), Box::new(payload));
    }

    /// Registers a closure under `key`, replacing any previous one.
    pub fn register_fn<F>(&mut self, key: impl Into<String>, payload: F)
    where
        F: Fn(&mut Cast<'_, C>) + 'static,
    {
        self.register(key, payload);
    }

    /// Builder form of [`register_fn`](Self::register_fn).
    #[must_use]
    pub fn with_fn<F>(mut self, key: impl Into<String>, payload: F) -> Self
    where
        F: Fn(&mut Cast<'_, C>) + 'static,
    {
        self.register_fn(key, payload);
        self
    }

    pub fn get(&self, key: &PayloadKey) -> Option<&dyn SkillPayload<C>> {
        self.payloads.get(key).map(|payload| &**payload)
    }

    pub fn contains(&self, key: &PayloadKey) -> bool {
        self.payloads.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

impl<C: ?Sized> Default for PayloadRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: ?Sized> fmt::Debug for PayloadRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.payloads.keys().map(PayloadKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("PayloadRegistry").field("keys", &keys).finish()
    }
}
