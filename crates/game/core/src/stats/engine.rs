//! Composition of a base table with an ordered modifier list.
//!
//! The engine keeps two layers on top of the base table. Skill passives sit
//! in their own permanent layer keyed by the granting skill, so they never
//! share a slot with each other or with the (stat, kind) keyed buffs applied
//! after them.

use tracing::{debug, trace};

use super::{ActiveModifier, ModifierKind, StatKey, StatTable};
use crate::skills::SkillId;

/// Computes a derived table from `base` and `modifiers`.
///
/// Starts from a copy of `base` and applies each modifier, in iteration order,
/// to the running value of its stat. The result depends only on the inputs.
pub fn recompute<'a>(
    base: &StatTable,
    modifiers: impl IntoIterator<Item = &'a ActiveModifier>,
) -> StatTable {
    modifiers.into_iter().fold(*base, |mut working, modifier| {
        let current = working.get(modifier.stat);
        working.set(modifier.stat, modifier.op.apply(current));
        working
    })
}

/// Outcome of [`StatModifierEngine::apply`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// A new slot was appended at the end of the list.
    Inserted,
    /// An existing slot with the same (stat, kind) key was overwritten in place.
    Refreshed,
}

/// Owns one actor's base stats, active modifiers and derived snapshot.
///
/// Derived = base, then passives in acquisition order, then modifiers in
/// application order. Every mutation recomputes the derived table before
/// returning, so [`derived`](Self::derived) is never stale.
#[derive(Clone, Debug, PartialEq)]
pub struct StatModifierEngine {
    base: StatTable,
    passives: Vec<(SkillId, ActiveModifier)>,
    modifiers: Vec<ActiveModifier>,
    derived: StatTable,
}

impl StatModifierEngine {
    pub fn new(base: StatTable) -> Self {
        Self {
            base,
            passives: Vec::new(),
            modifiers: Vec::new(),
            derived: base,
        }
    }

    /// Current derived snapshot.
    #[inline]
    pub fn derived(&self) -> StatTable {
        self.derived
    }

    /// Shorthand for `derived().get(stat)`.
    #[inline]
    pub fn get(&self, stat: StatKey) -> f32 {
        self.derived.get(stat)
    }

    pub fn base(&self) -> StatTable {
        self.base
    }

    /// Active modifiers in application order.
    pub fn modifiers(&self) -> &[ActiveModifier] {
        &self.modifiers
    }

    /// Skill passives in acquisition order.
    pub fn passives(&self) -> impl Iterator<Item = (&SkillId, &ActiveModifier)> {
        self.passives.iter().map(|(source, modifier)| (source, modifier))
    }

    /// Passive currently granted by `source`.
    pub fn passive(&self, source: &SkillId) -> Option<&ActiveModifier> {
        self.passives
            .iter()
            .find(|(id, _)| id == source)
            .map(|(_, modifier)| modifier)
    }

    /// Sets the passive granted by `source`, replacing its previous one.
    ///
    /// The stored modifier is always permanent, whatever duration was passed.
    pub fn set_passive(&mut self, source: &SkillId, modifier: ActiveModifier) -> ApplyOutcome {
        let modifier = ActiveModifier::permanent(modifier.stat, modifier.op);
        let outcome = match self.passives.iter_mut().find(|(id, _)| id == source) {
            Some((_, existing)) => {
                *existing = modifier;
                ApplyOutcome::Refreshed
            }
            None => {
                self.passives.push((source.clone(), modifier));
                ApplyOutcome::Inserted
            }
        };
        debug!(%source, stat = %modifier.stat, ?outcome, "set skill passive");
        self.refresh();
        outcome
    }

    /// Withdraws the passive granted by `source`. Absent sources are a no-op.
    pub fn remove_passive(&mut self, source: &SkillId) -> Option<ActiveModifier> {
        let Some(index) = self.passives.iter().position(|(id, _)| id == source) else {
            trace!(%source, "remove on absent passive ignored");
            return None;
        };
        let (_, removed) = self.passives.remove(index);
        debug!(%source, stat = %removed.stat, "withdrew skill passive");
        self.refresh();
        Some(removed)
    }

    /// Keeps only the passives whose source satisfies `keep`.
    ///
    /// Returns how many were withdrawn.
    pub fn retain_passives(&mut self, mut keep: impl FnMut(&SkillId) -> bool) -> usize {
        let before = self.passives.len();
        self.passives.retain(|(id, _)| keep(id));
        let withdrawn = before - self.passives.len();
        if withdrawn > 0 {
            debug!(withdrawn, "withdrew skill passives");
            self.refresh();
        }
        withdrawn
    }

    /// Replaces the base table, e.g. after a difficulty preset change.
    pub fn set_base(&mut self, base: StatTable) {
        self.base = base;
        self.refresh();
    }

    /// Adds a modifier, or refreshes the one sharing its (stat, kind) key.
    ///
    /// A refresh overwrites the operation and duration but keeps the slot's
    /// position in the application order.
    pub fn apply(&mut self, modifier: ActiveModifier) -> ApplyOutcome {
        let key = modifier.key();
        let outcome = match self.modifiers.iter_mut().find(|m| m.key() == key) {
            Some(existing) => {
                *existing = modifier;
                ApplyOutcome::Refreshed
            }
            None => {
                self.modifiers.push(modifier);
                ApplyOutcome::Inserted
            }
        };
        debug!(stat = %key.stat, kind = %key.kind, ?outcome, "applied stat modifier");
        self.refresh();
        outcome
    }

    /// Removes the modifier with the given key. Absent keys are a no-op.
    pub fn remove(&mut self, stat: StatKey, kind: ModifierKind) -> Option<ActiveModifier> {
        let Some(index) = self
            .modifiers
            .iter()
            .position(|m| m.stat == stat && m.op.kind() == kind)
        else {
            trace!(%stat, %kind, "remove on absent modifier ignored");
            return None;
        };
        let removed = self.modifiers.remove(index);
        self.refresh();
        Some(removed)
    }

    /// Drops every timed modifier, keeping permanent ones.
    pub fn clear_timed(&mut self) {
        let before = self.modifiers.len();
        self.modifiers.retain(|m| m.duration.is_permanent());
        if self.modifiers.len() != before {
            self.refresh();
        }
    }

    /// Counts down timed modifiers and removes the expired ones.
    ///
    /// Returns how many expired this tick.
    pub fn tick(&mut self, dt: f32) -> usize {
        let before = self.modifiers.len();
        self.modifiers.retain_mut(|m| !m.advance(dt));
        let expired = before - self.modifiers.len();
        if expired > 0 {
            debug!(expired, "stat modifiers expired");
            self.refresh();
        }
        expired
    }

    fn refresh(&mut self) {
        let layered = self
            .passives
            .iter()
            .map(|(_, modifier)| modifier)
            .chain(&self.modifiers);
        self.derived = recompute(&self.base, layered);
    }
}

impl Default for StatModifierEngine {
    fn default() -> Self {
        Self::new(StatTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::ModifierOp;

    fn base() -> StatTable {
        StatTable::default().with(StatKey::MovementSpeed, 10.0)
    }

    #[test]
    fn empty_modifier_list_is_identity() {
        assert_eq!(recompute(&base(), &[] as &[ActiveModifier]), base());
    }

    #[test]
    fn add_is_applied_to_base() {
        let result = recompute(&base(), &[ActiveModifier::add(StatKey::MovementSpeed, 10.0, 0.0)]);
        assert_eq!(result[StatKey::MovementSpeed], 20.0);
    }

    #[test]
    fn multiplies_compose() {
        let result = recompute(
            &base(),
            &[
                ActiveModifier::multiply(StatKey::MovementSpeed, 1.5, 0.0),
                ActiveModifier::multiply(StatKey::MovementSpeed, 2.0, 0.0),
            ],
        );
        assert_eq!(result[StatKey::MovementSpeed], 10.0 * 1.5 * 2.0);
    }

    #[test]
    fn override_ignores_base() {
        let result = recompute(
            &base(),
            &[ActiveModifier::override_with(StatKey::MovementSpeed, 5.0, 0.0)],
        );
        assert_eq!(result[StatKey::MovementSpeed], 5.0);
    }

    #[test]
    fn order_of_mixed_kinds_matters() {
        let add = ActiveModifier::add(StatKey::MovementSpeed, 10.0, 0.0);
        let mul = ActiveModifier::multiply(StatKey::MovementSpeed, 1.5, 0.0);

        let add_first = recompute(&base(), &[add, mul]);
        let mul_first = recompute(&base(), &[mul, add]);

        assert_eq!(add_first[StatKey::MovementSpeed], 30.0);
        assert_eq!(mul_first[StatKey::MovementSpeed], 25.0);
    }

    #[test]
    fn modifiers_on_other_stats_are_untouched() {
        let result = recompute(&base(), &[ActiveModifier::add(StatKey::Mass, 2.0, 0.0)]);
        assert_eq!(result[StatKey::MovementSpeed], 10.0);
        assert_eq!(result[StatKey::Mass], base()[StatKey::Mass] + 2.0);
    }

    #[test]
    fn reapplying_same_key_refreshes_in_place() {
        let mut engine = StatModifierEngine::new(base());
        assert_eq!(
            engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 1.5, 3.0)),
            ApplyOutcome::Inserted
        );
        engine.apply(ActiveModifier::add(StatKey::MovementSpeed, 2.0, 0.0));
        assert_eq!(
            engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 2.0, 5.0)),
            ApplyOutcome::Refreshed
        );

        assert_eq!(engine.modifiers().len(), 2);
        assert_eq!(engine.modifiers()[0].op, ModifierOp::Multiply(2.0));
        // Refreshed slot keeps its place ahead of the Add.
        assert_eq!(engine.get(StatKey::MovementSpeed), 10.0 * 2.0 + 2.0);
    }

    #[test]
    fn add_and_multiply_on_same_stat_are_separate_slots() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::add(StatKey::MovementSpeed, 1.0, 0.0));
        engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 2.0, 0.0));
        assert_eq!(engine.modifiers().len(), 2);
    }

    #[test]
    fn expiry_recomputes_snapshot() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 2.0, 1.0));
        engine.apply(ActiveModifier::add(StatKey::MovementSpeed, 1.0, 0.0));
        assert_eq!(engine.get(StatKey::MovementSpeed), 21.0);

        assert_eq!(engine.tick(0.5), 0);
        assert_eq!(engine.get(StatKey::MovementSpeed), 21.0);

        assert_eq!(engine.tick(0.5), 1);
        assert_eq!(engine.get(StatKey::MovementSpeed), 11.0);
        assert_eq!(engine.modifiers().len(), 1);

        // Permanent ones survive arbitrarily long ticks.
        assert_eq!(engine.tick(10_000.0), 0);
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::add(StatKey::Mass, 1.0, 0.0));
        assert!(engine.remove(StatKey::Mass, ModifierKind::Multiply).is_none());
        assert_eq!(engine.modifiers().len(), 1);

        assert!(engine.remove(StatKey::Mass, ModifierKind::Add).is_some());
        assert_eq!(engine.derived(), base());
    }

    #[test]
    fn set_base_recomputes() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::add(StatKey::MovementSpeed, 5.0, 0.0));
        engine.set_base(base().with(StatKey::MovementSpeed, 100.0));
        assert_eq!(engine.get(StatKey::MovementSpeed), 105.0);
    }

    #[test]
    fn clear_timed_keeps_permanent() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::add(StatKey::MovementSpeed, 5.0, 0.0));
        engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 3.0, 4.0));
        engine.clear_timed();
        assert_eq!(engine.modifiers().len(), 1);
        assert_eq!(engine.get(StatKey::MovementSpeed), 15.0);
    }

    #[test]
    fn passives_on_same_key_accumulate() {
        let mut engine = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));
        let plating = SkillId::new("plating");
        let hull = SkillId::new("hull");

        engine.set_passive(&plating, ActiveModifier::add(StatKey::MaxHealth, 10.0, 0.0));
        engine.set_passive(&hull, ActiveModifier::add(StatKey::MaxHealth, 15.0, 0.0));
        assert_eq!(engine.get(StatKey::MaxHealth), 125.0);

        assert_eq!(
            engine.set_passive(&plating, ActiveModifier::add(StatKey::MaxHealth, 20.0, 0.0)),
            ApplyOutcome::Refreshed
        );
        assert_eq!(engine.get(StatKey::MaxHealth), 135.0);
        assert_eq!(engine.passives().count(), 2);
    }

    #[test]
    fn timed_buff_on_passive_key_leaves_passives_intact() {
        let mut engine = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));
        engine.set_passive(&SkillId::new("plating"), ActiveModifier::add(StatKey::MaxHealth, 10.0, 0.0));
        engine.set_passive(&SkillId::new("hull"), ActiveModifier::add(StatKey::MaxHealth, 15.0, 0.0));

        assert_eq!(
            engine.apply(ActiveModifier::add(StatKey::MaxHealth, 5.0, 1.0)),
            ApplyOutcome::Inserted
        );
        assert_eq!(engine.get(StatKey::MaxHealth), 130.0);

        assert_eq!(engine.tick(1.0), 1);
        assert_eq!(engine.get(StatKey::MaxHealth), 125.0);
        assert!(engine.modifiers().is_empty());

        engine.apply(ActiveModifier::add(StatKey::MaxHealth, 5.0, 1.0));
        engine.clear_timed();
        assert_eq!(engine.get(StatKey::MaxHealth), 125.0);
    }

    #[test]
    fn passives_apply_before_modifiers_and_stay_permanent() {
        let mut engine = StatModifierEngine::new(base());
        engine.apply(ActiveModifier::multiply(StatKey::MovementSpeed, 2.0, 0.0));
        engine.set_passive(&SkillId::new("boots"), ActiveModifier::add(StatKey::MovementSpeed, 5.0, 3.0));

        assert_eq!(engine.get(StatKey::MovementSpeed), (10.0 + 5.0) * 2.0);
        assert!(engine.passive(&SkillId::new("boots")).unwrap().duration.is_permanent());
        assert_eq!(engine.tick(10.0), 0);
        assert_eq!(engine.get(StatKey::MovementSpeed), 30.0);
    }

    #[test]
    fn withdrawing_passives() {
        let mut engine = StatModifierEngine::new(base());
        let boots = SkillId::new("boots");
        let wings = SkillId::new("wings");
        engine.set_passive(&boots, ActiveModifier::add(StatKey::MovementSpeed, 5.0, 0.0));
        engine.set_passive(&wings, ActiveModifier::add(StatKey::MovementSpeed, 1.0, 0.0));

        assert!(engine.remove_passive(&SkillId::new("absent")).is_none());
        assert!(engine.remove_passive(&boots).is_some());
        assert_eq!(engine.get(StatKey::MovementSpeed), 11.0);

        assert_eq!(engine.retain_passives(|id| id != &wings), 1);
        assert_eq!(engine.derived(), base());
    }
}
