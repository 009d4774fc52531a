//! Two-phase level-up selection.
//!
//! ```text
//! grant_xp ──► pending level-ups ──► begin_selection ──► (host pauses, player picks)
//!                                          │                         │
//!                                   NothingToOffer          complete_selection
//!                                                                    │
//!                                                               apply_offer
//! ```

use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info};

use super::{EventQueue, Experience, ProgressionEvent};
use crate::config::ProgressionConfig;
use crate::error::{LevelUpError, SelectionError};
use crate::offers::{OfferGenerator, SkillOffer};
use crate::skills::{OwnedLevels, SkillCatalog, SkillId, SkillInstance, SkillScheduler};
use crate::stats::StatModifierEngine;

/// Feeds a chosen offer back into the scheduler and the stat engine.
///
/// Unowned skills are granted at level 1, owned ones gain one level. A
/// passive bonus on the definition replaces the skill's previous passive at
/// the resulting level. Returns the event describing the change.
pub fn apply_offer<C: ?Sized>(
    offer: &SkillOffer,
    scheduler: &mut SkillScheduler<C>,
    stats: &mut StatModifierEngine,
) -> Result<ProgressionEvent, LevelUpError> {
    let skill = offer.id().clone();

    let (level, event) = if scheduler.get(&skill).is_some() {
        let level = scheduler.level_up(&skill)?;
        (level, ProgressionEvent::SkillUpgraded { skill, level })
    } else {
        scheduler.insert_instance(SkillInstance::new(Arc::clone(&offer.definition), 1));
        (1, ProgressionEvent::SkillAcquired { skill })
    };

    if let Some(passive) = offer.definition.passive {
        stats.set_passive(offer.id(), passive.modifier_at(level));
    }
    Ok(event)
}

/// Removes an owned skill together with the passive it grants.
pub fn revoke_skill<C: ?Sized>(
    id: &SkillId,
    scheduler: &mut SkillScheduler<C>,
    stats: &mut StatModifierEngine,
) -> Option<SkillInstance> {
    let removed = scheduler.remove_skill(id)?;
    stats.remove_passive(id);
    info!(skill = %id, "skill revoked");
    Some(removed)
}

/// Brings the passive layer in line with the skills `scheduler` owns.
///
/// Payload commands (grant, remove, level up) change the scheduler without
/// touching stats; hosts call this after each activation pass. Returns how
/// many passives were withdrawn.
pub fn sync_passives<C: ?Sized>(
    scheduler: &SkillScheduler<C>,
    stats: &mut StatModifierEngine,
) -> usize {
    let withdrawn = stats.retain_passives(|id| scheduler.get(id).is_some());
    for instance in scheduler.instances() {
        let Some(passive) = instance.definition().passive else {
            continue;
        };
        let modifier = passive.modifier_at(instance.level());
        if stats.passive(instance.id()) != Some(&modifier) {
            stats.set_passive(instance.id(), modifier);
        }
    }
    withdrawn
}

/// Drives experience, pending level-ups and the offer selection.
#[derive(Debug)]
pub struct LevelUpFlow {
    generator: OfferGenerator,
    config: ProgressionConfig,
    experience: Experience,
    offers: Option<Vec<SkillOffer>>,
    events: EventQueue,
}

impl LevelUpFlow {
    pub fn new(generator: OfferGenerator, config: ProgressionConfig) -> Self {
        Self {
            generator,
            config,
            experience: Experience::new(),
            offers: None,
            events: EventQueue::default(),
        }
    }

    pub fn experience(&self) -> &Experience {
        &self.experience
    }

    pub fn config(&self) -> &ProgressionConfig {
        &self.config
    }

    pub fn events(&self) -> &EventQueue {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventQueue {
        &mut self.events
    }

    /// True while offers are presented and awaiting a choice.
    pub fn is_selecting(&self) -> bool {
        self.offers.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.experience.pending() > 0
    }

    /// Offers of the selection in progress, empty otherwise.
    pub fn offers(&self) -> &[SkillOffer] {
        self.offers.as_deref().unwrap_or_default()
    }

    /// Adds experience. Returns how many levels were gained.
    pub fn grant_xp(&mut self, amount: u32) -> u32 {
        let before = self.experience.level();
        let gained = self.experience.gain(
            amount,
            &self.config.level_curve,
            self.config.max_pending_level_ups,
        );
        for level in before + 1..=before + gained {
            info!(level, "player leveled up");
            self.events.push(ProgressionEvent::LeveledUp { level });
        }
        gained
    }

    /// Starts a selection for the next pending level-up.
    ///
    /// Returns the presented offers, or `None` when nothing is pending or the
    /// eligible pool is empty. An empty pool still consumes the level-up.
    /// Calling this while already selecting returns the current offers.
    pub fn begin_selection<O, R>(
        &mut self,
        catalog: &SkillCatalog,
        owned: &O,
        rng: &mut R,
    ) -> Option<&[SkillOffer]>
    where
        O: OwnedLevels + ?Sized,
        R: Rng + ?Sized,
    {
        if self.offers.is_none() {
            if !self.experience.take_pending() {
                return None;
            }

            let offers = self
                .generator
                .generate(catalog, owned, self.config.offer_count, rng);
            if offers.is_empty() {
                debug!(level = self.experience.level(), "nothing to offer");
                self.events.push(ProgressionEvent::NothingToOffer {
                    level: self.experience.level(),
                });
                return None;
            }

            self.events.push(ProgressionEvent::OffersPresented {
                skills: offers.iter().map(|o| o.id().clone()).collect(),
            });
            self.offers = Some(offers);
        }
        self.offers.as_deref()
    }

    /// Ends the selection with the offer at `choice`.
    ///
    /// An out-of-range choice leaves the selection open.
    pub fn complete_selection(&mut self, choice: usize) -> Result<SkillOffer, SelectionError> {
        let offers = self.offers.as_mut().ok_or(SelectionError::NotSelecting)?;
        if choice >= offers.len() {
            return Err(SelectionError::InvalidChoice {
                choice,
                available: offers.len(),
            });
        }

        let offer = offers.swap_remove(choice);
        self.offers = None;
        self.events.push(ProgressionEvent::SelectionCompleted {
            skill: offer.id().clone(),
            choice,
        });
        Ok(offer)
    }

    /// [`apply_offer`] that records the resulting event.
    pub fn apply_offer<C: ?Sized>(
        &mut self,
        offer: &SkillOffer,
        scheduler: &mut SkillScheduler<C>,
        stats: &mut StatModifierEngine,
    ) -> Result<(), LevelUpError> {
        let event = apply_offer(offer, scheduler, stats)?;
        self.events.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::offers::RarityWeights;
    use crate::progression::LevelCurve;
    use crate::skills::{
        CooldownCurve, PayloadRegistry, Rarity, SchedulerCommand, SkillDefinition, SkillId,
    };
    use crate::stats::{ActiveModifier, ModifierOp, StatKey, StatTable};

    fn catalog() -> Arc<SkillCatalog> {
        Arc::new(
            SkillCatalog::new([
                SkillDefinition::new("plating", 3, CooldownCurve::Fixed(0.0))
                    .with_passive(StatKey::MaxHealth, ModifierOp::Add(10.0))
                    .manual(),
                SkillDefinition::new("bolt", 2, CooldownCurve::Fixed(1.0))
                    .with_rarity(Rarity::Uncommon, Rarity::Rare),
            ])
            .unwrap(),
        )
    }

    fn flow() -> LevelUpFlow {
        let config = ProgressionConfig {
            level_curve: LevelCurve {
                base: 10,
                growth: 1.0,
            },
            ..ProgressionConfig::with_offer_count(3)
        };
        LevelUpFlow::new(OfferGenerator::new(RarityWeights::default()).unwrap(), config)
    }

    fn scheduler(catalog: &Arc<SkillCatalog>) -> SkillScheduler<()> {
        SkillScheduler::new(Arc::clone(catalog), PayloadRegistry::new())
    }

    #[test]
    fn selection_requires_a_pending_level_up() {
        let catalog = catalog();
        let scheduler = scheduler(&catalog);
        let mut flow = flow();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(flow.begin_selection(&catalog, &scheduler, &mut rng).is_none());
        assert_eq!(flow.complete_selection(0), Err(SelectionError::NotSelecting));

        assert_eq!(flow.grant_xp(10), 1);
        let offers = flow.begin_selection(&catalog, &scheduler, &mut rng).unwrap();
        assert_eq!(offers.len(), 2);
        assert!(flow.is_selecting());
        assert!(!flow.has_pending());
    }

    #[test]
    fn invalid_choice_keeps_selection_open() {
        let catalog = catalog();
        let scheduler = scheduler(&catalog);
        let mut flow = flow();
        let mut rng = StdRng::seed_from_u64(2);

        flow.grant_xp(10);
        flow.begin_selection(&catalog, &scheduler, &mut rng);
        assert_eq!(
            flow.complete_selection(5),
            Err(SelectionError::InvalidChoice {
                choice: 5,
                available: 2
            })
        );
        assert!(flow.is_selecting());
        assert!(flow.complete_selection(1).is_ok());
        assert!(!flow.is_selecting());
    }

    #[test]
    fn applying_offers_grants_then_upgrades_with_passive() {
        let catalog = catalog();
        let mut scheduler = scheduler(&catalog);
        let mut stats = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));
        let mut flow = flow();
        let plating = SkillId::new("plating");
        let definition = Arc::clone(catalog.get(&plating).unwrap());

        let offer = SkillOffer::new(Arc::clone(&definition), 0, Rarity::Common);
        flow.apply_offer(&offer, &mut scheduler, &mut stats).unwrap();
        assert_eq!(scheduler.level_of(&plating), 1);
        assert_eq!(stats.get(StatKey::MaxHealth), 110.0);

        let offer = SkillOffer::new(Arc::clone(&definition), 1, Rarity::Common);
        flow.apply_offer(&offer, &mut scheduler, &mut stats).unwrap();
        assert_eq!(scheduler.level_of(&plating), 2);
        assert_eq!(stats.get(StatKey::MaxHealth), 120.0);
        assert_eq!(stats.passives().count(), 1);
        assert!(stats.modifiers().is_empty());

        let events: Vec<_> = flow.events_mut().drain().collect();
        assert_eq!(
            events,
            vec![
                ProgressionEvent::SkillAcquired {
                    skill: plating.clone()
                },
                ProgressionEvent::SkillUpgraded {
                    skill: plating,
                    level: 2
                },
            ]
        );
    }

    #[test]
    fn exhausted_pool_consumes_level_up() {
        let catalog = catalog();
        let mut scheduler = scheduler(&catalog);
        scheduler.add_skill(&SkillId::new("plating"), 3);
        scheduler.add_skill(&SkillId::new("bolt"), 2);
        let mut flow = flow();
        let mut rng = StdRng::seed_from_u64(3);

        flow.grant_xp(20);
        assert!(flow.begin_selection(&catalog, &scheduler, &mut rng).is_none());
        assert_eq!(flow.experience().pending(), 1);

        let events: Vec<_> = flow.events_mut().drain().collect();
        assert_eq!(
            events.last(),
            Some(&ProgressionEvent::NothingToOffer { level: 3 })
        );
    }

    fn armour_catalog() -> Arc<SkillCatalog> {
        Arc::new(
            SkillCatalog::new([
                SkillDefinition::new("plating", 3, CooldownCurve::Fixed(0.0))
                    .with_passive(StatKey::MaxHealth, ModifierOp::Add(10.0))
                    .manual(),
                SkillDefinition::new("hull", 3, CooldownCurve::Fixed(0.0))
                    .with_passive(StatKey::MaxHealth, ModifierOp::Add(15.0))
                    .manual(),
            ])
            .unwrap(),
        )
    }

    fn acquire(catalog: &SkillCatalog, id: &str) -> SkillOffer {
        let definition = catalog.get(&SkillId::new(id)).unwrap();
        SkillOffer::new(Arc::clone(definition), 0, Rarity::Common)
    }

    #[test]
    fn passives_of_different_skills_stack_and_outlive_timed_buffs() {
        let catalog = armour_catalog();
        let mut scheduler = scheduler(&catalog);
        let mut stats = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));

        apply_offer(&acquire(&catalog, "plating"), &mut scheduler, &mut stats).unwrap();
        apply_offer(&acquire(&catalog, "hull"), &mut scheduler, &mut stats).unwrap();
        assert_eq!(stats.get(StatKey::MaxHealth), 125.0);

        stats.apply(ActiveModifier::add(StatKey::MaxHealth, 5.0, 1.0));
        assert_eq!(stats.get(StatKey::MaxHealth), 130.0);
        stats.tick(1.0);
        assert_eq!(stats.get(StatKey::MaxHealth), 125.0);
    }

    #[test]
    fn revoking_a_skill_withdraws_its_passive() {
        let catalog = armour_catalog();
        let mut scheduler = scheduler(&catalog);
        let mut stats = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));
        apply_offer(&acquire(&catalog, "plating"), &mut scheduler, &mut stats).unwrap();
        apply_offer(&acquire(&catalog, "hull"), &mut scheduler, &mut stats).unwrap();

        let plating = SkillId::new("plating");
        assert!(revoke_skill(&plating, &mut scheduler, &mut stats).is_some());
        assert!(scheduler.get(&plating).is_none());
        assert_eq!(stats.get(StatKey::MaxHealth), 115.0);

        assert!(revoke_skill(&plating, &mut scheduler, &mut stats).is_none());
        assert_eq!(stats.get(StatKey::MaxHealth), 115.0);
    }

    #[test]
    fn sync_follows_deferred_skill_commands() {
        let catalog = armour_catalog();
        let mut scheduler = scheduler(&catalog);
        let mut stats = StatModifierEngine::new(StatTable::default().with(StatKey::MaxHealth, 100.0));
        apply_offer(&acquire(&catalog, "plating"), &mut scheduler, &mut stats).unwrap();

        scheduler.apply_commands([
            SchedulerCommand::RemoveSkill(SkillId::new("plating")),
            SchedulerCommand::AddSkill {
                id: SkillId::new("hull"),
                level: 2,
            },
        ]);
        assert_eq!(stats.get(StatKey::MaxHealth), 110.0);

        assert_eq!(sync_passives(&scheduler, &mut stats), 1);
        assert_eq!(stats.get(StatKey::MaxHealth), 130.0);
        assert!(stats.passive(&SkillId::new("plating")).is_none());

        assert_eq!(sync_passives(&scheduler, &mut stats), 0);
        assert_eq!(stats.get(StatKey::MaxHealth), 130.0);
    }
}
