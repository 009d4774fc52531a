//! The per-frame host loop.
//!
//! One [`WaveSim::step`] runs, in order:
//!
//! 1. skill cooldown tick, then the autofire pass and passive sync
//! 2. enemy effect tick (Burn/Poison damage, expiry)
//! 3. player modifier and effect expiry, regeneration
//! 4. enemy movement using `movement_multiplier()` / `can_act()`
//! 5. kills grant experience
//! 6. pending level-ups run the two-phase selection (first offer is taken)
//! 7. progression events are drained into the log

use std::sync::Arc;

use progression_content::ContentFactory;
use progression_core::{
    DamageSink, LevelUpFlow, OfferGenerator, ProgressionConfig, ProgressionEvent, RarityWeights,
    SkillCatalog, SkillId, SkillScheduler, StatTable, sync_passives,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::payloads::demo_payloads;
use crate::world::{Arena, Player};

/// Authored inputs of a run.
#[derive(Clone, Debug)]
pub struct SimContent {
    pub catalog: SkillCatalog,
    pub weights: RarityWeights,
    pub config: ProgressionConfig,
    pub base_stats: StatTable,
}

impl SimContent {
    /// Loads everything from `config.data_dir`, picking the configured difficulty.
    pub fn load(config: &RuntimeConfig) -> Result<Self> {
        let factory = ContentFactory::new(config.data_dir.clone());
        let content = |e: anyhow::Error| RuntimeError::Content(format!("{e:#}"));

        let presets = factory.load_stat_presets().map_err(content)?;
        let base_stats = presets
            .get(&config.difficulty)
            .ok_or_else(|| RuntimeError::UnknownDifficulty(config.difficulty.clone()))?;

        Ok(Self {
            catalog: factory.load_catalog().map_err(content)?,
            weights: factory.load_rarity_weights().map_err(content)?,
            config: factory.load_config().map_err(content)?,
            base_stats,
        })
    }
}

/// Summary of a finished run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SimReport {
    pub elapsed: f32,
    pub frames: u64,
    pub waves: u32,
    pub kills: u32,
    pub casts: u64,
    pub player_level: u32,
    pub selections: u32,
    pub empty_selections: u32,
    pub direct_damage: f32,
    pub effect_damage: f32,
    pub survived: bool,
    /// Owned skills and their levels, in acquisition order.
    pub skills: Vec<(SkillId, u32)>,
}

pub struct WaveSim {
    arena: Arena,
    scheduler: SkillScheduler<Arena>,
    flow: LevelUpFlow,
    rng: StdRng,
    enemies_per_wave: u32,
    report: SimReport,
}

impl WaveSim {
    pub fn new(content: SimContent, config: &RuntimeConfig) -> Result<Self> {
        let SimContent {
            catalog,
            weights,
            config: progression,
            base_stats,
        } = content;

        let interval = progression.periodic_interval;
        let arena = Arena::new(Player::new(base_stats, interval), interval);

        let mut scheduler = SkillScheduler::new(Arc::new(catalog), demo_payloads());
        let starting = SkillId::new(config.starting_skill.as_str());
        if !scheduler.add_skill(&starting, 1) {
            return Err(RuntimeError::UnknownStartingSkill(
                config.starting_skill.clone(),
            ));
        }

        let flow = LevelUpFlow::new(OfferGenerator::new(weights)?, progression);

        Ok(Self {
            arena,
            scheduler,
            flow,
            rng: StdRng::seed_from_u64(config.seed),
            enemies_per_wave: config.enemies_per_wave,
            report: SimReport {
                survived: true,
                player_level: 1,
                ..SimReport::default()
            },
        })
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn scheduler(&self) -> &SkillScheduler<Arena> {
        &self.scheduler
    }

    pub fn flow(&self) -> &LevelUpFlow {
        &self.flow
    }

    pub fn report(&self) -> &SimReport {
        &self.report
    }

    pub fn is_over(&self) -> bool {
        !self.report.survived
    }

    /// Runs until `duration` seconds have passed or the player dies.
    pub fn run(&mut self, duration: f32, dt: f32) -> SimReport {
        while self.report.elapsed < duration && !self.is_over() {
            self.step(dt);
        }
        self.finish()
    }

    /// Advances the simulation by one frame.
    pub fn step(&mut self, dt: f32) {
        if self.arena.enemies().is_empty() {
            self.spawn_wave();
        }

        self.scheduler.tick(dt);
        let fired = self.scheduler.try_activate_all(&mut self.arena);
        self.report.casts += fired as u64;
        if fired > 0 {
            sync_passives(&self.scheduler, &mut self.arena.player.stats);
        }

        for enemy in self.arena.enemies_mut() {
            let before = enemy.vitals.health;
            enemy.effects.tick(dt, &mut enemy.vitals);
            self.report.effect_damage += before - enemy.vitals.health;
        }

        let player = &mut self.arena.player;
        player.stats.tick(dt);
        player.effects.tick(dt, &mut player.vitals);
        player.regenerate(dt);

        self.move_enemies(dt);

        let (kills, xp) = self.arena.reap();
        if kills > 0 {
            self.report.kills += kills;
            self.flow.grant_xp(xp);
        }

        self.run_selections();
        self.drain_events();

        self.report.elapsed += dt;
        self.report.frames += 1;

        if !self.arena.player.vitals.is_alive() {
            info!(elapsed = self.report.elapsed, "player destroyed");
            self.report.survived = false;
        }
    }

    fn spawn_wave(&mut self) {
        self.report.waves += 1;
        let wave = self.report.waves;
        let count = self.enemies_per_wave + 2 * (wave - 1);
        for _ in 0..count {
            self.arena.spawn(wave, &mut self.rng);
        }
        info!(wave, enemies = count, "wave spawned");
    }

    fn move_enemies(&mut self, dt: f32) {
        let mut contact_damage = 0.0;
        for enemy in self.arena.enemies_mut() {
            if !enemy.effects.can_act() {
                continue;
            }
            let step = enemy.speed * enemy.effects.movement_multiplier() * dt;
            enemy.distance = (enemy.distance - step).max(0.0);
            if enemy.in_contact() {
                contact_damage += enemy.contact_damage * dt;
            }
        }
        if contact_damage > 0.0 {
            self.arena.player.vitals.take_damage(contact_damage);
        }
    }

    fn run_selections(&mut self) {
        let catalog = Arc::clone(self.scheduler.catalog());

        while self.flow.has_pending() {
            let presented = self
                .flow
                .begin_selection(&catalog, &self.scheduler, &mut self.rng)
                .is_some();
            if !presented {
                continue;
            }

            let offer = match self.flow.complete_selection(0) {
                Ok(offer) => offer,
                Err(e) => {
                    warn!(error = %e, "selection failed");
                    break;
                }
            };
            if let Err(e) =
                self.flow
                    .apply_offer(&offer, &mut self.scheduler, &mut self.arena.player.stats)
            {
                warn!(error = %e, skill = %offer.id(), "offer could not be applied");
            }
        }
    }

    fn drain_events(&mut self) {
        for event in self.flow.events_mut().drain() {
            match event {
                ProgressionEvent::LeveledUp { level } => {
                    self.report.player_level = level;
                    info!(level, "level up");
                }
                ProgressionEvent::OffersPresented { skills } => {
                    let names: Vec<_> = skills.iter().map(SkillId::as_str).collect();
                    debug!(offers = ?names, "offers presented");
                }
                ProgressionEvent::NothingToOffer { level } => {
                    self.report.empty_selections += 1;
                    info!(level, "nothing left to offer");
                }
                ProgressionEvent::SelectionCompleted { skill, choice } => {
                    self.report.selections += 1;
                    debug!(%skill, choice, "selection completed");
                }
                ProgressionEvent::SkillAcquired { skill } => {
                    info!(%skill, "skill acquired");
                }
                ProgressionEvent::SkillUpgraded { skill, level } => {
                    info!(%skill, level, "skill upgraded");
                }
            }
        }
    }

    fn finish(&mut self) -> SimReport {
        self.report.direct_damage = self.arena.direct_damage;
        self.report.skills = self
            .scheduler
            .instances()
            .iter()
            .map(|instance| (instance.id().clone(), instance.level()))
            .collect();
        self.report.clone()
    }
}
