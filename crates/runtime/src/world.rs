//! Headless arena: the player at the origin and enemies closing in.
//!
//! Positions are reduced to a distance from the player. Rendering, physics
//! and input are not modelled.

use progression_core::{DamageSink, StatKey, StatModifierEngine, StatTable, TimedEffectTracker};
use rand::Rng;

/// Distance at which an enemy is in contact with the player.
pub const CONTACT_RANGE: f32 = 0.5;

/// Current and maximum health of an actor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vitals {
    pub health: f32,
    pub max_health: f32,
}

impl Vitals {
    pub fn new(max_health: f32) -> Self {
        Self {
            health: max_health,
            max_health,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

impl DamageSink for Vitals {
    fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

#[derive(Clone, Debug)]
pub struct Enemy {
    pub id: EnemyId,
    pub distance: f32,
    pub speed: f32,
    /// Damage per second dealt while in contact.
    pub contact_damage: f32,
    pub xp_reward: u32,
    pub vitals: Vitals,
    pub effects: TimedEffectTracker,
}

impl Enemy {
    pub fn in_contact(&self) -> bool {
        self.distance <= CONTACT_RANGE
    }
}

#[derive(Clone, Debug)]
pub struct Player {
    pub stats: StatModifierEngine,
    pub effects: TimedEffectTracker,
    pub vitals: Vitals,
}

impl Player {
    pub fn new(base: StatTable, periodic_interval: f32) -> Self {
        let stats = StatModifierEngine::new(base);
        let vitals = Vitals::new(stats.get(StatKey::MaxHealth));
        Self {
            stats,
            effects: TimedEffectTracker::with_interval(periodic_interval),
            vitals,
        }
    }

    pub fn stat(&self, key: StatKey) -> f32 {
        self.stats.get(key)
    }

    /// Follows MaxHealth changes and applies regeneration.
    pub fn regenerate(&mut self, dt: f32) {
        let max_health = self.stat(StatKey::MaxHealth);
        if max_health > self.vitals.max_health {
            self.vitals.health += max_health - self.vitals.max_health;
        }
        self.vitals.max_health = max_health;
        self.vitals.health =
            (self.vitals.health + self.stat(StatKey::HealthRegen) * dt).min(max_health);
    }
}

/// Everything skill payloads can touch when they fire.
#[derive(Clone, Debug)]
pub struct Arena {
    pub player: Player,
    enemies: Vec<Enemy>,
    next_id: u32,
    periodic_interval: f32,
    /// Damage dealt by payloads, for reporting.
    pub direct_damage: f32,
}

impl Arena {
    pub fn new(player: Player, periodic_interval: f32) -> Self {
        Self {
            player,
            enemies: Vec::new(),
            next_id: 0,
            periodic_interval,
            direct_damage: 0.0,
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn enemy(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn enemy_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    /// Adds one enemy of the given wave at a random distance.
    pub fn spawn<R: Rng + ?Sized>(&mut self, wave: u32, rng: &mut R) -> EnemyId {
        let id = EnemyId(self.next_id);
        self.next_id += 1;

        let scale = 1.0 + 0.25 * wave.saturating_sub(1) as f32;
        self.enemies.push(Enemy {
            id,
            distance: rng.gen_range(12.0..20.0),
            speed: rng.gen_range(1.5..2.5),
            contact_damage: 4.0 * scale,
            xp_reward: 3 + wave,
            vitals: Vitals::new(20.0 * scale),
            effects: TimedEffectTracker::with_interval(self.periodic_interval),
        });
        id
    }

    /// Living enemies ordered by distance, nearest first, at most `limit`.
    pub fn nearest(&self, limit: usize) -> Vec<EnemyId> {
        let mut alive: Vec<&Enemy> = self.enemies.iter().filter(|e| e.vitals.is_alive()).collect();
        alive.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        alive.into_iter().take(limit).map(|e| e.id).collect()
    }

    /// Living enemies within `radius` of the player.
    pub fn within(&self, radius: f32) -> Vec<EnemyId> {
        self.enemies
            .iter()
            .filter(|e| e.vitals.is_alive() && e.distance <= radius)
            .map(|e| e.id)
            .collect()
    }

    /// Deals direct damage to an enemy. Unknown ids are ignored.
    pub fn strike(&mut self, id: EnemyId, amount: f32) {
        if let Some(enemy) = self.enemies.iter_mut().find(|e| e.id == id) {
            enemy.vitals.take_damage(amount);
            self.direct_damage += amount;
        }
    }

    /// Removes dead enemies and returns the experience they award.
    pub fn reap(&mut self) -> (u32, u32) {
        let mut kills = 0;
        let mut xp = 0;
        self.enemies.retain(|enemy| {
            if enemy.vitals.is_alive() {
                return true;
            }
            kills += 1;
            xp += enemy.xp_reward;
            false
        });
        (kills, xp)
    }
}
