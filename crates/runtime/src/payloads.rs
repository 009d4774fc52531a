//! Demo payload kit registered by the reference host.
//!
//! Payload names match the `payload` field of the bundled `skills.ron`.

use progression_core::{ActiveEffect, ActiveModifier, Cast, PayloadRegistry, StatKey};
use tracing::trace;

use crate::world::Arena;

pub const PROJECTILE_VOLLEY: &str = "projectile_volley";
pub const FROST_NOVA: &str = "frost_nova";
pub const IGNITE: &str = "ignite";
pub const VENOM: &str = "venom";
pub const OVERDRIVE: &str = "overdrive";
pub const SHOCK: &str = "shock";

const NOVA_RADIUS: f32 = 6.0;
const VENOM_RADIUS: f32 = 10.0;

pub fn demo_payloads() -> PayloadRegistry<Arena> {
    PayloadRegistry::new()
        .with_fn(PROJECTILE_VOLLEY, projectile_volley)
        .with_fn(FROST_NOVA, frost_nova)
        .with_fn(IGNITE, ignite)
        .with_fn(VENOM, venom)
        .with_fn(OVERDRIVE, overdrive)
        .with_fn(SHOCK, shock)
}

/// One projectile per level at the nearest enemies.
fn projectile_volley(cast: &mut Cast<'_, Arena>) {
    let level = cast.level();
    let arena = &mut *cast.caster;
    let damage =
        arena.player.stat(StatKey::WeaponDamage) * arena.player.stat(StatKey::FireRate) * 0.5;
    let targets = arena.nearest(level as usize);
    trace!(targets = targets.len(), damage, "projectile volley");
    for id in targets {
        arena.strike(id, damage);
    }
}

/// Slows everything nearby and freezes the closest enemy.
fn frost_nova(cast: &mut Cast<'_, Arena>) {
    let level = cast.level() as f32;
    let arena = &mut *cast.caster;
    let slow = (0.6 - 0.1 * level).max(0.2);

    for id in arena.within(NOVA_RADIUS) {
        arena.strike(id, 4.0 * level);
        if let Some(enemy) = arena.enemy_mut(id) {
            enemy.effects.apply(ActiveEffect::slow(slow, 3.0));
        }
    }
    if let Some(&id) = arena.nearest(1).first()
        && let Some(enemy) = arena.enemy_mut(id)
    {
        enemy.effects.apply(ActiveEffect::freeze(0.75 + 0.25 * level));
    }
}

fn ignite(cast: &mut Cast<'_, Arena>) {
    let level = cast.level() as f32;
    let arena = &mut *cast.caster;
    if let Some(&id) = arena.nearest(1).first()
        && let Some(enemy) = arena.enemy_mut(id)
    {
        enemy.effects.apply(ActiveEffect::burn(3.0 * level, 3.0));
    }
}

fn venom(cast: &mut Cast<'_, Arena>) {
    let level = cast.level() as f32;
    let arena = &mut *cast.caster;
    for id in arena.within(VENOM_RADIUS) {
        if let Some(enemy) = arena.enemy_mut(id) {
            enemy.effects.apply(ActiveEffect::poison(2.0 * level, 4.0));
        }
    }
}

/// Timed fire-rate and damage buff on the player.
fn overdrive(cast: &mut Cast<'_, Arena>) {
    let level = cast.level() as f32;
    let stats = &mut cast.caster.player.stats;
    stats.apply(ActiveModifier::multiply(
        StatKey::FireRate,
        1.0 + 0.25 * level,
        4.0,
    ));
    stats.apply(ActiveModifier::add(StatKey::WeaponDamage, 2.0 * level, 4.0));
}

fn shock(cast: &mut Cast<'_, Arena>) {
    let level = cast.level() as f32;
    let arena = &mut *cast.caster;
    if let Some(&id) = arena.nearest(1).first() {
        arena.strike(id, 6.0 * level);
        if let Some(enemy) = arena.enemy_mut(id) {
            enemy.effects.apply(ActiveEffect::stun(0.5 * level));
        }
    }
}

#[cfg(test)]
mod tests {
    use progression_core::{EffectKind, PayloadKey, SkillId, StatTable};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::world::{EnemyId, Player};

    fn arena_with(distances: &[f32]) -> (Arena, Vec<EnemyId>) {
        let mut arena = Arena::new(Player::new(StatTable::default(), 1.0), 1.0);
        let mut rng = StdRng::seed_from_u64(5);
        let ids = distances
            .iter()
            .map(|&distance| {
                let id = arena.spawn(1, &mut rng);
                arena.enemy_mut(id).unwrap().distance = distance;
                id
            })
            .collect();
        (arena, ids)
    }

    fn fire(arena: &mut Arena, payload: &str, level: u32) {
        let registry = demo_payloads();
        let skill = SkillId::new(payload);
        let mut commands = Vec::new();
        let mut cast = Cast::new(arena, &skill, level, &mut commands);
        registry
            .get(&PayloadKey::new(payload))
            .unwrap()
            .invoke(&mut cast);
        assert!(commands.is_empty());
    }

    #[test]
    fn volley_hits_one_target_per_level() {
        let (mut arena, ids) = arena_with(&[3.0, 1.0, 8.0]);
        fire(&mut arena, PROJECTILE_VOLLEY, 2);

        let full = |id| arena.enemy(id).unwrap().vitals.health == 20.0;
        assert!(!full(ids[0]));
        assert!(!full(ids[1]));
        assert!(full(ids[2]));
        assert_eq!(arena.direct_damage, 20.0);
    }

    #[test]
    fn frost_nova_slows_nearby_and_freezes_nearest() {
        let (mut arena, ids) = arena_with(&[2.0, 5.0, 9.0]);
        fire(&mut arena, FROST_NOVA, 1);

        let nearest = &arena.enemy(ids[0]).unwrap().effects;
        assert!(nearest.contains(EffectKind::Freeze));
        assert_eq!(nearest.movement_multiplier(), 0.0);
        assert!(nearest.can_act());

        let middle = &arena.enemy(ids[1]).unwrap().effects;
        assert!((middle.movement_multiplier() - 0.5).abs() < 1e-6);
        assert!(arena.enemy(ids[2]).unwrap().effects.is_empty());
    }

    #[test]
    fn shock_stuns() {
        let (mut arena, ids) = arena_with(&[4.0]);
        fire(&mut arena, SHOCK, 2);
        let enemy = arena.enemy(ids[0]).unwrap();
        assert!(!enemy.effects.can_act());
        assert_eq!(enemy.vitals.health, 8.0);
    }

    #[test]
    fn overdrive_buff_refreshes_instead_of_stacking() {
        let (mut arena, _) = arena_with(&[]);
        fire(&mut arena, OVERDRIVE, 1);
        fire(&mut arena, OVERDRIVE, 2);

        let stats = &arena.player.stats;
        assert_eq!(stats.modifiers().len(), 2);
        assert_eq!(stats.get(StatKey::FireRate), 3.0);
        assert_eq!(stats.get(StatKey::WeaponDamage), 14.0);

        arena.player.stats.tick(4.0);
        assert_eq!(arena.player.stat(StatKey::FireRate), 2.0);
    }
}
