//! Projectile flight, target impact, and the fallback collision check.

use bevy::prelude::*;

use crate::deferred::SimCommandsExt;
use crate::gameplay::effects::{EffectKind, spawn_effect};
use crate::gameplay::units::UnitType;
use crate::gameplay::{Dead, Health};

use super::{COLLISION_EFFECT_SECS, HIT_THRESHOLD, IMPACT_EFFECT_SECS, Projectile};

/// Moves projectiles, expires them, and resolves hits on their bound target.
///
/// A projectile resolved here is skipped by [`detect_collisions`] later in
/// the same tick. Runs in `SimSet::Projectile`.
pub(super) fn update_projectiles(
    time: Res<Time>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Transform, &mut Projectile)>,
    mut targets: Query<(&Transform, &mut Health), (Without<Projectile>, Without<Dead>)>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs();

    for (entity, mut transform, mut projectile) in &mut projectiles {
        if projectile.is_resolved() {
            continue;
        }

        transform.translation += projectile.direction * projectile.speed * dt;

        projectile.lifetime -= dt;
        if projectile.lifetime <= 0.0 {
            projectile.resolve();
            commands.despawn_once(entity);
            continue;
        }

        let Ok((target_transform, mut health)) = targets.get_mut(projectile.target) else {
            continue;
        };
        let impact = target_transform.translation;
        if transform.translation.distance(impact) > HIT_THRESHOLD {
            continue;
        }

        health.apply_damage(projectile.damage);
        spawn_effect(&mut commands, EffectKind::Hit, impact, IMPACT_EFFECT_SECS, now);
        projectile.resolve();
        commands.despawn_once(entity);
    }
}

/// Resolves any unresolved projectile that comes within [`HIT_THRESHOLD`] of
/// a living unit of another team, bound target or not. Runs in
/// `SimSet::Collision`.
pub(super) fn detect_collisions(
    time: Res<Time>,
    mut commands: Commands,
    mut projectiles: Query<(Entity, &Transform, &mut Projectile)>,
    mut units: Query<(&Transform, &UnitType, &mut Health), Without<Dead>>,
) {
    let now = time.elapsed_secs();

    for (entity, transform, mut projectile) in &mut projectiles {
        if projectile.is_resolved() {
            continue;
        }

        for (unit_transform, unit_type, mut health) in &mut units {
            if !unit_type.team.is_hostile_to(projectile.team) {
                continue;
            }
            let impact = unit_transform.translation;
            if transform.translation.distance(impact) > HIT_THRESHOLD {
                continue;
            }

            health.apply_damage(projectile.damage);
            spawn_effect(&mut commands, EffectKind::Hit, impact, COLLISION_EFFECT_SECS, now);
            projectile.resolve();
            commands.despawn_once(entity);
            break;
        }
    }
}
