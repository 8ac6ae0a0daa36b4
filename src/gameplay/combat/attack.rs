//! Unit attacks: target validation, cooldown, and melee or ranged strikes.

use bevy::prelude::*;

use crate::gameplay::effects::{EffectKind, spawn_effect};
use crate::gameplay::units::{AttackRange, UnitType};
use crate::gameplay::{Dead, Health};

use super::{Damage, MUZZLE_FLASH_SECS, Projectile};

/// Attacks each living unit's target when it is in range and the cooldown
/// has elapsed.
///
/// A target that is gone or `Dead` is cleared here rather than at death.
/// Ranged kinds launch a projectile; the rest hit immediately.
/// Runs in `SimSet::Attack`.
pub(super) fn unit_attack(
    time: Res<Time>,
    mut commands: Commands,
    mut attackers: Query<
        (&Transform, &UnitType, &mut Damage, &mut AttackRange),
        Without<Dead>,
    >,
    targets: Query<(&Transform, Has<Dead>)>,
    mut healths: Query<&mut Health>,
) {
    let now = time.elapsed_secs();

    for (transform, unit_type, mut damage, mut attack_range) in &mut attackers {
        let Some(target) = attack_range.target else {
            continue;
        };
        let Ok((target_transform, target_dead)) = targets.get(target) else {
            attack_range.clear_target();
            continue;
        };
        if target_dead {
            attack_range.clear_target();
            continue;
        }

        let origin = transform.translation;
        let aim = target_transform.translation;
        if origin.distance(aim) > attack_range.range || !damage.ready(now) {
            continue;
        }

        if unit_type.kind.is_ranged() {
            let direction = (aim - origin).normalize_or_zero();
            commands.spawn((
                Name::new("Projectile"),
                Projectile::new(direction, target, damage.amount, unit_type.team),
                Transform::from_translation(origin).looking_to(direction, Vec3::Y),
            ));
            spawn_effect(
                &mut commands,
                EffectKind::MuzzleFlash,
                origin,
                MUZZLE_FLASH_SECS,
                now,
            );
        } else if let Ok(mut health) = healths.get_mut(target) {
            health.apply_damage(damage.amount);
        }

        damage.last_attack_time = now;
    }
}
