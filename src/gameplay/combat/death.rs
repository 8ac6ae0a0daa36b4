//! Death: tags units at zero health and later despawns them.

use bevy::prelude::*;

use crate::deferred::SimCommandsExt;
use crate::gameplay::effects::{EffectKind, spawn_effect};
use crate::gameplay::units::{Group, Selected, UnitType};
use crate::gameplay::{Dead, Health};

/// Seconds of elapsed simulation time after which `Dead` entities are despawned.
///
/// Compared against the global clock, not the time of each death: once the
/// simulation is past this point, units are removed the tick after they die.
pub const CLEANUP_DELAY_SECS: f32 = 3.0;

/// Lifetime of the effect spawned where a unit died.
pub const DEATH_EFFECT_SECS: f32 = 2.0;

/// Tags newly dead units with `Dead`, strips their selection and control
/// group, and leaves a Death effect behind. Runs in `SimSet::Death`.
pub(super) fn mark_dead(
    time: Res<Time>,
    mut commands: Commands,
    dying: Query<(Entity, &Health, &Transform, Option<&UnitType>), Without<Dead>>,
) {
    let now = time.elapsed_secs();

    for (entity, health, transform, unit_type) in &dying {
        if !health.is_dead() {
            continue;
        }

        commands
            .entity(entity)
            .insert(Dead)
            .remove::<(Group, Selected)>();
        spawn_effect(
            &mut commands,
            EffectKind::Death,
            transform.translation,
            DEATH_EFFECT_SECS,
            now,
        );

        match unit_type {
            Some(unit_type) => info!(
                "{} of team {} died at {:.1}s",
                unit_type.kind.display_name(),
                unit_type.team.0,
                now
            ),
            None => info!("{entity} died at {now:.1}s"),
        }
    }
}

/// Despawns every `Dead` entity once the simulation clock passes
/// [`CLEANUP_DELAY_SECS`]. Runs in `SimSet::Cleanup`.
pub(super) fn cleanup_dead(
    time: Res<Time>,
    mut commands: Commands,
    dead: Query<Entity, With<Dead>>,
) {
    if time.elapsed_secs() <= CLEANUP_DELAY_SECS {
        return;
    }

    for entity in &dead {
        commands.despawn_once(entity);
    }
}
