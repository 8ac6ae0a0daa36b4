//! Seek-to-destination movement.

use bevy::prelude::*;

use super::Movement;
use crate::gameplay::Dead;

/// Advances every living unit with a destination toward it at `speed`,
/// facing the direction of travel.
///
/// Arrival (within `stopping_distance`) leaves the unit in place but does not
/// clear the destination; a Stop order or the pathfinding system does that.
///
/// Runs in `SimSet::Movement`, data-parallel over the unit population.
pub(super) fn move_units(
    time: Res<Time>,
    mut units: Query<(&mut Transform, &Movement), Without<Dead>>,
) {
    let dt = time.delta_secs();

    units.par_iter_mut().for_each(|(mut transform, movement)| {
        let Some(destination) = movement.destination else {
            return;
        };

        let offset = destination - transform.translation;
        let distance = offset.length();
        if distance <= movement.stopping_distance {
            return;
        }

        let direction = offset / distance;
        transform.translation += direction * movement.speed * dt;
        transform.look_to(direction, Vec3::Y);
    });
}
