//! Grid formation for group move orders.

use bevy::prelude::*;

use crate::gameplay::Dead;
use crate::gameplay::command::{CommandKind, UnitCommand};
use crate::gameplay::units::{PlayerUnit, Selected};

/// Distance between neighbouring formation slots.
pub const FORMATION_SPACING: f32 = 2.0;

/// Offset of slot `index` in a roughly square grid of `total` units.
///
/// Columns are centred around the destination on X; rows stack on +Z.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn formation_offset(index: usize, total: usize) -> Vec3 {
    let units_per_row = ((total as f32).sqrt() as usize).max(1);
    let row = index / units_per_row;
    let col = index % units_per_row;

    Vec3::new(
        (col as f32 - units_per_row as f32 * 0.5) * FORMATION_SPACING,
        0.0,
        row as f32 * FORMATION_SPACING,
    )
}

/// Slot layout for a group move.
#[derive(Debug, Clone, PartialEq)]
pub struct FormationPlan {
    /// Mean position of the group when the order was given.
    pub centroid: Vec3,
    /// Per-unit destination, in the same order as the input positions.
    pub slots: Vec<Vec3>,
}

/// Lay out `positions.len()` units around `destination`. `None` for fewer
/// than two units, which move straight to the destination.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn plan_formation(positions: &[Vec3], destination: Vec3) -> Option<FormationPlan> {
    let total = positions.len();
    if total < 2 {
        return None;
    }

    let centroid = positions.iter().copied().sum::<Vec3>() / total as f32;
    let slots = (0..total)
        .map(|index| destination + formation_offset(index, total))
        .collect();

    Some(FormationPlan { centroid, slots })
}

fn is_pending_move(command: &UnitCommand) -> bool {
    command.is_enabled() && command.order().kind == CommandKind::Move
}

/// Spreads a pending Move order across the selected player units.
///
/// Only selected units with an enabled Move take part, so a Move given to a
/// single member of a larger selection goes straight to its destination.
/// Runs in `SimSet::Command`, before command resolution.
pub(super) fn arrange_formation(
    mut selected: Query<
        (Entity, &Transform, &mut UnitCommand),
        (With<Selected>, With<PlayerUnit>, Without<Dead>),
    >,
) {
    let positions: Vec<Vec3> = selected
        .iter()
        .filter(|(_, _, command)| is_pending_move(command))
        .map(|(_, t, _)| t.translation)
        .collect();
    let total = positions.len();
    let Some(plan) = plan_formation(&positions, Vec3::ZERO) else {
        return;
    };

    let movers = selected
        .iter_mut()
        .filter(|(_, _, command)| is_pending_move(command));
    for (index, ((entity, _, mut command), offset)) in movers.zip(plan.slots).enumerate() {
        command.offset_target(offset);
        trace!("{entity} assigned formation slot {index}/{total}");
    }

    debug!(
        "Formation of {total} units from centroid {:?}",
        plan.centroid
    );
}
