//! Player selection and hotkey control groups.
//!
//! Every operation here is queued on [`Commands`] and takes effect at the next
//! playback point. Only living player units can be selected or grouped.

use bevy::prelude::*;

use crate::gameplay::Dead;
use crate::gameplay::units::{Group, HOTKEY_GROUP_OFFSET, PlayerUnit, Selected, UNGROUPED};

/// Hotkey groups are numbered `1..=MAX_CONTROL_GROUP`.
pub const MAX_CONTROL_GROUP: u8 = 5;

/// Stored group id of hotkey group `n`, or `None` if `n` is out of range.
#[must_use]
pub fn control_group_id(n: u8) -> Option<u8> {
    (1..=MAX_CONTROL_GROUP)
        .contains(&n)
        .then_some(n + HOTKEY_GROUP_OFFSET)
}

/// Select `entities`, replacing the current selection unless `additive`.
pub fn select_units(commands: &mut Commands, entities: Vec<Entity>, additive: bool) {
    commands.queue(move |world: &mut World| {
        if !additive {
            clear_selection_now(world);
        }
        select_now(world, &entities);
    });
}

pub fn clear_selection(commands: &mut Commands) {
    commands.queue(clear_selection_now);
}

/// Make the current selection hotkey group `n`, replacing its old members.
pub fn save_control_group(commands: &mut Commands, n: u8) {
    commands.queue(move |world: &mut World| save_control_group_now(world, n));
}

/// Replace the selection with the living members of hotkey group `n`.
pub fn recall_control_group(commands: &mut Commands, n: u8) {
    commands.queue(move |world: &mut World| recall_control_group_now(world, n));
}

fn select_now(world: &mut World, entities: &[Entity]) {
    for &entity in entities {
        let Ok(mut unit) = world.get_entity_mut(entity) else {
            continue;
        };
        if !unit.contains::<PlayerUnit>() || unit.contains::<Dead>() {
            continue;
        }
        if let Some(mut group) = unit.get_mut::<Group>() {
            group.is_selected = true;
        }
        unit.insert(Selected);
    }
}

fn clear_selection_now(world: &mut World) {
    let mut selected = world.query_filtered::<Entity, With<Selected>>();
    let entities: Vec<Entity> = selected.iter(world).collect();
    for entity in entities {
        if let Ok(mut unit) = world.get_entity_mut(entity) {
            unit.remove::<Selected>();
        }
    }

    let mut groups = world.query::<&mut Group>();
    for mut group in groups.iter_mut(world) {
        group.is_selected = false;
    }
}

fn save_control_group_now(world: &mut World, n: u8) {
    let Some(id) = control_group_id(n) else {
        debug!("Ignoring save to control group {n}: out of range");
        return;
    };

    let mut groups = world.query::<(&mut Group, Has<Selected>)>();
    let mut members = 0;
    for (mut group, selected) in groups.iter_mut(world) {
        if group.id == id {
            group.id = UNGROUPED;
        }
        if selected {
            group.id = id;
            members += 1;
        }
    }
    debug!("Control group {n} saved with {members} units");
}

fn recall_control_group_now(world: &mut World, n: u8) {
    let Some(id) = control_group_id(n) else {
        debug!("Ignoring recall of control group {n}: out of range");
        return;
    };

    let mut groups = world.query_filtered::<(Entity, &Group), (With<PlayerUnit>, Without<Dead>)>();
    let members: Vec<Entity> = groups
        .iter(world)
        .filter(|(_, group)| group.id == id)
        .map(|(entity, _)| entity)
        .collect();

    clear_selection_now(world);
    select_now(world, &members);
    debug!("Control group {n} recalled: {} units", members.len());
}
