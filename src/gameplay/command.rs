//! Player orders: the one-shot `UnitCommand` component and its resolution
//! into movement and targeting state.

use bevy::prelude::*;

use crate::SimSet;
use crate::deferred::SimCommandsExt;
use crate::gameplay::Dead;
use crate::gameplay::formation;
use crate::gameplay::units::pathfinding::Pathfinding;
use crate::gameplay::units::{AttackRange, Movement, UnitType};

/// Kinds of order a player unit can receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum CommandKind {
    Move,
    Attack,
    #[default]
    Stop,
    /// Accepted but has no effect.
    Patrol,
}

/// A single order with its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Order {
    pub kind: CommandKind,
    pub target_position: Vec3,
    pub target_entity: Option<Entity>,
    /// Elapsed simulation time when the order was issued.
    pub issued_at: f32,
}

impl Order {
    #[must_use]
    pub const fn stop(position: Vec3) -> Self {
        Self {
            kind: CommandKind::Stop,
            target_position: position,
            target_entity: None,
            issued_at: 0.0,
        }
    }

    #[must_use]
    pub const fn move_to(destination: Vec3) -> Self {
        Self {
            kind: CommandKind::Move,
            target_position: destination,
            target_entity: None,
            issued_at: 0.0,
        }
    }

    #[must_use]
    pub const fn attack(target: Entity) -> Self {
        Self {
            kind: CommandKind::Attack,
            target_position: Vec3::ZERO,
            target_entity: Some(target),
            issued_at: 0.0,
        }
    }
}

/// Event-style order slot on a player unit.
///
/// Enabled when a new order is issued, disabled once resolved. A disabled
/// command keeps its last order but is never reapplied.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct UnitCommand {
    order: Order,
    enabled: bool,
}

impl UnitCommand {
    /// A disabled command slot holding `order`.
    #[must_use]
    pub const fn new(order: Order) -> Self {
        Self {
            order,
            enabled: false,
        }
    }

    #[must_use]
    pub const fn order(&self) -> &Order {
        &self.order
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Replace the order and mark it pending.
    pub fn enable(&mut self, order: Order) {
        self.order = order;
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Shift the pending order's target position by `offset`.
    pub fn offset_target(&mut self, offset: Vec3) {
        self.order.target_position += offset;
    }
}

/// Issue an order to every entity in `entities`.
///
/// Applied at the next playback point. `target_position == None` keeps each
/// unit's previous target position.
pub fn issue(
    commands: &mut Commands,
    entities: impl IntoIterator<Item = Entity>,
    kind: CommandKind,
    target_position: Option<Vec3>,
    target_entity: Option<Entity>,
) {
    for entity in entities {
        commands.enable_order(entity, kind, target_position, target_entity);
    }
}

/// Apply an order to `entity` immediately, stamped with the current time.
///
/// No-op for entities that are gone, already `Dead`, or take no orders.
pub(crate) fn enable_order_now(
    world: &mut World,
    entity: Entity,
    kind: CommandKind,
    target_position: Option<Vec3>,
    target_entity: Option<Entity>,
) {
    let issued_at = world
        .get_resource::<Time>()
        .map_or(0.0, Time::elapsed_secs);

    let Ok(mut unit) = world.get_entity_mut(entity) else {
        trace!("Order for {entity} dropped: entity is gone");
        return;
    };
    if unit.contains::<Dead>() {
        trace!("Order for {entity} dropped: unit is dead");
        return;
    }
    let Some(mut command) = unit.get_mut::<UnitCommand>() else {
        trace!("Order for {entity} dropped: not a commandable unit");
        return;
    };

    let previous = command.order.target_position;
    command.enable(Order {
        kind,
        target_position: target_position.unwrap_or(previous),
        target_entity,
        issued_at,
    });
}

/// Resolves every enabled command into movement and targeting state, then
/// disables it. Runs in `SimSet::Command`.
fn resolve_commands(
    mut units: Query<
        (
            Entity,
            &UnitType,
            &mut UnitCommand,
            &mut Movement,
            &mut AttackRange,
            Option<&mut Pathfinding>,
        ),
        Without<Dead>,
    >,
    unit_types: Query<&UnitType>,
) {
    for (entity, unit_type, mut command, mut movement, mut attack_range, path) in &mut units {
        if !command.is_enabled() {
            continue;
        }
        let order = command.order;

        match order.kind {
            CommandKind::Move => {
                attack_range.clear_target();
                if let Some(mut path) = path {
                    path.request(order.target_position);
                } else {
                    movement.set_destination(order.target_position);
                }
            }
            CommandKind::Attack => {
                if let Some(target) = order.target_entity {
                    let friendly = unit_types
                        .get(target)
                        .is_ok_and(|target_type| !unit_type.team.is_hostile_to(target_type.team));
                    if friendly {
                        debug!("{entity} refused attack order on friendly {target}");
                    } else {
                        attack_range.set_target(target);
                    }
                }
            }
            CommandKind::Stop => {
                movement.clear_destination();
                attack_range.clear_target();
                if let Some(mut path) = path {
                    path.cancel();
                }
            }
            CommandKind::Patrol => {}
        }

        command.disable();
        debug!("{entity} applied {:?} order", order.kind);
    }
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<UnitCommand>();

    app.add_systems(
        Update,
        (formation::arrange_formation, resolve_commands)
            .chain()
            .in_set(SimSet::Command),
    );
}
