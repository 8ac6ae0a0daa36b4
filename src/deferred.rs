//! Simulation-specific deferred commands.
//!
//! Structural changes made during a tick go through [`Commands`] and are
//! applied at the `BeginPlayback` / `EndPlayback` sync points. The commands
//! here tolerate their entity having disappeared in the meantime.

use bevy::prelude::*;

use crate::gameplay::command::{CommandKind, enable_order_now};

/// Despawn an entity unless an earlier request already did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DespawnOnce(pub Entity);

impl DespawnOnce {
    /// Returns true if this request despawned the entity.
    pub fn apply(self, world: &mut World) -> bool {
        let Ok(entity) = world.get_entity_mut(self.0) else {
            trace!("Despawn of {} skipped: already gone", self.0);
            return false;
        };
        entity.despawn();
        true
    }
}

/// Replace a unit's order and enable it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnableOrder {
    pub entity: Entity,
    pub kind: CommandKind,
    /// `None` keeps the unit's previous target position.
    pub target_position: Option<Vec3>,
    pub target_entity: Option<Entity>,
}

impl EnableOrder {
    pub fn apply(self, world: &mut World) {
        enable_order_now(
            world,
            self.entity,
            self.kind,
            self.target_position,
            self.target_entity,
        );
    }
}

/// Queue the simulation's deferred commands.
pub trait SimCommandsExt {
    /// Despawn `entity` at the next playback point. Safe to request more
    /// than once for the same entity.
    fn despawn_once(&mut self, entity: Entity);

    /// Issue an order to `entity` at the next playback point.
    fn enable_order(
        &mut self,
        entity: Entity,
        kind: CommandKind,
        target_position: Option<Vec3>,
        target_entity: Option<Entity>,
    );
}

impl SimCommandsExt for Commands<'_, '_> {
    fn despawn_once(&mut self, entity: Entity) {
        let request = DespawnOnce(entity);
        self.queue(move |world: &mut World| {
            request.apply(world);
        });
    }

    fn enable_order(
        &mut self,
        entity: Entity,
        kind: CommandKind,
        target_position: Option<Vec3>,
        target_entity: Option<Entity>,
    ) {
        let request = EnableOrder {
            entity,
            kind,
            target_position,
            target_entity,
        };
        self.queue(move |world: &mut World| request.apply(world));
    }
}
