//! Unit kinds, the per-kind stat table, and the per-unit components.

mod movement;
pub mod pathfinding;
pub mod spawn;

use bevy::prelude::*;

use crate::SimSet;
use crate::gameplay::Team;

// === Constants ===

/// Distance at which a unit counts as arrived at its destination or waypoint.
pub const STOPPING_DISTANCE: f32 = 1.5;

/// Hotkey control groups are stored as `HOTKEY_GROUP_OFFSET + n`, so groups
/// 1..=5 become ids 11..=15.
pub const HOTKEY_GROUP_OFFSET: u8 = 10;

/// Group id of a unit that belongs to no control group.
pub const UNGROUPED: u8 = 0;

// === Unit Kind System ===

/// Kinds of units in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum UnitKind {
    Infantry,
    Cavalry,
    Archer,
    Heavy,
}

impl UnitKind {
    /// All unit kinds, for iteration.
    pub const ALL: &[Self] = &[Self::Infantry, Self::Cavalry, Self::Archer, Self::Heavy];

    /// Human-readable display name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Infantry => "Infantry",
            Self::Cavalry => "Cavalry",
            Self::Archer => "Archer",
            Self::Heavy => "Heavy",
        }
    }

    /// Ranged kinds launch projectiles; everything else strikes directly.
    #[must_use]
    pub const fn is_ranged(self) -> bool {
        matches!(self, Self::Archer)
    }

    /// Kinds that travel via waypoint paths rather than straight moves.
    #[must_use]
    pub const fn uses_pathfinding(self) -> bool {
        matches!(self, Self::Cavalry | Self::Heavy)
    }

    /// Look up the stat line for this kind.
    #[must_use]
    pub const fn stats(self) -> UnitStats {
        match self {
            Self::Infantry => UnitStats {
                hp: 100.0,
                damage: 25.0,
                move_speed: 3.0,
                attack_range: 2.0,
                attack_rate: 1.0,
            },
            Self::Cavalry => UnitStats {
                hp: 150.0,
                damage: 35.0,
                move_speed: 6.0,
                attack_range: 2.5,
                attack_rate: 0.8,
            },
            Self::Archer => UnitStats {
                hp: 80.0,
                damage: 30.0,
                move_speed: 2.5,
                attack_range: 8.0,
                attack_rate: 1.2,
            },
            Self::Heavy => UnitStats {
                hp: 300.0,
                damage: 50.0,
                move_speed: 4.0,
                attack_range: 3.0,
                attack_rate: 0.6,
            },
        }
    }
}

/// Stats for a unit kind. All values are compile-time constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitStats {
    pub hp: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    /// Attacks per second.
    pub attack_rate: f32,
}

// === Components ===

/// Kind and faction of a unit. Present on every unit and only on units.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct UnitType {
    pub kind: UnitKind,
    pub team: Team,
}

/// Seek-to-destination state. `destination == None` means idle.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Movement {
    pub speed: f32,
    pub destination: Option<Vec3>,
    pub stopping_distance: f32,
}

impl Movement {
    #[must_use]
    pub const fn new(speed: f32) -> Self {
        Self {
            speed,
            destination: None,
            stopping_distance: STOPPING_DISTANCE,
        }
    }

    #[must_use]
    pub const fn has_destination(&self) -> bool {
        self.destination.is_some()
    }

    pub fn set_destination(&mut self, destination: Vec3) {
        self.destination = Some(destination);
    }

    pub fn clear_destination(&mut self) {
        self.destination = None;
    }
}

/// Attack reach and the current target.
///
/// `target` is a weak reference: the entity may since have been despawned or
/// tagged `Dead`, so users validate it before every use.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AttackRange {
    pub range: f32,
    pub target: Option<Entity>,
}

impl AttackRange {
    #[must_use]
    pub const fn new(range: f32) -> Self {
        Self {
            range,
            target: None,
        }
    }

    #[must_use]
    pub const fn has_target(&self) -> bool {
        self.target.is_some()
    }

    pub fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }
}

/// Marker for units controlled by the player (no AI, accepts commands).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerUnit;

/// Marker for currently selected player units.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Selected;

/// Control-group membership of a player unit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Group {
    pub id: u8,
    pub is_selected: bool,
}

impl Default for Group {
    fn default() -> Self {
        Self {
            id: UNGROUPED,
            is_selected: false,
        }
    }
}

// === Plugin ===

pub(super) fn plugin(app: &mut App) {
    app.register_type::<UnitType>()
        .register_type::<Movement>()
        .register_type::<AttackRange>()
        .register_type::<PlayerUnit>()
        .register_type::<Selected>()
        .register_type::<Group>()
        .register_type::<pathfinding::Pathfinding>();

    app.add_systems(
        Update,
        (pathfinding::follow_paths, movement::move_units)
            .chain()
            .in_set(SimSet::Movement),
    );
}
