//! Unit spawning: assembles the component bundle for each unit kind.

use bevy::prelude::*;
use rand::Rng;

use crate::gameplay::ai::AiController;
use crate::gameplay::combat::Damage;
use crate::gameplay::command::{Order, UnitCommand};
use crate::gameplay::{Health, Team};

use super::pathfinding::Pathfinding;
use super::{AttackRange, Group, Movement, PlayerUnit, UnitKind, UnitType};

// === Constants ===

/// Lower bound of the randomized AI search interval (seconds).
pub const AI_SEARCH_INTERVAL_MIN: f32 = 0.8;

/// Upper bound of the randomized AI search interval (seconds).
pub const AI_SEARCH_INTERVAL_MAX: f32 = 1.2;

/// AI units notice enemies this far beyond their attack range.
pub const AI_DETECTION_BONUS: f32 = 5.0;

// === Spawning ===

/// Spawn a unit of `kind` for `team` at `position`.
///
/// Player-controlled units accept commands and join control groups; all
/// others get an aggressive AI with a randomized search interval so searches
/// don't all land on the same tick.
pub fn spawn_unit(
    commands: &mut Commands,
    kind: UnitKind,
    position: Vec3,
    team: Team,
    player_controlled: bool,
) -> Entity {
    let search_interval = rand::rng().random_range(AI_SEARCH_INTERVAL_MIN..=AI_SEARCH_INTERVAL_MAX);
    spawn_unit_with_search_interval(commands, kind, position, team, player_controlled, search_interval)
}

/// [`spawn_unit`] with a fixed AI search interval.
pub fn spawn_unit_with_search_interval(
    commands: &mut Commands,
    kind: UnitKind,
    position: Vec3,
    team: Team,
    player_controlled: bool,
    search_interval: f32,
) -> Entity {
    let stats = kind.stats();

    let mut unit = commands.spawn((
        Name::new(format!("Team {} {}", team.0, kind.display_name())),
        UnitType { kind, team },
        Transform::from_translation(position),
        Health::new(stats.hp),
        Damage::new(stats.damage, stats.attack_rate),
        Movement::new(stats.move_speed),
        AttackRange::new(stats.attack_range),
    ));

    if player_controlled {
        unit.insert((
            PlayerUnit,
            Group::default(),
            UnitCommand::new(Order::stop(position)),
        ));
    } else {
        unit.insert(AiController::aggressive(
            stats.attack_range + AI_DETECTION_BONUS,
            search_interval,
        ));
    }

    if kind.uses_pathfinding() {
        unit.insert(Pathfinding::at(position));
    }

    unit.id()
}

/// Spawn a unit directly into `world`, outside of any system.
pub fn spawn_unit_now(
    world: &mut World,
    kind: UnitKind,
    position: Vec3,
    team: Team,
    player_controlled: bool,
) -> Entity {
    let entity = spawn_unit(&mut world.commands(), kind, position, team, player_controlled);
    world.flush();
    entity
}
