//! Read-only views over the simulation for presentation and game-state logic.
//!
//! These read the world as it is: mutations queued but not yet played back
//! are not reflected.

use std::collections::{BTreeMap, BTreeSet};

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::gameplay::units::{Selected, UnitType};
use crate::gameplay::{Dead, Team};

/// Living-unit counts by team, for use inside systems.
#[derive(SystemParam)]
pub struct UnitCensus<'w, 's> {
    units: Query<'w, 's, &'static UnitType, Without<Dead>>,
}

impl UnitCensus<'_, '_> {
    /// Number of living units on each team that has any.
    #[must_use]
    pub fn living_per_team(&self) -> BTreeMap<Team, usize> {
        count_per_team(self.units.iter().map(|unit| unit.team))
    }

    #[must_use]
    pub fn living_count(&self) -> usize {
        self.units.iter().count()
    }

    /// Teams with at least one living unit.
    #[must_use]
    pub fn surviving_teams(&self) -> BTreeSet<Team> {
        self.units.iter().map(|unit| unit.team).collect()
    }
}

fn count_per_team(teams: impl Iterator<Item = Team>) -> BTreeMap<Team, usize> {
    let mut counts = BTreeMap::new();
    for team in teams {
        *counts.entry(team).or_insert(0) += 1;
    }
    counts
}

/// Every living unit with its type and position.
pub fn living_units(world: &mut World) -> Vec<(Entity, UnitType, Vec3)> {
    let mut query = world.query_filtered::<(Entity, &UnitType, &Transform), Without<Dead>>();
    query
        .iter(world)
        .map(|(entity, unit_type, transform)| (entity, *unit_type, transform.translation))
        .collect()
}

/// Number of living units on each team that has any.
pub fn living_units_per_team(world: &mut World) -> BTreeMap<Team, usize> {
    let mut query = world.query_filtered::<&UnitType, Without<Dead>>();
    count_per_team(query.iter(world).map(|unit| unit.team))
}

/// Positions of all selected units.
pub fn selected_positions(world: &mut World) -> Vec<(Entity, Vec3)> {
    let mut query = world.query_filtered::<(Entity, &Transform), With<Selected>>();
    query
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation))
        .collect()
}
