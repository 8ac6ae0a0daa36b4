//! Waypoint paths for units that route via `Pathfinding` instead of moving
//! straight at their destination.
//!
//! Path planning is degenerate: a requested path is a single waypoint at the
//! final destination.

use bevy::prelude::*;

use super::Movement;
use crate::gameplay::Dead;

/// Waypoint path state for a unit.
#[derive(Component, Debug, Clone, PartialEq, Reflect, Default)]
#[reflect(Component)]
pub struct Pathfinding {
    /// Set when `final_destination` changed and waypoints must be rebuilt.
    pub needs_path: bool,
    pub final_destination: Vec3,
    /// World-space waypoints, in travel order.
    pub waypoints: Vec<Vec3>,
    /// Index of the next waypoint to steer toward.
    pub current_index: usize,
}

impl Pathfinding {
    /// Pathfinding state for a freshly spawned unit: no path, no request.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            final_destination: position,
            ..default()
        }
    }

    /// Ask for a new path to `destination`. Planned on the next tick.
    pub fn request(&mut self, destination: Vec3) {
        self.final_destination = destination;
        self.needs_path = true;
        self.current_index = 0;
    }

    /// Replace the path with new waypoints.
    pub fn set(&mut self, waypoints: Vec<Vec3>) {
        self.waypoints = waypoints;
        self.current_index = 0;
    }

    /// Drop the current path and any pending request.
    pub fn cancel(&mut self) {
        self.waypoints.clear();
        self.current_index = 0;
        self.needs_path = false;
    }

    /// Get the current waypoint, if any remain.
    #[must_use]
    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.waypoints.get(self.current_index).copied()
    }

    /// Advance to the next waypoint. Returns true if there are more waypoints.
    pub fn advance(&mut self) -> bool {
        self.current_index += 1;
        self.current_index < self.waypoints.len()
    }
}

/// Plans requested paths and feeds the current waypoint into `Movement`.
///
/// When the current waypoint is within stopping distance the path advances;
/// once exhausted, the unit's destination is cleared.
///
/// Runs in `SimSet::Movement`, before movement.
pub(super) fn follow_paths(
    mut units: Query<(&Transform, &mut Pathfinding, &mut Movement), Without<Dead>>,
) {
    units
        .par_iter_mut()
        .for_each(|(transform, mut path, mut movement)| {
            if path.needs_path {
                let destination = path.final_destination;
                path.set(vec![destination]);
                path.needs_path = false;
            }

            let Some(waypoint) = path.current_waypoint() else {
                return;
            };

            if transform.translation.distance(waypoint) <= movement.stopping_distance {
                if path.advance() {
                    movement.destination = path.current_waypoint();
                } else {
                    movement.clear_destination();
                }
            } else {
                movement.set_destination(waypoint);
            }
        });
}
