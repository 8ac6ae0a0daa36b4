//! AI: throttled nearest-enemy target selection for non-player units.

use bevy::prelude::*;

use crate::SimSet;
use crate::gameplay::units::{AttackRange, Movement, PlayerUnit, UnitType};
use crate::gameplay::{Dead, Team};

/// Behavior profile of an AI unit. Only `Aggressive` does anything; the
/// others are accepted and behave as "never search".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum AiBehavior {
    #[default]
    Aggressive,
    Defensive,
    Patrol,
    Guard,
}

/// Target-search state of an AI-driven unit.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AiController {
    pub behavior: AiBehavior,
    /// Enemies farther than this are invisible to the search.
    pub detection_range: f32,
    pub last_search_time: f32,
    /// Seconds between searches. Randomized per unit at spawn.
    pub search_interval: f32,
}

impl AiController {
    #[must_use]
    pub fn aggressive(detection_range: f32, search_interval: f32) -> Self {
        Self {
            behavior: AiBehavior::Aggressive,
            detection_range,
            last_search_time: 0.0,
            search_interval,
        }
    }

    /// Whether enough time has passed since the last search.
    #[must_use]
    pub fn search_due(&self, now: f32) -> bool {
        now - self.last_search_time > self.search_interval
    }
}

/// Nearest hostile candidate within `detection_range` of `position`.
///
/// Ties keep the first candidate encountered.
pub fn nearest_enemy(
    position: Vec3,
    team: Team,
    detection_range: f32,
    candidates: impl IntoIterator<Item = (Entity, Vec3, Team)>,
) -> Option<(Entity, Vec3, f32)> {
    let mut nearest: Option<(Entity, Vec3, f32)> = None;
    for (candidate, candidate_pos, candidate_team) in candidates {
        if !team.is_hostile_to(candidate_team) {
            continue;
        }
        let dist = position.distance(candidate_pos);
        if dist > detection_range {
            continue;
        }
        if nearest.is_none_or(|(_, _, d)| dist < d) {
            nearest = Some((candidate, candidate_pos, dist));
        }
    }
    nearest
}

/// Assigns each due AI unit its nearest living enemy, and a pursuit
/// destination when that enemy is out of attack range. Finding nothing
/// leaves any existing target in place. Runs in `SimSet::Ai`.
pub(super) fn find_target(
    time: Res<Time>,
    mut seekers: Query<
        (
            &Transform,
            &UnitType,
            &mut AiController,
            &mut Movement,
            &mut AttackRange,
        ),
        (Without<Dead>, Without<PlayerUnit>),
    >,
    candidates: Query<(Entity, &Transform, &UnitType), Without<Dead>>,
) {
    let now = time.elapsed_secs();

    seekers.par_iter_mut().for_each(
        |(transform, unit_type, mut ai, mut movement, mut attack_range)| {
            if ai.behavior != AiBehavior::Aggressive || !ai.search_due(now) {
                return;
            }
            ai.last_search_time = now;

            let found = nearest_enemy(
                transform.translation,
                unit_type.team,
                ai.detection_range,
                candidates
                    .iter()
                    .map(|(entity, t, u)| (entity, t.translation, u.team)),
            );
            let Some((target, target_pos, dist)) = found else {
                return;
            };

            attack_range.set_target(target);
            if dist > attack_range.range {
                movement.set_destination(target_pos);
            }
        },
    );
}

pub(super) fn plugin(app: &mut App) {
    app.register_type::<AiController>();

    app.add_systems(Update, find_target.in_set(SimSet::Ai));
}
