//! Periodic population report at `debug` level.

use std::collections::BTreeMap;

use bevy::prelude::*;

use crate::SimSet;
use crate::gameplay::Team;
use crate::query::UnitCensus;

/// Seconds between population reports.
pub const REPORT_INTERVAL_SECS: f32 = 1.0;

/// Report timer and the most recent figures.
#[derive(Resource, Debug, Reflect)]
#[reflect(Resource)]
pub struct PopulationReport {
    pub timer: Timer,
    /// Entities with a `Transform` at the last report.
    pub entities: usize,
    /// Living units per team at the last report.
    #[reflect(ignore)]
    pub living_per_team: BTreeMap<Team, usize>,
}

impl Default for PopulationReport {
    fn default() -> Self {
        Self {
            timer: Timer::from_seconds(REPORT_INTERVAL_SECS, TimerMode::Repeating),
            entities: 0,
            living_per_team: BTreeMap::new(),
        }
    }
}

fn report_population(
    time: Res<Time>,
    mut report: ResMut<PopulationReport>,
    census: UnitCensus,
    placed: Query<(), With<Transform>>,
) {
    report.timer.tick(time.delta());
    if !report.timer.just_finished() {
        return;
    }

    report.entities = placed.iter().count();
    report.living_per_team = census.living_per_team();
    debug!(
        "t={:.1}s entities={} living={:?}",
        time.elapsed_secs(),
        report.entities,
        report.living_per_team
    );
}

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PopulationReport>()
        .register_type::<PopulationReport>();

    app.add_systems(Update, report_population.in_set(SimSet::Cleanup));
}
