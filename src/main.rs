//! Headless skirmish: two AI armies fight until one is wiped out.

use std::f32::consts::TAU;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;
use rts_sim::gameplay::units::spawn::spawn_unit;
use rts_sim::prelude::*;
use rts_sim::query::UnitCensus;

/// Simulated time per update (about 30 ticks per second).
const TICK: Duration = Duration::from_millis(33);

/// Army sizes of team 0 and team 1.
const TEAM_0_UNITS: usize = 10;
const TEAM_1_UNITS: usize = 15;

/// Army rally points.
const TEAM_0_SPAWN: Vec3 = Vec3::new(-2.0, 0.0, 0.0);
const TEAM_1_SPAWN: Vec3 = Vec3::new(2.0, 0.0, 0.0);

/// Units deploy within this distance of their rally point.
///
/// Rally gap plus twice the scatter stays inside the shortest detection range,
/// so every unit sees an enemy from the first tick. Units only ever move
/// towards other units, so the field never spreads wider than it deploys.
const SPAWN_SCATTER: f32 = 1.4;

/// Seconds between victory checks.
const VICTORY_CHECK_SECS: f32 = 1.0;

/// The battle is called a draw after this many simulated seconds.
const TIME_LIMIT_SECS: f32 = 300.0;

fn main() -> AppExit {
    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::ZERO)),
            LogPlugin {
                filter: "info,rts_sim=debug,skirmish=debug".to_string(),
                ..default()
            },
        ))
        .add_plugins(skirmish)
        .run()
}

/// Fixed clock, simulation, armies and the victory check.
fn skirmish(app: &mut App) {
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK))
        .add_plugins(rts_sim::plugin)
        .insert_resource(VictoryTimer(Timer::from_seconds(
            VICTORY_CHECK_SECS,
            TimerMode::Repeating,
        )))
        .add_systems(Startup, spawn_armies)
        .add_systems(Update, check_victory.after(SimSet::EndPlayback));
}

#[derive(Resource, Debug)]
struct VictoryTimer(Timer);

fn spawn_armies(mut commands: Commands) {
    let mut rng = rand::rng();

    for (team, center, count) in [
        (Team(0), TEAM_0_SPAWN, TEAM_0_UNITS),
        (Team(1), TEAM_1_SPAWN, TEAM_1_UNITS),
    ] {
        for _ in 0..count {
            let kind = UnitKind::ALL[rng.random_range(0..UnitKind::ALL.len())];
            let position = deployment_position(&mut rng, center);
            spawn_unit(&mut commands, kind, position, team, false);
        }
        info!("Team {} deployed {count} units", team.0);
    }
}

/// A random point within `SPAWN_SCATTER` of `center`.
fn deployment_position(rng: &mut impl Rng, center: Vec3) -> Vec3 {
    let angle = rng.random_range(0.0..TAU);
    let distance = rng.random_range(0.0..SPAWN_SCATTER);
    center + Vec3::new(angle.cos(), 0.0, angle.sin()) * distance
}

fn check_victory(
    time: Res<Time>,
    mut timer: ResMut<VictoryTimer>,
    census: UnitCensus,
    mut exit: MessageWriter<AppExit>,
) {
    timer.0.tick(time.delta());
    if !timer.0.just_finished() {
        return;
    }

    let survivors = census.surviving_teams();
    let elapsed = time.elapsed_secs();

    if survivors.len() <= 1 {
        match survivors.first() {
            Some(team) => info!(
                "Team {} wins after {elapsed:.1}s with {} units standing",
                team.0,
                census.living_count()
            ),
            None => info!("Mutual destruction after {elapsed:.1}s"),
        }
        exit.write(AppExit::Success);
    } else if elapsed >= TIME_LIMIT_SECS {
        info!(
            "Time limit reached after {elapsed:.1}s, survivors: {:?}",
            census.living_per_team()
        );
        exit.write(AppExit::Success);
    }
}
