//! Testing utilities for Bevy systems.

#![cfg(test)]

use std::time::Duration;

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::gameplay::Team;
use crate::gameplay::ai::AiController;
use crate::gameplay::units::UnitKind;
use crate::gameplay::units::spawn::spawn_unit_now;

/// Simulated seconds advanced by every `app.update()` in tests.
pub const TEST_STEP: Duration = Duration::from_millis(50);

/// Creates a minimal app whose clock advances by exactly [`TEST_STEP`] per update.
/// The first update after creation has a zero delta.
pub fn create_test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_STEP));
    app
}

/// Creates a test app running the full simulation, with time initialized
/// (elapsed = 0 after the first frame).
pub fn create_sim_test_app() -> App {
    let mut app = create_test_app();
    app.add_plugins(crate::plugin);
    app.update();
    app
}

/// Helper to advance the app by one frame.
pub fn tick(app: &mut App) {
    app.update();
}

/// Helper to advance the app by multiple frames.
pub fn tick_multiple(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

/// Current elapsed simulated time.
pub fn elapsed_secs(app: &App) -> f32 {
    app.world().resource::<Time>().elapsed_secs()
}

/// Asserts how many entities match the filter `F`.
pub fn assert_entity_count<F: QueryFilter>(app: &mut App, expected: usize) {
    let mut query = app.world_mut().query_filtered::<Entity, F>();
    let actual = query.iter(app.world()).count();
    assert_eq!(actual, expected, "unexpected entity count");
}

/// Spawns a fully-formed unit through the real spawner. AI units get a fixed
/// one-second search interval so tests are deterministic.
pub fn spawn_test_unit(
    world: &mut World,
    kind: UnitKind,
    team: u32,
    position: Vec3,
    player_controlled: bool,
) -> Entity {
    let entity = spawn_unit_now(world, kind, position, Team(team), player_controlled);
    if let Some(mut ai) = world.get_mut::<AiController>(entity) {
        ai.search_interval = 1.0;
    }
    entity
}
