//! Cross-module scenarios driving the full simulation plugin.

mod orders;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rts_sim::gameplay::Team;
use rts_sim::gameplay::ai::AiController;
use rts_sim::gameplay::units::UnitKind;
use rts_sim::gameplay::units::spawn::spawn_unit_now;

/// Simulated time per update.
pub const STEP: Duration = Duration::from_millis(50);

/// An app running the whole simulation on a fixed clock. Time starts at zero.
pub fn create_sim_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(STEP));
    app.add_plugins(rts_sim::plugin);
    app.update();
    app
}

/// Spawn a unit; AI units search once per second.
pub fn spawn(app: &mut App, kind: UnitKind, team: u32, position: Vec3, player: bool) -> Entity {
    let world = app.world_mut();
    let entity = spawn_unit_now(world, kind, position, Team(team), player);
    if let Some(mut ai) = world.get_mut::<AiController>(entity) {
        ai.search_interval = 1.0;
    }
    entity
}

pub fn elapsed(app: &App) -> f32 {
    app.world().resource::<Time>().elapsed_secs()
}
