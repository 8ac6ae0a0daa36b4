//! Player orders, selection, and formations through the full tick.

use bevy::prelude::*;
use pretty_assertions::assert_eq;
use rts_sim::SimSet;
use rts_sim::gameplay::command::{CommandKind, UnitCommand, issue};
use rts_sim::gameplay::selection::{
    recall_control_group, save_control_group, select_units,
};
use rts_sim::gameplay::units::pathfinding::Pathfinding;
use rts_sim::gameplay::units::{AttackRange, Group, Movement, Selected, UnitKind};
use rts_sim::gameplay::{Dead, Health};
use rts_sim::query::selected_positions;

use crate::{create_sim_app, spawn};

/// Something a player does, replayed from the `Orders` phase.
#[derive(Debug, Clone)]
enum Action {
    Select(Vec<Entity>),
    Order(Vec<Entity>, CommandKind, Option<Vec3>, Option<Entity>),
    SaveGroup(u8),
    RecallGroup(u8),
}

#[derive(Resource, Default)]
struct PlayerInput(Vec<Action>);

fn replay_input(mut input: ResMut<PlayerInput>, mut commands: Commands) {
    for action in input.0.drain(..) {
        match action {
            Action::Select(entities) => select_units(&mut commands, entities, false),
            Action::Order(entities, kind, position, target) => {
                issue(&mut commands, entities, kind, position, target);
            }
            Action::SaveGroup(n) => save_control_group(&mut commands, n),
            Action::RecallGroup(n) => recall_control_group(&mut commands, n),
        }
    }
}

fn create_player_app() -> App {
    let mut app = create_sim_app();
    app.init_resource::<PlayerInput>();
    app.add_systems(Update, replay_input.in_set(SimSet::Orders));
    app
}

fn act(app: &mut App, actions: impl IntoIterator<Item = Action>) {
    app.world_mut()
        .resource_mut::<PlayerInput>()
        .0
        .extend(actions);
    app.update();
}

fn destination(app: &App, unit: Entity) -> Option<Vec3> {
    app.world().get::<Movement>(unit).unwrap().destination
}

#[test]
fn move_order_applies_in_the_tick_it_is_issued() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Infantry, 0, Vec3::ZERO, true);
    let goal = Vec3::new(0.0, 0.0, 10.0);

    act(&mut app, [Action::Order(vec![unit], CommandKind::Move, Some(goal), None)]);

    assert_eq!(destination(&app, unit), Some(goal));
    assert!(!app.world().get::<UnitCommand>(unit).unwrap().is_enabled());
    let position = app.world().get::<Transform>(unit).unwrap().translation;
    assert!(position.z > 0.0, "unit should start moving this tick");
}

#[test]
fn resolved_order_is_not_reapplied() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Archer, 0, Vec3::ZERO, true);

    act(&mut app, [Action::Order(vec![unit], CommandKind::Move, Some(Vec3::X * 20.0), None)]);
    app.world_mut()
        .get_mut::<Movement>(unit)
        .unwrap()
        .clear_destination();
    app.update();

    assert_eq!(destination(&app, unit), None);
}

#[test]
fn stop_halts_a_moving_unit() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Infantry, 0, Vec3::ZERO, true);

    act(&mut app, [Action::Order(vec![unit], CommandKind::Move, Some(Vec3::X * 30.0), None)]);
    for _ in 0..10 {
        app.update();
    }
    act(&mut app, [Action::Order(vec![unit], CommandKind::Stop, None, None)]);
    let halted_at = app.world().get::<Transform>(unit).unwrap().translation;
    for _ in 0..10 {
        app.update();
    }

    assert_eq!(destination(&app, unit), None);
    assert_eq!(app.world().get::<Transform>(unit).unwrap().translation, halted_at);
}

#[test]
fn cavalry_move_goes_through_pathfinding() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Cavalry, 0, Vec3::ZERO, true);
    let goal = Vec3::new(12.0, 0.0, 0.0);

    act(&mut app, [Action::Order(vec![unit], CommandKind::Move, Some(goal), None)]);
    assert_eq!(
        app.world().get::<Pathfinding>(unit).unwrap().waypoints,
        vec![goal]
    );

    for _ in 0..80 {
        app.update();
    }

    let position = app.world().get::<Transform>(unit).unwrap().translation;
    assert!(position.distance(goal) <= 1.5 + 1e-3);
    assert_eq!(destination(&app, unit), None);
}

#[test]
fn attack_order_makes_player_unit_fight() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Infantry, 0, Vec3::ZERO, true);
    let enemy = spawn(&mut app, UnitKind::Archer, 1, Vec3::new(1.5, 0.0, 0.0), true);

    act(&mut app, [Action::Order(vec![unit], CommandKind::Attack, None, Some(enemy))]);
    assert_eq!(app.world().get::<AttackRange>(unit).unwrap().target, Some(enemy));

    // 80 hp against 25 per second: four hits.
    let mut last_health = UnitKind::Archer.stats().hp;
    let mut died = false;
    for _ in 0..100 {
        app.update();
        if let Some(health) = app.world().get::<Health>(enemy) {
            last_health = health.current;
        }
        if app.world().get::<Dead>(enemy).is_some() {
            died = true;
            break;
        }
    }

    assert!(died, "archer survived with {last_health} hp");
    assert_eq!(last_health, 0.0);

    // Past the global cleanup delay the corpse is gone a tick later.
    app.update();
    assert!(app.world().get_entity(enemy).is_err());
}

#[test]
fn group_move_spreads_into_formation() {
    let mut app = create_player_app();
    let units: Vec<Entity> = (0..4)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f32;
            spawn(&mut app, UnitKind::Infantry, 0, Vec3::new(x, 0.0, 0.0), true)
        })
        .collect();
    let goal = Vec3::new(0.0, 0.0, 30.0);

    act(
        &mut app,
        [
            Action::Select(units.clone()),
            Action::Order(units.clone(), CommandKind::Move, Some(goal), None),
        ],
    );

    let mut destinations: Vec<Vec3> = units
        .iter()
        .map(|&u| destination(&app, u).unwrap())
        .collect();
    destinations.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.z.total_cmp(&b.z)));
    assert_eq!(
        destinations,
        vec![
            Vec3::new(-2.0, 0.0, 30.0),
            Vec3::new(-2.0, 0.0, 32.0),
            Vec3::new(0.0, 0.0, 30.0),
            Vec3::new(0.0, 0.0, 32.0),
        ]
    );
}

#[test]
fn control_group_round_trip_through_orders_phase() {
    let mut app = create_player_app();
    let a = spawn(&mut app, UnitKind::Archer, 0, Vec3::ZERO, true);
    let b = spawn(&mut app, UnitKind::Archer, 0, Vec3::X, true);
    let c = spawn(&mut app, UnitKind::Archer, 0, Vec3::Z, true);

    act(&mut app, [Action::Select(vec![a, b]), Action::SaveGroup(4)]);
    act(&mut app, [Action::Select(vec![c])]);
    act(&mut app, [Action::RecallGroup(4)]);

    let mut selected: Vec<Entity> = selected_positions(app.world_mut())
        .into_iter()
        .map(|(entity, _)| entity)
        .collect();
    selected.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(selected, expected);
    assert_eq!(app.world().get::<Group>(a).unwrap().id, 14);
}

#[test]
fn dead_units_stay_out_of_orders_and_groups() {
    let mut app = create_player_app();
    let unit = spawn(&mut app, UnitKind::Infantry, 0, Vec3::ZERO, true);
    let buddy = spawn(&mut app, UnitKind::Infantry, 0, Vec3::X, true);

    act(&mut app, [Action::Select(vec![unit, buddy]), Action::SaveGroup(1)]);
    app.world_mut().get_mut::<Health>(unit).unwrap().current = 0.0;
    app.update();

    assert!(app.world().get::<Dead>(unit).is_some());
    assert!(app.world().get::<Group>(unit).is_none());
    assert!(app.world().get::<Selected>(unit).is_none());

    act(
        &mut app,
        [
            Action::RecallGroup(1),
            Action::Order(vec![unit], CommandKind::Move, Some(Vec3::Z * 5.0), None),
        ],
    );

    assert!(app.world().get::<Selected>(unit).is_none());
    assert!(app.world().get::<Group>(unit).is_none());
    assert!(!app.world().get::<UnitCommand>(unit).unwrap().is_enabled());
    assert_eq!(destination(&app, unit), None);
    assert!(app.world().get::<Selected>(buddy).is_some());
}
