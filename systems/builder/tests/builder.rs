use lane_defence_core::{CellCoord, Command, Event, Point, Rules};
use lane_defence_system_builder::{Builder, BuilderInput};
use lane_defence_world::{self as world, query, World};

#[test]
fn click_snaps_down_to_the_cell_origin() {
    let builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(true, Some(Point::new(342.5, 276.0))),
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlaceDefender {
            cell: CellCoord::new(3, 2),
        }]
    );
}

#[test]
fn hovering_without_click_is_silent() {
    let builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(false, Some(Point::new(342.5, 276.0))),
        &mut commands,
    );

    assert!(commands.is_empty());
}

#[test]
fn clicks_on_the_control_bar_are_dropped() {
    let builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        BuilderInput::new(true, Some(Point::new(450.0, 99.9))),
        &mut commands,
    );
    builder.handle(BuilderInput::new(true, None), &mut commands);

    assert!(commands.is_empty());
}

#[test]
fn clicks_follow_custom_cell_sizes() {
    let rules = Rules {
        cell_size: 50.0,
        ..Rules::default()
    };
    let builder = Builder::new(&rules);

    assert_eq!(
        builder.snap(Point::new(149.0, 51.0)),
        Some(CellCoord::new(2, 1))
    );
}

#[test]
fn second_click_on_same_cell_leaves_world_unchanged() {
    let mut world = World::new();
    let builder = Builder::new(query::rules(&world));
    let click = BuilderInput::new(true, Some(Point::new(120.0, 410.0)));

    let mut events = Vec::new();
    for _ in 0..2 {
        let mut commands = Vec::new();
        builder.handle(click, &mut commands);
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
    }

    assert_eq!(query::defenders(&world).len(), 1);
    assert!((query::resources(&world) - 200.0).abs() < f32::EPSILON);
    assert!(matches!(events[1], Event::DefenderPlacementRejected { .. }));
}
