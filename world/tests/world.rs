use lane_defence_core::{
    CellCoord, Command, DefenderId, Event, Lane, PlacementError, Rect, Rules,
};
use lane_defence_world::{self as world, query, World};

fn apply_all(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Vec<Event> {
    let mut events = Vec::new();
    for command in commands {
        world::apply(world, command, &mut events);
    }
    events
}

#[test]
fn placement_debits_cost_and_rejects_duplicates() {
    let mut world = World::new();
    let cell = CellCoord::new(3, 2);

    let first = apply_all(&mut world, [Command::PlaceDefender { cell }]);
    assert_eq!(
        first,
        vec![Event::DefenderPlaced {
            defender: DefenderId::new(0),
            cell,
            resources: 200.0,
        }]
    );
    assert!((query::resources(&world) - 200.0).abs() < f32::EPSILON);

    let second = apply_all(&mut world, [Command::PlaceDefender { cell }]);
    assert_eq!(
        second,
        vec![Event::DefenderPlacementRejected {
            cell,
            reason: PlacementError::Occupied,
        }]
    );

    let defenders = query::defenders(&world);
    assert_eq!(defenders.len(), 1);
    assert_eq!(defenders[0].rect, Rect::new(300.0, 200.0, 100.0, 100.0));
    assert!((query::resources(&world) - 200.0).abs() < f32::EPSILON);
}

#[test]
fn placement_stops_when_resources_run_out() {
    let mut world = World::new();
    let events = apply_all(
        &mut world,
        (0..4).map(|column| Command::PlaceDefender {
            cell: CellCoord::new(column, 1),
        }),
    );

    let rejected: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::DefenderPlacementRejected { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(rejected, vec![PlacementError::InsufficientResources]);
    assert_eq!(query::defenders(&world).len(), 3);
    assert!(query::resources(&world).abs() < f32::EPSILON);
}

#[test]
fn placement_rejects_control_bar_and_out_of_bounds_cells() {
    let mut world = World::new();
    let events = apply_all(
        &mut world,
        [
            Command::PlaceDefender {
                cell: CellCoord::new(4, 0),
            },
            Command::PlaceDefender {
                cell: CellCoord::new(9, 3),
            },
            Command::PlaceDefender {
                cell: CellCoord::new(2, 6),
            },
        ],
    );

    let reasons: Vec<_> = events
        .iter()
        .filter_map(|event| match event {
            Event::DefenderPlacementRejected { reason, .. } => Some(*reason),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            PlacementError::ControlBar,
            PlacementError::OutOfBounds,
            PlacementError::OutOfBounds,
        ]
    );
    assert!(query::defenders(&world).is_empty());
    assert!((query::resources(&world) - 300.0).abs() < f32::EPSILON);
}

#[test]
fn melee_lock_freezes_enemy_until_defender_falls() {
    let mut world = World::new();
    let _ = apply_all(
        &mut world,
        [
            Command::PlaceDefender {
                cell: CellCoord::new(3, 2),
            },
            Command::SpawnEnemy {
                lane: Lane::new(2),
                speed: 1.0,
            },
        ],
    );

    for _ in 0..500 {
        let _ = apply_all(&mut world, [Command::UpdateEnemies]);
    }
    let enemy = query::enemies(&world)[0];
    assert!((enemy.rect.x - 400.0).abs() < f32::EPSILON);

    let _ = apply_all(&mut world, [Command::UpdateDefenders]);
    let frozen = query::enemies(&world)[0];
    assert!(frozen.movement.abs() < f32::EPSILON);

    let _ = apply_all(&mut world, [Command::UpdateEnemies]);
    let held = query::enemies(&world)[0];
    assert!((held.rect.x - frozen.rect.x).abs() < f32::EPSILON);

    let mut destroyed = false;
    for _ in 0..1_000 {
        let events = apply_all(&mut world, [Command::UpdateDefenders]);
        if events.contains(&Event::DefenderDestroyed {
            defender: DefenderId::new(0),
        }) {
            destroyed = true;
            break;
        }
        let _ = apply_all(&mut world, [Command::UpdateEnemies]);
    }
    assert!(destroyed, "defender should fall to sustained contact");
    assert!(query::defenders(&world).is_empty());

    let released = query::enemies(&world)[0];
    assert!((released.movement - released.speed).abs() < f32::EPSILON);

    let _ = apply_all(&mut world, [Command::UpdateEnemies]);
    let moving = query::enemies(&world)[0];
    assert!((released.rect.x - moving.rect.x - 1.0).abs() < f32::EPSILON);
}

#[test]
fn enemy_identifiers_keep_counting_after_removals() {
    let mut world = World::with_rules(Rules {
        fire_period: 1,
        ..Rules::default()
    });
    let mut commands = vec![
        Command::PlaceDefender {
            cell: CellCoord::new(0, 1),
        },
        Command::SetDefenderShooting {
            defender: DefenderId::new(0),
            shooting: true,
        },
        Command::SpawnEnemy {
            lane: Lane::new(1),
            speed: 300.0,
        },
        Command::UpdateEnemies,
    ];
    for _ in 0..120 {
        commands.extend([Command::UpdateDefenders, Command::UpdateProjectiles]);
    }
    commands.push(Command::UpdateEnemies);
    let events = apply_all(&mut world, commands);

    assert!(events.iter().any(|event| matches!(
        event,
        Event::EnemyDefeated { enemy, .. } if enemy.get() == 0
    )));
    assert!(query::enemies(&world).is_empty());

    let _ = apply_all(
        &mut world,
        [Command::SpawnEnemy {
            lane: Lane::new(3),
            speed: 0.5,
        }],
    );

    let issued = query::issued(&world).enemies;
    let ids: Vec<u32> = query::enemies(&world)
        .iter()
        .map(|enemy| enemy.id.get())
        .collect();
    assert_eq!(issued, 2);
    assert_eq!(ids, vec![issued - 1]);
    assert!(!query::is_game_over(&world));
}

#[test]
fn defender_identifiers_keep_counting_after_removals() {
    let mut world = World::with_rules(Rules {
        contact_damage: 100.0,
        ..Rules::default()
    });
    let events = apply_all(
        &mut world,
        [
            Command::PlaceDefender {
                cell: CellCoord::new(8, 1),
            },
            Command::SpawnEnemy {
                lane: Lane::new(1),
                speed: 100.0,
            },
            Command::UpdateEnemies,
            Command::UpdateDefenders,
            Command::PlaceDefender {
                cell: CellCoord::new(2, 4),
            },
        ],
    );

    assert!(events.contains(&Event::DefenderDestroyed {
        defender: DefenderId::new(0),
    }));
    let ids: Vec<DefenderId> = query::defenders(&world)
        .iter()
        .map(|defender| defender.id)
        .collect();
    assert_eq!(ids, vec![DefenderId::new(1)]);
    assert_eq!(query::issued(&world).defenders, 2);
}
