use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

use lane_defence_core::{Command, Event, Lane, Rules};
use lane_defence_system_spawning::{Config, Spawning};
use lane_defence_world::{self as world, query, World};

#[test]
fn first_spawn_happens_on_frame_zero() {
    let mut spawning = Spawning::new(Config::new(600, 100, 120, 7));
    let mut commands = Vec::new();
    spawning.handle(0, &mut commands);
    assert_eq!(commands.len(), 1);
    assert_eq!(spawning.interval(), 500);
}

#[test]
fn interval_decays_linearly_then_holds() {
    let mut spawning = Spawning::new(Config::from_rules(&Rules::default(), 0x5eed));
    let mut observed = vec![spawning.interval()];
    let mut spawn_frames = Vec::new();

    for frame in 0..2_000_u64 {
        let mut commands = Vec::new();
        spawning.handle(frame, &mut commands);
        if !commands.is_empty() {
            spawn_frames.push(frame);
            observed.push(spawning.interval());
        }
    }

    assert_eq!(&observed[..6], &[600, 500, 400, 300, 200, 200]);
    assert!(observed[5..].iter().all(|interval| *interval == 200));
    assert_eq!(&spawn_frames[..5], &[0, 500, 800, 900, 1_000]);
}

#[test]
fn rolls_stay_within_configured_lanes_and_speeds() {
    let rules = Rules::default();
    let mut spawning = Spawning::new(Config::new(1, 0, 0, 0xfeed).with_lanes(rules.lanes));
    let mut commands = Vec::new();
    for frame in 0..500 {
        spawning.handle(frame, &mut commands);
    }

    assert_eq!(commands.len(), 500);
    let mut lanes_seen = [false; 5];
    for command in &commands {
        match command {
            Command::SpawnEnemy { lane, speed } => {
                assert!((1..=5).contains(&lane.row()), "lane {lane:?} out of range");
                assert!((0.4..0.6).contains(speed), "speed {speed} out of range");
                lanes_seen[(lane.row() - 1) as usize] = true;
            }
            other => panic!("unexpected command emitted: {other:?}"),
        }
    }
    assert!(lanes_seen.iter().all(|seen| *seen), "every lane is reachable");
}

#[test]
fn deterministic_replay_produces_identical_sequence() {
    let first = replay(0x4d59_5df4_d0f3_3173);
    let second = replay(0x4d59_5df4_d0f3_3173);
    let other = replay(0x1234_5678);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert_ne!(first.spawns, other.spawns, "seed should influence the rolls");
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = World::new();
    let mut spawning = Spawning::new(Config::from_rules(query::rules(&world), seed));
    let mut spawns = Vec::new();

    for _ in 0..1_200 {
        let mut commands = Vec::new();
        spawning.handle(query::frame(&world), &mut commands);
        let mut events = Vec::new();
        for command in commands {
            world::apply(&mut world, command, &mut events);
        }
        world::apply(&mut world, Command::AdvanceFrame, &mut events);
        for event in events {
            if let Event::EnemySpawned { lane, speed, .. } = event {
                spawns.push(SpawnRecord {
                    lane,
                    speed_bits: speed.to_bits(),
                });
            }
        }
    }

    ReplayOutcome { spawns }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    spawns: Vec<SpawnRecord>,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct SpawnRecord {
    lane: Lane,
    speed_bits: u32,
}
