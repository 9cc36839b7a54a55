use glam::Vec2;
use lane_defence_core::Rules;
use lane_defence_director::{Director, DirectorConfig};
use lane_defence_rendering::{FrameInput, Schedule, Scene};
use lane_defence_world::query;

fn director(rules: Rules, seed: u64) -> (Director, Scene) {
    let mut director = Director::new(DirectorConfig {
        rules,
        seed: Some(seed),
        ..DirectorConfig::default()
    })
    .expect("valid config");
    let scene = director.presentation().expect("valid presentation").scene;
    (director, scene)
}

fn click(x: f32, y: f32) -> FrameInput {
    FrameInput {
        cursor: Some(Vec2::new(x, y)),
        click: true,
    }
}

#[test]
fn breach_runs_one_more_full_frame_then_halts() {
    let rules = Rules {
        enemy_speed_min: 100.0,
        enemy_speed_max: 100.0,
        ..Rules::default()
    };
    let (mut director, mut scene) = director(rules, 3);

    let mut breach_frame = None;
    for call in 0..64 {
        let schedule = director.frame(FrameInput::default(), &mut scene);
        if query::is_game_over(director.world()) {
            assert_eq!(schedule, Schedule::Continue);
            assert!(scene.banner.is_some());
            breach_frame = Some(call);
            break;
        }
        assert_eq!(schedule, Schedule::Continue);
        assert!(scene.banner.is_none());
    }
    assert!(breach_frame.is_some(), "an enemy should break through");

    let frame = query::frame(director.world());
    let breach_x = query::enemies(director.world())[0].rect.x;
    assert_eq!(director.frame(FrameInput::default(), &mut scene), Schedule::Halt);
    assert!(scene.banner.is_some());
    assert!(director.is_halted());
    assert_eq!(query::frame(director.world()), frame + 1);
    assert_eq!(query::enemies(director.world())[0].rect.x, breach_x - 100.0);
    assert_eq!(scene.enemies[0].rect.x, breach_x - 100.0);

    assert_eq!(director.frame(click(150.0, 250.0), &mut scene), Schedule::Halt);
    assert_eq!(query::frame(director.world()), frame + 1);
    assert!(query::defenders(director.world()).is_empty());
}

#[test]
fn clicks_spend_resources_once_per_cell() {
    let (mut director, mut scene) = director(Rules::default(), 1);

    assert_eq!(director.frame(click(150.0, 250.0), &mut scene), Schedule::Continue);
    assert_eq!(query::defenders(director.world()).len(), 1);
    assert_eq!(scene.hud[1].text, "Resources: 200");
    assert_eq!(scene.defenders.len(), 1);
    assert_eq!(scene.defenders[0].label.text, "100");

    let _ = director.frame(click(199.0, 299.0), &mut scene);
    assert_eq!(query::defenders(director.world()).len(), 1);
    assert_eq!(scene.hud[1].text, "Resources: 200");

    let _ = director.frame(click(450.0, 50.0), &mut scene);
    assert_eq!(query::defenders(director.world()).len(), 1);
}

#[test]
fn resources_run_out_after_three_defenders() {
    let (mut director, mut scene) = director(Rules::default(), 1);

    for column in 0..4 {
        let _ = director.frame(click(column as f32 * 100.0 + 50.0, 150.0), &mut scene);
    }

    assert_eq!(query::defenders(director.world()).len(), 3);
    assert_eq!(scene.hud[1].text, "Resources: 0");
}

#[test]
fn hover_follows_the_pointer() {
    let (mut director, mut scene) = director(Rules::default(), 1);
    let hover = FrameInput {
        cursor: Some(Vec2::new(420.0, 320.0)),
        click: false,
    };

    let _ = director.frame(hover, &mut scene);
    assert_eq!(scene.cells.iter().filter(|cell| cell.hovered).count(), 1);

    let _ = director.frame(FrameInput::default(), &mut scene);
    assert!(scene.cells.iter().all(|cell| !cell.hovered));
}

#[test]
fn sessions_with_the_same_seed_replay_identically() {
    let (mut first, mut first_scene) = director(Rules::default(), 77);
    let (mut second, mut second_scene) = director(Rules::default(), 77);

    for frame in 0..1_500u32 {
        let input = if frame % 250 == 0 {
            click(50.0, ((frame / 250 % 5 + 1) * 100 + 50) as f32)
        } else {
            FrameInput::default()
        };
        let _ = first.frame(input, &mut first_scene);
        let _ = second.frame(input, &mut second_scene);
    }

    assert_eq!(first.summary(), second.summary());
    assert_eq!(first_scene, second_scene);
    assert!(first.summary().enemies_spawned >= 5);
}
