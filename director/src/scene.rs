//! Translates world state into the scene consumed by rendering backends.

use glam::Vec2;
use lane_defence_core::{collision, Point, Rect};
use lane_defence_rendering::{Color, HudText, Scene, SceneBlock, SceneCell, SceneOrb};
use lane_defence_world::{query, World};

const HUD_SIZE: f32 = 30.0;
const BANNER_SIZE: f32 = 60.0;
const LABEL_SIZE: f32 = 30.0;
const LABEL_OFFSET: Vec2 = Vec2::new(15.0, 30.0);

/// Rebuilds `scene` from the current world state.
pub(crate) fn compose(world: &World, cursor: Option<Point>, control_bar: Color, scene: &mut Scene) {
    scene.clear();
    scene.control_bar = control_bar;
    scene.control_bar_height = query::rules(world).cell_size;

    scene.hud.push(HudText::new(
        format!("Score: {}", query::score(world)),
        Vec2::new(10.0, 35.0),
        HUD_SIZE,
        Color::GOLD,
    ));
    scene.hud.push(HudText::new(
        format!("Resources: {}", query::resources(world)),
        Vec2::new(10.0, 75.0),
        HUD_SIZE,
        Color::GOLD,
    ));

    if query::is_game_over(world) {
        scene.banner = Some(HudText::new(
            "GAME OVER",
            Vec2::new(200.0, 350.0),
            BANNER_SIZE,
            Color::BLACK,
        ));
    }

    let pointer = cursor.map(Rect::cursor);
    scene
        .cells
        .extend(query::grid(world).cells().iter().map(|cell| SceneCell {
            rect: cell.rect(),
            hovered: pointer.is_some_and(|pointer| collision(&cell.rect(), &pointer)),
        }));

    scene.defenders.extend(
        query::defenders(world)
            .into_iter()
            .map(|defender| block(defender.rect, defender.health, Color::BLUE, Color::GOLD)),
    );
    scene.enemies.extend(
        query::enemies(world)
            .into_iter()
            .map(|enemy| block(enemy.rect, enemy.health, Color::RED, Color::BLACK)),
    );
    scene
        .projectiles
        .extend(query::projectiles(world).into_iter().map(|projectile| SceneOrb {
            center: Vec2::new(projectile.rect.x, projectile.rect.y),
            radius: projectile.rect.width,
            color: Color::BLACK,
        }));
}

fn block(rect: Rect, health: f32, fill: Color, label_color: Color) -> SceneBlock {
    SceneBlock {
        rect,
        fill,
        label: HudText::new(
            health_label(health),
            Vec2::new(rect.x, rect.y) + LABEL_OFFSET,
            LABEL_SIZE,
            label_color,
        ),
    }
}

fn health_label(health: f32) -> String {
    format!("{}", health.floor())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_labels_are_floored() {
        assert_eq!(health_label(99.8), "99");
        assert_eq!(health_label(200.0), "200");
        assert_eq!(health_label(-0.2), "-1");
    }

    #[test]
    fn block_label_sits_inside_the_block() {
        let block = block(
            Rect::new(300.0, 200.0, 100.0, 100.0),
            100.0,
            Color::BLUE,
            Color::GOLD,
        );

        assert_eq!(block.label.position, Vec2::new(315.0, 230.0));
        assert_eq!(block.label.text, "100");
    }

    #[test]
    fn hover_marks_only_the_cells_under_the_pointer() {
        let world = World::new();
        let mut scene = Scene::new(Vec2::new(900.0, 600.0), 100.0).expect("valid field");

        compose(
            &world,
            Some(Point::new(150.0, 250.0)),
            Color::BLUE,
            &mut scene,
        );

        let hovered: Vec<Rect> = scene
            .cells
            .iter()
            .filter(|cell| cell.hovered)
            .map(|cell| cell.rect)
            .collect();
        assert_eq!(hovered, vec![Rect::new(100.0, 200.0, 100.0, 100.0)]);
        assert_eq!(scene.hud[0].text, "Score: 0");
        assert_eq!(scene.hud[1].text, "Resources: 300");
        assert!(scene.banner.is_none());
    }
}
