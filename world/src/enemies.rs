//! Enemy state: walking, melee locks and health.

use lane_defence_core::{EnemyId, EnemySnapshot, Rect};

use crate::entity::Entity;

/// Enemy walking leftwards along a lane.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    id: EnemyId,
    rect: Rect,
    speed: f32,
    movement: f32,
    health: f32,
    max_health: f32,
}

impl Enemy {
    pub(crate) fn new(id: EnemyId, rect: Rect, speed: f32, health: f32) -> Self {
        Self {
            id,
            rect,
            speed,
            movement: speed,
            health,
            max_health: health,
        }
    }

    /// Stops the enemy while it is locked in melee with a defender.
    pub(crate) fn freeze(&mut self) {
        self.movement = 0.0;
    }

    /// Lets the enemy walk at its own speed again.
    pub(crate) fn release(&mut self) {
        self.movement = self.speed;
    }

    pub(crate) fn take_damage(&mut self, amount: f32) -> f32 {
        self.health -= amount;
        self.health
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub(crate) fn max_health(&self) -> f32 {
        self.max_health
    }

    pub(crate) fn has_breached(&self) -> bool {
        self.rect.x <= 0.0
    }
}

impl Entity for Enemy {
    type Id = EnemyId;
    type Snapshot = EnemySnapshot;
    type Output = ();

    fn id(&self) -> EnemyId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self) {
        self.rect.x -= self.movement;
    }

    fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            rect: self.rect,
            health: self.health,
            max_health: self.max_health,
            speed: self.speed,
            movement: self.movement,
        }
    }
}
