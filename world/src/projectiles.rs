//! Projectile state.

use lane_defence_core::{ProjectileId, ProjectileSnapshot, Rect};

use crate::entity::Entity;

/// Projectile flying rightwards at constant speed.
#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    id: ProjectileId,
    rect: Rect,
    power: f32,
    speed: f32,
}

impl Projectile {
    pub(crate) fn new(id: ProjectileId, rect: Rect, power: f32, speed: f32) -> Self {
        Self {
            id,
            rect,
            power,
            speed,
        }
    }

    pub(crate) fn power(&self) -> f32 {
        self.power
    }
}

impl Entity for Projectile {
    type Id = ProjectileId;
    type Snapshot = ProjectileSnapshot;
    type Output = ();

    fn id(&self) -> ProjectileId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self) {
        self.rect.x += self.speed;
    }

    fn snapshot(&self) -> ProjectileSnapshot {
        ProjectileSnapshot {
            id: self.id,
            rect: self.rect,
        }
    }
}
