//! Defender state and its firing timer.

use lane_defence_core::{DefenderId, DefenderSnapshot, Point, Rect};

use crate::entity::Entity;

/// Defender standing on a single cell.
#[derive(Clone, Debug)]
pub(crate) struct Defender {
    id: DefenderId,
    rect: Rect,
    health: f32,
    shooting: bool,
    timer: u32,
    fire_period: u32,
}

impl Defender {
    pub(crate) fn new(id: DefenderId, rect: Rect, health: f32, fire_period: u32) -> Self {
        Self {
            id,
            rect,
            health,
            shooting: false,
            timer: 0,
            fire_period,
        }
    }

    pub(crate) fn occupies(&self, cell: Rect) -> bool {
        self.rect.x == cell.x && self.rect.y == cell.y
    }

    pub(crate) fn is_shooting(&self) -> bool {
        self.shooting
    }

    pub(crate) fn set_shooting(&mut self, shooting: bool) {
        self.shooting = shooting;
    }

    pub(crate) fn take_damage(&mut self, amount: f32) {
        self.health -= amount;
    }

    pub(crate) fn is_destroyed(&self) -> bool {
        self.health <= 0.0
    }
}

impl Entity for Defender {
    type Id = DefenderId;
    type Snapshot = DefenderSnapshot;
    /// Origin of a projectile fired on this step.
    type Output = Option<Point>;

    fn id(&self) -> DefenderId {
        self.id
    }

    fn rect(&self) -> Rect {
        self.rect
    }

    fn update(&mut self) -> Option<Point> {
        if !self.shooting {
            self.timer = 0;
            return None;
        }

        self.timer = self.timer.wrapping_add(1);
        if self.fire_period != 0 && self.timer % self.fire_period == 0 {
            Some(self.rect.center())
        } else {
            None
        }
    }

    fn snapshot(&self) -> DefenderSnapshot {
        DefenderSnapshot {
            id: self.id,
            rect: self.rect,
            health: self.health,
            shooting: self.shooting,
        }
    }
}
