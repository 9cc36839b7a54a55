#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that decides which defenders are engaged from world snapshots.

use lane_defence_core::{Command, DefenderSnapshot, EngagementRule, EnemySnapshot};

/// Targeting system that reuses a scratch buffer of lane threats between frames.
#[derive(Debug, Default)]
pub struct Targeting {
    rule: EngagementRule,
    threats: Vec<LaneThreat>,
}

impl Targeting {
    /// Creates a new targeting system applying the provided rule.
    #[must_use]
    pub fn new(rule: EngagementRule) -> Self {
        Self {
            rule,
            threats: Vec::new(),
        }
    }

    /// Rule used to decide engagement.
    #[must_use]
    pub fn rule(&self) -> EngagementRule {
        self.rule
    }

    /// Emits `SetDefenderShooting` for every defender whose engagement changes.
    ///
    /// Under [`EngagementRule::LaneAhead`] a defender is engaged while a live
    /// enemy inside the field shares its lane at or beyond its left edge.
    /// Under [`EngagementRule::Never`] every defender is held idle.
    pub fn handle(
        &mut self,
        defenders: &[DefenderSnapshot],
        enemies: &[EnemySnapshot],
        field_width: f32,
        out: &mut Vec<Command>,
    ) {
        if defenders.is_empty() {
            return;
        }

        self.prepare_threats(enemies, field_width);

        for defender in defenders {
            let engaged = match self.rule {
                EngagementRule::Never => false,
                EngagementRule::LaneAhead => self.threats.iter().any(|threat| {
                    threat.y == defender.rect.y && threat.x >= defender.rect.x
                }),
            };

            if engaged != defender.shooting {
                out.push(Command::SetDefenderShooting {
                    defender: defender.id,
                    shooting: engaged,
                });
            }
        }
    }

    fn prepare_threats(&mut self, enemies: &[EnemySnapshot], field_width: f32) {
        self.threats.clear();
        if self.rule == EngagementRule::Never {
            return;
        }

        self.threats.extend(
            enemies
                .iter()
                .filter(|enemy| enemy.health > 0.0 && enemy.rect.x < field_width)
                .map(|enemy| LaneThreat {
                    x: enemy.rect.x,
                    y: enemy.rect.y,
                }),
        );
    }
}

#[derive(Clone, Copy, Debug)]
struct LaneThreat {
    x: f32,
    y: f32,
}
