#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state for Lane Defence.
//!
//! The world owns the grid, the three entity registries and the economy.
//! It changes only through [`apply`], and exposes read-only state through
//! the [`query`] module.

mod defenders;
mod enemies;
mod entity;
mod grid;
mod projectiles;
mod registry;

use lane_defence_core::{
    CellCoord, Command, DefenderId, EnemyId, Event, Lane, PlacementError, ProjectileId, Rect,
    Rules, WELCOME_BANNER,
};

use self::{
    defenders::Defender, enemies::Enemy, entity::Entity, projectiles::Projectile,
    registry::Registry,
};

pub use self::grid::{Cell, Grid};

/// Represents the authoritative Lane Defence session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    rules: Rules,
    grid: Grid,
    defenders: Registry<DefenderId, Defender>,
    enemies: Registry<EnemyId, Enemy>,
    projectiles: Registry<ProjectileId, Projectile>,
    score: f32,
    resources: f32,
    game_over: bool,
    frame: u64,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    /// Creates a new session using the canonical rules.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rules(Rules::default())
    }

    /// Creates a new session using the provided rules.
    #[must_use]
    pub fn with_rules(rules: Rules) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid: Grid::new(&rules),
            defenders: Registry::new(),
            enemies: Registry::new(),
            projectiles: Registry::new(),
            score: 0.0,
            resources: rules.starting_resources,
            game_over: false,
            frame: 0,
            rules,
        }
    }

    fn place_defender(&mut self, cell: CellCoord, out_events: &mut Vec<Event>) {
        let rect = cell.rect(self.rules.cell_size);
        let rejection = if rect.y < self.rules.cell_size {
            Some(PlacementError::ControlBar)
        } else if rect.x >= self.rules.field_width || rect.y >= self.rules.field_height {
            Some(PlacementError::OutOfBounds)
        } else if self.defenders.values().any(|defender| defender.occupies(rect)) {
            Some(PlacementError::Occupied)
        } else if self.resources < self.rules.defender_cost {
            Some(PlacementError::InsufficientResources)
        } else {
            None
        };

        if let Some(reason) = rejection {
            out_events.push(Event::DefenderPlacementRejected { cell, reason });
            return;
        }

        let health = self.rules.defender_health;
        let fire_period = self.rules.fire_period;
        let defender = self
            .defenders
            .insert_with(|id| Defender::new(id, rect, health, fire_period));
        self.resources -= self.rules.defender_cost;
        out_events.push(Event::DefenderPlaced {
            defender,
            cell,
            resources: self.resources,
        });
    }

    fn set_shooting(&mut self, id: DefenderId, shooting: bool, out_events: &mut Vec<Event>) {
        let Some(defender) = self.defenders.get_mut(id) else {
            return;
        };
        if defender.is_shooting() == shooting {
            return;
        }
        defender.set_shooting(shooting);
        out_events.push(Event::DefenderEngagementChanged {
            defender: id,
            shooting,
        });
    }

    fn spawn_enemy(&mut self, lane: Lane, speed: f32, out_events: &mut Vec<Event>) {
        let cell_size = self.rules.cell_size;
        let rect = Rect::new(self.rules.field_width, lane.y(cell_size), cell_size, cell_size);
        let health = self.rules.enemy_health;
        let enemy = self
            .enemies
            .insert_with(|id| Enemy::new(id, rect, speed, health));
        out_events.push(Event::EnemySpawned { enemy, lane, speed });
    }

    fn update_defenders(&mut self, out_events: &mut Vec<Event>) {
        let projectile_size = self.rules.projectile_size;
        let projectile_power = self.rules.projectile_power;
        let projectile_speed = self.rules.projectile_speed;
        let contact_damage = self.rules.contact_damage;

        for id in self.defenders.ids() {
            let Some(defender) = self.defenders.get_mut(id) else {
                continue;
            };

            if let Some(origin) = defender.update() {
                let rect = Rect::new(origin.x, origin.y, projectile_size, projectile_size);
                let projectile = self.projectiles.insert_with(|projectile| {
                    Projectile::new(projectile, rect, projectile_power, projectile_speed)
                });
                out_events.push(Event::ProjectileFired {
                    projectile,
                    defender: id,
                });
            }

            let defender_rect = defender.rect();
            let mut touching = Vec::new();
            for enemy in self.enemies.values_mut() {
                if enemy.rect().collides(&defender_rect) {
                    defender.take_damage(contact_damage);
                    enemy.freeze();
                    touching.push(enemy.id());
                }
            }

            if defender.is_destroyed() {
                for enemy in touching {
                    if let Some(enemy) = self.enemies.get_mut(enemy) {
                        enemy.release();
                    }
                }
                let _ = self.defenders.remove(id);
                out_events.push(Event::DefenderDestroyed { defender: id });
            }
        }
    }

    fn update_enemies(&mut self, out_events: &mut Vec<Event>) {
        for id in self.enemies.ids() {
            let Some(enemy) = self.enemies.get_mut(id) else {
                continue;
            };

            enemy.update();

            if !enemy.is_alive() {
                let reward = if self.rules.reward_divisor > 0.0 {
                    enemy.max_health() / self.rules.reward_divisor
                } else {
                    0.0
                };
                let _ = self.enemies.remove(id);
                self.resources += reward;
                self.score += reward;
                out_events.push(Event::EnemyDefeated { enemy: id, reward });
                continue;
            }

            if enemy.has_breached() && !self.game_over {
                self.game_over = true;
                out_events.push(Event::GameOver {
                    enemy: id,
                    frame: self.frame,
                });
            }
        }
    }

    fn update_projectiles(&mut self, out_events: &mut Vec<Event>) {
        let expiry_x = self.rules.field_width - self.rules.cell_size;

        for id in self.projectiles.ids() {
            let Some(projectile) = self.projectiles.get_mut(id) else {
                continue;
            };

            projectile.update();
            let rect = projectile.rect();
            let power = projectile.power();

            let target = self
                .enemies
                .values_mut()
                .find(|enemy| enemy.is_alive() && enemy.rect().collides(&rect));
            if let Some(enemy) = target {
                let remaining_health = enemy.take_damage(power);
                let enemy = enemy.id();
                let _ = self.projectiles.remove(id);
                out_events.push(Event::ProjectileHit {
                    projectile: id,
                    enemy,
                    remaining_health,
                });
                continue;
            }

            if rect.x > expiry_x {
                let _ = self.projectiles.remove(id);
                out_events.push(Event::ProjectileExpired { projectile: id });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::PlaceDefender { cell } => world.place_defender(cell, out_events),
        Command::SetDefenderShooting { defender, shooting } => {
            world.set_shooting(defender, shooting, out_events);
        }
        Command::SpawnEnemy { lane, speed } => world.spawn_enemy(lane, speed, out_events),
        Command::UpdateDefenders => world.update_defenders(out_events),
        Command::UpdateEnemies => world.update_enemies(out_events),
        Command::UpdateProjectiles => world.update_projectiles(out_events),
        Command::AdvanceFrame => {
            world.frame = world.frame.wrapping_add(1);
            out_events.push(Event::FrameAdvanced { frame: world.frame });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use lane_defence_core::{
        DefenderId, DefenderSnapshot, EnemySnapshot, ProjectileSnapshot, Rules,
    };

    use super::{Entity, Grid, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Rules the session was created with.
    #[must_use]
    pub fn rules(world: &World) -> &Rules {
        &world.rules
    }

    /// Provides read-only access to the playfield grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Accumulated score.
    #[must_use]
    pub fn score(world: &World) -> f32 {
        world.score
    }

    /// Resources available for purchases.
    #[must_use]
    pub fn resources(world: &World) -> f32 {
        world.resources
    }

    /// Reports whether an enemy has broken through.
    #[must_use]
    pub fn is_game_over(world: &World) -> bool {
        world.game_over
    }

    /// Number of frames advanced so far.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Captures every defender in identifier order.
    #[must_use]
    pub fn defenders(world: &World) -> Vec<DefenderSnapshot> {
        world.defenders.values().map(Entity::snapshot).collect()
    }

    /// Captures a single defender, if it still exists.
    #[must_use]
    pub fn defender(world: &World, id: DefenderId) -> Option<DefenderSnapshot> {
        world.defenders.get(id).map(Entity::snapshot)
    }

    /// Captures every enemy in identifier order.
    #[must_use]
    pub fn enemies(world: &World) -> Vec<EnemySnapshot> {
        world.enemies.values().map(Entity::snapshot).collect()
    }

    /// Captures every projectile in identifier order.
    #[must_use]
    pub fn projectiles(world: &World) -> Vec<ProjectileSnapshot> {
        world.projectiles.values().map(Entity::snapshot).collect()
    }

    /// Totals of identifiers issued per registry, removed entities included.
    #[must_use]
    pub fn issued(world: &World) -> IssuedCounts {
        IssuedCounts {
            defenders: world.defenders.issued(),
            enemies: world.enemies.issued(),
            projectiles: world.projectiles.issued(),
        }
    }

    /// Live entity counts per registry.
    #[must_use]
    pub fn population(world: &World) -> IssuedCounts {
        IssuedCounts {
            defenders: world.defenders.len() as u32,
            enemies: world.enemies.len() as u32,
            projectiles: world.projectiles.len() as u32,
        }
    }

    /// Per-registry entity tallies.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct IssuedCounts {
        /// Tally for the defender registry.
        pub defenders: u32,
        /// Tally for the enemy registry.
        pub enemies: u32,
        /// Tally for the projectile registry.
        pub projectiles: u32,
    }
}
