#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame orchestration for Lane Defence.
//!
//! The director owns the world together with the pure systems and runs them
//! once per frame in a fixed order. It then rebuilds the scene handed to the
//! rendering backend. It also decides when the backend should stop asking for
//! frames: the frame on which an enemy breaks through still asks for one more.
//! That final frame simulates as usual and returns [`Schedule::Halt`]; later
//! calls only redraw.

mod config;
mod scene;

pub use self::config::{ConfigError, DirectorConfig};

use glam::Vec2;
use lane_defence_core::{Command, Event, Point};
use lane_defence_rendering::{Color, FrameInput, Presentation, RenderingError, Schedule, Scene};
use lane_defence_system_builder::{Builder, BuilderInput};
use lane_defence_system_spawning::{Config as SpawningConfig, Spawning};
use lane_defence_system_targeting::Targeting;
use lane_defence_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

const PALETTE_STREAM: u64 = 1;

/// Drives a single game session.
#[derive(Debug)]
pub struct Director {
    world: World,
    builder: Builder,
    targeting: Targeting,
    spawning: Spawning,
    palette: ChaCha8Rng,
    halted: bool,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Director {
    /// Creates a director for a fresh session.
    pub fn new(config: DirectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let DirectorConfig {
            rules,
            seed,
            engagement,
        } = config;
        let seed = seed.unwrap_or_default();

        let mut palette = ChaCha8Rng::seed_from_u64(seed);
        palette.set_stream(PALETTE_STREAM);

        let director = Self {
            builder: Builder::new(&rules),
            targeting: Targeting::new(engagement),
            spawning: Spawning::new(SpawningConfig::from_rules(&rules, seed)),
            world: World::with_rules(rules),
            palette,
            halted: false,
            commands: Vec::new(),
            events: Vec::new(),
        };

        info!(
            seed,
            ?engagement,
            banner = query::welcome_banner(&director.world),
            "session started"
        );

        Ok(director)
    }

    /// Read-only access to the simulated world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Whether the director has stopped simulating.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Builds the presentation the backend starts from.
    pub fn presentation(&mut self) -> Result<Presentation, RenderingError> {
        let rules = query::rules(&self.world);
        let mut scene = Scene::new(
            Vec2::new(rules.field_width, rules.field_height),
            rules.cell_size,
        )?;
        let control_bar = self.roll_control_bar();
        scene::compose(&self.world, None, control_bar, &mut scene);

        Ok(Presentation::new(
            query::welcome_banner(&self.world),
            Color::WHITE,
            scene,
        ))
    }

    /// Runs one frame and rebuilds `scene` from the result.
    pub fn frame(&mut self, input: FrameInput, scene: &mut Scene) -> Schedule {
        let cursor = input.cursor.map(|cursor| Point::new(cursor.x, cursor.y));

        let schedule = if self.halted {
            Schedule::Halt
        } else {
            let schedule = if query::is_game_over(&self.world) {
                info!(frame = query::frame(&self.world), "final frame");
                self.halted = true;
                Schedule::Halt
            } else {
                Schedule::Continue
            };
            self.simulate(cursor, input.click);
            schedule
        };

        let control_bar = self.roll_control_bar();
        scene::compose(&self.world, cursor, control_bar, scene);

        schedule
    }

    /// Snapshot of the session's headline numbers.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let issued = query::issued(&self.world);
        Summary {
            frame: query::frame(&self.world),
            score: query::score(&self.world),
            resources: query::resources(&self.world),
            defenders_placed: issued.defenders,
            enemies_spawned: issued.enemies,
            projectiles_fired: issued.projectiles,
            game_over: query::is_game_over(&self.world),
        }
    }

    fn simulate(&mut self, cursor: Option<Point>, click: bool) {
        self.commands.clear();
        self.events.clear();

        self.builder
            .handle(BuilderInput::new(click, cursor), &mut self.commands);
        self.flush_commands();

        self.targeting.handle(
            &query::defenders(&self.world),
            &query::enemies(&self.world),
            query::rules(&self.world).field_width,
            &mut self.commands,
        );
        self.commands.push(Command::UpdateDefenders);
        self.commands.push(Command::UpdateEnemies);
        self.spawning
            .handle(query::frame(&self.world), &mut self.commands);
        self.commands.push(Command::UpdateProjectiles);
        self.commands.push(Command::AdvanceFrame);
        self.flush_commands();

        for event in &self.events {
            log_event(event);
        }
    }

    fn flush_commands(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn roll_control_bar(&mut self) -> Color {
        if self.palette.gen_bool(0.5) {
            Color::BLUE
        } else {
            Color::GREEN
        }
    }
}

/// Headline numbers of a session, used for end-of-run reporting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Summary {
    /// Frames simulated.
    pub frame: u64,
    /// Final score.
    pub score: f32,
    /// Resources left.
    pub resources: f32,
    /// Defenders placed over the whole session.
    pub defenders_placed: u32,
    /// Enemies spawned over the whole session.
    pub enemies_spawned: u32,
    /// Projectiles fired over the whole session.
    pub projectiles_fired: u32,
    /// Whether an enemy broke through.
    pub game_over: bool,
}

fn log_event(event: &Event) {
    match event {
        Event::DefenderPlaced {
            defender,
            cell,
            resources,
        } => debug!(
            defender = defender.get(),
            column = cell.column(),
            row = cell.row(),
            resources,
            "defender placed"
        ),
        Event::DefenderPlacementRejected { cell, reason } => debug!(
            column = cell.column(),
            row = cell.row(),
            ?reason,
            "placement rejected"
        ),
        Event::DefenderEngagementChanged { defender, shooting } => {
            debug!(defender = defender.get(), shooting, "engagement changed")
        }
        Event::DefenderDestroyed { defender } => {
            debug!(defender = defender.get(), "defender destroyed")
        }
        Event::EnemySpawned { enemy, lane, speed } => debug!(
            enemy = enemy.get(),
            lane = lane.row(),
            speed,
            "enemy spawned"
        ),
        Event::EnemyDefeated { enemy, reward } => {
            debug!(enemy = enemy.get(), reward, "enemy defeated")
        }
        Event::ProjectileFired {
            projectile,
            defender,
        } => debug!(
            projectile = projectile.get(),
            defender = defender.get(),
            "projectile fired"
        ),
        Event::ProjectileHit {
            projectile,
            enemy,
            remaining_health,
        } => debug!(
            projectile = projectile.get(),
            enemy = enemy.get(),
            remaining_health,
            "projectile hit"
        ),
        Event::ProjectileExpired { projectile } => {
            debug!(projectile = projectile.get(), "projectile expired")
        }
        Event::GameOver { enemy, frame } => info!(enemy = enemy.get(), frame, "game over"),
        Event::FrameAdvanced { .. } => {}
    }
}
