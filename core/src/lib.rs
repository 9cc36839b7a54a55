#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems and adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then reports [`Event`] values
//! describing what actually happened. Geometry lives here as well so every
//! crate agrees on what it means for two rectangles to touch.

use serde::{Deserialize, Serialize};

/// Canonical banner shown when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Side length of the cursor pseudo-rectangle used for hover and click checks.
pub const CURSOR_EXTENT: f32 = 0.1;

/// Axis-aligned rectangle expressed in playfield units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal coordinate of the left edge.
    pub x: f32,
    /// Vertical coordinate of the top edge.
    pub y: f32,
    /// Horizontal extent of the rectangle.
    pub width: f32,
    /// Vertical extent of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the tiny rectangle that stands in for the pointer.
    #[must_use]
    pub const fn cursor(position: Point) -> Self {
        Self::new(position.x, position.y, CURSOR_EXTENT, CURSOR_EXTENT)
    }

    /// Coordinate of the left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Coordinate of the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Coordinate of the top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Coordinate of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Centre point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Reports whether the two rectangles overlap or share an edge.
    #[must_use]
    pub fn collides(&self, other: &Rect) -> bool {
        collision(self, other)
    }
}

/// Axis-aligned bounding-box overlap test.
///
/// Rectangles are only considered apart when one lies strictly beyond the
/// other along some axis, so rectangles that merely touch collide.
#[must_use]
pub fn collision(a: &Rect, b: &Rect) -> bool {
    !(a.left() > b.right()
        || a.right() < b.left()
        || a.top() > b.bottom()
        || a.bottom() < b.top())
}

/// Point in playfield units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Location of a single grid cell expressed as column and row indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell. Row zero is the control bar.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the rectangle covered by the cell for the provided cell size.
    #[must_use]
    pub fn rect(&self, cell_size: f32) -> Rect {
        Rect::new(
            self.column as f32 * cell_size,
            self.row as f32 * cell_size,
            cell_size,
            cell_size,
        )
    }
}

/// Horizontal lane enemies walk along, identified by its grid row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Lane(u32);

impl Lane {
    /// Creates a lane located on the provided grid row.
    #[must_use]
    pub const fn new(row: u32) -> Self {
        Self(row)
    }

    /// Grid row of the lane.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.0
    }

    /// Vertical coordinate of the lane's top edge.
    #[must_use]
    pub fn y(&self, cell_size: f32) -> f32 {
        self.0 as f32 * cell_size
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(u32);

        impl $name {
            /// Creates a new identifier with the provided numeric value.
            #[must_use]
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            /// Retrieves the numeric representation of the identifier.
            #[must_use]
            pub const fn get(&self) -> u32 {
                self.0
            }
        }
    };
}

entity_id!(
    /// Unique identifier assigned to a defender.
    DefenderId
);
entity_id!(
    /// Unique identifier assigned to an enemy.
    EnemyId
);
entity_id!(
    /// Unique identifier assigned to a projectile.
    ProjectileId
);

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Requests a defender on the provided cell.
    PlaceDefender {
        /// Cell the defender should occupy.
        cell: CellCoord,
    },
    /// Engages or disengages a defender's weapon.
    SetDefenderShooting {
        /// Defender whose weapon state changes.
        defender: DefenderId,
        /// Whether the defender should fire.
        shooting: bool,
    },
    /// Requests a new enemy entering from the right edge.
    SpawnEnemy {
        /// Lane the enemy walks along.
        lane: Lane,
        /// Distance the enemy covers per frame while unobstructed.
        speed: f32,
    },
    /// Runs the defender phase: firing timers, melee contact and deaths.
    UpdateDefenders,
    /// Runs the enemy phase: movement, defeats and the left-edge check.
    UpdateEnemies,
    /// Runs the projectile phase: flight, hits and expiry.
    UpdateProjectiles,
    /// Advances the frame counter.
    AdvanceFrame,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Confirms that a defender was placed.
    DefenderPlaced {
        /// Identifier assigned to the defender.
        defender: DefenderId,
        /// Cell the defender occupies.
        cell: CellCoord,
        /// Resources left after paying for the defender.
        resources: f32,
    },
    /// Reports that a placement request was turned down.
    DefenderPlacementRejected {
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Announces that a defender started or stopped firing.
    DefenderEngagementChanged {
        /// Defender whose weapon state changed.
        defender: DefenderId,
        /// Whether the defender now fires.
        shooting: bool,
    },
    /// Announces that a defender ran out of health and was removed.
    DefenderDestroyed {
        /// Identifier of the removed defender.
        defender: DefenderId,
    },
    /// Confirms that an enemy entered the field.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Lane the enemy walks along.
        lane: Lane,
        /// Unobstructed speed of the enemy.
        speed: f32,
    },
    /// Announces that an enemy was defeated and paid out its reward.
    EnemyDefeated {
        /// Identifier of the removed enemy.
        enemy: EnemyId,
        /// Amount added to both resources and score.
        reward: f32,
    },
    /// Confirms that a defender launched a projectile.
    ProjectileFired {
        /// Identifier assigned to the projectile.
        projectile: ProjectileId,
        /// Defender that fired it.
        defender: DefenderId,
    },
    /// Reports that a projectile struck an enemy and was consumed.
    ProjectileHit {
        /// Identifier of the consumed projectile.
        projectile: ProjectileId,
        /// Enemy that took the damage.
        enemy: EnemyId,
        /// Enemy health remaining after the hit.
        remaining_health: f32,
    },
    /// Reports that a projectile left the field without hitting anything.
    ProjectileExpired {
        /// Identifier of the removed projectile.
        projectile: ProjectileId,
    },
    /// Announces that an enemy reached the left edge. Emitted once per session.
    GameOver {
        /// Enemy that broke through.
        enemy: EnemyId,
        /// Frame on which the breach happened.
        frame: u64,
    },
    /// Confirms that the frame counter advanced.
    FrameAdvanced {
        /// Frame counter after advancing.
        frame: u64,
    },
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementError {
    /// The requested cell lies within the reserved control bar.
    ControlBar,
    /// The requested cell lies outside the playfield.
    OutOfBounds,
    /// A defender already stands on the requested cell.
    Occupied,
    /// The player cannot afford another defender.
    InsufficientResources,
}

/// Policy deciding when a defender becomes engaged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EngagementRule {
    /// Defenders never fire.
    Never,
    /// Defenders fire while an enemy on the field walks their lane at or beyond them.
    #[default]
    LaneAhead,
}

/// Immutable representation of a defender used for queries and drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DefenderSnapshot {
    /// Identifier allocated by the world.
    pub id: DefenderId,
    /// Area covered by the defender.
    pub rect: Rect,
    /// Remaining health.
    pub health: f32,
    /// Whether the defender is engaged.
    pub shooting: bool,
}

/// Immutable representation of an enemy used for queries and drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Identifier allocated by the world.
    pub id: EnemyId,
    /// Area covered by the enemy.
    pub rect: Rect,
    /// Remaining health.
    pub health: f32,
    /// Health the enemy spawned with.
    pub max_health: f32,
    /// Unobstructed speed.
    pub speed: f32,
    /// Distance covered on the next enemy phase.
    pub movement: f32,
}

/// Immutable representation of a projectile used for queries and drawing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileSnapshot {
    /// Identifier allocated by the world.
    pub id: ProjectileId,
    /// Area covered by the projectile.
    pub rect: Rect,
}

/// Tunable constants describing one game session.
///
/// Every field falls back to the canonical value so configuration files only
/// need to mention what they change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    /// Width of the playfield.
    pub field_width: f32,
    /// Height of the playfield.
    pub field_height: f32,
    /// Side length of a grid cell; also the height of the control bar.
    pub cell_size: f32,
    /// Resources available when the session starts.
    pub starting_resources: f32,
    /// Price of a single defender.
    pub defender_cost: f32,
    /// Health a defender is placed with.
    pub defender_health: f32,
    /// Health a defender loses per frame per touching enemy.
    pub contact_damage: f32,
    /// Number of engaged frames between two shots.
    pub fire_period: u32,
    /// Damage dealt by a projectile.
    pub projectile_power: f32,
    /// Distance a projectile covers per frame.
    pub projectile_speed: f32,
    /// Side length of a projectile.
    pub projectile_size: f32,
    /// Health an enemy spawns with.
    pub enemy_health: f32,
    /// Slowest speed an enemy can roll.
    pub enemy_speed_min: f32,
    /// Exclusive upper bound of the enemy speed roll.
    pub enemy_speed_max: f32,
    /// Reward paid per defeated enemy is its maximum health divided by this.
    pub reward_divisor: f32,
    /// Number of lanes below the control bar enemies can spawn on.
    pub lanes: u32,
    /// Frames between spawns at the start of a session.
    pub spawn_interval: u32,
    /// Amount the spawn interval shrinks after every spawn.
    pub spawn_interval_step: u32,
    /// The spawn interval never shrinks to or below this value.
    pub spawn_interval_floor: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            field_width: 900.0,
            field_height: 600.0,
            cell_size: 100.0,
            starting_resources: 300.0,
            defender_cost: 100.0,
            defender_health: 100.0,
            contact_damage: 0.2,
            fire_period: 100,
            projectile_power: 200.0,
            projectile_speed: 5.0,
            projectile_size: 10.0,
            enemy_health: 200.0,
            enemy_speed_min: 0.4,
            enemy_speed_max: 0.6,
            reward_divisor: 10.0,
            lanes: 5,
            spawn_interval: 600,
            spawn_interval_step: 100,
            spawn_interval_floor: 120,
        }
    }
}

impl Rules {
    /// Number of whole cell columns spanning the playfield.
    #[must_use]
    pub fn columns(&self) -> u32 {
        if self.cell_size <= 0.0 {
            return 0;
        }
        (self.field_width / self.cell_size).ceil() as u32
    }

    /// Maps a playfield position to the cell containing it by snapping down.
    ///
    /// Returns `None` for negative coordinates or a degenerate cell size.
    #[must_use]
    pub fn cell_at(&self, position: Point) -> Option<CellCoord> {
        if self.cell_size <= 0.0 || position.x < 0.0 || position.y < 0.0 {
            return None;
        }
        let snapped_x = position.x - position.x % self.cell_size;
        let snapped_y = position.y - position.y % self.cell_size;
        Some(CellCoord::new(
            (snapped_x / self.cell_size) as u32,
            (snapped_y / self.cell_size) as u32,
        ))
    }
}
