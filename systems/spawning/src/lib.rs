#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting enemy spawn commands.
//!
//! Enemies spawn whenever the frame counter is a multiple of the current
//! interval. Every spawn shortens the interval by a fixed step as long as the
//! result stays above the floor, so pressure ramps up linearly and never
//! eases off.

use lane_defence_core::{Command, Lane, Rules};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    interval: u32,
    step: u32,
    floor: u32,
    lanes: u32,
    speed_min: f32,
    speed_max: f32,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided cadence and seed.
    #[must_use]
    pub const fn new(interval: u32, step: u32, floor: u32, rng_seed: u64) -> Self {
        Self {
            interval,
            step,
            floor,
            lanes: 5,
            speed_min: 0.4,
            speed_max: 0.6,
            rng_seed,
        }
    }

    /// Derives the cadence, lanes and speed range from session rules.
    #[must_use]
    pub fn from_rules(rules: &Rules, rng_seed: u64) -> Self {
        Self {
            interval: rules.spawn_interval,
            step: rules.spawn_interval_step,
            floor: rules.spawn_interval_floor,
            lanes: rules.lanes,
            speed_min: rules.enemy_speed_min,
            speed_max: rules.enemy_speed_max,
            rng_seed,
        }
    }

    /// Overrides the number of lanes enemies are spread across.
    #[must_use]
    pub fn with_lanes(mut self, lanes: u32) -> Self {
        self.lanes = lanes;
        self
    }

    /// Overrides the range enemy speeds are rolled from.
    #[must_use]
    pub fn with_speed_range(mut self, min: f32, max: f32) -> Self {
        self.speed_min = min;
        self.speed_max = max;
        self
    }
}

/// Pure system that deterministically emits spawn commands on a shrinking cadence.
#[derive(Debug)]
pub struct Spawning {
    interval: u32,
    step: u32,
    floor: u32,
    lanes: u32,
    speed_min: f32,
    speed_max: f32,
    rng: ChaCha8Rng,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            interval: config.interval,
            step: config.step,
            floor: config.floor,
            lanes: config.lanes,
            speed_min: config.speed_min,
            speed_max: config.speed_max,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Current number of frames between spawns.
    #[must_use]
    pub const fn interval(&self) -> u32 {
        self.interval
    }

    /// Emits a spawn command when `frame` lands on the current interval.
    pub fn handle(&mut self, frame: u64, out: &mut Vec<Command>) {
        if self.interval == 0 || self.lanes == 0 {
            return;
        }

        if frame % u64::from(self.interval) != 0 {
            return;
        }

        let lane = Lane::new(self.rng.gen_range(1..=self.lanes));
        let speed = self.roll_speed();
        out.push(Command::SpawnEnemy { lane, speed });

        self.shorten_interval();
    }

    fn roll_speed(&mut self) -> f32 {
        if self.speed_max > self.speed_min {
            self.rng.gen_range(self.speed_min..self.speed_max)
        } else {
            self.speed_min
        }
    }

    fn shorten_interval(&mut self) {
        let next = self.interval.saturating_sub(self.step);
        if next > self.floor {
            self.interval = next;
        }
    }
}
