#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that drops suns from the sky at a steady cadence.
//!
//! Drops keep coming after the game ends; only a reset or a new lawn
//! restarts the cadence.

use std::time::Duration;

use garden_defence_core::{Command, Event, LawnGeometry};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Interval between two sun drops in a regular game.
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_secs(5);

const EDGE_MARGIN: f32 = 30.0;
const MIN_SPEED: f32 = 1.0;
const SPEED_SPREAD: f32 = 1.5;

/// Configuration parameters required to construct the sun fall system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    drop_interval: Duration,
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided drop cadence and seed.
    #[must_use]
    pub const fn new(drop_interval: Duration, rng_seed: u64) -> Self {
        Self {
            drop_interval,
            rng_seed,
        }
    }
}

/// Emits `Command::DropSun` once per configured interval.
#[derive(Debug)]
pub struct SunFall {
    config: Config,
    accumulator: Duration,
    rng: ChaCha8Rng,
}

impl SunFall {
    /// Creates a new sun fall system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            accumulator: Duration::ZERO,
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed),
        }
    }

    /// Consumes events and the lawn geometry to emit sun drops.
    pub fn handle(&mut self, events: &[Event], geometry: &LawnGeometry, out: &mut Vec<Command>) {
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => {
                    self.accumulator = self.accumulator.saturating_add(*dt);
                }
                Event::GameReset | Event::LawnConfigured { .. } => {
                    self.accumulator = Duration::ZERO;
                    self.rng = ChaCha8Rng::seed_from_u64(self.config.rng_seed);
                }
                _ => {}
            }
        }

        if self.config.drop_interval.is_zero() {
            return;
        }

        while self.accumulator >= self.config.drop_interval {
            self.accumulator -= self.config.drop_interval;
            let (x, speed) = self.next_drop(geometry);
            out.push(Command::DropSun { x, speed });
        }
    }

    fn next_drop(&mut self, geometry: &LawnGeometry) -> (f32, f32) {
        let spread = (geometry.lawn_width() - 2.0 * EDGE_MARGIN).max(0.0);
        let x = geometry.origin_x + self.rng.gen::<f32>() * spread + EDGE_MARGIN;
        let speed = MIN_SPEED + self.rng.gen::<f32>() * SPEED_SPREAD;
        (x, speed)
    }
}
