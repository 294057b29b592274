#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic spawning system responsible for emitting zombie spawn commands.

use std::time::Duration;

use garden_defence_core::{Command, Event, ZombieKind};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Interval between two zombie spawns in a regular game.
pub const DEFAULT_SPAWN_INTERVAL: Duration = Duration::from_secs(10);

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Debug)]
pub struct Config {
    spawn_interval: Duration,
    rng_seed: u64,
    rotation: Vec<ZombieKind>,
}

impl Config {
    /// Creates a new configuration using the provided spawn cadence and seed.
    ///
    /// Every spawned zombie is a plain [`ZombieKind::Zombie`] until a
    /// rotation is supplied through [`Config::with_rotation`].
    #[must_use]
    pub fn new(spawn_interval: Duration, rng_seed: u64) -> Self {
        Self {
            spawn_interval,
            rng_seed,
            rotation: vec![ZombieKind::Zombie],
        }
    }

    /// Cycles through the provided kinds in order. An empty rotation keeps
    /// the current one.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec<ZombieKind>) -> Self {
        if !rotation.is_empty() {
            self.rotation = rotation;
        }
        self
    }
}

/// Pure system that deterministically emits spawn commands while the game runs.
#[derive(Debug)]
pub struct Spawning {
    config: Config,
    accumulator: Duration,
    rng: ChaCha8Rng,
    rotation_index: usize,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self {
            config,
            accumulator: Duration::ZERO,
            rng,
            rotation_index: 0,
        }
    }

    /// Consumes events to emit spawn commands for a lawn with `rows` rows.
    pub fn handle(&mut self, events: &[Event], game_over: bool, rows: u32, out: &mut Vec<Command>) {
        let mut accumulated = Duration::ZERO;
        for event in events {
            match event {
                Event::TimeAdvanced { dt } => accumulated = accumulated.saturating_add(*dt),
                Event::GameReset | Event::LawnConfigured { .. } => {
                    accumulated = Duration::ZERO;
                    self.restart();
                }
                _ => {}
            }
        }

        if game_over {
            self.accumulator = Duration::ZERO;
            return;
        }

        if self.config.spawn_interval.is_zero() || rows == 0 || accumulated.is_zero() {
            return;
        }

        self.accumulator = self.accumulator.saturating_add(accumulated);
        for _ in 0..self.resolve_spawn_attempts() {
            let row = self.rng.gen_range(0..rows);
            let kind = self.next_kind();
            out.push(Command::SpawnZombie { kind, row });
        }
    }

    fn restart(&mut self) {
        self.accumulator = Duration::ZERO;
        self.rotation_index = 0;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.rng_seed);
    }

    fn resolve_spawn_attempts(&mut self) -> usize {
        if self.config.spawn_interval.is_zero() {
            return 0;
        }

        let mut attempts = 0;
        while self.accumulator >= self.config.spawn_interval {
            self.accumulator -= self.config.spawn_interval;
            attempts += 1;
        }
        attempts
    }

    fn next_kind(&mut self) -> ZombieKind {
        let rotation = &self.config.rotation;
        let kind = rotation[self.rotation_index % rotation.len()];
        self.rotation_index = (self.rotation_index + 1) % rotation.len();
        kind
    }
}
