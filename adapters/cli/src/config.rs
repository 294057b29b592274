//! TOML configuration for headless simulation runs.

use std::{fs, io, path::Path, time::Duration};

use garden_defence_core::{LawnGeometry, ZombieKind, STARTING_SUN};
use serde::Deserialize;
use thiserror::Error;

/// Tunable parameters for a simulation run. Every field falls back to the
/// classic lawn when omitted.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SimulationConfig {
    pub(crate) geometry: LawnGeometry,
    pub(crate) starting_sun: u32,
    pub(crate) spawn_interval_ms: u64,
    pub(crate) sun_interval_ms: u64,
    pub(crate) seed: u64,
    pub(crate) zombie_rotation: Vec<ZombieKind>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            geometry: LawnGeometry::default(),
            starting_sun: STARTING_SUN,
            spawn_interval_ms: 10_000,
            sun_interval_ms: 5_000,
            seed: 0x6172_6465_6e00,
            zombie_rotation: vec![ZombieKind::Zombie],
        }
    }
}

/// Failures raised while loading a configuration file.
#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read config file {path}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config toml")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

impl SimulationConfig {
    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub(crate) fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let geometry = &self.geometry;
        if geometry.columns == 0 || geometry.rows == 0 {
            return Err(ConfigError::Invalid("the lawn needs at least one cell"));
        }
        if geometry.cell_width <= 0.0 || geometry.cell_height <= 0.0 {
            return Err(ConfigError::Invalid("cell dimensions must be positive"));
        }
        if self.spawn_interval_ms == 0 || self.sun_interval_ms == 0 {
            return Err(ConfigError::Invalid("intervals must be positive"));
        }
        if self.zombie_rotation.is_empty() {
            return Err(ConfigError::Invalid("zombie rotation must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub(crate) fn sun_interval(&self) -> Duration {
        Duration::from_millis(self.sun_interval_ms)
    }
}
