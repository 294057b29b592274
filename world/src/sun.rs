//! Falling suns that the player collects for currency.

use std::time::Duration;

use garden_defence_core::{LawnPoint, SunId, SunSnapshot, LOGIC_STEP, SUN_LINGER};

/// Sun drifting down from the top of the lawn.
#[derive(Clone, Debug)]
pub(crate) struct FallingSun {
    pub(crate) id: SunId,
    pub(crate) position: LawnPoint,
    pub(crate) collected: bool,
    speed: f32,
    lingered: Duration,
}

impl FallingSun {
    pub(crate) fn new(id: SunId, position: LawnPoint, speed: f32) -> Self {
        Self {
            id,
            position,
            collected: false,
            speed,
            lingered: Duration::ZERO,
        }
    }

    /// Moves the sun by one logic step.
    ///
    /// Uncollected suns fall until they reach `floor_y`. Collected suns stay
    /// put and count down their linger time; the return value reports whether
    /// the sun should now be discarded.
    pub(crate) fn step(&mut self, floor_y: f32) -> bool {
        if self.collected {
            self.lingered += LOGIC_STEP;
            return self.lingered >= SUN_LINGER;
        }

        if self.position.y < floor_y {
            self.position.y += self.speed;
        }
        false
    }

    pub(crate) fn snapshot(&self) -> SunSnapshot {
        SunSnapshot {
            id: self.id,
            position: self.position,
            collected: self.collected,
        }
    }
}
