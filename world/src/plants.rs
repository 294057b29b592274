//! Plant entities rooted in the lawn.

use std::time::Duration;

use garden_defence_core::{
    CellCoord, LawnPoint, PlantId, PlantKind, PlantSnapshot, LOGIC_STEP,
};

/// Plant occupying a single lawn cell.
#[derive(Clone, Debug)]
pub(crate) struct Plant {
    pub(crate) id: PlantId,
    pub(crate) kind: PlantKind,
    pub(crate) cell: CellCoord,
    pub(crate) position: LawnPoint,
    pub(crate) health: f32,
    pub(crate) ready_in: Duration,
    frame: u32,
    frame_timer: Duration,
}

impl Plant {
    pub(crate) fn new(id: PlantId, kind: PlantKind, cell: CellCoord, position: LawnPoint) -> Self {
        Self {
            id,
            kind,
            cell,
            position,
            health: kind.stats().health,
            ready_in: Duration::ZERO,
            frame: 0,
            frame_timer: Duration::ZERO,
        }
    }

    /// Horizontal footprint used when zombies look for something to bite.
    pub(crate) fn half_width(&self) -> f32 {
        self.kind.stats().width / 2.0
    }

    pub(crate) fn cool_down(&mut self, dt: Duration) {
        self.ready_in = self.ready_in.saturating_sub(dt);
    }

    /// Advances the idle animation by one logic step.
    pub(crate) fn animate(&mut self) {
        let stats = self.kind.stats();
        if stats.frame_count == 0 {
            return;
        }

        self.frame_timer += LOGIC_STEP;
        if self.frame_timer >= stats.frame_duration {
            self.frame_timer = Duration::ZERO;
            self.frame = (self.frame + 1) % stats.frame_count;
        }
    }

    pub(crate) fn snapshot(&self) -> PlantSnapshot {
        PlantSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            position: self.position,
            health: self.health,
            frame: self.frame,
            ready_in: self.ready_in,
        }
    }
}
